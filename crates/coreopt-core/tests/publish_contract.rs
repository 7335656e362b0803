//! Contract Test: Schema Publication
//!
//! This test verifies how the option list is handed to the host.
//!
//! Constraints verified:
//! - Nothing is sent when no option is registered
//! - The list ends with exactly one sentinel entry, however often it is sent
//! - Every publish re-sends the whole list
//!
//! If this test fails, hosts may read past the end of the schema or show
//! duplicated options.

mod common;

use common::*;
use coreopt_core::{CoreOption, MemoryHost, OptionRegistry, Variable};
use std::sync::Arc;

fn sentinel_count(list: &[Variable]) -> usize {
    list.iter().filter(|v| v.is_sentinel()).count()
}

#[test]
fn empty_registry_publishes_nothing() {
    let (registry, host) = scripted_registry();

    assert!(!registry.publish());
    assert!(host.published().is_empty());
    assert!(registry.variables().is_empty());
}

#[test]
fn repeated_publish_keeps_single_sentinel() {
    let (registry, host) = scripted_registry();
    let _fastmem = CoreOption::toggle(&registry, "core_fastmem", "Fast memory", true);
    let _rate = CoreOption::pairs(&registry, "core_rate", "Rate", [("32000", 32000u32), ("48000", 48000)]);

    assert!(registry.publish());
    assert!(registry.publish());
    assert!(registry.publish());

    let published = host.published();
    assert_eq!(published.len(), 3, "each publish re-sends the list");

    for list in &published {
        assert_eq!(list.len(), 3);
        assert_eq!(sentinel_count(list), 1);
        assert!(list.last().unwrap().is_sentinel());
        assert_eq!(list[0], Variable::new("core_fastmem", "Fast memory; enabled|disabled"));
        assert_eq!(list[1], Variable::new("core_rate", "Rate; 32000|48000"));
    }
}

#[test]
fn late_registration_is_published_before_sentinel() {
    let (registry, host) = scripted_registry();
    let _a = CoreOption::toggle(&registry, "a", "A", true);
    registry.publish();

    let _b = CoreOption::toggle(&registry, "b", "B", false);
    registry.publish();

    let last = host.published().pop().unwrap();
    let keys: Vec<&str> = last.iter().map(|v| v.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", ""]);
}

#[test]
fn memory_host_receives_schema() {
    let host = MemoryHost::new();
    let registry = Arc::new(OptionRegistry::with_host(Arc::new(host.clone())));
    let _texture = CoreOption::pairs(
        &registry,
        "core_texture_cache",
        "Texture cache accuracy",
        [("fast", 128), ("medium", 512), ("safe", 0)],
    );

    assert!(registry.publish());
    assert_eq!(host.publish_count(), 1);
    assert_eq!(
        host.schema(),
        vec![
            Variable::new("core_texture_cache", "Texture cache accuracy; fast|medium|safe"),
            Variable::sentinel(),
        ]
    );
}

#[test]
fn publish_without_host_is_noop() {
    let registry = Arc::new(OptionRegistry::new());
    let _a = CoreOption::toggle(&registry, "a", "A", true);

    assert!(!registry.publish());
    assert!(!registry.publish());
    assert_eq!(sentinel_count(&registry.variables()), 1);
}
