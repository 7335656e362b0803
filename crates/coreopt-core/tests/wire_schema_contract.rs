//! Contract Test: Wire Schema
//!
//! This test verifies that declared options are exposed to the host in the
//! host's required shape.
//!
//! Constraints verified:
//! - The wire string is built once and never changes with the value
//! - Registering twice never duplicates a published entry
//! - Each construction strategy yields the documented choices
//!
//! If this test fails, hosts will render wrong or stale option lists.

mod common;

use common::*;
use coreopt_core::{Choice, CoreOption, Variable};

#[test]
fn wire_string_is_stable_across_value_changes() {
    let (registry, host) = scripted_registry();
    let mut scale = CoreOption::offset(
        &registry,
        "core_efb_scale",
        "EFB scale",
        1i32,
        ["x1", "x2", "x3"],
    );
    let wire = scale.wire_string().to_string();
    assert_eq!(wire, "EFB scale; x1|x2|x3");

    for label in ["x2", "x3", "x1", "x3"] {
        host.select("core_efb_scale", label);
        registry.invalidate_all();
        scale.updated();
        assert_eq!(scale.wire_string(), wire);
    }
    assert_eq!(*scale.value(), 3);

    assert_eq!(
        registry.variables(),
        vec![Variable::new("core_efb_scale", "EFB scale; x1|x2|x3")]
    );
}

#[test]
fn register_twice_does_not_duplicate_entries() {
    let (registry, _host) = scripted_registry();
    let mut option = CoreOption::toggle(&registry, "core_fastmem", "Fast memory", true);

    assert!(!option.register());
    assert!(!option.register());

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.variables().len(), 1);
}

#[test]
fn indexed_labels_map_to_positions() {
    let (registry, _host) = scripted_registry();
    let option: CoreOption<u32> = CoreOption::indexed(
        &registry,
        "core_sensor_bar",
        "Sensor bar position",
        ["bottom", "top", "left", "right"],
    );

    for (i, choice) in option.choices().iter().enumerate() {
        assert_eq!(choice.value, i as u32, "label {} maps to {}", choice.label, i);
    }
}

#[test]
fn toggle_choices_follow_initial_state() {
    let (registry, _host) = scripted_registry();

    let on = CoreOption::toggle(&registry, "core_dsp_hle", "DSP HLE", true);
    assert_eq!(
        on.choices(),
        &[Choice::new("enabled", true), Choice::new("disabled", false)]
    );
    assert_eq!(on.wire_string(), "DSP HLE; enabled|disabled");

    let off = CoreOption::toggle(&registry, "core_widescreen_hack", "Widescreen hack", false);
    assert_eq!(
        off.choices(),
        &[Choice::new("enabled", false), Choice::new("disabled", true)]
    );
}

#[test]
fn range_resolves_host_label_to_value() {
    let (registry, host) = scripted_registry();
    host.select("core_max_anisotropy", "5");

    let mut anisotropy = CoreOption::range(
        &registry,
        "core_max_anisotropy",
        "Max anisotropy",
        0i32,
        17,
        1,
    );

    assert_eq!(anisotropy.choices().len(), 17);
    for (i, choice) in anisotropy.choices().iter().enumerate() {
        assert_eq!(choice.label, i.to_string());
        assert_eq!(choice.value, i as i32);
    }

    anisotropy.updated();
    assert_eq!(*anisotropy.value(), 5);
}

#[test]
fn identity_strings_resolve_to_their_label() {
    let (registry, host) = scripted_registry();
    host.select("core_renderer", "Software");

    let renderer: CoreOption<String> = CoreOption::identity(
        &registry,
        "core_renderer",
        "Renderer",
        ["Hardware", "Software", "Null"],
    );

    assert_eq!(renderer.value(), "Software");
    assert_eq!(renderer.wire_string(), "Renderer; Hardware|Software|Null");
}

#[test]
fn published_entries_follow_declaration_order() {
    let (registry, _host) = scripted_registry();

    let _a = CoreOption::toggle(&registry, "a", "A", true);
    let _b = CoreOption::pairs(&registry, "b", "B", [("32000", 32000u32), ("48000", 48000)]);
    let _c = CoreOption::range(&registry, "c", "C", 0u8, 3, 2);

    let keys: Vec<String> = registry.variables().into_iter().map(|v| v.key).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    assert_eq!(registry.variables()[2].value, "C; 0|2|4");
}
