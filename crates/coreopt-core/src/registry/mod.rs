//! Option registry
//!
//! The registry collects every declared option in declaration order and is
//! the single point of contact with the [`Host`].
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use coreopt_core::{CoreOption, MemoryHost, OptionRegistry};
//!
//! let host = MemoryHost::new();
//! let registry = Arc::new(OptionRegistry::with_host(Arc::new(host.clone())));
//!
//! let mut fastmem = CoreOption::toggle(&registry, "core_fastmem", "Fast memory", true);
//!
//! // Once at startup
//! registry.publish();
//!
//! // Once per frame
//! registry.check_for_updates();
//! if fastmem.updated() {
//!     println!("fastmem is now {}", fastmem.value());
//! }
//! ```
//!
//! ## Invalidation
//!
//! The host only says *that* something changed, never *what*. A positive
//! answer marks every registered option dirty; each option re-resolves
//! lazily on its next [`CoreOption::updated`](crate::CoreOption::updated).

use crate::traits::Host;
use crate::wire::Variable;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// Registry of declared options
///
/// Options hold an `Arc<OptionRegistry>` handle and register themselves on
/// construction. The registry shares each option's dirty flag, so it never
/// refers to freed state even if an option is dropped early.
///
/// ## Thread Safety
///
/// The registry uses interior mutability (a mutex around the lists, a
/// `RwLock` around the host slot) so it can be shared by `Arc`. The polling
/// model itself is single-threaded.
#[derive(Default)]
pub struct OptionRegistry {
    /// Published entries and dirty flags
    state: Mutex<RegistryState>,

    /// Attached host, if any
    host: RwLock<Option<Arc<dyn Host>>>,
}

#[derive(Default)]
struct RegistryState {
    /// `(id, wire string)` in registration order, possibly sentinel-terminated
    published: Vec<Variable>,

    /// One dirty flag per registered option, in registration order
    dirty_flags: Vec<Arc<AtomicBool>>,
}

impl OptionRegistry {
    /// Create an empty registry with no host attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry talking to `host`
    pub fn with_host(host: Arc<dyn Host>) -> Self {
        let registry = Self::new();
        registry.attach_host(host);
        registry
    }

    /// Attach (or replace) the host
    pub fn attach_host(&self, host: Arc<dyn Host>) {
        *self.host.write().unwrap_or_else(PoisonError::into_inner) = Some(host);
        debug!("Host attached to option registry");
    }

    /// Detach the host; later queries behave as "host unreachable"
    pub fn detach_host(&self) {
        *self.host.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a host is attached
    pub fn has_host(&self) -> bool {
        self.host().is_some()
    }

    /// Number of registered options
    pub fn len(&self) -> usize {
        self.lock().dirty_flags.len()
    }

    /// Whether no option is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the published list, including the sentinel if present
    pub fn variables(&self) -> Vec<Variable> {
        self.lock().published.clone()
    }

    /// Send every option's id and wire string to the host
    ///
    /// The list is terminated by a single sentinel entry; calling this again
    /// does not add a second one but re-sends the whole list.
    ///
    /// # Returns
    ///
    /// `true` if the list was handed to a host. `false` when nothing is
    /// registered, no host is attached, or the host refused the schema.
    pub fn publish(&self) -> bool {
        let variables = {
            let mut state = self.lock();
            if state.published.is_empty() {
                return false;
            }
            if !state.published.last().is_some_and(Variable::is_sentinel) {
                state.published.push(Variable::sentinel());
            }
            state.published.clone()
        };

        let Some(host) = self.host() else {
            warn!("No host attached, option schema not published");
            return false;
        };

        let accepted = host.set_variables(&variables);
        if accepted {
            info!("Published {} option(s) to host", variables.len() - 1);
        } else {
            warn!("Host refused the option schema");
        }
        accepted
    }

    /// Ask the host whether any selection changed, and invalidate if so
    ///
    /// # Returns
    ///
    /// `true` if every option was marked dirty. `false` if the host said
    /// nothing changed, cannot answer, or is not attached.
    pub fn check_for_updates(&self) -> bool {
        let Some(host) = self.host() else {
            return false;
        };

        match host.variable_update() {
            Some(true) => {
                let count = self.invalidate_all();
                debug!("Host reported option changes, {} option(s) marked dirty", count);
                true
            }
            Some(false) => false,
            None => {
                debug!("Host does not support change queries");
                false
            }
        }
    }

    /// Mark every registered option dirty
    ///
    /// # Returns
    ///
    /// The number of options invalidated
    pub fn invalidate_all(&self) -> usize {
        let state = self.lock();
        for flag in &state.dirty_flags {
            flag.store(true, Ordering::Release);
        }
        state.dirty_flags.len()
    }

    /// Append an option's entry and dirty flag
    ///
    /// An entry registered after a publish goes before the trailing sentinel.
    pub(crate) fn register(&self, id: &str, wire_string: &str, dirty: Arc<AtomicBool>) {
        let mut state = self.lock();

        if state.published.iter().any(|v| v.key == id) {
            warn!(option = id, "Option id registered more than once");
        }

        let entry = Variable::new(id, wire_string);
        if state.published.last().is_some_and(Variable::is_sentinel) {
            let at = state.published.len() - 1;
            state.published.insert(at, entry);
        } else {
            state.published.push(entry);
        }
        state.dirty_flags.push(dirty);

        debug!(option = id, wire = wire_string, "Option registered");
    }

    /// Read the host's selected label for `key`
    ///
    /// Empty answers count as absent.
    pub(crate) fn get_variable(&self, key: &str) -> Option<String> {
        self.host()?
            .get_variable(key)
            .filter(|value| !value.is_empty())
    }

    fn host(&self) -> Option<Arc<dyn Host>> {
        self.host
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for OptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionRegistry")
            .field("options", &self.len())
            .field("has_host", &self.has_host())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn flag() -> Arc<AtomicBool> {
        Arc::new(AtomicBool::new(false))
    }

    #[test]
    fn test_registry_registration() {
        let registry = OptionRegistry::new();

        // Initially empty
        assert!(registry.is_empty());
        assert!(!registry.publish());

        registry.register("a", "A; x|y", flag());
        registry.register("b", "B; 1|2", flag());

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.variables(),
            vec![Variable::new("a", "A; x|y"), Variable::new("b", "B; 1|2")]
        );
    }

    #[test]
    fn test_publish_without_host_still_terminates_list() {
        let registry = OptionRegistry::new();
        registry.register("a", "A; x", flag());

        assert!(!registry.publish());
        assert!(registry.variables().last().unwrap().is_sentinel());
    }

    #[test]
    fn test_register_after_publish_keeps_sentinel_last() {
        let host = MemoryHost::new();
        let registry = OptionRegistry::with_host(Arc::new(host.clone()));
        registry.register("a", "A; x", flag());
        assert!(registry.publish());

        registry.register("b", "B; y", flag());
        let variables = registry.variables();
        assert_eq!(variables.len(), 3);
        assert_eq!(variables[1].key, "b");
        assert!(variables[2].is_sentinel());
    }

    #[test]
    fn test_invalidate_all_sets_every_flag() {
        let registry = OptionRegistry::new();
        let (a, b) = (flag(), flag());
        registry.register("a", "A; x", Arc::clone(&a));
        registry.register("b", "B; y", Arc::clone(&b));

        assert_eq!(registry.invalidate_all(), 2);
        assert!(a.load(Ordering::Acquire));
        assert!(b.load(Ordering::Acquire));
    }

    #[test]
    fn test_empty_answer_counts_as_absent() {
        let host = MemoryHost::new();
        host.set_value("a", "");
        let registry = OptionRegistry::with_host(Arc::new(host));

        assert_eq!(registry.get_variable("a"), None);
    }

    #[test]
    fn test_detach_host() {
        let registry = OptionRegistry::with_host(Arc::new(MemoryHost::new()));
        assert!(registry.has_host());

        registry.detach_host();
        assert!(!registry.has_host());
        assert!(!registry.check_for_updates());
    }
}
