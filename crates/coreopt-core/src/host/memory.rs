// # Memory Host
//
// In-memory implementation of Host.
//
// ## Purpose
//
// Holds the selected label of every option in a map, the way a frontend
// keeps its settings UI state. Useful for embedding the core in
// applications that manage settings themselves, and for tests.
//
// ## Change Reporting
//
// - `set_value` / `remove_value` raise a one-shot "changed" flag
// - `variable_update` returns and clears that flag
// - with `without_update_support`, `variable_update` answers `None`

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::Host;
use crate::wire::Variable;

/// In-memory host implementation
///
/// Cloning yields another handle to the same state, so a test (or the
/// embedding application) can keep one handle while the registry owns
/// another.
///
/// # Example
///
/// ```rust
/// use coreopt_core::{Host, MemoryHost};
///
/// let host = MemoryHost::new();
/// host.set_value("core_renderer", "Software");
///
/// assert_eq!(host.get_variable("core_renderer").as_deref(), Some("Software"));
/// assert_eq!(host.variable_update(), Some(true));
/// assert_eq!(host.variable_update(), Some(false));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryHost {
    inner: Arc<RwLock<MemoryHostState>>,
    queries: Arc<AtomicUsize>,
}

#[derive(Debug)]
struct MemoryHostState {
    values: HashMap<String, String>,
    schema: Vec<Variable>,
    publish_count: usize,
    changed: bool,
    supports_update: bool,
}

impl MemoryHost {
    /// Create a host with no selections
    pub fn new() -> Self {
        Self::from_values(HashMap::new())
    }

    /// Create a host with initial selections
    ///
    /// Initial selections do not count as a change.
    pub fn from_values(values: HashMap<String, String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryHostState {
                values,
                schema: Vec::new(),
                publish_count: 0,
                changed: false,
                supports_update: true,
            })),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Make `variable_update` answer "unsupported"
    pub fn without_update_support(self) -> Self {
        self.write().supports_update = false;
        self
    }

    /// Select `label` for option `key`
    pub fn set_value(&self, key: impl Into<String>, label: impl Into<String>) {
        let mut state = self.write();
        state.values.insert(key.into(), label.into());
        state.changed = true;
    }

    /// Forget the selection of option `key`
    pub fn remove_value(&self, key: &str) {
        let mut state = self.write();
        if state.values.remove(key).is_some() {
            state.changed = true;
        }
    }

    /// The schema received by the latest `set_variables`
    pub fn schema(&self) -> Vec<Variable> {
        self.read().schema.clone()
    }

    /// Number of `set_variables` calls received
    pub fn publish_count(&self) -> usize {
        self.read().publish_count
    }

    /// Number of `get_variable` calls received
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryHostState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryHostState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn set_variables(&self, variables: &[Variable]) -> bool {
        let mut state = self.write();
        state.schema = variables.to_vec();
        state.publish_count += 1;
        true
    }

    fn get_variable(&self, key: &str) -> Option<String> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.read().values.get(key).cloned()
    }

    fn variable_update(&self) -> Option<bool> {
        let mut state = self.write();
        if !state.supports_update {
            return None;
        }
        Some(std::mem::take(&mut state.changed))
    }
}
