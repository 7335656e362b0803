// # Host Trait
//
// Defines the settings protocol of the application that embeds the core.
//
// ## Purpose
//
// The host owns the user-facing settings UI and whatever storage backs it.
// The core only ever talks to it through three synchronous requests:
//
// - push the option schema once (`set_variables`)
// - read the currently selected label of one option (`get_variable`)
// - ask whether anything changed since the last ask (`variable_update`)
//
// ## Implementations
//
// - `MemoryHost` (this crate): in-memory selections, for embedding and tests
// - `FileHost` (coreopt-host-file): selections read from a TOML file

use crate::wire::Variable;

/// Settings protocol of the embedding application
///
/// All methods are synchronous and expected not to block. A host that cannot
/// answer a request signals it through the return value; none of these calls
/// can fail in a way the core would surface as an error.
///
/// # Thread Safety
///
/// Hosts are shared through `Arc<dyn Host>`, so implementations must be
/// `Send + Sync`. The core itself calls them from a single thread.
pub trait Host: Send + Sync {
    /// Receive the option schema
    ///
    /// # Parameters
    ///
    /// - `variables`: every registered option in registration order, followed
    ///   by the sentinel entry
    ///
    /// # Returns
    ///
    /// `true` if the host accepted the schema
    fn set_variables(&self, variables: &[Variable]) -> bool;

    /// Read the selected label of an option
    ///
    /// # Parameters
    ///
    /// - `key`: The option id
    ///
    /// # Returns
    ///
    /// - `Some(label)`: The label the user selected
    /// - `None`: The host does not know this option (or cannot answer)
    fn get_variable(&self, key: &str) -> Option<String>;

    /// Ask whether any selection changed since the previous call
    ///
    /// # Returns
    ///
    /// - `Some(true)`: At least one selection changed
    /// - `Some(false)`: Nothing changed
    /// - `None`: The host does not support change queries
    fn variable_update(&self) -> Option<bool>;
}
