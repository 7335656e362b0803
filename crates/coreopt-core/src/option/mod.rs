//! Typed option descriptors
//!
//! A [`CoreOption`] owns one configuration item: its fixed list of
//! `(label, value)` choices, the wire string exposed to the host, and the
//! currently resolved typed value.
//!
//! ## Resolution
//!
//! The current value is only re-read from the host when the option is dirty.
//! An option starts dirty, and becomes dirty again whenever
//! [`OptionRegistry::check_for_updates`] sees a change. Callers run
//! [`CoreOption::updated`] before consuming the value:
//!
//! 1. Not dirty: nothing happens, the host is not queried
//! 2. Dirty: the flag is cleared and the host's label looked up
//! 3. The first choice whose label matches wins; no match (or no answer)
//!    falls back to the first choice
//! 4. `true` is returned only if the typed value actually changed

pub mod choice;
pub mod value;

pub use choice::{Choice, ChoiceSpec, TOGGLE_DISABLED_LABEL, TOGGLE_ENABLED_LABEL};
pub use value::OptionValue;

use crate::error::{Error, Result};
use crate::registry::OptionRegistry;
use crate::wire::format_wire_string;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// A typed, host-backed configuration option
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use coreopt_core::{CoreOption, MemoryHost, OptionRegistry};
///
/// let host = MemoryHost::new();
/// host.set_value("core_anisotropy", "4");
/// let registry = Arc::new(OptionRegistry::with_host(Arc::new(host)));
///
/// let anisotropy = CoreOption::range(&registry, "core_anisotropy", "Max anisotropy", 0, 17, 1);
/// assert_eq!(anisotropy.wire_string().split('|').count(), 17);
/// assert_eq!(*anisotropy.value(), 4);
/// ```
#[derive(Debug)]
pub struct CoreOption<T: OptionValue> {
    /// Host-facing key
    id: String,

    /// Human-readable name, first part of the wire string
    display_name: String,

    /// Ordered choices, never empty
    choices: Vec<Choice<T>>,

    /// Currently resolved value
    value: T,

    /// Shared with the registry, which sets it on host changes
    dirty: Arc<AtomicBool>,

    /// Built once by `register`
    wire_string: String,

    /// Registry handle used for host queries
    registry: Arc<OptionRegistry>,
}

impl<T: OptionValue> CoreOption<T> {
    /// Declare an option and register it
    ///
    /// # Returns
    ///
    /// - `Ok(option)`: Registered, with its value resolved once
    /// - `Err(Error::InvalidInput)`: Empty id, or `spec` yields no choices
    pub fn try_new(
        registry: &Arc<OptionRegistry>,
        id: impl Into<String>,
        display_name: impl Into<String>,
        spec: ChoiceSpec<T>,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::invalid_input("option id cannot be empty"));
        }

        let choices = spec
            .into_choices()
            .map_err(|e| Error::invalid_input(format!("option '{id}': {e}")))?;
        let value = choices[0].value.clone();

        let mut option = Self {
            id,
            display_name: display_name.into(),
            choices,
            value,
            dirty: Arc::new(AtomicBool::new(true)),
            wire_string: String::new(),
            registry: Arc::clone(registry),
        };
        option.register();

        Ok(option)
    }

    /// Declare an option and register it
    ///
    /// # Panics
    ///
    /// If the declaration is invalid (see [`CoreOption::try_new`]). Options
    /// are declared once at startup, so an invalid one is a programming error.
    pub fn new(
        registry: &Arc<OptionRegistry>,
        id: impl Into<String>,
        display_name: impl Into<String>,
        spec: ChoiceSpec<T>,
    ) -> Self {
        match Self::try_new(registry, id, display_name, spec) {
            Ok(option) => option,
            Err(e) => panic!("invalid option declaration: {e}"),
        }
    }

    /// Declare an option from explicit `(label, value)` pairs
    ///
    /// # Panics
    ///
    /// If `pairs` is empty.
    pub fn pairs<I, L>(
        registry: &Arc<OptionRegistry>,
        id: impl Into<String>,
        display_name: impl Into<String>,
        pairs: I,
    ) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
    {
        Self::new(registry, id, display_name, ChoiceSpec::pairs(pairs))
    }

    /// Declare an option whose values are the label positions
    ///
    /// # Panics
    ///
    /// If `labels` is empty or `T` has no index values.
    pub fn indexed<I, L>(
        registry: &Arc<OptionRegistry>,
        id: impl Into<String>,
        display_name: impl Into<String>,
        labels: I,
    ) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::new(registry, id, display_name, ChoiceSpec::indexed(labels))
    }

    /// Declare an option whose values equal their labels
    ///
    /// # Panics
    ///
    /// If `labels` is empty or `T` is not built from labels.
    pub fn identity<I, L>(
        registry: &Arc<OptionRegistry>,
        id: impl Into<String>,
        display_name: impl Into<String>,
        labels: I,
    ) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::new(registry, id, display_name, ChoiceSpec::identity(labels))
    }

    /// Declare an option whose values are `first + position`
    ///
    /// # Panics
    ///
    /// If `labels` is empty or the values overflow `T`.
    pub fn offset<I, L>(
        registry: &Arc<OptionRegistry>,
        id: impl Into<String>,
        display_name: impl Into<String>,
        first: T,
        labels: I,
    ) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::new(registry, id, display_name, ChoiceSpec::offset(first, labels))
    }

    /// Declare `count` options `first, first + step, ...` labeled by value
    ///
    /// # Panics
    ///
    /// If `count` is zero or the values overflow `T`.
    pub fn range(
        registry: &Arc<OptionRegistry>,
        id: impl Into<String>,
        display_name: impl Into<String>,
        first: T,
        count: usize,
        step: T,
    ) -> Self {
        Self::new(
            registry,
            id,
            display_name,
            ChoiceSpec::range(first, count, step),
        )
    }

    /// Add this option to its registry
    ///
    /// Builds the wire string, registers it with the dirty flag, then
    /// resolves once and leaves the option dirty so the first real access
    /// resolves again. Options register themselves on construction; later
    /// calls are no-ops.
    ///
    /// # Returns
    ///
    /// `true` if this call registered the option
    pub fn register(&mut self) -> bool {
        if !self.wire_string.is_empty() {
            return false;
        }

        self.wire_string = format_wire_string(
            &self.display_name,
            self.choices.iter().map(|c| c.label.as_str()),
        );
        self.registry
            .register(&self.id, &self.wire_string, Arc::clone(&self.dirty));

        self.dirty.store(true, Ordering::Release);
        self.updated();
        self.dirty.store(true, Ordering::Release);

        true
    }

    /// Re-resolve the value against the host if the option is dirty
    ///
    /// # Returns
    ///
    /// `true` if the value changed
    pub fn updated(&mut self) -> bool {
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return false;
        }

        let mut value = self.default_value().clone();

        if let Some(selected) = self.registry.get_variable(&self.id) {
            match self.choices.iter().find(|choice| choice.label == selected) {
                Some(choice) => value = choice.value.clone(),
                None => debug!(
                    option = %self.id,
                    label = %selected,
                    "Host selected an unknown label, using the default"
                ),
            }
        }

        if value == self.value {
            return false;
        }

        debug!(option = %self.id, from = ?self.value, to = ?value, "Option value changed");
        self.value = value;
        true
    }

    /// Host-facing key
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Choices in declaration order
    pub fn choices(&self) -> &[Choice<T>] {
        &self.choices
    }

    /// Description string sent to the host
    pub fn wire_string(&self) -> &str {
        &self.wire_string
    }

    /// Current value, as of the last resolution
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Owned copy of the current value
    pub fn get(&self) -> T {
        self.value.clone()
    }

    /// Value of the first choice
    pub fn default_value(&self) -> &T {
        &self.choices[0].value
    }

    /// Label of the first choice holding the current value
    pub fn selected_label(&self) -> &str {
        self.choices
            .iter()
            .find(|choice| choice.value == self.value)
            .map_or(self.choices[0].label.as_str(), |choice| choice.label.as_str())
    }

    /// Whether the next `updated` call will query the host
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }
}

impl CoreOption<bool> {
    /// Declare an on/off option
    ///
    /// The choices are `("enabled", initial)` then `("disabled", !initial)`,
    /// so the host's default (first) entry is always labeled "enabled".
    pub fn toggle(
        registry: &Arc<OptionRegistry>,
        id: impl Into<String>,
        display_name: impl Into<String>,
        initial: bool,
    ) -> Self {
        Self::new(registry, id, display_name, ChoiceSpec::Toggle(initial))
    }
}
