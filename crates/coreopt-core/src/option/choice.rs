//! Choice lists and the strategies that build them
//!
//! Every way of declaring an option ends up as the same ordered list of
//! [`Choice`]s. [`ChoiceSpec`] is the closed set of construction strategies;
//! [`ChoiceSpec::into_choices`] is the single normalization step.

use crate::error::{Error, Result};
use crate::option::value::OptionValue;

/// Label of the toggle entry holding the initial state
pub const TOGGLE_ENABLED_LABEL: &str = "enabled";

/// Label of the toggle entry holding the negated state
pub const TOGGLE_DISABLED_LABEL: &str = "disabled";

/// One selectable entry of an option
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    /// Label shown by the host and matched against its answers
    pub label: String,

    /// Typed value adopted when this label is selected
    pub value: T,
}

impl<T> Choice<T> {
    /// Create a new choice
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Construction strategy of an option's choice list
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceSpec<T> {
    /// Explicit `(label, value)` pairs
    Pairs(Vec<Choice<T>>),

    /// Labels only; the value is the position (0, 1, 2, ...)
    Indexed(Vec<String>),

    /// Labels only; the value is the label itself
    Identity(Vec<String>),

    /// Labels only; the value is `first + position`
    Offset {
        /// Value of the first label
        first: T,
        /// Labels in order
        labels: Vec<String>,
    },

    /// `count` values `first, first + step, ...`, labeled by their own text
    Range {
        /// First value
        first: T,
        /// Number of entries
        count: usize,
        /// Distance between consecutive values
        step: T,
    },

    /// `("enabled", initial)` followed by `("disabled", !initial)`
    Toggle(bool),
}

impl<T> ChoiceSpec<T> {
    /// Explicit pairs from any iterator of `(label, value)`
    pub fn pairs<I, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
    {
        Self::Pairs(
            pairs
                .into_iter()
                .map(|(label, value)| Choice::new(label, value))
                .collect(),
        )
    }

    /// Position-valued labels
    pub fn indexed<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::Indexed(labels.into_iter().map(Into::into).collect())
    }

    /// Label-valued labels
    pub fn identity<I, L>(labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::Identity(labels.into_iter().map(Into::into).collect())
    }

    /// Labels valued `first + position`
    pub fn offset<I, L>(first: T, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self::Offset {
            first,
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Arithmetic range
    pub fn range(first: T, count: usize, step: T) -> Self {
        Self::Range { first, count, step }
    }

    /// Name of the strategy, for diagnostics
    pub fn strategy_name(&self) -> &'static str {
        match self {
            Self::Pairs(_) => "explicit pairs",
            Self::Indexed(_) => "indexed labels",
            Self::Identity(_) => "identity labels",
            Self::Offset { .. } => "offset labels",
            Self::Range { .. } => "arithmetic range",
            Self::Toggle(_) => "boolean toggle",
        }
    }
}

impl<T: OptionValue> ChoiceSpec<T> {
    /// Normalize into the ordered choice list
    ///
    /// # Returns
    ///
    /// - `Ok(choices)`: At least one choice
    /// - `Err(Error::InvalidInput)`: The list is empty, or `T` cannot express
    ///   this strategy (including arithmetic overflow)
    pub fn into_choices(self) -> Result<Vec<Choice<T>>> {
        let strategy = self.strategy_name();
        let unsupported =
            || Error::invalid_input(format!("{strategy} not supported by this value type"));

        let choices = match self {
            Self::Pairs(choices) => choices,
            Self::Indexed(labels) => labels
                .into_iter()
                .enumerate()
                .map(|(index, label)| T::from_index(index).map(|value| Choice::new(label, value)))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(unsupported)?,
            Self::Identity(labels) => labels
                .into_iter()
                .map(|label| T::from_label(&label).map(|value| Choice::new(label, value)))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(unsupported)?,
            Self::Offset { first, labels } => labels
                .into_iter()
                .enumerate()
                .map(|(position, label)| first.offset(position).map(|value| Choice::new(label, value)))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(unsupported)?,
            Self::Range { first, count, step } => (0..count)
                .map(|n| {
                    let value = first.step_by(&step, n)?;
                    let label = value.range_label()?;
                    Some(Choice::new(label, value))
                })
                .collect::<Option<Vec<_>>>()
                .ok_or_else(unsupported)?,
            Self::Toggle(initial) => {
                let on = T::from_toggle(initial).ok_or_else(unsupported)?;
                let off = T::from_toggle(!initial).ok_or_else(unsupported)?;
                vec![
                    Choice::new(TOGGLE_ENABLED_LABEL, on),
                    Choice::new(TOGGLE_DISABLED_LABEL, off),
                ]
            }
        };

        if choices.is_empty() {
            return Err(Error::invalid_input(format!(
                "{strategy} produced no choices"
            )));
        }

        Ok(choices)
    }
}
