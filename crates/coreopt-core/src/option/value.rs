//! Value types an option can hold
//!
//! [`OptionValue`] declares which construction strategies a type supports.
//! Every hook defaults to "unsupported", so a domain enum only needs an empty
//! impl to be usable with explicit `(label, value)` pairs:
//!
//! ```rust
//! use coreopt_core::OptionValue;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum CpuCore {
//!     Interpreter,
//!     CachedInterpreter,
//! }
//!
//! impl OptionValue for CpuCore {}
//! ```

use std::fmt;

/// A value type usable inside a [`CoreOption`](crate::CoreOption)
///
/// The hooks return `None` when the type cannot express the requested
/// value (unsupported strategy or arithmetic overflow).
pub trait OptionValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Value for the label at `index` of an indexed label list
    fn from_index(index: usize) -> Option<Self> {
        let _ = index;
        None
    }

    /// Value equal to the label itself
    fn from_label(label: &str) -> Option<Self> {
        let _ = label;
        None
    }

    /// Value of a boolean toggle state
    fn from_toggle(state: bool) -> Option<Self> {
        let _ = state;
        None
    }

    /// `self + steps`
    fn offset(&self, steps: usize) -> Option<Self> {
        let _ = steps;
        None
    }

    /// `self + step * n`
    fn step_by(&self, step: &Self, n: usize) -> Option<Self> {
        let _ = (step, n);
        None
    }

    /// Label used for this value in an arithmetic range
    fn range_label(&self) -> Option<String> {
        None
    }
}

macro_rules! impl_integer_value {
    ($($ty:ty),* $(,)?) => {$(
        impl OptionValue for $ty {
            fn from_index(index: usize) -> Option<Self> {
                <$ty>::try_from(index).ok()
            }

            fn offset(&self, steps: usize) -> Option<Self> {
                <$ty>::try_from(steps).ok().and_then(|steps| self.checked_add(steps))
            }

            fn step_by(&self, step: &Self, n: usize) -> Option<Self> {
                <$ty>::try_from(n)
                    .ok()
                    .and_then(|n| step.checked_mul(n))
                    .and_then(|delta| self.checked_add(delta))
            }

            fn range_label(&self) -> Option<String> {
                Some(self.to_string())
            }
        }
    )*};
}

macro_rules! impl_float_value {
    ($($ty:ty),* $(,)?) => {$(
        impl OptionValue for $ty {
            fn from_index(index: usize) -> Option<Self> {
                Some(index as $ty)
            }

            fn offset(&self, steps: usize) -> Option<Self> {
                Some(*self + steps as $ty)
            }

            fn step_by(&self, step: &Self, n: usize) -> Option<Self> {
                Some(*self + *step * n as $ty)
            }

            fn range_label(&self) -> Option<String> {
                Some(self.to_string())
            }
        }
    )*};
}

impl_integer_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float_value!(f32, f64);

impl OptionValue for bool {
    fn from_toggle(state: bool) -> Option<Self> {
        Some(state)
    }
}

impl OptionValue for String {
    fn from_label(label: &str) -> Option<Self> {
        Some(label.to_owned())
    }
}
