use thiserror::Error;

use crate::model::Arity;

/// Marker trait for bindings that may stand behind a flag on the Cli.
pub trait AsOption {}

/// Marker trait for bindings that may stand behind a positional slot on the Cli.
pub trait AsArgument {}

/// Behaviour to capture an explicit generic type T from an input `&str`.
///
/// We use this at the bottom of the record parser object graph so the compiler can maintain each field's type.
#[doc(hidden)]
pub trait TypedBinding<'a, T> {
    /// Declare that the field has been matched.
    fn matched(&mut self);

    /// Capture a value into the generic type T for this field.
    fn capture(&mut self, token: &str) -> Result<(), CaptureError>;

    /// Get the `Arity` for this implementation.
    fn arity(&self) -> Arity;
}

#[derive(Debug, Error)]
#[doc(hidden)]
pub enum CaptureError {
    #[error("cannot convert '{token}' to {type_name}.")]
    InvalidConversion {
        token: String,
        type_name: &'static str,
    },
    #[error("cannot convert '{token}': {message}.")]
    ConverterFailure { token: String, message: String },
}
