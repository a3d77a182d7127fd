//! Construction-time errors.

use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while building a [`Model`][crate::Model].
///
/// Both variants occur only during construction. Validation itself is
/// infallible: every mismatch is folded into the boolean result of
/// [`Model::confirm_matches`][crate::Model::confirm_matches].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A definition was null where a field mapping was mandated.
    NullValue(String),
    /// A construction-time argument had the wrong kind: a model definition
    /// that is not a field mapping, a `required` flag that is not a boolean,
    /// a `refinement` that is not a predicate, and so on.
    TypeMismatch(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NullValue(ref err) => write!(f, "Null value: {}", err),
            Error::TypeMismatch(ref err) => write!(f, "Type mismatch: {}", err),
        }
    }
}

impl std::error::Error for Error {}
