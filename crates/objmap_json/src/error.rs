use core::{error, fmt};

use objmap_reflect::ValueError;

// -----------------------------------------------------------------------------
// MapError

/// An error raised while mapping between JSON text and an object graph.
///
/// All errors are synchronous and abort the operation that raised them; a
/// failed parse yields no object, never a partially populated one.
#[derive(Debug, PartialEq)]
pub enum MapError {
    /// A key in the text has no counterpart in the resolved builder's shape.
    UnknownMember {
        key: String,
        type_path: &'static str,
    },
    /// No builder strategy can construct the requested type.
    ///
    /// Raised at builder-resolution time, before any of the composite's
    /// members are consumed.
    NoUsableConstructor { type_path: &'static str },
    /// The text violates the grammar.
    MalformedText {
        message: String,
        line: u32,
        column: u32,
    },
    /// The writer was handed a value with no registered shape.
    UnsupportedValue { detail: String },
    /// A type path passed to the dynamic entry points is not registered.
    UnregisteredType { type_path: String },
    /// The document root is a bare scalar but the target type expects a
    /// composite.
    ScalarRoot { type_path: &'static str },
    /// A decoded value could not be converted into the target member.
    Value(ValueError),
}

impl MapError {
    pub(crate) fn malformed(message: impl Into<String>, line: u32, column: u32) -> Self {
        MapError::MalformedText {
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::UnknownMember { key, type_path } => {
                write!(f, "unknown member `{key}` for type `{type_path}`")
            }
            MapError::NoUsableConstructor { type_path } => {
                write!(f, "no usable constructor for type `{type_path}`")
            }
            MapError::MalformedText {
                message,
                line,
                column,
            } => {
                write!(f, "malformed text at line {line}, column {column}: {message}")
            }
            MapError::UnsupportedValue { detail } => {
                write!(f, "unsupported value: {detail}")
            }
            MapError::UnregisteredType { type_path } => {
                write!(f, "type `{type_path}` is not registered")
            }
            MapError::ScalarRoot { type_path } => {
                write!(
                    f,
                    "document root is a scalar but `{type_path}` expects a composite"
                )
            }
            MapError::Value(error) => error.fmt(f),
        }
    }
}

impl error::Error for MapError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            MapError::Value(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ValueError> for MapError {
    fn from(error: ValueError) -> Self {
        MapError::Value(error)
    }
}
