//! The dynamic value model decoded members travel through.

use core::any::Any;
use core::fmt;

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// Value

/// An owned decoded value, in transit between the parser and a builder.
///
/// Scalars are carried directly; a finished composite travels as
/// [`Value::Boxed`] until its parent builder incorporates it.
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A finished composite, type-erased.
    Boxed(Box<dyn Any>),
}

impl Value {
    /// A short name for the value's shape, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Boxed(_) => "composite",
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Value::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Value::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Value::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Value::Boxed(_) => write!(f, "Boxed(..)"),
        }
    }
}

// -----------------------------------------------------------------------------
// ValueRef

/// A borrowed view of a field's value, produced by accessor tables on the
/// write path.
///
/// [`ValueRef::Composite`] carries the field's own [`TypeInfo`] so the
/// writer can recurse without a registry lookup.
#[derive(Clone, Copy)]
pub enum ValueRef<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    /// A nested composite together with its shape metadata.
    Composite {
        value: &'a dyn Any,
        info: &'static TypeInfo,
    },
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRef::Null => write!(f, "Null"),
            ValueRef::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            ValueRef::Int(value) => f.debug_tuple("Int").field(value).finish(),
            ValueRef::Float(value) => f.debug_tuple("Float").field(value).finish(),
            ValueRef::Str(value) => f.debug_tuple("Str").field(value).finish(),
            ValueRef::Composite { info, .. } => f
                .debug_struct("Composite")
                .field("type_path", &info.type_path())
                .finish(),
        }
    }
}

// -----------------------------------------------------------------------------
// ValueError

/// An error produced while converting a [`Value`] into a concrete field or
/// component.
#[derive(Debug, PartialEq, Eq)]
pub enum ValueError {
    /// The value's shape does not match the target type.
    Mismatched {
        expected: &'static str,
        found: &'static str,
    },
    /// An integer value does not fit in the target type.
    OutOfRange { value: i64, target: &'static str },
    /// A record component was absent from the decoded text.
    MissingComponent {
        component: &'static str,
        type_path: &'static str,
    },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::Mismatched { expected, found } => {
                write!(f, "expected a {expected} value but found a {found} value")
            }
            ValueError::OutOfRange { value, target } => {
                write!(f, "integer {value} does not fit in `{target}`")
            }
            ValueError::MissingComponent {
                component,
                type_path,
            } => {
                write!(f, "missing component `{component}` of `{type_path}`")
            }
        }
    }
}

impl core::error::Error for ValueError {}

// -----------------------------------------------------------------------------
// Mapped

/// Types that can pass through the mapper in both directions.
///
/// `from_value` consumes an owned [`Value`] on the read path; `value_ref`
/// exposes a borrowed view on the write path. Implemented for scalars in
/// [`crate::impls`] and generated for user types by the registration macros.
pub trait Mapped: Typed + Sized {
    /// Converts a decoded value into `Self`.
    fn from_value(value: Value) -> Result<Self, ValueError>;

    /// Borrows `self` as a [`ValueRef`].
    fn value_ref(&self) -> ValueRef<'_>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::Int(3).kind_name(), "integer");
        assert_eq!(Value::Boxed(Box::new(3_u8)).kind_name(), "composite");
    }

    #[test]
    fn error_display() {
        let error = ValueError::OutOfRange {
            value: 300,
            target: "u8",
        };
        assert_eq!(error.to_string(), "integer 300 does not fit in `u8`");
    }
}
