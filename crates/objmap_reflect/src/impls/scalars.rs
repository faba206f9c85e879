use crate::cell::NonGenericInfoCell;
use crate::info::{Register, ScalarInfo, ScalarKind, TypeInfo, Typed};
use crate::{Mapped, Value, ValueError, ValueRef};

// Typed + Register for a scalar; `Mapped` differs per family and is
// implemented below.
macro_rules! impl_scalar_typed {
    ($ty:ty, $kind:ident) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::Scalar(ScalarInfo::new::<$ty>(ScalarKind::$kind, |any| {
                        // The accessor table is keyed by TypeId; the downcast
                        // cannot fail.
                        any.downcast_ref::<$ty>().unwrap().value_ref()
                    }))
                })
            }
        }

        impl Register for $ty {}
    };
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_scalar_int {
    ($($ty:ty),* $(,)?) => {$(
        impl_scalar_typed!($ty, Int);

        impl Mapped for $ty {
            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Int(value) => {
                        <$ty>::try_from(value).map_err(|_| ValueError::OutOfRange {
                            value,
                            target: stringify!($ty),
                        })
                    }
                    other => Err(ValueError::Mismatched {
                        expected: stringify!($ty),
                        found: other.kind_name(),
                    }),
                }
            }

            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Int(*self as i64)
            }
        }
    )*};
}

impl_scalar_int!(i8, i16, i32, i64, u8, u16, u32);

// -----------------------------------------------------------------------------
// Floats

macro_rules! impl_scalar_float {
    ($($ty:ty),* $(,)?) => {$(
        impl_scalar_typed!($ty, Float);

        impl Mapped for $ty {
            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Float(value) => Ok(value as $ty),
                    // A number without fraction or exponent decodes as an
                    // integer; a float target still accepts it.
                    Value::Int(value) => Ok(value as $ty),
                    other => Err(ValueError::Mismatched {
                        expected: stringify!($ty),
                        found: other.kind_name(),
                    }),
                }
            }

            #[inline]
            fn value_ref(&self) -> ValueRef<'_> {
                ValueRef::Float(*self as f64)
            }
        }
    )*};
}

impl_scalar_float!(f32, f64);

// -----------------------------------------------------------------------------
// Bool

impl_scalar_typed!(bool, Bool);

impl Mapped for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(value) => Ok(value),
            other => Err(ValueError::Mismatched {
                expected: "bool",
                found: other.kind_name(),
            }),
        }
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Bool(*self)
    }
}

// -----------------------------------------------------------------------------
// String

impl_scalar_typed!(String, Str);

impl Mapped for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Str(value) => Ok(value),
            other => Err(ValueError::Mismatched {
                expected: "String",
                found: other.kind_name(),
            }),
        }
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_conversion_checks_range() {
        assert_eq!(u8::from_value(Value::Int(200)), Ok(200));
        assert_eq!(
            u8::from_value(Value::Int(300)),
            Err(ValueError::OutOfRange {
                value: 300,
                target: "u8",
            })
        );
    }

    #[test]
    fn float_accepts_int() {
        assert_eq!(f64::from_value(Value::Int(3)), Ok(3.0));
        assert_eq!(f32::from_value(Value::Float(1.5)), Ok(1.5));
    }

    #[test]
    fn mismatched_shape_is_reported() {
        let error = bool::from_value(Value::Str("true".to_owned())).unwrap_err();
        assert_eq!(
            error,
            ValueError::Mismatched {
                expected: "bool",
                found: "string",
            }
        );
    }

    #[test]
    fn scalar_info_shape() {
        let info = i32::type_info().as_scalar().unwrap();
        assert_eq!(info.kind(), ScalarKind::Int);

        let value = 7_i32;
        assert!(matches!(info.value_ref(&value), ValueRef::Int(7)));
    }
}
