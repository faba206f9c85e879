use crate::cell::GenericInfoCell;
use crate::info::{OptionalInfo, Register, TypeInfo, Typed};
use crate::registry::TypeRegistry;
use crate::{Mapped, Value, ValueError, ValueRef};

impl<T: Mapped> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericInfoCell = GenericInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Optional(OptionalInfo::new::<Self>(T::type_info, |any| {
                // The accessor table is keyed by TypeId; the downcast cannot
                // fail.
                any.downcast_ref::<Option<T>>().unwrap().value_ref()
            }))
        })
    }
}

impl<T: Mapped> Mapped for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        match self {
            Some(value) => value.value_ref(),
            None => ValueRef::Null,
        }
    }
}

impl<T: Mapped + Register> Register for Option<T> {
    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_maps_to_none() {
        assert_eq!(Option::<i32>::from_value(Value::Null), Ok(None));
        assert_eq!(Option::<i32>::from_value(Value::Int(5)), Ok(Some(5)));
    }

    #[test]
    fn optional_is_transparent_in_shape() {
        let info = Option::<i32>::type_info();
        assert!(info.is_optional());
        assert!(info.shape().is_scalar());
    }

    #[test]
    fn none_borrows_as_null() {
        let value: Option<String> = None;
        assert!(matches!(value.value_ref(), ValueRef::Null));
    }
}
