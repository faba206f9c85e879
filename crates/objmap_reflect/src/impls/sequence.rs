use crate::cell::GenericInfoCell;
use crate::info::{Register, SequenceInfo, TypeInfo, Typed};
use crate::registry::TypeRegistry;
use crate::{Mapped, Value, ValueError, ValueRef};

impl<T: Mapped> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericInfoCell = GenericInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Sequence(SequenceInfo::new::<Self, T>(
                T::type_info,
                || Box::new(Vec::<T>::new()),
                |any, value| {
                    // The accumulator comes from `new_accumulator`; the
                    // downcast cannot fail.
                    let sequence = any.downcast_mut::<Vec<T>>().unwrap();
                    sequence.push(T::from_value(value)?);
                    Ok(())
                },
                |any| {
                    let sequence = any.downcast_ref::<Vec<T>>().unwrap();
                    sequence.iter().map(Mapped::value_ref).collect()
                },
            ))
        })
    }
}

impl<T: Mapped> Mapped for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Boxed(boxed) => match boxed.downcast::<Self>() {
                Ok(sequence) => Ok(*sequence),
                Err(_) => Err(ValueError::Mismatched {
                    expected: core::any::type_name::<Self>(),
                    found: "composite",
                }),
            },
            other => Err(ValueError::Mismatched {
                expected: core::any::type_name::<Self>(),
                found: other.kind_name(),
            }),
        }
    }

    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Composite {
            value: self,
            info: Self::type_info(),
        }
    }
}

impl<T: Mapped + Register> Register for Vec<T> {
    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}
