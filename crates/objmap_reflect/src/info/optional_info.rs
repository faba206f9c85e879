use core::any::Any;

use crate::ValueRef;
use crate::info::{GetFn, InfoFn, Type};

// -----------------------------------------------------------------------------
// OptionalInfo

/// Static info for a value that may be absent.
///
/// An optional member is transparent on the wire: a present value is encoded
/// exactly like the inner type and `null` (or absence) maps to the empty
/// case. See [`TypeInfo::shape`](crate::info::TypeInfo::shape).
pub struct OptionalInfo {
    ty: Type,
    inner: InfoFn,
    value_ref: GetFn,
}

impl OptionalInfo {
    /// Create a new [`OptionalInfo`] for optional type `T`.
    pub fn new<T: Any>(inner: InfoFn, value_ref: GetFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            inner,
            value_ref,
        }
    }

    /// Returns the underlying [`Type`] metadata.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the static info of the wrapped type.
    #[inline]
    pub fn inner(&self) -> &'static crate::info::TypeInfo {
        (self.inner)()
    }

    /// Borrows a type-erased optional: the inner value's view when present,
    /// [`ValueRef::Null`] otherwise.
    #[inline]
    pub fn value_ref<'a>(&self, optional: &'a dyn Any) -> ValueRef<'a> {
        (self.value_ref)(optional)
    }
}

impl core::fmt::Debug for OptionalInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OptionalInfo")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}
