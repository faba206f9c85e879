use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{InfoFn, Type};
use crate::{Value, ValueError, ValueRef};

// -----------------------------------------------------------------------------
// SequenceInfo

/// Static info for a homogeneous, ordered collection.
///
/// The read path accumulates elements through `push`; the write path walks
/// `element_refs` in order. Element order is preserved in both directions.
pub struct SequenceInfo {
    ty: Type,
    element: InfoFn,
    element_id: TypeId,
    new_accumulator: fn() -> Box<dyn Any>,
    push: fn(&mut dyn Any, Value) -> Result<(), ValueError>,
    element_refs: for<'a> fn(&'a dyn Any) -> Vec<ValueRef<'a>>,
}

impl SequenceInfo {
    /// Create a new [`SequenceInfo`] for sequence type `T` with elements of
    /// type `E`.
    pub fn new<T: Any, E: Any>(
        element: InfoFn,
        new_accumulator: fn() -> Box<dyn Any>,
        push: fn(&mut dyn Any, Value) -> Result<(), ValueError>,
        element_refs: for<'a> fn(&'a dyn Any) -> Vec<ValueRef<'a>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(),
            element,
            element_id: TypeId::of::<E>(),
            new_accumulator,
            push,
            element_refs,
        }
    }

    /// Returns the underlying [`Type`] metadata.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the static info of the element type.
    #[inline]
    pub fn element(&self) -> &'static crate::info::TypeInfo {
        (self.element)()
    }

    /// Returns the [`TypeId`] of the element type.
    #[inline]
    pub const fn element_id(&self) -> TypeId {
        self.element_id
    }

    /// Builds an empty accumulator behind `dyn Any`.
    #[inline]
    pub fn new_accumulator(&self) -> Box<dyn Any> {
        (self.new_accumulator)()
    }

    /// Appends a decoded element to the accumulator.
    #[inline]
    pub fn push(&self, accumulator: &mut dyn Any, value: Value) -> Result<(), ValueError> {
        (self.push)(accumulator, value)
    }

    /// Borrows the elements of a finished sequence, in order.
    #[inline]
    pub fn element_refs<'a>(&self, sequence: &'a dyn Any) -> Vec<ValueRef<'a>> {
        (self.element_refs)(sequence)
    }
}

impl fmt::Debug for SequenceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceInfo")
            .field("ty", &self.ty)
            .finish_non_exhaustive()
    }
}
