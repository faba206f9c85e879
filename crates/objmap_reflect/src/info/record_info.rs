use core::any::{Any, TypeId};
use core::fmt;

use crate::hash::StrMap;
use crate::info::{GetFn, InfoFn, Type};
use crate::{Value, ValueError};

// -----------------------------------------------------------------------------
// RecordComponent

/// A single component of a record, read-only after construction.
#[derive(Clone)]
pub struct RecordComponent {
    name: &'static str,
    wire: Option<&'static str>,
    ty_id: TypeId,
    type_info: InfoFn,
    get: GetFn,
}

impl RecordComponent {
    /// Create a new [`RecordComponent`].
    pub fn new<T: Any>(
        name: &'static str,
        wire: Option<&'static str>,
        type_info: InfoFn,
        get: GetFn,
    ) -> Self {
        Self {
            name,
            wire,
            ty_id: TypeId::of::<T>(),
            type_info,
            get,
        }
    }

    /// Returns the declared component name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the name this component uses on the wire.
    #[inline]
    pub const fn wire_name(&self) -> &'static str {
        match self.wire {
            Some(wire) => wire,
            None => self.name,
        }
    }

    /// Returns the [`TypeId`] of the component's type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty_id
    }

    /// Returns the static info of the component's type.
    #[inline]
    pub fn type_info(&self) -> &'static crate::info::TypeInfo {
        (self.type_info)()
    }

    /// Returns the component getter.
    #[inline]
    pub const fn get(&self) -> GetFn {
        self.get
    }
}

impl fmt::Debug for RecordComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordComponent")
            .field("name", &self.name)
            .field("wire", &self.wire)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// RecordInfo

/// Static info for an immutable type built in one shot from all of its
/// components.
///
/// Decoded component values accumulate positionally until the enclosing
/// value ends, then `construct` consumes the slots in declaration order.
/// Components may arrive in any wire order; a slot left empty fails
/// construction with [`ValueError::MissingComponent`].
#[derive(Debug)]
pub struct RecordInfo {
    ty: Type,
    construct: fn(&mut [Option<Value>]) -> Result<Box<dyn Any>, ValueError>,
    components: Box<[RecordComponent]>,
    wire_indices: StrMap<&'static str, usize>,
}

impl RecordInfo {
    /// Create a new [`RecordInfo`].
    ///
    /// Component order is fixed and follows the input order; `construct`
    /// receives the value slots in that same order.
    pub fn new<T: Any>(
        construct: fn(&mut [Option<Value>]) -> Result<Box<dyn Any>, ValueError>,
        components: &[RecordComponent],
    ) -> Self {
        let wire_indices = components
            .iter()
            .enumerate()
            .map(|(index, component)| (component.wire_name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            construct,
            components: components.into(),
            wire_indices,
        }
    }

    /// Returns the underlying [`Type`] metadata.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Consumes the filled slots and builds the record.
    #[inline]
    pub fn construct(&self, slots: &mut [Option<Value>]) -> Result<Box<dyn Any>, ValueError> {
        (self.construct)(slots)
    }

    /// Returns the component with the given wire name and its slot index.
    pub fn component(&self, wire_name: &str) -> Option<(usize, &RecordComponent)> {
        self.wire_indices
            .get(wire_name)
            .map(|&index| (index, &self.components[index]))
    }

    /// Returns an iterator over the components in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &RecordComponent> {
        self.components.iter()
    }

    /// Returns the number of components.
    #[inline]
    pub const fn component_len(&self) -> usize {
        self.components.len()
    }
}
