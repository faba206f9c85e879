use core::any::Any;
use core::fmt;

use crate::ValueRef;
use crate::info::{GetFn, Type};

// -----------------------------------------------------------------------------
// ScalarKind

/// The primitive shapes a scalar can take on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Str,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.pad("Bool"),
            Self::Int => f.pad("Int"),
            Self::Float => f.pad("Float"),
            Self::Str => f.pad("Str"),
        }
    }
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Static info for a leaf type encoded directly as a primitive.
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
    value_ref: GetFn,
}

impl ScalarInfo {
    /// Create a new [`ScalarInfo`] for scalar type `T`.
    pub fn new<T: Any>(kind: ScalarKind, value_ref: GetFn) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            value_ref,
        }
    }

    /// Returns the underlying [`Type`] metadata.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the primitive shape of this scalar.
    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Borrows a type-erased scalar as a [`ValueRef`].
    #[inline]
    pub fn value_ref<'a>(&self, scalar: &'a dyn Any) -> ValueRef<'a> {
        (self.value_ref)(scalar)
    }
}

impl fmt::Debug for ScalarInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarInfo")
            .field("ty", &self.ty)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
