use core::any::{Any, TypeId};
use core::{error, fmt};

use crate::info::{BeanInfo, OptionalInfo, RecordInfo, ScalarInfo, SequenceInfo};

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] plus a stable, human-readable path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    /// Create the identity metadata for `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`].
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type path, e.g. `my_app::model::Person`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }
}

// -----------------------------------------------------------------------------
// TypeKind

/// An enumeration of the "kinds" of a mappable type.
///
/// Each kind corresponds to one [`TypeInfo`] variant and determines which
/// builder shape handles the type during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Bean,
    Record,
    Sequence,
    Optional,
    Scalar,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bean => f.pad("Bean"),
            Self::Record => f.pad("Record"),
            Self::Sequence => f.pad("Sequence"),
            Self::Optional => f.pad("Optional"),
            Self::Scalar => f.pad("Scalar"),
        }
    }
}

/// Error returned when a [`TypeInfo`] value is not the expected [`TypeKind`].
#[derive(Debug)]
pub struct TypeKindError {
    pub expected: TypeKind,
    pub received: TypeKind,
}

impl fmt::Display for TypeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for TypeKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static type information for a mappable type.
///
/// Obtained through [`Typed::type_info`] when the type is known at compile
/// time, or from the [`TypeRegistry`] when only a [`TypeId`] or type path is
/// at hand.
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`TypeRegistry`]: crate::registry::TypeRegistry
#[derive(Debug)]
pub enum TypeInfo {
    Bean(BeanInfo),
    Record(RecordInfo),
    Sequence(SequenceInfo),
    Optional(OptionalInfo),
    Scalar(ScalarInfo),
}

// Helper macro that implements type-safe accessor methods like `as_bean`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to specific type information.
        pub const fn $name(&self) -> Result<&$info, TypeKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(TypeKindError {
                    expected: TypeKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

macro_rules! impl_is_method {
    ($name:ident : $kind:ident) => {
        /// Check the information kind, usable in const context.
        #[inline]
        pub const fn $name(&self) -> bool {
            match self {
                Self::$kind(..) => true,
                _ => false,
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_bean: Bean => BeanInfo);
    impl_cast_method!(as_record: Record => RecordInfo);
    impl_cast_method!(as_sequence: Sequence => SequenceInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);

    impl_is_method!(is_bean: Bean);
    impl_is_method!(is_record: Record);
    impl_is_method!(is_sequence: Sequence);
    impl_is_method!(is_optional: Optional);
    impl_is_method!(is_scalar: Scalar);

    /// Returns the underlying [`Type`] metadata for this `TypeInfo`.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Bean(info) => info.ty(),
            Self::Record(info) => info.ty(),
            Self::Sequence(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Scalar(info) => info.ty(),
        }
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Returns the type path of the described type.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the [`TypeKind`] for this `TypeInfo` (a fast discriminator).
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Bean(_) => TypeKind::Bean,
            Self::Record(_) => TypeKind::Record,
            Self::Sequence(_) => TypeKind::Sequence,
            Self::Optional(_) => TypeKind::Optional,
            Self::Scalar(_) => TypeKind::Scalar,
        }
    }

    /// Resolves through `Optional` wrappers to the info that determines the
    /// builder shape.
    ///
    /// A member declared as `Option<T>` is decoded exactly like `T`; absence
    /// and `null` are handled by the wrapper's conversion, not by a distinct
    /// builder.
    pub fn shape(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let TypeInfo::Optional(optional) = info {
            info = optional.inner();
        }
        info
    }
}
