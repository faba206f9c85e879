//! Containers for static storage of type information.
//!
//! These cells back [`Typed::type_info`](crate::info::Typed::type_info) and
//! are the storage half of the metadata cache: each target type's
//! introspection result is computed on first access, by at most one thread,
//! and is immutable for the remainder of the process.
//!
//! - [`NonGenericInfoCell`]: one `OnceLock<TypeInfo>` per non-generic type.
//! - [`GenericInfoCell`]: for generic types the `static CELL` inside
//!   `type_info` is shared by every instantiation, so the cell keys its
//!   entries by [`TypeId`] and leaks the computed value to obtain the
//!   `'static` lifetime.

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::hash::{TypeIdMap, type_id_map};
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericInfoCell

/// Static storage of non-generic type information.
///
/// ## Example
///
/// ```
/// use objmap_reflect::cell::NonGenericInfoCell;
/// use objmap_reflect::info::{ScalarInfo, ScalarKind, TypeInfo, Typed};
/// use objmap_reflect::ValueRef;
///
/// struct Marker(bool);
///
/// impl Typed for Marker {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericInfoCell = NonGenericInfoCell::new();
///         CELL.get_or_init(|| {
///             TypeInfo::Scalar(ScalarInfo::new::<Marker>(ScalarKind::Bool, |any| {
///                 ValueRef::Bool(any.downcast_ref::<Marker>().unwrap().0)
///             }))
///         })
///     }
/// }
///
/// assert!(Marker::type_info().is_scalar());
/// ```
pub struct NonGenericInfoCell(OnceLock<TypeInfo>);

impl NonGenericInfoCell {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, generating it from `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericInfoCell

/// Static storage of type information for generic types.
///
/// The inner table maps the concrete instantiation's [`TypeId`] to a leaked
/// `&'static TypeInfo`. Concurrent first accesses may race to compute the
/// same entry; the first insert wins and duplicates are dropped, which is
/// harmless since entries for the same type are identical.
pub struct GenericInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericInfoCell {
    /// Create an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(type_id_map()))
    }

    /// Returns the info stored for type `G`, generating it from `f` if
    /// there is no entry yet.
    #[inline(always)]
    pub fn get_or_insert<G: Any>(&self, f: impl FnOnce() -> TypeInfo) -> &'static TypeInfo {
        self.get_or_insert_by_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &'static TypeInfo {
        if let Some(info) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return info;
        }

        let info = f();
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(info)))
    }
}

impl Default for GenericInfoCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
