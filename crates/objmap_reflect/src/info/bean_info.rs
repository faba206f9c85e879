use core::any::{Any, TypeId};
use core::fmt;

use crate::hash::StrMap;
use crate::info::{GetFn, InfoFn, SetFn, Type};

// -----------------------------------------------------------------------------
// BeanField

/// A single mutable field of a bean, with its accessor pair.
#[derive(Clone)]
pub struct BeanField {
    name: &'static str,
    wire: Option<&'static str>,
    ty_id: TypeId,
    type_info: InfoFn,
    set: SetFn,
    get: GetFn,
}

impl BeanField {
    /// Create a new [`BeanField`].
    ///
    /// `wire` overrides the name used in the encoded text; `None` means the
    /// declared field name is used on the wire as well.
    pub fn new<T: Any>(
        name: &'static str,
        wire: Option<&'static str>,
        type_info: InfoFn,
        set: SetFn,
        get: GetFn,
    ) -> Self {
        Self {
            name,
            wire,
            ty_id: TypeId::of::<T>(),
            type_info,
            set,
            get,
        }
    }

    /// Returns the declared field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the name this field uses on the wire.
    #[inline]
    pub const fn wire_name(&self) -> &'static str {
        match self.wire {
            Some(wire) => wire,
            None => self.name,
        }
    }

    /// Returns the [`TypeId`] of the field's type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty_id
    }

    /// Returns the static info of the field's type.
    #[inline]
    pub fn type_info(&self) -> &'static crate::info::TypeInfo {
        (self.type_info)()
    }

    /// Returns the field setter.
    #[inline]
    pub const fn set(&self) -> SetFn {
        self.set
    }

    /// Returns the field getter.
    #[inline]
    pub const fn get(&self) -> GetFn {
        self.get
    }
}

impl fmt::Debug for BeanField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanField")
            .field("name", &self.name)
            .field("wire", &self.wire)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// BeanInfo

/// Static info for a mutable, default-constructible type populated field by
/// field.
///
/// # Examples
///
/// ```
/// use objmap_reflect::info::Typed;
/// use objmap_reflect::reflect_bean;
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// reflect_bean!(Point { x: i32, y: i32 });
///
/// let info = Point::type_info().as_bean().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.field("y").unwrap().name(), "y");
/// ```
#[derive(Debug)]
pub struct BeanInfo {
    ty: Type,
    construct: fn() -> Box<dyn Any>,
    fields: Box<[BeanField]>,
    wire_indices: StrMap<&'static str, usize>,
}

impl BeanInfo {
    /// Create a new [`BeanInfo`].
    ///
    /// Field order is fixed and follows the input order, which is also the
    /// order fields are emitted on the write path.
    pub fn new<T: Any>(construct: fn() -> Box<dyn Any>, fields: &[BeanField]) -> Self {
        let wire_indices = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.wire_name(), index))
            .collect();

        Self {
            ty: Type::of::<T>(),
            construct,
            fields: fields.into(),
            wire_indices,
        }
    }

    /// Returns the underlying [`Type`] metadata.
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Builds a fresh, default-valued instance behind `dyn Any`.
    #[inline]
    pub fn construct(&self) -> Box<dyn Any> {
        (self.construct)()
    }

    /// Returns the [`BeanField`] with the given wire name, if present.
    pub fn field(&self, wire_name: &str) -> Option<&BeanField> {
        self.wire_indices
            .get(wire_name)
            .map(|&index| &self.fields[index])
    }

    /// Returns an iterator over the fields in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &BeanField> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[inline]
    pub const fn field_len(&self) -> usize {
        self.fields.len()
    }
}
