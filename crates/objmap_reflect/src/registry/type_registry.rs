use core::any::TypeId;

use hashbrown::hash_map::Entry;

use crate::hash::{StrMap, TypeIdMap, type_id_map};
use crate::info::{Register, TypeInfo};
#[cfg(feature = "auto_register")]
use crate::registry::AutoRegistration;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A store of every type the mapper may encounter, keyed by
/// [`TypeId`] with a secondary index by type path.
///
/// Registration is try-insert: an already-present type is left untouched,
/// which both makes re-registration cheap and lets recursive dependency
/// registration terminate on cyclic type graphs.
///
/// The registry is populated during setup through `&mut self` methods and
/// only read afterwards, so no interior locking is needed.
///
/// # Examples
///
/// ```
/// use objmap_reflect::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
///
/// // Scalars are pre-registered.
/// let info = registry.get(core::any::TypeId::of::<i32>()).unwrap();
/// assert!(info.is_scalar());
/// ```
pub struct TypeRegistry {
    infos: TypeIdMap<&'static TypeInfo>,
    by_path: StrMap<&'static str, TypeId>,
}

impl TypeRegistry {
    /// Create a registry pre-seeded with the scalar types.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register::<bool>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();

        registry
    }

    /// Create a registry with no entries at all, not even scalars.
    pub fn empty() -> Self {
        Self {
            infos: type_id_map(),
            by_path: StrMap::default(),
        }
    }

    /// Registers `T` and, if it was not already present, every type
    /// reachable from its members.
    pub fn register<T: Register>(&mut self) {
        if self.add(T::type_info()) {
            T::register_dependencies(self);
        }
    }

    /// Registers a reified info directly.
    ///
    /// Returns `true` if the type was newly added. Prefer
    /// [`register`](Self::register), which also pulls in dependencies.
    pub fn add(&mut self, info: &'static TypeInfo) -> bool {
        match self.infos.entry(info.type_id()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(info);
                self.by_path.insert(info.type_path(), info.type_id());
                true
            }
        }
    }

    /// Returns the info registered for `type_id`, if any.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.infos.get(&type_id).copied()
    }

    /// Returns the info registered under the given type path, if any.
    #[inline]
    pub fn get_with_path(&self, type_path: &str) -> Option<&'static TypeInfo> {
        self.get(*self.by_path.get(type_path)?)
    }

    /// Returns `true` if `type_id` has been registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.infos.contains_key(&type_id)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Returns `true` if nothing has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }

    /// Returns an iterator over every registered info.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static TypeInfo> + '_ {
        self.infos.values().copied()
    }

    /// Registers every type submitted through
    /// [`auto_register!`](crate::auto_register), anywhere in the binary.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) {
        for entry in inventory::iter::<AutoRegistration> {
            (entry.register)(self);
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_are_preseeded() {
        let registry = TypeRegistry::new();
        assert!(registry.contains(TypeId::of::<bool>()));
        assert!(registry.contains(TypeId::of::<String>()));
        assert!(!registry.contains(TypeId::of::<Vec<i32>>()));
    }

    #[test]
    fn register_pulls_in_dependencies() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Vec<i32>>();

        assert!(registry.contains(TypeId::of::<Vec<i32>>()));
        assert!(registry.contains(TypeId::of::<i32>()));
    }

    #[test]
    fn lookup_by_path() {
        let registry = TypeRegistry::new();
        let info = registry.get_with_path("i64").unwrap();
        assert_eq!(info.type_id(), TypeId::of::<i64>());
    }
}
