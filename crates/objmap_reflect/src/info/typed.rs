use crate::info::TypeInfo;
use crate::registry::TypeRegistry;

// -----------------------------------------------------------------------------
// Typed

/// A type with static, memoized type information.
///
/// The first call to [`type_info`](Typed::type_info) generates the info and
/// stores it in a [`cell`](crate::cell); every later call returns the same
/// reference.
///
/// Implemented for scalars and standard containers in [`crate::impls`] and
/// generated for user types by [`reflect_bean!`](crate::reflect_bean) and
/// [`reflect_record!`](crate::reflect_record).
pub trait Typed: 'static {
    /// Returns the static info describing this type's shape.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// Register

/// A type that can add itself, and every type reachable from its members, to
/// a [`TypeRegistry`].
///
/// Registration is recursive so that registering a root type is enough to
/// decode and encode its whole graph. The registry's try-insert semantics
/// make cycles terminate.
pub trait Register: Typed {
    /// Registers the member types this type depends on.
    ///
    /// Leaf types have nothing to add.
    #[allow(unused_variables)]
    fn register_dependencies(registry: &mut TypeRegistry) {}
}
