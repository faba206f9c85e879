//! Runtime lookup of type information by [`TypeId`](core::any::TypeId) or
//! type path.

mod auto;
mod type_registry;

pub use type_registry::TypeRegistry;

#[cfg(feature = "auto_register")]
pub use auto::AutoRegistration;
