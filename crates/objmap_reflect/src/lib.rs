//! Type-introspection contract for the objmap mapper.
//!
//! This crate provides everything the mapper core needs to know about a
//! target type without per-type marshalling code:
//!
//! - [`info::TypeInfo`]: static, per-type shape metadata (bean, record,
//!   sequence, optional, scalar) with accessor tables built from function
//!   pointers.
//! - [`Value`] / [`ValueRef`] / [`Mapped`]: the dynamic value model that
//!   decoded members travel through.
//! - [`registry::TypeRegistry`]: the process-lifetime metadata store,
//!   keyed by `TypeId`, with recursive dependency registration.
//! - [`reflect_bean!`] / [`reflect_record!`]: declarative macros generating
//!   the introspection impls for user types.
//!
//! Type metadata is computed once per type in a lazily-initialized,
//! thread-safe memo cell (see [`cell`]) and treated as immutable for the
//! rest of the process.

// -----------------------------------------------------------------------------
// Modules

mod value;

pub mod cell;
pub mod hash;
pub mod impls;
pub mod info;
pub mod registry;

mod macros;

// -----------------------------------------------------------------------------
// Top-level exports

pub use value::{Mapped, Value, ValueError, ValueRef};

/// Hidden re-exports used by the registration macros.
#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}
