//! Static type information.
//!
//! Every mappable type exposes a `&'static TypeInfo` describing its shape
//! and carrying accessor tables of plain function pointers. The info is
//! generated once per type by the registration macros and memoized in a
//! [`cell`](crate::cell).

mod bean_info;
mod optional_info;
mod record_info;
mod scalar_info;
mod sequence_info;
mod type_info;
mod typed;

pub use bean_info::{BeanField, BeanInfo};
pub use optional_info::OptionalInfo;
pub use record_info::{RecordComponent, RecordInfo};
pub use scalar_info::{ScalarInfo, ScalarKind};
pub use sequence_info::SequenceInfo;
pub use type_info::{Type, TypeInfo, TypeKind, TypeKindError};
pub use typed::{Register, Typed};

use crate::{Value, ValueError, ValueRef};
use core::any::Any;

// -----------------------------------------------------------------------------
// Accessor signatures

/// Produces the static info of a related type.
///
/// Stored as a function pointer rather than a resolved reference so that
/// mutually recursive types can be described without initialization cycles.
pub type InfoFn = fn() -> &'static TypeInfo;

/// Reads a member out of a type-erased container.
pub type GetFn = for<'a> fn(&'a dyn Any) -> ValueRef<'a>;

/// Writes a decoded value into a type-erased container.
pub type SetFn = fn(&mut dyn Any, Value) -> Result<(), ValueError>;
