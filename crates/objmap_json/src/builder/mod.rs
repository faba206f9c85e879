//! The per-shape construction strategies.
//!
//! An [`ObjectBuilder`] describes, for one target shape, how to find the
//! expected type of a nested member, create a fresh accumulator,
//! incorporate one decoded value, and finalize the accumulator into its
//! public form. Builders are pure descriptors with no per-parse state; the
//! same builder works for every occurrence of its type, nested or not.

mod bean;
mod record;
mod sequence;

pub use bean::BeanBuilder;
pub use record::RecordBuilder;
pub use sequence::SequenceBuilder;

use core::any::Any;

use objmap_reflect::info::TypeInfo;
use objmap_reflect::Value;

use crate::MapError;

// -----------------------------------------------------------------------------
// ObjectBuilder

/// A strategy for constructing one target shape from decoded members.
///
/// The parse driver calls the four operations in a fixed rhythm:
/// [`member_type`](ObjectBuilder::member_type) before descending into a
/// nested composite, [`create`](ObjectBuilder::create) when the composite
/// opens, [`incorporate`](ObjectBuilder::incorporate) once per member, and
/// [`finish`](ObjectBuilder::finish) when it closes.
pub trait ObjectBuilder: Send + Sync {
    /// Returns the declared type of the member stored under `key`.
    fn member_type(&self, key: &str) -> Result<&'static TypeInfo, MapError>;

    /// Builds a fresh, empty accumulator.
    fn create(&self) -> Box<dyn Any>;

    /// Folds one decoded member value into the accumulator.
    fn incorporate(
        &self,
        instance: &mut dyn Any,
        key: &str,
        value: Value,
    ) -> Result<(), MapError>;

    /// Turns the accumulator into the externally visible value.
    fn finish(&self, instance: Box<dyn Any>) -> Result<Value, MapError>;
}
