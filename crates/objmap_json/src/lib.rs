//! Bidirectional JSON ⇄ object-graph mapping over the `objmap_reflect`
//! type model.
//!
//! The read path drives construction from a push-based event stream: a
//! hand-written tokenizer replays [`JsonVisitor`](read::JsonVisitor) events
//! into a [`ParseDriver`](read::ParseDriver), which maintains a stack of
//! [`ObjectBuilder`](builder::ObjectBuilder) contexts and assembles the
//! final value. Which builder handles a type is decided by an ordered,
//! last-registered-wins [`BuilderResolver`](resolver::BuilderResolver).
//!
//! The write path walks a value recursively, memoizing an ordered list of
//! per-member emission closures for every composite type it meets (see
//! [`write::GeneratorCache`]).
//!
//! [`JsonMapper`] ties both directions together behind one entry point.

// -----------------------------------------------------------------------------
// Modules

pub mod builder;
pub mod read;
pub mod resolver;
pub mod write;

mod error;
mod mapper;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::MapError;
pub use mapper::JsonMapper;
