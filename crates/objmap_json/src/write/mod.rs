//! The write path: the generator cache and the recursive writer.

mod writer;

pub use writer::{Generator, GeneratorCache, JsonWriter};
