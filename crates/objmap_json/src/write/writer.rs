use core::any::Any;
use core::fmt::Write as _;
use std::sync::{Arc, PoisonError, RwLock};

use objmap_reflect::ValueRef;
use objmap_reflect::hash::{TypeIdMap, type_id_map};
use objmap_reflect::info::{GetFn, TypeInfo};

use crate::MapError;

// -----------------------------------------------------------------------------
// Generator

/// One member's emission recipe: the pre-rendered `"key": ` prefix (with
/// the rename override already applied and the key escaped) plus the
/// member's read accessor.
pub struct Generator {
    prefix: String,
    get: GetFn,
}

impl Generator {
    fn new(wire_name: &str, get: GetFn) -> Self {
        let mut prefix = String::new();
        push_json_string(&mut prefix, wire_name);
        prefix.push_str(": ");
        Self { prefix, get }
    }

    /// Returns the rendered `"key": ` prefix.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Reads the member's current value.
    #[inline]
    pub fn get<'a>(&self, value: &'a dyn Any) -> ValueRef<'a> {
        (self.get)(value)
    }
}

// -----------------------------------------------------------------------------
// GeneratorCache

/// Memoizes, per composite type, the ordered member generator list.
///
/// The list is computed at most once per type in the common case;
/// concurrent first writes of the same type may both compute it, and the
/// first insert wins. Entry order follows the type's member declaration
/// order, so output key order is stable across calls and instances.
pub struct GeneratorCache {
    cache: RwLock<TypeIdMap<Arc<[Generator]>>>,
}

impl GeneratorCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(type_id_map()),
        }
    }

    /// Returns the generator list for a bean or record type.
    pub fn generators(&self, info: &'static TypeInfo) -> Arc<[Generator]> {
        if let Some(generators) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&info.type_id())
        {
            return Arc::clone(generators);
        }

        let generators = Self::compute(info);
        Arc::clone(
            self.cache
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(info.type_id())
                .or_insert(generators),
        )
    }

    fn compute(info: &'static TypeInfo) -> Arc<[Generator]> {
        match info {
            TypeInfo::Bean(bean) => bean
                .iter()
                .map(|field| Generator::new(field.wire_name(), field.get()))
                .collect(),
            TypeInfo::Record(record) => record
                .iter()
                .map(|component| Generator::new(component.wire_name(), component.get()))
                .collect(),
            _ => Arc::from([]),
        }
    }

    /// Returns the number of memoized types.
    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every memoized list.
    pub fn clear(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for GeneratorCache {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// JsonWriter

/// Walks a value tree and emits text, delegating composite types to the
/// memoized generator lists.
///
/// The writer assumes a tree; a cyclic graph recurses without bound.
pub struct JsonWriter<'a> {
    generators: &'a GeneratorCache,
}

impl<'a> JsonWriter<'a> {
    pub fn new(generators: &'a GeneratorCache) -> Self {
        Self { generators }
    }

    /// Renders a single value to text.
    pub fn write(&self, value: ValueRef<'_>) -> Result<String, MapError> {
        let mut out = String::new();
        self.write_ref(&mut out, value)?;
        Ok(out)
    }

    fn write_ref(&self, out: &mut String, value: ValueRef<'_>) -> Result<(), MapError> {
        match value {
            ValueRef::Null => out.push_str("null"),
            ValueRef::Bool(value) => out.push_str(if value { "true" } else { "false" }),
            ValueRef::Int(value) => {
                let _ = write!(out, "{value}");
            }
            ValueRef::Float(value) => push_json_float(out, value),
            ValueRef::Str(value) => push_json_string(out, value),
            ValueRef::Composite { value, info } => self.write_composite(out, value, info)?,
        }
        Ok(())
    }

    fn write_composite(
        &self,
        out: &mut String,
        value: &dyn Any,
        info: &'static TypeInfo,
    ) -> Result<(), MapError> {
        match info {
            TypeInfo::Sequence(sequence) => {
                out.push('[');
                for (index, element) in sequence.element_refs(value).into_iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    self.write_ref(out, element)?;
                }
                out.push(']');
            }
            TypeInfo::Bean(_) | TypeInfo::Record(_) => {
                let generators = self.generators.generators(info);
                out.push('{');
                for (index, generator) in generators.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(generator.prefix());
                    self.write_ref(out, generator.get(value))?;
                }
                out.push('}');
            }
            TypeInfo::Optional(optional) => self.write_ref(out, optional.value_ref(value))?,
            TypeInfo::Scalar(scalar) => self.write_ref(out, scalar.value_ref(value))?,
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Primitive rendering

/// Appends a quoted, escaped string.
///
/// Quotes, backslashes and all control characters are escaped, with the
/// short forms where the grammar has them.
fn push_json_string(out: &mut String, text: &str) {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Appends a floating-point number.
///
/// Whole values keep one fractional digit so they stay distinguishable
/// from integers; non-finite values have no grammar form and emit `null`.
fn push_json_float(out: &mut String, value: f64) {
    if !value.is_finite() {
        out.push_str("null");
    } else if value.fract() == 0.0 {
        let _ = write!(out, "{value:.1}");
    } else {
        let _ = write!(out, "{value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives() {
        let cache = GeneratorCache::new();
        let writer = JsonWriter::new(&cache);

        assert_eq!(writer.write(ValueRef::Null).unwrap(), "null");
        assert_eq!(writer.write(ValueRef::Bool(true)).unwrap(), "true");
        assert_eq!(writer.write(ValueRef::Int(-7)).unwrap(), "-7");
        assert_eq!(writer.write(ValueRef::Float(2.0)).unwrap(), "2.0");
        assert_eq!(writer.write(ValueRef::Float(2.5)).unwrap(), "2.5");
        assert_eq!(writer.write(ValueRef::Float(f64::NAN)).unwrap(), "null");
    }

    #[test]
    fn strings_are_escaped() {
        let cache = GeneratorCache::new();
        let writer = JsonWriter::new(&cache);

        assert_eq!(
            writer.write(ValueRef::Str("a\"b\\c\nd\u{1}")).unwrap(),
            "\"a\\\"b\\\\c\\nd\\u0001\""
        );
    }
}
