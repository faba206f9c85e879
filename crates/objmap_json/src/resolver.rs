//! Selecting a builder strategy for a declared type.

use objmap_reflect::info::TypeInfo;

use crate::MapError;
use crate::builder::{BeanBuilder, ObjectBuilder, RecordBuilder, SequenceBuilder};

// -----------------------------------------------------------------------------
// TypeMatcher

/// A pluggable rule claiming types for a custom builder.
///
/// Implemented for any `Fn(&'static TypeInfo) -> Option<Box<dyn
/// ObjectBuilder>>`, so closures register directly.
pub trait TypeMatcher: Send + Sync {
    /// Returns the builder to use for `info`, or `None` to pass.
    fn match_type(&self, info: &'static TypeInfo) -> Option<Box<dyn ObjectBuilder>>;
}

impl<F> TypeMatcher for F
where
    F: Fn(&'static TypeInfo) -> Option<Box<dyn ObjectBuilder>> + Send + Sync,
{
    fn match_type(&self, info: &'static TypeInfo) -> Option<Box<dyn ObjectBuilder>> {
        self(info)
    }
}

// -----------------------------------------------------------------------------
// BuilderResolver

/// An ordered chain of [`TypeMatcher`]s with a shape-driven fallback.
///
/// Matchers are scanned most-recently-registered first, so a later
/// registration overrides an earlier one for the types it claims. If no
/// matcher claims the type, the builder follows the type's own shape:
/// beans, records and sequences get their built-in variant, while a scalar
/// shape has no composite constructor and resolution fails with
/// [`MapError::NoUsableConstructor`].
///
/// Registration takes `&mut self`, so the chain cannot change while a
/// resolution (or a whole parse) borrows the resolver.
pub struct BuilderResolver {
    matchers: Vec<Box<dyn TypeMatcher>>,
}

impl BuilderResolver {
    /// Create a resolver with no custom matchers.
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Appends a matcher consulted before all earlier registrations.
    pub fn register(&mut self, matcher: impl TypeMatcher + 'static) {
        self.matchers.push(Box::new(matcher));
    }

    /// Returns the builder for the given declared type.
    ///
    /// `Optional` wrappers are seen through first, so a member declared as
    /// `Option<T>` resolves exactly like `T`.
    pub fn resolve(&self, info: &'static TypeInfo) -> Result<Box<dyn ObjectBuilder>, MapError> {
        let shape = info.shape();

        for matcher in self.matchers.iter().rev() {
            if let Some(builder) = matcher.match_type(shape) {
                return Ok(builder);
            }
        }

        match shape {
            TypeInfo::Bean(bean) => Ok(Box::new(BeanBuilder::new(bean))),
            TypeInfo::Record(record) => Ok(Box::new(RecordBuilder::new(record))),
            TypeInfo::Sequence(sequence) => Ok(Box::new(SequenceBuilder::new(sequence))),
            TypeInfo::Scalar(_) | TypeInfo::Optional(_) => Err(MapError::NoUsableConstructor {
                type_path: shape.type_path(),
            }),
        }
    }

    /// Returns the number of registered matchers.
    pub fn matcher_len(&self) -> usize {
        self.matchers.len()
    }
}

impl Default for BuilderResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::any::TypeId;
    use objmap_reflect::info::Typed;

    #[test]
    fn shape_fallback_picks_the_builder_variant() {
        let resolver = BuilderResolver::new();

        let builder = resolver.resolve(Vec::<i32>::type_info()).unwrap();
        assert!(builder.member_type("anything").unwrap().is_scalar());
    }

    #[test]
    fn scalars_have_no_constructor() {
        let resolver = BuilderResolver::new();

        // The Ok side is not Debug, so take the error out by hand.
        let error = resolver.resolve(i32::type_info()).err().unwrap();
        assert_eq!(error, MapError::NoUsableConstructor { type_path: "i32" });
    }

    #[test]
    fn later_matcher_wins() {
        let mut resolver = BuilderResolver::new();

        let first = TypeId::of::<Vec<i64>>();
        resolver.register(move |info: &'static TypeInfo| {
            (info.type_id() == first).then(|| {
                Box::new(SequenceBuilder::new(
                    Vec::<i64>::type_info().as_sequence().unwrap(),
                )) as Box<dyn ObjectBuilder>
            })
        });
        // The later registration claims the same type with a different
        // element shape so the winner is observable.
        resolver.register(move |info: &'static TypeInfo| {
            (info.type_id() == first).then(|| {
                Box::new(SequenceBuilder::new(
                    Vec::<String>::type_info().as_sequence().unwrap(),
                )) as Box<dyn ObjectBuilder>
            })
        });

        let builder = resolver.resolve(Vec::<i64>::type_info()).unwrap();
        let element = builder.member_type("").unwrap();
        assert_eq!(element.type_id(), TypeId::of::<String>());
    }
}
