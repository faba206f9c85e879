use core::any::Any;

use objmap_reflect::Value;
use objmap_reflect::info::TypeInfo;

use crate::MapError;
use crate::builder::ObjectBuilder;
use crate::read::JsonVisitor;
use crate::resolver::BuilderResolver;

// -----------------------------------------------------------------------------
// Context

/// One stack frame: a builder paired with its live accumulator.
///
/// The builder never changes after the frame is pushed.
struct Context {
    builder: Box<dyn ObjectBuilder>,
    instance: Box<dyn Any>,
}

// -----------------------------------------------------------------------------
// ParseDriver

/// The state machine assembling an object graph from visitor events.
///
/// Entering a composite resolves a builder for the expected type (the
/// root's type at depth 0, otherwise the parent builder's
/// [`member_type`](ObjectBuilder::member_type)) and pushes a [`Context`];
/// leaving one pops it, finalizes the accumulator and incorporates the
/// result into the parent. The stack is empty again when the root closes.
///
/// A bare scalar document is accepted only when the root type itself is
/// scalar-shaped; a composite-shaped root rejects it with
/// [`MapError::ScalarRoot`].
pub struct ParseDriver<'a> {
    resolver: &'a BuilderResolver,
    root: &'static TypeInfo,
    stack: Vec<Context>,
    result: Option<Value>,
}

impl<'a> ParseDriver<'a> {
    /// Create a driver expecting a document of the given root type.
    pub fn new(resolver: &'a BuilderResolver, root: &'static TypeInfo) -> Self {
        Self {
            resolver,
            root,
            stack: Vec::new(),
            result: None,
        }
    }

    /// Returns the number of composites currently open.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Consumes the driver and returns the assembled root value.
    pub fn into_result(self) -> Result<Value, MapError> {
        match self.result {
            Some(value) => Ok(value),
            // Reachable only if the event stream ended early.
            None => Err(MapError::malformed("empty document", 1, 1)),
        }
    }

    fn member_info(&self, key: &str) -> Result<&'static TypeInfo, MapError> {
        match self.stack.last() {
            Some(context) => context.builder.member_type(key),
            None => Ok(self.root),
        }
    }
}

impl JsonVisitor for ParseDriver<'_> {
    fn value(&mut self, key: &str, value: Value) -> Result<(), MapError> {
        match self.stack.last_mut() {
            Some(context) => context
                .builder
                .incorporate(context.instance.as_mut(), key, value),
            None if self.root.shape().is_scalar() => {
                self.result = Some(value);
                Ok(())
            }
            None => Err(MapError::ScalarRoot {
                type_path: self.root.type_path(),
            }),
        }
    }

    fn start_object(&mut self, key: &str) -> Result<(), MapError> {
        let info = self.member_info(key)?;
        let builder = self.resolver.resolve(info)?;
        let instance = builder.create();
        self.stack.push(Context { builder, instance });
        Ok(())
    }

    fn end_object(&mut self, key: &str) -> Result<(), MapError> {
        let Some(context) = self.stack.pop() else {
            return Err(MapError::malformed("unbalanced composite end", 1, 1));
        };
        let value = context.builder.finish(context.instance)?;

        match self.stack.last_mut() {
            Some(parent) => parent
                .builder
                .incorporate(parent.instance.as_mut(), key, value),
            None => {
                self.result = Some(value);
                Ok(())
            }
        }
    }

    fn start_array(&mut self, key: &str) -> Result<(), MapError> {
        self.start_object(key)
    }

    fn end_array(&mut self, key: &str) -> Result<(), MapError> {
        self.end_object(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::parse_text;
    use objmap_reflect::info::Typed;
    use objmap_reflect::{Mapped, reflect_bean};

    #[derive(Default, Debug, PartialEq)]
    struct Inner {
        x: i32,
        y: i32,
    }

    reflect_bean!(Inner { x: i32, y: i32 });

    #[derive(Default, Debug, PartialEq)]
    struct Outer {
        inner: Inner,
    }

    reflect_bean!(Outer { inner: Inner });

    #[test]
    fn nested_composites_populate_fully() {
        let resolver = BuilderResolver::new();
        let mut driver = ParseDriver::new(&resolver, Outer::type_info());

        parse_text(r#"{"inner": {"x": 1, "y": 2}}"#, &mut driver).unwrap();
        assert_eq!(driver.depth(), 0);

        let outer = Outer::from_value(driver.into_result().unwrap()).unwrap();
        assert_eq!(
            outer,
            Outer {
                inner: Inner { x: 1, y: 2 },
            }
        );
    }

    #[test]
    fn unknown_member_aborts() {
        let resolver = BuilderResolver::new();
        let mut driver = ParseDriver::new(&resolver, Inner::type_info());

        let error = parse_text(r#"{"unknownField": 1}"#, &mut driver).unwrap_err();
        assert_eq!(
            error,
            MapError::UnknownMember {
                key: "unknownField".to_owned(),
                type_path: core::any::type_name::<Inner>(),
            }
        );
    }

    #[test]
    fn scalar_root_policy() {
        let resolver = BuilderResolver::new();

        // A scalar-shaped root accepts a bare scalar document.
        let mut driver = ParseDriver::new(&resolver, i32::type_info());
        parse_text("42", &mut driver).unwrap();
        assert_eq!(i32::from_value(driver.into_result().unwrap()), Ok(42));

        // A composite-shaped root does not.
        let mut driver = ParseDriver::new(&resolver, Inner::type_info());
        let error = parse_text("42", &mut driver).unwrap_err();
        assert_eq!(
            error,
            MapError::ScalarRoot {
                type_path: core::any::type_name::<Inner>(),
            }
        );
    }
}
