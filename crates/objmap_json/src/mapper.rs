use core::any::Any;

use objmap_reflect::info::{Register, TypeInfo};
use objmap_reflect::registry::TypeRegistry;
use objmap_reflect::{Mapped, Value, ValueRef};

use crate::MapError;
use crate::read::{ParseDriver, parse_text};
use crate::resolver::{BuilderResolver, TypeMatcher};
use crate::write::{GeneratorCache, JsonWriter};

// -----------------------------------------------------------------------------
// JsonMapper

/// The two-way entry point: text → object graph and object graph → text.
///
/// A mapper owns a [`TypeRegistry`], the matcher chain and the generator
/// cache. Types and matchers are registered during setup through `&mut
/// self`; parsing and writing then share the mapper freely.
///
/// # Examples
///
/// ```
/// use objmap_json::JsonMapper;
/// use objmap_reflect::reflect_record;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// reflect_record!(Point { x: i32, y: i32 });
///
/// let mut mapper = JsonMapper::new();
/// mapper.register::<Point>();
///
/// let point: Point = mapper.parse(r#"{"y": 2, "x": 1}"#).unwrap();
/// assert_eq!(point.x, 1);
/// assert_eq!(mapper.to_json(&point).unwrap(), r#"{"x": 1, "y": 2}"#);
/// ```
pub struct JsonMapper {
    registry: TypeRegistry,
    resolver: BuilderResolver,
    generators: GeneratorCache,
}

impl JsonMapper {
    /// Create a mapper with the scalar types pre-registered and no custom
    /// matchers.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            resolver: BuilderResolver::new(),
            generators: GeneratorCache::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Setup

    /// Registers `T` and every type reachable from its members.
    pub fn register<T: Register>(&mut self) {
        self.registry.register::<T>();
    }

    /// Appends a matcher consulted before all earlier registrations;
    /// most-recently-added wins.
    pub fn register_type_matcher(&mut self, matcher: impl TypeMatcher + 'static) {
        self.resolver.register(matcher);
    }

    /// Registers every type submitted through
    /// [`auto_register!`](objmap_reflect::auto_register), anywhere in the
    /// binary.
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) {
        self.registry.auto_register();
    }

    /// Returns the type registry.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Returns the type registry for direct mutation.
    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    /// Returns the writer-side generator cache.
    pub fn generator_cache(&self) -> &GeneratorCache {
        &self.generators
    }

    // -------------------------------------------------------------------------
    // Reading

    /// Parses `text` into a `T`.
    pub fn parse<T: Mapped>(&self, text: &str) -> Result<T, MapError> {
        let value = self.parse_with(text, T::type_info())?;
        Ok(T::from_value(value)?)
    }

    /// Parses `text` against a reified type descriptor.
    ///
    /// This is the generic-type entry point: the caller supplies the info
    /// (for example `Vec::<Foo>::type_info()`) and gets the type-erased
    /// result back.
    pub fn parse_with(&self, text: &str, target: &'static TypeInfo) -> Result<Value, MapError> {
        let mut driver = ParseDriver::new(&self.resolver, target);
        parse_text(text, &mut driver)?;
        driver.into_result()
    }

    /// Parses `text` against a type named by its registered path.
    pub fn parse_dynamic(&self, text: &str, type_path: &str) -> Result<Value, MapError> {
        let info =
            self.registry
                .get_with_path(type_path)
                .ok_or_else(|| MapError::UnregisteredType {
                    type_path: type_path.to_owned(),
                })?;
        self.parse_with(text, info)
    }

    // -------------------------------------------------------------------------
    // Writing

    /// Renders a value to text.
    pub fn to_json<T: Mapped>(&self, value: &T) -> Result<String, MapError> {
        JsonWriter::new(&self.generators).write(value.value_ref())
    }

    /// Renders a type-erased value to text.
    ///
    /// The value's runtime type must have been registered; an unknown type
    /// has no introspectable shape and fails with
    /// [`MapError::UnsupportedValue`].
    pub fn to_json_any(&self, value: &dyn Any) -> Result<String, MapError> {
        let Some(info) = self.registry.get(value.type_id()) else {
            return Err(MapError::UnsupportedValue {
                detail: format!("no registered shape for {:?}", value.type_id()),
            });
        };
        JsonWriter::new(&self.generators).write(ValueRef::Composite { value, info })
    }
}

impl Default for JsonMapper {
    fn default() -> Self {
        Self::new()
    }
}
