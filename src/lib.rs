//! Bidirectional JSON ⇄ object-graph mapping without per-type marshalling
//! code.
//!
//! This crate is a facade over the two member crates:
//!
//! - [`reflect`]: the type-introspection contract: static type information,
//!   the dynamic value model, the type registry, and the declarative
//!   registration macros.
//! - [`json`]: the mapper core: object builders, the matcher chain, the
//!   push-based parse driver, and the writer with its generator cache.
//!
//! # Example
//!
//! ```
//! use objmap_core::json::JsonMapper;
//! use objmap_core::reflect::reflect_bean;
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: i32,
//! }
//!
//! reflect_bean!(Person { name: String, age: i32 });
//!
//! let mut mapper = JsonMapper::new();
//! mapper.register::<Person>();
//!
//! let person: Person = mapper.parse(r#"{"name": "Ada", "age": 36}"#).unwrap();
//! assert_eq!(person, Person { name: "Ada".to_owned(), age: 36 });
//!
//! let text = mapper.to_json(&person).unwrap();
//! assert_eq!(text, r#"{"name": "Ada", "age": 36}"#);
//! ```

pub use objmap_json as json;
pub use objmap_reflect as reflect;
