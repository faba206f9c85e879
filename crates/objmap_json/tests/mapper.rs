//! End-to-end mapping behavior through [`JsonMapper`].

use core::any::TypeId;

use objmap_json::builder::{ObjectBuilder, SequenceBuilder};
use objmap_json::{JsonMapper, MapError};
use objmap_reflect::info::{TypeInfo, Typed};
use objmap_reflect::{Mapped, ValueError, reflect_bean, reflect_record};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Default, Debug, PartialEq)]
struct Address {
    street: String,
    zip: String,
}

reflect_bean!(Address {
    street: String,
    zip: String,
});

#[derive(Default, Debug, PartialEq)]
struct Person {
    name: String,
    age: i32,
    address: Address,
    nickname: Option<String>,
}

reflect_bean!(Person {
    name: String,
    age: i32,
    address: Address,
    nickname: Option<String>,
});

#[derive(Debug, PartialEq)]
struct Triple {
    a: i64,
    b: i64,
    c: i64,
}

reflect_record!(Triple {
    a: i64,
    b: i64,
    c: i64,
});

#[derive(Default, Debug, PartialEq)]
struct Renamed {
    kind: String,
    sort_order: i32,
}

reflect_bean!(Renamed {
    kind as "type": String,
    sort_order as "sort-order": i32,
});

fn mapper() -> JsonMapper {
    let mut mapper = JsonMapper::new();
    mapper.register::<Person>();
    mapper.register::<Triple>();
    mapper.register::<Renamed>();
    mapper.register::<Vec<Triple>>();
    mapper
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn bean_with_nested_bean_round_trips() {
    let mapper = mapper();
    let person = Person {
        name: "Ada".to_owned(),
        age: 36,
        address: Address {
            street: "Main St".to_owned(),
            zip: "12345".to_owned(),
        },
        nickname: None,
    };

    let text = mapper.to_json(&person).unwrap();
    let back: Person = mapper.parse(&text).unwrap();
    assert_eq!(back, person);
}

#[test]
fn sequence_of_records_round_trips() {
    let mapper = mapper();
    let triples = vec![Triple { a: 1, b: 2, c: 3 }, Triple { a: 4, b: 5, c: 6 }];

    let text = mapper.to_json(&triples).unwrap();
    assert_eq!(
        text,
        r#"[{"a": 1, "b": 2, "c": 3}, {"a": 4, "b": 5, "c": 6}]"#
    );

    let back: Vec<Triple> = mapper.parse(&text).unwrap();
    assert_eq!(back, triples);
}

#[test]
fn record_of_primitives_round_trips() {
    let mapper = mapper();
    let triple = Triple { a: -1, b: 0, c: 1 };

    let back: Triple = mapper.parse(&mapper.to_json(&triple).unwrap()).unwrap();
    assert_eq!(back, triple);
}

#[test]
fn string_escapes_round_trip() {
    let mapper = mapper();
    let person = Person {
        name: "li\"ne\n\\tab\t\u{1}".to_owned(),
        ..Default::default()
    };

    let text = mapper.to_json(&person).unwrap();
    let back: Person = mapper.parse(&text).unwrap();
    assert_eq!(back.name, person.name);
}

// -----------------------------------------------------------------------------
// Reading

#[test]
fn unknown_member_fails() {
    let mapper = mapper();

    let error = mapper.parse::<Address>(r#"{"unknownField": 1}"#).unwrap_err();
    assert_eq!(
        error,
        MapError::UnknownMember {
            key: "unknownField".to_owned(),
            type_path: core::any::type_name::<Address>(),
        }
    );
}

#[test]
fn record_populates_out_of_declaration_order() {
    let mapper = mapper();

    let triple: Triple = mapper.parse(r#"{"c": 3, "a": 1, "b": 2}"#).unwrap();
    assert_eq!(triple, Triple { a: 1, b: 2, c: 3 });
}

#[test]
fn record_missing_component_fails() {
    let mapper = mapper();

    let error = mapper.parse::<Triple>(r#"{"a": 1, "c": 3}"#).unwrap_err();
    assert_eq!(
        error,
        MapError::Value(ValueError::MissingComponent {
            component: "b",
            type_path: core::any::type_name::<Triple>(),
        })
    );
}

#[test]
fn optional_member_accepts_null_and_absence() {
    let mapper = mapper();

    let absent: Person = mapper
        .parse(r#"{"name": "a", "age": 1, "address": {"street": "s", "zip": "z"}}"#)
        .unwrap();
    assert_eq!(absent.nickname, None);

    let null: Person = mapper
        .parse(
            r#"{"name": "a", "age": 1, "nickname": null,
                "address": {"street": "s", "zip": "z"}}"#,
        )
        .unwrap();
    assert_eq!(null.nickname, None);

    let present: Person = mapper
        .parse(
            r#"{"name": "a", "age": 1, "nickname": "al",
                "address": {"street": "s", "zip": "z"}}"#,
        )
        .unwrap();
    assert_eq!(present.nickname, Some("al".to_owned()));
}

#[test]
fn malformed_text_reports_position() {
    let mapper = mapper();

    let error = mapper
        .parse::<Address>("{\n  \"street\": \"s\",\n  12\n}")
        .unwrap_err();
    assert_eq!(
        error,
        MapError::MalformedText {
            message: "expected a member name".to_owned(),
            line: 3,
            column: 3,
        }
    );
}

#[test]
fn out_of_range_integer_fails() {
    #[derive(Default, Debug, PartialEq)]
    struct Tiny {
        n: u8,
    }
    reflect_bean!(Tiny { n: u8 });

    let mapper = JsonMapper::new();
    let error = mapper.parse::<Tiny>(r#"{"n": 300}"#).unwrap_err();
    assert_eq!(
        error,
        MapError::Value(ValueError::OutOfRange {
            value: 300,
            target: "u8",
        })
    );
}

// -----------------------------------------------------------------------------
// Root policy and dynamic entry points

#[test]
fn scalar_root_is_a_documented_policy() {
    let mapper = mapper();

    // Scalar-shaped roots accept a bare scalar document.
    let n: i32 = mapper.parse("42").unwrap();
    assert_eq!(n, 42);
    let s: Option<String> = mapper.parse("null").unwrap();
    assert_eq!(s, None);

    // Composite-shaped roots reject it.
    let error = mapper.parse::<Address>("42").unwrap_err();
    assert_eq!(
        error,
        MapError::ScalarRoot {
            type_path: core::any::type_name::<Address>(),
        }
    );
}

#[test]
fn parse_with_reified_descriptor() {
    let mapper = mapper();

    let value = mapper
        .parse_with(r#"[{"a": 1, "b": 2, "c": 3}]"#, Vec::<Triple>::type_info())
        .unwrap();
    let triples = Vec::<Triple>::from_value(value).unwrap();
    assert_eq!(triples, vec![Triple { a: 1, b: 2, c: 3 }]);
}

#[test]
fn parse_dynamic_by_type_path() {
    let mapper = mapper();

    let value = mapper
        .parse_dynamic(
            r#"{"street": "s", "zip": "z"}"#,
            core::any::type_name::<Address>(),
        )
        .unwrap();
    let address = Address::from_value(value).unwrap();
    assert_eq!(address.zip, "z");

    let error = mapper.parse_dynamic("{}", "no::such::Type").unwrap_err();
    assert_eq!(
        error,
        MapError::UnregisteredType {
            type_path: "no::such::Type".to_owned(),
        }
    );
}

// -----------------------------------------------------------------------------
// Writing

#[test]
fn rename_applies_in_both_directions() {
    let mapper = mapper();
    let renamed = Renamed {
        kind: "x".to_owned(),
        sort_order: 3,
    };

    let text = mapper.to_json(&renamed).unwrap();
    assert_eq!(text, r#"{"type": "x", "sort-order": 3}"#);

    let back: Renamed = mapper.parse(&text).unwrap();
    assert_eq!(back, renamed);

    // The declared names are not accepted on the wire.
    let error = mapper
        .parse::<Renamed>(r#"{"kind": "x", "sort_order": 3}"#)
        .unwrap_err();
    assert!(matches!(error, MapError::UnknownMember { .. }));
}

#[test]
fn generator_order_is_stable_across_instances() {
    let mapper = mapper();

    let first = mapper
        .to_json(&Triple { a: 1, b: 2, c: 3 })
        .unwrap();
    let second = mapper
        .to_json(&Triple { a: 9, b: 8, c: 7 })
        .unwrap();

    let keys = |text: &str| {
        text.match_indices('"')
            .map(|(i, _)| i)
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
    assert_eq!(mapper.generator_cache().len(), 1);
}

#[test]
fn generator_cache_is_inspectable_and_resettable() {
    let mapper = mapper();
    assert!(mapper.generator_cache().is_empty());

    mapper.to_json(&Triple { a: 1, b: 2, c: 3 }).unwrap();
    assert_eq!(mapper.generator_cache().len(), 1);

    mapper.generator_cache().clear();
    assert!(mapper.generator_cache().is_empty());
}

#[test]
fn to_json_any_requires_registration() {
    let mapper = mapper();

    let text = mapper
        .to_json_any(&Address {
            street: "s".to_owned(),
            zip: "z".to_owned(),
        })
        .unwrap();
    assert_eq!(text, r#"{"street": "s", "zip": "z"}"#);

    #[derive(Default)]
    struct Unregistered;
    let error = mapper.to_json_any(&Unregistered).unwrap_err();
    assert!(matches!(error, MapError::UnsupportedValue { .. }));
}

#[test]
fn output_is_valid_json_per_serde() {
    let mapper = mapper();
    let person = Person {
        name: "quote \" and \u{2} ctrl".to_owned(),
        age: 7,
        address: Address {
            street: "s".to_owned(),
            zip: "z".to_owned(),
        },
        nickname: Some("n".to_owned()),
    };

    let text = mapper.to_json(&person).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["name"], "quote \" and \u{2} ctrl");
    assert_eq!(parsed["age"], 7);
    assert_eq!(parsed["address"]["zip"], "z");
    assert_eq!(parsed["nickname"], "n");
}

// -----------------------------------------------------------------------------
// Matcher chain

#[test]
fn later_matcher_wins() {
    // Both matchers claim Vec<i64>; the second registration decides, and it
    // decodes elements as strings instead.
    let target = TypeId::of::<Vec<i64>>();

    let mut mapper = JsonMapper::new();
    mapper.register_type_matcher(move |info: &'static TypeInfo| {
        (info.type_id() == target).then(|| {
            Box::new(SequenceBuilder::new(
                Vec::<i64>::type_info().as_sequence().unwrap(),
            )) as Box<dyn ObjectBuilder>
        })
    });
    mapper.register_type_matcher(move |info: &'static TypeInfo| {
        (info.type_id() == target).then(|| {
            Box::new(SequenceBuilder::new(
                Vec::<String>::type_info().as_sequence().unwrap(),
            )) as Box<dyn ObjectBuilder>
        })
    });

    let value = mapper
        .parse_with(r#"["x", "y"]"#, Vec::<i64>::type_info())
        .unwrap();
    let strings = Vec::<String>::from_value(value).unwrap();
    assert_eq!(strings, vec!["x".to_owned(), "y".to_owned()]);
}

#[test]
fn without_matchers_the_shape_decides() {
    let mapper = JsonMapper::new();

    let error = mapper.parse_with("{}", i32::type_info()).unwrap_err();
    assert_eq!(error, MapError::NoUsableConstructor { type_path: "i32" });
}
