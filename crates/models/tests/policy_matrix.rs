mod common;

use common::*;
use jsoncmp_codec::{
    from_str, from_value, to_string, to_value, ConfigError, DateFormat, DecodeError, EncodeError,
    EncodingConfig, EnumPolicy, PathSegment,
};
use jsoncmp_models::{DataWrapper, Person, Product, ProductCategory};
use jsoncmp_value::{Value, ValueKind};

fn enums(policy: EnumPolicy) -> EncodingConfig {
    EncodingConfig {
        enum_policy: policy,
        ..EncodingConfig::default()
    }
}

fn dates(pattern: &str) -> EncodingConfig {
    EncodingConfig {
        date_format: DateFormat::Pattern(pattern.to_string()),
        ..EncodingConfig::default()
    }
}

#[test]
fn enum_tokens_per_policy() {
    let prod = product(1, ProductCategory::Electronics);
    let symbolic = to_string(&prod, &enums(EnumPolicy::Symbolic)).unwrap();
    assert!(symbolic.contains(r#""Category":"Electronics""#), "{symbolic}");
    let ordinal = to_string(&prod, &enums(EnumPolicy::Ordinal)).unwrap();
    assert!(ordinal.contains(r#""Category":0"#), "{ordinal}");

    for text in [&symbolic, &ordinal] {
        for policy in [EnumPolicy::Symbolic, EnumPolicy::Ordinal] {
            let back: Product = from_str(text, &enums(policy)).unwrap();
            assert_eq!(back.category, ProductCategory::Electronics);
        }
    }
}

#[test]
fn every_declared_category_survives_both_policies() {
    for ordinal in 0..7 {
        let category = ProductCategory::from_raw(ordinal);
        for policy in [EnumPolicy::Symbolic, EnumPolicy::Ordinal] {
            let config = enums(policy);
            let tree = to_value(&category, &config).unwrap();
            assert_eq!(from_value::<ProductCategory>(&tree, &config).unwrap(), category);
        }
    }
}

#[test]
fn undeclared_categories() {
    let prod = product(8, ProductCategory::Undeclared(42));
    let text = to_string(&prod, &enums(EnumPolicy::Ordinal)).unwrap();
    assert!(text.contains(r#""Category":42"#), "{text}");

    match to_string(&prod, &enums(EnumPolicy::Symbolic)) {
        Err(EncodeError::UnrepresentableEnum { path, type_name, ordinal }) => {
            assert_eq!(path.to_string(), "Category");
            assert_eq!(type_name, "ProductCategory");
            assert_eq!(ordinal, 42);
        }
        other => panic!("expected UnrepresentableEnum, got {other:?}"),
    }

    match from_str::<Product>(&text, &EncodingConfig::default()) {
        Err(DecodeError::UnknownEnumValue { path, value, .. }) => {
            assert_eq!(path.to_string(), "Category");
            assert_eq!(value, "42");
        }
        other => panic!("expected UnknownEnumValue, got {other:?}"),
    }
}

#[test]
fn enum_decoding_honours_its_switches() {
    let strict = EncodingConfig {
        decode_case_insensitive: false,
        accept_enum_ordinals: false,
        ..EncodingConfig::default()
    };
    let lower = r#"{"Category":"books"}"#;
    let numeric = r#"{"Category":2}"#;
    assert_eq!(
        from_str::<Product>(lower, &EncodingConfig::default()).unwrap().category,
        ProductCategory::Books
    );
    assert!(matches!(
        from_str::<Product>(lower, &strict),
        Err(DecodeError::UnknownEnumValue { .. })
    ));
    assert!(matches!(
        from_str::<Product>(numeric, &strict),
        Err(DecodeError::UnknownEnumValue { .. })
    ));
    assert!(matches!(
        from_str::<Product>(r#"{"Category":"Gadgets"}"#, &EncodingConfig::default()),
        Err(DecodeError::UnknownEnumValue { .. })
    ));
}

#[test]
fn reference_date_patterns() {
    let mut p = sparse_person(1);
    p.birth_date = reference_instant();
    let cases = [
        ("dd.MM.yyyy", "20.07.1995", false),
        ("yyyy-MM-dd", "1995-07-20", false),
        ("dd/MM/yyyy HH:mm:ss", "20/07/1995 14:30:00", true),
        ("MMMM dd, yyyy", "July 20, 1995", false),
    ];
    for (pattern, literal, keeps_time) in cases {
        let config = dates(pattern);
        let text = to_string(&p, &config).unwrap();
        assert!(
            text.contains(&format!(r#""BirthDate":"{literal}""#)),
            "{pattern}: {text}"
        );
        let back: Person = from_str(&text, &config).unwrap();
        assert_eq!(back.birth_date.date(), p.birth_date.date(), "{pattern}");
        if keeps_time {
            assert_eq!(back.birth_date, p.birth_date, "{pattern}");
        }
    }
}

#[test]
fn iso_profiles() {
    let mut p = sparse_person(1);
    p.birth_date = reference_instant();
    let utc = to_string(&p, &EncodingConfig::default()).unwrap();
    assert!(utc.contains(r#""BirthDate":"1995-07-20T14:30:00Z""#), "{utc}");
    let local_config = EncodingConfig {
        date_format: DateFormat::Iso8601Local,
        ..EncodingConfig::default()
    };
    let local = to_string(&p, &local_config).unwrap();
    assert!(local.contains(r#""BirthDate":"1995-07-20T14:30:00""#), "{local}");
    assert_eq!(from_str::<Person>(&local, &local_config).unwrap(), p);
}

#[test]
fn timestamps_in_the_wrong_format_are_rejected() {
    let text = r#"{"Id":1,"BirthDate":"1995-07-20T14:30:00Z"}"#;
    match from_str::<Person>(text, &dates("dd.MM.yyyy")) {
        Err(DecodeError::InvalidTimestamp { path, format, .. }) => {
            assert_eq!(path.to_string(), "BirthDate");
            assert_eq!(format, "dd.MM.yyyy");
        }
        other => panic!("expected InvalidTimestamp, got {other:?}"),
    }
}

#[test]
fn patterns_that_drop_the_day_are_refused_up_front() {
    let p = sparse_person(1);
    for pattern in ["MMMM yyyy", "HH:mm", "hh:mm dd.MM.yyyy"] {
        assert!(
            matches!(
                to_string(&p, &dates(pattern)),
                Err(EncodeError::Config(ConfigError::InvalidDatePattern { .. }))
            ),
            "{pattern}"
        );
        assert!(
            matches!(
                from_str::<Person>(r#"{"Id":1}"#, &dates(pattern)),
                Err(DecodeError::Config(ConfigError::InvalidDatePattern { .. }))
            ),
            "{pattern}"
        );
    }
}

#[test]
fn type_mismatches_name_the_field() {
    let text = r#"{"Persons":[{"Id":1},{"Id":"two"}]}"#;
    match from_str::<DataWrapper>(text, &EncodingConfig::default()) {
        Err(DecodeError::TypeMismatch { path, expected, actual }) => {
            assert_eq!(path.to_string(), "Persons[1].Id");
            assert_eq!(
                path.segments(),
                [
                    PathSegment::Key("Persons".into()),
                    PathSegment::Index(1),
                    PathSegment::Key("Id".into()),
                ]
            );
            assert_eq!(expected, ValueKind::Number);
            assert_eq!(actual, ValueKind::String);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }

    let err = from_str::<Person>(r#"{"Address":{"City":7}}"#, &EncodingConfig::default())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "type mismatch at Address.City: expected string, found number"
    );

    let err = from_str::<Person>(r#"{"Skills":"rust"}"#, &EncodingConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::TypeMismatch { expected: ValueKind::Array, .. }
    ));
}

#[test]
fn malformed_text_is_a_syntax_error() {
    match from_str::<Person>(r#"{"Id":1,}"#, &EncodingConfig::default()) {
        Err(DecodeError::Syntax(e)) => assert_eq!(e.position, 8),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn config_loaded_from_text_drives_the_codec() {
    let config = EncodingConfig::from_json(
        r#"{"omitNulls": true, "enumPolicy": "symbolic", "fieldNaming": "lowerCamel",
            "datePattern": "yyyy-MM-dd", "cyclePolicy": "omitEdge"}"#,
    )
    .unwrap();
    let (p1, _p2) = cyclic_pair();
    let tree = to_value(&p1, &config).unwrap();
    assert_eq!(tree.get("birthDate").and_then(Value::as_str), Some("1995-07-20"));
    assert!(tree.get("salary").is_none());
    assert!(tree.pointer("/manager/manager").is_none());

    let prod = product(1, ProductCategory::Toys);
    let tree = to_value(&prod, &config).unwrap();
    assert_eq!(tree.get("category").and_then(Value::as_str), Some("Toys"));
}
