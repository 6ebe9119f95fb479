use crate::*;
use indexmap::IndexMap;

#[test]
fn parse_coerces_booleans_and_numbers() {
    let parsed = parse_query("a=true&b=false&c=42&d=2.5&e=hello");

    assert_eq!(parsed["a"], ConfigValue::from(true));
    assert_eq!(parsed["b"], ConfigValue::from(false));
    assert_eq!(parsed["c"], ConfigValue::from(42i64));
    assert_eq!(parsed["d"], ConfigValue::Scalar(Scalar::Number(
        serde_json::Number::from_f64(2.5).unwrap()
    )));
    assert_eq!(parsed["e"], ConfigValue::from("hello"));
}

#[test]
fn parse_keeps_non_numeric_strings() {
    let parsed = parse_query("a=0x1A&b=12px&c=");

    assert_eq!(parsed["a"], ConfigValue::from("0x1A"));
    assert_eq!(parsed["b"], ConfigValue::from("12px"));
    assert_eq!(parsed["c"], ConfigValue::from(""));
}

#[test]
fn parse_accepts_a_leading_question_mark() {
    let parsed = parse_query("?a=1");
    assert_eq!(parsed["a"], ConfigValue::from(1i64));
}

#[test]
fn parse_folds_repeated_keys_into_lists() {
    let parsed = parse_query("k=1&k=2&k=three");

    assert_eq!(
        parsed["k"],
        ConfigValue::List(vec![1i64.into(), 2i64.into(), "three".into()])
    );
}

#[test]
fn parse_decodes_percent_escapes_and_plus() {
    let parsed = parse_query("name=hello%20world&title=a+b");

    assert_eq!(parsed["name"], ConfigValue::from("hello world"));
    assert_eq!(parsed["title"], ConfigValue::from("a b"));
}

#[test]
fn write_sorts_keys_and_escapes_values() {
    let mut pairs = IndexMap::new();
    pairs.insert("zeta".to_string(), ConfigValue::from("a b"));
    pairs.insert("alpha".to_string(), ConfigValue::from(true));

    assert_eq!(write_query(&pairs), "alpha=true&zeta=a+b");
}

#[test]
fn write_encodes_lists_as_repeated_keys() {
    let mut pairs = IndexMap::new();
    pairs.insert(
        "colors".to_string(),
        ConfigValue::List(vec!["red".into(), "blue".into()]),
    );

    assert_eq!(write_query(&pairs), "colors=red&colors=blue");
}

#[test]
fn write_then_parse_round_trips_native_types() {
    let mut pairs = IndexMap::new();
    pairs.insert("flag".to_string(), ConfigValue::from(true));
    pairs.insert("count".to_string(), ConfigValue::from(42i64));
    pairs.insert("label".to_string(), ConfigValue::from("hello world"));
    pairs.insert(
        "list".to_string(),
        ConfigValue::List(vec![1i64.into(), 2i64.into()]),
    );

    let reparsed = parse_query(&write_query(&pairs));

    for (key, value) in &pairs {
        assert_eq!(&reparsed[key.as_str()], value, "key {key}");
    }
}
