//! Field-normalization rules, exercised on raw record fixtures.

use serde_json::{json, Value};

use ftdb_harvest::error::HarvestError;
use ftdb_harvest::normalize::{
    parse_article_numbers, parse_common, parse_count, parse_weight, ticket_id,
};

const BASE: &str = "https://example.test";

fn kit_record() -> Value {
    json!({
        "ticket_id": 5,
        "createdUTC": "2020-01-02 03:04:05",
        "title": "Universal Kit",
        "ft_article_nos": "[[\"146216\", \"1978\"], [null, \"1979\"]]",
        "ft_variant_uuid": "abc-123",
        "ft_icon": "icons/5.png",
        "ft_cat_all": ["653"]
    })
}

#[test]
fn created_timestamp_gets_t_separator() {
    let common = parse_common(&kit_record(), BASE).expect("record should normalize");
    assert_eq!(common.created, "2020-01-02T03:04:05");
}

#[test]
fn urls_are_derived_from_the_ticket_id_in_lock_step() {
    let common = parse_common(&kit_record(), BASE).expect("record should normalize");
    assert_eq!(common.url_api, "https://example.test/api/ticket/5");
    assert_eq!(common.url, "https://example.test/ticket/5");
}

#[test]
fn trailing_slash_on_base_url_is_tolerated() {
    let common = parse_common(&kit_record(), "https://example.test/").expect("should normalize");
    assert_eq!(common.url_api, "https://example.test/api/ticket/5");
}

#[test]
fn thumbnail_url_present_only_with_icon() {
    let common = parse_common(&kit_record(), BASE).expect("record should normalize");
    assert_eq!(
        common.thumbnail_url.as_deref(),
        Some("https://example.test/thumbnail/icons/5.png")
    );

    let mut record = kit_record();
    record["ft_icon"] = Value::String(String::new());
    let common = parse_common(&record, BASE).expect("record should normalize");
    assert_eq!(common.thumbnail_url, None);

    let record = json!({
        "ticket_id": 5,
        "createdUTC": "2020-01-02 03:04:05",
        "title": "Universal Kit"
    });
    let common = parse_common(&record, BASE).expect("record should normalize");
    assert_eq!(common.thumbnail_url, None);
}

#[test]
fn absent_thumbnail_is_omitted_from_serialized_record() {
    let record = json!({
        "ticket_id": 5,
        "createdUTC": "2020-01-02 03:04:05",
        "title": "Universal Kit"
    });
    let common = parse_common(&record, BASE).expect("record should normalize");
    let serialized = serde_json::to_value(&common).expect("serializes");
    let object = serialized.as_object().expect("object");
    assert!(
        !object.contains_key("thumbnail_url"),
        "absence of the key is the downstream signal, null is not"
    );
}

#[test]
fn article_numbers_empty_for_missing_null_and_empty_list() {
    assert!(parse_article_numbers(None, 1).expect("ok").is_empty());
    assert!(parse_article_numbers(Some(&Value::Null), 1)
        .expect("ok")
        .is_empty());
    assert!(parse_article_numbers(Some(&json!("[]")), 1)
        .expect("ok")
        .is_empty());
}

#[test]
fn article_numbers_decode_pairs_into_a_mapping() {
    let field = json!("[[\"146216\", \"1978\"], [\"30030\", \"1985\"]]");
    let numbers = parse_article_numbers(Some(&field), 1).expect("ok");
    assert_eq!(numbers.len(), 2);
    assert_eq!(numbers["146216"], json!("1978"));
    assert_eq!(numbers["30030"], json!("1985"));
}

#[test]
fn null_article_number_becomes_empty_string_key() {
    let field = json!("[[null, \"1979\"]]");
    let numbers = parse_article_numbers(Some(&field), 1).expect("ok");
    assert_eq!(numbers.len(), 1, "the entry must not be dropped");
    assert_eq!(numbers[""], json!("1979"));
}

#[test]
fn unparsable_article_payload_is_a_decode_error() {
    let field = json!("definitely not json");
    let err = parse_article_numbers(Some(&field), 7).expect_err("must fail loudly");
    assert!(matches!(err, HarvestError::Decode { .. }), "got {err:?}");
}

#[test]
fn non_string_article_field_is_a_contract_violation() {
    let field = json!([["146216", "1978"]]);
    let err = parse_article_numbers(Some(&field), 7).expect_err("must fail loudly");
    assert!(matches!(err, HarvestError::UnexpectedShape { .. }), "got {err:?}");
}

#[test]
fn count_truthiness_mirrors_the_api_encoding() {
    assert_eq!(parse_count(None, 1).expect("ok"), None);
    assert_eq!(parse_count(Some(&Value::Null), 1).expect("ok"), None);
    assert_eq!(parse_count(Some(&json!(0)), 1).expect("ok"), None);
    assert_eq!(parse_count(Some(&json!("")), 1).expect("ok"), None);
    assert_eq!(parse_count(Some(&json!(7)), 1).expect("ok"), Some(7));
    assert_eq!(parse_count(Some(&json!("3")), 1).expect("ok"), Some(3));
    // the string "0" is present and truthy, unlike numeric zero
    assert_eq!(parse_count(Some(&json!("0")), 1).expect("ok"), Some(0));
    assert!(parse_count(Some(&json!("many")), 1).is_err());
}

#[test]
fn weight_accepts_numbers_and_numeric_strings() {
    assert_eq!(parse_weight(None, 1).expect("ok"), None);
    assert_eq!(parse_weight(Some(&Value::Null), 1).expect("ok"), None);
    assert_eq!(parse_weight(Some(&json!("")), 1).expect("ok"), None);
    assert_eq!(parse_weight(Some(&json!(2.5)), 1).expect("ok"), Some(2.5));
    assert_eq!(parse_weight(Some(&json!("2.5")), 1).expect("ok"), Some(2.5));
    assert!(parse_weight(Some(&json!("heavy")), 1).is_err());
}

#[test]
fn ticket_id_accepts_numbers_and_numeric_strings() {
    assert_eq!(ticket_id(&json!({"ticket_id": 42})).expect("ok"), 42);
    assert_eq!(ticket_id(&json!({"ticket_id": "42"})).expect("ok"), 42);
    assert!(ticket_id(&json!({"title": "no id"})).is_err());
}

#[test]
fn missing_required_field_is_reported_with_the_field_name() {
    let record = json!({"ticket_id": 5, "title": "no timestamp"});
    let err = parse_common(&record, BASE).expect_err("must fail");
    match err {
        HarvestError::UnexpectedShape { field, .. } => assert_eq!(field, "createdUTC"),
        other => panic!("expected UnexpectedShape, got {other:?}"),
    }
}
