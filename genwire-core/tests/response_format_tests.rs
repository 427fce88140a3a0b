//! Tests for the response_format wire encoding

use genwire_core::codec::{
    decode_response_format, decode_response_format_str, encode_response_format, is_sorted,
    CodecError, EncoderOptions, JsonEncoder, KeyOrder,
};
use genwire_core::protocol::{JsonSchema, ResponseFormat};
use proptest::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use test_case::test_case;

#[derive(Serialize)]
struct WeatherSchema {
    // Declared out of alphabetical order on purpose
    r#type: &'static str,
    required: Vec<&'static str>,
    properties: WeatherProperties,
    additional_properties: bool,
}

#[derive(Serialize)]
struct WeatherProperties {
    temperature: Value,
    city: Value,
}

fn weather_schema() -> JsonSchema {
    let payload = WeatherSchema {
        r#type: "object",
        required: vec!["city", "temperature"],
        properties: WeatherProperties {
            temperature: json!({"type": "number"}),
            city: json!({"type": "string"}),
        },
        additional_properties: false,
    };
    JsonSchema::from_serializable("weather_report", &payload).unwrap()
}

#[test]
fn test_auto_serializes_to_text() {
    let json = serde_json::to_string(&ResponseFormat::Auto).unwrap();
    assert_eq!(json, r#"{"type":"text"}"#);
}

#[test]
fn test_named_type_serializes_name() {
    let json = serde_json::to_string(&ResponseFormat::json_object()).unwrap();
    assert_eq!(json, r#"{"type":"json_object"}"#);
}

#[test]
fn test_structured_output_shape() {
    let value = encode_response_format(&ResponseFormat::StructuredOutput(weather_schema())).unwrap();
    let top = value.as_object().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top["type"], json!("json_schema"));

    let nested = top["json_schema"].as_object().unwrap();
    let mut keys: Vec<&str> = nested.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["name", "schema", "strict"]);
    assert_eq!(nested["name"], json!("weather_report"));
    assert_eq!(nested["strict"], json!(true));
}

#[test]
fn test_structured_output_text_has_sorted_keys() {
    let format = ResponseFormat::StructuredOutput(weather_schema());
    let json = serde_json::to_string(&format).unwrap();

    assert!(json.starts_with(r#"{"type":"json_schema","json_schema":{"name":"weather_report","schema":{"#));

    let name = json.find(r#""name""#).unwrap();
    let schema = json.find(r#""schema""#).unwrap();
    let strict = json.find(r#""strict""#).unwrap();
    assert!(name < schema && schema < strict);

    // Payload keys come out sorted at every depth
    let additional = json.find(r#""additional_properties""#).unwrap();
    let properties = json.find(r#""properties""#).unwrap();
    let required = json.find(r#""required""#).unwrap();
    assert!(additional < properties && properties < required);
    let city = json.find(r#""city""#).unwrap();
    let temperature = json.find(r#""temperature""#).unwrap();
    assert!(city < temperature);
}

#[test]
fn test_schema_sorting_does_not_touch_caller_encoder() {
    let payload = WeatherSchema {
        r#type: "object",
        required: vec!["city"],
        properties: WeatherProperties {
            temperature: json!({"type": "number"}),
            city: json!({"type": "string"}),
        },
        additional_properties: false,
    };
    let format = ResponseFormat::StructuredOutput(weather_schema());
    let encoder = JsonEncoder::new(EncoderOptions {
        key_order: KeyOrder::Preserve,
        pretty: false,
    });

    let body = encoder.to_string(&format).unwrap();
    assert_eq!(encoder.key_order(), KeyOrder::Preserve);
    assert!(body.starts_with(r#"{"type":"json_schema","json_schema":{"name":"weather_report","schema":{"additional_properties":false,"properties":{"city":"#));
    let value = encoder.to_value(&format).unwrap();
    assert!(is_sorted(&value["json_schema"]["schema"]));

    // Declaration order still applies to the next value through the same encoder
    let raw = encoder.to_string(&payload).unwrap();
    assert!(raw.starts_with(r#"{"type":"object","required":["city"],"properties":{"temperature":"#));
}

#[test]
fn test_concurrent_structured_output_encoding() {
    let schema = JsonSchema::new("nested", json!({"b": 1, "a": {"d": 2, "c": 3}}));
    let format = ResponseFormat::structured_output(schema);
    let expected = r#"{"type":"json_schema","json_schema":{"name":"nested","schema":{"a":{"c":3,"d":2},"b":1},"strict":true}}"#;

    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    (0..50)
                        .map(|_| serde_json::to_string(&format).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(outputs.len(), 400);
    assert!(outputs.iter().all(|out| out == expected));
}

#[test]
fn test_non_strict_schema() {
    let schema = JsonSchema::new("loose", json!({"type": "object"})).with_strict(false);
    let value = encode_response_format(&ResponseFormat::StructuredOutput(schema)).unwrap();
    assert_eq!(value["json_schema"]["strict"], json!(false));
}

#[test]
fn test_structured_output_decodes_as_named_type() {
    let encoded = encode_response_format(&ResponseFormat::StructuredOutput(weather_schema())).unwrap();
    let decoded = decode_response_format(encoded).unwrap();
    assert_eq!(decoded, ResponseFormat::Type("json_schema".to_string()));
}

#[test]
fn test_auto_decodes_as_text_type() {
    // {"type":"text"} is also the encoding of Type("text"); decode keeps the named form
    let encoded = encode_response_format(&ResponseFormat::Auto).unwrap();
    assert_eq!(decode_response_format(encoded).unwrap(), ResponseFormat::Type("text".to_string()));
}

#[test]
fn test_bare_auto_string() {
    assert_eq!(decode_response_format_str(r#""auto""#).unwrap(), ResponseFormat::Auto);
}

#[test_case(r#"{"type":"json_object"}"#, "json_object" ; "json object")]
#[test_case(r#"{"type":"text"}"#, "text" ; "text is not special cased")]
#[test_case(r#"{"type":"json_schema","json_schema":{"name":"x"}}"#, "json_schema" ; "nested schema ignored")]
#[test_case(r#"{"extra":1,"type":"custom"}"#, "custom" ; "other keys ignored")]
fn test_decode_typed_object(input: &str, expected: &str) {
    let format = decode_response_format_str(input).unwrap();
    assert_eq!(format, ResponseFormat::Type(expected.to_string()));
}

#[test_case(r#""bogus""# ; "unsupported bare string")]
#[test_case("{}" ; "empty object")]
#[test_case(r#"{"type":null}"# ; "null type")]
#[test_case(r#"{"type":{"name":"x"}}"# ; "object type")]
#[test_case("42" ; "number")]
#[test_case("null" ; "null")]
#[test_case(r#"["auto"]"# ; "array")]
fn test_decode_rejects(input: &str) {
    let err = decode_response_format_str(input).unwrap_err();
    match err {
        CodecError::InvalidFormat { message } => assert!(message.contains("response_format")),
        other => panic!("expected InvalidFormat, got {other:?}"),
    }
}

#[test]
fn test_embedded_in_request_body() {
    let body = json!({ "response_format": ResponseFormat::json_object() });
    assert_eq!(body.to_string(), r#"{"response_format":{"type":"json_object"}}"#);
}

proptest! {
    #[test]
    fn prop_named_type_serializes_name(name in ".*") {
        let value = encode_response_format(&ResponseFormat::Type(name.clone())).unwrap();
        prop_assert_eq!(value, json!({ "type": name }));
    }

    #[test]
    fn prop_named_type_round_trips(name in ".*") {
        let format = ResponseFormat::Type(name);
        let text = serde_json::to_string(&format).unwrap();
        prop_assert_eq!(decode_response_format_str(&text).unwrap(), format);
    }

    #[test]
    fn prop_bare_strings_other_than_auto_rejected(s in "[a-z_]{1,12}") {
        prop_assume!(s != "auto");
        let input = serde_json::to_string(&s).unwrap();
        let rejected = matches!(
            decode_response_format_str(&input),
            Err(CodecError::InvalidFormat { .. })
        );
        prop_assert!(rejected);
    }
}
