use crate::payload::Payload;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Read;

#[derive(Serialize)]
struct PostIn {
    #[serde(rename = "DummyField")]
    dummy_field: String,
}

#[test]
fn json() {
    let payload = Payload::json(&PostIn {
        dummy_field: String::from("a123456"),
    })
    .unwrap();

    assert_eq!(payload.content_type(), Some("application/json"));
    assert_eq!(payload.content_length(), Some(24));
    match payload {
        Payload::Json(bytes) => assert_eq!(bytes, br#"{"DummyField":"a123456"}"#.to_vec()),
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn json_encode_error() {
    let mut map = BTreeMap::new();
    map.insert(vec![1u8], "non-string keys are not valid JSON");

    let error = Payload::json(&map).unwrap_err();

    assert_eq!(error.status(), 0);
    assert!(error.to_string().starts_with("Could not encode the request body"));
}

#[test]
fn raw() {
    let payload = Payload::raw("plain body");

    assert_eq!(payload.content_type(), Some("text/plain"));
    assert_eq!(payload.content_length(), None);
    match payload {
        Payload::Raw(mut reader) => {
            let mut body = String::new();
            reader.read_to_string(&mut body).unwrap();
            assert_eq!(body, "plain body");
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn empty() {
    let payload = Payload::default();

    assert!(matches!(payload, Payload::Empty));
    assert_eq!(payload.content_type(), None);
    assert_eq!(payload.content_length(), None);
}
