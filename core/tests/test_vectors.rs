//! Verify resolution, request building and response parsing against the JSON
//! test vectors stored in `test-vectors/`.
//!
//! Each vector names its case so a failing assertion points straight at the
//! offending entry.

use httpclient_core::{ClientError, Command, HttpClient, HttpMethod, Target};

/// Check that `err` is the variant named in a vector's `expected_error`.
fn assert_error_kind(name: &str, err: &ClientError, expected: &str) {
    let matched = match expected {
        "InvalidPort" => matches!(err, ClientError::InvalidPort(_)),
        "InvalidStatusCode" => matches!(err, ClientError::InvalidStatusCode(_)),
        "UnknownCharset" => matches!(err, ClientError::UnknownCharset(_)),
        "Decode" => matches!(err, ClientError::Decode { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

/// Decode a lowercase hex string such as `"a4ff"` into bytes.
fn hex_bytes(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Resolve
// ---------------------------------------------------------------------------

#[test]
fn resolve_test_vectors() {
    let raw = include_str!("../../test-vectors/resolve.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = Target::parse(case["url"].as_str().unwrap());

        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
            continue;
        }

        let target = result.unwrap();
        let expected = &case["expected"];
        assert_eq!(target.host, expected["host"].as_str().unwrap(), "{name}: host");
        assert_eq!(u64::from(target.port), expected["port"].as_u64().unwrap(), "{name}: port");
        assert_eq!(target.path, expected["path"].as_str().unwrap(), "{name}: path");
        assert_eq!(target.authority, expected["authority"].as_str().unwrap(), "{name}: authority");
        assert_eq!(target.version, expected["version"].as_str().unwrap(), "{name}: version");
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/request.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = HttpClient::new();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let command = Command::new(
            case["method"].as_str().unwrap(),
            case["url"].as_str().unwrap(),
            case.get("args").and_then(|a| a.as_str()),
        );

        let request = match command.method {
            HttpMethod::Get => client.build_get(&command.url),
            HttpMethod::Post => client.build_post(&command.url, &command.args.into_body()),
        }
        .unwrap();

        assert_eq!(
            request.to_wire(),
            case["expected_wire"].as_str().unwrap(),
            "{name}: wire format"
        );
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/response.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = HttpClient::new();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut raw_bytes = case["raw"].as_str().unwrap().as_bytes().to_vec();
        if let Some(body_hex) = case.get("body_hex") {
            raw_bytes.extend(hex_bytes(body_hex.as_str().unwrap()));
        }
        let result = client.parse_response(&raw_bytes);

        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, &result.unwrap_err(), expected_error.as_str().unwrap());
            continue;
        }

        let response = result.unwrap();
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            case["expected"],
            "{name}: parsed response"
        );
    }
}
