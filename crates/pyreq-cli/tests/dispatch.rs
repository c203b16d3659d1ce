//! End-to-end tests for the request boundary: JSON envelope in, serialized
//! record out, typed errors for everything else.

use pyreq_cli::{DispatchError, Request, dispatch};
use pyreq_core::ParseError;

fn run(raw: &str) -> Result<serde_json::Value, DispatchError> {
    let request = Request::from_json(raw)?;
    dispatch(&request)
}

#[test]
fn test_parse_function_returns_requirement_record() {
    let value = run(r#"{"function": "parse", "args": ["requests[security]>=2.25,<3.0"]}"#).unwrap();

    assert_eq!(value["name"], "requests");
    assert_eq!(value["extras"], serde_json::json!(["security"]));
    assert_eq!(
        value["constraints"],
        serde_json::json!([
            { "op": ">=", "version": "2.25" },
            { "op": "<", "version": "3.0" },
        ])
    );
    assert_eq!(value["marker"], serde_json::Value::Null);
    assert_eq!(value["source"], serde_json::Value::Null);
}

#[test]
fn test_parse_function_vcs_reference() {
    let value =
        run(r#"{"function": "parse", "args": ["flask @ git+https://example.com/flask.git@v1.0"]}"#)
            .unwrap();

    assert_eq!(value["name"], "flask");
    assert_eq!(value["constraints"], serde_json::json!([]));
    assert_eq!(value["source"]["kind"], "vcs");
    assert_eq!(value["source"]["scheme"], "git");
    assert_eq!(value["source"]["location"], "https://example.com/flask.git");
    assert_eq!(value["source"]["reference"], "v1.0");
}

#[test]
fn test_parse_pipfile_function_returns_manifest_record() {
    let pipfile = r#"[[source]]
name = "pypi"
url = "https://pypi.org/simple"
verify_ssl = true

[packages]
requests = { version = ">=2.25", extras = ["security"] }
flask = "*"

[dev-packages]
pytest = ">=7.0"
"#;
    let envelope = serde_json::json!({ "function": "parse_pipfile", "args": [pipfile] });
    let value = run(&envelope.to_string()).unwrap();

    assert_eq!(value["sections"][0]["name"], "packages");
    assert_eq!(value["sections"][1]["name"], "dev-packages");
    assert_eq!(value["sections"][0]["packages"][1]["name"], "flask");
    assert_eq!(
        value["sections"][0]["packages"][1]["constraints"],
        serde_json::json!([])
    );
    assert_eq!(value["metadata"][0]["name"], "source");
}

#[test]
fn test_unknown_function_is_an_error() {
    let err = run(r#"{"function": "install", "args": ["requests"]}"#).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownFunction { name } if name == "install"));
}

#[test]
fn test_missing_argument_is_an_error() {
    let err = run(r#"{"function": "parse_pipfile", "args": []}"#).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::MissingArgument {
            function: "parse_pipfile"
        }
    ));
}

#[test]
fn test_malformed_envelope_is_an_error() {
    let err = run(r#"{"function": 42}"#).unwrap_err();
    assert!(matches!(err, DispatchError::InvalidEnvelope { .. }));
}

#[test]
fn test_specifier_parse_failure_propagates_kind() {
    let err = run(r#"{"function": "parse", "args": [""]}"#).unwrap_err();
    assert!(matches!(err, DispatchError::Parse(ParseError::EmptyInput)));

    let err = run(r#"{"function": "parse", "args": ["flask==1.0 @ git+https://example.com/flask.git"]}"#)
        .unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Parse(ParseError::ConflictingSource { .. })
    ));
}

#[test]
fn test_pipfile_parse_failure_propagates_kind() {
    let envelope = serde_json::json!({
        "function": "parse_pipfile",
        "args": ["[packages]\nFlask = \"*\"\nflask = \"*\"\n"],
    });
    let err = run(&envelope.to_string()).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::Parse(ParseError::DuplicateEntry { .. })
    ));
}

#[test]
fn test_response_is_printable_as_single_line() {
    let value = run(r#"{"function": "parse", "args": ["requests"]}"#).unwrap();
    let printed = value.to_string();
    assert!(!printed.contains('\n'));
    assert!(printed.starts_with('{'));
}
