//! Request envelope decoding and validation.
//!
//! The wire format is one JSON object read in full from stdin:
//! `{ "function": "parse" | "parse_pipfile", "args": ["<input>"] }`.
//! Function names map onto an enumerated [`RequestKind`] through a static
//! table, so an unrecognized name is a typed [`DispatchError::UnknownFunction`]
//! rather than a silent no-op.

use pyreq_core::ParseError;
use serde::Deserialize;
use thiserror::Error;

/// Raw wire envelope, exactly as received.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub function: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// The operations this dispatcher provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `"parse"`: one dependency-specifier line.
    Specifier,
    /// `"parse_pipfile"`: a full Pipfile document.
    Pipfile,
}

impl RequestKind {
    /// Static mapping from wire function names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "parse" => Some(Self::Specifier),
            "parse_pipfile" => Some(Self::Pipfile),
            _ => None,
        }
    }

    /// The wire function name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Specifier => "parse",
            Self::Pipfile => "parse_pipfile",
        }
    }
}

/// A validated request: the operation plus its single string argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub kind: RequestKind,
    pub input: String,
}

impl Request {
    /// Decodes and validates one JSON envelope.
    ///
    /// # Errors
    ///
    /// `InvalidEnvelope` for malformed JSON, `UnknownFunction` for an
    /// unrecognized function name, `MissingArgument` when `args` is empty.
    pub fn from_json(raw: &str) -> Result<Self, DispatchError> {
        let envelope: Envelope = serde_json::from_str(raw)
            .map_err(|source| DispatchError::InvalidEnvelope { source })?;
        let kind = RequestKind::from_name(&envelope.function).ok_or_else(|| {
            DispatchError::UnknownFunction {
                name: envelope.function.clone(),
            }
        })?;
        let input = envelope
            .args
            .into_iter()
            .next()
            .ok_or(DispatchError::MissingArgument {
                function: kind.as_str(),
            })?;
        Ok(Self { kind, input })
    }
}

/// Dispatcher-boundary failures. Parse failures pass through unchanged; the
/// binary logs whichever variant occurs and exits non-zero.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The request envelope was not valid JSON of the expected shape.
    #[error("malformed request envelope: {source}")]
    InvalidEnvelope {
        #[source]
        source: serde_json::Error,
    },

    /// The envelope named a function this dispatcher does not provide.
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// The named function requires one string argument.
    #[error("function '{function}' expects one string argument")]
    MissingArgument { function: &'static str },

    /// The argument failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The parsed record could not be serialized for printing.
    #[error("failed to serialize response: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_kind_from_name() {
        assert_eq!(RequestKind::from_name("parse"), Some(RequestKind::Specifier));
        assert_eq!(
            RequestKind::from_name("parse_pipfile"),
            Some(RequestKind::Pipfile)
        );
        assert_eq!(RequestKind::from_name("resolve"), None);
    }

    #[test]
    fn test_from_json_valid_request() {
        let request =
            Request::from_json(r#"{"function": "parse", "args": ["requests>=2.25"]}"#).unwrap();
        assert_eq!(request.kind, RequestKind::Specifier);
        assert_eq!(request.input, "requests>=2.25");
    }

    #[test]
    fn test_from_json_extra_args_ignored() {
        let request =
            Request::from_json(r#"{"function": "parse", "args": ["requests", "ignored"]}"#)
                .unwrap();
        assert_eq!(request.input, "requests");
    }

    #[test]
    fn test_from_json_unknown_function() {
        let err = Request::from_json(r#"{"function": "resolve", "args": ["requests"]}"#)
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownFunction { name } if name == "resolve"));
    }

    #[test]
    fn test_from_json_missing_args() {
        let err = Request::from_json(r#"{"function": "parse"}"#).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::MissingArgument { function: "parse" }
        ));
    }

    #[test]
    fn test_from_json_malformed_envelope() {
        let err = Request::from_json("not json").unwrap_err();
        assert!(matches!(err, DispatchError::InvalidEnvelope { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = DispatchError::UnknownFunction {
            name: "resolve".into(),
        };
        assert_eq!(err.to_string(), "unknown function 'resolve'");

        let err = DispatchError::MissingArgument { function: "parse" };
        assert_eq!(
            err.to_string(),
            "function 'parse' expects one string argument"
        );
    }
}
