//! Request routing.
//!
//! A pure function from a validated [`Request`] to the serialized parse
//! record, so the boundary contract is testable without process spawning.
//! The stdin/stdout framing lives in `main.rs`.

use crate::request::{DispatchError, Request, RequestKind};

/// Runs one request against the matching parser and returns the record as a
/// JSON value ready for printing.
///
/// # Errors
///
/// Parse failures propagate unchanged as [`DispatchError::Parse`].
pub fn dispatch(request: &Request) -> Result<serde_json::Value, DispatchError> {
    tracing::debug!(function = request.kind.as_str(), "dispatching request");

    match request.kind {
        RequestKind::Specifier => {
            let requirement = pyreq_core::specifier::parse(&request.input)?;
            serde_json::to_value(&requirement)
                .map_err(|source| DispatchError::Serialize { source })
        }
        RequestKind::Pipfile => {
            let manifest = pyreq_pipfile::parse(&request.input)?;
            serde_json::to_value(&manifest).map_err(|source| DispatchError::Serialize { source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyreq_core::ParseError;

    fn request(kind: RequestKind, input: &str) -> Request {
        Request {
            kind,
            input: input.to_string(),
        }
    }

    #[test]
    fn test_dispatch_specifier() {
        let value = dispatch(&request(RequestKind::Specifier, "requests[security]>=2.25")).unwrap();
        assert_eq!(value["name"], "requests");
        assert_eq!(value["extras"][0], "security");
        assert_eq!(value["constraints"][0]["op"], ">=");
    }

    #[test]
    fn test_dispatch_pipfile() {
        let value = dispatch(&request(
            RequestKind::Pipfile,
            "[packages]\nrequests = \"*\"\n",
        ))
        .unwrap();
        assert_eq!(value["sections"][0]["name"], "packages");
        assert_eq!(value["sections"][0]["packages"][0]["name"], "requests");
    }

    #[test]
    fn test_dispatch_propagates_parse_errors() {
        let err = dispatch(&request(RequestKind::Specifier, "")).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Parse(ParseError::EmptyInput)
        ));
    }
}
