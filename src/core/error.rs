use thiserror::Error;

/// Core error types for service calls
#[derive(Debug, Error)]
pub enum CallError {
    /// No network path is available; the call was never attempted
    #[error("Sorry, there is limited or no connectivity. Please try again later.")]
    NoNetwork,

    /// Parameter name/value arrays have different lengths
    #[error("Mismatched parameter names and values: {names} names, {values} values")]
    ParamMismatch { names: usize, values: usize },

    /// The endpoint string could not be parsed as a URL
    #[error("Invalid service url {url}: {detail}")]
    InvalidUrl { url: String, detail: String },

    /// Every transport attempt failed
    #[error("Failed {attempts} attempts, please retry later.")]
    MaxAttemptsReached { attempts: u32 },

    /// The transport succeeded but the response status was not 200
    #[error("Service Failed: {code}: {reason}: {url}")]
    HttpStatus {
        code: u16,
        reason: String,
        url: String,
    },

    /// The response parser rejected the body
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The parser produced no result for a successful response
    #[error("No result from service call.")]
    NoResult,

    /// Fallback for failure reports that carry no explicit code.
    /// Never produced by a task directly; `CallHandle::finished` maps a task
    /// that died without reporting an outcome to this kind.
    #[error("Service call failed without an error code.")]
    MissingErrorCode,
}

/// Parse-time errors, each surfaced as its own failure kind
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IllegalStateException: {0}")]
    IllegalState(String),

    #[error("IOException: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed response: {0}")]
    Format(String),
}

/// Error code corresponding to an unknown error with no code of its own.
pub const ERR_CODE_MISSING_ERR_CODE: u16 = 9;
/// Error code corresponding to no network connection.
pub const ERR_CODE_NO_NETWORK: u16 = 10;
/// Error code corresponding to the maximum number of call attempts being reached.
pub const ERR_CODE_MAX_ATTEMPTS_REACHED: u16 = 11;
/// Error code corresponding to an illegal parser state.
pub const ERR_CODE_PARSE_ILLEGAL_STATE: u16 = 12;
/// Error code corresponding to an I/O failure while parsing the response.
pub const ERR_CODE_PARSE_IO: u16 = 13;
/// Error code corresponding to a malformed response body.
pub const ERR_CODE_PARSE_FORMAT: u16 = 14;
/// Error code corresponding to a `null` parser result.
pub const ERR_CODE_NO_RESULTS: u16 = 15;
/// Error code corresponding to mismatched parameter name/value arrays.
pub const ERR_CODE_PARAM_MISMATCH: u16 = 16;
/// Error code corresponding to an unparseable endpoint URL.
pub const ERR_CODE_INVALID_URL: u16 = 17;

impl CallError {
    /// Machine-readable code for programmatic branching.
    ///
    /// HTTP failures report the status code itself; every other kind maps to
    /// one of the `ERR_CODE_*` constants.
    pub fn code(&self) -> u16 {
        match self {
            CallError::NoNetwork => ERR_CODE_NO_NETWORK,
            CallError::ParamMismatch { .. } => ERR_CODE_PARAM_MISMATCH,
            CallError::InvalidUrl { .. } => ERR_CODE_INVALID_URL,
            CallError::MaxAttemptsReached { .. } => ERR_CODE_MAX_ATTEMPTS_REACHED,
            CallError::HttpStatus { code, .. } => *code,
            CallError::Parse(ParseError::IllegalState(_)) => ERR_CODE_PARSE_ILLEGAL_STATE,
            CallError::Parse(ParseError::Io(_)) => ERR_CODE_PARSE_IO,
            CallError::Parse(ParseError::Format(_)) => ERR_CODE_PARSE_FORMAT,
            CallError::NoResult => ERR_CODE_NO_RESULTS,
            CallError::MissingErrorCode => ERR_CODE_MISSING_ERR_CODE,
        }
    }
}

pub type Result<T> = std::result::Result<T, CallError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(CallError::NoNetwork.code(), 10);
        assert_eq!(CallError::MaxAttemptsReached { attempts: 3 }.code(), 11);
        assert_eq!(
            CallError::Parse(ParseError::IllegalState("entity consumed".into())).code(),
            12
        );
        assert_eq!(
            CallError::Parse(ParseError::Io(std::io::Error::other("reset"))).code(),
            13
        );
        assert_eq!(
            CallError::Parse(ParseError::Format("not json".into())).code(),
            14
        );
        assert_eq!(CallError::NoResult.code(), 15);
        assert_eq!(CallError::MissingErrorCode.code(), 9);
    }

    #[test]
    fn test_http_status_reports_its_own_code() {
        let err = CallError::HttpStatus {
            code: 503,
            reason: "Service Unavailable".into(),
            url: "http://example.com/api".into(),
        };
        assert_eq!(err.code(), 503);
        let msg = err.to_string();
        assert!(msg.contains("503"));
        assert!(msg.contains("Service Unavailable"));
        assert!(msg.contains("http://example.com/api"));
    }

    #[test]
    fn test_param_mismatch_message_names_both_lengths() {
        let err = CallError::ParamMismatch {
            names: 3,
            values: 2,
        };
        assert_eq!(err.code(), 16);
        assert!(err.to_string().contains("3 names"));
        assert!(err.to_string().contains("2 values"));
    }
}
