//! Service-call descriptors
//!
//! A [`Service`] describes one HTTP call declaratively: endpoint, method,
//! and two ordered sets of query parameters. Per-call *user* parameters are
//! whatever the call site supplies; *constant* parameters ride along on
//! every call built from the same descriptor (an API key, a format flag).
//!
//! On a name collision the user parameter wins and the constant pair is
//! suppressed. Collisions are resolved first-wins, never by duplication.

use crate::core::error::CallError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP method for a service call.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Declarative description of one HTTP call.
///
/// Serializable so hosts can keep descriptors in their own configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    url: String,
    method: Method,
    params: Vec<(String, String)>,
    constant_params: Vec<(String, String)>,
}

impl Service {
    /// Creates a descriptor for `url` with no parameters.
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            url: url.into(),
            method,
            params: Vec::new(),
            constant_params: Vec::new(),
        }
    }

    /// Creates a descriptor from parallel name/value slices.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::ParamMismatch`] if the slices differ in length.
    /// This is a caller-configuration bug and fails fast here rather than
    /// surfacing mid-call.
    pub fn from_arrays(
        url: impl Into<String>,
        method: Method,
        names: &[&str],
        values: &[&str],
    ) -> Result<Self, CallError> {
        if names.len() != values.len() {
            return Err(CallError::ParamMismatch {
                names: names.len(),
                values: values.len(),
            });
        }
        let mut service = Self::new(url, method);
        for (name, value) in names.iter().zip(values) {
            service.params.push(((*name).to_string(), (*value).to_string()));
        }
        Ok(service)
    }

    /// Appends one user parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Appends one constant parameter. Suppressed at build time if a user
    /// parameter (or an earlier constant) already uses the name.
    #[must_use]
    pub fn constant_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.constant_params.push((name.into(), value.into()));
        self
    }

    /// The endpoint as given.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// User parameters followed by non-colliding constant parameters.
    pub fn merged_params(&self) -> Vec<(&str, &str)> {
        let mut merged: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        for (name, value) in &self.constant_params {
            if merged.iter().any(|(existing, _)| existing == name) {
                tracing::debug!(name = %name, "constant parameter suppressed by existing parameter");
                continue;
            }
            merged.push((name, value));
        }
        merged
    }

    /// Builds the request URL with all parameters percent-encoded as query
    /// pairs. Every method uses query-string parameters; none of the calls
    /// described here carry a body.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::InvalidUrl`] if the endpoint does not parse.
    pub fn request_url(&self) -> Result<Url, CallError> {
        let mut url = Url::parse(&self.url).map_err(|err| CallError::InvalidUrl {
            url: self.url.clone(),
            detail: err.to_string(),
        })?;
        let merged = self.merged_params();
        if !merged.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in merged {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_method_display_matches_wire_names() {
        let names: Vec<String> = Method::iter().map(|m| m.to_string()).collect();
        assert_eq!(names, ["GET", "POST", "PUT", "DELETE"]);
        assert_eq!("PUT".parse::<Method>().unwrap(), Method::Put);
    }

    #[test]
    fn test_from_arrays_rejects_mismatched_lengths() {
        let err = Service::from_arrays(
            "http://example.com/svc",
            Method::Get,
            &["a", "b"],
            &["1"],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CallError::ParamMismatch { names: 2, values: 1 }
        ));
    }

    #[test]
    fn test_user_params_win_over_constants() {
        let service = Service::new("http://example.com/svc", Method::Get)
            .param("format", "json")
            .constant_param("format", "xml")
            .constant_param("key", "abc");
        let merged = service.merged_params();
        assert_eq!(merged, [("format", "json"), ("key", "abc")]);
    }

    #[test]
    fn test_duplicate_constants_collapse_first_wins() {
        let service = Service::new("http://example.com/svc", Method::Get)
            .constant_param("key", "first")
            .constant_param("key", "second");
        assert_eq!(service.merged_params(), [("key", "first")]);
    }

    #[test]
    fn test_request_url_percent_encodes_pairs() {
        let service = Service::new("http://example.com/svc", Method::Get)
            .param("q", "a b&c")
            .constant_param("key", "abc123");
        let url = service.request_url().unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("key=abc123"));
        assert!(!query.contains("a b&c"));
        assert_eq!(
            url.query_pairs()
                .find(|(name, _)| name == "q")
                .map(|(_, value)| value.into_owned()),
            Some("a b&c".to_string())
        );
    }

    #[test]
    fn test_request_url_appends_to_existing_query() {
        let service =
            Service::new("http://example.com/svc?fixed=1", Method::Get).param("page", "2");
        let url = service.request_url().unwrap();
        assert_eq!(url.query(), Some("fixed=1&page=2"));
    }

    #[test]
    fn test_request_url_without_params_is_untouched() {
        let service = Service::new("http://example.com/svc", Method::Post);
        let url = service.request_url().unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_invalid_url_fails_fast() {
        let service = Service::new("not a url", Method::Get);
        let err = service.request_url().unwrap_err();
        assert!(matches!(err, CallError::InvalidUrl { .. }));
        assert_eq!(err.code(), crate::core::error::ERR_CODE_INVALID_URL);
    }
}
