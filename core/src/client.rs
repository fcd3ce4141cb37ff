//! HTTP client for the statistics backend.
//!
//! Transport goes through `reqwest` (the browser `fetch` backend on wasm).
//! Everything after the bytes arrive is the pure [`interpret_response`], so
//! status and error handling is testable without a server.

use std::borrow::Cow;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use dino_types::{
    BackendConfig, ChatPayload, ChatReply, StatisticsPayload, StatisticsResult, SurvivalPayload,
    SurvivalResult,
};

use crate::error::{ApiError, status_message};

// ─────────────────────────────────────────────────────────────────────────────
// CSRF
// ─────────────────────────────────────────────────────────────────────────────

/// Supplies the CSRF token attached to every POST.
///
/// Read on each request since the server may rotate the cookie.
pub trait CsrfSource {
    fn csrf_token(&self) -> Option<String>;
}

/// A fixed token, or none.
impl CsrfSource for Option<String> {
    fn csrf_token(&self) -> Option<String> {
        self.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response interpretation
// ─────────────────────────────────────────────────────────────────────────────

/// Replace bare `NaN`, `Infinity` and `-Infinity` tokens with `null`.
///
/// The backend serializes failed fits with Python's non-standard JSON
/// literals, which `serde_json` rejects. String contents are left alone.
pub fn sanitize_non_finite(body: &str) -> Cow<'_, str> {
    if !body.contains("NaN") && !body.contains("Infinity") {
        return Cow::Borrowed(body);
    }
    let mut out = String::with_capacity(body.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = body;
    while let Some(c) = rest.chars().next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            rest = &rest[c.len_utf8()..];
            continue;
        }
        let token = ["-Infinity", "Infinity", "NaN"]
            .into_iter()
            .find(|t| rest.starts_with(t));
        match token {
            Some(t) => {
                out.push_str("null");
                rest = &rest[t.len()..];
            }
            None => {
                if c == '"' {
                    in_string = true;
                }
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    Cow::Owned(out)
}

/// `error` as a string, or `error.message` when it is an object.
fn error_field(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Turn a raw HTTP status and body into the backend's JSON payload.
///
/// - Non-2xx: the body's `error` field, else the status table.
/// - 2xx with an `error` or `warning` field: a server-reported error.
/// - 2xx that is not JSON: a decode error.
pub fn interpret_response(status: u16, body: &str) -> Result<Value, ApiError> {
    let parsed = serde_json::from_str::<Value>(&sanitize_non_finite(body));

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .as_ref()
            .and_then(error_field)
            .unwrap_or_else(|| status_message(status).to_string());
        return Err(ApiError::Status { status, message });
    }

    let value = parsed.map_err(|e| ApiError::Decode(e.to_string()))?;
    if let Some(message) = error_field(&value) {
        return Err(ApiError::Server(message));
    }
    if let Some(warning) = value.get("warning").and_then(Value::as_str) {
        return Err(ApiError::Server(warning.to_string()));
    }
    Ok(value)
}

/// Deserialize an interpreted payload into its typed result.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    base_url: String,
    config: BackendConfig,
    csrf: Rc<dyn CsrfSource>,
}

impl StatsClient {
    /// `base_url` must be absolute (scheme and host); endpoint paths come from `config`.
    pub fn new(base_url: impl Into<String>, config: BackendConfig, csrf: Rc<dyn CsrfSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
            csrf,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let url = self.endpoint(path);
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = self.csrf.csrf_token() {
            request = request.header(self.config.csrf_header.as_str(), token);
        }

        tracing::debug!(%url, "POST");
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let result = interpret_response(status, &text);
        if let Err(err) = &result {
            tracing::error!(%url, status, error = %err, "backend request failed");
        }
        result
    }

    pub async fn statistics(
        &self,
        payload: &StatisticsPayload,
    ) -> Result<StatisticsResult, ApiError> {
        decode(self.post(&self.config.statistics_path, payload).await?)
    }

    pub async fn survival(&self, payload: &SurvivalPayload) -> Result<SurvivalResult, ApiError> {
        decode(self.post(&self.config.survival_path, payload).await?)
    }

    pub async fn chat(&self, payload: &ChatPayload) -> Result<ChatReply, ApiError> {
        decode(self.post(&self.config.chat_path, payload).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_literals_outside_strings() {
        let body = r#"{"aic":NaN,"bic":-Infinity,"p":Infinity,"note":"NaN stays"}"#;
        assert_eq!(
            sanitize_non_finite(body),
            r#"{"aic":null,"bic":null,"p":null,"note":"NaN stays"}"#
        );
    }

    #[test]
    fn sanitize_respects_escaped_quotes() {
        let body = r#"{"a":"say \"NaN\"","b":NaN}"#;
        assert_eq!(sanitize_non_finite(body), r#"{"a":"say \"NaN\"","b":null}"#);
        assert!(matches!(sanitize_non_finite("{}"), Cow::Borrowed(_)));
    }

    #[test]
    fn non_2xx_prefers_error_field() {
        let err = interpret_response(400, r#"{"error":"Variable has no data"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: "Variable has no data".into()
            }
        );
    }

    #[test]
    fn non_2xx_falls_back_to_status_table() {
        let err = interpret_response(429, "<html>Too Many</html>").unwrap_err();
        assert_eq!(
            err.user_message(),
            "API request limit exceeded. Please wait before trying again."
        );
        let err = interpret_response(503, "").unwrap_err();
        assert_eq!(err.user_message(), "Request failed");
    }

    #[test]
    fn ok_with_error_or_warning_is_server_error() {
        let err = interpret_response(200, r#"{"error":{"message":"quota hit"}}"#).unwrap_err();
        assert_eq!(err, ApiError::Server("quota hit".into()));

        let err = interpret_response(200, r#"{"warning":"Not enough events"}"#).unwrap_err();
        assert_eq!(err, ApiError::Server("Not enough events".into()));
    }

    #[test]
    fn ok_non_json_is_decode_error() {
        let err = interpret_response(200, "<!doctype html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn ok_survival_with_nan_scores_decodes() {
        let value = interpret_response(
            200,
            r#"{"all_distributions_results":{"pareto":{"aic":NaN,"bic":NaN}},
                "predicted_distribution":"weibull"}"#,
        )
        .unwrap();
        let result: SurvivalResult = decode(value).unwrap();
        assert_eq!(result.all_distributions_results[0].1.aic, None);
        assert_eq!(result.predicted_distribution.as_deref(), Some("weibull"));
    }

    #[test]
    fn distribution_table_keeps_backend_order() {
        let value = interpret_response(
            200,
            r#"{"all_distributions_results":{
                "weibull":{"aic":5.0,"bic":5.0},
                "exponential":{"aic":5.0,"bic":5.0},
                "lognormal":{"aic":9.0,"bic":9.0}}}"#,
        )
        .unwrap();
        let result: SurvivalResult = decode(value).unwrap();
        let order: Vec<_> = result
            .all_distributions_results
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(order, ["weibull", "exponential", "lognormal"]);

        let cmp = crate::comparison::DistributionComparison::from_fits(
            &result.all_distributions_results,
        );
        assert_eq!(cmp.best_aic.unwrap().distribution, "weibull");
    }

    #[test]
    fn category_counts_keep_backend_order() {
        let value = interpret_response(
            200,
            r#"{"type":"Categorical","categoryCount":{"zebra":3,"apple":1,"mango":2}}"#,
        )
        .unwrap();
        let StatisticsResult::Categorical(stats) = decode::<StatisticsResult>(value).unwrap() else {
            panic!("expected categorical statistics");
        };
        let order: Vec<_> = stats.shares().into_iter().map(|s| s.category).collect();
        assert_eq!(order, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = StatsClient::new(
            "http://localhost:8000/",
            BackendConfig::default(),
            Rc::new(None::<String>),
        );
        assert_eq!(
            client.endpoint("/get-statistics/"),
            "http://localhost:8000/get-statistics/"
        );
        assert_eq!(client.endpoint("/"), "http://localhost:8000/");
    }
}
