//! HTTP implementation of [`Backend`]

use super::request::{CompareRequest, OptimizeRequest, SourceFile};
use super::response::{CompareResponse, HealthStatus, OptimizeResponse};
use super::Backend;
use crate::error::IrisError;
use reqwest::blocking::{multipart, Client, Response};
use serde_json::Value;
use std::time::Duration;

/// Talks to the backend over HTTP with a blocking client
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpBackend {
    const HEALTH: &'static str = "/api/health";
    const OPTIMIZE: &'static str = "/api/optimize";
    const COMPARE: &'static str = "/api/compare";

    /// Create a client for `base_url` (e.g. `http://localhost:5001`)
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, IrisError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IrisError::InvalidConfig {
                detail: format!("cannot build HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> IrisError {
        let reason = if error.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs())
        } else if error.is_connect() {
            "connection refused or host unreachable".to_string()
        } else {
            error.to_string()
        };
        IrisError::BackendUnavailable {
            url: url.to_string(),
            reason,
        }
    }

    fn source_part(source: &SourceFile) -> multipart::Part {
        multipart::Part::text(source.contents().to_string())
            .file_name(source.file_name().to_string())
    }

    /// Send a request and decode its JSON body.
    ///
    /// Non-JSON error pages (proxies, crashed workers) mean the service is not
    /// really there, so they count as unavailable. A non-JSON success is a
    /// protocol problem.
    fn send(
        &self,
        endpoint: &str,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<Value, IrisError> {
        let url = self.url(endpoint);
        log::debug!("Sending request to {}", url);

        let response: Response = request.send().map_err(|e| self.transport_error(&url, e))?;
        let status = response.status();
        let text = response.text().map_err(|e| self.transport_error(&url, e))?;
        log::debug!("{} answered {} ({} bytes)", url, status, text.len());

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                return Err(IrisError::MalformedResponse {
                    endpoint: endpoint.to_string(),
                    detail: format!("response is not JSON: {}", e),
                });
            }
            Err(_) => {
                return Err(IrisError::BackendUnavailable {
                    url,
                    reason: format!("HTTP {}", status),
                });
            }
        };

        if !status.is_success() && body.get("success").and_then(Value::as_bool) != Some(false) {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(IrisError::BackendRejected {
                endpoint: endpoint.to_string(),
                message,
            });
        }

        Ok(body)
    }
}

impl Backend for HttpBackend {
    fn health(&self) -> HealthStatus {
        let request = self.client.get(self.url(Self::HEALTH));
        match self.send(Self::HEALTH, request) {
            Ok(body) => HealthStatus::from_json(body),
            Err(e) => HealthStatus::unavailable(e.to_string()),
        }
    }

    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, IrisError> {
        let form = multipart::Form::new()
            .part("source_file", Self::source_part(&request.source))
            .text("model_selection", request.model.as_str());

        let builder = self.client.post(self.url(Self::OPTIMIZE)).multipart(form);
        let body = self.send(Self::OPTIMIZE, builder)?;
        OptimizeResponse::from_json(body)
    }

    fn compare(&self, request: &CompareRequest) -> Result<CompareResponse, IrisError> {
        let form = multipart::Form::new()
            .part("source_file", Self::source_part(&request.source))
            .text("ir_passes", request.ir_passes_json())
            .text("opt_levels", request.opt_levels_json())
            .text("num_runs", request.num_runs.to_string());

        let builder = self.client.post(self.url(Self::COMPARE)).multipart(form);
        let body = self.send(Self::COMPARE, builder)?;
        CompareResponse::from_json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ModelKind;
    use crate::passes::{OptLevel, PassList};
    use serde_json::json;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    /// Mock server on its own runtime; the blocking client is driven from the
    /// test thread, outside any async context.
    struct Server {
        server: MockServer,
        rt: Runtime,
    }

    impl Server {
        fn start() -> Self {
            let rt = Runtime::new().unwrap();
            let server = rt.block_on(MockServer::start());
            Self { server, rt }
        }

        fn respond(&self, verb: &str, endpoint: &str, template: ResponseTemplate) {
            self.rt.block_on(
                Mock::given(method(verb))
                    .and(path(endpoint))
                    .respond_with(template)
                    .mount(&self.server),
            );
        }

        fn backend(&self) -> HttpBackend {
            HttpBackend::new(&self.server.uri(), Duration::from_secs(5)).unwrap()
        }

        fn received(&self) -> Vec<Request> {
            self.rt
                .block_on(self.server.received_requests())
                .unwrap_or_default()
        }
    }

    fn optimize_request() -> OptimizeRequest {
        OptimizeRequest {
            source: SourceFile::from_parts("fib.c", "int fib(int n) { return n < 2 ? n : 0; }")
                .unwrap(),
            model: ModelKind::Xgboost,
        }
    }

    fn compare_request() -> CompareRequest {
        CompareRequest {
            source: SourceFile::from_parts("fib.c", "int fib(int n) { return n < 2 ? n : 0; }")
                .unwrap(),
            passes: PassList::from_names(["mem2reg", "gvn"]),
            opt_levels: vec![OptLevel::O2, OptLevel::O3],
            num_runs: 4,
        }
    }

    fn form_field<'a>(body: &'a str, name: &str) -> Option<&'a str> {
        let marker = format!("name=\"{}\"", name);
        let start = body.find(&marker)?;
        let value_start = body[start..].find("\r\n\r\n")? + start + 4;
        let value_end = body[value_start..].find("\r\n")? + value_start;
        Some(&body[value_start..value_end])
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:5001/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5001");
        assert_eq!(backend.url("/api/health"), "http://localhost:5001/api/health");
    }

    #[test]
    fn test_unreachable_backend_reports_unavailable() {
        // Port 9 (discard) is closed on any sane test machine
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let status = backend.health();
        assert!(!status.available);
        assert!(status.detail.contains("127.0.0.1:9"));
    }

    #[test]
    fn test_unreachable_optimize_is_retryable() {
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = backend.optimize(&optimize_request()).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn test_health_enveloped() {
        let server = Server::start();
        server.respond(
            "GET",
            "/api/health",
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"status": "healthy", "service": "IRis", "version": "1.0.0"}
            })),
        );

        let status = server.backend().health();
        assert!(status.available);
        assert_eq!(status.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_non_json_error_page_is_unavailable() {
        let server = Server::start();
        server.respond(
            "POST",
            "/api/optimize",
            ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"),
        );

        let err = server.backend().optimize(&optimize_request()).unwrap_err();
        match &err {
            IrisError::BackendUnavailable { reason, .. } => assert!(reason.contains("502")),
            other => panic!("expected BackendUnavailable, got {other:?}"),
        }
        assert_eq!(err.exit_code(), 69);
    }

    #[test]
    fn test_non_json_success_is_malformed() {
        let server = Server::start();
        server.respond(
            "POST",
            "/api/optimize",
            ResponseTemplate::new(200).set_body_string("predicted: mem2reg"),
        );

        let err = server.backend().optimize(&optimize_request()).unwrap_err();
        assert!(matches!(err, IrisError::MalformedResponse { .. }));
        assert_eq!(err.exit_code(), 76);
    }

    #[test]
    fn test_json_error_status_without_success_flag_is_rejected() {
        let server = Server::start();
        server.respond(
            "POST",
            "/api/compare",
            ResponseTemplate::new(500).set_body_json(json!({"error": "Internal server error"})),
        );

        let err = server.backend().compare(&compare_request()).unwrap_err();
        match err {
            IrisError::BackendRejected { endpoint, message } => {
                assert_eq!(endpoint, "/api/compare");
                assert_eq!(message, "Internal server error");
            }
            other => panic!("expected BackendRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_json_error_status_without_message_names_status() {
        let server = Server::start();
        server.respond(
            "POST",
            "/api/compare",
            ResponseTemplate::new(503).set_body_json(json!({"detail": "overloaded"})),
        );

        let err = server.backend().compare(&compare_request()).unwrap_err();
        match err {
            IrisError::BackendRejected { message, .. } => assert!(message.contains("503")),
            other => panic!("expected BackendRejected, got {other:?}"),
        }
    }

    #[test]
    fn test_success_false_message_is_verbatim() {
        for status in [200, 400] {
            let server = Server::start();
            server.respond(
                "POST",
                "/api/optimize",
                ResponseTemplate::new(status).set_body_json(json!({
                    "success": false,
                    "error": "Invalid file type. Allowed: .c, .cpp"
                })),
            );

            let err = server.backend().optimize(&optimize_request()).unwrap_err();
            match err {
                IrisError::BackendRejected { message, .. } => {
                    assert_eq!(message, "Invalid file type. Allowed: .c, .cpp", "HTTP {status}")
                }
                other => panic!("HTTP {status}: expected BackendRejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_optimize_sends_expected_form() {
        let server = Server::start();
        server.respond(
            "POST",
            "/api/optimize",
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {"predicted_passes": ["mem2reg"], "model_used": "xgboost"}
            })),
        );

        let response = server.backend().optimize(&optimize_request()).unwrap();
        assert_eq!(response.predicted_passes.names(), vec!["mem2reg"]);

        let requests = server.received();
        assert_eq!(requests.len(), 1);
        let body = String::from_utf8_lossy(&requests[0].body).to_string();
        assert!(body.contains("name=\"source_file\"; filename=\"fib.c\""));
        assert!(body.contains("int fib(int n)"));
        assert_eq!(form_field(&body, "model_selection"), Some("xgboost"));
    }

    #[test]
    fn test_compare_sends_expected_form() {
        let server = Server::start();
        server.respond(
            "POST",
            "/api/compare",
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "ml_predicted": {"success": true, "binary_size": 9000, "runtime_mean": 0.02},
                    "llvm_o2": {"success": true, "binary_size": 9500, "runtime_mean": 0.03}
                }
            })),
        );

        let response = server.backend().compare(&compare_request()).unwrap();
        assert_eq!(response.baselines.len(), 1);

        let requests = server.received();
        assert_eq!(requests.len(), 1);
        let body = String::from_utf8_lossy(&requests[0].body).to_string();
        assert!(body.contains("name=\"source_file\"; filename=\"fib.c\""));
        assert_eq!(form_field(&body, "ir_passes"), Some(r#"["mem2reg","gvn"]"#));
        assert_eq!(form_field(&body, "opt_levels"), Some(r#"["O2","O3"]"#));
        assert_eq!(form_field(&body, "num_runs"), Some("4"));
    }
}
