pub mod payload;

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::survey::ProfileSubmission;
use crate::typing::TypingResult;
pub use payload::ApiResponse;
use payload::{typing_payload, ProfilePayload};

pub const TYPING_ENDPOINT: &str = "/app/api/save-typing-test/";
pub const PROFILE_ENDPOINT: &str = "/app/api/save-behavioral-test/";
pub const CSRF_HEADER: &str = "X-CSRFToken";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}: {message}")]
    Status { status: u16, message: String },
    #[error("server did not save the results: {message}")]
    Rejected { message: String },
    #[error("unreadable server response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Text for the candidate; transport details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected { message } => {
                format!("Erro ao salvar resultados: {message}")
            }
            ApiError::Http(_) | ApiError::Decode(_) => {
                "Erro ao salvar resultados. Tente novamente.".to_string()
            }
        }
    }
}

pub type SubmitResult = Result<ApiResponse, ApiError>;

/// Destination for finished tests.
pub trait ResultSubmitter: Send + 'static {
    fn submit_typing(&self, results: &[TypingResult]) -> SubmitResult;
    fn submit_profile(&self, submission: &ProfileSubmission) -> SubmitResult;
}

/// Posts results to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    base_url: String,
    csrf_token: String,
    session_id: Option<String>,
}

impl HttpSubmitter {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let csrf_token = config.csrf_token.clone().unwrap_or_default();
        if csrf_token.is_empty() {
            warn!("csrf token not configured; requests will carry an empty token");
        }

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            csrf_token,
            session_id: config.session_id.clone(),
        })
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cookies a logged-in browser would send; `None` without a session.
    pub fn cookie_header(&self) -> Option<String> {
        let session_id = self.session_id.as_deref()?;
        let mut cookie = format!("sessionid={session_id}");
        if !self.csrf_token.is_empty() {
            cookie.push_str(&format!("; csrftoken={}", self.csrf_token));
        }
        Some(cookie)
    }

    fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> SubmitResult {
        let url = self.endpoint_url(path);
        if self.csrf_token.is_empty() {
            warn!(%url, "posting without csrf token");
        }

        let mut request = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(CSRF_HEADER, &self.csrf_token)
            .json(body);
        if let Some(cookie) = self.cookie_header() {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().inspect_err(|err| {
            error!(%url, %err, "request failed");
        })?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse>(&text)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            error!(%url, status = status.as_u16(), %message, "server returned an error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ApiResponse = serde_json::from_str(&text)?;
        if !parsed.is_success() {
            let message = parsed.message.unwrap_or_default();
            error!(%url, %message, "server rejected results");
            return Err(ApiError::Rejected { message });
        }

        info!(%url, message = parsed.message.as_deref().unwrap_or(""), "results saved");
        Ok(parsed)
    }
}

impl ResultSubmitter for HttpSubmitter {
    fn submit_typing(&self, results: &[TypingResult]) -> SubmitResult {
        info!(phases = results.len(), "submitting typing test");
        self.post_json(TYPING_ENDPOINT, &typing_payload(results))
    }

    fn submit_profile(&self, submission: &ProfileSubmission) -> SubmitResult {
        info!(answers = submission.answers.len(), "submitting behavioral profile");
        self.post_json(PROFILE_ENDPOINT, &ProfilePayload::from(submission))
    }
}
