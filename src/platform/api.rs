// InternDesk - platform/api.rs
//
// Portal API client: the only contract boundary to the backend.
//
// `PortalApi` is the seam the app layer talks to; `HttpPortalApi` is the
// real implementation over reqwest's blocking client. Calls are made from
// worker threads (see app/fetch.rs), never from the UI thread.
//
// Every response is a JSON envelope `{ success, data?, message? }`. A call
// either yields its payload or an `ApiError`; there are no retries and no
// partial results. Callers decide what a failure means (loads fall back to
// defaults, user actions raise an alert).

use crate::core::model::{
    ApiEnvelope, Application, AttendanceQuery, AttendanceRecord, AttendanceStats, CompanyInfo,
    Notification,
};
use crate::util::constants;
use crate::util::error::ApiError;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

// =============================================================================
// Contract
// =============================================================================

/// Logical operations the screens consume.
pub trait PortalApi: Send + Sync {
    /// Company profile owned by `user_id`.
    fn fetch_company_profile(&self, user_id: &str) -> Result<CompanyInfo, ApiError>;

    /// Approved applications for `company_id` (the current interns).
    fn fetch_approved_applications(&self, company_id: &str)
        -> Result<Vec<Application>, ApiError>;

    /// Attendance rows for today, optionally widened to a date range.
    fn fetch_today_attendance(
        &self,
        company_id: &str,
        user_id: &str,
        range: Option<&AttendanceQuery>,
    ) -> Result<Vec<AttendanceRecord>, ApiError>;

    /// Aggregate attendance counts for a date range.
    fn fetch_attendance_stats(
        &self,
        company_id: &str,
        range: &AttendanceQuery,
    ) -> Result<AttendanceStats, ApiError>;

    /// Notification feed for the company user.
    fn fetch_notifications(
        &self,
        company_id: &str,
        user_id: &str,
    ) -> Result<Vec<Notification>, ApiError>;

    /// Mark one notification as read.
    fn mark_notification_read(&self, notification_id: &str, user_id: &str)
        -> Result<(), ApiError>;

    /// Mark every notification of the company user as read.
    fn mark_all_notifications_read(&self, company_id: &str, user_id: &str)
        -> Result<(), ApiError>;

    /// Change an application's status (e.g. to "rejected"), recording who did
    /// it and why.
    fn update_application_status(
        &self,
        application_id: &str,
        status: &str,
        actor_id: &str,
        reason: &str,
    ) -> Result<(), ApiError>;
}

// =============================================================================
// HTTP implementation
// =============================================================================

/// Connection settings for `HttpPortalApi`.
#[derive(Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
    /// Bearer token. Never logged.
    pub token: Option<String>,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(constants::DEFAULT_API_TIMEOUT_SECS),
            token: None,
        }
    }
}

/// `PortalApi` over HTTP/JSON.
#[derive(Debug)]
pub struct HttpPortalApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpPortalApi {
    /// Build a client for `settings`. Fails only on an unusable base URL or
    /// TLS backend initialisation failure.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&settings.base_url)?;

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(format!(
                "{}/{}",
                constants::APP_NAME,
                constants::APP_VERSION
            ))
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: base_url.to_string(),
                source: e,
            })?;

        tracing::debug!(base_url = %base_url, timeout = ?settings.timeout, "API client ready");

        Ok(Self {
            client,
            base_url,
            token: settings.token.clone(),
        })
    }

    /// The normalised base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each segment.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                endpoint: segments.join("/"),
                reason: "base URL cannot carry a path".to_string(),
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn authorise(&self, req: RequestBuilder) -> RequestBuilder {
        match self.token {
            Some(ref token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let endpoint = segments.join("/");
        let url = self.endpoint_url(segments)?;
        let req = self.authorise(self.client.get(url).query(query));
        let envelope: ApiEnvelope<T> = self.send(&endpoint, req)?;
        envelope
            .data
            .ok_or(ApiError::MissingPayload { endpoint })
    }

    fn put_ack(&self, segments: &[&str], body: &serde_json::Value) -> Result<(), ApiError> {
        let endpoint = segments.join("/");
        let url = self.endpoint_url(segments)?;
        let req = self.authorise(self.client.put(url).json(body));
        let _: ApiEnvelope<serde_json::Value> = self.send(&endpoint, req)?;
        Ok(())
    }

    /// Send `req` and decode a successful envelope.
    fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        req: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let transport = |e| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source: e,
        };

        tracing::debug!(endpoint, "API request");
        let resp = req.send().map_err(transport)?;
        let status = resp.status();
        let body = resp.text().map_err(transport)?;

        if !status.is_success() {
            // Error bodies usually still carry an envelope with a message.
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(ApiError::Rejected {
                endpoint: endpoint.to_string(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode {
                endpoint: endpoint.to_string(),
                source: e,
            })?;

        if !envelope.success {
            return Err(ApiError::Rejected {
                endpoint: endpoint.to_string(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            });
        }

        tracing::trace!(endpoint, %status, "API response accepted");
        Ok(envelope)
    }
}

/// Parse `raw` as an absolute base URL, appending a trailing slash so that
/// endpoint segments extend rather than replace the last path component.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let normalised = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalised).map_err(|e| ApiError::InvalidUrl {
        endpoint: trimmed.to_string(),
        reason: e.to_string(),
    })
}

fn range_query(range: &AttendanceQuery) -> [(&'static str, String); 2] {
    [
        ("start_date", range.start_date.to_string()),
        ("end_date", range.end_date.to_string()),
    ]
}

impl PortalApi for HttpPortalApi {
    fn fetch_company_profile(&self, user_id: &str) -> Result<CompanyInfo, ApiError> {
        self.get(&["companies", "by-user", user_id], &[])
    }

    fn fetch_approved_applications(
        &self,
        company_id: &str,
    ) -> Result<Vec<Application>, ApiError> {
        self.get(
            &["companies", company_id, "applications"],
            &[("status", "approved".to_string())],
        )
    }

    fn fetch_today_attendance(
        &self,
        company_id: &str,
        user_id: &str,
        range: Option<&AttendanceQuery>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let mut query = vec![
            ("company_id", company_id.to_string()),
            ("user_id", user_id.to_string()),
        ];
        if let Some(range) = range {
            query.extend(range_query(range));
        }
        self.get(&["attendance", "today"], &query)
    }

    fn fetch_attendance_stats(
        &self,
        company_id: &str,
        range: &AttendanceQuery,
    ) -> Result<AttendanceStats, ApiError> {
        let mut query = vec![("company_id", company_id.to_string())];
        query.extend(range_query(range));
        self.get(&["attendance", "stats"], &query)
    }

    fn fetch_notifications(
        &self,
        company_id: &str,
        user_id: &str,
    ) -> Result<Vec<Notification>, ApiError> {
        self.get(
            &["notifications"],
            &[
                ("company_id", company_id.to_string()),
                ("user_id", user_id.to_string()),
            ],
        )
    }

    fn mark_notification_read(
        &self,
        notification_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        self.put_ack(
            &["notifications", notification_id, "read"],
            &serde_json::json!({ "user_id": user_id }),
        )
    }

    fn mark_all_notifications_read(
        &self,
        company_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        self.put_ack(
            &["notifications", "read-all"],
            &serde_json::json!({ "company_id": company_id, "user_id": user_id }),
        )
    }

    fn update_application_status(
        &self,
        application_id: &str,
        status: &str,
        actor_id: &str,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.put_ack(
            &["applications", application_id, "status"],
            &serde_json::json!({
                "status": status,
                "actor_id": actor_id,
                "reason": reason,
            }),
        )
    }
}
