//! HTTP backend implementation
//!
//! The remote store exposes a single endpoint. Every call is a POST of
//! `{ "action": ..., "payload": ... }` answered by an envelope
//! `{ "success": bool, "data": ..., "error": "..." }`.

use crate::backend::BackendService;
use crate::error::{Error, Result};
use crate::types::{StudentRecord, SubmissionPayload, Teacher};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Fallback when the envelope reports failure without a message
const UNKNOWN_API_ERROR: &str = "An unknown API error occurred.";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct ActionRequest<'a, P: Serialize> {
    action: &'a str,
    payload: &'a P,
}

#[derive(Deserialize)]
struct ApiResponse {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload<'a> {
    teacher_id: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RosterPayload<'a> {
    class: &'a str,
    section: &'a str,
}

/// Backend service over HTTP using reqwest
pub struct HttpBackend {
    client: Client,
    endpoint: Url,
}

impl HttpBackend {
    /// Create a new HTTP backend for `endpoint`
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid backend endpoint '{endpoint}': {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// Endpoint every action is posted to
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Post an action and unwrap the response envelope
    async fn post<P: Serialize + Sync>(&self, action: &str, payload: &P) -> Result<Option<Value>> {
        debug!(action, "posting backend action");
        let body = serde_json::to_string(&ActionRequest { action, payload })?;

        let response = self
            .client
            .post(self.endpoint.clone())
            // Plain text avoids a CORS preflight on script-hosted endpoints
            .header("Content-Type", "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(action, %status, "backend returned error status");
            return Err(Error::Backend(format!(
                "Network error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )));
        }

        let envelope: ApiResponse = response.json().await?;
        if envelope.success {
            debug!(action, "backend action succeeded");
            Ok(envelope.data)
        } else {
            let message = envelope
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| UNKNOWN_API_ERROR.to_string());
            warn!(action, error = %message, "backend action failed");
            Err(Error::Backend(message))
        }
    }
}

/// Message suitable for showing to the user
fn user_message(error: Error) -> String {
    match error {
        Error::Backend(message) => message,
        other => other.to_string(),
    }
}

/// Teacher data may arrive as an object or as a JSON-encoded string
fn parse_teacher(data: Value) -> Result<Teacher> {
    let data = match data {
        Value::String(raw) => serde_json::from_str(&raw)
            .map_err(|_| Error::Backend("Failed to process the server's response.".to_string()))?,
        other => other,
    };

    if data.get("id").is_none() {
        let message = data
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Invalid credentials. Please try again.");
        return Err(Error::InvalidCredentials(message.to_string()));
    }
    Ok(serde_json::from_value(data)?)
}

#[async_trait]
impl BackendService for HttpBackend {
    async fn authenticate(&self, teacher_id: &str, password: &str) -> Result<Teacher> {
        debug!(teacher_id, "authenticating teacher");
        let data = self
            .post(
                "validateTeacher",
                &LoginPayload {
                    teacher_id,
                    password,
                },
            )
            .await
            .map_err(|e| match e {
                Error::Backend(message) => Error::InvalidCredentials(message),
                other => other,
            })?
            .ok_or_else(|| {
                Error::InvalidCredentials("Invalid credentials. Please try again.".to_string())
            })?;

        let teacher = parse_teacher(data)?;
        debug!(teacher_id, assignments = teacher.assignments.len(), "authenticated");
        Ok(teacher)
    }

    async fn fetch_roster(&self, class: &str, section: &str) -> Result<Vec<StudentRecord>> {
        debug!(class, section, "fetching roster");
        let data = self
            .post("getStudents", &RosterPayload { class, section })
            .await
            .map_err(|e| Error::FetchFailed(user_message(e)))?;

        let students = match data {
            None | Some(Value::Null) => Vec::new(),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| Error::FetchFailed(format!("malformed roster: {e}")))?,
        };
        debug!(class, section, count = students.len(), "fetched roster");
        Ok(students)
    }

    async fn submit_marks(&self, payload: &SubmissionPayload) -> Result<()> {
        debug!(
            class = %payload.class,
            section = %payload.section,
            count = payload.students.len(),
            "submitting marks"
        );
        self.post("submitMarks", payload).await.map_err(|e| {
            Error::SubmissionFailed(format!("Marks submission failed: {}", user_message(e)))
        })?;
        debug!("submitted marks");
        Ok(())
    }

    fn name(&self) -> &str {
        self.endpoint.host_str().unwrap_or("http")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttendanceStatus, StudentId, StudentSubmission};
    use mockito::Matcher;
    use serde_json::json;

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            teacher_id: "teacher01".into(),
            exam_type: "CT1".into(),
            class: "9".into(),
            section: "A".into(),
            subject: "Mathematics".into(),
            exam_date: "2024-03-01".into(),
            maximum_marks: "15".into(),
            students: vec![StudentSubmission {
                student_id: StudentId::from("s001"),
                name: "Alice".into(),
                marks: "12".into(),
                status: AttendanceStatus::Present,
                remark: String::new(),
            }],
        }
    }

    #[test]
    fn test_invalid_endpoint_is_config_error() {
        assert!(matches!(
            HttpBackend::new("not a url", 5),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "action": "validateTeacher",
                "payload": { "teacherId": "teacher01", "password": "pw" }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "success": true,
                    "data": {
                        "id": "teacher01",
                        "name": "Mr. Doe",
                        "assignments": [{ "class": "9", "section": "A", "subject": "Mathematics" }]
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let backend = HttpBackend::new(&server.url(), 5).unwrap();
        let teacher = backend.authenticate("teacher01", "pw").await.unwrap();
        assert_eq!(teacher.name, "Mr. Doe");
        assert_eq!(teacher.assignments.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_authenticate_string_encoded_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(json!({ "success": true, "data": "{\"error\":\"Wrong password\"}" }).to_string())
            .create_async()
            .await;

        let backend = HttpBackend::new(&server.url(), 5).unwrap();
        let err = backend.authenticate("teacher01", "bad").await.unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials(ref m) if m == "Wrong password"));
    }

    #[tokio::test]
    async fn test_authenticate_rejected_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(json!({ "success": false, "error": "Unknown teacher" }).to_string())
            .create_async()
            .await;

        let backend = HttpBackend::new(&server.url(), 5).unwrap();
        let err = backend.authenticate("nobody", "pw").await.unwrap_err();
        assert!(matches!(err, Error::InvalidCredentials(ref m) if m == "Unknown teacher"));
    }

    #[tokio::test]
    async fn test_fetch_roster_null_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({ "action": "getStudents" })))
            .with_status(200)
            .with_body(json!({ "success": true, "data": null }).to_string())
            .create_async()
            .await;

        let backend = HttpBackend::new(&server.url(), 5).unwrap();
        assert!(backend.fetch_roster("8", "C").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_roster_parses_students() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "action": "getStudents",
                "payload": { "class": "9", "section": "A" }
            })))
            .with_status(200)
            .with_body(
                json!({
                    "success": true,
                    "data": [
                        { "id": "s001", "studentId": "9A-01", "name": "Alice" },
                        { "id": "s002", "studentId": "9A-02", "name": "Bob" }
                    ]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let backend = HttpBackend::new(&server.url(), 5).unwrap();
        let students = backend.fetch_roster("9", "A").await.unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[1].display_id, "9A-02");
    }

    #[tokio::test]
    async fn test_fetch_roster_http_error_is_fetch_failed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(500)
            .create_async()
            .await;

        let backend = HttpBackend::new(&server.url(), 5).unwrap();
        let err = backend.fetch_roster("9", "A").await.unwrap_err();
        assert!(matches!(err, Error::FetchFailed(ref m) if m.contains("500")));
    }

    #[tokio::test]
    async fn test_submit_sends_full_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({
                "action": "submitMarks",
                "payload": {
                    "teacherId": "teacher01",
                    "maximumMarks": "15",
                    "students": [{ "studentId": "s001", "marks": "12", "status": "Present", "remark": "" }]
                }
            })))
            .with_status(200)
            .with_body(json!({ "success": true }).to_string())
            .create_async()
            .await;

        let backend = HttpBackend::new(&server.url(), 5).unwrap();
        backend.submit_marks(&payload()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_failure_without_message_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(json!({ "success": false }).to_string())
            .create_async()
            .await;

        let backend = HttpBackend::new(&server.url(), 5).unwrap();
        let err = backend.submit_marks(&payload()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Marks submission failed: An unknown API error occurred."
        );
    }
}
