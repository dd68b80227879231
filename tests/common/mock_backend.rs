//! Mock backend recording every call

use async_trait::async_trait;
use marks_entry::backend::BackendService;
use marks_entry::error::{Error, Result};
use marks_entry::types::{StudentRecord, SubmissionPayload, Teacher};
use std::collections::HashMap;
use std::sync::Mutex;

/// Backend with scripted rosters and submission outcome
#[derive(Default)]
pub struct MockBackend {
    teacher: Option<Teacher>,
    rosters: HashMap<(String, String), Vec<StudentRecord>>,
    submit_error: Option<String>,
    roster_calls: Mutex<Vec<(String, String)>>,
    submissions: Mutex<Vec<SubmissionPayload>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teacher = Some(teacher);
        self
    }

    pub fn with_roster(mut self, class: &str, section: &str, students: Vec<StudentRecord>) -> Self {
        self.rosters
            .insert((class.to_string(), section.to_string()), students);
        self
    }

    pub fn failing_submissions(mut self, message: &str) -> Self {
        self.submit_error = Some(message.to_string());
        self
    }

    pub fn roster_calls(&self) -> Vec<(String, String)> {
        self.roster_calls.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackendService for MockBackend {
    async fn authenticate(&self, teacher_id: &str, _password: &str) -> Result<Teacher> {
        self.teacher
            .clone()
            .filter(|t| t.id == teacher_id)
            .ok_or_else(|| Error::InvalidCredentials("unknown teacher".to_string()))
    }

    async fn fetch_roster(&self, class: &str, section: &str) -> Result<Vec<StudentRecord>> {
        self.roster_calls
            .lock()
            .unwrap()
            .push((class.to_string(), section.to_string()));
        Ok(self
            .rosters
            .get(&(class.to_string(), section.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn submit_marks(&self, payload: &SubmissionPayload) -> Result<()> {
        self.submissions.lock().unwrap().push(payload.clone());
        match &self.submit_error {
            Some(message) => Err(Error::SubmissionFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
