//! In-memory demo backend
//!
//! Serves fixed demo teachers and rosters and records every submission.
//! Used by `marks --demo` and by tests.

use crate::backend::BackendService;
use crate::error::{Error, Result};
use crate::types::{Assignment, StudentRecord, SubmissionPayload, Teacher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Password accepted for every demo teacher
pub const DEMO_PASSWORD: &str = "password123";

/// Demo backend service
pub struct DemoBackend {
    teachers: HashMap<String, Teacher>,
    rosters: HashMap<(String, String), Vec<StudentRecord>>,
    submissions: Mutex<Vec<SubmissionPayload>>,
    submission_failure: Mutex<Option<String>>,
    roster_failure: Mutex<Option<String>>,
    roster_requests: AtomicUsize,
}

fn teacher(id: &str, name: &str, assignments: &[(&str, &str, &str)]) -> Teacher {
    Teacher {
        id: id.to_string(),
        name: name.to_string(),
        assignments: assignments
            .iter()
            .map(|(class, section, subject)| Assignment::new(class, section, subject))
            .collect(),
    }
}

fn roster(prefix: &str, first_id: usize, names: &[&str]) -> Vec<StudentRecord> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            StudentRecord::new(
                &format!("s{:03}", first_id + i),
                &format!("{prefix}-{:02}", i + 1),
                name,
            )
        })
        .collect()
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoBackend {
    /// Backend preloaded with the demo school
    pub fn new() -> Self {
        let teachers = [
            teacher(
                "teacher01",
                "Mr. John Doe (Demo)",
                &[("9", "A", "Mathematics"), ("9", "B", "Mathematics")],
            ),
            teacher("teacher02", "Ms. Jane Smith (Demo)", &[("10", "A", "Science")]),
            teacher(
                "teacher03",
                "Mrs. Emily Jones (Demo)",
                &[("8", "A", "English"), ("8", "B", "English"), ("8", "C", "English")],
            ),
        ];

        let rosters = [
            (
                ("9", "A"),
                roster(
                    "9A",
                    1,
                    &["Alice Johnson", "Bob Williams", "Charlie Brown", "Diana Miller", "Ethan Davis"],
                ),
            ),
            (
                ("9", "B"),
                roster("9B", 6, &["Fiona Garcia", "George Rodriguez", "Hannah Martinez"]),
            ),
            (
                ("10", "A"),
                roster(
                    "10A",
                    9,
                    &["Ivy Hernandez", "Jack Lopez", "Karen Gonzalez", "Leo Wilson"],
                ),
            ),
            (("8", "A"), roster("8A", 13, &["Mia Anderson", "Noah Thomas"])),
            (
                ("8", "B"),
                roster("8B", 15, &["Olivia Jackson", "Peter White", "Quinn Harris"]),
            ),
            (("8", "C"), Vec::new()),
        ];

        Self {
            teachers: teachers.into_iter().map(|t| (t.id.clone(), t)).collect(),
            rosters: rosters
                .into_iter()
                .map(|((class, section), students)| ((class.to_string(), section.to_string()), students))
                .collect(),
            submissions: Mutex::new(Vec::new()),
            submission_failure: Mutex::new(None),
            roster_failure: Mutex::new(None),
            roster_requests: AtomicUsize::new(0),
        }
    }

    /// Make every following submission fail with `message` (`None` restores success)
    pub fn fail_submissions_with(&self, message: Option<&str>) {
        if let Ok(mut failure) = self.submission_failure.lock() {
            *failure = message.map(String::from);
        }
    }

    /// Make every following roster lookup fail with `message` (`None` restores success)
    pub fn fail_rosters_with(&self, message: Option<&str>) {
        if let Ok(mut failure) = self.roster_failure.lock() {
            *failure = message.map(String::from);
        }
    }

    /// Payloads received so far
    pub fn submissions(&self) -> Vec<SubmissionPayload> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    /// Number of roster lookups served
    pub fn roster_requests(&self) -> usize {
        self.roster_requests.load(Ordering::SeqCst)
    }

    fn scripted(slot: &Mutex<Option<String>>) -> Option<String> {
        slot.lock().ok().and_then(|failure| failure.clone())
    }
}

#[async_trait]
impl BackendService for DemoBackend {
    async fn authenticate(&self, teacher_id: &str, password: &str) -> Result<Teacher> {
        match self.teachers.get(teacher_id) {
            Some(teacher) if password == DEMO_PASSWORD => {
                debug!(teacher_id, "demo login succeeded");
                Ok(teacher.clone())
            }
            _ => {
                debug!(teacher_id, "demo login rejected");
                Err(Error::InvalidCredentials(format!(
                    "Invalid credentials. Please use a demo ID and the password \"{DEMO_PASSWORD}\"."
                )))
            }
        }
    }

    async fn fetch_roster(&self, class: &str, section: &str) -> Result<Vec<StudentRecord>> {
        self.roster_requests.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = Self::scripted(&self.roster_failure) {
            return Err(Error::FetchFailed(message));
        }
        let students = self
            .rosters
            .get(&(class.to_string(), section.to_string()))
            .cloned()
            .unwrap_or_default();
        debug!(class, section, count = students.len(), "demo roster served");
        Ok(students)
    }

    async fn submit_marks(&self, payload: &SubmissionPayload) -> Result<()> {
        if let Some(message) = Self::scripted(&self.submission_failure) {
            return Err(Error::SubmissionFailed(message));
        }
        info!(
            teacher_id = %payload.teacher_id,
            class = %payload.class,
            section = %payload.section,
            count = payload.students.len(),
            "demo submission received"
        );
        self.submissions
            .lock()
            .map_err(|_| Error::Internal("demo submission log poisoned".to_string()))?
            .push(payload.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "demo"
    }
}
