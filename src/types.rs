//! Core types shared by the engines and the backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One teaching responsibility: a subject taught to a class section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// Class label, usually numeric ("9", "10")
    pub class: String,
    /// Section label ("A", "B")
    pub section: String,
    /// Subject name
    pub subject: String,
}

impl Assignment {
    /// Convenience constructor
    pub fn new(class: &str, section: &str, subject: &str) -> Self {
        Self {
            class: class.to_string(),
            section: section.to_string(),
            subject: subject.to_string(),
        }
    }
}

/// An authenticated teacher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    /// Teacher id used to log in
    pub id: String,
    /// Display name
    pub name: String,
    /// Teaching responsibilities; duplicates are harmless
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

/// Stable identity of a student in the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl StudentId {
    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Immutable roster fact as returned by the roster lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    /// Identity used for submission
    pub id: StudentId,
    /// Human-facing id (admission / roll number)
    #[serde(rename = "studentId")]
    pub display_id: String,
    /// Student name
    pub name: String,
}

impl StudentRecord {
    /// Convenience constructor
    pub fn new(id: &str, display_id: &str, name: &str) -> Self {
        Self {
            id: StudentId::from(id),
            display_id: display_id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Presence of a student at the exam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Sat the exam; marks are required
    #[default]
    Present,
    /// Did not sit the exam; marks are forced to "0"
    Absent,
}

impl AttendanceStatus {
    /// The other status
    pub const fn toggled(self) -> Self {
        match self {
            Self::Present => Self::Absent,
            Self::Absent => Self::Present,
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => write!(f, "Present"),
            Self::Absent => write!(f, "Absent"),
        }
    }
}

/// Marks stored for an absent student
pub const ABSENT_MARKS: &str = "0";

/// A roster entry being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentMarkEntry {
    /// Identity used for submission
    pub id: StudentId,
    /// Human-facing id
    pub display_id: String,
    /// Student name
    pub name: String,
    /// Digits only; empty until entered
    pub marks: String,
    /// Presence status
    pub status: AttendanceStatus,
    /// Free-text remark
    pub remark: String,
}

impl From<StudentRecord> for StudentMarkEntry {
    fn from(record: StudentRecord) -> Self {
        Self {
            id: record.id,
            display_id: record.display_id,
            name: record.name,
            marks: String::new(),
            status: AttendanceStatus::Present,
            remark: String::new(),
        }
    }
}

/// User-editable exam configuration fields
///
/// `maximumMarks` is deliberately absent: it is derived from the exam type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExamField {
    /// Exam type ("CT1", "Half Yearly", ...)
    ExamType,
    /// Class
    Class,
    /// Section within the class
    Section,
    /// Subject within the class section
    Subject,
    /// Exam date
    ExamDate,
}

impl ExamField {
    /// All editable fields in form order
    pub const ALL: [Self; 5] = [
        Self::ExamType,
        Self::Class,
        Self::Section,
        Self::Subject,
        Self::ExamDate,
    ];

    /// Wire / form name of the field
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExamType => "examType",
            Self::Class => "class",
            Self::Section => "section",
            Self::Subject => "subject",
            Self::ExamDate => "examDate",
        }
    }
}

impl fmt::Display for ExamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExamField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown exam field: {s}")))
    }
}

/// Exam metadata being configured
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamConfiguration {
    /// Exam type
    pub exam_type: String,
    /// Class
    pub class: String,
    /// Section
    pub section: String,
    /// Subject
    pub subject: String,
    /// Exam date as entered
    pub exam_date: String,
    /// Derived from `exam_type`; decimal string or empty
    pub maximum_marks: String,
}

impl ExamConfiguration {
    /// Current value of an editable field
    pub fn get(&self, field: ExamField) -> &str {
        match field {
            ExamField::ExamType => &self.exam_type,
            ExamField::Class => &self.class,
            ExamField::Section => &self.section,
            ExamField::Subject => &self.subject,
            ExamField::ExamDate => &self.exam_date,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: ExamField) -> &mut String {
        match field {
            ExamField::ExamType => &mut self.exam_type,
            ExamField::Class => &mut self.class,
            ExamField::Section => &mut self.section,
            ExamField::Subject => &mut self.subject,
            ExamField::ExamDate => &mut self.exam_date,
        }
    }

    /// True iff every field, including the derived maximum, is non-empty
    pub fn is_complete(&self) -> bool {
        ExamField::ALL
            .into_iter()
            .all(|field| !self.get(field).is_empty())
            && !self.maximum_marks.is_empty()
    }
}

/// One student's line in a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSubmission {
    /// Student identity
    pub student_id: StudentId,
    /// Student name
    pub name: String,
    /// Marks ("0" when absent)
    pub marks: String,
    /// Presence status
    pub status: AttendanceStatus,
    /// Free-text remark
    pub remark: String,
}

/// Payload sent to the submission sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    /// Submitting teacher
    pub teacher_id: String,
    /// Exam type
    pub exam_type: String,
    /// Class
    pub class: String,
    /// Section
    pub section: String,
    /// Subject
    pub subject: String,
    /// Exam date, `YYYY-MM-DD`
    pub exam_date: String,
    /// Maximum marks for the exam
    pub maximum_marks: String,
    /// Every loaded student, present or absent
    pub students: Vec<StudentSubmission>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_field_round_trips_through_name() {
        for field in ExamField::ALL {
            assert_eq!(field.name().parse::<ExamField>().unwrap(), field);
        }
        assert!("maximumMarks".parse::<ExamField>().is_err());
    }

    #[test]
    fn test_student_record_deserializes_wire_names() {
        let record: StudentRecord =
            serde_json::from_str(r#"{"id":"s001","studentId":"9A-01","name":"Alice"}"#).unwrap();
        assert_eq!(record.id, StudentId::from("s001"));
        assert_eq!(record.display_id, "9A-01");
    }

    #[test]
    fn test_payload_uses_camel_case() {
        let payload = SubmissionPayload {
            teacher_id: "t1".into(),
            exam_type: "CT1".into(),
            class: "9".into(),
            section: "A".into(),
            subject: "Mathematics".into(),
            exam_date: "2024-03-01".into(),
            maximum_marks: "15".into(),
            students: vec![StudentSubmission {
                student_id: StudentId::from("s001"),
                name: "Alice".into(),
                marks: "0".into(),
                status: AttendanceStatus::Absent,
                remark: String::new(),
            }],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["teacherId"], "t1");
        assert_eq!(value["maximumMarks"], "15");
        assert_eq!(value["students"][0]["studentId"], "s001");
        assert_eq!(value["students"][0]["status"], "Absent");
    }

    #[test]
    fn test_is_complete_requires_maximum() {
        let mut config = ExamConfiguration {
            exam_type: "XYZ".into(),
            class: "9".into(),
            section: "A".into(),
            subject: "Maths".into(),
            exam_date: "2024-03-01".into(),
            maximum_marks: String::new(),
        };
        assert!(!config.is_complete());
        config.maximum_marks = "15".into();
        assert!(config.is_complete());
    }
}
