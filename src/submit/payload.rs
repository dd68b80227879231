//! Submission payload assembly

use crate::error::{Error, Result};
use crate::types::{ExamConfiguration, StudentMarkEntry, StudentSubmission, SubmissionPayload};
use chrono::NaiveDate;

/// Accepted exam date spellings; the payload always carries the first
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Normalize an exam date to `YYYY-MM-DD`
pub fn normalize_exam_date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.format(DATE_FORMATS[0]).to_string())
        .ok_or_else(|| Error::InvalidArgument(format!("unrecognised exam date: '{raw}'")))
}

/// Combine configuration, teacher and every loaded student
pub fn build_payload(
    config: &ExamConfiguration,
    teacher_id: &str,
    students: &[StudentMarkEntry],
) -> Result<SubmissionPayload> {
    Ok(SubmissionPayload {
        teacher_id: teacher_id.to_string(),
        exam_type: config.exam_type.clone(),
        class: config.class.clone(),
        section: config.section.clone(),
        subject: config.subject.clone(),
        exam_date: normalize_exam_date(&config.exam_date)?,
        maximum_marks: config.maximum_marks.clone(),
        students: students
            .iter()
            .map(|s| StudentSubmission {
                student_id: s.id.clone(),
                name: s.name.clone(),
                marks: s.marks.clone(),
                status: s.status,
                remark: s.remark.clone(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttendanceStatus, StudentRecord};

    #[test]
    fn test_normalize_exam_date() {
        assert_eq!(normalize_exam_date("2024-03-01").unwrap(), "2024-03-01");
        assert_eq!(normalize_exam_date(" 01/03/2024 ").unwrap(), "2024-03-01");
        assert_eq!(normalize_exam_date("01-03-2024").unwrap(), "2024-03-01");
        assert!(normalize_exam_date("2024-02-30").is_err());
        assert!(normalize_exam_date("tomorrow").is_err());
    }

    #[test]
    fn test_payload_carries_every_student() {
        let config = ExamConfiguration {
            exam_type: "CT2".into(),
            class: "9".into(),
            section: "B".into(),
            subject: "Mathematics".into(),
            exam_date: "05/04/2024".into(),
            maximum_marks: "15".into(),
        };
        let mut present = StudentMarkEntry::from(StudentRecord::new("s006", "9B-01", "Fiona"));
        present.marks = "14".into();
        let mut absent = StudentMarkEntry::from(StudentRecord::new("s007", "9B-02", "George"));
        absent.status = AttendanceStatus::Absent;
        absent.marks = "0".into();
        absent.remark = "medical leave".into();

        let payload = build_payload(&config, "teacher01", &[present, absent]).unwrap();
        assert_eq!(payload.teacher_id, "teacher01");
        assert_eq!(payload.exam_date, "2024-04-05");
        assert_eq!(payload.students.len(), 2);
        assert_eq!(payload.students[1].status, AttendanceStatus::Absent);
        assert_eq!(payload.students[1].remark, "medical leave");
    }
}
