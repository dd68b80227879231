//! Exam configuration engine
//!
//! Owns the exam metadata and the legal options for each dependent field:
//! - setting `class` clears `section` and `subject`
//! - setting `section` clears `subject`
//! - setting `examType` recomputes `maximumMarks`
//! - a field with exactly one legal option is selected automatically

mod exam_type;
mod options;

pub use exam_type::{EXAM_TYPES, maximum_marks_for, maximum_marks_label};
pub use options::{
    FieldOptions, available_classes, available_sections, available_subjects, derive_options,
    resolve,
};

use crate::error::{Error, Result};
use crate::types::{Assignment, ExamConfiguration, ExamField};
use tracing::debug;

/// Exam configuration state for one teacher
#[derive(Debug, Clone)]
pub struct ExamDetails {
    assignments: Vec<Assignment>,
    config: ExamConfiguration,
    options: FieldOptions,
}

impl ExamDetails {
    /// Create an empty configuration over the teacher's assignments
    pub fn new(assignments: Vec<Assignment>) -> Self {
        let config = ExamConfiguration::default();
        let options = derive_options(&assignments, &config);
        Self {
            assignments,
            config,
            options,
        }
    }

    /// Current configuration
    pub const fn config(&self) -> &ExamConfiguration {
        &self.config
    }

    /// Assignments the options are derived from
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Classes the teacher can pick
    pub fn available_classes(&self) -> &[String] {
        &self.options.classes
    }

    /// Sections of the selected class
    pub fn available_sections(&self) -> &[String] {
        &self.options.sections
    }

    /// Subjects of the selected class section
    pub fn available_subjects(&self) -> &[String] {
        &self.options.subjects
    }

    /// Legal options for a field, `None` for free-form fields
    pub fn options_for(&self, field: ExamField) -> Option<&[String]> {
        match field {
            ExamField::Class => Some(&self.options.classes),
            ExamField::Section => Some(&self.options.sections),
            ExamField::Subject => Some(&self.options.subjects),
            ExamField::ExamType | ExamField::ExamDate => None,
        }
    }

    /// Set a field, apply the cascade and settle auto-resolution.
    ///
    /// An empty value deselects. A non-empty class, section or subject that
    /// is not among the current options is rejected and leaves the
    /// configuration untouched.
    pub fn set_field(&mut self, field: ExamField, value: &str) -> Result<()> {
        if !value.is_empty() {
            if let Some(options) = self.options_for(field) {
                if !options.iter().any(|option| option == value) {
                    return Err(Error::InvalidArgument(format!(
                        "'{value}' is not an available {field}"
                    )));
                }
            }
        }

        debug!(%field, value, "setting exam field");
        *self.config.slot_mut(field) = value.to_string();

        match field {
            ExamField::Class => {
                self.config.section.clear();
                self.config.subject.clear();
            }
            ExamField::Section => self.config.subject.clear(),
            ExamField::ExamType => {
                self.config.maximum_marks = maximum_marks_label(&self.config.exam_type);
            }
            ExamField::Subject | ExamField::ExamDate => {}
        }

        self.options = resolve(&self.assignments, &mut self.config);
        Ok(())
    }

    /// Every field, including the derived maximum, is filled in
    pub fn are_details_complete(&self) -> bool {
        self.config.is_complete()
    }

    /// `(class, section)` when both are selected
    pub fn roster_key(&self) -> Option<(&str, &str)> {
        if self.config.class.is_empty() || self.config.section.is_empty() {
            None
        } else {
            Some((&self.config.class, &self.config.section))
        }
    }

    /// Back to the empty configuration
    pub fn reset(&mut self) {
        self.config = ExamConfiguration::default();
        self.options = derive_options(&self.assignments, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ExamDetails {
        ExamDetails::new(vec![
            Assignment::new("9", "A", "Mathematics"),
            Assignment::new("9", "B", "Mathematics"),
            Assignment::new("9", "B", "Physics"),
            Assignment::new("10", "A", "Science"),
        ])
    }

    #[test]
    fn test_class_with_single_section_resolves_subject() {
        let mut exam = details();
        exam.set_field(ExamField::Class, "10").unwrap();
        assert_eq!(exam.config().section, "A");
        assert_eq!(exam.config().subject, "Science");
    }

    #[test]
    fn test_selecting_section_resolves_single_subject() {
        let mut exam = details();
        exam.set_field(ExamField::Class, "9").unwrap();
        assert_eq!(exam.config().section, "");
        assert_eq!(exam.available_sections(), ["A", "B"]);

        exam.set_field(ExamField::Section, "A").unwrap();
        assert_eq!(exam.config().subject, "Mathematics");
    }

    #[test]
    fn test_changing_class_clears_downstream() {
        let mut exam = details();
        exam.set_field(ExamField::Class, "9").unwrap();
        exam.set_field(ExamField::Section, "B").unwrap();
        exam.set_field(ExamField::Subject, "Physics").unwrap();

        exam.set_field(ExamField::Class, "9").unwrap();
        assert_eq!(exam.config().section, "");
        assert_eq!(exam.config().subject, "");
        assert!(exam.available_subjects().is_empty());
    }

    #[test]
    fn test_changing_section_clears_subject() {
        let mut exam = details();
        exam.set_field(ExamField::Class, "9").unwrap();
        exam.set_field(ExamField::Section, "B").unwrap();
        exam.set_field(ExamField::Subject, "Physics").unwrap();

        exam.set_field(ExamField::Section, "B").unwrap();
        assert_eq!(exam.config().subject, "");
    }

    #[test]
    fn test_unavailable_choice_is_rejected() {
        let mut exam = details();
        assert!(exam.set_field(ExamField::Class, "11").is_err());
        exam.set_field(ExamField::Class, "9").unwrap();
        assert!(exam.set_field(ExamField::Section, "C").is_err());
        assert_eq!(exam.config().class, "9");
    }

    #[test]
    fn test_maximum_marks_follow_exam_type() {
        let mut exam = details();
        exam.set_field(ExamField::ExamType, "CT1").unwrap();
        assert_eq!(exam.config().maximum_marks, "15");
        exam.set_field(ExamField::ExamType, "Half Yearly").unwrap();
        assert_eq!(exam.config().maximum_marks, "80");
        exam.set_field(ExamField::ExamType, "CT1").unwrap();
        assert_eq!(exam.config().maximum_marks, "15");
        exam.set_field(ExamField::ExamType, "Unknown").unwrap();
        assert_eq!(exam.config().maximum_marks, "");
    }

    #[test]
    fn test_details_complete_and_reset() {
        let mut exam = details();
        exam.set_field(ExamField::ExamType, "UT").unwrap();
        exam.set_field(ExamField::Class, "10").unwrap();
        assert!(!exam.are_details_complete());
        exam.set_field(ExamField::ExamDate, "2024-03-01").unwrap();
        assert!(exam.are_details_complete());
        assert_eq!(exam.roster_key(), Some(("10", "A")));

        exam.reset();
        assert_eq!(exam.config(), &ExamConfiguration::default());
        assert!(exam.roster_key().is_none());
        assert_eq!(exam.available_classes(), ["9", "10"]);
    }
}
