//! Exam type catalogue and the maximum-marks lookup

/// Exam types offered by the form, in menu order
pub const EXAM_TYPES: [&str; 6] = ["CT1", "CT2", "UT", "Half Yearly", "Final Exam", "Annual Exam"];

/// Maximum marks for an exam type, `None` for unknown or empty types
pub fn maximum_marks_for(exam_type: &str) -> Option<u32> {
    match exam_type {
        "CT1" | "CT2" => Some(15),
        "UT" => Some(20),
        "Half Yearly" => Some(80),
        "Final Exam" | "Annual Exam" => Some(100),
        _ => None,
    }
}

/// String form stored in the configuration; empty when unknown
pub fn maximum_marks_label(exam_type: &str) -> String {
    maximum_marks_for(exam_type)
        .map(|max| max.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_type_has_a_maximum() {
        for exam_type in EXAM_TYPES {
            assert!(maximum_marks_for(exam_type).is_some(), "{exam_type}");
        }
    }

    #[test]
    fn test_known_ceilings() {
        assert_eq!(maximum_marks_label("CT1"), "15");
        assert_eq!(maximum_marks_label("UT"), "20");
        assert_eq!(maximum_marks_label("Half Yearly"), "80");
        assert_eq!(maximum_marks_label("Final Exam"), "100");
    }

    #[test]
    fn test_unknown_type_has_no_maximum() {
        assert_eq!(maximum_marks_label(""), "");
        assert_eq!(maximum_marks_label("ct1"), "");
        assert_eq!(maximum_marks_label("Quiz"), "");
    }
}
