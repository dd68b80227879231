//! Option derivation for the cascading exam dropdowns
//!
//! Everything here is a pure function of `(assignments, configuration)`.
//! The engine recomputes it after every edit instead of patching option
//! lists in place.

use crate::types::{Assignment, ExamConfiguration};
use std::collections::BTreeSet;
use tracing::debug;

/// Upper bound on auto-resolution passes.
///
/// Class -> section -> subject settles in one pass; the second pass only
/// confirms the fixed point.
const MAX_RESOLUTION_ROUNDS: usize = 2;

/// Legal choices for the dependent fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Distinct classes, ascending by numeric prefix
    pub classes: Vec<String>,
    /// Distinct sections of the selected class, lexicographic
    pub sections: Vec<String>,
    /// Distinct subjects of the selected class section, first-seen order
    pub subjects: Vec<String>,
}

/// Ordering key for the leading digits of a class label.
///
/// Compares by digit count, then lexically, so arbitrarily long prefixes
/// order correctly. Labels without leading digits order as 0.
fn numeric_prefix(label: &str) -> (usize, String) {
    let digits: String = label
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    let significant = digits.trim_start_matches('0');
    (significant.len(), significant.to_string())
}

/// Distinct classes across all assignments, numeric ascending.
///
/// Ties keep first-seen order (`sort_by_cached_key` is stable).
pub fn available_classes(assignments: &[Assignment]) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for assignment in assignments {
        if !classes.contains(&assignment.class) {
            classes.push(assignment.class.clone());
        }
    }
    classes.sort_by_cached_key(|class| numeric_prefix(class));
    classes
}

/// Distinct sections for `class`; empty when no class is selected
pub fn available_sections(assignments: &[Assignment], class: &str) -> Vec<String> {
    if class.is_empty() {
        return Vec::new();
    }
    assignments
        .iter()
        .filter(|a| a.class == class)
        .map(|a| a.section.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct subjects for `(class, section)`; empty unless both are selected
pub fn available_subjects(assignments: &[Assignment], class: &str, section: &str) -> Vec<String> {
    if class.is_empty() || section.is_empty() {
        return Vec::new();
    }
    let mut subjects: Vec<String> = Vec::new();
    for assignment in assignments
        .iter()
        .filter(|a| a.class == class && a.section == section)
    {
        if !subjects.contains(&assignment.subject) {
            subjects.push(assignment.subject.clone());
        }
    }
    subjects
}

/// Option lists for the current selections, without resolving anything
pub fn derive_options(assignments: &[Assignment], config: &ExamConfiguration) -> FieldOptions {
    FieldOptions {
        classes: available_classes(assignments),
        sections: available_sections(assignments, &config.class),
        subjects: available_subjects(assignments, &config.class, &config.section),
    }
}

/// Apply auto-resolution until stable and return the settled option lists.
///
/// A field whose option list has exactly one candidate is set to it. An
/// auto-selected section clears the subject, which is then re-resolved
/// from the new section's subjects.
pub fn resolve(assignments: &[Assignment], config: &mut ExamConfiguration) -> FieldOptions {
    for _ in 0..MAX_RESOLUTION_ROUNDS {
        let mut changed = false;

        let sections = available_sections(assignments, &config.class);
        if let [only] = sections.as_slice() {
            if config.section != *only {
                debug!(class = %config.class, section = %only, "auto-selecting sole section");
                config.section.clone_from(only);
                config.subject.clear();
                changed = true;
            }
        }

        let subjects = available_subjects(assignments, &config.class, &config.section);
        if let [only] = subjects.as_slice() {
            if config.subject != *only {
                debug!(section = %config.section, subject = %only, "auto-selecting sole subject");
                config.subject.clone_from(only);
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }
    derive_options(assignments, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignments() -> Vec<Assignment> {
        vec![
            Assignment::new("10", "B", "Science"),
            Assignment::new("9", "A", "Mathematics"),
            Assignment::new("10", "A", "Science"),
            Assignment::new("10", "A", "Physics"),
            Assignment::new("9", "A", "Mathematics"),
            Assignment::new("8", "C", "English"),
        ]
    }

    #[test]
    fn test_classes_distinct_and_numeric() {
        assert_eq!(available_classes(&assignments()), vec!["8", "9", "10"]);
    }

    #[test]
    fn test_classes_with_huge_numeric_prefix_sort_last() {
        let assignments = vec![
            Assignment::new("99999999999999999999999", "A", "Art"),
            Assignment::new("Nursery", "A", "Art"),
            Assignment::new("18446744073709551616", "A", "Art"),
            Assignment::new("007", "A", "Art"),
            Assignment::new("12", "A", "Art"),
        ];
        assert_eq!(
            available_classes(&assignments),
            vec![
                "Nursery",
                "007",
                "12",
                "18446744073709551616",
                "99999999999999999999999"
            ]
        );
    }

    #[test]
    fn test_classes_non_numeric_prefix_order() {
        let assignments = vec![
            Assignment::new("Nursery", "A", "Art"),
            Assignment::new("12B", "A", "Art"),
            Assignment::new("2", "A", "Art"),
            Assignment::new("KG", "A", "Art"),
        ];
        // Non-numeric labels order as 0 and keep their relative order
        assert_eq!(
            available_classes(&assignments),
            vec!["Nursery", "KG", "2", "12B"]
        );
    }

    #[test]
    fn test_sections_empty_without_class() {
        assert!(available_sections(&assignments(), "").is_empty());
    }

    #[test]
    fn test_sections_sorted_and_distinct() {
        assert_eq!(available_sections(&assignments(), "10"), vec!["A", "B"]);
        assert_eq!(available_sections(&assignments(), "9"), vec!["A"]);
    }

    #[test]
    fn test_subjects_need_class_and_section() {
        assert!(available_subjects(&assignments(), "10", "").is_empty());
        assert!(available_subjects(&assignments(), "", "A").is_empty());
        assert_eq!(
            available_subjects(&assignments(), "10", "A"),
            vec!["Science", "Physics"]
        );
    }

    #[test]
    fn test_resolve_cascades_section_then_subject() {
        let mut config = ExamConfiguration {
            class: "9".into(),
            ..Default::default()
        };
        let options = resolve(&assignments(), &mut config);
        assert_eq!(config.section, "A");
        assert_eq!(config.subject, "Mathematics");
        assert_eq!(options.subjects, vec!["Mathematics"]);
    }

    #[test]
    fn test_resolve_leaves_ambiguous_fields_alone() {
        let mut config = ExamConfiguration {
            class: "10".into(),
            ..Default::default()
        };
        resolve(&assignments(), &mut config);
        assert_eq!(config.section, "");
        assert_eq!(config.subject, "");

        config.section = "A".into();
        resolve(&assignments(), &mut config);
        assert_eq!(config.subject, "");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut config = ExamConfiguration {
            class: "8".into(),
            ..Default::default()
        };
        let first = resolve(&assignments(), &mut config);
        let snapshot = config.clone();
        let second = resolve(&assignments(), &mut config);
        assert_eq!(config, snapshot);
        assert_eq!(first, second);
    }
}
