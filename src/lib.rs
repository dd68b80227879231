//! marks-entry - exam marks entry core
//!
//! A teacher picks an exam (type, class, section, subject, date), the roster
//! for that class is loaded, marks are entered per student and the batch is
//! submitted to a remote store.
//!
//! The crate is organised around three engines composed by [`form::MarksForm`]:
//! - [`exam::ExamDetails`] owns the exam configuration and its cascading options
//! - [`roster::StudentRoster`] owns the per-student marks and validation errors
//! - [`submit::SubmissionController`] owns the submission lifecycle
//!
//! Remote systems (authentication, roster lookup, submission sink) sit behind
//! [`backend::BackendService`].

pub mod auth;
pub mod backend;
pub mod config;
pub mod error;
pub mod exam;
pub mod form;
pub mod roster;
pub mod submit;
pub mod types;
