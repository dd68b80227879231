//! Enter command - interactive marks entry

use crate::cli::CliProgress;
use crate::cli::auth::sign_in;
use crate::cli::style::{Stylize, check, cross, spinner_style};
use anstream::{eprintln, println};
use dialoguer::{Confirm, Input, Select};
use indicatif::ProgressBar;
use marks_entry::backend::BackendService;
use marks_entry::error::{Error, Result};
use marks_entry::exam::{EXAM_TYPES, maximum_marks_label};
use marks_entry::form::MarksForm;
use marks_entry::roster::full_pass_error;
use marks_entry::submit::{SubmissionState, normalize_exam_date};
use marks_entry::types::{AttendanceStatus, ExamField, StudentId};
use std::time::Duration;

/// Input that toggles a student to absent
const ABSENT_INPUT: &str = "a";

/// What to do after a submission attempt
enum Next {
    /// Start a new batch
    Another,
    /// Pick exam details again
    Details,
    /// Leave the program
    Quit,
}

/// Options for the enter command
#[derive(Debug, Clone, Copy)]
pub struct EntryOptions<'a> {
    /// Teacher id given on the command line
    pub teacher_id: Option<&'a str>,
    /// Success -> reset delay
    pub reset_delay: Duration,
    /// Show every submission phase
    pub verbose: bool,
}

/// Run the interactive marks entry session
pub async fn run_entry(backend: &dyn BackendService, options: EntryOptions<'_>) -> Result<()> {
    let teacher = sign_in(backend, options.teacher_id).await?;
    println!("{} Welcome, {}", check(), teacher.name.accent());
    if teacher.assignments.is_empty() {
        return Err(Error::InvalidArgument(
            "No classes are assigned to this teacher".to_string(),
        ));
    }

    let progress = if options.verbose {
        CliProgress::verbose()
    } else {
        CliProgress::compact()
    };
    let mut form = MarksForm::new(teacher, options.reset_delay);

    loop {
        choose_exam_details(&mut form, backend).await?;
        if form.roster().students().is_empty() {
            println!("{}", "No students found for this class and section.".muted());
            if confirm("Choose another class?", true)? {
                continue;
            }
            return Ok(());
        }

        for id in student_ids(&form) {
            enter_marks_for(&mut form, &id)?;
        }
        if confirm("Add remarks?", false)? {
            enter_remarks(&mut form)?;
        }

        match submit_until_settled(&mut form, backend, &progress).await? {
            Next::Another => {
                if !confirm("Enter another batch?", true)? {
                    return Ok(());
                }
            }
            Next::Details => {}
            Next::Quit => return Ok(()),
        }
    }
}

fn label(field: ExamField) -> &'static str {
    match field {
        ExamField::ExamType => "Exam type",
        ExamField::Class => "Class",
        ExamField::Section => "Section",
        ExamField::Subject => "Subject",
        ExamField::ExamDate => "Exam date",
    }
}

fn student_ids(form: &MarksForm) -> Vec<StudentId> {
    form.roster().students().iter().map(|s| s.id.clone()).collect()
}

fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))
}

fn pick(prompt: &str, items: &[String], current: &str) -> Result<usize> {
    let default = items.iter().position(|item| item == current).unwrap_or(0);
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read selection: {e}")))
}

/// Apply a field, loading the roster behind a spinner when the selection moved
async fn apply(
    form: &mut MarksForm,
    backend: &dyn BackendService,
    field: ExamField,
    value: &str,
) -> Result<()> {
    let Some(request) = form.set_field(field, value)? else {
        return Ok(());
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!(
        "Loading students of {}-{}...",
        request.class, request.section
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    form.load_roster(backend, &request).await;
    spinner.finish_and_clear();
    Ok(())
}

async fn choose_exam_details(form: &mut MarksForm, backend: &dyn BackendService) -> Result<()> {
    let exam_types: Vec<String> = EXAM_TYPES
        .iter()
        .map(|exam_type| format!("{exam_type} (max {})", maximum_marks_label(exam_type)))
        .collect();
    let index = pick(
        label(ExamField::ExamType),
        &exam_types,
        form.exam().config().exam_type.as_str(),
    )?;
    apply(form, backend, ExamField::ExamType, EXAM_TYPES[index]).await?;

    for field in [ExamField::Class, ExamField::Section, ExamField::Subject] {
        let options = form
            .exam()
            .options_for(field)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        let current = form.exam().config().get(field).to_string();

        if options.len() == 1 && current == options[0] {
            println!("{} {}", format!("{}:", label(field)).muted(), current.accent());
            continue;
        }
        if options.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "No {} available for this selection",
                label(field).to_lowercase()
            )));
        }
        let index = pick(label(field), &options, &current)?;
        apply(form, backend, field, &options[index]).await?;
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let date: String = Input::new()
        .with_prompt(label(ExamField::ExamDate))
        .default(today)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            normalize_exam_date(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(|e| Error::Internal(format!("Failed to read exam date: {e}")))?;
    let date = normalize_exam_date(&date)?;
    apply(form, backend, ExamField::ExamDate, &date).await
}

/// Prompt until the student's entry passes the full check
fn enter_marks_for(form: &mut MarksForm, id: &StudentId) -> Result<()> {
    loop {
        let Some(student) = form.roster().student(id) else {
            return Ok(());
        };
        let prompt = format!(
            "{} {} (0-{}, '{ABSENT_INPUT}' = absent)",
            student.display_id.muted(),
            student.name,
            form.roster().maximum_marks()
        );
        let default = match student.status {
            AttendanceStatus::Present => student.marks.clone(),
            AttendanceStatus::Absent => ABSENT_INPUT.to_string(),
        };
        let status = student.status;

        let input: String = Input::new()
            .with_prompt(prompt)
            .default(default)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Internal(format!("Failed to read marks: {e}")))?;
        let input = input.trim();

        let wants_absent = input.eq_ignore_ascii_case(ABSENT_INPUT);
        if wants_absent != (status == AttendanceStatus::Absent) {
            form.set_status(id)?;
        }
        if !wants_absent {
            form.set_marks(id, input)?;
        }

        let Some(student) = form.roster().student(id) else {
            return Ok(());
        };
        match form
            .roster()
            .error_for(id)
            .map(ToString::to_string)
            .or_else(|| full_pass_error(student, form.roster().maximum_marks()))
        {
            Some(message) => eprintln!("  {} {}", cross(), message.failure()),
            None => return Ok(()),
        }
    }
}

fn enter_remarks(form: &mut MarksForm) -> Result<()> {
    for id in student_ids(form) {
        let Some(student) = form.roster().student(&id) else {
            continue;
        };
        let remark: String = Input::new()
            .with_prompt(format!("Remark for {}", student.name))
            .default(student.remark.clone())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::Internal(format!("Failed to read remark: {e}")))?;
        form.set_remark(&id, remark.trim())?;
    }
    Ok(())
}

async fn submit_until_settled(
    form: &mut MarksForm,
    backend: &dyn BackendService,
    progress: &CliProgress,
) -> Result<Next> {
    loop {
        match form.submit(backend, progress).await.clone() {
            SubmissionState::Success(message) => {
                println!("{} {}", check(), message.emphasis());

                let spinner = ProgressBar::new_spinner();
                spinner.set_style(spinner_style());
                spinner.set_message("Clearing the form...");
                spinner.enable_steady_tick(Duration::from_millis(80));
                form.wait_for_reset().await;
                spinner.finish_and_clear();
                return Ok(Next::Another);
            }
            SubmissionState::Error(message) => {
                eprintln!("{} {}", cross(), message.failure());
                let flagged: Vec<StudentId> = form.roster().errors().keys().cloned().collect();
                for id in &flagged {
                    if let (Some(student), Some(error)) =
                        (form.roster().student(id), form.roster().error_for(id))
                    {
                        eprintln!("  {} {}: {error}", student.display_id.muted(), student.name);
                    }
                }

                let choices = [
                    "Fix marks".to_string(),
                    "Change exam details".to_string(),
                    "Retry".to_string(),
                    "Quit".to_string(),
                ];
                match pick("What next?", &choices, "")? {
                    0 => {
                        for id in &flagged {
                            enter_marks_for(form, id)?;
                        }
                    }
                    1 => return Ok(Next::Details),
                    2 => {}
                    _ => return Ok(Next::Quit),
                }
            }
            SubmissionState::Idle | SubmissionState::Submitting => return Ok(Next::Another),
        }
    }
}
