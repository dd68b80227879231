//! Auth command - sign in and test credentials

use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use dialoguer::{Input, Password};
use indicatif::ProgressBar;
use marks_entry::auth::{CredentialSource, Credentials, get_credentials, login};
use marks_entry::backend::BackendService;
use marks_entry::error::{Error, Result};
use marks_entry::types::Teacher;
use std::io::IsTerminal;
use std::time::Duration;

/// Credentials from the environment, or a prompt on an interactive terminal
fn resolve_credentials(teacher_id: Option<&str>) -> Result<Credentials> {
    match get_credentials(teacher_id) {
        Ok(credentials) => Ok(credentials),
        Err(Error::Auth(message)) if std::io::stdin().is_terminal() => {
            tracing::debug!(%message, "falling back to interactive sign-in");
            prompt_credentials(teacher_id)
        }
        Err(e) => Err(e),
    }
}

fn prompt_credentials(teacher_id: Option<&str>) -> Result<Credentials> {
    let teacher_id = match teacher_id {
        Some(id) => id.to_string(),
        None => Input::<String>::new()
            .with_prompt("Teacher ID")
            .interact_text()
            .map_err(|e| Error::Internal(format!("Failed to read teacher id: {e}")))?,
    };
    let password = Password::new()
        .with_prompt("Password")
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read password: {e}")))?;

    Ok(Credentials {
        teacher_id,
        password,
        source: CredentialSource::Prompt,
    })
}

/// Sign in, showing a spinner while the backend checks the credentials
pub async fn sign_in(backend: &dyn BackendService, teacher_id: Option<&str>) -> Result<Teacher> {
    let credentials = resolve_credentials(teacher_id)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message("Signing in...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = login(backend, &credentials).await;
    spinner.finish_and_clear();
    result
}

/// Run the auth test command
pub async fn run_auth_test(backend: &dyn BackendService, teacher_id: Option<&str>) -> Result<()> {
    let credentials = resolve_credentials(teacher_id)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Testing credentials against {}...", backend.name()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let teacher = login(backend, &credentials).await;
    spinner.finish_and_clear();
    let teacher = teacher?;

    println!(
        "{} Signed in as: {} ({})",
        check(),
        teacher.name.accent(),
        teacher.id
    );
    println!("  {} {:?}", "Credential source:".muted(), credentials.source);
    println!("  {} {}", "Backend:".muted(), backend.name());
    println!(
        "  {} {}",
        "Assignments:".muted(),
        teacher.assignments.len()
    );
    Ok(())
}
