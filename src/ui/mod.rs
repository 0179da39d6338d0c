use anyhow::{Result, bail};
use inquire::{InquireError, Text};

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs `f` and treats a cancelled prompt (Ctrl+C or Escape) as a clean exit.
///
/// Returns `Ok(None)` on cancellation, after printing a newline to tidy the
/// terminal.
pub fn handle_prompt_cancellation<T, F>(f: F) -> Result<Option<T>>
where
    F: FnOnce() -> Result<T>,
{
    match f() {
        Ok(value) => Ok(Some(value)),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Asks for a value that must not be blank.
pub fn prompt_required(message: &str, help: &str) -> Result<String> {
    let answer = Text::new(message).with_help_message(help).prompt()?;
    let answer = answer.trim();
    if answer.is_empty() {
        bail!("{} cannot be empty", message.trim_end_matches(':'));
    }
    Ok(answer.to_string())
}

/// Asks for a value, offering `default` when one is known.
pub fn prompt_with_default(message: &str, help: &str, default: Option<&str>) -> Result<String> {
    let mut prompt = Text::new(message).with_help_message(help);
    if let Some(d) = default {
        prompt = prompt.with_default(d);
    }
    Ok(prompt.prompt()?.trim().to_string())
}
