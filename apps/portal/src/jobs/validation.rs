use crate::errors::AppError;
use crate::models::OPTIONS_PER_QUESTION;

use super::repository::JobDraft;

/// Checks a job draft before it is written.
///
/// Title and description must be non-blank. An assessment job must carry at
/// least one question, each with a prompt and a correct answer naming one of
/// its options. Questions on a non-assessment draft are ignored (they are
/// dropped on write).
pub fn validate_job_draft(draft: &JobDraft) -> Result<(), AppError> {
    if draft.job_title.trim().is_empty() || draft.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job Title and Job Description are required!".to_string(),
        ));
    }

    if !draft.assessment {
        return Ok(());
    }

    if draft.questions.is_empty() {
        return Err(AppError::Validation(
            "An assessment needs at least one question".to_string(),
        ));
    }

    for (index, question) in draft.questions.iter().enumerate() {
        let number = index + 1;
        if question.question.trim().is_empty() {
            return Err(AppError::Validation(format!(
                "Question {number} has no prompt"
            )));
        }
        if parse_answer_index(&question.correct_answer).is_none() {
            return Err(AppError::Validation(format!(
                "Question {number} has no valid correct answer (expected 0-{})",
                OPTIONS_PER_QUESTION - 1
            )));
        }
    }

    Ok(())
}

/// Parses a stored correct-answer string into an option index.
pub fn parse_answer_index(raw: &str) -> Option<usize> {
    // "01" or "+1" must not sneak through usize parsing.
    if raw.len() != 1 {
        return None;
    }
    raw.parse::<usize>()
        .ok()
        .filter(|&i| i < OPTIONS_PER_QUESTION)
}
