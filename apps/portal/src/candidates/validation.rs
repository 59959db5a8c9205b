use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::errors::AppError;

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot in the domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

const RESUME_SCHEMES: &[&str] = &["http://", "https://"];

/// Application form as submitted by a candidate. All fields arrive as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub resume_link: String,
    #[serde(default)]
    pub experience: String,
}

/// Form fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidApplication {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub resume_link: String,
    pub experience: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_resume_link(link: &str) -> bool {
    RESUME_SCHEMES.iter().any(|scheme| link.starts_with(scheme))
}

/// Validates an application form. Fields are trimmed before checking.
///
/// Failure order: missing field, age, email, resume link.
pub fn validate_application(form: &ApplicationForm) -> Result<ValidApplication, AppError> {
    let name = form.name.trim();
    let age = form.age.trim();
    let email = form.email.trim();
    let resume_link = form.resume_link.trim();
    let experience = form.experience.trim();

    if [name, age, email, resume_link, experience]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(AppError::Validation("All fields are required!".to_string()));
    }

    let age = age
        .parse::<u32>()
        .map_err(|_| AppError::Validation(format!("Age '{age}' is not a whole number")))?;

    if !is_valid_email(email) {
        return Err(AppError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }

    if !is_valid_resume_link(resume_link) {
        return Err(AppError::Validation(
            "Resume link must start with http:// or https://".to_string(),
        ));
    }

    Ok(ValidApplication {
        name: name.to_string(),
        age,
        email: email.to_string(),
        resume_link: resume_link.to_string(),
        experience: experience.to_string(),
    })
}
