//! Registration form rules. Validation stops at the first violated rule.

use std::sync::LazyLock;

use regex::Regex;
use shared::{domain::OptionRef, protocol::CreateCustomerRequest};

use crate::{
    error::{FormField, ValidationError},
    registration::FormState,
};

pub const FULL_NAME_MIN_CHARS: usize = 3;
pub const FULL_NAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
        .expect("email regex should compile")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationRules {
    /// Reject submissions with no language selected.
    pub require_language: bool,
}

pub fn is_valid_email(email: &str) -> bool {
    !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Checks `form` and builds the create request from the selected option ids.
pub fn validate(
    form: &FormState,
    rules: ValidationRules,
) -> Result<CreateCustomerRequest, ValidationError> {
    let name_len = form.full_name.chars().count();
    if !(FULL_NAME_MIN_CHARS..=FULL_NAME_MAX_CHARS).contains(&name_len) {
        return Err(ValidationError::new(
            FormField::FullName,
            format!(
                "fullName must be between {FULL_NAME_MIN_CHARS} and {FULL_NAME_MAX_CHARS} characters"
            ),
        ));
    }

    if !is_valid_email(&form.email) {
        return Err(ValidationError::new(FormField::Email, "Invalid email"));
    }

    if form.password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::new(
            FormField::Password,
            format!("password must contain at least {PASSWORD_MIN_CHARS} characters"),
        ));
    }

    let country = required(form.country.as_ref(), FormField::Country)?;
    let state = required(form.state.as_ref(), FormField::State)?;
    let city = required(form.city.as_ref(), FormField::City)?;

    if form.languages.iter().any(|lang| !lang.is_well_formed()) {
        return Err(ValidationError::new(
            FormField::Languages,
            "languages contains an invalid selection",
        ));
    }
    if rules.require_language && form.languages.is_empty() {
        return Err(ValidationError::new(
            FormField::Languages,
            "select at least one language",
        ));
    }

    Ok(CreateCustomerRequest {
        full_name: form.full_name.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
        country_id: country.value.clone(),
        state_id: state.value.clone(),
        city_id: city.value.clone(),
        language_ids: form.languages.iter().map(|lang| lang.value.clone()).collect(),
        is_active: true,
    })
}

fn required(selection: Option<&OptionRef>, field: FormField) -> Result<&OptionRef, ValidationError> {
    match selection {
        Some(option) if option.is_well_formed() => Ok(option),
        _ => Err(ValidationError::new(field, format!("{field} is required"))),
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
