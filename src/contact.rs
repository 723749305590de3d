//! Contact form validation and submission messages.
//!
//! Every field is checked independently and all failures are reported
//! together, before anything is sent. Once validation passes, JavaScript posts
//! [`ContactForm::to_payload`] and reports back a [`SubmissionStatus`].

use serde::{Deserialize, Serialize};
use serde_json::json;

pub const MIN_NAME_CHARS: usize = 2;
pub const MAX_SUBJECT_CHARS: usize = 120;
pub const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl ContactForm {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().chars().count() < MIN_NAME_CHARS {
            errors.push(FieldError::new(Field::Name, "Please enter your name."));
        }
        if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new(Field::Email, "Please enter a valid email address."));
        }
        if self.subject.trim().chars().count() > MAX_SUBJECT_CHARS {
            errors.push(FieldError::new(
                Field::Subject,
                "Subject must be 120 characters or fewer.",
            ));
        }
        if self.message.trim().chars().count() < MIN_MESSAGE_CHARS {
            errors.push(FieldError::new(
                Field::Message,
                "Message must be at least 10 characters.",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// JSON body for the form endpoint, with surrounding whitespace trimmed.
    pub fn to_payload(&self) -> String {
        json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "subject": self.subject.trim(),
            "message": self.message.trim(),
        })
        .to_string()
    }
}

/// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len() && !domain.starts_with('.'),
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Sent,
    Failed,
}

impl SubmissionStatus {
    pub fn message(self) -> &'static str {
        match self {
            SubmissionStatus::Sent => "Thanks! Your message has been sent.",
            SubmissionStatus::Failed => {
                "Something went wrong sending your message. Please try again, or email me directly."
            }
        }
    }
}
