//! Most of the structs in `web` module and their implementations live here.
//! Includes structs that need to be validated, their parsing implementations and tests for those

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use unicode_segmentation::UnicodeSegmentation;
use validator::ValidateEmail;

use crate::database::SignupOutcome;

// ###################################
// ->   REQUESTS
// ###################################
/// Body of a signup, both the HTML form and the JSON API.
/// The email may be missing or empty, validation happens in `ValidEmail::parse`.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /api/send-welcome-email`.
#[derive(Debug, Default, Deserialize)]
pub struct WelcomeRequest {
    #[serde(default)]
    pub email: Option<String>,
}

impl WelcomeRequest {
    /// The recipient exactly as posted, if present and not empty.
    pub fn recipient(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

// ###################################
// ->   EMAIL
// ###################################
/// Validated Email
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DataParsingError::EmailMissing);
        }

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::EmailTooLong);
        }

        if value.validate_email() {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

// ###################################
// ->   PAGE
// ###################################
/// Which UI the landing page shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageState {
    #[default]
    Form,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// A transient notification shown on top of the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn new(title: &str, description: impl Into<String>, variant: NoticeVariant) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant,
        }
    }

    pub fn email_missing() -> Self {
        Self::new(
            "Please enter your email",
            "We need your email to add you to the waitlist.",
            NoticeVariant::Destructive,
        )
    }

    pub fn email_invalid() -> Self {
        Self::new(
            "Please enter a valid email",
            "That doesn't look like an email address.",
            NoticeVariant::Destructive,
        )
    }

    pub fn added(product_name: &str) -> Self {
        Self::new(
            "You're on the list!",
            format!("We'll notify you when {product_name} launches."),
            NoticeVariant::Default,
        )
    }

    pub fn already_listed() -> Self {
        Self::new(
            "Already on the list!",
            "You're already on our waitlist.",
            NoticeVariant::Default,
        )
    }

    pub fn failure() -> Self {
        Self::new(
            "Something went wrong",
            "Please try again later.",
            NoticeVariant::Destructive,
        )
    }

    /// The notice and next page state for a finished insert.
    pub fn for_outcome(outcome: SignupOutcome, product_name: &str) -> (Self, PageState) {
        match outcome {
            SignupOutcome::Added => (Self::added(product_name), PageState::Submitted),
            SignupOutcome::AlreadyListed => (Self::already_listed(), PageState::Form),
        }
    }

    /// The notice for an email that failed validation.
    pub fn for_parsing_error(error: &DataParsingError) -> Self {
        match error {
            DataParsingError::EmailMissing => Self::email_missing(),
            DataParsingError::EmailInvalid | DataParsingError::EmailTooLong => {
                Self::email_invalid()
            }
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email missing")]
    EmailMissing,
    #[error("email invalid")]
    EmailInvalid,
    #[error("email too long")]
    EmailTooLong,
}
