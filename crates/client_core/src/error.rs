//! Failure taxonomy for directory calls, form validation and table edits.

use shared::domain::CustomerId;
use thiserror::Error;

/// Any transport or HTTP failure talking to the directory service.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("invalid directory base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("directory base url '{0}' cannot carry path segments")]
    OpaqueBaseUrl(String),
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        source: reqwest::Error,
    },
    #[error("{operation} returned HTTP {status}{}", status_suffix(.message))]
    Status {
        operation: &'static str,
        status: u16,
        message: Option<String>,
    },
    #[error("{operation} returned a malformed body: {source}")]
    Decode {
        operation: &'static str,
        source: reqwest::Error,
    },
    #[error("{0}")]
    Unavailable(String),
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|msg| format!(": {msg}"))
        .unwrap_or_default()
}

impl DirectoryError {
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Transport { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(*operation),
            Self::InvalidBaseUrl { .. } | Self::OpaqueBaseUrl(_) | Self::Unavailable(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    FullName,
    Email,
    Password,
    Country,
    State,
    City,
    Languages,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Password => "password",
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Languages => "languages",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First rule violated by a registration form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: FormField,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("customer {0} is not in the loaded list")]
    UnknownCustomer(CustomerId),
    #[error("no row is being edited")]
    NotEditing,
    #[error("no customer is pending removal")]
    NoPendingRemoval,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
