use serde::{Deserialize, Serialize};

/// Error body returned by the directory service on non-2xx responses.
///
/// The service is not consistent about the key, so both `message` and
/// `error` are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|msg| msg.trim().to_string())
            .filter(|msg| !msg.is_empty())
    }
}
