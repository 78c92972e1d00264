use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(CustomerId);
id_newtype!(OptionId);

/// A selectable `{label, value}` pair served by the directory endpoints.
///
/// Directory endpoints sometimes return the raw model shape, so `name` and
/// `_id` are accepted as aliases on input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OptionRef {
    #[serde(alias = "name")]
    pub label: String,
    #[serde(alias = "_id", alias = "id")]
    pub value: OptionId,
}

impl OptionRef {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: OptionId::new(value),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        !self.label.trim().is_empty() && !self.value.as_str().trim().is_empty()
    }
}

/// Display reference embedded in a customer record (`{name}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: String,
}

impl NamedRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "_id")]
    pub id: CustomerId,
    #[serde(rename = "FullName")]
    pub full_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "CountryId", default)]
    pub country: NamedRef,
    #[serde(rename = "StateId", default)]
    pub state: NamedRef,
    #[serde(rename = "CityId", default)]
    pub city: NamedRef,
    #[serde(rename = "LanguageIds", default)]
    pub languages: Vec<NamedRef>,
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
    #[serde(rename = "CreatedDate", default)]
    pub created_date: String,
}

impl CustomerRecord {
    /// Returns a copy with every field present in `patch` replaced.
    pub fn merge(&self, patch: &CustomerPatch) -> Self {
        let mut merged = self.clone();
        if let Some(full_name) = &patch.full_name {
            merged.full_name = full_name.clone();
        }
        if let Some(email) = &patch.email {
            merged.email = email.clone();
        }
        if let Some(is_active) = patch.is_active {
            merged.is_active = is_active;
        }
        merged
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.created_date)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }

    pub fn language_names(&self) -> String {
        self.languages
            .iter()
            .map(|lang| lang.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Partial update for a customer. Only present fields go over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPatch {
    #[serde(rename = "FullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "isActive", default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.is_active.is_none()
    }
}
