//! Contact model, the single persisted entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person's contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub status: Option<String>,
    /// Set only by a photo upload
    #[serde(default, skip_serializing_if = "is_blank")]
    pub photo_url: Option<String>,
}

/// Request body for creating a new contact.
///
/// `id` and `photoUrl` are not accepted here; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateContactRequest {
    /// Replace empty and whitespace-only values with `None`.
    pub fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            title: non_blank(self.title),
            address: non_blank(self.address),
            status: non_blank(self.status),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
