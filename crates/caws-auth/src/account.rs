use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountMetadata {
    /// Whether a session can be created without user interaction.
    #[serde(default)]
    pub can_auto_connect: bool,
}

/// A saved login, as listed by an [`crate::AuthProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub metadata: AccountMetadata,
}

impl Account {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, can_auto_connect: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            metadata: AccountMetadata { can_auto_connect },
        }
    }
}

/// Credentials produced by a successful session creation.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub access_token: String,
    pub account: Account,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("access_token", &"<redacted>")
            .field("account", &self.account)
            .finish()
    }
}
