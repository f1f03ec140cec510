//! Domain types for the promotion registry.
//!
//! The record's `name` is never written to disk — it is the registry key and
//! the file stem. Every body field carries a serde default so a hand-edited
//! file (admins do edit these) parses even when mostly empty.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a promotion entry in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromotionName(pub String);

impl PromotionName {
    /// Validating constructor — rejects the empty string.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromotionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PromotionName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PromotionName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Promotion record
// ---------------------------------------------------------------------------

/// A named promotion: the permission groups and nodes granted to a subject
/// when the promotion is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    /// Registry key and file stem — never serialized into the file body.
    #[serde(skip)]
    name: PromotionName,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Permission groups the subject is added to, in ladder order.
    #[serde(default)]
    pub groups: Vec<String>,

    /// Individual permission nodes granted alongside the groups.
    #[serde(default)]
    pub permissions: Vec<String>,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// A fresh, empty promotion stamped with the current time.
    pub fn new(name: PromotionName) -> Self {
        let now = Utc::now();
        Self {
            name,
            description: None,
            groups: vec![],
            permissions: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(&self) -> &PromotionName {
        &self.name
    }

    /// Only the registry renames a record — the map key must track it.
    pub(crate) fn set_name(&mut self, name: PromotionName) {
        self.name = name;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
