use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved roster filter value meaning "every role".
pub const ALL_ROLES: &str = "All";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NameError {
    #[error("skill name cannot be empty")]
    EmptySkill,

    #[error("role name cannot be empty")]
    EmptyRole,

    #[error("role name `{0}` is reserved")]
    ReservedRole(String),

    #[error("learner name cannot be empty")]
    EmptyLearner,
}

fn trimmed(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Validated skill identifier (trimmed, non-empty, case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SkillName(String);

impl SkillName {
    /// Create a validated skill name.
    ///
    /// # Errors
    ///
    /// Returns `NameError::EmptySkill` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, NameError> {
        trimmed(value.into()).map(Self).ok_or(NameError::EmptySkill)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated role identifier.
///
/// `All` is rejected because the roster filter uses it as a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Create a validated role name.
    ///
    /// # Errors
    ///
    /// Returns `NameError::EmptyRole` if the name is empty after trimming, or
    /// `NameError::ReservedRole` for the roster wildcard.
    pub fn new(value: impl Into<String>) -> Result<Self, NameError> {
        let name = trimmed(value.into()).ok_or(NameError::EmptyRole)?;
        if name == ALL_ROLES {
            return Err(NameError::ReservedRole(name));
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Learner display name; unique within a roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LearnerName(String);

impl LearnerName {
    /// Create a validated learner name.
    ///
    /// # Errors
    ///
    /// Returns `NameError::EmptyLearner` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, NameError> {
        trimmed(value.into()).map(Self).ok_or(NameError::EmptyLearner)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ─── Conversions ───────────────────────────────────────────────────────────────

macro_rules! name_conversions {
    ($($ty:ident),+) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.pad(&self.0)
                }
            }

            impl TryFrom<String> for $ty {
                type Error = NameError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl std::borrow::Borrow<str> for $ty {
                fn borrow(&self) -> &str {
                    &self.0
                }
            }
        )+
    };
}

name_conversions!(SkillName, RoleName, LearnerName);
