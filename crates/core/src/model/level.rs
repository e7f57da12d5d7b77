use serde::{Deserialize, Serialize};
use std::fmt;

/// Proficiency on a skill. Conventionally 0..=5; no ceiling is enforced.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SkillLevel(u32);

impl SkillLevel {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Next level up. Saturates instead of wrapping.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// How far `self` falls short of `expected`, or `None` when it meets it.
    #[must_use]
    pub fn deficit_to(self, expected: SkillLevel) -> Option<u32> {
        expected.0.checked_sub(self.0).filter(|d| *d > 0)
    }
}

impl From<u32> for SkillLevel {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deficit_is_positive_or_none() {
        assert_eq!(SkillLevel::new(3).deficit_to(SkillLevel::new(5)), Some(2));
        assert_eq!(SkillLevel::new(5).deficit_to(SkillLevel::new(5)), None);
        assert_eq!(SkillLevel::new(6).deficit_to(SkillLevel::new(5)), None);
    }

    #[test]
    fn increment_saturates() {
        assert_eq!(SkillLevel::new(4).incremented(), SkillLevel::new(5));
        assert_eq!(SkillLevel::new(u32::MAX).incremented().value(), u32::MAX);
    }
}
