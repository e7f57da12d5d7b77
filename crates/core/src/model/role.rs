use indexmap::IndexMap;
use thiserror::Error;

use crate::model::{RoleName, SkillLevel, SkillName};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoleError {
    #[error("skill `{skill}` listed twice for role `{role}`")]
    DuplicateSkill { role: RoleName, skill: SkillName },
}

/// Target skill levels for one role (a row of the TSR matrix).
///
/// Skills keep the order they were declared in; gap reports and learning
/// paths follow that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleExpectation {
    role: RoleName,
    expected: IndexMap<SkillName, SkillLevel>,
}

impl RoleExpectation {
    /// Build an expectation row from `(skill, level)` pairs in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `RoleError::DuplicateSkill` if a skill appears more than once.
    pub fn new(
        role: RoleName,
        skills: impl IntoIterator<Item = (SkillName, SkillLevel)>,
    ) -> Result<Self, RoleError> {
        let mut expected = IndexMap::new();
        for (skill, level) in skills {
            if expected.contains_key(&skill) {
                return Err(RoleError::DuplicateSkill { role, skill });
            }
            expected.insert(skill, level);
        }
        Ok(Self { role, expected })
    }

    #[must_use]
    pub fn role(&self) -> &RoleName {
        &self.role
    }

    /// Expected level for `skill`, if the role tracks it.
    #[must_use]
    pub fn expected(&self, skill: &str) -> Option<SkillLevel> {
        self.expected.get(skill).copied()
    }

    #[must_use]
    pub fn contains(&self, skill: &str) -> bool {
        self.expected.contains_key(skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SkillName, SkillLevel)> {
        self.expected.iter().map(|(skill, level)| (skill, *level))
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillName> {
        self.expected.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str) -> SkillName {
        SkillName::new(name).unwrap()
    }

    #[test]
    fn keeps_declaration_order() {
        let role = RoleExpectation::new(
            RoleName::new("Data Analyst").unwrap(),
            [
                (skill("SQL"), SkillLevel::new(5)),
                (skill("Python"), SkillLevel::new(3)),
                (skill("Visualization"), SkillLevel::new(4)),
            ],
        )
        .unwrap();

        let order: Vec<&str> = role.skills().map(SkillName::as_str).collect();
        assert_eq!(order, ["SQL", "Python", "Visualization"]);
        assert_eq!(role.expected("Python"), Some(SkillLevel::new(3)));
        assert_eq!(role.expected("python"), None);
    }

    #[test]
    fn rejects_duplicate_skill() {
        let err = RoleExpectation::new(
            RoleName::new("ML Engineer").unwrap(),
            [
                (skill("ML"), SkillLevel::new(4)),
                (skill("ML"), SkillLevel::new(2)),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, RoleError::DuplicateSkill { skill, .. } if skill.as_str() == "ML"));
    }
}
