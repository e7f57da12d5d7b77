use indexmap::IndexMap;
use thiserror::Error;

use crate::model::{LearnerName, RoleName, SkillLevel, SkillName};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LearnerError {
    #[error("skill `{skill}` recorded twice for learner `{learner}`")]
    DuplicateSkill {
        learner: LearnerName,
        skill: SkillName,
    },
}

/// A learner profile: assigned role plus current proficiency per skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Learner {
    name: LearnerName,
    role: RoleName,
    skills: IndexMap<SkillName, SkillLevel>,
}

impl Learner {
    /// Creates a learner from `(skill, level)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `LearnerError::DuplicateSkill` if a skill appears more than once.
    pub fn new(
        name: LearnerName,
        role: RoleName,
        skills: impl IntoIterator<Item = (SkillName, SkillLevel)>,
    ) -> Result<Self, LearnerError> {
        let mut levels = IndexMap::new();
        for (skill, level) in skills {
            if levels.contains_key(&skill) {
                return Err(LearnerError::DuplicateSkill {
                    learner: name,
                    skill,
                });
            }
            levels.insert(skill, level);
        }
        Ok(Self {
            name,
            role,
            skills: levels,
        })
    }

    #[must_use]
    pub fn name(&self) -> &LearnerName {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> &RoleName {
        &self.role
    }

    /// Current level for `skill`; unrecorded skills read as zero.
    #[must_use]
    pub fn level_of(&self, skill: &str) -> SkillLevel {
        self.skills.get(skill).copied().unwrap_or(SkillLevel::ZERO)
    }

    /// Recorded skills in insertion order.
    pub fn skills(&self) -> impl Iterator<Item = (&SkillName, SkillLevel)> {
        self.skills.iter().map(|(skill, level)| (skill, *level))
    }

    /// Raise `skill` by one level, recording it if it was absent.
    ///
    /// Returns the new level.
    pub fn raise(&mut self, skill: &SkillName) -> SkillLevel {
        let level = self.skills.entry(skill.clone()).or_insert(SkillLevel::ZERO);
        *level = level.incremented();
        *level
    }
}
