use chrono::{DateTime, Utc};

use crate::model::{LearnerName, SkillLevel, SkillName};
use crate::quiz::QuizScore;

/// One submitted quiz and its effect on the learner's level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    pub learner: LearnerName,
    pub skill: SkillName,
    pub score: QuizScore,
    pub level_before: SkillLevel,
    pub level_after: SkillLevel,
    pub attempted_at: DateTime<Utc>,
}

impl QuizAttempt {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.score.passed
    }

    #[must_use]
    pub fn raised_level(&self) -> bool {
        self.level_after > self.level_before
    }
}
