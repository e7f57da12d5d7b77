use std::sync::Arc;

use gap_core::gap::apply_quiz_result;
use gap_core::model::{QuizAttempt, SkillName};
use gap_core::quiz::{QuizBank, QuizPolicy, QuizQuestion, QuizScore};
use storage::repository::{AttemptRepository, LearnerRepository};

use crate::error::QuizServiceError;
use crate::Clock;

/// Grades quizzes, applies passes to the roster and keeps the attempt log.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    policy: QuizPolicy,
    bank: Arc<QuizBank>,
    learners: Arc<dyn LearnerRepository>,
    attempts: Arc<dyn AttemptRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        bank: Arc<QuizBank>,
        learners: Arc<dyn LearnerRepository>,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            clock,
            policy: QuizPolicy::default(),
            bank,
            learners,
            attempts,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: QuizPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> QuizPolicy {
        self.policy
    }

    /// Questions for `skill`, if the bank has a quiz for it.
    #[must_use]
    pub fn questions(&self, skill: &str) -> Option<&[QuizQuestion]> {
        self.bank.questions(skill)
    }

    /// Grade `answers` for `skill` and apply the outcome to `learner`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` for a missing quiz or malformed answers,
    /// and `QuizServiceError::Storage` if the learner does not exist.
    pub fn submit(
        &self,
        learner: &str,
        skill: &str,
        answers: &[usize],
    ) -> Result<QuizAttempt, QuizServiceError> {
        let skill = SkillName::new(skill)?;
        let score = self.bank.grade(&skill, answers, self.policy)?;
        self.record(learner, skill, score)
    }

    /// Apply an already-decided pass/fail for `skill`, bypassing the bank.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the learner does not exist.
    pub fn record_result(
        &self,
        learner: &str,
        skill: &str,
        passed: bool,
    ) -> Result<QuizAttempt, QuizServiceError> {
        let skill = SkillName::new(skill)?;
        let score = QuizScore {
            correct: u32::from(passed),
            total: 1,
            passed,
        };
        self.record(learner, skill, score)
    }

    /// Attempts made by `learner` this session, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the log cannot be read.
    pub fn history(&self, learner: &str) -> Result<Vec<QuizAttempt>, QuizServiceError> {
        Ok(self.attempts.attempts_for(learner)?)
    }

    fn record(
        &self,
        learner: &str,
        skill: SkillName,
        score: QuizScore,
    ) -> Result<QuizAttempt, QuizServiceError> {
        let mut profile = self.learners.get_learner(learner)?;
        let level_before = profile.level_of(skill.as_str());
        let level_after = apply_quiz_result(&mut profile, &skill, score.passed);
        if score.passed {
            self.learners.update_learner(&profile)?;
        }

        let attempt = QuizAttempt {
            learner: profile.name().clone(),
            skill,
            score,
            level_before,
            level_after,
            attempted_at: self.clock.now(),
        };
        self.attempts.record_attempt(&attempt)?;

        tracing::info!(
            learner = %attempt.learner,
            skill = %attempt.skill,
            correct = score.correct,
            total = score.total,
            passed = score.passed,
            level = %level_after,
            "quiz submitted"
        );
        Ok(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gap_core::model::SkillLevel;
    use gap_core::quiz::QuizError;
    use gap_core::time::fixed_now;
    use storage::{Storage, StorageError};

    fn setup() -> (Storage, QuizService) {
        let storage = Storage::sample().unwrap();
        let service = QuizService::new(
            Clock::fixed(fixed_now()),
            Arc::clone(&storage.quizzes),
            Arc::clone(&storage.learners),
            Arc::clone(&storage.attempts),
        );
        (storage, service)
    }

    #[test]
    fn pass_raises_level_and_logs_attempt() {
        let (storage, quiz) = setup();
        let attempt = quiz.submit("Keerthika", "Python", &[0, 2]).unwrap();

        assert!(attempt.passed());
        assert_eq!(attempt.score.correct, 2);
        assert_eq!(attempt.level_before, SkillLevel::new(3));
        assert_eq!(attempt.level_after, SkillLevel::new(4));
        assert_eq!(attempt.attempted_at, fixed_now());
        assert_eq!(
            storage.learners.get_learner("Keerthika").unwrap().level_of("Python"),
            SkillLevel::new(4)
        );
        assert_eq!(quiz.history("Keerthika").unwrap(), vec![attempt]);
    }

    #[test]
    fn fail_leaves_roster_untouched() {
        let (storage, quiz) = setup();
        let before = storage.learners.get_learner("Riya").unwrap();
        for _ in 0..3 {
            let attempt = quiz.submit("Riya", "SQL", &[0, 1]).unwrap();
            assert!(!attempt.passed());
            assert!(!attempt.raised_level());
        }
        assert_eq!(storage.learners.get_learner("Riya").unwrap(), before);
        assert_eq!(quiz.history("Riya").unwrap().len(), 3);
    }

    #[test]
    fn stricter_policy_is_honoured() {
        let (storage, quiz) = setup();
        let quiz = quiz.with_policy(QuizPolicy::new(2));
        let attempt = quiz.submit("Priya", "Cloud", &[0, 1]).unwrap();
        assert!(!attempt.passed());
        assert_eq!(
            storage.learners.get_learner("Priya").unwrap().level_of("Cloud"),
            SkillLevel::new(3)
        );
    }

    #[test]
    fn decided_result_creates_missing_skill() {
        let (storage, quiz) = setup();
        let attempt = quiz.record_result("Arjun", "ETL", true).unwrap();
        assert_eq!(attempt.level_before, SkillLevel::ZERO);
        assert_eq!(attempt.level_after, SkillLevel::new(1));
        assert_eq!(
            storage.learners.get_learner("Arjun").unwrap().level_of("ETL"),
            SkillLevel::new(1)
        );
    }

    #[test]
    fn errors_are_surfaced() {
        let (_, quiz) = setup();
        assert!(matches!(
            quiz.submit("Karan", "ML", &[0, 0]),
            Err(QuizServiceError::Quiz(QuizError::NoQuiz(_)))
        ));
        assert!(matches!(
            quiz.submit("Nobody", "SQL", &[1, 0]),
            Err(QuizServiceError::Storage(StorageError::LearnerNotFound(_)))
        ));
        assert!(matches!(
            quiz.submit("Karan", "SQL", &[1]),
            Err(QuizServiceError::Quiz(QuizError::AnswerCount { .. }))
        ));
    }
}
