use std::sync::{Arc, Mutex};

use gap_core::model::{Learner, QuizAttempt, RoleExpectation};
use gap_core::quiz::QuizBank;
use indexmap::IndexMap;
use thiserror::Error;

use crate::dataset::{Dataset, check_roster};

/// Errors surfaced by the dataset loader and repositories.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("learner not found: {0}")]
    LearnerNotFound(String),

    #[error("role not found: {0}")]
    RoleNotFound(String),

    #[error("learner `{learner}` is assigned unknown role `{role}`")]
    UnknownRole { learner: String, role: String },

    #[error("learner `{0}` is listed more than once")]
    DuplicateLearner(String),

    #[error("role `{0}` is declared more than once")]
    DuplicateRole(String),

    #[error("role `{0}` has no expected skills")]
    EmptyRole(String),

    #[error("quiz for skill `{0}` is declared more than once")]
    DuplicateQuiz(String),

    #[error(transparent)]
    Invalid(#[from] gap_core::Error),

    #[error("dataset parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("lock poisoned: {0}")]
    Lock(String),
}

/// Read-only access to the role expectation matrix.
pub trait ExpectationRepository: Send + Sync {
    /// Fetch the expectation for `role`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::RoleNotFound` if the role is not configured.
    fn get_role(&self, role: &str) -> Result<RoleExpectation, StorageError>;

    /// All roles in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn list_roles(&self) -> Result<Vec<RoleExpectation>, StorageError>;
}

/// Roster of learners; order is the order they were loaded in.
pub trait LearnerRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::LearnerNotFound` if no learner has that name.
    fn get_learner(&self, name: &str) -> Result<Learner, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn list_learners(&self) -> Result<Vec<Learner>, StorageError>;

    /// Replace the stored profile of an existing learner.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::LearnerNotFound` for unknown learners and
    /// `StorageError::UnknownRole` if the profile names a role that does not exist.
    fn update_learner(&self, learner: &Learner) -> Result<(), StorageError>;
}

/// Append-only log of quiz attempts for the running session.
pub trait AttemptRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the attempt cannot be recorded.
    fn record_attempt(&self, attempt: &QuizAttempt) -> Result<(), StorageError>;

    /// Attempts by `learner`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the log cannot be read.
    fn attempts_for(&self, learner: &str) -> Result<Vec<QuizAttempt>, StorageError>;
}

/// Process-local repository built once from a [`Dataset`].
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    roles: Arc<IndexMap<String, RoleExpectation>>,
    learners: Arc<Mutex<Vec<Learner>>>,
    attempts: Arc<Mutex<Vec<QuizAttempt>>>,
}

impl InMemoryRepository {
    /// Builds a repository from roles and learners, enforcing the same roster
    /// rules as dataset loading.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::EmptyRole`, `DuplicateRole`, `UnknownRole` or
    /// `DuplicateLearner` when the roster is inconsistent.
    pub fn new(roles: Vec<RoleExpectation>, learners: Vec<Learner>) -> Result<Self, StorageError> {
        check_roster(&roles, &learners)?;
        Ok(Self::from_checked(roles, learners))
    }

    fn from_checked(roles: Vec<RoleExpectation>, learners: Vec<Learner>) -> Self {
        let roles = roles
            .into_iter()
            .map(|role| (role.role().to_string(), role))
            .collect();
        Self {
            roles: Arc::new(roles),
            learners: Arc::new(Mutex::new(learners)),
            attempts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ExpectationRepository for InMemoryRepository {
    fn get_role(&self, role: &str) -> Result<RoleExpectation, StorageError> {
        self.roles
            .get(role)
            .cloned()
            .ok_or_else(|| StorageError::RoleNotFound(role.to_owned()))
    }

    fn list_roles(&self) -> Result<Vec<RoleExpectation>, StorageError> {
        Ok(self.roles.values().cloned().collect())
    }
}

impl LearnerRepository for InMemoryRepository {
    fn get_learner(&self, name: &str) -> Result<Learner, StorageError> {
        let guard = self
            .learners
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        guard
            .iter()
            .find(|l| l.name().as_str() == name)
            .cloned()
            .ok_or_else(|| StorageError::LearnerNotFound(name.to_owned()))
    }

    fn list_learners(&self) -> Result<Vec<Learner>, StorageError> {
        let guard = self
            .learners
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }

    fn update_learner(&self, learner: &Learner) -> Result<(), StorageError> {
        if !self.roles.contains_key(learner.role().as_str()) {
            return Err(StorageError::UnknownRole {
                learner: learner.name().to_string(),
                role: learner.role().to_string(),
            });
        }
        let mut guard = self
            .learners
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        let slot = guard
            .iter_mut()
            .find(|l| l.name() == learner.name())
            .ok_or_else(|| StorageError::LearnerNotFound(learner.name().to_string()))?;
        *slot = learner.clone();
        Ok(())
    }
}

impl AttemptRepository for InMemoryRepository {
    fn record_attempt(&self, attempt: &QuizAttempt) -> Result<(), StorageError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        guard.push(attempt.clone());
        Ok(())
    }

    fn attempts_for(&self, learner: &str) -> Result<Vec<QuizAttempt>, StorageError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|e| StorageError::Lock(e.to_string()))?;
        Ok(guard
            .iter()
            .filter(|a| a.learner.as_str() == learner)
            .cloned()
            .collect())
    }
}

/// Repositories behind trait objects plus the quiz bank, built once at startup.
#[derive(Clone)]
pub struct Storage {
    pub roles: Arc<dyn ExpectationRepository>,
    pub learners: Arc<dyn LearnerRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
    pub quizzes: Arc<QuizBank>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(dataset: Dataset) -> Self {
        let (roles, learners, quizzes) = dataset.into_parts();
        let repo = InMemoryRepository::from_checked(roles, learners);
        let roles: Arc<dyn ExpectationRepository> = Arc::new(repo.clone());
        let learners: Arc<dyn LearnerRepository> = Arc::new(repo.clone());
        let attempts: Arc<dyn AttemptRepository> = Arc::new(repo);
        Self {
            roles,
            learners,
            attempts,
            quizzes: Arc::new(quizzes),
        }
    }

    /// Storage seeded with the built-in sample roster.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the sample fails validation.
    pub fn sample() -> Result<Self, StorageError> {
        Ok(Self::in_memory(Dataset::sample()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gap_core::model::{LearnerName, RoleName, SkillLevel, SkillName};
    use gap_core::quiz::QuizScore;
    use gap_core::time::fixed_now;

    fn repo() -> InMemoryRepository {
        let dataset = Dataset::sample().unwrap();
        InMemoryRepository::new(dataset.roles().to_vec(), dataset.learners().to_vec()).unwrap()
    }

    #[test]
    fn lists_in_load_order() {
        let repo = repo();
        let roles: Vec<String> = repo
            .list_roles()
            .unwrap()
            .iter()
            .map(|r| r.role().to_string())
            .collect();
        assert_eq!(roles, ["Data Engineer", "Data Analyst", "ML Engineer"]);

        let names: Vec<String> = repo
            .list_learners()
            .unwrap()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names.first().map(String::as_str), Some("Keerthika"));
        assert_eq!(names.last().map(String::as_str), Some("Karan"));
    }

    #[test]
    fn lookups_report_missing_records() {
        let repo = repo();
        assert!(matches!(
            repo.get_role("Designer"),
            Err(StorageError::RoleNotFound(r)) if r == "Designer"
        ));
        assert!(matches!(
            repo.get_learner("Nobody"),
            Err(StorageError::LearnerNotFound(n)) if n == "Nobody"
        ));
    }

    #[test]
    fn update_replaces_profile_in_place() {
        let repo = repo();
        let mut priya = repo.get_learner("Priya").unwrap();
        priya.raise(&SkillName::new("SQL").unwrap());
        repo.update_learner(&priya).unwrap();

        assert_eq!(
            repo.get_learner("Priya").unwrap().level_of("SQL"),
            SkillLevel::new(4)
        );
        let names: Vec<String> = repo
            .list_learners()
            .unwrap()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names[2], "Priya");
    }

    #[test]
    fn update_rejects_unknown_learner_or_role() {
        let repo = repo();
        let stranger = Learner::new(
            LearnerName::new("Stranger").unwrap(),
            RoleName::new("Data Analyst").unwrap(),
            [],
        )
        .unwrap();
        assert!(matches!(
            repo.update_learner(&stranger),
            Err(StorageError::LearnerNotFound(_))
        ));

        let moved = Learner::new(
            LearnerName::new("Arjun").unwrap(),
            RoleName::new("Designer").unwrap(),
            [],
        )
        .unwrap();
        assert!(matches!(
            repo.update_learner(&moved),
            Err(StorageError::UnknownRole { .. })
        ));
    }

    #[test]
    fn attempts_filter_by_learner() {
        let repo = repo();
        let attempt = |name: &str| QuizAttempt {
            learner: LearnerName::new(name).unwrap(),
            skill: SkillName::new("SQL").unwrap(),
            score: QuizScore { correct: 1, total: 2, passed: true },
            level_before: SkillLevel::new(3),
            level_after: SkillLevel::new(4),
            attempted_at: fixed_now(),
        };
        repo.record_attempt(&attempt("Priya")).unwrap();
        repo.record_attempt(&attempt("Riya")).unwrap();
        repo.record_attempt(&attempt("Priya")).unwrap();

        assert_eq!(repo.attempts_for("Priya").unwrap().len(), 2);
        assert_eq!(repo.attempts_for("Riya").unwrap().len(), 1);
        assert!(repo.attempts_for("Karan").unwrap().is_empty());
    }

    #[test]
    fn storage_shares_one_roster() {
        let storage = Storage::sample().unwrap();
        let mut karan = storage.learners.get_learner("Karan").unwrap();
        karan.raise(&SkillName::new("ML").unwrap());
        storage.learners.update_learner(&karan).unwrap();

        let clone = storage.clone();
        assert_eq!(
            clone.learners.get_learner("Karan").unwrap().level_of("ML"),
            SkillLevel::new(3)
        );
    }

    #[test]
    fn new_rejects_learner_on_undeclared_role() {
        let dataset = Dataset::sample().unwrap();
        let mut learners = dataset.learners().to_vec();
        learners.push(
            Learner::new(
                LearnerName::new("Meera").unwrap(),
                RoleName::new("Designer").unwrap(),
                [(SkillName::new("Figma").unwrap(), SkillLevel::new(2))],
            )
            .unwrap(),
        );

        let err = InMemoryRepository::new(dataset.roles().to_vec(), learners)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            StorageError::UnknownRole { ref learner, ref role }
                if learner == "Meera" && role == "Designer"
        ));
    }

    #[test]
    fn new_rejects_duplicate_learner_names() {
        let dataset = Dataset::sample().unwrap();
        let mut learners = dataset.learners().to_vec();
        learners.push(dataset.learners()[1].clone());

        let err = InMemoryRepository::new(dataset.roles().to_vec(), learners)
            .err()
            .unwrap();
        assert!(matches!(err, StorageError::DuplicateLearner(name) if name == "Arjun"));
    }

    #[test]
    fn new_rejects_repeated_role() {
        let dataset = Dataset::sample().unwrap();
        let mut roles = dataset.roles().to_vec();
        roles.push(dataset.roles()[0].clone());

        let err = InMemoryRepository::new(roles, dataset.learners().to_vec())
            .err()
            .unwrap();
        assert!(matches!(err, StorageError::DuplicateRole(role) if role == "Data Engineer"));
    }
}
