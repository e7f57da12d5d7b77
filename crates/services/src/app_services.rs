use std::path::Path;
use std::sync::Arc;

use gap_core::quiz::QuizPolicy;
use storage::{Dataset, Storage};

use crate::dashboard::DashboardService;
use crate::error::AppServicesError;
use crate::quiz_service::QuizService;
use crate::roster::RosterService;
use crate::Clock;

/// Assembles app-facing services over one shared in-memory roster.
#[derive(Clone)]
pub struct AppServices {
    dashboard: Arc<DashboardService>,
    quiz: Arc<QuizService>,
    roster: Arc<RosterService>,
}

impl AppServices {
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, policy: QuizPolicy) -> Self {
        let dashboard = Arc::new(DashboardService::new(
            Arc::clone(&storage.roles),
            Arc::clone(&storage.learners),
        ));
        let quiz = Arc::new(
            QuizService::new(
                clock,
                Arc::clone(&storage.quizzes),
                Arc::clone(&storage.learners),
                Arc::clone(&storage.attempts),
            )
            .with_policy(policy),
        );
        let roster = Arc::new(RosterService::new(
            Arc::clone(&storage.roles),
            Arc::clone(&storage.learners),
        ));
        Self {
            dashboard,
            quiz,
            roster,
        }
    }

    /// Build services from a dataset file, or the built-in sample when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Storage` if the dataset cannot be read or validated.
    pub fn load(
        path: Option<&Path>,
        clock: Clock,
        policy: QuizPolicy,
    ) -> Result<Self, AppServicesError> {
        let dataset = match path {
            Some(path) => Dataset::load(path)?,
            None => {
                tracing::info!("using built-in sample dataset");
                Dataset::sample()?
            }
        };
        Ok(Self::from_storage(&Storage::in_memory(dataset), clock, policy))
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn roster(&self) -> Arc<RosterService> {
        Arc::clone(&self.roster)
    }
}
