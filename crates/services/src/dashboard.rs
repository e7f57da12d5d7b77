use std::sync::Arc;

use gap_core::gap::{self, LearningStep, SkillGap};
use gap_core::model::{Learner, LearnerName, ProgressStage, RoleExpectation, RoleName, StepStatus};
use storage::repository::{ExpectationRepository, LearnerRepository};

use crate::error::DashboardError;

/// Everything the learner view renders, computed from one roster snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnerDashboard {
    pub learner: Learner,
    pub expectation: RoleExpectation,
    pub gaps: SkillGap,
    pub percent: u8,
    pub stage: ProgressStage,
    pub checklist: Vec<(ProgressStage, StepStatus)>,
    pub learning_path: Vec<LearningStep>,
}

impl LearnerDashboard {
    /// Derive the view for `learner` against its role expectation.
    #[must_use]
    pub fn build(learner: Learner, expectation: RoleExpectation) -> Self {
        let assessment = gap::assess(&learner, &expectation);
        let learning_path = gap::learning_path(&assessment.gaps, &expectation);
        Self {
            checklist: assessment.stage.checklist(),
            learner,
            expectation,
            gaps: assessment.gaps,
            percent: assessment.percent,
            stage: assessment.stage,
            learning_path,
        }
    }

    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Self-service learner view: login list and per-learner gap report.
#[derive(Clone)]
pub struct DashboardService {
    roles: Arc<dyn ExpectationRepository>,
    learners: Arc<dyn LearnerRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        roles: Arc<dyn ExpectationRepository>,
        learners: Arc<dyn LearnerRepository>,
    ) -> Self {
        Self { roles, learners }
    }

    /// Names to offer at login, in roster order.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if the roster cannot be read.
    pub fn learner_names(&self) -> Result<Vec<LearnerName>, DashboardError> {
        Ok(self
            .learners
            .list_learners()?
            .into_iter()
            .map(|l| l.name().clone())
            .collect())
    }

    /// Configured roles, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if the expectation store cannot be read.
    pub fn role_names(&self) -> Result<Vec<RoleName>, DashboardError> {
        Ok(self
            .roles
            .list_roles()?
            .into_iter()
            .map(|r| r.role().clone())
            .collect())
    }

    /// Compute the current dashboard for `name`.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if the learner or their role is missing.
    pub fn learner_view(&self, name: &str) -> Result<LearnerDashboard, DashboardError> {
        let learner = self.learners.get_learner(name)?;
        let expectation = self.roles.get_role(learner.role().as_str())?;
        let view = LearnerDashboard::build(learner, expectation);
        tracing::debug!(
            learner = name,
            gaps = view.gaps.len(),
            percent = view.percent,
            stage = %view.stage,
            "computed learner dashboard"
        );
        Ok(view)
    }
}
