use serde::{Deserialize, Serialize};
use std::fmt;

//
// ─── PROGRESS STAGE ───────────────────────────────────────────────────────────
//

/// Ordered workflow stages a learner moves through.
///
/// Only `RecommendationsGenerated` and `LearningInProgress` are produced by
/// the gap engine today; the earlier stages exist for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProgressStage {
    ProfileLoaded,
    AssessmentPending,
    AssessmentCompleted,
    /// Gaps were found and a learning path exists.
    RecommendationsGenerated,
    /// No gaps remain against the role expectation.
    LearningInProgress,
}

impl ProgressStage {
    pub const ALL: [ProgressStage; 5] = [
        ProgressStage::ProfileLoaded,
        ProgressStage::AssessmentPending,
        ProgressStage::AssessmentCompleted,
        ProgressStage::RecommendationsGenerated,
        ProgressStage::LearningInProgress,
    ];

    /// Zero-based position in the workflow.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            ProgressStage::ProfileLoaded => 0,
            ProgressStage::AssessmentPending => 1,
            ProgressStage::AssessmentCompleted => 2,
            ProgressStage::RecommendationsGenerated => 3,
            ProgressStage::LearningInProgress => 4,
        }
    }

    #[must_use]
    pub fn from_ordinal(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ProgressStage::ProfileLoaded => "Profile Loaded",
            ProgressStage::AssessmentPending => "Assessment Pending",
            ProgressStage::AssessmentCompleted => "Assessment Completed",
            ProgressStage::RecommendationsGenerated => "Recommendations Generated",
            ProgressStage::LearningInProgress => "Learning In Progress",
        }
    }

    /// Every stage paired with its status relative to `self`.
    #[must_use]
    pub fn checklist(self) -> Vec<(ProgressStage, StepStatus)> {
        Self::ALL
            .iter()
            .map(|&step| (step, StepStatus::of(step, self)))
            .collect()
    }
}

impl fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── STEP STATUS ──────────────────────────────────────────────────────────────
//

/// How a single workflow step relates to the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    Done,
    Current,
    Pending,
}

impl StepStatus {
    #[must_use]
    pub fn of(step: ProgressStage, current: ProgressStage) -> Self {
        match step.cmp(&current) {
            std::cmp::Ordering::Less => StepStatus::Done,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_workflow_order() {
        for (i, stage) in ProgressStage::ALL.iter().enumerate() {
            assert_eq!(usize::from(stage.ordinal()), i);
            assert_eq!(ProgressStage::from_ordinal(stage.ordinal()), Some(*stage));
        }
        assert_eq!(ProgressStage::from_ordinal(5), None);
    }

    #[test]
    fn checklist_marks_done_current_pending() {
        let steps = ProgressStage::RecommendationsGenerated.checklist();
        let statuses: Vec<StepStatus> = steps.iter().map(|(_, s)| *s).collect();
        assert_eq!(
            statuses,
            [
                StepStatus::Done,
                StepStatus::Done,
                StepStatus::Done,
                StepStatus::Current,
                StepStatus::Pending,
            ]
        );
    }
}
