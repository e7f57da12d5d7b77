//! Admin roster: one summary row per learner plus the CSV export.

use std::convert::Infallible;
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;

use gap_core::gap;
use gap_core::model::{ALL_ROLES, Learner, LearnerName, RoleName, SkillName};
use storage::repository::{ExpectationRepository, LearnerRepository};
use storage::StorageError;

use crate::error::DashboardError;

pub const CSV_HEADER: &str = "Name,Role,Skill Gaps,Progress";

/// Which learners a roster report includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    /// Exact, case-sensitive role match.
    Role(String),
}

impl RoleFilter {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == ALL_ROLES {
            Self::All
        } else {
            Self::Role(trimmed.to_owned())
        }
    }

    #[must_use]
    pub fn matches(&self, role: &RoleName) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Role(wanted) => role.as_str() == wanted,
        }
    }
}

impl FromStr for RoleFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// One learner's line in the admin report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub name: LearnerName,
    pub role: RoleName,
    pub gaps: Vec<SkillName>,
    pub percent: u8,
}

impl RosterRow {
    /// Gap skills joined with `", "`, or `None`.
    #[must_use]
    pub fn gap_summary(&self) -> String {
        if self.gaps.is_empty() {
            return "None".to_owned();
        }
        self.gaps
            .iter()
            .map(SkillName::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn progress(&self) -> String {
        format!("{}%", self.percent)
    }

    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.gaps.is_empty() {
            "Completed"
        } else {
            "In Progress"
        }
    }
}

/// Summarise `learners` in input order, keeping those `filter` accepts.
///
/// # Errors
///
/// Returns `StorageError::RoleNotFound` if a kept learner's role is missing
/// from `roles`.
pub fn build_roster_report(
    learners: &[Learner],
    roles: &dyn ExpectationRepository,
    filter: &RoleFilter,
) -> Result<Vec<RosterRow>, StorageError> {
    learners
        .iter()
        .filter(|learner| filter.matches(learner.role()))
        .map(|learner| -> Result<RosterRow, StorageError> {
            let expectation = roles.get_role(learner.role().as_str())?;
            let assessment = gap::assess(learner, &expectation);
            Ok(RosterRow {
                name: learner.name().clone(),
                role: learner.role().clone(),
                gaps: assessment.gaps.skills().cloned().collect(),
                percent: assessment.percent,
            })
        })
        .collect()
}

/// Render rows as CSV with a header line.
#[must_use]
pub fn export_csv(rows: &[RosterRow]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + rows.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            csv_field(row.name.as_str()),
            csv_field(row.role.as_str()),
            csv_field(&row.gap_summary()),
            csv_field(&row.progress()),
        );
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Admin view over the live roster.
#[derive(Clone)]
pub struct RosterService {
    roles: Arc<dyn ExpectationRepository>,
    learners: Arc<dyn LearnerRepository>,
}

impl RosterService {
    #[must_use]
    pub fn new(
        roles: Arc<dyn ExpectationRepository>,
        learners: Arc<dyn LearnerRepository>,
    ) -> Self {
        Self { roles, learners }
    }

    /// Build the report for the current roster state.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if repositories cannot be read.
    pub fn report(&self, filter: &RoleFilter) -> Result<Vec<RosterRow>, DashboardError> {
        let learners = self.learners.list_learners()?;
        let rows = build_roster_report(&learners, self.roles.as_ref(), filter)?;
        tracing::debug!(?filter, rows = rows.len(), "built roster report");
        Ok(rows)
    }

    /// Report rendered as CSV.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Storage` if repositories cannot be read.
    pub fn export_csv(&self, filter: &RoleFilter) -> Result<String, DashboardError> {
        Ok(export_csv(&self.report(filter)?))
    }
}
