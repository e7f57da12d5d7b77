#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard;
pub mod error;
pub mod quiz_service;
pub mod roster;

pub use gap_core::Clock;

pub use app_services::AppServices;
pub use dashboard::{DashboardService, LearnerDashboard};
pub use error::{AppServicesError, DashboardError, QuizServiceError};
pub use quiz_service::QuizService;
pub use roster::{RoleFilter, RosterRow, RosterService, build_roster_report, export_csv};
