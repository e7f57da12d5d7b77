mod attempt;
mod learner;
mod level;
mod names;
mod role;
mod stage;

pub use attempt::QuizAttempt;
pub use learner::{Learner, LearnerError};
pub use level::SkillLevel;
pub use names::{ALL_ROLES, LearnerName, NameError, RoleName, SkillName};
pub use role::{RoleError, RoleExpectation};
pub use stage::{ProgressStage, StepStatus};
