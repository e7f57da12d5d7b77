use thiserror::Error;

use crate::model::{LearnerError, NameError, RoleError};
use crate::quiz::QuizError;

/// Any validation failure raised by the domain model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Role(#[from] RoleError),
    #[error(transparent)]
    Learner(#[from] LearnerError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
