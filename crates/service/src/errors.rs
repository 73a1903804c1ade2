use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Constraint(msg) => Self::Constraint(msg),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}
