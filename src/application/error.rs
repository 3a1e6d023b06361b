use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User already exists: {0}")]
    DuplicateUser(String),

    #[error("Script error on line {line}: {message}")]
    Import { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_not_found(id: impl ToString) -> Self {
        AppError::UserNotFound(id.to_string())
    }
}
