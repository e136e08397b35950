//! The module contains the error the engine can throw.
//!
//! The pure calculator and planner never fail; these errors come from the
//! write path and the database:
//!
//! - [`KeyNotFound`] thrown when a member or expense does not exist.
//! - [`InvalidSplit`] thrown when splits do not match their expense.
//! - [`MemberInUse`] thrown when deleting a member that still has activity.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidSplit`]: EngineError::InvalidSplit
//!  [`MemberInUse`]: EngineError::MemberInUse
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("Member in use: {0}")]
    MemberInUse(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidSplit(a), Self::InvalidSplit(b)) => a == b,
            (Self::MemberInUse(a), Self::MemberInUse(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
