//! Error types for the session core

use thiserror::Error;

use crate::tabs::TabError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("tab error: {0}")]
    Tab(#[from] TabError),
}
