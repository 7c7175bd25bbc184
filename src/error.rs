use std::path::PathBuf;
use thiserror::Error;

use crate::task::TaskId;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("task id mismatch: target {target}, body {body}")]
    IdMismatch { target: TaskId, body: TaskId },
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("task id space exhausted")]
    IdSpaceExhausted,
}

pub type StoreResult<T> = Result<T, StoreError>;
