use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{resource} {id} was not found")]
    NotFound { resource: &'static str, id: i32 },

    #[error("path id {path_id} does not match body id {body_id}")]
    IdMismatch { path_id: i32, body_id: i32 },

    #[error("cannot delete: product is referenced by one or more order line items")]
    Referenced { resource: &'static str, id: i32 },

    #[error("{resource} {id} was modified concurrently")]
    Conflict { resource: &'static str, id: i32 },

    #[error("{resource} {id} already exists")]
    AlreadyExists { resource: &'static str, id: i32 },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn id_mismatch(path_id: i32, body_id: i32) -> Self {
        Self::IdMismatch { path_id, body_id }
    }

    pub fn referenced(resource: &'static str, id: i32) -> Self {
        Self::Referenced { resource, id }
    }

    pub fn conflict(resource: &'static str, id: i32) -> Self {
        Self::Conflict { resource, id }
    }

    pub fn already_exists(resource: &'static str, id: i32) -> Self {
        Self::AlreadyExists { resource, id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}
