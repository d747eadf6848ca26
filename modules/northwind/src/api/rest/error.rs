use apikit::problem::{self, Problem};

use crate::domain::error::DomainError;

/// Map domain error to RFC 9457 Problem
pub fn domain_error_to_problem(e: &DomainError) -> Problem {
    match e {
        DomainError::NotFound { .. } => {
            problem::not_found(e.to_string()).with_code("NORTHWIND_NOT_FOUND")
        }
        DomainError::IdMismatch { .. } => {
            problem::bad_request(e.to_string()).with_code("NORTHWIND_ID_MISMATCH")
        }
        DomainError::Referenced { .. } => {
            problem::bad_request(e.to_string()).with_code("NORTHWIND_REFERENCED")
        }
        DomainError::Conflict { .. } => {
            problem::conflict(e.to_string()).with_code("NORTHWIND_CONFLICT")
        }
        DomainError::AlreadyExists { .. } => {
            problem::conflict(e.to_string()).with_code("NORTHWIND_ALREADY_EXISTS")
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            problem::internal_error("An error occurred while processing your request.")
                .with_code("NORTHWIND_INTERNAL")
        }
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e)
    }
}
