//! Error types for the `domain` layer.
use entity_api::error::{EntityApiErrorKind, Error as EntityApiError};
use sea_orm::DbErr;
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure with
/// `domain::error::Error` as the root type holding an `error_kind` tree that
/// represents the kinds of errors that can occur in this layer or in lower
/// layers. The `source` field holds the original error that caused the domain
/// error. The intent is to translate errors between layers while maintaining
/// layer boundaries: `domain` depends on `entity_api`, and `web` depends on
/// `domain`, but `web` never depends directly on `entity_api`. Ultimately the
/// various `error_kind`s are used by `web` to return appropriate HTTP status
/// codes to the client.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Entity(EntityErrorKind),
    Other(String),
}

/// Enum representing the kinds of entity errors that can bubble up from the
/// "Entity" layer (`entity_api` and `entity`). These are translated from the
/// `entity_api` layer and reduced to the subset relevant at this layer.
#[derive(Debug, PartialEq)]
pub enum EntityErrorKind {
    NotFound,
    Conflict,
    Invalid,
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// Database errors that reach this layer directly (e.g. from beginning or
// committing a transaction) funnel through the `entity_api` taxonomy first.
impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        EntityApiError::from(err).into()
    }
}

// This is where we translate errors from the `entity_api` layer to the `domain` layer.
impl From<EntityApiError> for Error {
    fn from(err: EntityApiError) -> Self {
        let entity_error_kind = match err.error_kind {
            EntityApiErrorKind::RecordNotFound => EntityErrorKind::NotFound,
            EntityApiErrorKind::UniqueViolation => EntityErrorKind::Conflict,
            EntityApiErrorKind::InvalidQueryTerm => EntityErrorKind::Invalid,
            _ => EntityErrorKind::Other("EntityErrorKind".to_string()),
        };

        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_translates_to_not_found() {
        let entity_error = EntityApiError {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        };
        let error: Error = entity_error.into();
        assert_eq!(
            error.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound))
        );
    }

    #[test]
    fn db_errors_funnel_through_the_entity_taxonomy() {
        let error: Error = DbErr::RecordNotFound("users".to_string()).into();
        assert_eq!(
            error.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::NotFound))
        );
    }

    #[test]
    fn unique_violation_translates_to_conflict() {
        let entity_error = EntityApiError {
            source: None,
            error_kind: EntityApiErrorKind::UniqueViolation,
        };
        let error: Error = entity_error.into();
        assert_eq!(
            error.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(EntityErrorKind::Conflict))
        );
    }
}
