use async_graphql::ID;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Helper to parse a session UUID from a GraphQL ID string
pub fn parse_id(id: &ID) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::ValidationError("Invalid UUID format".to_string()))
}
