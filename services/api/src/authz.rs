//! Ownership guard for mutating operations
//!
//! Pure decision logic with no side effects, applied before every update
//! or delete on posts and comments. Likes carry no guard beyond acting as
//! yourself: the authenticated id is always the acting id.

use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Decide whether a requester may mutate a resource owned by `owner_id`
///
/// Only the creating user may mutate or delete a post or comment.
pub fn authorize_owner(requester_id: Uuid, owner_id: Uuid) -> ApiResult<()> {
    if requester_id == owner_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_allowed() {
        let id = Uuid::new_v4();
        assert!(authorize_owner(id, id).is_ok());
    }

    #[test]
    fn test_non_owner_is_forbidden() {
        let requester = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let err = authorize_owner(requester, owner).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));
    }
}
