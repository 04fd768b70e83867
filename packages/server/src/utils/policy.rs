//! Capability checks applied by handlers before any store operation.
//!
//! Two different failure shapes are in play and the difference is
//! intentional: submission and problem checks admit the resource exists
//! (403), while the user self-service check hides existence entirely (404)
//! so that probing `/users/{id}` reveals nothing about which ids are taken.

use crate::entity::{submission, user};
use crate::error::AppError;

/// Admin-only writes: problem create/update/delete, submission overrides,
/// listing all users.
pub fn require_admin(current: &user::Model) -> Result<(), AppError> {
    if current.is_admin {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

/// A submission may be read by its owner or an admin.
pub fn require_submission_read(
    current: &user::Model,
    submission: &submission::Model,
) -> Result<(), AppError> {
    if submission.user_id == current.id || current.is_admin {
        Ok(())
    } else {
        Err(AppError::PermissionDenied)
    }
}

/// A non-admin may only target its own user id; any other id reads as
/// absent, whether or not it exists.
pub fn require_user_read(current: &user::Model, target_id: i32) -> Result<(), AppError> {
    if target_id == current.id || current.is_admin {
        Ok(())
    } else {
        Err(AppError::NotFound("User not found".into()))
    }
}
