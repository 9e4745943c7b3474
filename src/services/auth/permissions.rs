use crate::services::auth::claims::Claims;
use crate::services::auth::error::AuthError;

/// Exact membership of `permission` in the `permissions` claim.
///
/// An entry that is not an array of strings grants nothing.
pub fn check_permission(permission: &str, claims: &Claims) -> Result<(), AuthError> {
    let granted = claims
        .permissions()
        .ok_or(AuthError::PermissionsClaimMissing)?;

    let allowed = granted
        .as_array()
        .is_some_and(|list| list.iter().any(|p| p.as_str() == Some(permission)));

    if !allowed {
        return Err(AuthError::PermissionDenied {
            permission: permission.to_string(),
        });
    }

    Ok(())
}
