//! Access-control evaluator
//!
//! A flat membership test: the caller is authorized for a permission key
//! exactly when the key is granted to their role. There is no hierarchy, no
//! wildcard matching and no caching; every check reads the current role
//! assignment, so revocations and deactivations take effect immediately.

use crate::prelude::*;

/// Checks whether `user_id` currently holds `permission_key`.
///
/// Fails closed: an unknown or inactive user evaluates as denied rather
/// than as an error.
pub async fn is_authorized(app: &App, user_id: UserId, permission_key: &str) -> JdResult<bool> {
	let user = match app.store.read_user(user_id).await {
		Ok(user) => user,
		Err(Error::NotFound) => return Ok(false),
		Err(err) => return Err(err),
	};
	if !user.active {
		return Ok(false);
	}

	let keys = app.store.list_role_permission_keys(user.role_id).await?;
	Ok(keys.iter().any(|key| key.as_ref() == permission_key))
}

/// Guard called by every operation before it touches the store
pub async fn require(app: &App, user_id: UserId, permission_key: &str) -> JdResult<()> {
	if is_authorized(app, user_id, permission_key).await? {
		Ok(())
	} else {
		warn!(user_id = user_id.0, permission = permission_key, "Permission denied");
		Err(Error::Unauthorized)
	}
}

// vim: ts=4
