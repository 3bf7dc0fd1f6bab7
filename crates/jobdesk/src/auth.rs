//! Authentication seam for the embedding web layer
//!
//! Sessions are the embedder's business; this module only turns credentials
//! or a stored user id back into an `AuthCtx`.

use crate::prelude::*;
use crate::store_adapter::AuthCtx;

/// Verifies credentials and returns the caller's identity. Unknown username,
/// wrong password and inactive account all fail with `Unauthenticated`.
pub async fn login(app: &App, username: &str, password: &str) -> JdResult<AuthCtx> {
	let auth = match app.store.check_user_password(username, password).await {
		Ok(auth) => auth,
		Err(err) => {
			warn!(username = username, "Login failed");
			return Err(err);
		}
	};
	info!(username = %auth.username, role_id = auth.role_id, "Login");
	Ok(auth)
}

/// Restores the identity behind a stored user id (session restore). An
/// account that has vanished or been deactivated since the session was
/// issued is no longer a valid identity.
pub async fn resolve(app: &App, user_id: UserId) -> JdResult<AuthCtx> {
	let user = match app.store.read_user(user_id).await {
		Ok(user) => user,
		Err(Error::NotFound) => return Err(Error::Unauthenticated),
		Err(err) => return Err(err),
	};
	if !user.active {
		return Err(Error::Unauthenticated);
	}

	Ok(AuthCtx {
		user_id: user.user_id,
		username: user.username,
		role_id: user.role_id,
	})
}

// vim: ts=4
