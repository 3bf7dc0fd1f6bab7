//! First-run provisioning

use crate::prelude::*;
use crate::store_adapter::{AuthCtx, BootstrapAdmin};

/// Provisions the first role, the admin account and the permission catalog
/// on an empty database. Returns `Ok(None)` when the database already has
/// users, so embedders can call this unconditionally at startup.
pub async fn ensure_admin(app: &App, data: &BootstrapAdmin<'_>) -> JdResult<Option<AuthCtx>> {
	match app.store.bootstrap_admin(data).await {
		Ok(auth) => {
			info!(username = %auth.username, "Provisioned administrator account");
			Ok(Some(auth))
		}
		Err(Error::ValidationError(_)) => Ok(None),
		Err(err) => Err(err),
	}
}

// vim: ts=4
