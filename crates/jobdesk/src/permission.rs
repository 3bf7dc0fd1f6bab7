//! Permission catalog operations
//!
//! The catalog is data, not code: new keys can be created at runtime and
//! granted to roles, the evaluator simply matches strings. Keys are stable
//! identifiers though, so updates touch only the label and description.

use crate::prelude::*;
use crate::store_adapter::{
	AuthCtx, CreatePermissionData, ListOptions, PermissionData, UpdatePermissionData,
};
use crate::{authz, perm};

pub async fn list_permissions(
	app: &App,
	auth: &AuthCtx,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<PermissionData>> {
	authz::require(app, auth.user_id, perm::PERMISSION_READ).await?;
	app.store.list_permissions(opts).await
}

pub async fn get_permission(
	app: &App,
	auth: &AuthCtx,
	permission_id: i64,
) -> JdResult<PermissionData> {
	authz::require(app, auth.user_id, perm::PERMISSION_READ).await?;
	app.store.read_permission(permission_id).await
}

pub async fn create_permission(
	app: &App,
	auth: &AuthCtx,
	data: &CreatePermissionData<'_>,
) -> JdResult<PermissionData> {
	authz::require(app, auth.user_id, perm::PERMISSION_CREATE).await?;
	let permission = app.store.create_permission(auth.user_id, data).await?;
	info!(key = %permission.key, by = %auth.username, "Created permission");
	Ok(permission)
}

pub async fn update_permission(
	app: &App,
	auth: &AuthCtx,
	permission_id: i64,
	data: &UpdatePermissionData<'_>,
) -> JdResult<PermissionData> {
	authz::require(app, auth.user_id, perm::PERMISSION_UPDATE).await?;
	app.store.update_permission(auth.user_id, permission_id, data).await
}

pub async fn delete_permission(app: &App, auth: &AuthCtx, permission_id: i64) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::PERMISSION_DELETE).await?;
	app.store.delete_permission(permission_id).await?;
	info!(permission_id = permission_id, by = %auth.username, "Deleted permission");
	Ok(())
}

// vim: ts=4
