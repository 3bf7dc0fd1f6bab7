//! Role management operations

use crate::prelude::*;
use crate::store_adapter::{
	AuthCtx, CreateRoleData, ListOptions, PermissionData, RoleData, UpdateRoleData,
};
use crate::{authz, perm};

pub async fn list_roles(
	app: &App,
	auth: &AuthCtx,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<RoleData>> {
	authz::require(app, auth.user_id, perm::ROLE_READ).await?;
	app.store.list_roles(opts).await
}

pub async fn get_role(app: &App, auth: &AuthCtx, role_id: i64) -> JdResult<RoleData> {
	authz::require(app, auth.user_id, perm::ROLE_READ).await?;
	app.store.read_role(role_id).await
}

pub async fn create_role(
	app: &App,
	auth: &AuthCtx,
	data: &CreateRoleData<'_>,
) -> JdResult<RoleData> {
	authz::require(app, auth.user_id, perm::ROLE_CREATE).await?;
	let role = app.store.create_role(auth.user_id, data).await?;
	info!(role = %role.name, by = %auth.username, "Created role");
	Ok(role)
}

pub async fn update_role(
	app: &App,
	auth: &AuthCtx,
	role_id: i64,
	data: &UpdateRoleData<'_>,
) -> JdResult<RoleData> {
	authz::require(app, auth.user_id, perm::ROLE_UPDATE).await?;
	app.store.update_role(auth.user_id, role_id, data).await
}

pub async fn delete_role(app: &App, auth: &AuthCtx, role_id: i64) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::ROLE_DELETE).await?;
	app.store.delete_role(role_id).await?;
	info!(role_id = role_id, by = %auth.username, "Deleted role");
	Ok(())
}

// Permission grants
//*******************

/// Granting changes what every holder of the role may do, so the grant and
/// revoke operations require `role.update` rather than a permission of
/// their own.
pub async fn grant_permission(
	app: &App,
	auth: &AuthCtx,
	role_id: i64,
	permission_id: i64,
) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::ROLE_UPDATE).await?;
	app.store.add_role_permission(auth.user_id, role_id, permission_id).await?;
	info!(role_id = role_id, permission_id = permission_id, by = %auth.username, "Granted permission");
	Ok(())
}

pub async fn revoke_permission(
	app: &App,
	auth: &AuthCtx,
	role_id: i64,
	permission_id: i64,
) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::ROLE_UPDATE).await?;
	app.store.remove_role_permission(role_id, permission_id).await?;
	info!(role_id = role_id, permission_id = permission_id, by = %auth.username, "Revoked permission");
	Ok(())
}

pub async fn list_role_permissions(
	app: &App,
	auth: &AuthCtx,
	role_id: i64,
) -> JdResult<Vec<PermissionData>> {
	authz::require(app, auth.user_id, perm::ROLE_READ).await?;
	app.store.list_role_permissions(role_id).await
}

// vim: ts=4
