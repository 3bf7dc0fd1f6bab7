//! User management operations

use crate::prelude::*;
use crate::store_adapter::{
	AuthCtx, CreateUserData, ListUsersOptions, UpdateUserData, UserData,
};
use crate::{authz, perm};

pub async fn list_users(
	app: &App,
	auth: &AuthCtx,
	opts: &ListUsersOptions<'_>,
) -> JdResult<Vec<UserData>> {
	authz::require(app, auth.user_id, perm::USER_READ).await?;
	app.store.list_users(opts).await
}

pub async fn get_user(app: &App, auth: &AuthCtx, user_id: UserId) -> JdResult<UserData> {
	authz::require(app, auth.user_id, perm::USER_READ).await?;
	app.store.read_user(user_id).await
}

pub async fn create_user(
	app: &App,
	auth: &AuthCtx,
	data: &CreateUserData<'_>,
) -> JdResult<UserData> {
	authz::require(app, auth.user_id, perm::USER_CREATE).await?;
	let user = app.store.create_user(auth.user_id, data).await?;
	info!(username = %user.username, role = %user.role, by = %auth.username, "Created user");
	Ok(user)
}

pub async fn update_user(
	app: &App,
	auth: &AuthCtx,
	user_id: UserId,
	data: &UpdateUserData<'_>,
) -> JdResult<UserData> {
	authz::require(app, auth.user_id, perm::USER_UPDATE).await?;
	app.store.update_user(auth.user_id, user_id, data).await
}

pub async fn delete_user(app: &App, auth: &AuthCtx, user_id: UserId) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::USER_DELETE).await?;
	app.store.delete_user(user_id).await?;
	info!(user_id = user_id.0, by = %auth.username, "Deleted user");
	Ok(())
}

/// Sets or replaces a password. Callers may always change their own; anyone
/// else's requires `user.update`.
pub async fn set_password(
	app: &App,
	auth: &AuthCtx,
	user_id: UserId,
	password: &str,
) -> JdResult<()> {
	if auth.user_id != user_id {
		authz::require(app, auth.user_id, perm::USER_UPDATE).await?;
	}
	app.store.update_user_password(auth.user_id, user_id, password).await?;
	info!(user_id = user_id.0, by = %auth.username, "Password updated");
	Ok(())
}

// vim: ts=4
