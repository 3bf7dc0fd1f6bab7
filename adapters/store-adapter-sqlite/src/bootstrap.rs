//! First-run provisioning
//!
//! Seeds the initial administrator role, user, credential and the full
//! permission catalog in one transaction. Only ever runs against an empty
//! user table.

use sqlx::SqlitePool;

use crate::{crypto, utils::*};
use jobdesk_types::{perm, prelude::*, store_adapter::*};

pub(crate) async fn bootstrap_admin(
	db: &SqlitePool,
	data: &BootstrapAdmin<'_>,
) -> JdResult<AuthCtx> {
	let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
		.fetch_one(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	if users > 0 {
		return Err(Error::ValidationError("database is already provisioned".into()));
	}

	let password_hash = crypto::generate_password_hash(data.password).await?;
	let role_name = data.role_name.unwrap_or("admin");

	let mut tx = db.begin().await.inspect_err(inspect).or(Err(Error::DbError))?;

	// The admin role and the admin user reference each other through the
	// audit columns; deferring foreign keys lets both rows land in one
	// transaction with fixed IDs.
	sqlx::query("PRAGMA defer_foreign_keys = ON")
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	sqlx::query(
		"INSERT INTO roles (role_id, name, description, created_by, updated_by)
		VALUES (1, ?1, NULL, 1, 1)",
	)
	.bind(role_name)
	.execute(&mut *tx)
	.await
	.map_err(|e| {
		if is_unique_violation(&e) {
			return Error::ValidationError("database is already provisioned".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	sqlx::query(
		"INSERT INTO users (user_id, username, email, role_id, is_active, created_by, updated_by)
		VALUES (1, ?1, ?2, 1, 1, 1, 1)",
	)
	.bind(data.username)
	.bind(data.email)
	.execute(&mut *tx)
	.await
	.map_err(|e| {
		if is_unique_violation(&e) {
			return Error::ValidationError("database is already provisioned".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	sqlx::query(
		"INSERT INTO passwords (user_id, password_hash, created_by, updated_by)
		VALUES (1, ?1, 1, 1)",
	)
	.bind(password_hash.as_ref())
	.execute(&mut *tx)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	// Seed the permission catalog and grant everything to the admin role
	for &key in perm::ALL {
		let result = sqlx::query(
			"INSERT INTO permissions (key, label, created_by, updated_by)
			VALUES (?1, ?1, 1, 1)",
		)
		.bind(key)
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

		sqlx::query(
			"INSERT INTO role_permissions (role_id, permission_id, created_by, updated_by)
			VALUES (1, ?1, 1, 1)",
		)
		.bind(result.last_insert_rowid())
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	}

	tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;

	info!("Provisioned administrator '{}' with role '{}'", data.username, role_name);

	Ok(AuthCtx { user_id: UserId(1), username: data.username.into(), role_id: 1 })
}

// vim: ts=4
