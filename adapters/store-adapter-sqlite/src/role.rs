//! Role management operations, including permission grants

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use jobdesk_types::{prelude::*, store_adapter::*};

/// Parse a role row from the database
pub(crate) fn parse_role_row(row: sqlx::sqlite::SqliteRow) -> Result<RoleData, sqlx::Error> {
	Ok(RoleData {
		role_id: row.try_get("role_id")?,
		name: row.try_get("name")?,
		description: row.try_get("description")?,
		created_by: UserId(row.try_get("created_by")?),
		updated_by: UserId(row.try_get("updated_by")?),
		created_at: Timestamp(row.try_get::<i64, _>("created_at")?),
		updated_at: Timestamp(row.try_get::<i64, _>("updated_at")?),
	})
}

/// Create a new role
///
/// Role names are kept unique at the application level, checked inside the
/// insert transaction.
pub(crate) async fn create_role(
	db: &SqlitePool,
	actor: UserId,
	data: &CreateRoleData<'_>,
) -> JdResult<RoleData> {
	let mut tx = db.begin().await.inspect_err(inspect).or(Err(Error::DbError))?;

	let existing = sqlx::query("SELECT role_id FROM roles WHERE name = ?1")
		.bind(data.name)
		.fetch_optional(&mut *tx)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	if existing.is_some() {
		return Err(Error::ValidationError(format!("role '{}' already exists", data.name)));
	}

	let result = sqlx::query(
		"INSERT INTO roles (name, description, created_by, updated_by)
		VALUES (?1, ?2, ?3, ?3)",
	)
	.bind(data.name)
	.bind(data.description)
	.bind(actor.0)
	.execute(&mut *tx)
	.await
	.map_err(|e| {
		if is_fk_violation(&e) {
			return Error::ReferentialError("acting user does not exist".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	let role_id = result.last_insert_rowid();
	tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;

	read_role(db, role_id).await
}

/// Read a role by ID
pub(crate) async fn read_role(db: &SqlitePool, role_id: i64) -> JdResult<RoleData> {
	let res = sqlx::query(
		"SELECT role_id, name, description, created_by, updated_by, created_at, updated_at
		FROM roles WHERE role_id = ?1",
	)
	.bind(role_id)
	.fetch_one(db)
	.await;

	map_res(res, parse_role_row)
}

/// List roles, optionally filtered by a name substring
pub(crate) async fn list_roles(
	db: &SqlitePool,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<RoleData>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT role_id, name, description, created_by, updated_by, created_at, updated_at
		FROM roles WHERE 1=1",
	);
	if let Some(q) = opts.q {
		query.push(" AND name LIKE ").push_bind(format!("%{}%", q));
	}
	query.push(" ORDER BY role_id");
	query.push(" LIMIT ").push_bind(i64::from(opts.limit.unwrap_or(100)));
	query.push(" OFFSET ").push_bind(i64::from(opts.offset.unwrap_or(0)));

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	collect_res(rows.into_iter().map(parse_role_row))
}

/// Update a role
pub(crate) async fn update_role(
	db: &SqlitePool,
	actor: UserId,
	role_id: i64,
	data: &UpdateRoleData<'_>,
) -> JdResult<RoleData> {
	let mut tx = db.begin().await.inspect_err(inspect).or(Err(Error::DbError))?;

	if let Some(name) = data.name {
		let clash = sqlx::query("SELECT role_id FROM roles WHERE name = ?1 AND role_id != ?2")
			.bind(name)
			.bind(role_id)
			.fetch_optional(&mut *tx)
			.await
			.inspect_err(inspect)
			.or(Err(Error::DbError))?;
		if clash.is_some() {
			return Err(Error::ValidationError(format!("role '{}' already exists", name)));
		}
	}

	let mut query = sqlx::QueryBuilder::new("UPDATE roles SET ");
	let mut has_updates = false;

	if let Some(name) = data.name {
		query.push("name=").push_bind(name);
		has_updates = true;
	}
	has_updates = push_patch!(query, has_updates, "description", data.description);

	if !has_updates {
		return read_role(db, role_id).await;
	}

	query.push(", updated_by=").push_bind(actor.0);
	query.push(" WHERE role_id=").push_bind(role_id);

	let result = query.build().execute(&mut *tx).await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => {
			tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;
			read_role(db, role_id).await
		}
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// Delete a role
///
/// Refused while any user still holds the role.
pub(crate) async fn delete_role(db: &SqlitePool, role_id: i64) -> JdResult<()> {
	let result = sqlx::query("DELETE FROM roles WHERE role_id = ?1").bind(role_id).execute(db).await;

	map_delete(result, "role is still assigned to users")
}

/// Grant a permission to a role
pub(crate) async fn add_role_permission(
	db: &SqlitePool,
	actor: UserId,
	role_id: i64,
	permission_id: i64,
) -> JdResult<()> {
	sqlx::query(
		"INSERT INTO role_permissions (role_id, permission_id, created_by, updated_by)
		VALUES (?1, ?2, ?3, ?3)",
	)
	.bind(role_id)
	.bind(permission_id)
	.bind(actor.0)
	.execute(db)
	.await
	.map_err(|e| {
		if is_unique_violation(&e) {
			return Error::ValidationError("permission is already granted to this role".into());
		}
		if is_fk_violation(&e) {
			return Error::ReferentialError("role or permission does not exist".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	Ok(())
}

/// Revoke a permission from a role
pub(crate) async fn remove_role_permission(
	db: &SqlitePool,
	role_id: i64,
	permission_id: i64,
) -> JdResult<()> {
	let result =
		sqlx::query("DELETE FROM role_permissions WHERE role_id = ?1 AND permission_id = ?2")
			.bind(role_id)
			.bind(permission_id)
			.execute(db)
			.await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => Ok(()),
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// List the permissions granted to a role
pub(crate) async fn list_role_permissions(
	db: &SqlitePool,
	role_id: i64,
) -> JdResult<Vec<PermissionData>> {
	let rows = sqlx::query(
		"SELECT p.permission_id, p.key, p.label, p.description,
			p.created_by, p.updated_by, p.created_at, p.updated_at
		FROM role_permissions rp
		JOIN permissions p ON p.permission_id = rp.permission_id
		WHERE rp.role_id = ?1 ORDER BY p.key",
	)
	.bind(role_id)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	collect_res(rows.into_iter().map(crate::permission::parse_permission_row))
}

/// List the permission keys granted to a role
///
/// Returns an empty list for unknown roles, which evaluates as denied.
pub(crate) async fn list_role_permission_keys(
	db: &SqlitePool,
	role_id: i64,
) -> JdResult<Vec<Box<str>>> {
	let keys = sqlx::query_scalar::<_, String>(
		"SELECT p.key
		FROM role_permissions rp
		JOIN permissions p ON p.permission_id = rp.permission_id
		WHERE rp.role_id = ?1 ORDER BY p.key",
	)
	.bind(role_id)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	Ok(keys.into_iter().map(String::into_boxed_str).collect())
}

// vim: ts=4
