//! Permission catalog operations

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use jobdesk_types::{prelude::*, store_adapter::*};

/// Parse a permission row from the database
pub(crate) fn parse_permission_row(
	row: sqlx::sqlite::SqliteRow,
) -> Result<PermissionData, sqlx::Error> {
	Ok(PermissionData {
		permission_id: row.try_get("permission_id")?,
		key: row.try_get("key")?,
		label: row.try_get("label")?,
		description: row.try_get("description")?,
		created_by: UserId(row.try_get("created_by")?),
		updated_by: UserId(row.try_get("updated_by")?),
		created_at: Timestamp(row.try_get::<i64, _>("created_at")?),
		updated_at: Timestamp(row.try_get::<i64, _>("updated_at")?),
	})
}

/// Create a new permission
pub(crate) async fn create_permission(
	db: &SqlitePool,
	actor: UserId,
	data: &CreatePermissionData<'_>,
) -> JdResult<PermissionData> {
	let result = sqlx::query(
		"INSERT INTO permissions (key, label, description, created_by, updated_by)
		VALUES (?1, ?2, ?3, ?4, ?4)",
	)
	.bind(data.key)
	.bind(data.label)
	.bind(data.description)
	.bind(actor.0)
	.execute(db)
	.await
	.map_err(|e| {
		if is_unique_violation(&e) {
			return Error::ValidationError(format!("permission '{}' already exists", data.key));
		}
		if is_fk_violation(&e) {
			return Error::ReferentialError("acting user does not exist".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	let permission_id = result.last_insert_rowid();
	read_permission(db, permission_id).await
}

/// Read a permission by ID
pub(crate) async fn read_permission(db: &SqlitePool, permission_id: i64) -> JdResult<PermissionData> {
	let res = sqlx::query(
		"SELECT permission_id, key, label, description, created_by, updated_by, created_at, updated_at
		FROM permissions WHERE permission_id = ?1",
	)
	.bind(permission_id)
	.fetch_one(db)
	.await;

	map_res(res, parse_permission_row)
}

/// Read a permission by its key
pub(crate) async fn read_permission_by_key(db: &SqlitePool, key: &str) -> JdResult<PermissionData> {
	let res = sqlx::query(
		"SELECT permission_id, key, label, description, created_by, updated_by, created_at, updated_at
		FROM permissions WHERE key = ?1",
	)
	.bind(key)
	.fetch_one(db)
	.await;

	map_res(res, parse_permission_row)
}

/// List permissions, optionally filtered by a key or label substring
pub(crate) async fn list_permissions(
	db: &SqlitePool,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<PermissionData>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT permission_id, key, label, description, created_by, updated_by, created_at, updated_at
		FROM permissions WHERE 1=1",
	);
	if let Some(q) = opts.q {
		let pattern = format!("%{}%", q);
		query.push(" AND (key LIKE ").push_bind(pattern.clone());
		query.push(" OR label LIKE ").push_bind(pattern);
		query.push(")");
	}
	query.push(" ORDER BY key");
	query.push(" LIMIT ").push_bind(i64::from(opts.limit.unwrap_or(100)));
	query.push(" OFFSET ").push_bind(i64::from(opts.offset.unwrap_or(0)));

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	collect_res(rows.into_iter().map(parse_permission_row))
}

/// Update a permission's label or description
///
/// Keys are stable identifiers referenced from code and are not updatable.
pub(crate) async fn update_permission(
	db: &SqlitePool,
	actor: UserId,
	permission_id: i64,
	data: &UpdatePermissionData<'_>,
) -> JdResult<PermissionData> {
	let mut query = sqlx::QueryBuilder::new("UPDATE permissions SET ");
	let mut has_updates = false;

	if let Some(label) = data.label {
		query.push("label=").push_bind(label);
		has_updates = true;
	}
	has_updates = push_patch!(query, has_updates, "description", data.description);

	if !has_updates {
		return read_permission(db, permission_id).await;
	}

	query.push(", updated_by=").push_bind(actor.0);
	query.push(" WHERE permission_id=").push_bind(permission_id);

	let result = query.build().execute(db).await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => read_permission(db, permission_id).await,
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// Delete a permission
///
/// Grants referencing it are removed with it.
pub(crate) async fn delete_permission(db: &SqlitePool, permission_id: i64) -> JdResult<()> {
	let result = sqlx::query("DELETE FROM permissions WHERE permission_id = ?1")
		.bind(permission_id)
		.execute(db)
		.await;

	map_delete(result, "permission is still referenced")
}

// vim: ts=4
