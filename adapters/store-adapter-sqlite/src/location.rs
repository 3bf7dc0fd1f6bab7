//! Location catalog operations

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use jobdesk_types::{prelude::*, store_adapter::*};

fn parse_location_row(row: sqlx::sqlite::SqliteRow) -> Result<LocationData, sqlx::Error> {
	Ok(LocationData {
		location_id: row.try_get("location_id")?,
		name: row.try_get("name")?,
		created_by: UserId(row.try_get("created_by")?),
		updated_by: UserId(row.try_get("updated_by")?),
		created_at: Timestamp(row.try_get::<i64, _>("created_at")?),
		updated_at: Timestamp(row.try_get::<i64, _>("updated_at")?),
	})
}

/// Create a new location
pub(crate) async fn create_location(
	db: &SqlitePool,
	actor: UserId,
	data: &CreateLocationData<'_>,
) -> JdResult<LocationData> {
	let result = sqlx::query(
		"INSERT INTO locations (name, created_by, updated_by) VALUES (?1, ?2, ?2)",
	)
	.bind(data.name)
	.bind(actor.0)
	.execute(db)
	.await
	.map_err(|e| {
		if is_unique_violation(&e) {
			return Error::ValidationError(format!("location '{}' already exists", data.name));
		}
		if is_fk_violation(&e) {
			return Error::ReferentialError("acting user does not exist".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	let location_id = result.last_insert_rowid();
	read_location(db, location_id).await
}

/// Read a location by ID
pub(crate) async fn read_location(db: &SqlitePool, location_id: i64) -> JdResult<LocationData> {
	let res = sqlx::query(
		"SELECT location_id, name, created_by, updated_by, created_at, updated_at
		FROM locations WHERE location_id = ?1",
	)
	.bind(location_id)
	.fetch_one(db)
	.await;

	map_res(res, parse_location_row)
}

/// List locations, optionally filtered by a name substring
pub(crate) async fn list_locations(
	db: &SqlitePool,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<LocationData>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT location_id, name, created_by, updated_by, created_at, updated_at
		FROM locations WHERE 1=1",
	);
	if let Some(q) = opts.q {
		query.push(" AND name LIKE ").push_bind(format!("%{}%", q));
	}
	query.push(" ORDER BY name");
	query.push(" LIMIT ").push_bind(i64::from(opts.limit.unwrap_or(100)));
	query.push(" OFFSET ").push_bind(i64::from(opts.offset.unwrap_or(0)));

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	collect_res(rows.into_iter().map(parse_location_row))
}

/// Update a location
pub(crate) async fn update_location(
	db: &SqlitePool,
	actor: UserId,
	location_id: i64,
	data: &UpdateLocationData<'_>,
) -> JdResult<LocationData> {
	let Some(name) = data.name else {
		return read_location(db, location_id).await;
	};

	let result = sqlx::query(
		"UPDATE locations SET name = ?1, updated_by = ?2 WHERE location_id = ?3",
	)
	.bind(name)
	.bind(actor.0)
	.bind(location_id)
	.execute(db)
	.await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => read_location(db, location_id).await,
		Err(e) if is_unique_violation(&e) => {
			Err(Error::ValidationError(format!("location '{}' already exists", name)))
		}
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// Delete a location
///
/// Refused while any job still references it.
pub(crate) async fn delete_location(db: &SqlitePool, location_id: i64) -> JdResult<()> {
	let result = sqlx::query("DELETE FROM locations WHERE location_id = ?1")
		.bind(location_id)
		.execute(db)
		.await;

	map_delete(result, "location is still referenced by jobs")
}

// vim: ts=4
