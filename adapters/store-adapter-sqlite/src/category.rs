//! Category catalog operations

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use jobdesk_types::{prelude::*, store_adapter::*};

fn parse_category_row(row: sqlx::sqlite::SqliteRow) -> Result<CategoryData, sqlx::Error> {
	Ok(CategoryData {
		category_id: row.try_get("category_id")?,
		name: row.try_get("name")?,
		created_by: UserId(row.try_get("created_by")?),
		updated_by: UserId(row.try_get("updated_by")?),
		created_at: Timestamp(row.try_get::<i64, _>("created_at")?),
		updated_at: Timestamp(row.try_get::<i64, _>("updated_at")?),
	})
}

/// Create a new category
pub(crate) async fn create_category(
	db: &SqlitePool,
	actor: UserId,
	data: &CreateCategoryData<'_>,
) -> JdResult<CategoryData> {
	let result = sqlx::query(
		"INSERT INTO categories (name, created_by, updated_by) VALUES (?1, ?2, ?2)",
	)
	.bind(data.name)
	.bind(actor.0)
	.execute(db)
	.await
	.map_err(|e| {
		if is_unique_violation(&e) {
			return Error::ValidationError(format!("category '{}' already exists", data.name));
		}
		if is_fk_violation(&e) {
			return Error::ReferentialError("acting user does not exist".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	let category_id = result.last_insert_rowid();
	read_category(db, category_id).await
}

/// Read a category by ID
pub(crate) async fn read_category(db: &SqlitePool, category_id: i64) -> JdResult<CategoryData> {
	let res = sqlx::query(
		"SELECT category_id, name, created_by, updated_by, created_at, updated_at
		FROM categories WHERE category_id = ?1",
	)
	.bind(category_id)
	.fetch_one(db)
	.await;

	map_res(res, parse_category_row)
}

/// List categories, optionally filtered by a name substring
pub(crate) async fn list_categories(
	db: &SqlitePool,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<CategoryData>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT category_id, name, created_by, updated_by, created_at, updated_at
		FROM categories WHERE 1=1",
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
	collect_res(rows.into_iter().map(parse_category_row))
}

/// Update a category
pub(crate) async fn update_category(
	db: &SqlitePool,
	actor: UserId,
	category_id: i64,
	data: &UpdateCategoryData<'_>,
) -> JdResult<CategoryData> {
	let Some(name) = data.name else {
		return read_category(db, category_id).await;
	};

	let result = sqlx::query(
		"UPDATE categories SET name = ?1, updated_by = ?2 WHERE category_id = ?3",
	)
	.bind(name)
	.bind(actor.0)
	.bind(category_id)
	.execute(db)
	.await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => read_category(db, category_id).await,
		Err(e) if is_unique_violation(&e) => {
			Err(Error::ValidationError(format!("category '{}' already exists", name)))
		}
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// Delete a category
///
/// Refused while any job still references it.
pub(crate) async fn delete_category(db: &SqlitePool, category_id: i64) -> JdResult<()> {
	let result = sqlx::query("DELETE FROM categories WHERE category_id = ?1")
		.bind(category_id)
		.execute(db)
		.await;

	map_delete(result, "category is still referenced by jobs")
}

// vim: ts=4
