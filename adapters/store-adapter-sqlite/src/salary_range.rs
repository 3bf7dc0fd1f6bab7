//! Salary range catalog operations

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use jobdesk_types::{prelude::*, store_adapter::*};

fn parse_salary_range_row(row: sqlx::sqlite::SqliteRow) -> Result<SalaryRangeData, sqlx::Error> {
	Ok(SalaryRangeData {
		salary_range_id: row.try_get("salary_range_id")?,
		label: row.try_get("label")?,
		created_by: UserId(row.try_get("created_by")?),
		updated_by: UserId(row.try_get("updated_by")?),
		created_at: Timestamp(row.try_get::<i64, _>("created_at")?),
		updated_at: Timestamp(row.try_get::<i64, _>("updated_at")?),
	})
}

/// Create a new salary range
///
/// Labels are display text and may repeat.
pub(crate) async fn create_salary_range(
	db: &SqlitePool,
	actor: UserId,
	data: &CreateSalaryRangeData<'_>,
) -> JdResult<SalaryRangeData> {
	let result = sqlx::query(
		"INSERT INTO salary_ranges (label, created_by, updated_by) VALUES (?1, ?2, ?2)",
	)
	.bind(data.label)
	.bind(actor.0)
	.execute(db)
	.await
	.map_err(|e| {
		if is_fk_violation(&e) {
			return Error::ReferentialError("acting user does not exist".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	let salary_range_id = result.last_insert_rowid();
	read_salary_range(db, salary_range_id).await
}

/// Read a salary range by ID
pub(crate) async fn read_salary_range(
	db: &SqlitePool,
	salary_range_id: i64,
) -> JdResult<SalaryRangeData> {
	let res = sqlx::query(
		"SELECT salary_range_id, label, created_by, updated_by, created_at, updated_at
		FROM salary_ranges WHERE salary_range_id = ?1",
	)
	.bind(salary_range_id)
	.fetch_one(db)
	.await;

	map_res(res, parse_salary_range_row)
}

/// List salary ranges, optionally filtered by a label substring
pub(crate) async fn list_salary_ranges(
	db: &SqlitePool,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<SalaryRangeData>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT salary_range_id, label, created_by, updated_by, created_at, updated_at
		FROM salary_ranges WHERE 1=1",
	);
	if let Some(q) = opts.q {
		query.push(" AND label LIKE ").push_bind(format!("%{}%", q));
	}
	query.push(" ORDER BY salary_range_id");
	query.push(" LIMIT ").push_bind(i64::from(opts.limit.unwrap_or(100)));
	query.push(" OFFSET ").push_bind(i64::from(opts.offset.unwrap_or(0)));

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	collect_res(rows.into_iter().map(parse_salary_range_row))
}

/// Update a salary range
pub(crate) async fn update_salary_range(
	db: &SqlitePool,
	actor: UserId,
	salary_range_id: i64,
	data: &UpdateSalaryRangeData<'_>,
) -> JdResult<SalaryRangeData> {
	let Some(label) = data.label else {
		return read_salary_range(db, salary_range_id).await;
	};

	let result = sqlx::query(
		"UPDATE salary_ranges SET label = ?1, updated_by = ?2 WHERE salary_range_id = ?3",
	)
	.bind(label)
	.bind(actor.0)
	.bind(salary_range_id)
	.execute(db)
	.await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => read_salary_range(db, salary_range_id).await,
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// Delete a salary range
///
/// Refused while any job still references it.
pub(crate) async fn delete_salary_range(db: &SqlitePool, salary_range_id: i64) -> JdResult<()> {
	let result = sqlx::query("DELETE FROM salary_ranges WHERE salary_range_id = ?1")
		.bind(salary_range_id)
		.execute(db)
		.await;

	map_delete(result, "salary range is still referenced by jobs")
}

// vim: ts=4
