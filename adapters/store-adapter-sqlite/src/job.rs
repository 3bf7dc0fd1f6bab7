//! Job listing operations

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use jobdesk_types::{prelude::*, store_adapter::*};

/// Parse a job row (joined with its reference names) from the database
fn parse_job_row(row: sqlx::sqlite::SqliteRow) -> Result<JobData, sqlx::Error> {
	Ok(JobData {
		job_id: row.try_get("job_id")?,
		title: row.try_get("title")?,
		description: row.try_get("description")?,
		location_id: row.try_get("location_id")?,
		location: row.try_get("location")?,
		salary_range_id: row.try_get("salary_range_id")?,
		salary_range: row.try_get("salary_range")?,
		category_id: row.try_get("category_id")?,
		category: row.try_get("category")?,
		company_id: row.try_get("company_id")?,
		company: row.try_get("company")?,
		created_by: UserId(row.try_get("created_by")?),
		updated_by: UserId(row.try_get("updated_by")?),
		created_at: Timestamp(row.try_get::<i64, _>("created_at")?),
		updated_at: Timestamp(row.try_get::<i64, _>("updated_at")?),
	})
}

/// Create a new job listing
pub(crate) async fn create_job(
	db: &SqlitePool,
	actor: UserId,
	data: &CreateJobData<'_>,
) -> JdResult<JobData> {
	let result = sqlx::query(
		"INSERT INTO jobs (title, description, location_id, salary_range_id, category_id, company_id,
			created_by, updated_by)
		VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
	)
	.bind(data.title)
	.bind(data.description)
	.bind(data.location_id)
	.bind(data.salary_range_id)
	.bind(data.category_id)
	.bind(data.company_id)
	.bind(actor.0)
	.execute(db)
	.await
	.map_err(|e| {
		if is_unique_violation(&e) {
			return Error::ValidationError(format!("job '{}' already exists", data.title));
		}
		if is_fk_violation(&e) {
			return Error::ReferentialError(
				"location, salary range, category or company does not exist".into(),
			);
		}
		inspect(&e);
		Error::DbError
	})?;

	let job_id = result.last_insert_rowid();
	read_job(db, job_id).await
}

/// Read a job by ID
pub(crate) async fn read_job(db: &SqlitePool, job_id: i64) -> JdResult<JobData> {
	let res = sqlx::query(
		"SELECT j.job_id, j.title, j.description,
			j.location_id, l.name AS location,
			j.salary_range_id, s.label AS salary_range,
			j.category_id, c.name AS category,
			j.company_id, co.name AS company,
			j.created_by, j.updated_by, j.created_at, j.updated_at
		FROM jobs j
		JOIN locations l ON l.location_id = j.location_id
		JOIN salary_ranges s ON s.salary_range_id = j.salary_range_id
		JOIN categories c ON c.category_id = j.category_id
		JOIN companies co ON co.company_id = j.company_id
		WHERE j.job_id = ?1",
	)
	.bind(job_id)
	.fetch_one(db)
	.await;

	map_res(res, parse_job_row)
}

/// List jobs, newest first, with optional reference and title filters
pub(crate) async fn list_jobs(
	db: &SqlitePool,
	opts: &ListJobsOptions<'_>,
) -> JdResult<Vec<JobData>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT j.job_id, j.title, j.description,
			j.location_id, l.name AS location,
			j.salary_range_id, s.label AS salary_range,
			j.category_id, c.name AS category,
			j.company_id, co.name AS company,
			j.created_by, j.updated_by, j.created_at, j.updated_at
		FROM jobs j
		JOIN locations l ON l.location_id = j.location_id
		JOIN salary_ranges s ON s.salary_range_id = j.salary_range_id
		JOIN categories c ON c.category_id = j.category_id
		JOIN companies co ON co.company_id = j.company_id
		WHERE 1=1",
	);
	if let Some(location_id) = opts.location_id {
		query.push(" AND j.location_id = ").push_bind(location_id);
	}
	if let Some(salary_range_id) = opts.salary_range_id {
		query.push(" AND j.salary_range_id = ").push_bind(salary_range_id);
	}
	if let Some(category_id) = opts.category_id {
		query.push(" AND j.category_id = ").push_bind(category_id);
	}
	if let Some(company_id) = opts.company_id {
		query.push(" AND j.company_id = ").push_bind(company_id);
	}
	if let Some(q) = opts.q {
		query.push(" AND j.title LIKE ").push_bind(format!("%{}%", q));
	}
	query.push(" ORDER BY j.job_id DESC");
	query.push(" LIMIT ").push_bind(i64::from(opts.limit.unwrap_or(100)));
	query.push(" OFFSET ").push_bind(i64::from(opts.offset.unwrap_or(0)));

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	collect_res(rows.into_iter().map(parse_job_row))
}

/// Update a job listing
pub(crate) async fn update_job(
	db: &SqlitePool,
	actor: UserId,
	job_id: i64,
	data: &UpdateJobData<'_>,
) -> JdResult<JobData> {
	let mut query = sqlx::QueryBuilder::new("UPDATE jobs SET ");
	let mut has_updates = false;

	if let Some(title) = data.title {
		query.push("title=").push_bind(title);
		has_updates = true;
	}
	if let Some(description) = data.description {
		if has_updates {
			query.push(", ");
		}
		query.push("description=").push_bind(description);
		has_updates = true;
	}
	if let Some(location_id) = data.location_id {
		if has_updates {
			query.push(", ");
		}
		query.push("location_id=").push_bind(location_id);
		has_updates = true;
	}
	if let Some(salary_range_id) = data.salary_range_id {
		if has_updates {
			query.push(", ");
		}
		query.push("salary_range_id=").push_bind(salary_range_id);
		has_updates = true;
	}
	if let Some(category_id) = data.category_id {
		if has_updates {
			query.push(", ");
		}
		query.push("category_id=").push_bind(category_id);
		has_updates = true;
	}
	if let Some(company_id) = data.company_id {
		if has_updates {
			query.push(", ");
		}
		query.push("company_id=").push_bind(company_id);
		has_updates = true;
	}

	if !has_updates {
		return read_job(db, job_id).await;
	}

	query.push(", updated_by=").push_bind(actor.0);
	query.push(" WHERE job_id=").push_bind(job_id);

	let result = query.build().execute(db).await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => read_job(db, job_id).await,
		Err(e) if is_unique_violation(&e) => {
			Err(Error::ValidationError("job title already exists".into()))
		}
		Err(e) if is_fk_violation(&e) => Err(Error::ReferentialError(
			"location, salary range, category or company does not exist".into(),
		)),
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// Delete a job listing
pub(crate) async fn delete_job(db: &SqlitePool, job_id: i64) -> JdResult<()> {
	let result = sqlx::query("DELETE FROM jobs WHERE job_id = ?1").bind(job_id).execute(db).await;

	map_delete(result, "job is still referenced")
}

// vim: ts=4
