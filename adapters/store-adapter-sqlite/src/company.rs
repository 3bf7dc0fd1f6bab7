//! Company management operations

use sqlx::{Row, SqlitePool};

use crate::utils::*;
use jobdesk_types::{prelude::*, store_adapter::*};

fn parse_company_row(row: sqlx::sqlite::SqliteRow) -> Result<CompanyData, sqlx::Error> {
	Ok(CompanyData {
		company_id: row.try_get("company_id")?,
		name: row.try_get("name")?,
		website: row.try_get("website")?,
		logo_path: row.try_get("logo_path")?,
		created_by: UserId(row.try_get("created_by")?),
		updated_by: UserId(row.try_get("updated_by")?),
		created_at: Timestamp(row.try_get::<i64, _>("created_at")?),
		updated_at: Timestamp(row.try_get::<i64, _>("updated_at")?),
	})
}

/// Create a new company
pub(crate) async fn create_company(
	db: &SqlitePool,
	actor: UserId,
	data: &CreateCompanyData<'_>,
) -> JdResult<CompanyData> {
	let result = sqlx::query(
		"INSERT INTO companies (name, website, logo_path, created_by, updated_by)
		VALUES (?1, ?2, ?3, ?4, ?4)",
	)
	.bind(data.name)
	.bind(data.website)
	.bind(data.logo_path)
	.bind(actor.0)
	.execute(db)
	.await
	.map_err(|e| {
		if is_unique_violation(&e) {
			return Error::ValidationError(format!("company '{}' already exists", data.name));
		}
		if is_fk_violation(&e) {
			return Error::ReferentialError("acting user does not exist".into());
		}
		inspect(&e);
		Error::DbError
	})?;

	let company_id = result.last_insert_rowid();
	read_company(db, company_id).await
}

/// Read a company by ID
pub(crate) async fn read_company(db: &SqlitePool, company_id: i64) -> JdResult<CompanyData> {
	let res = sqlx::query(
		"SELECT company_id, name, website, logo_path, created_by, updated_by, created_at, updated_at
		FROM companies WHERE company_id = ?1",
	)
	.bind(company_id)
	.fetch_one(db)
	.await;

	map_res(res, parse_company_row)
}

/// List companies, optionally filtered by a name substring
pub(crate) async fn list_companies(
	db: &SqlitePool,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<CompanyData>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT company_id, name, website, logo_path, created_by, updated_by, created_at, updated_at
		FROM companies WHERE 1=1",
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
	collect_res(rows.into_iter().map(parse_company_row))
}

/// Update a company
pub(crate) async fn update_company(
	db: &SqlitePool,
	actor: UserId,
	company_id: i64,
	data: &UpdateCompanyData<'_>,
) -> JdResult<CompanyData> {
	let mut query = sqlx::QueryBuilder::new("UPDATE companies SET ");
	let mut has_updates = false;

	if let Some(name) = data.name {
		query.push("name=").push_bind(name);
		has_updates = true;
	}
	if let Some(website) = data.website {
		if has_updates {
			query.push(", ");
		}
		query.push("website=").push_bind(website);
		has_updates = true;
	}
	has_updates = push_patch!(query, has_updates, "logo_path", data.logo_path);

	if !has_updates {
		return read_company(db, company_id).await;
	}

	query.push(", updated_by=").push_bind(actor.0);
	query.push(" WHERE company_id=").push_bind(company_id);

	let result = query.build().execute(db).await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => read_company(db, company_id).await,
		Err(e) if is_unique_violation(&e) => {
			Err(Error::ValidationError("company name already exists".into()))
		}
		Err(e) => {
			inspect(&e);
			Err(Error::DbError)
		}
	}
}

/// Delete a company
///
/// Refused while any job still references it.
pub(crate) async fn delete_company(db: &SqlitePool, company_id: i64) -> JdResult<()> {
	let result = sqlx::query("DELETE FROM companies WHERE company_id = ?1")
		.bind(company_id)
		.execute(db)
		.await;

	map_delete(result, "company is still referenced by jobs")
}

// vim: ts=4
