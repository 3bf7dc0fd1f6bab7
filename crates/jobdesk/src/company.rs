//! Company management operations

use crate::prelude::*;
use crate::store_adapter::{AuthCtx, CompanyData, CreateCompanyData, ListOptions, UpdateCompanyData};
use crate::{authz, perm};

pub async fn list_companies(
	app: &App,
	auth: &AuthCtx,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<CompanyData>> {
	authz::require(app, auth.user_id, perm::COMPANY_READ).await?;
	app.store.list_companies(opts).await
}

pub async fn get_company(app: &App, auth: &AuthCtx, company_id: i64) -> JdResult<CompanyData> {
	authz::require(app, auth.user_id, perm::COMPANY_READ).await?;
	app.store.read_company(company_id).await
}

pub async fn create_company(
	app: &App,
	auth: &AuthCtx,
	data: &CreateCompanyData<'_>,
) -> JdResult<CompanyData> {
	authz::require(app, auth.user_id, perm::COMPANY_CREATE).await?;
	app.store.create_company(auth.user_id, data).await
}

/// `logo_path` is a `Patch`: the web layer maps "no field" to `Undefined`
/// and an explicit null to `Null`, which clears the stored path after the
/// file itself is removed.
pub async fn update_company(
	app: &App,
	auth: &AuthCtx,
	company_id: i64,
	data: &UpdateCompanyData<'_>,
) -> JdResult<CompanyData> {
	authz::require(app, auth.user_id, perm::COMPANY_UPDATE).await?;
	app.store.update_company(auth.user_id, company_id, data).await
}

pub async fn delete_company(app: &App, auth: &AuthCtx, company_id: i64) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::COMPANY_DELETE).await?;
	app.store.delete_company(company_id).await
}

// vim: ts=4
