//! Reference catalogs: locations, salary ranges and categories
//!
//! The small lookup tables a job listing references. Each carries a single
//! display field plus the audit columns; each has its own permission family.

use crate::prelude::*;
use crate::store_adapter::{
	AuthCtx, CategoryData, CreateCategoryData, CreateLocationData, CreateSalaryRangeData,
	ListOptions, LocationData, SalaryRangeData, UpdateCategoryData, UpdateLocationData,
	UpdateSalaryRangeData,
};
use crate::{authz, perm};

// Locations
//***********

pub async fn list_locations(
	app: &App,
	auth: &AuthCtx,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<LocationData>> {
	authz::require(app, auth.user_id, perm::LOCATION_READ).await?;
	app.store.list_locations(opts).await
}

pub async fn get_location(app: &App, auth: &AuthCtx, location_id: i64) -> JdResult<LocationData> {
	authz::require(app, auth.user_id, perm::LOCATION_READ).await?;
	app.store.read_location(location_id).await
}

pub async fn create_location(
	app: &App,
	auth: &AuthCtx,
	data: &CreateLocationData<'_>,
) -> JdResult<LocationData> {
	authz::require(app, auth.user_id, perm::LOCATION_CREATE).await?;
	app.store.create_location(auth.user_id, data).await
}

pub async fn update_location(
	app: &App,
	auth: &AuthCtx,
	location_id: i64,
	data: &UpdateLocationData<'_>,
) -> JdResult<LocationData> {
	authz::require(app, auth.user_id, perm::LOCATION_UPDATE).await?;
	app.store.update_location(auth.user_id, location_id, data).await
}

pub async fn delete_location(app: &App, auth: &AuthCtx, location_id: i64) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::LOCATION_DELETE).await?;
	app.store.delete_location(location_id).await
}

// Salary ranges
//***************

pub async fn list_salary_ranges(
	app: &App,
	auth: &AuthCtx,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<SalaryRangeData>> {
	authz::require(app, auth.user_id, perm::SALARY_RANGE_READ).await?;
	app.store.list_salary_ranges(opts).await
}

pub async fn get_salary_range(
	app: &App,
	auth: &AuthCtx,
	salary_range_id: i64,
) -> JdResult<SalaryRangeData> {
	authz::require(app, auth.user_id, perm::SALARY_RANGE_READ).await?;
	app.store.read_salary_range(salary_range_id).await
}

pub async fn create_salary_range(
	app: &App,
	auth: &AuthCtx,
	data: &CreateSalaryRangeData<'_>,
) -> JdResult<SalaryRangeData> {
	authz::require(app, auth.user_id, perm::SALARY_RANGE_CREATE).await?;
	app.store.create_salary_range(auth.user_id, data).await
}

pub async fn update_salary_range(
	app: &App,
	auth: &AuthCtx,
	salary_range_id: i64,
	data: &UpdateSalaryRangeData<'_>,
) -> JdResult<SalaryRangeData> {
	authz::require(app, auth.user_id, perm::SALARY_RANGE_UPDATE).await?;
	app.store.update_salary_range(auth.user_id, salary_range_id, data).await
}

pub async fn delete_salary_range(
	app: &App,
	auth: &AuthCtx,
	salary_range_id: i64,
) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::SALARY_RANGE_DELETE).await?;
	app.store.delete_salary_range(salary_range_id).await
}

// Categories
//*************

pub async fn list_categories(
	app: &App,
	auth: &AuthCtx,
	opts: &ListOptions<'_>,
) -> JdResult<Vec<CategoryData>> {
	authz::require(app, auth.user_id, perm::CATEGORY_READ).await?;
	app.store.list_categories(opts).await
}

pub async fn get_category(app: &App, auth: &AuthCtx, category_id: i64) -> JdResult<CategoryData> {
	authz::require(app, auth.user_id, perm::CATEGORY_READ).await?;
	app.store.read_category(category_id).await
}

pub async fn create_category(
	app: &App,
	auth: &AuthCtx,
	data: &CreateCategoryData<'_>,
) -> JdResult<CategoryData> {
	authz::require(app, auth.user_id, perm::CATEGORY_CREATE).await?;
	app.store.create_category(auth.user_id, data).await
}

pub async fn update_category(
	app: &App,
	auth: &AuthCtx,
	category_id: i64,
	data: &UpdateCategoryData<'_>,
) -> JdResult<CategoryData> {
	authz::require(app, auth.user_id, perm::CATEGORY_UPDATE).await?;
	app.store.update_category(auth.user_id, category_id, data).await
}

pub async fn delete_category(app: &App, auth: &AuthCtx, category_id: i64) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::CATEGORY_DELETE).await?;
	app.store.delete_category(category_id).await
}

// vim: ts=4
