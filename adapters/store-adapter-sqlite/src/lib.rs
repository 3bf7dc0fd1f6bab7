//! SQLite-backed store adapter
//!
//! Owns the relational schema, constraint mapping and transactional
//! integrity for all jobdesk entities. Audit columns are filled from the
//! acting user passed down by the caller; `updated_at` is maintained by
//! database triggers.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};

use jobdesk_types::{prelude::*, store_adapter::*};

mod bootstrap;
mod category;
mod company;
mod crypto;
mod job;
mod location;
mod permission;
mod role;
mod salary_range;
mod schema;
mod user;
mod utils;

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	/// Open the database at `path`, creating and migrating it as needed
	pub async fn new(path: impl AsRef<Path>) -> JdResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal)
			.foreign_keys(true);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DB open error: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DB init error: {:#?}", err))
			.or(Err(Error::DbError))?;

		Ok(Self { db })
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterSqlite {
	// Bootstrap
	//***********
	async fn bootstrap_admin(&self, data: &BootstrapAdmin<'_>) -> JdResult<AuthCtx> {
		bootstrap::bootstrap_admin(&self.db, data).await
	}

	// Role management
	//*****************
	async fn create_role(&self, actor: UserId, data: &CreateRoleData<'_>) -> JdResult<RoleData> {
		role::create_role(&self.db, actor, data).await
	}

	async fn read_role(&self, role_id: i64) -> JdResult<RoleData> {
		role::read_role(&self.db, role_id).await
	}

	async fn list_roles(&self, opts: &ListOptions<'_>) -> JdResult<Vec<RoleData>> {
		role::list_roles(&self.db, opts).await
	}

	async fn update_role(
		&self,
		actor: UserId,
		role_id: i64,
		data: &UpdateRoleData<'_>,
	) -> JdResult<RoleData> {
		role::update_role(&self.db, actor, role_id, data).await
	}

	async fn delete_role(&self, role_id: i64) -> JdResult<()> {
		role::delete_role(&self.db, role_id).await
	}

	async fn add_role_permission(
		&self,
		actor: UserId,
		role_id: i64,
		permission_id: i64,
	) -> JdResult<()> {
		role::add_role_permission(&self.db, actor, role_id, permission_id).await
	}

	async fn remove_role_permission(&self, role_id: i64, permission_id: i64) -> JdResult<()> {
		role::remove_role_permission(&self.db, role_id, permission_id).await
	}

	async fn list_role_permissions(&self, role_id: i64) -> JdResult<Vec<PermissionData>> {
		role::list_role_permissions(&self.db, role_id).await
	}

	async fn list_role_permission_keys(&self, role_id: i64) -> JdResult<Vec<Box<str>>> {
		role::list_role_permission_keys(&self.db, role_id).await
	}

	// User management
	//*****************
	async fn create_user(&self, actor: UserId, data: &CreateUserData<'_>) -> JdResult<UserData> {
		user::create_user(&self.db, actor, data).await
	}

	async fn read_user(&self, user_id: UserId) -> JdResult<UserData> {
		user::read_user(&self.db, user_id).await
	}

	async fn read_user_by_username(&self, username: &str) -> JdResult<UserData> {
		user::read_user_by_username(&self.db, username).await
	}

	async fn list_users(&self, opts: &ListUsersOptions<'_>) -> JdResult<Vec<UserData>> {
		user::list_users(&self.db, opts).await
	}

	async fn update_user(
		&self,
		actor: UserId,
		user_id: UserId,
		data: &UpdateUserData<'_>,
	) -> JdResult<UserData> {
		user::update_user(&self.db, actor, user_id, data).await
	}

	async fn delete_user(&self, user_id: UserId) -> JdResult<()> {
		user::delete_user(&self.db, user_id).await
	}

	async fn update_user_password(
		&self,
		actor: UserId,
		user_id: UserId,
		password: &str,
	) -> JdResult<()> {
		user::update_user_password(&self.db, actor, user_id, password).await
	}

	async fn check_user_password(&self, username: &str, password: &str) -> JdResult<AuthCtx> {
		user::check_user_password(&self.db, username, password).await
	}

	// Permission management
	//***********************
	async fn create_permission(
		&self,
		actor: UserId,
		data: &CreatePermissionData<'_>,
	) -> JdResult<PermissionData> {
		permission::create_permission(&self.db, actor, data).await
	}

	async fn read_permission(&self, permission_id: i64) -> JdResult<PermissionData> {
		permission::read_permission(&self.db, permission_id).await
	}

	async fn read_permission_by_key(&self, key: &str) -> JdResult<PermissionData> {
		permission::read_permission_by_key(&self.db, key).await
	}

	async fn list_permissions(&self, opts: &ListOptions<'_>) -> JdResult<Vec<PermissionData>> {
		permission::list_permissions(&self.db, opts).await
	}

	async fn update_permission(
		&self,
		actor: UserId,
		permission_id: i64,
		data: &UpdatePermissionData<'_>,
	) -> JdResult<PermissionData> {
		permission::update_permission(&self.db, actor, permission_id, data).await
	}

	async fn delete_permission(&self, permission_id: i64) -> JdResult<()> {
		permission::delete_permission(&self.db, permission_id).await
	}

	// Location management
	//*********************
	async fn create_location(
		&self,
		actor: UserId,
		data: &CreateLocationData<'_>,
	) -> JdResult<LocationData> {
		location::create_location(&self.db, actor, data).await
	}

	async fn read_location(&self, location_id: i64) -> JdResult<LocationData> {
		location::read_location(&self.db, location_id).await
	}

	async fn list_locations(&self, opts: &ListOptions<'_>) -> JdResult<Vec<LocationData>> {
		location::list_locations(&self.db, opts).await
	}

	async fn update_location(
		&self,
		actor: UserId,
		location_id: i64,
		data: &UpdateLocationData<'_>,
	) -> JdResult<LocationData> {
		location::update_location(&self.db, actor, location_id, data).await
	}

	async fn delete_location(&self, location_id: i64) -> JdResult<()> {
		location::delete_location(&self.db, location_id).await
	}

	// Salary range management
	//*************************
	async fn create_salary_range(
		&self,
		actor: UserId,
		data: &CreateSalaryRangeData<'_>,
	) -> JdResult<SalaryRangeData> {
		salary_range::create_salary_range(&self.db, actor, data).await
	}

	async fn read_salary_range(&self, salary_range_id: i64) -> JdResult<SalaryRangeData> {
		salary_range::read_salary_range(&self.db, salary_range_id).await
	}

	async fn list_salary_ranges(&self, opts: &ListOptions<'_>) -> JdResult<Vec<SalaryRangeData>> {
		salary_range::list_salary_ranges(&self.db, opts).await
	}

	async fn update_salary_range(
		&self,
		actor: UserId,
		salary_range_id: i64,
		data: &UpdateSalaryRangeData<'_>,
	) -> JdResult<SalaryRangeData> {
		salary_range::update_salary_range(&self.db, actor, salary_range_id, data).await
	}

	async fn delete_salary_range(&self, salary_range_id: i64) -> JdResult<()> {
		salary_range::delete_salary_range(&self.db, salary_range_id).await
	}

	// Category management
	//*********************
	async fn create_category(
		&self,
		actor: UserId,
		data: &CreateCategoryData<'_>,
	) -> JdResult<CategoryData> {
		category::create_category(&self.db, actor, data).await
	}

	async fn read_category(&self, category_id: i64) -> JdResult<CategoryData> {
		category::read_category(&self.db, category_id).await
	}

	async fn list_categories(&self, opts: &ListOptions<'_>) -> JdResult<Vec<CategoryData>> {
		category::list_categories(&self.db, opts).await
	}

	async fn update_category(
		&self,
		actor: UserId,
		category_id: i64,
		data: &UpdateCategoryData<'_>,
	) -> JdResult<CategoryData> {
		category::update_category(&self.db, actor, category_id, data).await
	}

	async fn delete_category(&self, category_id: i64) -> JdResult<()> {
		category::delete_category(&self.db, category_id).await
	}

	// Company management
	//********************
	async fn create_company(
		&self,
		actor: UserId,
		data: &CreateCompanyData<'_>,
	) -> JdResult<CompanyData> {
		company::create_company(&self.db, actor, data).await
	}

	async fn read_company(&self, company_id: i64) -> JdResult<CompanyData> {
		company::read_company(&self.db, company_id).await
	}

	async fn list_companies(&self, opts: &ListOptions<'_>) -> JdResult<Vec<CompanyData>> {
		company::list_companies(&self.db, opts).await
	}

	async fn update_company(
		&self,
		actor: UserId,
		company_id: i64,
		data: &UpdateCompanyData<'_>,
	) -> JdResult<CompanyData> {
		company::update_company(&self.db, actor, company_id, data).await
	}

	async fn delete_company(&self, company_id: i64) -> JdResult<()> {
		company::delete_company(&self.db, company_id).await
	}

	// Job management
	//****************
	async fn create_job(&self, actor: UserId, data: &CreateJobData<'_>) -> JdResult<JobData> {
		job::create_job(&self.db, actor, data).await
	}

	async fn read_job(&self, job_id: i64) -> JdResult<JobData> {
		job::read_job(&self.db, job_id).await
	}

	async fn list_jobs(&self, opts: &ListJobsOptions<'_>) -> JdResult<Vec<JobData>> {
		job::list_jobs(&self.db, opts).await
	}

	async fn update_job(
		&self,
		actor: UserId,
		job_id: i64,
		data: &UpdateJobData<'_>,
	) -> JdResult<JobData> {
		job::update_job(&self.db, actor, job_id, data).await
	}

	async fn delete_job(&self, job_id: i64) -> JdResult<()> {
		job::delete_job(&self.db, job_id).await
	}
}

// vim: ts=4
