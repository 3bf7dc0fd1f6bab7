//! Adapter that stores and manages every entity of the job board.
//!
//! One trait covers the whole relational model. All mutating operations take
//! the acting user explicitly; audit columns are always derived from that
//! argument, never from anything ambient and never from client input.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::{
	prelude::*,
	types::serialize_timestamp_iso,
};

/// Context struct for an authenticated user
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub user_id: UserId,
	pub username: Box<str>,
	pub role_id: i64,
}

/// First-run provisioning data: the initial role, the admin account and its
/// password. The permission catalog is seeded alongside and granted in full
/// to the created role.
#[derive(Debug)]
pub struct BootstrapAdmin<'a> {
	pub username: &'a str,
	pub email: &'a str,
	pub password: &'a str,
	/// Name for the first role, `admin` if absent
	pub role_name: Option<&'a str>,
}

/// Shared listing options for the simple entities
#[derive(Debug, Default)]
pub struct ListOptions<'a> {
	/// Substring match on the entity's name column
	pub q: Option<&'a str>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

// Role types
// ===========

#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleData {
	pub role_id: i64,
	pub name: Box<str>,
	pub description: Option<Box<str>>,
	pub created_by: UserId,
	pub updated_by: UserId,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub created_at: Timestamp,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateRoleData<'a> {
	pub name: &'a str,
	pub description: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct UpdateRoleData<'a> {
	pub name: Option<&'a str>,
	pub description: Patch<&'a str>,
}

// User types
// ===========

#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
	pub user_id: UserId,
	pub username: Box<str>,
	pub email: Box<str>,
	pub role_id: i64,
	/// Name of the assigned role
	pub role: Box<str>,
	pub active: bool,
	pub created_by: UserId,
	pub updated_by: UserId,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub created_at: Timestamp,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateUserData<'a> {
	pub username: &'a str,
	pub email: &'a str,
	pub role_id: i64,
	/// Initial password; the account cannot log in until one is set
	pub password: Option<&'a str>,
	/// Defaults to active
	pub active: Option<bool>,
}

#[derive(Debug, Default)]
pub struct UpdateUserData<'a> {
	pub username: Option<&'a str>,
	pub email: Option<&'a str>,
	pub role_id: Option<i64>,
	pub active: Option<bool>,
}

/// Options for listing users
#[derive(Debug, Default)]
pub struct ListUsersOptions<'a> {
	pub role_id: Option<i64>,
	pub active: Option<bool>,
	/// Substring match on username or email
	pub q: Option<&'a str>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

// Permission types
// =================

#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionData {
	pub permission_id: i64,
	pub key: Box<str>,
	pub label: Box<str>,
	pub description: Option<Box<str>>,
	pub created_by: UserId,
	pub updated_by: UserId,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub created_at: Timestamp,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreatePermissionData<'a> {
	pub key: &'a str,
	pub label: &'a str,
	pub description: Option<&'a str>,
}

/// The key is the stable identifier the evaluator matches on and cannot be
/// changed after creation.
#[derive(Debug, Default)]
pub struct UpdatePermissionData<'a> {
	pub label: Option<&'a str>,
	pub description: Patch<&'a str>,
}

// Catalog types (locations, salary ranges, categories)
// =====================================================

#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
	pub location_id: i64,
	pub name: Box<str>,
	pub created_by: UserId,
	pub updated_by: UserId,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub created_at: Timestamp,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateLocationData<'a> {
	pub name: &'a str,
}

#[derive(Debug, Default)]
pub struct UpdateLocationData<'a> {
	pub name: Option<&'a str>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRangeData {
	pub salary_range_id: i64,
	pub label: Box<str>,
	pub created_by: UserId,
	pub updated_by: UserId,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub created_at: Timestamp,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateSalaryRangeData<'a> {
	pub label: &'a str,
}

#[derive(Debug, Default)]
pub struct UpdateSalaryRangeData<'a> {
	pub label: Option<&'a str>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryData {
	pub category_id: i64,
	pub name: Box<str>,
	pub created_by: UserId,
	pub updated_by: UserId,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub created_at: Timestamp,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateCategoryData<'a> {
	pub name: &'a str,
}

#[derive(Debug, Default)]
pub struct UpdateCategoryData<'a> {
	pub name: Option<&'a str>,
}

// Company types
// ==============

#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyData {
	pub company_id: i64,
	pub name: Box<str>,
	pub website: Box<str>,
	pub logo_path: Option<Box<str>>,
	pub created_by: UserId,
	pub updated_by: UserId,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub created_at: Timestamp,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub updated_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateCompanyData<'a> {
	pub name: &'a str,
	pub website: &'a str,
	pub logo_path: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct UpdateCompanyData<'a> {
	pub name: Option<&'a str>,
	pub website: Option<&'a str>,
	pub logo_path: Patch<&'a str>,
}

// Job types
// ==========

/// A job listing with the names of its four references joined in
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobData {
	pub job_id: i64,
	pub title: Box<str>,
	pub description: Box<str>,
	pub location_id: i64,
	pub location: Box<str>,
	pub salary_range_id: i64,
	pub salary_range: Box<str>,
	pub category_id: i64,
	pub category: Box<str>,
	pub company_id: i64,
	pub company: Box<str>,
	pub created_by: UserId,
	pub updated_by: UserId,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub created_at: Timestamp,
	#[serde(serialize_with = "serialize_timestamp_iso")]
	pub updated_at: Timestamp,
}

/// All four references are required; there is no such thing as a job without
/// a location, salary range, category or company.
#[derive(Debug)]
pub struct CreateJobData<'a> {
	pub title: &'a str,
	pub description: &'a str,
	pub location_id: i64,
	pub salary_range_id: i64,
	pub category_id: i64,
	pub company_id: i64,
}

#[derive(Debug, Default)]
pub struct UpdateJobData<'a> {
	pub title: Option<&'a str>,
	pub description: Option<&'a str>,
	pub location_id: Option<i64>,
	pub salary_range_id: Option<i64>,
	pub category_id: Option<i64>,
	pub company_id: Option<i64>,
}

/// Options for listing jobs
#[derive(Debug, Default)]
pub struct ListJobsOptions<'a> {
	pub location_id: Option<i64>,
	pub salary_range_id: Option<i64>,
	pub category_id: Option<i64>,
	pub company_id: Option<i64>,
	/// Substring match on the title
	pub q: Option<&'a str>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

/// A jobdesk store adapter
///
/// Every storage backend implements this trait. The adapter owns schema
/// management, constraint mapping and transactional integrity; every
/// mutation runs in a single transaction. Uniqueness violations surface as
/// `ValidationError`, unsatisfiable references as `ReferentialError`, and
/// absent rows as `NotFound`.
#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	/// # Bootstrap
	/// Provisions the first role, the admin user and the permission catalog
	/// on an empty database. Fails with `ValidationError` once any user
	/// exists.
	async fn bootstrap_admin(&self, data: &BootstrapAdmin<'_>) -> JdResult<AuthCtx>;

	/// # Roles
	/// Creates a role; the name must be unique per deployment
	async fn create_role(&self, actor: UserId, data: &CreateRoleData<'_>) -> JdResult<RoleData>;

	/// Reads a role by id
	async fn read_role(&self, role_id: i64) -> JdResult<RoleData>;

	/// Lists roles
	async fn list_roles(&self, opts: &ListOptions<'_>) -> JdResult<Vec<RoleData>>;

	/// Updates a role
	async fn update_role(
		&self,
		actor: UserId,
		role_id: i64,
		data: &UpdateRoleData<'_>,
	) -> JdResult<RoleData>;

	/// Deletes a role; fails with `ReferentialError` while users hold it
	async fn delete_role(&self, role_id: i64) -> JdResult<()>;

	/// Grants a permission to a role
	async fn add_role_permission(
		&self,
		actor: UserId,
		role_id: i64,
		permission_id: i64,
	) -> JdResult<()>;

	/// Revokes a permission from a role
	async fn remove_role_permission(&self, role_id: i64, permission_id: i64) -> JdResult<()>;

	/// Lists the permissions granted to a role
	async fn list_role_permissions(&self, role_id: i64) -> JdResult<Vec<PermissionData>>;

	/// Lists just the permission keys granted to a role, for the evaluator
	async fn list_role_permission_keys(&self, role_id: i64) -> JdResult<Vec<Box<str>>>;

	/// # Users
	/// Creates a user, hashing and storing the initial password when given
	async fn create_user(&self, actor: UserId, data: &CreateUserData<'_>) -> JdResult<UserData>;

	/// Reads a user by id
	async fn read_user(&self, user_id: UserId) -> JdResult<UserData>;

	/// Reads a user by username
	async fn read_user_by_username(&self, username: &str) -> JdResult<UserData>;

	/// Lists users
	async fn list_users(&self, opts: &ListUsersOptions<'_>) -> JdResult<Vec<UserData>>;

	/// Updates a user
	async fn update_user(
		&self,
		actor: UserId,
		user_id: UserId,
		data: &UpdateUserData<'_>,
	) -> JdResult<UserData>;

	/// Deletes a user. Roles whose audit columns reference the user are
	/// cascade-deleted with them; anything else still referencing the user
	/// blocks the deletion.
	async fn delete_user(&self, user_id: UserId) -> JdResult<()>;

	/// Sets or replaces a user's password
	async fn update_user_password(
		&self,
		actor: UserId,
		user_id: UserId,
		password: &str,
	) -> JdResult<()>;

	/// Verifies credentials. Unknown username, wrong password and inactive
	/// account are indistinguishable from the outside: all `Unauthenticated`.
	async fn check_user_password(&self, username: &str, password: &str) -> JdResult<AuthCtx>;

	/// # Permissions
	/// Creates a permission; the key must be unique
	async fn create_permission(
		&self,
		actor: UserId,
		data: &CreatePermissionData<'_>,
	) -> JdResult<PermissionData>;

	/// Reads a permission by id
	async fn read_permission(&self, permission_id: i64) -> JdResult<PermissionData>;

	/// Reads a permission by key
	async fn read_permission_by_key(&self, key: &str) -> JdResult<PermissionData>;

	/// Lists permissions
	async fn list_permissions(&self, opts: &ListOptions<'_>) -> JdResult<Vec<PermissionData>>;

	/// Updates a permission's label and description
	async fn update_permission(
		&self,
		actor: UserId,
		permission_id: i64,
		data: &UpdatePermissionData<'_>,
	) -> JdResult<PermissionData>;

	/// Deletes a permission and its junction rows
	async fn delete_permission(&self, permission_id: i64) -> JdResult<()>;

	/// # Locations
	async fn create_location(
		&self,
		actor: UserId,
		data: &CreateLocationData<'_>,
	) -> JdResult<LocationData>;
	async fn read_location(&self, location_id: i64) -> JdResult<LocationData>;
	async fn list_locations(&self, opts: &ListOptions<'_>) -> JdResult<Vec<LocationData>>;
	async fn update_location(
		&self,
		actor: UserId,
		location_id: i64,
		data: &UpdateLocationData<'_>,
	) -> JdResult<LocationData>;
	async fn delete_location(&self, location_id: i64) -> JdResult<()>;

	/// # Salary ranges
	async fn create_salary_range(
		&self,
		actor: UserId,
		data: &CreateSalaryRangeData<'_>,
	) -> JdResult<SalaryRangeData>;
	async fn read_salary_range(&self, salary_range_id: i64) -> JdResult<SalaryRangeData>;
	async fn list_salary_ranges(&self, opts: &ListOptions<'_>) -> JdResult<Vec<SalaryRangeData>>;
	async fn update_salary_range(
		&self,
		actor: UserId,
		salary_range_id: i64,
		data: &UpdateSalaryRangeData<'_>,
	) -> JdResult<SalaryRangeData>;
	async fn delete_salary_range(&self, salary_range_id: i64) -> JdResult<()>;

	/// # Categories
	async fn create_category(
		&self,
		actor: UserId,
		data: &CreateCategoryData<'_>,
	) -> JdResult<CategoryData>;
	async fn read_category(&self, category_id: i64) -> JdResult<CategoryData>;
	async fn list_categories(&self, opts: &ListOptions<'_>) -> JdResult<Vec<CategoryData>>;
	async fn update_category(
		&self,
		actor: UserId,
		category_id: i64,
		data: &UpdateCategoryData<'_>,
	) -> JdResult<CategoryData>;
	async fn delete_category(&self, category_id: i64) -> JdResult<()>;

	/// # Companies
	async fn create_company(
		&self,
		actor: UserId,
		data: &CreateCompanyData<'_>,
	) -> JdResult<CompanyData>;
	async fn read_company(&self, company_id: i64) -> JdResult<CompanyData>;
	async fn list_companies(&self, opts: &ListOptions<'_>) -> JdResult<Vec<CompanyData>>;
	async fn update_company(
		&self,
		actor: UserId,
		company_id: i64,
		data: &UpdateCompanyData<'_>,
	) -> JdResult<CompanyData>;
	async fn delete_company(&self, company_id: i64) -> JdResult<()>;

	/// # Jobs
	async fn create_job(&self, actor: UserId, data: &CreateJobData<'_>) -> JdResult<JobData>;
	async fn read_job(&self, job_id: i64) -> JdResult<JobData>;
	async fn list_jobs(&self, opts: &ListJobsOptions<'_>) -> JdResult<Vec<JobData>>;
	async fn update_job(
		&self,
		actor: UserId,
		job_id: i64,
		data: &UpdateJobData<'_>,
	) -> JdResult<JobData>;
	async fn delete_job(&self, job_id: i64) -> JdResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	pub fn test_role_data_serialization() {
		let role = RoleData {
			role_id: 3,
			name: "editor".into(),
			description: None,
			created_by: UserId(1),
			updated_by: UserId(2),
			created_at: Timestamp(1_700_000_000_000),
			updated_at: Timestamp(1_700_000_000_500),
		};

		let json = serde_json::to_value(&role).expect("role should serialize");
		assert_eq!(json["roleId"], 3);
		assert_eq!(json["createdBy"], 1);
		assert_eq!(json["updatedBy"], 2);
		assert_eq!(json["createdAt"], "2023-11-14T22:13:20.000Z");
		// skip_serializing_none drops the absent description
		assert!(json.get("description").is_none());
	}
}

// vim: ts=4
