//! Store adapter CRUD operation tests
//!
//! Exercises create, read, update, delete and list behavior for every
//! entity, including uniqueness and referential integrity mapping.

use jobdesk_store_adapter_sqlite::StoreAdapterSqlite;
use jobdesk_types::error::Error;
use jobdesk_types::store_adapter::*;
use jobdesk_types::types::Patch;
use tempfile::TempDir;

async fn create_test_adapter() -> (StoreAdapterSqlite, TempDir) {
	let temp_dir = TempDir::new().expect("Failed to create temp directory");

	let adapter = StoreAdapterSqlite::new(temp_dir.path().join("store.db"))
		.await
		.expect("Failed to create adapter");

	(adapter, temp_dir)
}

/// Provision the admin account every test acts through
async fn provision(adapter: &StoreAdapterSqlite) -> AuthCtx {
	adapter
		.bootstrap_admin(&BootstrapAdmin {
			username: "admin",
			email: "admin@example.com",
			password: "correct horse battery staple",
			role_name: None,
		})
		.await
		.expect("bootstrap should succeed")
}

#[tokio::test]
async fn test_role_crud() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let role = adapter
		.create_role(
			admin.user_id,
			&CreateRoleData { name: "editor", description: Some("Can edit job listings") },
		)
		.await
		.expect("Should create role");
	assert_eq!(role.name.as_ref(), "editor");
	assert_eq!(role.description.as_deref(), Some("Can edit job listings"));
	assert_eq!(role.created_by, admin.user_id);
	assert_eq!(role.updated_by, admin.user_id);

	let read = adapter.read_role(role.role_id).await.expect("Should read role");
	assert_eq!(read.name.as_ref(), "editor");

	let updated = adapter
		.update_role(
			admin.user_id,
			role.role_id,
			&UpdateRoleData { name: Some("senior editor"), description: Patch::Null },
		)
		.await
		.expect("Should update role");
	assert_eq!(updated.name.as_ref(), "senior editor");
	assert!(updated.description.is_none(), "Null patch should clear the description");

	adapter.delete_role(role.role_id).await.expect("Should delete role");
	assert!(matches!(adapter.read_role(role.role_id).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_role_name_uniqueness() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	adapter
		.create_role(admin.user_id, &CreateRoleData { name: "editor", description: None })
		.await
		.expect("Should create role");

	let dup = adapter
		.create_role(admin.user_id, &CreateRoleData { name: "editor", description: None })
		.await;
	assert!(matches!(dup, Err(Error::ValidationError(_))), "Duplicate name should be rejected");

	// Renaming onto an existing name is rejected the same way
	let viewer = adapter
		.create_role(admin.user_id, &CreateRoleData { name: "viewer", description: None })
		.await
		.expect("Should create role");
	let clash = adapter
		.update_role(
			admin.user_id,
			viewer.role_id,
			&UpdateRoleData { name: Some("editor"), ..Default::default() },
		)
		.await;
	assert!(matches!(clash, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_role_delete_refused_while_assigned() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let role = adapter
		.create_role(admin.user_id, &CreateRoleData { name: "staff", description: None })
		.await
		.expect("Should create role");
	adapter
		.create_user(
			admin.user_id,
			&CreateUserData {
				username: "bob",
				email: "bob@example.com",
				role_id: role.role_id,
				password: None,
				active: None,
			},
		)
		.await
		.expect("Should create user");

	let res = adapter.delete_role(role.role_id).await;
	assert!(matches!(res, Err(Error::ReferentialError(_))));
}

#[tokio::test]
async fn test_user_crud() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let role = adapter
		.create_role(admin.user_id, &CreateRoleData { name: "staff", description: None })
		.await
		.expect("Should create role");

	let user = adapter
		.create_user(
			admin.user_id,
			&CreateUserData {
				username: "carol",
				email: "carol@example.com",
				role_id: role.role_id,
				password: Some("hunter2hunter2"),
				active: None,
			},
		)
		.await
		.expect("Should create user");
	assert_eq!(user.username.as_ref(), "carol");
	assert_eq!(user.role.as_ref(), "staff", "Role name should be joined in");
	assert!(user.active, "Users default to active");

	let by_name =
		adapter.read_user_by_username("carol").await.expect("Should read user by username");
	assert_eq!(by_name.user_id, user.user_id);

	let updated = adapter
		.update_user(
			admin.user_id,
			user.user_id,
			&UpdateUserData {
				email: Some("carol@jobdesk.example"),
				active: Some(false),
				..Default::default()
			},
		)
		.await
		.expect("Should update user");
	assert_eq!(updated.email.as_ref(), "carol@jobdesk.example");
	assert!(!updated.active);

	let inactive = adapter
		.list_users(&ListUsersOptions { active: Some(false), ..Default::default() })
		.await
		.expect("Should list users");
	assert_eq!(inactive.len(), 1);
	assert_eq!(inactive[0].username.as_ref(), "carol");

	let matched = adapter
		.list_users(&ListUsersOptions { q: Some("jobdesk"), ..Default::default() })
		.await
		.expect("Should list users");
	assert_eq!(matched.len(), 1, "Substring filter should match the email");

	adapter.delete_user(user.user_id).await.expect("Should delete user");
	assert!(matches!(adapter.read_user(user.user_id).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_user_uniqueness() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let role = adapter
		.create_role(admin.user_id, &CreateRoleData { name: "staff", description: None })
		.await
		.expect("Should create role");
	adapter
		.create_user(
			admin.user_id,
			&CreateUserData {
				username: "dave",
				email: "dave@example.com",
				role_id: role.role_id,
				password: None,
				active: None,
			},
		)
		.await
		.expect("Should create user");

	let dup_name = adapter
		.create_user(
			admin.user_id,
			&CreateUserData {
				username: "dave",
				email: "other@example.com",
				role_id: role.role_id,
				password: None,
				active: None,
			},
		)
		.await;
	match dup_name {
		Err(Error::ValidationError(msg)) => assert!(msg.contains("dave")),
		other => panic!("Expected ValidationError, got {:?}", other),
	}

	let dup_email = adapter
		.create_user(
			admin.user_id,
			&CreateUserData {
				username: "dave2",
				email: "dave@example.com",
				role_id: role.role_id,
				password: None,
				active: None,
			},
		)
		.await;
	match dup_email {
		Err(Error::ValidationError(msg)) => assert!(msg.contains("dave@example.com")),
		other => panic!("Expected ValidationError, got {:?}", other),
	}
}

#[tokio::test]
async fn test_user_with_unknown_role() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let res = adapter
		.create_user(
			admin.user_id,
			&CreateUserData {
				username: "erin",
				email: "erin@example.com",
				role_id: 999,
				password: None,
				active: None,
			},
		)
		.await;
	assert!(matches!(res, Err(Error::ReferentialError(_))));

	// Same on update
	let role = adapter
		.create_role(admin.user_id, &CreateRoleData { name: "staff", description: None })
		.await
		.expect("Should create role");
	let user = adapter
		.create_user(
			admin.user_id,
			&CreateUserData {
				username: "erin",
				email: "erin@example.com",
				role_id: role.role_id,
				password: None,
				active: None,
			},
		)
		.await
		.expect("Should create user");
	let res = adapter
		.update_user(
			admin.user_id,
			user.user_id,
			&UpdateUserData { role_id: Some(999), ..Default::default() },
		)
		.await;
	assert!(matches!(res, Err(Error::ReferentialError(_))));
}

#[tokio::test]
async fn test_update_missing_rows() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let res = adapter
		.update_user(
			admin.user_id,
			jobdesk_types::types::UserId(999),
			&UpdateUserData { email: Some("nobody@example.com"), ..Default::default() },
		)
		.await;
	assert!(matches!(res, Err(Error::NotFound)));

	let res = adapter
		.update_job(admin.user_id, 999, &UpdateJobData { title: Some("x"), ..Default::default() })
		.await;
	assert!(matches!(res, Err(Error::NotFound)));

	assert!(matches!(adapter.delete_location(999).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_permission_crud() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let perm = adapter
		.create_permission(
			admin.user_id,
			&CreatePermissionData {
				key: "report.read",
				label: "Read reports",
				description: None,
			},
		)
		.await
		.expect("Should create permission");
	assert_eq!(perm.key.as_ref(), "report.read");

	let by_key =
		adapter.read_permission_by_key("report.read").await.expect("Should read by key");
	assert_eq!(by_key.permission_id, perm.permission_id);

	let dup = adapter
		.create_permission(
			admin.user_id,
			&CreatePermissionData { key: "report.read", label: "Again", description: None },
		)
		.await;
	assert!(matches!(dup, Err(Error::ValidationError(_))));

	let updated = adapter
		.update_permission(
			admin.user_id,
			perm.permission_id,
			&UpdatePermissionData {
				label: Some("Read usage reports"),
				description: Patch::Value("Allows opening the report pages"),
			},
		)
		.await
		.expect("Should update permission");
	assert_eq!(updated.label.as_ref(), "Read usage reports");
	assert_eq!(updated.key.as_ref(), "report.read", "Keys never change");

	adapter.delete_permission(perm.permission_id).await.expect("Should delete permission");
	assert!(matches!(adapter.read_permission_by_key("report.read").await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_location_uniqueness() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	adapter
		.create_location(admin.user_id, &CreateLocationData { name: "Budapest" })
		.await
		.expect("Should create location");
	let dup = adapter.create_location(admin.user_id, &CreateLocationData { name: "Budapest" }).await;
	assert!(matches!(dup, Err(Error::ValidationError(_))));

	let list = adapter
		.list_locations(&ListOptions { q: Some("Buda"), ..Default::default() })
		.await
		.expect("Should list locations");
	assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn test_salary_range_labels_may_repeat() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let a = adapter
		.create_salary_range(admin.user_id, &CreateSalaryRangeData { label: "40-60k EUR" })
		.await
		.expect("Should create salary range");
	let b = adapter
		.create_salary_range(admin.user_id, &CreateSalaryRangeData { label: "40-60k EUR" })
		.await
		.expect("Duplicate labels are allowed");
	assert_ne!(a.salary_range_id, b.salary_range_id);
}

#[tokio::test]
async fn test_category_crud() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let cat = adapter
		.create_category(admin.user_id, &CreateCategoryData { name: "Engineering" })
		.await
		.expect("Should create category");
	let updated = adapter
		.update_category(
			admin.user_id,
			cat.category_id,
			&UpdateCategoryData { name: Some("Software Engineering") },
		)
		.await
		.expect("Should update category");
	assert_eq!(updated.name.as_ref(), "Software Engineering");

	adapter.delete_category(cat.category_id).await.expect("Should delete category");
}

#[tokio::test]
async fn test_company_logo_patch() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let company = adapter
		.create_company(
			admin.user_id,
			&CreateCompanyData {
				name: "Acme",
				website: "https://acme.example",
				logo_path: Some("logos/acme.png"),
			},
		)
		.await
		.expect("Should create company");
	assert_eq!(company.logo_path.as_deref(), Some("logos/acme.png"));

	let cleared = adapter
		.update_company(
			admin.user_id,
			company.company_id,
			&UpdateCompanyData { logo_path: Patch::Null, ..Default::default() },
		)
		.await
		.expect("Should update company");
	assert!(cleared.logo_path.is_none(), "Null patch should clear the logo");

	let untouched = adapter
		.update_company(
			admin.user_id,
			company.company_id,
			&UpdateCompanyData { website: Some("https://www.acme.example"), ..Default::default() },
		)
		.await
		.expect("Should update company");
	assert!(untouched.logo_path.is_none(), "Undefined patch should leave the logo alone");
	assert_eq!(untouched.website.as_ref(), "https://www.acme.example");
}

#[tokio::test]
async fn test_company_name_uniqueness() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	adapter
		.create_company(
			admin.user_id,
			&CreateCompanyData { name: "Acme", website: "https://acme.example", logo_path: None },
		)
		.await
		.expect("Should create company");
	let dup = adapter
		.create_company(
			admin.user_id,
			&CreateCompanyData { name: "Acme", website: "https://acme.eu", logo_path: None },
		)
		.await;
	assert!(matches!(dup, Err(Error::ValidationError(_))));
}

async fn seed_job_refs(adapter: &StoreAdapterSqlite, admin: &AuthCtx) -> (i64, i64, i64, i64) {
	let location = adapter
		.create_location(admin.user_id, &CreateLocationData { name: "Remote" })
		.await
		.expect("Should create location");
	let salary = adapter
		.create_salary_range(admin.user_id, &CreateSalaryRangeData { label: "60-80k EUR" })
		.await
		.expect("Should create salary range");
	let category = adapter
		.create_category(admin.user_id, &CreateCategoryData { name: "Engineering" })
		.await
		.expect("Should create category");
	let company = adapter
		.create_company(
			admin.user_id,
			&CreateCompanyData { name: "Acme", website: "https://acme.example", logo_path: None },
		)
		.await
		.expect("Should create company");
	(location.location_id, salary.salary_range_id, category.category_id, company.company_id)
}

#[tokio::test]
async fn test_job_crud() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;
	let (location_id, salary_range_id, category_id, company_id) =
		seed_job_refs(&adapter, &admin).await;

	let job = adapter
		.create_job(
			admin.user_id,
			&CreateJobData {
				title: "Backend engineer",
				description: "Rust backend work",
				location_id,
				salary_range_id,
				category_id,
				company_id,
			},
		)
		.await
		.expect("Should create job");
	assert_eq!(job.location.as_ref(), "Remote");
	assert_eq!(job.salary_range.as_ref(), "60-80k EUR");
	assert_eq!(job.category.as_ref(), "Engineering");
	assert_eq!(job.company.as_ref(), "Acme");

	let office = adapter
		.create_location(admin.user_id, &CreateLocationData { name: "Budapest" })
		.await
		.expect("Should create location");
	let moved = adapter
		.update_job(
			admin.user_id,
			job.job_id,
			&UpdateJobData { location_id: Some(office.location_id), ..Default::default() },
		)
		.await
		.expect("Should update job");
	assert_eq!(moved.location.as_ref(), "Budapest", "Joined name should follow the reference");

	adapter.delete_job(job.job_id).await.expect("Should delete job");
	assert!(matches!(adapter.read_job(job.job_id).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_job_requires_references() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;
	let (location_id, salary_range_id, category_id, company_id) =
		seed_job_refs(&adapter, &admin).await;

	let res = adapter
		.create_job(
			admin.user_id,
			&CreateJobData {
				title: "Ghost job",
				description: "References a location that does not exist",
				location_id: 999,
				salary_range_id,
				category_id,
				company_id,
			},
		)
		.await;
	assert!(matches!(res, Err(Error::ReferentialError(_))));

	let res = adapter
		.create_job(
			admin.user_id,
			&CreateJobData {
				title: "Ghost job",
				description: "References a company that does not exist",
				location_id,
				salary_range_id,
				category_id,
				company_id: 999,
			},
		)
		.await;
	assert!(matches!(res, Err(Error::ReferentialError(_))));
}

#[tokio::test]
async fn test_job_title_uniqueness() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;
	let (location_id, salary_range_id, category_id, company_id) =
		seed_job_refs(&adapter, &admin).await;

	let data = CreateJobData {
		title: "Backend engineer",
		description: "First posting",
		location_id,
		salary_range_id,
		category_id,
		company_id,
	};
	adapter.create_job(admin.user_id, &data).await.expect("Should create job");
	let dup = adapter.create_job(admin.user_id, &data).await;
	assert!(matches!(dup, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_job_list_filters_and_order() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;
	let (location_id, salary_range_id, category_id, company_id) =
		seed_job_refs(&adapter, &admin).await;
	let office = adapter
		.create_location(admin.user_id, &CreateLocationData { name: "Budapest" })
		.await
		.expect("Should create location");

	for (title, loc) in [
		("Backend engineer", location_id),
		("Frontend engineer", office.location_id),
		("Backend tech lead", location_id),
	] {
		adapter
			.create_job(
				admin.user_id,
				&CreateJobData {
					title,
					description: "...",
					location_id: loc,
					salary_range_id,
					category_id,
					company_id,
				},
			)
			.await
			.expect("Should create job");
	}

	let all = adapter.list_jobs(&ListJobsOptions::default()).await.expect("Should list jobs");
	assert_eq!(all.len(), 3);
	assert_eq!(all[0].title.as_ref(), "Backend tech lead", "Newest listing comes first");

	let remote = adapter
		.list_jobs(&ListJobsOptions { location_id: Some(location_id), ..Default::default() })
		.await
		.expect("Should list jobs");
	assert_eq!(remote.len(), 2);

	let backend = adapter
		.list_jobs(&ListJobsOptions { q: Some("Backend"), ..Default::default() })
		.await
		.expect("Should list jobs");
	assert_eq!(backend.len(), 2);

	let paged = adapter
		.list_jobs(&ListJobsOptions { limit: Some(1), offset: Some(1), ..Default::default() })
		.await
		.expect("Should list jobs");
	assert_eq!(paged.len(), 1);
	assert_eq!(paged[0].title.as_ref(), "Frontend engineer");
}

#[tokio::test]
async fn test_reference_delete_restricted() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;
	let (location_id, salary_range_id, category_id, company_id) =
		seed_job_refs(&adapter, &admin).await;

	let job = adapter
		.create_job(
			admin.user_id,
			&CreateJobData {
				title: "Backend engineer",
				description: "...",
				location_id,
				salary_range_id,
				category_id,
				company_id,
			},
		)
		.await
		.expect("Should create job");

	assert!(matches!(adapter.delete_location(location_id).await, Err(Error::ReferentialError(_))));
	assert!(matches!(adapter.delete_company(company_id).await, Err(Error::ReferentialError(_))));

	adapter.delete_job(job.job_id).await.expect("Should delete job");
	adapter.delete_location(location_id).await.expect("Unreferenced location should delete");
}

// vim: ts=4
