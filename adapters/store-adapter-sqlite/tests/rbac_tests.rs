//! Bootstrap, credential and permission grant tests

use jobdesk_store_adapter_sqlite::StoreAdapterSqlite;
use jobdesk_types::error::Error;
use jobdesk_types::perm;
use jobdesk_types::store_adapter::*;
use jobdesk_types::types::UserId;
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
async fn test_bootstrap_seeds_catalog() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	assert_eq!(admin.user_id, UserId(1));
	assert_eq!(admin.username.as_ref(), "admin");
	assert_eq!(admin.role_id, 1);

	let role = adapter.read_role(1).await.expect("Admin role should exist");
	assert_eq!(role.name.as_ref(), "admin");

	let permissions = adapter
		.list_permissions(&ListOptions { limit: Some(100), ..Default::default() })
		.await
		.expect("Should list permissions");
	assert_eq!(permissions.len(), perm::ALL.len(), "Whole catalog should be seeded");

	let keys = adapter.list_role_permission_keys(1).await.expect("Should list keys");
	assert_eq!(keys.len(), perm::ALL.len(), "Admin role should hold every permission");
	assert!(keys.iter().any(|k| k.as_ref() == perm::JOB_DELETE));
}

#[tokio::test]
async fn test_bootstrap_runs_only_once() {
	let (adapter, _temp) = create_test_adapter().await;
	provision(&adapter).await;

	let again = adapter
		.bootstrap_admin(&BootstrapAdmin {
			username: "admin2",
			email: "admin2@example.com",
			password: "another password",
			role_name: None,
		})
		.await;
	assert!(matches!(again, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_login_roundtrip() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let ctx = adapter
		.check_user_password("admin", "correct horse battery staple")
		.await
		.expect("Correct credentials should pass");
	assert_eq!(ctx.user_id, admin.user_id);
	assert_eq!(ctx.role_id, 1);

	let wrong = adapter.check_user_password("admin", "wrong password").await;
	assert!(matches!(wrong, Err(Error::Unauthenticated)));

	let unknown = adapter.check_user_password("nobody", "correct horse battery staple").await;
	assert!(matches!(unknown, Err(Error::Unauthenticated)));
}

#[tokio::test]
async fn test_inactive_user_cannot_login() {
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
				username: "frank",
				email: "frank@example.com",
				role_id: role.role_id,
				password: Some("frank's password"),
				active: None,
			},
		)
		.await
		.expect("Should create user");

	adapter
		.check_user_password("frank", "frank's password")
		.await
		.expect("Active user should log in");

	adapter
		.update_user(
			admin.user_id,
			user.user_id,
			&UpdateUserData { active: Some(false), ..Default::default() },
		)
		.await
		.expect("Should deactivate user");

	let res = adapter.check_user_password("frank", "frank's password").await;
	assert!(matches!(res, Err(Error::Unauthenticated)));
}

#[tokio::test]
async fn test_user_without_password_cannot_login() {
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
				username: "grace",
				email: "grace@example.com",
				role_id: role.role_id,
				password: None,
				active: None,
			},
		)
		.await
		.expect("Should create user");

	let res = adapter.check_user_password("grace", "anything").await;
	assert!(matches!(res, Err(Error::Unauthenticated)));
}

#[tokio::test]
async fn test_update_user_password() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	adapter
		.update_user_password(admin.user_id, admin.user_id, "a new password")
		.await
		.expect("Should replace password");

	let old = adapter.check_user_password("admin", "correct horse battery staple").await;
	assert!(matches!(old, Err(Error::Unauthenticated)), "Old password should stop working");
	adapter
		.check_user_password("admin", "a new password")
		.await
		.expect("New password should work");

	let missing = adapter.update_user_password(admin.user_id, UserId(999), "whatever").await;
	assert!(matches!(missing, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_grant_and_revoke() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let role = adapter
		.create_role(admin.user_id, &CreateRoleData { name: "editor", description: None })
		.await
		.expect("Should create role");
	let job_read = adapter
		.read_permission_by_key(perm::JOB_READ)
		.await
		.expect("Seeded permission should exist");

	adapter
		.add_role_permission(admin.user_id, role.role_id, job_read.permission_id)
		.await
		.expect("Should grant permission");

	let keys = adapter.list_role_permission_keys(role.role_id).await.expect("Should list keys");
	assert_eq!(keys.len(), 1);
	assert_eq!(keys[0].as_ref(), perm::JOB_READ);

	let granted =
		adapter.list_role_permissions(role.role_id).await.expect("Should list permissions");
	assert_eq!(granted.len(), 1);
	assert_eq!(granted[0].key.as_ref(), perm::JOB_READ);

	let dup =
		adapter.add_role_permission(admin.user_id, role.role_id, job_read.permission_id).await;
	assert!(matches!(dup, Err(Error::ValidationError(_))), "Grants are not duplicated");

	adapter
		.remove_role_permission(role.role_id, job_read.permission_id)
		.await
		.expect("Should revoke permission");
	let keys = adapter.list_role_permission_keys(role.role_id).await.expect("Should list keys");
	assert!(keys.is_empty());

	let gone = adapter.remove_role_permission(role.role_id, job_read.permission_id).await;
	assert!(matches!(gone, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_grants_for_unknown_ids() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let job_read = adapter
		.read_permission_by_key(perm::JOB_READ)
		.await
		.expect("Seeded permission should exist");
	let res = adapter.add_role_permission(admin.user_id, 999, job_read.permission_id).await;
	assert!(matches!(res, Err(Error::ReferentialError(_))));

	let keys = adapter.list_role_permission_keys(999).await.expect("Should list keys");
	assert!(keys.is_empty(), "Unknown roles have no grants");
}

#[tokio::test]
async fn test_permission_delete_removes_grants() {
	let (adapter, _temp) = create_test_adapter().await;
	let admin = provision(&adapter).await;

	let role = adapter
		.create_role(admin.user_id, &CreateRoleData { name: "editor", description: None })
		.await
		.expect("Should create role");
	let extra = adapter
		.create_permission(
			admin.user_id,
			&CreatePermissionData { key: "report.read", label: "Read reports", description: None },
		)
		.await
		.expect("Should create permission");
	adapter
		.add_role_permission(admin.user_id, role.role_id, extra.permission_id)
		.await
		.expect("Should grant permission");

	adapter.delete_permission(extra.permission_id).await.expect("Should delete permission");

	let keys = adapter.list_role_permission_keys(role.role_id).await.expect("Should list keys");
	assert!(keys.is_empty(), "Grant rows should go with the permission");
}

// vim: ts=4
