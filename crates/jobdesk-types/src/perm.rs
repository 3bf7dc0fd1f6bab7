//! Permission key catalog.
//!
//! Keys follow the `<entity>.<action>` convention and are matched verbatim
//! against the caller's role permission set. The `read` key of an entity
//! guards both its list and its single-row lookup; junction grant/revoke is
//! guarded by `role.update`.

pub const ROLE_READ: &str = "role.read";
pub const ROLE_CREATE: &str = "role.create";
pub const ROLE_UPDATE: &str = "role.update";
pub const ROLE_DELETE: &str = "role.delete";

pub const USER_READ: &str = "user.read";
pub const USER_CREATE: &str = "user.create";
pub const USER_UPDATE: &str = "user.update";
pub const USER_DELETE: &str = "user.delete";

pub const PERMISSION_READ: &str = "permission.read";
pub const PERMISSION_CREATE: &str = "permission.create";
pub const PERMISSION_UPDATE: &str = "permission.update";
pub const PERMISSION_DELETE: &str = "permission.delete";

pub const LOCATION_READ: &str = "location.read";
pub const LOCATION_CREATE: &str = "location.create";
pub const LOCATION_UPDATE: &str = "location.update";
pub const LOCATION_DELETE: &str = "location.delete";

pub const SALARY_RANGE_READ: &str = "salary_range.read";
pub const SALARY_RANGE_CREATE: &str = "salary_range.create";
pub const SALARY_RANGE_UPDATE: &str = "salary_range.update";
pub const SALARY_RANGE_DELETE: &str = "salary_range.delete";

pub const CATEGORY_READ: &str = "category.read";
pub const CATEGORY_CREATE: &str = "category.create";
pub const CATEGORY_UPDATE: &str = "category.update";
pub const CATEGORY_DELETE: &str = "category.delete";

pub const COMPANY_READ: &str = "company.read";
pub const COMPANY_CREATE: &str = "company.create";
pub const COMPANY_UPDATE: &str = "company.update";
pub const COMPANY_DELETE: &str = "company.delete";

pub const JOB_READ: &str = "job.read";
pub const JOB_CREATE: &str = "job.create";
pub const JOB_UPDATE: &str = "job.update";
pub const JOB_DELETE: &str = "job.delete";

/// The full catalog, seeded into the permissions table at bootstrap
pub const ALL: &[&str] = &[
	ROLE_READ,
	ROLE_CREATE,
	ROLE_UPDATE,
	ROLE_DELETE,
	USER_READ,
	USER_CREATE,
	USER_UPDATE,
	USER_DELETE,
	PERMISSION_READ,
	PERMISSION_CREATE,
	PERMISSION_UPDATE,
	PERMISSION_DELETE,
	LOCATION_READ,
	LOCATION_CREATE,
	LOCATION_UPDATE,
	LOCATION_DELETE,
	SALARY_RANGE_READ,
	SALARY_RANGE_CREATE,
	SALARY_RANGE_UPDATE,
	SALARY_RANGE_DELETE,
	CATEGORY_READ,
	CATEGORY_CREATE,
	CATEGORY_UPDATE,
	CATEGORY_DELETE,
	COMPANY_READ,
	COMPANY_CREATE,
	COMPANY_UPDATE,
	COMPANY_DELETE,
	JOB_READ,
	JOB_CREATE,
	JOB_UPDATE,
	JOB_DELETE,
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_catalog_has_no_duplicates() {
		let mut keys: Vec<&str> = ALL.to_vec();
		keys.sort_unstable();
		keys.dedup();
		assert_eq!(keys.len(), ALL.len());
	}

	#[test]
	fn test_catalog_covers_every_action() {
		for entity in
			["role", "user", "permission", "location", "salary_range", "category", "company", "job"]
		{
			for action in ["read", "create", "update", "delete"] {
				let key = format!("{}.{}", entity, action);
				assert!(ALL.contains(&key.as_str()), "missing key {}", key);
			}
		}
	}
}

// vim: ts=4
