//! Database schema initialization and migrations

use sqlx::{Sqlite, SqlitePool, Transaction};

/// Get the current database version from vars table
async fn get_db_version(tx: &mut Transaction<'_, Sqlite>) -> i64 {
	sqlx::query_scalar::<_, String>("SELECT value FROM vars WHERE key = 'db_version'")
		.fetch_optional(&mut **tx)
		.await
		.ok()
		.flatten()
		.and_then(|v| v.parse().ok())
		.unwrap_or(0)
}

/// Set the database version in vars table
async fn set_db_version(tx: &mut Transaction<'_, Sqlite>, version: i64) {
	let _ = sqlx::query("INSERT OR REPLACE INTO vars (key, value) VALUES ('db_version', ?)")
		.bind(version.to_string())
		.execute(&mut **tx)
		.await;
}

// Current schema version - update this when adding new migrations
const CURRENT_DB_VERSION: i64 = 2;

// Audit timestamps are unix epoch milliseconds
const NOW_MS: &str = "CAST(unixepoch('now','subsec') * 1000 AS INTEGER)";

/// Initialize the database schema and run migrations
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Create vars table first (needed for version tracking)
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS vars (
		key text NOT NULL,
		value text NOT NULL,
		created_at INTEGER DEFAULT (unixepoch()),
		updated_at INTEGER DEFAULT (unixepoch()),
		PRIMARY KEY(key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	let mut version = get_db_version(&mut tx).await;

	// Schema creation - safe to run every time (uses IF NOT EXISTS)

	// Roles
	// roles.created_by/updated_by and users.role_id form a reference cycle;
	// bootstrap resolves it with deferred foreign keys inside one transaction.
	// Role deletion cascades from the user who owns the audit reference.
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS roles (
			role_id INTEGER PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			description TEXT,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (created_by) REFERENCES users(user_id) ON DELETE CASCADE,
			FOREIGN KEY (updated_by) REFERENCES users(user_id) ON DELETE CASCADE
		)"
	))
	.execute(&mut *tx)
	.await?;

	// Users
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS users (
			user_id INTEGER PRIMARY KEY AUTOINCREMENT,
			username TEXT NOT NULL,
			email TEXT NOT NULL,
			role_id INTEGER NOT NULL,
			is_active INTEGER NOT NULL DEFAULT 1,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (role_id) REFERENCES roles(role_id) ON DELETE RESTRICT,
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_username ON users (username)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users (email)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_role ON users (role_id)")
		.execute(&mut *tx)
		.await?;

	// Passwords
	// One credential row per user, removed together with the user
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS passwords (
			password_id INTEGER PRIMARY KEY AUTOINCREMENT,
			user_id INTEGER NOT NULL,
			password_hash TEXT NOT NULL,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (user_id) REFERENCES users(user_id) ON DELETE CASCADE,
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_passwords_user ON passwords (user_id)")
		.execute(&mut *tx)
		.await?;

	// Permissions
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS permissions (
			permission_id INTEGER PRIMARY KEY AUTOINCREMENT,
			key TEXT NOT NULL,
			label TEXT NOT NULL,
			description TEXT,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_permissions_key ON permissions (key)")
		.execute(&mut *tx)
		.await?;

	// Role permissions (grants)
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS role_permissions (
			role_permission_id INTEGER PRIMARY KEY AUTOINCREMENT,
			role_id INTEGER NOT NULL,
			permission_id INTEGER NOT NULL,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (role_id) REFERENCES roles(role_id) ON DELETE CASCADE,
			FOREIGN KEY (permission_id) REFERENCES permissions(permission_id) ON DELETE CASCADE,
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE UNIQUE INDEX IF NOT EXISTS idx_role_permissions_pair ON role_permissions (role_id, permission_id)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_role_permissions_permission ON role_permissions (permission_id)",
	)
	.execute(&mut *tx)
	.await?;

	// Locations
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS locations (
			location_id INTEGER PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_locations_name ON locations (name)")
		.execute(&mut *tx)
		.await?;

	// Salary ranges (labels may repeat, no unique index)
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS salary_ranges (
			salary_range_id INTEGER PRIMARY KEY AUTOINCREMENT,
			label TEXT NOT NULL,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;

	// Categories
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS categories (
			category_id INTEGER PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_name ON categories (name)")
		.execute(&mut *tx)
		.await?;

	// Companies
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS companies (
			company_id INTEGER PRIMARY KEY AUTOINCREMENT,
			name TEXT NOT NULL,
			website TEXT NOT NULL,
			logo_path TEXT,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_companies_name ON companies (name)")
		.execute(&mut *tx)
		.await?;

	// Jobs
	sqlx::query(&format!(
		"CREATE TABLE IF NOT EXISTS jobs (
			job_id INTEGER PRIMARY KEY AUTOINCREMENT,
			title TEXT NOT NULL,
			description TEXT NOT NULL,
			location_id INTEGER NOT NULL,
			salary_range_id INTEGER NOT NULL,
			category_id INTEGER NOT NULL,
			company_id INTEGER NOT NULL,
			created_by INTEGER NOT NULL,
			updated_by INTEGER NOT NULL,
			created_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			updated_at INTEGER NOT NULL DEFAULT ({NOW_MS}),
			FOREIGN KEY (location_id) REFERENCES locations(location_id) ON DELETE RESTRICT,
			FOREIGN KEY (salary_range_id) REFERENCES salary_ranges(salary_range_id) ON DELETE RESTRICT,
			FOREIGN KEY (category_id) REFERENCES categories(category_id) ON DELETE RESTRICT,
			FOREIGN KEY (company_id) REFERENCES companies(company_id) ON DELETE RESTRICT,
			FOREIGN KEY (created_by) REFERENCES users(user_id),
			FOREIGN KEY (updated_by) REFERENCES users(user_id)
		)"
	))
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_jobs_title ON jobs (title)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_location ON jobs (location_id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_salary_range ON jobs (salary_range_id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_category ON jobs (category_id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_company ON jobs (company_id)")
		.execute(&mut *tx)
		.await?;

	// Triggers for automatic updated_at on UPDATE
	// Inserts get both timestamps from the column defaults; recursive
	// triggers are off, so the inner UPDATE does not re-fire.
	for (table, id) in [
		("roles", "role_id"),
		("users", "user_id"),
		("passwords", "password_id"),
		("permissions", "permission_id"),
		("role_permissions", "role_permission_id"),
		("locations", "location_id"),
		("salary_ranges", "salary_range_id"),
		("categories", "category_id"),
		("companies", "company_id"),
		("jobs", "job_id"),
	] {
		sqlx::query(&format!(
			"CREATE TRIGGER IF NOT EXISTS {table}_updated_at AFTER UPDATE ON {table} FOR EACH ROW \
				BEGIN UPDATE {table} SET updated_at = {NOW_MS} WHERE {id} = NEW.{id}; END"
		))
		.execute(&mut *tx)
		.await?;
	}

	// Fresh database: skip migrations (schema already has all columns)
	if version == 0 {
		set_db_version(&mut tx, CURRENT_DB_VERSION).await;
		#[allow(unused_assignments)]
		{
			version = CURRENT_DB_VERSION;
		}
	}

	// Migrations for existing databases
	// Version 2: Add logo_path column to companies
	if version == 1 {
		sqlx::query("ALTER TABLE companies ADD COLUMN logo_path TEXT")
			.execute(&mut *tx)
			.await?;
		set_db_version(&mut tx, 2).await;
		#[allow(unused_assignments)]
		{
			version = 2;
		}
	}

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
