//! User management and credential operations

use sqlx::{Row, SqlitePool};

use crate::{crypto, utils::*};
use jobdesk_types::{prelude::*, store_adapter::*};

/// Parse a user row (joined with its role name) from the database
fn parse_user_row(row: sqlx::sqlite::SqliteRow) -> Result<UserData, sqlx::Error> {
	Ok(UserData {
		user_id: UserId(row.try_get("user_id")?),
		username: row.try_get("username")?,
		email: row.try_get("email")?,
		role_id: row.try_get("role_id")?,
		role: row.try_get("role")?,
		active: row.try_get("is_active")?,
		created_by: UserId(row.try_get("created_by")?),
		updated_by: UserId(row.try_get("updated_by")?),
		created_at: Timestamp(row.try_get::<i64, _>("created_at")?),
		updated_at: Timestamp(row.try_get::<i64, _>("updated_at")?),
	})
}

fn map_user_write_err(e: &sqlx::Error, username: &str, email: &str) -> Error {
	if is_unique_violation(e) {
		let msg = e.as_database_error().map(|d| d.message().to_string()).unwrap_or_default();
		if msg.contains("users.email") {
			return Error::ValidationError(format!("email '{}' is already registered", email));
		}
		return Error::ValidationError(format!("username '{}' is already taken", username));
	}
	if is_fk_violation(e) {
		return Error::ReferentialError("role does not exist".into());
	}
	inspect(e);
	Error::DbError
}

/// Create a new user, optionally with an initial password
pub(crate) async fn create_user(
	db: &SqlitePool,
	actor: UserId,
	data: &CreateUserData<'_>,
) -> JdResult<UserData> {
	let password_hash = match data.password {
		Some(password) => Some(crypto::generate_password_hash(password).await?),
		None => None,
	};

	let mut tx = db.begin().await.inspect_err(inspect).or(Err(Error::DbError))?;

	let result = sqlx::query(
		"INSERT INTO users (username, email, role_id, is_active, created_by, updated_by)
		VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
	)
	.bind(data.username)
	.bind(data.email)
	.bind(data.role_id)
	.bind(data.active.unwrap_or(true))
	.bind(actor.0)
	.execute(&mut *tx)
	.await
	.map_err(|e| map_user_write_err(&e, data.username, data.email))?;

	let user_id = result.last_insert_rowid();
	if let Some(hash) = password_hash {
		sqlx::query(
			"INSERT INTO passwords (user_id, password_hash, created_by, updated_by)
			VALUES (?1, ?2, ?3, ?3)",
		)
		.bind(user_id)
		.bind(hash.as_ref())
		.bind(actor.0)
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	}

	tx.commit().await.inspect_err(inspect).or(Err(Error::DbError))?;

	read_user(db, UserId(user_id)).await
}

/// Read a user by ID
pub(crate) async fn read_user(db: &SqlitePool, user_id: UserId) -> JdResult<UserData> {
	let res = sqlx::query(
		"SELECT u.user_id, u.username, u.email, u.role_id, r.name AS role, u.is_active,
			u.created_by, u.updated_by, u.created_at, u.updated_at
		FROM users u JOIN roles r ON r.role_id = u.role_id
		WHERE u.user_id = ?1",
	)
	.bind(user_id.0)
	.fetch_one(db)
	.await;

	map_res(res, parse_user_row)
}

/// Read a user by username
pub(crate) async fn read_user_by_username(db: &SqlitePool, username: &str) -> JdResult<UserData> {
	let res = sqlx::query(
		"SELECT u.user_id, u.username, u.email, u.role_id, r.name AS role, u.is_active,
			u.created_by, u.updated_by, u.created_at, u.updated_at
		FROM users u JOIN roles r ON r.role_id = u.role_id
		WHERE u.username = ?1",
	)
	.bind(username)
	.fetch_one(db)
	.await;

	map_res(res, parse_user_row)
}

/// List users with optional role, activity and substring filters
pub(crate) async fn list_users(
	db: &SqlitePool,
	opts: &ListUsersOptions<'_>,
) -> JdResult<Vec<UserData>> {
	let mut query = sqlx::QueryBuilder::new(
		"SELECT u.user_id, u.username, u.email, u.role_id, r.name AS role, u.is_active,
			u.created_by, u.updated_by, u.created_at, u.updated_at
		FROM users u JOIN roles r ON r.role_id = u.role_id
		WHERE 1=1",
	);
	if let Some(role_id) = opts.role_id {
		query.push(" AND u.role_id = ").push_bind(role_id);
	}
	if let Some(active) = opts.active {
		query.push(" AND u.is_active = ").push_bind(active);
	}
	if let Some(q) = opts.q {
		let pattern = format!("%{}%", q);
		query.push(" AND (u.username LIKE ").push_bind(pattern.clone());
		query.push(" OR u.email LIKE ").push_bind(pattern);
		query.push(")");
	}
	query.push(" ORDER BY u.user_id");
	query.push(" LIMIT ").push_bind(i64::from(opts.limit.unwrap_or(100)));
	query.push(" OFFSET ").push_bind(i64::from(opts.offset.unwrap_or(0)));

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;
	collect_res(rows.into_iter().map(parse_user_row))
}

/// Update a user
pub(crate) async fn update_user(
	db: &SqlitePool,
	actor: UserId,
	user_id: UserId,
	data: &UpdateUserData<'_>,
) -> JdResult<UserData> {
	let mut query = sqlx::QueryBuilder::new("UPDATE users SET ");
	let mut has_updates = false;

	if let Some(username) = data.username {
		query.push("username=").push_bind(username);
		has_updates = true;
	}
	if let Some(email) = data.email {
		if has_updates {
			query.push(", ");
		}
		query.push("email=").push_bind(email);
		has_updates = true;
	}
	if let Some(role_id) = data.role_id {
		if has_updates {
			query.push(", ");
		}
		query.push("role_id=").push_bind(role_id);
		has_updates = true;
	}
	if let Some(active) = data.active {
		if has_updates {
			query.push(", ");
		}
		query.push("is_active=").push_bind(active);
		has_updates = true;
	}

	if !has_updates {
		return read_user(db, user_id).await;
	}

	query.push(", updated_by=").push_bind(actor.0);
	query.push(" WHERE user_id=").push_bind(user_id.0);

	let result = query.build().execute(db).await;

	match result {
		Ok(r) if r.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => read_user(db, user_id).await,
		Err(e) => Err(map_user_write_err(
			&e,
			data.username.unwrap_or_default(),
			data.email.unwrap_or_default(),
		)),
	}
}

/// Delete a user
///
/// The user's credential row goes with it; rows elsewhere that still name
/// the user as creator or updater keep the delete refused.
pub(crate) async fn delete_user(db: &SqlitePool, user_id: UserId) -> JdResult<()> {
	let result =
		sqlx::query("DELETE FROM users WHERE user_id = ?1").bind(user_id.0).execute(db).await;

	map_delete(result, "user is still referenced by other records")
}

/// Set or replace a user's password
pub(crate) async fn update_user_password(
	db: &SqlitePool,
	actor: UserId,
	user_id: UserId,
	password: &str,
) -> JdResult<()> {
	let hash = crypto::generate_password_hash(password).await?;

	sqlx::query(
		"INSERT INTO passwords (user_id, password_hash, created_by, updated_by)
		VALUES (?1, ?2, ?3, ?3)
		ON CONFLICT(user_id) DO UPDATE SET
			password_hash = excluded.password_hash,
			updated_by = excluded.updated_by",
	)
	.bind(user_id.0)
	.bind(hash.as_ref())
	.bind(actor.0)
	.execute(db)
	.await
	.map_err(|e| {
		if is_fk_violation(&e) {
			return Error::NotFound;
		}
		inspect(&e);
		Error::DbError
	})?;

	Ok(())
}

/// Verify a username/password pair and return the caller identity
///
/// Unknown users, users without a credential row, inactive users and wrong
/// passwords all fail the same way.
pub(crate) async fn check_user_password(
	db: &SqlitePool,
	username: &str,
	password: &str,
) -> JdResult<AuthCtx> {
	let res = sqlx::query(
		"SELECT u.user_id, u.username, u.role_id, u.is_active, p.password_hash
		FROM users u JOIN passwords p ON p.user_id = u.user_id
		WHERE u.username = ?1",
	)
	.bind(username)
	.fetch_one(db)
	.await;

	let row = match res {
		Ok(row) => row,
		Err(sqlx::Error::RowNotFound) => return Err(Error::Unauthenticated),
		Err(err) => {
			inspect(&err);
			return Err(Error::DbError);
		}
	};

	let active: bool = row.try_get("is_active").or(Err(Error::DbError))?;
	if !active {
		return Err(Error::Unauthenticated);
	}

	let password_hash: Box<str> = row.try_get("password_hash").or(Err(Error::DbError))?;
	crypto::check_password(password, password_hash).await?;

	Ok(AuthCtx {
		user_id: UserId(row.try_get("user_id").or(Err(Error::DbError))?),
		username: row.try_get("username").or(Err(Error::DbError))?,
		role_id: row.try_get("role_id").or(Err(Error::DbError))?,
	})
}

// vim: ts=4
