//! Shared utilities for the SQLite store adapter
//!
//! This module contains helper functions, macros, and error mapping utilities
//! used across all domain modules.

use jobdesk_types::prelude::*;
use sqlx::sqlite::SqliteRow;

/// Simple helper for Patch fields - applies field to query with proper binding
/// Returns true if field was added (for tracking has_updates)
macro_rules! push_patch {
	// For bindable values (strings, numbers, bools)
	($query:expr, $has_updates:expr, $field:literal, $patch:expr) => {{
		match $patch {
			Patch::Undefined => $has_updates,
			Patch::Null => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=NULL"));
				true
			}
			Patch::Value(v) => {
				if $has_updates {
					$query.push(", ");
				}
				$query.push(concat!($field, "=")).push_bind(v);
				true
			}
		}
	}};
}

// Re-export for use in other modules
pub(crate) use push_patch;

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// True if the error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
	matches!(err, sqlx::Error::Database(db_err)
		if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation))
}

/// True if the error is a FOREIGN KEY constraint violation
pub(crate) fn is_fk_violation(err: &sqlx::Error) -> bool {
	matches!(err, sqlx::Error::Database(db_err)
		if matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation))
}

/// Map a single-row query result, translating SQL errors to JdResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> JdResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> JdResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// Map a DELETE result that addresses a single row
///
/// Zero affected rows means the row did not exist. A foreign key violation
/// means other rows still reference it and the delete is refused.
pub(crate) fn map_delete(
	result: Result<sqlx::sqlite::SqliteQueryResult, sqlx::Error>,
	referenced_msg: &str,
) -> JdResult<()> {
	match result {
		Ok(res) if res.rows_affected() == 0 => Err(Error::NotFound),
		Ok(_) => Ok(()),
		Err(err) if is_fk_violation(&err) => Err(Error::ReferentialError(referenced_msg.into())),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

// vim: ts=4
