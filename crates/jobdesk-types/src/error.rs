//! Error type shared by all jobdesk crates.

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type JdResult<T> = std::result::Result<T, Error>;

/// All recoverable failures surfaced by store adapters and operations.
///
/// Every variant is an expected outcome of some operation; none of them
/// indicate a bug. Callers match on the variant, web layers rely on the
/// `IntoResponse` impl for the status code mapping.
#[derive(Debug)]
pub enum Error {
	/// The addressed row does not exist
	NotFound,
	/// A client-supplied value violates a per-column or per-entity rule
	/// (uniqueness, required fields)
	ValidationError(String),
	/// A foreign key reference cannot be satisfied, or a delete would
	/// orphan referencing rows
	ReferentialError(String),
	/// The authenticated caller lacks the required permission
	Unauthorized,
	/// No valid identity: unknown credentials, wrong password, or an
	/// inactive account
	Unauthenticated,
	/// The database driver failed; details are logged, not surfaced
	DbError,
	/// An invariant the code relies on was broken
	Internal(String),
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ReferentialError(msg) => write!(f, "referential error: {}", msg),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::Unauthenticated => write!(f, "unauthenticated"),
			Error::DbError => write!(f, "database error"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = match &self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
			Error::ReferentialError(_) => StatusCode::CONFLICT,
			Error::Unauthorized => StatusCode::FORBIDDEN,
			Error::Unauthenticated => StatusCode::UNAUTHORIZED,
			Error::DbError | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};
		(status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_carries_detail() {
		let err = Error::ValidationError("role 'staff' already exists".into());
		assert_eq!(err.to_string(), "validation error: role 'staff' already exists");
		assert_eq!(Error::NotFound.to_string(), "not found");
	}
}

// vim: ts=4
