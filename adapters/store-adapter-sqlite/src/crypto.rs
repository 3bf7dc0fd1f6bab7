const BCRYPT_COST: u32 = 10;

use jobdesk_types::prelude::*;

fn generate_password_hash_sync(password: Box<str>) -> JdResult<Box<str>> {
	let hash = bcrypt::hash(password.as_ref(), BCRYPT_COST)
		.map_err(|_| Error::Internal("password hashing failed".into()))?;

	Ok(hash.into())
}

/// Hash a password with bcrypt on a blocking worker thread
pub(crate) async fn generate_password_hash(password: &str) -> JdResult<Box<str>> {
	let password: Box<str> = password.into();
	tokio::task::spawn_blocking(move || generate_password_hash_sync(password))
		.await
		.map_err(|_| Error::Internal("password hashing task failed".into()))?
}

fn check_password_sync(password: Box<str>, password_hash: Box<str>) -> JdResult<()> {
	let res = bcrypt::verify(password.as_ref(), &password_hash)
		.map_err(|_| Error::Internal("invalid password hash".into()))?;
	if !res {
		Err(Error::Unauthenticated)
	} else {
		Ok(())
	}
}

/// Verify a password against its stored hash on a blocking worker thread
pub(crate) async fn check_password(password: &str, password_hash: Box<str>) -> JdResult<()> {
	let password: Box<str> = password.into();
	tokio::task::spawn_blocking(move || check_password_sync(password, password_hash))
		.await
		.map_err(|_| Error::Internal("password check task failed".into()))?
}

// vim: ts=4
