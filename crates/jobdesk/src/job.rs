//! Job listing operations

use crate::prelude::*;
use crate::store_adapter::{AuthCtx, CreateJobData, JobData, ListJobsOptions, UpdateJobData};
use crate::{authz, perm};

pub async fn list_jobs(
	app: &App,
	auth: &AuthCtx,
	opts: &ListJobsOptions<'_>,
) -> JdResult<Vec<JobData>> {
	authz::require(app, auth.user_id, perm::JOB_READ).await?;
	app.store.list_jobs(opts).await
}

pub async fn get_job(app: &App, auth: &AuthCtx, job_id: i64) -> JdResult<JobData> {
	authz::require(app, auth.user_id, perm::JOB_READ).await?;
	app.store.read_job(job_id).await
}

pub async fn create_job(app: &App, auth: &AuthCtx, data: &CreateJobData<'_>) -> JdResult<JobData> {
	authz::require(app, auth.user_id, perm::JOB_CREATE).await?;
	let job = app.store.create_job(auth.user_id, data).await?;
	info!(title = %job.title, company = %job.company, by = %auth.username, "Created job");
	Ok(job)
}

pub async fn update_job(
	app: &App,
	auth: &AuthCtx,
	job_id: i64,
	data: &UpdateJobData<'_>,
) -> JdResult<JobData> {
	authz::require(app, auth.user_id, perm::JOB_UPDATE).await?;
	app.store.update_job(auth.user_id, job_id, data).await
}

pub async fn delete_job(app: &App, auth: &AuthCtx, job_id: i64) -> JdResult<()> {
	authz::require(app, auth.user_id, perm::JOB_DELETE).await?;
	app.store.delete_job(job_id).await?;
	info!(job_id = job_id, by = %auth.username, "Deleted job");
	Ok(())
}

// vim: ts=4
