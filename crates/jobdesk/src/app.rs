//! App state and builder

use std::sync::Arc;

use crate::prelude::*;
use crate::store_adapter::StoreAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub store: Arc<dyn StoreAdapter>,
}

pub type App = Arc<AppState>;

impl AppState {
	pub fn new(store: Arc<dyn StoreAdapter>) -> App {
		Arc::new(AppState { store })
	}
}

/// Builder for embedders. Installs the tracing subscriber, so construct it
/// once per process; tests wire `AppState::new` directly instead.
pub struct AppBuilder {
	store: Option<Arc<dyn StoreAdapter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		AppBuilder { store: None }
	}

	pub fn store(&mut self, store: Arc<dyn StoreAdapter>) -> &mut Self {
		self.store = Some(store);
		self
	}

	pub fn build(self) -> JdResult<App> {
		info!("jobdesk V{}", VERSION);
		let Some(store) = self.store else {
			error!("FATAL: No store adapter configured");
			return Err(Error::Internal("No store adapter configured".to_string()));
		};
		Ok(Arc::new(AppState { store }))
	}
}

// vim: ts=4
