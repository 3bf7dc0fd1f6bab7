pub use crate::app::App;
pub use crate::error::{Error, JdResult};
pub use crate::store_adapter::StoreAdapter;
pub use crate::types::{Patch, Timestamp, UserId};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
