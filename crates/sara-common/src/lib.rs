pub mod errors;
pub mod id;
pub mod paths;

pub use errors::{ConfigError, PlatformError, SaraError};
pub use id::{new_id, SessionId};
