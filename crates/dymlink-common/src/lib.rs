pub mod css;
pub mod errors;
pub mod id;
pub mod types;

pub use errors::{BridgeError, ConfigError};
pub use id::{new_id, RequestId};
pub use types::{MenuAlign, Rect};

pub type Result<T> = std::result::Result<T, BridgeError>;
