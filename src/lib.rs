pub mod auth;
pub mod cli;
pub mod error;
pub mod health;
pub mod models;
pub mod pool;
pub mod server;
pub mod star;
pub mod store;
pub mod surreal_client;
pub mod types;

pub use auth::{SessionResolver, SessionTable};
pub use error::{PackageStarsError, Result, StarError};
pub use star::{StarConfig, StarOutcome, StarState};
pub use store::{MemoryStarStore, StarStore};
pub use types::{Identity, StarAction, StarRequest, StarResult};
