pub mod auth;
pub mod logger;

pub use auth::{SessionUser, TokenService};
