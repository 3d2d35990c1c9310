// Sub-modules organized by resource
pub mod api;
pub mod comment;
pub mod label;
pub mod project;
pub mod task;
pub mod user;

pub use api::*;
pub use comment::*;
pub use label::*;
pub use project::*;
pub use task::*;
pub use user::*;
