// Application layer: the caller-facing contract over the domain operations.
// Results here collapse every refusal into the `failed` status; the reason
// is only visible in the logs.

pub mod operation;
pub mod service;
pub mod status;

pub use operation::*;
pub use service::*;
pub use status::*;
