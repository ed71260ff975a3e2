//! APNs Core Types
//!
//! Data model for batched push notification dispatch: receivers,
//! notifications, wire requests/responses and per-message outcomes.

mod error;
mod message;
mod notification;
mod outcome;
mod request;

pub use error::*;
pub use message::*;
pub use notification::*;
pub use outcome::*;
pub use request::*;
