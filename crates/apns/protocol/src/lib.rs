//! APNs HTTP/2 Protocol
//!
//! Batched concurrent dispatch of push notifications: collaborator traits,
//! default collaborator implementations, request building and the bounded
//! fan-out engine.

mod auth;
mod builder;
mod dispatch;
mod encoder;
mod exception;
mod traits;
mod uri;
mod visitor;

pub use auth::*;
pub use builder::*;
pub use dispatch::*;
pub use encoder::*;
pub use exception::*;
pub use traits::*;
pub use uri::*;
pub use visitor::*;
