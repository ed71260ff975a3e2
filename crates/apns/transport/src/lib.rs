//! APNs HTTP/2 Transport
//!
//! reqwest-backed [`HttpSender`] shared by all in-flight requests of a
//! dispatch cycle.

mod sender;

pub use sender::*;
