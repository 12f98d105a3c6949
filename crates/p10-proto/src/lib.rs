//! P10 (Undernet) server-to-server and RFC1459/2812 client wire protocol.
//!
//! This crate owns only the wire format: numeric addressing, case folding,
//! line grammar, the long/short verb table, and numeric reply codes. It has
//! no knowledge of sockets, registries, or channel state.

pub mod casemap;
pub mod command;
pub mod error;
pub mod message;
pub mod numeric;
pub mod prefix;
pub mod response;

pub use error::ProtocolError;
pub use message::Message;
pub use numeric::{Numeric, NumericError};
pub use prefix::Prefix;
pub use response::Response;
