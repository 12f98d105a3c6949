//! Core entity types: the things the Registry indexes and the EntityGraph owns.

pub mod channel;
pub mod membership;
pub mod server;
pub mod user;

pub use channel::Channel;
pub use membership::{MemberFlags, Membership};
pub use server::Server;
pub use user::User;
