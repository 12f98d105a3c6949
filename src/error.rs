//! Subsystem error enums and the aggregate [`CoreError`].
//!
//! Handlers never raise these across the dispatcher boundary; they use them
//! internally (with `?`) to assemble a [`crate::dispatcher::HandlerOutcome`].

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdSpaceError {
    #[error("server numeric space exhausted")]
    ServerSpaceExhausted,
    #[error("user numeric space on server {0} exhausted")]
    NumericSpaceExhausted(u16),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("nickname {0:?} is already in use")]
    NickInUse(String),
    #[error("no such nick: {0:?}")]
    NoSuchNick(String),
    #[error("no such server: {0:?}")]
    NoSuchServer(String),
    #[error("no such channel: {0:?}")]
    NoSuchChannel(String),
    #[error("numeric {0:?} is already registered")]
    NumericInUse(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel is full")]
    ChannelIsFull,
    #[error("channel is invite-only")]
    InviteOnlyChan,
    #[error("banned from channel")]
    BannedFromChan,
    #[error("bad channel key")]
    BadChannelKey,
    #[error("user has joined too many channels")]
    TooManyChannels,
    #[error("malformed channel name: {0:?}")]
    BadChannelName(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("cannot send to channel")]
    CannotSendToChan,
    #[error("no such nick: {0:?}")]
    NoSuchNick(String),
    #[error("user is silenced")]
    Silenced,
    #[error("too many message targets")]
    TooManyTargets,
    #[error("mask has no top-level component")]
    NoTopLevel,
    #[error("mask top-level component contains a wildcard")]
    WildTopLevel,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollisionError {
    #[error("erroneus nickname: {0:?}")]
    ErroneusNickname(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// The aggregate error type returned by fallible core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    IdSpace(#[from] IdSpaceError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error(transparent)]
    Relay(#[from] RelayError),
    #[error(transparent)]
    Collision(#[from] CollisionError),
    #[error(transparent)]
    Proto(#[from] p10_proto::ProtocolError),
}
