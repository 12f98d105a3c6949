//! Link addressing boundary.
//!
//! The socket/event layer and TLS termination are external collaborators;
//! handlers and RelayCore address peers purely through [`LinkId`]s, never a
//! raw socket or TLS context, mirroring how the corpus's actors address
//! sessions by an opaque sender handle.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Client,
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub u64);

#[derive(Debug, Clone)]
pub struct OutboundLine {
    pub text: String,
}

pub trait LinkSink: Send + Sync {
    fn send(&self, link: LinkId, line: OutboundLine);
    fn kind(&self, link: LinkId) -> Option<LinkKind>;
}
