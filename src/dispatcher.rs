//! Resolves `(origin, verb)` to a handler and enforces parameter-count and
//! origin-kind preconditions before invoking it.
//!
//! Propagation policy: handlers never raise across this boundary. They
//! return a plain status; the dispatcher converts it to the side effect
//! (reply, drop, disconnect).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use p10_proto::message::Message;

use crate::graph::Network;
use crate::transport::LinkId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginKind {
    LocalClient,
    RemoteUser,
    RemoteServer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerOutcome {
    Ok,
    NeedMoreParams,
    Dropped,
    KillConnection(String),
    /// A client-addressable numeric reply owed back to `ctx.link`.
    ErrorReply(Message),
}

pub struct Context<'a> {
    pub network: &'a Network,
    pub link: LinkId,
    pub origin: OriginKind,
    /// Numeric or nick of the entity this line is attributed to.
    pub source: &'a str,
}

#[async_trait]
pub trait Handler: Send + Sync {
    /// Minimum parameter count; the dispatcher rejects short lines before
    /// calling [`Self::handle`].
    fn min_params(&self) -> usize {
        0
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &Message) -> HandlerOutcome;
}

#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<&'static str, Arc<dyn Handler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher::default()
    }

    pub fn register(&mut self, verb: &'static str, handler: Arc<dyn Handler>) {
        self.handlers.insert(verb, handler);
    }

    pub async fn dispatch(&self, ctx: &Context<'_>, msg: &Message) -> HandlerOutcome {
        let Some(handler) = self.handlers.get(msg.command.as_str()) else {
            return HandlerOutcome::Dropped;
        };
        if msg.params.len() < handler.min_params() {
            return HandlerOutcome::NeedMoreParams;
        }
        handler.handle(ctx, msg).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::time::ManualClock;
    use std::sync::Arc as StdArc;

    struct EchoHandler;

    #[async_trait]
    impl Handler for EchoHandler {
        fn min_params(&self) -> usize {
            1
        }

        async fn handle(&self, _ctx: &Context<'_>, _msg: &Message) -> HandlerOutcome {
            HandlerOutcome::Ok
        }
    }

    #[tokio::test]
    async fn unknown_verb_is_dropped() {
        let net = Network::new(CoreConfig::default(), StdArc::new(ManualClock::new(0)));
        let dispatcher = Dispatcher::new();
        let ctx = Context {
            network: &net,
            link: LinkId(1),
            origin: OriginKind::LocalClient,
            source: "Wiz",
        };
        let msg = Message::new("BOGUS");
        assert_eq!(dispatcher.dispatch(&ctx, &msg).await, HandlerOutcome::Dropped);
    }

    #[tokio::test]
    async fn short_line_needs_more_params() {
        let net = Network::new(CoreConfig::default(), StdArc::new(ManualClock::new(0)));
        let mut dispatcher = Dispatcher::new();
        dispatcher.register("ECHO", StdArc::new(EchoHandler));
        let ctx = Context {
            network: &net,
            link: LinkId(1),
            origin: OriginKind::LocalClient,
            source: "Wiz",
        };
        let msg = Message::new("ECHO");
        assert_eq!(
            dispatcher.dispatch(&ctx, &msg).await,
            HandlerOutcome::NeedMoreParams
        );
    }

    #[tokio::test]
    async fn well_formed_line_dispatches() {
        let net = Network::new(CoreConfig::default(), StdArc::new(ManualClock::new(0)));
        let mut dispatcher = Dispatcher::new();
        dispatcher.register("ECHO", StdArc::new(EchoHandler));
        let ctx = Context {
            network: &net,
            link: LinkId(1),
            origin: OriginKind::LocalClient,
            source: "Wiz",
        };
        let msg = Message::new("ECHO").with_param("hi");
        assert_eq!(dispatcher.dispatch(&ctx, &msg).await, HandlerOutcome::Ok);
    }
}
