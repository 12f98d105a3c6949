//! `SQUIT <target> [<timestamp>] :<reason>`, severing a server link.

use async_trait::async_trait;

use p10_proto::message::Message;

use crate::dispatcher::{Context, Handler, HandlerOutcome};
use crate::server_ops::{decide_squit, SquitDecision};

pub struct SquitHandler;

#[async_trait]
impl Handler for SquitHandler {
    fn min_params(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &Message) -> HandlerOutcome {
        let registry = &ctx.network.registry;
        let target = &msg.params[0];
        let timestamp = msg.params.get(1).and_then(|s| s.parse::<i64>().ok());

        match decide_squit(registry, &ctx.network.self_server_name, target, timestamp) {
            SquitDecision::NoSuchServer | SquitDecision::StaleTimestamp => HandlerOutcome::Ok,
            SquitDecision::Sever => {
                registry.unregister_server(
                    target,
                    registry
                        .find_server(target)
                        .map(|h| h.read().numeric)
                        .unwrap_or_default(),
                );
                HandlerOutcome::Ok
            }
            SquitDecision::SeverSelf => {
                HandlerOutcome::KillConnection("Link severed by remote SQUIT".to_string())
            }
        }
    }
}
