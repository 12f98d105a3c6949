//! `KILL <nick> :<reason>`, including kill-chase against a recently
//! renamed nick.

use async_trait::async_trait;

use p10_proto::message::Message;

use crate::dispatcher::{Context, Handler, HandlerOutcome};
use crate::server_ops::apply_kill;

pub struct KillHandler;

#[async_trait]
impl Handler for KillHandler {
    fn min_params(&self) -> usize {
        2
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &Message) -> HandlerOutcome {
        let registry = &ctx.network.registry;
        let target_nick = &msg.params[0];

        let target_handle = match registry.find_user(target_nick) {
            Some(h) => h,
            None => {
                // Kill-chase: the nick may have changed within the lookback window.
                match ctx
                    .network
                    .whowas
                    .chase(target_nick, ctx.network.now())
                    .and_then(|rewritten| registry.find_user(&rewritten))
                {
                    Some(h) => h,
                    None => return HandlerOutcome::Dropped,
                }
            }
        };

        let is_suicide = target_handle.read().nick.eq_ignore_ascii_case(ctx.source);
        apply_kill(registry, &mut target_handle.write());
        if is_suicide {
            // Self-kill is not propagated beyond the origin server.
            HandlerOutcome::Ok
        } else {
            HandlerOutcome::KillConnection(msg.params[1].clone())
        }
    }
}
