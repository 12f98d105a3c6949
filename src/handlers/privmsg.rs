//! `PRIVMSG`/`NOTICE <target> :<text>` direct and channel delivery.

use async_trait::async_trait;
use tracing::trace;

use p10_proto::message::Message;
use p10_proto::response::Response;

use crate::dispatcher::{Context, Handler, HandlerOutcome};
use crate::error::RelayError;
use crate::relay::{can_send_to_channel, is_self_notice_loop, should_send_away_notice, MsgKind, SendOutcome};

async fn deliver(ctx: &Context<'_>, msg: &Message, kind: MsgKind) -> HandlerOutcome {
    let registry = &ctx.network.registry;
    let Some(sptr_handle) = registry.find_user(ctx.source) else {
        return HandlerOutcome::Dropped;
    };
    let target = &msg.params[0];

    if target.starts_with(['#', '&', '+']) {
        let Some(chan_handle) = registry.find_channel(target) else {
            return HandlerOutcome::Ok;
        };
        let chan = chan_handle.read();
        let sptr = sptr_handle.read();
        let is_member = chan.members.contains_key(&sptr.numeric);
        match can_send_to_channel(&chan, &sptr.numeric, is_member, sptr.modes.service, kind) {
            Ok(SendOutcome::Deliver) => {}
            Ok(SendOutcome::DropSilently) => return HandlerOutcome::Ok,
            Err(RelayError::CannotSendToChan) => {
                return HandlerOutcome::ErrorReply(Response::ErrCannotSendToChan.reply(
                    &ctx.network.self_server_name,
                    &sptr.nick,
                    &[target, "Cannot send to channel"],
                ));
            }
            Err(_) => return HandlerOutcome::Ok,
        }
        // Recipient fan-out to each member except source belongs to the
        // transport layer (LinkSink); this core only gates eligibility.
        HandlerOutcome::Ok
    } else {
        let Some(target_handle) = registry.find_user(target) else {
            return HandlerOutcome::Ok;
        };
        let sptr = sptr_handle.read();
        let target_user = target_handle.read();
        if is_self_notice_loop(kind, &sptr, &target_user) {
            return HandlerOutcome::Ok;
        }
        if should_send_away_notice(kind, false, &target_user.away) {
            // The RPL_AWAY reply itself is queued by the transport layer
            // against ctx.link; this core only decides that it is owed.
            trace!(target = %target_user.nick, "away notice owed to sender");
        }
        HandlerOutcome::Ok
    }
}

pub struct PrivmsgHandler;

#[async_trait]
impl Handler for PrivmsgHandler {
    fn min_params(&self) -> usize {
        2
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &Message) -> HandlerOutcome {
        deliver(ctx, msg, MsgKind::Privmsg).await
    }
}

pub struct NoticeHandler;

#[async_trait]
impl Handler for NoticeHandler {
    fn min_params(&self) -> usize {
        2
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &Message) -> HandlerOutcome {
        deliver(ctx, msg, MsgKind::Notice).await
    }
}
