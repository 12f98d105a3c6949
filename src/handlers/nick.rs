//! `NICK <newnick>` for an already-registered local client, and the
//! corresponding collision path when the nick is contested.

use async_trait::async_trait;
use tracing::warn;

use p10_proto::message::Message;

use crate::collision::{validate_nick_name, CollisionCore, CollisionOutcome, NewIntroduction};
use crate::dispatcher::{Context, Handler, HandlerOutcome, OriginKind};
use crate::registry::{Registry, UserHandle};
use crate::server_ops::apply_kill;
use crate::whowas::{WhowasEntry, WhowasRing};

/// Record the departing nick in the whowas ring so a KILL sent against the
/// old nick shortly after can still chase it via `WhowasRing::chase`.
fn record_rename(whowas: &WhowasRing, old: &crate::entity::User, new_nick: &str, now: i64) {
    whowas.record(WhowasEntry {
        nick: old.nick.clone(),
        username: old.username.clone(),
        host: old.host.clone(),
        realname: old.realname.clone(),
        new_nick: Some(new_nick.to_string()),
        departure_ts: now,
    });
}

/// Move `sptr` onto `new_nick` and stamp `lastnick`, recording the old nick
/// into the whowas ring first. Used by every path that actually grants the
/// contested or free nick to the introducer.
fn complete_rename(registry: &Registry, whowas: &WhowasRing, sptr_handle: &UserHandle, new_nick: &str, now: i64) -> bool {
    let old_nick = sptr_handle.read().nick.clone();
    if registry.rename_user(&old_nick, new_nick).is_err() {
        return false;
    }
    record_rename(whowas, &sptr_handle.read(), new_nick, now);
    let mut sptr = sptr_handle.write();
    sptr.nick = new_nick.to_string();
    sptr.lastnick = now;
    true
}

pub struct NickHandler;

#[async_trait]
impl Handler for NickHandler {
    fn min_params(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &Message) -> HandlerOutcome {
        let new_nick = &msg.params[0];
        let registry = &ctx.network.registry;

        if ctx.origin == OriginKind::RemoteServer {
            let nicklen = ctx.network.config.nicklen;
            match validate_nick_name(new_nick, nicklen) {
                Some(validated) if validated == new_nick => {}
                _ => {
                    warn!(raw = %new_nick, "rejecting malformed nick from peer");
                    return HandlerOutcome::KillConnection("Erroneous nickname".to_string());
                }
            }
        }

        let Some(sptr_handle) = registry.find_user(ctx.source) else {
            return HandlerOutcome::Dropped;
        };

        match registry.find_user(new_nick) {
            None => {
                if complete_rename(registry, &ctx.network.whowas, &sptr_handle, new_nick, ctx.network.now()) {
                    HandlerOutcome::Ok
                } else {
                    HandlerOutcome::Dropped
                }
            }
            Some(acptr_handle) => {
                let same_client = {
                    let acptr = acptr_handle.read();
                    let sptr = sptr_handle.read();
                    acptr.numeric == sptr.numeric
                };
                let outcome = {
                    let acptr = acptr_handle.read();
                    let sptr = sptr_handle.read();
                    let intro = NewIntroduction {
                        nick: new_nick,
                        ip: sptr.ip,
                        username: &sptr.username,
                        lastnick: ctx.network.now(),
                    };
                    CollisionCore::decide(&acptr, &intro, same_client, false, false)
                };
                match outcome {
                    CollisionOutcome::AcceptCaseChange => {
                        if complete_rename(registry, &ctx.network.whowas, &sptr_handle, new_nick, ctx.network.now()) {
                            HandlerOutcome::Ok
                        } else {
                            HandlerOutcome::Dropped
                        }
                    }
                    CollisionOutcome::Ignore => HandlerOutcome::Ok,
                    CollisionOutcome::KillIntroducer => {
                        apply_kill(registry, &mut sptr_handle.write());
                        HandlerOutcome::KillConnection("Nick collision".to_string())
                    }
                    CollisionOutcome::KillExisting => {
                        apply_kill(registry, &mut acptr_handle.write());
                        if complete_rename(registry, &ctx.network.whowas, &sptr_handle, new_nick, ctx.network.now()) {
                            HandlerOutcome::Ok
                        } else {
                            HandlerOutcome::Dropped
                        }
                    }
                    CollisionOutcome::KillBoth => {
                        apply_kill(registry, &mut sptr_handle.write());
                        apply_kill(registry, &mut acptr_handle.write());
                        HandlerOutcome::KillConnection("Nick collision".to_string())
                    }
                    CollisionOutcome::RejectNickInUse | CollisionOutcome::OverrideUnregistered => {
                        HandlerOutcome::Dropped
                    }
                }
            }
        }
    }
}
