//! `JOIN <chan1,chan2,...> [key1,key2,...]`, including the `JOIN 0` form.

use async_trait::async_trait;

use p10_proto::message::Message;

use crate::channel_core::{last0, ChannelCore};
use crate::dispatcher::{Context, Handler, HandlerOutcome};

pub struct JoinHandler;

#[async_trait]
impl Handler for JoinHandler {
    fn min_params(&self) -> usize {
        1
    }

    async fn handle(&self, ctx: &Context<'_>, msg: &Message) -> HandlerOutcome {
        let registry = &ctx.network.registry;
        let Some(sptr_handle) = registry.find_user(ctx.source) else {
            return HandlerOutcome::Dropped;
        };

        let list = last0(&msg.params[0]);
        let keys: Vec<&str> = msg
            .params
            .get(1)
            .map(|k| k.split(',').collect())
            .unwrap_or_default();

        if list != msg.params[0] {
            // A "0" boundary was found: part every current membership first.
            let channels: Vec<String> = sptr_handle.read().channels.iter().cloned().collect();
            for chan_name in channels {
                ChannelCore::part(registry, &chan_name, &sptr_handle.read().numeric);
                sptr_handle.write().channels.remove(&chan_name);
            }
            if list.is_empty() {
                return HandlerOutcome::Ok;
            }
        }

        let is_oper = sptr_handle.read().modes.operator;
        let oper_override = ctx.network.config.oper_join_override;
        let max_channels = ctx.network.config.max_channels_per_user;

        for (i, chan_name) in list.split(',').enumerate() {
            if chan_name.is_empty() {
                continue;
            }
            let key = keys.get(i).copied();
            let numeric = sptr_handle.read().numeric.clone();
            let mask = {
                let u = sptr_handle.read();
                format!("{}!{}@{}", u.nick, u.username, u.host)
            };
            let channel_count = sptr_handle.read().channels.len();
            match ChannelCore::local_join(
                registry,
                chan_name,
                &numeric,
                &mask,
                key,
                is_oper,
                oper_override,
                channel_count,
                max_channels,
                ctx.network.now(),
            ) {
                Ok(_) => {
                    sptr_handle.write().channels.insert(chan_name.to_string());
                }
                Err(_) => continue,
            }
        }
        HandlerOutcome::Ok
    }
}
