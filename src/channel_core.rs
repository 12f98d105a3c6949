//! Channel join/part/mode and timestamp reconciliation.
//!
//! This is the module where most of the system's real correctness work
//! lives: after a netsplit heals, two servers' independent histories of the
//! same channel must converge deterministically without a coordinator.

use crate::entity::channel::{Channel, ChannelModes};
use crate::entity::membership::Membership;
use crate::error::ChannelError;
use crate::registry::Registry;

/// Locate the last literal `"0"` token in a comma-separated JOIN channel
/// list, at a comma/start/end boundary, and return the slice starting at
/// the entry immediately after it (or the whole list if no `"0"` appears).
///
/// Boundary-only: a channel literally named `0` embedded in a longer token
/// like `#0` or `foo0` never matches.
pub fn last0(list: &str) -> &str {
    let mut best: Option<usize> = None;
    let mut pos = 0usize;
    for part in list.split(',') {
        pos += part.len() + 1; // +1 for the comma (or the implicit end)
        if part == "0" {
            best = Some(pos);
        }
    }
    match best {
        None => list,
        Some(start_of_next_token) => {
            // `start_of_next_token` points just past the "0," we matched; if
            // it runs past the end (trailing "0" with no more entries), the
            // result is the empty remainder.
            if start_of_next_token >= list.len() {
                ""
            } else {
                &list[start_of_next_token..]
            }
        }
    }
}

/// Result of a local JOIN attempt against one channel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    AlreadyMember,
    Created,
    OverrodeMode(char),
}

pub struct ChannelCore;

impl ChannelCore {
    /// Local JOIN of a single channel. Remote (burst/relay) joins use
    /// [`Self::remote_join`] instead, which never rejects on mode checks.
    #[allow(clippy::too_many_arguments)]
    pub fn local_join(
        registry: &Registry,
        channel_name: &str,
        user_numeric: &str,
        user_mask: &str,
        key: Option<&str>,
        is_oper: bool,
        oper_override_allowed: bool,
        user_channel_count: usize,
        max_channels: usize,
        now: i64,
    ) -> Result<JoinOutcome, ChannelError> {
        if user_channel_count >= max_channels && !is_oper {
            return Err(ChannelError::TooManyChannels);
        }
        if let Some(handle) = registry.find_channel(channel_name) {
            let mut chan = handle.write();
            if chan.members.contains_key(user_numeric) {
                return Ok(JoinOutcome::AlreadyMember);
            }
            match Self::can_join(&chan, key, user_mask) {
                Ok(()) => {
                    chan.members
                        .insert(user_numeric.to_string(), Membership::new(user_numeric));
                    Ok(JoinOutcome::Joined)
                }
                Err(e) => {
                    if is_oper && oper_override_allowed {
                        chan.members
                            .insert(user_numeric.to_string(), Membership::new(user_numeric));
                        Ok(JoinOutcome::OverrodeMode(mode_char_for(&e)))
                    } else {
                        Err(e)
                    }
                }
            }
        } else {
            let mut chan = Channel::new(channel_name, now);
            let membership = if chan.is_modeless() {
                Membership::new(user_numeric)
            } else {
                Membership::new(user_numeric).with_op()
            };
            chan.members.insert(user_numeric.to_string(), membership);
            registry.register_channel(chan);
            Ok(JoinOutcome::Created)
        }
    }

    /// Remote JOIN from a server uplink: TS conflicts are reconciled, not
    /// rejected, and a missing channel is created verbatim at the
    /// supplied TS.
    pub fn remote_join(registry: &Registry, channel_name: &str, remote_ts: i64, user_numeric: &str) {
        if let Some(handle) = registry.find_channel(channel_name) {
            let mut chan = handle.write();
            Self::reconcile_ts(&mut chan, remote_ts);
            chan.members
                .entry(user_numeric.to_string())
                .or_insert_with(|| Membership::new(user_numeric));
        } else {
            let mut chan = Channel::new(channel_name, remote_ts);
            chan.members
                .insert(user_numeric.to_string(), Membership::new(user_numeric));
            registry.register_channel(chan);
        }
    }

    fn can_join(chan: &Channel, key: Option<&str>, user_mask: &str) -> Result<(), ChannelError> {
        if let Some(limit) = chan.modes.limit {
            if chan.members.len() as u32 >= limit {
                return Err(ChannelError::ChannelIsFull);
            }
        }
        if chan.modes.invite_only && !chan.invites.iter().any(|m| mask_match(m, user_mask)) {
            return Err(ChannelError::InviteOnlyChan);
        }
        if let Some(required) = &chan.modes.key {
            if key != Some(required.as_str()) {
                return Err(ChannelError::BadChannelKey);
            }
        }
        // Ban check happens last: a ban is only meaningful once
        // key/limit/invite have already passed, same order as the
        // reference source's `can_join`.
        if chan.bans.iter().any(|b| mask_match(b, user_mask))
            && !chan.excepts.iter().any(|e| mask_match(e, user_mask))
        {
            return Err(ChannelError::BannedFromChan);
        }
        Ok(())
    }

    /// Apply the channel-TS reconciliation rule: the side with the lower
    /// `creation_ts` wins (its modes/bans/invites/op-grants stand); the
    /// higher-TS side is de-opped and adopts the winner's non-membership
    /// state. Ties keep both sides' ops. A remote TS of `0` never wins as
    /// "lower" for comparison, though it is stored and re-relayed verbatim.
    pub fn reconcile_ts(local: &mut Channel, remote_ts: i64) {
        let effective_remote = if remote_ts == 0 { i64::MAX } else { remote_ts };
        if effective_remote < local.creation_ts {
            // Remote wins: local loses ops and adopts remote state. Since
            // this core only has the remote TS (not the full remote mode
            // set) at the call site, callers that also carry remote modes
            // must apply them after calling this; here we still must strip
            // local ops and discard local ban/except/invite lists.
            local.creation_ts = remote_ts;
            local.bans.clear();
            local.excepts.clear();
            local.invites.clear();
            for member in local.members.values_mut() {
                member.deop();
            }
        } else if effective_remote > local.creation_ts {
            // Local wins: nothing to do to local state; the remote side is
            // responsible for deopping on its end when it observes our TS.
        }
        // Equal TS: both sides keep their ops, membership still unions via
        // the caller inserting the joining member regardless of this branch.
    }

    /// Apply the channel-TS rule when the full remote mode/list set is
    /// available (e.g. during BURST processing), replacing local state with
    /// the winner's when the remote side wins.
    pub fn reconcile_ts_with_modes(
        local: &mut Channel,
        remote_ts: i64,
        remote_modes: ChannelModes,
        remote_bans: impl IntoIterator<Item = String>,
    ) {
        let effective_remote = if remote_ts == 0 { i64::MAX } else { remote_ts };
        if effective_remote < local.creation_ts {
            local.creation_ts = remote_ts;
            local.modes = remote_modes;
            local.bans = remote_bans.into_iter().collect();
            local.excepts.clear();
            local.invites.clear();
            for member in local.members.values_mut() {
                member.deop();
            }
        } else if effective_remote == local.creation_ts {
            // Ties keep both sides' ops and local's mode word; nothing to change.
        }
    }

    /// Topic tie-break: lower `topic_time` wins; an unset (`topic_time ==
    /// 0`) topic always loses to any explicitly set topic.
    pub fn reconcile_topic(local: &mut Channel, remote_topic: &str, remote_setter: &str, remote_time: i64) {
        let local_unset = local.topic_time == 0;
        let remote_unset = remote_time == 0;
        let remote_wins = match (local_unset, remote_unset) {
            (true, true) => false,
            (true, false) => true,
            (false, true) => false,
            (false, false) => remote_time < local.topic_time,
        };
        if remote_wins {
            local.topic = remote_topic.to_string();
            local.topic_setter = remote_setter.to_string();
            local.topic_time = remote_time;
        }
    }

    /// PART: remove the membership. Returns true if the channel is now
    /// empty and a destruct timer should be armed.
    pub fn part(registry: &Registry, channel_name: &str, user_numeric: &str) -> bool {
        if let Some(handle) = registry.find_channel(channel_name) {
            let mut chan = handle.write();
            chan.members.remove(user_numeric);
            chan.is_empty()
        } else {
            false
        }
    }

    /// Fire the destruct timer: destroy the channel if it is still empty.
    /// A rejoin before this call cancels the timer by virtue of the
    /// membership check below.
    pub fn expire_destruct(registry: &Registry, channel_name: &str) {
        let should_destroy = registry
            .find_channel(channel_name)
            .map(|h| h.read().is_empty())
            .unwrap_or(false);
        if should_destroy {
            registry.unregister_channel(channel_name);
        }
    }
}

fn mode_char_for(e: &ChannelError) -> char {
    match e {
        ChannelError::ChannelIsFull => 'l',
        ChannelError::InviteOnlyChan => 'i',
        ChannelError::BannedFromChan => 'b',
        ChannelError::BadChannelKey => 'k',
        _ => '?',
    }
}

/// Match an rfc1459-style ban/invite/except mask (`nick!user@host`, `*` and
/// `?` wildcards) against a client's full mask.
fn mask_match(pattern: &str, mask: &str) -> bool {
    fn glob(pat: &[u8], text: &[u8]) -> bool {
        match (pat.first(), text.first()) {
            (None, None) => true,
            (Some(b'*'), _) => glob(&pat[1..], text) || (!text.is_empty() && glob(pat, &text[1..])),
            (Some(b'?'), Some(_)) => glob(&pat[1..], &text[1..]),
            (Some(p), Some(t)) if p.eq_ignore_ascii_case(t) => glob(&pat[1..], &text[1..]),
            _ => false,
        }
    }
    glob(pattern.as_bytes(), mask.as_bytes())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last0_splits_on_final_literal_zero() {
        assert_eq!(last0("#a,0,#b,0,#c"), "#c");
        assert_eq!(last0("#a,#b"), "#a,#b");
        assert_eq!(last0("0,#a"), "#a");
        assert_eq!(last0("#a,0"), "");
    }

    #[test]
    fn last0_is_boundary_only() {
        // "#a0" is not the literal token "0"; it must not be treated as a split.
        assert_eq!(last0("#a0,#b"), "#a0,#b");
    }

    #[test]
    fn local_join_creates_channel_with_op() {
        let reg = Registry::new();
        let outcome =
            ChannelCore::local_join(&reg, "#test", "AAAAA", "a!u@h", None, false, true, 0, 20, 100).unwrap();
        assert_eq!(outcome, JoinOutcome::Created);
        let chan = reg.find_channel("#test").unwrap();
        assert!(chan.read().members["AAAAA"].is_op());
    }

    #[test]
    fn local_join_modeless_channel_skips_op_grant() {
        let reg = Registry::new();
        ChannelCore::local_join(&reg, "+test", "AAAAA", "a!u@h", None, false, true, 0, 20, 100).unwrap();
        let chan = reg.find_channel("+test").unwrap();
        assert!(!chan.read().members["AAAAA"].is_op());
    }

    #[test]
    fn second_join_is_deopped() {
        let reg = Registry::new();
        ChannelCore::local_join(&reg, "#test", "AAAAA", "a!u@h", None, false, true, 0, 20, 100).unwrap();
        let outcome =
            ChannelCore::local_join(&reg, "#test", "BBBBB", "b!u@h", None, false, true, 0, 20, 100).unwrap();
        assert_eq!(outcome, JoinOutcome::Joined);
        let chan = reg.find_channel("#test").unwrap();
        assert!(!chan.read().members["BBBBB"].is_op());
    }

    #[test]
    fn rejoin_is_idempotent() {
        let reg = Registry::new();
        ChannelCore::local_join(&reg, "#test", "AAAAA", "a!u@h", None, false, true, 0, 20, 100).unwrap();
        let outcome =
            ChannelCore::local_join(&reg, "#test", "AAAAA", "a!u@h", None, false, true, 0, 20, 100).unwrap();
        assert_eq!(outcome, JoinOutcome::AlreadyMember);
    }

    #[test]
    fn lower_ts_wins_and_deops_local() {
        let mut chan = Channel::new("#x", 200);
        chan.members.insert(
            "AAAAA".to_string(),
            Membership::new("AAAAA").with_op(),
        );
        ChannelCore::reconcile_ts(&mut chan, 150);
        assert_eq!(chan.creation_ts, 150);
        assert!(!chan.members["AAAAA"].is_op());
    }

    #[test]
    fn higher_remote_ts_leaves_local_untouched() {
        let mut chan = Channel::new("#x", 150);
        chan.members.insert(
            "AAAAA".to_string(),
            Membership::new("AAAAA").with_op(),
        );
        ChannelCore::reconcile_ts(&mut chan, 200);
        assert_eq!(chan.creation_ts, 150);
        assert!(chan.members["AAAAA"].is_op());
    }

    #[test]
    fn zero_remote_ts_never_wins() {
        let mut chan = Channel::new("#x", 150);
        ChannelCore::reconcile_ts(&mut chan, 0);
        assert_eq!(chan.creation_ts, 150);
    }

    #[test]
    fn topic_tiebreak_prefers_lower_time() {
        let mut chan = Channel::new("#x", 1);
        chan.topic = "old".to_string();
        chan.topic_time = 200;
        ChannelCore::reconcile_topic(&mut chan, "new", "setter", 150);
        assert_eq!(chan.topic, "new");
    }

    #[test]
    fn unset_topic_always_loses() {
        let mut chan = Channel::new("#x", 1);
        ChannelCore::reconcile_topic(&mut chan, "new", "setter", 50);
        assert_eq!(chan.topic, "new");
    }
}
