//! Per-verb relay policy: who a message is delivered to and why it might
//! bounce.

use crate::entity::channel::Channel;
use crate::entity::user::User;
use crate::error::RelayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgKind {
    Privmsg,
    Notice,
}

/// What a caller should do after a channel-send gate passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Deliver,
    /// Blocked, but the sender gets no error back (NOTICE bounce rule).
    DropSilently,
}

/// Decide whether a channel message from `source_numeric` may be delivered.
/// Does not compute the recipient set; callers read `chan.members` for that,
/// excluding the source and any `+d` (deaf) or bursting-link members.
pub fn can_send_to_channel(
    chan: &Channel,
    source_numeric: &str,
    source_is_member: bool,
    source_has_services_bypass: bool,
    kind: MsgKind,
) -> Result<SendOutcome, RelayError> {
    let _ = source_numeric;
    if chan.modes.no_external && !source_is_member && !source_has_services_bypass {
        return match kind {
            MsgKind::Privmsg => Err(RelayError::CannotSendToChan),
            MsgKind::Notice => Ok(SendOutcome::DropSilently),
        };
    }
    // Moderation (+m) is a per-membership voice check the caller performs
    // separately; this function covers only the +n external-sender gate.
    Ok(SendOutcome::Deliver)
}

/// A direct (non-channel) PRIVMSG/NOTICE target resolution result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectTarget {
    Local,
    Remote(String),
}

/// Parse a `nick%host@server` routed target. Returns the server name to
/// route toward and the host glob to match once the final hop is reached.
pub fn parse_routed_target(target: &str) -> Option<(&str, &str, &str)> {
    let (nick_and_host, server) = target.rsplit_once('@')?;
    let (nick, host) = nick_and_host.split_once('%')?;
    Some((nick, host, server))
}

/// Validate a `$mask` server/host mask target.
///
/// The final label must contain no wildcard (`WildTopLevel`) and the mask
/// must contain at least one dot (`NoTopLevel`). A leading `@` after `$`
/// switches from server-name matching to host-name matching.
pub fn validate_mask_target(target: &str) -> Result<(), RelayError> {
    let body = target.strip_prefix('$').unwrap_or(target);
    let body = body.strip_prefix('@').unwrap_or(body);
    if !body.contains('.') {
        return Err(RelayError::NoTopLevel);
    }
    let last_label = body.rsplit('.').next().unwrap_or("");
    if last_label.contains('*') || last_label.contains('?') {
        return Err(RelayError::WildTopLevel);
    }
    Ok(())
}

/// Should an away-notice be queued back to the sender? Per the base spec:
/// only for direct PRIVMSG (never NOTICE, never channel targets), and only
/// once per message.
pub fn should_send_away_notice(kind: MsgKind, target_is_channel: bool, target_away: &Option<String>) -> bool {
    kind == MsgKind::Privmsg && !target_is_channel && target_away.is_some()
}

/// A NOTICE whose source is the same identity as its target is dropped
/// silently rather than delivered (defends against buggy services loops).
pub fn is_self_notice_loop(kind: MsgKind, source: &User, target: &User) -> bool {
    kind == MsgKind::Notice && source.numeric == target.numeric
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    fn user(nick: &str, numeric: &str) -> User {
        User::new(
            nick,
            numeric,
            "irc.example.net",
            "user",
            "host.example.net",
            "127.0.0.1".parse::<IpAddr>().unwrap(),
            0,
        )
    }

    #[test]
    fn no_external_blocks_non_member_privmsg() {
        let mut chan = Channel::new("#x", 1);
        chan.modes.no_external = true;
        let err = can_send_to_channel(&chan, "AAAAA", false, false, MsgKind::Privmsg).unwrap_err();
        assert_eq!(err, RelayError::CannotSendToChan);
    }

    #[test]
    fn services_bypass_no_external() {
        let mut chan = Channel::new("#x", 1);
        chan.modes.no_external = true;
        assert_eq!(
            can_send_to_channel(&chan, "AAAAA", false, true, MsgKind::Privmsg),
            Ok(SendOutcome::Deliver)
        );
    }

    #[test]
    fn no_external_drops_non_member_notice_without_error() {
        let mut chan = Channel::new("#x", 1);
        chan.modes.no_external = true;
        assert_eq!(
            can_send_to_channel(&chan, "AAAAA", false, false, MsgKind::Notice),
            Ok(SendOutcome::DropSilently)
        );
    }

    #[test]
    fn parses_routed_target() {
        let (nick, host, server) = parse_routed_target("bob%host.example.net@irc.example.net").unwrap();
        assert_eq!(nick, "bob");
        assert_eq!(host, "host.example.net");
        assert_eq!(server, "irc.example.net");
    }

    #[test]
    fn mask_target_requires_dot() {
        assert_eq!(validate_mask_target("$nodot"), Err(RelayError::NoTopLevel));
    }

    #[test]
    fn mask_target_rejects_wildcard_top_level() {
        assert_eq!(
            validate_mask_target("$*.example.*"),
            Err(RelayError::WildTopLevel)
        );
    }

    #[test]
    fn mask_target_accepts_valid_mask() {
        assert!(validate_mask_target("$*.example.net").is_ok());
        assert!(validate_mask_target("$@*.example.net").is_ok());
    }

    #[test]
    fn away_notice_only_for_direct_privmsg() {
        let away = Some("brb".to_string());
        assert!(should_send_away_notice(MsgKind::Privmsg, false, &away));
        assert!(!should_send_away_notice(MsgKind::Notice, false, &away));
        assert!(!should_send_away_notice(MsgKind::Privmsg, true, &away));
    }

    #[test]
    fn self_notice_loop_detected() {
        let a = user("alice", "AAAAA");
        assert!(is_self_notice_loop(MsgKind::Notice, &a, &a));
        assert!(!is_self_notice_loop(MsgKind::Privmsg, &a, &a));
    }
}
