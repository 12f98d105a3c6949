//! SQUIT targeting and KILL application against the Registry.

use crate::entity::user::User;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquitDecision {
    /// The named target is not a known server; a no-op repeat of an
    /// already-departed SQUIT.
    NoSuchServer,
    /// The link timestamp didn't match; ignore as a stale/lagging SQUIT.
    StaleTimestamp,
    /// Sever the link to `target`; all its descendants must be exited.
    Sever,
    /// The target is this server: the sense is reversed and the link the
    /// request arrived on is what gets severed.
    SeverSelf,
}

/// Decide what a `SQUIT target [timestamp]` should do.
pub fn decide_squit(
    registry: &Registry,
    self_server_name: &str,
    target: &str,
    timestamp: Option<i64>,
) -> SquitDecision {
    if target.eq_ignore_ascii_case(self_server_name) {
        return SquitDecision::SeverSelf;
    }
    let Some(handle) = registry.find_server(target) else {
        return SquitDecision::NoSuchServer;
    };
    if let Some(ts) = timestamp {
        let link_ts = handle.read().link_established_ts;
        if ts != link_ts {
            return SquitDecision::StaleTimestamp;
        }
    }
    SquitDecision::Sever
}

/// Mark a user as killed so `exit_client`'s caller suppresses the spurious
/// QUIT that a plain disconnect would otherwise generate, then remove it
/// from the Registry.
pub fn apply_kill(registry: &Registry, user: &mut User) {
    user.modes.killed = true;
    registry.unregister_user(&user.nick, &user.numeric);
}
