//! Nick collision resolution and KILL-chase.
//!
//! Grounded on the reference `ms_nick()` decision logic: which side of a
//! simultaneous NICK introduction survives is decided by `differ` (does the
//! incoming identity's IP+username match the existing user's) crossed with
//! which side's `lastnick` timestamp is more recent.

use std::net::IpAddr;

use crate::entity::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    /// Same client changing the case of its own nick; accept.
    AcceptCaseChange,
    /// Same client re-sending its own nick unchanged; ignore.
    Ignore,
    /// `acptr` was an unfinished handshake; exit it and accept the new nick.
    OverrideUnregistered,
    /// The existing holder is a Server entry; always rejected.
    RejectNickInUse,
    /// Kill the introducing client (`sptr`).
    KillIntroducer,
    /// Kill the existing holder (`acptr`).
    KillExisting,
    /// Kill both sides (the exact-tie, differing-identity case).
    KillBoth,
}

pub struct NewIntroduction<'a> {
    pub nick: &'a str,
    pub ip: IpAddr,
    pub username: &'a str,
    pub lastnick: i64,
}

/// A character legal anywhere in a nick but the first position.
fn is_nick_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '[' | ']' | '\\' | '^' | '{' | '}' | '_' | '`')
}

/// Validate a peer-introduced nick the way `do_nick_name` does: the first
/// character may not be a digit or `-`, and validation stops (truncating)
/// at the first character that isn't a legal nick character. Returns the
/// validated prefix, or `None` if the nick is rejected outright (empty
/// first character class failure).
pub fn validate_nick_name(nick: &str, max_len: usize) -> Option<&str> {
    let mut chars = nick.char_indices();
    let (_, first) = chars.next()?;
    if first.is_ascii_digit() || first == '-' {
        return None;
    }
    let mut end = nick.len();
    for (idx, c) in chars {
        if idx >= max_len || !is_nick_char(c) {
            end = idx;
            break;
        }
    }
    if end == 0 {
        None
    } else {
        Some(&nick[..end])
    }
}

pub struct CollisionCore;

impl CollisionCore {
    /// Decide the outcome of introducing `intro` against the existing user
    /// `acptr` holding the contested nick. `same_client` indicates the
    /// introduction is a NICK change from `acptr` itself, not a distinct
    /// session (`acptr == sptr` in the reference terminology).
    pub fn decide(
        acptr: &User,
        intro: &NewIntroduction<'_>,
        same_client: bool,
        acptr_is_unfinished_handshake: bool,
        acptr_is_server: bool,
    ) -> CollisionOutcome {
        if same_client {
            return if acptr.nick.eq_ignore_ascii_case(intro.nick) && acptr.nick != intro.nick {
                CollisionOutcome::AcceptCaseChange
            } else {
                CollisionOutcome::Ignore
            };
        }
        if acptr_is_unfinished_handshake {
            return CollisionOutcome::OverrideUnregistered;
        }
        if acptr_is_server {
            return CollisionOutcome::RejectNickInUse;
        }

        let differ = acptr.identity() != (intro.ip, intro.username);

        if intro.lastnick == acptr.lastnick && differ {
            return CollisionOutcome::KillBoth;
        }
        let kill_introducer = if differ {
            intro.lastnick >= acptr.lastnick
        } else {
            intro.lastnick <= acptr.lastnick
        };
        if kill_introducer {
            CollisionOutcome::KillIntroducer
        } else {
            CollisionOutcome::KillExisting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_leading_digit_or_hyphen() {
        assert_eq!(validate_nick_name("1bob", 12), None);
        assert_eq!(validate_nick_name("-bob", 12), None);
    }

    #[test]
    fn truncates_at_first_illegal_char() {
        assert_eq!(validate_nick_name("bob!evil", 12), Some("bob"));
    }

    #[test]
    fn truncates_at_nicklen() {
        assert_eq!(validate_nick_name("reallylongnickname", 5), Some("reall"));
    }

    #[test]
    fn accepts_well_formed_nick() {
        assert_eq!(validate_nick_name("bob-[2]", 12), Some("bob-[2]"));
    }

    fn user(nick: &str, ip: &str, username: &str, lastnick: i64) -> User {
        User::new(
            nick,
            "AAAAA",
            "irc.example.net",
            username,
            "host.example.net",
            ip.parse().unwrap(),
            lastnick,
        )
    }

    #[test]
    fn same_client_case_change_is_accepted() {
        let acptr = user("Alice", "1.2.3.4", "alice", 100);
        let intro = NewIntroduction {
            nick: "alice",
            ip: "1.2.3.4".parse().unwrap(),
            username: "alice",
            lastnick: 105,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, true, false, false),
            CollisionOutcome::AcceptCaseChange
        );
    }

    #[test]
    fn same_client_identical_nick_is_ignored() {
        let acptr = user("Alice", "1.2.3.4", "alice", 100);
        let intro = NewIntroduction {
            nick: "Alice",
            ip: "1.2.3.4".parse().unwrap(),
            username: "alice",
            lastnick: 105,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, true, false, false),
            CollisionOutcome::Ignore
        );
    }

    #[test]
    fn unfinished_handshake_is_overridden() {
        let acptr = user("alice", "1.2.3.4", "alice", 100);
        let intro = NewIntroduction {
            nick: "alice",
            ip: "5.6.7.8".parse().unwrap(),
            username: "bob",
            lastnick: 105,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, false, true, false),
            CollisionOutcome::OverrideUnregistered
        );
    }

    #[test]
    fn server_holder_rejects() {
        let acptr = user("alice", "1.2.3.4", "alice", 100);
        let intro = NewIntroduction {
            nick: "alice",
            ip: "5.6.7.8".parse().unwrap(),
            username: "bob",
            lastnick: 105,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, false, false, true),
            CollisionOutcome::RejectNickInUse
        );
    }

    #[test]
    fn simultaneous_nick_scenario_kills_both() {
        // The documented end-to-end scenario: same ts, differing identity.
        let acptr = user("alice", "10.0.0.1", "alice", 100);
        let intro = NewIntroduction {
            nick: "alice",
            ip: "10.0.0.2".parse().unwrap(),
            username: "alice",
            lastnick: 100,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, false, false, false),
            CollisionOutcome::KillBoth
        );
    }

    #[test]
    fn differing_identity_newer_introducer_is_killed() {
        let acptr = user("alice", "10.0.0.1", "alice", 100);
        let intro = NewIntroduction {
            nick: "alice",
            ip: "10.0.0.2".parse().unwrap(),
            username: "alice",
            lastnick: 150,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, false, false, false),
            CollisionOutcome::KillIntroducer
        );
    }

    #[test]
    fn differing_identity_older_introducer_kills_existing() {
        let acptr = user("alice", "10.0.0.1", "alice", 150);
        let intro = NewIntroduction {
            nick: "alice",
            ip: "10.0.0.2".parse().unwrap(),
            username: "alice",
            lastnick: 100,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, false, false, false),
            CollisionOutcome::KillExisting
        );
    }

    #[test]
    fn same_identity_older_lastnick_kills_introducer() {
        // !differ: lastnick <= acptr.lastnick -> kill introducer.
        let acptr = user("alice", "10.0.0.1", "alice", 150);
        let intro = NewIntroduction {
            nick: "alice",
            ip: "10.0.0.1".parse().unwrap(),
            username: "alice",
            lastnick: 100,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, false, false, false),
            CollisionOutcome::KillIntroducer
        );
    }

    #[test]
    fn same_identity_newer_lastnick_kills_existing() {
        let acptr = user("alice", "10.0.0.1", "alice", 100);
        let intro = NewIntroduction {
            nick: "alice",
            ip: "10.0.0.1".parse().unwrap(),
            username: "alice",
            lastnick: 150,
        };
        assert_eq!(
            CollisionCore::decide(&acptr, &intro, false, false, false),
            CollisionOutcome::KillExisting
        );
    }
}
