//! The P10 long-verb / short-token table.
//!
//! A server link always encodes a command with its short token; a client
//! link always encodes the long name. Numeric replies keep their 3-digit
//! code on both link types and are not part of this table.

/// One entry of the bidirectional verb table.
struct VerbEntry {
    long: &'static str,
    short: &'static str,
}

const VERBS: &[VerbEntry] = &[
    VerbEntry { long: "PRIVMSG", short: "P" },
    VerbEntry { long: "NOTICE", short: "O" },
    VerbEntry { long: "NICK", short: "N" },
    VerbEntry { long: "JOIN", short: "J" },
    VerbEntry { long: "PART", short: "L" },
    VerbEntry { long: "MODE", short: "M" },
    VerbEntry { long: "KICK", short: "K" },
    VerbEntry { long: "KILL", short: "D" },
    VerbEntry { long: "QUIT", short: "Q" },
    VerbEntry { long: "SQUIT", short: "SQ" },
    VerbEntry { long: "SERVER", short: "S" },
    VerbEntry { long: "PASS", short: "PA" },
    VerbEntry { long: "BURST", short: "B" },
    VerbEntry { long: "END_OF_BURST", short: "EB" },
    VerbEntry { long: "EOB_ACK", short: "EA" },
    VerbEntry { long: "PING", short: "G" },
    VerbEntry { long: "PONG", short: "Z" },
    VerbEntry { long: "TOPIC", short: "T" },
    VerbEntry { long: "WHOIS", short: "W" },
    VerbEntry { long: "AWAY", short: "A" },
    VerbEntry { long: "OPER", short: "OPER" },
];

/// Capabilities negotiation has no short form: it is only ever exchanged on
/// client links during registration, never relayed server to server.
pub const CAP_VERB: &str = "CAP";

/// Resolve a token seen on the wire (either long or short form) to the
/// canonical long verb name used internally.
pub fn canonicalize(token: &str) -> Option<&'static str> {
    let upper = token.to_ascii_uppercase();
    VERBS
        .iter()
        .find(|v| v.long == upper || v.short == upper)
        .map(|v| v.long)
}

/// Encode a canonical long verb name for the given link kind.
pub fn encode_verb(long: &str, server_link: bool) -> &str {
    if server_link {
        if let Some(entry) = VERBS.iter().find(|v| v.long == long) {
            return entry.short;
        }
    }
    // Numeric replies and verbs with no short form (CAP, OPER) pass through
    // unchanged on every link kind.
    long
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_short_and_long() {
        assert_eq!(canonicalize("P"), Some("PRIVMSG"));
        assert_eq!(canonicalize("privmsg"), Some("PRIVMSG"));
        assert_eq!(canonicalize("unknown"), None);
    }

    #[test]
    fn encodes_per_link_kind() {
        assert_eq!(encode_verb("PRIVMSG", true), "P");
        assert_eq!(encode_verb("PRIVMSG", false), "PRIVMSG");
        assert_eq!(encode_verb("CAP", true), "CAP");
    }

    #[test]
    fn squit_short_is_two_chars() {
        assert_eq!(canonicalize("SQ"), Some("SQUIT"));
        assert_eq!(encode_verb("SQUIT", true), "SQ");
    }
}
