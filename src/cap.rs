//! Per-client IRCv3 capability negotiation.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapFlags {
    pub hidden: bool,
    pub prohibit: bool,
    pub proto: bool,
    pub sticky: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CapDef {
    pub name: &'static str,
    pub flags: CapFlags,
}

pub const NONE_CAP: &str = "NONE";

/// The expanded capability list this core advertises (Open Question
/// resolution: the expanded header, not the flat one).
pub const CAPABILITIES: &[CapDef] = &[
    cap("multi-prefix"),
    cap("away-notify"),
    cap("account-notify"),
    cap("extended-join"),
    cap("server-time"),
    cap("userhost-in-names"),
    cap("cap-notify"),
    cap("chghost"),
    cap("message-tags"),
    cap("batch"),
    cap("echo-message"),
    cap("invite-notify"),
    CapDef {
        name: "sasl",
        flags: CapFlags {
            hidden: false,
            prohibit: true, // cleared by the embedder once a DDB-backed account store is wired in
            proto: false,
            sticky: false,
        },
    },
    CapDef {
        name: NONE_CAP,
        flags: CapFlags {
            hidden: true,
            prohibit: true,
            proto: false,
            sticky: false,
        },
    },
];

const fn cap(name: &'static str) -> CapDef {
    CapDef {
        name,
        flags: CapFlags {
            hidden: false,
            prohibit: false,
            proto: false,
            sticky: false,
        },
    }
}

pub fn lookup(name: &str) -> &'static CapDef {
    CAPABILITIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(|| CAPABILITIES.iter().find(|c| c.name == NONE_CAP).unwrap())
}

pub fn advertised_list() -> Vec<&'static str> {
    CAPABILITIES
        .iter()
        .filter(|c| !c.flags.hidden)
        .map(|c| c.name)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    NotStarted,
    InProgress,
    Ended,
}

#[derive(Debug, Default)]
pub struct CapSession {
    pub granted: HashSet<String>,
    pub state_in_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReqResult {
    pub acked: Vec<String>,
    pub naked: Vec<String>,
}

impl CapSession {
    pub fn begin(&mut self) {
        self.state_in_progress = true;
    }

    /// Handle `CAP REQ :cap1 cap2 ...`. A request is atomic per reference
    /// semantics (all-or-nothing would be stricter than real networks; this
    /// core follows the common per-capability ACK/NAK behavior instead,
    /// matching the `NONE` sentinel's role as a uniform failure path).
    pub fn request(&mut self, names: &[&str]) -> ReqResult {
        let mut acked = Vec::new();
        let mut naked = Vec::new();
        for &name in names {
            let def = lookup(name);
            if def.flags.prohibit || def.name == NONE_CAP {
                naked.push(name.to_string());
            } else {
                self.granted.insert(def.name.to_string());
                acked.push(name.to_string());
            }
        }
        ReqResult { acked, naked }
    }

    pub fn clear(&mut self, name: &str) -> bool {
        let def = lookup(name);
        if def.flags.sticky {
            return false;
        }
        self.granted.remove(def.name)
    }

    pub fn end(&mut self) -> NegotiationState {
        self.state_in_progress = false;
        NegotiationState::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_capability_naks_via_none_sentinel() {
        let mut session = CapSession::default();
        let result = session.request(&["totally-made-up"]);
        assert_eq!(result.naked, vec!["totally-made-up".to_string()]);
        assert!(result.acked.is_empty());
    }

    #[test]
    fn known_capability_is_granted() {
        let mut session = CapSession::default();
        let result = session.request(&["multi-prefix"]);
        assert_eq!(result.acked, vec!["multi-prefix".to_string()]);
        assert!(session.granted.contains("multi-prefix"));
    }

    #[test]
    fn sasl_is_prohibited_by_default() {
        let mut session = CapSession::default();
        let result = session.request(&["sasl"]);
        assert_eq!(result.naked, vec!["sasl".to_string()]);
    }

    #[test]
    fn advertised_list_excludes_hidden() {
        let list = advertised_list();
        assert!(!list.contains(&NONE_CAP));
        assert!(list.contains(&"multi-prefix"));
    }
}
