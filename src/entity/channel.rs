//! The Channel entity.

use std::collections::{HashMap, HashSet};

use super::membership::Membership;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelModes {
    pub no_external: bool, // +n
    pub topic_lock: bool,  // +t
    pub moderated: bool,   // +m
    pub secret: bool,      // +s
    pub private: bool,     // +p
    pub invite_only: bool, // +i
    pub key: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    pub creation_ts: i64,
    pub topic: String,
    pub topic_setter: String,
    pub topic_time: i64,
    pub modes: ChannelModes,
    pub bans: HashSet<String>,
    pub excepts: HashSet<String>,
    pub invites: HashSet<String>,
    pub members: HashMap<String, Membership>,
    /// Set while a pending-destruct timer is armed (tick count remaining).
    pub destruct_armed: bool,
}

impl Channel {
    pub fn new(name: impl Into<String>, creation_ts: i64) -> Self {
        Channel {
            name: name.into(),
            creation_ts,
            topic: String::new(),
            topic_setter: String::new(),
            topic_time: 0,
            modes: ChannelModes::default(),
            bans: HashSet::new(),
            excepts: HashSet::new(),
            invites: HashSet::new(),
            members: HashMap::new(),
            destruct_armed: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_local(&self) -> bool {
        self.name.starts_with('&')
    }

    pub fn is_modeless(&self) -> bool {
        self.name.starts_with('+')
    }
}
