//! The User entity.

use std::collections::HashSet;
use std::net::IpAddr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserModes {
    pub operator: bool,
    pub invisible: bool,
    pub wallop: bool,
    pub service: bool,
    pub killed: bool,
    pub burst_in_progress: bool,
}

#[derive(Debug, Clone)]
pub struct User {
    pub nick: String,
    pub numeric: String,
    pub home_server: String,
    pub username: String,
    pub host: String,
    pub real_host: String,
    pub realname: String,
    pub ip: IpAddr,
    pub modes: UserModes,
    pub account: Option<String>,
    /// TS of the user's most recent NICK change; used verbatim by collision resolution.
    pub lastnick: i64,
    pub away: Option<String>,
    pub silences: HashSet<String>,
    pub monitor: HashSet<String>,
    pub capabilities: HashSet<String>,
    pub tls_fingerprint: Option<String>,
    pub channels: HashSet<String>,
}

impl User {
    pub fn new(
        nick: impl Into<String>,
        numeric: impl Into<String>,
        home_server: impl Into<String>,
        username: impl Into<String>,
        host: impl Into<String>,
        ip: IpAddr,
        now: i64,
    ) -> Self {
        let host = host.into();
        User {
            nick: nick.into(),
            numeric: numeric.into(),
            home_server: home_server.into(),
            username: username.into(),
            real_host: host.clone(),
            host,
            realname: String::new(),
            ip,
            modes: UserModes::default(),
            account: None,
            lastnick: now,
            away: None,
            silences: HashSet::new(),
            monitor: HashSet::new(),
            capabilities: HashSet::new(),
            tls_fingerprint: None,
            channels: HashSet::new(),
        }
    }

    pub fn with_realname(mut self, realname: impl Into<String>) -> Self {
        self.realname = realname.into();
        self
    }

    /// `(ip, username)` identity used by collision's `differ` comparison.
    pub fn identity(&self) -> (IpAddr, &str) {
        (self.ip, &self.username)
    }
}
