//! Bounded per-nick history used by the `WHOWAS` query and by kill-chase.

use std::collections::VecDeque;

use dashmap::DashMap;

use crate::casefold::CaseFoldedKey;

#[derive(Debug, Clone)]
pub struct WhowasEntry {
    pub nick: String,
    pub username: String,
    pub host: String,
    pub realname: String,
    pub new_nick: Option<String>,
    pub departure_ts: i64,
}

pub struct WhowasRing {
    entries: DashMap<CaseFoldedKey, VecDeque<WhowasEntry>>,
    max_entries: usize,
    lookback_seconds: i64,
}

impl WhowasRing {
    pub fn new(max_entries: usize, lookback_seconds: i64) -> Self {
        WhowasRing {
            entries: DashMap::new(),
            max_entries,
            lookback_seconds,
        }
    }

    /// Record a departure. `new_nick` is set when this entry was produced by
    /// a NICK change rather than a QUIT/KILL, enabling kill-chase rewrite.
    pub fn record(&self, entry: WhowasEntry) {
        let key = CaseFoldedKey::new(&entry.nick);
        let mut ring = self.entries.entry(key).or_default();
        if ring.len() == self.max_entries {
            ring.pop_front();
        }
        ring.push_back(entry);
    }

    pub fn history(&self, nick: &str) -> Vec<WhowasEntry> {
        self.entries
            .get(&CaseFoldedKey::new(nick))
            .map(|r| r.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Kill-chase: if `nick` isn't live, look back up to the lookback window
    /// for the most recent NICK-change entry and return the nick it
    /// renamed to.
    pub fn chase(&self, nick: &str, now: i64) -> Option<String> {
        let ring = self.entries.get(&CaseFoldedKey::new(nick))?;
        ring.iter()
            .rev()
            .filter(|e| now - e.departure_ts <= self.lookback_seconds)
            .find_map(|e| e.new_nick.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(nick: &str, new_nick: Option<&str>, ts: i64) -> WhowasEntry {
        WhowasEntry {
            nick: nick.to_string(),
            username: "user".to_string(),
            host: "host".to_string(),
            realname: "Real Name".to_string(),
            new_nick: new_nick.map(str::to_string),
            departure_ts: ts,
        }
    }

    #[test]
    fn chase_rewrites_within_lookback_window() {
        let ring = WhowasRing::new(10, 15);
        ring.record(entry("bob", Some("bobby"), 100));
        assert_eq!(ring.chase("bob", 105), Some("bobby".to_string()));
    }

    #[test]
    fn chase_expires_outside_lookback_window() {
        let ring = WhowasRing::new(10, 15);
        ring.record(entry("bob", Some("bobby"), 100));
        assert_eq!(ring.chase("bob", 200), None);
    }

    #[test]
    fn ring_evicts_oldest_when_full() {
        let ring = WhowasRing::new(2, 9999);
        ring.record(entry("bob", None, 1));
        ring.record(entry("bob", None, 2));
        ring.record(entry("bob", Some("bobby"), 3));
        let history = ring.history("bob");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].departure_ts, 2);
    }
}
