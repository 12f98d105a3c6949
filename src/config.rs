//! The core's configuration surface.
//!
//! The core never reads a config file itself; the excluded CLI/file-parsing
//! layer is expected to populate [`CoreConfig`] and hand it to the core.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// This server's own name, as advertised in SERVER introductions.
    pub server_name: String,
    /// This server's fixed 2-character numeric, assigned out of band.
    pub server_numeric: u16,
    pub nicklen: usize,
    pub channellen: usize,
    pub topiclen: usize,
    pub max_channels_per_user: usize,
    /// Seconds a channel with no members survives before destruction.
    pub channel_destruct_seconds: i64,
    /// Seconds the whowas ring retains a departed nick for kill-chase lookback.
    pub whowas_seconds: i64,
    pub whowas_max_entries: usize,
    /// Whether an operator's JOIN may override +k/+l/+i/+b on failure.
    pub oper_join_override: bool,
    pub max_sendq_bytes: usize,
    pub client_flood_lines: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            server_name: "irc.example.net".to_string(),
            server_numeric: 0,
            nicklen: 12,
            channellen: 200,
            topiclen: 307,
            max_channels_per_user: 20,
            channel_destruct_seconds: 60,
            whowas_seconds: 15,
            whowas_max_entries: 10,
            oper_join_override: true,
            max_sendq_bytes: 1 << 20,
            client_flood_lines: 20,
        }
    }
}
