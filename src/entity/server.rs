//! The Server entity.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstState {
    NotBursted,
    Bursting,
    BurstAck,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerRole {
    Hub,
    Leaf,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub name: String,
    pub numeric: u16,
    /// `None` for this process's own server record.
    pub uplink: Option<String>,
    pub downlinks: Vec<String>,
    pub link_established_ts: i64,
    pub burst_state: BurstState,
    pub role: ServerRole,
    /// Set once the link's END_OF_BURST/EOB_ACK round trip completes.
    pub ts_synced: bool,
    pub hopcount: u32,
}

impl Server {
    pub fn new_self(name: impl Into<String>, numeric: u16, now: i64) -> Self {
        Server {
            name: name.into(),
            numeric,
            uplink: None,
            downlinks: Vec::new(),
            link_established_ts: now,
            burst_state: BurstState::Done,
            role: ServerRole::Hub,
            ts_synced: true,
            hopcount: 0,
        }
    }

    pub fn new_peer(
        name: impl Into<String>,
        numeric: u16,
        uplink: impl Into<String>,
        hopcount: u32,
        now: i64,
    ) -> Self {
        Server {
            name: name.into(),
            numeric,
            uplink: Some(uplink.into()),
            downlinks: Vec::new(),
            link_established_ts: now,
            burst_state: BurstState::NotBursted,
            role: ServerRole::Leaf,
            ts_synced: false,
            hopcount,
        }
    }

    pub fn is_self(&self) -> bool {
        self.uplink.is_none()
    }
}
