//! Name and numeric index over the live entity set.
//!
//! Lookups never block on an unrelated mutation: each name class is its own
//! sharded concurrent map, guarded at the granularity of one entity, never
//! the whole Registry. Registration (insert-if-absent) is a single atomic
//! operation per name.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::casefold::CaseFoldedKey;
use crate::entity::{Channel, Server, User};
use crate::error::RegistryError;

pub type UserHandle = Arc<RwLock<User>>;
pub type ChannelHandle = Arc<RwLock<Channel>>;
pub type ServerHandle = Arc<RwLock<Server>>;

#[derive(Default)]
pub struct Registry {
    nicks: DashMap<CaseFoldedKey, UserHandle>,
    users_by_numeric: DashMap<String, UserHandle>,
    channels: DashMap<CaseFoldedKey, ChannelHandle>,
    servers_by_name: DashMap<String, ServerHandle>,
    servers_by_numeric: DashMap<u16, ServerHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    pub fn find_user(&self, nick: &str) -> Option<UserHandle> {
        self.nicks.get(&CaseFoldedKey::new(nick)).map(|e| e.clone())
    }

    pub fn find_user_by_numeric(&self, numeric: &str) -> Option<UserHandle> {
        self.users_by_numeric.get(numeric).map(|e| e.clone())
    }

    pub fn find_channel(&self, name: &str) -> Option<ChannelHandle> {
        self.channels.get(&CaseFoldedKey::new(name)).map(|e| e.clone())
    }

    pub fn find_server(&self, name: &str) -> Option<ServerHandle> {
        self.servers_by_name.get(name).map(|e| e.clone())
    }

    pub fn find_server_by_numeric(&self, numeric: u16) -> Option<ServerHandle> {
        self.servers_by_numeric.get(&numeric).map(|e| e.clone())
    }

    /// Register a brand-new user under its nick and numeric.
    ///
    /// Returns `NickInUse` if the nick slot is already occupied; the
    /// collision path (CollisionCore) must be consulted before calling
    /// this for a nick that might already be live.
    pub fn register_user(&self, user: User) -> Result<UserHandle, RegistryError> {
        let key = CaseFoldedKey::new(&user.nick);
        if self.nicks.contains_key(&key) {
            return Err(RegistryError::NickInUse(user.nick.clone()));
        }
        let numeric = user.numeric.clone();
        let handle: UserHandle = Arc::new(RwLock::new(user));
        self.nicks.insert(key, handle.clone());
        self.users_by_numeric.insert(numeric, handle.clone());
        Ok(handle)
    }

    /// Rename an already-registered user's nick slot (NICK change).
    pub fn rename_user(&self, old_nick: &str, new_nick: &str) -> Result<(), RegistryError> {
        let old_key = CaseFoldedKey::new(old_nick);
        let new_key = CaseFoldedKey::new(new_nick);
        if old_key != new_key && self.nicks.contains_key(&new_key) {
            return Err(RegistryError::NickInUse(new_nick.to_string()));
        }
        let (_, handle) = self
            .nicks
            .remove(&old_key)
            .ok_or_else(|| RegistryError::NoSuchNick(old_nick.to_string()))?;
        self.nicks.insert(new_key, handle);
        Ok(())
    }

    pub fn unregister_user(&self, nick: &str, numeric: &str) {
        self.nicks.remove(&CaseFoldedKey::new(nick));
        self.users_by_numeric.remove(numeric);
    }

    pub fn register_channel(&self, channel: Channel) -> ChannelHandle {
        let key = CaseFoldedKey::new(&channel.name);
        let handle: ChannelHandle = Arc::new(RwLock::new(channel));
        self.channels.insert(key, handle.clone());
        handle
    }

    pub fn unregister_channel(&self, name: &str) {
        self.channels.remove(&CaseFoldedKey::new(name));
    }

    pub fn register_server(&self, server: Server) -> ServerHandle {
        let numeric = server.numeric;
        let name = server.name.clone();
        let handle: ServerHandle = Arc::new(RwLock::new(server));
        self.servers_by_name.insert(name, handle.clone());
        self.servers_by_numeric.insert(numeric, handle.clone());
        handle
    }

    pub fn unregister_server(&self, name: &str, numeric: u16) {
        self.servers_by_name.remove(name);
        self.servers_by_numeric.remove(&numeric);
    }
}
