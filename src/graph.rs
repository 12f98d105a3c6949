//! `Network`: the single value owning the Registry, IdSpace, and self-server
//! identity, passed explicitly through handlers as context.
//!
//! This collapses the reference source's global mutable singletons (`me`,
//! `GlobalClientList`, `ServerStats`) into one owned value with no
//! module-level mutable state, per the entity-graph design notes.

use std::sync::Arc;

use crate::config::CoreConfig;
use crate::entity::Server;
use crate::idspace::IdSpace;
use crate::registry::Registry;
use crate::time::Clock;
use crate::whowas::WhowasRing;

pub struct Network {
    pub config: CoreConfig,
    pub registry: Registry,
    pub idspace: IdSpace,
    pub whowas: WhowasRing,
    pub clock: Arc<dyn Clock>,
    pub self_server_name: String,
}

impl Network {
    pub fn new(config: CoreConfig, clock: Arc<dyn Clock>) -> Self {
        let idspace = IdSpace::new(config.server_numeric);
        let registry = Registry::new();
        let whowas = WhowasRing::new(config.whowas_max_entries, config.whowas_seconds);
        let self_server_name = config.server_name.clone();
        let now = clock.now();
        registry.register_server(Server::new_self(
            self_server_name.clone(),
            config.server_numeric,
            now,
        ));
        Network {
            config,
            registry,
            idspace,
            whowas,
            clock,
            self_server_name,
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;

    #[test]
    fn new_network_registers_self_server() {
        let net = Network::new(CoreConfig::default(), Arc::new(ManualClock::new(1000)));
        assert!(net.registry.find_server(&net.self_server_name).is_some());
    }
}
