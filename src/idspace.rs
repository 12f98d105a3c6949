//! Numeric allocation for this server's local users.
//!
//! The server's own numeric is fixed at startup (external configuration)
//! and never reallocated. This type owns the 18-bit user-index counter and
//! hands out fresh [`p10_proto::Numeric::User`] values.

use std::sync::atomic::{AtomicU32, Ordering};

use p10_proto::numeric::{self, Numeric};

use crate::error::IdSpaceError;

const MAX_USER_INDEX: u32 = 0x3_FFFF;

pub struct IdSpace {
    server_numeric: u16,
    next_index: AtomicU32,
}

impl IdSpace {
    pub fn new(server_numeric: u16) -> Self {
        IdSpace {
            server_numeric,
            next_index: AtomicU32::new(0),
        }
    }

    pub fn server_numeric(&self) -> u16 {
        self.server_numeric
    }

    /// Allocate the next free user numeric on this server.
    ///
    /// Exhaustion is a hard per-session cap: reclamation of numerics freed
    /// by QUIT/KILL is deferred to a future revision (see the allocation
    /// policy note this type is grounded on).
    pub fn allocate_user(&self) -> Result<Numeric, IdSpaceError> {
        let index = self.next_index.fetch_add(1, Ordering::SeqCst);
        if index > MAX_USER_INDEX {
            return Err(IdSpaceError::NumericSpaceExhausted(self.server_numeric));
        }
        Ok(Numeric::User(self.server_numeric, index))
    }

    pub fn encode_server(&self) -> [u8; 2] {
        numeric::encode_server(self.server_numeric).expect("server numeric validated at startup")
    }
}
