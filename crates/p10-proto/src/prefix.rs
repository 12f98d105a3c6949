//! Message source (`:prefix`) representation.

use crate::numeric::{decode_numeric, Numeric, NumericError};

/// Identifies the originator of a line.
///
/// On a server link the prefix is always a numeric (server or user); on a
/// client link it is either the client's own nickname or absent, in which
/// case the source is implicitly the connection peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prefix {
    Numeric(Numeric),
    Nick(String),
}

impl Prefix {
    /// Parse the text following the leading `:` of a line.
    ///
    /// A bare 2- or 5-character token drawn entirely from the P10 alphabet
    /// is treated as a numeric; anything else is taken as a client nickname
    /// verbatim (client links never send numeric prefixes).
    pub fn parse(raw: &str) -> Prefix {
        if matches!(raw.len(), 2 | 5) {
            if let Ok(numeric) = decode_numeric(raw.as_bytes()) {
                return Prefix::Numeric(numeric);
            }
        }
        Prefix::Nick(raw.to_string())
    }

    pub fn encode(&self) -> Result<String, NumericError> {
        match self {
            Prefix::Numeric(Numeric::Server(s)) => {
                let enc = crate::numeric::encode_server(*s)?;
                Ok(String::from_utf8(enc.to_vec()).expect("alphabet is ASCII"))
            }
            Prefix::Numeric(Numeric::User(s, i)) => {
                let enc = crate::numeric::encode_user(*s, *i)?;
                Ok(String::from_utf8(enc.to_vec()).expect("alphabet is ASCII"))
            }
            Prefix::Nick(n) => Ok(n.clone()),
        }
    }
}
