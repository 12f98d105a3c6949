//! Case-insensitive map keys using the rfc1459 folding rule.

use std::hash::{Hash, Hasher};

use p10_proto::casemap::irc_to_lower;

/// A string wrapped so its `Eq`/`Hash` impls use rfc1459 case folding,
/// suitable as a `DashMap`/`HashMap` key for nicks and channel names.
#[derive(Debug, Clone)]
pub struct CaseFoldedKey {
    folded: String,
}

impl CaseFoldedKey {
    pub fn new(s: &str) -> Self {
        CaseFoldedKey {
            folded: irc_to_lower(s),
        }
    }
}

impl PartialEq for CaseFoldedKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for CaseFoldedKey {}

impl Hash for CaseFoldedKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_for_equality() {
        assert_eq!(CaseFoldedKey::new("Wiz"), CaseFoldedKey::new("WIZ"));
        assert_eq!(CaseFoldedKey::new("#Chan[1]"), CaseFoldedKey::new("#CHAN{1}"));
    }
}
