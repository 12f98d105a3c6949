//! Runtime feature flags: a closed, named set of configuration points with
//! defaults, a minimum privilege to modify, and a "mark" bit used by
//! reload diffing (unmark all -> reparse config -> revert anything still
//! unmarked to its default).

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Privilege {
    Anyone,
    LocalOper,
    GlobalOper,
    Admin,
}

#[derive(Debug, Clone)]
pub struct FeatureDef {
    pub default: FeatureValue,
    pub min_privilege: Privilege,
}

pub struct FeatureTable {
    defs: HashMap<&'static str, FeatureDef>,
    values: HashMap<&'static str, FeatureValue>,
    marked: HashMap<&'static str, bool>,
}

impl FeatureTable {
    pub fn new(defs: Vec<(&'static str, FeatureDef)>) -> Self {
        let mut values = HashMap::new();
        let mut marked = HashMap::new();
        let mut table = HashMap::new();
        for (name, def) in defs {
            values.insert(name, def.default.clone());
            marked.insert(name, false);
            table.insert(name, def);
        }
        FeatureTable {
            defs: table,
            values,
            marked,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: FeatureValue, privilege: Privilege) -> Result<(), &'static str> {
        let (&key, def) = self.defs.get_key_value(name).ok_or("no such feature")?;
        if privilege < def.min_privilege {
            return Err("insufficient privilege");
        }
        self.values.insert(key, value);
        if let Some(flag) = self.marked.get_mut(name) {
            *flag = true;
        }
        Ok(())
    }

    /// Unmark every feature ahead of a config reload.
    pub fn unmark_all(&mut self) {
        for flag in self.marked.values_mut() {
            *flag = false;
        }
    }

    /// Revert any feature still unmarked (not touched by the reload) to its default.
    pub fn revert_unmarked(&mut self) {
        let reverts: Vec<_> = self
            .marked
            .iter()
            .filter(|(_, marked)| !**marked)
            .map(|(name, _)| *name)
            .collect();
        for name in reverts {
            if let Some(def) = self.defs.get(name) {
                self.values.insert(name, def.default.clone());
            }
        }
    }
}
