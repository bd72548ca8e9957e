//! Username to password-hash table built from a credential dump.
//!
//! The table keeps usernames in the order they were first inserted. A later
//! insert for an existing username replaces its hash in place without moving
//! it, so iteration order only depends on where each account first appeared.
//! Empty hashes are never stored.
use std::collections::HashMap;

/// Mapping of account name to password hash with first-insertion ordering.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CredentialTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl CredentialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the hash stored for `username`.
    ///
    /// Returns the previous hash when the username was already present. An
    /// empty `hash` is ignored and leaves the table untouched.
    pub fn insert(&mut self, username: &str, hash: &str) -> Option<String> {
        if hash.is_empty() {
            return None;
        }
        match self.index.get(username) {
            Some(&slot) => Some(std::mem::replace(
                &mut self.entries[slot].1,
                hash.to_string(),
            )),
            None => {
                self.index.insert(username.to_string(), self.entries.len());
                self.entries.push((username.to_string(), hash.to_string()));
                None
            }
        }
    }

    pub fn get(&self, username: &str) -> Option<&str> {
        self.index
            .get(username)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(username, hash)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(user, hash)| (user.as_str(), hash.as_str()))
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for CredentialTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut table = CredentialTable::new();
        for (user, hash) in iter {
            table.insert(user, hash);
        }
        table
    }
}
