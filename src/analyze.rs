//! Password reuse statistics over a [`CredentialTable`].
//!
//! Accounts are grouped by identical hash. A group with two or more members is
//! a reused password; its size is the blast radius of compromising any one of
//! its members.
use std::collections::HashMap;
use std::collections::HashSet;

use serde::Serialize;

use crate::table::CredentialTable;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("no credential records found in input")]
    EmptyInput,
}

/// Accounts sharing one password hash, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharedGroup {
    pub hash: String,
    pub users: Vec<String>,
}

impl SharedGroup {
    pub fn is_reused(&self) -> bool {
        self.users.len() > 1
    }
}

/// Groups every account of a table by hash. Hash order is the order in which
/// each hash is first met while walking the table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReuseGroups {
    groups: Vec<SharedGroup>,
}

impl ReuseGroups {
    pub fn from_table(table: &CredentialTable) -> Self {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<SharedGroup> = Vec::new();
        for (user, hash) in table.iter() {
            let slot = *slots.entry(hash).or_insert_with(|| {
                groups.push(SharedGroup {
                    hash: hash.to_string(),
                    users: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].users.push(user.to_string());
        }
        Self { groups }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedGroup> + '_ {
        self.groups.iter()
    }

    pub fn reused(&self) -> impl Iterator<Item = &SharedGroup> + '_ {
        self.groups.iter().filter(|g| g.is_reused())
    }

    fn into_reused(self) -> Vec<SharedGroup> {
        self.groups.into_iter().filter(|g| g.is_reused()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReuseReport {
    pub total_users: usize,
    pub distinct_hashes: usize,
    pub users_with_reused_passwords: usize,
    /// Hashes held by two or more accounts.
    pub reused_password_count: usize,
    /// Same quantity as `reused_password_count`, counted over distinct hashes.
    pub unique_reused_passwords: usize,
    /// Size of the largest group, including the compromised account.
    pub worst_case_blast_radius: usize,
    /// Accounts beyond the first in each group, averaged over all accounts.
    pub average_blast_radius: f64,
    pub reused_percentage: f64,
    pub shared_groups: Vec<SharedGroup>,
}

fn ratio(n: usize, d: usize) -> f64 {
    (n as f64) / (d as f64)
}

pub fn analyze(table: &CredentialTable) -> Result<ReuseReport, AnalyzeError> {
    if table.is_empty() {
        return Err(AnalyzeError::EmptyInput);
    }
    let groups = ReuseGroups::from_table(table);
    let total_users = table.len();

    let reused_password_count = groups.reused().count();
    let users_with_reused_passwords: usize = groups.reused().map(|g| g.users.len()).sum();
    let unique_reused_passwords = groups
        .iter()
        .filter(|g| g.users.len() > 1)
        .map(|g| g.hash.as_str())
        .collect::<HashSet<_>>()
        .len();
    let worst_case_blast_radius = groups.iter().map(|g| g.users.len()).max().unwrap_or(0);
    let extra_accounts: usize = groups.iter().map(|g| g.users.len() - 1).sum();

    Ok(ReuseReport {
        total_users,
        distinct_hashes: groups.len(),
        users_with_reused_passwords,
        reused_password_count,
        unique_reused_passwords,
        worst_case_blast_radius,
        average_blast_radius: ratio(extra_accounts, total_users),
        reused_percentage: ratio(users_with_reused_passwords, total_users) * 100.0,
        shared_groups: groups.into_reused(),
    })
}
