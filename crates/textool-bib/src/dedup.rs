use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::model::BibEntry;

#[derive(Error, Debug)]
pub enum DedupError {
    /// An input entry has no citation key. The whole batch is rejected.
    #[error("entry #{index} has no citation key")]
    MissingKey { index: usize },
}

/// Why an entry was dropped from the kept set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    /// Same key and same DOI as an already-kept entry.
    SameKeySameDoi,
    /// Different key but same DOI as an earlier kept entry.
    DiffKeySameDoi,
}

impl fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalReason::SameKeySameDoi => f.write_str("same entry same doi"),
            RemovalReason::DiffKeySameDoi => f.write_str("diff entry same doi"),
        }
    }
}

/// An entry dropped from the kept set, with the reason it was dropped.
#[derive(Debug, Clone)]
pub struct RemovedEntry {
    pub entry: BibEntry,
    pub reason: RemovalReason,
}

/// The outcome of de-duplicating one batch of entries.
///
/// Every input entry lands either in `kept` (possibly under a renamed key)
/// or in `removed`; `renamed` and `doi_groups` are additional
/// classifications of kept entries, not separate destinations.
#[derive(Debug, Clone, Default)]
pub struct DedupResult {
    /// De-duplicated entries, unique keys, in first-seen order.
    pub kept: Vec<BibEntry>,
    /// Entries dropped from the kept set.
    pub removed: Vec<RemovedEntry>,
    /// Entries that collided on a key and were kept under `<key>_N`.
    pub renamed: Vec<BibEntry>,
    /// Groups of kept entries sharing one DOI under different keys.
    pub doi_groups: Vec<Vec<BibEntry>>,
}

/// De-duplicate a batch of bibliography entries.
///
/// Key collisions are resolved in input order: an incoming entry whose key
/// is already taken is dropped when both sides carry the same DOI, and
/// renamed to a fresh `<key>_N` otherwise. After that pass, kept entries
/// sharing one DOI under different keys are grouped; with
/// `remove_same_doi` everything after the first entry of each group is
/// dropped as well.
///
/// The earliest-seen entry for a given key or DOI always survives
/// unchanged.
pub fn deduplicate(
    entries: &[BibEntry],
    remove_same_doi: bool,
) -> Result<DedupResult, DedupError> {
    let mut kept = KeptSet::new();
    let mut removed = Vec::new();
    let mut renamed = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.key.is_empty() {
            return Err(DedupError::MissingKey { index });
        }

        let Some(existing) = kept.get(&entry.key) else {
            kept.insert(entry.clone());
            continue;
        };

        // A missing DOI on either side never counts as a match.
        let same_doi = match (entry.doi(), existing.doi()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };

        if same_doi {
            removed.push(RemovedEntry {
                entry: entry.clone(),
                reason: RemovalReason::SameKeySameDoi,
            });
        } else {
            let mut copy = entry.clone();
            copy.key = fresh_key(&entry.key, &kept);
            tracing::debug!(from = %entry.key, to = %copy.key, "renamed colliding key");
            renamed.push(copy.clone());
            kept.insert(copy);
        }
    }

    // Second pass: group kept entries by DOI. Runs over the final kept set,
    // so renamed entries participate in groups under their new keys.
    let mut doi_groups = Vec::new();
    for (_, keys) in doi_index(&kept) {
        if keys.len() < 2 {
            continue;
        }

        let group: Vec<BibEntry> = keys.iter().filter_map(|k| kept.get(k)).cloned().collect();
        doi_groups.push(group);

        if remove_same_doi {
            for key in &keys[1..] {
                if let Some(entry) = kept.remove(key) {
                    removed.push(RemovedEntry {
                        entry,
                        reason: RemovalReason::DiffKeySameDoi,
                    });
                }
            }
        }
    }

    Ok(DedupResult {
        kept: kept.into_entries(),
        removed,
        renamed,
        doi_groups,
    })
}

/// Probe `<base>_1`, `<base>_2`, ... until an unused key is found.
fn fresh_key(base: &str, kept: &KeptSet) -> String {
    let mut i = 1;
    loop {
        let candidate = format!("{}_{}", base, i);
        if !kept.contains(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

/// DOI → keys of all kept entries carrying it, in kept order.
fn doi_index(kept: &KeptSet) -> Vec<(String, Vec<String>)> {
    let mut index: Vec<(String, Vec<String>)> = Vec::new();
    let mut slot: HashMap<String, usize> = HashMap::new();

    for entry in kept.iter() {
        let Some(doi) = entry.doi() else { continue };
        match slot.get(doi) {
            Some(&i) => index[i].1.push(entry.key.clone()),
            None => {
                slot.insert(doi.to_string(), index.len());
                index.push((doi.to_string(), vec![entry.key.clone()]));
            }
        }
    }

    index
}

/// Kept entries: hash lookup by key plus insertion order.
struct KeptSet {
    by_key: HashMap<String, BibEntry>,
    order: Vec<String>,
}

impl KeptSet {
    fn new() -> Self {
        Self {
            by_key: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&BibEntry> {
        self.by_key.get(key)
    }

    /// Insert under an unused key.
    fn insert(&mut self, entry: BibEntry) {
        debug_assert!(!self.by_key.contains_key(&entry.key));
        self.order.push(entry.key.clone());
        self.by_key.insert(entry.key.clone(), entry);
    }

    /// Remove one entry; the order of the rest is preserved.
    fn remove(&mut self, key: &str) -> Option<BibEntry> {
        let entry = self.by_key.remove(key)?;
        self.order.retain(|k| k != key);
        Some(entry)
    }

    fn iter(&self) -> impl Iterator<Item = &BibEntry> {
        self.order.iter().filter_map(|k| self.by_key.get(k))
    }

    fn into_entries(mut self) -> Vec<BibEntry> {
        self.order
            .iter()
            .filter_map(|k| self.by_key.remove(k))
            .collect()
    }
}
