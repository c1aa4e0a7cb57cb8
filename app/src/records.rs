use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use minado_core::Difficulty;
use serde::{Deserialize, Serialize};

/// Best completion times keyed by difficulty name; a missing key means no
/// record yet. Pure data, so the merge semantics are testable without any
/// file I/O.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordTable {
    best: BTreeMap<String, u32>,
}

impl RecordTable {
    pub fn best_for(&self, difficulty: Difficulty) -> Option<u32> {
        self.best.get(difficulty.name()).copied()
    }

    /// Keep the better of the stored and candidate times: lower wins,
    /// absence always loses. Returns whether the table changed.
    pub fn merge(&mut self, difficulty: Difficulty, elapsed_secs: u32) -> bool {
        match self.best.get(difficulty.name()) {
            Some(&best) if best <= elapsed_secs => false,
            _ => {
                self.best.insert(difficulty.name().to_owned(), elapsed_secs);
                true
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

/// Durable best-record storage: a JSON file read once at startup and
/// rewritten synchronously whenever a record improves, so the new best
/// survives even an abnormal exit right after the win.
#[derive(Debug)]
pub struct RecordStore {
    table: RecordTable,
    path: PathBuf,
}

impl RecordStore {
    /// Open the store, falling back to an empty table when the file is
    /// missing, unreadable, or malformed. Records are never worth failing
    /// startup over.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let table = match load_table(&path) {
            Ok(Some(table)) => table,
            Ok(None) => RecordTable::default(),
            Err(err) => {
                log::warn!("ignoring unreadable record file {}: {err:#}", path.display());
                RecordTable::default()
            }
        };
        Self { table, path }
    }

    pub fn best_for(&self, difficulty: Difficulty) -> Option<u32> {
        self.table.best_for(difficulty)
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    /// Feed one finished session into the table. Losses never touch it; an
    /// improved win is persisted before this returns. When the write fails
    /// the in-memory best still stands for the rest of the run. Returns
    /// whether a new best was set.
    pub fn report_result(&mut self, difficulty: Difficulty, elapsed_secs: u32, won: bool) -> bool {
        if !won {
            return false;
        }
        let improved = self.table.merge(difficulty, elapsed_secs);
        if improved {
            log::debug!("new best for {difficulty}: {elapsed_secs}s");
            if let Err(err) = store_table(&self.path, &self.table) {
                log::warn!("failed to persist records to {}: {err:#}", self.path.display());
            }
        }
        improved
    }
}

fn load_table(path: &Path) -> anyhow::Result<Option<RecordTable>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let table = serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(table))
}

/// Write-temp-then-rename, so a crash mid-write leaves the previous file
/// intact instead of a torn one.
fn store_table(path: &Path, table: &RecordTable) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(table)?;
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let tmp = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_takes_strictly_better_times_only() {
        let mut table = RecordTable::default();

        assert_eq!(table.best_for(Difficulty::Normal), None);
        assert!(table.merge(Difficulty::Normal, 120));
        assert!(!table.merge(Difficulty::Normal, 150));
        assert!(!table.merge(Difficulty::Normal, 120));
        assert_eq!(table.best_for(Difficulty::Normal), Some(120));

        assert!(table.merge(Difficulty::Normal, 95));
        assert_eq!(table.best_for(Difficulty::Normal), Some(95));
    }

    #[test]
    fn difficulties_keep_separate_records() {
        let mut table = RecordTable::default();
        table.merge(Difficulty::Easy, 40);
        table.merge(Difficulty::VeryHard, 900);

        assert_eq!(table.best_for(Difficulty::Easy), Some(40));
        assert_eq!(table.best_for(Difficulty::VeryHard), Some(900));
        assert_eq!(table.best_for(Difficulty::Hard), None);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::open(dir.path().join("records.json"));

        assert!(store.table().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ not json").unwrap();

        let store = RecordStore::open(&path);

        assert!(store.table().is_empty());
    }

    #[test]
    fn losses_never_touch_the_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut store = RecordStore::open(&path);

        assert!(!store.report_result(Difficulty::Easy, 10, false));

        assert!(store.table().is_empty());
        assert!(!path.exists(), "a loss must not create the record file");
    }

    #[test]
    fn improved_wins_round_trip_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");

        let mut store = RecordStore::open(&path);
        assert!(store.report_result(Difficulty::Normal, 120, true));

        let reloaded = RecordStore::open(&path);
        assert_eq!(reloaded.best_for(Difficulty::Normal), Some(120));

        let mut store = reloaded;
        assert!(!store.report_result(Difficulty::Normal, 150, true));
        let reloaded = RecordStore::open(&path);
        assert_eq!(reloaded.best_for(Difficulty::Normal), Some(120));
    }

    #[test]
    fn unwritable_path_keeps_the_in_memory_best() {
        // a directory sitting where the file should be makes the rename fail
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::create_dir_all(&path).unwrap();

        let mut store = RecordStore::open(&path);
        assert!(store.report_result(Difficulty::Easy, 33, true));

        assert_eq!(store.best_for(Difficulty::Easy), Some(33));
    }
}
