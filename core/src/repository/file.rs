use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{default_home, DEFAULT_STORAGE_KEY};
use crate::model::ledger::Ledger;
use crate::repository::traits::LedgerRepository;

const SNAPSHOT_VERSION: u32 = 0;
const TMP_SUFFIX: &str = "tmp";
const CORRUPT_SUFFIX: &str = "corrupt";

// On-disk envelope: {"state":{"fruits":{...}},"version":0}
#[derive(Serialize, Deserialize)]
struct PersistedState {
    fruits: Ledger,
}

#[derive(Serialize, Deserialize)]
struct PersistedSnapshot {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Error)]
enum SnapshotError {
    #[error("could not read snapshot: {0}")]
    Io(#[from] io::Error),
    #[error("malformed snapshot: {0}")]
    Malformed(serde_json::Error),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            SnapshotError::Io(err.into())
        } else {
            SnapshotError::Malformed(err)
        }
    }
}

/// JSON snapshot of the ledger in a single file under the data directory.
#[derive(Clone, Debug)]
pub struct FileLedgerRepository {
    file_path: PathBuf,
}

impl FileLedgerRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match base_dir {
            Some(dir) => dir,
            None => default_home()?,
        };
        Self::with_storage_key(dir, DEFAULT_STORAGE_KEY)
    }

    pub fn with_storage_key(base_dir: PathBuf, storage_key: &str) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("Could not create data directory {}", base_dir.display()))?;
        let file_path = base_dir.join(format!("{}.json", storage_key));
        Ok(FileLedgerRepository { file_path })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }

    /// `Ok(None)` when no snapshot has been written yet.
    fn read_snapshot(&self) -> Result<Option<Ledger>, SnapshotError> {
        let file = match File::open(&self.file_path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let reader = BufReader::new(file);
        let snapshot: PersistedSnapshot = serde_json::from_reader(reader)?;
        if snapshot.version != SNAPSHOT_VERSION {
            debug!(version = snapshot.version, "loading snapshot with unexpected version");
        }
        Ok(Some(snapshot.state.fruits))
    }

    // Keep the malformed file around instead of letting the next save clobber it.
    fn quarantine(&self) {
        let target = self.sibling_path(CORRUPT_SUFFIX);
        match fs::rename(&self.file_path, &target) {
            Ok(()) => warn!(path = %target.display(), "moved malformed snapshot aside"),
            Err(err) => warn!(error = %err, "could not move malformed snapshot aside"),
        }
    }
}

impl LedgerRepository for FileLedgerRepository {
    fn load(&self) -> Ledger {
        match self.read_snapshot() {
            Ok(Some(ledger)) => {
                info!(path = %self.file_path.display(), entries = ledger.len(), "ledger snapshot loaded");
                ledger
            }
            Ok(None) => {
                info!(path = %self.file_path.display(), "no ledger snapshot yet, starting empty");
                Ledger::new()
            }
            Err(err @ SnapshotError::Malformed(_)) => {
                warn!(path = %self.file_path.display(), error = %err, "ledger snapshot corrupt, starting empty");
                self.quarantine();
                Ledger::new()
            }
            Err(err @ SnapshotError::Io(_)) => {
                warn!(path = %self.file_path.display(), error = %err, "ledger snapshot unreadable, starting empty");
                Ledger::new()
            }
        }
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        let snapshot = PersistedSnapshot {
            state: PersistedState {
                fruits: ledger.clone(),
            },
            version: SNAPSHOT_VERSION,
        };

        let tmp = self.sibling_path(TMP_SUFFIX);
        let file = File::create(&tmp)
            .with_context(|| format!("Could not create {}", tmp.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp, &self.file_path)
            .with_context(|| format!("Could not replace {}", self.file_path.display()))?;
        debug!(path = %self.file_path.display(), entries = ledger.len(), "ledger snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date_key::DateKey;
    use crate::model::fruit::FruitType;
    use tempfile::tempdir;

    fn sample_ledger() -> Ledger {
        let may = DateKey::parse("2025-05-23").unwrap();
        let june = DateKey::parse("2025-06-01").unwrap();
        Ledger::new()
            .with_added(&may, FruitType::Banana)
            .and_then(|l| l.with_added(&may, FruitType::Banana))
            .and_then(|l| l.with_added(&may, FruitType::Apple))
            .and_then(|l| l.with_added(&june, FruitType::Orange))
            .unwrap()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let repo = FileLedgerRepository::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(repo.load().is_empty());
        assert!(!repo.file_path().exists());
    }

    #[test]
    fn test_round_trip_through_fresh_instance() {
        let dir = tempdir().unwrap();
        let ledger = sample_ledger();

        let repo = FileLedgerRepository::new(Some(dir.path().to_path_buf())).unwrap();
        repo.save(&ledger).unwrap();
        assert_eq!(repo.load(), ledger);

        let reopened = FileLedgerRepository::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reopened.load(), ledger);
        assert!(!repo.sibling_path(TMP_SUFFIX).exists());
    }

    #[test]
    fn test_file_uses_storage_envelope() {
        let dir = tempdir().unwrap();
        let repo = FileLedgerRepository::with_storage_key(dir.path().to_path_buf(), "fruit-storage").unwrap();
        repo.save(&sample_ledger()).unwrap();

        assert_eq!(repo.file_path(), dir.path().join("fruit-storage.json"));
        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.file_path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 0);
        assert_eq!(
            raw["state"]["fruits"]["2025-05-23"],
            serde_json::json!({ "banana": 2, "apple": 1, "orange": 0 })
        );
    }

    #[test]
    fn test_reads_snapshot_without_version_or_fields() {
        let dir = tempdir().unwrap();
        let repo = FileLedgerRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(
            repo.file_path(),
            r#"{"state":{"fruits":{"2025-05-23":{"apple":4}}}}"#,
        )
        .unwrap();

        let ledger = repo.load();
        let counts = ledger.counts_for(&DateKey::parse("2025-05-23").unwrap());
        assert_eq!(counts.apple, 4);
        assert_eq!(counts.banana, 0);
    }

    #[test]
    fn test_corrupt_file_loads_empty_and_is_kept_aside() {
        let dir = tempdir().unwrap();
        let repo = FileLedgerRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(repo.file_path(), "{ not json").unwrap();

        assert!(repo.load().is_empty());
        assert!(!repo.file_path().exists());
        let kept = fs::read_to_string(repo.sibling_path(CORRUPT_SUFFIX)).unwrap();
        assert_eq!(kept, "{ not json");
    }

    #[test]
    fn test_invalid_date_key_makes_snapshot_corrupt() {
        let dir = tempdir().unwrap();
        let repo = FileLedgerRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(
            repo.file_path(),
            r#"{"state":{"fruits":{"2025-02-30":{"banana":1,"apple":0,"orange":0}}},"version":0}"#,
        )
        .unwrap();

        assert!(repo.load().is_empty());
        assert!(repo.sibling_path(CORRUPT_SUFFIX).exists());
    }

    #[test]
    fn test_read_error_is_not_quarantined() {
        let dir = tempdir().unwrap();
        let repo = FileLedgerRepository::new(Some(dir.path().to_path_buf())).unwrap();
        fs::create_dir(repo.file_path()).unwrap();

        assert!(repo.load().is_empty());
        assert!(repo.file_path().is_dir());
        assert!(!repo.sibling_path(CORRUPT_SUFFIX).exists());
    }
}
