//! Deck files: one JSON document holding a bucket assignment and the answer
//! history that produced it.
//!
//! Every save goes through a temp file in the target directory and is then
//! renamed over the deck, so a crash mid-write leaves the previous deck
//! intact. A timestamped copy is also dropped into the backup directory,
//! which is trimmed to the newest `max_backups` files.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use leitner_core::{AnswerRecord, BucketMap, Flashcard};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub mod paths;

pub const FILE_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub buckets: BucketMap,
    #[serde(default)]
    pub history: Vec<AnswerRecord>,
}

impl Deck {
    /// New deck with every card in bucket 0.
    pub fn new(cards: impl IntoIterator<Item = Flashcard>) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_VERSION,
            created_at: now,
            updated_at: now,
            buckets: BucketMap::starting(cards),
            history: Vec::new(),
        }
    }

    /// Last day that has an answer on record.
    pub fn last_day(&self) -> Option<u32> {
        self.history.iter().map(|r| r.day).max()
    }
}

pub struct DeckStore {
    path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
}

impl DeckStore {
    pub fn open_default() -> Self {
        let (file, backups) = paths::default_deck_file();
        Self::open_with(file, backups, 10)
    }

    /// Deck at `path` with backups kept beside it.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let backups = paths::backups_for(&path);
        Self::open_with(path, backups, 10)
    }

    pub fn open_with(path: PathBuf, backups_dir: PathBuf, max_backups: usize) -> Self {
        Self {
            path,
            backups_dir,
            max_backups: max_backups.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<Deck> {
        let buf = fs::read_to_string(&self.path)
            .with_context(|| format!("reading deck {}", self.path.display()))?;
        let deck: Deck = serde_json::from_str(&buf)
            .with_context(|| format!("parsing deck {}", self.path.display()))?;
        if deck.version > FILE_VERSION {
            bail!(
                "deck {} has version {}, newest supported is {}",
                self.path.display(),
                deck.version,
                FILE_VERSION
            );
        }
        debug!(path = %self.path.display(), cards = deck.buckets.total_cards(), "loaded deck");
        Ok(deck)
    }

    pub fn save(&self, deck: &mut Deck) -> Result<()> {
        deck.updated_at = Utc::now();
        let json = serde_json::to_vec_pretty(deck).context("serializing deck")?;
        write_with_backup(&self.path, &self.backups_dir, self.max_backups, &json)
            .with_context(|| format!("writing deck {}", self.path.display()))?;
        info!(path = %self.path.display(), "saved deck");
        Ok(())
    }
}

fn write_with_backup(
    path: &Path,
    backups_dir: &Path,
    max_backups: usize,
    json: &[u8],
) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    fs::create_dir_all(backups_dir)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(json)?;
    tmp.flush()?;
    tmp.persist(path)?;

    let ts = Utc::now().format("%Y%m%d-%H%M%S%3f");
    let backup_path = backups_dir.join(format!("leitner-{ts}.json"));
    let mut btmp = NamedTempFile::new_in(backups_dir)?;
    btmp.write_all(json)?;
    btmp.flush()?;
    btmp.persist(&backup_path)?;

    rotate_backups(backups_dir, max_backups)
}

fn rotate_backups(dir: &Path, keep: usize) -> std::io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    // names embed the timestamp, so lexical order is age order
    entries.sort_by_key(|e| e.file_name());
    if entries.len() > keep {
        for e in &entries[0..entries.len() - keep] {
            let _ = fs::remove_file(e.path());
        }
    }
    Ok(())
}
