use directories::ProjectDirs;
use std::path::PathBuf;

pub fn data_root() -> PathBuf {
    if let Some(pd) = ProjectDirs::from("com", "leitner", "Leitner") {
        pd.data_dir().to_path_buf()
    } else {
        // no home directory; fall back to the working dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// Deck file and backup directory used when no `--deck` is given.
pub fn default_deck_file() -> (PathBuf, PathBuf) {
    let root = data_root();
    (root.join("leitner-deck.json"), root.join("backups"))
}

/// Backups live next to an explicitly chosen deck file.
pub fn backups_for(deck: &std::path::Path) -> PathBuf {
    deck.with_extension("backups")
}
