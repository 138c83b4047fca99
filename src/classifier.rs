//! Path classification for season packs
//!
//! A scanned file is expected to live at `<library>/<pack>/<release>/<file>`: the
//! release directory holds one episode, the pack directory groups a season's releases.
//! [`PackPath::classify`] derives those levels purely from the path string and
//! [`PackPath::is_season_pack`] decides whether the pack directory looks like a season
//! archive (`S01.`, `S12.`, ...).

use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

/// `S` followed by exactly two digits and a literal dot, anywhere in the path
#[allow(clippy::expect_used)]
static SEASON_PACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"S[0-9][0-9]\.").expect("season pack pattern is valid"));

/// The directory levels derived from one scanned file entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackPath {
    /// The scanned file itself
    pub entry: PathBuf,
    /// Parent of `entry` (one episode's release directory)
    pub release_path: PathBuf,
    /// Base name of `release_path`
    pub release_name: String,
    /// Parent of `release_path` (the season pack directory)
    pub pack_path: PathBuf,
    /// Base name of `pack_path`, used as the indexer query
    pub pack_name: String,
    /// Parent of `pack_path`, recorded as the output `path`
    pub pack_parent_path: PathBuf,
}

impl PackPath {
    /// Derive release and pack levels from a file entry path
    ///
    /// Never fails. Parents follow `dirname` rules: a bare relative name has parent
    /// `.` and the root is its own parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use torrent_sync::classifier::PackPath;
    ///
    /// let pack = PackPath::classify(Path::new("/lib/Show/S01.Pack/Episode.1/file.mkv"));
    /// assert_eq!(pack.release_name, "Episode.1");
    /// assert_eq!(pack.pack_name, "S01.Pack");
    /// assert_eq!(pack.pack_parent_path, Path::new("/lib/Show"));
    /// assert!(pack.is_season_pack());
    /// ```
    pub fn classify(entry: &Path) -> Self {
        let release_path = parent_dir(entry);
        let pack_path = parent_dir(&release_path);
        let pack_parent_path = parent_dir(&pack_path);

        Self {
            entry: entry.to_path_buf(),
            release_name: base_name(&release_path),
            pack_name: base_name(&pack_path),
            release_path,
            pack_path,
            pack_parent_path,
        }
    }

    /// Whether the pack directory path contains a season marker like `S01.`
    ///
    /// The whole pack path is searched, not only its last segment. Matching is
    /// case-sensitive.
    #[must_use]
    pub fn is_season_pack(&self) -> bool {
        is_season_pack_path(&self.pack_path)
    }

    /// Dedup key for this pack: the pack directory as a string
    pub fn pack_key(&self) -> String {
        self.pack_path.to_string_lossy().into_owned()
    }
}

/// Season marker test against an arbitrary path string
#[must_use]
pub fn is_season_pack_path(path: &Path) -> bool {
    SEASON_PACK.is_match(&path.to_string_lossy())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        // Root (or empty) path
        None if path.as_os_str().is_empty() => PathBuf::from("."),
        None => path.to_path_buf(),
    }
}

fn base_name(path: &Path) -> String {
    match path.components().next_back() {
        Some(Component::Normal(name)) => name.to_string_lossy().into_owned(),
        Some(Component::CurDir) => ".".to_string(),
        Some(Component::ParentDir) => "..".to_string(),
        Some(Component::RootDir) | Some(Component::Prefix(_)) | None => String::new(),
    }
}
