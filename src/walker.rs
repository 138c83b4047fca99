//! Lazy filesystem walk driven by a glob expression
//!
//! Paths are produced one at a time as the glob expands, so arbitrarily large
//! libraries never sit in memory as a list. Only regular files are yielded.
//! `*` stops at path separators and `**` crosses any number of directories.
//! Neither wildcard matches a hidden name (one starting with `.`); a hidden file or
//! directory is only yielded when a pattern segment that itself starts with a dot
//! (such as `.*.mkv`) matches it. Hidden directories inside the pattern's literal
//! prefix are walked normally.

use crate::error::Result;
use glob::{MatchOptions, Paths, Pattern};
use std::path::{Component, Path, PathBuf};

/// Glob options used for every walk
///
/// Leading dots are matched freely by the glob itself; [`GlobEntries`] applies the
/// hidden-name rule per path segment afterwards.
pub const WALK_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Forward-only iterator over the files matched by a glob expression
pub struct GlobEntries {
    paths: Paths,

    /// Leading pattern segments without wildcards
    base: PathBuf,

    /// Pattern segments after `base` that start with a literal dot
    dot_segments: Vec<Pattern>,
}

impl GlobEntries {
    /// Start walking `pattern`
    ///
    /// # Errors
    /// Returns [`Error::Glob`](crate::error::Error::Glob) if the pattern is malformed.
    pub fn new(pattern: &str) -> Result<Self> {
        let paths = glob::glob_with(pattern, WALK_OPTIONS)?;

        let mut base = PathBuf::new();
        let mut dot_segments = Vec::new();
        let mut in_base = true;
        for component in Path::new(pattern).components() {
            let segment = component.as_os_str().to_string_lossy();
            if in_base && !has_wildcard(&segment) {
                base.push(component);
                continue;
            }
            in_base = false;
            if matches!(component, Component::Normal(_)) && segment.starts_with('.') {
                dot_segments.push(Pattern::new(&segment)?);
            }
        }

        Ok(Self {
            paths,
            base,
            dot_segments,
        })
    }

    /// Whether every hidden segment below the literal prefix was asked for by name
    fn admits(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.base).unwrap_or(path);
        relative.components().all(|component| match component {
            Component::Normal(name) => {
                let name = name.to_string_lossy();
                !name.starts_with('.')
                    || self
                        .dot_segments
                        .iter()
                        .any(|segment| segment.matches_with(&name, WALK_OPTIONS))
            }
            _ => true,
        })
    }
}

fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '['])
}

impl Iterator for GlobEntries {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.paths.next()? {
                Ok(path) if self.admits(&path) && path.is_file() => return Some(Ok(path)),
                Ok(_) => continue,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}
