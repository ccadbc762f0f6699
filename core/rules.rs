use crate::config::BundleOptions;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const IGNORE_FILENAME: &str = ".gitignore";

/// A compiled ignore ruleset anchored at a base directory. Candidate paths
/// are matched relative to that base with standard gitignore precedence
/// (later patterns and negations override earlier ones).
#[derive(Debug)]
pub struct RuleSet {
    matcher: Gitignore,
}

impl RuleSet {
    pub fn base_dir(&self) -> &Path {
        self.matcher.path()
    }

    /// The base directory itself is never considered ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if path == self.base_dir() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(path, is_dir)
            .is_ignore()
    }
}

/// Nearest-ancestor ignore-rule lookup, memoized per directory for the
/// lifetime of one collection call.
///
/// The ruleset for a directory comes from the closest ignore file found while
/// climbing toward the filesystem root; shallower ignore files are not merged
/// in. The caller-supplied extra patterns are layered into whichever ruleset
/// wins, and at the root a ruleset is synthesized from the extras alone when
/// no ignore file exists anywhere on the chain.
pub struct RuleResolver {
    extra_patterns: Vec<String>,
    skip_on_disk: bool,
    cache: Mutex<HashMap<PathBuf, Arc<OnceCell<Option<Arc<RuleSet>>>>>>,
}

impl RuleResolver {
    pub fn new(options: &BundleOptions) -> Self {
        RuleResolver {
            extra_patterns: options.ignores.clone(),
            skip_on_disk: options.ignore_git,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves the ruleset governing `directory`. O(1) after the first
    /// lookup for a given directory; concurrent lookups for the same key
    /// compute at most once.
    pub fn resolve(&self, directory: &Path) -> Option<Arc<RuleSet>> {
        let cell = {
            let mut cache = self.cache.lock().expect("rule cache poisoned");
            Arc::clone(cache.entry(directory.to_path_buf()).or_default())
        };
        cell.get_or_init(|| self.lookup(directory)).clone()
    }

    fn lookup(&self, directory: &Path) -> Option<Arc<RuleSet>> {
        let ignore_file = directory.join(IGNORE_FILENAME);
        if ignore_file.is_file() {
            log::trace!("Found ignore file: {}", ignore_file.display());
            return Some(Arc::new(self.build(directory, Some(&ignore_file))));
        }
        match directory.parent() {
            Some(parent) => self.resolve(parent),
            None => {
                if self.extra_patterns.is_empty() {
                    None
                } else {
                    // No ignore file anywhere on the chain: anchor the extra
                    // patterns at the filesystem root.
                    Some(Arc::new(self.build(directory, None)))
                }
            }
        }
    }

    fn build(&self, base: &Path, ignore_file: Option<&Path>) -> RuleSet {
        let mut builder = GitignoreBuilder::new(base);
        if !self.skip_on_disk {
            if let Some(file) = ignore_file {
                if let Some(err) = builder.add(file) {
                    log::warn!("Problem reading {}: {}", file.display(), err);
                }
            }
        }
        for pattern in &self.extra_patterns {
            if let Err(err) = builder.add_line(None, pattern) {
                log::warn!("Skipping invalid ignore pattern '{}': {}", pattern, err);
            }
        }
        let matcher = match builder.build() {
            Ok(matcher) => matcher,
            Err(err) => {
                log::warn!(
                    "Failed to compile ignore rules for {}: {}",
                    base.display(),
                    err
                );
                Gitignore::empty()
            }
        };
        RuleSet { matcher }
    }
}
