use crate::classify::is_text_file;
use crate::config::BundleOptions;
use crate::rules::RuleResolver;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

const HIDDEN_MARKER: char = '.';

/// Walks the given root paths and returns the text files to bundle, as
/// resolved absolute paths, deduplicated in first-seen order.
///
/// Discovery is resilient by design: missing or unreadable entries are
/// logged and skipped, never fatal. The ignore-rule cache and the result
/// list live only for the duration of this call.
pub fn collect_files(roots: &[PathBuf], options: &BundleOptions) -> Vec<PathBuf> {
    log::debug!("Collecting files from {} root path(s)...", roots.len());
    let resolver = RuleResolver::new(options);

    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for root in roots {
        let resolved = match fs::canonicalize(root) {
            Ok(path) => path,
            Err(err) => {
                log::debug!("Skipping root {}: {}", root.display(), err);
                continue;
            }
        };
        for path in visit(&resolved, options, &resolver) {
            if seen.insert(path.clone()) {
                ordered.push(path);
            }
        }
    }
    log::debug!("Collection complete: {} file(s).", ordered.len());
    ordered
}

fn visit(path: &Path, options: &BundleOptions, resolver: &RuleResolver) -> Vec<PathBuf> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => {
            log::debug!("Skipping {}: {}", path.display(), err);
            return Vec::new();
        }
    };

    // Hidden entries are pruned before any ignore or content check runs,
    // cutting whole subtrees for hidden directories.
    if !options.include_hidden && is_hidden(path) {
        log::trace!("Skipping hidden entry: {}", path.display());
        return Vec::new();
    }

    // Rule resolution is skipped outright only when on-disk rules are
    // bypassed and no extra patterns exist.
    if !(options.ignore_git && options.ignores.is_empty()) {
        let target_dir = if metadata.is_dir() {
            path
        } else {
            path.parent().unwrap_or(path)
        };
        if let Some(rules) = resolver.resolve(target_dir) {
            if rules.is_ignored(path, metadata.is_dir()) {
                log::trace!("Skipping ignored entry: {}", path.display());
                return Vec::new();
            }
        }
    }

    if metadata.is_dir() {
        // A directory symlink can alias a sibling or an ancestor, producing
        // duplicate resolved paths or a traversal cycle. Roots are already
        // canonicalized, so this only triggers during descent.
        if is_symlink(path) {
            log::trace!("Skipping symlinked directory: {}", path.display());
            return Vec::new();
        }
        let mut children: Vec<PathBuf> = match fs::read_dir(path) {
            Ok(entries) => entries
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry.path()),
                    Err(err) => {
                        log::debug!("Skipping unreadable entry in {}: {}", path.display(), err);
                        None
                    }
                })
                .collect(),
            Err(err) => {
                log::debug!("Cannot list {}: {}", path.display(), err);
                return Vec::new();
            }
        };
        // Sorted for stable output across runs; siblings fan out in parallel.
        children.sort();
        children
            .par_iter()
            .flat_map(|child| visit(child, options, resolver))
            .collect()
    } else if metadata.is_file() {
        if !is_text_file(path) {
            log::trace!("Skipping non-text file: {}", path.display());
            return Vec::new();
        }
        // Resolve symlinked files so the dedup pass keys on the real path.
        match fs::canonicalize(path) {
            Ok(resolved) => vec![resolved],
            Err(err) => {
                log::debug!("Skipping {}: {}", path.display(), err);
                Vec::new()
            }
        }
    } else {
        Vec::new()
    }
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(HIDDEN_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::IGNORE_FILENAME;
    use tempfile::TempDir;

    // tempfile's default directory names are dot-prefixed, which the hidden
    // check would prune at the root; fixtures need a visible name.
    fn scratch() -> TempDir {
        tempfile::Builder::new()
            .prefix("mdbundle-")
            .tempdir()
            .unwrap()
    }

    fn root(dir: &TempDir) -> PathBuf {
        fs::canonicalize(dir.path()).unwrap()
    }

    #[test]
    fn empty_directory_yields_nothing() {
        let dir = scratch();
        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert!(files.is_empty());
    }

    #[test]
    fn finds_text_files_in_directory() {
        let dir = scratch();
        fs::write(dir.path().join("file1.txt"), "content").unwrap();
        fs::write(dir.path().join("file2.md"), "content").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(files.len(), 2);
        assert!(files.contains(&root(&dir).join("file1.txt")));
        assert!(files.contains(&root(&dir).join("file2.md")));
    }

    #[test]
    fn excludes_binary_files() {
        let dir = scratch();
        fs::write(dir.path().join("file.txt"), "content").unwrap();
        fs::write(dir.path().join("image.png"), [0xFF, 0xD8, 0xFF]).unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(files, vec![root(&dir).join("file.txt")]);
    }

    #[test]
    fn hidden_root_is_pruned_unless_enabled() {
        let dir = scratch();
        let hidden_root = dir.path().join(".work");
        fs::create_dir(&hidden_root).unwrap();
        fs::write(hidden_root.join("file.txt"), "content").unwrap();

        // The hidden check applies to the root entry itself.
        let files = collect_files(&[hidden_root.clone()], &BundleOptions::default());
        assert!(files.is_empty());

        let options = BundleOptions {
            include_hidden: true,
            ..BundleOptions::default()
        };
        let files = collect_files(&[hidden_root], &options);
        assert_eq!(files, vec![root(&dir).join(".work/file.txt")]);
    }

    #[test]
    fn hidden_entries_are_excluded_by_default() {
        let dir = scratch();
        fs::write(dir.path().join("normal.txt"), "content").unwrap();
        fs::write(dir.path().join(".hidden.txt"), "content").unwrap();
        let hidden_dir = dir.path().join(".cache");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("nested.txt"), "content").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(files, vec![root(&dir).join("normal.txt")]);

        let options = BundleOptions {
            include_hidden: true,
            ..BundleOptions::default()
        };
        let files = collect_files(&[dir.path().to_path_buf()], &options);
        assert_eq!(files.len(), 3);
        assert!(files.contains(&root(&dir).join(".hidden.txt")));
        assert!(files.contains(&root(&dir).join(".cache/nested.txt")));
    }

    #[test]
    fn descends_into_nested_directories() {
        let dir = scratch();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("file1.txt"), "content").unwrap();
        fs::write(nested.join("file2.txt"), "content").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(files.len(), 2);
        assert!(files.contains(&root(&dir).join("nested/file2.txt")));
    }

    #[test]
    fn respects_gitignore_unless_bypassed() {
        let dir = scratch();
        fs::write(dir.path().join(IGNORE_FILENAME), "ignored.txt").unwrap();
        fs::write(dir.path().join("ignored.txt"), "content").unwrap();
        fs::write(dir.path().join("normal.txt"), "content").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(files, vec![root(&dir).join("normal.txt")]);

        let options = BundleOptions {
            ignore_git: true,
            ..BundleOptions::default()
        };
        let files = collect_files(&[dir.path().to_path_buf()], &options);
        assert_eq!(files.len(), 2);
        assert!(files.contains(&root(&dir).join("ignored.txt")));
    }

    #[test]
    fn ignored_directories_are_pruned() {
        let dir = scratch();
        let modules = dir.path().join("node_modules");
        fs::create_dir(&modules).unwrap();
        fs::write(modules.join("file1.txt"), "content").unwrap();
        fs::write(dir.path().join("file2.txt"), "content").unwrap();
        fs::write(dir.path().join(IGNORE_FILENAME), "node_modules").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(files, vec![root(&dir).join("file2.txt")]);
    }

    #[test]
    fn deduplicates_overlapping_roots() {
        let dir = scratch();
        let file = dir.path().join("file.txt");
        fs::write(&file, "content").unwrap();

        let roots = vec![dir.path().to_path_buf(), dir.path().to_path_buf(), file];
        let files = collect_files(&roots, &BundleOptions::default());
        assert_eq!(files, vec![root(&dir).join("file.txt")]);
    }

    #[test]
    fn nested_roots_deduplicate_too() {
        let dir = scratch();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("inner.txt"), "content").unwrap();
        fs::write(dir.path().join("outer.txt"), "content").unwrap();

        let roots = vec![dir.path().to_path_buf(), nested];
        let files = collect_files(&roots, &BundleOptions::default());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn missing_roots_are_skipped() {
        let dir = scratch();
        let existing = dir.path().join("file.txt");
        fs::write(&existing, "content").unwrap();

        let roots = vec![dir.path().join("non-existent"), existing];
        let files = collect_files(&roots, &BundleOptions::default());
        assert_eq!(files, vec![root(&dir).join("file.txt")]);
    }

    #[test]
    fn custom_ignores_apply_without_ignore_file() {
        let dir = scratch();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("normal.txt"), "content").unwrap();
        fs::write(dir.path().join("ignored.txt"), "content").unwrap();
        fs::write(dir.path().join("test.log"), "content").unwrap();
        fs::write(nested.join("ignored-nested.txt"), "content").unwrap();

        let options = BundleOptions {
            ignore_git: true,
            ignores: vec!["ignored*.txt".to_string(), "*.log".to_string()],
            ..BundleOptions::default()
        };
        let files = collect_files(&[dir.path().to_path_buf()], &options);
        assert_eq!(files, vec![root(&dir).join("normal.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_resolves_to_one_entry() {
        let dir = scratch();
        let file = dir.path().join("real.txt");
        fs::write(&file, "content").unwrap();
        std::os::unix::fs::symlink(&file, dir.path().join("alias.txt")).unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(files, vec![root(&dir).join("real.txt")]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_descended() {
        let dir = scratch();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("file.txt"), "content").unwrap();
        std::os::unix::fs::symlink(&sub, dir.path().join("twin")).unwrap();
        // A cycle back to the root must not hang the walk either.
        std::os::unix::fs::symlink(dir.path(), sub.join("loop")).unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(files, vec![root(&dir).join("sub/file.txt")]);
    }

    #[test]
    fn results_are_stable_for_identical_input() {
        let dir = scratch();
        for name in ["b.txt", "a.txt", "c.txt"] {
            fs::write(dir.path().join(name), "content").unwrap();
        }
        let first = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        let second = collect_files(&[dir.path().to_path_buf()], &BundleOptions::default());
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                root(&dir).join("a.txt"),
                root(&dir).join("b.txt"),
                root(&dir).join("c.txt"),
            ]
        );
    }
}
