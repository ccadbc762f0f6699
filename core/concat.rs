use crate::config::BundleOptions;
use crate::error::{AppError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Fence tag used when a file extension has no table entry.
pub const FALLBACK_LANGUAGE: &str = "plaintext";

static LANG_BY_EXT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("txt", "text"),
        ("md", "markdown"),
        ("py", "python"),
        ("h", "cpp"),
        ("hpp", "cpp"),
        ("ts", "typescript"),
        ("tsx", "typescript"),
        ("c", "c"),
        ("cpp", "cpp"),
        ("cs", "csharp"),
        ("java", "java"),
        ("html", "html"),
        ("css", "css"),
        ("js", "javascript"),
        ("jsx", "javascript"),
        ("json", "json"),
        ("rs", "rust"),
        ("toml", "toml"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("xml", "xml"),
        ("sh", "shellscript"),
        ("go", "go"),
    ])
});

/// Maps a file extension (no leading dot, any case) to a fence language tag.
pub fn language_for_extension(extension: &str) -> &'static str {
    LANG_BY_EXT
        .get(extension.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(FALLBACK_LANGUAGE)
}

fn language_for_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(language_for_extension)
        .unwrap_or(FALLBACK_LANGUAGE)
}

/// Concatenates `files`, in the order given, into one Markdown document at
/// `output_path`. Each file becomes a `## <title>` section wrapping its raw
/// content in a language-tagged code fence.
///
/// Unlike discovery, writing is all-or-nothing: any read or write fault
/// aborts the whole call. A partial output file may be left on disk in that
/// case; no rollback is attempted.
pub fn concatenate(
    files: &[PathBuf],
    output_path: &Path,
    roots: &[PathBuf],
    options: &BundleOptions,
) -> Result<()> {
    log::debug!(
        "Concatenating {} file(s) into {}",
        files.len(),
        output_path.display()
    );
    let write_err = |source: std::io::Error| AppError::FileWrite {
        path: output_path.to_path_buf(),
        source,
    };

    let output = fs::File::create(output_path).map_err(write_err)?;
    let mut writer = BufWriter::new(output);

    if !options.prefix.is_empty() {
        write!(writer, "{}\n\n", options.prefix.join("\n")).map_err(write_err)?;
    }

    let base_override = options
        .output_base_dir
        .as_deref()
        .and_then(|dir| fs::canonicalize(dir).ok());
    let root_dirs: Vec<PathBuf> = roots
        .iter()
        .filter_map(|dir| fs::canonicalize(dir).ok())
        .collect();
    for path in files {
        let title = display_title(path, base_override.as_deref(), &root_dirs);
        let language = language_for_path(path);
        let content = fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.clone(),
            source: e,
        })?;
        log::trace!("Writing section: {}", title);
        write!(writer, "## {}\n\n``` {}\n{}\n```\n\n", title, language, content)
            .map_err(write_err)?;
    }

    writer.flush().map_err(write_err)?;
    log::debug!("Concatenation complete.");
    Ok(())
}

/// The override base directory wins outright for any file under it; files
/// outside it (or when no override is set) title relative to the deepest
/// containing input root, forward-slashed. Anything else titles as its bare
/// file name.
fn display_title(path: &Path, base_override: Option<&Path>, roots: &[PathBuf]) -> String {
    let base = base_override
        .filter(|dir| path != *dir && path.starts_with(dir))
        .or_else(|| {
            roots
                .iter()
                .filter(|dir| path != dir.as_path() && path.starts_with(dir))
                .max_by_key(|dir| dir.components().count())
                .map(PathBuf::as_path)
        });

    if let Some(base) = base {
        if let Some(relative) = pathdiff::diff_paths(path, base) {
            let title = forward_slashed(&relative);
            if !title.is_empty() {
                return title;
            }
        }
    }
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn forward_slashed(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
