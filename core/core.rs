pub mod classify;
pub mod concat;
pub mod config;
pub mod error;
pub mod gather;
pub mod punctuation;
pub mod rules;
pub mod table;

pub use classify::is_text_file;
pub use concat::{concatenate, language_for_extension};
pub use config::{BundleConfig, BundleOptions, CONFIG_TYPE_TAG, DEFAULT_CONFIG_FILENAME};
pub use error::{AppError, Result};
pub use gather::collect_files;
pub use punctuation::{to_chinese, to_english};
pub use rules::{IGNORE_FILENAME, RuleResolver, RuleSet};
pub use table::generate_markdown_table;
