//! Chronos timeline extraction.
//!
//! Scans free-form prose for four-digit year tokens inside a bounded range
//! and produces a deduplicated, chronologically sorted list of
//! `{year, description}` events. Three source shapes feed the same
//! scanner → context → reducer pipeline: plain text, structured textbook
//! chapters, and HTML-like article markup.

pub mod article;
pub mod chapters;
pub mod context;
pub mod error;
pub mod reduce;
pub mod scanner;
pub mod timeline;

pub use article::ArticleScanner;
pub use chapters::{Chapter, ChapterSet, extract_from_chapters};
pub use error::{ExtractError, Result};
pub use timeline::extract_timeline;

pub use chronos_types::{TimelineEvent, YearRange};
