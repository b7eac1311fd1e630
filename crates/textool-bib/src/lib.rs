pub mod dedup;
pub mod model;
pub mod read;
pub mod write;

// Re-export for convenience
pub use dedup::{DedupError, DedupResult, RemovalReason, RemovedEntry, deduplicate};
pub use model::BibEntry;
pub use read::{BibError, read_bib_file, read_bib_folder, read_bib_str};
pub use write::{render_bib, write_bib_file};
