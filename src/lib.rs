#![deny(rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. ParseError in parser module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod app;
pub mod classifier;
pub mod domain;
pub mod parser;
pub mod store;

// Re-export main types for easy access
pub use app::{App, Config};
pub use classifier::{Classifier, Verdict};
pub use domain::{NetworkRecord, NetworkStatus, PatrolError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
