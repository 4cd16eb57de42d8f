//! Question catalog - static, validated question data for the three blocks.
//!
//! The built-in catalog is compiled into the binary as YAML and parsed once
//! per process. Integrity failures (unknown follow-ups, duplicate ids,
//! unknown potentials...) are fatal at load time.

mod block_catalog;
mod errors;
mod loader;
mod question;

pub use block_catalog::BlockCatalog;
pub use errors::CatalogError;
pub use loader::{Catalog, CATALOG_FILES};
pub use question::{
    AnswerOption, Deltas, Group, PresentedOption, PresentedQuestion, Question, Section,
    SelectionMode,
};
