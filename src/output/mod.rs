//! Output module
//!
//! Persists the collected tags as a CSV table, one row per tag, with the
//! columns `has_synonyms,is_moderator_only,is_required,count,name`.

mod schema;
mod writer;

pub use schema::{tag_schema, tags_to_batch, TAG_COLUMNS};
pub use writer::{write_tags_csv, CsvWriter};
