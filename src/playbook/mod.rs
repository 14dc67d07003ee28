//! Playbook run model and the two ingestion paths that produce it.

pub mod model;
pub mod parse;
pub mod record;

pub use model::Playbook;
pub use parse::parse_text;
pub use record::{from_record, parse_any};
