pub mod ingestion;
pub mod processing;
