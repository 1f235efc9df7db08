// Domain layer modules
pub mod age_policy;
pub mod ingest_event;
pub mod ingest_response;

// Re-exports
pub use age_policy::{AgeDecision, AgePolicy, AgePolicyError};
pub use ingest_event::{EventId, IngestEvent, ValidationError};
pub use ingest_response::IngestResponse;
