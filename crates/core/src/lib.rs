//! Bizdesk domain core.
//!
//! Holds the typed records of the business data model, the soft-delete
//! lifecycle rules that govern them, and the store contract the lifecycle
//! engine runs against. Nothing in this crate talks to a database or an
//! HTTP client; persistence lives in `bizdesk-db`.

pub mod error;
pub mod lifecycle;
pub mod numbering;
pub mod types;
