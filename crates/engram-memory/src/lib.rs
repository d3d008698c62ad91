//! Memory substrate for the engram personal assistant.
//!
//! Provides a unified memory API over four memory kinds:
//! - **Semantic** (remote table): durable, categorized key/value facts
//! - **Episodic** (remote table): timestamped interaction log
//! - **Procedural** (remote table): recorded habits with frequency/context
//! - **Working** (process-local): ephemeral per-session scratch space
//!
//! The three durable kinds persist through a `TableStore` — in production the
//! `RecordStore` HTTP client, in tests an in-memory stand-in. Callers
//! interact with a single `MemorySubstrate` facade.

pub mod config;
pub mod episodic;
pub mod procedural;
pub mod record_store;
pub mod semantic;
pub mod working;

mod rows;
mod substrate;
pub use substrate::MemorySubstrate;

pub use record_store::RecordStore;
pub use working::WorkingMemory;
