//! Shared types for the engram memory substrate.
//!
//! Defines the wire-contract record types for the four memory kinds, the
//! `TableStore` trait that abstracts the remote table backend, equality
//! filters, configuration, and the error taxonomy.

pub mod config;
pub mod error;
pub mod record;
pub mod store;

pub use config::MemoryConfig;
pub use error::{EngramError, EngramResult};
pub use record::{EpisodicEntry, FactCategory, ProceduralHabit, SemanticFact};
pub use store::{Filter, TableStore};
