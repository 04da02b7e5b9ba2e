//! Domain layer - Core entities
//!
//! Transient, API-shaped types: tweets, media, and the aggregated
//! context block the analyzer consumes.

pub mod entities;
