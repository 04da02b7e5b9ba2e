//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Agents: one wrapper per external AI capability
//! - Tools: function-calling registry for the analyzer
//! - Services: pipeline orchestration and report writing
//! - Errors: application-specific errors

pub mod agents;
pub mod errors;
pub mod services;
pub mod tools;
