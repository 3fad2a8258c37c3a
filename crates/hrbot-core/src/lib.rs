//! Core types and error definitions for hrbot.
//!
//! This crate provides the foundational types shared across all hrbot crates:
//! the unified error type, the employee record, the static roster loader, and
//! the chat message types exchanged with language-model backends.
//!
//! # Main types
//!
//! - [`HrError`]: Unified error enum for all hrbot subsystems.
//! - [`HrResult`]: Convenience alias for `Result<T, HrError>`.
//! - [`Employee`]: A single read-only employee record.
//! - [`Roster`]: The immutable collection of employees loaded at startup.
//! - [`Role`] / [`Message`]: Chat messages sent to an LLM backend.

/// Employee record type.
pub mod employee;
/// Error types.
pub mod error;
/// Chat message types.
pub mod message;
/// Static roster loading.
pub mod roster;

pub use employee::Employee;
pub use error::{HrError, HrResult};
pub use message::{Message, Role};
pub use roster::Roster;
