//! Domain model for users and the tasks they own.
//!
//! # Responsibility
//! - Define the records exchanged between API, services and storage.
//! - Own the field constraints (required-ness, lengths) for those records.
//!
//! # Invariants
//! - Identifiers are assigned by storage, never by clients.
//! - A task always carries the identifier of its owning user.
//! - Passwords are write-only: never serialized outward.

pub mod task;
pub mod user;
pub mod validation;
