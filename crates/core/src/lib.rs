//! Ward duty-roster domain core.
//!
//! This crate has zero internal deps so the database layer, the HTTP API and
//! any future tooling share one definition of the roster rules:
//!
//! - [`roles`] -- login roles, duty roles and the capability table.
//! - [`shifts`] / [`calendar`] -- the fixed shift list, date keys, weekly
//!   windows and holiday marking.
//! - [`visibility`] -- role-scoped filtering of staff and cells.
//! - [`workflow`] -- the change-request state machine.
//! - [`repository`] -- the store traits the engine depends on, with an
//!   in-process implementation in [`memory`].
//! - [`roster`] -- [`roster::RosterService`], the engine itself.

pub mod calendar;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod roles;
pub mod roster;
pub mod shifts;
pub mod stats;
pub mod types;
pub mod visibility;
pub mod workflow;
