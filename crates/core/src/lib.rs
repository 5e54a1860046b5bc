//! Core business logic for the MFO back office.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `schedule` - Payment schedule generation for credits and deposits
//! - `reports` - Schedule projection with CSV and PDF rendering
//! - `workflow` - One-way transaction approval gate and schedule re-statusing
//! - `status` - Well-known names of ledger status rows
//! - `auth` - Capabilities and password hashing

pub mod auth;
pub mod reports;
pub mod schedule;
pub mod status;
pub mod workflow;
