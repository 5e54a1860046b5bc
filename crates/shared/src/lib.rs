//! Shared types, errors, and configuration for the MFO back office.
//!
//! This crate provides common types used across all other crates:
//! - Money rounding and formatting with decimal precision
//! - Typed IDs for type-safe entity references
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management
//! - JWT claims and token service for staff authentication

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, LoginRequest, LoginResponse, ManagerInfo};
pub use config::{AppConfig, ReportConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
