//! Core business logic for Costwise.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `budget` - Budget-vs-actual aggregation per cost center
//! - `invoice` - Invoice line-item totals and validation
//! - `fiscal` - Fiscal year windows
//! - `auth` - Password hashing

pub mod auth;
pub mod budget;
pub mod fiscal;
pub mod invoice;
