//! Core library for roozshomar
//!
//! This crate implements the **Functional Core** of the roozshomar bot,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! - **`roozshomar_core`** (this crate): deterministic logic, meaning the
//!   Persian numeral rendering, the campaign schedule arithmetic, and the
//!   plain-text state store.
//! - **`roozshomar`**: the CLI binary that talks to the platform API, reads
//!   the process environment, and orchestrates the daily posting run.
//!
//! Everything here is testable with fixture data and a temp directory: same
//! input, same output, no network, no ambient configuration.
//!
//! # Module Organization
//!
//! - [`persian`]: number to Persian-word conversion
//! - [`campaign`]: schedule window, tweet text composition, anchor matching
//! - [`state`]: counter and rate-limit cooldown persistence

pub mod campaign;
pub mod persian;
pub mod state;
