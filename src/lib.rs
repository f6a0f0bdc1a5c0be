//! # Ball Field Side
//!
//! Trains a small dense classifier that tells which half of the field the ball
//! is on, from synthetic ball and player positions, using the Burn ML
//! framework. The trained model can then classify live field snapshots.
//!
//! ## Modules
//!
//! - [`data`] — Synthetic sample generation, labelling and the fixed split
//! - [`model`] — The two-layer network, its loss and the backends
//! - [`training`] — RMSprop training loop, evaluation and metrics
//! - [`persist`] — Model weights plus architecture metadata on disk
//! - [`detect`] — Per-match ball side detection on field snapshots
//! - [`pipeline`] — The end-to-end training run
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

#![recursion_limit = "256"]

pub mod config;
pub mod data;
pub mod detect;
pub mod error;
pub mod logging;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod training;
