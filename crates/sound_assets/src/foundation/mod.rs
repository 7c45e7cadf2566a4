//! Foundation module - Core utilities and types
//!
//! This module provides the small building blocks the audio cache sits on:
//! - Typed handles over generational slot map keys
//! - Logging utilities

pub mod collections;
pub mod logging;
