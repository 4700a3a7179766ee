//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the scene core:
//! - Arena key types for nodes and behaviors
//! - Logging utilities

pub mod collections;
pub mod logging;
