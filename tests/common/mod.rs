//! Common test utilities for impactkit.

pub mod assertions;
pub mod stations;
