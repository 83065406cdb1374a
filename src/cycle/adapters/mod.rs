//! Adapter implementations for cycle lifecycle ports.

pub mod memory;
