//! Unit tests for the cycle lifecycle module.
