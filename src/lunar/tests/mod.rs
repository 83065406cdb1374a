//! Unit tests for the lunar calendar module.
