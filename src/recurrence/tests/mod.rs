//! Unit tests for recurrence patterns and evaluation.
