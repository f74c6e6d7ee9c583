//! Unit tests for cascading deletion.
