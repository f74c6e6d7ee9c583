//! Unit tests for the validation rules.
