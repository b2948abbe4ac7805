//! Unit tests for `tailmark_core` types.
