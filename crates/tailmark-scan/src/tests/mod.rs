//! Test suites for the extraction pipeline.

mod behaviour;
mod support;
