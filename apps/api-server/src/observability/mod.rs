//! Observability plumbing.

pub mod trace;
