//! Config composition: defaults, source order, deserialization.

pub mod merge_policy;
pub mod service;
