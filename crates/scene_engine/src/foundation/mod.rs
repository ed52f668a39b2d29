//! Foundation utilities shared across the editing core

pub mod math;
