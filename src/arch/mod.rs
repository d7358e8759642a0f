//! architecture specific bits

pub mod i586;

pub use i586::*;
