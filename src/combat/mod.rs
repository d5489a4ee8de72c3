//! Battle types, resolution formulas and turn sequencing.

#![allow(unused_imports)]

pub mod engine;
pub mod logic;
pub mod types;

pub use engine::*;
pub use logic::*;
pub use types::*;
