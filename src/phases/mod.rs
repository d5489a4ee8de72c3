//! Phase catalogue and encounter construction.

#![allow(unused_imports)]

pub mod data;
pub mod encounter;

pub use data::*;
pub use encounter::*;
