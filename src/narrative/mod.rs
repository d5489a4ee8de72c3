//! The remote narrative collaborator: guardian dialogue and enemy flavour.
//!
//! Nothing here is required for play. Every call has a local fallback in
//! [`crate::phases::encounter`].

#![allow(unused_imports)]

pub mod client;
pub mod types;

pub use client::*;
pub use types::*;
