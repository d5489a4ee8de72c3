//! Session state, notifications and the controller that ties them together.

#![allow(unused_imports)]

pub mod constants;
pub mod events;
pub mod game_state;
pub mod session;

pub use constants::*;
pub use events::*;
pub use game_state::*;
pub use session::*;
