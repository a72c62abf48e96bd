//! Ball module - widget state, pointer handling, and the release fall

mod components;
mod interaction;
mod physics;

pub use components::*;
pub use interaction::*;
pub use physics::*;
