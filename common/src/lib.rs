mod command;
mod constants;
mod direction;
mod game_state;
mod geometry;

pub use command::*;
pub use constants::*;
pub use direction::*;
pub use game_state::*;
pub use geometry::*;
