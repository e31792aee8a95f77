mod connection;
mod error;
mod framebuffer;
mod game;
mod input;
mod render;
mod session;
mod snake;

pub use connection::*;
pub use error::*;
pub use framebuffer::*;
pub use game::*;
pub use input::*;
pub use render::*;
pub use session::*;
pub use snake::*;
