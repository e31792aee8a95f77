use common::Direction;

/// Host independent key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
    Other,
}

impl InputKey {
    pub fn direction(&self) -> Option<Direction> {
        match self {
            InputKey::ArrowUp => Some(Direction::Up),
            InputKey::ArrowDown => Some(Direction::Down),
            InputKey::ArrowLeft => Some(Direction::Left),
            InputKey::ArrowRight => Some(Direction::Right),
            InputKey::Char(_) | InputKey::Other => None,
        }
    }
}
