use crate::{GridSize, PixelSize};

/// Logical board size the server simulates on
pub const RESOLUTION: GridSize = GridSize { width: 80, height: 60 };

/// Pixel size of the drawing surface
pub const VIEWPORT: PixelSize = PixelSize { width: 640, height: 480 };

/// Number of player slots rendered by the client
pub const PLAYER_SLOTS: usize = 2;

/// Default base URL of the game server
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Path of the websocket endpoint on the game server
pub const WS_PATH: &str = "/ws/";

/// Query parameter carrying the game session id in shareable links
pub const GAME_ID_PARAM: &str = "gameId";
