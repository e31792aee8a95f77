#![allow(dead_code)]

use client::{
    Connection, ConnectionError, Connector, Game, PixelRect, Renderer, Rgb, SessionLink, Surface,
    Transport,
};
use std::cell::RefCell;
use std::rc::Rc;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub rect: PixelRect,
    pub fill: Rgb,
    pub outline: Rgb,
}

/// Surface that remembers what was painted since the last clear.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub clears: usize,
    pub paints: Vec<Paint>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.paints.clear();
    }

    fn fill_rect(&mut self, rect: PixelRect, fill: Rgb, outline: Rgb) {
        self.paints.push(Paint { rect, fill, outline });
    }
}

#[derive(Debug, Default)]
pub struct Wire {
    pub opened: Vec<u64>,
    pub closed: Vec<u64>,
    pub sent: Vec<String>,
    pub refuse_open: bool,
    pub fail_writes: bool,
}

/// Connector whose transports log everything onto a shared [`Wire`].
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    pub wire: Rc<RefCell<Wire>>,
}

impl FakeConnector {
    pub fn sent(&self) -> Vec<String> {
        self.wire.borrow().sent.clone()
    }
}

pub struct FakeTransport {
    generation: u64,
    wire: Rc<RefCell<Wire>>,
}

impl Transport for FakeTransport {
    fn send_text(&mut self, frame: &str) -> Result<(), ConnectionError> {
        let mut wire = self.wire.borrow_mut();
        if wire.fail_writes {
            return Err(ConnectionError::Transport("broken pipe".to_string()));
        }
        wire.sent.push(frame.to_string());
        Ok(())
    }

    fn close(&mut self) {
        self.wire.borrow_mut().closed.push(self.generation);
    }
}

impl Connector for FakeConnector {
    type Transport = FakeTransport;

    fn open(&mut self, endpoint: &Url, generation: u64) -> Result<FakeTransport, ConnectionError> {
        let mut wire = self.wire.borrow_mut();
        if wire.refuse_open {
            return Err(ConnectionError::Open {
                endpoint: endpoint.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        wire.opened.push(generation);
        Ok(FakeTransport {
            generation,
            wire: self.wire.clone(),
        })
    }
}

pub fn endpoint() -> Url {
    Url::parse("ws://localhost:8080/ws/").unwrap()
}

pub fn connection(connector: &FakeConnector) -> Connection<FakeConnector> {
    Connection::new(connector.clone(), endpoint())
}

pub fn game_at(page: &str) -> (Game<RecordingSurface, FakeConnector>, FakeConnector) {
    let connector = FakeConnector::default();
    let session = SessionLink::from_page_url(Url::parse(page).unwrap());
    let game = Game::new(
        Renderer::new(RecordingSurface::default()),
        connection(&connector),
        session,
    );
    (game, connector)
}

pub fn game() -> (Game<RecordingSurface, FakeConnector>, FakeConnector) {
    game_at("http://localhost:8080/")
}

/// Grid cells painted since the last clear, with their colour, assuming
/// the default 8x8 pixel cells.
pub fn painted_cells(game: &Game<RecordingSurface, FakeConnector>) -> Vec<(i32, i32, Rgb)> {
    let mut cells: Vec<(i32, i32, Rgb)> = game
        .renderer()
        .surface()
        .paints
        .iter()
        .map(|paint| ((paint.rect.x / 8.0) as i32, (paint.rect.y / 8.0) as i32, paint.fill))
        .collect();
    cells.sort_by_key(|&(x, y, color)| (x, y, color.0, color.1, color.2));
    cells
}
