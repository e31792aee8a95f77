use client::{ConnectionStatus, Connector, FrameBuffer, Rgb, BACKGROUND_COLOR};
use common::RESOLUTION;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

use crate::app::App;

/// Terminal cells needed to show one pixel sample per grid cell. Every
/// terminal cell holds two vertically stacked samples.
pub const BOARD_COLUMNS: u16 = RESOLUTION.width as u16;
pub const BOARD_ROWS: u16 = (RESOLUTION.height as u16).div_ceil(2);

/// Draws a [`FrameBuffer`] with upper-half blocks, sampling the pixel at the
/// centre of each half cell.
pub struct FrameBufferWidget<'a> {
    fb: &'a FrameBuffer,
}

impl<'a> FrameBufferWidget<'a> {
    pub fn new(fb: &'a FrameBuffer) -> Self {
        Self { fb }
    }
}

impl Widget for FrameBufferWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.fb.width() == 0 || self.fb.height() == 0 {
            return;
        }

        let scale_x = self.fb.width() as f64 / area.width as f64;
        let scale_y = self.fb.height() as f64 / (area.height as f64 * 2.0);

        for row in 0..area.height {
            let top = ((row as f64 * 2.0 + 0.5) * scale_y) as u32;
            let bottom = ((row as f64 * 2.0 + 1.5) * scale_y) as u32;
            for col in 0..area.width {
                let x = ((col as f64 + 0.5) * scale_x) as u32;
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀")
                        .set_fg(to_color(self.fb.pixel(x, top)))
                        .set_bg(to_color(self.fb.pixel(x, bottom)));
                }
            }
        }
    }
}

fn to_color(pixel: Option<Rgb>) -> Color {
    let Rgb(r, g, b) = pixel.unwrap_or(BACKGROUND_COLOR);
    Color::Rgb(r, g, b)
}

/// Largest board rectangle, centred in `area`, that does not upscale.
pub fn board_area(area: Rect) -> Rect {
    let width = area.width.min(BOARD_COLUMNS);
    let height = area.height.min(BOARD_ROWS);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn render<C: Connector>(frame: &mut Frame, app: &App<C>) {
    let [board, status] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(4)]).areas(frame.area());

    let block = Block::default().borders(Borders::ALL).title(" snake ");
    let inner = block.inner(board);
    frame.render_widget(block, board);
    frame.render_widget(
        FrameBufferWidget::new(app.game.renderer().surface()),
        board_area(inner),
    );

    frame.render_widget(Paragraph::new(status_lines(app)), status);
}

pub fn status_lines<C: Connector>(app: &App<C>) -> Vec<Line<'static>> {
    let connection = app.game.connection();
    let (state, color) = match connection.status() {
        ConnectionStatus::Disconnected => ("disconnected", Color::Red),
        ConnectionStatus::Connected if app.open_generation == connection.generation() => {
            ("connected", Color::Green)
        }
        ConnectionStatus::Connected => ("connecting", Color::Yellow),
    };

    let session = app.game.session();
    let session_text = match session.session_id() {
        Some(id) => format!("session {}  {}", id, session.share_url()),
        None => "no session".to_string(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                state,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}  ticks {}", connection.endpoint(), app.game.ticks())),
        ]),
        Line::from(session_text),
        Line::from(Span::styled(
            "arrows steer  c connect  s stop  i reopen connection  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if let Some(err) = &app.last_error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    lines
}
