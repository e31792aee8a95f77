use client::{FrameBuffer, Renderer, Rgb};
use common::VIEWPORT;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use terminal::view::{board_area, FrameBufferWidget, BOARD_COLUMNS, BOARD_ROWS};

#[test]
fn board_is_eighty_by_thirty_cells() {
    assert_eq!((BOARD_COLUMNS, BOARD_ROWS), (80, 30));

    let area = board_area(Rect::new(0, 0, 100, 40));
    assert_eq!(area, Rect::new(10, 5, 80, 30));

    let small = board_area(Rect::new(2, 2, 40, 10));
    assert_eq!(small, Rect::new(2, 2, 40, 10));
}

#[test]
fn each_grid_cell_becomes_one_half_block() {
    let mut renderer = Renderer::new(FrameBuffer::new(VIEWPORT));
    renderer.draw_point(1, 1, Rgb::RED);
    renderer.draw_point(5, 4, Rgb::BLUE);

    let area = Rect::new(0, 0, BOARD_COLUMNS, BOARD_ROWS);
    let mut buf = Buffer::empty(area);
    FrameBufferWidget::new(renderer.surface()).render(area, &mut buf);

    // grid (1,1) is the lower half of terminal row 0
    let cell = buf.cell((1, 0)).unwrap();
    assert_eq!(cell.symbol(), "▀");
    assert_eq!(cell.fg, Color::Rgb(0, 0, 0));
    assert_eq!(cell.bg, Color::Rgb(255, 0, 0));

    // grid (5,4) is the upper half of terminal row 2
    let cell = buf.cell((5, 2)).unwrap();
    assert_eq!(cell.fg, Color::Rgb(0, 0, 255));
    assert_eq!(cell.bg, Color::Rgb(0, 0, 0));

    let cell = buf.cell((0, 0)).unwrap();
    assert_eq!(cell.fg, Color::Rgb(0, 0, 0));
    assert_eq!(cell.bg, Color::Rgb(0, 0, 0));
}
