use std::time::Instant;

use rand::seq::SliceRandom;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use sysinfo::SystemExt;

use crate::app::{App, TrackerStatus};
use crate::tracker::Point;

/// Glyphs a living cell may be drawn with; one is picked per cell per frame so
/// the colony wobbles like a set of blobs.
const BLOBS: [char; 4] = ['●', '◉', '◍', '•'];
const HAND_MARKER: char = '◎';
const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

const TITLE: &str =
    "Move your hand in front of the camera (or click) to make cool effects!  [any key: reseed | q: quit]";

fn split(size: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
        .split(size);
    (chunks[0], chunks[1])
}

fn grid_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(TITLE)
}

/// Terminal area the grid is drawn into for a terminal of the given size.
pub fn grid_area(size: Rect) -> Rect {
    grid_block().inner(split(size).0)
}

/// Drawing surface in pixels: each terminal cell covers `resolution` pixels
/// on each axis.
pub fn surface_size(area: Rect, resolution: u32) -> (u32, u32) {
    (
        area.width as u32 * resolution,
        area.height as u32 * resolution,
    )
}

/// Maps a mouse position to the centre of the surface cell under it, or
/// `None` when the pointer is outside the grid area.
pub fn pointer_to_surface(column: u16, row: u16, area: Rect, resolution: u32) -> Option<Point> {
    let inside = column >= area.x
        && row >= area.y
        && column < area.x + area.width
        && row < area.y + area.height;
    if !inside {
        return None;
    }
    let resolution = resolution as f32;
    Some(Point::new(
        (f32::from(column - area.x) + 0.5) * resolution,
        (f32::from(row - area.y) + 0.5) * resolution,
    ))
}

/// Draws the whole frame.
pub fn draw(f: &mut ratatui::Frame, app: &App) {
    let (grid_chunk, stats_chunk) = split(f.size());
    draw_grid(f, app, grid_chunk);
    draw_stats(f, app, stats_chunk);
    if app.tracker_status() == TrackerStatus::Loading {
        draw_loading(f, app, grid_chunk);
    }
}

/// Draws the living cells as blobs, plus the hand marker when a hand is in view.
fn draw_grid(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let sim = app.simulation();
    let grid = sim.grid();
    let blob_style = if sim.motion().is_active() {
        Style::default().fg(Color::LightGreen)
    } else {
        Style::default().fg(Color::White)
    };
    let marker = app.hand_marker().map(|point| app.cell_at(point));

    let mut rng = rand::thread_rng();
    let lines: Vec<Line> = (0..grid.rows())
        .map(|y| {
            let spans: Vec<Span> = (0..grid.cols())
                .map(|x| {
                    if marker == Some((x as i64, y as i64)) {
                        Span::styled(
                            HAND_MARKER.to_string(),
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else if grid.get(x, y) {
                        let glyph = BLOBS.choose(&mut rng).copied().unwrap_or('●');
                        Span::styled(glyph.to_string(), blob_style)
                    } else {
                        Span::raw(" ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(grid_block()), area);
}

/// Draws the statistics panel.
fn draw_stats(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let sim = app.simulation();
    let stats = sim.stats();
    let sys = app.system();
    let memory_used = sys.used_memory() / 1024;
    let memory_total = sys.total_memory() / 1024;

    let motion = if sim.motion().is_active() {
        let left = sim.motion().remaining(Instant::now());
        format!("Active ({:.1}s)", left.as_secs_f32())
    } else {
        "Idle".to_string()
    };
    let hand = match app.tracker_status() {
        TrackerStatus::Disabled => "Off",
        TrackerStatus::Loading => "Loading",
        TrackerStatus::Searching => "No hand",
        TrackerStatus::Tracking => "Tracking",
        TrackerStatus::Failing => "Error",
    };

    let stats_text = format!(
        "Generation: {}\n\
        Grid: {} x {}\n\
        Current Population: {}\n\
        Cells Created: {}\n\
        Cells Destroyed: {}\n\
        Birth Rate: {:.2}/gen\n\
        Death Rate: {:.2}/gen\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Motion: {}\n\
        Hand: {}\n",
        stats.generation,
        sim.grid().cols(),
        sim.grid().rows(),
        stats.current_population,
        stats.cells_created,
        stats.cells_destroyed,
        stats.cells_created as f64 / stats.generation.max(1) as f64,
        stats.cells_destroyed as f64 / stats.generation.max(1) as f64,
        memory_used,
        memory_total as f64 / 1024.0,
        motion,
        hand,
    );

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

/// Dims the grid behind a loading notice while the hand tracker warms up.
fn draw_loading(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let width = area.width.min(60);
    let height = area.height.min(7);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let spinner = SPINNER[(app.simulation().tick() % SPINNER.len() as u64) as usize];

    let text = vec![
        Line::from(Span::styled(
            "LOADING... Please wait!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Waiting for the hand tracker to come online."),
        Line::from(""),
        Line::from(spinner.to_string()),
    ];
    let notice = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(Clear, popup);
    f.render_widget(notice, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_area_is_inside_left_panel() {
        let area = grid_area(Rect::new(0, 0, 100, 40));
        assert_eq!(area, Rect::new(1, 1, 73, 38));
    }

    #[test]
    fn test_surface_size_scales_by_resolution() {
        assert_eq!(surface_size(Rect::new(1, 1, 73, 38), 15), (1095, 570));
    }

    #[test]
    fn test_pointer_to_surface() {
        let area = Rect::new(1, 1, 10, 5);
        assert_eq!(pointer_to_surface(1, 1, area, 10), Some(Point::new(5.0, 5.0)));
        assert_eq!(pointer_to_surface(10, 5, area, 10), Some(Point::new(95.0, 45.0)));
        assert_eq!(pointer_to_surface(0, 3, area, 10), None);
        assert_eq!(pointer_to_surface(11, 3, area, 10), None);
        assert_eq!(pointer_to_surface(4, 6, area, 10), None);
    }
}
