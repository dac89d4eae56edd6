#![allow(
    // Board dimensions always fit in u16 terminal coordinates
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::app::{App, Tile};
use crate::game::OBITUARY;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Host-side values shown in the debug lines.
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub frame: u64,
    pub frames_per_iteration: u64,
    pub last_key: Option<String>,
}

const EMPTY_CHAR: &str = ".";
const BLOCK_CHAR: &str = "█";
const PLAYER_CHARS: [&str; 2] = ["▐", "▌"];

#[must_use]
pub fn cell_width(app: &App) -> u16 {
    if app.config.display.double_width { 2 } else { 1 }
}

/// Outer size of the bordered board widget.
#[must_use]
pub fn board_size(app: &App) -> (u16, u16) {
    (
        app.width() as u16 * cell_width(app) + 2,
        app.height() as u16 + 2,
    )
}

pub fn render(f: &mut Frame, app: &App, debug: &DebugInfo) {
    let (board_width, board_height) = board_size(app);
    let min_info_width = 20u16;

    if f.area().width < board_width + min_info_width || f.area().height < board_height + 2 {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Kret"));
        f.render_widget(warning_text, centered_rect(50, 30, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(min_info_width)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("KRET")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);
    render_info(f, app, debug, main_layout[1]);
}

fn render_info(f: &mut Frame, app: &App, debug: &DebugInfo, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(5), // Stats
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let mut stats = format!("Blocks eaten: {}", app.blocks_eaten());
    if app.config.display.show_debug {
        stats.push_str(&format!(
            "\nFrame: {}, tick: {}\nFrames per tick: {}\nLast key: {}",
            debug.frame,
            app.current_tick(),
            debug.frames_per_iteration,
            debug.last_key.as_deref().unwrap_or("-"),
        ));
    }
    let stats_info = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_info, info_layout[1]);

    let controls = if app.is_game_over() {
        Paragraph::new("GAME OVER!\nEnter: Restart\nQ: Quit").style(Style::default().fg(Color::Red))
    } else {
        Paragraph::new(
            "Controls:\n\
            ←/→: Burrow left/right\n\
            ↑: Burrow up\n\
            Q: Quit\n\
            ",
        )
    };
    f.render_widget(
        controls
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: true }),
        info_layout[2],
    );
}

fn render_game_board(f: &mut Frame, app: &App, area: Rect) {
    let cell_width = cell_width(app);
    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    for (x, y, tile) in app.visible_cells() {
        let cell_x = inner_area.left() + x as u16 * cell_width;
        let cell_y = inner_area.top() + y as u16;
        if cell_x >= inner_area.right() || cell_y >= inner_area.bottom() {
            continue;
        }

        for part in 0..cell_width {
            let Some(cell) = f.buffer_mut().cell_mut((cell_x + part, cell_y)) else {
                continue;
            };
            match tile {
                Tile::Empty => {
                    cell.set_symbol(EMPTY_CHAR);
                    cell.set_fg(Color::DarkGray);
                }
                Tile::Block(kind) => {
                    cell.set_symbol(BLOCK_CHAR);
                    cell.set_fg(kind.get_color());
                }
                Tile::Player => {
                    cell.set_symbol(PLAYER_CHARS[usize::from(part)]);
                    cell.set_fg(Color::White);
                }
            }
        }
    }

    if app.is_game_over() {
        let width = inner_area.width.min(OBITUARY.chars().count() as u16 + 2);
        let obituary_area = Rect {
            x: inner_area.x + (inner_area.width - width) / 2,
            y: inner_area.y + inner_area.height / 2,
            width,
            height: 1,
        };
        let obituary = Paragraph::new(OBITUARY)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        f.render_widget(obituary, obituary_area);
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
