//! UI rendering for the play scene.
//!
//! Draws the playfield on a braille canvas scaled to the terminal, with the
//! score overlays above it and the pause menu on top.

use flappy_scene::engine::ArcadeEngine;
use flappy_scene::scene::{Engine, PlayScene, ScenePhase, TextSlot};
use flappy_scene::score::BestScoreStore;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Rectangle},
        Block, Borders, Clear, Paragraph,
    },
    Frame,
};

const PIPE_COLOR: Color = Color::Green;
const BIRD_COLOR: Color = Color::Yellow;

fn tint_color(rgb: u32) -> Color {
    Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Render the play scene.
pub fn render_play_scene<S, R>(frame: &mut Frame, area: Rect, scene: &PlayScene<ArcadeEngine, S, R>)
where
    S: BestScoreStore,
    R: rand::Rng,
{
    frame.render_widget(Clear, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], scene.engine());
    render_playfield(frame, chunks[1], scene);
    render_status_bar(frame, chunks[2], scene.phase());

    if scene.engine().pause_menu_open() {
        render_pause_menu(frame, chunks[1]);
    }
}

fn render_header(frame: &mut Frame, area: Rect, engine: &ArcadeEngine) {
    let line = Line::from(vec![
        Span::styled(
            engine.text(TextSlot::Score).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            engine.text(TextSlot::BestScore).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_playfield<S, R>(frame: &mut Frame, area: Rect, scene: &PlayScene<ArcadeEngine, S, R>)
where
    S: BestScoreStore,
    R: rand::Rng,
{
    let engine = scene.engine();
    let width = engine.width() as f64;
    let height = engine.height() as f64;
    let pipe_width = scene.pool().pipe_width() as f64;
    let pairs = scene.pool().pairs();
    let bird = engine.bird();
    let bird_color = engine.tint().map(tint_color).unwrap_or(BIRD_COLOR);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Flappy ({}) ", scene.tier().name()));

    // Canvas y grows upward, playfield y grows downward
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(move |ctx| {
            for pair in pairs {
                let x = pair.x as f64;
                if x > width || x + pipe_width < 0.0 {
                    continue;
                }
                let upper = pair.upper_y as f64;
                let lower = pair.lower_y as f64;
                ctx.draw(&Rectangle {
                    x,
                    y: height - upper,
                    width: pipe_width,
                    height: upper,
                    color: PIPE_COLOR,
                });
                ctx.draw(&Rectangle {
                    x,
                    y: 0.0,
                    width: pipe_width,
                    height: height - lower,
                    color: PIPE_COLOR,
                });
            }
            ctx.draw(&Rectangle {
                x: bird.x as f64,
                y: height - (bird.y + bird.height) as f64,
                width: bird.width as f64,
                height: bird.height as f64,
                color: bird_color,
            });
        });
    frame.render_widget(canvas, area);

    let countdown = engine.text(TextSlot::Countdown);
    if !countdown.is_empty() {
        let overlay = centered_rect(area, 20, 1);
        frame.render_widget(
            Paragraph::new(countdown.to_string())
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD)),
            overlay,
        );
    }

    if scene.phase() == ScenePhase::GameOver {
        let overlay = centered_rect(area, 20, 1);
        frame.render_widget(
            Paragraph::new("GAME OVER")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            overlay,
        );
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, phase: ScenePhase) {
    let hint = match phase {
        ScenePhase::Running => "[Space/Up/Click] Flap  [P/Esc] Pause  [Q] Quit",
        ScenePhase::Paused => "[P/Enter] Resume  [Q] Quit",
        ScenePhase::GameOver => "Restarting...  [Q] Quit",
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_pause_menu(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 32, 5);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Paused ");
    let text = vec![
        Line::from(""),
        Line::from("Press P or Enter to resume"),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        popup,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
