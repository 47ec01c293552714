//! Main UI Application
//!
//! Maps keys onto engine calls and draws the session.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::game::{Direction, Game, GameState, PlayerAction, TurnOutcome};
use crate::progression::level_title;

/// Terminal front end state
#[derive(Debug, Default)]
pub struct App {
    last_outcome: Option<TurnOutcome>,
}

/// Movement keys: arrows and WASD
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn dim((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r / 3, g / 3, b / 3)
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns `Ok(true)` when the player quits.
    pub fn handle_input(&mut self, key: KeyEvent, game: &mut Game) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.last_outcome = None;
                game.start_configured_game()?;
            }
            code => {
                if let Some(direction) = direction_for_key(code) {
                    let outcome = game.handle_turn(direction);
                    if !outcome.was_ignored() {
                        self.last_outcome = Some(outcome);
                    }
                }
            }
        }
        Ok(false)
    }

    /// Render the current game state
    pub fn render(&self, frame: &mut Frame, game: &Game) {
        frame.render_widget(Clear, frame.area());

        let area = frame.area();
        let chunks = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(28)])
            .split(area);

        let left_chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(10), Constraint::Length(8)])
            .split(chunks[0]);

        self.render_map(frame, game, left_chunks[0]);
        self.render_messages(frame, game, left_chunks[1]);
        self.render_sidebar(frame, game, chunks[1]);

        match game.state() {
            GameState::GameOver => self.render_banner(frame, "YOU DIED", Color::Red),
            GameState::Victory => self.render_banner(frame, "VICTORY", Color::Yellow),
            GameState::Playing => {}
        }
    }

    fn render_map(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Crypt - Turn {} ", game.turn()))
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (map, visibility) = match (game.map(), game.visibility()) {
            (Some(m), Some(v)) => (m, v),
            _ => return,
        };
        let player_pos = match map.player_position() {
            Some(p) => p,
            None => return,
        };

        // Camera centred on the player
        let view_width = inner.width as i32;
        let view_height = inner.height as i32;
        let cam_x = player_pos.x - view_width / 2;
        let cam_y = player_pos.y - view_height / 2;

        let buf = frame.buffer_mut();
        for screen_y in 0..view_height {
            for screen_x in 0..view_width {
                let map_x = cam_x + screen_x;
                let map_y = cam_y + screen_y;
                let cell = (inner.x + screen_x as u16, inner.y + screen_y as u16);

                let tile = match map.get_tile(map_x, map_y) {
                    Some(t) if t.is_discovered() => t,
                    _ => continue,
                };
                let color = tile.tile_type.fg_color();
                let fg = if visibility.is_visible(map_x, map_y) {
                    rgb(color)
                } else {
                    dim(color)
                };
                buf[cell].set_char(tile.glyph());
                buf[cell].set_fg(fg);
            }
        }

        let mut draw = |x: i32, y: i32, ch: char, color: Color| {
            let sx = x - cam_x;
            let sy = y - cam_y;
            if sx >= 0 && sy >= 0 && sx < view_width && sy < view_height {
                let cell = (inner.x + sx as u16, inner.y + sy as u16);
                buf[cell].set_char(ch);
                buf[cell].set_fg(color);
            }
        };

        for (pos, item) in map.item_views() {
            if visibility.is_visible(pos.x, pos.y) {
                draw(pos.x, pos.y, item.glyph(), Color::LightBlue);
            }
        }
        for enemy in map.enemy_views() {
            if enemy.health.is_alive() && visibility.is_visible(enemy.position.x, enemy.position.y) {
                draw(enemy.position.x, enemy.position.y, 'e', Color::LightRed);
            }
        }
        draw(player_pos.x, player_pos.y, '@', Color::White);
    }

    fn render_messages(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Messages ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);

        let messages: Vec<Line> = game
            .message_log()
            .recent(inner.height as usize)
            .iter()
            .map(|msg| {
                Line::from(Span::styled(
                    msg.text.as_str(),
                    Style::default().fg(rgb(msg.category.color())),
                ))
            })
            .collect();

        frame.render_widget(Paragraph::new(messages).block(block), area);
    }

    fn render_sidebar(&self, frame: &mut Frame, game: &Game, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let map = match game.map() {
            Some(m) => m,
            None => {
                frame.render_widget(Paragraph::new("Press n to start"), inner);
                return;
            }
        };

        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        if let Some(health) = map.player_health() {
            let gauge = Gauge::default()
                .block(Block::default().title("Health"))
                .gauge_style(Style::default().fg(Color::Red))
                .ratio(health.percentage().clamp(0.0, 1.0) as f64)
                .label(format!("{}/{}", health.current(), health.max()));
            frame.render_widget(gauge, rows[0]);
        }

        if let Some(exp) = map.player_experience() {
            let gauge = Gauge::default()
                .block(Block::default().title(format!("Level {} {}", exp.level, level_title(exp.level))))
                .gauge_style(Style::default().fg(Color::Green))
                .ratio(exp.progress().clamp(0.0, 1.0) as f64)
                .label(format!("{}/{} XP", exp.current_xp, exp.xp_to_next));
            frame.render_widget(gauge, rows[1]);
        }

        let potions = map.player_inventory().map(|i| i.count()).unwrap_or(0);
        let mut lines = vec![
            Line::from(format!("Attack: {}", map.player_attack_power().unwrap_or(0))),
            Line::from(format!("Potions: {}", potions)),
            Line::from(format!("Enemies left: {}", map.enemies().len())),
            Line::from(""),
        ];
        if let Some(outcome) = &self.last_outcome {
            let text = match &outcome.action {
                PlayerAction::Ignored => "",
                PlayerAction::Bumped => "Bumped a wall",
                PlayerAction::Attacked { killed: true } => "Killed!",
                PlayerAction::Attacked { killed: false } => "Attacked",
                PlayerAction::PickedUp { .. } => "Picked up",
                PlayerAction::Moved => "Moved",
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("arrows/WASD move"));
        lines.push(Line::from("n new game  q quit"));

        frame.render_widget(Paragraph::new(lines), rows[2]);
    }

    fn render_banner(&self, frame: &mut Frame, text: &str, color: Color) {
        let area = frame.area();
        let width = 30.min(area.width);
        let height = 5.min(area.height);
        let popup = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let lines = vec![
            Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from("n: new game  q: quit"),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(ratatui::layout::Alignment::Center),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_wasd_and_arrows_map_to_directions() {
        assert_eq!(direction_for_key(KeyCode::Char('w')), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_key() {
        let mut app = App::new();
        let mut game = Game::new(crate::data::GameConfig::default());
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(app.handle_input(key, &mut game).unwrap_or(false));
    }
}
