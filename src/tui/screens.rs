//! Stateless rendering, one function per phase.

use chameleon_core::{
    BoardItem, HINT_PROMPT, MIN_PLAYERS, Player, PhaseView, Rarity, ResolutionStyle, Reveal,
    RevealContent, ReviewEntry, RoundSummary, Winner, rules, view,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use tracing::warn;

use super::app::App;

/// Renders the whole screen for the current phase.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Phase body
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Clash Chameleon")
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    match view(app.game().state()) {
        Some(PhaseView::Setup { players, can_start }) => {
            draw_setup(frame, chunks[1], app, players, can_start)
        }
        Some(PhaseView::LoadingBoard { category }) => draw_loading(frame, chunks[1], category),
        Some(PhaseView::RevealInterstitial {
            player,
            position,
            total,
        }) => draw_interstitial(frame, chunks[1], player, position, total),
        Some(PhaseView::RevealInfo(reveal)) => draw_reveal(frame, chunks[1], &reveal),
        Some(PhaseView::Playing { starter, board }) => {
            draw_playing(frame, chunks[1], starter, board)
        }
        Some(PhaseView::Voting { resolution }) => draw_voting(frame, chunks[1], resolution),
        Some(PhaseView::GameOver { summary, review }) => {
            draw_game_over(frame, chunks[1], &summary, &review)
        }
        None => {
            warn!(phase = %app.game().phase(), "State incomplete for phase");
        }
    }

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    if app.show_rules() {
        draw_rules(frame, area);
    }
}

fn draw_setup(frame: &mut Frame, area: Rect, app: &App, players: &[Player], can_start: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    let items: Vec<ListItem> = players
        .iter()
        .map(|p| ListItem::new(p.name().clone()))
        .collect();
    let roster = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Players ({}/{} minimum)", players.len(), MIN_PLAYERS)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut roster_state = app.roster_state();
    frame.render_stateful_widget(roster, chunks[0], &mut roster_state);

    let input = Paragraph::new(format!("{}_", app.name_input()))
        .block(Block::default().borders(Borders::ALL).title("New player name"));
    frame.render_widget(input, chunks[1]);

    let config = app.config();
    let start_style = if can_start {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let settings = Text::from(vec![
        Line::from(format!(
            "Category: {}   Mode: {}   Board: {}   Vote: {}",
            config.category(),
            config.mode(),
            if *config.hide_board() { "hidden" } else { "shown" },
            config.effective_resolution(),
        )),
        Line::from(vec![
            Span::raw("Enter: add | Del: remove | Tab: category | F2: mode | F3: board | "),
            Span::styled("F5: start", start_style),
            Span::raw(" | F1: rules | Esc: quit"),
        ]),
    ]);
    frame.render_widget(
        Paragraph::new(settings).block(Block::default().borders(Borders::ALL)),
        chunks[2],
    );
}

fn draw_loading(frame: &mut Frame, area: Rect, category: &str) {
    let text = format!("Shuffling the {} deck...\n\nEsc: cancel", category);
    frame.render_widget(centered_message(text, Color::Cyan), center_rect(area, 50, 5));
}

fn draw_interstitial(frame: &mut Frame, area: Rect, player: &Player, position: usize, total: usize) {
    let text = Text::from(vec![
        Line::from(format!("Player {} of {}", position, total)),
        Line::from(""),
        Line::from(Span::styled(
            player.name().clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Pass the device to {}.", player.name())),
        Line::from("Press Enter to reveal your secret role."),
    ]);
    let block = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Next Player"));
    frame.render_widget(block, center_rect(area, 50, 9));
}

fn draw_reveal(frame: &mut Frame, area: Rect, reveal: &Reveal) {
    let mut lines = vec![Line::from(reveal.player_name.clone()), Line::from("")];
    let border = match &reveal.content {
        RevealContent::Chameleon => {
            lines.push(Line::from(Span::styled(
                "You are the CHAMELEON",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from("Blend in. You don't know the secret card."));
            Color::Red
        }
        RevealContent::Item(item) => {
            lines.push(Line::from("Secret card"));
            lines.push(Line::from(Span::styled(
                item.name().clone(),
                Style::default().fg(rarity_color(*item.rarity())).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!("{} · {} elixir", item.rarity(), item.cost())));
            Color::Green
        }
    };
    lines.push(Line::from(""));
    lines.push(Line::from("Press Enter to hide and pass"));

    let card = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title("Your Identity"),
        );
    frame.render_widget(card, center_rect(area, 50, 10));
}

fn draw_playing(frame: &mut Frame, area: Rect, starter: &Player, board: Option<&[BoardItem]>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Line::from(vec![
        Span::raw("First turn: "),
        Span::styled(
            starter.name().clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   v: start voting | x: reset | q: quit"),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    match board {
        Some(items) => {
            let cells: Vec<(&BoardItem, Style)> = items
                .iter()
                .map(|item| (item, Style::default().fg(rarity_color(*item.rarity()))))
                .collect();
            draw_grid(frame, chunks[1], &cells);
        }
        None => frame.render_widget(
            centered_message("The board is hidden".to_string(), Color::DarkGray),
            chunks[1],
        ),
    }

    let footer = Paragraph::new(HINT_PROMPT)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[2]);
}

fn draw_voting(frame: &mut Frame, area: Rect, resolution: ResolutionStyle) {
    let keys = match resolution {
        ResolutionStyle::Accusation => "c: chameleon caught | e: chameleon escaped",
        ResolutionStyle::RevealOnly => "r: reveal the chameleon",
    };
    let text = Text::from(vec![
        Line::from(Span::styled(
            "Who is the Chameleon?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Discuss, point fingers, and cast your votes."),
        Line::from(""),
        Line::from(keys),
        Line::from("b: back to board"),
    ]);
    let block = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Voting"));
    frame.render_widget(block, center_rect(area, 56, 9));
}

fn draw_game_over(
    frame: &mut Frame,
    area: Rect,
    summary: &RoundSummary,
    review: &[ReviewEntry<'_>],
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(area);

    let headline_color = match summary.outcome().winner() {
        Some(Winner::Citizens) => Color::Green,
        Some(Winner::Chameleon) => Color::Red,
        None => Color::Cyan,
    };
    let mut lines = vec![
        Line::from(Span::styled(
            summary.outcome().to_string(),
            Style::default().fg(headline_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "The chameleon was {}. The secret card was {}.",
            summary.chameleon().name(),
            summary.secret().name()
        )),
    ];
    if let Some(decoy) = summary.impostor() {
        lines.push(Line::from(format!("They were shown {}.", decoy.name())));
    }
    let header = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Round {} | p: play again | r: reset | q: quit", summary.round())),
        );
    frame.render_widget(header, chunks[0]);

    let cells: Vec<(&BoardItem, Style)> = review
        .iter()
        .map(|entry| {
            let style = if entry.is_secret {
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if entry.is_impostor {
                Style::default().fg(Color::Black).bg(Color::Red)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            (entry.item, style)
        })
        .collect();
    draw_grid(frame, chunks[1], &cells);
}

fn draw_rules(frame: &mut Frame, area: Rect) {
    let popup = center_rect(area, 70, 14);
    frame.render_widget(Clear, popup);
    let text = Paragraph::new(format!("{}\n\nPress any key to close", rules()))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("How to Play"));
    frame.render_widget(text, popup);
}

/// Lays items out four to a row.
fn draw_grid(frame: &mut Frame, area: Rect, cells: &[(&BoardItem, Style)]) {
    const COLUMNS: usize = 4;
    let rows = cells.len().div_ceil(COLUMNS).max(1);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, chunk) in cells.chunks(COLUMNS).enumerate() {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
            .split(row_areas[row]);
        for (col, (item, style)) in chunk.iter().enumerate() {
            let cell = Paragraph::new(item.name().clone())
                .style(*style)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(cell, col_areas[col]);
        }
    }
}

fn centered_message(text: String, color: Color) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn rarity_color(rarity: Rarity) -> Color {
    match rarity {
        Rarity::Common => Color::Gray,
        Rarity::Rare => Color::LightYellow,
        Rarity::Epic => Color::Magenta,
        Rarity::Legendary => Color::LightCyan,
        Rarity::Champion => Color::Yellow,
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use chameleon_core::RoundOptions;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn seated() -> App {
        let mut app = App::new(GameConfig::default());
        app.seat(&["Ada".into(), "Brin".into(), "Cy".into()]);
        app
    }

    #[test]
    fn test_setup_lists_players() {
        let text = screen_text(&seated());
        assert!(text.contains("Ada"));
        assert!(text.contains("Category: Mix"));
    }

    #[test]
    fn test_interstitial_names_first_player() {
        let mut app = seated();
        let game = app.game_mut();
        game.start_game(RoundOptions::default()).unwrap();
        game.content_ready(
            (0..16)
                .map(|i| BoardItem::new(format!("Card{i}"), Rarity::Common, 1))
                .collect(),
        )
        .unwrap();
        let text = screen_text(&app);
        assert!(text.contains("Pass the device to Ada"));
        assert!(!text.contains("CHAMELEON"));
    }
}
