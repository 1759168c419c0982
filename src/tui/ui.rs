use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::{
    models::RankTier,
    tui::app::{App, Screen},
};

pub fn draw(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Leaderboard => draw_leaderboard_screen(frame, app),
        Screen::Detail => draw_detail_screen(frame, app),
        Screen::Loading => draw_loading_screen(frame, app),
    }
}

fn tier_color(tier: RankTier) -> Color {
    match tier {
        RankTier::Bronze => Color::Rgb(205, 127, 50),
        RankTier::Silver => Color::Gray,
        RankTier::Gold => Color::Yellow,
        RankTier::Platinum => Color::White,
        RankTier::Diamond => Color::Cyan,
        RankTier::Masters => Color::LightMagenta,
        RankTier::Legends => Color::Magenta,
    }
}

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
}

fn draw_leaderboard_screen(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let filter = app
        .tier_filter
        .map(|t| format!(" [{}]", t))
        .unwrap_or_default();
    let title = Paragraph::new(format!("Flag Quiz Leaderboard{}", filter))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let rows: Vec<Row> = app
        .visible_entries()
        .into_iter()
        .map(|entry| {
            Row::new(vec![
                Span::raw(format!("#{}", entry.position)),
                Span::raw(entry.username.clone()),
                Span::raw(entry.level.to_string()),
                Span::raw(format!("{:.1}", entry.score)),
                Span::styled(
                    entry.tier.as_str(),
                    Style::default().fg(tier_color(entry.tier)).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(16),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Pos", "Player", "Level", "Score", "Tier"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Players (↑/↓ to select)"))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = TableState::default();
    if !app.visible_entries().is_empty() {
        state.select(Some(app.selected_index));
    }
    frame.render_stateful_widget(table, chunks[1], &mut state);

    let mut help = vec![Line::from(vec![
        key("Enter"),
        Span::raw(" details | "),
        key("Tab"),
        Span::raw(" filter tier | "),
        key("r"),
        Span::raw(" refresh | "),
        Span::styled("q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ])];

    if let Some(error) = &app.error_message {
        help.push(Line::from(vec![
            Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(error.as_str(), Style::default().fg(Color::Red)),
        ]));
    }

    frame.render_widget(Paragraph::new(help).block(Block::default().borders(Borders::ALL)), chunks[2]);
}

fn draw_detail_screen(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(3),
        ])
        .split(frame.size());

    let Some(player) = &app.detail else {
        return;
    };

    let tier = player.result.tier;
    let title = Paragraph::new(format!("{} ({})", player.profile.username, player.profile.id))
        .style(Style::default().fg(tier_color(tier)).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let time = player
        .stats
        .recorded_time()
        .map(|s| format!("{}s", s))
        .unwrap_or_else(|| "-".to_string());

    let next = match (player.result.next_tier, player.result.points_to_next) {
        (Some(next), Some(points)) => format!("{:.1} points to {}", points, next),
        _ => "Top tier reached".to_string(),
    };

    let text = vec![
        Line::from(vec![
            Span::raw("Tier: "),
            Span::styled(tier.as_str(), Style::default().fg(tier_color(tier)).add_modifier(Modifier::BOLD)),
            Span::raw(format!("  ({})", player.result.badge)),
        ]),
        Line::from(vec![
            Span::raw("Rank score: "),
            Span::styled(
                format!("{:.1}", player.result.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Position: #{}", player.stats.best_position)),
        Line::from(""),
        Line::from(format!("Level: {}  (XP {})", player.profile.level, player.profile.xp)),
        Line::from(format!("Best streak: {}", player.stats.best_streak)),
        Line::from(format!("Best timed run: {}", time)),
        Line::from(format!("Duel wins: {}", player.stats.duel_wins)),
        Line::from(""),
        Line::from(Span::styled(next, Style::default().fg(Color::Cyan))),
    ];

    let details = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Profile"))
        .wrap(Wrap { trim: true });
    frame.render_widget(details, chunks[1]);

    let help = Paragraph::new("Press 'b' to go back | 'q' to quit")
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}

fn draw_loading_screen(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 20, frame.size());
    let loading_text = app.loading_message.as_deref().unwrap_or("Loading...");

    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Loading"));

    frame.render_widget(Clear, area);
    frame.render_widget(loading, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
