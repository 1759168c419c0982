use anyhow::Result;
use crossterm::{
    event::KeyCode,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc};
use tokio::sync::Mutex;

use flag_rank::{
    config::TuiSettings,
    scoring::StandingsService,
    tui::{app::Screen, ui, App, Event as TuiEvent, EventHandler},
};

pub async fn run_tui(service: Arc<StandingsService>, settings: TuiSettings) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let app = Arc::new(Mutex::new(App::new()));
    let events = EventHandler::new(settings.tick_rate_ms);

    refresh_leaderboard(app.clone(), service.clone(), settings.leaderboard_limit);

    let res = run_app(&mut terminal, app, events, service, settings.leaderboard_limit).await;

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn refresh_leaderboard(app: Arc<Mutex<App>>, service: Arc<StandingsService>, limit: usize) {
    tokio::spawn(async move {
        let result = service.leaderboard(Some(limit)).await;
        let mut app = app.lock().await;
        match result {
            Ok(entries) => app.set_entries(entries),
            Err(e) => app.set_error(&format!("Failed to load leaderboard: {}", e)),
        }
    });
}

fn load_detail(app: Arc<Mutex<App>>, service: Arc<StandingsService>, user_id: String) {
    tokio::spawn(async move {
        let result = service.player_rank(&user_id).await;
        let mut app = app.lock().await;
        match result {
            Ok(player) => app.set_detail(player),
            Err(e) => app.set_error(&e.to_string()),
        }
    });
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
    events: EventHandler,
    service: Arc<StandingsService>,
    limit: usize,
) -> Result<()> {
    loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                return Ok(());
            }
            terminal.draw(|f| ui::draw(f, &app))?;
        }

        let event = match events.next() {
            Ok(event) => event,
            Err(e) => return Err(anyhow::anyhow!("Input channel closed: {}", e)),
        };

        let TuiEvent::Key(key) = event else {
            continue;
        };

        let mut app_guard = app.lock().await;

        match app_guard.current_screen {
            Screen::Leaderboard => match key.code {
                KeyCode::Char('q') => app_guard.should_quit = true,
                KeyCode::Up => app_guard.move_selection_up(),
                KeyCode::Down => app_guard.move_selection_down(),
                KeyCode::Tab => app_guard.cycle_tier_filter(),
                KeyCode::Char('r') => {
                    app_guard.set_loading("Refreshing leaderboard...");
                    refresh_leaderboard(app.clone(), service.clone(), limit);
                }
                KeyCode::Enter => {
                    if let Some(entry) = app_guard.selected_entry() {
                        let user_id = entry.user_id.clone();
                        app_guard.set_loading(&format!("Loading {}...", user_id));
                        load_detail(app.clone(), service.clone(), user_id);
                    }
                }
                _ => {}
            },
            Screen::Detail => match key.code {
                KeyCode::Char('b') | KeyCode::Esc => app_guard.back_to_leaderboard(),
                KeyCode::Char('q') => app_guard.should_quit = true,
                _ => {}
            },
            Screen::Loading => {
                if key.code == KeyCode::Char('q') {
                    app_guard.should_quit = true;
                }
            }
        }
    }
}
