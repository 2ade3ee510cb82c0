use blackjack::{Card, Deck, FileRecordStore, GamePhase, Suit, Table};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::{error::Error, io};

mod tui_logger;
use tui_logger::TuiLogger;

/// Single-player blackjack in the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// File holding the cumulative win/loss record
    #[arg(long, env = "BLACKJACK_RECORD_FILE", default_value = "data/record.txt")]
    record_file: PathBuf,

    /// Fixed shuffle seed, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

struct App {
    table: Table<FileRecordStore>,
    status: String,
    logs: Vec<String>,
    log_buffer: Arc<Mutex<VecDeque<String>>>, // shared buffer capturing log:: messages
    log_visible: bool,
}

impl App {
    fn new(table: Table<FileRecordStore>, log_buffer: Arc<Mutex<VecDeque<String>>>) -> App {
        App {
            table,
            status: "Press [N] to deal a new round".to_string(),
            logs: vec!["Welcome to Blackjack!".to_string()],
            log_buffer,
            log_visible: true,
        }
    }

    fn sync_logs(&mut self) {
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };
        for msg in messages {
            self.add_log(msg);
        }
    }

    fn add_log(&mut self, msg: String) {
        self.logs.push(msg);
        if self.logs.len() > 100 {
            self.logs.remove(0);
        }
    }

    fn deal(&mut self) {
        if self.table.is_round_active() {
            return;
        }
        match self.table.start_round() {
            Some(result) => {
                self.add_log(format!("Blackjack on the deal: {}", result.message()));
                self.status = format!("{} Press [N] for the next round.", result.message());
            }
            None => {
                self.status = format!(
                    "Round started, dealer shows {}. [H]it or [S]tand!",
                    self.table.dealer_up_card_value()
                );
            }
        }
    }

    fn hit(&mut self) {
        if self.table.phase() != GamePhase::PlayerTurn {
            return;
        }
        if let Some(result) = self.table.player_hits() {
            self.status = format!("{} Press [N] for the next round.", result.message());
            return;
        }
        // hitting is never terminal by itself; bust is ours to catch
        if self.table.is_player_bust() {
            self.table.player_stands();
            self.status = "Bust! Dealer wins. Press [N] for the next round.".to_string();
        } else {
            self.status = format!(
                "You have {}, dealer shows {}. [H]it or [S]tand!",
                self.table.player_total(),
                self.table.dealer_up_card_value()
            );
        }
    }

    fn stand(&mut self) {
        if self.table.phase() != GamePhase::PlayerTurn {
            return;
        }
        let result = self.table.player_stands();
        self.add_log(format!(
            "Stand on {} against dealer {}: {}",
            self.table.player_total(),
            self.table.dealer_total(),
            result.message()
        ));
        self.status = format!("{} Press [N] for the next round.", result.message());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let (logger, log_buffer) = TuiLogger::new(log::Level::Info);
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(log::LevelFilter::Info))
        .expect("Failed to initialize logger");

    let deck = match args.seed {
        Some(seed) => Deck::seeded(seed),
        None => Deck::new(),
    };
    let store = FileRecordStore::new(args.record_file);
    let table = Table::with_deck(deck, store);

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(table, log_buffer);
    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}")
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), Box<dyn Error>>
where
    B::Error: 'static,
{
    loop {
        app.sync_logs();
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                    KeyCode::Char('n') | KeyCode::Char('N') => app.deal(),
                    KeyCode::Char('h') | KeyCode::Char('H') => app.hit(),
                    KeyCode::Char('s') | KeyCode::Char('S') => app.stand(),
                    KeyCode::Char('l') | KeyCode::Char('L') => {
                        app.log_visible = !app.log_visible;
                    }
                    _ => {}
                }
            }
        }
    }
}

fn card_span(card: &Card, hidden: bool) -> Span<'static> {
    if hidden {
        return Span::styled("?? ", Style::default().fg(Color::White).bg(Color::Gray));
    }
    let color = match card.suit {
        Suit::Hearts => Color::Red,
        Suit::Diamonds => Color::from_u32(0xFF_A5_00), // orange
        Suit::Clubs => Color::Magenta,
        Suit::Spades => Color::Black,
    };
    Span::styled(format!("{card} "), Style::default().fg(color).bg(Color::Gray))
}

fn ui(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // title bar
                Constraint::Min(10),   // game area
                Constraint::Length(4), // status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new("Blackjack")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    // split main area: game on the left, logs on the right when visible
    let (game_container, log_area) = if app.log_visible {
        let main_horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
            .split(main_chunks[1]);
        (main_horizontal[0], Some(main_horizontal[1]))
    } else {
        (main_chunks[1], None)
    };

    let game_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(game_container);

    let table = &app.table;
    let dealt = !table.dealer_hand().is_empty();

    // dealer hand, hole card masked while hidden
    let dealer_cards: Vec<Span> = if dealt {
        table
            .dealer_hand()
            .cards()
            .iter()
            .enumerate()
            .map(|(idx, card)| card_span(card, idx == 1 && table.hole_card_hidden()))
            .collect()
    } else {
        vec![Span::raw("No round started")]
    };

    let dealer_title = if dealt && !table.hole_card_hidden() {
        format!(" Dealer Hand ({}) ", table.dealer_total())
    } else if dealt {
        format!(" Dealer Hand (shows {}) ", table.dealer_up_card_value())
    } else {
        " Dealer Hand ".to_string()
    };

    let dealer_height = game_area[0].height.saturating_sub(2);
    let mut dealer_lines: Vec<Line> = vec![Line::from(""); (dealer_height / 2) as usize];
    dealer_lines.push(Line::from(dealer_cards));

    let dealer_block = Paragraph::new(dealer_lines)
        .block(Block::default().title(dealer_title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(dealer_block, game_area[0]);

    // player hand, totals, record
    let player_cards: Vec<Span> = if dealt {
        table
            .player_hand()
            .cards()
            .iter()
            .map(|card| card_span(card, false))
            .collect()
    } else {
        vec![Span::raw("Press [N] to deal")]
    };

    let player_title = if dealt {
        format!(" Your Hand ({}) ", table.player_total())
    } else {
        " Your Hand ".to_string()
    };

    let record_line = Line::from(vec![
        Span::styled("Wins: ", Style::default().fg(Color::Green)),
        Span::raw(table.wins().to_string()),
        Span::raw("   "),
        Span::styled("Losses: ", Style::default().fg(Color::Red)),
        Span::raw(table.losses().to_string()),
        Span::raw(format!("   Deck: {}", table.deck_size())),
    ]);

    let player_height = game_area[1].height.saturating_sub(2);
    let padding = player_height.saturating_sub(3) / 2;
    let mut player_lines: Vec<Line> = vec![Line::from(""); padding as usize];
    player_lines.push(Line::from(player_cards));
    player_lines.push(Line::from(""));
    player_lines.push(record_line);

    let player_block = Paragraph::new(player_lines)
        .block(Block::default().title(player_title).borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(player_block, game_area[1]);

    // log pane
    if let Some(log_area) = log_area {
        let visible = log_area.height.saturating_sub(2) as usize;
        let start = app.logs.len().saturating_sub(visible);
        let log_lines: Vec<Line> = app.logs[start..]
            .iter()
            .map(|msg| Line::from(msg.as_str()))
            .collect();
        let logs_widget = Paragraph::new(log_lines)
            .block(Block::default().title(" Log ([L] to hide) ").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(logs_widget, log_area);
    }

    let status_bar = Paragraph::new(vec![
        Line::from(app.status.as_str()),
        Line::from(Span::styled(
            "[N]ew round  [H]it  [S]tand  [L]ogs  [Q]uit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, main_chunks[2]);
}
