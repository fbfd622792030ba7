//! Staff Directory CLI - View a company employee directory
//!
//! A terminal application that fetches a company directory from a JSON
//! endpoint, caches it for a bounded time window, and lists the employees
//! sorted by name.

mod app;
mod ui;

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use staffdir::cli::{Cli, StartupConfig};
use staffdir::data::DirectoryClient;

use app::{App, AppState};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    match &app.state {
        AppState::Loading => {
            render_loading(frame);
        }
        AppState::Directory => {
            ui::render_directory(frame, app);
        }
        AppState::Failed(message) => {
            ui::render_error(frame, message);
        }
    }
}

/// Renders a loading message while the directory is being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading directory...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

/// Fetches once and prints the sorted directory to stdout
async fn run_plain(client: &DirectoryClient) -> Result<(), Box<dyn std::error::Error>> {
    match client.fetch().await {
        Ok(company) => {
            println!("{}", company.name);
            for employee in company.sorted_employees() {
                if employee.skills.is_empty() {
                    println!("  {}  {}", employee.name, employee.phone_number);
                } else {
                    println!(
                        "  {}  {}  [{}]",
                        employee.name,
                        employee.phone_number,
                        employee.skills.join(", ")
                    );
                }
            }
            Ok(())
        }
        Err(error) => {
            eprintln!("error: {}", error);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli);

    let client = Arc::new(
        DirectoryClient::new(config.endpoint).with_freshness_secs(config.freshness_secs),
    );

    if config.plain {
        return run_plain(&client).await;
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance
    let mut app = App::new(client);

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;

    // Trigger initial data load
    app.load_directory().await;

    // Main event loop
    loop {
        // A pending reload was requested by the retry key
        if app.reload_requested {
            app.reload_requested = false;
            terminal.draw(|f| render_ui(f, &app))?;
            app.load_directory().await;
        }

        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
