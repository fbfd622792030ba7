//! Application state and event handling
//!
//! Holds what the terminal UI needs to render: the current screen, the
//! sorted employee list, and the selection cursor. All state mutation
//! happens on the main task; the directory client is only awaited from
//! here, so fetch results land on one context.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};

use staffdir::data::{DirectoryClient, Employee};

/// The screen currently shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// A fetch is in progress
    Loading,
    /// The directory is loaded and listed
    Directory,
    /// The last fetch failed; holds the user-facing message
    Failed(String),
}

/// Top-level application state
pub struct App {
    /// Current screen
    pub state: AppState,
    /// Company name from the last successful fetch
    pub company_name: String,
    /// Employees sorted ascending by name
    pub employees: Vec<Employee>,
    /// Index of the highlighted employee
    pub selected: usize,
    /// Whether the main loop should exit
    pub should_quit: bool,
    /// Whether the user asked for a (re)fetch
    pub reload_requested: bool,
    client: Arc<DirectoryClient>,
}

impl App {
    /// Creates the app in the loading state
    pub fn new(client: Arc<DirectoryClient>) -> Self {
        Self {
            state: AppState::Loading,
            company_name: String::new(),
            employees: Vec::new(),
            selected: 0,
            should_quit: false,
            reload_requested: false,
            client,
        }
    }

    /// Fetches the directory and transitions to Directory or Failed
    pub async fn load_directory(&mut self) {
        match self.client.fetch().await {
            Ok(company) => {
                self.company_name = company.name.clone();
                self.employees = company.sorted_employees();
                if self.selected >= self.employees.len() {
                    self.selected = self.employees.len().saturating_sub(1);
                }
                self.state = AppState::Directory;
            }
            Err(error) => {
                self.state = AppState::Failed(error.to_string());
            }
        }
    }

    /// Handles a keyboard event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.reload_requested = true;
                self.state = AppState::Loading;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.state == AppState::Directory {
                    self.selected = self.selected.saturating_sub(1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.state == AppState::Directory && !self.employees.is_empty() {
                    self.selected = (self.selected + 1).min(self.employees.len() - 1);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use staffdir::data::Company;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn test_app() -> App {
        App::new(Arc::new(DirectoryClient::new("")))
    }

    fn loaded_app(count: usize) -> App {
        let mut app = test_app();
        app.state = AppState::Directory;
        app.company_name = "Acme".to_string();
        let company = Company {
            name: "Acme".to_string(),
            employees: (0..count)
                .map(|i| Employee {
                    name: format!("Employee {}", i),
                    phone_number: format!("+{}", i),
                    skills: Vec::new(),
                })
                .collect(),
        };
        app.employees = company.sorted_employees();
        app
    }

    #[test]
    fn test_starts_loading() {
        let app = test_app();
        assert_eq!(app.state, AppState::Loading);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = test_app();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_retry_requests_reload_and_shows_loading() {
        let mut app = test_app();
        app.state = AppState::Failed("connection failed: refused".to_string());

        app.handle_key(key(KeyCode::Char('r')));

        assert!(app.reload_requested);
        assert_eq!(app.state, AppState::Loading);
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut app = loaded_app(3);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 2, "Selection stops at the last employee");

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected, 1);

        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected, 0, "Selection stops at the first employee");
    }

    #[test]
    fn test_selection_ignored_while_loading() {
        let mut app = test_app();

        app.handle_key(key(KeyCode::Down));

        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_load_directory_failure_shows_message() {
        let mut app = test_app();

        app.load_directory().await;

        assert_eq!(
            app.state,
            AppState::Failed("invalid endpoint URL".to_string())
        );
    }
}
