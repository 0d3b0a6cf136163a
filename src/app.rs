//! Main application state.
//!
//! Follows The Elm Architecture: [`App::update`] and
//! [`App::handle_api_message`] change state, [`App::view`] draws it. All
//! navigation goes through [`nav::transition`](crate::nav::transition); the
//! app carries out the effects it returns. Fetches are queued for the main
//! loop to spawn, so nothing in here touches the network.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::api::JiraClient;
use crate::config::Profile;
use crate::error::Result;
use crate::events::{Action, Event, KeyBindings};
use crate::nav::{transition, FetchRequest, FetchTicket, Level, NavEffect, NavInput, NavState};
use crate::tasks::ApiMessage;
use crate::ui::{render_help, DetailView, ListView, LoadingIndicator, NotificationManager, StatusBar};
use crate::view::{materialize, Content};

/// Coarse application phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Waiting for the client and the identity check.
    #[default]
    Connecting,
    /// Connected; navigation is live.
    Browsing,
    /// Quit was requested.
    Exiting,
}

/// The main application struct that holds all state.
pub struct App {
    state: AppState,
    should_quit: bool,
    nav: NavState,
    /// What is on screen. Stays in place while the next level loads.
    content: Option<Content>,
    list_view: ListView,
    detail_view: DetailView,
    help_visible: bool,
    notifications: NotificationManager,
    loading: LoadingIndicator,
    keys: KeyBindings,
    client: Option<JiraClient>,
    host: String,
    user_name: Option<String>,
    /// Last connection or fetch error, shown until the next attempt.
    last_error: Option<String>,
    /// Fetches for the main loop to spawn.
    pending_fetches: Vec<(FetchTicket, FetchRequest)>,
    reconnect_requested: bool,
}

impl App {
    /// Create the app for `profile`, waiting for its connection.
    pub fn new(profile: &Profile) -> Self {
        debug!(profile = %profile.name, "Creating application instance");
        let host = profile.host().to_string();

        let mut loading = LoadingIndicator::new();
        loading.start(format!("Connecting to {}...", host));

        Self {
            state: AppState::Connecting,
            should_quit: false,
            nav: NavState::new(),
            content: None,
            list_view: ListView::new(),
            detail_view: DetailView::new(),
            help_visible: false,
            notifications: NotificationManager::new(),
            loading,
            keys: KeyBindings::new(),
            client: None,
            host,
            user_name: None,
            last_error: None,
            pending_fetches: Vec::new(),
            reconnect_requested: false,
        }
    }

    /// Where the app is in its lifecycle.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Whether the event loop should exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The navigation state.
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    /// The content on screen, if any has arrived.
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// The connected client, once the identity check passed.
    pub fn client(&self) -> Option<&JiraClient> {
        self.client.as_ref()
    }

    /// The error shown in the status bar.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the help overlay is open.
    pub fn is_help_visible(&self) -> bool {
        self.help_visible
    }

    /// Live toasts.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// The spinner state.
    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// Selection and filter state of the list levels.
    pub fn list_view(&self) -> &ListView {
        &self.list_view
    }

    /// Drain the fetches queued since the last call, oldest first.
    pub fn take_fetch_requests(&mut self) -> Vec<(FetchTicket, FetchRequest)> {
        std::mem::take(&mut self.pending_fetches)
    }

    /// Whether the user asked to retry the connection. Clears the flag.
    pub fn take_reconnect(&mut self) -> bool {
        std::mem::take(&mut self.reconnect_requested)
    }

    /// Label for the status badge: the level, or the issue key once an
    /// issue is on screen.
    pub fn status_label(&self) -> String {
        match (&self.content, self.nav.level()) {
            (Some(Content::Detail(detail)), Level::IssueDetail) => detail.key.clone(),
            (_, level) => level.label().to_string(),
        }
    }

    /// Apply a terminal event.
    ///
    /// # Errors
    ///
    /// Only an [`InvariantViolation`](crate::nav::InvariantViolation) from
    /// the navigation engine, which the caller treats as fatal.
    pub fn update(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) => {
                trace!(key = ?key.code, modifiers = ?key.modifiers, "Key event");
                self.handle_key_event(key)?;
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
                self.notifications.tick();
            }
        }
        Ok(())
    }

    /// Apply a message from a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) -> Result<()> {
        match message {
            ApiMessage::ClientConnected(Ok((client, user))) => {
                info!(user = %user.display_name, host = %self.host, "Connected");
                self.client = Some(client);
                self.user_name = Some(user.display_name);
                self.last_error = None;
                self.loading.stop();
                self.state = AppState::Browsing;
                self.apply(NavInput::Start)?;
            }
            ApiMessage::ClientConnected(Err(error)) => {
                warn!(%error, "Connection failed");
                self.loading.stop();
                self.notifications.error(error.clone());
                self.last_error = Some(error);
            }
            ApiMessage::Fetched { ticket, result } => {
                let input = match result {
                    Ok(result) => NavInput::FetchSucceeded { ticket, result },
                    Err(error) => NavInput::FetchFailed { ticket, error },
                };
                self.apply(input)?;
            }
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.list_view.is_filtering() {
            return self.handle_filter_key(key);
        }

        let Some(action) = self.keys.action(key) else {
            return Ok(());
        };

        if self.help_visible {
            match action {
                Action::ToggleHelp | Action::Ascend => self.help_visible = false,
                Action::Quit => self.apply(NavInput::Quit)?,
                _ => {}
            }
            return Ok(());
        }

        match action {
            Action::Quit => self.apply(NavInput::Quit)?,
            Action::ToggleHelp => self.help_visible = true,
            Action::Retry if self.state == AppState::Connecting => self.request_reconnect(),
            Action::Retry => self.apply(NavInput::Retry)?,
            _ if self.state != AppState::Browsing => {}
            Action::Filter => {
                if let Some(Content::List(list)) = &self.content {
                    self.list_view.start_filter(list);
                }
            }
            Action::Descend => {
                let selected = match &self.content {
                    Some(Content::List(list)) => self.list_view.selected_id(list).map(str::to_string),
                    _ => None,
                };
                self.apply(NavInput::Descend { selected })?;
            }
            Action::Ascend => {
                // Esc clears a filter before it leaves the level.
                if let Some(Content::List(list)) = &self.content {
                    if self.list_view.has_filter() {
                        self.list_view.clear_filter(list);
                        return Ok(());
                    }
                }
                self.apply(NavInput::Ascend)?;
            }
            Action::Up
            | Action::Down
            | Action::Top
            | Action::Bottom
            | Action::PageUp
            | Action::PageDown => self.move_cursor(action),
        }
        Ok(())
    }

    /// Keys while the row filter has focus.
    fn handle_filter_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.keys.is_interrupt(key) {
            return self.apply(NavInput::Quit);
        }
        if let (Some(edit), Some(Content::List(list))) = (self.keys.filter_key(key), &self.content) {
            self.list_view.edit_filter(edit, list);
        }
        Ok(())
    }

    fn request_reconnect(&mut self) {
        if self.client.is_some() || self.last_error.is_none() {
            return;
        }
        info!(host = %self.host, "Retrying connection");
        self.last_error = None;
        self.reconnect_requested = true;
        self.loading.start(format!("Connecting to {}...", self.host));
    }

    fn move_cursor(&mut self, action: Action) {
        match &self.content {
            Some(Content::List(_)) => match action {
                Action::Up => self.list_view.select_prev(),
                Action::Down => self.list_view.select_next(),
                Action::Top => self.list_view.select_first(),
                Action::Bottom => self.list_view.select_last(),
                Action::PageUp => self.list_view.page_up(),
                Action::PageDown => self.list_view.page_down(),
                _ => {}
            },
            Some(Content::Detail(_)) => match action {
                Action::Up => self.detail_view.scroll_up(),
                Action::Down => self.detail_view.scroll_down(),
                Action::Top => self.detail_view.scroll_to_top(),
                Action::Bottom => self.detail_view.scroll_to_bottom(),
                Action::PageUp => self.detail_view.page_up(),
                Action::PageDown => self.detail_view.page_down(),
                _ => {}
            },
            None => {}
        }
    }

    /// Run `input` through the navigation engine and carry out its effects.
    fn apply(&mut self, input: NavInput) -> Result<()> {
        let step = transition(&self.nav, input)?;
        self.nav = step.state;

        for effect in step.effects {
            match effect {
                NavEffect::Fetch { ticket, request } => {
                    debug!(?ticket, %request, "Queueing fetch");
                    self.last_error = None;
                    self.loading
                        .start(format!("Loading {}...", ticket.level.label().to_lowercase()));
                    self.pending_fetches.push((ticket, request));
                }
                NavEffect::Show(result) => {
                    let content = materialize(&result);
                    match &content {
                        Content::List(list) => self.list_view.reset(list),
                        Content::Detail(_) => self.detail_view.reset(),
                    }
                    debug!(level = %content.level(), "Showing content");
                    self.content = Some(content);
                    self.loading.stop();
                }
                NavEffect::ReportError(error) => {
                    self.loading.stop();
                    self.notifications.error(error.clone());
                    self.last_error = Some(error);
                }
                NavEffect::Discarded { ticket } => {
                    debug!(?ticket, pending = ?self.nav.pending(), "Discarded stale result");
                }
                NavEffect::Exit => {
                    info!("Quit requested");
                    self.should_quit = true;
                    self.state = AppState::Exiting;
                }
            }
        }
        Ok(())
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(1),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_title(frame, chunks[0]);
        self.render_body(frame, chunks[1]);
        self.render_status_bar(frame, chunks[2]);

        self.notifications.render(frame, chunks[1]);
        if self.help_visible {
            render_help(frame, area, &self.keys);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = Line::from(vec![
            Span::styled(
                " sprintdeck ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("│ ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.nav.level().label()),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect) {
        match &self.content {
            Some(Content::List(list)) => self.list_view.render(frame, area, list),
            Some(Content::Detail(detail)) => self.detail_view.render(frame, area, detail),
            None if self.loading.is_active() => self.loading.render(frame, area),
            None => {
                let message = self
                    .last_error
                    .as_deref()
                    .map(|e| format!("{}  (press r to retry)", e))
                    .unwrap_or_default();
                frame.render_widget(
                    Paragraph::new(message).style(Style::default().fg(Color::Red)),
                    area,
                );
            }
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let label = self.status_label();
        let path = self.nav.stack().path();
        let status = StatusBar {
            label: &label,
            path: &path,
            user: self.user_name.as_deref(),
            host: &self.host,
            loading: self.loading.is_active().then(|| self.loading.text()),
            error: self.last_error.as_deref(),
            hints: self.keys.short_hints(),
        };
        status.render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Board, CurrentUser, IssueSummary, SummaryFields};
    use crate::error::AppError;
    use crate::nav::FetchResult;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn profile() -> Profile {
        Profile::new("work", "https://example.atlassian.net", "me@example.com")
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn board(id: u64, name: &str) -> Board {
        Board {
            id,
            name: name.to_string(),
            board_type: Some("scrum".to_string()),
        }
    }

    fn connected_app() -> App {
        let mut app = App::new(&profile());
        let client =
            JiraClient::with_credentials("https://example.atlassian.net", "me@example.com", "t")
                .unwrap();
        let user = CurrentUser {
            account_id: None,
            display_name: "Ada".to_string(),
            email_address: None,
        };
        app.handle_api_message(ApiMessage::ClientConnected(Ok((client, user))))
            .unwrap();
        app
    }

    /// Deliver `result` for the single queued fetch.
    fn complete(app: &mut App, result: std::result::Result<FetchResult, String>) -> FetchTicket {
        let mut fetches = app.take_fetch_requests();
        assert_eq!(fetches.len(), 1, "expected one queued fetch");
        let (ticket, _) = fetches.remove(0);
        app.handle_api_message(ApiMessage::Fetched { ticket, result })
            .unwrap();
        ticket
    }

    fn browsing_boards() -> App {
        let mut app = connected_app();
        complete(
            &mut app,
            Ok(FetchResult::Boards(vec![board(1, "Alpha"), board(2, "Beta")])),
        );
        app
    }

    #[test]
    fn test_new_app_is_connecting() {
        let mut app = App::new(&profile());
        assert_eq!(app.state(), AppState::Connecting);
        assert!(app.loading().is_active());
        assert!(app.take_fetch_requests().is_empty());
        assert!(app.client().is_none());
    }

    #[test]
    fn test_connect_issues_root_fetch() {
        let mut app = connected_app();
        assert_eq!(app.state(), AppState::Browsing);
        assert!(app.client().is_some());

        let fetches = app.take_fetch_requests();
        assert_eq!(fetches.len(), 1);
        assert_eq!(fetches[0].0.level, Level::BoardList);
        assert_eq!(fetches[0].1, FetchRequest::Boards);
        assert!(app.take_fetch_requests().is_empty());
    }

    #[test]
    fn test_boards_shown_with_first_row_selected() {
        let app = browsing_boards();
        match app.content() {
            Some(Content::List(list)) => assert_eq!(list.len(), 2),
            other => panic!("Expected list content, got {:?}", other),
        }
        assert_eq!(app.list_view().selected(), Some(0));
        assert!(!app.loading().is_active());
        assert_eq!(app.status_label(), "Boards");
    }

    #[test]
    fn test_enter_descends_into_selected_board() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Char('j'))).unwrap();
        app.update(key(KeyCode::Enter)).unwrap();

        let fetches = app.take_fetch_requests();
        assert_eq!(
            fetches[0].1,
            FetchRequest::Sprints {
                board_id: "2".to_string()
            }
        );
        assert_eq!(app.nav().level(), Level::SprintList);
        assert!(app.loading().is_active());
        // Previous list stays up until the sprints arrive.
        assert_eq!(app.content().map(Content::level), Some(Level::BoardList));
    }

    #[test]
    fn test_enter_while_loading_is_ignored() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Enter)).unwrap();
        app.take_fetch_requests();

        app.update(key(KeyCode::Enter)).unwrap();
        assert!(app.take_fetch_requests().is_empty());
        assert_eq!(app.nav().stack().len(), 1);
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Enter)).unwrap();
        let (sprint_ticket, _) = app.take_fetch_requests().remove(0);

        app.update(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.nav().level(), Level::BoardList);
        let boards_fetch = app.take_fetch_requests();
        assert_eq!(boards_fetch.len(), 1);

        app.handle_api_message(ApiMessage::Fetched {
            ticket: sprint_ticket,
            result: Ok(FetchResult::Sprints(vec![])),
        })
        .unwrap();
        assert_eq!(app.content().map(Content::level), Some(Level::BoardList));
        assert!(app.loading().is_active());
    }

    #[test]
    fn test_fetch_failure_reports_and_retries() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Enter)).unwrap();
        complete(&mut app, Err("Network error: connection refused".to_string()));

        assert!(app.nav().is_failed());
        assert_eq!(app.last_error(), Some("Network error: connection refused"));
        assert_eq!(app.notifications().len(), 1);
        assert_eq!(app.content().map(Content::level), Some(Level::BoardList));

        app.update(key(KeyCode::Char('r'))).unwrap();
        let fetches = app.take_fetch_requests();
        assert_eq!(
            fetches[0].1,
            FetchRequest::Sprints {
                board_id: "1".to_string()
            }
        );
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_detail_label_uses_issue_key() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Enter)).unwrap();
        complete(
            &mut app,
            Ok(FetchResult::Sprints(
                serde_json::from_str(r#"[{"id":42,"name":"Sprint 1"}]"#).unwrap(),
            )),
        );
        app.update(key(KeyCode::Enter)).unwrap();
        complete(
            &mut app,
            Ok(FetchResult::Issues(vec![IssueSummary {
                id: "10001".to_string(),
                key: "PLAT-1".to_string(),
                fields: SummaryFields {
                    summary: "Fix it".to_string(),
                },
            }])),
        );
        app.update(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.status_label(), "Issue");

        complete(
            &mut app,
            Ok(FetchResult::IssueDetail(Box::new(
                serde_json::from_str(r#"{"id":"10001","key":"PLAT-1","fields":{"summary":"Fix it"}}"#)
                    .unwrap(),
            ))),
        );
        assert_eq!(app.status_label(), "PLAT-1");
        assert_eq!(app.nav().stack().path(), "1 (Boards) > 42 (Sprints) > 10001 (Issues)");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(&profile());
        app.update(key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit());
        assert_eq!(app.state(), AppState::Exiting);

        let mut app = browsing_boards();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
        .unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_help_overlay_captures_escape() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Enter)).unwrap();
        app.take_fetch_requests();

        app.update(key(KeyCode::Char('?'))).unwrap();
        assert!(app.is_help_visible());
        app.update(key(KeyCode::Esc)).unwrap();
        assert!(!app.is_help_visible());
        // Esc closed the overlay rather than ascending.
        assert_eq!(app.nav().level(), Level::SprintList);
        assert!(app.take_fetch_requests().is_empty());
    }

    #[test]
    fn test_connect_failure_then_retry() {
        let mut app = App::new(&profile());
        app.handle_api_message(ApiMessage::ClientConnected(Err(
            "Connection failed: timed out".to_string(),
        )))
        .unwrap();
        assert_eq!(app.state(), AppState::Connecting);
        assert_eq!(app.last_error(), Some("Connection failed: timed out"));
        assert!(!app.take_reconnect());

        app.update(key(KeyCode::Char('r'))).unwrap();
        assert!(app.take_reconnect());
        assert!(!app.take_reconnect());
        assert!(app.loading().is_active());
    }

    #[test]
    fn test_mismatched_result_is_fatal() {
        let mut app = connected_app();
        let (ticket, _) = app.take_fetch_requests().remove(0);
        let err = app
            .handle_api_message(ApiMessage::Fetched {
                ticket,
                result: Ok(FetchResult::Sprints(vec![])),
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Invariant(_)));
    }

    fn type_keys(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_filter_then_enter_descends_into_match() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Char('/'))).unwrap();
        assert!(app.list_view().is_filtering());

        // Letters go to the filter, so `q` does not quit.
        type_keys(&mut app, "bq");
        assert!(!app.should_quit());
        assert_eq!(app.list_view().visible_len(), 0);
        app.update(key(KeyCode::Backspace)).unwrap();
        type_keys(&mut app, "eta");
        assert_eq!(app.list_view().visible_len(), 1);

        // First Enter confirms the filter.
        app.update(key(KeyCode::Enter)).unwrap();
        assert!(!app.list_view().is_filtering());
        assert!(app.take_fetch_requests().is_empty());

        app.update(key(KeyCode::Enter)).unwrap();
        let fetches = app.take_fetch_requests();
        assert_eq!(
            fetches[0].1,
            FetchRequest::Sprints {
                board_id: "2".to_string()
            }
        );
        assert_eq!(app.nav().level(), Level::SprintList);
    }

    #[test]
    fn test_descend_without_filter_matches_does_nothing() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Char('/'))).unwrap();
        type_keys(&mut app, "zzz");
        app.update(key(KeyCode::Enter)).unwrap();
        assert_eq!(app.list_view().visible_len(), 0);

        app.update(key(KeyCode::Enter)).unwrap();
        assert!(app.take_fetch_requests().is_empty());
        assert_eq!(app.nav().level(), Level::BoardList);
        assert!(app.last_error().is_none());
    }

    #[test]
    fn test_escape_clears_filter_before_ascending() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Enter)).unwrap();
        complete(
            &mut app,
            Ok(FetchResult::Sprints(
                serde_json::from_str(r#"[{"id":42,"name":"Sprint 1"},{"id":43,"name":"Sprint 2"}]"#)
                    .unwrap(),
            )),
        );
        app.update(key(KeyCode::Char('/'))).unwrap();
        type_keys(&mut app, "2");
        app.update(key(KeyCode::Enter)).unwrap();
        assert!(app.list_view().has_filter());

        app.update(key(KeyCode::Esc)).unwrap();
        assert!(!app.list_view().has_filter());
        assert_eq!(app.nav().level(), Level::SprintList);
        assert!(app.take_fetch_requests().is_empty());

        app.update(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.nav().level(), Level::BoardList);
    }

    #[test]
    fn test_new_content_resets_filter() {
        let mut app = browsing_boards();
        app.update(key(KeyCode::Char('/'))).unwrap();
        type_keys(&mut app, "beta");
        app.update(key(KeyCode::Enter)).unwrap();
        app.update(key(KeyCode::Enter)).unwrap();
        assert!(app.list_view().has_filter());

        complete(
            &mut app,
            Ok(FetchResult::Sprints(
                serde_json::from_str(r#"[{"id":42,"name":"Sprint 1"}]"#).unwrap(),
            )),
        );
        assert!(!app.list_view().has_filter());
        assert_eq!(app.list_view().visible_len(), 1);
        assert_eq!(app.list_view().selected(), Some(0));
    }

    #[test]
    fn test_tick_advances_spinner() {
        let mut app = App::new(&profile());
        let before = app.loading().text();
        app.update(Event::Tick).unwrap();
        assert_ne!(app.loading().text(), before);
        app.update(Event::Resize(80, 24)).unwrap();
    }
}
