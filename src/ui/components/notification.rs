//! Toast notifications.
//!
//! Toasts stack in the bottom-right corner above the status bar and expire
//! on their own; [`NotificationManager::tick`] drops expired ones.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// How long error toasts stay up.
pub const ERROR_TOAST_DURATION: Duration = Duration::from_secs(5);

const INFO_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Widest a toast is drawn, borders included.
const MAX_TOAST_WIDTH: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Error,
}

impl NotificationType {
    /// Glyph shown before the message.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Error => "✗",
        }
    }

    /// Accent color for the toast border and icon.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Info => Color::Blue,
            NotificationType::Error => Color::Red,
        }
    }
}

/// A single toast.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Notification {
    /// Create a toast that expires after `duration`.
    pub fn new(
        message: impl Into<String>,
        notification_type: NotificationType,
        duration: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration,
        }
    }

    /// An info toast with the default lifetime.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info, INFO_TOAST_DURATION)
    }

    /// An error toast that stays up for `ERROR_TOAST_DURATION`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error, ERROR_TOAST_DURATION)
    }

    /// Whether the toast has outlived its duration.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    /// Height needed at `inner_width`, borders included.
    fn height(&self, inner_width: u16) -> u16 {
        let text_width = self.message.width() + 2;
        let inner = usize::from(inner_width.max(1));
        let lines = (text_width + inner - 1) / inner;
        u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2)
    }
}

/// The visible toast stack.
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::with_max_visible(3)
    }

    /// Create an empty stack showing at most `max_visible` toasts.
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible,
        }
    }

    /// Add a toast. Repeating the newest message restarts its timer instead
    /// of stacking a copy.
    pub fn push(&mut self, notification: Notification) {
        if let Some(last) = self.notifications.back_mut() {
            if last.message == notification.message
                && last.notification_type == notification.notification_type
            {
                *last = notification;
                return;
            }
        }
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    /// Push an info toast.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::info(message));
    }

    /// Push an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    /// Drop expired toasts.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Whether no toasts are live.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Number of live toasts.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Live toasts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Draw the stack in the bottom-right of `area`, newest lowest.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() || area.width < 8 || area.height < 3 {
            return;
        }

        let width = MAX_TOAST_WIDTH.min(area.width.saturating_sub(2));
        let inner_width = width.saturating_sub(4);
        let x = area.x + area.width.saturating_sub(width + 1);
        let mut bottom = area.y + area.height;

        for notification in self.notifications.iter().rev() {
            let height = notification.height(inner_width);
            if bottom < area.y + height {
                break;
            }
            bottom -= height;
            render_notification(notification, frame, Rect::new(x, bottom, width, height));
        }
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.notification_type.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", notification.notification_type.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.as_str(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}
