//! Reusable UI components.

mod filter_bar;
mod help;
mod loading;
mod notification;
mod status_bar;

pub use filter_bar::{filter_line, render_filter_bar, RowFilter};
pub use help::{help_lines, render_help};
pub use loading::LoadingIndicator;
pub use notification::{
    Notification, NotificationManager, NotificationType, ERROR_TOAST_DURATION,
};
pub use status_bar::StatusBar;
