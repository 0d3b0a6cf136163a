//! Terminal rendering: the level views and the widgets drawn around them.

mod components;
mod views;

pub use components::{
    filter_line, help_lines, render_filter_bar, render_help, LoadingIndicator, Notification,
    NotificationManager, NotificationType, RowFilter, StatusBar, ERROR_TOAST_DURATION,
};
pub use views::{DetailView, ListView};
