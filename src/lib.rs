//! sprintdeck - drill down through Jira boards, sprints and issues from the
//! terminal.
//!
//! The binary wires these modules to a crossterm terminal; everything here is
//! usable without one.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod markup;
pub mod nav;
pub mod tasks;
pub mod ui;
pub mod view;
