//! Background tasks for API calls.
//!
//! The main loop never awaits the network. It asks the [`TaskSpawner`] to
//! run a request on the tokio runtime, keeps drawing and handling keys, and
//! picks up the [`ApiMessage`] with `try_recv()` when the task finishes.
//!
//! Navigation fetches are cancel-and-replace: starting one aborts the
//! previous one if it is still running. Results that slip through anyway
//! are rejected by their [`FetchTicket`].

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::types::CurrentUser;
use crate::api::{ApiError, JiraClient};
use crate::config::Profile;
use crate::error::AppError;
use crate::nav::{FetchRequest, FetchResult, FetchTicket};

/// Messages sent from background tasks to the main event loop.
///
/// Errors arrive already worded for the user; the full error is logged by
/// the task.
#[derive(Debug)]
pub enum ApiMessage {
    /// Client construction and identity check.
    ClientConnected(Result<(JiraClient, CurrentUser), String>),

    /// A navigation fetch finished.
    Fetched {
        ticket: FetchTicket,
        result: Result<FetchResult, String>,
    },
}

/// Run one navigation request against the API.
pub async fn fetch(client: &JiraClient, request: &FetchRequest) -> Result<FetchResult, ApiError> {
    Ok(match request {
        FetchRequest::Boards => FetchResult::Boards(client.get_boards().await?),
        FetchRequest::Sprints { board_id } => {
            FetchResult::Sprints(client.get_active_sprints(board_id).await?)
        }
        FetchRequest::Issues { sprint_id } => {
            FetchResult::Issues(client.get_sprint_issues(sprint_id).await?)
        }
        FetchRequest::IssueDetail { issue_id } => {
            FetchResult::IssueDetail(Box::new(client.get_issue(issue_id).await?))
        }
    })
}

/// Spawns API tasks that report back over a channel.
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<ApiMessage>,
    /// The in-flight navigation fetch.
    current: Option<(FetchTicket, JoinHandle<()>)>,
}

impl TaskSpawner {
    /// Create a spawner that reports on `tx`.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { tx, current: None }
    }

    /// Build a client for `profile` and check the connection.
    pub fn spawn_connect(&self, profile: Profile, max_retries: u32) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = async {
                let client = JiraClient::new(&profile)?.with_max_retries(max_retries);
                let user = client.connect().await?;
                Ok::<_, ApiError>((client, user))
            }
            .await
            .map_err(|e| {
                warn!(error = %e, "Connection check failed");
                AppError::from(e).user_message()
            });
            let _ = tx.send(ApiMessage::ClientConnected(result));
        });
    }

    /// Start a navigation fetch, aborting the previous one.
    pub fn spawn_fetch(&mut self, client: &JiraClient, ticket: FetchTicket, request: FetchRequest) {
        self.cancel();

        debug!(?ticket, %request, "Spawning fetch");
        let tx = self.tx.clone();
        let client = client.clone();
        let handle = tokio::spawn(async move {
            let result = fetch(&client, &request).await.map_err(|e| {
                warn!(%request, error = %e, "Fetch failed");
                AppError::from(e).user_message()
            });
            let _ = tx.send(ApiMessage::Fetched { ticket, result });
        });
        self.current = Some((ticket, handle));
    }

    /// Abort the in-flight navigation fetch, if any.
    pub fn cancel(&mut self) {
        if let Some((ticket, handle)) = self.current.take() {
            if !handle.is_finished() {
                debug!(?ticket, "Aborting superseded fetch");
                handle.abort();
            }
        }
    }

    /// Ticket of the most recently spawned navigation fetch.
    pub fn current_ticket(&self) -> Option<FetchTicket> {
        self.current.as_ref().map(|(ticket, _)| *ticket)
    }
}

impl Drop for TaskSpawner {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Create the channel and a spawner that sends into it.
pub fn create_task_channel() -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner) {
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Level;

    fn closed_port_client() -> JiraClient {
        JiraClient::with_credentials("http://127.0.0.1:1", "a@b.c", "token")
            .unwrap()
            .with_max_retries(1)
    }

    fn ticket(level: Level, generation: u64) -> FetchTicket {
        FetchTicket { level, generation }
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported_with_ticket() {
        let (mut rx, mut spawner) = create_task_channel();
        let client = closed_port_client();

        spawner.spawn_fetch(&client, ticket(Level::BoardList, 1), FetchRequest::Boards);

        match rx.recv().await {
            Some(ApiMessage::Fetched { ticket: got, result }) => {
                assert_eq!(got, ticket(Level::BoardList, 1));
                let message = tokio_test::assert_err!(result);
                assert_eq!(message, "Connection failed. Check your network.");
            }
            other => panic!("Expected Fetched, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_new_fetch_replaces_current() {
        let (_rx, mut spawner) = create_task_channel();
        let client = closed_port_client();

        spawner.spawn_fetch(&client, ticket(Level::BoardList, 1), FetchRequest::Boards);
        spawner.spawn_fetch(
            &client,
            ticket(Level::SprintList, 2),
            FetchRequest::Sprints {
                board_id: "7".to_string(),
            },
        );

        assert_eq!(spawner.current_ticket(), Some(ticket(Level::SprintList, 2)));
        spawner.cancel();
        assert_eq!(spawner.current_ticket(), None);
    }
}
