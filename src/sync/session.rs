// SPDX-FileCopyrightText: 2026 The Thetis Authors
// SPDX-License-Identifier: LicenseRef-Thetis-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thetis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Async driver for one editing session.
//!
//! A single task owns the [`SyncController`]. It waits for whichever comes first: the next view
//! intent or the typing-guard deadline. The sleep is rebuilt from the controller's current deadline
//! on every turn, so a new keystroke implicitly cancels the previous timer. After each handled
//! event the task publishes a fresh [`Snapshot`].

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::Instant;

use super::{Snapshot, SyncController, ViewIntent};

const INTENT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is closed")]
    Closed,
    #[error("session task failed: {0}")]
    Join(#[from] JoinError),
}

/// Client side of a running session.
#[derive(Debug)]
pub struct SessionHandle {
    intents: mpsc::Sender<ViewIntent>,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<SyncController>,
}

impl SessionHandle {
    pub async fn send(&self, intent: ViewIntent) -> Result<(), SessionError> {
        self.intents
            .send(intent)
            .await
            .map_err(|_| SessionError::Closed)
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Stops accepting intents, lets the task drain its queue and returns the controller.
    pub async fn close(self) -> Result<SyncController, SessionError> {
        let Self { intents, task, .. } = self;
        drop(intents);
        Ok(task.await?)
    }
}

/// Spawns the session task on the current tokio runtime.
pub fn spawn(controller: SyncController) -> SessionHandle {
    let (intent_tx, intent_rx) = mpsc::channel(INTENT_QUEUE_CAPACITY);
    let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
    let task = tokio::spawn(run(controller, intent_rx, snapshot_tx));
    SessionHandle {
        intents: intent_tx,
        snapshots: snapshot_rx,
        task,
    }
}

/// Runs the session loop until the intent channel closes.
pub async fn run(
    mut controller: SyncController,
    mut intents: mpsc::Receiver<ViewIntent>,
    snapshots: watch::Sender<Snapshot>,
) -> SyncController {
    tracing::info!("sync session started");

    loop {
        let deadline = controller.typing_deadline();
        tokio::select! {
            intent = intents.recv() => {
                let Some(intent) = intent else {
                    break;
                };
                controller.dispatch(intent, Instant::now());
            }
            () = sleep_until_deadline(deadline) => {
                controller.typing_elapsed(Instant::now());
            }
        }
        snapshots.send_replace(controller.snapshot());
    }

    tracing::info!(rev = controller.graph().rev(), "sync session stopped");
    controller
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::SyncConfig;
    use crate::format::mermaid::export_flowchart;
    use crate::model::{sample_graph, NodeKind, Point};
    use crate::sync::{SyncController, SyncState, ViewIntent};

    use super::spawn;

    const TYPED: &str = "graph TD\nA[Start]\nB[Process]\nA --> B\n";

    fn move_a(x: f64, y: f64) -> ViewIntent {
        ViewIntent::ShapeMoved {
            node_id: "A".to_owned(),
            x,
            y,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn typing_guard_holds_text_until_debounce_elapses() {
        let controller = SyncController::with_graph(SyncConfig::default(), sample_graph());
        let session = spawn(controller);
        let mut updates = session.subscribe();

        let typed = ViewIntent::TextChanged {
            text: TYPED.to_owned(),
        };
        session.send(typed).await.expect("send");
        updates.changed().await.expect("snapshot");
        assert_eq!(session.snapshot().state, SyncState::Typing);
        assert_eq!(session.snapshot().nodes.len(), 2);

        session.send(move_a(30.0, 40.0)).await.expect("send");
        updates.changed().await.expect("snapshot");
        let snapshot = session.snapshot();
        assert_eq!(snapshot.text, TYPED);
        let position = snapshot.node("A").map(|n| n.position);
        assert_eq!(position, Some(Point::new(30.0, 40.0)));

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SyncState::Idle);
        assert_eq!(snapshot.text, TYPED);

        session.send(move_a(50.0, 40.0)).await.expect("send");

        let controller = session.close().await.expect("close");
        assert_eq!(controller.text(), export_flowchart(controller.graph()));
        assert_ne!(controller.text(), TYPED);
    }

    #[tokio::test(start_paused = true)]
    async fn keystrokes_within_debounce_rearm_the_guard() {
        let session = spawn(SyncController::default());
        let mut updates = session.subscribe();

        for step in 0..3 {
            let text = format!("graph TD\nA[v{step}]\n");
            let intent = ViewIntent::TextChanged { text };
            session.send(intent).await.expect("send");
            updates.changed().await.expect("snapshot");
            tokio::time::sleep(Duration::from_millis(600)).await;
            assert_eq!(session.snapshot().state, SyncState::Typing, "step {step}");
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(session.snapshot().state, SyncState::Idle);
        assert_eq!(session.snapshot().text, "graph TD\nA[v2]\n");
    }

    #[tokio::test]
    async fn close_returns_controller_after_draining_intents() {
        let session = spawn(SyncController::default());
        let dropped = ViewIntent::ShapeDropped {
            kind: NodeKind::Rectangle,
            x: 0.0,
            y: 0.0,
        };
        session.send(dropped).await.expect("send");

        let controller = session.close().await.expect("close");
        assert_eq!(controller.graph().nodes().len(), 1);
        assert_eq!(controller.state(), SyncState::Idle);
    }
}
