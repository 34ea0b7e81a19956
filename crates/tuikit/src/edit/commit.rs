//! The stream of committed lines

use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::UnboundedReceiver;

/// Lines committed with Return, in order. Unread commits queue up.
#[derive(Debug)]
pub struct CommitStream {
    rx: UnboundedReceiver<String>,
}

impl CommitStream {
    pub(crate) fn new(rx: UnboundedReceiver<String>) -> Self {
        Self { rx }
    }

    /// Wait for the next commit; `None` once the edit box is gone and the
    /// queue is drained
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// The next queued commit, without waiting
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}

impl Stream for CommitStream {
    type Item = String;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
