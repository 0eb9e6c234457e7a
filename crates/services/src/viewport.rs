//! Seam to the host's scroll controller.

use lesson_core::model::BlockId;
use tokio::sync::mpsc;

/// Capability to move the viewport.
pub trait Viewport: Send + Sync {
    fn scroll_into_view(&self, block: BlockId);
}

/// Viewport for headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopViewport;

impl Viewport for NoopViewport {
    fn scroll_into_view(&self, _block: BlockId) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportCommand {
    ScrollIntoView(BlockId),
}

/// Forwards scroll requests to a receiver drained by the presentation layer.
#[derive(Debug, Clone)]
pub struct ChannelViewport {
    tx: mpsc::UnboundedSender<ViewportCommand>,
}

impl ChannelViewport {
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ViewportCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Viewport for ChannelViewport {
    fn scroll_into_view(&self, block: BlockId) {
        if self.tx.send(ViewportCommand::ScrollIntoView(block)).is_err() {
            tracing::debug!(%block, "viewport receiver gone; scroll dropped");
        }
    }
}
