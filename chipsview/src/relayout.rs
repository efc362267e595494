//! Deferred relayout requests.
//!
//! A relayout asked for before the container has a width cannot run. Instead
//! of re-invoking itself, the view parks the request here and retries it when
//! the host reports the next frame through
//! [`ChipsView::on_frame`](crate::ChipsView::on_frame). Requests coalesce, so
//! the queue never holds more than one entry and the stack depth stays
//! constant however long the width takes to appear.
use tracing::{debug, warn};

/// A pending relayout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayoutRequest {
    /// Move the text cursor to the end once the layout has been applied.
    pub move_cursor: bool,
}

/// Holds at most one coalesced [`RelayoutRequest`].
#[derive(Debug, Clone, Default)]
pub struct RelayoutQueue {
    pending: Option<RelayoutRequest>,
    deferrals: u32,
    warn_after: u32,
}

impl RelayoutQueue {
    /// Creates a queue that warns once a request has been deferred
    /// `warn_after` times in a row.
    pub fn new(warn_after: u32) -> Self {
        Self {
            pending: None,
            deferrals: 0,
            warn_after,
        }
    }

    /// Adds a request, merging it with any pending one.
    pub fn request(&mut self, move_cursor: bool) {
        let merged = match self.pending {
            Some(pending) => RelayoutRequest {
                move_cursor: pending.move_cursor || move_cursor,
            },
            None => RelayoutRequest { move_cursor },
        };
        self.pending = Some(merged);
    }

    /// Whether a request is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Removes and returns the pending request.
    pub fn take(&mut self) -> Option<RelayoutRequest> {
        self.pending.take()
    }

    /// Puts back a request that could not run yet.
    pub fn defer(&mut self, request: RelayoutRequest) {
        self.deferrals = self.deferrals.saturating_add(1);
        debug!(
            "container width unknown; relayout deferred (attempt {})",
            self.deferrals
        );
        if self.deferrals == self.warn_after {
            warn!(
                "relayout attempted {} times without a container width; is the container ever measured?",
                self.deferrals
            );
        }
        self.request(request.move_cursor);
    }

    /// Records that a relayout ran.
    pub fn complete(&mut self) {
        self.deferrals = 0;
    }

    /// Failed relayout attempts since the last completed relayout. Every
    /// mutation made while the width is unknown counts, as does every frame
    /// retry.
    pub fn deferrals(&self) -> u32 {
        self.deferrals
    }
}

#[cfg(test)]
mod tests {
    use std::{io, sync::Arc};

    use parking_lot::Mutex;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn warning_reports_attempts_once_at_threshold() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut queue = RelayoutQueue::new(2);
            // Two mutations before the first frame, then two frame retries.
            for _ in 0..4 {
                queue.request(false);
                let request = queue.take().expect("pending");
                queue.defer(request);
            }
            assert_eq!(queue.deferrals(), 4);
        });

        let output = String::from_utf8_lossy(&logs.0.lock()).into_owned();
        assert_eq!(output.matches("WARN").count(), 1, "{output}");
        assert!(output.contains("attempted 2 times"), "{output}");
        assert!(!output.contains("frames"), "{output}");
    }

    #[test]
    fn requests_coalesce_and_or_the_cursor_flag() {
        let mut queue = RelayoutQueue::new(8);
        queue.request(false);
        queue.request(true);
        queue.request(false);

        assert_eq!(queue.take(), Some(RelayoutRequest { move_cursor: true }));
        assert_eq!(queue.take(), None);
    }

    #[test]
    fn deferral_counts_until_completion() {
        let mut queue = RelayoutQueue::new(8);
        queue.request(true);

        for attempt in 1..=3 {
            let request = queue.take().expect("pending");
            queue.defer(request);
            assert_eq!(queue.deferrals(), attempt);
        }
        assert!(queue.is_pending());

        queue.take();
        queue.complete();
        assert_eq!(queue.deferrals(), 0);
        assert!(!queue.is_pending());
    }

    #[test]
    fn deferred_request_merges_with_new_one() {
        let mut queue = RelayoutQueue::new(8);
        queue.request(true);
        let request = queue.take().expect("pending");
        queue.request(false);
        queue.defer(request);
        assert_eq!(queue.take(), Some(RelayoutRequest { move_cursor: true }));
    }
}
