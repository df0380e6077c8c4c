//! View-side bookkeeping for data that is fetched and refetched.
//!
//! - [`RequestSequencer`] numbers requests so late responses can be told apart.
//! - [`LatestSlot`] holds the value from the newest response seen so far.
//! - [`Widget`] adds a loading flag and keeps stale data when a fetch fails.
//! - [`ListView`] pairs a list widget with guarded write-then-refetch.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use fintrack_shared::{AppError, AppResult};

/// Sequence number of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// Raw sequence number.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Hands out strictly increasing request tickets.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: AtomicU64,
}

impl RequestSequencer {
    /// Creates a sequencer starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Holds the value of the newest response accepted so far.
///
/// A response carrying an older ticket than the one already applied is
/// dropped, so a slow early request can never overwrite a newer result.
#[derive(Debug)]
pub struct LatestSlot<T> {
    applied: Option<RequestTicket>,
    value: Option<T>,
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self {
            applied: None,
            value: None,
        }
    }
}

impl<T> LatestSlot<T> {
    /// Whether a response for `ticket` would still be accepted.
    #[must_use]
    pub fn accepts(&self, ticket: RequestTicket) -> bool {
        self.applied.is_none_or(|applied| ticket > applied)
    }

    /// Stores `value` if `ticket` is newer than the last applied one.
    /// Returns whether it was stored.
    pub fn offer(&mut self, ticket: RequestTicket, value: T) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.applied = Some(ticket);
        self.value = Some(value);
        true
    }

    /// Marks `ticket` as seen and drops the value.
    fn clear(&mut self, ticket: RequestTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.applied = Some(ticket);
        self.value = None;
        true
    }

    /// Marks `ticket` as seen without changing the value.
    fn settle(&mut self, ticket: RequestTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.applied = Some(ticket);
        true
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Ticket of the response the value came from.
    #[must_use]
    pub const fn applied(&self) -> Option<RequestTicket> {
        self.applied
    }
}

/// A fetched value with a loading flag and stale-on-error behavior.
#[derive(Debug)]
pub struct Widget<T> {
    name: &'static str,
    sequencer: RequestSequencer,
    latest_issued: Option<RequestTicket>,
    slot: LatestSlot<T>,
    last_error: Option<AppError>,
}

impl<T> Widget<T> {
    /// Creates an empty widget. `name` is used in logs.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            sequencer: RequestSequencer::new(),
            latest_issued: None,
            slot: LatestSlot::default(),
            last_error: None,
        }
    }

    /// Starts a fetch and returns its ticket. The widget is loading until
    /// the newest ticket is finished.
    pub fn begin(&mut self) -> RequestTicket {
        let ticket = self.sequencer.issue();
        self.latest_issued = Some(ticket);
        ticket
    }

    /// Applies the outcome of the fetch started with `ticket`.
    ///
    /// Outcomes of superseded fetches are discarded. A failed fetch records
    /// the error; it keeps the previous value only for failures that
    /// [`AppError::keeps_stale_data`] allows. Returns whether the outcome
    /// was applied.
    pub fn finish(&mut self, ticket: RequestTicket, result: AppResult<T>) -> bool {
        match result {
            Ok(value) => {
                if !self.slot.offer(ticket, value) {
                    tracing::debug!(widget = self.name, ticket = ticket.0, "discarding stale response");
                    return false;
                }
                self.last_error = None;
                true
            }
            Err(error) => {
                let keep = error.keeps_stale_data();
                let applied = if keep {
                    self.slot.settle(ticket)
                } else {
                    self.slot.clear(ticket)
                };
                if !applied {
                    tracing::debug!(widget = self.name, ticket = ticket.0, %error, "discarding stale failure");
                    return false;
                }
                tracing::error!(
                    widget = self.name,
                    code = error.error_code(),
                    %error,
                    kept_previous = keep && self.slot.get().is_some(),
                    "fetch failed"
                );
                self.last_error = Some(error);
                true
            }
        }
    }

    /// Runs `fetch` as a new request and applies its outcome.
    pub async fn load<F>(&mut self, fetch: F) -> bool
    where
        F: Future<Output = AppResult<T>>,
    {
        let ticket = self.begin();
        let result = fetch.await;
        self.finish(ticket, result)
    }

    /// Whether the newest fetch is still outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        match (self.latest_issued, self.slot.applied()) {
            (Some(issued), Some(applied)) => issued > applied,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Latest successfully fetched value.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Error of the newest fetch, if it failed.
    #[must_use]
    pub const fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// Whether the shown data predates a failed refresh.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.last_error.is_some() && self.slot.get().is_some()
    }
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A list that is refetched after every write.
///
/// While a write-then-refetch pair is running, further writes are refused
/// with `AppError::Busy`.
#[derive(Debug)]
pub struct ListView<T> {
    items: Mutex<Widget<Vec<T>>>,
    busy: AtomicBool,
}

impl<T> ListView<T> {
    /// Creates an empty list view. `name` is used in logs and errors.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            items: Mutex::new(Widget::new(name)),
            busy: AtomicBool::new(false),
        }
    }

    fn with_items<R>(&self, f: impl FnOnce(&mut Widget<Vec<T>>) -> R) -> R {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *items)
    }

    /// Whether a write-then-refetch pair is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Whether the newest fetch is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.with_items(|w| w.is_loading())
    }

    /// Whether the newest fetch failed.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.with_items(|w| w.last_error().is_some())
    }

    /// Fetches the list and applies the result.
    pub async fn refresh<F>(&self, fetch: F) -> bool
    where
        F: Future<Output = AppResult<Vec<T>>>,
    {
        let ticket = self.with_items(Widget::begin);
        let result = fetch.await;
        self.with_items(|w| w.finish(ticket, result))
    }

    /// Runs `write`, then refetches the list with `refetch`.
    ///
    /// A failed write leaves the list untouched and skips the refetch. A
    /// failed refetch keeps the old list; the write's output is still
    /// returned since the write itself succeeded.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Busy` if another pair is in flight, or the
    /// write's error.
    pub async fn mutate_then_refetch<W, O, F>(&self, write: W, refetch: F) -> AppResult<O>
    where
        W: Future<Output = AppResult<O>>,
        F: Future<Output = AppResult<Vec<T>>>,
    {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            let name = self.with_items(|w| w.name);
            return Err(AppError::Busy(format!("{name} is still saving")));
        }
        let _guard = BusyGuard(&self.busy);

        let output = write.await?;
        self.refresh(refetch).await;
        Ok(output)
    }
}

impl<T: Clone> ListView<T> {
    /// Copy of the current items.
    #[must_use]
    pub fn items(&self) -> Option<Vec<T>> {
        self.with_items(|w| w.data().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error() -> AppError {
        AppError::Server {
            status: 500,
            message: "boom".into(),
        }
    }

    #[test]
    fn test_sequencer_is_increasing() {
        let sequencer = RequestSequencer::new();
        let a = sequencer.issue();
        let b = sequencer.issue();
        assert!(b > a);
        assert_eq!(a.sequence(), 1);
    }

    #[test]
    fn test_latest_slot_discards_older_response() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        let mut slot = LatestSlot::default();

        assert!(slot.offer(second, "new"));
        assert!(!slot.offer(first, "old"));
        assert_eq!(slot.get(), Some(&"new"));
        assert_eq!(slot.applied(), Some(second));
    }

    #[test]
    fn test_widget_out_of_order_responses() {
        let mut widget = Widget::new("comparison");
        let slow = widget.begin();
        let fast = widget.begin();
        assert!(widget.is_loading());

        assert!(widget.finish(fast, Ok(2)));
        assert!(!widget.is_loading());
        assert!(!widget.finish(slow, Ok(1)));
        assert_eq!(widget.data(), Some(&2));
    }

    #[test]
    fn test_widget_keeps_stale_data_on_error() {
        let mut widget = Widget::new("totals");
        let t = widget.begin();
        widget.finish(t, Ok(vec![1, 2]));

        let t = widget.begin();
        assert!(widget.finish(t, Err(server_error())));

        assert_eq!(widget.data(), Some(&vec![1, 2]));
        assert!(widget.is_stale());
        assert!(!widget.is_loading());
        assert_eq!(widget.last_error().and_then(AppError::status_code), Some(500));

        let t = widget.begin();
        widget.finish(t, Ok(vec![3]));
        assert!(widget.last_error().is_none());
        assert!(!widget.is_stale());
    }

    #[test]
    fn test_widget_drops_data_when_rejected() {
        let mut widget = Widget::new("budgets");
        let t = widget.begin();
        widget.finish(t, Ok(vec![1, 2]));

        let t = widget.begin();
        assert!(widget.finish(t, Err(AppError::Unauthorized("Token expirado".into()))));

        assert_eq!(widget.data(), None);
        assert!(!widget.is_stale());
        assert!(!widget.is_loading());
        assert_eq!(
            widget.last_error().map(AppError::error_code),
            Some("UNAUTHORIZED")
        );
    }

    #[test]
    fn test_stale_failure_does_not_mark_error() {
        let mut widget = Widget::new("movements");
        let old = widget.begin();
        let new = widget.begin();
        widget.finish(new, Ok("fresh"));
        assert!(!widget.finish(old, Err(server_error())));
        assert!(widget.last_error().is_none());
    }

    #[tokio::test]
    async fn test_widget_load() {
        let mut widget = Widget::new("dashboard");
        assert!(widget.load(async { Ok(7) }).await);
        assert_eq!(widget.data(), Some(&7));
    }

    #[tokio::test]
    async fn test_mutate_then_refetch_replaces_list() {
        let view = ListView::new("budgets");
        view.refresh(async { Ok(vec!["a"]) }).await;

        let out = view
            .mutate_then_refetch(async { Ok(42) }, async { Ok(vec!["a", "b"]) })
            .await
            .unwrap();

        assert_eq!(out, 42);
        assert_eq!(view.items(), Some(vec!["a", "b"]));
        assert!(!view.is_busy());
    }

    #[tokio::test]
    async fn test_failed_write_skips_refetch() {
        let view = ListView::new("deposits");
        view.refresh(async { Ok(vec![1]) }).await;
        let refetched = AtomicBool::new(false);

        let result: AppResult<()> = view
            .mutate_then_refetch(async { Err(server_error()) }, async {
                refetched.store(true, Ordering::SeqCst);
                Ok(vec![2])
            })
            .await;

        assert!(matches!(result, Err(AppError::Server { .. })));
        assert!(!refetched.load(Ordering::SeqCst));
        assert_eq!(view.items(), Some(vec![1]));
        assert!(!view.is_busy());
    }

    #[tokio::test]
    async fn test_concurrent_write_is_refused() {
        let view = ListView::<u8>::new("expense types");

        let outer = view
            .mutate_then_refetch(
                async {
                    let inner = view
                        .mutate_then_refetch(async { Ok(()) }, async { Ok(vec![]) })
                        .await;
                    assert!(matches!(inner, Err(AppError::Busy(_))));
                    Ok(())
                },
                async { Ok(vec![9]) },
            )
            .await;

        assert!(outer.is_ok());
        assert_eq!(view.items(), Some(vec![9]));
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_old_list() {
        let view = ListView::new("funds");
        view.refresh(async { Ok(vec!["old"]) }).await;

        let result = view
            .mutate_then_refetch(async { Ok(()) }, async { Err(server_error()) })
            .await;

        assert!(result.is_ok());
        assert_eq!(view.items(), Some(vec!["old"]));
        assert!(view.has_error());
    }
}
