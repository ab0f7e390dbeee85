use std::time::Duration;
use std::time::Instant;

/// Default quiescence window for search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shortest and longest quiescence windows a search box accepts.
pub const SEARCH_DEBOUNCE_MIN: Duration = Duration::from_millis(300);
pub const SEARCH_DEBOUNCE_MAX: Duration = Duration::from_millis(500);

/// Coalesces a burst of values into the last one, released once input has been quiet for
/// `delay`.
///
/// Nothing runs on its own: the owner calls [`Debouncer::poll`] from its event loop, and
/// can size its wait with [`Debouncer::time_until_due`]. Dropping the debouncer discards
/// any pending value.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Queues `value`, replacing any pending one and re-arming the timer from `now`.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Releases the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, due)) if now >= due => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Releases the pending value immediately, regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, due)| due.saturating_duration_since(now))
    }
}

/// Raw and applied search text.
///
/// `raw` tracks every keystroke; `effective` only changes when the debounced value
/// settles, which is the only moment a filter pass is needed.
#[derive(Clone, Debug)]
pub struct SearchState {
    raw: String,
    effective: String,
    debouncer: Debouncer<String>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchState {
    pub fn new(delay: Duration) -> Self {
        Self {
            raw: String::new(),
            effective: String::new(),
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn effective(&self) -> &str {
        &self.effective
    }

    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn set_raw(&mut self, raw: impl Into<String>, now: Instant) {
        self.raw = raw.into();
        self.debouncer.push(self.raw.clone(), now);
    }

    /// Applies the settled query. Returns `true` when the effective query changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(q) => self.apply(q),
            None => false,
        }
    }

    /// Sets raw and effective at once, dropping any pending keystrokes.
    pub fn apply_now(&mut self, query: impl Into<String>) -> bool {
        self.debouncer.cancel();
        let q = query.into();
        self.raw = q.clone();
        self.apply(q)
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }

    pub fn cancel(&mut self) {
        self.debouncer.cancel();
    }

    fn apply(&mut self, q: String) -> bool {
        if q == self.effective {
            return false;
        }
        self.effective = q;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn releases_only_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.push("a", t0);
        assert_eq!(d.poll(t0 + 299 * MS), None);
        assert_eq!(d.poll(t0 + 300 * MS), Some("a"));
        assert_eq!(d.poll(t0 + 900 * MS), None);
    }

    #[test]
    fn burst_yields_only_last_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.push("a", t0);
        d.push("ab", t0 + 100 * MS);
        d.push("abc", t0 + 200 * MS);
        assert_eq!(d.poll(t0 + 350 * MS), None);
        assert_eq!(d.poll(t0 + 500 * MS), Some("abc"));
        assert!(!d.is_pending());
    }

    #[test]
    fn cancel_discards_pending_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.push(1, t0);
        d.cancel();
        assert_eq!(d.poll(t0 + Duration::from_secs(5)), None);
        assert_eq!(d.time_until_due(t0), None);
    }

    #[test]
    fn reports_remaining_time() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.push((), t0);
        assert_eq!(d.time_until_due(t0 + 100 * MS), Some(200 * MS));
        assert_eq!(d.time_until_due(t0 + 400 * MS), Some(Duration::ZERO));
    }

    #[test]
    fn search_state_applies_settled_query_once() {
        let t0 = Instant::now();
        let mut s = SearchState::new(300 * MS);
        s.set_raw("a", t0);
        s.set_raw("a.", t0 + 50 * MS);
        assert_eq!(s.raw(), "a.");
        assert_eq!(s.effective(), "");
        assert!(!s.tick(t0 + 200 * MS));
        assert!(s.tick(t0 + 350 * MS));
        assert_eq!(s.effective(), "a.");
        assert!(!s.tick(t0 + 1000 * MS));
    }

    #[test]
    fn settling_on_same_query_is_not_a_change() {
        let t0 = Instant::now();
        let mut s = SearchState::new(300 * MS);
        s.set_raw("x", t0);
        s.set_raw("", t0 + 10 * MS);
        assert!(!s.tick(t0 + 400 * MS));
    }
}
