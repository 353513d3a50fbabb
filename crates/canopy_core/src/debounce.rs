//! Coalescing of rapid events into at most one emission per window.

/// Emits at most one value per `window_ms`; values arriving inside the window
/// replace each other and the latest one is delivered by [`Debouncer::flush`].
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    window_ms: f64,
    last_emit_ms: Option<f64>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            last_emit_ms: None,
            pending: None,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Offer a value at `now_ms`. Returns it immediately if the window has
    /// elapsed since the last emission, otherwise keeps it as pending.
    pub fn push(&mut self, now_ms: f64, value: T) -> Option<T> {
        if self.is_open(now_ms) {
            self.last_emit_ms = Some(now_ms);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Deliver the pending value once its window has elapsed.
    pub fn flush(&mut self, now_ms: f64) -> Option<T> {
        if self.pending.is_some() && self.is_open(now_ms) {
            self.last_emit_ms = Some(now_ms);
            return self.pending.take();
        }
        None
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending value and reopen the window.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_emit_ms = None;
    }

    fn is_open(&self, now_ms: f64) -> bool {
        match self.last_emit_ms {
            Some(last) => now_ms - last >= self.window_ms,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_value_passes_through() {
        let mut d = Debouncer::new(50.0);
        assert_eq!(d.push(0.0, 1), Some(1));
    }

    #[test]
    fn burst_inside_window_keeps_latest() {
        let mut d = Debouncer::new(50.0);
        assert_eq!(d.push(0.0, 1), Some(1));
        assert_eq!(d.push(10.0, 2), None);
        assert_eq!(d.push(20.0, 3), None);
        assert_eq!(d.flush(30.0), None);
        assert_eq!(d.flush(55.0), Some(3));
        assert!(!d.has_pending());
    }

    #[test]
    fn reset_reopens_window() {
        let mut d = Debouncer::new(50.0);
        d.push(0.0, 1);
        d.push(5.0, 2);
        d.reset();
        assert_eq!(d.push(6.0, 3), Some(3));
    }
}
