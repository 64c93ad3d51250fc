use std::time::{Duration, Instant};

/// Idle period after the last keystroke before the indicator is cleared
pub const DEFAULT_TYPING_IDLE: Duration = Duration::from_millis(1500);

/// Typing flag with a single pending deadline.
/// Touching it again replaces the deadline instead of adding another one.
#[derive(Debug, Clone)]
pub struct TypingDebounce {
    idle: Duration,
    deadline: Option<Instant>,
}

impl Default for TypingDebounce {
    fn default() -> Self {
        TypingDebounce::new(DEFAULT_TYPING_IDLE)
    }
}

impl TypingDebounce {
    pub fn new(idle: Duration) -> Self {
        TypingDebounce {
            idle,
            deadline: None,
        }
    }

    pub fn is_typing(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the flag will clear, if it is set
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn idle(&self) -> Duration {
        self.idle
    }

    /// Sets the flag and reschedules the deadline from `now`
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.idle);
    }

    /// Clears the flag if the deadline has passed. Returns true when it was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_after_idle_period() {
        let start = Instant::now();
        let mut debounce = TypingDebounce::new(Duration::from_millis(100));
        debounce.touch(start);

        assert!(!debounce.expire(start + Duration::from_millis(99)));
        assert!(debounce.is_typing());
        assert!(debounce.expire(start + Duration::from_millis(100)));
        assert!(!debounce.is_typing());
    }

    #[test]
    fn test_touch_postpones_expiry() {
        let start = Instant::now();
        let mut debounce = TypingDebounce::new(Duration::from_millis(100));
        debounce.touch(start);
        debounce.touch(start + Duration::from_millis(80));

        assert!(!debounce.expire(start + Duration::from_millis(150)));
        assert_eq!(debounce.deadline(), Some(start + Duration::from_millis(180)));
        assert!(debounce.expire(start + Duration::from_millis(180)));
    }

    #[test]
    fn test_clear_cancels_deadline() {
        let start = Instant::now();
        let mut debounce = TypingDebounce::default();
        debounce.touch(start);
        debounce.clear();

        assert!(debounce.deadline().is_none());
        assert!(!debounce.expire(start + DEFAULT_TYPING_IDLE));
    }
}
