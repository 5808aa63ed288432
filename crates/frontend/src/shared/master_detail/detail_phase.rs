/// Open/close lifecycle of the detail region.
///
/// ```text
///            is_open=true              enter done
///   Closed ───────────────▶ Opening ─────────────▶ Open
///     ▲                       │  ▲                  │
///     │ exit done  is_open=false │ is_open=true     │ is_open=false
///     │                       ▼  │                  ▼
///     └───────────────────── Closing ◀──────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
pub enum DetailPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl DetailPhase {
    /// Target phase after the caller's `is_open` changed. Repeating the same
    /// request is a no-op.
    pub fn requested(self, is_open: bool) -> Self {
        match (self, is_open) {
            (DetailPhase::Closed | DetailPhase::Closing, true) => DetailPhase::Opening,
            (DetailPhase::Opening | DetailPhase::Open, false) => DetailPhase::Closing,
            (phase, _) => phase,
        }
    }

    /// Phase after the running enter/exit transition finished.
    pub fn settled(self) -> Self {
        match self {
            DetailPhase::Opening => DetailPhase::Open,
            DetailPhase::Closing => DetailPhase::Closed,
            phase => phase,
        }
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, DetailPhase::Opening | DetailPhase::Closing)
    }

    /// Detail content is mounted (entering, shown or leaving)
    pub fn is_mounted(self) -> bool {
        !matches!(self, DetailPhase::Closed)
    }

    /// Detail is (becoming) the focus: Opening or Open
    pub fn is_expanded(self) -> bool {
        matches!(self, DetailPhase::Opening | DetailPhase::Open)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DetailPhase::Closed => "closed",
            DetailPhase::Opening => "opening",
            DetailPhase::Open => "open",
            DetailPhase::Closing => "closing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DetailPhase::*;
    use super::*;

    #[test]
    fn test_open_request() {
        assert_eq!(Closed.requested(true), Opening);
        assert_eq!(Closing.requested(true), Opening);
        assert_eq!(Opening.requested(true), Opening);
        assert_eq!(Open.requested(true), Open);
    }

    #[test]
    fn test_close_request() {
        assert_eq!(Open.requested(false), Closing);
        assert_eq!(Opening.requested(false), Closing);
        assert_eq!(Closing.requested(false), Closing);
        assert_eq!(Closed.requested(false), Closed);
    }

    #[test]
    fn test_settling() {
        assert_eq!(Opening.settled(), Open);
        assert_eq!(Closing.settled(), Closed);
        assert_eq!(Open.settled(), Open);
        assert_eq!(Closed.settled(), Closed);
    }

    #[test]
    fn test_predicates() {
        assert!(!Closed.is_mounted());
        assert!(Closing.is_mounted());
        assert!(Opening.is_expanded() && Open.is_expanded());
        assert!(!Closing.is_expanded());
        assert!(Opening.is_transitioning() && Closing.is_transitioning());
        assert!(!Open.is_transitioning());
    }
}
