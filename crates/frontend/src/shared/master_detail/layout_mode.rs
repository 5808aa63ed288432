use leptos::prelude::*;

/// Default split-pane breakpoint in logical pixels (`(min-width: 1024px)`)
pub const DEFAULT_BREAKPOINT_PX: f64 = 1024.0;

/// Presentation strategy of a master/detail screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// List and detail side by side (desktop)
    Split,
    /// Detail as a full-screen layer above the list (narrow screens)
    #[default]
    Overlay,
}

impl LayoutMode {
    /// `width >= breakpoint` is split; the threshold belongs to the split side.
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width >= breakpoint {
            LayoutMode::Split
        } else {
            LayoutMode::Overlay
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, LayoutMode::Split)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutMode::Split => "split",
            LayoutMode::Overlay => "overlay",
        }
    }
}

/// CSS media predicate equivalent to the detector's threshold.
pub fn min_width_query(breakpoint: f64) -> String {
    format!("(min-width: {}px)", breakpoint)
}

/// Tracks whether the viewport satisfies a min-width predicate.
///
/// Without a known width (no viewport in the host) it keeps reporting the
/// initial snapshot, which is [`LayoutMode::Overlay`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponsiveModeDetector {
    breakpoint: f64,
    width: Option<f64>,
}

impl ResponsiveModeDetector {
    pub fn new(breakpoint: f64, initial_width: Option<f64>) -> Self {
        Self {
            breakpoint,
            width: initial_width,
        }
    }

    pub fn breakpoint(&self) -> f64 {
        self.breakpoint
    }

    /// Feeds a new viewport width; returns true when the desktop flag flipped.
    pub fn observe(&mut self, width: f64) -> bool {
        let before = self.is_desktop();
        self.width = Some(width);
        before != self.is_desktop()
    }

    /// Resize handler body: the new mode when this width crossed the
    /// breakpoint, `None` otherwise.
    pub fn resized(&mut self, width: f64) -> Option<LayoutMode> {
        self.observe(width).then(|| self.mode())
    }

    pub fn is_desktop(&self) -> bool {
        self.mode().is_split()
    }

    pub fn mode(&self) -> LayoutMode {
        self.width
            .map(|w| LayoutMode::from_width(w, self.breakpoint))
            .unwrap_or_default()
    }
}

/// Current viewport width in CSS pixels, if the host exposes one.
pub fn viewport_width() -> Option<f64> {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
}

/// Reactive layout mode for the current component.
///
/// Registers a single `resize` listener on the window (orientation changes
/// also resize the viewport) and removes it when the owner is disposed.
/// The listener body is `ResponsiveModeDetector::resized`; registration and
/// removal need a browser and are not covered by the native tests.
pub fn use_layout_mode(breakpoint: f64) -> ReadSignal<LayoutMode> {
    let initial = viewport_width();
    if initial.is_none() {
        log::warn!("viewport width unavailable; layout stays {}", LayoutMode::default().as_str());
    }

    let detector = StoredValue::new(ResponsiveModeDetector::new(breakpoint, initial));
    let (mode, set_mode) = signal(detector.with_value(|d| d.mode()));

    let handle = window_event_listener(leptos::ev::resize, move |_| {
        let Some(width) = viewport_width() else {
            return;
        };
        if let Some(next) = detector.try_update_value(|d| d.resized(width)).flatten() {
            log::debug!("layout mode -> {} at {}px", next.as_str(), width);
            set_mode.set(next);
        }
    });
    on_cleanup(move || handle.remove());

    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_closed_on_split_side() {
        assert_eq!(LayoutMode::from_width(1023.9, 1024.0), LayoutMode::Overlay);
        assert_eq!(LayoutMode::from_width(1024.0, 1024.0), LayoutMode::Split);
        assert_eq!(LayoutMode::from_width(1280.0, 1024.0), LayoutMode::Split);
        assert_eq!(LayoutMode::from_width(0.0, 1024.0), LayoutMode::Overlay);
    }

    #[test]
    fn test_all_widths_below_breakpoint_are_overlay() {
        for w in (0..1024).step_by(7) {
            assert_eq!(LayoutMode::from_width(w as f64, 1024.0), LayoutMode::Overlay);
        }
        for w in (1024..4000).step_by(13) {
            assert_eq!(LayoutMode::from_width(w as f64, 1024.0), LayoutMode::Split);
        }
    }

    #[test]
    fn test_detector_reports_flips_only() {
        let mut d = ResponsiveModeDetector::new(1024.0, Some(1280.0));
        assert!(d.is_desktop());
        assert!(!d.observe(1100.0));
        assert!(d.observe(600.0));
        assert_eq!(d.mode(), LayoutMode::Overlay);
        assert!(!d.observe(700.0));
        assert!(d.observe(1024.0));
        assert!(d.is_desktop());
    }

    #[test]
    fn test_detector_without_viewport_keeps_initial_snapshot() {
        let d = ResponsiveModeDetector::new(1024.0, None);
        assert_eq!(d.mode(), LayoutMode::Overlay);
        assert!(!d.is_desktop());
    }

    #[test]
    fn test_resize_burst_publishes_each_crossing_once() {
        let mut d = ResponsiveModeDetector::new(1024.0, Some(1280.0));
        let published: Vec<LayoutMode> = [1200.0, 1000.0, 900.0, 800.0, 1100.0, 1300.0]
            .into_iter()
            .filter_map(|w| d.resized(w))
            .collect();
        assert_eq!(published, vec![LayoutMode::Overlay, LayoutMode::Split]);
    }

    #[test]
    fn test_media_query_text() {
        assert_eq!(min_width_query(1024.0), "(min-width: 1024px)");
    }
}
