use super::detail_phase::DetailPhase;
use super::layout_mode::LayoutMode;

/// List share of the container while a detail is shown in split mode
pub const SPLIT_LIST_WIDTH_PCT: u8 = 45;

/// Trailing share of the list region given to the placeholder in split mode
/// while nothing is selected
pub const SPLIT_PLACEHOLDER_PCT: u8 = 35;

/// Proof that a transition was started; completing a superseded ticket is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTicket {
    generation: u64,
    phase: DetailPhase,
}

impl TransitionTicket {
    pub fn phase(&self) -> DetailPhase {
        self.phase
    }
}

/// What the view must render for the current mode and phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    pub mode: LayoutMode,
    pub phase: DetailPhase,
    /// Width of the list region in percent of the container
    pub list_width_pct: u8,
    /// List accepts input (hidden under the overlay layer otherwise)
    pub list_interactive: bool,
    /// Detail region is mounted
    pub detail_present: bool,
    /// "Select an item" placeholder occupies the detail area
    pub placeholder: bool,
    /// Trailing share of the list region reserved for the placeholder
    pub placeholder_pct: u8,
    /// Detail is rendered as a full-screen top layer
    pub overlay_layer: bool,
}

/// Headless orchestration of a master/detail screen.
///
/// Owns only transient UI state: the layout mode reported by the detector and
/// the detail phase driven by the caller's `is_open`. Visibility itself stays
/// with the caller; closing always goes through the caller's `on_close`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MasterDetailController {
    mode: LayoutMode,
    phase: DetailPhase,
    generation: u64,
}

impl MasterDetailController {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            phase: DetailPhase::Closed,
            generation: 0,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn phase(&self) -> DetailPhase {
        self.phase
    }

    /// Hard cut to another layout mode. The detail phase is kept as is.
    pub fn set_mode(&mut self, mode: LayoutMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    /// Reacts to the caller's `is_open`. Returns a ticket when an enter or exit
    /// transition starts; the latest request always wins.
    pub fn set_open(&mut self, is_open: bool) -> Option<TransitionTicket> {
        let next = self.phase.requested(is_open);
        if next == self.phase {
            return None;
        }
        self.phase = next;
        self.generation += 1;
        Some(TransitionTicket {
            generation: self.generation,
            phase: next,
        })
    }

    /// Finishes the transition identified by `ticket`. Returns false for a
    /// ticket superseded by a later `set_open`.
    pub fn complete(&mut self, ticket: TransitionTicket) -> bool {
        if ticket.generation != self.generation || ticket.phase != self.phase {
            return false;
        }
        self.phase = self.phase.settled();
        true
    }

    /// Forwards one close gesture to the caller. Never touches the phase: the
    /// caller answers by flipping `is_open`.
    pub fn dismiss(&self, on_close: impl FnOnce()) {
        log::debug!("master-detail: close gesture in {} mode", self.mode.as_str());
        on_close();
    }

    /// Escape closes the detail while it is entering or shown, in either
    /// mode. A dialog on top of the page owns Escape instead.
    pub fn dismisses_on_key(&self, key: &str, dialog_open: bool) -> bool {
        key == "Escape" && !dialog_open && self.phase.is_expanded()
    }

    pub fn layout(&self) -> LayoutPlan {
        let phase = self.phase;
        match self.mode {
            LayoutMode::Split => LayoutPlan {
                mode: self.mode,
                phase,
                list_width_pct: if phase.is_expanded() {
                    SPLIT_LIST_WIDTH_PCT
                } else {
                    100
                },
                list_interactive: true,
                detail_present: phase.is_mounted(),
                placeholder: phase == DetailPhase::Closed,
                placeholder_pct: if phase == DetailPhase::Closed {
                    SPLIT_PLACEHOLDER_PCT
                } else {
                    0
                },
                overlay_layer: false,
            },
            LayoutMode::Overlay => LayoutPlan {
                mode: self.mode,
                phase,
                list_width_pct: 100,
                list_interactive: phase == DetailPhase::Closed,
                detail_present: phase.is_mounted(),
                placeholder: false,
                placeholder_pct: 0,
                overlay_layer: phase.is_mounted(),
            },
        }
    }
}

impl Default for MasterDetailController {
    fn default() -> Self {
        Self::new(LayoutMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::master_detail::layout_mode::ResponsiveModeDetector;
    use std::cell::Cell;

    const BP: f64 = 1024.0;

    fn controller_at(width: f64) -> (ResponsiveModeDetector, MasterDetailController) {
        let detector = ResponsiveModeDetector::new(BP, Some(width));
        let controller = MasterDetailController::new(detector.mode());
        (detector, controller)
    }

    fn open_fully(c: &mut MasterDetailController) {
        let ticket = c.set_open(true).unwrap();
        assert!(c.complete(ticket));
    }

    #[test]
    fn test_initial_state_is_closed() {
        let c = MasterDetailController::default();
        assert_eq!(c.phase(), DetailPhase::Closed);
        assert_eq!(c.mode(), LayoutMode::Overlay);
    }

    #[test]
    fn test_split_closed_shows_full_list_and_placeholder() {
        let (_, c) = controller_at(1280.0);
        let plan = c.layout();
        assert_eq!(plan.mode, LayoutMode::Split);
        assert_eq!(plan.list_width_pct, 100);
        assert!(plan.placeholder);
        assert!(!plan.detail_present);
    }

    #[test]
    fn test_split_closed_reserves_placeholder_share() {
        let (_, c) = controller_at(1280.0);
        let plan = c.layout();
        assert!(plan.placeholder_pct > 0);
        assert!(plan.placeholder_pct < plan.list_width_pct);

        let (_, mut c) = controller_at(1280.0);
        c.set_open(true);
        assert_eq!(c.layout().placeholder_pct, 0);

        let (_, c) = controller_at(600.0);
        assert_eq!(c.layout().placeholder_pct, 0);
    }

    #[test]
    fn test_escape_dismisses_shown_detail() {
        let (mut detector, mut c) = controller_at(600.0);
        assert!(!c.dismisses_on_key("Escape", false));

        let t = c.set_open(true).unwrap();
        assert!(c.dismisses_on_key("Escape", false));
        assert!(!c.dismisses_on_key("Enter", false));
        c.complete(t);
        assert!(c.dismisses_on_key("Escape", false));

        detector.observe(1280.0);
        c.set_mode(detector.mode());
        assert!(c.dismisses_on_key("Escape", false));

        c.set_open(false);
        assert!(!c.dismisses_on_key("Escape", false));
    }

    #[test]
    fn test_escape_left_to_open_dialog() {
        for width in [600.0, 1280.0] {
            let (_, mut c) = controller_at(width);
            c.set_open(true);
            assert!(!c.dismisses_on_key("Escape", true));
        }
    }

    #[test]
    fn test_split_open_narrows_list() {
        let (_, mut c) = controller_at(1280.0);
        let ticket = c.set_open(true).unwrap();
        let opening = c.layout();
        assert!(opening.list_width_pct < 100);
        assert!(opening.detail_present);
        assert!(!opening.placeholder);

        c.complete(ticket);
        let open = c.layout();
        assert_eq!(open.phase, DetailPhase::Open);
        assert_eq!(open.list_width_pct, SPLIT_LIST_WIDTH_PCT);
        assert!(open.detail_present);
    }

    #[test]
    fn test_split_closing_restores_list_while_detail_leaves() {
        let (_, mut c) = controller_at(1280.0);
        open_fully(&mut c);
        c.set_open(false);
        let plan = c.layout();
        assert_eq!(plan.phase, DetailPhase::Closing);
        assert_eq!(plan.list_width_pct, 100);
        assert!(plan.detail_present);
        assert!(!plan.placeholder);
    }

    #[test]
    fn test_overlay_layer_present_iff_not_closed() {
        let (_, mut c) = controller_at(600.0);
        assert!(!c.layout().overlay_layer);
        assert!(c.layout().list_interactive);

        let t = c.set_open(true).unwrap();
        assert!(c.layout().overlay_layer);
        assert!(!c.layout().list_interactive);
        c.complete(t);
        assert!(c.layout().overlay_layer);

        let t = c.set_open(false).unwrap();
        assert!(c.layout().overlay_layer);
        c.complete(t);
        assert!(!c.layout().overlay_layer);
        assert!(c.layout().list_interactive);
    }

    #[test]
    fn test_mode_switch_keeps_detail_open() {
        let (mut detector, mut c) = controller_at(1280.0);
        open_fully(&mut c);

        assert!(detector.observe(600.0));
        assert!(c.set_mode(detector.mode()));
        assert_eq!(c.phase(), DetailPhase::Open);
        let plan = c.layout();
        assert_eq!(plan.mode, LayoutMode::Overlay);
        assert!(plan.overlay_layer);

        assert!(detector.observe(1280.0));
        c.set_mode(detector.mode());
        assert_eq!(c.phase(), DetailPhase::Open);
        assert!(c.layout().detail_present);
    }

    #[test]
    fn test_dismiss_calls_on_close_exactly_once() {
        let (_, mut c) = controller_at(600.0);
        open_fully(&mut c);
        let calls = Cell::new(0);
        c.dismiss(|| calls.set(calls.get() + 1));
        assert_eq!(calls.get(), 1);
        assert_eq!(c.phase(), DetailPhase::Open);

        // The caller reacts by closing; the phase moves toward Closed.
        let t = c.set_open(false).unwrap();
        assert_eq!(c.phase(), DetailPhase::Closing);
        c.complete(t);
        assert_eq!(c.phase(), DetailPhase::Closed);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_resize_never_closes() {
        let (mut detector, mut c) = controller_at(600.0);
        open_fully(&mut c);
        for w in [700.0, 1300.0, 500.0, 1024.0] {
            detector.observe(w);
            c.set_mode(detector.mode());
            assert_eq!(c.phase(), DetailPhase::Open);
        }
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let (_, mut c) = controller_at(1280.0);
        let enter = c.set_open(true).unwrap();
        let exit = c.set_open(false).unwrap();
        assert!(!c.complete(enter));
        assert_eq!(c.phase(), DetailPhase::Closing);
        let enter_again = c.set_open(true).unwrap();
        assert!(!c.complete(exit));
        assert_eq!(c.phase(), DetailPhase::Opening);
        assert!(c.complete(enter_again));
        assert_eq!(c.phase(), DetailPhase::Open);
    }

    #[test]
    fn test_repeated_request_starts_no_transition() {
        let (_, mut c) = controller_at(1280.0);
        assert!(c.set_open(false).is_none());
        assert!(c.set_open(true).is_some());
        assert!(c.set_open(true).is_none());
    }

    #[test]
    fn test_every_sequence_settles() {
        // All is_open sequences up to length 8, completing only the latest ticket.
        for len in 1..=8u32 {
            for bits in 0..(1u32 << len) {
                let mut c = MasterDetailController::new(LayoutMode::Split);
                let mut last = None;
                let mut last_value = false;
                for i in 0..len {
                    last_value = bits & (1 << i) != 0;
                    if let Some(t) = c.set_open(last_value) {
                        last = Some(t);
                    }
                }
                if let Some(t) = last {
                    c.complete(t);
                }
                let expected = if last_value {
                    DetailPhase::Open
                } else {
                    DetailPhase::Closed
                };
                assert_eq!(c.phase(), expected, "sequence {bits:0len$b}", len = len as usize);
            }
        }
    }

    #[test]
    fn test_scenario_table() {
        // width=1280, closed
        let (_, c) = controller_at(1280.0);
        let plan = c.layout();
        assert_eq!((plan.mode, plan.list_width_pct, plan.placeholder), (LayoutMode::Split, 100, true));

        // width=1280, open
        let (_, mut c) = controller_at(1280.0);
        open_fully(&mut c);
        assert!(c.layout().list_width_pct < 100);

        // width=600, open -> overlay with hidden list
        let (_, mut c) = controller_at(600.0);
        open_fully(&mut c);
        let plan = c.layout();
        assert_eq!(plan.mode, LayoutMode::Overlay);
        assert!(plan.overlay_layer && !plan.list_interactive);
    }
}
