use crate::foundation::{
    core::SectionId,
    error::{StageError, StageResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Per-section view of the in-flight transition.
pub struct TransitionState {
    /// A transition is running.
    pub is_animating: bool,
    /// Destination of the running transition.
    pub target: Option<SectionId>,
    /// The section asking is the destination.
    pub is_incoming: bool,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Which section is current, where a running transition is heading, and overlay flags.
///
/// `current` is always a valid index. A transition exists exactly when `target` is `Some`, so
/// "animating without a target" cannot be represented.
pub struct SectionIndex {
    count: usize,
    current: SectionId,
    target: Option<SectionId>,
    navigating: bool,
    show_card: bool,
}

impl SectionIndex {
    /// Index over `count` sections, starting at section 0.
    pub fn new(count: usize) -> StageResult<Self> {
        if count == 0 {
            return Err(StageError::validation("section count must be > 0"));
        }
        Ok(Self {
            count,
            current: SectionId(0),
            target: None,
            navigating: false,
            show_card: false,
        })
    }

    /// Number of sections.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Section currently at rest (or being left, while animating).
    pub fn current(&self) -> SectionId {
        self.current
    }

    /// Destination of the running transition.
    pub fn target(&self) -> Option<SectionId> {
        self.target
    }

    /// Whether a transition is running.
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Whether an external navigation gesture (scroll, drag) is in progress.
    pub fn is_navigating(&self) -> bool {
        self.navigating
    }

    /// Whether the overlay card should show during a transition.
    pub fn show_card(&self) -> bool {
        self.show_card
    }

    fn clamp(&self, section: usize) -> SectionId {
        SectionId(section.min(self.count - 1))
    }

    /// Jump straight to `section` (clamped), dropping any running transition.
    pub fn set(&mut self, section: usize) -> SectionId {
        let section = self.clamp(section);
        if section != self.current || self.target.is_some() {
            tracing::debug!(from = %self.current, to = %section, "section jump");
        }
        self.current = section;
        self.target = None;
        section
    }

    /// Start animating towards `section` (clamped). Returns whether anything changed.
    ///
    /// Requesting the section already being animated to is ignored, so repeated scroll events do
    /// not restart the transition. Requesting a different section mid-transition retargets it:
    /// the newest request wins.
    pub fn begin_transition(&mut self, section: usize) -> bool {
        let section = self.clamp(section);
        match self.target {
            Some(t) if t == section => false,
            None if section == self.current => false,
            Some(t) => {
                tracing::debug!(from = %self.current, old = %t, new = %section, "transition retargeted");
                self.target = Some(section);
                true
            }
            None => {
                tracing::debug!(from = %self.current, to = %section, "transition started");
                self.target = Some(section);
                true
            }
        }
    }

    /// Commit the running transition. Returns the new current section.
    pub fn finish_transition(&mut self) -> SectionId {
        if let Some(t) = self.target.take() {
            tracing::debug!(from = %self.current, to = %t, "transition finished");
            self.current = t;
        }
        self.current
    }

    /// Transition to the following section, saturating at the last one.
    pub fn next(&mut self) -> bool {
        let from = self.target.unwrap_or(self.current).0;
        self.begin_transition(from.saturating_add(1))
    }

    /// Transition to the preceding section, saturating at the first one.
    pub fn prev(&mut self) -> bool {
        let from = self.target.unwrap_or(self.current).0;
        self.begin_transition(from.saturating_sub(1))
    }

    /// Set the external navigation flag.
    pub fn set_navigating(&mut self, navigating: bool) {
        self.navigating = navigating;
    }

    /// Set whether overlays stay up while a transition runs.
    pub fn set_show_card(&mut self, show_card: bool) {
        self.show_card = show_card;
    }

    /// Whether `section` is current and no transition is running.
    ///
    /// While animating, neither the section being left nor the destination is active; each
    /// fades according to its role in the transition.
    pub fn is_active(&self, section: SectionId) -> bool {
        section == self.current && self.target.is_none()
    }

    /// Transition inputs as seen by `section`.
    pub fn transition_for(&self, section: SectionId) -> TransitionState {
        TransitionState {
            is_animating: self.is_animating(),
            target: self.target,
            is_incoming: self.target == Some(section),
        }
    }

    /// Whether `section`'s overlay content should be shown.
    pub fn is_overlay_visible(&self, section: SectionId) -> bool {
        section == self.current && (self.target.is_none() || self.show_card) && !self.navigating
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/index.rs"]
mod tests;
