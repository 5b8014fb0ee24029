use std::collections::HashMap;

use crate::{
    animation::smoothing::Smoothed,
    foundation::core::SectionId,
    foundation::error::{StageError, StageResult},
    scene::node::{FadeTarget, FadeVisitor, HasOpacity, HasTextStyle, NodeId, OpacityChannel},
    section::index::SectionIndex,
    section::signal::{FadePublisher, FadeSignal},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Section flavour; the hero section fades more slowly.
pub enum SectionKind {
    /// Landing section.
    Hero,
    /// Any other section.
    #[default]
    Standard,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tuning knobs for the fade coordinator.
pub struct FadeConfig {
    /// Smoothing rate for standard sections (1/s).
    pub base_speed: f64,
    /// Smoothing rate for the hero section (1/s).
    pub hero_speed: f64,
    /// Rate multiplier applied while opacity is decreasing.
    pub fade_out_multiplier: f64,
    /// Opacity snap tolerance.
    pub opacity_epsilon: f64,
    /// Scale snap tolerance.
    pub scale_epsilon: f64,
    /// Children are hidden below this opacity.
    pub visibility_threshold: f64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            base_speed: 2.0,
            hero_speed: 1.5,
            fade_out_multiplier: 2.0,
            opacity_epsilon: 0.01,
            scale_epsilon: 0.005,
            visibility_threshold: 0.01,
        }
    }
}

impl FadeConfig {
    /// Reject non-finite or non-positive rates and out-of-range tolerances.
    pub fn validate(&self) -> StageResult<()> {
        for (name, v) in [
            ("base_speed", self.base_speed),
            ("hero_speed", self.hero_speed),
            ("fade_out_multiplier", self.fade_out_multiplier),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(StageError::validation(format!(
                    "fade.{name} must be finite and > 0"
                )));
            }
        }
        for (name, v) in [
            ("opacity_epsilon", self.opacity_epsilon),
            ("scale_epsilon", self.scale_epsilon),
            ("visibility_threshold", self.visibility_threshold),
        ] {
            if !(0.0..1.0).contains(&v) {
                return Err(StageError::validation(format!(
                    "fade.{name} must be within [0, 1)"
                )));
            }
        }
        Ok(())
    }

    fn speed_for(&self, kind: SectionKind) -> f64 {
        match kind {
            SectionKind::Hero => self.hero_speed,
            SectionKind::Standard => self.base_speed,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Navigation inputs a coordinator reads each tick.
pub struct FadeInputs {
    /// This section is current and at rest.
    pub is_active: bool,
    /// Some transition is running.
    pub is_animating: bool,
    /// This section is the transition's destination.
    pub is_incoming: bool,
}

impl FadeInputs {
    /// Inputs for `section` derived from the shared index.
    pub fn from_index(index: &SectionIndex, section: SectionId) -> Self {
        let tr = index.transition_for(section);
        Self {
            is_active: index.is_active(section),
            is_animating: tr.is_animating,
            is_incoming: tr.is_incoming,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Opacity/scale pair.
pub struct FadeSample {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale.
    pub scale: f64,
}

/// Target opacity/scale for one combination of inputs.
pub fn fade_targets(inputs: FadeInputs, was_active: bool) -> FadeSample {
    let (opacity, scale) = match (inputs.is_active, inputs.is_animating) {
        (true, _) => (1.0, 1.0),
        (false, true) if was_active => (0.0, 0.95),
        (false, true) if inputs.is_incoming => (0.5, 0.98),
        (false, _) => (0.0, 1.0),
    };
    FadeSample { opacity, scale }
}

/// Per-section opacity/scale state machine.
///
/// Each tick it derives a target from the navigation inputs, moves the current values towards it
/// with frame-rate independent exponential smoothing, and (via [`FadeCoordinator::apply`]) pushes
/// the result into the section's subtree. It must run before anything else that reads the
/// section's [`FadeSignal`] in the same tick.
#[derive(Debug)]
pub struct FadeCoordinator {
    section: SectionId,
    kind: SectionKind,
    config: FadeConfig,
    opacity: Smoothed,
    scale: Smoothed,
    was_active: bool,
    originals: HashMap<(NodeId, OpacityChannel), f64>,
    publisher: FadePublisher,
}

impl FadeCoordinator {
    /// Coordinator for `section`; a section that starts active starts fully shown.
    pub fn new(
        section: SectionId,
        kind: SectionKind,
        config: FadeConfig,
        starts_active: bool,
    ) -> Self {
        let initial = if starts_active { 1.0 } else { 0.0 };
        Self {
            section,
            kind,
            config,
            opacity: Smoothed::new(initial, config.opacity_epsilon),
            scale: Smoothed::new(1.0, config.scale_epsilon),
            was_active: starts_active,
            originals: HashMap::new(),
            publisher: FadePublisher::new(initial),
        }
    }

    /// Section this coordinator drives.
    pub fn section(&self) -> SectionId {
        self.section
    }

    /// Section flavour.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Current smoothed opacity.
    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    /// Current smoothed scale.
    pub fn scale(&self) -> f64 {
        self.scale.value()
    }

    /// Current opacity/scale pair.
    pub fn sample(&self) -> FadeSample {
        FadeSample {
            opacity: self.opacity(),
            scale: self.scale(),
        }
    }

    /// Whether the section was active at the last tick taken at rest.
    pub fn was_active(&self) -> bool {
        self.was_active
    }

    /// Read-only handle for descendants.
    pub fn signal(&self) -> FadeSignal {
        self.publisher.subscribe()
    }

    /// Target the next tick will move towards.
    pub fn target(&self, inputs: FadeInputs) -> FadeSample {
        fade_targets(inputs, self.was_active)
    }

    /// Advance by `delta_secs` under `inputs` and publish the new opacity.
    pub fn update(&mut self, inputs: FadeInputs, delta_secs: f64) -> FadeSample {
        // Snapshot only at rest, so the section being left remembers it was shown.
        if !inputs.is_animating {
            self.was_active = inputs.is_active;
        }

        let target = self.target(inputs);
        let mut speed = self.config.speed_for(self.kind);
        if target.opacity < self.opacity.value() {
            speed *= self.config.fade_out_multiplier;
        }

        self.opacity.step(target.opacity, speed, delta_secs);
        self.scale.step(target.scale, speed, delta_secs);
        self.publisher.publish(self.opacity.value());

        tracing::trace!(
            section = %self.section,
            opacity = self.opacity.value(),
            scale = self.scale.value(),
            target_opacity = target.opacity,
            "fade tick"
        );
        self.sample()
    }

    /// [`FadeCoordinator::update`] with inputs read from the shared index.
    pub fn update_from_index(&mut self, index: &SectionIndex, delta_secs: f64) -> FadeSample {
        self.update(FadeInputs::from_index(index, self.section), delta_secs)
    }

    /// Push the current state into `target`. A missing target is skipped.
    pub fn apply<T: FadeTarget>(&mut self, target: Option<&mut T>) {
        let Some(target) = target else {
            tracing::trace!(section = %self.section, "fade target not mounted");
            return;
        };

        target.set_uniform_scale(self.scale.value());
        let mut applier = FadeApplier {
            fade: self.opacity.value(),
            visible: self.opacity.value() >= self.config.visibility_threshold,
            originals: &mut self.originals,
        };
        target.accept(&mut applier);
    }

    /// Authored opacity remembered for a node channel.
    pub fn original_opacity(&self, node: NodeId, channel: OpacityChannel) -> Option<f64> {
        self.originals.get(&(node, channel)).copied()
    }
}

struct FadeApplier<'a> {
    fade: f64,
    visible: bool,
    originals: &'a mut HashMap<(NodeId, OpacityChannel), f64>,
}

impl FadeApplier<'_> {
    fn original(&mut self, node: NodeId, channel: OpacityChannel, current: f64) -> f64 {
        *self.originals.entry((node, channel)).or_insert(current)
    }
}

impl FadeVisitor for FadeApplier<'_> {
    fn visit_opacity<N: HasOpacity>(&mut self, node: &mut N) {
        if node.externally_managed() {
            return;
        }
        let base = self.original(node.node_id(), OpacityChannel::Fill, node.opacity());
        node.set_opacity(base * self.fade);
        node.set_visible(self.visible);
    }

    fn visit_text<N: HasTextStyle>(&mut self, node: &mut N) {
        if node.externally_managed() {
            return;
        }
        self.visit_opacity(node);
        let base = self.original(node.node_id(), OpacityChannel::Outline, node.outline_opacity());
        node.set_outline_opacity(base * self.fade);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/fade.rs"]
mod tests;
