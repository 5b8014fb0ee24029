use crate::{
    cache::factory::{DecorCache, DecorFactory},
    content::catalog::Localizer,
    content::resolver::{ContentBundle, ContentResolver},
    decor::components::{Decor, DecorSpec},
    foundation::core::SectionId,
    foundation::error::{StageError, StageResult},
    gallery::viewer::{Gallery, ModalViewer, Project},
    scene::graph::{GroupNode, MeshNode, NodeIds, PointsNode, SceneNode, TextNode},
    section::fade::{FadeCoordinator, FadeSample},
    section::index::SectionIndex,
    stage::config::StageConfig,
};

/// Authored opacity of the card behind section text.
const CARD_OPACITY: f64 = 0.85;
/// Authored opacity of title/subtitle outlines.
const OUTLINE_OPACITY: f64 = 0.6;

/// One section's coordinator, mounted subtree and decor.
#[derive(Debug)]
pub struct SectionSlot {
    coordinator: FadeCoordinator,
    root: Option<GroupNode>,
    decor: Vec<Box<dyn Decor>>,
}

impl SectionSlot {
    /// The section's fade coordinator.
    pub fn coordinator(&self) -> &FadeCoordinator {
        &self.coordinator
    }

    /// Mounted subtree, if any.
    pub fn root(&self) -> Option<&GroupNode> {
        self.root.as_ref()
    }

    /// Decorative components in build order.
    pub fn decor(&self) -> &[Box<dyn Decor>] {
        &self.decor
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Per-section state after a tick.
pub struct SectionFrame {
    /// Section index.
    pub section: SectionId,
    /// Smoothed opacity and scale.
    #[serde(flatten)]
    pub fade: FadeSample,
    /// Overlay content visibility.
    pub overlay_visible: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Snapshot of the whole stage after a tick.
pub struct FrameReport {
    /// Current section.
    pub current: SectionId,
    /// Running transition target.
    pub target: Option<SectionId>,
    /// Per-section fade state.
    pub sections: Vec<SectionFrame>,
}

/// Composition root: owns the resource cache, the section index and every section.
///
/// Each [`Stage::tick`] runs the fade phase for all sections before any decorative component
/// updates, so decor always reads the opacity published in the same frame.
pub struct Stage<L> {
    cache: DecorCache,
    index: SectionIndex,
    slots: Vec<SectionSlot>,
    content: ContentResolver<L>,
    gallery: Gallery,
    modal: ModalViewer,
    transition_secs: Option<f64>,
    transition_elapsed: f64,
}

impl<L: Localizer> Stage<L> {
    /// Assemble the stage described by `config`, with text from `localizer`.
    #[tracing::instrument(skip_all, fields(sections = config.sections.len()))]
    pub fn new(config: &StageConfig, localizer: L) -> StageResult<Self> {
        config.validate()?;

        let cache = DecorFactory.into_cache();
        let mut index = SectionIndex::new(config.sections.len())?;
        index.set(config.initial_section);
        let content = ContentResolver::new(localizer, config.sections.len());
        let mut ids = NodeIds::default();

        let mut slots = Vec::with_capacity(config.sections.len());
        for (i, section) in config.sections.iter().enumerate() {
            let id = SectionId(i);
            let coordinator =
                FadeCoordinator::new(id, section.kind, config.fade, i == config.initial_section);
            let bundle = content.resolve(id);
            let root = build_section_tree(&mut ids, &bundle, &section.decor, &cache)?;
            let decor = section
                .decor
                .iter()
                .map(|spec| spec.build(&cache, coordinator.signal()))
                .collect::<StageResult<Vec<_>>>()?;
            slots.push(SectionSlot {
                coordinator,
                root: Some(root),
                decor,
            });
        }
        tracing::debug!(resources = cache.len(), "stage assembled");

        Ok(Self {
            cache,
            index,
            slots,
            content,
            gallery: Gallery::new(config.projects.clone())?,
            modal: ModalViewer::default(),
            transition_secs: config.transition_secs,
            transition_elapsed: 0.0,
        })
    }

    /// Advance every section by `delta_secs`.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, delta_secs: f64) -> FrameReport {
        self.advance_transition(delta_secs);

        for slot in &mut self.slots {
            slot.coordinator.update_from_index(&self.index, delta_secs);
            slot.coordinator.apply(slot.root.as_mut());
        }
        for slot in &mut self.slots {
            for decor in &mut slot.decor {
                decor.update(delta_secs);
            }
        }

        self.report()
    }

    fn advance_transition(&mut self, delta_secs: f64) {
        let Some(limit) = self.transition_secs else {
            return;
        };
        if !self.index.is_animating() {
            self.transition_elapsed = 0.0;
            return;
        }
        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.transition_elapsed += delta_secs;
        }
        if self.transition_elapsed >= limit {
            self.index.finish_transition();
            self.transition_elapsed = 0.0;
        }
    }

    /// Current state without advancing time.
    pub fn report(&self) -> FrameReport {
        FrameReport {
            current: self.index.current(),
            target: self.index.target(),
            sections: self
                .slots
                .iter()
                .map(|slot| {
                    let section = slot.coordinator.section();
                    SectionFrame {
                        section,
                        fade: slot.coordinator.sample(),
                        overlay_visible: self.index.is_overlay_visible(section),
                    }
                })
                .collect(),
        }
    }

    /// Start a transition to `section`. See [`SectionIndex::begin_transition`].
    pub fn navigate(&mut self, section: usize) -> bool {
        let changed = self.index.begin_transition(section);
        if changed {
            self.transition_elapsed = 0.0;
        }
        changed
    }

    /// Transition to the following section.
    pub fn next(&mut self) -> bool {
        let changed = self.index.next();
        if changed {
            self.transition_elapsed = 0.0;
        }
        changed
    }

    /// Transition to the preceding section.
    pub fn prev(&mut self) -> bool {
        let changed = self.index.prev();
        if changed {
            self.transition_elapsed = 0.0;
        }
        changed
    }

    /// Commit the running transition (camera animation finished).
    pub fn finish_transition(&mut self) -> SectionId {
        self.transition_elapsed = 0.0;
        self.index.finish_transition()
    }

    /// Jump without animating.
    pub fn jump(&mut self, section: usize) -> SectionId {
        self.transition_elapsed = 0.0;
        self.index.set(section)
    }

    /// Set the external navigation flag.
    pub fn set_navigating(&mut self, navigating: bool) {
        self.index.set_navigating(navigating);
    }

    /// Keep overlays up during transitions.
    pub fn set_show_card(&mut self, show_card: bool) {
        self.index.set_show_card(show_card);
    }

    /// Detach a section's subtree; its coordinator keeps running without a target.
    pub fn unmount(&mut self, section: SectionId) -> Option<GroupNode> {
        self.slots.get_mut(section.0).and_then(|s| s.root.take())
    }

    /// Navigation state.
    pub fn index(&self) -> &SectionIndex {
        &self.index
    }

    /// Section slot by index.
    pub fn section(&self, section: SectionId) -> Option<&SectionSlot> {
        self.slots.get(section.0)
    }

    /// Shared resource cache.
    pub fn cache(&self) -> &DecorCache {
        &self.cache
    }

    /// Content for the current section.
    pub fn content(&self) -> ContentBundle {
        self.content.resolve(self.index.current())
    }

    /// Content for any section (falls back to section 0).
    pub fn content_for(&self, section: SectionId) -> ContentBundle {
        self.content.resolve(section)
    }

    /// Portfolio projects.
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Modal state.
    pub fn modal(&self) -> ModalViewer {
        self.modal
    }

    /// Open the project at `index` in the modal.
    pub fn open_project(&mut self, index: usize) -> StageResult<&Project> {
        self.modal.open(&self.gallery, index)?;
        Ok(&self.gallery.projects()[index])
    }

    /// Open the project with `id` in the modal.
    pub fn open_project_id(&mut self, id: &str) -> StageResult<&Project> {
        self.modal.open_id(&self.gallery, id)?;
        self.current_project()
            .ok_or_else(|| StageError::navigation(format!("unknown project '{id}'")))
    }

    /// Project shown in the modal, if open.
    pub fn current_project(&self) -> Option<&Project> {
        self.modal.current(&self.gallery)
    }

    /// Show the next project, wrapping. No-op when the modal is closed.
    pub fn next_project(&mut self) -> Option<&Project> {
        self.modal.next(&self.gallery);
        self.current_project()
    }

    /// Show the previous project, wrapping. No-op when the modal is closed.
    pub fn prev_project(&mut self) -> Option<&Project> {
        self.modal.prev(&self.gallery);
        self.current_project()
    }

    /// Close the project modal.
    pub fn close_project(&mut self) {
        self.modal.close();
    }
}

impl<L> std::fmt::Debug for Stage<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("index", &self.index)
            .field("sections", &self.slots.len())
            .field("cache", &self.cache)
            .finish()
    }
}

fn build_section_tree(
    ids: &mut NodeIds,
    bundle: &ContentBundle,
    decor: &[DecorSpec],
    cache: &DecorCache,
) -> StageResult<GroupNode> {
    let mut root = GroupNode::new(ids.next_id())
        .with_child(SceneNode::Mesh(MeshNode::new(
            ids.next_id(),
            "card",
            CARD_OPACITY,
        )))
        .with_child(SceneNode::Text(TextNode::new(
            ids.next_id(),
            bundle.title.clone(),
            OUTLINE_OPACITY,
        )))
        .with_child(SceneNode::Text(TextNode::new(
            ids.next_id(),
            bundle.subtitle.clone(),
            OUTLINE_OPACITY,
        )));

    for spec in decor {
        if let DecorSpec::Stars {
            points, material, ..
        }
        | DecorSpec::Dust {
            points, material, ..
        } = spec
        {
            let geometry = cache.get(points)?;
            let opacity = cache
                .get(material)?
                .as_material()
                .map_or(1.0, |m| m.opacity);
            root = root.with_child(SceneNode::Points(PointsNode::new(
                ids.next_id(),
                geometry,
                opacity,
            )));
        }
    }
    Ok(root)
}

#[cfg(test)]
#[path = "../../tests/unit/stage/runtime.rs"]
mod tests;
