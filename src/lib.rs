//! Scrollstage coordinates the section transitions of a scroll-driven, single-page 3D portfolio.
//!
//! The page is a sequence of sections ("slides"). Exactly one is current at a time; navigation
//! animates from the current section to a target section. Every section owns a
//! [`FadeCoordinator`] that eases its opacity and scale towards a state-dependent target each
//! frame and pushes the result into the section's scene subtree without destroying the authored
//! opacity of individual nodes.
//!
//! # Pieces
//!
//! - [`SectionIndex`]: current/target section, clamped navigation, overlay visibility.
//! - [`FadeCoordinator`]: the per-section fade state machine and its [`FadeSignal`].
//! - [`ResourceCache`]: descriptor-keyed, build-once cache for shared render resources.
//! - [`ContentResolver`]: localized text for each section through a [`Localizer`].
//! - [`Stage`]: composition root that owns all of the above and runs the per-frame tick.
//!
//! Everything here is single-threaded; shared state uses `Rc`/`RefCell`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod cache;
mod content;
mod decor;
mod foundation;
mod gallery;
mod scene;
mod section;
mod stage;

pub use animation::smoothing::{Smoothed, decay_factor};
pub use cache::factory::{
    DecorCache, DecorFactory, DecorResource, LaptopModel, MAX_POINTS, MaterialDesc, OrbitPath,
    PointCloud, PointLayer,
};
pub use cache::key::ResourceKey;
pub use cache::store::{ResourceCache, ResourceFactory};
pub use content::catalog::{JsonCatalog, Localizer};
pub use content::resolver::{ContentBundle, ContentResolver};
pub use decor::components::{Decor, DecorSpec, DustCloud, Laptop, Satellite, Shared, StarField};
pub use foundation::core::{Rgb8, SectionId, Vec3};
pub use foundation::error::{StageError, StageResult};
pub use gallery::viewer::{Gallery, ModalViewer, Project};
pub use scene::graph::{GroupNode, MeshNode, NodeIds, PointsNode, SceneNode, TextNode};
pub use scene::node::{
    FadeTarget, FadeVisitor, HasOpacity, HasTextStyle, NodeId, OpacityChannel,
};
pub use section::fade::{
    FadeConfig, FadeCoordinator, FadeInputs, FadeSample, SectionKind, fade_targets,
};
pub use section::index::{SectionIndex, TransitionState};
pub use section::signal::FadeSignal;
pub use stage::config::{SectionConfig, StageConfig};
pub use stage::runtime::{FrameReport, SectionFrame, SectionSlot, Stage};
