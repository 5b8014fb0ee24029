//! Capabilities a visual node exposes to the fade coordinator.
//!
//! The coordinator never inspects node shapes. A subtree implements [`FadeTarget`] and hands each
//! child to a [`FadeVisitor`] through the method matching the child's capability; dispatch is
//! static (generic methods), so adding a node type means implementing a trait, not extending a
//! runtime check.

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Stable identity of a visual node within one stage.
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Which opacity-bearing property of a node is meant.
pub enum OpacityChannel {
    /// Primary fill / material opacity.
    Fill,
    /// Text outline opacity.
    Outline,
}

/// A node with a material opacity and a visibility flag.
pub trait HasOpacity {
    /// Node identity, used to remember authored opacity.
    fn node_id(&self) -> NodeId;
    /// Current fill opacity.
    fn opacity(&self) -> f64;
    /// Overwrite the fill opacity.
    fn set_opacity(&mut self, opacity: f64);
    /// Toggle rendering and hit-testing.
    fn set_visible(&mut self, visible: bool);
    /// Whether another system owns this node's opacity.
    fn externally_managed(&self) -> bool {
        false
    }
}

/// A text node: fill opacity plus an outline that fades with it.
pub trait HasTextStyle: HasOpacity {
    /// Current outline opacity.
    fn outline_opacity(&self) -> f64;
    /// Overwrite the outline opacity.
    fn set_outline_opacity(&mut self, opacity: f64);
}

/// Receives every fadeable node of a subtree.
pub trait FadeVisitor {
    /// Visit a plain opacity-bearing node.
    fn visit_opacity<N: HasOpacity>(&mut self, node: &mut N);
    /// Visit a text node.
    fn visit_text<N: HasTextStyle>(&mut self, node: &mut N);
}

/// A subtree the coordinator can scale and fade.
pub trait FadeTarget {
    /// Set the subtree root's uniform scale.
    fn set_uniform_scale(&mut self, scale: f64);
    /// Walk every fadeable descendant.
    fn accept<V: FadeVisitor>(&mut self, visitor: &mut V);
}
