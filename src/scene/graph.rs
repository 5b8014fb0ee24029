use std::rc::Rc;

use crate::{
    cache::factory::DecorResource,
    scene::node::{FadeTarget, FadeVisitor, HasOpacity, HasTextStyle, NodeId},
};

#[derive(Clone, Debug, PartialEq)]
/// Mesh with a single material.
pub struct MeshNode {
    /// Node identity.
    pub id: NodeId,
    /// Debug name.
    pub name: String,
    /// Material opacity.
    pub opacity: f64,
    /// Render/hit-test flag.
    pub visible: bool,
    /// Opacity owned by another system (e.g. a hover glow).
    pub externally_managed: bool,
}

impl MeshNode {
    /// Visible mesh with the given authored opacity.
    pub fn new(id: NodeId, name: impl Into<String>, opacity: f64) -> Self {
        Self {
            id,
            name: name.into(),
            opacity,
            visible: true,
            externally_managed: false,
        }
    }

    /// Mark the material as managed elsewhere.
    pub fn externally_managed(mut self) -> Self {
        self.externally_managed = true;
        self
    }
}

impl HasOpacity for MeshNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn externally_managed(&self) -> bool {
        self.externally_managed
    }
}

#[derive(Clone, Debug)]
/// Point sprites backed by a shared cached resource.
pub struct PointsNode {
    /// Node identity.
    pub id: NodeId,
    /// Shared geometry.
    pub geometry: Rc<DecorResource>,
    /// Sprite opacity.
    pub opacity: f64,
    /// Render flag.
    pub visible: bool,
}

impl PointsNode {
    /// Visible points node.
    pub fn new(id: NodeId, geometry: Rc<DecorResource>, opacity: f64) -> Self {
        Self {
            id,
            geometry,
            opacity,
            visible: true,
        }
    }
}

impl HasOpacity for PointsNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Text block with fill and outline.
pub struct TextNode {
    /// Node identity.
    pub id: NodeId,
    /// Displayed text.
    pub text: String,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Outline opacity.
    pub outline_opacity: f64,
    /// Render flag.
    pub visible: bool,
}

impl TextNode {
    /// Visible text with opaque fill and the given outline opacity.
    pub fn new(id: NodeId, text: impl Into<String>, outline_opacity: f64) -> Self {
        Self {
            id,
            text: text.into(),
            fill_opacity: 1.0,
            outline_opacity,
            visible: true,
        }
    }
}

impl HasOpacity for TextNode {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn opacity(&self) -> f64 {
        self.fill_opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.fill_opacity = opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl HasTextStyle for TextNode {
    fn outline_opacity(&self) -> f64 {
        self.outline_opacity
    }

    fn set_outline_opacity(&mut self, opacity: f64) {
        self.outline_opacity = opacity;
    }
}

#[derive(Clone, Debug)]
/// Any child of a [`GroupNode`].
pub enum SceneNode {
    /// Mesh child.
    Mesh(MeshNode),
    /// Points child.
    Points(PointsNode),
    /// Text child.
    Text(TextNode),
    /// Nested group.
    Group(GroupNode),
}

#[derive(Clone, Debug)]
/// Transform group; the root of every section subtree.
pub struct GroupNode {
    /// Node identity.
    pub id: NodeId,
    /// Uniform scale.
    pub scale: f64,
    /// Children in draw order.
    pub children: Vec<SceneNode>,
}

impl GroupNode {
    /// Empty group at unit scale.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            scale: 1.0,
            children: Vec::new(),
        }
    }

    /// Append a child.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first lookup of a mesh by id.
    pub fn mesh(&self, id: NodeId) -> Option<&MeshNode> {
        self.children.iter().find_map(|c| match c {
            SceneNode::Mesh(m) if m.id == id => Some(m),
            SceneNode::Group(g) => g.mesh(id),
            _ => None,
        })
    }

    /// Depth-first lookup of a text node by id.
    pub fn text(&self, id: NodeId) -> Option<&TextNode> {
        self.children.iter().find_map(|c| match c {
            SceneNode::Text(t) if t.id == id => Some(t),
            SceneNode::Group(g) => g.text(id),
            _ => None,
        })
    }

    /// Depth-first lookup of a points node by id.
    pub fn points(&self, id: NodeId) -> Option<&PointsNode> {
        self.children.iter().find_map(|c| match c {
            SceneNode::Points(p) if p.id == id => Some(p),
            SceneNode::Group(g) => g.points(id),
            _ => None,
        })
    }
}

impl FadeTarget for GroupNode {
    fn set_uniform_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn accept<V: FadeVisitor>(&mut self, visitor: &mut V) {
        for child in &mut self.children {
            match child {
                SceneNode::Mesh(m) => visitor.visit_opacity(m),
                SceneNode::Points(p) => visitor.visit_opacity(p),
                SceneNode::Text(t) => visitor.visit_text(t),
                SceneNode::Group(g) => g.accept(visitor),
            }
        }
    }
}

/// Monotonic [`NodeId`] allocator.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeIds(u32);

impl NodeIds {
    /// Hand out the next unused id.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.0);
        self.0 = self.0.wrapping_add(1);
        id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
