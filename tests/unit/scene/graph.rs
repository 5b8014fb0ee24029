use super::*;

#[derive(Default)]
struct Collect {
    plain: Vec<NodeId>,
    text: Vec<NodeId>,
}

impl FadeVisitor for Collect {
    fn visit_opacity<N: HasOpacity>(&mut self, node: &mut N) {
        self.plain.push(node.node_id());
    }

    fn visit_text<N: HasTextStyle>(&mut self, node: &mut N) {
        self.text.push(node.node_id());
    }
}

fn sample_tree(ids: &mut NodeIds) -> GroupNode {
    let root = ids.next_id();
    let mesh = ids.next_id();
    let inner = ids.next_id();
    let title = ids.next_id();
    let glow = ids.next_id();
    GroupNode::new(root)
        .with_child(SceneNode::Mesh(MeshNode::new(mesh, "panel", 0.8)))
        .with_child(SceneNode::Group(
            GroupNode::new(inner)
                .with_child(SceneNode::Text(TextNode::new(title, "Hello", 0.5)))
                .with_child(SceneNode::Mesh(
                    MeshNode::new(glow, "glow", 0.3).externally_managed(),
                )),
        ))
}

#[test]
fn visitor_reaches_nested_children_by_capability() {
    let mut ids = NodeIds::default();
    let mut tree = sample_tree(&mut ids);
    let mut v = Collect::default();
    tree.accept(&mut v);
    assert_eq!(v.plain, vec![NodeId(1), NodeId(4)]);
    assert_eq!(v.text, vec![NodeId(3)]);
}

#[test]
fn lookups_descend_into_groups() {
    let mut ids = NodeIds::default();
    let tree = sample_tree(&mut ids);
    assert_eq!(tree.mesh(NodeId(1)).unwrap().name, "panel");
    assert_eq!(tree.text(NodeId(3)).unwrap().text, "Hello");
    assert!(tree.mesh(NodeId(4)).unwrap().externally_managed);
    assert!(tree.mesh(NodeId(3)).is_none());
    assert!(tree.points(NodeId(1)).is_none());
}

#[test]
fn scale_applies_to_root_only() {
    let mut ids = NodeIds::default();
    let mut tree = sample_tree(&mut ids);
    tree.set_uniform_scale(0.95);
    assert_eq!(tree.scale, 0.95);
    let SceneNode::Group(inner) = &tree.children[1] else {
        panic!("expected nested group");
    };
    assert_eq!(inner.scale, 1.0);
}
