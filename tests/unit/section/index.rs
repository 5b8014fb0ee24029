use super::*;

#[test]
fn zero_sections_is_rejected() {
    assert!(SectionIndex::new(0).is_err());
}

#[test]
fn set_clamps_to_last_section() {
    let mut idx = SectionIndex::new(4).unwrap();
    assert_eq!(idx.set(99), SectionId(3));
    assert_eq!(idx.current(), SectionId(3));
    assert_eq!(idx.set(1), SectionId(1));
}

#[test]
fn target_present_iff_animating() {
    let mut idx = SectionIndex::new(4).unwrap();
    assert!(!idx.is_animating());
    assert_eq!(idx.target(), None);

    assert!(idx.begin_transition(2));
    assert!(idx.is_animating());
    assert_eq!(idx.target(), Some(SectionId(2)));

    assert_eq!(idx.finish_transition(), SectionId(2));
    assert!(!idx.is_animating());
    assert_eq!(idx.target(), None);
}

#[test]
fn transition_to_current_section_is_noop() {
    let mut idx = SectionIndex::new(3).unwrap();
    assert!(!idx.begin_transition(0));
    assert!(!idx.is_animating());
}

#[test]
fn repeated_request_for_same_target_does_not_refire() {
    let mut idx = SectionIndex::new(5).unwrap();
    assert!(idx.begin_transition(2));
    assert!(!idx.begin_transition(2));
    assert_eq!(idx.target(), Some(SectionId(2)));
}

#[test]
fn newer_target_overrides_running_transition() {
    let mut idx = SectionIndex::new(5).unwrap();
    assert!(idx.begin_transition(2));
    assert!(idx.begin_transition(4));
    assert_eq!(idx.target(), Some(SectionId(4)));
    assert_eq!(idx.current(), SectionId(0));
    assert_eq!(idx.finish_transition(), SectionId(4));
}

#[test]
fn retarget_back_to_origin_still_animates() {
    let mut idx = SectionIndex::new(3).unwrap();
    idx.set(1);
    assert!(idx.begin_transition(2));
    assert!(idx.begin_transition(1));
    assert_eq!(idx.target(), Some(SectionId(1)));
    assert_eq!(idx.finish_transition(), SectionId(1));
}

#[test]
fn next_and_prev_saturate() {
    let mut idx = SectionIndex::new(3).unwrap();
    assert!(!idx.prev());
    assert!(idx.next());
    idx.finish_transition();
    assert!(idx.next());
    idx.finish_transition();
    assert_eq!(idx.current(), SectionId(2));
    assert!(!idx.next());
}

#[test]
fn next_steps_from_pending_target() {
    let mut idx = SectionIndex::new(5).unwrap();
    idx.next();
    idx.next();
    assert_eq!(idx.target(), Some(SectionId(2)));
}

#[test]
fn set_cancels_running_transition() {
    let mut idx = SectionIndex::new(4).unwrap();
    idx.begin_transition(3);
    idx.set(1);
    assert!(!idx.is_animating());
    assert_eq!(idx.current(), SectionId(1));
}

#[test]
fn transition_inputs_per_section() {
    let mut idx = SectionIndex::new(4).unwrap();
    idx.set(1);
    idx.begin_transition(2);

    let leaving = idx.transition_for(SectionId(1));
    assert!(leaving.is_animating);
    assert!(!leaving.is_incoming);
    assert!(!idx.is_active(SectionId(1)));

    let incoming = idx.transition_for(SectionId(2));
    assert!(incoming.is_incoming);
    assert_eq!(incoming.target, Some(SectionId(2)));
    assert!(!idx.is_active(SectionId(2)));

    idx.finish_transition();
    assert!(idx.is_active(SectionId(2)));
    assert!(!idx.transition_for(SectionId(2)).is_animating);
}

#[test]
fn overlay_visibility_rule() {
    let mut idx = SectionIndex::new(3).unwrap();
    assert!(idx.is_overlay_visible(SectionId(0)));
    assert!(!idx.is_overlay_visible(SectionId(1)));

    idx.begin_transition(1);
    assert!(!idx.is_overlay_visible(SectionId(0)));
    idx.set_show_card(true);
    assert!(idx.is_overlay_visible(SectionId(0)));

    idx.set_navigating(true);
    assert!(!idx.is_overlay_visible(SectionId(0)));
    idx.set_navigating(false);

    idx.finish_transition();
    assert!(idx.is_overlay_visible(SectionId(1)));
    assert!(!idx.is_overlay_visible(SectionId(0)));
}
