use std::rc::Rc;

use super::*;

fn build(descriptor: &str) -> StageResult<DecorResource> {
    DecorFactory.build(&ResourceKey::parse(descriptor)?)
}

#[test]
fn stars_honour_count_and_shell_radius() {
    let res = build("stars:count=300,radius=40").unwrap();
    let cloud = res.as_points().unwrap();
    assert_eq!(cloud.layer, PointLayer::Stars);
    assert_eq!(cloud.len(), 300);
    assert_eq!(cloud.sizes.len(), 300);
    for p in &cloud.positions {
        let r = p.length();
        assert!((19.9..=40.1).contains(&r), "radius {r} outside shell");
    }
}

#[test]
fn positional_count_is_accepted() {
    let res = build("stars:25").unwrap();
    assert_eq!(res.as_points().unwrap().len(), 25);
    assert_eq!(build("stars:25").unwrap(), build("stars:count=25").unwrap());
    assert!(build("orbit:4,8,12").is_err());
}

#[test]
fn point_generation_is_deterministic() {
    let a = build("dust:count=50,spread=3,seed=9").unwrap();
    let b = build("dust:count=50,spread=3,seed=9").unwrap();
    let c = build("dust:count=50,spread=3,seed=10").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    for p in &a.as_points().unwrap().positions {
        assert!(p.x.abs() <= 3.0 && p.y.abs() <= 3.0 && p.z.abs() <= 3.0);
    }
}

#[test]
fn point_count_is_bounded() {
    assert!(build("stars:count=100001").is_err());
    assert!(build("dust:count=10,spread=0").is_err());
}

#[test]
fn material_parses_color_and_opacity() {
    let res = build("material:color=#88ccff,opacity=0.8,additive=true").unwrap();
    let m = res.as_material().unwrap();
    assert_eq!(m.color.to_hex(), "#88ccff");
    assert_eq!(m.opacity, 0.8);
    assert!(m.additive);
    assert!(build("material:opacity=1.5").is_err());
}

#[test]
fn orbit_samples_circle() {
    let res = build("orbit:radius=4,segments=8").unwrap();
    let o = res.as_orbit().unwrap();
    assert_eq!(o.points.len(), 8);
    for p in &o.points {
        assert!((p.length() - 4.0).abs() < 1e-4);
        assert_eq!(p.y, 0.0);
    }
}

#[test]
fn laptop_parses_screen() {
    let res = build("laptop:screen=13x8").unwrap();
    let l = res.as_laptop().unwrap();
    assert_eq!((l.screen_width, l.screen_height), (13.0, 8.0));
    assert!(build("laptop:screen=13").is_err());
    assert!(build("laptop").is_ok());
}

#[test]
fn unknown_kind_is_validation_error() {
    let err = build("nebula:3").unwrap_err();
    assert!(err.to_string().contains("unknown resource kind"));
}

#[test]
fn decor_cache_shares_star_fields() {
    let cache = DecorFactory.into_cache();
    let a = cache.get("stars:300").unwrap();
    let b = cache.get("stars:300").unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.build_count("stars:300"), 1);
}

#[test]
fn positional_and_named_descriptors_share_one_entry() {
    let cache = DecorFactory.into_cache();
    let a = cache.get("stars:300").unwrap();
    let b = cache.get("stars:count=300").unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.build_count("stars:count=300"), 1);
    assert!(cache.contains("stars:300"));

    let m1 = cache.get("material:#88ccff,0.5").unwrap();
    let m2 = cache.get("material:opacity=0.5,color=#88ccff").unwrap();
    assert!(Rc::ptr_eq(&m1, &m2));

    let key = ResourceKey::parse("laptop:13x8,90").unwrap();
    let l1 = cache.get_key(&key).unwrap();
    let l2 = cache.get("laptop:screen=13x8,lid=90").unwrap();
    assert!(Rc::ptr_eq(&l1, &l2));
}
