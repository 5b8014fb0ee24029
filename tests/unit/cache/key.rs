use super::*;

#[test]
fn params_are_order_insensitive() {
    let a = ResourceKey::parse("stars:radius=40,count=300").unwrap();
    let b = ResourceKey::parse("stars: count=300 , radius=40").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.descriptor(), "stars:count=300,radius=40");
    assert_eq!(a.stable_hash(), b.stable_hash());
}

#[test]
fn positional_params_are_numbered() {
    let k = ResourceKey::parse("stars:300").unwrap();
    assert_eq!(k.kind(), "stars");
    assert_eq!(k.param("0"), Some("300"));
    assert_eq!(k.descriptor(), "stars:0=300");
}

#[test]
fn named_positionals_match_explicit_names() {
    let names = ["count", "radius", "seed"];
    let a = ResourceKey::parse("stars:300,40").unwrap().name_positionals(&names).unwrap();
    let b = ResourceKey::parse("stars:radius=40,count=300").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.stable_hash(), b.stable_hash());

    let mixed = ResourceKey::parse("stars:300,seed=4").unwrap().name_positionals(&names).unwrap();
    assert_eq!(mixed.descriptor(), "stars:count=300,seed=4");
}

#[test]
fn named_positionals_reject_overflow_and_clashes() {
    let names = ["count"];
    assert!(ResourceKey::parse("stars:1,2").unwrap().name_positionals(&names).is_err());
    assert!(ResourceKey::parse("stars:300,count=300").unwrap().name_positionals(&names).is_err());
}

#[test]
fn bare_kind_has_no_params() {
    let k = ResourceKey::parse("laptop").unwrap();
    assert!(k.params().is_empty());
    assert_eq!(k.to_string(), "laptop");
}

#[test]
fn parse_param_reports_bad_numbers() {
    let k = ResourceKey::parse("stars:count=lots").unwrap();
    let err = k.parse_param::<u32>("count", 10).unwrap_err();
    assert!(err.to_string().contains("count"));
    assert_eq!(
        ResourceKey::parse("stars").unwrap().parse_param::<u32>("count", 10).unwrap(),
        10
    );
}

#[test]
fn invalid_descriptors_are_rejected() {
    assert!(ResourceKey::parse("").is_err());
    assert!(ResourceKey::parse(" :count=1").is_err());
    assert!(ResourceKey::parse("stars:=1").is_err());
    assert!(ResourceKey::parse("stars:count=1,count=2").is_err());
}

#[test]
fn distinct_keys_hash_differently() {
    let a = ResourceKey::parse("stars:count=300").unwrap();
    let b = ResourceKey::parse("stars:count=301").unwrap();
    assert_ne!(a.stable_hash(), b.stable_hash());
}
