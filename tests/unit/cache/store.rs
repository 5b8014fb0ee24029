use std::cell::{Cell, RefCell};
use std::rc::Weak;

use super::*;

fn counting_factory(calls: &Cell<u32>) -> impl Fn(&ResourceKey) -> StageResult<String> + '_ {
    move |key: &ResourceKey| {
        calls.set(calls.get() + 1);
        Ok(key.descriptor())
    }
}

#[test]
fn same_descriptor_returns_same_instance() {
    let calls = Cell::new(0);
    let cache = ResourceCache::new(counting_factory(&calls));

    let a = cache.get("stars:300").unwrap();
    let b = cache.get("stars:300").unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(calls.get(), 1);
    assert_eq!(cache.build_count("stars:300"), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn equivalent_descriptors_share_an_entry() {
    let calls = Cell::new(0);
    let cache = ResourceCache::new(counting_factory(&calls));

    let a = cache.get("dust:spread=5,count=10").unwrap();
    let b = cache.get("dust:count=10, spread=5").unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(calls.get(), 1);
    assert!(cache.contains("dust:count=10,spread=5"));
}

struct CountFirst(Cell<u32>);

impl ResourceFactory<String> for CountFirst {
    fn build(&self, key: &ResourceKey) -> StageResult<String> {
        self.0.set(self.0.get() + 1);
        Ok(key.descriptor())
    }

    fn canonical_key(&self, key: ResourceKey) -> StageResult<ResourceKey> {
        key.name_positionals(&["count"])
    }
}

#[test]
fn factory_canonical_key_merges_positional_and_named() {
    let cache = ResourceCache::new(CountFirst(Cell::new(0)));

    let a = cache.get("stars:300").unwrap();
    let b = cache.get("stars:count=300").unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(*a, "stars:count=300");
    assert_eq!(cache.factory().0.get(), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.build_count("stars:300"), 1);

    let key = ResourceKey::parse("stars:300").unwrap();
    assert!(Rc::ptr_eq(&cache.get_key(&key).unwrap(), &a));
    assert!(cache.get("stars:1,2").is_err());
    assert_eq!(cache.factory().0.get(), 1);
}

#[test]
fn distinct_descriptors_build_separately() {
    let calls = Cell::new(0);
    let cache = ResourceCache::new(counting_factory(&calls));

    let a = cache.get("stars:300").unwrap();
    let b = cache.get("stars:301").unwrap();
    assert!(!Rc::ptr_eq(&a, &b));
    assert_eq!(calls.get(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn failed_build_leaves_no_entry_and_retries() {
    let attempts = Cell::new(0);
    let cache = ResourceCache::new(|_: &ResourceKey| -> StageResult<u32> {
        attempts.set(attempts.get() + 1);
        if attempts.get() == 1 {
            Err(StageError::validation("first attempt fails"))
        } else {
            Ok(7)
        }
    });

    assert!(cache.get("laptop").is_err());
    assert!(!cache.contains("laptop"));
    assert!(cache.is_empty());
    assert_eq!(*cache.get("laptop").unwrap(), 7);
    assert_eq!(cache.build_count("laptop"), 1);
}

#[test]
fn invalid_descriptor_is_rejected_before_building() {
    let calls = Cell::new(0);
    let cache = ResourceCache::new(counting_factory(&calls));
    assert!(cache.get(":oops").is_err());
    assert_eq!(calls.get(), 0);
}

struct Reentrant {
    cache: RefCell<Weak<ResourceCache<u32, Reentrant>>>,
    builds: Cell<u32>,
}

impl ResourceFactory<u32> for Reentrant {
    fn build(&self, key: &ResourceKey) -> StageResult<u32> {
        self.builds.set(self.builds.get() + 1);
        let cache = self.cache.borrow().upgrade();
        match (key.kind(), cache) {
            // Depends on another key: allowed.
            ("outer", Some(cache)) => cache.get("inner").map(|v| *v + 1),
            // Depends on itself: must not recurse into a second build.
            ("self", Some(cache)) => cache.get("self").map(|v| *v),
            _ => Ok(1),
        }
    }
}

#[test]
fn nested_requests_for_other_keys_are_allowed() {
    let cache = Rc::new(ResourceCache::new(Reentrant {
        cache: RefCell::new(Weak::new()),
        builds: Cell::new(0),
    }));
    *cache.factory().cache.borrow_mut() = Rc::downgrade(&cache);

    assert_eq!(*cache.get("outer").unwrap(), 2);
    assert!(cache.contains("inner"));
    assert_eq!(cache.factory().builds.get(), 2);
}

#[test]
fn reentrant_request_for_same_key_does_not_double_build() {
    let cache = Rc::new(ResourceCache::new(Reentrant {
        cache: RefCell::new(Weak::new()),
        builds: Cell::new(0),
    }));
    *cache.factory().cache.borrow_mut() = Rc::downgrade(&cache);

    let err = cache.get("self").unwrap_err();
    assert!(err.to_string().contains("re-entrant"));
    assert_eq!(cache.factory().builds.get(), 1);
    assert!(!cache.contains("self"));
}
