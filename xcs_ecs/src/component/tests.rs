#![cfg(test)]

use std::collections::HashSet;

use super::*;
use crate::component;
use crate::entity::{UniqueId, UniverseId};
use crate::error::ComponentError;

#[derive(Debug, Default, Clone, PartialEq)]
struct Label(&'static str);
component!(Label);

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Counter(i32);
component!(Counter);

fn storage<T: Component>() -> ComponentStorage<T> {
    ComponentStorage::new(UniverseId::next())
}

fn id(value: u64) -> UniqueId {
    UniqueId::new(value)
}

#[test]
fn test_insertion() {
    let mut storage = storage::<Label>();

    storage.insert(id(1), Label("foo")).unwrap();
    assert!(storage.contains(id(1)));
    assert_eq!(storage[id(1)], Label("foo"));

    assert!(storage.remove(id(1)));
    assert!(!storage.contains(id(1)));
    assert_eq!(storage.get(id(1)), None);
}

#[test]
fn test_insertion_rejects_duplicate() {
    let mut storage = storage::<Label>();

    storage.insert(id(1), Label("first")).unwrap();
    let error = storage.insert(id(1), Label("second")).unwrap_err();
    assert_eq!(
        error,
        ComponentError::AlreadyAttached {
            component: Label::component_id(),
            entity: id(1),
        }
    );
    assert_eq!(storage[id(1)], Label("first"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn test_add_idempotent() {
    let mut storage = storage::<Counter>();

    storage.add(id(7)).0 = 5;
    let again = storage.add(id(7));
    assert_eq!(*again, Counter(5));
    again.0 += 1;

    assert_eq!(storage.len(), 1);
    assert_eq!(storage.get(id(7)), Some(&Counter(6)));
}

#[test]
fn test_remove_absent() {
    let mut storage = storage::<Counter>();
    storage.add(id(1));

    assert!(!storage.remove(id(2)));
    assert_eq!(storage.len(), 1);
    assert!(storage.remove(id(1)));
    assert!(!storage.remove(id(1)));
    assert!(storage.is_empty());
}

#[test]
fn test_remove_reindexes_moved_entry() {
    let mut storage = storage::<Counter>();
    for value in 1..=5 {
        storage.insert(id(value), Counter(value as i32)).unwrap();
    }

    assert!(storage.remove(id(2)));
    assert!(storage.remove(id(1)));

    for value in 3..=5 {
        assert_eq!(storage.get(id(value)), Some(&Counter(value as i32)));
    }
    assert_eq!(storage.len(), 3);
    for (entity, component) in storage.iter() {
        assert_eq!(component.0 as u64, entity.id().get());
    }
}

#[test]
fn test_remove_then_add() {
    let mut storage = storage::<Counter>();
    storage.add(id(3)).0 = 10;
    assert!(storage.remove(id(3)));
    assert_eq!(storage.get(id(3)), None);
    assert_eq!(*storage.add(id(3)), Counter::default());
}

#[test]
fn test_replace() {
    let mut storage = storage::<Counter>();
    assert_eq!(storage.replace(id(1), Counter(123)), None);
    assert_eq!(storage.replace(id(1), Counter(456)), Some(Counter(123)));
    assert_eq!(storage.take(id(1)), Some(Counter(456)));
    assert_eq!(storage.take(id(1)), None);
}

#[test]
#[should_panic]
fn test_index() {
    let mut storage = storage::<Counter>();
    storage.add(id(1));
    storage[id(1)] = Counter(1);
    assert_eq!(storage[id(1)], Counter(1));

    let _component = storage[id(2)];
}

#[test]
fn test_iterator() {
    let mut storage = storage::<Counter>();
    for int in 0..100 {
        storage.insert(id(int + 1), Counter(int as i32)).unwrap();
    }

    for (_, component) in storage.iter_mut() {
        component.0 += 10;
    }
    for ((_, component), value) in storage.iter().zip(10..110) {
        assert_eq!(component.0, value);
    }
    assert_eq!(storage.iter().len(), 100);

    let entities: HashSet<_> = storage.entities().map(|entity| entity.id()).collect();
    assert_eq!(entities.len(), 100);
    assert!(entities.iter().all(|id| storage.contains(*id)));
}

#[test]
fn test_iterator_restartable() {
    let mut storage = storage::<Label>();
    storage.insert(id(1), Label("a")).unwrap();
    storage.insert(id(2), Label("b")).unwrap();

    let iter = storage.iter();
    let first: Vec<_> = iter.clone().map(|(_, label)| label.0).collect();
    let second: Vec<_> = iter.map(|(_, label)| label.0).collect();
    assert_eq!(first, second);
    assert_eq!(first, storage.components().map(|label| label.0).collect::<Vec<_>>());
}

#[test]
fn test_iterator_entities_owned_by_universe() {
    let universe = UniverseId::next();
    let mut storage = ComponentStorage::<Counter>::new(universe);
    storage.add(id(1));
    storage.add(id(2));

    for (entity, _) in &storage {
        assert_eq!(entity.universe(), universe);
    }
    for (_, component) in &mut storage {
        component.0 = -1;
    }
    assert!(storage.components().all(|component| component.0 == -1));
}

#[test]
fn test_erased_storage() {
    let mut storage = storage::<Label>();
    storage.add(id(1));

    let erased: &mut dyn AnyStorage = &mut storage;
    assert_eq!(erased.component_type().id(), Label::component_id());
    assert!(erased.contains(id(1)));
    assert!(erased.remove(id(1)));
    assert!(!erased.remove(id(1)));
    assert!(erased.is_empty());
}
