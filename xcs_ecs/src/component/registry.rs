//! Process-wide registry of component types.

use std::any::type_name;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lazy_static::lazy_static;

use super::{AnyStorage, Component, ComponentStorage};
use crate::entity::UniverseId;

/// Numeric identifier of the *component* type.
///
/// Identifiers are assigned in registration order starting from 1.
/// They are not stable across runs and must never be persisted.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentTypeId(u32);

impl ComponentTypeId {
    /// Raw value of this identifier.
    pub const fn get(self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize - 1
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

type StorageConstructor = fn(UniverseId, usize) -> Box<dyn AnyStorage>;

/// Metadata of the registered *component* type.
///
/// Exactly one instance exists per component type, living until the process exits.
///
#[derive(Debug)]
pub struct ComponentMeta {
    id: ComponentTypeId,
    name: &'static str,
    type_name: &'static str,
    constructor: StorageConstructor,
}

impl ComponentMeta {
    /// Numeric identifier of the component type.
    pub fn id(&self) -> ComponentTypeId {
        self.id
    }

    /// Display name of the component type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust name of the component type, useful for debugging only.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Creates an empty storage for this component type.
    pub fn create_storage(&self, universe: UniverseId, capacity: usize) -> Box<dyn AnyStorage> {
        (self.constructor)(universe, capacity)
    }
}

impl fmt::Display for ComponentMeta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] = '{}'", self.id, self.name)
    }
}

lazy_static! {
    static ref REGISTRY: Mutex<Vec<&'static ComponentMeta>> = Mutex::new(Vec::new());
}

// Registry is append-only, so a poisoned lock still holds consistent data.
fn registry() -> MutexGuard<'static, Vec<&'static ComponentMeta>> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

fn construct<T>(universe: UniverseId, capacity: usize) -> Box<dyn AnyStorage>
where
    T: Component,
{
    Box::new(ComponentStorage::<T>::with_capacity(universe, capacity))
}

/// Appends new metadata for `T` to the registry.
///
/// Must be called at most once per type: [`Component::meta`] guards it.
pub(super) fn insert<T>(name: &'static str) -> &'static ComponentMeta
where
    T: Component,
{
    let mut registry = registry();
    let id = u32::try_from(registry.len() + 1)
        .map(ComponentTypeId)
        .expect("too many component types were registered");
    let meta: &'static ComponentMeta = Box::leak(Box::new(ComponentMeta {
        id,
        name,
        type_name: type_name::<T>(),
        constructor: construct::<T>,
    }));
    registry.push(meta);
    log::debug!("component {:?} registered as {}", name, id);
    meta
}

/// Registers component type `T`, returning its identifier.
///
/// Meant to be called once per type at startup to make identifiers
/// deterministic. Registering the same type again does nothing.
///
pub fn register<T>() -> ComponentTypeId
where
    T: Component,
{
    T::component_id()
}

/// Returns metadata of all registered component types in registration order.
pub fn registered() -> Vec<&'static ComponentMeta> {
    registry().clone()
}

/// Looks up metadata of the component type by its identifier.
pub fn meta_of(id: ComponentTypeId) -> Option<&'static ComponentMeta> {
    registry().get(id.index()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component;

    #[derive(Default)]
    struct Health(u32);
    component!(Health);

    #[derive(Default)]
    struct Armor(u32);
    component!(Armor, "Armor plating");

    #[derive(Default)]
    struct Mana(u32);
    component!(Mana, "Mana");

    #[test]
    fn test_register_idempotent() {
        let first = register::<Health>();
        let second = register::<Health>();
        assert_eq!(first, second);
        assert_eq!(Health::component_id(), first);
        assert_eq!(Health::meta().name(), "Health");
    }

    #[test]
    fn test_distinct_ids() {
        let health = register::<Health>();
        let armor = register::<Armor>();
        assert_ne!(health, armor);
        assert_eq!(meta_of(armor).map(ComponentMeta::name), Some("Armor plating"));
    }

    #[test]
    fn test_registration_order() {
        let mana = register::<Mana>();
        let all = registered();
        let position = all
            .iter()
            .position(|meta| meta.id() == mana)
            .expect("registered type must be enumerated");
        assert_eq!(all[position].name(), "Mana");
        assert!(all.windows(2).all(|pair| pair[0].id() < pair[1].id()));
    }

    #[test]
    fn test_create_storage() {
        let meta = Armor::meta();
        let universe = UniverseId::next();
        let storage = meta.create_storage(universe, 8);
        assert_eq!(storage.component_type().id(), meta.id());
        assert!(storage.is_empty());
        assert!(storage
            .as_any()
            .downcast_ref::<ComponentStorage<Armor>>()
            .is_some());
    }

    #[test]
    fn test_display() {
        let meta = Mana::meta();
        assert_eq!(meta.to_string(), format!("[@{}] = 'Mana'", meta.id().get()));
        assert!(meta.type_name().ends_with("Mana"));
    }
}
