//! Utilities for storage of ECS.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::component::{AnyStorage, Component, ComponentStorage, ComponentTypeId};
use crate::config::Config;
use crate::entity::{Entity, UniqueId, UniverseId};
use crate::error::{ComponentError, EntityError};

/// Storage for entities and components of ECS.
///
/// Storage of every component type is created the first time
/// the type is requested and lives as long as the universe itself.
///
pub struct Universe {
    id: UniverseId,
    config: Config,
    /// Identifiers of all live entities.
    entities: BTreeSet<UniqueId>,
    next_id: u64,
    /// Map with identifiers of component types and their storages.
    storages: HashMap<ComponentTypeId, Box<dyn AnyStorage>>,
}

impl Universe {
    /// Creates an empty universe with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty universe with given configuration.
    pub fn with_config(config: Config) -> Self {
        let id = UniverseId::next();
        log::debug!("universe {:?} created with id {}", config.name(), id.get());
        Self {
            id,
            config,
            entities: BTreeSet::new(),
            next_id: 1,
            storages: HashMap::new(),
        }
    }

    /// Identity of this universe.
    pub fn id(&self) -> UniverseId {
        self.id
    }

    /// Configuration this universe was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Count of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if there are no live entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Creates new entity with identifier which is not used by any live entity.
    pub fn create_entity(&mut self) -> Entity {
        let id = loop {
            let id = UniqueId::new(self.next_id);
            // Identifier zero is skipped on wrap around.
            self.next_id = self.next_id.wrapping_add(1).max(1);
            if self.entities.insert(id) {
                break id;
            }
        };
        log::trace!("entity {} created in universe {:?}", id, self.config.name());
        Entity::new(self.id, id)
    }

    /// Creates new entity with explicitly chosen identifier.
    ///
    /// # Errors
    ///
    /// Returns an error without changing anything if the identifier is used by
    /// a live entity or is [`UniqueId::NONE`].
    ///
    pub fn create_entity_with_id(&mut self, id: UniqueId) -> Result<Entity, EntityError> {
        if id.is_none() {
            return Err(EntityError::ReservedId);
        }
        if !self.entities.insert(id) {
            return Err(EntityError::AlreadyExists(id));
        }
        log::trace!("entity {} created in universe {:?}", id, self.config.name());
        Ok(Entity::new(self.id, id))
    }

    /// Looks up live entity by its identifier.
    pub fn find_entity(&self, id: UniqueId) -> Option<Entity> {
        self.entities
            .contains(&id)
            .then(|| Entity::new(self.id, id))
    }

    /// Returns `true` if entity belongs to this universe and is alive.
    pub fn contains(&self, entity: Entity) -> bool {
        entity.universe() == self.id && self.entities.contains(&entity.id())
    }

    /// Returns iterator over all live entities in ascending order of identifiers.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        let universe = self.id;
        self.entities.iter().map(move |&id| Entity::new(universe, id))
    }

    /// Destroys entity and detaches all of its components.
    ///
    /// Returns `false` and does nothing if entity belongs to another universe
    /// or was already destroyed.
    ///
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if entity.universe() != self.id {
            log::warn!(
                "entity {} of another universe cannot be destroyed by universe {:?}",
                entity,
                self.config.name(),
            );
            return false;
        }
        let id = entity.id();
        if !self.entities.remove(&id) {
            return false;
        }
        for storage in self.storages.values_mut() {
            storage.remove(id);
        }
        log::trace!("entity {} destroyed in universe {:?}", id, self.config.name());
        true
    }

    /// Destroys all entities. Storages stay alive but empty.
    pub fn clear(&mut self) {
        self.entities.clear();
        for storage in self.storages.values_mut() {
            storage.clear();
        }
    }

    /// Retrieves storage of components of type `T`, creating it if necessary.
    pub fn storage_mut<T>(&mut self) -> &mut ComponentStorage<T>
    where
        T: Component,
    {
        let meta = T::meta();
        let (universe, name) = (self.id, self.config.name());
        let capacity = self.config.storage_capacity();
        self.storages
            .entry(meta.id())
            .or_insert_with(|| {
                log::debug!("storage of {} created in universe {:?}", meta, name);
                meta.create_storage(universe, capacity)
            })
            .as_any_mut()
            .downcast_mut()
            .expect("storage must match its component type")
    }

    /// Retrieves storage of components of type `T` if it was already created.
    pub fn storage<T>(&self) -> Option<&ComponentStorage<T>>
    where
        T: Component,
    {
        let boxed = self.storages.get(&T::component_id())?;
        boxed.as_any().downcast_ref()
    }

    /// Returns iterator over all created storages.
    pub fn storages(&self) -> impl Iterator<Item = &(dyn AnyStorage + 'static)> + '_ {
        self.storages.values().map(|storage| &**storage)
    }

    /// Attaches default component of type `T` to the entity.
    ///
    /// If component was already attached, it is returned unchanged.
    /// Returns [`None`] if the entity is not alive in this universe.
    ///
    pub fn add_component<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component + Default,
    {
        let id = self.check(entity).ok()?;
        Some(self.storage_mut().add(id))
    }

    /// Inserts component of type `T` and attaches it to the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not alive in this universe
    /// or component was already attached to it.
    ///
    pub fn insert_component<T>(&mut self, entity: Entity, component: T) -> Result<&mut T, ComponentError>
    where
        T: Component,
    {
        let id = self.check(entity)?;
        self.storage_mut().insert(id, component)
    }

    /// Retrieves an immutable reference to component of type `T` attached to the entity.
    pub fn get_component<T>(&self, entity: Entity) -> Option<&T>
    where
        T: Component,
    {
        let id = self.check(entity).ok()?;
        self.storage()?.get(id)
    }

    /// Retrieves a mutable reference to component of type `T` attached to the entity.
    pub fn get_component_mut<T>(&mut self, entity: Entity) -> Option<&mut T>
    where
        T: Component,
    {
        let id = self.check(entity).ok()?;
        self.storage_mut().get_mut(id)
    }

    /// Returns `true` if component of type `T` is attached to the entity.
    pub fn has_component<T>(&self, entity: Entity) -> bool
    where
        T: Component,
    {
        self.get_component::<T>(entity).is_some()
    }

    /// Removes component of type `T` and detaches it from the entity.
    ///
    /// Returns `true` if component was attached to the entity.
    ///
    pub fn remove_component<T>(&mut self, entity: Entity) -> bool
    where
        T: Component,
    {
        match self.check(entity) {
            Ok(id) => self.storage_mut::<T>().remove(id),
            Err(_) => false,
        }
    }

    fn check(&self, entity: Entity) -> Result<UniqueId, ComponentError> {
        if entity.universe() != self.id {
            return Err(ComponentError::ForeignEntity(entity));
        }
        if !self.entities.contains(&entity.id()) {
            return Err(ComponentError::DeadEntity(entity));
        }
        Ok(entity.id())
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let storages: Vec<_> = self
            .storages()
            .map(|storage| (storage.component_type().name(), storage.len()))
            .collect();
        f.debug_struct("Universe")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("entities", &self.entities)
            .field("storages", &storages)
            .finish()
    }
}
