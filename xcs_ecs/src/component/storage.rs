//! Utilities for storages of **components** of ECS.

use std::any::Any;
use std::collections::HashMap;
use std::iter::FusedIterator;
use std::mem;
use std::ops::{Index, IndexMut};
use std::slice;

use super::{Component, ComponentMeta};
use crate::entity::{Entity, UniqueId, UniverseId};
use crate::error::ComponentError;

/// Type-erased storage of components.
///
/// Lets the owner of many storages act on them without knowing
/// the concrete component type of each one.
///
pub trait AnyStorage: Any + Send + Sync {
    /// Metadata of the component type stored here.
    fn component_type(&self) -> &'static ComponentMeta;

    /// Removes component attached to the entity, if any.
    ///
    /// Returns `true` if component was removed.
    ///
    fn remove(&mut self, id: UniqueId) -> bool;

    /// Returns `true` if component is attached to the entity.
    fn contains(&self, id: UniqueId) -> bool;

    /// Count of the stored components.
    fn len(&self) -> usize;

    /// Returns `true` if storage holds no components.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all stored components.
    fn clear(&mut self);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Storage for statically typed components of ECS.
///
/// Components are kept densely packed in insertion order, with an index
/// from entity identifier to position. Removal moves the last component
/// into the freed slot, so order is only stable while nothing is removed.
///
/// References returned by this storage must be fetched again after
/// any component was added or removed.
///
#[derive(Debug)]
pub struct ComponentStorage<T>
where
    T: Component,
{
    universe: UniverseId,
    /// Components are actually stored here.
    contents: Vec<(UniqueId, T)>,
    access: HashMap<UniqueId, usize>,
}

impl<T> ComponentStorage<T>
where
    T: Component,
{
    /// Creates an empty component storage owned by the universe.
    pub fn new(universe: UniverseId) -> Self {
        Self::with_capacity(universe, 0)
    }

    /// Creates an empty component storage with preallocated space.
    pub fn with_capacity(universe: UniverseId, capacity: usize) -> Self {
        Self {
            universe,
            contents: Vec::with_capacity(capacity),
            access: HashMap::with_capacity(capacity),
        }
    }

    /// Identity of the universe which owns this storage.
    pub fn universe(&self) -> UniverseId {
        self.universe
    }

    /// Count of the stored components.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Returns `true` if storage holds no components.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Returns `true` if component was already attached to the entity.
    pub fn contains(&self, id: UniqueId) -> bool {
        self.access.contains_key(&id)
    }

    /// Retrieves an immutable reference to component attached to the entity.
    pub fn get(&self, id: UniqueId) -> Option<&T> {
        let &index = self.access.get(&id)?;
        self.contents.get(index).map(|(_, component)| component)
    }

    /// Retrieves a mutable reference to component attached to the entity.
    pub fn get_mut(&mut self, id: UniqueId) -> Option<&mut T> {
        let &index = self.access.get(&id)?;
        self.contents.get_mut(index).map(|(_, component)| component)
    }

    /// Attaches default component to the entity.
    ///
    /// If component was already attached, it is returned unchanged.
    ///
    pub fn add(&mut self, id: UniqueId) -> &mut T
    where
        T: Default,
    {
        let index = match self.access.get(&id) {
            Some(&index) => index,
            None => self.push(id, T::default()),
        };
        &mut self.contents[index].1
    }

    /// Inserts component and attaches it to the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if component was already attached to the entity.
    /// Attached component stays unchanged in that case.
    ///
    pub fn insert(&mut self, id: UniqueId, component: T) -> Result<&mut T, ComponentError> {
        if self.contains(id) {
            return Err(ComponentError::AlreadyAttached {
                component: T::component_id(),
                entity: id,
            });
        }
        let index = self.push(id, component);
        Ok(&mut self.contents[index].1)
    }

    /// Replaces component attached to the entity by value.
    ///
    /// Returns previously attached component, if any.
    ///
    pub fn replace(&mut self, id: UniqueId, component: T) -> Option<T> {
        match self.access.get(&id) {
            Some(&index) => Some(mem::replace(&mut self.contents[index].1, component)),
            None => {
                self.push(id, component);
                None
            }
        }
    }

    /// Removes component and detaches it from the entity.
    ///
    /// Returns `true` if component was attached to the entity.
    ///
    pub fn remove(&mut self, id: UniqueId) -> bool {
        self.take(id).is_some()
    }

    /// Removes component and detaches it from the entity.
    ///
    /// Returns component that was previously attached to the entity.
    ///
    pub fn take(&mut self, id: UniqueId) -> Option<T> {
        let index = self.access.remove(&id)?;
        let (_, component) = self.contents.swap_remove(index);
        if let Some(&(moved, _)) = self.contents.get(index) {
            self.access.insert(moved, index);
        }
        Some(component)
    }

    /// Removes all components.
    pub fn clear(&mut self) {
        self.contents.clear();
        self.access.clear();
    }

    /// Returns immutable iterator over all components with their entities.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            universe: self.universe,
            inner: self.contents.iter(),
        }
    }

    /// Returns mutable iterator over all components with their entities.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            universe: self.universe,
            inner: self.contents.iter_mut(),
        }
    }

    /// Returns iterator over all entities which have component of this type.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        let universe = self.universe;
        self.contents
            .iter()
            .map(move |&(id, _)| Entity::new(universe, id))
    }

    /// Returns immutable iterator over all components.
    pub fn components(&self) -> impl Iterator<Item = &T> {
        self.contents.iter().map(|(_, component)| component)
    }

    /// Returns mutable iterator over all components.
    pub fn components_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.contents.iter_mut().map(|(_, component)| component)
    }

    fn push(&mut self, id: UniqueId, component: T) -> usize {
        let index = self.contents.len();
        self.contents.push((id, component));
        self.access.insert(id, index);
        index
    }
}

impl<T> AnyStorage for ComponentStorage<T>
where
    T: Component,
{
    fn component_type(&self) -> &'static ComponentMeta {
        T::meta()
    }

    fn remove(&mut self, id: UniqueId) -> bool {
        ComponentStorage::remove(self, id)
    }

    fn contains(&self, id: UniqueId) -> bool {
        ComponentStorage::contains(self, id)
    }

    fn len(&self) -> usize {
        ComponentStorage::len(self)
    }

    fn clear(&mut self) {
        ComponentStorage::clear(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Immutable iterator over components with their entities.
pub struct Iter<'a, T> {
    universe: UniverseId,
    inner: slice::Iter<'a, (UniqueId, T)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Entity, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, component) = self.inner.next()?;
        Some((Entity::new(self.universe, *id), component))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            universe: self.universe,
            inner: self.inner.clone(),
        }
    }
}

/// Mutable iterator over components with their entities.
pub struct IterMut<'a, T> {
    universe: UniverseId,
    inner: slice::IterMut<'a, (UniqueId, T)>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (Entity, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, component) = self.inner.next()?;
        Some((Entity::new(self.universe, *id), component))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<'a, T> IntoIterator for &'a ComponentStorage<T>
where
    T: Component,
{
    type Item = (Entity, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ComponentStorage<T>
where
    T: Component,
{
    type Item = (Entity, &'a mut T);
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Index<UniqueId> for ComponentStorage<T>
where
    T: Component,
{
    type Output = T;

    fn index(&self, id: UniqueId) -> &Self::Output {
        self.get(id)
            .expect("there is no component attached to the entity")
    }
}

impl<T> IndexMut<UniqueId> for ComponentStorage<T>
where
    T: Component,
{
    fn index_mut(&mut self, id: UniqueId) -> &mut Self::Output {
        self.get_mut(id)
            .expect("there is no component attached to the entity")
    }
}
