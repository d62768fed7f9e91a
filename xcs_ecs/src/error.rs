//! Utilities for ECS error handling.

use thiserror::Error;

use crate::{ComponentTypeId, Entity, UniqueId};

/// Error which can occur while creating an entity with explicit identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("entity {0} already exists")]
    AlreadyExists(UniqueId),

    #[error("identifier {} is reserved for \"no entity\"", UniqueId::NONE)]
    ReservedId,
}

/// Error which can occur while attaching a component to an entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    #[error("component {component} was already attached to the entity {entity}")]
    AlreadyAttached {
        component: ComponentTypeId,
        entity: UniqueId,
    },

    #[error("entity {0} belongs to another universe")]
    ForeignEntity(Entity),

    #[error("entity {0} is not alive")]
    DeadEntity(Entity),
}
