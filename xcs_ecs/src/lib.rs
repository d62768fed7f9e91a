//! Sparse, type-indexed component registry for entity-component architectures.
//!
//! Every component type declared with [`component!`] gets a process-wide
//! [`ComponentMeta`] with a numeric [`ComponentTypeId`]. A [`Universe`] owns
//! live [`Entity`] identifiers and one [`ComponentStorage`] per requested
//! component type, and detaches all components of an entity when it is destroyed.
//!
//! ```
//! use xcs_ecs::{component, Universe};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Position {
//!     x: i32,
//!     y: i32,
//! }
//! component!(Position);
//!
//! let mut universe = Universe::new();
//! let entity = universe.create_entity();
//! *universe.add_component::<Position>(entity).unwrap() = Position { x: 1, y: 2 };
//! assert_eq!(
//!     universe.get_component::<Position>(entity),
//!     Some(&Position { x: 1, y: 2 }),
//! );
//!
//! universe.destroy_entity(entity);
//! assert!(universe.get_component::<Position>(entity).is_none());
//! ```

pub use component::{
    meta_of, register, registered, AnyStorage, Component, ComponentMeta, ComponentStorage,
    ComponentTypeId, Iter, IterMut,
};
pub use config::Config;
pub use entity::{Entity, UniqueId, UniverseId};
pub use error::{ComponentError, EntityError};
pub use universe::Universe;

pub mod component;
pub mod config;
pub mod error;

mod entity;
mod universe;


#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;
}
