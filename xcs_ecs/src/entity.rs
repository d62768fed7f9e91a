//! Utilities for *entities* in ECS.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier of the *entity* of ECS.
///
/// Identifiers are unique among live entities of one [`Universe`](crate::Universe)
/// and may be reused after the entity holding it was destroyed.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct UniqueId(u64);

impl UniqueId {
    /// Sentinel value which never names an entity.
    pub const NONE: Self = Self(0);

    /// Creates identifier from raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value of this identifier.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is the [`UniqueId::NONE`] sentinel.
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE.0
    }
}

impl Default for UniqueId {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<u64> for UniqueId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

/// Process-wide identity of a [`Universe`](crate::Universe).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniverseId(u64);

static UNIVERSE_COUNT: AtomicU64 = AtomicU64::new(1);

impl UniverseId {
    /// Allocates the next universe identity.
    ///
    /// # Panics
    ///
    /// Panics if more than [`u64::MAX`] universes were created.
    ///
    pub(crate) fn next() -> Self {
        UNIVERSE_COUNT
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
                count.checked_add(1)
            })
            .map(Self)
            .expect("too many universes were created")
    }

    /// Raw value of this identity.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Handle of the *entity* of ECS.
///
/// Pairs an identifier with the universe which owns it.
/// Handle carries no component data and is only meaningful
/// for the universe which created it.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    universe: UniverseId,
    id: UniqueId,
}

impl Entity {
    pub(crate) const fn new(universe: UniverseId, id: UniqueId) -> Self {
        Self { universe, id }
    }

    /// Identity of the universe which owns this entity.
    pub const fn universe(self) -> UniverseId {
        self.universe
    }

    /// Identifier of this entity.
    pub const fn id(self) -> UniqueId {
        self.id
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.universe.0)
    }
}
