//! Utilities for *components* in ECS.

use std::any::Any;

use once_cell::sync::OnceCell;

pub use registry::*;
pub use storage::*;

mod registry;
mod storage;
mod tests;

/// Objects of this trait represent *component* of ECS.
///
/// Components should be just plain data.
/// Implement this trait with [`component!`](crate::component!) macro
/// instead of doing it by hand.
///
pub trait Component: Any + Send + Sync + Sized {
    /// Human-readable name of this component type.
    const NAME: &'static str;

    #[doc(hidden)]
    fn meta_cell() -> &'static OnceCell<&'static ComponentMeta>;

    /// Retrieves metadata of this component type.
    ///
    /// Type is registered on the first call, so every later call
    /// only reads the per-type slot.
    ///
    fn meta() -> &'static ComponentMeta {
        *Self::meta_cell().get_or_init(|| registry::insert::<Self>(Self::NAME))
    }

    /// Retrieves numeric identifier of this component type.
    fn component_id() -> ComponentTypeId {
        Self::meta().id()
    }
}

/// Declares a type as a *component* of ECS.
///
/// Display name of the component defaults to the name of the type.
/// Type must be concrete: every invocation owns exactly one metadata slot.
///
/// # Example
///
/// ```
/// use xcs_ecs::component;
///
/// #[derive(Default)]
/// struct Position {
///     x: i32,
///     y: i32,
/// }
///
/// component!(Position, "Position");
/// ```
#[macro_export]
macro_rules! component {
    ($ty:ty $(,)?) => {
        $crate::component!($ty, stringify!($ty));
    };
    ($ty:ty, $name:expr $(,)?) => {
        impl $crate::Component for $ty {
            const NAME: &'static str = $name;

            fn meta_cell() -> &'static $crate::__private::OnceCell<&'static $crate::ComponentMeta> {
                static META: $crate::__private::OnceCell<&'static $crate::ComponentMeta> =
                    $crate::__private::OnceCell::new();
                &META
            }
        }
    };
}
