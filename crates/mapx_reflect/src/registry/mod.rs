//! Capabilities: per-type tables of trait casts.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: a capability value stored in a type's table.
//! - [`TypeTraits`]: the table, held by [`TypeInfo`].
//! - [`FromType`]: creates a capability value for a concrete type.
//! - [`Capability`]: a capability that casts `dyn Reflect` to a trait object.
//! - Built-in capabilities:
//!     - [`ReflectAny`]: the empty capability, matches every value.
//!     - [`ReflectDisplay`]: casts to [`core::fmt::Display`].
//! - [`reflect_trait`]: an attribute macro generating a `Reflect{Trait}` capability.
//!
//! Types declare their capabilities with `#[reflect(type_trait = (...))]`:
//!
//! ```
//! use core::fmt;
//! use mapx_reflect::{derive::Reflect, info::Typed, registry::ReflectDisplay};
//!
//! #[derive(Reflect, Clone)]
//! #[reflect(type_trait = (ReflectDisplay))]
//! struct Id(pub u32);
//!
//! impl fmt::Display for Id {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "#{}", self.0)
//!     }
//! }
//!
//! assert!(Id::type_info().type_traits().contains::<ReflectDisplay>());
//! ```
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`reflect_trait`]: crate::derive::reflect_trait

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod capability;
mod from_type;
mod type_trait;
mod type_traits;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::{ReflectAny, ReflectDisplay};
pub use capability::Capability;
pub use from_type::FromType;
pub use type_trait::TypeTrait;
pub use type_traits::TypeTraits;
