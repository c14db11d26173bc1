#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `::mapx_reflect`; inside this crate that must
// resolve to `crate`.
extern crate self as mapx_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;
pub mod serde;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
pub use value::{Mapping, Value};

/// Derive and attribute macros, see [`derive::Reflect`].
pub mod derive {
    pub use mapx_reflect_derive::{Reflect, TypePath, reflect_trait};
}
