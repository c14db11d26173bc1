//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: stable type path and short name of a type.
//! - [`DynamicTypePath`]: dynamic dispatch for `TypePath`.
//! - [`Type`]: a `TypeId` with the type's path functions.
//! - [`TypeInfo`]: an enum of per-kind information:
//!     - [`StructInfo`]: named fields, capabilities, zero constructor.
//!     - [`TupleStructInfo`]: unnamed fields, capabilities, zero constructor.
//!     - [`ListInfo`]: item type (`Vec<T>`).
//!     - [`MapInfo`]: value type of a string-keyed map.
//!     - [`OptionInfo`]: the pointee type of `Option<T>`.
//!     - [`ScalarInfo`]: booleans, numbers and strings.
//!     - [`OpaqueInfo`]: `Value` and types without visible structure.
//! - [`NamedField`] / [`UnnamedField`]: field information.
//! - [`ReflectKind`]: the kind of a type.
//! - [`Typed`] / [`DynamicTyped`]: access to the static `TypeInfo`.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod option_info;
mod scalar_info;
mod struct_info;
mod tuple_struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_info::{impl_type_traits_fn, impl_zero_fn};
pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::{NamedField, UnnamedField};
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use opaque_info::OpaqueInfo;
pub use option_info::OptionInfo;
pub use scalar_info::{ScalarFamily, ScalarInfo, ScalarKind};
pub use struct_info::StructInfo;
pub use tuple_struct_info::TupleStructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo, ZeroFn};
pub use type_path::{DynamicTypePath, Type, TypePath};
pub use typed::{DynamicTyped, Typed};
