//! Kind traits for data access.
//!
//! ## Menu
//!
//! The following are subtraits of [`Reflect`], each giving data access for one
//! [`ReflectKind`](crate::info::ReflectKind):
//!
//! - [`Struct`]: named structs (`A { .. }`).
//! - [`TupleStruct`]: tuple structs (`A(..)`), including newtypes.
//! - [`List`]: `Vec<T>`.
//! - [`Map`]: string-keyed maps (`HashMap<String, V>`, `BTreeMap<String, V>`).
//! - [`Optional`]: `Option<T>`, the nullable pointer of the codec.
//! - [`Scalar`]: booleans, numbers and strings.
//!
//! [`ReflectRef`] and [`ReflectMut`] are the casts from `dyn Reflect` to these.
//!
//! [`Reflect`]: crate::Reflect

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod list_ops;
mod map_ops;
mod option_ops;
mod scalar_ops;
mod struct_ops;
mod tuple_struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};

pub use list_ops::{List, ListItemIter};
pub use map_ops::Map;
pub use option_ops::Optional;
pub use scalar_ops::{Scalar, ScalarRef};
pub use struct_ops::{Struct, StructFieldIter};
pub use tuple_struct_ops::TupleStruct;
