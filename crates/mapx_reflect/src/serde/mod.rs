//! Serialization of reflected values through `serde`.
//!
//! - [`ReflectSerializer`]: serializes any `&dyn Reflect` without the type
//!   implementing `Serialize`.
//! - [`Value`](crate::Value) implements `Serialize` through it.
//!
//! # Serialization Rules
//!
//! | kind | output |
//! |---|---|
//! | `Scalar` | bool, `i64`, `u64`, `f64` or str |
//! | `List` | sequence |
//! | `Map` | map, keys in sorted order |
//! | `Struct` | struct with the exported fields |
//! | `TupleStruct` | newtype struct (one field) or tuple struct |
//! | `Option` | none / some |
//! | `Dynamic` | the held value, unit for nil |
//! | `Opaque` | error |
//!
//! # Examples
//!
//! ```
//! use mapx_reflect::{mapping, serde::ReflectSerializer};
//!
//! let map = mapping! { "b" => vec![1_i64, 2], "a" => true };
//! let json = serde_json::to_string(&ReflectSerializer::new(&map)).unwrap();
//!
//! assert_eq!(json, r#"{"a":true,"b":[1,2]}"#);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use ser::ReflectSerializer;
