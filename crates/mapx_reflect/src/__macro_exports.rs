//! Items referenced by generated code.

pub use alloc::boxed::Box;
pub use alloc::string::String;

use crate::Reflect;

/// Boxes `T::default()` as a zero value.
///
/// Used as the `zero` constructor of types marked `#[reflect(default)]`.
#[inline]
pub fn zero_of<T: Reflect + Default>() -> Box<dyn Reflect> {
    Box::new(T::default())
}
