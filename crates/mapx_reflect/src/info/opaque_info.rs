use crate::info::{Type, TypePath, ZeroFn};
use crate::info::{impl_type_fn, impl_type_traits_fn, impl_zero_fn};
use crate::registry::TypeTraits;

/// A container for compile-time info of types without visible structure.
///
/// Used by [`TypeInfo::Opaque`] (e.g. `SystemTime`, unit structs) and
/// [`TypeInfo::Dynamic`] ([`Value`]).
///
/// Opaque values are copied verbatim by the codec.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use mapx_reflect::info::Typed;
///
/// let info = <Duration as Typed>::type_info().as_opaque().unwrap();
///
/// assert!(info.type_is::<Duration>());
/// ```
///
/// [`TypeInfo::Opaque`]: crate::info::TypeInfo::Opaque
/// [`TypeInfo::Dynamic`]: crate::info::TypeInfo::Dynamic
/// [`Value`]: crate::Value
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
    type_traits: TypeTraits,
    zero: Option<ZeroFn>,
}

impl OpaqueInfo {
    impl_type_fn!(ty);
    impl_zero_fn!(zero);
    impl_type_traits_fn!(type_traits);

    /// Creates a new [`OpaqueInfo`].
    #[inline]
    pub const fn new<T: TypePath>() -> Self {
        Self {
            ty: Type::of::<T>(),
            type_traits: TypeTraits::new(),
            zero: None,
        }
    }
}
