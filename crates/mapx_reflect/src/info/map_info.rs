use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, ZeroFn};
use crate::info::{impl_type_fn, impl_zero_fn};
use crate::ops::Map;

/// A container for compile-time map info.
///
/// Reflected maps are always keyed by `String`, only the value type varies.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use mapx_reflect::info::Typed;
///
/// let info = <BTreeMap<String, u8> as Typed>::type_info().as_map().unwrap();
///
/// assert!(info.value_is::<u8>());
/// ```
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    value_id: TypeId,
    value_info: fn() -> &'static TypeInfo,
    zero: Option<ZeroFn>,
}

impl MapInfo {
    impl_type_fn!(ty);
    impl_zero_fn!(zero);

    /// Creates a new [`MapInfo`].
    #[inline]
    pub const fn new<TMap: Map + TypePath, TValue: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            value_id: TypeId::of::<TValue>(),
            value_info: TValue::type_info,
            zero: None,
        }
    }

    /// Returns the [`TypeId`] of map values.
    #[inline]
    pub const fn value_id(&self) -> TypeId {
        self.value_id
    }

    /// Returns `true` if the value type is `T`.
    #[inline]
    pub fn value_is<T: Any>(&self) -> bool {
        self.value_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of map values.
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}
