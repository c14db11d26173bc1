use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, ZeroFn};
use crate::info::{impl_type_fn, impl_zero_fn};
use crate::ops::Optional;

/// A container for compile-time `Option<T>` info.
///
/// `Option` plays the role of a nullable pointer: `None` is nil and
/// a `Some` can be allocated from the zero value of `T`.
///
/// # Examples
///
/// ```rust
/// use mapx_reflect::info::Typed;
///
/// let info = <Option<u8> as Typed>::type_info().as_option().unwrap();
///
/// assert!(info.some_is::<u8>());
/// ```
#[derive(Clone, Debug)]
pub struct OptionInfo {
    ty: Type,
    some_id: TypeId,
    some_info: fn() -> &'static TypeInfo,
    zero: Option<ZeroFn>,
}

impl OptionInfo {
    impl_type_fn!(ty);
    impl_zero_fn!(zero);

    /// Creates a new [`OptionInfo`].
    #[inline]
    pub const fn new<TOption: Optional + TypePath, TSome: Reflect + Typed>() -> Self {
        Self {
            ty: Type::of::<TOption>(),
            some_id: TypeId::of::<TSome>(),
            some_info: TSome::type_info,
            zero: None,
        }
    }

    /// Returns the [`TypeId`] of the pointee.
    #[inline]
    pub const fn some_id(&self) -> TypeId {
        self.some_id
    }

    /// Returns `true` if the pointee type is `T`.
    #[inline]
    pub fn some_is<T: Any>(&self) -> bool {
        self.some_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the pointee.
    #[inline]
    pub fn some_info(&self) -> &'static TypeInfo {
        (self.some_info)()
    }
}
