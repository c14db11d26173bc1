use alloc::boxed::Box;

use crate::info::{Type, TypePath, UnnamedField, ZeroFn};
use crate::info::{impl_type_fn, impl_type_traits_fn, impl_zero_fn};
use crate::ops::TupleStruct;
use crate::registry::TypeTraits;

/// A container for compile-time tuple struct info.
///
/// A tuple struct with exactly one field is a *newtype*: the decoder
/// converts into its field when the source value has the field's kind.
///
/// # Examples
///
/// ```rust
/// use mapx_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Clone)]
/// struct Meters(f64);
///
/// let info = Meters::type_info().as_tuple_struct().unwrap();
///
/// assert_eq!(info.field_len(), 1);
/// assert!(info.is_newtype());
/// ```
#[derive(Debug)]
pub struct TupleStructInfo {
    ty: Type,
    fields: Box<[UnnamedField]>,
    type_traits: TypeTraits,
    zero: Option<ZeroFn>,
}

impl TupleStructInfo {
    impl_type_fn!(ty);
    impl_zero_fn!(zero);
    impl_type_traits_fn!(type_traits);

    /// Create a new [`TupleStructInfo`].
    pub fn new<T: TupleStruct + TypePath>(fields: &[UnnamedField]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            type_traits: TypeTraits::new(),
            zero: None,
        }
    }

    /// Returns the [`UnnamedField`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&UnnamedField> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &UnnamedField> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the tuple struct has exactly one field.
    #[inline]
    pub fn is_newtype(&self) -> bool {
        self.fields.len() == 1
    }
}
