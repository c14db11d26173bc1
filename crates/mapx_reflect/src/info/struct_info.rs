use alloc::boxed::Box;

use crate::info::{NamedField, Type, TypePath, ZeroFn};
use crate::info::{impl_type_fn, impl_type_traits_fn, impl_zero_fn};
use crate::ops::Struct;
use crate::registry::TypeTraits;

/// A container for compile-time named struct info.
///
/// # Examples
///
/// ```rust
/// use mapx_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Clone)]
/// struct A {
///     val: f32,
/// }
///
/// let info = <A as Typed>::type_info().as_struct().unwrap();
///
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.index_of("val"), Some(0));
/// ```
#[derive(Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    type_traits: TypeTraits,
    zero: Option<ZeroFn>,
}

impl StructInfo {
    impl_type_fn!(ty);
    impl_zero_fn!(zero);
    impl_type_traits_fn!(type_traits);

    /// Create a new [`StructInfo`].
    ///
    /// The order of internal fields is fixed, depends on the input order.
    pub fn new<T: Struct + TypePath>(fields: &[NamedField]) -> Self {
        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            type_traits: TypeTraits::new(),
            zero: None,
        }
    }

    /// Returns the [`NamedField`] for the given `name`, if present.
    ///
    /// Structs are small, a linear scan beats hashing here.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the [`NamedField`] at the given index, if present.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields in **declaration order**.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    /// Returns the index for the given field `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
