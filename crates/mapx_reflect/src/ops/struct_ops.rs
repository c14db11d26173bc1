use crate::Reflect;

/// A trait used to power [struct-like] operations via [reflection].
///
/// Implemented by [`#[derive(Reflect)]`](crate::derive::Reflect) for structs
/// with named fields. Fields are addressed by name or by declaration index,
/// including non-`pub` fields.
///
/// # Examples
///
/// ```
/// use mapx_reflect::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect, Clone)]
/// struct Foo {
///     pub a: i32,
///     b: bool,
/// }
///
/// let mut foo = Foo { a: 1, b: true };
///
/// assert_eq!(foo.field_len(), 2);
/// assert_eq!(foo.name_at(1), Some("b"));
/// assert!(foo.field("c").is_none());
///
/// if let Some(field) = foo.field_mut("a") {
///     *field.downcast_mut::<i32>().unwrap() = 42;
/// }
/// assert_eq!(foo.a, 42);
/// ```
///
/// [struct-like]: https://doc.rust-lang.org/book/ch05-01-defining-structs.html
/// [reflection]: crate
pub trait Struct: Reflect {
    /// Returns the field named `name`, if it exists.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the field named `name` mutably, if it exists.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns the field at `index` (declaration order), if it exists.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index` mutably, if it exists.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field at `index`, if it exists.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of fields.
    fn field_len(&self) -> usize;
}

impl dyn Struct {
    /// Returns an iterator over the field values in declaration order.
    #[inline]
    pub fn iter_fields(&self) -> StructFieldIter<'_> {
        StructFieldIter::new(self)
    }
}

/// An iterator over the field values of a struct.
pub struct StructFieldIter<'a> {
    value: &'a dyn Struct,
    index: usize,
}

impl StructFieldIter<'_> {
    /// Creates a new iterator for the given struct.
    #[inline(always)]
    pub const fn new(value: &dyn Struct) -> StructFieldIter<'_> {
        StructFieldIter { value, index: 0 }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.value.field_at(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.value.field_len();
        (size - self.index, Some(size))
    }
}

impl ExactSizeIterator for StructFieldIter<'_> {}
