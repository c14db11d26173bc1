use alloc::boxed::Box;

use crate::Reflect;

/// A trait used to power list operations via reflection.
///
/// Implemented for `Vec<T>`.
///
/// # Examples
///
/// ```
/// use mapx_reflect::ops::List;
///
/// let mut list: Vec<u8> = vec![1, 2];
///
/// assert!(List::push(&mut list, Box::new(3_u8)).is_ok());
/// assert!(List::push(&mut list, Box::new(4_i32)).is_err());
/// assert_eq!(list, [1, 2, 3]);
///
/// let list: &dyn List = &list;
/// assert_eq!(list.iter().count(), 3);
/// ```
pub trait List: Reflect {
    /// Returns the element at `index`, if it exists.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the element at `index` mutably, if it exists.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Appends an element.
    ///
    /// Returns the value back if its type is not the element type.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Removes all elements.
    fn clear(&mut self);

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the list has no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl dyn List {
    /// Returns an iterator over the elements.
    #[inline]
    pub fn iter(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }
}

/// An iterator over the elements of a list.
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl ListItemIter<'_> {
    /// Creates a new iterator for the given list.
    #[inline(always)]
    pub const fn new(list: &dyn List) -> ListItemIter<'_> {
        ListItemIter { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len();
        (size - self.index, Some(size))
    }
}

impl ExactSizeIterator for ListItemIter<'_> {}
