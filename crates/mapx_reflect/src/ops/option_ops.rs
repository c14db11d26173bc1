use crate::Reflect;

/// A trait used to power `Option<T>` operations via reflection.
///
/// `Option` is the nullable pointer of the codec: `None` is nil, and a
/// pointee can be allocated from the zero value of `T`.
///
/// # Examples
///
/// ```
/// use mapx_reflect::ops::Optional;
///
/// let mut value: Option<u32> = None;
/// assert!(value.value().is_none());
///
/// let inner = value.get_or_insert_zero().unwrap();
/// *inner.downcast_mut::<u32>().unwrap() = 7;
/// assert_eq!(value, Some(7));
///
/// value.set_none();
/// assert_eq!(value, None);
/// ```
pub trait Optional: Reflect {
    /// Returns the pointee, or `None` for nil.
    fn value(&self) -> Option<&dyn Reflect>;

    /// Returns the pointee mutably, or `None` for nil.
    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Sets the value to nil.
    fn set_none(&mut self);

    /// Returns the pointee, allocating the zero value first when nil.
    ///
    /// Returns `None` if the pointee type has no zero value.
    fn get_or_insert_zero(&mut self) -> Option<&mut dyn Reflect>;
}
