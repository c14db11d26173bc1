use core::any::Any;

/// A capability supported by a type, stored in its [`TypeTraits`] table.
///
/// Usually generated by [`reflect_trait`](crate::derive::reflect_trait).
///
/// [`TypeTraits`]: crate::registry::TypeTraits
pub trait TypeTrait: Any + Send + Sync {}

impl dyn TypeTrait {
    /// Downcasts to the concrete capability.
    #[inline]
    pub fn downcast_ref<T: TypeTrait>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Returns `true` if this is the capability `T`.
    #[inline]
    pub fn is<T: TypeTrait>(&self) -> bool {
        <dyn Any>::is::<T>(self)
    }
}
