use crate::Reflect;
use crate::registry::TypeTrait;

/// A [`TypeTrait`] that casts a reflected value to a trait object.
///
/// Codec registries key conversion functions by capability: a function
/// registered for `C` applies to every value whose type carries `C` in its
/// [`TypeTraits`](crate::registry::TypeTraits).
///
/// `METHODS` is the number of methods of the underlying trait. A capability
/// with zero methods that every value satisfies returns itself from
/// [`universal`](Capability::universal), see
/// [`ReflectAny`](crate::registry::ReflectAny).
///
/// Generated by [`reflect_trait`](crate::derive::reflect_trait).
pub trait Capability: TypeTrait {
    /// The trait object this capability casts to.
    type Object: ?Sized + 'static;

    /// Number of methods of the underlying trait.
    const METHODS: usize;

    /// Casts a value of the capability's type to the trait object.
    ///
    /// Returns `None` if `value` is not of that type.
    fn get<'a>(&self, value: &'a dyn Reflect) -> Option<&'a Self::Object>;

    /// Casts a value of the capability's type to the mutable trait object.
    fn get_mut<'a>(&self, value: &'a mut dyn Reflect) -> Option<&'a mut Self::Object>;

    /// Returns the capability if it does not depend on the type of the value.
    #[inline]
    fn universal() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}
