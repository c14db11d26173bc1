use crate::info::Typed;

/// Trait used to generate a [`TypeTrait`] for a concrete type.
///
/// Used by `#[derive(Reflect)]` to fill the capability table of
/// `#[reflect(type_trait = (...))]`.
///
/// # Example
///
/// ```
/// use mapx_reflect::registry::{FromType, ReflectDisplay, TypeTraits};
///
/// let traits = TypeTraits::new()
///     .with(<ReflectDisplay as FromType<String>>::from_type());
///
/// assert!(traits.contains::<ReflectDisplay>());
/// ```
///
/// [`TypeTrait`]: crate::registry::TypeTrait
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
