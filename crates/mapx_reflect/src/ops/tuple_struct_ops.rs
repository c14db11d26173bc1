use crate::Reflect;

/// A trait used to power tuple-struct operations via reflection.
///
/// A tuple struct with a single field is a *newtype*, the codec's
/// equivalent of a named scalar type.
///
/// # Examples
///
/// ```
/// use mapx_reflect::{derive::Reflect, ops::TupleStruct};
///
/// #[derive(Reflect, Clone)]
/// struct Celsius(pub f64);
///
/// let c = Celsius(21.5);
/// assert_eq!(c.field_len(), 1);
/// assert_eq!(c.field_at(0).unwrap().downcast_ref::<f64>(), Some(&21.5));
/// ```
pub trait TupleStruct: Reflect {
    /// Returns the field at `index`, if it exists.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the field at `index` mutably, if it exists.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of fields.
    fn field_len(&self) -> usize;
}
