use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;

use mapx_utils::TypeIdMap;

use crate::registry::TypeTrait;

/// A table of [`TypeTrait`]s keyed by their `TypeId`.
///
/// # Examples
///
/// ```
/// use mapx_reflect::registry::{FromType, ReflectDisplay, TypeTraits};
///
/// let mut traits = TypeTraits::new();
/// assert!(traits.is_empty());
///
/// traits.insert(<ReflectDisplay as FromType<i32>>::from_type());
///
/// let display = traits.get::<ReflectDisplay>().unwrap();
/// assert_eq!(display.get(&5_i32).unwrap().to_string(), "5");
/// ```
pub struct TypeTraits(TypeIdMap<Box<dyn TypeTrait>>);

impl TypeTraits {
    /// Creates an empty table, usable in `static` items.
    #[inline]
    pub const fn new() -> Self {
        Self(TypeIdMap::new())
    }

    /// Inserts a capability, builder style.
    #[inline]
    pub fn with<T: TypeTrait>(mut self, data: T) -> Self {
        self.insert(data);
        self
    }

    /// Inserts a capability, replacing any previous one of the same type.
    #[inline]
    pub fn insert<T: TypeTrait>(&mut self, data: T) {
        self.insert_boxed(TypeId::of::<T>(), Box::new(data));
    }

    #[inline(never)]
    fn insert_boxed(&mut self, type_id: TypeId, data: Box<dyn TypeTrait>) {
        self.0.insert(type_id, data);
    }

    /// Returns the capability `T`, if present.
    #[inline]
    pub fn get<T: TypeTrait>(&self) -> Option<&T> {
        self.get_by_id(TypeId::of::<T>())
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    /// Returns the capability with the given `TypeId`, if present.
    #[inline]
    pub fn get_by_id(&self, type_id: TypeId) -> Option<&dyn TypeTrait> {
        self.0.get(&type_id).map(Box::as_ref)
    }

    /// Returns `true` if the capability `T` is present.
    #[inline]
    pub fn contains<T: TypeTrait>(&self) -> bool {
        self.0.contains_type::<T>()
    }

    /// Returns the number of capabilities.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there is no capability.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TypeTraits {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeTraits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter().map(|(id, _)| id)).finish()
    }
}
