//! Untyped values.
//!
//! - [`Value`]: nil or any reflected value.
//! - [`Mapping`]: a string-keyed map of [`Value`]s.
//! - [`mapping!`](crate::mapping): builds a [`Mapping`] in place.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use crate::Reflect;
use crate::__macro_exports::zero_of;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed value: nil, or any reflected value.
///
/// A `Value` never directly holds another `Value`, constructors unwrap it.
///
/// # Examples
///
/// ```
/// use mapx_reflect::Value;
///
/// let v = Value::new(3_i64);
/// assert_eq!(v.downcast_ref::<i64>(), Some(&3));
///
/// let nested = Value::new(Value::new("a"));
/// assert_eq!(nested.downcast_ref::<&str>(), Some(&"a"));
///
/// assert!(Value::new(Value::Nil).is_nil());
/// ```
#[derive(Default)]
pub enum Value {
    #[default]
    Nil,
    Any(Box<dyn Reflect>),
}

impl Value {
    /// Wraps a reflected value.
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self::from_boxed(Box::new(value))
    }

    /// Wraps a boxed reflected value, unwrapping a boxed `Value`.
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        match value.take::<Value>() {
            Ok(value) => value,
            Err(value) => Self::Any(value),
        }
    }

    /// Returns `true` for [`Value::Nil`].
    #[inline]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns the held value, or `None` for nil.
    #[inline]
    pub fn get(&self) -> Option<&dyn Reflect> {
        match self {
            Self::Nil => None,
            Self::Any(value) => Some(&**value),
        }
    }

    /// Returns the held value mutably, or `None` for nil.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        match self {
            Self::Nil => None,
            Self::Any(value) => Some(&mut **value),
        }
    }

    /// Downcasts the held value to `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.get()?.downcast_ref::<T>()
    }

    /// Downcasts the held value to `T` mutably.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.get_mut()?.downcast_mut::<T>()
    }

    /// Returns the held value, or `None` for nil.
    #[inline]
    pub fn into_inner(self) -> Option<Box<dyn Reflect>> {
        match self {
            Self::Nil => None,
            Self::Any(value) => Some(value),
        }
    }

    /// Takes the held value as `T`, or returns `self` back.
    pub fn take<T: Any>(self) -> Result<T, Self> {
        match self {
            Self::Nil => Err(Self::Nil),
            Self::Any(value) => value.take::<T>().map_err(Self::Any),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Self::Nil => Self::Nil,
            Self::Any(value) => Self::Any(value.reflect_clone()),
        }
    }
}

impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.reflect_partial_eq(other) == Some(true)
    }
}

impl fmt::Debug for Value {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

impl From<Box<dyn Reflect>> for Value {
    #[inline]
    fn from(value: Box<dyn Reflect>) -> Self {
        Self::from_boxed(value)
    }
}

impl TypePath for Value {
    #[inline]
    fn type_path() -> &'static str {
        "mapx_reflect::value::Value"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Value"
    }
}

impl Typed for Value {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(OpaqueInfo::new::<Self>().with_zero(zero_of::<Self>)))
    }
}

impl Reflect for Value {
    // A `Value` accepts any value.
    #[inline]
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = Self::from_boxed(value);
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Dynamic
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dynamic(self)
    }

    #[inline]
    fn reflect_clone(&self) -> Box<dyn Reflect> {
        Box::new(self.clone())
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        let other = match other.downcast_ref::<Value>() {
            Some(Self::Nil) => return Some(self.is_nil()),
            Some(Self::Any(other)) => &**other,
            None => other,
        };
        match self {
            Self::Nil => Some(false),
            Self::Any(value) => value.reflect_partial_eq(other),
        }
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.pad("nil"),
            Self::Any(value) => value.reflect_debug(f),
        }
    }
}

// -----------------------------------------------------------------------------
// Mapping

/// A string-keyed map of [`Value`]s, the untyped side of the codec.
///
/// Uses the fixed hash state of [`mapx_utils`], create it with
/// `Mapping::default()` or [`mapping!`](crate::mapping).
pub type Mapping = mapx_utils::hash::HashMap<String, Value>;

/// Builds a [`Mapping`](crate::Mapping).
///
/// Keys are anything `Into<String>`, values anything reflected.
/// A [`Value`](crate::Value) is stored as is.
///
/// # Examples
///
/// ```
/// use mapx_reflect::{Value, mapping};
///
/// let map = mapping! {
///     "name" => "mapx",
///     "size" => 3_i64,
///     "tags" => vec![Value::new(1_i64)],
///     "none" => Value::Nil,
/// };
///
/// assert_eq!(map.len(), 4);
/// assert!(map["none"].is_nil());
/// assert_eq!(map["size"].downcast_ref::<i64>(), Some(&3));
/// ```
#[macro_export]
macro_rules! mapping {
    () => {
        <$crate::Mapping as ::core::default::Default>::default()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = <$crate::Mapping as ::core::default::Default>::default();
        $(
            map.insert(
                ::core::convert::Into::<$crate::__macro_exports::String>::into($key),
                $crate::Value::new($value),
            );
        )+
        map
    }};
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::{Mapping, Value};
    use crate::Reflect;
    use crate::info::{DynamicTyped, ReflectKind};

    #[test]
    fn value_never_nests() {
        let inner = Value::new(1_u8);
        let outer = Value::new(inner.clone());
        assert_eq!(outer, inner);
        assert_eq!(outer.downcast_ref::<u8>(), Some(&1));

        let boxed: Box<dyn Reflect> = Box::new(Value::Nil);
        assert!(Value::from_boxed(boxed).is_nil());
    }

    #[test]
    fn value_compares_with_plain_values() {
        let v = Value::new(String::from("a"));
        assert_eq!(v.reflect_partial_eq(&String::from("a")), Some(true));
        assert_eq!(Value::Nil.reflect_partial_eq(&Value::Nil), Some(true));
        assert_eq!(Value::Nil.reflect_partial_eq(&1_u8), Some(false));
        assert_ne!(Value::new(1_i32), Value::Nil);
    }

    #[test]
    fn set_accepts_anything() {
        let mut v = Value::Nil;
        assert!(v.set(Box::new(vec![1_u8])).is_ok());
        assert_eq!(v.downcast_ref::<Vec<u8>>(), Some(&vec![1]));
        assert_eq!(v.reflect_kind(), ReflectKind::Dynamic);
        assert!(v.reflect_type_info().is_dynamic());
    }

    #[test]
    fn mapping_macro() {
        let map: Mapping = mapping! { "a" => 1_i64, String::from("b") => Value::Nil };
        assert_eq!(map.len(), 2);
        assert!(map["b"].is_nil());

        let empty: Mapping = mapping! {};
        assert!(empty.is_empty());
    }

    #[test]
    fn debug_output() {
        let map = mapping! { "a" => 1_i64 };
        assert_eq!(alloc::format!("{:?}", map.as_reflect()), "{\"a\": 1}");
        assert_eq!(alloc::format!("{:?}", Value::Nil), "nil");
    }
}
