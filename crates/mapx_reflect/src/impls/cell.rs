//! Containers for static storage of type information.
//!
//! This is usually used to implement [`Typed`](crate::info::Typed) and
//! [`TypePath`](crate::info::TypePath).
//!
//! ## NonGenericTypeInfoCell
//!
//! For non generic types, [`NonGenericTypeInfoCell`] stores the [`TypeInfo`]
//! in a [`OnceLock`].
//!
//! There is no `NonGenericTypePathCell` because a string literal does the job.
//!
//! ## GenericTypeCell
//!
//! A `static CELL` inside a generic function is shared by every instantiation,
//! so the generic containers hold a [`TypeIdMap`] behind a [`RwLock`]:
//!
//! - [`GenericTypeInfoCell`]: stores [`TypeInfo`].
//! - [`GenericTypePathCell`]: stores [`String`].
//!
//! Entries are leaked and live for the rest of the program.

use alloc::{boxed::Box, string::String};
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use mapx_utils::TypeIdMap;

use crate::info::TypeInfo;

mod sealed {
    use super::TypeInfo;
    use alloc::string::String;
    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

// -----------------------------------------------------------------------------
// NonGenericTypeCell

/// Container for static storage of non-generic type information.
///
/// See [`NonGenericTypeInfoCell`].
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Container for static storage of non-generic type information.
///
/// ## Example
///
/// ```
/// use mapx_reflect::derive::Reflect;
/// use mapx_reflect::impls::NonGenericTypeInfoCell;
/// use mapx_reflect::info::{NamedField, StructInfo, TypeInfo, Typed};
///
/// #[derive(Reflect, Clone)]
/// #[reflect(typed = false)]
/// struct A2 {
///     pub a: u32,
/// }
///
/// impl Typed for A2 {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Struct(
///             StructInfo::new::<A2>(&[NamedField::new::<u32>("a")])
///         ))
///     }
/// }
///
/// let info = A2::type_info().as_struct().unwrap();
/// assert_eq!(info.field("a").unwrap().type_info().type_path(), "u32");
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns a reference to the value stored in the cell.
    ///
    /// If the cell is empty, it is initialized with `f`.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Container for static storage of type information with generics.
///
/// See [`GenericTypeInfoCell`] and [`GenericTypePathCell`].
pub struct GenericTypeCell<T: TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Container for static storage of type information with generics.
///
/// ## Example
///
/// ```
/// use mapx_reflect::{Reflect, derive::Reflect};
/// use mapx_reflect::impls::GenericTypeInfoCell;
/// use mapx_reflect::info::{TupleStructInfo, TypeInfo, Typed, UnnamedField};
///
/// #[derive(Reflect, Clone)]
/// #[reflect(typed = false)]
/// struct A3<T>(T);
///
/// impl<T: Reflect + Typed + Clone> Typed for A3<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::TupleStruct(
///             TupleStructInfo::new::<Self>(&[UnnamedField::new::<T>(0)])
///         ))
///     }
/// }
///
/// let info = <A3<u64>>::type_info().as_tuple_struct().unwrap();
/// assert_eq!(info.field_at(0).unwrap().type_info().type_path(), "u64");
/// assert_eq!(info.type_name(), "A3<u64>");
/// ```
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Container for static storage of type path with generics.
///
/// ## Example
///
/// ```
/// use mapx_reflect::impls::{self, GenericTypePathCell};
/// use mapx_reflect::info::TypePath;
///
/// struct A4<T>(T);
///
/// impl<T: TypePath> TypePath for A4<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["test::A4<", T::type_path(), ">"]))
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| impls::concat(&["A4<", T::type_name(), ">"]))
///     }
/// }
///
/// assert_eq!(<A4<i32>>::type_path(), "test::A4<i32>");
/// assert_eq!(<A4<u8>>::type_name(), "A4<u8>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Create a empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for the type `G`.
    ///
    /// If there is no entry, a new one is generated from `f`.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // The closure ran without the lock, another thread may have won the race.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
