use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::impls;
use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection in [`mapx_reflect`].
///
/// `Reflect` gives dynamic access to a value without compile-time knowledge
/// of its type. The codec walks structs, lists, maps and scalars through it.
///
/// # Recommendations
///
/// Use [the derive macro for `Reflect`] rather than implementing this trait
/// by hand. The derive macro also implements [`Struct`] or [`TupleStruct`]
/// depending on the shape of the type.
///
/// # Type Information
///
/// `Reflect` extends [`DynamicTypePath`] and [`DynamicTyped`]:
///
/// ```rust
/// # use mapx_reflect::{Reflect, info::{DynamicTypePath, DynamicTyped}};
/// let value = 10i32.into_boxed_reflect();
/// assert_eq!(value.reflect_type_path(), "i32");
/// assert!(value.reflect_type_info().is_scalar());
/// ```
///
/// # Type Identification
///
/// [`Any::type_id`] on `Box<dyn Reflect>` returns the container's type ID,
/// not the inner value's. Use [`Reflect::ty_id`] instead:
///
/// ```rust
/// # use mapx_reflect::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = Box::new(32_i32).into_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());    // Container type ID
/// assert!((*x).type_id() == TypeId::of::<i32>()); // Dereferenced works
/// assert!(x.ty_id() == TypeId::of::<i32>());      // Preferred method
/// ```
///
/// # Type Casting
///
/// Use [`reflect_ref`] and [`reflect_mut`] to cast to the kind traits
/// ([`Struct`], [`List`], [`Map`], ...), and `downcast_ref`, `downcast_mut`,
/// `downcast` or `take` for concrete types:
///
/// ```rust
/// # use mapx_reflect::{Reflect, ops::List};
/// let vec = vec![1, 2, 3].into_boxed_reflect();
/// let list: &dyn List = vec.reflect_ref().as_list().unwrap();
/// assert_eq!(list.len(), 3);
///
/// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
/// assert_eq!(x.downcast_ref::<i32>(), Some(&10));
/// ```
///
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`mapx_reflect`]: crate
/// [the derive macro for `Reflect`]: crate::derive::Reflect
/// [`Struct`]: crate::ops::Struct
/// [`TupleStruct`]: crate::ops::TupleStruct
/// [`List`]: crate::ops::List
/// [`Map`]: crate::ops::Map
/// [`DynamicTypePath`]: crate::info::DynamicTypePath
/// [`DynamicTyped`]: crate::info::DynamicTyped
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    /// Casts this type to a fully-reflected value.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable, fully-reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed, fully-reflected value.
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a fully-reflected value.
    ///
    /// # Example
    ///
    /// ```
    /// use mapx_reflect::Reflect;
    ///
    /// let r = 32.into_boxed_reflect();
    /// assert!(r.is::<i32>());
    /// ```
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Return the [`TypeId`] of underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Performs a type-checked assignment of a reflected value to this value.
    ///
    /// Returns the value back if its type differs.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mapx_reflect::Reflect;
    /// let data = vec![1_i32, 2_i32, 3_i32].into_boxed_reflect();
    /// let mut vec = Vec::<i32>::new();
    ///
    /// assert!(vec.set(data).is_ok());
    /// assert_eq!(vec, [1, 2, 3]);
    /// assert!(vec.set(1_u8.into_boxed_reflect()).is_err());
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns a pure enumeration of ["kinds"](ReflectKind) of type.
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable enumeration of ["kinds"](ReflectRef) of type.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable enumeration of ["kinds"](ReflectMut) of type.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Clones `Self` through reflection.
    ///
    /// The returned value always has the same type as `self`.
    ///
    /// # Example
    ///
    /// ```
    /// # use mapx_reflect::Reflect;
    /// let value = vec![1_u8, 2];
    /// let cloned = value.reflect_clone();
    /// assert!(cloned.is::<Vec<u8>>());
    /// ```
    fn reflect_clone(&self) -> Box<dyn Reflect>;

    /// Returns a "partial equality" comparison result.
    ///
    /// Returns `None` if the underlying type does not support equality testing,
    /// which is the default for opaque types.
    ///
    /// Composite kinds compare field by field, see
    /// [`struct_partial_eq`](crate::impls::struct_partial_eq) and friends.
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        match self.reflect_ref() {
            ReflectRef::Struct(data) => impls::struct_partial_eq(data, other),
            ReflectRef::TupleStruct(data) => impls::tuple_struct_partial_eq(data, other),
            ReflectRef::List(data) => impls::list_partial_eq(data, other),
            ReflectRef::Map(data) => impls::map_partial_eq(data, other),
            ReflectRef::Option(data) => impls::option_partial_eq(data, other),
            ReflectRef::Scalar(data) => impls::scalar_partial_eq(data, other),
            ReflectRef::Dynamic(data) => data.reflect_partial_eq(other),
            ReflectRef::Opaque(_) => None,
        }
    }

    /// Debug formatter for the value.
    ///
    /// Opaque types write `"Opaque(type_path)"` by default.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Struct(data) => impls::struct_debug(data, f),
            ReflectRef::TupleStruct(data) => impls::tuple_struct_debug(data, f),
            ReflectRef::List(data) => impls::list_debug(data, f),
            ReflectRef::Map(data) => impls::map_debug(data, f),
            ReflectRef::Option(data) => impls::option_debug(data, f),
            ReflectRef::Scalar(data) => impls::scalar_debug(data, f),
            ReflectRef::Dynamic(data) => fmt::Debug::fmt(data, f),
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mapx_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mapx_reflect::Reflect;
    /// let mut x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let y = x.downcast_mut::<i32>().unwrap();
    /// *y += 2;
    ///
    /// assert_eq!(*y, 12);
    /// ```
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mapx_reflect::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let x = x.take::<i32>().unwrap();
    /// assert_eq!(x, 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implement the common methods `set`, `reflect_kind`, `reflect_ref` and `reflect_mut`.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
