use crate::Reflect;
use crate::Value;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{List, Map, Optional, Scalar, Struct, TupleStruct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of ["kinds"](ReflectKind) of a reflected type.
///
/// Created by [`Reflect::reflect_ref`].
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    TupleStruct(&'a dyn TupleStruct),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Option(&'a dyn Optional),
    Scalar(&'a dyn Scalar),
    Dynamic(&'a Value),
    Opaque(&'a dyn Reflect),
}

macro_rules! impl_ref_cast {
    ($name:ident : $kind:ident => $ty:ty) => {
        /// Casts to the kind trait, or returns the mismatched kinds.
        #[inline]
        pub fn $name(self) -> Result<$ty, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_ref_cast!(as_struct: Struct => &'a dyn Struct);
    impl_ref_cast!(as_tuple_struct: TupleStruct => &'a dyn TupleStruct);
    impl_ref_cast!(as_list: List => &'a dyn List);
    impl_ref_cast!(as_map: Map => &'a dyn Map);
    impl_ref_cast!(as_option: Option => &'a dyn Optional);
    impl_ref_cast!(as_scalar: Scalar => &'a dyn Scalar);
    impl_ref_cast!(as_dynamic: Dynamic => &'a Value);

    /// Returns the [`ReflectKind`] of the value.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::TupleStruct(_) => ReflectKind::TupleStruct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Option(_) => ReflectKind::Option,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Casts back to `&dyn Reflect`.
    pub fn as_reflect(self) -> &'a dyn Reflect {
        match self {
            Self::Struct(value) => value,
            Self::TupleStruct(value) => value,
            Self::List(value) => value,
            Self::Map(value) => value,
            Self::Option(value) => value,
            Self::Scalar(value) => value,
            Self::Dynamic(value) => value,
            Self::Opaque(value) => value,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable enumeration of ["kinds"](ReflectKind) of a reflected type.
///
/// Created by [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    TupleStruct(&'a mut dyn TupleStruct),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Option(&'a mut dyn Optional),
    Scalar(&'a mut dyn Scalar),
    Dynamic(&'a mut Value),
    Opaque(&'a mut dyn Reflect),
}

macro_rules! impl_mut_cast {
    ($name:ident : $kind:ident => $ty:ty) => {
        /// Casts to the kind trait, or returns the mismatched kinds.
        #[inline]
        pub fn $name(self) -> Result<$ty, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectMut<'a> {
    impl_mut_cast!(as_struct: Struct => &'a mut dyn Struct);
    impl_mut_cast!(as_tuple_struct: TupleStruct => &'a mut dyn TupleStruct);
    impl_mut_cast!(as_list: List => &'a mut dyn List);
    impl_mut_cast!(as_map: Map => &'a mut dyn Map);
    impl_mut_cast!(as_option: Option => &'a mut dyn Optional);
    impl_mut_cast!(as_scalar: Scalar => &'a mut dyn Scalar);
    impl_mut_cast!(as_dynamic: Dynamic => &'a mut Value);

    /// Returns the [`ReflectKind`] of the value.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::TupleStruct(_) => ReflectKind::TupleStruct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Option(_) => ReflectKind::Option,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Casts back to `&mut dyn Reflect`, keeping the full lifetime.
    pub fn into_reflect(self) -> &'a mut dyn Reflect {
        match self {
            Self::Struct(value) => value,
            Self::TupleStruct(value) => value,
            Self::List(value) => value,
            Self::Map(value) => value,
            Self::Option(value) => value,
            Self::Scalar(value) => value,
            Self::Dynamic(value) => value,
            Self::Opaque(value) => value,
        }
    }
}
