use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::{error, fmt};

use crate::Reflect;
use crate::info::{ListInfo, MapInfo, OpaqueInfo, OptionInfo};
use crate::info::{ScalarInfo, StructInfo, TupleStructInfo, Type};
use crate::registry::TypeTraits;

/// Constructor of a type's zero value.
pub type ZeroFn = fn() -> Box<dyn Reflect>;

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// Each kind corresponds to an accessor trait in [`ops`](crate::ops),
/// except `Dynamic` (always [`Value`](crate::Value)) and `Opaque`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    TupleStruct,
    List,
    Map,
    Option,
    Scalar,
    Dynamic,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::TupleStruct => f.pad("TupleStruct"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Option => f.pad("Option"),
            Self::Scalar => f.pad("Scalar"),
            Self::Dynamic => f.pad("Dynamic"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a value or `TypeInfo` is not the expected `ReflectKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information for reflected types.
///
/// Obtained through [`Typed::type_info`] or, for a `dyn Reflect`,
/// [`DynamicTyped::reflect_type_info`]. Both return a `&'static TypeInfo`.
///
/// Besides the [`Type`] and kind-specific data, a `TypeInfo` exposes:
///
/// - [`type_traits`](TypeInfo::type_traits): capabilities declared with
///   `#[reflect(type_trait = (...))]`;
/// - [`zero`](TypeInfo::zero): a constructor of the type's zero value,
///   used to allocate `Option` pointees and list elements.
///
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`DynamicTyped::reflect_type_info`]: crate::info::DynamicTyped::reflect_type_info
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    TupleStruct(TupleStructInfo),
    List(ListInfo),
    Map(MapInfo),
    Option(OptionInfo),
    Scalar(ScalarInfo),
    Dynamic(OpaqueInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to specific type information.
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

macro_rules! impl_is_method {
    ($name:ident : $kind:ident) => {
        /// Check information kind.
        #[inline]
        pub const fn $name(&self) -> bool {
            matches!(self, Self::$kind(..))
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_tuple_struct: TupleStruct => TupleStructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_option: Option => OptionInfo);
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    impl_is_method!(is_struct: Struct);
    impl_is_method!(is_tuple_struct: TupleStruct);
    impl_is_method!(is_list: List);
    impl_is_method!(is_map: Map);
    impl_is_method!(is_option: Option);
    impl_is_method!(is_scalar: Scalar);
    impl_is_method!(is_dynamic: Dynamic);
    impl_is_method!(is_opaque: Opaque);

    /// Returns the [kind](ReflectKind) of the type.
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

    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::TupleStruct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Option(info) => info.ty(),
            Self::Scalar(info) => info.ty(),
            Self::Dynamic(info) | Self::Opaque(info) => info.ty(),
        }
    }

    /// Returns the `TypeId` of the type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// See [`TypePath::type_path`](crate::info::TypePath::type_path).
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// See [`TypePath::type_name`](crate::info::TypePath::type_name).
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    /// Returns the capability table of the type.
    ///
    /// Only structs, tuple structs and opaque types can declare capabilities,
    /// other kinds return an empty table.
    pub fn type_traits(&self) -> &TypeTraits {
        static EMPTY: TypeTraits = TypeTraits::new();
        match self {
            Self::Struct(info) => info.type_traits(),
            Self::TupleStruct(info) => info.type_traits(),
            Self::Opaque(info) => info.type_traits(),
            _ => &EMPTY,
        }
    }

    /// Creates the zero value of the type, if the type has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapx_reflect::info::Typed;
    ///
    /// let zero = <Vec<u8>>::type_info().zero().unwrap();
    /// assert_eq!(zero.downcast_ref::<Vec<u8>>(), Some(&vec![]));
    /// ```
    pub fn zero(&self) -> Option<Box<dyn Reflect>> {
        let zero = match self {
            Self::Struct(info) => info.zero_fn(),
            Self::TupleStruct(info) => info.zero_fn(),
            Self::List(info) => info.zero_fn(),
            Self::Map(info) => info.zero_fn(),
            Self::Option(info) => info.zero_fn(),
            Self::Scalar(info) => info.zero_fn(),
            Self::Dynamic(info) | Self::Opaque(info) => info.zero_fn(),
        };
        zero.map(|f| f())
    }

    /// Returns `true` if a `nil` value can be stored in this type,
    /// i.e. it is an `Option` or a [`Value`](crate::Value).
    #[inline]
    pub const fn accepts_nil(&self) -> bool {
        matches!(self, Self::Option(_) | Self::Dynamic(_))
    }

    /// Returns the type info with every `Option` layer stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapx_reflect::info::Typed;
    ///
    /// let base = <Option<Option<u8>>>::type_info().base();
    /// assert!(base.type_is::<u8>());
    /// ```
    pub fn base(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Self::Option(option) = info {
            info = option.some_info();
        }
        info
    }
}

// `zero` accessors shared by all info structs holding a `zero: Option<ZeroFn>` field.
macro_rules! impl_zero_fn {
    ($field:ident) => {
        /// Sets the zero value constructor.
        #[inline]
        pub fn with_zero(mut self, zero: $crate::info::ZeroFn) -> Self {
            self.$field = Some(zero);
            self
        }

        /// Returns the zero value constructor, if any.
        #[inline]
        pub const fn zero_fn(&self) -> Option<$crate::info::ZeroFn> {
            self.$field
        }
    };
}

// Capability accessors shared by infos holding a `type_traits: TypeTraits` field.
macro_rules! impl_type_traits_fn {
    ($field:ident) => {
        /// Replaces the capability table.
        #[inline]
        pub fn with_type_traits(mut self, type_traits: $crate::registry::TypeTraits) -> Self {
            self.$field = type_traits;
            self
        }

        /// Returns the capability table.
        #[inline]
        pub const fn type_traits(&self) -> &$crate::registry::TypeTraits {
            &self.$field
        }
    };
}

pub(crate) use impl_type_traits_fn;
pub(crate) use impl_zero_fn;
