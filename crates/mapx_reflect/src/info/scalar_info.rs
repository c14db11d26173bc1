use crate::info::{Type, TypePath, ZeroFn};
use crate::info::{impl_type_fn, impl_zero_fn};

// -----------------------------------------------------------------------------
// ScalarKind

/// The concrete primitive behind a scalar.
///
/// `&'static str` reports [`ScalarKind::String`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
}

/// Coarse grouping of [`ScalarKind`]s.
///
/// Numeric conversions happen freely inside and across the
/// `Int`, `Uint` and `Float` families, never into `Bool` or `Str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarFamily {
    Bool,
    Int,
    Uint,
    Float,
    Str,
}

impl ScalarKind {
    /// Returns the family of the scalar kind.
    pub const fn family(self) -> ScalarFamily {
        match self {
            Self::Bool => ScalarFamily::Bool,
            Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Isize => ScalarFamily::Int,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize => ScalarFamily::Uint,
            Self::F32 | Self::F64 => ScalarFamily::Float,
            Self::String => ScalarFamily::Str,
        }
    }
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// A container for compile-time scalar info.
///
/// # Examples
///
/// ```rust
/// use mapx_reflect::info::{ScalarFamily, ScalarKind, Typed};
///
/// let info = <u16 as Typed>::type_info().as_scalar().unwrap();
///
/// assert_eq!(info.kind(), ScalarKind::U16);
/// assert_eq!(info.family(), ScalarFamily::Uint);
/// ```
#[derive(Clone, Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
    zero: Option<ZeroFn>,
}

impl ScalarInfo {
    impl_type_fn!(ty);
    impl_zero_fn!(zero);

    /// Creates a new [`ScalarInfo`].
    #[inline]
    pub const fn new<T: TypePath>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
            zero: None,
        }
    }

    /// Returns the scalar kind.
    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Returns the scalar family.
    #[inline]
    pub const fn family(&self) -> ScalarFamily {
        self.kind.family()
    }
}
