use core::fmt;

use mapx_reflect::Value;
use mapx_reflect::info::TypeInfo;
use thiserror::Error;

use crate::funcs::BoxError;

// -----------------------------------------------------------------------------
// Error

/// Errors of [`encode`](crate::encode) and [`decode`](crate::decode).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("mapx: provided value is not a struct")]
    NotAStruct,

    #[error("mapx: provided value is a nil pointer")]
    NilPointer,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("mapx: type `{type_path}` has no zero value to allocate")]
    MissingDefault { type_path: &'static str },

    /// A registered conversion function failed.
    #[error("{0}")]
    Conversion(BoxError),
}

impl Error {
    /// Returns the error of a failed conversion function.
    pub fn into_conversion(self) -> Result<BoxError, Self> {
        match self {
            Self::Conversion(err) => Ok(err),
            other => Err(other),
        }
    }

    /// Returns the error of a failed conversion function if it is an `E`.
    pub fn conversion_ref<E: core::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Conversion(err) => err.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Returns the decode error, if this is one.
    pub fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl PartialEq<DecodeError> for Error {
    fn eq(&self, other: &DecodeError) -> bool {
        self.as_decode() == Some(other)
    }
}

// -----------------------------------------------------------------------------
// DecodeError

/// A source value that cannot be decoded into the destination type.
///
/// Two decode errors are equal if their types are the same and their values
/// compare equal.
///
/// # Examples
///
/// ```
/// use mapx_codec::DecodeError;
/// use mapx_reflect::{Value, info::Typed};
///
/// let err = DecodeError::new(Value::new(String::from("x")), i32::type_info());
/// assert_eq!(
///     err.to_string(),
///     "mapx: cannot decode value of type alloc::string::String into i32",
/// );
/// ```
#[derive(Debug, Clone)]
pub struct DecodeError {
    value: Value,
    ty: &'static TypeInfo,
}

impl DecodeError {
    #[inline]
    pub fn new(value: Value, ty: &'static TypeInfo) -> Self {
        Self { value, ty }
    }

    /// The source value, [`Value::Nil`] for nil.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The destination type.
    #[inline]
    pub fn ty(&self) -> &'static TypeInfo {
        self.ty
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.value.get() {
            Some(value) => value.reflect_type_path(),
            None => "nil",
        };
        write!(
            f,
            "mapx: cannot decode value of type {source} into {}",
            self.ty.type_path()
        )
    }
}

impl core::error::Error for DecodeError {}

impl PartialEq for DecodeError {
    fn eq(&self, other: &Self) -> bool {
        self.ty.ty_id() == other.ty.ty_id() && self.value == other.value
    }
}
