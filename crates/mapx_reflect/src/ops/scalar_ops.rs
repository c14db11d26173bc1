use crate::Reflect;
use crate::info::ScalarKind;

// -----------------------------------------------------------------------------
// ScalarRef

/// A borrowed scalar value, widened to the largest type of its family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
}

impl ScalarRef<'_> {
    /// Returns `true` for `false`, zero and the empty string.
    pub fn is_zero(&self) -> bool {
        match *self {
            Self::Bool(v) => !v,
            Self::Int(v) => v == 0,
            Self::Uint(v) => v == 0,
            Self::Float(v) => v == 0.0,
            Self::Str(v) => v.is_empty(),
        }
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// A trait used to power scalar operations via reflection.
///
/// Implemented for `bool`, all integer and float primitives, `String`
/// and `&'static str`.
///
/// # Conversion
///
/// [`assign`](Scalar::assign) converts between numeric kinds with `as`
/// semantics (truncating and saturating where `as` does). Booleans only
/// accept booleans and strings only accept strings.
///
/// # Examples
///
/// ```
/// use mapx_reflect::ops::{Scalar, ScalarRef};
///
/// let mut x: i32 = 0;
/// assert!(x.assign(ScalarRef::Float(3.9)));
/// assert_eq!(x, 3);
///
/// assert!(!x.assign(ScalarRef::Str("3")));
/// assert_eq!(x.scalar(), ScalarRef::Int(3));
/// ```
pub trait Scalar: Reflect {
    /// Returns the concrete primitive kind.
    fn scalar_kind(&self) -> ScalarKind;

    /// Returns the value, widened to its family.
    fn scalar(&self) -> ScalarRef<'_>;

    /// Assigns a value of a compatible family, returning `false` otherwise.
    fn assign(&mut self, value: ScalarRef<'_>) -> bool;
}
