use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::Reflect;
use crate::__macro_exports::zero_of;
use crate::impls::{self, NonGenericTypeInfoCell};
use crate::info::{ScalarInfo, ScalarKind, TypeInfo, TypePath, Typed};
use crate::ops::{Scalar, ScalarRef};
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_scalar_common {
    ($ty:ty, $path:expr, $kind:ident) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                stringify!($ty)
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::$kind).with_zero(zero_of::<Self>))
                })
            }
        }

        impl Reflect for $ty {
            impl_reflect_cast_fn!(Scalar);

            #[inline]
            fn reflect_clone(&self) -> Box<dyn Reflect> {
                Box::new(Clone::clone(self))
            }

            #[inline]
            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                impls::scalar_partial_eq(self, other)
            }

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

// Numbers convert between each other with `as` semantics.
macro_rules! impl_number {
    ($($ty:ident => $kind:ident, $family:ident, $wide:ty;)*) => {$(
        impl_scalar_common!($ty, stringify!($ty), $kind);

        impl Scalar for $ty {
            #[inline]
            fn scalar_kind(&self) -> ScalarKind {
                ScalarKind::$kind
            }

            #[inline]
            fn scalar(&self) -> ScalarRef<'_> {
                ScalarRef::$family(*self as $wide)
            }

            fn assign(&mut self, value: ScalarRef<'_>) -> bool {
                *self = match value {
                    ScalarRef::Int(v) => v as $ty,
                    ScalarRef::Uint(v) => v as $ty,
                    ScalarRef::Float(v) => v as $ty,
                    ScalarRef::Bool(_) | ScalarRef::Str(_) => return false,
                };
                true
            }
        }
    )*};
}

impl_number! {
    i8 => I8, Int, i64;
    i16 => I16, Int, i64;
    i32 => I32, Int, i64;
    i64 => I64, Int, i64;
    isize => Isize, Int, i64;
    u8 => U8, Uint, u64;
    u16 => U16, Uint, u64;
    u32 => U32, Uint, u64;
    u64 => U64, Uint, u64;
    usize => Usize, Uint, u64;
    f32 => F32, Float, f64;
    f64 => F64, Float, f64;
}

impl_scalar_common!(bool, "bool", Bool);

impl Scalar for bool {
    #[inline]
    fn scalar_kind(&self) -> ScalarKind {
        ScalarKind::Bool
    }

    #[inline]
    fn scalar(&self) -> ScalarRef<'_> {
        ScalarRef::Bool(*self)
    }

    fn assign(&mut self, value: ScalarRef<'_>) -> bool {
        match value {
            ScalarRef::Bool(v) => {
                *self = v;
                true
            }
            _ => false,
        }
    }
}

impl_scalar_common!(String, "alloc::string::String", String);

impl Scalar for String {
    #[inline]
    fn scalar_kind(&self) -> ScalarKind {
        ScalarKind::String
    }

    #[inline]
    fn scalar(&self) -> ScalarRef<'_> {
        ScalarRef::Str(self.as_str())
    }

    fn assign(&mut self, value: ScalarRef<'_>) -> bool {
        match value {
            ScalarRef::Str(v) => {
                self.clear();
                self.push_str(v);
                true
            }
            _ => false,
        }
    }
}

impl TypePath for &'static str {
    #[inline]
    fn type_path() -> &'static str {
        "&str"
    }

    #[inline]
    fn type_name() -> &'static str {
        "&str"
    }
}

impl Typed for &'static str {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::String).with_zero(zero_of::<Self>))
        })
    }
}

impl Reflect for &'static str {
    impl_reflect_cast_fn!(Scalar);

    #[inline]
    fn reflect_clone(&self) -> Box<dyn Reflect> {
        Box::new(*self)
    }

    #[inline]
    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        impls::scalar_partial_eq(self, other)
    }

    #[inline]
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(*self, f)
    }
}

// A borrowed `'static` string cannot take a converted value.
impl Scalar for &'static str {
    #[inline]
    fn scalar_kind(&self) -> ScalarKind {
        ScalarKind::String
    }

    #[inline]
    fn scalar(&self) -> ScalarRef<'_> {
        ScalarRef::Str(self)
    }

    #[inline]
    fn assign(&mut self, _value: ScalarRef<'_>) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{ScalarFamily, TypePath, Typed};
    use crate::ops::{Scalar, ScalarRef};

    #[test]
    fn numeric_assign_uses_as_semantics() {
        let mut x: u8 = 0;
        assert!(x.assign(ScalarRef::Int(300)));
        assert_eq!(x, 44);

        let mut y: i64 = 0;
        assert!(y.assign(ScalarRef::Float(-2.7)));
        assert_eq!(y, -2);

        let mut z: f32 = 0.0;
        assert!(z.assign(ScalarRef::Uint(7)));
        assert_eq!(z, 7.0);

        assert!(!z.assign(ScalarRef::Bool(true)));
        assert!(!z.assign(ScalarRef::Str("1")));
    }

    #[test]
    fn string_and_bool_only_accept_their_family() {
        let mut s = String::from("old");
        assert!(!s.assign(ScalarRef::Int(1)));
        assert!(s.assign(ScalarRef::Str("new")));
        assert_eq!(s, "new");

        let mut b = false;
        assert!(!b.assign(ScalarRef::Uint(1)));
        assert!(b.assign(ScalarRef::Bool(true)));
        assert!(b);
    }

    #[test]
    fn str_and_string_compare_equal() {
        let a: &'static str = "x";
        let b = String::from("x");
        assert_eq!(a.reflect_partial_eq(&b), Some(true));
        assert_eq!(1_i32.reflect_partial_eq(&1_i64), Some(false));
        assert_eq!(1_i32.reflect_partial_eq(&1_i32), Some(true));
    }

    #[test]
    fn scalar_info() {
        let info = f64::type_info().as_scalar().unwrap();
        assert_eq!(info.family(), ScalarFamily::Float);
        assert_eq!(<&'static str>::type_path(), "&str");
        let zero = u16::type_info().zero().unwrap();
        assert_eq!(zero.downcast_ref::<u16>(), Some(&0));
    }
}
