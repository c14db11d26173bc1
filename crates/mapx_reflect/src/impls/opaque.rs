use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;
use std::time::SystemTime;

use crate::Reflect;
use crate::__macro_exports::zero_of;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::reflection::impl_reflect_cast_fn;

// Opaque values are cloned and compared as a whole.
macro_rules! impl_reflect_opaque {
    ($ty:ty, $path:literal, $name:literal, $zero:expr) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>().with_zero($zero)))
            }
        }

        impl Reflect for $ty {
            impl_reflect_cast_fn!(Opaque);

            #[inline]
            fn reflect_clone(&self) -> Box<dyn Reflect> {
                Box::new(Clone::clone(self))
            }

            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                Some(other.downcast_ref::<Self>().is_some_and(|other| self == other))
            }

            #[inline]
            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

impl_reflect_opaque!(Duration, "core::time::Duration", "Duration", zero_of::<Duration>);
impl_reflect_opaque!(SystemTime, "std::time::SystemTime", "SystemTime", unix_epoch);

fn unix_epoch() -> Box<dyn Reflect> {
    Box::new(SystemTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use std::time::SystemTime;

    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[test]
    fn opaque_types() {
        assert_eq!(SystemTime::type_info().kind(), ReflectKind::Opaque);
        let zero = SystemTime::type_info().zero().unwrap();
        assert_eq!(zero.downcast_ref::<SystemTime>(), Some(&SystemTime::UNIX_EPOCH));

        let d = Duration::from_secs(1);
        assert_eq!(d.reflect_partial_eq(&Duration::from_secs(1)), Some(true));
        assert_eq!(d.reflect_partial_eq(&1_u64), Some(false));
    }
}
