use alloc::boxed::Box;

use crate::Reflect;
use crate::__macro_exports::zero_of;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{OptionInfo, TypeInfo, TypePath, Typed};
use crate::ops::Optional;
use crate::reflection::impl_reflect_cast_fn;

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["core::option::Option<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Option<", T::type_name(), ">"]))
    }
}

impl<T: Reflect + Typed + Clone> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Option(OptionInfo::new::<Self, T>().with_zero(zero_of::<Self>))
        })
    }
}

impl<T: Reflect + Typed + Clone> Reflect for Option<T> {
    impl_reflect_cast_fn!(Option);

    #[inline]
    fn reflect_clone(&self) -> Box<dyn Reflect> {
        Box::new(Clone::clone(self))
    }
}

impl<T: Reflect + Typed + Clone> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|v| v as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|v| v as &mut dyn Reflect)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    fn get_or_insert_zero(&mut self) -> Option<&mut dyn Reflect> {
        if self.is_none() {
            let zero = T::type_info().zero()?.take::<T>().ok()?;
            *self = Some(zero);
        }
        self.value_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};
    use crate::ops::Optional;

    #[test]
    fn option_info_and_zero() {
        let info = <Option<i32>>::type_info();
        assert_eq!(info.kind(), ReflectKind::Option);
        assert!(info.base().type_is::<i32>());
        let zero = info.zero().unwrap();
        assert_eq!(zero.downcast_ref::<Option<i32>>(), Some(&None));
    }

    #[test]
    fn nested_allocation() {
        let mut value: Option<Option<u8>> = None;
        let inner = value.get_or_insert_zero().unwrap();
        assert_eq!(inner.reflect_kind(), ReflectKind::Option);
        assert_eq!(value, Some(None));
    }

    #[test]
    fn none_equals_none() {
        let a: Option<u8> = None;
        assert_eq!(a.reflect_partial_eq(&None::<u8>), Some(true));
        assert_eq!(a.reflect_partial_eq(&Some(1_u8)), Some(false));
        assert_eq!(Some(1_u8).reflect_partial_eq(&Some(1_u8)), Some(true));
    }
}
