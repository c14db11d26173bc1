use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::__macro_exports::zero_of;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::List;
use crate::reflection::impl_reflect_cast_fn;

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Vec<", T::type_name(), ">"]))
    }
}

impl<T: Reflect + Typed + Clone> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>().with_zero(zero_of::<Self>))
        })
    }
}

impl<T: Reflect + Typed + Clone> Reflect for Vec<T> {
    impl_reflect_cast_fn!(List);

    #[inline]
    fn reflect_clone(&self) -> Box<dyn Reflect> {
        Box::new(Clone::clone(self))
    }
}

impl<T: Reflect + Typed + Clone> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|v| v as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|v| v as &mut dyn Reflect)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        Vec::push(self, value.take::<T>()?);
        Ok(())
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};

    #[test]
    fn vec_paths_and_info() {
        assert_eq!(<Vec<u8>>::type_name(), "Vec<u8>");
        assert_eq!(<Vec<u8>>::type_path(), "alloc::vec::Vec<u8>");
        let info = <Vec<Option<u8>>>::type_info().as_list().unwrap();
        assert!(info.item_is::<Option<u8>>());
    }

    #[test]
    fn lists_compare_by_items() {
        let a = vec![1_i32, 2];
        assert_eq!(a.reflect_partial_eq(&vec![1_i32, 2]), Some(true));
        assert_eq!(a.reflect_partial_eq(&vec![1_i32]), Some(false));
        assert_eq!(a.reflect_partial_eq(&1_i32), Some(false));
    }
}
