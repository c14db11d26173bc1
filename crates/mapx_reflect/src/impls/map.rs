use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::Reflect;
use crate::__macro_exports::zero_of;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::Map;
use crate::reflection::impl_reflect_cast_fn;

// Only string keys are reflected, the value type is the generic `V`.
macro_rules! impl_reflect_for_string_map {
    ($ty:ty, $path:literal, $name:literal) => {
        impl<V: TypePath> TypePath for $ty {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[$path, "<alloc::string::String, ", V::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| impls::concat(&[$name, "<String, ", V::type_name(), ">"]))
            }
        }

        impl<V: Reflect + Typed + Clone> Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::Map(MapInfo::new::<Self, V>().with_zero(zero_of::<Self>))
                })
            }
        }

        impl<V: Reflect + Typed + Clone> Reflect for $ty {
            impl_reflect_cast_fn!(Map);

            #[inline]
            fn reflect_clone(&self) -> Box<dyn Reflect> {
                Box::new(Clone::clone(self))
            }
        }

        impl<V: Reflect + Typed + Clone> Map for $ty {
            #[inline]
            fn get(&self, key: &str) -> Option<&dyn Reflect> {
                <$ty>::get(self, key).map(|v| v as &dyn Reflect)
            }

            #[inline]
            fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect> {
                <$ty>::get_mut(self, key).map(|v| v as &mut dyn Reflect)
            }

            fn insert_boxed(
                &mut self,
                key: String,
                value: Box<dyn Reflect>,
            ) -> Result<(), Box<dyn Reflect>> {
                <$ty>::insert(self, key, value.take::<V>()?);
                Ok(())
            }

            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
                Box::new(<$ty>::iter(self).map(|(k, v)| (k.as_str(), v as &dyn Reflect)))
            }

            #[inline]
            fn clear(&mut self) {
                <$ty>::clear(self);
            }
        }
    };
}

impl_reflect_for_string_map!(
    mapx_utils::hash::HashMap<String, V>,
    "mapx_utils::hash::HashMap",
    "HashMap"
);
impl_reflect_for_string_map!(
    std::collections::HashMap<String, V>,
    "std::collections::HashMap",
    "HashMap"
);
impl_reflect_for_string_map!(BTreeMap<String, V>, "alloc::collections::BTreeMap", "BTreeMap");

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use crate::Reflect;
    use crate::info::{TypePath, Typed};
    use crate::ops::Map;

    #[test]
    fn maps_compare_across_types() {
        let mut a: BTreeMap<String, i32> = BTreeMap::new();
        a.insert("x".into(), 1);
        let mut b: std::collections::HashMap<String, i32> = std::collections::HashMap::new();
        b.insert("x".into(), 1);

        assert_eq!(a.reflect_partial_eq(&b), Some(true));
        b.insert("y".into(), 2);
        assert_eq!(a.reflect_partial_eq(&b), Some(false));
    }

    #[test]
    fn insert_checks_value_type() {
        let mut a: BTreeMap<String, i32> = BTreeMap::new();
        assert!(a.insert_boxed("k".into(), 1_u8.into_boxed_reflect()).is_err());
        assert!(a.insert_boxed("k".into(), 1_i32.into_boxed_reflect()).is_ok());
        assert_eq!(Map::len(&a), 1);
    }

    #[test]
    fn map_info() {
        assert_eq!(
            <BTreeMap<String, u8>>::type_path(),
            "alloc::collections::BTreeMap<alloc::string::String, u8>"
        );
        let info = <BTreeMap<String, u8>>::type_info().as_map().unwrap();
        assert!(info.value_is::<u8>());
    }
}
