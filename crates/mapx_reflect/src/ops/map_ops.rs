use alloc::boxed::Box;
use alloc::string::String;

use crate::Reflect;

/// A trait used to power string-keyed map operations via reflection.
///
/// Keys are always strings. Implemented for `HashMap<String, V>` (std and
/// `hashbrown`) and `BTreeMap<String, V>`, which covers [`Mapping`].
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use mapx_reflect::ops::Map;
///
/// let mut map: BTreeMap<String, i64> = BTreeMap::new();
/// assert!(map.insert_boxed("a".into(), Box::new(1_i64)).is_ok());
///
/// assert_eq!(Map::len(&map), 1);
/// assert_eq!(Map::get(&map, "a").unwrap().downcast_ref::<i64>(), Some(&1));
/// ```
///
/// [`Mapping`]: crate::Mapping
pub trait Map: Reflect {
    /// Returns the value under `key`, if present.
    fn get(&self, key: &str) -> Option<&dyn Reflect>;

    /// Returns the value under `key` mutably, if present.
    fn get_mut(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Inserts a value, replacing any previous one.
    ///
    /// Returns the value back if its type is not the value type.
    fn insert_boxed(&mut self, key: String, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries, in the map's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_>;

    /// Removes all entries.
    fn clear(&mut self);
}
