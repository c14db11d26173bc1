//! Typed value to [`Mapping`].

use alloc::string::String;
use core::fmt;
use core::marker::PhantomData;

use mapx_reflect::info::Typed;
use mapx_reflect::ops::{ReflectRef, Struct};
use mapx_reflect::{Mapping, Reflect, Value};

use crate::error::Error;
use crate::fields::{ResolvedField, cached_fields};
use crate::funcs::{EncoderFuncs, Outcome};
use crate::tag::DEFAULT_NAMESPACE;

// -----------------------------------------------------------------------------
// EncoderOpt

/// Options of an [`Encoder`].
///
/// # Examples
///
/// ```
/// use mapx_codec::{EncoderFuncs, EncoderOpt};
///
/// let opt = EncoderOpt::new().with_tag("json").with_funcs(EncoderFuncs::json());
/// assert_eq!(opt.tag(), "json");
///
/// assert_eq!(EncoderOpt::new().with_tag("").tag(), "mapx");
/// ```
#[derive(Debug, Clone)]
pub struct EncoderOpt {
    tag: String,
    funcs: EncoderFuncs,
}

impl Default for EncoderOpt {
    fn default() -> Self {
        Self {
            tag: String::from(DEFAULT_NAMESPACE),
            funcs: EncoderFuncs::new(),
        }
    }
}

impl EncoderOpt {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tag namespace. An empty namespace means `"mapx"`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = if tag.is_empty() {
            String::from(DEFAULT_NAMESPACE)
        } else {
            tag
        };
        self
    }

    /// Sets the conversion functions.
    #[inline]
    pub fn with_funcs(mut self, funcs: EncoderFuncs) -> Self {
        self.funcs = funcs;
        self
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn funcs(&self) -> &EncoderFuncs {
        &self.funcs
    }
}

// -----------------------------------------------------------------------------
// Encoder

/// Converts values of `T` into [`Mapping`]s.
///
/// `T` is a struct, or an `Option` of one. The fields of `T` are resolved
/// once, when the encoder is created.
///
/// For each field, in declaration order:
///
/// 1. fields behind an embedded `None` encode as [`Value::Nil`];
/// 2. `omitempty` fields holding `false`, zero, `""`, an empty list or map,
///    `None` or nil are omitted;
/// 3. the registered [`EncoderFuncs`] are tried, see there for the order;
/// 4. struct fields that are not `raw` become nested mappings, `None` is nil;
/// 5. anything else is cloned as is.
///
/// # Examples
///
/// ```
/// use mapx_codec::{Encoder, EncoderOpt};
/// use mapx_reflect::derive::Reflect;
///
/// #[derive(Reflect, Clone)]
/// struct User {
///     pub name: String,
///     #[reflect(tag(mapx = "years,omitempty"))]
///     pub age: u32,
/// }
///
/// let encoder = Encoder::<User>::new(EncoderOpt::new());
///
/// let map = encoder.encode(&User { name: "ann".into(), age: 0 }).unwrap();
/// assert_eq!(map.len(), 1);
/// assert_eq!(map["name"].downcast_ref::<String>().unwrap(), "ann");
/// ```
pub struct Encoder<T> {
    fields: &'static [ResolvedField],
    funcs: EncoderFuncs,
    _marker: PhantomData<fn(&T)>,
}

impl<T> Clone for Encoder<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields,
            funcs: self.funcs.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Encoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("fields", &self.fields.len())
            .field("funcs", &self.funcs)
            .finish()
    }
}

impl<T: Reflect + Typed> Encoder<T> {
    /// Creates an encoder, resolving the fields of `T`.
    pub fn new(opt: EncoderOpt) -> Self {
        let fields = cached_fields(&opt.tag, T::type_info().base());
        Self {
            fields,
            funcs: opt.funcs,
            _marker: PhantomData,
        }
    }

    /// Encodes `value`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotAStruct`] if `value` is not a struct or is `None`;
    /// - [`Error::Conversion`] if a registered function fails.
    ///
    /// No mapping is returned on error.
    pub fn encode(&self, value: &T) -> Result<Mapping, Error> {
        let root = match value.reflect_ref() {
            ReflectRef::Option(option) => option.value().ok_or(Error::NotAStruct)?,
            _ => value.as_reflect(),
        };

        let ReflectRef::Struct(root) = root.reflect_ref() else {
            return Err(Error::NotAStruct);
        };

        encode_struct(root, self.fields, &self.funcs)
    }
}

fn encode_struct(
    value: &dyn Struct,
    fields: &[ResolvedField],
    funcs: &EncoderFuncs,
) -> Result<Mapping, Error> {
    let mut out = Mapping::default();

    for field in fields {
        let encoded = match reach(value, field.index()) {
            Some(field_value) => encode_field(field, field_value, funcs)?,
            None => Some(Value::Nil),
        };

        if let Some(encoded) = encoded {
            out.insert(String::from(field.name()), encoded);
        }
    }

    Ok(out)
}

/// Returns `None` to omit the field.
fn encode_field(
    field: &ResolvedField,
    value: &dyn Reflect,
    funcs: &EncoderFuncs,
) -> Result<Option<Value>, Error> {
    if field.tag().omit_empty() && is_empty(value) {
        return Ok(None);
    }

    let base = field.base();
    let base_value = deref(value);

    if funcs.has_exact(base.ty_id()) {
        let Some(base_value) = base_value else {
            return Ok(Some(Value::Nil));
        };
        if let Some(result) = funcs.call_exact(base.ty_id(), base_value) {
            return result.map(Some).map_err(Error::Conversion);
        }
    }

    if let Some((capability, f)) = funcs.find_capability(base.type_traits()) {
        let Some(base_value) = base_value else {
            return Ok(Some(Value::Nil));
        };
        if let Some(result) = f(capability, base_value) {
            return result.map(Some).map_err(Error::Conversion);
        }
    }

    let replaced = match funcs.call_any(value).map_err(Error::Conversion)? {
        Outcome::Skip => return Ok(None),
        Outcome::Replace(replaced) => Some(replaced),
        Outcome::Unchanged => None,
    };

    // Nested structs are always mapped, a replacement only applies to leaves.
    if let Some(fields) = field.fields() {
        let Some(base_value) = base_value else {
            return Ok(Some(Value::Nil));
        };
        if let ReflectRef::Struct(nested) = base_value.reflect_ref() {
            return encode_struct(nested, fields, funcs).map(|map| Some(Value::new(map)));
        }
    }

    Ok(Some(replaced.unwrap_or_else(|| Value::from_boxed(value.reflect_clone()))))
}

/// Follows an index chain through embedded structs.
///
/// Returns `None` if an embedded `Option` on the way is `None`.
fn reach<'a>(root: &'a dyn Struct, index: &[usize]) -> Option<&'a dyn Reflect> {
    let (last, path) = index.split_last()?;

    let mut current = root;
    for &i in path {
        current = deref(current.field_at(i)?)?.reflect_ref().as_struct().ok()?;
    }

    current.field_at(*last)
}

/// Strips every `Option` layer, `None` if one is empty.
fn deref(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
    while let ReflectRef::Option(option) = value.reflect_ref() {
        value = option.value()?;
    }
    Some(value)
}

fn is_empty(value: &dyn Reflect) -> bool {
    match value.reflect_ref() {
        ReflectRef::Scalar(scalar) => scalar.scalar().is_zero(),
        ReflectRef::List(list) => list.is_empty(),
        ReflectRef::Map(map) => map.is_empty(),
        ReflectRef::Option(option) => option.value().is_none(),
        ReflectRef::Dynamic(value) => value.is_nil(),
        ReflectRef::TupleStruct(newtype) if newtype.field_len() == 1 => {
            newtype.field_at(0).is_some_and(is_empty)
        }
        ReflectRef::Struct(_) | ReflectRef::TupleStruct(_) | ReflectRef::Opaque(_) => false,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::fmt;
    use std::time::SystemTime;

    use mapx_reflect::derive::{Reflect, reflect_trait};
    use mapx_reflect::registry::{ReflectAny, ReflectDisplay};
    use mapx_reflect::{Mapping, Value, mapping};

    use super::{Encoder, EncoderOpt};
    use crate::error::Error;
    use crate::funcs::{EncoderFuncs, Outcome};

    fn encode_with<T: mapx_reflect::Reflect + mapx_reflect::info::Typed>(
        value: &T,
        funcs: EncoderFuncs,
    ) -> Result<Mapping, Error> {
        Encoder::<T>::new(EncoderOpt::new().with_funcs(funcs)).encode(value)
    }

    #[derive(Reflect, Clone, Default)]
    #[reflect(default)]
    struct Address {
        pub city: String,
        pub zip: u32,
    }

    #[derive(Reflect, Clone)]
    struct Person {
        pub name: String,
        pub age: i32,
        pub home: Address,
        pub work: Option<Address>,
        pub tags: Vec<String>,
        secret: String,
    }

    fn person() -> Person {
        Person {
            name: "ann".into(),
            age: 31,
            home: Address {
                city: "oslo".into(),
                zip: 150,
            },
            work: None,
            tags: vec!["a".into()],
            secret: "x".into(),
        }
    }

    #[test]
    fn basic() {
        let map = crate::encode(&person()).unwrap();

        assert_eq!(map.len(), 5);
        assert_eq!(map["name"], Value::new(String::from("ann")));
        assert_eq!(map["age"], Value::new(31_i32));
        assert_eq!(map["tags"], Value::new(vec![String::from("a")]));
        assert!(map["work"].is_nil());
        assert!(!map.contains_key("secret"));

        let home = map["home"].downcast_ref::<Mapping>().unwrap();
        assert_eq!(home, &mapping! { "city" => String::from("oslo"), "zip" => 150_u32 });
    }

    #[test]
    fn option_root() {
        let map = crate::encode(&Some(person())).unwrap();
        assert_eq!(map["age"], Value::new(31_i32));

        assert!(matches!(crate::encode(&None::<Person>), Err(Error::NotAStruct)));
        assert!(matches!(crate::encode(&5_i32), Err(Error::NotAStruct)));
    }

    #[test]
    fn json_funcs_normalize() {
        let map = encode_with(&person(), EncoderFuncs::json()).unwrap();

        assert_eq!(map["age"], Value::new(31.0_f64));
        assert_eq!(map["tags"], Value::new(vec![Value::new(String::from("a"))]));

        let home = map["home"].downcast_ref::<Mapping>().unwrap();
        assert_eq!(home["zip"], Value::new(150.0_f64));
    }

    #[derive(Reflect, Clone)]
    struct Renamed {
        #[reflect(tag(mapx = "Name", json = "n"))]
        pub name: String,
        #[reflect(tag(json = "-"))]
        pub hidden: bool,
    }

    #[test]
    fn custom_tag() {
        let value = Renamed {
            name: "x".into(),
            hidden: true,
        };

        let map = crate::encode(&value).unwrap();
        assert!(map.contains_key("Name") && map.contains_key("hidden"));

        let map = Encoder::<Renamed>::new(EncoderOpt::new().with_tag("json"))
            .encode(&value)
            .unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("n"));
    }

    #[derive(Reflect, Clone, Default)]
    #[reflect(default, type_trait = ReflectDisplay)]
    struct Celsius(f64);

    impl fmt::Display for Celsius {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}C", self.0)
        }
    }

    #[derive(Reflect, Clone)]
    struct Weather {
        pub now: Celsius,
        pub max: Option<Celsius>,
        pub min: Option<Celsius>,
    }

    #[test]
    fn capability_funcs() {
        let funcs = EncoderFuncs::new().register_capability::<ReflectDisplay, _>(|v| Ok(v.to_string()));
        let value = Weather {
            now: Celsius(1.5),
            max: Some(Celsius(3.0)),
            min: None,
        };

        let map = encode_with(&value, funcs).unwrap();
        assert_eq!(map["now"], Value::new(String::from("1.5C")));
        assert_eq!(map["max"], Value::new(String::from("3C")));
        assert!(map["min"].is_nil());
    }

    #[test]
    fn exact_before_capability() {
        let funcs = EncoderFuncs::new()
            .register_capability::<ReflectDisplay, _>(|v| Ok(v.to_string()))
            .register(|c: &Celsius| Ok(c.0 * 2.0));
        let value = Weather {
            now: Celsius(1.5),
            max: None,
            min: None,
        };

        let map = encode_with(&value, funcs).unwrap();
        assert_eq!(map["now"], Value::new(3.0_f64));
        assert!(map["max"].is_nil());
    }

    #[test]
    fn universal_capability_replaces_leaves() {
        let funcs = EncoderFuncs::new()
            .register_capability::<ReflectAny, _>(|v| Ok(v.reflect_type_name().to_string()));

        let map = encode_with(&person(), funcs).unwrap();
        assert_eq!(map["age"], Value::new(String::from("i32")));
        assert_eq!(map["work"], Value::Nil);

        let home = map["home"].downcast_ref::<Mapping>().unwrap();
        assert_eq!(home["city"], Value::new(String::from("String")));
        assert_eq!(home["zip"], Value::new(String::from("u32")));
    }

    #[reflect_trait]
    trait Marker {}

    #[derive(Reflect, Clone)]
    #[reflect(type_trait = ReflectMarker)]
    struct Marked {
        pub n: u8,
    }

    impl Marker for Marked {}

    #[derive(Reflect, Clone)]
    struct Tagged {
        pub m: Marked,
        pub n: u8,
    }

    #[test]
    fn empty_generated_capability_matches_its_types_only() {
        let funcs = EncoderFuncs::new()
            .register_capability::<ReflectMarker, _>(|_| Ok(String::from("marked")));
        assert!(!funcs.has_any());
        assert_eq!(funcs.len(), 1);

        let map = encode_with(&Tagged { m: Marked { n: 1 }, n: 2 }, funcs).unwrap();
        assert_eq!(map["m"], Value::new(String::from("marked")));
        assert_eq!(map["n"], Value::new(2_u8));
    }

    #[derive(Reflect, Clone, Default)]
    #[reflect(default)]
    struct Meta {
        pub id: u64,
        pub name: String,
    }

    #[derive(Reflect, Clone)]
    struct Item {
        #[reflect(embed)]
        pub meta: Meta,
        pub name: String,
    }

    #[test]
    fn embedded_and_conflict() {
        let value = Item {
            meta: Meta {
                id: 7,
                name: "inner".into(),
            },
            name: "outer".into(),
        };

        let map = crate::encode(&value).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["id"], Value::new(7_u64));
        assert_eq!(map["name"], Value::new(String::from("outer")));
    }

    #[derive(Reflect, Clone)]
    struct Wrapper {
        #[reflect(embed)]
        pub item: Option<Item>,
        pub level: u8,
    }

    #[derive(Reflect, Clone)]
    struct Deeper {
        #[reflect(embed)]
        pub wrapper: Wrapper,
    }

    #[test]
    fn nil_and_deep_embedded() {
        let value = Deeper {
            wrapper: Wrapper {
                item: None,
                level: 2,
            },
        };

        let map = crate::encode(&value).unwrap();
        assert_eq!(map.len(), 3);
        assert!(map["id"].is_nil());
        assert!(map["name"].is_nil());
        assert_eq!(map["level"], Value::new(2_u8));

        let value = Deeper {
            wrapper: Wrapper {
                item: Some(Item {
                    meta: Meta {
                        id: 1,
                        name: "m".into(),
                    },
                    name: "i".into(),
                }),
                level: 3,
            },
        };

        let map = crate::encode(&value).unwrap();
        assert_eq!(map["id"], Value::new(1_u64));
        assert_eq!(map["name"], Value::new(String::from("i")));
    }

    #[derive(Reflect, Clone)]
    struct Inlined {
        #[reflect(tag(mapx = "m_,inline"))]
        pub meta: Meta,
        #[reflect(tag(mapx = ",inline"))]
        pub other: Meta,
        pub id: u64,
    }

    #[test]
    fn inline_with_prefix_and_conflict() {
        let value = Inlined {
            meta: Meta {
                id: 1,
                name: "a".into(),
            },
            other: Meta {
                id: 2,
                name: "b".into(),
            },
            id: 3,
        };

        let map = crate::encode(&value).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map["m_id"], Value::new(1_u64));
        assert_eq!(map["m_name"], Value::new(String::from("a")));
        assert_eq!(map["name"], Value::new(String::from("b")));
        assert_eq!(map["id"], Value::new(3_u64));
    }

    #[derive(Reflect, Clone)]
    struct Raw {
        #[reflect(tag(mapx = "meta,raw"))]
        pub meta: Meta,
        pub at: SystemTime,
    }

    #[test]
    fn raw_fields_are_cloned() {
        let value = Raw {
            meta: Meta {
                id: 4,
                name: "r".into(),
            },
            at: SystemTime::UNIX_EPOCH,
        };

        let map = crate::encode(&value).unwrap();
        assert_eq!(map["meta"].downcast_ref::<Meta>().unwrap().id, 4);
        assert_eq!(map["at"].downcast_ref::<SystemTime>(), Some(&SystemTime::UNIX_EPOCH));
    }

    #[derive(Reflect, Clone)]
    struct Sparse {
        #[reflect(tag(mapx = ",omitempty"))]
        pub flag: bool,
        #[reflect(tag(mapx = ",omitempty"))]
        pub count: i64,
        #[reflect(tag(mapx = ",omitempty"))]
        pub text: String,
        #[reflect(tag(mapx = ",omitempty"))]
        pub list: Vec<i32>,
        #[reflect(tag(mapx = ",omitempty"))]
        pub ptr: Option<i32>,
        #[reflect(tag(mapx = ",omitempty"))]
        pub any: Value,
        #[reflect(tag(mapx = ",omitempty"))]
        pub temp: Celsius,
        #[reflect(tag(mapx = ",omitempty"))]
        pub meta: Meta,
    }

    #[test]
    fn omit_empty() {
        let value = Sparse {
            flag: false,
            count: 0,
            text: String::new(),
            list: Vec::new(),
            ptr: None,
            any: Value::Nil,
            temp: Celsius(0.0),
            meta: Meta::default(),
        };

        let map = crate::encode(&value).unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("meta"));

        let value = Sparse {
            flag: true,
            count: 1,
            text: "t".into(),
            list: vec![0],
            ptr: Some(0),
            any: Value::new(0_u8),
            temp: Celsius(1.0),
            meta: Meta::default(),
        };
        assert_eq!(crate::encode(&value).unwrap().len(), 8);
    }

    #[test]
    fn catch_all_outcomes() {
        let funcs = EncoderFuncs::new().register_any(|v| {
            Ok(if v.is::<String>() {
                Outcome::Skip
            } else if v.is::<i32>() {
                Outcome::Replace(Value::new(0_i32))
            } else {
                Outcome::Unchanged
            })
        });

        let map = encode_with(&person(), funcs).unwrap();
        assert!(!map.contains_key("name"));
        assert_eq!(map["age"], Value::new(0_i32));
        assert_eq!(map["tags"], Value::new(vec![String::from("a")]));

        // `Unchanged` on a struct still recurses, with the same functions.
        let home = map["home"].downcast_ref::<Mapping>().unwrap();
        assert_eq!(home.len(), 1);
        assert_eq!(home["zip"], Value::new(150_u32));
    }

    #[test]
    fn catch_all_replacement_does_not_stop_recursion() {
        let funcs = EncoderFuncs::new().register_any(|v| {
            Ok(if v.is::<Address>() {
                Outcome::Replace(Value::new(String::from("replaced")))
            } else {
                Outcome::Unchanged
            })
        });

        let map = encode_with(&person(), funcs).unwrap();
        let home = map["home"].downcast_ref::<Mapping>().unwrap();
        assert_eq!(home["city"], Value::new(String::from("oslo")));
        assert_eq!(home["zip"], Value::new(150_u32));
    }

    #[derive(Debug, thiserror::Error)]
    #[error("negative age")]
    struct NegativeAge;

    #[test]
    fn conversion_errors_abort() {
        let funcs = EncoderFuncs::new().register(|v: &i32| {
            if *v < 0 {
                Err(NegativeAge.into())
            } else {
                Ok(*v)
            }
        });

        let mut value = person();
        value.age = -1;

        let err = encode_with(&value, funcs).unwrap_err();
        assert!(err.conversion_ref::<NegativeAge>().is_some());
        assert_eq!(err.to_string(), "negative age");
    }
}
