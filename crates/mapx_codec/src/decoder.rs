//! String-keyed map to typed value.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;
use core::marker::PhantomData;

use mapx_reflect::info::{TypeInfo, Typed};
use mapx_reflect::ops::{Map, Optional, ReflectMut, ReflectRef, Struct};
use mapx_reflect::{Reflect, Value};

use crate::error::{DecodeError, Error};
use crate::fields::{ResolvedField, cached_fields};
use crate::funcs::DecoderFuncs;
use crate::tag::DEFAULT_NAMESPACE;

// -----------------------------------------------------------------------------
// DecoderOpt

/// Options of a [`Decoder`].
///
/// # Examples
///
/// ```
/// use mapx_codec::{DecoderFuncs, DecoderOpt};
///
/// let opt = DecoderOpt::new().with_tag("json").with_funcs(DecoderFuncs::new());
/// assert_eq!(opt.tag(), "json");
/// ```
#[derive(Debug, Clone)]
pub struct DecoderOpt {
    tag: String,
    funcs: DecoderFuncs,
}

impl Default for DecoderOpt {
    fn default() -> Self {
        Self {
            tag: String::from(DEFAULT_NAMESPACE),
            funcs: DecoderFuncs::new(),
        }
    }
}

impl DecoderOpt {
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
    pub fn with_funcs(mut self, funcs: DecoderFuncs) -> Self {
        self.funcs = funcs;
        self
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn funcs(&self) -> &DecoderFuncs {
        &self.funcs
    }
}

// -----------------------------------------------------------------------------
// Decoder

/// Populates values of `T` from string-keyed maps.
///
/// `T` is a struct, or an `Option` of one that is `Some`. The source is any
/// [`Map`]: a [`Mapping`](mapx_reflect::Mapping), a `BTreeMap<String, i64>`,
/// and so on. Only the keys present in the source are written.
///
/// Source values are read through [`Value`] and `Option` layers, a `None`
/// source is nil. For each field the decoder tries, in order:
///
/// 1. nil: skipped if the field is an `Option` or a [`Value`], an error
///    otherwise;
/// 2. the function registered for (source type, field type), then the
///    capability functions of the source type whose capability the field
///    type carries;
/// 3. `Option` fields: the pointee is allocated and decoded into;
///    [`Value`] fields: the source is cloned;
/// 4. identical types are cloned, scalars convert across the numeric
///    families with `as` semantics, newtypes convert through their field;
/// 5. lists and maps are rebuilt element by element;
/// 6. struct fields are decoded from nested maps.
///
/// Fields behind a `None` embedded `Option` are allocated on the way.
///
/// # Examples
///
/// ```
/// use mapx_codec::{Decoder, DecoderOpt};
/// use mapx_reflect::{derive::Reflect, mapping};
///
/// #[derive(Reflect, Clone, Default)]
/// struct Limits {
///     pub max: u16,
///     pub ratio: f32,
/// }
///
/// let decoder = Decoder::<Limits>::new(DecoderOpt::new());
///
/// let mut limits = Limits::default();
/// decoder.decode(&mapping! { "max" => 9.7_f64, "ratio" => 2_i64 }, &mut limits).unwrap();
///
/// assert_eq!(limits.max, 9);
/// assert_eq!(limits.ratio, 2.0);
/// ```
pub struct Decoder<T> {
    namespace: String,
    fields: &'static [ResolvedField],
    funcs: DecoderFuncs,
    _marker: PhantomData<fn(&mut T)>,
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            fields: self.fields,
            funcs: self.funcs.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Decoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("namespace", &self.namespace)
            .field("fields", &self.fields.len())
            .field("funcs", &self.funcs)
            .finish()
    }
}

impl<T: Reflect + Typed> Decoder<T> {
    /// Creates a decoder, resolving the fields of `T`.
    pub fn new(opt: DecoderOpt) -> Self {
        let fields = cached_fields(&opt.tag, T::type_info().base());
        Self {
            namespace: opt.tag,
            fields,
            funcs: opt.funcs,
            _marker: PhantomData,
        }
    }

    /// Decodes `src` into `dst`.
    ///
    /// # Errors
    ///
    /// - [`Error::NilPointer`] if `dst` is `None`;
    /// - [`Error::NotAStruct`] if `dst` is not a struct;
    /// - [`Error::Decode`] if a source value does not fit its field;
    /// - [`Error::MissingDefault`] if a value has to be allocated but its
    ///   type has no zero value;
    /// - [`Error::Conversion`] if a registered function fails.
    ///
    /// Fields written before an error keep their new values.
    pub fn decode(&self, src: &dyn Map, dst: &mut T) -> Result<(), Error> {
        let root = match dst.reflect_mut() {
            ReflectMut::Option(option) => option.value_mut().ok_or(Error::NilPointer)?,
            other => other.into_reflect(),
        };

        let ReflectMut::Struct(root) = root.reflect_mut() else {
            return Err(Error::NotAStruct);
        };

        self.decode_struct(src, root, self.fields)
    }

    fn decode_struct(
        &self,
        src: &dyn Map,
        dst: &mut dyn Struct,
        fields: &[ResolvedField],
    ) -> Result<(), Error> {
        for field in fields {
            let Some(value) = src.get(field.name()) else {
                continue;
            };

            let Some(value) = resolve(value) else {
                if field.ty().accepts_nil() {
                    continue;
                }
                return Err(DecodeError::new(Value::Nil, field.ty()).into());
            };

            let target = reach_mut(dst, field.index())?;
            self.decode_value(value, target, field.fields())?;
        }
        Ok(())
    }

    /// Decodes `src` into `dst`.
    ///
    /// `fields` are the resolved fields of `dst` if it is a struct and they
    /// are known already.
    fn decode_value(
        &self,
        src: &dyn Reflect,
        dst: &mut dyn Reflect,
        fields: Option<&'static [ResolvedField]>,
    ) -> Result<(), Error> {
        let info = dst.reflect_type_info();

        if let Some(result) = self.funcs.call_exact(src, info.ty_id(), dst) {
            return result.map_err(Error::Conversion);
        }
        if let Some(result) = self.funcs.call_capability(src, info.type_traits(), dst) {
            return result.map_err(Error::Conversion);
        }

        match dst.reflect_mut() {
            ReflectMut::Option(option) => {
                let missing = missing_default(option);
                let pointee = option.get_or_insert_zero().ok_or(missing)?;
                return self.decode_value(src, pointee, fields);
            }
            ReflectMut::Dynamic(value) => {
                *value = Value::from_boxed(src.reflect_clone());
                return Ok(());
            }
            _ => {}
        }

        let mismatch = || Error::from(DecodeError::new(Value::from_boxed(src.reflect_clone()), info));

        if src.ty_id() == info.ty_id() {
            return dst.set(src.reflect_clone()).map_err(|_| mismatch());
        }

        match (src.reflect_ref(), dst.reflect_mut()) {
            (ReflectRef::Scalar(from), ReflectMut::Scalar(to)) => {
                if to.assign(from.scalar()) {
                    Ok(())
                } else {
                    Err(mismatch())
                }
            }
            (_, ReflectMut::TupleStruct(to)) if to.field_len() == 1 => {
                let inner = to.field_at_mut(0).ok_or_else(mismatch)?;
                match self.decode_value(src, inner, None) {
                    Err(Error::Decode(_)) => Err(mismatch()),
                    other => other,
                }
            }
            (ReflectRef::TupleStruct(from), to) if from.field_len() == 1 => {
                let inner = from.field_at(0).ok_or_else(mismatch)?;
                match self.decode_value(inner, to.into_reflect(), fields) {
                    Err(Error::Decode(_)) => Err(mismatch()),
                    other => other,
                }
            }
            (ReflectRef::List(from), ReflectMut::List(to)) => {
                let item_info = info.as_list().map_err(|_| mismatch())?.item_info();
                to.clear();
                for item in from.iter() {
                    let item = self.decode_element(item, item_info)?;
                    to.push(item).map_err(|_| mismatch())?;
                }
                Ok(())
            }
            (ReflectRef::Map(from), ReflectMut::Struct(to)) => {
                let fields = fields.unwrap_or_else(|| cached_fields(&self.namespace, info));
                self.decode_struct(from, to, fields)
            }
            (ReflectRef::Map(from), ReflectMut::Map(to)) => {
                let value_info = info.as_map().map_err(|_| mismatch())?.value_info();
                to.clear();
                for (key, value) in from.iter() {
                    let value = self.decode_element(value, value_info)?;
                    to.insert_boxed(String::from(key), value).map_err(|_| mismatch())?;
                }
                Ok(())
            }
            _ => Err(mismatch()),
        }
    }

    /// Builds a list item or map value of type `info` from `src`.
    fn decode_element(
        &self,
        src: &dyn Reflect,
        info: &'static TypeInfo,
    ) -> Result<Box<dyn Reflect>, Error> {
        let mut element = info.zero().ok_or(Error::MissingDefault {
            type_path: info.type_path(),
        })?;

        match resolve(src) {
            Some(src) => self.decode_value(src, &mut *element, None)?,
            None if info.accepts_nil() => {}
            None => return Err(DecodeError::new(Value::Nil, info).into()),
        }

        Ok(element)
    }
}

/// Reads through [`Value`] and `Option` layers, `None` for nil.
fn resolve(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
    loop {
        value = match value.reflect_ref() {
            ReflectRef::Dynamic(dynamic) => dynamic.get()?,
            ReflectRef::Option(option) => option.value()?,
            _ => return Some(value),
        };
    }
}

/// Follows an index chain through embedded structs, allocating `None`
/// embedded `Option`s on the way.
fn reach_mut<'a>(root: &'a mut dyn Struct, index: &[usize]) -> Result<&'a mut dyn Reflect, Error> {
    let mut current: &'a mut dyn Reflect = root;

    for &i in index {
        let mut value = current;
        current = loop {
            value = match value.reflect_mut() {
                ReflectMut::Option(option) => {
                    let missing = missing_default(option);
                    option.get_or_insert_zero().ok_or(missing)?
                }
                ReflectMut::Struct(parent) => break parent.field_at_mut(i).ok_or(Error::NotAStruct)?,
                _ => return Err(Error::NotAStruct),
            };
        };
    }

    Ok(current)
}

fn missing_default(option: &dyn Optional) -> Error {
    let type_path = match option.reflect_type_info().as_option() {
        Ok(info) => info.some_info().type_path(),
        Err(_) => option.reflect_type_path(),
    };
    Error::MissingDefault { type_path }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::num::ParseIntError;
    use core::time::Duration;

    use mapx_reflect::derive::{Reflect, reflect_trait};
    use mapx_reflect::info::Typed;
    use mapx_reflect::{Mapping, Value, mapping};

    use super::{Decoder, DecoderOpt};
    use crate::error::{DecodeError, Error};
    use crate::funcs::DecoderFuncs;

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Simple {
        pub name: String,
        pub count: i32,
        pub ratio: f64,
        pub on: bool,
    }

    #[test]
    fn simple() {
        let src = mapping! {
            "name" => String::from("n"),
            "count" => 3_i64,
            "ratio" => 0.5_f32,
            "on" => true,
            "unknown" => 1_u8,
        };

        let mut dst = Simple::default();
        crate::decode(&src, &mut dst).unwrap();
        assert_eq!(
            dst,
            Simple {
                name: "n".into(),
                count: 3,
                ratio: 0.5,
                on: true,
            }
        );
    }

    #[test]
    fn float_into_int_truncates() {
        let mut dst = Simple::default();
        crate::decode(&mapping! { "count" => 7.9_f64 }, &mut dst).unwrap();
        assert_eq!(dst.count, 7);
    }

    #[test]
    fn string_into_int_fails() {
        let mut dst = Simple::default();
        let err = crate::decode(&mapping! { "count" => String::from("7") }, &mut dst).unwrap_err();

        assert_eq!(err, DecodeError::new(Value::new(String::from("7")), i32::type_info()));
        assert_eq!(
            err.to_string(),
            "mapx: cannot decode value of type alloc::string::String into i32"
        );
    }

    #[test]
    fn sparse_keeps_absent_fields() {
        let mut dst = Simple {
            count: 5,
            ..Simple::default()
        };
        crate::decode(&mapping! { "name" => String::from("a") }, &mut dst).unwrap();
        assert_eq!(dst.count, 5);
        assert_eq!(dst.name, "a");
    }

    #[test]
    fn other_map_types() {
        let mut src: BTreeMap<String, i64> = BTreeMap::new();
        src.insert("count".into(), 9);

        let mut dst = Simple::default();
        crate::decode(&src, &mut dst).unwrap();
        assert_eq!(dst.count, 9);
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Meters(f64);

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Track {
        pub length: Meters,
        pub raw: f64,
    }

    #[test]
    fn newtypes_convert_through_their_field() {
        let mut dst = Track::default();
        let src = mapping! { "length" => 12_i32, "raw" => Meters(2.5) };
        crate::decode(&src, &mut dst).unwrap();

        assert_eq!(dst.length, Meters(12.0));
        assert_eq!(dst.raw, 2.5);

        let err = crate::decode(&mapping! { "length" => true }, &mut dst).unwrap_err();
        assert_eq!(err, DecodeError::new(Value::new(true), Meters::type_info()));
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Lists {
        pub ints: Vec<i32>,
        pub items: Vec<Simple>,
        pub any: Vec<Value>,
        pub maybe: Vec<Option<u8>>,
    }

    #[test]
    fn lists_are_rebuilt() {
        let src = mapping! {
            "ints" => vec![Value::new(1_i64), Value::new(2.7_f64)],
            "items" => vec![
                Value::new(mapping! { "name" => String::from("a") }),
                Value::new(mapping! { "count" => 2_u8 }),
            ],
            "any" => vec![1_u8, 2],
            "maybe" => vec![Value::new(3_u16), Value::Nil],
        };

        let mut dst = Lists {
            ints: vec![9, 9, 9],
            ..Lists::default()
        };
        crate::decode(&src, &mut dst).unwrap();

        assert_eq!(dst.ints, [1, 2]);
        assert_eq!(dst.items.len(), 2);
        assert_eq!(dst.items[0].name, "a");
        assert_eq!(dst.items[1].count, 2);
        assert_eq!(dst.any, [Value::new(1_u8), Value::new(2_u8)]);
        assert_eq!(dst.maybe, [Some(3), None]);
    }

    #[test]
    fn list_element_errors() {
        let mut dst = Lists::default();

        let src = mapping! { "ints" => vec![Value::new(1_i64), Value::Nil] };
        let err = crate::decode(&src, &mut dst).unwrap_err();
        assert_eq!(err, DecodeError::new(Value::Nil, i32::type_info()));

        let src = mapping! { "ints" => vec![String::from("x")] };
        let err = crate::decode(&src, &mut dst).unwrap_err();
        assert_eq!(err, DecodeError::new(Value::new(String::from("x")), i32::type_info()));
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Nilable {
        pub ptr: Option<i32>,
        pub val: Value,
        pub plain: i32,
        pub nested: Option<Simple>,
    }

    #[test]
    fn nil_handling() {
        let mut dst = Nilable::default();
        crate::decode(&mapping! { "ptr" => Value::Nil, "val" => Value::Nil }, &mut dst).unwrap();
        assert_eq!(dst.ptr, None);
        assert!(dst.val.is_nil());

        crate::decode(&mapping! { "ptr" => None::<i64> }, &mut dst).unwrap();
        assert_eq!(dst.ptr, None);

        let err = crate::decode(&mapping! { "plain" => Value::Nil }, &mut dst).unwrap_err();
        assert_eq!(err, DecodeError::new(Value::Nil, i32::type_info()));
    }

    #[test]
    fn pointers_and_values_are_filled() {
        let mut dst = Nilable::default();
        let src = mapping! {
            "ptr" => 4_u64,
            "val" => vec![1_u8],
            "nested" => mapping! { "on" => true },
        };
        crate::decode(&src, &mut dst).unwrap();

        assert_eq!(dst.ptr, Some(4));
        assert_eq!(dst.val, Value::new(vec![1_u8]));
        assert!(dst.nested.unwrap().on);
    }

    #[test]
    fn root_shapes() {
        let mut none: Option<Simple> = None;
        let err = crate::decode(&Mapping::default(), &mut none).unwrap_err();
        assert!(matches!(err, Error::NilPointer));

        let mut some = Some(Simple::default());
        crate::decode(&mapping! { "count" => 1_i8 }, &mut some).unwrap();
        assert_eq!(some.unwrap().count, 1);

        let mut scalar = 0_i32;
        let err = crate::decode(&Mapping::default(), &mut scalar).unwrap_err();
        assert!(matches!(err, Error::NotAStruct));
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Timed {
        pub timeout: Duration,
        pub count: i32,
    }

    #[test]
    fn registered_funcs() {
        let funcs = DecoderFuncs::new()
            .register(|secs: &f64, d: &mut Duration| {
                *d = Duration::try_from_secs_f64(*secs)?;
                Ok(())
            })
            .register(|s: &String, n: &mut i32| {
                *n = s.parse()?;
                Ok(())
            });
        let decoder = Decoder::<Timed>::new(DecoderOpt::new().with_funcs(funcs));

        let mut dst = Timed::default();
        decoder
            .decode(&mapping! { "timeout" => 1.5_f64, "count" => String::from("12") }, &mut dst)
            .unwrap();
        assert_eq!(dst.timeout, Duration::from_millis(1500));
        assert_eq!(dst.count, 12);

        let err = decoder
            .decode(&mapping! { "count" => String::from("x") }, &mut dst)
            .unwrap_err();
        assert!(err.conversion_ref::<ParseIntError>().is_some());

        let err = decoder.decode(&mapping! { "timeout" => 1_i64 }, &mut dst).unwrap_err();
        assert_eq!(err, DecodeError::new(Value::new(1_i64), Duration::type_info()));
    }

    #[reflect_trait]
    trait SetCode {
        fn set_code(&mut self, code: &str) -> Result<(), ParseIntError>;
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default, type_trait = ReflectSetCode)]
    struct Code {
        pub v: u8,
    }

    impl SetCode for Code {
        fn set_code(&mut self, code: &str) -> Result<(), ParseIntError> {
            self.v = code.trim_start_matches('#').parse()?;
            Ok(())
        }
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Holder {
        pub code: Code,
        pub maybe: Option<Code>,
        pub list: Vec<Code>,
    }

    #[test]
    fn capability_funcs() {
        let funcs = DecoderFuncs::new()
            .register_capability::<String, ReflectSetCode>(|s, dst| Ok(dst.set_code(s)?));
        let decoder = Decoder::<Holder>::new(DecoderOpt::new().with_funcs(funcs));

        let src = mapping! {
            "code" => String::from("#3"),
            "maybe" => String::from("2"),
            "list" => vec![Value::new(String::from("1"))],
        };
        let mut dst = Holder::default();
        decoder.decode(&src, &mut dst).unwrap();
        assert_eq!(
            dst,
            Holder {
                code: Code { v: 3 },
                maybe: Some(Code { v: 2 }),
                list: vec![Code { v: 1 }],
            }
        );

        // Sources without a function still decode structurally.
        decoder.decode(&mapping! { "code" => mapping! { "v" => 9_u8 } }, &mut dst).unwrap();
        assert_eq!(dst.code, Code { v: 9 });

        let err = decoder
            .decode(&mapping! { "code" => String::from("x") }, &mut dst)
            .unwrap_err();
        assert!(err.conversion_ref::<ParseIntError>().is_some());
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Inner {
        pub id: u32,
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Middle {
        #[reflect(embed)]
        pub inner: Option<Inner>,
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Outer {
        #[reflect(embed)]
        pub middle: Option<Middle>,
        pub name: String,
    }

    #[test]
    fn promoted_fields_allocate_the_chain() {
        let mut dst = Outer::default();
        crate::decode(&mapping! { "id" => 3_u8 }, &mut dst).unwrap();
        assert_eq!(dst.middle.unwrap().inner.unwrap().id, 3);

        let mut dst = Outer::default();
        crate::decode(&mapping! { "name" => String::from("n") }, &mut dst).unwrap();
        assert!(dst.middle.is_none());
    }

    #[derive(Reflect, Clone)]
    struct NoDefault {
        pub id: u32,
    }

    #[derive(Reflect, Clone)]
    struct HoldsNoDefault {
        pub items: Vec<NoDefault>,
    }

    #[test]
    fn missing_default() {
        let mut dst = HoldsNoDefault { items: Vec::new() };
        let src = mapping! { "items" => vec![mapping! { "id" => 1_u32 }] };

        let err = crate::decode(&src, &mut dst).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingDefault { type_path } if type_path.ends_with("NoDefault")
        ));
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Maps {
        pub scores: BTreeMap<String, f32>,
    }

    #[test]
    fn maps_are_rebuilt() {
        let mut dst = Maps::default();
        let src = mapping! { "scores" => mapping! { "a" => 1_i64, "b" => 2.5_f64 } };
        crate::decode(&src, &mut dst).unwrap();

        assert_eq!(dst.scores.len(), 2);
        assert_eq!(dst.scores["a"], 1.0);
        assert_eq!(dst.scores["b"], 2.5);
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Address {
        pub city: String,
        pub zip: u32,
    }

    #[derive(Reflect, Clone, Default, Debug, PartialEq)]
    #[reflect(default)]
    struct Person {
        pub name: String,
        pub age: i32,
        pub home: Address,
        pub work: Option<Address>,
        pub tags: Vec<String>,
        pub scores: Vec<f64>,
    }

    #[test]
    fn round_trip() {
        let value = Person {
            name: "ann".into(),
            age: 31,
            home: Address {
                city: "oslo".into(),
                zip: 150,
            },
            work: Some(Address {
                city: "bergen".into(),
                zip: 5003,
            }),
            tags: vec!["a".into(), "b".into()],
            scores: vec![1.5],
        };

        let map = crate::encode(&value).unwrap();
        let mut back = Person::default();
        crate::decode(&map, &mut back).unwrap();
        assert_eq!(back, value);
    }
}
