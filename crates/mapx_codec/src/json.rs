//! Normalization to JSON-shaped values.
//!
//! JSON knows one number type, so [`EncoderFuncs::json`] turns every field
//! into the shapes a JSON decoder produces:
//!
//! | value | result |
//! |---|---|
//! | integer or float | `f64` |
//! | bool, string | `bool`, `String` |
//! | list | `Vec<Value>` |
//! | string-keyed map | [`Mapping`] |
//! | `Option` | the held value, nil for `None` |
//! | newtype | its field |
//! | struct | unchanged, encoded as a nested mapping |
//!
//! Structs inside lists and maps, and opaque values, are cloned as is.

use alloc::string::String;
use alloc::vec::Vec;

use mapx_reflect::ops::{ReflectRef, ScalarRef};
use mapx_reflect::{Mapping, Reflect, Value};

use crate::funcs::{BoxError, EncoderFuncs, Outcome};

impl EncoderFuncs {
    /// Returns functions whose catch-all normalizes values as JSON would.
    ///
    /// # Examples
    ///
    /// ```
    /// use mapx_codec::{EncoderFuncs, Encoder, EncoderOpt};
    /// use mapx_reflect::{Value, derive::Reflect};
    ///
    /// #[derive(Reflect, Clone)]
    /// struct Sample {
    ///     pub count: u8,
    ///     pub values: Vec<i32>,
    /// }
    ///
    /// let encoder = Encoder::<Sample>::new(EncoderOpt::new().with_funcs(EncoderFuncs::json()));
    /// let map = encoder.encode(&Sample { count: 2, values: vec![1] }).unwrap();
    ///
    /// assert_eq!(map["count"], Value::new(2.0_f64));
    /// assert_eq!(map["values"], Value::new(vec![Value::new(1.0_f64)]));
    /// ```
    pub fn json() -> Self {
        Self::new().register_any(normalize_field)
    }
}

fn normalize_field(value: &dyn Reflect) -> Result<Outcome, BoxError> {
    Ok(match normalize(value) {
        Some(value) => Outcome::Replace(value),
        None => Outcome::Unchanged,
    })
}

/// Normalizes `value`, `None` for structs and opaque values.
pub fn normalize(value: &dyn Reflect) -> Option<Value> {
    match value.reflect_ref() {
        ReflectRef::Scalar(scalar) => Some(match scalar.scalar() {
            ScalarRef::Bool(v) => Value::new(v),
            ScalarRef::Int(v) => Value::new(v as f64),
            ScalarRef::Uint(v) => Value::new(v as f64),
            ScalarRef::Float(v) => Value::new(v),
            ScalarRef::Str(v) => Value::new(String::from(v)),
        }),
        ReflectRef::List(list) => {
            let items: Vec<Value> = list.iter().map(normalize_nested).collect();
            Some(Value::new(items))
        }
        ReflectRef::Map(map) => {
            let entries: Mapping = map
                .iter()
                .map(|(key, value)| (String::from(key), normalize_nested(value)))
                .collect();
            Some(Value::new(entries))
        }
        ReflectRef::Option(option) => match option.value() {
            Some(value) => normalize(value),
            None => Some(Value::Nil),
        },
        ReflectRef::Dynamic(dynamic) => match dynamic.get() {
            Some(value) => normalize(value),
            None => Some(Value::Nil),
        },
        ReflectRef::TupleStruct(newtype) if newtype.field_len() == 1 => {
            newtype.field_at(0).and_then(normalize)
        }
        ReflectRef::Struct(_) | ReflectRef::TupleStruct(_) | ReflectRef::Opaque(_) => None,
    }
}

fn normalize_nested(value: &dyn Reflect) -> Value {
    normalize(value).unwrap_or_else(|| Value::from_boxed(value.reflect_clone()))
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use mapx_reflect::derive::Reflect;
    use mapx_reflect::{Mapping, Value, mapping};

    use super::normalize;

    #[derive(Reflect, Clone)]
    struct Point {
        pub x: i32,
    }

    #[derive(Reflect, Clone)]
    struct Level(u8);

    #[test]
    fn scalars() {
        assert_eq!(normalize(&3_u16), Some(Value::new(3.0_f64)));
        assert_eq!(normalize(&-3_i8), Some(Value::new(-3.0_f64)));
        assert_eq!(normalize(&0.5_f32), Some(Value::new(0.5_f64)));
        assert_eq!(normalize(&true), Some(Value::new(true)));
        assert_eq!(normalize(&"s"), Some(Value::new(String::from("s"))));
        assert_eq!(normalize(&Level(4)), Some(Value::new(4.0_f64)));
    }

    #[test]
    fn containers() {
        let mut scores = BTreeMap::new();
        scores.insert(String::from("a"), vec![Some(1_u8), None]);

        let expected = mapping! { "a" => vec![Value::new(1.0_f64), Value::Nil] };
        assert_eq!(normalize(&scores), Some(Value::new(expected)));

        let points = vec![Point { x: 1 }];
        let normalized = normalize(&points).unwrap();
        let items = normalized.downcast_ref::<Vec<Value>>().unwrap();
        assert_eq!(items[0].downcast_ref::<Point>().map(|p| p.x), Some(1));
    }

    #[test]
    fn structs_are_left_to_the_encoder() {
        assert!(normalize(&Point { x: 1 }).is_none());
        assert!(normalize(&Some(Point { x: 1 })).is_none());
        assert_eq!(normalize(&None::<Point>), Some(Value::Nil));
        assert_eq!(normalize(&Value::Nil), Some(Value::Nil));

        let empty: Mapping = Mapping::default();
        assert_eq!(normalize(&empty), Some(Value::new(Mapping::default())));
    }
}
