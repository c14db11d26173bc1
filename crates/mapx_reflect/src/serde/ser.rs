use alloc::vec::Vec;

use serde_core::ser::{self, SerializeMap, SerializeSeq, SerializeStruct, SerializeTupleStruct};
use serde_core::{Serialize, Serializer};

use crate::Reflect;
use crate::Value;
use crate::ops::{List, Map, ReflectRef, ScalarRef, Struct, TupleStruct};

// -----------------------------------------------------------------------------
// ReflectSerializer

/// Serializer for reflected values.
///
/// See the [module documentation](crate::serde) for the rules.
#[derive(Clone, Copy)]
pub struct ReflectSerializer<'a> {
    value: &'a dyn Reflect,
}

impl<'a> ReflectSerializer<'a> {
    /// Creates a serializer for `value`.
    #[inline]
    pub const fn new(value: &'a dyn Reflect) -> Self {
        Self { value }
    }
}

impl Serialize for ReflectSerializer<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value.reflect_ref() {
            ReflectRef::Scalar(scalar) => match scalar.scalar() {
                ScalarRef::Bool(v) => serializer.serialize_bool(v),
                ScalarRef::Int(v) => serializer.serialize_i64(v),
                ScalarRef::Uint(v) => serializer.serialize_u64(v),
                ScalarRef::Float(v) => serializer.serialize_f64(v),
                ScalarRef::Str(v) => serializer.serialize_str(v),
            },
            ReflectRef::List(list) => serialize_list(list, serializer),
            ReflectRef::Map(map) => serialize_map(map, serializer),
            ReflectRef::Struct(value) => serialize_struct(value, serializer),
            ReflectRef::TupleStruct(value) => serialize_tuple_struct(value, serializer),
            ReflectRef::Option(option) => match option.value() {
                Some(value) => serializer.serialize_some(&ReflectSerializer::new(value)),
                None => serializer.serialize_none(),
            },
            ReflectRef::Dynamic(value) => match value.get() {
                Some(value) => ReflectSerializer::new(value).serialize(serializer),
                None => serializer.serialize_unit(),
            },
            ReflectRef::Opaque(value) => Err(ser::Error::custom(format_args!(
                "cannot serialize opaque type `{}`",
                value.reflect_type_path()
            ))),
        }
    }
}

fn serialize_list<S: Serializer>(list: &dyn List, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_seq(Some(list.len()))?;
    for item in list.iter() {
        state.serialize_element(&ReflectSerializer::new(item))?;
    }
    state.end()
}

fn serialize_map<S: Serializer>(map: &dyn Map, serializer: S) -> Result<S::Ok, S::Error> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut state = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        state.serialize_entry(key, &ReflectSerializer::new(value))?;
    }
    state.end()
}

fn serialize_struct<S: Serializer>(value: &dyn Struct, serializer: S) -> Result<S::Ok, S::Error> {
    let info = value
        .reflect_type_info()
        .as_struct()
        .map_err(<S::Error as ser::Error>::custom)?;

    let exported = info.iter().filter(|field| field.is_exported()).count();
    let mut state = serializer.serialize_struct(value.reflect_type_name(), exported)?;
    for (index, field) in info.iter().enumerate() {
        if !field.is_exported() {
            continue;
        }
        if let Some(field_value) = value.field_at(index) {
            state.serialize_field(field.name(), &ReflectSerializer::new(field_value))?;
        }
    }
    state.end()
}

fn serialize_tuple_struct<S: Serializer>(
    value: &dyn TupleStruct,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let name = value.reflect_type_name();
    if value.field_len() == 1
        && let Some(field) = value.field_at(0)
    {
        return serializer.serialize_newtype_struct(name, &ReflectSerializer::new(field));
    }

    let mut state = serializer.serialize_tuple_struct(name, value.field_len())?;
    for index in 0..value.field_len() {
        if let Some(field) = value.field_at(index) {
            state.serialize_field(&ReflectSerializer::new(field))?;
        }
    }
    state.end()
}

// -----------------------------------------------------------------------------
// Value

impl Serialize for Value {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReflectSerializer::new(self).serialize(serializer)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use core::time::Duration;

    use super::ReflectSerializer;
    use crate::derive::Reflect;
    use crate::{Value, mapping};

    #[derive(Reflect, Clone)]
    struct Inner {
        pub name: String,
        hidden: u8,
    }

    #[derive(Reflect, Clone)]
    struct Meters(pub f64);

    #[derive(Reflect, Clone)]
    struct Outer {
        pub inner: Inner,
        pub maybe: Option<i32>,
        pub length: Meters,
        pub any: Value,
    }

    #[test]
    fn serializes_structs_through_reflection() {
        let value = Outer {
            inner: Inner {
                name: String::from("n"),
                hidden: 9,
            },
            maybe: None,
            length: Meters(1.5),
            any: Value::new(vec![1_u8]),
        };
        let json = serde_json::to_string(&ReflectSerializer::new(&value)).unwrap();
        assert_eq!(
            json,
            r#"{"inner":{"name":"n"},"maybe":null,"length":1.5,"any":[1]}"#
        );
        assert_eq!(value.inner.hidden, 9);
    }

    #[test]
    fn value_serializes_nil_as_null() {
        let map = mapping! { "k" => Value::Nil };
        assert_eq!(serde_json::to_string(&map["k"]).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&ReflectSerializer::new(&map)).unwrap(),
            r#"{"k":null}"#
        );
    }

    #[test]
    fn opaque_fails() {
        let d = Duration::from_secs(1);
        assert!(serde_json::to_string(&ReflectSerializer::new(&d)).is_err());
    }
}
