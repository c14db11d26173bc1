use core::fmt;

use crate::Reflect;
use crate::ops::{List, Map, Optional, ReflectRef, Scalar, ScalarRef, Struct, TupleStruct};

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// # Rules
///
/// 1. If `other` is not the same struct type, return `Some(false)`.
/// 2. Compare fields in declaration order, return the first result
///    that is not `Some(true)`.
/// 3. return `Some(true)`.
#[inline(never)]
pub fn struct_partial_eq(x: &dyn Struct, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Struct(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.ty_id() != y.ty_id() {
        return Some(false);
    }

    for (x_field, y_field) in x.iter_fields().zip(y.iter_fields()) {
        let result = x_field.reflect_partial_eq(y_field);
        if result != Some(true) {
            return result;
        }
    }
    Some(true)
}

/// A function use for implementing [`Reflect::reflect_debug`].
///
/// Writes the type name followed by every field, private ones included.
#[inline(never)]
pub fn struct_debug(dyn_struct: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(dyn_struct.reflect_type_name());

    for (index, field) in dyn_struct.iter_fields().enumerate() {
        let name = dyn_struct.name_at(index).unwrap_or_default();
        debug.field(name, &field as &dyn fmt::Debug);
    }
    debug.finish()
}

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// Same rules as [`struct_partial_eq`].
#[inline(never)]
pub fn tuple_struct_partial_eq(x: &dyn TupleStruct, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::TupleStruct(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.ty_id() != y.ty_id() {
        return Some(false);
    }

    for index in 0..x.field_len() {
        let (Some(x_field), Some(y_field)) = (x.field_at(index), y.field_at(index)) else {
            return Some(false);
        };
        let result = x_field.reflect_partial_eq(y_field);
        if result != Some(true) {
            return result;
        }
    }
    Some(true)
}

/// A function use for implementing [`Reflect::reflect_debug`].
#[inline(never)]
pub fn tuple_struct_debug(
    dyn_tuple_struct: &dyn TupleStruct,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let mut debug = f.debug_tuple(dyn_tuple_struct.reflect_type_name());
    for index in 0..dyn_tuple_struct.field_len() {
        if let Some(field) = dyn_tuple_struct.field_at(index) {
            debug.field(&field as &dyn fmt::Debug);
        }
    }
    debug.finish()
}

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// # Rules
///
/// 1. If `other` is not a `List`, return `Some(false)`.
/// 2. If the lengths differ, return `Some(false)`.
/// 3. Compare items pairwise, return the first result that is not `Some(true)`.
///
/// The concrete list types may differ, `Vec<i32>` equals `Vec<Value>`
/// holding the same integers only if the items compare equal.
#[inline(never)]
pub fn list_partial_eq(x: &dyn List, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::List(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.len() != y.len() {
        return Some(false);
    }

    for (item, y_item) in x.iter().zip(y.iter()) {
        let result = item.reflect_partial_eq(y_item);
        if result != Some(true) {
            return result;
        }
    }

    Some(true)
}

/// A function use for implementing [`Reflect::reflect_debug`].
#[inline(never)]
pub fn list_debug(dyn_list: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(dyn_list.iter()).finish()
}

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// # Rules
///
/// 1. If `other` is not a `Map`, return `Some(false)`.
/// 2. If the lengths differ, return `Some(false)`.
/// 3. Look up every key of `x` in `y`, a missing key returns `Some(false)`,
///    otherwise return the first value comparison that is not `Some(true)`.
#[inline(never)]
pub fn map_partial_eq(x: &dyn Map, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Map(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.len() != y.len() {
        return Some(false);
    }

    for (key, val) in x.iter() {
        let Some(y_val) = y.get(key) else {
            return Some(false);
        };
        let result = val.reflect_partial_eq(y_val);
        if result != Some(true) {
            return result;
        }
    }

    Some(true)
}

/// A function use for implementing [`Reflect::reflect_debug`].
#[inline(never)]
pub fn map_debug(dyn_map: &dyn Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_map().entries(dyn_map.iter()).finish()
}

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// Two `None`s are equal, two `Some`s compare their pointees.
#[inline(never)]
pub fn option_partial_eq(x: &dyn Optional, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Option(y) = y.reflect_ref() else {
        return Some(false);
    };

    match (x.value(), y.value()) {
        (None, None) => Some(true),
        (Some(x), Some(y)) => x.reflect_partial_eq(y),
        _ => Some(false),
    }
}

/// A function use for implementing [`Reflect::reflect_debug`].
#[inline(never)]
pub fn option_debug(dyn_option: &dyn Optional, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match dyn_option.value() {
        Some(value) => f.debug_tuple("Some").field(&value).finish(),
        None => f.pad("None"),
    }
}

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// Scalars are equal if they have the same [`ScalarKind`] and value.
/// `String` and `&'static str` share a kind.
///
/// [`ScalarKind`]: crate::info::ScalarKind
#[inline(never)]
pub fn scalar_partial_eq(x: &dyn Scalar, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Scalar(y) = y.reflect_ref() else {
        return Some(false);
    };

    Some(x.scalar_kind() == y.scalar_kind() && x.scalar() == y.scalar())
}

/// A function use for implementing [`Reflect::reflect_debug`].
#[inline(never)]
pub fn scalar_debug(dyn_scalar: &dyn Scalar, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match dyn_scalar.scalar() {
        ScalarRef::Bool(v) => fmt::Debug::fmt(&v, f),
        ScalarRef::Int(v) => fmt::Debug::fmt(&v, f),
        ScalarRef::Uint(v) => fmt::Debug::fmt(&v, f),
        ScalarRef::Float(v) => fmt::Debug::fmt(&v, f),
        ScalarRef::Str(v) => fmt::Debug::fmt(v, f),
    }
}
