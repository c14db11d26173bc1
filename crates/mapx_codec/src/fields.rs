//! Field resolution and the process-wide field cache.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use std::sync::{PoisonError, RwLock};

use mapx_reflect::info::{StructInfo, TypeInfo};
use mapx_utils::TypeIdMap;
use mapx_utils::hash::{FixedHashState, HashMap};

use crate::tag::Tag;

// -----------------------------------------------------------------------------
// ResolvedField

/// A field visible to the codec, after promotion of embedded and inline
/// fields.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    name: Cow<'static, str>,
    index: Box<[usize]>,
    ty: &'static TypeInfo,
    base: &'static TypeInfo,
    fields: Option<&'static [ResolvedField]>,
    tag: Tag,
}

impl ResolvedField {
    /// The exposed name, unique within its list.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field indices from the resolved struct down to this field.
    ///
    /// Promoted fields have more than one index.
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// The declared type.
    #[inline]
    pub fn ty(&self) -> &'static TypeInfo {
        self.ty
    }

    /// The declared type with every `Option` layer stripped.
    #[inline]
    pub fn base(&self) -> &'static TypeInfo {
        self.base
    }

    /// Fields of the base type, if it is a struct the codec recurses into.
    #[inline]
    pub fn fields(&self) -> Option<&'static [ResolvedField]> {
        self.fields
    }

    #[inline]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    #[inline]
    fn depth(&self) -> usize {
        self.index.len()
    }
}

// -----------------------------------------------------------------------------
// Cache

type FieldCache = HashMap<Box<str>, TypeIdMap<&'static [ResolvedField]>>;

static CACHE: RwLock<FieldCache> = RwLock::new(HashMap::with_hasher(FixedHashState));

/// Returns the resolved fields of `info` in `namespace`.
///
/// Results are computed once per (namespace, type) and live for the rest of
/// the process. Types that are not structs have no fields.
///
/// # Examples
///
/// ```
/// use mapx_codec::fields::cached_fields;
/// use mapx_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Clone)]
/// struct Point {
///     pub x: f64,
///     #[reflect(tag(mapx = "Y"))]
///     pub y: f64,
///     hidden: f64,
/// }
///
/// let fields = cached_fields("mapx", Point::type_info());
/// let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["x", "Y"]);
///
/// assert!(core::ptr::eq(fields, cached_fields("mapx", Point::type_info())));
/// ```
pub fn cached_fields(namespace: &str, info: &'static TypeInfo) -> &'static [ResolvedField] {
    let Ok(struct_info) = info.as_struct() else {
        return &[];
    };

    let ty_id = info.ty_id();

    {
        let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(fields) = cache.get(namespace).and_then(|by_type| by_type.get(&ty_id)) {
            return fields;
        }
    }

    // Nested structs are resolved recursively, so no lock is held here.
    let computed = resolve_fields(namespace, struct_info);

    let mut cache = CACHE.write().unwrap_or_else(PoisonError::into_inner);
    let by_type = cache.entry(Box::from(namespace)).or_default();
    *by_type.get_or_insert(ty_id, || {
        log::debug!(
            "resolved {} fields of `{}` in namespace `{namespace}`",
            computed.len(),
            info.type_path(),
        );
        Box::leak(computed.into_boxed_slice())
    })
}

// -----------------------------------------------------------------------------
// Resolution

/// A struct whose fields join the result at `index`.
struct Pending {
    info: &'static StructInfo,
    index: Vec<usize>,
    prefix: String,
}

/// Breadth-first walk over the fields of `root`.
///
/// Embedded structs without an explicit name and inline structs are
/// flattened into the parent. A shallower field hides deeper fields of the
/// same name, fields of the same name at the same depth hide each other.
fn resolve_fields(namespace: &str, root: &'static StructInfo) -> Vec<ResolvedField> {
    let mut candidates: Vec<ResolvedField> = Vec::new();

    let mut current = Vec::new();
    let mut next = vec![Pending {
        info: root,
        index: Vec::new(),
        prefix: String::new(),
    }];

    while !next.is_empty() {
        core::mem::swap(&mut current, &mut next);
        next.clear();

        for pending in current.drain(..) {
            for (i, field) in pending.info.iter().enumerate() {
                if !field.is_exported() {
                    continue;
                }

                let tag = Tag::parse(namespace, field);
                if tag.ignore() {
                    continue;
                }

                let mut index = pending.index.clone();
                index.push(i);

                let ty = field.type_info();
                let base = ty.base();

                let promoted = if tag.inline() {
                    Some(concat(&pending.prefix, tag.prefix()))
                } else if field.is_embedded() && !tag.renamed() && !tag.raw() && base.is_struct() {
                    Some(pending.prefix.clone())
                } else {
                    None
                };

                if let Some(prefix) = promoted
                    && let Ok(info) = base.as_struct()
                {
                    next.push(Pending {
                        info,
                        index,
                        prefix,
                    });
                    continue;
                }

                let fields = if base.is_struct() && !tag.raw() {
                    Some(cached_fields(namespace, base))
                } else {
                    None
                };

                let name = if pending.prefix.is_empty() {
                    Cow::Borrowed(tag.name())
                } else {
                    Cow::Owned(concat(&pending.prefix, tag.name()))
                };

                candidates.push(ResolvedField {
                    name,
                    index: index.into_boxed_slice(),
                    ty,
                    base,
                    fields,
                    tag,
                });
            }
        }
    }

    dominant_fields(root, candidates)
}

/// Keeps the shallowest field of each name, dropping names that are
/// ambiguous at that depth, and restores declaration order.
fn dominant_fields(root: &StructInfo, mut candidates: Vec<ResolvedField>) -> Vec<ResolvedField> {
    // Stable: same name and depth keep discovery order.
    candidates.sort_by(|a, b| a.name.cmp(&b.name).then(a.depth().cmp(&b.depth())));

    let mut out = Vec::with_capacity(candidates.len());
    let mut rest = candidates.as_slice();

    while let Some(first) = rest.first() {
        let run = rest.iter().take_while(|f| f.name == first.name).count();
        let (group, tail) = rest.split_at(run);
        rest = tail;

        let shallowest = group.iter().take_while(|f| f.depth() == first.depth()).count();
        if shallowest == 1 {
            out.push(first.clone());
        } else {
            log::debug!(
                "dropped {shallowest} conflicting fields named `{}` in `{}`",
                first.name,
                root.type_path(),
            );
        }
    }

    out.sort_by(|a, b| a.index.cmp(&b.index));
    out
}

#[inline]
fn concat(a: &str, b: &str) -> String {
    let mut s = String::with_capacity(a.len() + b.len());
    s.push_str(a);
    s.push_str(b);
    s
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use mapx_reflect::derive::Reflect;
    use mapx_reflect::info::Typed;

    use super::{ResolvedField, cached_fields};

    fn names(fields: &[ResolvedField]) -> Vec<&str> {
        fields.iter().map(ResolvedField::name).collect()
    }

    #[derive(Reflect, Clone, Default)]
    #[reflect(default)]
    struct Base {
        pub id: i64,
        pub name: String,
    }

    #[derive(Reflect, Clone, Default)]
    #[reflect(default)]
    struct Deep {
        #[reflect(embed)]
        pub base: Base,
        pub level: u8,
    }

    #[derive(Reflect, Clone)]
    struct Outer {
        pub first: bool,
        #[reflect(embed)]
        pub deep: Option<Deep>,
        pub name: String,
        private: i32,
        #[reflect(tag(mapx = "-"))]
        pub ignored: i32,
    }

    #[test]
    fn promotion_and_shadowing() {
        let fields = cached_fields("mapx", Outer::type_info());
        assert_eq!(names(fields), ["first", "id", "level", "name"]);

        let id = &fields[1];
        assert_eq!(id.index(), [1, 0, 0]);
        assert!(id.ty().type_is::<i64>());

        // Declared directly on `Outer`.
        assert_eq!(fields[3].index(), [2]);
    }

    #[derive(Reflect, Clone)]
    struct Left {
        pub x: i32,
        pub left: i32,
    }

    #[derive(Reflect, Clone)]
    struct Right {
        pub x: i32,
        pub right: i32,
    }

    #[derive(Reflect, Clone)]
    struct Ambiguous {
        #[reflect(embed)]
        pub l: Left,
        #[reflect(embed)]
        pub r: Right,
    }

    #[test]
    fn same_depth_conflicts_are_dropped() {
        let fields = cached_fields("mapx", Ambiguous::type_info());
        assert_eq!(names(fields), ["left", "right"]);
    }

    #[derive(Reflect, Clone)]
    struct Named {
        #[reflect(embed, tag(mapx = "base"))]
        pub base: Base,
        #[reflect(tag(mapx = "b_,inline"))]
        pub inlined: Base,
        #[reflect(tag(mapx = ",inline"))]
        pub bare: Option<Left>,
    }

    #[test]
    fn explicit_names_and_inline_prefix() {
        let fields = cached_fields("mapx", Named::type_info());
        assert_eq!(names(fields), ["base", "b_id", "b_name", "x", "left"]);

        let base = &fields[0];
        assert!(base.base().type_is::<Base>());
        assert_eq!(names(base.fields().unwrap()), ["id", "name"]);

        assert_eq!(fields[1].index(), [1, 0]);
        assert_eq!(fields[3].index(), [2, 0]);
    }

    #[test]
    fn namespaces_are_separate() {
        let a = cached_fields("mapx", Named::type_info());
        let b = cached_fields("other", Named::type_info());
        assert!(!core::ptr::eq(a, b));
        assert_eq!(names(b), ["id", "name", "inlined", "bare"]);
    }

    #[test]
    fn non_structs_have_no_fields() {
        assert!(cached_fields("mapx", i32::type_info()).is_empty());
        assert!(cached_fields("mapx", <Option<Base>>::type_info()).is_empty());
    }

    #[derive(Reflect, Clone)]
    struct Concurrent {
        pub a: i32,
        pub b: Base,
    }

    #[test]
    fn concurrent_population_agrees() {
        let results: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        let fields = cached_fields("concurrent", Concurrent::type_info());
                        fields.as_ptr() as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.windows(2).all(|w| w[0] == w[1]));
        let fields = cached_fields("concurrent", Concurrent::type_info());
        assert_eq!(results[0], fields.as_ptr() as usize);
    }
}
