use core::any::{Any, TypeId};

use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// Information for a named (struct) field.
///
/// Besides name and type, a field records:
///
/// - whether it is exported (declared `pub`);
/// - whether it is embedded (`#[reflect(embed)]`), in which case the fields
///   of its base struct are promoted into the outer struct;
/// - its raw tags, `(namespace, value)` pairs from `#[reflect(tag(...))]`.
///
/// # Examples
///
/// ```
/// use mapx_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Clone)]
/// struct Foo {
///     #[reflect(tag(mapx = "a,omitempty"))]
///     pub field_a: f32,
///     field_b: u8,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field_a = info.field_at(0).unwrap();
///
/// assert!(field_a.type_is::<f32>());
/// assert_eq!(field_a.name(), "field_a");
/// assert_eq!(field_a.tag("mapx"), Some("a,omitempty"));
/// assert_eq!(field_a.tag("json"), None);
/// assert!(field_a.is_exported());
/// assert!(!info.field_at(1).unwrap().is_exported());
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    exported: bool,
    embedded: bool,
    tags: &'static [(&'static str, &'static str)],
}

impl NamedField {
    /// Creates a new exported, non-embedded [`NamedField`] without tags.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            name,
            type_info: T::type_info,
            exported: true,
            embedded: false,
            tags: &[],
        }
    }

    /// Sets whether the field is exported.
    #[inline]
    pub const fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    /// Sets whether the field is embedded.
    #[inline]
    pub const fn with_embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// Sets the raw `(namespace, value)` tag pairs.
    #[inline]
    pub const fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    /// Returns the raw tag value for the namespace, if present.
    ///
    /// A present but empty tag returns `Some("")`.
    pub fn tag(&self, namespace: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(ns, _)| *ns == namespace)
            .map(|(_, value)| *value)
    }

    /// Returns all raw tag pairs.
    #[inline]
    pub const fn tags(&self) -> &'static [(&'static str, &'static str)] {
        self.tags
    }

    /// Returns `true` if the field is visible outside its module.
    #[inline]
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// Returns `true` if the field is an embedded struct.
    #[inline]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}

// -----------------------------------------------------------------------------
// UnnamedField

/// Information for an unnamed (tuple) field.
///
/// # Examples
///
/// ```
/// use mapx_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Clone)]
/// struct Foo(f32);
///
/// let info = Foo::type_info().as_tuple_struct().unwrap();
/// let field_info = info.field_at(0).unwrap();
///
/// assert!(field_info.type_is::<f32>());
/// assert_eq!(field_info.index(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct UnnamedField {
    ty_id: TypeId,
    index: usize,
    type_info: fn() -> &'static TypeInfo,
}

impl UnnamedField {
    /// Creates a new [`UnnamedField`] for the field at `index` with type `T`.
    #[inline]
    pub const fn new<T: Typed>(index: usize) -> Self {
        Self {
            ty_id: TypeId::of::<T>(),
            index,
            type_info: T::type_info,
        }
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field index (position in the tuple struct).
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }
}
