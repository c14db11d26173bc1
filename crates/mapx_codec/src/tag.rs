use std::time::SystemTime;

use mapx_reflect::info::{NamedField, TypeInfo};

/// The namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "mapx";

// -----------------------------------------------------------------------------
// Tag

/// The parsed `#[reflect(tag(ns = "..."))]` directive of a field.
///
/// The tag string is comma separated. The first segment is the exposed name,
/// `-` ignores the field and an empty segment keeps the field's own name.
/// The remaining segments are options:
///
/// - `omitempty`: the encoder omits empty values;
/// - `inline`: the fields of a struct are promoted into the parent, prefixed
///   by the name segment (dropped silently for non-struct fields);
/// - `raw`: a struct is copied as is rather than converted to a mapping.
///
/// Unknown options are ignored.
///
/// # Examples
///
/// ```
/// use mapx_codec::tag::Tag;
/// use mapx_reflect::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect, Clone)]
/// struct User {
///     #[reflect(tag(mapx = "user_name,omitempty"))]
///     pub name: String,
///     #[reflect(tag(mapx = "-"))]
///     pub password: String,
/// }
///
/// let info = User::type_info().as_struct().unwrap();
///
/// let tag = Tag::parse("mapx", info.field("name").unwrap());
/// assert_eq!(tag.name(), "user_name");
/// assert!(tag.omit_empty());
///
/// let tag = Tag::parse("mapx", info.field("password").unwrap());
/// assert!(tag.ignore());
///
/// let tag = Tag::parse("other", info.field("name").unwrap());
/// assert_eq!(tag.name(), "name");
/// assert!(tag.empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    name: &'static str,
    prefix: &'static str,
    renamed: bool,
    empty: bool,
    omit_empty: bool,
    ignore: bool,
    inline: bool,
    raw: bool,
}

impl Tag {
    /// Parses the tag of `field` in `namespace`.
    pub fn parse(namespace: &str, field: &NamedField) -> Self {
        let base = field.type_info().base();

        let mut tag = Tag {
            name: field.name(),
            prefix: "",
            renamed: false,
            empty: false,
            omit_empty: false,
            ignore: false,
            inline: false,
            raw: is_known_opaque(base),
        };

        let raw_tag = field.tag(namespace).unwrap_or_default();
        if raw_tag.is_empty() {
            tag.empty = true;
            return tag;
        }

        let mut segments = raw_tag.split(',');
        match segments.next() {
            Some("-") => {
                tag.ignore = true;
                return tag;
            }
            Some("") | None => {}
            Some(name) => {
                tag.name = name;
                tag.renamed = true;
            }
        }

        for option in segments {
            match option {
                "omitempty" => tag.omit_empty = true,
                "inline" => {
                    if base.is_struct() {
                        tag.inline = true;
                        tag.prefix = if tag.renamed { tag.name } else { "" };
                    }
                }
                "raw" => tag.raw = true,
                _ => {}
            }
        }

        tag
    }

    /// The exposed name. Without a name segment this is the field's name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The prefix of names promoted through `inline`.
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Returns `true` if the tag carries a name segment.
    #[inline]
    pub const fn renamed(&self) -> bool {
        self.renamed
    }

    /// Returns `true` if the field has no tag in the namespace.
    ///
    /// This is observably the same as an empty tag string.
    #[inline]
    pub const fn empty(&self) -> bool {
        self.empty
    }

    /// `omitempty`
    #[inline]
    pub const fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    /// `-`
    #[inline]
    pub const fn ignore(&self) -> bool {
        self.ignore
    }

    /// `inline`, only set for struct fields.
    #[inline]
    pub const fn inline(&self) -> bool {
        self.inline
    }

    /// `raw`, or a well-known opaque type.
    #[inline]
    pub const fn raw(&self) -> bool {
        self.raw
    }
}

/// Types that are always copied as is.
pub fn is_known_opaque(info: &TypeInfo) -> bool {
    info.type_is::<SystemTime>()
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use mapx_reflect::derive::Reflect;
    use mapx_reflect::info::{StructInfo, Typed};

    use super::Tag;

    #[derive(Reflect, Clone, Default)]
    struct Inner {
        pub a: i32,
    }

    #[derive(Reflect, Clone)]
    struct Tagged {
        pub plain: i32,
        #[reflect(tag(mapx = ""))]
        pub blank: i32,
        #[reflect(tag(mapx = ",omitempty"))]
        pub unnamed_omit: i32,
        #[reflect(tag(mapx = "n,omitempty,raw,unknown"))]
        pub many: i32,
        #[reflect(tag(mapx = "-,omitempty"))]
        pub skipped: i32,
        #[reflect(tag(mapx = "p_,inline"))]
        pub inner: Inner,
        #[reflect(tag(mapx = ",inline"))]
        pub inner_ptr: Option<Inner>,
        #[reflect(tag(mapx = "x,inline"))]
        pub not_struct: i32,
        pub at: SystemTime,
    }

    fn info() -> &'static StructInfo {
        Tagged::type_info().as_struct().unwrap()
    }

    fn parse(name: &str) -> Tag {
        Tag::parse("mapx", info().field(name).unwrap())
    }

    #[test]
    fn absent_and_blank_tags() {
        let plain = parse("plain");
        assert_eq!(plain.name(), "plain");
        assert!(plain.empty());
        assert!(!plain.renamed());

        let blank = parse("blank");
        assert_eq!(blank.name(), "blank");
        assert!(blank.empty());
    }

    #[test]
    fn options() {
        let tag = parse("unnamed_omit");
        assert_eq!(tag.name(), "unnamed_omit");
        assert!(tag.omit_empty());
        assert!(!tag.empty());

        let tag = parse("many");
        assert_eq!(tag.name(), "n");
        assert!(tag.omit_empty() && tag.raw() && tag.renamed());
        assert!(!tag.inline());
    }

    #[test]
    fn ignore_drops_options() {
        let tag = parse("skipped");
        assert!(tag.ignore());
        assert!(!tag.omit_empty());
    }

    #[test]
    fn inline_needs_a_struct() {
        let tag = parse("inner");
        assert!(tag.inline());
        assert_eq!(tag.prefix(), "p_");

        let tag = parse("inner_ptr");
        assert!(tag.inline());
        assert_eq!(tag.prefix(), "");

        let tag = parse("not_struct");
        assert!(!tag.inline());
        assert_eq!(tag.name(), "x");
    }

    #[test]
    fn system_time_is_raw() {
        assert!(parse("at").raw());
        assert!(!parse("plain").raw());
    }

    #[test]
    fn other_namespace() {
        let tag = Tag::parse("json", info().field("many").unwrap());
        assert_eq!(tag.name(), "many");
        assert!(tag.empty());
    }
}
