//! See following macros:
//!
//! - [`Reflect`]
//! - [`TypePath`]
//! - [`reflect_trait`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Full Reflection Derivation
///
/// `#[derive(Reflect)]` automatically implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `Struct` (for `struct T { ... }`)
/// - `TupleStruct` (for `struct T(...);`)
///
/// Unit structs (`struct T;`) are treated as `Opaque`. Enums and unions are
/// rejected, as are lifetime and const parameters.
///
/// The type must implement `Clone`, `reflect_clone` is built on it.
///
/// ## Implementation Control
///
/// `Typed` can be disabled and written by hand:
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// #[reflect(typed = false)]
/// struct Foo { /* ... */ }
/// ```
///
/// ### Custom Type Path
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// #[reflect(type_path = "you::me::Foo")]
/// struct Foo { /* ... */ }
/// ```
///
/// The path does not include generics, they are appended automatically.
///
/// ### Opaque Types
///
/// The `opaque` flag hides the fields of a struct. The converters in `mapx`
/// pass opaque values through unchanged.
///
/// ```rust, ignore
/// #[derive(Reflect, Clone, PartialEq, Debug)]
/// #[reflect(opaque, partial_eq, debug)]
/// struct Handle { /* ... */ }
/// ```
///
/// ## Standard Traits
///
/// - `default`: `Default` is available. It becomes the zero value of the
///   type, which the decoder needs to build list items of this type.
/// - `partial_eq`: `reflect_partial_eq` uses `PartialEq`.
/// - `debug`: `reflect_debug` uses `Debug`.
///
/// ## Capabilities
///
/// Capabilities are `TypeTrait`s stored in the type info.
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// #[reflect(type_trait = (ReflectDisplay, ReflectLabel))]
/// struct Id(u32);
/// ```
///
/// Each listed type must implement `FromType<Self>`.
///
/// ## Fields
///
/// A field declared `pub` is exported, other fields are ignored by the
/// converters but stay visible to reflection.
///
/// - `tag(ns = "...")`: raw tag strings, keyed by namespace.
/// - `embed`: the fields of this field are promoted into the parent.
///
/// ```rust, ignore
/// #[derive(Reflect, Clone, Default)]
/// #[reflect(default)]
/// struct User {
///     #[reflect(embed)]
///     pub base: Base,
///     #[reflect(tag(mapx = "user_name,omitempty", json = "name"))]
///     pub name: String,
///     secret: String,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_full_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}

/// # Derive TypePath Trait
///
/// This macro only implements `TypePath` trait.
///
/// ## Example
///
/// ```rust, ignore
/// // default implementation
/// #[derive(TypePath)]
/// struct A;
///
/// // custom implementation
/// #[derive(TypePath)]
/// #[reflect(type_path = "crate_name::foo::B")]
/// struct B;
///
/// // support generics
/// #[derive(TypePath)]
/// #[reflect(type_path = "crate_name::foo::C")]
/// struct C<T>(T);
/// ```
#[proc_macro_derive(TypePath, attributes(reflect))]
pub fn derive_type_path(input: TokenStream) -> TokenStream {
    use crate::derive_data::{ReflectMeta, TypeAttributes};

    let ast: DeriveInput = parse_macro_input!(input as DeriveInput);

    let attrs = match TypeAttributes::parse_attrs(&ast.attrs) {
        Ok(v) => v,
        Err(err) => return err.into_compile_error().into(),
    };

    match ReflectMeta::new(&ast.ident, &ast.generics, attrs) {
        Ok(meta) => impls::impl_trait_type_path(&meta).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Generates a capability for a trait.
///
/// For a trait `Label`, this generates `ReflectLabel`, which implements
/// `TypeTrait`, `FromType<T>` for every `T: Label + Reflect + Typed`,
/// and `Capability` with `Object = dyn Label + Send + Sync`.
///
/// `Capability::METHODS` is the number of methods declared by the trait. A
/// trait without methods still only matches the types that carry it, and
/// decoders reject it since there is nothing to call on the destination.
///
/// ## Example
///
/// ```ignore
/// #[reflect_trait]
/// pub trait Label {
///     fn label(&self) -> String;
/// }
///
/// #[derive(Reflect, Clone)]
/// #[reflect(type_trait = (ReflectLabel))]
/// struct Color(u8, u8, u8);
///
/// impl Label for Color { /* ... */ }
///
/// let value: Box<dyn Reflect> = Box::new(Color(0, 0, 0));
/// let cap = Color::type_info().type_traits().get::<ReflectLabel>().unwrap();
/// let label: &dyn Label = cap.get(&*value).unwrap();
/// ```
#[proc_macro_attribute]
pub fn reflect_trait(_args: TokenStream, input: TokenStream) -> TokenStream {
    impls::impl_reflect_trait(input)
}
