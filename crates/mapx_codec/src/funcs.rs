//! Registries of user conversion functions.
//!
//! - [`EncoderFuncs`]: typed value → untyped [`Value`], by exact type, by
//!   capability, or through a catch-all.
//! - [`DecoderFuncs`]: untyped source → typed destination, by exact
//!   (source, destination) pair or by destination capability.
//!
//! Registries are immutable, every registration returns a new registry that
//! shares the functions of the previous one.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use mapx_reflect::Reflect;
use mapx_reflect::Value;
use mapx_reflect::registry::{Capability, TypeTrait, TypeTraits};
use mapx_utils::TypeIdMap;
use mapx_utils::hash::HashMap;

/// The error type of conversion functions.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

// -----------------------------------------------------------------------------
// Outcome

/// The result of a catch-all encode function.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Store this value under the field's key.
    ///
    /// Ignored for nested structs, which are always encoded as mappings.
    Replace(Value),
    /// Omit the field.
    Skip,
    /// Continue with the default conversion.
    Unchanged,
}

// -----------------------------------------------------------------------------
// EncoderFuncs

type ExactEncodeFn = Arc<dyn Fn(&dyn Reflect) -> Option<Result<Value, BoxError>> + Send + Sync>;
type CapabilityEncodeFn =
    Arc<dyn Fn(&dyn TypeTrait, &dyn Reflect) -> Option<Result<Value, BoxError>> + Send + Sync>;
type AnyEncodeFn = Arc<dyn Fn(&dyn Reflect) -> Result<Outcome, BoxError> + Send + Sync>;

/// Encode-side conversion functions.
///
/// For each field the encoder tries, in order:
///
/// 1. the function registered for the exact base type of the field;
/// 2. capability functions whose capability the base type carries, in
///    registration order;
/// 3. the catch-all.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use mapx_codec::funcs::{EncoderFuncs, Outcome};
///
/// let funcs = EncoderFuncs::new()
///     .register(|d: &Duration| Ok(d.as_secs_f64()))
///     .register_any(|_| Ok(Outcome::Unchanged));
///
/// assert_eq!(funcs.len(), 1);
/// assert!(funcs.has_any());
/// ```
#[derive(Clone, Default)]
pub struct EncoderFuncs {
    exact: TypeIdMap<ExactEncodeFn>,
    capabilities: Vec<(TypeId, CapabilityEncodeFn)>,
    any: Option<AnyEncodeFn>,
}

impl EncoderFuncs {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` for values of type `T`.
    ///
    /// Replaces an earlier function for the same type.
    pub fn register<T, V>(&self, f: impl Fn(&T) -> Result<V, BoxError> + Send + Sync + 'static) -> Self
    where
        T: Reflect,
        V: Reflect,
    {
        log::trace!("register encoder for `{}`", core::any::type_name::<T>());

        let mut out = self.clone();
        out.exact.insert(
            TypeId::of::<T>(),
            Arc::new(move |value: &dyn Reflect| {
                value.downcast_ref::<T>().map(|v| f(v).map(Value::new))
            }),
        );
        out
    }

    /// Registers `f` for values whose type carries the capability `C`.
    ///
    /// A capability that every value satisfies, such as
    /// [`ReflectAny`](mapx_reflect::registry::ReflectAny), installs `f` as the
    /// catch-all: its result always replaces the field.
    pub fn register_capability<C, V>(
        &self,
        f: impl Fn(&C::Object) -> Result<V, BoxError> + Send + Sync + 'static,
    ) -> Self
    where
        C: Capability,
        V: Reflect,
    {
        log::trace!("register encoder for capability `{}`", core::any::type_name::<C>());

        let mut out = self.clone();

        if C::METHODS == 0
            && let Some(capability) = C::universal()
        {
            out.any = Some(Arc::new(move |value: &dyn Reflect| match capability.get(value) {
                Some(object) => f(object).map(|v| Outcome::Replace(Value::new(v))),
                None => Ok(Outcome::Unchanged),
            }));
            return out;
        }

        out.capabilities.push((
            TypeId::of::<C>(),
            Arc::new(move |capability: &dyn TypeTrait, value: &dyn Reflect| {
                let object = capability.downcast_ref::<C>()?.get(value)?;
                Some(f(object).map(Value::new))
            }),
        ));
        out
    }

    /// Installs the catch-all, replacing an earlier one.
    pub fn register_any(
        &self,
        f: impl Fn(&dyn Reflect) -> Result<Outcome, BoxError> + Send + Sync + 'static,
    ) -> Self {
        log::trace!("register catch-all encoder");

        let mut out = self.clone();
        out.any = Some(Arc::new(f));
        out
    }

    /// Number of exact and capability functions, the catch-all excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.exact.len() + self.capabilities.len()
    }

    /// Returns `true` if no function is registered, the catch-all included.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.any.is_none()
    }

    /// Returns `true` if a catch-all is installed.
    #[inline]
    pub fn has_any(&self) -> bool {
        self.any.is_some()
    }

    pub(crate) fn call_exact(
        &self,
        base: TypeId,
        value: &dyn Reflect,
    ) -> Option<Result<Value, BoxError>> {
        self.exact.get(&base).and_then(|f| f(value))
    }

    pub(crate) fn has_exact(&self, base: TypeId) -> bool {
        self.exact.contains(&base)
    }

    /// The first capability function whose capability is in `traits`.
    pub(crate) fn find_capability<'a>(
        &'a self,
        traits: &'a TypeTraits,
    ) -> Option<(&'a dyn TypeTrait, &'a CapabilityEncodeFn)> {
        self.capabilities
            .iter()
            .find_map(|(id, f)| traits.get_by_id(*id).map(|capability| (capability, f)))
    }

    pub(crate) fn call_any(&self, value: &dyn Reflect) -> Result<Outcome, BoxError> {
        match &self.any {
            Some(f) => f(value),
            None => Ok(Outcome::Unchanged),
        }
    }
}

impl fmt::Debug for EncoderFuncs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncoderFuncs")
            .field("exact", &self.exact.len())
            .field("capabilities", &self.capabilities.len())
            .field("any", &self.any.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// DecoderFuncs

type ExactDecodeFn =
    Arc<dyn Fn(&dyn Reflect, &mut dyn Reflect) -> Option<Result<(), BoxError>> + Send + Sync>;
type CapabilityDecodeFn = Arc<
    dyn Fn(&dyn Reflect, &dyn TypeTrait, &mut dyn Reflect) -> Option<Result<(), BoxError>>
        + Send
        + Sync,
>;

/// Decode-side conversion functions.
///
/// For a source value and a destination field the decoder tries the function
/// registered for the exact (source, destination) pair, then the capability
/// functions of the source type whose capability the destination carries.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use mapx_codec::funcs::DecoderFuncs;
///
/// let funcs = DecoderFuncs::new().register(|secs: &f64, d: &mut Duration| {
///     *d = Duration::try_from_secs_f64(*secs)?;
///     Ok(())
/// });
///
/// assert_eq!(funcs.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct DecoderFuncs {
    exact: HashMap<(TypeId, TypeId), ExactDecodeFn>,
    capabilities: TypeIdMap<Vec<(TypeId, CapabilityDecodeFn)>>,
}

impl DecoderFuncs {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` for sources of type `S` decoded into destinations of
    /// type `D`.
    ///
    /// Replaces an earlier function for the same pair.
    pub fn register<S, D>(
        &self,
        f: impl Fn(&S, &mut D) -> Result<(), BoxError> + Send + Sync + 'static,
    ) -> Self
    where
        S: Reflect,
        D: Reflect,
    {
        log::trace!(
            "register decoder from `{}` into `{}`",
            core::any::type_name::<S>(),
            core::any::type_name::<D>(),
        );

        let mut out = self.clone();
        out.exact.insert(
            (TypeId::of::<S>(), TypeId::of::<D>()),
            Arc::new(move |src: &dyn Reflect, dst: &mut dyn Reflect| {
                let src = src.downcast_ref::<S>()?;
                let dst = dst.downcast_mut::<D>()?;
                Some(f(src, dst))
            }),
        );
        out
    }

    /// Registers `f` for sources of type `S` decoded into destinations whose
    /// type carries the capability `C`.
    ///
    /// # Panics
    ///
    /// Panics if `C` has no methods: such a capability cannot receive a
    /// decoded value.
    pub fn register_capability<S, C>(
        &self,
        f: impl Fn(&S, &mut C::Object) -> Result<(), BoxError> + Send + Sync + 'static,
    ) -> Self
    where
        S: Reflect,
        C: Capability,
    {
        assert!(
            C::METHODS != 0,
            "mapx: cannot decode into the empty capability `{}`",
            core::any::type_name::<C>(),
        );

        log::trace!(
            "register decoder from `{}` into capability `{}`",
            core::any::type_name::<S>(),
            core::any::type_name::<C>(),
        );

        let mut out = self.clone();
        let entry: CapabilityDecodeFn = Arc::new(
            move |src: &dyn Reflect, capability: &dyn TypeTrait, dst: &mut dyn Reflect| {
                let src = src.downcast_ref::<S>()?;
                let object = capability.downcast_ref::<C>()?.get_mut(dst)?;
                Some(f(src, object))
            },
        );
        out.capabilities
            .get_or_insert(TypeId::of::<S>(), Vec::new)
            .push((TypeId::of::<C>(), entry));
        out
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.exact.len() + self.capabilities.iter().map(|(_, v)| v.len()).sum::<usize>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the function registered for the exact pair.
    ///
    /// Returns `None` if there is none.
    pub(crate) fn call_exact(
        &self,
        src: &dyn Reflect,
        dst_id: TypeId,
        dst: &mut dyn Reflect,
    ) -> Option<Result<(), BoxError>> {
        self.exact.get(&(src.ty_id(), dst_id)).and_then(|f| f(src, dst))
    }

    /// Runs the first capability function of the source type whose
    /// capability is in `traits`.
    ///
    /// Returns `None` if there is none.
    pub(crate) fn call_capability(
        &self,
        src: &dyn Reflect,
        traits: &TypeTraits,
        dst: &mut dyn Reflect,
    ) -> Option<Result<(), BoxError>> {
        let entries = self.capabilities.get(&src.ty_id())?;
        let (capability, f) = entries
            .iter()
            .find_map(|(id, f)| traits.get_by_id(*id).map(|capability| (capability, f)))?;
        f(src, capability, dst)
    }
}

impl fmt::Debug for DecoderFuncs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderFuncs")
            .field("exact", &self.exact.len())
            .field("capabilities", &self.capabilities.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use mapx_reflect::registry::{ReflectAny, ReflectDisplay};
    use mapx_reflect::Value;

    use super::{DecoderFuncs, EncoderFuncs, Outcome};

    #[test]
    fn registration_does_not_mutate() {
        let empty = EncoderFuncs::new();
        let one = empty.register(|v: &i32| Ok(i64::from(*v)));
        let two = one.register_capability::<ReflectDisplay, _>(|d| Ok(d.to_string()));

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert!(!two.has_any());
    }

    #[test]
    fn empty_capability_becomes_catch_all() {
        let funcs = EncoderFuncs::new()
            .register_capability::<ReflectAny, _>(|v| Ok(v.reflect_type_name().to_string()));

        assert_eq!(funcs.len(), 0);
        assert!(funcs.has_any());

        let out = funcs.call_any(&1_u8).unwrap();
        assert_eq!(out, Outcome::Replace(Value::new(String::from("u8"))));
    }

    #[test]
    fn exact_encode_returns_value() {
        let funcs = EncoderFuncs::new().register(|v: &i32| Ok(*v * 2));
        let out = funcs.call_exact(core::any::TypeId::of::<i32>(), &4_i32);
        assert_eq!(out.unwrap().unwrap(), Value::new(8_i32));
        assert!(funcs.call_exact(core::any::TypeId::of::<u8>(), &4_u8).is_none());
    }

    #[test]
    fn exact_decode_pair() {
        let funcs = DecoderFuncs::new().register(|s: &String, d: &mut i32| {
            *d = s.parse()?;
            Ok(())
        });

        let mut dst = 0_i32;
        let src = String::from("42");
        let out = funcs.call_exact(&src, core::any::TypeId::of::<i32>(), &mut dst);
        assert!(out.unwrap().is_ok());
        assert_eq!(dst, 42);

        let mut dst = 0_i64;
        assert!(funcs.call_exact(&src, core::any::TypeId::of::<i64>(), &mut dst).is_none());
    }

    #[test]
    #[should_panic(expected = "empty capability")]
    fn decode_into_empty_capability_panics() {
        let _ = DecoderFuncs::new().register_capability::<String, ReflectAny>(|_, _| Ok(()));
    }
}
