use core::fmt;

use crate::Reflect;
use crate::info::Typed;
use crate::registry::{Capability, FromType, TypeTrait};

// -----------------------------------------------------------------------------
// ReflectAny

/// The empty capability.
///
/// Every value satisfies it, so the encoder treats a function registered for
/// `ReflectAny` as a catch-all. Decoders reject it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReflectAny;

impl TypeTrait for ReflectAny {}

impl<T: Typed> FromType<T> for ReflectAny {
    #[inline]
    fn from_type() -> Self {
        Self
    }
}

impl Capability for ReflectAny {
    type Object = dyn Reflect;

    const METHODS: usize = 0;

    #[inline]
    fn get<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        Some(value)
    }

    #[inline]
    fn get_mut<'a>(&self, value: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        Some(value)
    }

    #[inline]
    fn universal() -> Option<Self> {
        Some(Self)
    }
}

// -----------------------------------------------------------------------------
// ReflectDisplay

type DisplayObject = dyn fmt::Display + Send + Sync + 'static;

/// Casts reflected values to [`fmt::Display`].
///
/// # Examples
///
/// ```
/// use mapx_reflect::Reflect;
/// use mapx_reflect::registry::{Capability, FromType, ReflectDisplay};
///
/// let display = <ReflectDisplay as FromType<f64>>::from_type();
///
/// let value: Box<dyn Reflect> = Box::new(1.5_f64);
/// assert_eq!(display.get(&*value).unwrap().to_string(), "1.5");
/// assert!(display.get(&1_u8).is_none());
/// ```
#[derive(Clone, Copy)]
pub struct ReflectDisplay {
    get: fn(&dyn Reflect) -> Option<&DisplayObject>,
    get_mut: fn(&mut dyn Reflect) -> Option<&mut DisplayObject>,
}

impl ReflectDisplay {
    /// Casts `value` to `&dyn Display`.
    #[inline]
    pub fn get<'a>(&self, value: &'a dyn Reflect) -> Option<&'a DisplayObject> {
        (self.get)(value)
    }
}

impl TypeTrait for ReflectDisplay {}

impl<T: fmt::Display + Reflect + Typed> FromType<T> for ReflectDisplay {
    fn from_type() -> Self {
        fn get<T: fmt::Display + Reflect>(value: &dyn Reflect) -> Option<&DisplayObject> {
            value.downcast_ref::<T>().map(|v| v as &DisplayObject)
        }
        fn get_mut<T: fmt::Display + Reflect>(value: &mut dyn Reflect) -> Option<&mut DisplayObject> {
            value.downcast_mut::<T>().map(|v| v as &mut DisplayObject)
        }

        Self {
            get: get::<T>,
            get_mut: get_mut::<T>,
        }
    }
}

impl Capability for ReflectDisplay {
    type Object = DisplayObject;

    const METHODS: usize = 1;

    #[inline]
    fn get<'a>(&self, value: &'a dyn Reflect) -> Option<&'a DisplayObject> {
        (self.get)(value)
    }

    #[inline]
    fn get_mut<'a>(&self, value: &'a mut dyn Reflect) -> Option<&'a mut DisplayObject> {
        (self.get_mut)(value)
    }
}

impl fmt::Debug for ReflectDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("ReflectDisplay")
    }
}
