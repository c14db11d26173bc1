//! Conversion between string-keyed maps and reflected structs.
//!
//! - [`Encoder`] turns a struct into a [`Mapping`].
//! - [`Decoder`] populates a struct from any string-keyed [`Map`].
//! - [`EncoderFuncs`] and [`DecoderFuncs`] plug custom conversions into both.
//!
//! Fields are configured with `#[reflect(tag(mapx = "..."))]`, see [`Tag`]
//! for the directives, and resolved once per type by
//! [`cached_fields`](fields::cached_fields).
//!
//! # Examples
//!
//! ```
//! use mapx_codec::{decode, encode};
//! use mapx_reflect::derive::Reflect;
//!
//! #[derive(Reflect, Clone, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Server {
//!     pub host: String,
//!     #[reflect(tag(mapx = "listen_port"))]
//!     pub port: u16,
//!     pub tls: Option<Tls>,
//! }
//!
//! #[derive(Reflect, Clone, Default, Debug, PartialEq)]
//! #[reflect(default)]
//! struct Tls {
//!     pub cert: String,
//! }
//!
//! let server = Server {
//!     host: "localhost".into(),
//!     port: 8080,
//!     tls: Some(Tls { cert: "a.pem".into() }),
//! };
//!
//! let map = encode(&server).unwrap();
//! assert!(map.contains_key("listen_port"));
//!
//! let mut back = Server::default();
//! decode(&map, &mut back).unwrap();
//! assert_eq!(back, server);
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod decoder;
mod encoder;
mod error;
mod json;

pub mod fields;
pub mod funcs;
pub mod tag;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use decoder::{Decoder, DecoderOpt};
pub use encoder::{Encoder, EncoderOpt};
pub use error::{DecodeError, Error};
pub use funcs::{BoxError, DecoderFuncs, EncoderFuncs, Outcome};
pub use json::normalize;
pub use tag::Tag;

use mapx_reflect::info::Typed;
use mapx_reflect::ops::Map;
use mapx_reflect::{Mapping, Reflect};

/// Encodes `value` with the default options.
///
/// See [`Encoder`].
#[inline]
pub fn encode<T: Reflect + Typed>(value: &T) -> Result<Mapping, Error> {
    Encoder::<T>::new(EncoderOpt::new()).encode(value)
}

/// Decodes `src` into `dst` with the default options.
///
/// See [`Decoder`].
#[inline]
pub fn decode<T: Reflect + Typed>(src: &dyn Map, dst: &mut T) -> Result<(), Error> {
    Decoder::<T>::new(DecoderOpt::new()).decode(src, dst)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec::Vec;

    use mapx_reflect::derive::Reflect;
    use mapx_reflect::serde::ReflectSerializer;

    use crate::{Encoder, EncoderFuncs, EncoderOpt};

    #[derive(Reflect, Clone)]
    struct Event {
        #[reflect(tag(mapx = "kind"))]
        pub name: String,
        pub ids: Vec<u32>,
        pub source: Option<Source>,
        #[reflect(tag(mapx = ",omitempty"))]
        pub note: String,
    }

    #[derive(Reflect, Clone)]
    struct Source {
        pub host: String,
    }

    #[test]
    fn encoded_json_shape() {
        let event = Event {
            name: "start".into(),
            ids: alloc::vec![1, 2],
            source: Some(Source { host: "h".into() }),
            note: String::new(),
        };

        let encoder = Encoder::<Event>::new(EncoderOpt::new().with_funcs(EncoderFuncs::json()));
        let map = encoder.encode(&event).unwrap();
        let json = serde_json::to_string(&ReflectSerializer::new(&map)).unwrap();

        assert_eq!(json, r#"{"ids":[1.0,2.0],"kind":"start","source":{"host":"h"}}"#);
    }
}
