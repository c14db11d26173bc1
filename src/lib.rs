#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Generated code resolves `mapx_reflect` to `mapx::reflect` when only this
// crate is a dependency.
extern crate self as mapx;

pub use mapx_codec as codec;
pub use mapx_reflect as reflect;
pub use mapx_utils as utils;

pub use mapx_codec::{
    Decoder, DecoderFuncs, DecoderOpt, Encoder, EncoderFuncs, EncoderOpt, Error, Outcome, decode,
    encode,
};
pub use mapx_reflect::{Mapping, Value, mapping};
