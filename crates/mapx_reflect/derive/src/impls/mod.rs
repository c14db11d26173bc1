// -----------------------------------------------------------------------------
// Modules

mod match_reflect;

mod opaque_kind;
mod struct_kind;
mod tuple_struct_kind;

mod reflect_trait;
mod trait_reflect;
mod trait_type_path;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use match_reflect::match_reflect_impls;

use opaque_kind::impl_opaque;
use struct_kind::impl_struct;
use trait_reflect::impl_trait_reflect;
use trait_typed::impl_trait_typed;
use tuple_struct_kind::impl_tuple_struct;

pub(crate) use reflect_trait::impl_reflect_trait;
pub(crate) use trait_type_path::impl_trait_type_path;
