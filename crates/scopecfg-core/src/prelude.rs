pub use scopecfg_types::prelude::*;

pub use crate::codec::{Codec, JsonCodec, TextCodec};
pub use crate::entry::{DynEntry, RuntimeEntry};
pub use crate::resolver::ScopeResolver;

// vim: ts=4
