//! Multi-word arithmetic substrate shared by all field implementations.

pub(crate) mod solinas;
pub(crate) mod util;
