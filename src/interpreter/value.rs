/// Ordered mapping storage.
///
/// Defines `Mapping`, the insertion-ordered, string-keyed map behind
/// `Value::Map`. Keeps lookups by key fast while preserving the order in which
/// keys were first inserted, which is the order the renderer prints them in.
pub mod mapping;

pub mod core;
