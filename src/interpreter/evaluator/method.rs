/// Attribute access and method-call dispatch.
pub mod core;
/// Methods of `str` values.
pub mod string;
/// Methods of lists, tuples and mappings.
pub mod collection;
