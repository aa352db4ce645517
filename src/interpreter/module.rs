use std::fmt;

use crate::interpreter::{evaluator::function::core::BuiltinDef, value::core::Value};

/// The `json` module: `dumps` and `loads`.
pub mod json;
/// The `math` module: constants and floating point functions.
pub mod math;
/// The `os` module: working directory, environment and process id.
pub mod os;
/// The `random` module.
pub mod random;
/// The `re` module: regular expressions.
pub mod re;
/// The `time` module.
pub mod time;

/// Supplies modules by name, both for `import` and for auto-import of
/// unknown names.
pub trait Resolver {
    /// Returns the module registered under `name`, if any.
    fn resolve(&self, name: &str) -> Option<&'static Module>;
}

/// A capability module.
///
/// Members are produced on demand, so a module can expose constants as well
/// as native functions.
pub struct Module {
    /// Name the module is imported under.
    pub name:   &'static str,
    /// Looks up a member by attribute name.
    pub member: fn(&str) -> Option<Value>,
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The pre-registered module table. Arbitrary libraries cannot be loaded.
///
/// # Example
/// ```
/// use puf::interpreter::module::{Resolver, StandardLibrary};
///
/// assert_eq!(StandardLibrary.resolve("os").map(|m| m.name), Some("os"));
/// assert!(StandardLibrary.resolve("bogusmodule123").is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardLibrary;

static MODULES: &[&Module] = &[&json::MODULE,
                               &math::MODULE,
                               &os::MODULE,
                               &random::MODULE,
                               &re::MODULE,
                               &time::MODULE];

impl Resolver for StandardLibrary {
    fn resolve(&self, name: &str) -> Option<&'static Module> {
        MODULES.iter().copied().find(|module| module.name == name)
    }
}

/// Finds `name` in a table of module functions.
pub(crate) fn lookup_function(table: &'static [BuiltinDef], name: &str) -> Option<Value> {
    table.iter().find(|def| def.name == name).map(Value::Builtin)
}
