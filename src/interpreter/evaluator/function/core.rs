use std::{fmt, mem, rc::Rc};

use crate::{
    ast::{Expr, FunctionDef},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, MAX_CALL_DEPTH, Namespace},
            function::{builtin, convert, min_max, print, sequence},
            utils::check_arity,
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and the line number.
/// It returns a value wrapped in `EvalResult`.
pub type BuiltinFn = fn(&[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
/// - `AtLeast(n)` means the builtin is variadic with `n` required arguments.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    ///
    /// Returns `true` if the count is permitted, `false` otherwise.
    #[must_use]
    pub fn check(&self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == *m,
            Self::OneOf(arr) => arr.contains(&n),
            Self::AtLeast(m) => n >= *m,
        }
    }
}

/// A native function: the always-visible builtins and the members of the
/// capability modules.
pub struct BuiltinDef {
    pub name:  &'static str,
    pub arity: Arity,
    pub func:  BuiltinFn,
}

impl fmt::Debug for BuiltinDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuiltinDef")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

impl BuiltinDef {
    /// Checks the arity and invokes the native function.
    ///
    /// # Errors
    /// `ArgumentCountMismatch` when the arity does not accept `args.len()`,
    /// otherwise whatever the function reports.
    pub fn call(&self, args: &[Value], line: usize) -> EvalResult<Value> {
        if !self.arity.check(args.len()) {
            return Err(RuntimeError::ArgumentCountMismatch { name: self.name.to_string(),
                                                             found: args.len(),
                                                             line });
        }
        (self.func)(args, line)
    }
}

/// Defines native functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin.
///
/// The macro produces a static table of `BuiltinDef` under the first given
/// name and a list of the function names under the second.
macro_rules! builtin_functions {
    (
        $table:ident, $names:ident;
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static $table: &[$crate::interpreter::evaluator::function::core::BuiltinDef] = &[
            $(
                $crate::interpreter::evaluator::function::core::BuiltinDef {
                    name: $name,
                    arity: $arity,
                    func: $func,
                },
            )*
        ];
        pub const $names: &[&str] = &[
            $($name,)*
        ];
    };
}

pub(crate) use builtin_functions;

builtin_functions! {
    BUILTIN_TABLE, BUILTIN_FUNCTIONS;
    "len"       => { arity: Arity::Exact(1), func: sequence::len },
    "sum"       => { arity: Arity::OneOf(&[1, 2]), func: sequence::sum },
    "min"       => { arity: Arity::AtLeast(1), func: |args, line| min_max::min_max("min", args, line) },
    "max"       => { arity: Arity::AtLeast(1), func: |args, line| min_max::min_max("max", args, line) },
    "abs"       => { arity: Arity::Exact(1), func: builtin::abs },
    "round"     => { arity: Arity::OneOf(&[1, 2]), func: builtin::round },
    "int"       => { arity: Arity::OneOf(&[0, 1]), func: convert::int },
    "float"     => { arity: Arity::OneOf(&[0, 1]), func: convert::float },
    "str"       => { arity: Arity::OneOf(&[0, 1]), func: convert::str },
    "bool"      => { arity: Arity::OneOf(&[0, 1]), func: convert::bool },
    "repr"      => { arity: Arity::Exact(1), func: convert::repr },
    "list"      => { arity: Arity::OneOf(&[0, 1]), func: convert::list },
    "tuple"     => { arity: Arity::OneOf(&[0, 1]), func: convert::tuple },
    "dict"      => { arity: Arity::OneOf(&[0, 1]), func: convert::dict },
    "sorted"    => { arity: Arity::Exact(1), func: sequence::sorted },
    "reversed"  => { arity: Arity::Exact(1), func: sequence::reversed },
    "range"     => { arity: Arity::OneOf(&[1, 2, 3]), func: sequence::range },
    "enumerate" => { arity: Arity::OneOf(&[1, 2]), func: sequence::enumerate },
    "zip"       => { arity: Arity::AtLeast(0), func: sequence::zip },
    "any"       => { arity: Arity::Exact(1), func: |args, line| sequence::any_all(false, args, line) },
    "all"       => { arity: Arity::Exact(1), func: |args, line| sequence::any_all(true, args, line) },
    "print"     => { arity: Arity::AtLeast(0), func: print::print },
}

/// Finds a builtin function by name.
///
/// # Example
/// ```
/// use puf::interpreter::evaluator::function::core::lookup_builtin;
///
/// assert_eq!(lookup_builtin("len").map(|def| def.name), Some("len"));
/// assert!(lookup_builtin("md5").is_none());
/// ```
#[must_use]
pub fn lookup_builtin(name: &str) -> Option<&'static BuiltinDef> {
    BUILTIN_TABLE.iter().find(|def| def.name == name)
}

impl Context<'_> {
    /// Evaluates a function call.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    /// Builtins check their arity and run natively; user-defined functions
    /// evaluate their body with the parameters bound.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the function.
    /// - `arguments`: Argument expressions.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The function result or an error if lookup, arity or the body fails.
    pub fn eval_call(&mut self, callee: &Expr, arguments: &[Expr], line: usize) -> EvalResult<Value> {
        let callee = self.eval(callee)?;
        let args = self.eval_elements(arguments)?;
        self.call_value(&callee, &args, line)
    }

    /// Calls an already evaluated function value.
    ///
    /// # Errors
    /// `NotCallable` if `callee` is not a function.
    pub fn call_value(&mut self, callee: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
        match callee {
            Value::Builtin(def) => def.call(args, line),
            Value::Function(def) => self.call_user_defined_function(def, args, line),
            other => Err(RuntimeError::NotCallable { type_name: other.type_name(),
                                                     line }),
        }
    }

    /// Executes a user-defined function.
    ///
    /// The body sees its parameters in a fresh frame on top of the locals and
    /// globals; frames of the caller are hidden for the duration of the call
    /// and restored afterwards, also on error.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` for a wrong number of arguments.
    /// - `RecursionLimit` once calls nest deeper than [`MAX_CALL_DEPTH`].
    fn call_user_defined_function(&mut self,
                                  func: &Rc<FunctionDef>,
                                  args: &[Value],
                                  line: usize)
                                  -> EvalResult<Value> {
        check_arity(&func.name, args, func.params.len(), line)?;
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::RecursionLimit { depth: MAX_CALL_DEPTH,
                                                      line });
        }

        let bindings = func.params
                           .iter()
                           .cloned()
                           .zip(args.iter().cloned())
                           .collect::<Namespace>();

        let caller_frames = mem::replace(&mut self.frames, vec![bindings]);
        self.depth += 1;
        let result = self.eval(&func.body);
        self.depth -= 1;
        self.frames = caller_frames;

        result
    }
}
