use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            function::core::Arity,
            method::{collection, string},
        },
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates `target.name(arguments)`.
    ///
    /// On a module the member is looked up and called like any function
    /// value. Strings, lists, tuples and mappings dispatch to their built-in
    /// methods.
    ///
    /// # Errors
    /// `UnknownAttribute` for a method the receiver does not have, plus any
    /// error raised by the method itself.
    pub fn eval_method_call(&mut self,
                            target: &Expr,
                            name: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let target = self.eval(target)?;

        if let Value::Module(_) = target {
            let member = Self::eval_attribute(&target, name, line)?;
            let args = self.eval_elements(arguments)?;
            return self.call_value(&member, &args, line);
        }

        let args = self.eval_elements(arguments)?;
        match &target {
            Value::Str(s) => string::call(s, name, &args, line),
            Value::List(items) | Value::Tuple(items) => {
                collection::call_sequence(&target, items, name, &args, line)
            },
            Value::Map(map) => collection::call_mapping(map, name, &args, line),
            other => Err(unknown_attribute(other, name, line)),
        }
    }

    /// Evaluates `target.name` outside of a call.
    ///
    /// Only modules expose attributes as values, such as `math.pi` or
    /// `os.getcwd`.
    ///
    /// # Errors
    /// `UnknownAttribute` if the module has no such member, or the receiver
    /// is not a module.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::{
    ///     evaluator::core::Context,
    ///     module::{Resolver, StandardLibrary},
    ///     value::core::Value,
    /// };
    ///
    /// let math = StandardLibrary.resolve("math").unwrap();
    /// let pi = Context::eval_attribute(&Value::Module(math), "pi", 1).unwrap();
    ///
    /// assert_eq!(pi, Value::Real(std::f64::consts::PI));
    /// assert!(Context::eval_attribute(&Value::Integer(1), "real", 1).is_err());
    /// ```
    pub fn eval_attribute(target: &Value, name: &str, line: usize) -> EvalResult<Value> {
        match target {
            Value::Module(module) => {
                (module.member)(name).ok_or_else(|| unknown_attribute(target, name, line))
            },
            other => Err(unknown_attribute(other, name, line)),
        }
    }
}

/// Builds the error for a missing attribute or method.
pub(super) fn unknown_attribute(target: &Value, name: &str, line: usize) -> RuntimeError {
    RuntimeError::UnknownAttribute { type_name: target.type_name(),
                                     name: name.to_string(),
                                     line }
}

/// Checks the argument count of a method against `arity`.
pub(super) fn check_method_arity(name: &str,
                                 args: &[Value],
                                 arity: Arity,
                                 line: usize)
                                 -> EvalResult<()> {
    if arity.check(args.len()) {
        Ok(())
    } else {
        Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                  found: args.len(),
                                                  line })
    }
}
