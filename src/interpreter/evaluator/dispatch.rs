use std::{collections::HashSet, fs, path::Path};

use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    error::{PufError, RuntimeError},
    interpreter::{
        evaluator::core::{Context, Namespace},
        module::Resolver,
        parser::core::{parse_command, parse_program},
        value::core::Value,
    },
};

/// A parsed command or script, ready to be evaluated any number of times.
#[derive(Debug, Clone, PartialEq)]
pub enum Program {
    /// A single expression whose value is rendered.
    Command(Expr),
    /// Statements executed for their side effects.
    Script(Vec<Statement>),
}

impl Program {
    /// Parses the script at `script` if given, otherwise the `command`.
    ///
    /// # Errors
    /// - `PufError::Usage` if neither is given.
    /// - `PufError::Read` if the script cannot be read.
    /// - `PufError::Parse` if the source does not parse.
    ///
    /// # Example
    /// ```
    /// use puf::{error::PufError, interpreter::evaluator::dispatch::Program};
    ///
    /// assert!(matches!(Program::load(Some("sum(row)"), None), Ok(Program::Command(_))));
    /// assert!(matches!(Program::load(None, None), Err(PufError::Usage)));
    /// ```
    pub fn load(command: Option<&str>, script: Option<&Path>) -> Result<Self, PufError> {
        match (script, command) {
            (Some(path), _) => {
                let source = fs::read_to_string(path).map_err(|source| PufError::Read { path: path.to_path_buf(),
                                                                                        source })?;
                Ok(Self::Script(parse_program(&source)?))
            },
            (None, Some(command)) => Ok(Self::Command(parse_command(command)?)),
            (None, None) => Err(PufError::Usage),
        }
    }

    /// Evaluates the program against one pair of namespaces.
    ///
    /// A command is evaluated with auto-import retries, see
    /// [`evaluate_expression`]. A script runs once without retries and
    /// yields `Value::None`.
    ///
    /// # Errors
    /// The first runtime error that is not recovered.
    pub fn run(&self,
               globals: &mut Namespace,
               locals: &mut Namespace,
               resolver: &dyn Resolver)
               -> Result<Value, PufError> {
        match self {
            Self::Command(expr) => Ok(evaluate_expression(expr, globals, locals, resolver)?),
            Self::Script(statements) => {
                Context::new(locals, globals, resolver).eval_toplevel(statements)?;
                Ok(Value::None)
            },
        }
    }
}

/// Evaluates an expression, importing modules for unknown names.
///
/// When evaluation fails with `UnknownVariable` and the resolver knows a
/// module of that name which is not yet bound in `globals`, the module is
/// bound into `globals` and the whole expression is evaluated again. Each
/// distinct name gets one import attempt. Every other error is returned as
/// is.
///
/// # Errors
/// The first runtime error that cannot be recovered by an import.
///
/// # Example
/// ```
/// use puf::interpreter::{
///     evaluator::{core::Namespace, dispatch::evaluate_expression},
///     module::StandardLibrary,
///     parser::core::parse_command,
///     value::core::Value,
/// };
///
/// let expr = parse_command("math.floor(2.7)").unwrap();
/// let mut globals = Namespace::new();
/// let mut locals = Namespace::new();
///
/// let value = evaluate_expression(&expr, &mut globals, &mut locals, &StandardLibrary).unwrap();
///
/// assert_eq!(value, Value::Integer(2));
/// assert!(globals.contains_key("math"));
/// ```
pub fn evaluate_expression(expr: &Expr,
                           globals: &mut Namespace,
                           locals: &mut Namespace,
                           resolver: &dyn Resolver)
                           -> Result<Value, RuntimeError> {
    let mut attempted = HashSet::new();

    loop {
        let (name, line) = match Context::new(&mut *locals, &mut *globals, resolver).eval(expr) {
            Err(RuntimeError::UnknownVariable { name, line }) => (name, line),
            other => return other,
        };

        let module = resolver.resolve(&name)
                             .filter(|_| !globals.contains_key(&name) && !attempted.contains(&name));
        let Some(module) = module else {
            return Err(RuntimeError::UnknownVariable { name, line });
        };

        debug!(module = %name, line, "auto-importing module for unknown name");
        globals.insert(name.clone(), Value::Module(module));
        attempted.insert(name);
    }
}

/// Parses and evaluates a command.
///
/// Names resolve through `locals`, then `globals`, then the builtin
/// functions; unknown names that match a module of `resolver` are imported
/// into `globals` and the evaluation is retried.
///
/// # Errors
/// - `PufError::Parse` if the command does not parse. Nothing is evaluated.
/// - `PufError::Runtime` for any error not recovered by an import.
///
/// # Example
/// ```
/// use puf::interpreter::{
///     evaluator::{core::Namespace, dispatch::safe_evaluate},
///     module::StandardLibrary,
/// };
///
/// let mut globals = Namespace::new();
/// let mut locals = Namespace::new();
///
/// assert!(safe_evaluate("os.getcwd()", &mut globals, &mut locals, &StandardLibrary).is_ok());
/// assert!(safe_evaluate("bogusmodule123.x", &mut globals, &mut locals, &StandardLibrary).is_err());
/// ```
pub fn safe_evaluate(command: &str,
                     globals: &mut Namespace,
                     locals: &mut Namespace,
                     resolver: &dyn Resolver)
                     -> Result<Value, PufError> {
    Program::load(Some(command), None)?.run(globals, locals, resolver)
}

/// Reads, parses and executes a script for its side effects.
///
/// Assignments bind into `locals`, `import` statements into `globals`.
/// There is no auto-import: the script must import what it uses.
///
/// # Errors
/// Read, parse or runtime failures.
pub fn execute_script(path: &Path,
                      globals: &mut Namespace,
                      locals: &mut Namespace,
                      resolver: &dyn Resolver)
                      -> Result<(), PufError> {
    Program::load(None, Some(path))?.run(globals, locals, resolver)?;
    Ok(())
}

/// Evaluates exactly one of a command or a script against the namespaces.
///
/// # Returns
/// The command's value, or `Value::None` for a script.
///
/// # Errors
/// `PufError::Usage` if neither is given, otherwise as
/// [`safe_evaluate`] and [`execute_script`].
pub fn evaluate(locals: &mut Namespace,
                globals: &mut Namespace,
                command: Option<&str>,
                script: Option<&Path>,
                resolver: &dyn Resolver)
                -> Result<Value, PufError> {
    Program::load(command, script)?.run(globals, locals, resolver)
}
