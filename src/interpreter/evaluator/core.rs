use std::{collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{module::Resolver, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A set of name bindings: the locals of one evaluation or the globals of
/// one stream.
pub type Namespace = HashMap<String, Value>;

/// Deepest allowed nesting of user-defined function calls.
pub const MAX_CALL_DEPTH: usize = 200;

/// Stores the runtime evaluation context.
///
/// The context borrows the two namespaces an evaluation runs against and
/// owns the frames of active function calls and comprehensions.
///
/// ## Name resolution
///
/// A name is looked up in the frames from innermost outward, then in the
/// locals, then in the globals and finally among the builtin functions.
/// Assignments write to the innermost frame, or to the locals when no frame
/// is active. `import` writes to the globals.
pub struct Context<'a> {
    /// Per-evaluation bindings such as `line`, `row` or `cols`.
    pub locals:   &'a mut Namespace,
    /// Per-stream bindings; imported modules accumulate here.
    pub globals:  &'a mut Namespace,
    /// Frames of active function calls and comprehensions, innermost last.
    pub frames:   Vec<Namespace>,
    /// Supplies modules for `import`.
    pub resolver: &'a dyn Resolver,
    /// Current user-function call depth.
    pub depth:    usize,
}

impl<'a> Context<'a> {
    /// Creates a context over the given namespaces with no active frames.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::{
    ///     evaluator::core::{Context, Namespace},
    ///     module::StandardLibrary,
    /// };
    ///
    /// let mut locals = Namespace::new();
    /// let mut globals = Namespace::new();
    /// let context = Context::new(&mut locals, &mut globals, &StandardLibrary);
    ///
    /// assert!(context.frames.is_empty());
    /// ```
    pub fn new(locals: &'a mut Namespace,
               globals: &'a mut Namespace,
               resolver: &'a dyn Resolver)
               -> Self {
        Self { locals,
               globals,
               frames: Vec::new(),
               resolver,
               depth: 0 }
    }
}

impl Context<'_> {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant:
    /// literals, variables, operators, calls, attribute access, conditionals,
    /// loops, comprehensions, blocks, container displays and subscripts.
    ///
    /// Constructs without a meaningful result, such as an empty block or a
    /// loop that never runs, evaluate to `Value::None`.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => self.eval_binary_op(left, *op, right, *line),
            Expr::Logical { left,
                            op,
                            right,
                            .. } => self.eval_logical(left, *op, right),
            Expr::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
            Expr::MethodCall { target,
                               name,
                               arguments,
                               line, } => self.eval_method_call(target, name, arguments, *line),
            Expr::Attribute { target, name, line } => {
                let target = self.eval(target)?;
                Self::eval_attribute(&target, name, *line)
            },
            Expr::IfExpr { condition,
                           then_branch,
                           else_branch,
                           .. } => self.eval_if_expr(condition, then_branch, else_branch.as_deref()),
            Expr::ForExpr { context, line } => self.eval_for(context, *line),
            Expr::Comprehension { context, line } => self.eval_comprehension(context, *line),
            Expr::Block { statements, .. } => self.eval_block(statements),
            Expr::ListLiteral { elements, .. } => Ok(Value::from(self.eval_elements(elements)?)),
            Expr::TupleLiteral { elements, .. } => {
                Ok(Value::tuple(self.eval_elements(elements)?))
            },
            Expr::MapLiteral { entries, line } => self.eval_map_literal(entries, *line),
            Expr::Index { target, index, line } => {
                let target = self.eval(target)?;
                let index = self.eval(index)?;
                Self::eval_index(&target, &index, *line)
            },
            Expr::Slice { target,
                          start,
                          stop,
                          step,
                          line, } => self.eval_slice(target,
                                                     start.as_deref(),
                                                     stop.as_deref(),
                                                     step.as_deref(),
                                                     *line),
        }
    }

    /// Evaluates a single statement.
    ///
    /// Handles imports, assignments, function definitions, compound
    /// assignments and plain expression statements. Statements other than
    /// expressions evaluate to `Value::None`.
    ///
    /// # Parameters
    /// - `statement`: Statement to evaluate.
    ///
    /// # Returns
    /// The value of an expression statement, `Value::None` otherwise.
    pub fn eval_statement(&mut self, statement: &Statement) -> EvalResult<Value> {
        match statement {
            Statement::Function(def) => {
                self.assign(&def.name, Value::Function(Rc::new(def.clone())));
                Ok(Value::None)
            },
            Statement::Assignment { name, value, .. } => {
                let value = self.eval(value)?;
                self.assign(name, value);
                Ok(Value::None)
            },
            Statement::CompoundAssignment { name,
                                            op,
                                            value,
                                            line, } => {
                let old_value = self.get_variable(name, *line)?;
                let rhs_value = self.eval(value)?;
                let result = Self::eval_binary(*op, &old_value, &rhs_value, *line)?;

                self.assign(name, result);
                Ok(Value::None)
            },
            Statement::Import { names, line } => {
                for name in names {
                    self.import(name, *line)?;
                }
                Ok(Value::None)
            },
            Statement::Expression { expr, .. } => self.eval(expr),
        }
    }

    /// Executes statements in order for their side effects.
    ///
    /// # Returns
    /// The value of the last statement, or `Value::None` for an empty
    /// program.
    pub fn eval_toplevel(&mut self, statements: &[Statement]) -> EvalResult<Value> {
        let mut last = Value::None;
        for statement in statements {
            last = self.eval_statement(statement)?;
        }
        Ok(last)
    }

    /// Binds the module `name` into the globals.
    ///
    /// # Errors
    /// `ModuleNotFound` if the resolver does not know the module.
    pub fn import(&mut self, name: &str, line: usize) -> EvalResult<()> {
        let module = self.resolver
                         .resolve(name)
                         .ok_or_else(|| RuntimeError::ModuleNotFound { name: name.to_string(),
                                                                       line })?;
        debug!(module = name, "importing module");
        self.globals.insert(name.to_string(), Value::Module(module));
        Ok(())
    }
}
