use crate::{
    ast::{ComprehensionContext, ForExprContext},
    interpreter::{
        evaluator::core::{Context, EvalResult, Namespace},
        value::core::Value,
    },
};

impl Context<'_> {
    /// Evaluates a `for` expression.
    ///
    /// The iterable is evaluated once. Each of its items is bound to the loop
    /// variable in the current namespace, where it stays visible after the
    /// loop, and the body is evaluated.
    ///
    /// The last evaluated body value is returned. If the loop executes zero
    /// times, the result is `None`.
    ///
    /// # Parameters
    /// - `context`: Loop header and body.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The last value of the loop body, or `Value::None` if the loop did not
    /// run.
    ///
    /// # Example
    /// ```
    /// use puf::{
    ///     ast::{Expr, ForExprContext},
    ///     interpreter::{
    ///         evaluator::core::{Context, Namespace},
    ///         module::StandardLibrary,
    ///         value::core::Value,
    ///     },
    /// };
    ///
    /// let mut locals = Namespace::from([("row".to_string(),
    ///                                    Value::from(vec![Value::Integer(1), Value::Integer(3)]))]);
    /// let mut globals = Namespace::new();
    /// let mut context = Context::new(&mut locals, &mut globals, &StandardLibrary);
    ///
    /// // for x in row do { x }
    /// let header = ForExprContext { var:      "x".into(),
    ///                               iterable: Box::new(Expr::Variable { name: "row".into(),
    ///                                                                   line: 1, }),
    ///                               body:     Box::new(Expr::Variable { name: "x".into(),
    ///                                                                   line: 1, }), };
    ///
    /// assert_eq!(context.eval_for(&header, 1).unwrap(), Value::Integer(3));
    /// ```
    pub fn eval_for(&mut self, context: &ForExprContext, line: usize) -> EvalResult<Value> {
        let items = self.eval(&context.iterable)?.to_items(line)?;

        let mut last_value = Value::None;
        for item in items {
            self.assign(&context.var, item);
            last_value = self.eval(&context.body)?;
        }

        Ok(last_value)
    }

    /// Evaluates a list comprehension `[element for var in iterable if
    /// condition]`.
    ///
    /// The loop variable lives in a private frame that is discarded afterwards,
    /// also when evaluation fails, so it never leaks into the enclosing
    /// namespace.
    ///
    /// # Returns
    /// A list with one element per item that passed the filter.
    pub fn eval_comprehension(&mut self,
                              context: &ComprehensionContext,
                              line: usize)
                              -> EvalResult<Value> {
        let items = self.eval(&context.iterable)?.to_items(line)?;

        self.frames.push(Namespace::new());
        let result = self.collect_comprehension(context, items);
        self.frames.pop();

        result.map(Value::from)
    }

    fn collect_comprehension(&mut self,
                             context: &ComprehensionContext,
                             items: Vec<Value>)
                             -> EvalResult<Vec<Value>> {
        let mut collected = Vec::new();

        for item in items {
            self.assign(&context.var, item);

            if let Some(condition) = &context.condition
               && !self.eval(condition)?.is_truthy()
            {
                continue;
            }

            collected.push(self.eval(&context.element)?);
        }

        Ok(collected)
    }
}
