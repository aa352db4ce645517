/// A constant written directly in source: number, boolean, string or
/// `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal value: `True` or `False`.
    Bool(bool),
    /// A string literal with its escapes already resolved.
    Str(String),
    /// The `None` literal.
    None,
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An expression node.
///
/// Every variant carries the line it starts on; runtime errors raised while
/// evaluating the node report that line.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean or `None`).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (e.g. negation).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        line: usize,
    },
    /// A binary operation (addition, comparison, membership, etc.).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        line:  usize,
    },
    /// A short-circuiting `and` / `or` that yields one of its operands.
    Logical {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand, evaluated only when needed.
        right: Box<Self>,
        line:  usize,
    },
    /// Call expression (e.g. `len(row)` or `f(x)(y)`).
    Call {
        /// The expression producing the callee.
        callee:    Box<Self>,
        /// Arguments to the call.
        arguments: Vec<Self>,
        line:      usize,
    },
    /// Method call on a value (e.g. `line.split(",")`).
    MethodCall {
        /// The receiver.
        target:    Box<Self>,
        /// Name of the method.
        name:      String,
        /// Arguments to the method.
        arguments: Vec<Self>,
        line:      usize,
    },
    /// Attribute access (e.g. `math.pi`).
    Attribute {
        /// The expression whose attribute is read.
        target: Box<Self>,
        /// Name of the attribute.
        name:   String,
        line:   usize,
    },
    /// Conditional expression, either `a if c else b` or
    /// `if c do { ... } else do { ... }`.
    IfExpr {
        /// The condition expression.
        condition:   Box<Self>,
        /// Expression evaluated if the condition is true.
        then_branch: Box<Self>,
        /// Expression evaluated if the condition is false.
        else_branch: Option<Box<Self>>,
        line:        usize,
    },
    /// For-expression iterating over a sequence.
    ForExpr {
        /// Context for the for-expression (variable, iterable, body).
        context: ForExprContext,
        line:    usize,
    },
    /// List comprehension `[element for var in iterable if condition]`.
    Comprehension {
        /// Context for the comprehension.
        context: ComprehensionContext,
        line:    usize,
    },
    /// A block containing multiple statements.
    Block {
        /// Statements inside the block.
        statements: Vec<Statement>,
        line:       usize,
    },
    /// List literal expression.
    ListLiteral {
        /// Elements of the list.
        elements: Vec<Self>,
        line:     usize,
    },
    /// Tuple literal expression.
    TupleLiteral {
        /// Elements of the tuple.
        elements: Vec<Self>,
        line:     usize,
    },
    /// Mapping literal expression.
    MapLiteral {
        /// Key and value expressions in source order.
        entries: Vec<(Self, Self)>,
        line:    usize,
    },
    /// Indexing expression (e.g. `row[2]` or `mapping["key"]`).
    Index {
        /// The container to index into.
        target: Box<Self>,
        /// The index to access.
        index:  Box<Self>,
        line:   usize,
    },
    /// Slice expression `target[start:stop:step]`.
    Slice {
        /// The sequence to slice.
        target: Box<Self>,
        /// Optional start bound.
        start:  Option<Box<Self>>,
        /// Optional stop bound.
        stop:   Option<Box<Self>>,
        /// Optional step.
        step:   Option<Box<Self>>,
        line:   usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use puf::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "row".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::Logical { line, .. }
            | Self::Call { line, .. }
            | Self::MethodCall { line, .. }
            | Self::Attribute { line, .. }
            | Self::IfExpr { line, .. }
            | Self::ForExpr { line, .. }
            | Self::Comprehension { line, .. }
            | Self::Block { line, .. }
            | Self::ListLiteral { line, .. }
            | Self::TupleLiteral { line, .. }
            | Self::MapLiteral { line, .. }
            | Self::Index { line, .. }
            | Self::Slice { line, .. } => *line,
        }
    }
}

/// Represents a user-defined function definition.
///
/// A function binds its parameter names to an expression body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names (e.g. `x`).
    pub params: Vec<String>,
    /// The body expression evaluated when the function is called.
    pub body:   Expr,
    /// Line of the function name.
    pub line:   usize,
}

/// Represents a statement.
///
/// Statements are the units of a program; a command is a single expression
/// statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A user-defined function declaration.
    Function(FunctionDef),
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        line: usize,
    },
    /// A variable assignment binding a name to an expression.
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        line:  usize,
    },
    /// A compound assignment consisting of a variable and an operation.
    CompoundAssignment {
        /// The name of the variable.
        name:  String,
        /// The binary operation (e.g., `+=`, `-=`, etc.).
        op:    BinaryOperator,
        /// The value to be combined with the current variable value.
        value: Expr,
        line:  usize,
    },
    /// `import os, math` binds capability modules into the globals.
    Import {
        /// Module names in source order.
        names: Vec<String>,
        line:  usize,
    },
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons, membership and identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// True division (`/`)
    Div,
    /// Floor division (`//`)
    FloorDiv,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Membership (`in`)
    In,
    /// Negated membership (`not in`)
    NotIn,
    /// Identity (`is`)
    Is,
    /// Negated identity (`is not`)
    IsNot,
}

/// Short-circuiting boolean operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Unary plus (e.g. `+x`); numbers only.
    Plus,
    /// Logical NOT (e.g. `not x`).
    Not,
}

/// Context for a for-expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ForExprContext {
    /// The loop variable name.
    pub var:      String,
    /// The sequence iterated over.
    pub iterable: Box<Expr>,
    /// The body of the loop to be evaluated for each iteration.
    pub body:     Box<Expr>,
}

/// Context for a list comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct ComprehensionContext {
    /// The element expression collected per iteration.
    pub element:   Box<Expr>,
    /// The loop variable name.
    pub var:       String,
    /// The sequence iterated over.
    pub iterable:  Box<Expr>,
    /// Optional filter; elements are kept only when it is truthy.
    pub condition: Option<Box<Expr>>,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, Div, Equal, FloorDiv, Greater, GreaterEqual, In, Is, IsNot, Less, LessEqual, Mod,
            Mul, NotEqual, NotIn, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            FloorDiv => "//",
            Mod => "%",
            Pow => "**",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            In => "in",
            NotIn => "not in",
            Is => "is",
            IsNot => "is not",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "not",
        };
        write!(f, "{operator}")
    }
}
