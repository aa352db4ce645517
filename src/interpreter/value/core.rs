use std::{fmt, rc::Rc};

use crate::{
    ast::{FunctionDef, LiteralValue},
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::BuiltinDef},
        module::Module,
        value::mapping::Mapping,
    },
    util::num::{format_real, i64_to_f64},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns and record fields. Containers share their
/// storage through `Rc`, so cloning a value is cheap.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value. Renders as nothing at all.
    None,
    /// A boolean value (`True` or `False`).
    Bool(bool),
    /// An integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// Immutable text.
    Str(Rc<str>),
    /// An ordered sequence of values.
    List(Rc<Vec<Self>>),
    /// A fixed ordered sequence of values, written `(a, b)`.
    Tuple(Rc<Vec<Self>>),
    /// A string-keyed, insertion-ordered mapping.
    Map(Rc<Mapping>),
    /// A user-defined function.
    Function(Rc<FunctionDef>),
    /// A native function, either always visible or a module member.
    Builtin(&'static BuiltinDef),
    /// A capability module such as `os` or `math`.
    Module(&'static Module),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Self::Map(Rc::new(v))
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}

impl Value {
    /// Builds a tuple from its elements.
    #[must_use]
    pub fn tuple(elements: Vec<Self>) -> Self {
        Self::Tuple(Rc::new(elements))
    }

    /// Returns the type name used in error messages.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(1).type_name(), "int");
    /// assert_eq!(Value::from("x").type_name(), "str");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "int",
            Self::Real(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "dict",
            Self::Function(_) => "function",
            Self::Builtin(_) => "builtin_function_or_method",
            Self::Module(_) => "module",
        }
    }

    /// Returns the truth value of `self`.
    ///
    /// `None`, `False`, zero, empty strings and empty containers are false;
    /// everything else is true.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::value::core::Value;
    ///
    /// assert!(!Value::Integer(0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from(vec![Value::None]).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::List(items) | Self::Tuple(items) => !items.is_empty(),
            Self::Map(map) => !map.is_empty(),
            Self::Function(_) | Self::Builtin(_) | Self::Module(_) => true,
        }
    }

    /// Converts the value to an `f64`, or returns an error if not numeric.
    ///
    /// Accepts `Value::Real`, `Value::Integer` and `Value::Bool`.
    /// Integers beyond `2^53` round to the nearest `f64`.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(f64)`: If value is numeric.
    /// - `Err(RuntimeError::ExpectedNumber)`: If not numeric.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::value::core::Value;
    ///
    /// let x = Value::Integer(10);
    /// let real = x.as_real(42).unwrap();
    ///
    /// assert_eq!(real, 10.0);
    /// ```
    pub fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            Self::Integer(n) => Ok(i64_to_f64(*n)),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to `i64`, or returns an error if not an integer.
    ///
    /// Booleans count as `0` and `1`.
    ///
    /// # Parameters
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(i64)`: The integer value.
    /// - `Err(RuntimeError::ExpectedInteger)`: If not an integer.
    pub fn as_integer(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Bool(b) => Ok(i64::from(*b)),
            _ => Err(RuntimeError::ExpectedInteger { line }),
        }
    }

    /// Borrows the text of a `Value::Str`.
    ///
    /// # Errors
    /// `TypeError` for any other variant.
    pub fn as_str(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(RuntimeError::TypeError { details: format!("expected str, found {}",
                                                                    other.type_name()),
                                                   line }),
        }
    }

    /// Returns `true` for integers, reals and booleans.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Real(_) | Self::Bool(_))
    }

    /// Collects the elements produced by iterating over the value.
    ///
    /// Lists and tuples yield their elements, strings their characters and
    /// mappings their keys.
    ///
    /// # Errors
    /// `TypeError` if the value is not iterable.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::value::core::Value;
    ///
    /// let chars = Value::from("ab").to_items(1).unwrap();
    /// assert_eq!(chars, vec![Value::from("a"), Value::from("b")]);
    /// assert!(Value::Integer(3).to_items(1).is_err());
    /// ```
    pub fn to_items(&self, line: usize) -> EvalResult<Vec<Self>> {
        match self {
            Self::List(items) | Self::Tuple(items) => Ok(items.to_vec()),
            Self::Str(s) => Ok(s.chars().map(|c| Self::from(c.to_string())).collect()),
            Self::Map(map) => Ok(map.keys().map(Self::from).collect()),
            other => Err(RuntimeError::TypeError { details: format!("'{}' object is not iterable",
                                                                    other.type_name()),
                                                   line }),
        }
    }

    /// Returns the `repr()` form of the value: like its display text, except
    /// that strings are quoted and escaped.
    ///
    /// # Example
    /// ```
    /// use puf::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("it's").repr(), "\"it's\"");
    /// assert_eq!(Value::from("a").repr(), "'a'");
    /// assert_eq!(Value::Real(2.0).repr(), "2.0");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        Repr(self).to_string()
    }
}

/// Formats a value the way it appears inside a container.
struct Repr<'a>(&'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Value::Str(s) = self.0 else {
            return write!(f, "{}", self.0);
        };

        let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
        write!(f, "{quote}")?;
        for c in s.chars() {
            match c {
                '\\' => write!(f, "\\\\")?,
                '\n' => write!(f, "\\n")?,
                '\r' => write!(f, "\\r")?,
                '\t' => write!(f, "\\t")?,
                c if c == quote => write!(f, "\\{c}")?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "{quote}")
    }
}

/// Writes `items` separated by `", "`, each in repr form.
fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (index, value) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", Repr(value))?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{}", format_real(*r)),
            Self::Str(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;
                write_items(f, items)?;
                write!(f, "]")
            },
            Self::Tuple(items) => {
                write!(f, "(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            },
            Self::Map(map) => {
                write!(f, "{{")?;
                for (index, (key, value)) in map.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", Repr(&Self::from(key)), Repr(value))?;
                }
                write!(f, "}}")
            },
            Self::Function(def) => write!(f, "<function {}>", def.name),
            Self::Builtin(def) => write!(f, "<built-in function {}>", def.name),
            Self::Module(module) => write!(f, "<module '{}'>", module.name),
        }
    }
}

impl PartialEq for Value {
    /// Structural equality with numeric promotion: `1 == 1.0 == True`.
    /// Lists never equal tuples. Functions and natives compare by identity,
    /// modules by name.
    fn eq(&self, other: &Self) -> bool {
        use Value::{Bool, Builtin, Function, Integer, List, Map, Module, None, Real, Str, Tuple};

        match (self, other) {
            (None, None) => true,
            (Integer(_) | Bool(_), Integer(_) | Bool(_)) => {
                self.as_integer(0).ok() == other.as_integer(0).ok()
            },
            (Real(a), Real(b)) => a == b,
            (Real(r), Integer(_) | Bool(_)) | (Integer(_) | Bool(_), Real(r)) => {
                let n = if let Real(_) = self { other } else { self };
                n.as_integer(0).is_ok_and(|n| integer_equals_real(n, *r))
            },
            (Str(a), Str(b)) => a == b,
            (List(a), List(b)) | (Tuple(a), Tuple(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Function(a), Function(b)) => Rc::ptr_eq(a, b),
            (Builtin(a), Builtin(b)) => std::ptr::eq(*a, *b),
            (Module(a), Module(b)) => a.name == b.name,
            _ => false,
        }
    }
}

/// Compares an integer with a real without rounding the integer.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
fn integer_equals_real(n: i64, r: f64) -> bool {
    r.fract() == 0.0 && r >= i64::MIN as f64 && r < i64::MAX as f64 && r as i64 == n
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Real(n) => (*n).into(),
            LiteralValue::Integer(i) => (*i).into(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => s.as_str().into(),
            LiteralValue::None => Self::None,
        }
    }
}
