use thiserror::Error;

/// Represents all errors that can occur during evaluation and runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Tried to use a name that is bound in no namespace.
    ///
    /// This is the one failure the evaluator may recover from by importing a
    /// module of the same name.
    #[error("Error on line {line}: Unknown variable '{name}'.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Accessed an attribute or method that the value does not have.
    #[error("Error on line {line}: '{type_name}' object has no attribute '{name}'.")]
    UnknownAttribute {
        /// Type name of the receiver.
        type_name: &'static str,
        /// The attribute requested.
        name:      String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// An `import` named a module that is not registered.
    #[error("Error on line {line}: No module named '{name}'.")]
    ModuleNotFound {
        /// The name of the module.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to call a value that is not a function.
    #[error("Error on line {line}: '{type_name}' object is not callable.")]
    NotCallable {
        /// Type name of the called value.
        type_name: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: Type error: {details}.")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A numeric value was expected, but not found.
    #[error("Error on line {line}: Expected number.")]
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer value was expected, but not found.
    #[error("Error on line {line}: Expected integer.")]
    ExpectedInteger {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An argument had the right type but an unusable value.
    #[error("Error on line {line}: Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Error on line {line}: Argument count mismatch: '{name}' does not take {found} argument(s).")]
    ArgumentCountMismatch {
        /// The called function.
        name:  String,
        /// The number of arguments supplied.
        found: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Arithmetic operation overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access a sequence element outside the allowed bounds.
    #[error("Error on line {line}: Index out of bounds. Length is {len}, but found index {found}.")]
    IndexOutOfBounds {
        /// Length of the indexed sequence.
        len:   usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A mapping was indexed with a key it does not contain.
    #[error("Error on line {line}: Key not found: {key}.")]
    KeyNotFound {
        /// The missing key, in its `repr` form.
        key:  String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer was too large to be represented exactly as a real.
    #[error("Error on line {line}: Literal is too large.")]
    LiteralTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to use a fractional real where an integer was required.
    #[error("Error on line {line}: Value is fractional and cannot be safely converted to an integer.")]
    RealIsFractional {
        /// The source line where the error occurred.
        line: usize,
    },
    /// User-defined functions nested deeper than the call limit.
    #[error("Error on line {line}: Maximum call depth of {depth} exceeded.")]
    RecursionLimit {
        /// The call depth limit.
        depth: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An operating system call made by a builtin failed.
    #[error("Error on line {line}: OS error: {details}.")]
    OsError {
        /// The error reported by the operating system.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}
