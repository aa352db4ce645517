use std::{cell::RefCell, collections::HashMap};

use regex::{Captures, Regex};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::core::{Arity, builtin_functions},
        },
        module::{Module, lookup_function},
        value::core::Value,
    },
};

pub static MODULE: Module = Module { name: "re",
                                     member };

builtin_functions! {
    RE_TABLE, RE_FUNCTIONS;
    "search"    => { arity: Arity::Exact(2), func: |args, line| find_anchored(Anchor::Anywhere, args, line) },
    "match"     => { arity: Arity::Exact(2), func: |args, line| find_anchored(Anchor::Start, args, line) },
    "fullmatch" => { arity: Arity::Exact(2), func: |args, line| find_anchored(Anchor::Full, args, line) },
    "findall"   => { arity: Arity::Exact(2), func: findall },
    "sub"       => { arity: Arity::OneOf(&[3, 4]), func: sub },
    "split"     => { arity: Arity::OneOf(&[2, 3]), func: split },
    "escape"    => { arity: Arity::Exact(1), func: escape },
}

fn member(name: &str) -> Option<Value> {
    lookup_function(RE_TABLE, name)
}

/// Number of compiled patterns kept before the cache is emptied.
const CACHE_LIMIT: usize = 512;

thread_local! {
    /// Compiled patterns, keyed by their anchored source text.
    static CACHE: RefCell<HashMap<String, Regex>> = RefCell::new(HashMap::new());
}

/// Where a pattern has to match.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Anywhere,
    Start,
    Full,
}

/// Compiles `pattern`, reusing an earlier compilation of the same text.
fn compile(pattern: &str, anchor: Anchor, line: usize) -> EvalResult<Regex> {
    let source = match anchor {
        Anchor::Anywhere => pattern.to_string(),
        Anchor::Start => format!(r"\A(?:{pattern})"),
        Anchor::Full => format!(r"\A(?:{pattern})\z"),
    };

    if let Some(regex) = CACHE.with(|cache| cache.borrow().get(&source).cloned()) {
        return Ok(regex);
    }

    let regex = Regex::new(&source).map_err(|e| RuntimeError::InvalidArgument { details: format!("bad pattern: {e}"),
                                                                                line })?;
    CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.len() >= CACHE_LIMIT {
            cache.clear();
        }
        cache.insert(source, regex.clone());
    });
    Ok(regex)
}

/// The value a match produces: the whole match without groups, the single
/// group with one group, a tuple of groups otherwise. Unmatched groups are
/// `None`.
fn match_value(captures: &Captures<'_>) -> Value {
    let group = |i: usize| -> Value { captures.get(i).map(|m| m.as_str()).into() };

    match captures.len() {
        1 => group(0),
        2 => group(1),
        n => Value::tuple((1..n).map(group).collect()),
    }
}

/// Implements `search`, `match` and `fullmatch`.
///
/// # Example
/// ```
/// use puf::interpreter::{module::{Resolver, StandardLibrary}, value::core::Value};
///
/// let re = StandardLibrary.resolve("re").unwrap();
/// let Some(Value::Builtin(search)) = (re.member)("search") else { panic!() };
///
/// let found = search.call(&[Value::from(r"\d+"), Value::from("id 42 x")], 1).unwrap();
/// assert_eq!(found, Value::from("42"));
///
/// let groups = search.call(&[Value::from(r"(\w)=(\d)"), Value::from("a=1")], 1).unwrap();
/// assert_eq!(groups.to_string(), "('a', '1')");
/// ```
fn find_anchored(anchor: Anchor, args: &[Value], line: usize) -> EvalResult<Value> {
    let regex = compile(args[0].as_str(line)?, anchor, line)?;
    let text = args[1].as_str(line)?;

    Ok(regex.captures(text).map_or(Value::None, |captures| match_value(&captures)))
}

/// Returns every non-overlapping match, shaped like [`match_value`].
fn findall(args: &[Value], line: usize) -> EvalResult<Value> {
    let regex = compile(args[0].as_str(line)?, Anchor::Anywhere, line)?;
    let text = args[1].as_str(line)?;

    Ok(Value::from(regex.captures_iter(text)
                        .map(|captures| match_value(&captures))
                        .collect::<Vec<_>>()))
}

/// Replaces matches of the pattern. The replacement refers to groups as
/// `\1`; a count limits the number of replacements.
///
/// # Example
/// ```
/// use puf::interpreter::{module::{Resolver, StandardLibrary}, value::core::Value};
///
/// let re = StandardLibrary.resolve("re").unwrap();
/// let Some(Value::Builtin(sub)) = (re.member)("sub") else { panic!() };
///
/// let args = [Value::from(r"(\w+)@(\w+)"), Value::from(r"\2 at \1 ($)"), Value::from("me@host")];
/// assert_eq!(sub.call(&args, 1).unwrap(), Value::from("host at me ($)"));
/// ```
fn sub(args: &[Value], line: usize) -> EvalResult<Value> {
    let regex = compile(args[0].as_str(line)?, Anchor::Anywhere, line)?;
    let replacement = group_references(args[1].as_str(line)?);
    let text = args[2].as_str(line)?;

    let count = match args.get(3) {
        Some(count) => usize::try_from(count.as_integer(line)?.max(0)).map_err(|_| RuntimeError::Overflow { line })?,
        None => 0,
    };

    Ok(regex.replacen(text, count, replacement.as_str()).into_owned().into())
}

/// Rewrites `\N` group references into the `${N}` syntax of the regex crate
/// and escapes literal dollar signs.
fn group_references(replacement: &str) -> String {
    let mut rewritten = String::with_capacity(replacement.len());
    let mut chars = replacement.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' => rewritten.push_str("$$"),
            '\\' if chars.peek().is_some_and(char::is_ascii_digit) => {
                rewritten.push_str("${");
                while let Some(digit) = chars.next_if(char::is_ascii_digit) {
                    rewritten.push(digit);
                }
                rewritten.push('}');
            },
            c => rewritten.push(c),
        }
    }

    rewritten
}

/// Splits the text around matches, at most `maxsplit` times when given and
/// positive.
fn split(args: &[Value], line: usize) -> EvalResult<Value> {
    let regex = compile(args[0].as_str(line)?, Anchor::Anywhere, line)?;
    let text = args[1].as_str(line)?;
    let maxsplit = args.get(2).map_or(Ok(0), |m| m.as_integer(line))?;

    let parts: Vec<Value> = match usize::try_from(maxsplit) {
        Ok(limit) if limit > 0 => regex.splitn(text, limit + 1).map(Value::from).collect(),
        _ => regex.split(text).map(Value::from).collect(),
    };

    Ok(Value::from(parts))
}

/// Escapes all regex metacharacters in the text.
fn escape(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(regex::escape(args[0].as_str(line)?).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_cache_stays_bounded() {
        for i in 0..CACHE_LIMIT * 3 {
            let found = find_anchored(Anchor::Anywhere, &[Value::from(format!("x{i}y")), Value::from("x7y")], 1).unwrap();
            assert_eq!(found != Value::None, i == 7);
        }

        let cached = CACHE.with(|cache| cache.borrow().len());
        assert!(cached <= CACHE_LIMIT, "{cached} patterns cached");
    }
}
