use std::{fs, io::Write};

use puf::{
    error::{PufError, RuntimeError},
    interpreter::{
        evaluator::{
            core::Namespace,
            dispatch::{Program, evaluate, execute_script, safe_evaluate},
        },
        module::StandardLibrary,
        value::core::Value,
    },
};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

#[test]
fn script_fixtures_work() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "puf"))
    {
        let path = entry.path();
        let mut globals = Namespace::new();
        let mut locals = Namespace::new();

        count += 1;
        if let Err(e) = execute_script(path, &mut globals, &mut locals, &StandardLibrary) {
            panic!("Script {path:?} failed:\n{}\nError: {e}",
                   fs::read_to_string(path).unwrap_or_default());
        }
        assert!(locals.get("ok").is_some_and(Value::is_truthy),
                "Script {path:?} did not set ok to a true value");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn eval_in(src: &str, locals: &mut Namespace) -> Result<Value, PufError> {
    safe_evaluate(src, &mut Namespace::new(), locals, &StandardLibrary)
}

fn eval(src: &str) -> Value {
    eval_in(src, &mut Namespace::new()).unwrap_or_else(|e| panic!("Command {src:?} failed: {e}"))
}

fn assert_eval(src: &str, expected: &str) {
    assert_eq!(eval(src).to_string(), expected, "command: {src}");
}

fn assert_runtime_failure(src: &str) -> RuntimeError {
    match eval_in(src, &mut Namespace::new()) {
        Err(PufError::Runtime(e)) => e,
        Err(e) => panic!("Command {src:?} failed outside evaluation: {e}"),
        Ok(v) => panic!("Command {src:?} succeeded with {v} but was expected to fail"),
    }
}

#[test]
fn arithmetic_follows_integer_and_real_rules() {
    assert_eval("1 + 2 * 3", "7");
    assert_eval("7 / 2", "3.5");
    assert_eval("6 / 3", "2.0");
    assert_eval("7 // 2", "3");
    assert_eval("-7 // 2", "-4");
    assert_eval("-7 % 3", "2");
    assert_eval("7 % -3", "-2");
    assert_eval("2 ** 10", "1024");
    assert_eval("2 ** -1", "0.5");
    assert_eval("-2 ** 2", "-4");
    assert_eval("1 + 2.5", "3.5");
    assert_eval("True + 1", "2");
}

#[test]
fn arithmetic_errors_are_reported() {
    assert!(matches!(assert_runtime_failure("1 / 0"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(assert_runtime_failure("5 // 0"), RuntimeError::DivisionByZero { .. }));
    assert!(matches!(assert_runtime_failure("9223372036854775807 + 1"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(assert_runtime_failure("'a' - 1"), RuntimeError::TypeError { .. }));
}

#[test]
fn sequences_concatenate_and_repeat() {
    assert_eval("'ab' + 'cd'", "abcd");
    assert_eval("'ab' * 3", "ababab");
    assert_eval("[1, 2] + [3]", "[1, 2, 3]");
    assert_eval("(1,) * 2", "(1, 1)");
    assert_eval("[0] * 0", "[]");
}

#[test]
fn comparisons_chain_and_mix_numbers() {
    assert_eval("1 < 2 < 3", "True");
    assert_eval("1 < 3 < 2", "False");
    assert_eval("1 == 1.0", "True");
    assert_eval("'abc' < 'abd'", "True");
    assert_eval("[1, 2] < [1, 3]", "True");
    assert_eval("[1] == (1,)", "False");
    assert_eval("None is None", "True");
    assert_eval("1 is not None", "True");
}

#[test]
fn membership_tests_substrings_elements_and_keys() {
    assert_eval("'b' in 'abc'", "True");
    assert_eval("2 not in [1, 3]", "True");
    assert_eval("'k' in {'k': 1}", "True");
    assert_eval("3 in (1, 2)", "False");
}

#[test]
fn logic_short_circuits_and_returns_operands() {
    assert_eval("0 or 'x'", "x");
    assert_eval("1 and 0", "0");
    assert_eval("not []", "True");
    assert_eval("None or 0 or ''", "");
    assert_eval("0 and undefined_name", "0");
    assert_eval("'big' if 5 > 3 else 'small'", "big");
}

#[test]
fn indexing_and_slicing() {
    assert_eval("[1, 2, 3][-1]", "3");
    assert_eval("'hello'[1:4]", "ell");
    assert_eval("[0, 1, 2, 3, 4][::2]", "[0, 2, 4]");
    assert_eval("[0, 1, 2, 3][::-1]", "[3, 2, 1, 0]");
    assert_eval("(1, 2, 3)[1:]", "(2, 3)");
    assert_eval("{'a': 1, 'b': 2}['b']", "2");

    assert!(matches!(assert_runtime_failure("(1, 2)[5]"), RuntimeError::IndexOutOfBounds { .. }));
    assert!(matches!(assert_runtime_failure("{'a': 1}['z']"), RuntimeError::KeyNotFound { .. }));
}

#[test]
fn containers_render_like_python() {
    assert_eval("['a', 1, 2.0, None]", "['a', 1, 2.0, None]");
    assert_eval("(1,)", "(1,)");
    assert_eval("{'k': 'v'}", "{'k': 'v'}");
    assert_eval("1e16", "1e+16");
    assert_eval("1000.0", "1000.0");
}

#[test]
fn comprehensions_filter_and_map() {
    assert_eval("[x * x for x in range(5) if x % 2 == 0]", "[0, 4, 16]");
    assert_eval("[c.upper() for c in 'ab']", "['A', 'B']");
}

#[test]
fn comprehension_variable_does_not_leak() {
    let mut locals = Namespace::new();

    eval_in("[x for x in [1, 2]]", &mut locals).unwrap();

    assert!(!locals.contains_key("x"));
}

#[test]
fn blocks_define_functions_and_loop() {
    assert_eval("do { sq(x) = x * x; sq(4) }", "16");
    assert_eval("do { fact(n) = 1 if n <= 1 else n * fact(n - 1); fact(10) }", "3628800");
    assert_eval("do { total = 0; for v in [1, 2, 3] do { total += v }; total }", "6");
    assert_eval("if 1 > 2 do { 'yes' } else do { 'no' }", "no");
    assert_eval("if False do { 1 }", "None");
}

#[test]
fn builtin_functions() {
    assert_eval("len('héllo')", "5");
    assert_eval("sum([1, 2.5])", "3.5");
    assert_eval("min([3, 1, 2])", "1");
    assert_eval("max(1, 5, 3)", "5");
    assert_eval("sorted(['b', 'a', 'c'])", "['a', 'b', 'c']");
    assert_eval("list(reversed((1, 2)))", "[2, 1]");
    assert_eval("round(2.5)", "2");
    assert_eval("round(3.14159, 2)", "3.14");
    assert_eval("abs(-4)", "4");
    assert_eval("int(' 42 ')", "42");
    assert_eval("int(-2.7)", "-2");
    assert_eval("float('1e3')", "1000.0");
    assert_eval("str(1.0)", "1.0");
    assert_eval("repr('a')", "'a'");
    assert_eval("bool('')", "False");
    assert_eval("tuple([1])", "(1,)");
    assert_eval("dict([('a', 1)])", "{'a': 1}");
    assert_eval("list(enumerate('ab'))", "[(0, 'a'), (1, 'b')]");
    assert_eval("zip([1, 2, 3], 'ab')", "[(1, 'a'), (2, 'b')]");
    assert_eval("any([0, '', 3])", "True");
    assert_eval("all([1, []])", "False");
    assert_eval("range(3)", "[0, 1, 2]");

    assert!(matches!(assert_runtime_failure("len(1, 2)"),
                     RuntimeError::ArgumentCountMismatch { .. }));
    assert!(matches!(assert_runtime_failure("max([])"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn methods_on_strings_sequences_and_maps() {
    assert_eval("'a,b,,c'.split(',')", "['a', 'b', '', 'c']");
    assert_eval("'  a  b '.split()", "['a', 'b']");
    assert_eval("' x '.strip()", "x");
    assert_eval("'abc'.upper()", "ABC");
    assert_eval("'hello'.find('l')", "2");
    assert_eval("'aaa'.replace('a', 'b', 2)", "bba");
    assert_eval("'file.txt'.endswith(('.csv', '.txt'))", "True");
    assert_eval("'123'.isdigit()", "True");
    assert_eval("[1, 2, 3].index(2)", "1");
    assert_eval("(1, 1, 2).count(1)", "2");
    assert_eval("{'a': 1}.get('b', 0)", "0");
    assert_eval("{'a': 1, 'b': 2}.keys()", "['a', 'b']");

    assert!(matches!(assert_runtime_failure("'x'.nope()"), RuntimeError::UnknownAttribute { .. }));
}

#[test]
fn map_keys_must_be_strings() {
    assert!(matches!(assert_runtime_failure("{1: 2}"), RuntimeError::TypeError { .. }));
}

#[test]
fn locals_expose_row_data() {
    let mut locals = Namespace::from([("row".to_string(), Value::from(vec![Value::Integer(1), Value::Real(2.5)])),
                                      ("line".to_string(), Value::from("1 2.5"))]);

    assert_eq!(eval_in("sum(row)", &mut locals).unwrap(), Value::Real(3.5));
    assert_eq!(eval_in("line.split()[0]", &mut locals).unwrap(), Value::from("1"));
}

#[test]
fn unknown_module_names_are_imported_on_demand() {
    assert_eval("math.sqrt(16)", "4.0");
    assert_eval("math.floor(-2.5)", "-3");
    assert_eval("re.findall('[0-9]+', 'a1b22')", "['1', '22']");
    assert_eval("re.sub('(a)(b)', '\\\\2\\\\1', 'xab')", "xba");
    assert_eval("json.dumps({'a': [1, 2.5, None]})", "{\"a\": [1, 2.5, null]}");
    assert_eval("json.loads('{\"n\": 1}')['n']", "1");
    assert_eval("random.randint(3, 3)", "3");
    assert_eval("time.time() > 0", "True");
    assert_eval("os.getcwd() != ''", "True");
}

#[test]
fn auto_import_binds_into_globals() {
    let mut globals = Namespace::new();
    let mut locals = Namespace::new();

    safe_evaluate("os.getcwd()", &mut globals, &mut locals, &StandardLibrary).unwrap();

    assert!(matches!(globals.get("os"), Some(Value::Module(_))));
    assert!(locals.is_empty());
}

#[test]
fn every_missing_module_in_a_command_is_imported() {
    let mut globals = Namespace::new();
    let mut locals = Namespace::new();

    let result = safe_evaluate("math.floor(time.time()) > 0 and len(os.sep) == 1",
                               &mut globals,
                               &mut locals,
                               &StandardLibrary).unwrap();

    assert_eq!(result, Value::Bool(true));
    for name in ["math", "time", "os"] {
        assert!(matches!(globals.get(name), Some(Value::Module(_))), "{name} was not imported");
    }
}

#[test]
fn imports_made_before_an_unknown_name_are_kept() {
    let mut globals = Namespace::new();
    let mut locals = Namespace::new();

    let result = safe_evaluate("math.floor(1) + bogus", &mut globals, &mut locals, &StandardLibrary);

    assert!(matches!(result,
                     Err(PufError::Runtime(RuntimeError::UnknownVariable { ref name, .. })) if name == "bogus"));
    assert!(matches!(globals.get("math"), Some(Value::Module(_))));
    assert!(!globals.contains_key("bogus"));
}

#[test]
fn integers_beyond_double_precision_round_in_real_arithmetic() {
    let mut locals = Namespace::from([("row".to_string(), Value::from(vec![Value::Integer(1_700_000_000_123_456_789), Value::Real(2.5)]))]);

    #[allow(clippy::cast_precision_loss)]
    let nanos = 1_700_000_000_123_456_789_i64 as f64;

    assert_eq!(eval_in("row[0] / 1000000000", &mut locals).unwrap(), Value::Real(nanos / 1e9));
    assert_eq!(eval_in("float(row[0])", &mut locals).unwrap(), Value::Real(1.700_000_000_123_456_8e18));
    assert_eq!(eval_in("sum(row)", &mut locals).unwrap(), Value::Real(1.700_000_000_123_456_8e18));
    assert_eq!(eval("9007199254740993 + 0.5"), Value::Real(9_007_199_254_740_992.0));
    assert_eq!(eval("9007199254740993 + 1"), Value::Integer(9_007_199_254_740_994));
}

#[test]
fn real_powers_report_overflow() {
    assert!(matches!(assert_runtime_failure("1.5 ** 1e308"), RuntimeError::Overflow { .. }));
    assert!(matches!(assert_runtime_failure("10.0 ** 400"), RuntimeError::Overflow { .. }));
    assert_eval("2.0 ** -1", "0.5");
}

#[test]
fn missing_keys_are_quoted_once() {
    let error = assert_runtime_failure("{'a': 1}['b']");

    assert!(matches!(error, RuntimeError::KeyNotFound { .. }));
    assert_eq!(error.to_string(), "Error on line 1: Key not found: 'b'.");
}

#[test]
fn unresolvable_names_fail() {
    let mut globals = Namespace::new();
    let mut locals = Namespace::new();

    let result = safe_evaluate("bogusmodule123.x", &mut globals, &mut locals, &StandardLibrary);

    assert!(matches!(result,
                     Err(PufError::Runtime(RuntimeError::UnknownVariable { ref name, .. })) if name == "bogusmodule123"));
    assert!(globals.is_empty());
}

#[test]
fn unknown_module_members_are_not_retried() {
    assert!(matches!(assert_runtime_failure("math.nope"), RuntimeError::UnknownAttribute { .. }));
}

#[test]
fn commands_are_single_expressions() {
    assert!(matches!(eval_in("x = 1", &mut Namespace::new()), Err(PufError::Parse(_))));
    assert!(matches!(eval_in("1 +", &mut Namespace::new()), Err(PufError::Parse(_))));
    assert!(matches!(eval_in("", &mut Namespace::new()), Err(PufError::Parse(_))));
}

#[test]
fn evaluate_requires_command_or_script() {
    let mut globals = Namespace::new();
    let mut locals = Namespace::new();

    let result = evaluate(&mut locals, &mut globals, None, None, &StandardLibrary);
    assert!(matches!(result, Err(PufError::Usage)));

    let value = evaluate(&mut locals, &mut globals, Some("2 * 21"), None, &StandardLibrary).unwrap();
    assert_eq!(value, Value::Integer(42));
}

#[test]
fn scripts_bind_locals_and_imports() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "import math\nroot = math.sqrt(total)\ntotal += 1").unwrap();

    let mut globals = Namespace::new();
    let mut locals = Namespace::from([("total".to_string(), Value::Integer(9))]);

    let value = evaluate(&mut locals, &mut globals, None, Some(script.path()), &StandardLibrary).unwrap();

    assert_eq!(value, Value::None);
    assert_eq!(locals["root"], Value::Real(3.0));
    assert_eq!(locals["total"], Value::Integer(10));
    assert!(globals.contains_key("math"));
}

#[test]
fn scripts_do_not_auto_import() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "x = math.pi").unwrap();

    let result = execute_script(script.path(), &mut Namespace::new(), &mut Namespace::new(), &StandardLibrary);

    assert!(matches!(result, Err(PufError::Runtime(RuntimeError::UnknownVariable { .. }))));
}

#[test]
fn missing_scripts_report_their_path() {
    let result = Program::load(None, Some("does/not/exist.puf".as_ref()));

    match result {
        Err(e @ PufError::Read { .. }) => assert!(e.to_string().contains("does/not/exist.puf")),
        other => panic!("expected a read error, got {other:?}"),
    }
}
