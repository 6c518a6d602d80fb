use std::path::PathBuf;

use facet_compiler::emit::{self, Module};
use facet_runtime::universe::SharedOutput;
use facet_runtime::{Error, Universe, Value};
use pretty_assertions::assert_eq;

fn setup_universe(search_paths: Vec<PathBuf>) -> (Universe, SharedOutput) {
    let mut universe = facet_compiler::universe(search_paths);
    let output = SharedOutput::new();
    universe.set_output(output.clone());
    (universe, output)
}

fn run(source: &str) -> (Result<Value, Error>, String) {
    let (mut universe, output) = setup_universe(Vec::new());
    let program = facet_parser::parse_program(source).unwrap();
    let result = facet_compiler::compile(&program).run(&mut universe);
    (result, output.contents())
}

fn eval(source: &str) -> Value {
    run(source)
        .0
        .unwrap_or_else(|err| panic!("evaluation failed: {}", err))
}

fn emit_source(source: &str) -> String {
    let program = facet_parser::parse_program(source).unwrap();
    emit::emit_program(&facet_compiler::lower(&program))
}

#[test]
fn compiled_arithmetic() {
    assert_eq!(eval("x = 1; y = x + 2; y * 3"), Value::Number(9.0));
    assert_eq!(eval("1 + 2 * 3"), Value::Number(9.0));
}

#[test]
fn compiled_objects() {
    assert_eq!(
        eval("o = { method m() { 1 }; method m() { 2 } }; o.m"),
        Value::Number(1.0)
    );
    assert_eq!(
        eval("s = { method m() { 'decorated' } }; o = { decorate s; method m() { 'direct' } }; o.m"),
        Value::string("direct")
    );
    assert_eq!(
        eval("t = { method a() { 1 } }; o = { forward t }; t = { method a() { 2 } }; o.a"),
        Value::Number(2.0)
    );
    let source = "
        counter = {
            total = Cell.new(0);
            method add(n) { total.set(total.get + n); self };
            method value() { total.get }
        };
        counter.add(2).add(3).value
    ";
    assert_eq!(eval(source), Value::Number(5.0));
}

#[test]
fn compiled_scopes() {
    assert_eq!(
        eval("x = 'outer'; f = fn() { y = x; x = 'inner'; y + x }; f()"),
        Value::string("outerinner")
    );
    assert_eq!(eval("f = fn() { later }; later = 5; f()"), Value::Number(5.0));
    assert_eq!(
        eval("make = fn(n) { fn() { n } }; one = make(1); two = make(2); one() + two()"),
        Value::Number(3.0)
    );
}

#[test]
fn compiled_errors_carry_lines() {
    let (result, _) = run("1;\nx + 1");
    assert_eq!(
        result,
        Err(Error::UnboundVariable {
            name: String::from("x"),
            line: Some(2),
        })
    );

    let (result, _) = run("o = {\n  method boom() {\n    nil.size\n  }\n};\no.boom");
    assert_eq!(
        result.unwrap_err().to_string(),
        "nil does not understand 'size' (line 3)"
    );
}

#[test]
fn compiled_missing_parameters_read_through() {
    assert_eq!(eval("x = 5; f = fn(x) { x }; f()"), Value::Number(5.0));
    assert_eq!(eval("x = 5; f = fn(x, x) { x }; f(7)"), Value::Number(7.0));
    assert_eq!(
        run("f = fn(a, b) { b }; f(1)").0,
        Err(Error::UnboundVariable {
            name: String::from("b"),
            line: Some(1),
        })
    );
}

#[test]
fn compiled_coercion_failures() {
    let (result, _) = run("1 + nil");
    assert_eq!(
        result,
        Err(Error::CoercionFailure {
            kind: String::from("number"),
            value: String::from("nil"),
        })
    );
    let (result, _) = run("1 + {}");
    assert_eq!(result.unwrap_err().to_string(), "cannot coerce object to a number");
    let (result, _) = run("1 + true");
    assert_eq!(result.unwrap_err().to_string(), "cannot coerce boolean true to a number");
}

#[test]
fn compiled_side_effects_keep_their_order() {
    let source = "
        recv = { method m(a, b) { console.print('m') } };
        (console.print('r'); recv).m(console.print('a'), console.print('b'))
    ";
    let (result, output) = run(source);
    assert_eq!(result, Ok(Value::Nil));
    assert_eq!(output, "rabm");
}

#[test]
fn compiled_modules() {
    let directory = std::env::temp_dir().join(format!("facet-compiler-{}", std::process::id()));
    std::fs::create_dir_all(&directory).unwrap();
    std::fs::write(
        directory.join("lib.facet"),
        "console.println('loading'); { method double(x) { x * 2 } }",
    )
    .unwrap();

    let (mut universe, output) = setup_universe(vec![directory.clone()]);
    let source = "a = system.import('lib'); b = system.import('lib'); a.double(21)";
    assert_eq!(universe.run_source(source), Ok(Value::Number(42.0)));
    assert_eq!(output.contents(), "loading\n");
    assert_eq!(universe.cached_modules(), 1);

    std::fs::remove_dir_all(&directory).unwrap();
}

#[test]
fn facetc_reports_failures_like_the_interpreter() {
    let directory = std::env::temp_dir().join(format!("facetc-errors-{}", std::process::id()));
    std::fs::create_dir_all(&directory).unwrap();
    let cases = [
        ("broken.facet", "x = (1"),
        ("failing.facet", "console.print('a');\nnil.size"),
    ];

    for (name, source) in cases {
        let path = directory.join(name);
        std::fs::write(&path, source).unwrap();
        let output = std::process::Command::new(env!("CARGO_BIN_EXE_facetc"))
            .arg("run")
            .arg(&path)
            .output()
            .unwrap();
        let program = facet_parser::parse_program(source);
        let expected = match program {
            Err(err) => Error::from(err),
            Ok(_) => run(source).0.unwrap_err(),
        };
        assert_eq!(output.status.code(), Some(1));
        assert_eq!(
            String::from_utf8_lossy(&output.stderr),
            format!("ERROR: {}\n", expected)
        );
    }

    std::fs::remove_dir_all(&directory).unwrap();
}

#[test]
fn emitted_names_are_hygienic() {
    let script = emit_source("class = 1; function = fn(let) { let + class }; function(2)");
    assert!(script.contains("let v0_class, v0_function;"));
    assert!(script.contains("if ($args.length > 0) v1_let = $args[0];"));
    assert!(script.contains("(v1_let !== undefined ? v1_let : $global('let', 1))"));
    assert!(script.contains("(v0_class !== undefined ? v0_class : $global('class', 1))"));
    assert!(!script.contains(" class "));
}

#[test]
fn emitted_sequences_are_expressions() {
    let script = emit_source("x = (console.print('a'); 2); x");
    assert!(script.contains(
        "(v0_x = (() => { $send($global('console', 1), 'print', ['a'], 1); return 2; })())"
    ));
}

#[test]
fn emitted_objects_register_methods_first() {
    let script = emit_source("{ decorate 'text'; method size() { 0 }; forward nil }");
    let method = script.find("$method(v1_self, 'size'").unwrap();
    let decorate = script.find("$decorate(v1_self, 'text')").unwrap();
    let forward = script.find("$forward(v1_self, () => null)").unwrap();
    assert!(method < decorate);
    assert!(decorate < forward);
    assert!(script.contains("let v1_self = $object();"));
}

#[test]
fn emitted_scripts_bundle_modules() {
    let main = facet_compiler::lower(&facet_parser::parse_program("system.import('lib')").unwrap());
    let lib = facet_compiler::lower(&facet_parser::parse_program("42").unwrap());
    let script = emit::emit(
        &main,
        &[Module {
            path: String::from("/tmp/lib.facet"),
            program: lib,
        }],
    );
    assert!(script.starts_with(emit::PRELUDE));
    assert!(script.contains("['/tmp/lib.facet', (...$args) => { return 42; }],"));
    assert!(script.ends_with("$main((...$args) => { return $send($global('system', 1), 'import', ['lib'], 1); });\n"));
}
