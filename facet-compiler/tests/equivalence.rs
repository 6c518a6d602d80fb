//! Property-based tests running generated programs through both executors.
//!
//! Final values, errors and console output must be the same whether a program is walked
//! by the interpreter or compiled to closures. A fixed corpus is also emitted as JavaScript
//! and run under `node`, when it is installed.
//!
//! Methods and procedures only ever get bodies without user-defined messages in them,
//! and forward targets are plain variables or literals, so generated programs always terminate.

use std::io;
use std::process::{Command, Stdio};
use std::rc::Rc;

use facet_compiler::emit;
use facet_core::ast::{Element, Literal, Term};
use facet_runtime::universe::SharedOutput;
use facet_runtime::Universe;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::sample::select;

const STRINGS: &[&str] = &["", "ab"];
const VARIABLES: &[&str] = &["a", "b", "self", "console"];
const DEFINED: &[&str] = &["a", "b"];
const METHOD_NAMES: &[&str] = &["m", "n", "call"];
const PRIMITIVE_MESSAGES: &[&str] = &["+", "-", "*", "==", "size", "negated", "asString", "print"];
const ALL_MESSAGES: &[&str] = &[
    "+", "-", "*", "==", "size", "negated", "asString", "print", "m", "n", "call",
];

/// What running a program looks like from the outside.
#[derive(Debug, PartialEq)]
struct Observation {
    result: Result<(String, &'static str), String>,
    output: String,
}

fn observe(mut universe: Universe, program: &Term) -> Observation {
    let output = SharedOutput::new();
    universe.set_output(output.clone());
    let result = universe
        .execute(program)
        .map(|value| (value.to_string(), value.kind()))
        .map_err(|err| err.to_string());
    Observation {
        result,
        output: output.contents(),
    }
}

fn literal() -> impl Strategy<Value = Term> {
    prop_oneof![
        (0..5i32).prop_map(|n| Term::number(1, f64::from(n))),
        select(STRINGS).prop_map(|s| Term::string(1, s)),
        Just(Term::literal(1, Literal::Nil)),
        any::<bool>().prop_map(|b| Term::literal(1, Literal::Boolean(b))),
    ]
}

fn variable() -> impl Strategy<Value = Term> {
    (1..4usize, select(VARIABLES)).prop_map(|(line, name)| Term::variable(line, name))
}

fn parameters() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(select(DEFINED).prop_map(String::from), 0..3)
}

/// Terms that never send a message a generated method could answer.
fn plain_term() -> BoxedStrategy<Term> {
    prop_oneof![literal(), variable()]
        .prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                (
                    1..4usize,
                    inner.clone(),
                    select(PRIMITIVE_MESSAGES),
                    prop::collection::vec(inner.clone(), 0..3),
                )
                    .prop_map(|(line, receiver, message, args)| {
                        Term::send(line, receiver, message, args)
                    }),
                (select(DEFINED), inner.clone())
                    .prop_map(|(name, value)| Term::define(1, name, value)),
                prop::collection::vec(inner, 1..3)
                    .prop_map(|statements| Term::sequence(1, statements)),
            ]
        })
        .boxed()
}

fn object(inner: BoxedStrategy<Term>) -> impl Strategy<Value = Term> {
    let element = prop_oneof![
        (1..4usize, select(METHOD_NAMES), parameters(), plain_term()).prop_map(
            |(line, name, parameters, body)| Element::method(line, name, parameters, body)
        ),
        inner.clone().prop_map(Element::Decorate),
        (select(DEFINED), inner).prop_map(|(name, value)| Element::define(name, value)),
        prop_oneof![literal(), variable()].prop_map(|target| Element::Forward(Rc::new(target))),
    ];
    (1..4usize, prop::collection::vec(element, 0..4))
        .prop_map(|(line, elements)| Term::object(line, elements))
}

fn program() -> impl Strategy<Value = Term> {
    plain_term()
        .prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                (
                    1..4usize,
                    inner.clone(),
                    select(ALL_MESSAGES),
                    prop::collection::vec(inner.clone(), 0..3),
                )
                    .prop_map(|(line, receiver, message, args)| {
                        Term::send(line, receiver, message, args)
                    }),
                (select(DEFINED), inner.clone())
                    .prop_map(|(name, value)| Term::define(1, name, value)),
                prop::collection::vec(inner.clone(), 1..4)
                    .prop_map(|statements| Term::sequence(1, statements)),
                object(inner),
                (parameters(), plain_term())
                    .prop_map(|(parameters, body)| Term::procedure(1, parameters, body)),
            ]
        })
        .prop_map(|term| Term::sequence(1, vec![term]))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn compiled_programs_behave_like_interpreted_ones(program in program()) {
        let interpreted = observe(facet_interpreter_ast::universe(Vec::new()), &program);
        let compiled = observe(facet_compiler::universe(Vec::new()), &program);
        prop_assert_eq!(interpreted, compiled);
    }
}

const CORPUS: &[&str] = &[
    "x = 1; y = x + 2; y * 3",
    "1 + 2 * 3 - 4",
    "o = { method m() { 1 }; method m() { 2 } }; o.m",
    "s = { method a() { 's' } }; o = { decorate s; method a() { 'o' } }; o.a",
    "t = { method a() { 1 } }; o = { forward t }; t = { method a() { 2 } }; o.a",
    "o = { forward 41 }; o + 1",
    "o = { forward o }; o.missing",
    "(console.print('r'); 1) + console.print('a')",
    "x = 'outer'; f = fn() { y = x; x = 'inner'; y + x }; f() + x",
    "f = fn() { later }; later = 5; f()",
    "o = { total = Cell.new(0); method add(n) { total.set(total.get + n); self } }; o.add(2).add(3)",
    "o = {\n  method boom() {\n    nil.size\n  }\n};\no.boom",
    "1;\nunknown",
    "f = fn(a, b) { b }; f(1)",
    "x = 5; f = fn(x) { x }; console.print(f(), f(7))",
    "values = Array.new(1, 2); values.push(3); console.println(values)",
    "{ method asString() { 'custom' } }.asString + 1",
    "n = 0; 1.to(3, fn(i) { console.print(i) }); (n == 0).if(fn() { 'zero' })",
    "1 + nil",
    "1 + {}",
    "console.print('x'); 1 + true",
    "'a' + { method asString() { 3 } }",
    "console.println((0).negated, ' ', 1 / 0, ' ', (0 - 1) / 0, ' ', 0.5 * 3)",
    "console.println(1000000 * 1000000 * 1000000 * 1000, ' ', 1 / 10000000)",
    "x = 3; x.timesRepeat",
    "x = 2; x.to(3)",
    "console.println('abc'.substring(1, 3) + 'abc'.at(0)); Array.new(1).at(5)",
];

#[test]
fn representative_corpus() {
    for source in CORPUS {
        let program = facet_parser::parse_program(source).unwrap();
        let interpreted = observe(facet_interpreter_ast::universe(Vec::new()), &program);
        let compiled = observe(facet_compiler::universe(Vec::new()), &program);
        assert_eq!(interpreted, compiled, "diverged on `{}`", source);
    }
}

/// What a process running a program shows from the outside.
#[derive(Debug, PartialEq)]
struct Outcome {
    stdout: String,
    stderr: String,
    code: Option<i32>,
}

fn interpret(program: &Term) -> Outcome {
    let mut universe = facet_interpreter_ast::universe(Vec::new());
    let output = SharedOutput::new();
    universe.set_output(output.clone());
    universe.set_input(io::empty());
    match universe.execute(program) {
        Ok(_) => Outcome {
            stdout: output.contents(),
            stderr: String::new(),
            code: Some(0),
        },
        Err(err) => Outcome {
            stdout: output.contents(),
            stderr: format!("ERROR: {}\n", err),
            code: Some(1),
        },
    }
}

fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[test]
fn emitted_programs_behave_like_interpreted_ones() {
    if !node_available() {
        eprintln!("skipping: `node` is not installed");
        return;
    }
    let directory = std::env::temp_dir().join(format!("facet-emitted-{}", std::process::id()));
    std::fs::create_dir_all(&directory).unwrap();

    for (number, source) in CORPUS.iter().enumerate() {
        let program = facet_parser::parse_program(source).unwrap();
        let script = emit::emit(&facet_compiler::lower(&program), &[]);
        let path = directory.join(format!("program-{}.js", number));
        std::fs::write(&path, script).unwrap();

        let output = Command::new("node")
            .arg(&path)
            .stdin(Stdio::null())
            .output()
            .unwrap();
        let emitted = Outcome {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        };
        assert_eq!(interpret(&program), emitted, "diverged on `{}`", source);
    }

    std::fs::remove_dir_all(&directory).unwrap();
}
