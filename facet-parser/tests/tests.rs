use facet_core::ast::*;
use facet_lexer::{Lexer, Token};
use facet_parser::lang;
use facet_parser::{apply, parse_program, Parser};
use pretty_assertions::assert_eq;

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input)
        .skip_comments(true)
        .skip_whitespace(true)
        .collect()
}

fn statement(input: &str) -> Term {
    let tokens = tokens(input);
    apply(lang::statement(), tokens.as_slice()).expect("could not parse statement")
}

fn var(name: &str) -> Term {
    Term::variable(1, name)
}

fn num(value: f64) -> Term {
    Term::number(1, value)
}

#[test]
fn literal_test() {
    assert_eq!(statement("42"), num(42.0));
    assert_eq!(statement("-2.5"), num(-2.5));
    assert_eq!(statement("'hi'"), Term::string(1, "hi"));
    assert_eq!(
        statement("true"),
        Term::literal(1, Literal::Boolean(true))
    );
    assert_eq!(statement("nil"), Term::literal(1, Literal::Nil));
}

#[test]
fn send_chain_test() {
    assert_eq!(
        statement("counter.add(5, x).value"),
        Term::send(
            1,
            Term::send(1, var("counter"), "add", vec![num(5.0), var("x")]),
            "value",
            vec![],
        )
    );
}

#[test]
fn binary_left_to_right_test() {
    // a + b * c is (a + b) * c
    assert_eq!(
        statement("a + b * c"),
        Term::send(
            1,
            Term::send(1, var("a"), "+", vec![var("b")]),
            "*",
            vec![var("c")],
        )
    );
}

#[test]
fn binary_binds_looser_than_sends_test() {
    assert_eq!(
        statement("a.size + 1"),
        Term::send(
            1,
            Term::send(1, var("a"), "size", vec![]),
            "+",
            vec![num(1.0)],
        )
    );
}

#[test]
fn operator_as_message_name_test() {
    assert_eq!(
        statement("a.+(1)"),
        Term::send(1, var("a"), "+", vec![num(1.0)])
    );
}

#[test]
fn define_test() {
    assert_eq!(
        statement("x = y = 3"),
        Term::define(1, "x", Term::define(1, "y", num(3.0)))
    );
}

#[test]
fn call_sugar_test() {
    assert_eq!(
        statement("double(21)"),
        Term::send(1, var("double"), "call", vec![num(21.0)])
    );
    assert_eq!(
        statement("make()(1)"),
        Term::send(
            1,
            Term::send(1, var("make"), "call", vec![]),
            "call",
            vec![num(1.0)],
        )
    );
}

#[test]
fn parenthesized_term_test() {
    assert_eq!(statement("(x)"), var("x"));
    assert_eq!(
        statement("(x = 1; x)"),
        Term::sequence(1, vec![Term::define(1, "x", num(1.0)), var("x")])
    );
    assert_eq!(statement("()"), Term::sequence(1, vec![]));
}

#[test]
fn procedure_test() {
    assert_eq!(
        statement("fn(x) { x * 2 }"),
        Term::procedure(
            1,
            vec![String::from("x")],
            Term::sequence(1, vec![Term::send(1, var("x"), "*", vec![num(2.0)])]),
        )
    );
}

#[test]
fn object_elements_test() {
    let source = "{ total = 0; method add(n) { total }; decorate 'str'; forward parent; }";
    assert_eq!(
        statement(source),
        Term::object(
            1,
            vec![
                Element::define("total", num(0.0)),
                Element::method(
                    1,
                    "add",
                    vec![String::from("n")],
                    Term::sequence(1, vec![var("total")]),
                ),
                Element::Decorate(Term::string(1, "str")),
                Element::Forward(std::rc::Rc::new(var("parent"))),
            ],
        )
    );
}

#[test]
fn operator_method_test() {
    let term = statement("{ method ==(other) { true } }");
    let elements = match term.kind {
        TermKind::Object(object) => object.elements.clone(),
        kind => panic!("expected an object, got {:?}", kind),
    };
    match &elements[..] {
        [Element::Method(method)] => {
            assert_eq!(method.signature, "==");
            assert_eq!(method.parameters, vec![String::from("other")]);
        }
        elements => panic!("unexpected elements {:?}", elements),
    }
}

#[test]
fn program_lines_test() {
    let program = parse_program("x = 1;\n\"skip\"\ny = x\n  .succ").expect("could not parse");
    let statements = match program.kind {
        TermKind::Sequence(statements) => statements,
        kind => panic!("expected a sequence, got {:?}", kind),
    };
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].line, 1);
    assert_eq!(statements[1].line, 3);
    match &statements[1].kind {
        TermKind::Define(define) => {
            assert_eq!(define.value.line, 3);
            assert!(matches!(define.value.kind, TermKind::Send(_)));
        }
        kind => panic!("expected a define, got {:?}", kind),
    }
}

#[test]
fn trailing_semicolon_test() {
    let program = parse_program("1; 2;").expect("could not parse");
    assert_eq!(program, Term::sequence(1, vec![num(1.0), Term::number(1, 2.0)]));
}

#[test]
fn empty_program_test() {
    assert_eq!(parse_program("").unwrap(), Term::sequence(1, vec![]));
}

#[test]
fn parse_error_test() {
    let error = parse_program("x = 1;\ny = )").unwrap_err();
    assert_eq!(error.line, 2);
    assert_eq!(error.message, "unexpected '='");
    assert_eq!(error.to_string(), "line 2: unexpected '='");
}

#[test]
fn lexical_error_test() {
    let error = parse_program("x = 1;\ny = 'never closed").unwrap_err();
    assert_eq!(error.line, 2);
    assert_eq!(error.message, "unrecognised input starting at '''");
}

#[test]
fn eof_test() {
    let empty = tokens("");
    assert_eq!(apply(lang::eof(), empty.as_slice()), Some(()));
    let leftover = tokens("x");
    assert_eq!(lang::eof().parse(leftover.as_slice()), None);
}
