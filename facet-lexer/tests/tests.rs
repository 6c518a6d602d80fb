use facet_lexer::{Lexer, Symbol, Token};
use pretty_assertions::assert_eq;

fn symbols(input: &str) -> Vec<Symbol> {
    Lexer::new(input)
        .skip_whitespace(true)
        .skip_comments(true)
        .map(|token| token.symbol)
        .collect()
}

#[test]
fn empty_object_test() {
    let mut lexer = Lexer::new("point = {}");

    assert_eq!(
        lexer.next(),
        Some(Token::new(Symbol::Identifier(String::from("point")), 1))
    );
    assert_eq!(lexer.next(), Some(Token::new(Symbol::Whitespace, 1)));
    assert_eq!(lexer.next(), Some(Token::new(Symbol::Equal, 1)));
    assert_eq!(lexer.next(), Some(Token::new(Symbol::Whitespace, 1)));
    assert_eq!(lexer.next(), Some(Token::new(Symbol::NewObject, 1)));
    assert_eq!(lexer.next(), Some(Token::new(Symbol::EndObject, 1)));
    assert_eq!(lexer.next(), None);
}

#[test]
fn definition_test() {
    assert_eq!(
        symbols("var = 3.14;"),
        vec![
            Symbol::Identifier(String::from("var")),
            Symbol::Equal,
            Symbol::LitNumber(3.14),
            Symbol::Semicolon,
        ]
    );
}

#[test]
fn send_on_integer_test() {
    assert_eq!(
        symbols("3.size"),
        vec![
            Symbol::LitNumber(3.0),
            Symbol::Dot,
            Symbol::Identifier(String::from("size")),
        ]
    );
}

#[test]
fn operator_sequence_test() {
    assert_eq!(
        symbols("a == b <= c - d"),
        vec![
            Symbol::Identifier(String::from("a")),
            Symbol::Operator(String::from("==")),
            Symbol::Identifier(String::from("b")),
            Symbol::Operator(String::from("<=")),
            Symbol::Identifier(String::from("c")),
            Symbol::Operator(String::from("-")),
            Symbol::Identifier(String::from("d")),
        ]
    );
}

#[test]
fn keywords_test() {
    assert_eq!(
        symbols("method decorate forward fn methods"),
        vec![
            Symbol::Method,
            Symbol::Decorate,
            Symbol::Forward,
            Symbol::Fn,
            Symbol::Identifier(String::from("methods")),
        ]
    );
}

#[test]
fn string_literal_test() {
    let mut lexer = Lexer::new("'some string with new\nline and \\'quotes\\''");

    assert_eq!(
        lexer.next(),
        Some(Token::new(
            Symbol::LitString(String::from("some string with new\nline and 'quotes'")),
            1
        ))
    );
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.line(), 2);
}

#[test]
fn unknown_escape_test() {
    let mut lexer = Lexer::new(r"'C:\dir\t'");
    assert_eq!(
        lexer.next(),
        Some(Token::new(Symbol::LitString(String::from("C:\\dir\t")), 1))
    );
    assert_eq!(lexer.next(), None);
}

#[test]
fn comment_test() {
    let mut lexer = Lexer::new("\"a comment\" x").skip_whitespace(true);

    assert_eq!(
        lexer.next(),
        Some(Token::new(Symbol::Comment(String::from("a comment")), 1))
    );
    assert_eq!(
        lexer.next(),
        Some(Token::new(Symbol::Identifier(String::from("x")), 1))
    );
    assert_eq!(lexer.next(), None);
}

#[test]
fn line_tracking_test() {
    let lines: Vec<usize> = Lexer::new("a;\n\nb;\n  c")
        .skip_whitespace(true)
        .map(|token| token.line)
        .collect();

    assert_eq!(lines, vec![1, 1, 3, 3, 4]);
}

#[test]
fn unterminated_string_test() {
    let mut lexer = Lexer::new("x = 'oops").skip_whitespace(true);
    let tokens: Vec<Token> = lexer.by_ref().collect();

    assert_eq!(tokens.len(), 2);
    assert_eq!(lexer.text(), "'oops");
}

#[test]
fn unknown_character_test() {
    let mut lexer = Lexer::new("x $ y").skip_whitespace(true);
    let tokens: Vec<Token> = lexer.by_ref().collect();

    assert_eq!(tokens.len(), 1);
    assert_eq!(lexer.text(), "$ y");
}
