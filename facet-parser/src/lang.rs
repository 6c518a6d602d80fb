use facet_core::ast::*;
use facet_lexer::{Symbol, Token};

use crate::combinators::*;
use crate::parser::Parser;

macro_rules! opaque {
    ($expr:expr) => {{
        move |input: &'a [Token]| $expr.parse(input)
    }};
}

/// A parser that expects to be nothing left in its input.
pub fn eof<'a>() -> impl Parser<'a, ()> {
    move |input: &'a [Token]| {
        if input.is_empty() {
            Some(((), input))
        } else {
            None
        }
    }
}

pub fn exact<'a>(symbol: Symbol) -> impl Parser<'a, ()> {
    move |input: &'a [Token]| {
        let (head, tail) = input.split_first()?;
        if head.symbol == symbol {
            Some(((), tail))
        } else {
            None
        }
    }
}

pub fn exact_ident<'a, 'b: 'a>(string: &'b str) -> impl Parser<'a, ()> {
    move |input: &'a [Token]| {
        let (head, tail) = input.split_first()?;
        match head.symbol {
            Symbol::Identifier(ref ident) if ident.as_str() == string => Some(((), tail)),
            _ => None,
        }
    }
}

/// The line of the next token, without consuming it.
pub fn line<'a>() -> impl Parser<'a, usize> {
    move |input: &'a [Token]| {
        let head = input.first()?;
        Some((head.line, input))
    }
}

pub fn number<'a>() -> impl Parser<'a, f64> {
    move |input: &'a [Token]| {
        let (sign, input) =
            optional(exact(Symbol::Operator(String::from("-")))).parse(input)?;
        let sign = if sign.is_some() { -1.0 } else { 1.0 };

        let (head, tail) = input.split_first()?;
        match head.symbol {
            Symbol::LitNumber(value) => Some((value * sign, tail)),
            _ => None,
        }
    }
}

pub fn string<'a>() -> impl Parser<'a, String> {
    move |input: &'a [Token]| {
        let (head, tail) = input.split_first()?;
        match head.symbol {
            Symbol::LitString(ref value) => Some((value.clone(), tail)),
            _ => None,
        }
    }
}

pub fn identifier<'a>() -> impl Parser<'a, String> {
    move |input: &'a [Token]| {
        let (head, tail) = input.split_first()?;
        match head.symbol {
            Symbol::Identifier(ref value) => Some((value.clone(), tail)),
            _ => None,
        }
    }
}

pub fn operator<'a>() -> impl Parser<'a, String> {
    move |input: &'a [Token]| {
        let (head, tail) = input.split_first()?;
        match head.symbol {
            Symbol::Operator(ref value) => Some((value.clone(), tail)),
            _ => None,
        }
    }
}

/// A message name, either a plain identifier or an operator.
pub fn name<'a>() -> impl Parser<'a, String> {
    identifier().or(operator())
}

pub fn literal<'a>() -> impl Parser<'a, Literal> {
    (number().map(Literal::Number))
        .or(string().map(Literal::String))
        .or(exact_ident("true").map(|_| Literal::Boolean(true)))
        .or(exact_ident("false").map(|_| Literal::Boolean(false)))
        .or(exact_ident("nil").map(|_| Literal::Nil))
}

pub fn arguments<'a>() -> impl Parser<'a, Vec<Term>> {
    between(
        exact(Symbol::NewTerm),
        sep_by(exact(Symbol::Comma), opaque!(expression())),
        exact(Symbol::EndTerm),
    )
}

pub fn parameters<'a>() -> impl Parser<'a, Vec<String>> {
    between(
        exact(Symbol::NewTerm),
        sep_by(exact(Symbol::Comma), identifier()),
        exact(Symbol::EndTerm),
    )
}

/// A message suffix, either `.name`, `.name(args)` or a bare `(args)` call.
pub fn suffix<'a>() -> impl Parser<'a, (String, Vec<Term>)> {
    let send = exact(Symbol::Dot)
        .and_right(name())
        .and(default(arguments()));
    let call = arguments().map(|arguments| (String::from("call"), arguments));
    send.or(call)
}

pub fn postfix<'a>() -> impl Parser<'a, Term> {
    opaque!(primary())
        .and(many(suffix()))
        .map(|(receiver, suffixes)| {
            suffixes
                .into_iter()
                .fold(receiver, |receiver, (message, arguments)| {
                    Term::send(receiver.line, receiver, message, arguments)
                })
        })
}

/// Binary sends, all operators sharing one precedence level and associating to the left.
pub fn expression<'a>() -> impl Parser<'a, Term> {
    postfix()
        .and(many(operator().and(postfix())))
        .map(|(lhs, operands)| {
            operands
                .into_iter()
                .fold(lhs, |lhs, (op, rhs)| Term::send(lhs.line, lhs, op, vec![rhs]))
        })
}

pub fn define<'a>() -> impl Parser<'a, Term> {
    line()
        .and(identifier())
        .and_left(exact(Symbol::Equal))
        .and(opaque!(statement()))
        .map(|((line, name), value)| Term::define(line, name, value))
}

pub fn statement<'a>() -> impl Parser<'a, Term> {
    define().or(expression())
}

pub fn statements<'a>() -> impl Parser<'a, Vec<Term>> {
    sep_by(exact(Symbol::Semicolon), statement()).and_left(optional(exact(Symbol::Semicolon)))
}

/// A braced body, always producing a sequence.
pub fn body<'a>() -> impl Parser<'a, Term> {
    line()
        .and(between(
            exact(Symbol::NewObject),
            opaque!(statements()),
            exact(Symbol::EndObject),
        ))
        .map(|(line, statements)| Term::sequence(line, statements))
}

/// A parenthesized term: a lone statement stands for itself, anything else is a sequence.
pub fn term<'a>() -> impl Parser<'a, Term> {
    line()
        .and(between(
            exact(Symbol::NewTerm),
            opaque!(statements()),
            exact(Symbol::EndTerm),
        ))
        .map(|(line, mut statements)| {
            if statements.len() == 1 {
                statements.remove(0)
            } else {
                Term::sequence(line, statements)
            }
        })
}

pub fn method<'a>() -> impl Parser<'a, Element> {
    line()
        .and(exact(Symbol::Method).and_right(name()))
        .and(parameters())
        .and(body())
        .map(|(((line, signature), parameters), body)| {
            Element::method(line, signature, parameters, body)
        })
}

pub fn element<'a>() -> impl Parser<'a, Element> {
    let decorate = exact(Symbol::Decorate)
        .and_right(opaque!(expression()))
        .map(Element::Decorate);
    let forward = exact(Symbol::Forward)
        .and_right(opaque!(expression()))
        .map(|target| Element::Forward(std::rc::Rc::new(target)));
    let define = identifier()
        .and_left(exact(Symbol::Equal))
        .and(opaque!(statement()))
        .map(|(name, value)| Element::define(name, value));
    method().or(decorate).or(forward).or(define)
}

pub fn object<'a>() -> impl Parser<'a, Term> {
    line()
        .and(between(
            exact(Symbol::NewObject),
            sep_by(exact(Symbol::Semicolon), element())
                .and_left(optional(exact(Symbol::Semicolon))),
            exact(Symbol::EndObject),
        ))
        .map(|(line, elements)| Term::object(line, elements))
}

pub fn procedure<'a>() -> impl Parser<'a, Term> {
    line()
        .and(exact(Symbol::Fn).and_right(parameters()))
        .and(body())
        .map(|((line, parameters), body)| Term::procedure(line, parameters, body))
}

pub fn primary<'a>() -> impl Parser<'a, Term> {
    (line().and(literal()).map(|(line, literal)| Term::literal(line, literal)))
        .or(line()
            .and(identifier())
            .map(|(line, name)| Term::variable(line, name)))
        .or(term())
        .or(object())
        .or(procedure())
}
