use std::marker::PhantomData;

use facet_lexer::Token;

/// Something that recognizes a piece of Facet syntax at the front of a token slice.
///
/// Parsers never consume anything on failure: the caller keeps the slice it passed in and
/// can try an alternative from the same position.
pub trait Parser<'a, T>: Sized {
    /// Recognizes a `T` at the front of `tokens`, answering it along with the tokens after it.
    fn parse(&self, tokens: &'a [Token]) -> Option<(T, &'a [Token])>;

    /// Recognizes `self` then `next`, keeping both results.
    fn and<U, P: Parser<'a, U>>(self, next: P) -> And<Self, P> {
        And {
            first: self,
            second: next,
        }
    }

    /// Recognizes `self`, or `other` from the same tokens if `self` did not match.
    fn or<P: Parser<'a, T>>(self, other: P) -> Or<Self, P> {
        Or {
            first: self,
            second: other,
        }
    }

    /// Builds something else (usually a syntax node) out of the recognized value.
    fn map<F: Fn(T) -> U, U>(self, func: F) -> Map<Self, F, T> {
        Map {
            parser: self,
            func,
            _phantom: PhantomData,
        }
    }

    /// Recognizes `self` then `next`, keeping only the first result (eg. a statement and its `;`).
    fn and_left<P: Parser<'a, U>, U>(
        self,
        next: P,
    ) -> Map<And<Self, P>, fn((T, U)) -> T, (T, U)> {
        let first: fn((T, U)) -> T = |(value, _)| value;
        self.and(next).map(first)
    }

    /// Recognizes `self` then `next`, keeping only the second result (eg. the term after `decorate`).
    fn and_right<P: Parser<'a, U>, U>(
        self,
        next: P,
    ) -> Map<And<Self, P>, fn((T, U)) -> U, (T, U)> {
        let second: fn((T, U)) -> U = |(_, value)| value;
        self.and(next).map(second)
    }
}

/// Two parsers in a row, see [`Parser::and`].
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<'a, T1, T2, A, B> Parser<'a, (T1, T2)> for And<A, B>
where
    A: Parser<'a, T1>,
    B: Parser<'a, T2>,
{
    fn parse(&self, tokens: &'a [Token]) -> Option<((T1, T2), &'a [Token])> {
        let (v1, rest) = self.first.parse(tokens)?;
        let (v2, rest) = self.second.parse(rest)?;
        Some(((v1, v2), rest))
    }
}

/// Two alternatives, see [`Parser::or`].
pub struct Or<A, B> {
    first: A,
    second: B,
}

impl<'a, T, A, B> Parser<'a, T> for Or<A, B>
where
    A: Parser<'a, T>,
    B: Parser<'a, T>,
{
    fn parse(&self, tokens: &'a [Token]) -> Option<(T, &'a [Token])> {
        self.first
            .parse(tokens)
            .or_else(|| self.second.parse(tokens))
    }
}

/// A parser with its result transformed, see [`Parser::map`].
pub struct Map<P, F, T> {
    parser: P,
    func: F,
    _phantom: PhantomData<T>,
}

impl<'a, P, T, F, U> Parser<'a, U> for Map<P, F, T>
where
    P: Parser<'a, T>,
    F: Fn(T) -> U,
{
    fn parse(&self, tokens: &'a [Token]) -> Option<(U, &'a [Token])> {
        let (value, rest) = self.parser.parse(tokens)?;
        Some(((self.func)(value), rest))
    }
}

/// Grammar rules are mostly plain closures over token slices, like `move |tokens| { ... }`.
impl<'a, T, F> Parser<'a, T> for F
where
    F: Fn(&'a [Token]) -> Option<(T, &'a [Token])>,
{
    fn parse(&self, tokens: &'a [Token]) -> Option<(T, &'a [Token])> {
        (self)(tokens)
    }
}
