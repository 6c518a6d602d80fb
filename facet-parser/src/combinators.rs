use facet_lexer::Token;

use crate::parser::Parser;

/// Tries to apply a parser, or fallback to its default value (making it an always-succeeding parser).
pub fn default<'a, A: Default>(parser: impl Parser<'a, A>) -> impl Parser<'a, A> {
    optional(parser).map(Option::unwrap_or_default)
}

/// Tries to apply a parser, but fails gracefully (with an `Option` output).
pub fn optional<'a, A>(parser: impl Parser<'a, A>) -> impl Parser<'a, Option<A>> {
    move |input: &'a [Token]| {
        if let Some((value, input)) = parser.parse(input) {
            Some((Some(value), input))
        } else {
            Some((None, input))
        }
    }
}

/// Applies a parser zero or more times.
pub fn many<'a, A>(parser: impl Parser<'a, A>) -> impl Parser<'a, Vec<A>> {
    move |mut input: &'a [Token]| {
        let mut output = Vec::<A>::new();
        while let Some((value, next)) = parser.parse(input) {
            input = next;
            output.push(value);
        }
        Some((output, input))
    }
}

/// Parses something that is enclosed between two other things.
pub fn between<'a, A, B, C>(
    before: impl Parser<'a, A>,
    within: impl Parser<'a, B>,
    after: impl Parser<'a, C>,
) -> impl Parser<'a, B> {
    move |input: &'a [Token]| {
        let (_, input) = before.parse(input)?;
        let (value, input) = within.parse(input)?;
        let (_, input) = after.parse(input)?;
        Some((value, input))
    }
}

/// Parses zero or more things, separated by an arbitrary delimiter.
pub fn sep_by<'a, A, B>(
    delim: impl Parser<'a, A>,
    within: impl Parser<'a, B>,
) -> impl Parser<'a, Vec<B>> {
    move |input: &'a [Token]| {
        let mut output = Vec::<B>::new();
        if let Some((value, mut input)) = within.parse(input) {
            output.push(value);
            while let Some((value, next)) = delim
                .parse(input)
                .and_then(|(_, input)| within.parse(input))
            {
                input = next;
                output.push(value);
            }
            Some((output, input))
        } else {
            Some((output, input))
        }
    }
}
