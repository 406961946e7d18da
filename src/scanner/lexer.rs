//! Lexer for math delimiters.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::char,
    combinator::{not, peek},
    error::{Error, ErrorKind},
    sequence::delimited,
    IResult,
};

/// A delimited math token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    InlineMath(&'a str),
    DisplayMath(&'a str),
}

/// Parse display math ($$...$$).
pub fn display_math(input: &str) -> IResult<&str, Token> {
    let (input, content) = delimited(tag("$$"), take_until("$$"), tag("$$"))(input)?;
    Ok((input, Token::DisplayMath(content)))
}

/// Parse inline math ($...$).
pub fn inline_math(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('$')(input)?;
    let (input, _) = peek(not(char('$')))(input)?; // Not display math
    let (input, content) = take_until("$")(input)?;
    let (input, _) = char('$')(input)?;
    Ok((input, Token::InlineMath(content)))
}

/// Parse display math whose closing `$$` is not backslash-escaped.
pub fn display_math_unescaped(input: &str) -> IResult<&str, Token> {
    let (input, content) =
        delimited(tag("$$"), take_until_unescaped("$$"), tag("$$"))(input)?;
    Ok((input, Token::DisplayMath(content)))
}

/// Parse inline math whose closing `$` is not backslash-escaped.
pub fn inline_math_unescaped(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('$')(input)?;
    let (input, _) = peek(not(char('$')))(input)?;
    let (input, content) = take_until_unescaped("$")(input)?;
    let (input, _) = char('$')(input)?;
    Ok((input, Token::InlineMath(content)))
}

/// Parse one math token, preferring the display form.
pub fn math_token(input: &str) -> IResult<&str, Token> {
    alt((display_math, inline_math))(input)
}

/// Like [`math_token`], but `\$` never closes a span.
pub fn math_token_unescaped(input: &str) -> IResult<&str, Token> {
    alt((display_math_unescaped, inline_math_unescaped))(input)
}

/// Like `take_until`, skipping matches preceded by an odd run of backslashes.
fn take_until_unescaped<'a>(pattern: &'static str) -> impl Fn(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| {
        let mut from = 0;
        while let Some(found) = input[from..].find(pattern) {
            let at = from + found;
            if !is_escaped(input, at) {
                return Ok((&input[at..], &input[..at]));
            }
            from = at + 1;
        }
        Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
    }
}

/// Check whether the byte at `index` is preceded by an odd number of backslashes.
pub fn is_escaped(text: &str, index: usize) -> bool {
    text.as_bytes()[..index]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count()
        % 2
        == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_math() {
        assert_eq!(
            inline_math("$E = mc^2$ rest"),
            Ok((" rest", Token::InlineMath("E = mc^2")))
        );
        assert!(inline_math("$$x$$").is_err());
        assert!(inline_math("$unterminated").is_err());
    }

    #[test]
    fn test_display_math() {
        assert_eq!(
            display_math("$$\\int_0^1 x dx$$"),
            Ok(("", Token::DisplayMath("\\int_0^1 x dx")))
        );
        assert_eq!(display_math("$$$$."), Ok((".", Token::DisplayMath(""))));
    }

    #[test]
    fn test_math_token_prefers_display() {
        assert_eq!(math_token("$$a+b$$"), Ok(("", Token::DisplayMath("a+b"))));
        assert_eq!(math_token("$a$$b$"), Ok(("$b$", Token::InlineMath("a"))));
    }

    #[test]
    fn test_unescaped_variants() {
        assert_eq!(
            math_token_unescaped("$a \\$ b$ c"),
            Ok((" c", Token::InlineMath("a \\$ b")))
        );
        assert_eq!(
            math_token_unescaped("$$x \\$$ y$$"),
            Ok(("", Token::DisplayMath("x \\$$ y")))
        );
        // An escaped backslash does not escape the delimiter
        assert_eq!(
            math_token_unescaped("$a\\\\$b"),
            Ok(("b", Token::InlineMath("a\\\\")))
        );
    }

    #[test]
    fn test_is_escaped() {
        assert!(is_escaped("\\$", 1));
        assert!(!is_escaped("\\\\$", 2));
        assert!(is_escaped("\\\\\\$", 3));
        assert!(!is_escaped("$", 0));
    }
}
