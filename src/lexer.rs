//! PDF lexer (tokenizer).
//!
//! Tokenizes PDF syntax from a byte slice. The lexer is stateless beyond its
//! cursor: `tokenize_at(bytes, pos)` started at any token boundary `pos`
//! yields exactly the same tokens as scanning from the beginning and
//! truncating to the same suffix (§8 invariant 1) — nothing about a token's
//! shape depends on what came before it in the file.
//!
//! PDF whitespace: space, tab, CR, LF, NUL, form-feed (ISO 32000-1 Table 1).
//! Comments run from `%` to end of line and are discarded, never emitted as
//! tokens. `stream`/`endstream` are tokenized as keywords; the opaque byte
//! range of the payload itself is located by the object parser, which knows
//! the declared `/Length` and can fall back to scanning for `endstream`
//! (§4.1).

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while},
    character::complete::{char, digit1, one_of},
    combinator::{map, opt, value},
    sequence::{delimited, preceded},
    IResult,
};

/// A token emitted by the lexer, paired with the byte offset it started at.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<'a> {
    /// Offset of the first byte of this token.
    pub offset: usize,
    /// The token itself.
    pub token: Token<'a>,
}

/// Token types recognized by the PDF lexer.
#[derive(Debug, PartialEq, Clone)]
pub enum Token<'a> {
    /// Integer number (e.g. 42, -123).
    Integer(i64),
    /// Real (floating point) number (e.g. 3.14, -.5, 5.).
    Real(f64),
    /// Raw bytes between unescaped `(` and `)`, escapes not yet decoded.
    LiteralString(&'a [u8]),
    /// Raw bytes between `<` and `>`, whitespace not yet stripped.
    HexString(&'a [u8]),
    /// A name with `#xx` escapes already decoded (ISO 32000-1 §7.3.5).
    Name(String),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `<<`
    DictStart,
    /// `>>`
    DictEnd,
    /// `obj`
    ObjStart,
    /// `endobj`
    ObjEnd,
    /// `stream`
    StreamStart,
    /// `endstream`
    StreamEnd,
    /// `R`
    R,
    /// Any other bare keyword (used for content-stream operators).
    Keyword(&'a str),
}

fn whitespace(input: &[u8]) -> IResult<&[u8], ()> {
    let (rest, ws) = take_while(is_pdf_whitespace)(input)?;
    if ws.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Space)));
    }
    Ok((rest, ()))
}

/// Whether `c` is PDF whitespace: space, tab, CR, LF, NUL, form-feed.
pub fn is_pdf_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n' | 0x00 | 0x0C)
}

fn comment(input: &[u8]) -> IResult<&[u8], ()> {
    value((), preceded(char('%'), take_till(|c| c == b'\r' || c == b'\n')))(input)
}

/// Skip whitespace and comments, returning the position after the skip.
pub fn skip_ws(input: &[u8]) -> &[u8] {
    let mut remaining = input;
    loop {
        if let Ok((rest, _)) = whitespace(remaining) {
            remaining = rest;
            continue;
        }
        if let Ok((rest, _)) = comment(remaining) {
            remaining = rest;
            continue;
        }
        break;
    }
    remaining
}

fn parse_number(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (input, sign) = opt(one_of("+-"))(input)?;
    let (input, int_part) = opt(digit1)(input)?;
    let (input, frac_part) = opt(preceded(char('.'), opt(digit1)))(input)?;

    if int_part.is_none() && frac_part.is_none() {
        return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit)));
    }

    if frac_part.is_some() {
        let mut s = String::new();
        if sign == Some('-') {
            s.push('-');
        }
        s.push_str(int_part.map(|b| std::str::from_utf8(b).unwrap_or("0")).unwrap_or("0"));
        s.push('.');
        if let Some(Some(f)) = frac_part {
            s.push_str(std::str::from_utf8(f).unwrap_or("0"));
        } else {
            s.push('0');
        }
        let num: f64 = s.parse().unwrap_or(0.0);
        Ok((input, Token::Real(num)))
    } else {
        let bytes = int_part.unwrap();
        let s = std::str::from_utf8(bytes).unwrap_or("0");
        let mut n: i64 = s.parse().unwrap_or(0);
        if sign == Some('-') {
            n = -n;
        }
        Ok((input, Token::Integer(n)))
    }
}

/// Literal strings allow balanced nested parentheses and backslash escapes;
/// the escape sequences themselves are decoded later by the object parser
/// (`crate::parser::decode_literal_string`), not here.
fn parse_literal_string(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (mut remaining, _) = char('(')(input)?;
    let mut depth = 1i32;
    let mut pos = 0;

    while depth > 0 && pos < remaining.len() {
        match remaining[pos] {
            b'\\' => {
                pos += 1;
                if pos < remaining.len() {
                    if remaining[pos].is_ascii_digit() {
                        pos += 1;
                        for _ in 0..2 {
                            if pos < remaining.len() && remaining[pos].is_ascii_digit() {
                                pos += 1;
                            }
                        }
                    } else {
                        pos += 1;
                    }
                }
            },
            b'(' => {
                depth += 1;
                pos += 1;
            },
            b')' => {
                depth -= 1;
                pos += 1;
            },
            _ => pos += 1,
        }
    }

    if depth != 0 {
        return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)));
    }

    let content = &remaining[..pos - 1];
    remaining = &remaining[pos..];
    Ok((remaining, Token::LiteralString(content)))
}

fn parse_hex_string(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    if input.len() >= 2 && input[0] == b'<' && input[1] == b'<' {
        return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag)));
    }
    delimited(
        char('<'),
        map(take_while(|c: u8| c.is_ascii_hexdigit() || c.is_ascii_whitespace()), Token::HexString),
        char('>'),
    )(input)
}

/// Decode `#xx` escapes in a name (ISO 32000-1 §7.3.5). Malformed escapes
/// (missing or non-hex digits) are preserved literally rather than rejected.
pub fn decode_name_escapes(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '#' {
            result.push(ch);
            continue;
        }
        let save: Vec<char> = chars.clone().take(2).collect();
        if save.len() == 2 {
            let hex: String = save.iter().collect();
            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                chars.next();
                chars.next();
                result.push(byte as char);
                continue;
            }
        }
        result.push('#');
    }
    result
}

fn is_name_char(c: u8) -> bool {
    !matches!(c,
        b' ' | b'\t' | b'\r' | b'\n' | 0x00 | 0x0C |
        b'/' | b'%' |
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}'
    )
}

fn parse_name(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    preceded(
        char('/'),
        map(take_while(is_name_char), |bytes: &[u8]| {
            let raw = std::str::from_utf8(bytes).unwrap_or("");
            Token::Name(decode_name_escapes(raw))
        }),
    )(input)
}

fn is_keyword_char(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'*' || c == b'\'' || c == b'"'
}

fn parse_keyword_or_operator(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    alt((
        value(Token::False, tag(b"false")),
        value(Token::True, tag(b"true")),
        value(Token::Null, tag(b"null")),
        value(Token::ObjEnd, tag(b"endobj")),
        value(Token::ObjStart, tag(b"obj")),
        value(Token::StreamEnd, tag(b"endstream")),
        value(Token::StreamStart, tag(b"stream")),
        value(Token::R, nom::combinator::complete(nom::sequence::terminated(
            tag(b"R"),
            nom::combinator::peek(nom::combinator::not(nom::bytes::complete::take_while1(
                |c: u8| c.is_ascii_alphanumeric(),
            ))),
        ))),
        map(take_while(is_keyword_char), |bytes: &[u8]| {
            Token::Keyword(std::str::from_utf8(bytes).unwrap_or(""))
        }),
    ))(input)
}

fn parse_delimiter(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    alt((
        value(Token::DictStart, tag(b"<<")),
        value(Token::DictEnd, tag(b">>")),
        value(Token::ArrayStart, tag(b"[")),
        value(Token::ArrayEnd, tag(b"]")),
    ))(input)
}

/// Parse a single token. Does not skip leading whitespace; callers use
/// [`skip_ws`] first so the returned offset is accurate.
pub fn token(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    alt((parse_delimiter, parse_name, parse_number, parse_literal_string, parse_hex_string, parse_keyword_or_operator))(
        input,
    )
}

/// Tokenize starting at byte `pos` of `data`, returning `(next_pos, token)`
/// or `None` at end of input (after skipping trailing whitespace/comments).
/// Restartable: called again at the returned `next_pos` it resumes exactly
/// where it left off, with no hidden state (§8 invariant 1).
pub fn next_token(data: &[u8], pos: usize) -> crate::error::Result<Option<(usize, Token<'_>)>> {
    let input = &data[pos..];
    let skipped = skip_ws(input);
    if skipped.is_empty() {
        return Ok(None);
    }
    let start = pos + (input.len() - skipped.len());
    match token(skipped) {
        Ok((rest, tok)) => Ok(Some((pos + (input.len() - rest.len()), tok))),
        Err(_) => Err(crate::error::Error::lex(start, "unrecognized token")),
    }
}

/// Skip up to 4 KiB of junk bytes looking for the `%PDF-` header, returning
/// the offset the header starts at (0 if found immediately). Per §4.1 and
/// the boundary behavior in §8, a PDF with junk before the header still
/// opens as long as the header appears within the first 4 KiB.
pub fn find_pdf_header(data: &[u8]) -> Option<usize> {
    const MAX_SCAN: usize = 4096;
    let limit = data.len().min(MAX_SCAN);
    data[..limit].windows(5).position(|w| w == b"%PDF-")
}
