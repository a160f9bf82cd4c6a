//! Python comment lexer
//!
//! A logos tokenizer for enough of Python's lexical grammar to tell comments
//! apart from `#` characters inside string literals: comments, short and
//! triple-quoted strings with their prefixes, names, numbers, operators,
//! brackets, line continuations and newlines. Bracket nesting, the indentation
//! of logical lines and a trailing backslash continuation are checked so a
//! truncated or mis-indented file is reported instead of silently accepted.
//!
//! Known gap: PEP 701 f-strings that reuse their own quote character inside a
//! replacement field are not supported.

use logos::{Lexer, Logos};

use crate::shoebill::comments::location::SourceLocation;
use crate::shoebill::comments::{CommentLexer, CommentSpan};
use crate::shoebill::error::{TokenizationError, TokenizationErrorKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexicalError {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
}

/// Python tokens relevant to comment extraction
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(error = LexicalError)]
pub enum PyToken {
    #[regex(r"#[^\r\n]*")]
    Comment,

    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?'''"#, long_string)]
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?""""#, long_string)]
    LongString,

    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?'"#, short_string)]
    #[regex(r#"([rRuUfFbB]|[bB][rR]|[rR][bB]|[fF][rR]|[rR][fF])?""#, short_string)]
    String,

    #[regex(r"[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*")]
    Name,

    #[regex(r"[0-9][0-9A-Za-z_.]*")]
    #[regex(r"\.[0-9][0-9A-Za-z_]*")]
    Number,

    #[regex(r"[-+*/%@&|^~<>=!.,:;]")]
    Operator,

    #[regex(r"[(\[{]")]
    OpenBracket,

    #[regex(r"[)\]}]")]
    CloseBracket,

    #[regex(r"\\\r?\n")]
    LineContinuation,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"[ \t\x0C]+")]
    Whitespace,
}

fn quote_char(lex: &Lexer<'_, PyToken>) -> char {
    lex.slice().chars().last().unwrap_or('"')
}

fn short_string(lex: &mut Lexer<'_, PyToken>) -> Result<(), LexicalError> {
    let quote = quote_char(lex);
    let rest = lex.remainder();
    let mut escaped = false;
    for (idx, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '\n' => return Err(LexicalError::UnterminatedString),
            c if c == quote => {
                lex.bump(idx + c.len_utf8());
                return Ok(());
            }
            _ => {}
        }
    }
    Err(LexicalError::UnterminatedString)
}

fn long_string(lex: &mut Lexer<'_, PyToken>) -> Result<(), LexicalError> {
    let closing = quote_char(lex).to_string().repeat(3);
    let rest = lex.remainder();
    let mut escaped = false;
    for (idx, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if rest[idx..].starts_with(&closing) {
            lex.bump(idx + closing.len());
            return Ok(());
        }
    }
    Err(LexicalError::UnterminatedString)
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Indentation width of a line prefix; tabs advance to the next multiple of eight.
fn indent_width(prefix: &str) -> usize {
    prefix.chars().fold(0, |width, ch| match ch {
        '\t' => (width / 8 + 1) * 8,
        '\x0C' => 0,
        _ => width + 1,
    })
}

/// Push an indent or unwind to a matching outer level. `false` if none matches.
fn enter_level(indents: &mut Vec<usize>, width: usize) -> bool {
    if indents.last().is_some_and(|&level| width > level) {
        indents.push(width);
        return true;
    }
    while indents.last().is_some_and(|&level| level > width) {
        indents.pop();
    }
    indents.last() == Some(&width)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonComments;

impl CommentLexer for PythonComments {
    fn introducer(&self) -> &str {
        "#"
    }

    fn comment_spans(&self, source: &str) -> Result<Vec<CommentSpan>, TokenizationError> {
        let location = SourceLocation::new(source);
        let mut open_brackets: Vec<(char, usize)> = Vec::new();
        let mut indents: Vec<usize> = vec![0];
        let mut logical_line_start = true;
        let mut pending_continuation: Option<usize> = None;
        let mut comments = Vec::new();
        let mut lexer = PyToken::lexer(source);

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let token = match result {
                Ok(token) => token,
                Err(LexicalError::UnterminatedString) => {
                    return Err(
                        location.error_at(span.start, TokenizationErrorKind::UnterminatedString)
                    )
                }
                Err(LexicalError::UnexpectedCharacter) => {
                    let found = source[span.start..].chars().next().unwrap_or('\u{fffd}');
                    return Err(location.error_at(
                        span.start,
                        TokenizationErrorKind::UnexpectedCharacter(found),
                    ));
                }
            };

            match token {
                PyToken::Comment => comments.push(CommentSpan {
                    line: location.byte_to_position(span.start).line + 1,
                    at_line_start: location.is_line_start(span.start),
                    range: span,
                }),
                PyToken::Whitespace => {}
                PyToken::Newline => {
                    pending_continuation = None;
                    if open_brackets.is_empty() {
                        logical_line_start = true;
                    }
                }
                PyToken::LineContinuation => pending_continuation = Some(span.start),
                _ => {
                    pending_continuation = None;
                    if logical_line_start {
                        logical_line_start = false;
                        let line_start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
                        let width = indent_width(&source[line_start..span.start]);
                        if !enter_level(&mut indents, width) {
                            return Err(location
                                .error_at(span.start, TokenizationErrorKind::InconsistentDedent));
                        }
                    }
                    match token {
                        PyToken::OpenBracket => {
                            let open = lexer.slice().chars().next().unwrap_or('(');
                            open_brackets.push((open, span.start));
                        }
                        PyToken::CloseBracket => {
                            let close = lexer.slice().chars().next().unwrap_or(')');
                            match open_brackets.pop() {
                                Some((open, _)) if closing_for(open) == close => {}
                                _ => {
                                    return Err(location.error_at(
                                        span.start,
                                        TokenizationErrorKind::UnmatchedBracket(close),
                                    ))
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if let Some((open, offset)) = open_brackets.pop() {
            return Err(location.error_at(offset, TokenizationErrorKind::UnclosedBracket(open)));
        }
        if let Some(offset) = pending_continuation {
            return Err(location.error_at(offset, TokenizationErrorKind::DanglingContinuation));
        }

        Ok(comments)
    }
}
