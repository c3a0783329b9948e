//! Recognizing the search term and importing the declaration that follows it.

use regex::Regex;
use std::sync::LazyLock;

use crate::args::get_arguments;
use crate::error::{snippet, ParseError};
use crate::lexer::{get_comment, get_symbol, skip_whitespace};
use crate::model::FunctionDecl;
use crate::value::{get_type, ValueType};

static RE_FUNCTION_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(?:::[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
});

/// True when `line` starts with `tag` followed by whitespace or a comment.
/// `CONSOLE_COMMAND_2` does not match `CONSOLE_COMMAND`, and neither does a
/// bare tag at the very end of input.
pub fn matches_search_term(line: &str, tag: &str) -> bool {
    let Some(rest) = line.strip_prefix(tag) else {
        return false;
    };
    match rest.as_bytes().first() {
        Some(b) if b.is_ascii_whitespace() => true,
        Some(b'/') => rest.starts_with("//") || rest.starts_with("/*"),
        _ => false,
    }
}

/// Where the parser is in the run of tags and comments between the search
/// term and the return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stacking {
    /// Expecting another tag, a comment, or the start of the declaration.
    SeekingTag,
    /// The cursor is on a comment.
    HaveComment,
    /// The cursor is on `inline` or the return type.
    Done,
}

/// Import the declaration that follows `tag` at the start of `src`.
///
/// The first comment after the search term (on the same line or the lines
/// right after it) becomes the function's note. Other tags may be stacked
/// between the search term and the declaration; their comments are
/// discarded. Returns the declaration, unlocated, and the bytes consumed
/// through the closing `)`.
pub fn import_function(src: &str, tag: &str) -> Result<(FunctionDecl, usize), ParseError> {
    let mut pos = skip_whitespace(src);
    if src[pos..].starts_with(tag) {
        pos += tag.len();
    }

    let mut note = None;
    let mut other_tags = 0usize;
    let mut state = Stacking::SeekingTag;
    while state != Stacking::Done {
        pos += skip_whitespace(&src[pos..]);
        let rest = &src[pos..];
        state = match state {
            Stacking::SeekingTag if rest.starts_with("//") || rest.starts_with("/*") => {
                Stacking::HaveComment
            }
            Stacking::SeekingTag => {
                let len = get_symbol(rest);
                let word = &rest[..len];
                if len == 0 {
                    return Err(ParseError::MissingReturnType(snippet(rest)));
                }
                if word == "inline" || ValueType::from_spelling(word) != ValueType::Unknown {
                    Stacking::Done
                } else {
                    tracing::trace!(tag = word, "skipping stacked tag");
                    other_tags += 1;
                    pos += len;
                    Stacking::SeekingTag
                }
            }
            Stacking::HaveComment => {
                let (text, len) = get_comment(rest).ok_or(ParseError::UnterminatedComment)?;
                pos += len;
                if other_tags == 0 && note.is_none() {
                    note = Some(text);
                }
                Stacking::SeekingTag
            }
            Stacking::Done => Stacking::Done,
        };
    }

    let inline_len = get_symbol(&src[pos..]);
    if &src[pos..pos + inline_len] == "inline" {
        pos += inline_len;
        pos += skip_whitespace(&src[pos..]);
    }

    let (return_type, type_len) = get_type(&src[pos..]);
    if type_len == 0 || return_type == ValueType::Unknown {
        return Err(ParseError::MissingReturnType(snippet(&src[pos..])));
    }
    pos += type_len;

    let gap = skip_whitespace(&src[pos..]);
    let name_len = get_symbol(&src[pos + gap..]);
    if gap == 0 || name_len == 0 {
        return Err(ParseError::MissingFunctionName(snippet(&src[pos + gap..])));
    }
    let name = &src[pos + gap..pos + gap + name_len];
    if !RE_FUNCTION_NAME.is_match(name) {
        return Err(ParseError::InvalidFunctionName(name.to_string()));
    }
    pos += gap + name_len;

    let (arguments, args_len) = get_arguments(&src[pos..])?;
    pos += args_len;

    let decl = FunctionDecl::new(name, return_type, arguments)?.with_note(note);
    Ok((decl, pos))
}
