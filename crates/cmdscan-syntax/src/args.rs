//! Parsing of a parenthesized argument list.

use crate::error::{snippet, ParseError};
use crate::lexer::{at_token_boundary, get_comment, get_symbol, skip_whitespace, trim_start};
use crate::model::Argument;
use crate::value::{get_type, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Comma,
    Close,
}

/// What the splitter is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Code,
    LineComment,
    BlockComment,
    Quoted,
}

/// Find the `,` or `)` that ends the argument starting at `src`. Delimiters
/// inside comments and string literals do not count.
fn delimit(src: &str) -> Result<(usize, Delimiter), ParseError> {
    let bytes = src.as_bytes();
    let mut region = Region::Code;
    let mut i = 0;
    while i < bytes.len() {
        let next = bytes.get(i + 1).copied();
        match (region, bytes[i]) {
            (Region::Code, b',') => return Ok((i, Delimiter::Comma)),
            (Region::Code, b')') => return Ok((i, Delimiter::Close)),
            (Region::Code, b'"') => region = Region::Quoted,
            (Region::Code, b'/') if next == Some(b'/') => {
                region = Region::LineComment;
                i += 1;
            }
            (Region::Code, b'/') if next == Some(b'*') => {
                region = Region::BlockComment;
                i += 1;
            }
            (Region::LineComment, b'\n') => region = Region::Code,
            (Region::BlockComment, b'*') if next == Some(b'/') => {
                region = Region::Code;
                i += 1;
            }
            (Region::Quoted, b'"') => region = Region::Code,
            _ => {}
        }
        i += 1;
    }
    Err(match region {
        Region::BlockComment => ParseError::UnterminatedComment,
        _ => ParseError::UnterminatedArguments,
    })
}

/// Parse `( arg, arg, ... )` at the start of `src` (leading whitespace
/// allowed). Returns the arguments and the bytes consumed through `)`.
///
/// `()` and `(void)` both mean no arguments.
pub fn get_arguments(src: &str) -> Result<(Vec<Argument>, usize), ParseError> {
    let open = skip_whitespace(src);
    if !src[open..].starts_with('(') {
        return Err(ParseError::MissingArgumentList(snippet(&src[open..])));
    }

    let mut pos = open + 1;
    let mut arguments: Vec<Argument> = Vec::new();
    loop {
        let (len, delimiter) = delimit(&src[pos..])?;
        let piece = &src[pos..pos + len];
        pos += len + 1;

        let (leading, piece) = split_leading_comments(piece)?;
        let mut before_next = leading.before_next;
        match arguments.last_mut() {
            Some(previous) => {
                if let Some(note) = leading.after_previous {
                    previous.note.get_or_insert(note);
                }
            }
            // Right after `(` every comment documents the first argument.
            None => before_next = leading.after_previous.or(before_next),
        }

        let bare = piece.trim_end();
        let lone_void = delimiter == Delimiter::Close && arguments.is_empty() && bare == "void";
        if !bare.is_empty() && !lone_void {
            let mut argument = get_argument(piece)?;
            if argument.note.is_none() {
                argument.note = before_next;
            }
            arguments.push(argument);
        }
        if delimiter == Delimiter::Close {
            break;
        }
    }
    Ok((arguments, pos))
}

/// Comments found in front of an argument.
#[derive(Debug, Default)]
struct LeadingComments {
    /// `int a, // count`: on the delimiter's line and closed by a line break.
    after_previous: Option<String>,
    /// Anything else, e.g. `int a, /* count of b */ int b`.
    before_next: Option<String>,
}

/// Skip comments in front of an argument, keeping the first non-empty text
/// of each kind.
fn split_leading_comments(piece: &str) -> Result<(LeadingComments, &str), ParseError> {
    let mut comments = LeadingComments::default();
    let mut rest = piece;
    let mut same_line = true;
    loop {
        let gap = skip_whitespace(rest);
        same_line &= !rest[..gap].contains('\n');
        rest = &rest[gap..];
        if !rest.starts_with("//") && !rest.starts_with("/*") {
            break;
        }

        let (text, len) = get_comment(rest).ok_or(ParseError::UnterminatedComment)?;
        rest = &rest[len..];
        let line_ends = rest[..skip_whitespace(rest)].contains('\n');
        let slot = if same_line && line_ends {
            &mut comments.after_previous
        } else {
            &mut comments.before_next
        };
        if slot.is_none() && !text.is_empty() {
            *slot = Some(text);
        }
        same_line = same_line && !line_ends;
    }
    Ok((comments, rest))
}

/// Parse one `type name [= default] [comment]` piece.
fn get_argument(piece: &str) -> Result<Argument, ParseError> {
    let rest = trim_start(piece);
    let (value_type, type_len) = get_type(rest);
    if type_len == 0 {
        return Err(ParseError::MissingArgumentType(snippet(rest)));
    }
    let spelling = &rest[..type_len];
    let rest = &rest[type_len..];

    let gap = skip_whitespace(rest);
    let name_len = get_symbol(&rest[gap..]);
    if gap == 0 || name_len == 0 {
        return Err(ParseError::MissingArgumentName(snippet(trim_start(rest))));
    }
    let name = &rest[gap..gap + name_len];
    if !value_type.holds_value() {
        return Err(ParseError::UnsupportedArgumentType {
            name: name.to_string(),
            spelling: spelling.to_string(),
        });
    }

    let mut argument = Argument::new(name, value_type);
    let mut rest = trim_start(&rest[gap + name_len..]);

    if let Some(after_eq) = rest.strip_prefix('=') {
        let literal = trim_start(after_eq);
        let (value, len) = Value::parse_literal(value_type, literal)
            .filter(|&(_, len)| at_token_boundary(&literal[len..]))
            .ok_or_else(|| ParseError::MalformedDefault {
                name: name.to_string(),
                expected: value_type.readable_name(),
                found: snippet(literal),
            })?;
        argument = argument.with_default(value);
        rest = trim_start(&literal[len..]);
    }

    if rest.starts_with('/') {
        if let Some((note, len)) = get_comment(rest) {
            if !note.is_empty() {
                argument = argument.with_note(note);
            }
            rest = trim_start(&rest[len..]);
        }
    }

    if !rest.is_empty() {
        tracing::debug!(argument = name, trailing = rest, "ignoring trailing text after argument");
    }
    Ok(argument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;

    fn parse(src: &str) -> Vec<Argument> {
        get_arguments(src).unwrap().0
    }

    #[test]
    fn empty_and_void_lists() {
        assert!(parse("()").is_empty());
        assert!(parse("(  )").is_empty());
        assert!(parse("(void)").is_empty());
        assert_eq!(get_arguments(" ();").unwrap().1, 3);
    }

    #[test]
    fn plain_arguments() {
        let (args, len) = get_arguments("(int a, std::string s) {").unwrap();
        assert_eq!(len, 22);
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "a");
        assert_eq!(args[0].value_type, ValueType::Integer);
        assert_eq!(args[1].name, "s");
        assert_eq!(args[1].value_type, ValueType::String);
        assert!(args.iter().all(|a| a.default_value.is_none() && a.note.is_none()));
    }

    #[test]
    fn defaults_of_every_type() {
        let args = parse(
            r#"(int i = -4, float f = 2.5f, double d = 2.1, bool b = true, std::string s = "a, b)")"#,
        );
        let defaults: Vec<_> = args.iter().map(|a| a.default_value.clone().unwrap()).collect();
        assert_eq!(
            defaults,
            vec![
                Value::Integer(-4),
                Value::Float(2.5),
                Value::Double(2.1),
                Value::Boolean(true),
                Value::from("a, b)"),
            ]
        );
    }

    #[test]
    fn comment_hides_delimiters() {
        let args = parse("(int a /* x, y) */, int b)");
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].note.as_deref(), Some("x, y)"));
        assert_eq!(args[1].name, "b");
    }

    #[test]
    fn line_comments_become_notes() {
        let args = parse("(int a // first\n, double b = 2.1 // B defaults to 2.1\n)");
        assert_eq!(args[0].note.as_deref(), Some("first"));
        assert_eq!(args[1].note.as_deref(), Some("B defaults to 2.1"));
        assert_eq!(args[1].default_value, Some(Value::Double(2.1)));
    }

    #[test]
    fn malformed_default() {
        let err = get_arguments("(int a = 12abc)").unwrap_err();
        assert!(matches!(err, ParseError::MalformedDefault { ref name, .. } if name == "a"));

        let err = get_arguments("(std::string s = bare)").unwrap_err();
        assert!(matches!(err, ParseError::MalformedDefault { .. }));
    }

    #[test]
    fn structural_failures() {
        assert_eq!(
            get_arguments("(int a, int b").unwrap_err(),
            ParseError::UnterminatedArguments
        );
        assert_eq!(
            get_arguments("(int a /* open").unwrap_err(),
            ParseError::UnterminatedComment
        );
        assert!(matches!(
            get_arguments("int a)").unwrap_err(),
            ParseError::MissingArgumentList(_)
        ));
        assert!(matches!(
            get_arguments("(int)").unwrap_err(),
            ParseError::MissingArgumentName(_)
        ));
        assert!(matches!(
            get_arguments("(int a, = 3)").unwrap_err(),
            ParseError::MissingArgumentType(_)
        ));
    }

    #[test]
    fn comment_after_comma_documents_previous_argument() {
        let args = parse("(\n    int a, // count\n    bool loud // shout?\n)");
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].note.as_deref(), Some("count"));
        assert_eq!(args[1].note.as_deref(), Some("shout?"));

        let args = parse("(int a, // trailing\n)");
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].note.as_deref(), Some("trailing"));

        let args = parse("(/* the base */ std::string base)");
        assert_eq!(args[0].note.as_deref(), Some("the base"));
    }

    #[test]
    fn inline_comment_after_comma_documents_next_argument() {
        let args = parse("(int a, /* count of b */ int b)");
        assert_eq!(args[0].note, None);
        assert_eq!(args[1].note.as_deref(), Some("count of b"));

        let args = parse("(int a,\n    // count of b\n    int b)");
        assert_eq!(args[0].note, None);
        assert_eq!(args[1].note.as_deref(), Some("count of b"));

        let args = parse("(int a, /* count */\n    int b)");
        assert_eq!(args[0].note.as_deref(), Some("count"));
        assert_eq!(args[1].note, None);
    }

    #[test]
    fn unsupported_types_are_rejected() {
        assert_eq!(
            get_arguments("(Widget w)").unwrap_err(),
            ParseError::UnsupportedArgumentType {
                name: "w".into(),
                spelling: "Widget".into()
            }
        );
        assert!(matches!(
            get_arguments("(void v)").unwrap_err(),
            ParseError::UnsupportedArgumentType { .. }
        ));
    }

    #[test]
    fn trailing_text_is_ignored() {
        let args = parse("(int a extra, int b)");
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].name, "a");
        assert_eq!(args[0].default_value, None);
    }
}
