//! Lexical primitives over a `&str` cursor.
//!
//! Every scanner looks at the start of `src` and reports how many bytes it
//! consumed. `0` (or `None` for scanners that decode a value) means "no
//! match"; the caller decides whether that is fatal. All delimiters are ASCII,
//! so byte offsets always land on `char` boundaries.

/// Consume spaces, tabs, carriage returns, newlines and form feeds.
pub fn skip_whitespace(src: &str) -> usize {
    src.bytes().take_while(u8::is_ascii_whitespace).count()
}

/// `src` with leading whitespace removed.
pub fn trim_start(src: &str) -> &str {
    &src[skip_whitespace(src)..]
}

/// Consume a symbol: letters, digits, `_` and `:`.
pub fn get_symbol(src: &str) -> usize {
    src.bytes().take_while(|&b| is_symbol_byte(b)).count()
}

/// Length of the bare word at the start of `src` (up to the first whitespace).
pub fn get_word_length(src: &str) -> usize {
    src.bytes().take_while(|b| !b.is_ascii_whitespace()).count()
}

/// Decode a double-quoted string. No escape sequences; the content runs up to
/// the next `"`. Returns `None` when `src` does not open a quote or the quote
/// is never closed.
pub fn get_quoted_string(src: &str) -> Option<(&str, usize)> {
    let rest = src.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some((&rest[..end], end + 2))
}

/// A quoted string when `src` starts with `"`, otherwise a bare word.
pub fn get_string(src: &str) -> Option<(&str, usize)> {
    if src.starts_with('"') {
        return get_quoted_string(src);
    }
    match get_word_length(src) {
        0 => None,
        len => Some((&src[..len], len)),
    }
}

pub fn get_int(src: &str) -> Option<(i32, usize)> {
    let len = number_length(src, false, false);
    if len == 0 {
        return None;
    }
    src[..len].parse().ok().map(|value| (value, len))
}

/// Decimal literal with an optional trailing `f`.
pub fn get_float(src: &str) -> Option<(f32, usize)> {
    let len = number_length(src, true, true);
    if len == 0 {
        return None;
    }
    let digits = src[..len].strip_suffix('f').unwrap_or(&src[..len]);
    digits.parse().ok().map(|value| (value, len))
}

pub fn get_double(src: &str) -> Option<(f64, usize)> {
    let len = number_length(src, true, false);
    if len == 0 {
        return None;
    }
    src[..len].parse().ok().map(|value| (value, len))
}

/// `true`, `false`, `1` or `0`, not followed by another token character.
pub fn get_bool(src: &str) -> Option<(bool, usize)> {
    let (value, len) = if src.starts_with("true") {
        (true, 4)
    } else if src.starts_with("false") {
        (false, 5)
    } else if src.starts_with('1') {
        (true, 1)
    } else if src.starts_with('0') {
        (false, 1)
    } else {
        return None;
    };
    at_token_boundary(&src[len..]).then_some((value, len))
}

/// True when `rest` does not continue the literal or identifier before it.
pub fn at_token_boundary(rest: &str) -> bool {
    !rest
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}

pub fn exact_int(word: &str) -> Option<i32> {
    whole_word(word, get_int(word))
}

pub fn exact_float(word: &str) -> Option<f32> {
    whole_word(word, get_float(word))
}

pub fn exact_double(word: &str) -> Option<f64> {
    whole_word(word, get_double(word))
}

pub fn exact_bool(word: &str) -> Option<bool> {
    whole_word(word, get_bool(word))
}

/// Keep a scanned value only if it covers the entire bare word.
fn whole_word<T>(word: &str, scanned: Option<(T, usize)>) -> Option<T> {
    let (value, len) = scanned?;
    (len == get_word_length(word)).then_some(value)
}

/// Decode a comment starting at `src`.
///
/// A line comment runs to the end of the line (the newline itself is not
/// consumed) or to the end of input. A block comment runs through `*/` and is
/// `None` when unterminated; each newline inside it becomes the two
/// characters `\n` so the text can be embedded in a single-line literal. The
/// returned text is trimmed.
pub fn get_comment(src: &str) -> Option<(String, usize)> {
    if let Some(body) = src.strip_prefix("//") {
        let end = body.find('\n').unwrap_or(body.len());
        return Some((body[..end].trim().to_string(), end + 2));
    }
    let body = src.strip_prefix("/*")?;
    let end = body.find("*/")?;
    let text = body[..end]
        .trim()
        .replace("\r\n", "\n")
        .replace('\n', "\\n");
    Some((text, end + 4))
}

fn is_symbol_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b':'
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of `[+-]?digits[.digits][f]`, or 0 when no digit is present.
fn number_length(src: &str, allow_point: bool, allow_suffix: bool) -> usize {
    let bytes = src.as_bytes();
    let mut len = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));

    let whole = count_digits(&bytes[len..]);
    len += whole;

    let mut fraction = 0;
    if allow_point && bytes.get(len) == Some(&b'.') {
        fraction = count_digits(&bytes[len + 1..]);
        len += 1 + fraction;
    }
    if whole + fraction == 0 {
        return 0;
    }

    if allow_suffix && bytes.get(len) == Some(&b'f') {
        len += 1;
    }
    len
}
