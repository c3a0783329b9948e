//! Value types supported by generated commands and their renderings.

use std::fmt;

use serde::Serialize;

use crate::lexer;

/// The closed set of types a command can take or return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Unknown,
    Void,
    String,
    Integer,
    Float,
    Double,
    Boolean,
}

/// Every rendering of a type, kept in one table so they cannot drift apart.
struct TypeSpec {
    /// Declaration spelling, also used in generated signatures.
    cpp_type: &'static str,
    /// Human name, also the suffix of the C++ `get_*` scanner.
    readable: &'static str,
    /// Enumerator in the generated `Value_Type` enum.
    tag: &'static str,
}

impl ValueType {
    pub const ALL: [ValueType; 7] = [
        ValueType::Unknown,
        ValueType::Void,
        ValueType::String,
        ValueType::Integer,
        ValueType::Float,
        ValueType::Double,
        ValueType::Boolean,
    ];

    const fn spec(self) -> TypeSpec {
        let (cpp_type, readable, tag) = match self {
            ValueType::Unknown => ("", "unknown", "Value_Type::UNKNOWN"),
            ValueType::Void => ("void", "void", "Value_Type::VOID"),
            ValueType::String => ("std::string", "string", "Value_Type::STRING"),
            ValueType::Integer => ("int", "int", "Value_Type::INTEGER"),
            ValueType::Float => ("float", "float", "Value_Type::FLOAT"),
            ValueType::Double => ("double", "double", "Value_Type::DOUBLE"),
            ValueType::Boolean => ("bool", "bool", "Value_Type::BOOLEAN"),
        };
        TypeSpec {
            cpp_type,
            readable,
            tag,
        }
    }

    pub fn cpp_type(self) -> &'static str {
        self.spec().cpp_type
    }

    pub fn readable_name(self) -> &'static str {
        self.spec().readable
    }

    pub fn cpp_tag(self) -> &'static str {
        self.spec().tag
    }

    /// Map a declaration spelling to its type. Anything outside the table is
    /// `Unknown`.
    pub fn from_spelling(spelling: &str) -> ValueType {
        Self::ALL
            .into_iter()
            .find(|t| !t.cpp_type().is_empty() && t.cpp_type() == spelling)
            .unwrap_or(ValueType::Unknown)
    }

    /// Types that can carry a value (arguments and defaults).
    pub fn holds_value(self) -> bool {
        !matches!(self, ValueType::Unknown | ValueType::Void)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.readable_name())
    }
}

/// Read one symbol at `src` and classify it. The length is 0 when no symbol
/// starts there; an unrecognized symbol still reports its length.
pub fn get_type(src: &str) -> (ValueType, usize) {
    let len = lexer::get_symbol(src);
    (ValueType::from_spelling(&src[..len]), len)
}

/// A typed value. The tag is the variant, so the payload always matches it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Void,
    String(String),
    Integer(i32),
    Float(f32),
    Double(f64),
    Boolean(bool),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Void => ValueType::Void,
            Value::String(_) => ValueType::String,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match *self {
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// C++ initializer for this value: `42`, `2.1f`, `2.1`, `true`, `"text"`.
    ///
    /// Floating values use the shortest representation that parses back to
    /// the same bits and always carry a decimal point.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Void => String::new(),
            Value::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => format!("{}f", with_decimal_point(v.to_string())),
            Value::Double(v) => with_decimal_point(v.to_string()),
            Value::Boolean(v) => v.to_string(),
        }
    }

    /// Parse a raw command-line argument. The scanner must consume the whole
    /// bare word; strings are taken verbatim.
    pub fn parse_raw(value_type: ValueType, text: &str) -> Option<Value> {
        match value_type {
            ValueType::String => Some(Value::String(text.to_string())),
            ValueType::Integer => lexer::exact_int(text).map(Value::Integer),
            ValueType::Float => lexer::exact_float(text).map(Value::Float),
            ValueType::Double => lexer::exact_double(text).map(Value::Double),
            ValueType::Boolean => lexer::exact_bool(text).map(Value::Boolean),
            ValueType::Void | ValueType::Unknown => None,
        }
    }

    /// Scan a literal of `value_type` at the start of `src`, as written in a
    /// declaration's default. Strings must be quoted.
    pub fn parse_literal(value_type: ValueType, src: &str) -> Option<(Value, usize)> {
        match value_type {
            ValueType::String => lexer::get_quoted_string(src)
                .map(|(s, len)| (Value::String(s.to_string()), len)),
            ValueType::Integer => lexer::get_int(src).map(|(v, len)| (Value::Integer(v), len)),
            ValueType::Float => lexer::get_float(src).map(|(v, len)| (Value::Float(v), len)),
            ValueType::Double => lexer::get_double(src).map(|(v, len)| (Value::Double(v), len)),
            ValueType::Boolean => lexer::get_bool(src).map(|(v, len)| (Value::Boolean(v), len)),
            ValueType::Void | ValueType::Unknown => None,
        }
    }
}

fn with_decimal_point(mut text: String) -> String {
    if text.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        text.push_str(".0");
    }
    text
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Void => f.write_str("void"),
            Value::String(s) => f.write_str(s),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Void
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spellings_map_through_one_table() {
        assert_eq!(ValueType::from_spelling("int"), ValueType::Integer);
        assert_eq!(ValueType::from_spelling("std::string"), ValueType::String);
        assert_eq!(ValueType::from_spelling("void"), ValueType::Void);
        assert_eq!(ValueType::from_spelling("string"), ValueType::Unknown);
        assert_eq!(ValueType::from_spelling(""), ValueType::Unknown);
        assert_eq!(ValueType::from_spelling("long"), ValueType::Unknown);
    }

    #[test]
    fn renderings() {
        assert_eq!(ValueType::String.cpp_type(), "std::string");
        assert_eq!(ValueType::String.readable_name(), "string");
        assert_eq!(ValueType::String.cpp_tag(), "Value_Type::STRING");
        assert_eq!(ValueType::Boolean.to_string(), "bool");
    }

    #[test]
    fn every_spelling_round_trips() {
        for t in ValueType::ALL.into_iter().filter(|t| *t != ValueType::Unknown) {
            assert_eq!(ValueType::from_spelling(t.cpp_type()), t);
        }
    }

    #[test]
    fn get_type_reads_one_symbol() {
        assert_eq!(get_type("std::string name"), (ValueType::String, 11));
        assert_eq!(get_type("Widget w"), (ValueType::Unknown, 6));
        assert_eq!(get_type("(x"), (ValueType::Unknown, 0));
    }

    #[test]
    fn literals() {
        assert_eq!(Value::Integer(-4).to_literal(), "-4");
        assert_eq!(Value::Float(2.0).to_literal(), "2.0f");
        assert_eq!(Value::Float(2.1).to_literal(), "2.1f");
        assert_eq!(Value::Double(2.1).to_literal(), "2.1");
        assert_eq!(Value::Double(-3.0).to_literal(), "-3.0");
        assert_eq!(Value::Boolean(true).to_literal(), "true");
        assert_eq!(Value::from("say \"hi\"").to_literal(), r#""say \"hi\"""#);
    }

    #[test]
    fn float_literals_reparse_exactly() {
        for v in [0.1f32, 2.1, 1.0 / 3.0, 123456.79, -0.5] {
            let literal = Value::Float(v).to_literal();
            let (parsed, len) = lexer::get_float(&literal).unwrap();
            assert_eq!(len, literal.len());
            assert_eq!(parsed.to_bits(), v.to_bits(), "{literal}");
        }
        for v in [0.1f64, 2.1, 1.0 / 3.0, 1e15 + 0.5, -7.25] {
            let literal = Value::Double(v).to_literal();
            let (parsed, len) = lexer::get_double(&literal).unwrap();
            assert_eq!(len, literal.len());
            assert_eq!(parsed.to_bits(), v.to_bits(), "{literal}");
        }
    }

    #[test]
    fn display_is_human_form() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::Void.to_string(), "void");
        assert_eq!(Value::Double(2.5).to_string(), "2.5");
    }

    #[test]
    fn raw_arguments_are_strict() {
        assert_eq!(
            Value::parse_raw(ValueType::Integer, "12"),
            Some(Value::Integer(12))
        );
        assert_eq!(Value::parse_raw(ValueType::Integer, "12abc"), None);
        assert_eq!(
            Value::parse_raw(ValueType::String, "12abc"),
            Some(Value::from("12abc"))
        );
        assert_eq!(Value::parse_raw(ValueType::Void, "x"), None);
    }

    #[test]
    fn accessors_check_the_tag() {
        let v = Value::Double(1.5);
        assert_eq!(v.as_double(), Some(1.5));
        assert_eq!(v.as_float(), None);
        assert_eq!(v.value_type(), ValueType::Double);
        assert_eq!(Value::from("x").as_str(), Some("x"));
    }
}
