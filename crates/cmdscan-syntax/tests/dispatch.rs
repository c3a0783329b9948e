use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cmdscan_syntax::args::get_arguments;
use cmdscan_syntax::decl::{import_function, matches_search_term};
use cmdscan_syntax::lexer;
use cmdscan_syntax::{scan_source, CallError, CallStatus, FunctionDecl, Registry, Value, ValueType};

const TAG: &str = "CONSOLE_COMMAND";

const CLIENT: &str = r#"#include "cmd_client.hpp"

CONSOLE_COMMAND
int add(int a, int b)
{
    return a + b;
}

CONSOLE_COMMAND // Just returns the input value
std::string just_return(std::string str = "hello")
{
    return str;
}

CONSOLE_COMMAND // Squares the second parameter.
int multiply(int a, double b = 2.1 /*    B defaults to 2.1             */)
{
    return b * b;
}

CONSOLE_COMMAND
void complex(std::string base, int num_prints, bool capitalize = false, std::string to_print = "cringe", int indents = 4)
{
}
"#;

fn declarations() -> Vec<FunctionDecl> {
    let report = scan_source(CLIENT, "cmd_client.cpp", TAG);
    assert!(report.failures.is_empty(), "{:?}", report.failures);
    report.functions
}

fn find(name: &str) -> FunctionDecl {
    declarations()
        .into_iter()
        .find(|d| d.name() == name)
        .unwrap_or_else(|| panic!("{name} was not imported"))
}

#[test]
fn argument_counts_add_up() {
    let decls = declarations();
    assert_eq!(decls.len(), 4);
    for decl in &decls {
        assert_eq!(
            decl.arguments().len(),
            decl.num_required_args() + decl.num_optional_args(),
            "{}",
            decl.name()
        );
    }
    let complex = find("complex");
    assert_eq!(complex.num_required_args(), 2);
    assert_eq!(complex.num_optional_args(), 3);
}

#[test]
fn default_literals_round_trip() {
    let defaults = [
        (ValueType::Integer, Value::Integer(-2147483648)),
        (ValueType::Integer, Value::Integer(4)),
        (ValueType::Float, Value::Float(0.1)),
        (ValueType::Float, Value::Float(3.0)),
        (ValueType::Double, Value::Double(2.1)),
        (ValueType::Double, Value::Double(1.0 / 7.0)),
        (ValueType::Boolean, Value::Boolean(false)),
        (ValueType::String, Value::from("cringe")),
    ];
    for (value_type, value) in defaults {
        let literal = value.to_literal();
        let (parsed, len) = Value::parse_literal(value_type, &literal).unwrap();
        assert_eq!(len, literal.len(), "{literal}");
        assert_eq!(parsed, value, "{literal}");
    }
}

#[test]
fn search_term_needs_a_boundary() {
    assert!(!matches_search_term("CONSOLE_COMMANDX", TAG));
    assert!(matches_search_term("CONSOLE_COMMAND int f()", TAG));
}

#[test]
fn comment_punctuation_does_not_split_arguments() {
    let (args, _) =
        get_arguments("(int a, int b /* a, (weird) comment */, bool c = true)").unwrap();
    let names: Vec<_> = args.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(args[1].note.as_deref(), Some("a, (weird) comment"));
    assert_eq!(args[2].default_value, Some(Value::Boolean(true)));
}

#[test]
fn missing_arguments_are_reported_before_the_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let mut registry = Registry::new();
    registry.register(find("add"), move |args| {
        seen.fetch_add(1, Ordering::SeqCst);
        Value::Integer(args[0].as_int().unwrap_or(0) + args[1].as_int().unwrap_or(0))
    });

    let err = registry.get("add").unwrap().validate(&[]).unwrap_err();
    assert_eq!(err.status(), CallStatus::NotEnoughArguments);
    assert_eq!(
        err,
        CallError::NotEnoughArguments {
            command: "add".into(),
            required: 2,
            supplied: 0
        }
    );
    assert_eq!(err.context(), 0);
    assert!(registry.call("add", &["1"]).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert_eq!(registry.call("add", &["2", "3"]).unwrap(), Value::Integer(5));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn string_default_is_returned() {
    let mut registry = Registry::new();
    registry.register(find("just_return"), |args| args[0].clone());

    let command = registry.get("just_return").unwrap();
    let parsed = command.validate(&[]).unwrap();
    assert_eq!(command.invoke(parsed), Value::from("hello"));
    assert_eq!(
        registry.call_line(r#"just_return "two words""#).unwrap(),
        Value::from("two words")
    );
}

#[test]
fn bad_number_is_an_argument_parse_error() {
    let multiply = find("multiply");
    assert_eq!(multiply.note(), Some("Squares the second parameter."));
    assert_eq!(
        multiply.arguments()[1].note.as_deref(),
        Some("B defaults to 2.1")
    );

    let mut registry = Registry::new();
    registry.register(multiply, |args| {
        let b = args[1].as_double().unwrap_or_default();
        Value::Integer((b * b) as i32)
    });
    let command = registry.get("multiply").unwrap();

    let err = command.validate(&["4", "not_a_number"]).unwrap_err();
    assert_eq!(err.status(), CallStatus::ArgumentParseError);
    assert_eq!(err.context(), 1);
    assert!(matches!(err, CallError::ArgumentParse { ref name, expected: ValueType::Double, .. } if name == "b"));

    assert_eq!(registry.call("multiply", &["4"]).unwrap(), Value::Integer(4));
    assert_eq!(registry.call("multiply", &["4", "3"]).unwrap(), Value::Integer(9));
}

#[test]
fn void_commands_yield_void() {
    let mut registry = Registry::new();
    registry.register(find("complex"), |_| Value::Integer(99));
    assert_eq!(
        registry.call_line("complex base 2 true").unwrap(),
        Value::Void
    );
    assert!(registry.call_line("complex base 2 maybe").is_err());
}

#[test]
fn stacked_tags_keep_the_first_note() {
    let src = "TAG_A // noteA\nTAG_B // noteB\nint f()\n";
    let (decl, len) = import_function(src, "TAG_A").unwrap();
    assert_eq!(decl.note(), Some("noteA"));
    assert_eq!(decl.name(), "f");
    assert_eq!(decl.return_type(), ValueType::Integer);
    assert_eq!(lexer::trim_start(&src[len..]), "");
}
