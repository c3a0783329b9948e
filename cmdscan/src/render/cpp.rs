//! C++ renderer: declarations, one wrapper per command and the initializer
//! that fills a `Function_Map`.

use anyhow::Result;
use cmdscan_syntax::{Argument, FunctionDecl, Value, ValueType};

use crate::render::{wrapper_name, Context, Renderer};
use crate::settings::Settings;
use crate::source::display_path;

pub struct CppRenderer;

impl Renderer for CppRenderer {
    fn render(&self, ctx: &Context) -> Result<String> {
        let mut w = CodeWriter::default();
        write_banner(&mut w, ctx.settings);
        write_declarations(&mut w, ctx.functions);
        for decl in ctx.functions {
            write_wrapper(&mut w, decl, &ctx.settings.wrapper_prefix);
        }
        write_initializer(&mut w, ctx);
        Ok(w.finish())
    }

    fn name(&self) -> &str {
        "cpp"
    }
}

/// Line-oriented output with brace-driven indentation.
#[derive(Default)]
struct CodeWriter {
    out: String,
    depth: usize,
}

impl CodeWriter {
    fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str("    ");
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// C++ string literal. Backslashes, quotes and raw line breaks are escaped;
/// the `\n` pairs that block comment notes carry pass through unchanged.
fn cpp_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'n') => {
                chars.next();
                out.push_str("\\n");
            }
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => {}
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Initializer for a default value of the matching C++ type.
fn cpp_literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("std::string({})", cpp_string(s)),
        other => other.to_literal(),
    }
}

fn cpp_value(value: &Value) -> String {
    format!("Value{{{}, {}}}", value.value_type().cpp_tag(), cpp_literal(value))
}

fn signature(decl: &FunctionDecl) -> String {
    let params: Vec<String> = decl
        .arguments()
        .iter()
        .map(|a| format!("{} {}", a.value_type.cpp_type(), a.name))
        .collect();
    format!(
        "{} {}({})",
        decl.return_type().cpp_type(),
        decl.name(),
        params.join(", ")
    )
}

fn write_banner(w: &mut CodeWriter, settings: &Settings) {
    w.line("// This file is generated by cmdscan. Do not edit it by hand.");
    w.line("//");
    w.line(&format!("//   source:        {}", settings.source));
    w.line(&format!(
        "//   destination:   {}",
        display_path(&settings.destination)
    ));
    w.line(&format!("//   search term:   {}", settings.search_term));
    w.line(&format!("//   init function: {}", settings.init_function_name));
    w.blank();
    w.line("#pragma once");
    w.blank();
    w.line("#include <string>");
    w.line("#include <vector>");
    w.blank();
    w.line(&format!("#include \"{}\"", settings.support_include()));
    w.blank();
}

/// Signatures without defaults. A qualified name cannot be redeclared at
/// namespace scope, so it is only listed.
fn write_declarations(w: &mut CodeWriter, functions: &[FunctionDecl]) {
    if functions.is_empty() {
        return;
    }
    w.line("// Declarations");
    for decl in functions {
        if decl.is_qualified() {
            w.line(&format!("// {}; declared by its enclosing scope", signature(decl)));
        } else {
            w.line(&format!("{};", signature(decl)));
        }
    }
    w.blank();
}

fn write_wrapper(w: &mut CodeWriter, decl: &FunctionDecl, prefix: &str) {
    let required = decl.num_required_args();

    w.line(&format!(
        "// Wrapper for '{}' from {}:{}",
        decl.name(),
        decl.file(),
        decl.line()
    ));
    w.line(&format!(
        "inline Call_Result {}(const std::vector<std::string> &args, bool call)",
        wrapper_name(prefix, decl)
    ));
    w.open();

    if required > 0 {
        w.line(&format!("if (args.size() < {required})"));
        w.open();
        w.line(&format!(
            "return Call_Result::not_enough_arguments(\"Not enough arguments for '{}'. Needed {required}, but got \" + std::to_string(args.size()), args.size());",
            decl.name()
        ));
        w.close();
        w.blank();
    }

    for (index, arg) in decl.arguments().iter().enumerate() {
        write_argument(w, index, arg);
    }

    w.line("if (!call)");
    w.open();
    w.line("return Call_Result::success();");
    w.close();
    w.blank();

    let params: Vec<String> = decl
        .arguments()
        .iter()
        .map(|a| format!("arg_{}", a.name))
        .collect();
    let call = format!("{}({})", decl.name(), params.join(", "));
    if decl.return_type() == ValueType::Void {
        w.line(&format!("{call};"));
        w.line("return Call_Result::success(Value{});");
    } else {
        w.line(&format!(
            "return Call_Result::success(Value{{{}, {call}}});",
            decl.return_type().cpp_tag()
        ));
    }

    w.close();
    w.blank();
}

/// Declare `arg_<name>` and fill it from `args[index]` when supplied.
fn write_argument(w: &mut CodeWriter, index: usize, arg: &Argument) {
    let var = format!("arg_{}", arg.name);
    let cpp_type = arg.value_type.cpp_type();

    match &arg.default_value {
        Some(default) => {
            w.line(&format!("// Argument {index} '{}', optional", arg.name));
            w.line(&format!("{cpp_type} {var} = {};", cpp_literal(default)));
        }
        None => {
            w.line(&format!("// Argument {index} '{}'", arg.name));
        }
    }

    if arg.value_type == ValueType::String {
        match arg.default_value {
            Some(_) => {
                w.line(&format!("if (args.size() > {index})"));
                w.open();
                w.line(&format!("{var} = args[{index}];"));
                w.close();
            }
            None => w.line(&format!("{cpp_type} {var} = args[{index}];")),
        }
        w.blank();
        return;
    }

    let condition = match arg.default_value {
        Some(_) => format!("args.size() > {index} && !get_{}(args[{index}], {var})", arg.value_type.readable_name()),
        None => {
            w.line(&format!("{cpp_type} {var}{{}};"));
            format!("!get_{}(args[{index}], {var})", arg.value_type.readable_name())
        }
    };
    w.line(&format!("if ({condition})"));
    w.open();
    w.line(&format!(
        "return Call_Result::argument_parse_error(\"Failed to parse argument '{}' at index {index}. Expected {} but got '\" + args[{index}] + \"'\", {index});",
        arg.name,
        arg.value_type.readable_name()
    ));
    w.close();
    w.blank();
}

fn write_initializer(w: &mut CodeWriter, ctx: &Context) {
    let settings = ctx.settings;
    w.line(&format!(
        "inline void {}(Function_Map &out_functions)",
        settings.init_function_name
    ));
    w.open();
    if ctx.functions.is_empty() {
        w.line("(void)out_functions;");
    }
    for decl in ctx.functions {
        w.line(&format!(
            "out_functions[{}] = Function_Decl(",
            cpp_string(decl.name())
        ));
        w.depth += 1;
        w.line(&format!(
            "{}, {}, &{}, {}, {},",
            cpp_string(decl.file()),
            decl.line(),
            wrapper_name(&settings.wrapper_prefix, decl),
            cpp_string(decl.name()),
            decl.return_type().cpp_tag()
        ));
        if decl.arguments().is_empty() {
            w.line("{},");
        } else {
            w.open();
            for arg in decl.arguments() {
                let note = cpp_string(arg.note.as_deref().unwrap_or(""));
                let entry = match &arg.default_value {
                    Some(default) => format!(
                        "Argument({}, {}, {note}, {}),",
                        cpp_string(&arg.name),
                        arg.value_type.cpp_tag(),
                        cpp_value(default)
                    ),
                    None => format!(
                        "Argument({}, {}, {note}),",
                        cpp_string(&arg.name),
                        arg.value_type.cpp_tag()
                    ),
                };
                w.line(&entry);
            }
            w.depth -= 1;
            w.line("},");
        }
        w.line(&format!(
            "{}, {}, {});",
            decl.num_required_args(),
            decl.num_optional_args(),
            cpp_string(decl.note().unwrap_or(""))
        ));
        w.depth -= 1;
    }
    w.close();
}
