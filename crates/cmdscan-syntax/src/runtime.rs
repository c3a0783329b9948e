//! In-process command table: the Rust counterpart of the generated C++
//! dispatcher.
//!
//! A call is split in two. [`Command::validate`] checks arity and converts
//! every raw string argument, with no side effects. [`Command::invoke`] runs
//! the handler on arguments that already passed validation.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::lexer::get_string;
use crate::model::FunctionDecl;
use crate::value::{Value, ValueType};

pub type Handler = Box<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// Status codes shared with the generated `Call_Result_Status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Success,
    NotEnoughArguments,
    ArgumentParseError,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    #[error("not enough arguments for '{command}'. Needed {required}, but got {supplied}")]
    NotEnoughArguments {
        command: String,
        required: usize,
        supplied: usize,
    },

    #[error("failed to parse argument '{name}' at index {index}. Expected {expected} but got '{got}'")]
    ArgumentParse {
        command: String,
        index: usize,
        name: String,
        expected: ValueType,
        got: String,
    },
}

impl CallError {
    pub fn status(&self) -> CallStatus {
        match self {
            CallError::NotEnoughArguments { .. } => CallStatus::NotEnoughArguments,
            CallError::ArgumentParse { .. } => CallStatus::ArgumentParseError,
        }
    }

    /// Supplied argument count for arity failures, failing index otherwise.
    pub fn context(&self) -> usize {
        match *self {
            CallError::NotEnoughArguments { supplied, .. } => supplied,
            CallError::ArgumentParse { index, .. } => index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("empty command line")]
    EmptyLine,

    #[error("unterminated quote in command line")]
    UnterminatedQuote,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error(transparent)]
    Call(#[from] CallError),
}

/// Typed arguments, one per declared parameter, defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedArgs {
    values: Vec<Value>,
}

impl ParsedArgs {
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

pub struct Command {
    decl: FunctionDecl,
    handler: Handler,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("decl", &self.decl).finish_non_exhaustive()
    }
}

impl Command {
    pub fn new<F>(decl: FunctionDecl, handler: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            decl,
            handler: Box::new(handler),
        }
    }

    pub fn decl(&self) -> &FunctionDecl {
        &self.decl
    }

    /// Check arity and convert each supplied argument with the strict
    /// scanners. Missing trailing arguments take their defaults; surplus
    /// arguments are ignored. Strings are never rejected.
    pub fn validate(&self, raw: &[&str]) -> Result<ParsedArgs, CallError> {
        let required = self.decl.num_required_args();
        let not_enough = || CallError::NotEnoughArguments {
            command: self.decl.name().to_string(),
            required,
            supplied: raw.len(),
        };
        if raw.len() < required {
            return Err(not_enough());
        }

        let mut values = Vec::with_capacity(self.decl.arguments().len());
        for (index, arg) in self.decl.arguments().iter().enumerate() {
            let value = match (raw.get(index), &arg.default_value) {
                (Some(text), _) => Value::parse_raw(arg.value_type, text).ok_or_else(|| {
                    CallError::ArgumentParse {
                        command: self.decl.name().to_string(),
                        index,
                        name: arg.name.clone(),
                        expected: arg.value_type,
                        got: text.to_string(),
                    }
                })?,
                (None, Some(default)) => default.clone(),
                (None, None) => return Err(not_enough()),
            };
            values.push(value);
        }
        Ok(ParsedArgs { values })
    }

    /// Run the handler. A `void` command always yields [`Value::Void`].
    pub fn invoke(&self, args: ParsedArgs) -> Value {
        let result = (self.handler)(&args.values);
        if self.decl.return_type() == ValueType::Void {
            Value::Void
        } else {
            result
        }
    }
}

/// Commands keyed by name, iterated in name order.
#[derive(Debug, Default)]
pub struct Registry {
    commands: BTreeMap<String, Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command, returning the one it replaced under the same name.
    pub fn register<F>(&mut self, decl: FunctionDecl, handler: F) -> Option<Command>
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        let name = decl.name().to_string();
        self.commands.insert(name, Command::new(decl, handler))
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Validate then invoke `name` with raw arguments.
    pub fn call(&self, name: &str, raw: &[&str]) -> Result<Value, DispatchError> {
        let command = self
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
        let args = command.validate(raw)?;
        Ok(command.invoke(args))
    }

    /// Split `line` into words (double quotes group words) and call the
    /// command named by the first one.
    pub fn call_line(&self, line: &str) -> Result<Value, DispatchError> {
        let words = split_line(line)?;
        let (name, raw) = words.split_first().ok_or(DispatchError::EmptyLine)?;
        self.call(name, raw)
    }
}

/// Break a command line into bare words and quoted strings.
pub fn split_line(line: &str) -> Result<Vec<&str>, DispatchError> {
    let mut words = Vec::new();
    let mut rest = line.trim_start();
    while !rest.is_empty() {
        let (word, len) = get_string(rest).ok_or(DispatchError::UnterminatedQuote)?;
        words.push(word);
        rest = rest[len..].trim_start();
    }
    Ok(words)
}
