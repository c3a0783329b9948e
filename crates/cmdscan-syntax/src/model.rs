//! Descriptors for imported commands.

use serde::Serialize;

use crate::error::ParseError;
use crate::value::{Value, ValueType};

/// One parameter of a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Argument {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default_value: None,
            note: None,
        }
    }

    /// The default must have the argument's own type.
    pub fn with_default(mut self, value: Value) -> Self {
        debug_assert_eq!(value.value_type(), self.value_type);
        self.default_value = Some(value);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_optional(&self) -> bool {
        self.default_value.is_some()
    }
}

/// Everything known about one tagged function.
///
/// Built with [`FunctionDecl::new`], which derives the argument counts, and
/// read through accessors afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    name: String,
    return_type: ValueType,
    arguments: Vec<Argument>,
    num_required_args: usize,
    num_optional_args: usize,
    file: String,
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

impl FunctionDecl {
    /// Fails when an argument without a default follows one with a default.
    pub fn new(
        name: impl Into<String>,
        return_type: ValueType,
        arguments: Vec<Argument>,
    ) -> Result<Self, ParseError> {
        let num_required_args = arguments.iter().take_while(|a| !a.is_optional()).count();
        if let Some(misplaced) = arguments[num_required_args..]
            .iter()
            .position(|a| !a.is_optional())
        {
            let index = num_required_args + misplaced;
            return Err(ParseError::NonTrailingDefault {
                index,
                name: arguments[index].name.clone(),
            });
        }
        let num_optional_args = arguments.len() - num_required_args;

        Ok(Self {
            name: name.into(),
            return_type,
            arguments,
            num_required_args,
            num_optional_args,
            file: String::new(),
            line: 0,
            note: None,
        })
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note.filter(|n| !n.is_empty());
        self
    }

    /// Record where the declaration was found. `line` is 1-based.
    pub fn located(mut self, file: impl Into<String>, line: usize) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> ValueType {
        self.return_type
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub fn num_required_args(&self) -> usize {
        self.num_required_args
    }

    pub fn num_optional_args(&self) -> usize {
        self.num_optional_args
    }

    /// Source file, empty when the declaration was built by hand.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// 0 when the declaration was built by hand.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Namespace- or class-qualified names contain `::`.
    pub fn is_qualified(&self) -> bool {
        self.name.contains("::")
    }

    /// One-line synopsis: `add <a : int> [b : double = 2.1] -> int`.
    pub fn usage(&self) -> String {
        let mut out = self.name.clone();
        for arg in &self.arguments {
            match &arg.default_value {
                Some(default) => out.push_str(&format!(
                    " [{} : {} = {}]",
                    arg.name,
                    arg.value_type,
                    default.to_literal()
                )),
                None => out.push_str(&format!(" <{} : {}>", arg.name, arg.value_type)),
            }
        }
        if self.return_type != ValueType::Void {
            out.push_str(&format!(" -> {}", self.return_type));
        }
        out
    }
}
