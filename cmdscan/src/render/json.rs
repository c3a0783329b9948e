//! JSON renderer: the scanned command table for tooling.
//!
//! Same information the C++ initializer registers, plus the run settings.

use anyhow::{Context as _, Result};
use cmdscan_syntax::FunctionDecl;
use serde::Serialize;

use crate::render::{wrapper_name, Context, Renderer};
use crate::source::display_path;

pub struct JsonRenderer;

#[derive(Serialize)]
struct Manifest<'a> {
    generator: Generator<'a>,
    functions: Vec<Entry<'a>>,
}

#[derive(Serialize)]
struct Generator<'a> {
    source: &'a str,
    destination: String,
    search_term: &'a str,
    init_function: &'a str,
    wrapper_prefix: &'a str,
}

#[derive(Serialize)]
struct Entry<'a> {
    wrapper: String,
    usage: String,
    #[serde(flatten)]
    decl: &'a FunctionDecl,
}

impl Renderer for JsonRenderer {
    fn render(&self, ctx: &Context) -> Result<String> {
        let settings = ctx.settings;
        let manifest = Manifest {
            generator: Generator {
                source: &settings.source,
                destination: display_path(&settings.destination),
                search_term: &settings.search_term,
                init_function: &settings.init_function_name,
                wrapper_prefix: &settings.wrapper_prefix,
            },
            functions: ctx
                .functions
                .iter()
                .map(|decl| Entry {
                    wrapper: wrapper_name(&settings.wrapper_prefix, decl),
                    usage: decl.usage(),
                    decl,
                })
                .collect(),
        };
        let mut out =
            serde_json::to_string_pretty(&manifest).context("failed to serialize commands")?;
        out.push('\n');
        Ok(out)
    }

    fn name(&self) -> &str {
        "json"
    }
}
