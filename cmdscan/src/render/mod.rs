//! Renderer module: trait-based output format dispatch.

pub mod cpp;
pub mod json;

use anyhow::{anyhow, Result};
use cmdscan_syntax::FunctionDecl;

use crate::settings::Settings;

/// Everything a renderer sees: the run settings and the commands in scan
/// order.
pub struct Context<'a> {
    pub settings: &'a Settings,
    pub functions: &'a [FunctionDecl],
}

pub trait Renderer {
    fn render(&self, ctx: &Context) -> Result<String>;
    fn name(&self) -> &str;
}

pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "cpp" | "c++" => Ok(Box::new(cpp::CppRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use cpp or json", format)),
    }
}

/// Identifier of the generated wrapper: the prefix plus the function name,
/// with `::` flattened to `__`.
pub fn wrapper_name(prefix: &str, decl: &FunctionDecl) -> String {
    format!("{}{}", prefix, decl.name().replace("::", "__"))
}
