//! Static text for `--extensions` and `--example`.

use crate::source::SCANNED_EXTENSIONS;

pub fn extensions_text() -> String {
    let mut out = String::from("Extensions scanned when the source is a directory:\n");
    for ext in SCANNED_EXTENSIONS {
        out.push_str(&format!("  .{ext}\n"));
    }
    out.push_str("A source given as a single file is scanned whatever its extension.\n");
    out
}

pub const EXAMPLE: &str = r#"Mark functions with a search term on the line before the declaration.
The term must be defined as an empty macro so the code still compiles:

    #define CONSOLE_COMMAND

    CONSOLE_COMMAND // Adds two numbers.
    int add(int a, int b = 2 /* defaults to 2 */)
    {
        return a + b;
    }

Then generate the dispatcher and its support header:

    cmdscan --support-header generated/cmdscan.hpp \
        src generated/commands.hpp CONSOLE_COMMAND init_commands command_

Include generated/commands.hpp in one place, fill a Function_Map with
init_commands(map), then for each command line call the wrapper once with
call = false to check the arguments and again with call = true to run it.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_extension() {
        let text = extensions_text();
        for ext in SCANNED_EXTENSIONS {
            assert!(text.contains(&format!(".{ext}\n")));
        }
    }
}
