//! Renderer module: turn documentation text into a Go source file.

mod quote;

pub use quote::go_quote;

use crate::model::{DocumentText, RenderMode};

/// First line of every generated file. `go generate` and linters look for
/// this exact shape.
pub const MARKER: &str = "// Code generated by usagegen; DO NOT EDIT.";

/// Trait for rendering documentation into generated Go source.
pub trait Renderer {
    fn render(&self, doc: &DocumentText) -> String;
}

/// Package-level `const usage = "..."`.
pub struct ConstRenderer;

/// An `init` function that scopes the constant and installs `flag.Usage`.
pub struct AutoHelpRenderer;

impl Renderer for ConstRenderer {
    fn render(&self, doc: &DocumentText) -> String {
        format!(
            "{MARKER}\n\npackage main\n\nconst usage = {}\n",
            go_quote(doc.as_str())
        )
    }
}

impl Renderer for AutoHelpRenderer {
    fn render(&self, doc: &DocumentText) -> String {
        let mut out = String::new();
        out.push_str(MARKER);
        out.push_str("\n\npackage main\n\n");
        out.push_str("import (\n\t\"flag\"\n\t\"fmt\"\n\t\"os\"\n\t\"path/filepath\"\n)\n\n");
        out.push_str("func init() {\n");
        out.push_str(&format!("\tconst usage = {}\n", go_quote(doc.as_str())));
        out.push_str("\tflag.Usage = func() {\n");
        out.push_str("\t\tfmt.Fprintln(flag.CommandLine.Output(), usage)\n");
        out.push_str(
            "\t\tfmt.Fprintf(flag.CommandLine.Output(), \"Usage of %s:\\n\", filepath.Base(os.Args[0]))\n",
        );
        out.push_str("\t\tflag.PrintDefaults()\n");
        out.push_str("\t}\n}\n");
        out
    }
}

/// Create the renderer for the given mode.
pub fn create_renderer(mode: RenderMode) -> Box<dyn Renderer> {
    match mode {
        RenderMode::Plain => Box::new(ConstRenderer),
        RenderMode::AutoHelp => Box::new(AutoHelpRenderer),
    }
}

/// Render `doc` through the template selected by `mode`.
pub fn render(doc: &DocumentText, mode: RenderMode) -> String {
    create_renderer(mode).render(doc)
}
