use eyre::Result;
use tabula_codegen::pipeline::PostRenderHook;

const BANNER: &[&str] = &[
    "// @generated",
    "// This file is automatically generated by Tabula. Do not edit manually.",
];

/// Prepends a "generated, do not edit" banner to every file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkAsGenerated;

impl PostRenderHook for MarkAsGenerated {
    fn name(&self) -> &'static str {
        "mark-as-generated"
    }

    fn apply(&self, _path: &str, lines: Vec<String>) -> Result<Vec<String>> {
        if lines.first().map(String::as_str) == Some(BANNER[0]) {
            return Ok(lines);
        }

        let mut marked: Vec<String> = BANNER.iter().map(|l| l.to_string()).collect();
        marked.push(String::new());
        marked.extend(lines);
        Ok(marked)
    }
}
