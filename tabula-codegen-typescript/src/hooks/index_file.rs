use std::collections::HashMap;

use eyre::Result;
use tabula_codegen::{
    ir::{Declaration, ExportAs, Output},
    pipeline::{GenerationContext, PreRenderHook},
};

use tabula_core::to_pascal_case;

use crate::{ast::Export, import_generator::relative_location};

/// Output path of the generated index.
pub const INDEX_PATH: &str = "index";

/// Adds an `index` file re-exporting every named declaration.
///
/// Default exports are re-exported under their declaration name. A name
/// declared in more than one path is re-exported from each under an alias
/// prefixed with its schema (`PublicUsers`, `AuthUsers`).
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexFile;

impl PreRenderHook for IndexFile {
    fn name(&self) -> &'static str {
        "index-file"
    }

    fn apply(&self, mut output: Output, _ctx: &GenerationContext<'_>) -> Result<Output> {
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for (path, declarations) in output.iter().filter(|(path, _)| *path != INDEX_PATH) {
            for name in exported(declarations).map(|(name, _)| name) {
                *occurrences.entry(name).or_default() += 1;
            }
        }

        let lines: Vec<String> = output
            .iter()
            .filter(|(path, _)| *path != INDEX_PATH)
            .filter_map(|(path, declarations)| {
                re_export(path, declarations, |name| occurrences[name] > 1)
            })
            .collect();

        if !lines.is_empty() {
            output.push(
                INDEX_PATH,
                Declaration::Generic {
                    comment: Vec::new(),
                    lines,
                    imports: Vec::new(),
                },
            );
        }
        Ok(output)
    }
}

fn exported(declarations: &[Declaration]) -> impl Iterator<Item = (&str, ExportAs)> {
    declarations
        .iter()
        .filter_map(|d| Some((d.name()?, d.export_as()?)))
}

fn re_export(
    path: &str,
    declarations: &[Declaration],
    is_shared: impl Fn(&str) -> bool,
) -> Option<String> {
    let schema = path.split('/').next().unwrap_or(path);
    let mut export = Export::new().from(relative_location(INDEX_PATH, path));
    let mut any = false;

    for (name, export_as) in exported(declarations) {
        let alias = if is_shared(name) {
            format!("{}{}", to_pascal_case(schema), name)
        } else {
            name.to_string()
        };
        export = match export_as {
            ExportAs::Default => export.named_as("default", alias),
            ExportAs::Named if alias != name => export.named_as(name, alias),
            ExportAs::Named => export.named(name),
        };
        any = true;
    }

    if declarations.iter().all(Declaration::is_type_only) {
        export = export.type_only();
    }
    if any { export.to_line() } else { None }
}
