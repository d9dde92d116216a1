//! Generate operation - declarations from the schema snapshot.

use eyre::{Context, Result};
use tabula_codegen::pipeline::Severity;
use tabula_codegen_typescript::LanguageCodegen;
use tabula_manifest::Manifest;

use crate::reports::{GenerateReport, GenerationOutcome, PreviewFile};

/// Options for the generate operation.
pub struct GenerateOptions {
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
pub fn generate(manifest: Manifest, opts: GenerateOptions) -> Result<GenerateReport> {
    let output_dir = manifest.output.path.clone();
    let generator = super::generator(manifest)?;

    if opts.dry_run {
        let generated = generator.process()?;
        let warnings = warnings(&generated.diagnostics);
        let files = generated
            .files
            .iter()
            .map(|file| PreviewFile {
                path: file.path().to_string_lossy().into_owned(),
                content: file.content().to_string(),
            })
            .collect();
        return Ok(GenerateReport {
            output_dir,
            warnings,
            outcome: GenerationOutcome::Preview(files),
        });
    }

    let result = generator
        .generate(&output_dir)
        .wrap_err("Failed to generate declarations")?;

    Ok(GenerateReport {
        output_dir,
        warnings: warnings(&result.diagnostics),
        outcome: GenerationOutcome::Written {
            written: result.written,
            unchanged: result.unchanged.len(),
        },
    })
}

fn warnings(diagnostics: &[tabula_codegen::pipeline::Diagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .filter(|d| d.severity != Severity::Info)
        .map(super::describe)
        .collect()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const SNAPSHOT: &str = r#"{
        "entities": [
            {
                "schema": "public",
                "name": "places",
                "kind": "table",
                "properties": [
                    { "name": "name", "type": { "fullName": "pg_catalog.text" } },
                    { "name": "location", "type": { "fullName": "public.geometry" } }
                ]
            }
        ]
    }"#;

    fn project() -> (TempDir, Manifest) {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("schema.json"), SNAPSHOT).unwrap();
        std::fs::write(
            temp.path().join("tabula.toml"),
            "[connection]\nsnapshot = \"schema.json\"\n\n[output]\npath = \"models\"\n",
        )
        .unwrap();
        let manifest = Manifest::from_file(temp.path().join("tabula.toml")).unwrap();
        (temp, manifest)
    }

    #[test]
    fn test_generate_writes_files() {
        let (temp, manifest) = project();
        let report = generate(manifest, GenerateOptions { dry_run: false }).unwrap();

        let GenerationOutcome::Written { written, unchanged } = report.outcome else {
            panic!("expected written outcome");
        };
        assert_eq!(written, vec!["public/Places.ts"]);
        assert_eq!(unchanged, 0);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("public.geometry"));

        let content = std::fs::read_to_string(temp.path().join("models/public/Places.ts")).unwrap();
        assert!(content.contains("location: unknown;"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (temp, manifest) = project();
        let report = generate(manifest, GenerateOptions { dry_run: true }).unwrap();

        let GenerationOutcome::Preview(files) = report.outcome else {
            panic!("expected preview outcome");
        };
        assert_eq!(files.len(), 1);
        assert!(!temp.path().join("models").exists());
    }

    #[test]
    fn test_missing_snapshot_fails() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::new(temp.path().join("nope.json"), temp.path().join("out"));
        let err = generate(manifest, GenerateOptions { dry_run: true }).unwrap_err();
        assert!(err.to_string().contains("Failed to load schema"));
    }
}
