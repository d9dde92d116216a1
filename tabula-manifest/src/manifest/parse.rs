//! Manifest parsing from files and strings.

use std::{path::Path, path::PathBuf, str::FromStr};

use indexmap::IndexMap;
use serde::Deserialize;

use super::{
    ConnectionConfig, GenerateConfig, HooksConfig, Manifest, OutputConfig, TypeMapEntry,
    default_extension, validate,
};
use crate::{Error, Result, error::SourceContext};

/// File layout before required settings are checked.
///
/// Required fields are optional here so that a missing entry produces a
/// `Missing` diagnostic instead of a bare serde message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawManifest {
    #[serde(default)]
    connection: RawConnection,
    #[serde(default)]
    output: RawOutput,
    #[serde(default)]
    generate: GenerateConfig,
    #[serde(default)]
    type_map: IndexMap<String, TypeMapEntry>,
    #[serde(default)]
    hooks: HooksConfig,
}

#[derive(Debug, Default, Deserialize)]
struct RawConnection {
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOutput {
    path: Option<PathBuf>,
    extension: Option<String>,
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "tabula.toml")
    }
}

impl Manifest {
    /// Parse a tabula.toml file from the given path.
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let manifest = parse_manifest(&content, &path.display().to_string())?;
        let dir = path.parent().unwrap_or(Path::new("."));
        Ok(manifest.rebase(dir))
    }

    /// Parse a tabula.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let raw: RawManifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;

    let snapshot = raw
        .connection
        .snapshot
        .ok_or_else(|| source_ctx.missing_error("connection", "snapshot"))?;
    let path = raw
        .output
        .path
        .ok_or_else(|| source_ctx.missing_error("output", "path"))?;

    let manifest = Manifest {
        connection: ConnectionConfig { snapshot },
        output: OutputConfig {
            path,
            extension: raw.output.extension.unwrap_or_else(default_extension),
        },
        generate: raw.generate,
        type_map: raw.type_map,
        hooks: raw.hooks,
    };

    validate::validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::EnumStyle;

    const MINIMAL: &str = r#"
[connection]
snapshot = "schema.json"

[output]
path = "src/models"
"#;

    #[test]
    fn test_parse_minimal() {
        let manifest: Manifest = MINIMAL.parse().unwrap();
        assert_eq!(manifest.connection.snapshot, PathBuf::from("schema.json"));
        assert_eq!(manifest.output.path, PathBuf::from("src/models"));
        assert_eq!(manifest.output.extension, "ts");
        assert!(manifest.generate.identifier_types);
        assert!(manifest.hooks.banner);
        assert!(manifest.type_map.is_empty());
    }

    #[test]
    fn test_parse_full() {
        let content = r#"
[connection]
snapshot = "schema.json"

[output]
path = "out"
extension = "mts"

[generate]
schemas = ["public", "audit"]
identifier-types = false
enum-style = "enum"
strip-null-from-optional = true
prefer-type-imports = false

[type-map]
"pg_catalog.int8" = "bigint"
"pg_catalog.tsvector" = { name = "TsVector", from = "pg-types" }
"pg_catalog.interval" = { name = "Interval", from = "postgres-interval", default = true }

[hooks]
banner = false
index-file = true
enum-tables = false
"#;
        let manifest: Manifest = content.parse().unwrap();

        assert_eq!(manifest.output.extension, "mts");
        assert_eq!(manifest.generate.schemas, vec!["public", "audit"]);
        assert!(!manifest.generate.identifier_types);
        assert_eq!(manifest.generate.enum_style, EnumStyle::Enum);
        assert!(manifest.generate.strip_null_from_optional);
        assert!(!manifest.generate.prefer_type_imports);

        let keys: Vec<_> = manifest.type_map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["pg_catalog.int8", "pg_catalog.tsvector", "pg_catalog.interval"]
        );
        assert_eq!(
            manifest.type_map["pg_catalog.int8"],
            TypeMapEntry::Name("bigint".into())
        );
        assert_eq!(
            manifest.type_map["pg_catalog.interval"],
            TypeMapEntry::Import {
                name: "Interval".into(),
                from: "postgres-interval".into(),
                default: true,
            }
        );

        assert!(!manifest.hooks.banner);
        assert!(manifest.hooks.index_file);
        assert!(!manifest.hooks.enum_tables);
    }

    #[test]
    fn test_missing_connection() {
        let err = "[output]\npath = \"out\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(
            *err,
            Error::Missing {
                section: "connection",
                field: "snapshot",
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "missing required setting 'connection.snapshot'"
        );
    }

    #[test]
    fn test_missing_output_path() {
        let err = "[connection]\nsnapshot = \"s.json\"\n[output]\nextension = \"ts\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(
            *err,
            Error::Missing {
                section: "output",
                field: "path",
                ..
            }
        ));
    }

    #[test]
    fn test_syntax_error() {
        let err = "[connection\nsnapshot = 1".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_unknown_enum_style() {
        let content = format!("{}\n[generate]\nenum-style = \"const\"\n", MINIMAL);
        let err = content.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_file_rebases_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tabula.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let manifest = Manifest::from_file(&path).unwrap();
        assert_eq!(manifest.connection.snapshot, temp.path().join("schema.json"));
        assert_eq!(manifest.output.path, temp.path().join("src/models"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Manifest::from_file("/nope/tabula.toml").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
