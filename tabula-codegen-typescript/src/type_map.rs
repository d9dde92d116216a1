//! Default PostgreSQL → TypeScript type map.

use tabula_codegen::{
    TypeMap,
    ir::{ImportRecord, ImportSource, TypeExpression},
};

const NUMBER: &[&str] = &["int2", "int4", "float4", "float8", "oid", "xid", "cid"];

const STRING: &[&str] = &[
    // 64-bit and arbitrary precision values don't fit a JS number
    "int8",
    "numeric",
    "money",
    "text",
    "varchar",
    "bpchar",
    "char",
    "name",
    "uuid",
    "citext",
    "inet",
    "cidr",
    "macaddr",
    "macaddr8",
    "bit",
    "varbit",
    "time",
    "timetz",
    "xml",
    "tsvector",
    "tsquery",
];

const DATE: &[&str] = &["date", "timestamp", "timestamptz"];

const UNKNOWN: &[&str] = &["json", "jsonb", "point", "line", "lseg", "box", "path", "polygon", "circle"];

/// Built-in mappings for `pg_catalog` types.
///
/// Types outside this map resolve through the schema graph or fall back to
/// `unknown`.
pub fn postgres_type_map() -> TypeMap {
    let builtin = |names: &'static [&'static str], ty: &'static str| {
        names
            .iter()
            .map(move |name| (format!("pg_catalog.{}", name), TypeExpression::builtin(ty)))
    };

    let mut map: TypeMap = builtin(NUMBER, "number")
        .chain(builtin(STRING, "string"))
        .chain(builtin(DATE, "Date"))
        .chain(builtin(UNKNOWN, "unknown"))
        .chain(builtin(&["bool"], "boolean"))
        .chain(builtin(&["bytea"], "Buffer"))
        .chain(builtin(&["void"], "void"))
        .collect();

    map.insert(
        "pg_catalog.interval",
        TypeExpression::named(
            "IPostgresInterval",
            vec![
                ImportRecord::named(
                    "IPostgresInterval",
                    ImportSource::Absolute("postgres-interval".into()),
                )
                .type_only(true),
            ],
        ),
    );
    map
}
