//! Renders declaration IR to TypeScript source lines.

use tabula_codegen::{
    CodeBuilder, CodegenError,
    generators::string_literal,
    ir::{Declaration, ExportAs, InterfaceField, array_type},
};

use crate::{
    ast::{self, Export, Interface},
    import_generator::ImportGenerator,
    naming::TS_NAMING,
};

/// Render every declaration of the file at `path`.
///
/// Imports of all declarations and fields are collected first and emitted
/// above the body, separated by one blank line. Declarations are separated
/// by blank lines.
pub fn render(declarations: &[Declaration], path: &str) -> Result<Vec<String>, CodegenError> {
    let mut imports = ImportGenerator::new(path);
    for declaration in declarations {
        for record in declaration.imports() {
            imports.add_import(record)?;
        }
    }

    let mut builder = CodeBuilder::typescript();
    for line in imports.generate_lines() {
        builder.push_line(&line);
    }
    if !imports.is_empty() && !declarations.is_empty() {
        builder.push_blank();
    }

    for (i, declaration) in declarations.iter().enumerate() {
        if i > 0 {
            builder.push_blank();
        }
        render_declaration(&mut builder, declaration);
    }

    Ok(builder.into_lines())
}

fn render_declaration(builder: &mut CodeBuilder, declaration: &Declaration) {
    match declaration {
        Declaration::TypeAlias {
            name,
            comment,
            export_as,
            type_definition,
            ..
        } => {
            builder.push_jsdoc(comment);
            builder.push_line(&format!(
                "{}type {} = {};",
                export_keyword(*export_as),
                name,
                type_definition
            ));
            default_export(builder, name, *export_as);
        }
        Declaration::Interface {
            name,
            comment,
            export_as,
            fields,
        } => {
            let interface = fields.iter().fold(
                Interface::new(name).doc(comment.clone()),
                |interface, field| interface.field_with(interface_field(field)),
            );
            let interface = match export_as {
                ExportAs::Named => interface,
                ExportAs::Default => interface.default_export(),
            };
            builder.emit(&interface);
        }
        Declaration::Enum {
            name,
            comment,
            export_as,
            values,
        } => {
            builder.push_jsdoc(comment);
            builder.push_line(&format!("{}enum {} {{", export_keyword(*export_as), name));
            builder.push_indent();
            for value in values {
                builder.push_line(&format!("{},", enum_member(value)));
            }
            builder.push_dedent();
            builder.push_line("}");
            default_export(builder, name, *export_as);
        }
        Declaration::Constant {
            name,
            comment,
            export_as,
            type_name,
            value,
            ..
        } => {
            builder.push_jsdoc(comment);
            let annotation = type_name
                .as_ref()
                .map(|ty| format!(": {}", ty))
                .unwrap_or_default();
            let header = format!("{}const {}{} = ", export_keyword(*export_as), name, annotation);
            match value.as_slice() {
                [] => {
                    builder.push_line(&format!("{}undefined;", header));
                }
                [single] => {
                    builder.push_line(&format!("{}{};", header, single));
                }
                [first, middle @ .., last] => {
                    builder.push_line(&format!("{}{}", header, first));
                    for line in middle {
                        builder.push_line(line);
                    }
                    builder.push_line(&format!("{};", last));
                }
            }
            default_export(builder, name, *export_as);
        }
        Declaration::Generic { comment, lines, .. } => {
            builder.push_jsdoc(comment);
            for line in lines {
                builder.push_line(line);
            }
        }
    }
}

fn export_keyword(export_as: ExportAs) -> &'static str {
    match export_as {
        ExportAs::Named => "export ",
        ExportAs::Default => "",
    }
}

fn default_export(builder: &mut CodeBuilder, name: &str, export_as: ExportAs) {
    if export_as == ExportAs::Default {
        builder.push_blank();
        builder.emit(&Export::new().default(name));
    }
}

fn interface_field(field: &InterfaceField) -> ast::InterfaceField {
    let mut ty = array_type(&field.type_name, field.dimensions);
    if field.nullable {
        ty.push_str(" | null");
    }

    let rendered = ast::InterfaceField::new(TS_NAMING.property_key(&field.name), ty)
        .doc(field.comment.clone());
    if field.optional {
        rendered.optional()
    } else {
        rendered
    }
}

fn enum_member(value: &str) -> String {
    format!("{} = {}", TS_NAMING.property_key(value), string_literal(value))
}
