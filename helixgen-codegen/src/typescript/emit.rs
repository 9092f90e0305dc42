//! TypeScript source emission.
//!
//! Inline constructs (types, expressions, parameters) render through the
//! [`Emit`] trait. Block constructs go through [`Emitter`], which owns the
//! file layout: header, import, then each non-empty declaration group under
//! its heading, one blank line between groups.

use super::ast::{
    BinOp, Declaration, TsConstObject, TsExpr, TsFunction, TsInterface, TsLiteral, TsMember,
    TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeAlias,
};
use super::declarations::DeclarationSet;
use super::names::{check_identifier, escape_string, quote_if_needed, NameRegistry};
use crate::config::GeneratorConfig;
use crate::error::EmitError;

/// Converts an AST node to its inline TypeScript text.
pub trait Emit {
    fn emit(&self) -> String;
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Unknown => "unknown",
            Self::Any => "any",
            Self::Never => "never",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            Self::String(s) => format!("'{}'", escape_string(s)),
            Self::Int(i) => i.to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            Self::Primitive(p) => p.emit(),
            Self::Ref(name) => name.clone(),
            Self::Generic { name, args } => format!("{name}<{}>", join(args, ", ")),
            Self::Array(inner) => match **inner {
                Self::Union(_) | Self::KeyOf(_) | Self::TypeOf(_) => format!("({})[]", inner.emit()),
                _ => format!("{}[]", inner.emit()),
            },
            Self::Union(types) if types.is_empty() => "never".to_string(),
            Self::Union(types) => join(types, " | "),
            Self::Literal(lit) => lit.emit(),
            Self::Indexed { object, index } => match **object {
                Self::Union(_) | Self::KeyOf(_) | Self::TypeOf(_) => {
                    format!("({})[{}]", object.emit(), index.emit())
                }
                _ => format!("{}[{}]", object.emit(), index.emit()),
            },
            Self::TypeOf(name) => format!("typeof {name}"),
            Self::KeyOf(inner) => format!("keyof {}", inner.emit()),
            Self::Predicate { param, ty } => format!("{param} is {}", ty.emit()),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{opt}: {}", quote_if_needed(&self.name), self.ty.emit())
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{}{opt}: {}", self.name, ty.emit()),
            None => format!("{}{opt}", self.name),
        }
    }
}

impl BinOp {
    const fn symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
        }
    }

    const fn precedence(self) -> u8 {
        match self {
            Self::And => 1,
            Self::StrictEq | Self::StrictNotEq => 2,
        }
    }
}

impl TsExpr {
    /// True for expressions that need parentheses as a member/call target.
    const fn is_loose(&self) -> bool {
        matches!(
            self,
            Self::Await(_) | Self::Cast { .. } | Self::TypeOf(_) | Self::Binary { .. } | Self::Arrow { .. }
        )
    }

    fn emit_postfix_target(&self) -> String {
        if self.is_loose() {
            format!("({})", self.emit())
        } else {
            self.emit()
        }
    }

    fn emit_operand(&self, parent: BinOp) -> String {
        match self {
            Self::Binary { op, .. } if op.precedence() >= parent.precedence() => self.emit(),
            Self::Binary { .. } | Self::Await(_) | Self::Cast { .. } | Self::Arrow { .. } => {
                format!("({})", self.emit())
            }
            _ => self.emit(),
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            Self::Ident(name) => name.clone(),
            Self::Literal(lit) => lit.emit(),
            Self::Null => "null".to_string(),
            Self::Member { object, prop } => format!("{}.{prop}", object.emit_postfix_target()),
            Self::Index { object, index } => {
                format!("{}[{}]", object.emit_postfix_target(), index.emit())
            }
            Self::Call { callee, args } => {
                format!("{}({})", callee.emit_postfix_target(), join(args, ", "))
            }
            Self::Await(inner) => format!("await {}", inner.emit()),
            Self::Cast { expr, ty } => {
                let inner = match **expr {
                    Self::Await(_) | Self::Binary { .. } | Self::Arrow { .. } => {
                        format!("({})", expr.emit())
                    }
                    _ => expr.emit(),
                };
                format!("{inner} as {}", ty.emit())
            }
            Self::TypeOf(inner) => format!("typeof {}", inner.emit_postfix_target()),
            Self::Binary { left, op, right } => {
                // Left-associative: an equal-precedence right operand keeps parens.
                let right = match **right {
                    Self::Binary { op: r, .. } if r.precedence() <= op.precedence() => {
                        format!("({})", right.emit())
                    }
                    _ => right.emit_operand(*op),
                };
                format!("{} {} {right}", left.emit_operand(*op), op.symbol())
            }
            Self::Arrow {
                is_async,
                params,
                body,
            } => {
                let prefix = if *is_async { "async " } else { "" };
                let body = match **body {
                    Self::Object(_) => format!("({})", body.emit()),
                    _ => body.emit(),
                };
                format!("{prefix}({}) => {body}", join(params, ", "))
            }
            Self::Object(entries) if entries.is_empty() => "{}".to_string(),
            Self::Object(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", quote_if_needed(k), v.emit()))
                    .collect();
                format!("{{ {} }}", parts.join(", "))
            }
        }
    }
}

fn join<T: Emit>(items: &[T], sep: &str) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(sep)
}

fn type_params(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}

/// Line-oriented text buffer with indentation tracking.
#[derive(Debug)]
pub struct CodeWriter {
    buf: String,
    unit: String,
    level: usize,
}

impl CodeWriter {
    /// Creates a writer indenting by `width` spaces per level.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::with_capacity(4096),
            unit: " ".repeat(width),
            level: 0,
        }
    }

    /// Writes one line at the current indentation.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.level {
            self.buf.push_str(&self.unit);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn indent(&mut self) {
        self.level += 1;
    }

    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Writes a JSDoc comment; one line stays on one line.
    ///
    /// Payload text may end up here, so embedded line breaks start new
    /// comment lines and `*/` is written as `*\/`.
    pub fn doc(&mut self, lines: &[String]) {
        let lines: Vec<String> = lines
            .iter()
            .flat_map(|l| {
                if l.is_empty() {
                    vec![String::new()]
                } else {
                    l.lines().map(|part| part.replace("*/", "*\\/")).collect()
                }
            })
            .collect();

        match lines.as_slice() {
            [] => {}
            [single] => self.line(&format!("/** {single} */")),
            _ => {
                self.line("/**");
                for l in &lines {
                    if l.is_empty() {
                        self.line(" *");
                    } else {
                        self.line(&format!(" * {l}"));
                    }
                }
                self.line(" */");
            }
        }
    }

    /// Returns the text, ending in exactly one newline.
    #[must_use]
    pub fn finish(mut self) -> String {
        while self.buf.ends_with("\n\n") {
            self.buf.pop();
        }
        self.buf
    }
}

/// Renders a [`DeclarationSet`] into a TypeScript module.
#[derive(Debug)]
pub struct Emitter<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Emitter<'a> {
    /// Creates an emitter for the given configuration.
    #[must_use]
    pub const fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Checks every generated name, then renders the module.
    ///
    /// # Errors
    /// Returns `EmitError` if a name is reserved, is not an identifier, or
    /// collides (ignoring case) with another top-level name. Nothing is
    /// rendered in that case.
    pub fn emit(&self, set: &DeclarationSet) -> Result<String, EmitError> {
        check_names(set)?;

        let mut w = CodeWriter::new(self.config.indent);
        w.line("// Generated TypeScript types for HelixDB schema");
        w.line("// This file is auto-generated. Do not edit manually.");
        w.line(&format!(
            "// Generated with helixgen from {}",
            self.config.source_note
        ));
        w.blank();

        let import = set.import();
        w.line(&format!(
            "import {} from '{}';",
            import.default,
            escape_string(&import.from)
        ));

        for group in set.groups() {
            w.blank();
            w.line(&format!("// {}", group.kind.heading()));
            let mut prev_compact = None;
            for decl in &group.declarations {
                let compact = decl.is_compact();
                if prev_compact.is_some_and(|p| !(p && compact)) {
                    w.blank();
                }
                write_declaration(&mut w, decl);
                prev_compact = Some(compact);
            }
        }

        Ok(w.finish())
    }
}

fn check_names(set: &DeclarationSet) -> Result<(), EmitError> {
    let mut top = NameRegistry::new();
    top.claim(&set.import().default, "runtime client import")?;

    for decl in set.iter() {
        let owner = match decl {
            Declaration::Interface(_) => "interface",
            Declaration::TypeAlias(_) => "type alias",
            Declaration::Const(_) => "constant",
            Declaration::Function(_) => "function",
        };
        top.claim(decl.name(), owner)?;

        if let Declaration::Interface(iface) = decl {
            let mut methods = NameRegistry::new();
            for member in &iface.members {
                if let TsMember::Method(sig) = member {
                    methods.claim(&sig.name, &format!("{} method", iface.name))?;
                }
            }
        }
        if let Declaration::Const(c) = decl {
            for (key, _) in &c.entries {
                check_identifier(key, &format!("{} key", c.name))?;
            }
        }
    }
    Ok(())
}

fn write_declaration(w: &mut CodeWriter, decl: &Declaration) {
    match decl {
        Declaration::Interface(iface) => write_interface(w, iface),
        Declaration::TypeAlias(alias) => write_alias(w, alias),
        Declaration::Const(obj) => write_const(w, obj),
        Declaration::Function(func) => write_function(w, func),
    }
}

fn write_interface(w: &mut CodeWriter, iface: &TsInterface) {
    w.doc(&iface.doc);
    let extends = iface
        .extends
        .as_ref()
        .map(|base| format!(" extends {base}"))
        .unwrap_or_default();
    if iface.members.is_empty() {
        w.line(&format!("export interface {}{extends} {{}}", iface.name));
        return;
    }
    w.line(&format!("export interface {}{extends} {{", iface.name));
    w.indent();
    for member in &iface.members {
        match member {
            TsMember::Property(prop) => w.line(&format!("{};", prop.emit())),
            TsMember::Method(sig) => {
                w.doc(&sig.doc);
                w.line(&format!(
                    "{}({}): {};",
                    sig.name,
                    join(&sig.params, ", "),
                    sig.return_type.emit()
                ));
            }
        }
    }
    w.dedent();
    w.line("}");
}

fn write_alias(w: &mut CodeWriter, alias: &TsTypeAlias) {
    w.doc(&alias.doc);
    w.line(&format!(
        "export type {}{} = {};",
        alias.name,
        type_params(&alias.type_params),
        alias.ty.emit()
    ));
}

fn write_const(w: &mut CodeWriter, obj: &TsConstObject) {
    w.doc(&obj.doc);
    if obj.entries.is_empty() {
        w.line(&format!("export const {} = {{}} as const;", obj.name));
        return;
    }
    w.line(&format!("export const {} = {{", obj.name));
    w.indent();
    for (key, value) in &obj.entries {
        w.line(&format!("{}: {},", quote_if_needed(key), value.emit()));
    }
    w.dedent();
    w.line("} as const;");
}

fn write_function(w: &mut CodeWriter, func: &TsFunction) {
    w.doc(&func.doc);
    let ret = func
        .return_type
        .as_ref()
        .map(|t| format!(": {}", t.emit()))
        .unwrap_or_default();
    w.line(&format!(
        "export function {}{}({}){ret} {{",
        func.name,
        type_params(&func.type_params),
        join(&func.params, ", ")
    ));
    w.indent();
    write_body(w, &func.body);
    w.dedent();
    w.line("}");
}

fn write_body(w: &mut CodeWriter, body: &[TsStmt]) {
    for stmt in body {
        match stmt {
            TsStmt::Return(TsExpr::Object(entries)) if !entries.is_empty() => {
                w.line("return {");
                w.indent();
                for (key, value) in entries {
                    w.line(&format!("{}: {},", quote_if_needed(key), value.emit()));
                }
                w.dedent();
                w.line("};");
            }
            TsStmt::Return(expr) => w.line(&format!("return {};", expr.emit())),
            TsStmt::If { cond, then_body } => {
                w.line(&format!("if ({}) {{", cond.emit()));
                w.indent();
                write_body(w, then_body);
                w.dedent();
                w.line("}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typescript::ast::TsImport;
    use crate::typescript::declarations::GroupKind;

    fn set() -> DeclarationSet {
        DeclarationSet::new(TsImport {
            default: "HelixDB".to_string(),
            from: "helix-ts".to_string(),
        })
    }

    fn alias(name: &str, ty: TsType) -> Declaration {
        Declaration::TypeAlias(TsTypeAlias {
            name: name.to_string(),
            type_params: Vec::new(),
            ty,
            doc: Vec::new(),
        })
    }

    #[test]
    fn test_emit_types() {
        let endpoint = TsType::indexed(
            TsType::TypeOf("QueryEndpoints".to_string()),
            TsType::KeyOf(Box::new(TsType::TypeOf("QueryEndpoints".to_string()))),
        );
        assert_eq!(
            endpoint.emit(),
            "(typeof QueryEndpoints)[keyof typeof QueryEndpoints]"
        );

        let response = TsType::generic(
            "Awaited",
            vec![TsType::generic(
                "ReturnType",
                vec![TsType::indexed(
                    TsType::named("HelixDB"),
                    TsType::string_literal("query"),
                )],
            )],
        );
        assert_eq!(response.emit(), "Awaited<ReturnType<HelixDB['query']>>");

        let arr = TsType::Array(Box::new(TsType::Union(vec![
            TsType::Primitive(TsPrimitive::String),
            TsType::Primitive(TsPrimitive::Number),
        ])));
        assert_eq!(arr.emit(), "(string | number)[]");
        assert_eq!(TsType::Union(Vec::new()).emit(), "never");
    }

    #[test]
    fn test_emit_guard_expression() {
        let obj = TsExpr::ident("obj");
        let expr = TsExpr::ident("obj")
            .type_of()
            .binary(BinOp::StrictEq, TsExpr::string("object"))
            .and(obj.clone().binary(BinOp::StrictNotEq, TsExpr::Null))
            .and(
                obj.member("label")
                    .binary(BinOp::StrictEq, TsExpr::string("User")),
            );
        assert_eq!(
            expr.emit(),
            "typeof obj === 'object' && obj !== null && obj.label === 'User'"
        );
    }

    #[test]
    fn test_emit_cast_of_await_is_parenthesized() {
        let call = TsExpr::ident("client")
            .member("query")
            .call(vec![TsExpr::string("GetUser"), TsExpr::ident("params")]);
        let expr = TsExpr::Await(Box::new(call))
            .cast(TsType::Primitive(TsPrimitive::Unknown))
            .cast(TsType::named("User"));
        assert_eq!(
            expr.emit(),
            "(await client.query('GetUser', params)) as unknown as User"
        );
    }

    #[test]
    fn test_emit_string_literal_escaping() {
        assert_eq!(TsExpr::string("it's").emit(), "'it\\'s'");
    }

    #[test]
    fn test_doc_cannot_close_comment() {
        let mut w = CodeWriter::new(2);
        w.doc(&["Fetch */ export const pwned = 1; /*".to_string()]);
        assert_eq!(w.finish(), "/** Fetch *\\/ export const pwned = 1; /* */\n");

        let mut w = CodeWriter::new(2);
        w.doc(&["first\r\nsecond */".to_string(), String::new(), "x".to_string()]);
        assert_eq!(
            w.finish(),
            "/**\n * first\n * second *\\/\n *\n * x\n */\n"
        );
    }

    #[test]
    fn test_emitter_layout() {
        let mut decls = set();
        decls.push(
            GroupKind::UtilityTypes,
            alias(
                "Vector",
                TsType::Array(Box::new(TsType::Primitive(TsPrimitive::Number))),
            ),
        );
        decls.push(
            GroupKind::UtilityTypes,
            alias("HelixID", TsType::Primitive(TsPrimitive::BigInt)),
        );
        decls.push(
            GroupKind::BaseShapes,
            Declaration::Interface(TsInterface {
                name: "BaseVector".to_string(),
                extends: None,
                members: vec![TsMember::Property(TsProp {
                    name: "id".to_string(),
                    ty: TsType::named("HelixID"),
                    optional: false,
                })],
                doc: Vec::new(),
            }),
        );

        let config = GeneratorConfig::default();
        let out = Emitter::new(&config).emit(&decls).expect("Failed to emit");
        let expected = "\
// Generated TypeScript types for HelixDB schema
// This file is auto-generated. Do not edit manually.
// Generated with helixgen from introspection endpoint

import HelixDB from 'helix-ts';

// Utility types
export type Vector = number[];
export type HelixID = bigint;

// Base shapes
export interface BaseVector {
  id: HelixID;
}
";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_emitter_rejects_case_collision() {
        let mut decls = set();
        decls.push(GroupKind::Nodes, alias("User", TsType::named("X")));
        decls.push(GroupKind::Nodes, alias("USER", TsType::named("X")));

        let config = GeneratorConfig::default();
        let err = Emitter::new(&config).emit(&decls).expect_err("must collide");
        assert!(matches!(err, EmitError::NameCollision { .. }));
    }

    #[test]
    fn test_emitter_rejects_reserved_method() {
        let mut decls = set();
        decls.push(
            GroupKind::Client,
            Declaration::Interface(TsInterface {
                name: "TypedHelixDBClient".to_string(),
                extends: None,
                members: vec![TsMember::Method(crate::typescript::ast::TsMethodSig {
                    name: "delete".to_string(),
                    params: Vec::new(),
                    return_type: TsType::Primitive(TsPrimitive::Unknown),
                    doc: Vec::new(),
                })],
                doc: Vec::new(),
            }),
        );

        let config = GeneratorConfig::default();
        let err = Emitter::new(&config).emit(&decls).expect_err("must fail");
        assert!(matches!(err, EmitError::ReservedWord { ref name, .. } if name == "delete"));
    }

    #[test]
    fn test_function_with_object_return() {
        let mut decls = set();
        decls.push(
            GroupKind::Factory,
            Declaration::Function(TsFunction {
                name: "make".to_string(),
                type_params: Vec::new(),
                params: vec![TsParam::typed("client", TsType::named("HelixDB"))],
                return_type: Some(TsType::named("Client")),
                body: vec![TsStmt::Return(TsExpr::Object(vec![(
                    "Ping".to_string(),
                    TsExpr::Arrow {
                        is_async: true,
                        params: vec![TsParam::inferred("params")],
                        body: Box::new(TsExpr::ident("client").member("query").call(vec![
                            TsExpr::string("Ping"),
                            TsExpr::ident("params"),
                        ])),
                    },
                )]))],
                doc: Vec::new(),
            }),
        );

        let config = GeneratorConfig::default().with_indent(4);
        let out = Emitter::new(&config).emit(&decls).expect("Failed to emit");
        assert!(out.contains(
            "export function make(client: HelixDB): Client {\n    return {\n        Ping: async (params) => client.query('Ping', params),\n    };\n}\n"
        ));
        assert!(out.ends_with("}\n"));
    }
}
