//! TypeScript AST for generated declarations.
//!
//! Covers exactly the constructs the generated bindings use: type
//! expressions, interfaces, aliases, `as const` objects and small exported
//! functions whose bodies are returns, guards and casts.

/// TypeScript primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    BigInt,
    Null,
    Undefined,
    Unknown,
    Any,
    Never,
}

/// Literal values, usable both as types and expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsLiteral {
    String(String),
    Int(i64),
}

/// TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// `string`, `number`, ...
    Primitive(TsPrimitive),
    /// Named type: `User`, `HelixID`, `T`.
    Ref(String),
    /// Generic instantiation: `Promise<T>`.
    Generic { name: String, args: Vec<TsType> },
    /// `T[]`
    Array(Box<TsType>),
    /// `A | B | C`
    Union(Vec<TsType>),
    /// `'User'`, `1`
    Literal(TsLiteral),
    /// Indexed access: `T['query']`, `T[1]`.
    Indexed { object: Box<TsType>, index: Box<TsType> },
    /// `typeof value`
    TypeOf(String),
    /// `keyof T`
    KeyOf(Box<TsType>),
    /// Type predicate return: `obj is User`.
    Predicate { param: String, ty: Box<TsType> },
}

impl TsType {
    /// Shorthand for a named reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    /// Shorthand for a generic instantiation.
    pub fn generic(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Generic {
            name: name.into(),
            args,
        }
    }

    /// Shorthand for a string literal type.
    pub fn string_literal(value: impl Into<String>) -> Self {
        Self::Literal(TsLiteral::String(value.into()))
    }

    /// Shorthand for an indexed access type.
    pub fn indexed(object: Self, index: Self) -> Self {
        Self::Indexed {
            object: Box::new(object),
            index: Box::new(index),
        }
    }
}

/// Interface property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    /// Emitted as `name?:`.
    pub optional: bool,
}

/// Function or method parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsParam {
    pub name: String,
    /// Left out for contextually typed arrow parameters.
    pub ty: Option<TsType>,
    pub optional: bool,
}

impl TsParam {
    /// Required typed parameter.
    pub fn typed(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            optional: false,
        }
    }

    /// Untyped parameter, inferred from context.
    pub fn inferred(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            optional: false,
        }
    }
}

/// Method signature inside an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsMethodSig {
    pub name: String,
    pub params: Vec<TsParam>,
    pub return_type: TsType,
    pub doc: Vec<String>,
}

/// Interface member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsMember {
    Property(TsProp),
    Method(TsMethodSig),
}

/// `export interface Name extends Base { .. }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsInterface {
    pub name: String,
    pub extends: Option<String>,
    pub members: Vec<TsMember>,
    pub doc: Vec<String>,
}

impl TsInterface {
    /// Returns the property with the given name.
    pub fn property(&self, name: &str) -> Option<&TsProp> {
        self.members.iter().find_map(|m| match m {
            TsMember::Property(p) if p.name == name => Some(p),
            _ => None,
        })
    }

    /// Returns the method with the given name.
    pub fn method(&self, name: &str) -> Option<&TsMethodSig> {
        self.members.iter().find_map(|m| match m {
            TsMember::Method(sig) if sig.name == name => Some(sig),
            _ => None,
        })
    }
}

/// `export type Name<T> = ..;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsTypeAlias {
    pub name: String,
    pub type_params: Vec<String>,
    pub ty: TsType,
    pub doc: Vec<String>,
}

/// `export const Name = { KEY: 'value' } as const;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsConstObject {
    pub name: String,
    pub entries: Vec<(String, TsLiteral)>,
    pub doc: Vec<String>,
}

/// Binary operators used by guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    And,
    StrictEq,
    StrictNotEq,
}

/// Expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsExpr {
    Ident(String),
    Literal(TsLiteral),
    /// `null`
    Null,
    /// `object.prop`
    Member { object: Box<TsExpr>, prop: String },
    /// `object[index]`
    Index { object: Box<TsExpr>, index: Box<TsExpr> },
    /// `callee(args)`
    Call { callee: Box<TsExpr>, args: Vec<TsExpr> },
    /// `await expr`
    Await(Box<TsExpr>),
    /// `expr as T`
    Cast { expr: Box<TsExpr>, ty: TsType },
    /// `typeof expr`
    TypeOf(Box<TsExpr>),
    Binary {
        left: Box<TsExpr>,
        op: BinOp,
        right: Box<TsExpr>,
    },
    /// `async (a, b) => body`
    Arrow {
        is_async: bool,
        params: Vec<TsParam>,
        body: Box<TsExpr>,
    },
    /// Object literal. Rendered one member per line at statement level.
    Object(Vec<(String, TsExpr)>),
}

impl TsExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(TsLiteral::String(value.into()))
    }

    pub fn member(self, prop: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(self),
            prop: prop.into(),
        }
    }

    pub fn call(self, args: Vec<Self>) -> Self {
        Self::Call {
            callee: Box::new(self),
            args,
        }
    }

    pub fn cast(self, ty: TsType) -> Self {
        Self::Cast {
            expr: Box::new(self),
            ty,
        }
    }

    pub fn binary(self, op: BinOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    pub fn and(self, right: Self) -> Self {
        self.binary(BinOp::And, right)
    }

    pub fn type_of(self) -> Self {
        Self::TypeOf(Box::new(self))
    }
}

/// Statement in a function body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsStmt {
    Return(TsExpr),
    If { cond: TsExpr, then_body: Vec<TsStmt> },
}

/// `export function name<T>(params): ret { body }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsFunction {
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<TsParam>,
    pub return_type: Option<TsType>,
    pub body: Vec<TsStmt>,
    pub doc: Vec<String>,
}

/// `import Default from 'module';`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    pub default: String,
    pub from: String,
}

/// Top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Interface(TsInterface),
    TypeAlias(TsTypeAlias),
    Const(TsConstObject),
    Function(TsFunction),
}

impl Declaration {
    /// Returns the declared top-level name.
    pub fn name(&self) -> &str {
        match self {
            Self::Interface(i) => &i.name,
            Self::TypeAlias(a) => &a.name,
            Self::Const(c) => &c.name,
            Self::Function(f) => &f.name,
        }
    }

    /// Returns true for a single-line alias without doc comment.
    pub fn is_compact(&self) -> bool {
        matches!(self, Self::TypeAlias(a) if a.doc.is_empty())
    }

    /// Returns the interface, if this declaration is one.
    pub fn as_interface(&self) -> Option<&TsInterface> {
        match self {
            Self::Interface(i) => Some(i),
            _ => None,
        }
    }
}
