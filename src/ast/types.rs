use std::fmt::Display;

use crate::{Span, IMPL_NODE};

use super::ast::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub fn from_bits(bits: &str) -> Option<IntWidth> {
        match bits {
            "8" => Some(IntWidth::W8),
            "16" => Some(IntWidth::W16),
            "32" => Some(IntWidth::W32),
            "64" => Some(IntWidth::W64),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatWidth {
    W32,
    W64,
}

impl FloatWidth {
    pub fn from_bits(bits: &str) -> Option<FloatWidth> {
        match bits {
            "32" => Some(FloatWidth::W32),
            "64" => Some(FloatWidth::W64),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            FloatWidth::W32 => 32,
            FloatWidth::W64 => 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Int { signed: bool, width: IntWidth },
    Float { width: FloatWidth },
    Bool,
    Str,
    /// `[element: size]`
    Array {
        element: Box<TypeExpr>,
        size: Box<Expr>,
    },
    Tuple(Vec<TypeExpr>),
    Fn {
        params: Vec<TypeExpr>,
        return_type: Option<Box<TypeExpr>>,
    },
    /// A user type or generic parameter, resolved later.
    Named { name: String, args: Vec<TypeExpr> },
}

/// A type annotation as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub span: Span,
}

impl TypeExpr {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        TypeExpr { kind, span }
    }

    pub fn is_named(&self, expected: &str) -> bool {
        matches!(&self.kind, TypeKind::Named { name, .. } if name == expected)
    }
}

IMPL_NODE!(TypeExpr);

fn write_types(f: &mut std::fmt::Formatter<'_>, types: &[TypeExpr]) -> std::fmt::Result {
    for (i, ty) in types.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", ty)?;
    }
    Ok(())
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeKind::Int { signed, width } => {
                write!(f, "{}{}", if *signed { "i" } else { "u" }, width.bits())
            }
            TypeKind::Float { width } => write!(f, "f{}", width.bits()),
            TypeKind::Bool => write!(f, "bool"),
            TypeKind::Str => write!(f, "str"),
            TypeKind::Array { element, size } => write!(f, "[{}: {}]", element, size),
            TypeKind::Tuple(elements) => {
                write!(f, "(")?;
                write_types(f, elements)?;
                write!(f, ")")
            }
            TypeKind::Fn {
                params,
                return_type,
            } => {
                write!(f, "fn(")?;
                write_types(f, params)?;
                write!(f, ")")?;
                match return_type {
                    Some(ty) => write!(f, " -> {}", ty),
                    None => Ok(()),
                }
            }
            TypeKind::Named { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    write_types(f, args)?;
                    write!(f, ">")?;
                }
                Ok(())
            }
        }
    }
}
