//! TypeScript code emission via the Emit trait.
//!
//! Rendering conventions downstream type-checking depends on:
//! - object field names are always single-quoted, optional ones append `?`
//! - string literals are single-quoted with `'` escaped as `\'`
//! - arrays render as `Array<T>`
//! - nullable types end in ` | null`

use super::types::{
    ObjectShape, TsLiteral, TsMethod, TsModule, TsParam, TsPrimitive, TsProp, TsType, TsTypeDef,
    TypeDefKind,
};
use super::utils::single_quote;

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Null => "null".to_string(),
            TsPrimitive::Undefined => "undefined".to_string(),
            TsPrimitive::Unknown => "unknown".to_string(),
            TsPrimitive::Object => "object".to_string(),
        }
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => single_quote(s),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Literal(lit) => lit.emit(),
            TsType::Array(inner) => format!("Array<{}>", inner.emit()),
            TsType::Union(types) => types
                .iter()
                .map(|t| t.emit())
                .collect::<Vec<_>>()
                .join(" | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    let s = t.emit();
                    if matches!(t, TsType::Union(_)) {
                        format!("({s})")
                    } else {
                        s
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(shape) => shape.emit(),
            TsType::Record(value) => format!("Record<string, {}>", value.emit()),
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => {
                let args_str = args.iter().map(|a| a.emit()).collect::<Vec<_>>().join(", ");
                format!("{name}<{args_str}>")
            }
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", single_quote(&self.name), opt, self.ty.emit())
    }
}

impl ObjectShape {
    fn members(&self) -> Vec<String> {
        let mut parts: Vec<_> = self.props.iter().map(|p| p.emit()).collect();
        if let Some(value) = &self.index_signature {
            parts.push(format!("[key: string]: {}", value.emit()));
        }
        parts
    }
}

impl Emit for ObjectShape {
    fn emit(&self) -> String {
        if self.is_empty() {
            "{}".to_string()
        } else {
            format!("{{ {} }}", self.members().join("; "))
        }
    }
}

// =============================================================================
// Signatures
// =============================================================================

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", self.name, opt, self.ty.emit())
    }
}

impl Emit for TsMethod {
    fn emit(&self) -> String {
        let type_params_str = if self.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_params.join(", "))
        };
        let params_str = self.params.iter().map(|p| p.emit()).collect::<Vec<_>>().join(", ");
        format!(
            "{}{}({}): {}",
            self.name,
            type_params_str,
            params_str,
            self.return_type.emit()
        )
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        let type_params_str = if self.type_params.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_params.join(", "))
        };
        match &self.kind {
            TypeDefKind::Interface { shape, methods } => {
                let mut output = format!("export interface {}{} {{\n", self.name, type_params_str);
                for member in shape.members() {
                    output.push_str(&format!("  {member};\n"));
                }
                for method in methods {
                    output.push_str(&format!("  {};\n", method.emit()));
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::TypeAlias { ty } => {
                format!("export type {}{} = {};\n", self.name, type_params_str, ty.emit())
            }
            TypeDefKind::UnionAlias { members } => {
                format!(
                    "export type {}{} = {};\n",
                    self.name,
                    type_params_str,
                    members.join("\n| ")
                )
            }
        }
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for TsModule {
    fn emit(&self) -> String {
        self.types
            .iter()
            .map(|t| t.emit())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
