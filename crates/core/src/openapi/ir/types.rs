//! TypeScript IR types for declaration generation.
//!
//! This module defines the type expression tree the synthesizer builds and
//! the emitter renders:
//! - TsType: Types (primitives, arrays, unions, objects, etc.)
//! - TsLiteral: Literal values (strings, numbers, booleans)
//! - TsTypeDef: Top-level declarations (interfaces and aliases)

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, undefined, unknown, object
    Primitive(TsPrimitive),
    /// Literal type: 'foo', 42, true
    Literal(TsLiteral),
    /// Array type: Array<T>
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Object type: { 'foo': string; 'bar'?: number }
    Object(ObjectShape),
    /// Keyed collection: Record<string, T>
    Record(Box<TsType>),
    /// Named type reference: FormData, Blob, Date
    Ref(String),
    /// Generic instantiation: FullResponse<Body, 200>
    Generic { name: String, args: Vec<TsType> },
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Undefined,
    Unknown,
    /// Opaque `object`
    Object,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    String(String),
    Number(f64),
    Int(i64),
    Bool(bool),
    Null,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// Fields of an object type plus an optional catch-all index field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectShape {
    pub props: Vec<TsProp>,
    /// Value type of `[key: string]: T`
    pub index_signature: Option<Box<TsType>>,
}

impl ObjectShape {
    pub fn new(props: Vec<TsProp>) -> Self {
        Self {
            props,
            index_signature: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty() && self.index_signature.is_none()
    }

    /// True when no field is required (an empty shape counts as all-optional).
    pub fn all_optional(&self) -> bool {
        self.props.iter().all(|p| p.optional)
    }
}

impl TsType {
    pub fn string() -> Self {
        TsType::Primitive(TsPrimitive::String)
    }

    pub fn unknown() -> Self {
        TsType::Primitive(TsPrimitive::Unknown)
    }

    /// Append `| null` when `nullable` is set.
    pub fn nullable(self, nullable: bool) -> Self {
        if nullable {
            TsType::Union(vec![self, TsType::Primitive(TsPrimitive::Null)])
        } else {
            self
        }
    }

    /// Union of members, collapsing the degenerate cases.
    pub fn union_of(mut members: Vec<TsType>) -> Self {
        match members.len() {
            0 => TsType::unknown(),
            1 => members.remove(0),
            _ => TsType::Union(members),
        }
    }

    /// Intersection of members, collapsing the degenerate cases.
    pub fn intersection_of(mut members: Vec<TsType>) -> Self {
        match members.len() {
            0 => TsType::unknown(),
            1 => members.remove(0),
            _ => TsType::Intersection(members),
        }
    }

    /// Replace the type of a string-typed field with a required literal.
    ///
    /// Walks object shapes reachable through unions and intersections and
    /// returns whether any field was rewritten. Fields whose type is not the
    /// plain `string` primitive are left alone.
    pub fn override_string_field(&mut self, field: &str, literal: &str) -> bool {
        match self {
            TsType::Object(shape) => {
                let mut replaced = false;
                for prop in shape.props.iter_mut().filter(|p| p.name == field) {
                    if prop.ty == TsType::string() {
                        prop.ty = TsType::Literal(TsLiteral::String(literal.to_string()));
                        prop.optional = false;
                        replaced = true;
                    }
                }
                replaced
            }
            TsType::Union(members) | TsType::Intersection(members) => members
                .iter_mut()
                .fold(false, |acc, m| m.override_string_field(field, literal) || acc),
            _ => false,
        }
    }
}

/// Function parameter in a method signature
#[derive(Debug, Clone)]
pub struct TsParam {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// Method signature inside an interface
#[derive(Debug, Clone)]
pub struct TsMethod {
    pub name: String,
    pub type_params: Vec<String>,
    pub params: Vec<TsParam>,
    pub return_type: TsType,
}

/// Type definition kind
#[derive(Debug, Clone)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface {
        shape: ObjectShape,
        methods: Vec<TsMethod>,
    },
    /// type Foo = ...
    TypeAlias { ty: TsType },
    /// type Foo = A
    /// | B
    UnionAlias { members: Vec<String> },
}

/// Type definition
#[derive(Debug, Clone)]
pub struct TsTypeDef {
    pub name: String,
    pub type_params: Vec<String>,
    pub kind: TypeDefKind,
}

impl TsTypeDef {
    pub fn interface(name: impl Into<String>, shape: ObjectShape) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            kind: TypeDefKind::Interface {
                shape,
                methods: Vec::new(),
            },
        }
    }

    pub fn alias(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            type_params: Vec::new(),
            kind: TypeDefKind::TypeAlias { ty },
        }
    }
}

/// Complete declaration module
#[derive(Debug, Clone, Default)]
pub struct TsModule {
    pub types: Vec<TsTypeDef>,
}
