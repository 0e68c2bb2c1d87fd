//! Declaration generation from API IR.
//!
//! This module lays the per-operation declarations out into a module and
//! builds the client interface exposing one method per operation.
//!
//! The result can then be emitted to strings via the `Emit` trait.

use super::api::{ApiIR, OperationIR};
use super::response::{FULL_RESPONSE, STATUS_RANGE};
use super::types::{
    ObjectShape, TsMethod, TsModule, TsParam, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind,
};

/// Generate the declaration module for an API.
///
/// The envelope comes first, the status-range marker only when some
/// operation refers to it, then each operation's request, per-status
/// aliases and response union.
pub fn codegen_module(api: &ApiIR) -> TsModule {
    let mut types = vec![codegen_full_response()];

    if api.operations.iter().any(|op| op.responses.uses_status_range) {
        types.push(codegen_status_range());
    }

    for op in &api.operations {
        types.extend(codegen_operation(op));
    }

    TsModule { types }
}

/// `FullResponse<TBody, TStatus>`: body plus status and headers.
fn codegen_full_response() -> TsTypeDef {
    let shape = ObjectShape::new(vec![
        prop("statusCode", TsType::Ref("TStatus".into())),
        prop("headers", TsType::Record(Box::new(TsType::string()))),
        prop("body", TsType::Ref("TBody".into())),
    ]);
    TsTypeDef {
        type_params: vec!["TBody".into(), "TStatus".into()],
        ..TsTypeDef::interface(FULL_RESPONSE, shape)
    }
}

/// `StatusRange<Class>`: a number branded with its status class.
fn codegen_status_range() -> TsTypeDef {
    let brand = ObjectShape::new(vec![TsProp {
        name: "__statusClass".into(),
        ty: TsType::Ref("Class".into()),
        optional: true,
    }]);
    TsTypeDef {
        type_params: vec!["Class extends number".into()],
        ..TsTypeDef::alias(
            STATUS_RANGE,
            TsType::Intersection(vec![
                TsType::Primitive(TsPrimitive::Number),
                TsType::Object(brand),
            ]),
        )
    }
}

fn codegen_operation(op: &OperationIR) -> Vec<TsTypeDef> {
    let mut types = Vec::with_capacity(op.responses.aliases.len() + 2);
    if let Some(request) = &op.request {
        types.push(request.type_def.clone());
    }
    types.extend(op.responses.aliases.iter().cloned());
    types.push(op.responses.union.clone());
    types
}

/// Generate the client interface with one method per operation.
pub fn codegen_client(api: &ApiIR, name: &str) -> TsTypeDef {
    let methods = api.operations.iter().map(codegen_method).collect();
    TsTypeDef {
        name: name.to_string(),
        type_params: Vec::new(),
        kind: TypeDefKind::Interface {
            shape: ObjectShape::default(),
            methods,
        },
    }
}

fn codegen_method(op: &OperationIR) -> TsMethod {
    let params = op
        .request
        .iter()
        .map(|request| TsParam {
            name: "request".into(),
            ty: TsType::Ref(request.type_def.name.clone()),
            optional: request.optional,
        })
        .collect();
    TsMethod {
        name: op.method_name.clone(),
        type_params: Vec::new(),
        params,
        return_type: promise_of(TsType::Ref(op.responses.union.name.clone())),
    }
}

pub(crate) fn promise_of(ty: TsType) -> TsType {
    TsType::Generic {
        name: "Promise".into(),
        args: vec![ty],
    }
}

fn prop(name: &str, ty: TsType) -> TsProp {
    TsProp {
        name: name.into(),
        ty,
        optional: false,
    }
}
