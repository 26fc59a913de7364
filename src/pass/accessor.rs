use noak::AccessFlags;
use serde_derive::Serialize;

use crate::ir::class::{Class, Field, Method};
use crate::ir::code::{self, op, FieldOp};
use crate::ir::hierarchy::Hierarchy;
use crate::ir::module::Member;
use crate::pass::pattern::{self, Query};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessor {
    Getter,
    Setter,
}

impl Accessor {
    pub fn is_get(self) -> bool {
        self == Accessor::Getter
    }

    pub fn field_op(self, field: &Field) -> FieldOp {
        FieldOp::new(self.is_get(), field.is_static())
    }
}

fn candidate(field: &Field, method: &Method) -> Option<Accessor> {
    let desc = method.desc.as_str();
    let params = desc.strip_prefix('(')?;
    if params.strip_prefix(')') == Some(field.desc.as_str()) {
        return Some(Accessor::Getter);
    }
    if params.strip_suffix(")V") == Some(field.desc.as_str()) {
        return Some(Accessor::Setter);
    }
    None
}

pub fn template(kind: Accessor, owner: &Class, field: &Field) -> Option<Vec<Query>> {
    let typ = code::field_type(field.desc)?;
    let is_static = field.is_static();
    let member = Member(owner.name, field.name_and_type());
    let mut queries = Vec::with_capacity(4);
    if !is_static {
        queries.push(Query::opcode(op::ALOAD).var(0));
    }
    let access = Query::opcode(kind.field_op(field).opcode()).member(member);
    match kind {
        Accessor::Getter => {
            queries.push(access);
            queries.push(Query::opcode(typ.opcode(op::IRETURN)));
        }
        Accessor::Setter => {
            let slot = if is_static { 0 } else { 1 };
            queries.push(Query::opcode(typ.opcode(op::ILOAD)).var(slot));
            queries.push(access);
            queries.push(Query::opcode(op::RETURN));
        }
    }
    Some(queries)
}

pub fn classify(hier: &Hierarchy, owner: &Class, field: &Field, method: &Method, strict: bool) -> Option<Accessor> {
    if method.is_static() != field.is_static() || method.access.contains(AccessFlags::SYNCHRONIZED) {
        return None;
    }
    let kind = candidate(field, method)?;
    if hier.shadowed(owner.name, method.name_and_type(), strict) {
        return None;
    }
    let queries = template(kind, owner, field)?;
    if pattern::matches(&code::real(&method.code), &queries) {
        Some(kind)
    } else {
        None
    }
}
