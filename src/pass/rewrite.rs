use std::collections::HashSet;
use ustr::Ustr;

use crate::ir::class::ClassMap;
use crate::ir::code::{FieldOp, Instruction};
use crate::ir::module::{Member, NameAndType};

#[derive(Debug)]
pub struct Target {
    pub owners: HashSet<Ustr>,
    pub method: NameAndType,
    pub field: NameAndType,
    pub op: FieldOp,
}

impl Target {
    fn replacement(&self, call: &Member) -> Option<Instruction> {
        if call.1 != self.method || !self.owners.contains(&call.0) {
            return None;
        }
        // field resolution walks up from the call's owner
        Some(Instruction::Field(self.op, Member(call.0, self.field)))
    }
}

pub fn apply(classes: &mut ClassMap, target: &Target) -> usize {
    let mut sites = 0;
    for data in classes.values_mut() {
        for method in &mut data.methods {
            for inst in &mut method.code {
                let replacement = match inst {
                    Instruction::Invoke(_, call) => target.replacement(call),
                    _ => None,
                };
                if let Some(replacement) = replacement {
                    *inst = replacement;
                    sites += 1;
                }
            }
        }
    }
    sites
}
