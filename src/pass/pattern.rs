use ustr::Ustr;

use crate::ir::code::Instruction;
use crate::ir::module::Member;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Query {
    pub opcode: Option<u8>,
    pub var: Option<u16>,
    pub owner: Option<Ustr>,
    pub name: Option<Ustr>,
    pub desc: Option<Ustr>,
}

impl Query {
    pub fn opcode(opcode: u8) -> Query {
        Query {
            opcode: Some(opcode),
            ..Query::default()
        }
    }

    pub fn var(mut self, slot: u16) -> Query {
        self.var = Some(slot);
        self
    }

    pub fn member(mut self, member: Member) -> Query {
        self.owner = Some(member.owner());
        self.name = Some(member.name());
        self.desc = Some(member.desc());
        self
    }

    pub fn test(&self, inst: &Instruction) -> bool {
        if self.opcode.is_some() && self.opcode != inst.opcode() {
            return false;
        }
        if self.var.is_some() && self.var != inst.var() {
            return false;
        }
        let member = inst.member();
        let attrs = [
            (self.owner, member.map(Member::owner)),
            (self.name, member.map(Member::name)),
            (self.desc, member.map(Member::desc)),
        ];
        attrs.iter().all(|(want, have)| want.is_none() || want == have)
    }
}

/// True iff `insts` and `queries` have the same length and each query holds positionally.
pub fn matches(insts: &[&Instruction], queries: &[Query]) -> bool {
    insts.len() == queries.len() && insts.iter().zip(queries).all(|(inst, query)| query.test(inst))
}
