use std::collections::BTreeSet;

use crate::ir::code::Instruction;

pub fn with_labels(insts: Vec<(u32, Instruction)>, targets: &BTreeSet<u32>) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(insts.len() + targets.len());
    for (pos, inst) in insts {
        if targets.contains(&pos) {
            out.push(Instruction::Label(pos));
        }
        out.push(inst);
    }
    out
}
