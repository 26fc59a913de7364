use noak::mutf8::MStr;
use noak::reader::attributes::{Code, RawInstruction as RI};
use noak::reader::cpool::{ConstantPool, InterfaceMethodRef, Item, MethodRef, ToValue};
use std::collections::BTreeSet;
use ustr::Ustr;

use crate::ir::code::{FieldOp, Instruction, InvokeKind, VarType};
use crate::ir::module::Member;
use crate::parser::ParseError;

pub fn ustr(data: &MStr) -> Ustr {
    (unsafe { std::str::from_utf8_unchecked(data.as_bytes()) }).into()
}

fn member(class: &MStr, name: &MStr, desc: &MStr) -> Member {
    Member(ustr(class), (ustr(name), ustr(desc)))
}

fn get_br(pos: u32, offset: i16) -> u32 {
    pos.wrapping_add(offset as u32)
}

fn get_br32(pos: u32, offset: i32) -> u32 {
    pos.wrapping_add(offset as u32)
}

macro_rules! method_ref {
    ($pool:expr, $index:expr) => {
        match $pool.get($index)? {
            Item::MethodRef(MethodRef { class, name_and_type }) | Item::InterfaceMethodRef(InterfaceMethodRef { class, name_and_type }) => {
                let nametype = $pool.get(*name_and_type)?;
                member(
                    $pool.get($pool.get(*class)?.name)?.content,
                    $pool.get(nametype.name)?.content,
                    $pool.get(nametype.descriptor)?.content,
                )
            }
            _ => return Err(ParseError::BadConstantRef),
        }
    };
}

pub struct Decoded {
    pub insts: Vec<(u32, Instruction)>,
    pub targets: BTreeSet<u32>,
}

pub fn parse_code<'a>(code: &Code<'a>, pool: &ConstantPool<'a>) -> Result<Decoded, ParseError> {
    use Instruction::{Load, Other, Return, Store};
    use VarType::{Double as D, Float as F, Int as I, Long as L, Reference as A};

    let mut insts = Vec::new();
    let mut targets = BTreeSet::new();
    for item in code.raw_instructions() {
        let (ipos, rinst) = item?;
        let pos = ipos.as_u32();
        let inst = match rinst {
            RI::Nop => Other(0x00),
            RI::AConstNull => Other(0x01),
            RI::IConstM1 => Other(0x02),
            RI::IConst0 => Other(0x03),
            RI::IConst1 => Other(0x04),
            RI::IConst2 => Other(0x05),
            RI::IConst3 => Other(0x06),
            RI::IConst4 => Other(0x07),
            RI::IConst5 => Other(0x08),
            RI::LConst0 => Other(0x09),
            RI::LConst1 => Other(0x0a),
            RI::FConst0 => Other(0x0b),
            RI::FConst1 => Other(0x0c),
            RI::FConst2 => Other(0x0d),
            RI::DConst0 => Other(0x0e),
            RI::DConst1 => Other(0x0f),
            RI::BIPush { .. } => Other(0x10),
            RI::SIPush { .. } => Other(0x11),
            RI::LdC { .. } => Other(0x12),
            RI::LdCW { .. } => Other(0x13),
            RI::LdC2W { .. } => Other(0x14),
            RI::ILoad { index } => Load(I, index as u16),
            RI::ILoadW { index } => Load(I, index),
            RI::LLoad { index } => Load(L, index as u16),
            RI::LLoadW { index } => Load(L, index),
            RI::FLoad { index } => Load(F, index as u16),
            RI::FLoadW { index } => Load(F, index),
            RI::DLoad { index } => Load(D, index as u16),
            RI::DLoadW { index } => Load(D, index),
            RI::ALoad { index } => Load(A, index as u16),
            RI::ALoadW { index } => Load(A, index),
            RI::ILoad0 => Load(I, 0),
            RI::ILoad1 => Load(I, 1),
            RI::ILoad2 => Load(I, 2),
            RI::ILoad3 => Load(I, 3),
            RI::LLoad0 => Load(L, 0),
            RI::LLoad1 => Load(L, 1),
            RI::LLoad2 => Load(L, 2),
            RI::LLoad3 => Load(L, 3),
            RI::FLoad0 => Load(F, 0),
            RI::FLoad1 => Load(F, 1),
            RI::FLoad2 => Load(F, 2),
            RI::FLoad3 => Load(F, 3),
            RI::DLoad0 => Load(D, 0),
            RI::DLoad1 => Load(D, 1),
            RI::DLoad2 => Load(D, 2),
            RI::DLoad3 => Load(D, 3),
            RI::ALoad0 => Load(A, 0),
            RI::ALoad1 => Load(A, 1),
            RI::ALoad2 => Load(A, 2),
            RI::ALoad3 => Load(A, 3),
            RI::IALoad => Other(0x2e),
            RI::LALoad => Other(0x2f),
            RI::FALoad => Other(0x30),
            RI::DALoad => Other(0x31),
            RI::AALoad => Other(0x32),
            RI::BALoad => Other(0x33),
            RI::CALoad => Other(0x34),
            RI::SALoad => Other(0x35),
            RI::IStore { index } => Store(I, index as u16),
            RI::IStoreW { index } => Store(I, index),
            RI::LStore { index } => Store(L, index as u16),
            RI::LStoreW { index } => Store(L, index),
            RI::FStore { index } => Store(F, index as u16),
            RI::FStoreW { index } => Store(F, index),
            RI::DStore { index } => Store(D, index as u16),
            RI::DStoreW { index } => Store(D, index),
            RI::AStore { index } => Store(A, index as u16),
            RI::AStoreW { index } => Store(A, index),
            RI::IStore0 => Store(I, 0),
            RI::IStore1 => Store(I, 1),
            RI::IStore2 => Store(I, 2),
            RI::IStore3 => Store(I, 3),
            RI::LStore0 => Store(L, 0),
            RI::LStore1 => Store(L, 1),
            RI::LStore2 => Store(L, 2),
            RI::LStore3 => Store(L, 3),
            RI::FStore0 => Store(F, 0),
            RI::FStore1 => Store(F, 1),
            RI::FStore2 => Store(F, 2),
            RI::FStore3 => Store(F, 3),
            RI::DStore0 => Store(D, 0),
            RI::DStore1 => Store(D, 1),
            RI::DStore2 => Store(D, 2),
            RI::DStore3 => Store(D, 3),
            RI::AStore0 => Store(A, 0),
            RI::AStore1 => Store(A, 1),
            RI::AStore2 => Store(A, 2),
            RI::AStore3 => Store(A, 3),
            RI::IAStore => Other(0x4f),
            RI::LAStore => Other(0x50),
            RI::FAStore => Other(0x51),
            RI::DAStore => Other(0x52),
            RI::AAStore => Other(0x53),
            RI::BAStore => Other(0x54),
            RI::CAStore => Other(0x55),
            RI::SAStore => Other(0x56),
            RI::Pop => Other(0x57),
            RI::Pop2 => Other(0x58),
            RI::Dup => Other(0x59),
            RI::DupX1 => Other(0x5a),
            RI::DupX2 => Other(0x5b),
            RI::Dup2 => Other(0x5c),
            RI::Dup2X1 => Other(0x5d),
            RI::Dup2X2 => Other(0x5e),
            RI::Swap => Other(0x5f),
            RI::IAdd => Other(0x60),
            RI::LAdd => Other(0x61),
            RI::FAdd => Other(0x62),
            RI::DAdd => Other(0x63),
            RI::ISub => Other(0x64),
            RI::LSub => Other(0x65),
            RI::FSub => Other(0x66),
            RI::DSub => Other(0x67),
            RI::IMul => Other(0x68),
            RI::LMul => Other(0x69),
            RI::FMul => Other(0x6a),
            RI::DMul => Other(0x6b),
            RI::IDiv => Other(0x6c),
            RI::LDiv => Other(0x6d),
            RI::FDiv => Other(0x6e),
            RI::DDiv => Other(0x6f),
            RI::IRem => Other(0x70),
            RI::LRem => Other(0x71),
            RI::FRem => Other(0x72),
            RI::DRem => Other(0x73),
            RI::INeg => Other(0x74),
            RI::LNeg => Other(0x75),
            RI::FNeg => Other(0x76),
            RI::DNeg => Other(0x77),
            RI::IShL => Other(0x78),
            RI::LShL => Other(0x79),
            RI::IShR => Other(0x7a),
            RI::LShR => Other(0x7b),
            RI::IUShR => Other(0x7c),
            RI::LUShR => Other(0x7d),
            RI::IAnd => Other(0x7e),
            RI::LAnd => Other(0x7f),
            RI::IOr => Other(0x80),
            RI::LOr => Other(0x81),
            RI::IXor => Other(0x82),
            RI::LXor => Other(0x83),
            RI::IInc { .. } | RI::IIncW { .. } => Other(0x84),
            RI::I2L => Other(0x85),
            RI::I2F => Other(0x86),
            RI::I2D => Other(0x87),
            RI::L2I => Other(0x88),
            RI::L2F => Other(0x89),
            RI::L2D => Other(0x8a),
            RI::F2I => Other(0x8b),
            RI::F2L => Other(0x8c),
            RI::F2D => Other(0x8d),
            RI::D2I => Other(0x8e),
            RI::D2L => Other(0x8f),
            RI::D2F => Other(0x90),
            RI::I2B => Other(0x91),
            RI::I2C => Other(0x92),
            RI::I2S => Other(0x93),
            RI::LCmp => Other(0x94),
            RI::FCmpL => Other(0x95),
            RI::FCmpG => Other(0x96),
            RI::DCmpL => Other(0x97),
            RI::DCmpG => Other(0x98),
            RI::IfEq { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0x99)
            }
            RI::IfNe { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0x9a)
            }
            RI::IfLt { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0x9b)
            }
            RI::IfGe { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0x9c)
            }
            RI::IfGt { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0x9d)
            }
            RI::IfLe { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0x9e)
            }
            RI::IfICmpEq { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0x9f)
            }
            RI::IfICmpNe { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa0)
            }
            RI::IfICmpLt { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa1)
            }
            RI::IfICmpGe { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa2)
            }
            RI::IfICmpGt { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa3)
            }
            RI::IfICmpLe { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa4)
            }
            RI::IfACmpEq { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa5)
            }
            RI::IfACmpNe { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa6)
            }
            RI::Goto { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa7)
            }
            RI::JSr { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xa8)
            }
            RI::Ret { .. } | RI::RetW { .. } => Other(0xa9),
            RI::TableSwitch(table) => {
                targets.insert(get_br32(pos, table.default_offset()));
                targets.extend(table.pairs().map(|pair| get_br32(pos, pair.offset())));
                Other(0xaa)
            }
            RI::LookupSwitch(lookup) => {
                targets.insert(get_br32(pos, lookup.default_offset()));
                targets.extend(lookup.pairs().map(|pair| get_br32(pos, pair.offset())));
                Other(0xab)
            }
            RI::IReturn => Return(Some(I)),
            RI::LReturn => Return(Some(L)),
            RI::FReturn => Return(Some(F)),
            RI::DReturn => Return(Some(D)),
            RI::AReturn => Return(Some(A)),
            RI::Return => Return(None),
            RI::GetStatic { index } => {
                let field = index.retrieve_from(pool)?;
                Instruction::Field(
                    FieldOp::GetStatic,
                    member(field.class.name, field.name_and_type.name, field.name_and_type.descriptor),
                )
            }
            RI::PutStatic { index } => {
                let field = index.retrieve_from(pool)?;
                Instruction::Field(
                    FieldOp::PutStatic,
                    member(field.class.name, field.name_and_type.name, field.name_and_type.descriptor),
                )
            }
            RI::GetField { index } => {
                let field = index.retrieve_from(pool)?;
                Instruction::Field(
                    FieldOp::GetField,
                    member(field.class.name, field.name_and_type.name, field.name_and_type.descriptor),
                )
            }
            RI::PutField { index } => {
                let field = index.retrieve_from(pool)?;
                Instruction::Field(
                    FieldOp::PutField,
                    member(field.class.name, field.name_and_type.name, field.name_and_type.descriptor),
                )
            }
            RI::InvokeVirtual { index } => {
                let method = index.retrieve_from(pool)?;
                Instruction::Invoke(
                    InvokeKind::Virtual,
                    member(method.class.name, method.name_and_type.name, method.name_and_type.descriptor),
                )
            }
            RI::InvokeSpecial { index } => Instruction::Invoke(InvokeKind::Special, method_ref!(pool, index)),
            RI::InvokeStatic { index } => Instruction::Invoke(InvokeKind::Static, method_ref!(pool, index)),
            RI::InvokeInterface { index, .. } => {
                let method = index.retrieve_from(pool)?;
                Instruction::Invoke(
                    InvokeKind::Interface,
                    member(method.class.name, method.name_and_type.name, method.name_and_type.descriptor),
                )
            }
            RI::InvokeDynamic { .. } => Other(0xba),
            RI::New { .. } => Other(0xbb),
            RI::NewArray { .. } => Other(0xbc),
            RI::ANewArray { .. } => Other(0xbd),
            RI::ArrayLength => Other(0xbe),
            RI::AThrow => Other(0xbf),
            RI::CheckCast { .. } => Other(0xc0),
            RI::InstanceOf { .. } => Other(0xc1),
            RI::MonitorEnter => Other(0xc2),
            RI::MonitorExit => Other(0xc3),
            RI::MultiANewArray { .. } => Other(0xc5),
            RI::IfNull { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xc6)
            }
            RI::IfNonNull { offset } => {
                targets.insert(get_br(pos, offset));
                Other(0xc7)
            }
            RI::GotoW { offset } => {
                targets.insert(get_br32(pos, offset));
                Other(0xc8)
            }
            RI::JSrW { offset } => {
                targets.insert(get_br32(pos, offset));
                Other(0xc9)
            }
        };
        insts.push((pos, inst));
    }
    Ok(Decoded { insts, targets })
}
