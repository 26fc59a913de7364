use cached::proc_macro::cached;
use noak::descriptor::TypeDescriptor;
use noak::mutf8::MStr;
use ustr::Ustr;

use crate::ir::module::Member;

pub mod op {
    pub const ILOAD: u8 = 0x15;
    pub const ALOAD: u8 = 0x19;
    pub const ISTORE: u8 = 0x36;
    pub const IRETURN: u8 = 0xac;
    pub const RETURN: u8 = 0xb1;
    pub const GETSTATIC: u8 = 0xb2;
    pub const PUTSTATIC: u8 = 0xb3;
    pub const GETFIELD: u8 = 0xb4;
    pub const PUTFIELD: u8 = 0xb5;
    pub const INVOKEVIRTUAL: u8 = 0xb6;
    pub const INVOKESPECIAL: u8 = 0xb7;
    pub const INVOKESTATIC: u8 = 0xb8;
    pub const INVOKEINTERFACE: u8 = 0xb9;

    pub const STATIC_OFFSET: u8 = GETFIELD - GETSTATIC;
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VarType {
    Int,
    Long,
    Float,
    Double,
    Reference,
}

impl VarType {
    pub fn from_descriptor(desc: &str) -> Option<VarType> {
        match desc.as_bytes().first()? {
            b'B' | b'C' | b'I' | b'S' | b'Z' => Some(VarType::Int),
            b'J' => Some(VarType::Long),
            b'F' => Some(VarType::Float),
            b'D' => Some(VarType::Double),
            b'L' | b'[' => Some(VarType::Reference),
            _ => None,
        }
    }

    pub fn opcode(self, base: u8) -> u8 {
        base + self as u8
    }
}

#[cached]
pub fn field_type(desc: Ustr) -> Option<VarType> {
    let input = MStr::from_bytes(desc.as_str().as_bytes()).ok()?;
    TypeDescriptor::parse(input).ok()?;
    VarType::from_descriptor(&desc)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FieldOp {
    GetStatic,
    PutStatic,
    GetField,
    PutField,
}

impl FieldOp {
    pub fn new(get: bool, is_static: bool) -> FieldOp {
        match (get, is_static) {
            (true, false) => FieldOp::GetField,
            (false, false) => FieldOp::PutField,
            (true, true) => FieldOp::GetStatic,
            (false, true) => FieldOp::PutStatic,
        }
    }

    pub fn opcode(self) -> u8 {
        match self {
            FieldOp::GetStatic => op::GETSTATIC,
            FieldOp::PutStatic => op::PUTSTATIC,
            FieldOp::GetField => op::GETFIELD,
            FieldOp::PutField => op::PUTFIELD,
        }
    }

    pub fn is_static(self) -> bool {
        matches!(self, FieldOp::GetStatic | FieldOp::PutStatic)
    }

    pub fn is_get(self) -> bool {
        matches!(self, FieldOp::GetStatic | FieldOp::GetField)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum InvokeKind {
    Virtual,
    Special,
    Static,
    Interface,
}

impl InvokeKind {
    pub fn opcode(self) -> u8 {
        match self {
            InvokeKind::Virtual => op::INVOKEVIRTUAL,
            InvokeKind::Special => op::INVOKESPECIAL,
            InvokeKind::Static => op::INVOKESTATIC,
            InvokeKind::Interface => op::INVOKEINTERFACE,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Instruction {
    Label(u32),
    Line(u16),
    Load(VarType, u16),
    Store(VarType, u16),
    Field(FieldOp, Member),
    Invoke(InvokeKind, Member),
    Return(Option<VarType>),
    Other(u8),
}

impl Instruction {
    pub fn opcode(&self) -> Option<u8> {
        Some(match self {
            Instruction::Label(_) | Instruction::Line(_) => return None,
            Instruction::Load(typ, _) => typ.opcode(op::ILOAD),
            Instruction::Store(typ, _) => typ.opcode(op::ISTORE),
            Instruction::Field(fop, _) => fop.opcode(),
            Instruction::Invoke(kind, _) => kind.opcode(),
            Instruction::Return(Some(typ)) => typ.opcode(op::IRETURN),
            Instruction::Return(None) => op::RETURN,
            Instruction::Other(opcode) => *opcode,
        })
    }

    pub fn var(&self) -> Option<u16> {
        match self {
            Instruction::Load(_, slot) | Instruction::Store(_, slot) => Some(*slot),
            _ => None,
        }
    }

    pub fn member(&self) -> Option<&Member> {
        match self {
            Instruction::Field(_, member) | Instruction::Invoke(_, member) => Some(member),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        self.opcode().is_none()
    }
}

pub fn real(code: &[Instruction]) -> Vec<&Instruction> {
    code.iter().filter(|inst| !inst.is_marker()).collect()
}
