#![allow(dead_code)]

use noak::AccessFlags;
use ustr::Ustr;

use classinline::ir::class::{Class, ClassMap, Field, Method};
use classinline::ir::code::{FieldOp, Instruction, InvokeKind, VarType};
use classinline::ir::module::Member;
use classinline::ir::platform::ClassPath;
use classinline::pass::inline_fields::{self, Mode, Options, Report};

pub const OBJECT: &str = "java/lang/Object";

pub fn program(classes: Vec<Class>) -> ClassMap {
    classes.into_iter().map(|class| (class.name, class)).collect()
}

pub fn class(name: &str, superclass: &str) -> Class {
    Class::new(name, Some(superclass))
}

pub fn with_field(mut class: Class, name: &str, desc: &str, access: AccessFlags) -> Class {
    class.fields.push(Field::new(name, desc, access));
    class
}

pub fn with_method(mut class: Class, name: &str, desc: &str, access: AccessFlags, code: Vec<Instruction>) -> Class {
    class.methods.push(Method::new(name, desc, access, code));
    class
}

fn var_type(desc: &str) -> VarType {
    VarType::from_descriptor(desc).expect("field descriptor")
}

/// Body of `return this.field` (or `return Owner.field` when static).
pub fn getter(owner: &str, field: &str, desc: &str, is_static: bool) -> Vec<Instruction> {
    let mut code = vec![Instruction::Label(0), Instruction::Line(10)];
    if !is_static {
        code.push(Instruction::Load(VarType::Reference, 0));
    }
    code.push(Instruction::Field(FieldOp::new(true, is_static), Member::new(owner, field, desc)));
    code.push(Instruction::Return(Some(var_type(desc))));
    code
}

/// Body of `this.field = value` (or `Owner.field = value` when static).
pub fn setter(owner: &str, field: &str, desc: &str, is_static: bool) -> Vec<Instruction> {
    let mut code = vec![Instruction::Label(0), Instruction::Line(20)];
    if !is_static {
        code.push(Instruction::Load(VarType::Reference, 0));
    }
    code.push(Instruction::Load(var_type(desc), if is_static { 0 } else { 1 }));
    code.push(Instruction::Field(FieldOp::new(false, is_static), Member::new(owner, field, desc)));
    code.push(Instruction::Return(None));
    code
}

pub fn call(kind: InvokeKind, owner: &str, name: &str, desc: &str) -> Instruction {
    Instruction::Invoke(kind, Member::new(owner, name, desc))
}

pub fn field_access(op: FieldOp, owner: &str, name: &str, desc: &str) -> Instruction {
    Instruction::Field(op, Member::new(owner, name, desc))
}

pub fn run(classes: &mut ClassMap, mode: Mode) -> Report {
    let options = Options {
        mode,
        ..Options::default()
    };
    run_with(classes, &options)
}

pub fn run_with(classes: &mut ClassMap, options: &Options) -> Report {
    inline_fields::apply(classes, &ClassPath::defaults(), options)
}

pub fn get<'a>(classes: &'a ClassMap, name: &str) -> &'a Class {
    &classes[&Ustr::from(name)]
}

pub fn has_method(classes: &ClassMap, class: &str, name: &str, desc: &str) -> bool {
    get(classes, class).declares_method((name.into(), desc.into()))
}

pub fn body<'a>(classes: &'a ClassMap, class: &str, name: &str, desc: &str) -> &'a [Instruction] {
    &get(classes, class).method((name.into(), desc.into())).expect("method").code
}

pub fn field_flags(classes: &ClassMap, class: &str, name: &str) -> AccessFlags {
    get(classes, class)
        .fields
        .iter()
        .find(|field| field.name.as_str() == name)
        .expect("field")
        .access
}
