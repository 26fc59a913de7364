use noak::AccessFlags;
use std::collections::BTreeMap;
use ustr::Ustr;

use crate::ir::code::Instruction;
use crate::ir::module::NameAndType;

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Ustr,
    pub desc: Ustr,
    pub access: AccessFlags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub name: Ustr,
    pub desc: Ustr,
    pub access: AccessFlags,
    pub code: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: Ustr,
    pub superclass: Option<Ustr>,
    pub interfaces: Vec<Ustr>,
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
}

pub type ClassMap = BTreeMap<Ustr, Class>;

impl Field {
    pub fn new(name: &str, desc: &str, access: AccessFlags) -> Field {
        Field {
            name: name.into(),
            desc: desc.into(),
            access,
        }
    }

    pub fn is_static(&self) -> bool {
        self.access.contains(AccessFlags::STATIC)
    }

    pub fn name_and_type(&self) -> NameAndType {
        (self.name, self.desc)
    }

    /// Clears `PRIVATE`/`PROTECTED` and sets `PUBLIC`. Returns whether anything changed.
    pub fn publicize(&mut self) -> bool {
        let before = self.access;
        self.access.remove(AccessFlags::PRIVATE | AccessFlags::PROTECTED);
        self.access.insert(AccessFlags::PUBLIC);
        self.access != before
    }
}

impl Method {
    pub fn new(name: &str, desc: &str, access: AccessFlags, code: Vec<Instruction>) -> Method {
        Method {
            name: name.into(),
            desc: desc.into(),
            access,
            code,
        }
    }

    pub fn is_static(&self) -> bool {
        self.access.contains(AccessFlags::STATIC)
    }

    pub fn name_and_type(&self) -> NameAndType {
        (self.name, self.desc)
    }
}

impl Class {
    pub fn new(name: &str, superclass: Option<&str>) -> Class {
        Class {
            name: name.into(),
            superclass: superclass.map(Ustr::from),
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn method(&self, name: NameAndType) -> Option<&Method> {
        self.methods.iter().find(|method| method.name_and_type() == name)
    }

    pub fn declares_method(&self, name: NameAndType) -> bool {
        self.method(name).is_some()
    }

    pub fn declares_field(&self, name: NameAndType) -> bool {
        self.fields.iter().any(|field| field.name_and_type() == name)
    }

    pub fn remove_method(&mut self, name: NameAndType) -> Option<Method> {
        let index = self.methods.iter().position(|method| method.name_and_type() == name)?;
        Some(self.methods.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_bits_follow_class_file_layout() {
        assert_eq!(AccessFlags::PUBLIC.bits(), 0x0001);
        assert_eq!(AccessFlags::PRIVATE.bits(), 0x0002);
        assert_eq!(AccessFlags::PROTECTED.bits(), 0x0004);
        assert_eq!(AccessFlags::STATIC.bits(), 0x0008);
    }

    #[test]
    fn publicize_keeps_other_bits() {
        let mut field = Field::new("x", "I", AccessFlags::PRIVATE | AccessFlags::STATIC | AccessFlags::FINAL);
        assert!(field.publicize());
        assert_eq!(field.access, AccessFlags::PUBLIC | AccessFlags::STATIC | AccessFlags::FINAL);
        assert!(!field.publicize());
    }

    #[test]
    fn publicize_clears_protected() {
        let mut field = Field::new("y", "J", AccessFlags::PROTECTED);
        field.publicize();
        assert_eq!(field.access, AccessFlags::PUBLIC);
    }

    #[test]
    fn remove_method_by_signature() {
        let mut class = Class::new("A", Some("java/lang/Object"));
        class.methods.push(Method::new("getX", "()I", AccessFlags::empty(), Vec::new()));
        class.methods.push(Method::new("getX", "()J", AccessFlags::empty(), Vec::new()));
        let removed = class.remove_method(("getX".into(), "()J".into())).unwrap();
        assert_eq!(removed.desc.as_str(), "()J");
        assert_eq!(class.methods.len(), 1);
        assert!(class.remove_method(("getY".into(), "()I".into())).is_none());
    }
}
