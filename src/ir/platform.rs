use std::collections::HashMap;
use ustr::Ustr;

use crate::ir::module::{Member, NameAndType};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassHeader {
    pub superclass: Option<Ustr>,
    pub interfaces: Vec<Ustr>,
    pub fields: Vec<NameAndType>,
    pub methods: Vec<NameAndType>,
}

pub trait PlatformIndex {
    fn lookup(&self, name: Ustr) -> Option<&ClassHeader>;
}

#[derive(Debug, Default)]
pub struct ClassPath {
    headers: HashMap<Ustr, ClassHeader>,
}

const CLASS_HEADERS: &[(&str, Option<&str>, &[&str])] = &[
    ("java/lang/Object", None, &[]),
    ("java/lang/Number", Some("java/lang/Object"), &["java/io/Serializable"]),
    ("java/lang/Enum", Some("java/lang/Object"), &["java/lang/Comparable", "java/io/Serializable"]),
    ("java/lang/Record", Some("java/lang/Object"), &[]),
    ("java/lang/Comparable", Some("java/lang/Object"), &[]),
    ("java/lang/Cloneable", Some("java/lang/Object"), &[]),
    ("java/io/Serializable", Some("java/lang/Object"), &[]),
];

const CLASS_METHODS: &[&str] = &[
    "java.lang.Object.<init>:()V",
    "java.lang.Object.getClass:()Ljava/lang/Class;",
    "java.lang.Object.hashCode:()I",
    "java.lang.Object.equals:(Ljava/lang/Object;)Z",
    "java.lang.Object.clone:()Ljava/lang/Object;",
    "java.lang.Object.toString:()Ljava/lang/String;",
    "java.lang.Object.notify:()V",
    "java.lang.Object.notifyAll:()V",
    "java.lang.Object.wait:()V",
    "java.lang.Object.wait:(J)V",
    "java.lang.Object.wait:(JI)V",
    "java.lang.Object.finalize:()V",
    "java.lang.Number.<init>:()V",
    "java.lang.Number.intValue:()I",
    "java.lang.Number.longValue:()J",
    "java.lang.Number.floatValue:()F",
    "java.lang.Number.doubleValue:()D",
    "java.lang.Number.byteValue:()B",
    "java.lang.Number.shortValue:()S",
    "java.lang.Enum.<init>:(Ljava/lang/String;I)V",
    "java.lang.Enum.name:()Ljava/lang/String;",
    "java.lang.Enum.ordinal:()I",
    "java.lang.Enum.getDeclaringClass:()Ljava/lang/Class;",
    "java.lang.Enum.compareTo:(Ljava/lang/Enum;)I",
    "java.lang.Enum.compareTo:(Ljava/lang/Object;)I",
    "java.lang.Record.<init>:()V",
    "java.lang.Record.equals:(Ljava/lang/Object;)Z",
    "java.lang.Record.hashCode:()I",
    "java.lang.Record.toString:()Ljava/lang/String;",
    "java.lang.Comparable.compareTo:(Ljava/lang/Object;)I",
];

impl ClassHeader {
    pub fn declares(&self, name: NameAndType) -> bool {
        self.methods.contains(&name)
    }

    pub fn declares_field(&self, name: NameAndType) -> bool {
        self.fields.contains(&name)
    }
}

impl ClassPath {
    pub fn new() -> ClassPath {
        ClassPath::default()
    }

    /// A class path seeded with the core `java.lang` types every program extends.
    pub fn defaults() -> ClassPath {
        let mut path = ClassPath::new();
        for (name, superclass, interfaces) in CLASS_HEADERS {
            let header = ClassHeader {
                superclass: superclass.map(Ustr::from),
                interfaces: interfaces.iter().map(|name| Ustr::from(*name)).collect(),
                ..ClassHeader::default()
            };
            path.insert((*name).into(), header);
        }
        for key in CLASS_METHODS {
            if let Some(Member(class, name)) = Member::parse(key) {
                path.headers.entry(class).or_default().methods.push(name);
            }
        }
        path
    }

    pub fn insert(&mut self, name: Ustr, header: ClassHeader) {
        self.headers.insert(name, header);
    }
}

impl PlatformIndex for ClassPath {
    fn lookup(&self, name: Ustr) -> Option<&ClassHeader> {
        self.headers.get(&name)
    }
}
