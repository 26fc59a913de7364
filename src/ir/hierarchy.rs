use std::collections::{HashMap, HashSet, VecDeque};
use ustr::Ustr;

use crate::ir::class::{Class, ClassMap};
use crate::ir::module::NameAndType;
use crate::ir::platform::{ClassHeader, PlatformIndex};

pub trait Push<K, V> {
    fn push(&mut self, key: K, value: V);
}

impl<V> Push<Ustr, V> for HashMap<Ustr, Vec<V>> {
    fn push(&mut self, key: Ustr, value: V) {
        self.entry(key).or_default().push(value);
    }
}

#[derive(Debug, Default)]
pub struct Subclasses(HashMap<Ustr, Vec<Ustr>>);

impl Subclasses {
    pub fn new(classes: &ClassMap) -> Subclasses {
        let mut map: HashMap<Ustr, Vec<Ustr>> = HashMap::new();
        for (name, data) in classes {
            if let Some(superclass) = data.superclass {
                map.push(superclass, *name);
            }
        }
        Subclasses(map)
    }

    pub fn descendants(&self, class: Ustr) -> Vec<Ustr> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        let mut out = Vec::new();
        seen.insert(class);
        queue.push_back(class);
        while let Some(name) = queue.pop_front() {
            out.push(name);
            for child in self.0.get(&name).into_iter().flatten() {
                if seen.insert(*child) {
                    queue.push_back(*child);
                }
            }
        }
        out
    }
}

#[derive(Clone, Copy)]
enum Node<'a> {
    Program(&'a Class),
    Platform(&'a ClassHeader),
}

impl<'a> Node<'a> {
    fn superclass(&self) -> Option<Ustr> {
        match self {
            Node::Program(class) => class.superclass,
            Node::Platform(header) => header.superclass,
        }
    }

    fn interfaces(&self) -> &'a [Ustr] {
        match *self {
            Node::Program(class) => &class.interfaces,
            Node::Platform(header) => &header.interfaces,
        }
    }

    fn declares(&self, name: NameAndType) -> bool {
        match self {
            Node::Program(class) => class.declares_method(name),
            Node::Platform(header) => header.declares(name),
        }
    }

    fn declares_field(&self, name: NameAndType) -> bool {
        match self {
            Node::Program(class) => class.declares_field(name),
            Node::Platform(header) => header.declares_field(name),
        }
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Ancestors {
    pub resolved: Vec<Ustr>,
    pub unresolved: Vec<Ustr>,
}

pub struct Hierarchy<'a> {
    classes: &'a ClassMap,
    platform: &'a dyn PlatformIndex,
    subclasses: &'a Subclasses,
}

impl<'a> Hierarchy<'a> {
    pub fn new(classes: &'a ClassMap, platform: &'a dyn PlatformIndex, subclasses: &'a Subclasses) -> Hierarchy<'a> {
        Hierarchy {
            classes,
            platform,
            subclasses,
        }
    }

    fn node(&self, name: Ustr) -> Option<Node<'a>> {
        if let Some(class) = self.classes.get(&name) {
            return Some(Node::Program(class));
        }
        self.platform.lookup(name).map(Node::Platform)
    }

    /// Every proper supertype of `class`, superclass before interfaces.
    pub fn ancestors(&self, class: Ustr) -> Ancestors {
        let mut out = Ancestors::default();
        let mut seen = HashSet::new();
        let mut stack = vec![class];
        seen.insert(class);
        while let Some(name) = stack.pop() {
            let node = match self.node(name) {
                Some(node) => node,
                None => {
                    out.unresolved.push(name);
                    continue;
                }
            };
            if name != class {
                out.resolved.push(name);
            }
            // pushed in reverse so the superclass is walked first
            for iface in node.interfaces().iter().rev() {
                if seen.insert(*iface) {
                    stack.push(*iface);
                }
            }
            if let Some(superclass) = node.superclass() {
                if seen.insert(superclass) {
                    stack.push(superclass);
                }
            }
        }
        out
    }

    pub fn descendants(&self, class: Ustr) -> Vec<Ustr> {
        self.subclasses.descendants(class)
    }

    /// With `strict`, an ancestor that cannot be resolved counts as a declaration.
    pub fn shadowed(&self, class: Ustr, name: NameAndType, strict: bool) -> bool {
        let ancestors = self.ancestors(class);
        if strict && !ancestors.unresolved.is_empty() {
            return true;
        }
        let declares = |other: &Ustr| *other != class && self.node(*other).map_or(false, |node| node.declares(name));
        ancestors.resolved.iter().any(declares) || self.descendants(class).iter().any(declares)
    }

    fn superinterfaces(&self, class: Ustr) -> Vec<Ustr> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        let mut stack: Vec<Ustr> = self.node(class).map(|node| node.interfaces().to_vec()).unwrap_or_default();
        while let Some(name) = stack.pop() {
            if !seen.insert(name) {
                continue;
            }
            out.push(name);
            if let Some(node) = self.node(name) {
                stack.extend(node.interfaces().iter().copied());
            }
        }
        out
    }

    /// Whether a field reference through a proper descendant of `class` would
    /// resolve to some other field with this signature.
    ///
    /// Resolution looks at the descendant's own fields, then its superinterfaces,
    /// before walking up to `class`.
    pub fn field_hidden(&self, class: Ustr, name: NameAndType) -> bool {
        let declares = |other: &Ustr| self.node(*other).map_or(false, |node| node.declares_field(name));
        self.descendants(class)
            .iter()
            .filter(|other| **other != class)
            .any(|other| declares(other) || self.superinterfaces(*other).iter().any(declares))
    }
}
