use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::{debug, info};
use ustr::Ustr;

use crate::ir::class::{Class, ClassMap, Field};
use crate::ir::hierarchy::{Hierarchy, Subclasses};
use crate::ir::module::{Member, NameAndType};
use crate::ir::platform::PlatformIndex;
use crate::pass::accessor::{self, Accessor};
use crate::pass::rewrite::{self, Target};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Snapshot,
    Progressive,
}

impl Default for Mode {
    fn default() -> Mode {
        Mode::Snapshot
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(value: &str) -> Result<Mode, String> {
        match value {
            "snapshot" => Ok(Mode::Snapshot),
            "progressive" => Ok(Mode::Progressive),
            _ => Err(format!("unknown mode `{}`", value)),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Options {
    pub mode: Mode,
    pub strict: bool,
    pub keep: BTreeSet<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inlined {
    pub class: Ustr,
    pub method: Ustr,
    pub descriptor: Ustr,
    pub field: Ustr,
    pub kind: Accessor,
    pub sites: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Report {
    pub promoted: usize,
    pub rounds: usize,
    pub inlined: Vec<Inlined>,
}

struct Found {
    class: Ustr,
    method: NameAndType,
    field: Field,
    kind: Accessor,
}

struct Context<'a> {
    platform: &'a dyn PlatformIndex,
    subclasses: Subclasses,
    options: &'a Options,
}

impl<'a> Context<'a> {
    fn hierarchy<'b>(&'b self, classes: &'b ClassMap) -> Hierarchy<'b> {
        Hierarchy::new(classes, self.platform, &self.subclasses)
    }

    fn check(&self, classes: &ClassMap, class: &Class, field: &Field, method: NameAndType) -> Option<Accessor> {
        if self.options.keep.contains(&Member(class.name, method)) {
            return None;
        }
        let data = class.method(method)?;
        let hier = self.hierarchy(classes);
        let kind = accessor::classify(&hier, class, field, data, self.options.strict)?;
        if hier.field_hidden(class.name, field.name_and_type()) {
            debug!(class = %class.name, field = %field.name, "field hidden in a subclass, accessor kept");
            return None;
        }
        Some(kind)
    }

    fn inline(&self, classes: &mut ClassMap, found: Found, report: &mut Report) {
        let removed = match classes.get_mut(&found.class) {
            Some(class) => class.remove_method(found.method),
            None => None,
        };
        if removed.is_none() {
            return;
        }
        let target = Target {
            owners: self.subclasses.descendants(found.class).into_iter().collect(),
            method: found.method,
            field: found.field.name_and_type(),
            op: found.kind.field_op(&found.field),
        };
        let sites = rewrite::apply(classes, &target);
        debug!(
            class = %found.class,
            method = %found.method.0,
            desc = %found.method.1,
            field = %found.field.name,
            sites,
            "inlined accessor"
        );
        report.inlined.push(Inlined {
            class: found.class,
            method: found.method.0,
            descriptor: found.method.1,
            field: found.field.name,
            kind: found.kind,
            sites,
        });
    }
}

fn promote(class: &mut Class, index: usize) -> Option<(bool, Field)> {
    let field = class.fields.get_mut(index)?;
    let changed = field.publicize();
    Some((changed, field.clone()))
}

/// Mutates as it goes: a removal is visible to every later classification.
fn progressive(ctx: &Context, classes: &mut ClassMap, report: &mut Report) {
    let names: Vec<Ustr> = classes.keys().copied().collect();
    for name in names {
        let mut index = 0;
        loop {
            let field = match classes.get_mut(&name).and_then(|class| promote(class, index)) {
                Some((changed, field)) => {
                    report.promoted += changed as usize;
                    field
                }
                None => break,
            };
            index += 1;
            let methods: Vec<NameAndType> = match classes.get(&name) {
                Some(class) => class.methods.iter().map(|method| method.name_and_type()).collect(),
                None => break,
            };
            for method in methods {
                let kind = match classes.get(&name) {
                    Some(class) => ctx.check(classes, class, &field, method),
                    None => None,
                };
                if let Some(kind) = kind {
                    let found = Found {
                        class: name,
                        method,
                        field: field.clone(),
                        kind,
                    };
                    ctx.inline(classes, found, report);
                }
            }
        }
    }
    report.rounds = 1;
}

fn collect(ctx: &Context, classes: &ClassMap) -> Vec<Found> {
    let mut found = Vec::new();
    for class in classes.values() {
        for field in &class.fields {
            for method in &class.methods {
                if let Some(kind) = ctx.check(classes, class, field, method.name_and_type()) {
                    found.push(Found {
                        class: class.name,
                        method: method.name_and_type(),
                        field: field.clone(),
                        kind,
                    });
                }
            }
        }
    }
    found
}

fn snapshot(ctx: &Context, classes: &mut ClassMap, report: &mut Report) {
    for class in classes.values_mut() {
        for field in &mut class.fields {
            report.promoted += field.publicize() as usize;
        }
    }
    loop {
        let found = collect(ctx, classes);
        report.rounds += 1;
        if found.is_empty() {
            break;
        }
        for item in found {
            ctx.inline(classes, item, report);
        }
    }
}

pub fn apply(classes: &mut ClassMap, platform: &dyn PlatformIndex, options: &Options) -> Report {
    let ctx = Context {
        platform,
        subclasses: Subclasses::new(classes),
        options,
    };
    let mut report = Report::default();
    match options.mode {
        Mode::Snapshot => snapshot(&ctx, classes, &mut report),
        Mode::Progressive => progressive(&ctx, classes, &mut report),
    }
    let sites: usize = report.inlined.iter().map(|item| item.sites).sum();
    info!(
        mode = ?options.mode,
        classes = classes.len(),
        promoted = report.promoted,
        accessors = report.inlined.len(),
        sites,
        rounds = report.rounds,
        "field inlining done"
    );
    report
}
