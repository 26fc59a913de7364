use noak::error::DecodeError;
use noak::reader::attributes::{Attribute, AttributeContent, Code};
use noak::reader::cpool::{ConstantPool, ToValue};
use noak::reader::Class;
use thiserror::Error;
use ustr::Ustr;

use crate::ir::class::{Class as IrClass, Field, Method};
use crate::ir::platform::ClassHeader;

pub mod code;
mod flow;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed class file: {0:?}")]
    Decode(DecodeError),
    #[error("constant pool entry has the wrong kind")]
    BadConstantRef,
}

impl From<DecodeError> for ParseError {
    fn from(err: DecodeError) -> Self {
        ParseError::Decode(err)
    }
}

fn as_code<'a>(attr: Attribute<'a>, pool: &ConstantPool<'a>) -> Result<Option<Code<'a>>, ParseError> {
    if attr.name().retrieve_from(pool)?.as_bytes() != b"Code" {
        return Ok(None);
    }
    match attr.read_content(pool)? {
        AttributeContent::Code(data) => Ok(Some(data)),
        _ => Err(ParseError::BadConstantRef),
    }
}

pub fn parse(buf: &[u8]) -> Result<(Ustr, Class), ParseError> {
    let mut class = Class::new(buf)?;
    let name = code::ustr(class.this_class_name()?);
    Ok((name, class))
}

fn supertypes(class: &mut Class) -> Result<(Option<Ustr>, Vec<Ustr>), ParseError> {
    let superclass = class.super_class_name()?.map(code::ustr);
    let mut interfaces = Vec::new();
    for iface in class.interfaces()? {
        let iface = iface?;
        let pool = class.pool()?;
        interfaces.push(code::ustr(pool.get(pool.get(iface)?.name)?.content));
    }
    Ok((superclass, interfaces))
}

pub fn transform(mut class: Class) -> Result<IrClass, ParseError> {
    let name = code::ustr(class.this_class_name()?);
    let (superclass, interfaces) = supertypes(&mut class)?;
    let mut fields = Vec::new();
    let mut methods = Vec::new();
    for field in class.fields()? {
        let field = field?;
        let pool = class.pool()?;
        fields.push(Field {
            name: code::ustr(field.name().retrieve_from(pool)?),
            desc: code::ustr(field.descriptor().retrieve_from(pool)?),
            access: field.access_flags(),
        });
    }
    for method in class.methods()? {
        let method = method?;
        let pool = class.pool()?;
        let mut body = Vec::new();
        for attr in method.attributes() {
            if let Some(data) = as_code(attr?, pool)? {
                let decoded = code::parse_code(&data, pool)?;
                body = flow::with_labels(decoded.insts, &decoded.targets);
            }
        }
        methods.push(Method {
            name: code::ustr(method.name().retrieve_from(pool)?),
            desc: code::ustr(method.descriptor().retrieve_from(pool)?),
            access: method.access_flags(),
            code: body,
        });
    }
    Ok(IrClass {
        name,
        superclass,
        interfaces,
        fields,
        methods,
    })
}

pub fn header(mut class: Class) -> Result<(Ustr, ClassHeader), ParseError> {
    let name = code::ustr(class.this_class_name()?);
    let (superclass, interfaces) = supertypes(&mut class)?;
    let mut fields = Vec::new();
    for field in class.fields()? {
        let field = field?;
        let pool = class.pool()?;
        let fname = code::ustr(field.name().retrieve_from(pool)?);
        let desc = code::ustr(field.descriptor().retrieve_from(pool)?);
        fields.push((fname, desc));
    }
    let mut methods = Vec::new();
    for method in class.methods()? {
        let method = method?;
        let pool = class.pool()?;
        let mname = code::ustr(method.name().retrieve_from(pool)?);
        let desc = code::ustr(method.descriptor().retrieve_from(pool)?);
        methods.push((mname, desc));
    }
    let header = ClassHeader {
        superclass,
        interfaces,
        fields,
        methods,
    };
    Ok((name, header))
}
