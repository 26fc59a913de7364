use serde::de::{Deserialize, Deserializer, Error};
use std::fmt;
use ustr::Ustr;

pub type NameAndType = (Ustr, Ustr);

#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Member(pub Ustr, pub NameAndType);

impl Member {
    pub fn new(owner: &str, name: &str, desc: &str) -> Member {
        Member(owner.into(), (name.into(), desc.into()))
    }

    /// Parses `pkg.Class.name:desc` into a member with an internal class name.
    pub fn parse(value: &str) -> Option<Member> {
        let (class, nametype) = value.rsplit_once('.')?;
        let (name, desc) = nametype.rsplit_once(':')?;
        Some(Member(class.to_string().replace('.', "/").into(), (name.into(), desc.into())))
    }

    pub fn owner(&self) -> Ustr {
        self.0
    }

    pub fn name(&self) -> Ustr {
        (self.1).0
    }

    pub fn desc(&self) -> Ustr {
        (self.1).1
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}:{}", self.0, (self.1).0, (self.1).1)
    }
}

impl<'de> Deserialize<'de> for Member {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value: String = Deserialize::deserialize(deserializer)?;
        match Member::parse(&value) {
            Some(parsed) => Ok(parsed),
            None => Err(D::Error::custom("malformed")),
        }
    }
}
