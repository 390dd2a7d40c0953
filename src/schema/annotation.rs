use crate::core::TypeTag;
use regex::Regex;

lazy_static::lazy_static! {
    static ref PROPERTY_TAG: Regex =
        Regex::new(r"@property(?:-(read|write))?\s+(\S+)\s+\$(\w+)")
            .expect("property tag pattern is valid");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAccess {
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

/// One `@property[-read|-write] <type> $<name>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTag {
    pub name: String,
    pub tag: TypeTag,
    pub access: PropertyAccess,
}

impl PropertyTag {
    /// Read-only tags describe computed values and are not stored attributes.
    pub fn is_declared_attribute(&self) -> bool {
        self.access != PropertyAccess::ReadOnly
    }
}

/// Extracts every property tag from a documentation block, in order.
///
/// Text that doesn't match the tag grammar is ignored.
pub fn parse_property_tags(block: &str) -> Vec<PropertyTag> {
    PROPERTY_TAG
        .captures_iter(block)
        .map(|caps| {
            let access = match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()) {
                Some(q) if q == "read" => PropertyAccess::ReadOnly,
                Some(_) => PropertyAccess::WriteOnly,
                None => PropertyAccess::ReadWrite,
            };
            PropertyTag {
                name: caps[3].to_string(),
                tag: TypeTag::parse(&caps[2]),
                access,
            }
        })
        .collect()
}
