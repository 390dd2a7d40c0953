use crate::core::TypeTag;
use crate::schema::parse_property_tags;
use serde::Serialize;

/// Conventional name of the document identifier attribute.
pub const DEFAULT_ID_ATTRIBUTE: &str = "_id";

/// Describes a single attribute known at type-definition time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredAttribute {
    pub name: String,
    pub tag: TypeTag,
}

/// How a record type exposes its statically known attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// Public instance members, in declaration order. Every one is tagged `mixed`.
    Members(&'static [&'static str]),
    /// A documentation block carrying `@property` tags.
    Annotations(&'static str),
}

impl Discovery {
    pub fn discover(&self, type_name: &str, id_attribute: &str) -> DeclaredAttributeSet {
        match self {
            Self::Members(members) => {
                DeclaredAttributeSet::from_members(type_name, id_attribute, members)
            }
            Self::Annotations(block) => {
                DeclaredAttributeSet::from_annotations(type_name, id_attribute, block)
            }
        }
    }
}

/// Ordered set of declared attributes for one record type.
///
/// Always contains the identifier attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredAttributeSet {
    type_name: String,
    id_attribute: String,
    attributes: Vec<DeclaredAttribute>,
}

impl DeclaredAttributeSet {
    fn empty(type_name: &str, id_attribute: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            id_attribute: id_attribute.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Member-reflection mode. A missing identifier is inserted first as `mixed`.
    pub fn from_members(type_name: &str, id_attribute: &str, members: &[&str]) -> Self {
        let mut set = Self::empty(type_name, id_attribute);
        for member in members {
            set.push(member, TypeTag::Mixed);
        }
        set.ensure_identifier(TypeTag::Mixed);
        set
    }

    /// Annotation-block mode. Read-only tags are excluded; a missing
    /// identifier is inserted first as `identifier`.
    pub fn from_annotations(type_name: &str, id_attribute: &str, block: &str) -> Self {
        let mut set = Self::empty(type_name, id_attribute);
        for property in parse_property_tags(block) {
            if property.is_declared_attribute() {
                set.push(&property.name, property.tag);
            }
        }
        set.ensure_identifier(TypeTag::Identifier);
        set
    }

    // First declaration of a name wins.
    fn push(&mut self, name: &str, tag: TypeTag) {
        if !self.contains(name) {
            self.attributes.push(DeclaredAttribute {
                name: name.to_string(),
                tag,
            });
        }
    }

    fn ensure_identifier(&mut self, tag: TypeTag) {
        if !self.contains(&self.id_attribute) {
            let name = self.id_attribute.clone();
            self.attributes.insert(0, DeclaredAttribute { name, tag });
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn id_attribute(&self) -> &str {
        &self.id_attribute
    }

    pub fn get(&self, name: &str) -> Option<&DeclaredAttribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn tag(&self, name: &str) -> Option<&TypeTag> {
        self.get(name).map(|attr| &attr.tag)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|attr| attr.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclaredAttribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_mode_inserts_identifier_first() {
        let set = DeclaredAttributeSet::from_members("Customer", "_id", &["name", "email"]);
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["_id", "name", "email"]);
        assert!(set.iter().all(|attr| attr.tag.is_mixed()));
    }

    #[test]
    fn member_mode_keeps_declared_identifier_position() {
        let set = DeclaredAttributeSet::from_members("Customer", "_id", &["name", "_id", "name"]);
        let names: Vec<&str> = set.names().collect();
        assert_eq!(names, vec!["name", "_id"]);
    }

    #[test]
    fn annotation_mode_excludes_read_only_and_defaults_identifier() {
        let block = "@property string $title\n@property-read int $views\n@property-write bool $flag";
        let set = DeclaredAttributeSet::from_annotations("Article", "_id", block);

        assert_eq!(set.len(), 3);
        assert_eq!(set.tag("_id"), Some(&TypeTag::Identifier));
        assert_eq!(set.tag("title"), Some(&TypeTag::String));
        assert_eq!(set.tag("flag"), Some(&TypeTag::Boolean));
        assert!(!set.contains("views"));
    }

    #[test]
    fn custom_identifier_name() {
        let set = Discovery::Members(&["title"]).discover("Note", "uuid");
        assert_eq!(set.id_attribute(), "uuid");
        assert_eq!(set.names().next(), Some("uuid"));
        assert!(!set.contains("_id"));
    }
}
