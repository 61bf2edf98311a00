//! Vocabulary constants and the namespace registry.
//!
//! Every predicate and type iri used by the mapping layer is declared here
//! once, as a full iri, so the rest of the crate never concatenates
//! namespace strings by hand.

/* A named XML/RDF vocabulary. `term` builds a full iri from a local name. */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
  prefix: &'static str,
  base: &'static str,
}
impl Namespace {
  pub const fn new(prefix: &'static str, base: &'static str) -> Self {
    Namespace { prefix, base }
  }
  pub fn prefix(&self) -> &'static str {
    self.prefix
  }
  pub fn base(&self) -> &'static str {
    self.base
  }
  pub fn term(&self, name: &str) -> String {
    format!("{}{}", self.base, name)
  }
  pub fn covers(&self, iri: &str) -> bool {
    iri.starts_with(self.base)
  }
}

/* The vocabularies a stock repository deployment emits. */
pub static NAMESPACES: &[Namespace] = &[
  Namespace::new("premis", "http://www.loc.gov/premis/rdf/v1#"),
  Namespace::new("image", "http://www.modeshape.org/images/1.0"),
  Namespace::new("sv", "http://www.jcp.org/jcr/sv/1.0"),
  Namespace::new("nt", "http://www.jcp.org/jcr/nt/1.0"),
  Namespace::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
  Namespace::new("xsi", "http://www.w3.org/2001/XMLSchema-instance"),
  Namespace::new("mode", "http://www.modeshape.org/1.0"),
  Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
  Namespace::new("fedora", "http://fedora.info/definitions/v4/repository#"),
  Namespace::new("fedora_index", "http://fedora.info/definitions/v4/indexing#"),
  Namespace::new("xml", "http://www.w3.org/XML/1998/namespace"),
  Namespace::new("ebucore", "http://www.ebu.ch/metadata/ontologies/ebucore/ebucore#"),
  Namespace::new("ldp", "http://www.w3.org/ns/ldp#"),
  Namespace::new("xs", "http://www.w3.org/2001/XMLSchema"),
  Namespace::new("fedoraconfig", "http://fedora.info/definitions/v4/config#"),
  Namespace::new("mix", "http://www.jcp.org/jcr/mix/1.0"),
  Namespace::new("foaf", "http://xmlns.com/foaf/0.1/"),
  Namespace::new("dc", "http://purl.org/dc/elements/1.1/"),
  Namespace::new("dcterms", "http://purl.org/dc/terms/"),
  Namespace::new("cis", "http://cis.vscht.cz/ns/repository#"),
  Namespace::new("cesnet", "http://cesnet.cz/ns/repository#"),
  Namespace::new("cesnet_state", "http://cesnet.cz/ns/repository/state#"),
  Namespace::new("cesnet_type", "http://cesnet.cz/ns/repository/type#"),
  Namespace::new("acl", "http://www.w3.org/ns/auth/acl#"),
];

pub fn namespace(prefix: &str) -> Option<&'static Namespace> {
  NAMESPACES.iter().find(|ns| ns.prefix == prefix)
}

/// RDF vocabulary
pub mod rdf {
  /// rdf:type, the reserved predicate carrying a resource's declared type set
  pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

/// XSD datatypes
pub mod xsd {
  pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
  pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
  pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
  pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
  pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
  pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
  pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
  pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// Dublin Core elements
pub mod dc {
  pub const TITLE: &str = "http://purl.org/dc/elements/1.1/title";
  pub const CREATOR: &str = "http://purl.org/dc/elements/1.1/creator";
  pub const DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";
}

/// Repository-server vocabulary
pub mod fedora {
  /// The base type every repository resource carries
  pub const RESOURCE: &str = "http://fedora.info/definitions/v4/repository#Resource";
  pub const CONTAINER: &str = "http://fedora.info/definitions/v4/repository#Container";
  pub const HAS_PARENT: &str = "http://fedora.info/definitions/v4/repository#hasParent";
  pub const CREATED: &str = "http://fedora.info/definitions/v4/repository#created";
  pub const CREATED_BY: &str = "http://fedora.info/definitions/v4/repository#createdBy";
  pub const LAST_MODIFIED: &str = "http://fedora.info/definitions/v4/repository#lastModified";
  pub const LAST_MODIFIED_BY: &str = "http://fedora.info/definitions/v4/repository#lastModifiedBy";
  pub const PRIMARY_TYPE: &str = "http://fedora.info/definitions/v4/repository#primaryType";
  pub const MIXIN_TYPES: &str = "http://fedora.info/definitions/v4/repository#mixinTypes";
}

/// Dublin Core terms
pub mod dcterms {
  pub const EXTENT: &str = "http://purl.org/dc/terms/extent";
  pub const ISSUED: &str = "http://purl.org/dc/terms/issued";
  pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
  pub const IS_PART_OF: &str = "http://purl.org/dc/terms/isPartOf";
  pub const SPATIAL: &str = "http://purl.org/dc/terms/spatial";
}

/// EBU Core vocabulary
pub mod ebucore {
  /// The type marking a child container as a subcollection
  pub const COLLECTION: &str = "http://www.ebu.ch/metadata/ontologies/ebucore/ebucore#Collection";
  pub const HAS_MIME_TYPE: &str = "http://www.ebu.ch/metadata/ontologies/ebucore/ebucore#hasMimeType";
  pub const FILENAME: &str = "http://www.ebu.ch/metadata/ontologies/ebucore/ebucore#filename";
}

/// Linked Data Platform vocabulary
pub mod ldp {
  pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";
}

#[cfg(test)]
mod interface_tests {
  use super::*;
  #[test]
  fn term_0() {
    let dc = namespace("dc").unwrap();
    assert_eq!(dc.term("title"), "http://purl.org/dc/elements/1.1/title");
    assert_eq!(dc.term("title"), dc::TITLE);
  }
  #[test]
  fn covers_0() {
    let fedora = namespace("fedora").unwrap();
    assert!(fedora.covers(fedora::HAS_PARENT));
    assert!(!fedora.covers(dc::TITLE));
  }
  #[test]
  fn unknown_prefix() {
    assert_eq!(namespace("nope"), None);
  }
}
