/* Exports */

pub mod errors;
pub mod vocab;
pub mod metadata;
pub mod model;
pub mod rdf;

pub use metadata::RdfMetadata as RdfMetadata;
pub use metadata::RawMetadata as RawMetadata;
pub use model::typemgr::TypeManager as TypeManager;
pub use model::typemgr::ModelMixin as ModelMixin;
pub use model::typemgr::ModelClass as ModelClass;
pub use model::fields::FieldDef as FieldDef;
pub use model::object::RepoObject as RepoObject;
pub use model::object::Bitstream as Bitstream;
pub use model::manager::Connection as Connection;
pub use model::manager::RepoStore as RepoStore;

/* Common Definitions */

/* One value bound to a predicate of a repository resource. A value is
   either a reference to another resource or a literal; literals carry
   a datatype iri or a language tag. Values are never mutated in place,
   only added to and removed from an RdfMetadata container. */
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize, Hash)]
pub enum RdfValue {
  Ref{ uri: String },
  TypedLit{ val: String, datatype: String },
  LangTaggedLit{ val: String, lang: String },
}
impl RdfValue {
  pub fn reference(uri: impl Into<String>) -> Self {
    RdfValue::Ref{ uri: uri.into() }
  }
  pub fn typed(val: impl Into<String>, datatype: impl Into<String>) -> Self {
    RdfValue::TypedLit{ val: val.into(), datatype: datatype.into() }
  }
  pub fn string(val: impl Into<String>) -> Self {
    RdfValue::TypedLit{ val: val.into(), datatype: vocab::xsd::STRING.to_string() }
  }
  pub fn lang(val: impl Into<String>, lang: impl Into<String>) -> Self {
    RdfValue::LangTaggedLit{ val: val.into(), lang: lang.into() }
  }
  pub fn integer(val: i64) -> Self {
    RdfValue::TypedLit{ val: val.to_string(), datatype: vocab::xsd::INTEGER.to_string() }
  }
  /* The lexical form, regardless of variant */
  pub fn lexical(&self) -> &str {
    match self {
      RdfValue::Ref{ uri } => uri,
      RdfValue::TypedLit{ val, .. } => val,
      RdfValue::LangTaggedLit{ val, .. } => val,
    }
  }
  pub fn datatype(&self) -> Option<&str> {
    match self {
      RdfValue::TypedLit{ datatype, .. } => Some(datatype),
      _ => None,
    }
  }
  pub fn language(&self) -> Option<&str> {
    match self {
      RdfValue::LangTaggedLit{ lang, .. } => Some(lang),
      _ => None,
    }
  }
  pub fn is_ref(&self) -> bool {
    match self {
      RdfValue::Ref{ .. } => true,
      _ => false,
    }
  }
}
impl std::convert::From<&str> for RdfValue {
  fn from(s: &str) -> Self {
    RdfValue::string(s)
  }
}
impl std::convert::From<String> for RdfValue {
  fn from(s: String) -> Self {
    RdfValue::string(s)
  }
}
impl std::convert::From<i64> for RdfValue {
  fn from(v: i64) -> Self {
    RdfValue::integer(v)
  }
}
