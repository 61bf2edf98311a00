
use {
  serde::{Serialize, Deserialize},
  crate::{
    RdfValue,
    errors::MetadataError,
    vocab::rdf,
  }
};

type Result<T> = std::result::Result<T, MetadataError>;

const NO_VALUES: &[RdfValue] = &[];

/* One resource's property graph: predicate iri -> ordered values.
   Properties iterate in first-insertion order. A property bound to no
   values does not exist: emptying a value list drops its key, so an
   absent property and an empty one cannot be told apart. */
#[derive(Debug, Clone, Default, Eq)]
pub struct RdfMetadata {
  id: String,
  props: Vec<(String, Vec<RdfValue>)>,
}

/* Public */
impl RdfMetadata {
  /* Constructors */
  pub fn new() -> Self {
    RdfMetadata {
      id: String::new(),
      props: Vec::new(),
    }
  }
  pub fn from_raw(raw: RawMetadata) -> Self {
    let mut md = RdfMetadata {
      id: raw.id,
      props: Vec::new(),
    };
    for prop in raw.properties {
      for value in prop.values {
        md.add(&prop.name, value);
      }
    }
    md
  }

  /* Identity */
  pub fn id(&self) -> &str {
    &self.id
  }
  pub fn assign_id(&mut self, id: impl Into<String>) -> Result<()> {
    let id = id.into();
    if !self.id.is_empty() {
      return Err(MetadataError::IdentityReassigned(self.id.clone(), id))
    }
    self.id = id;
    Ok(())
  }

  /* Property access */
  pub fn get(&self, prop: &str) -> &[RdfValue] {
    match self.position(prop) {
      Some(pos) => &self.props[pos].1,
      None => NO_VALUES,
    }
  }
  pub fn set(&mut self, prop: &str, values: Vec<RdfValue>) {
    if values.is_empty() {
      self.delete(prop);
      return
    }
    match self.position(prop) {
      Some(pos) => self.props[pos].1 = values,
      None => self.props.push((prop.to_string(), values)),
    }
  }
  pub fn add(&mut self, prop: &str, value: RdfValue) {
    match self.position(prop) {
      Some(pos) => self.props[pos].1.push(value),
      None => self.props.push((prop.to_string(), vec![value])),
    }
  }
  pub fn remove(&mut self, prop: &str, value: &RdfValue) {
    if let Some(pos) = self.position(prop) {
      let values = &mut self.props[pos].1;
      if let Some(val_pos) = values.iter().position(|v| v == value) {
        values.remove(val_pos);
        if values.is_empty() {
          self.props.remove(pos);
        }
      }
    }
  }
  pub fn delete(&mut self, prop: &str) {
    if let Some(pos) = self.position(prop) {
      self.props.remove(pos);
    }
  }
  pub fn contains(&self, prop: &str) -> bool {
    self.position(prop).is_some()
  }
  pub fn iter(&self) -> impl Iterator<Item = (&str, &[RdfValue])> {
    self.props.iter().map(|(prop, values)| (&prop[..], &values[..]))
  }
  pub fn len(&self) -> usize {
    self.props.len()
  }
  pub fn is_empty(&self) -> bool {
    self.props.is_empty()
  }

  /* Declared type set, held under the reserved rdf:type property */
  pub fn types(&self) -> &[RdfValue] {
    self.get(rdf::TYPE)
  }
  pub fn add_type(&mut self, iri: &str) {
    if !self.has_type(iri) {
      self.add(rdf::TYPE, RdfValue::reference(iri));
    }
  }
  pub fn remove_type(&mut self, iri: &str) {
    self.remove(rdf::TYPE, &RdfValue::reference(iri));
  }
  pub fn has_type(&self, iri: &str) -> bool {
    self.types().iter().any(|t| t.lexical() == iri)
  }

  /* Conversion to the shape the store collaborator speaks */
  pub fn to_raw(&self) -> RawMetadata {
    RawMetadata {
      id: self.id.clone(),
      properties: self.props.iter()
        .map(|(prop, values)| RawProperty {
          name: prop.clone(),
          values: values.clone(),
        })
        .collect(),
    }
  }
}

/* Identity and mapping must match; value order matters inside a
   property, property order across the container does not. */
impl PartialEq for RdfMetadata {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
      && self.props.len() == other.props.len()
      && self.props.iter().all(|(prop, values)| other.get(prop) == &values[..])
  }
}

/* Private */
impl RdfMetadata {
  fn position(&self, prop: &str) -> Option<usize> {
    self.props.iter().position(|(p, _)| p == prop)
  }
}

/* The raw property->values shape exchanged with the store. Decoding
   the wire representation into this shape is the store's business. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetadata {
  pub id: String,
  pub properties: Vec<RawProperty>,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProperty {
  pub name: String,
  pub values: Vec<RdfValue>,
}

/* Public Interface Tests */
