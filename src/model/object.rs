
use {
  std::sync::{Arc, Weak},
  crate::{
    RdfValue,
    errors::ObjectError,
    metadata::{RawMetadata, RdfMetadata},
    model::manager::Connection,
    model::typemgr::ModelClass,
    vocab::{dc, ebucore, fedora},
  }
};

type Result<T> = std::result::Result<T, ObjectError>;

/* New: built in memory, no identity. Persisted: the store confirmed an
   identity and the container is complete. Incomplete: identity known
   but the container came from a lightweight listing; update() promotes
   it back to Persisted. Deleted is terminal. */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectState {
  New,
  Persisted,
  Incomplete,
  Deleted,
}

/* A local binary payload staged for upload. The transfer itself is the
   store's business; the object only carries the payload to save(). */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitstream {
  content: Vec<u8>,
  mime_type: String,
  filename: Option<String>,
}
impl Bitstream {
  pub fn new(content: Vec<u8>, mime_type: impl Into<String>) -> Self {
    Bitstream {
      content,
      mime_type: mime_type.into(),
      filename: None,
    }
  }
  pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
    self.filename = Some(filename.into());
    self
  }
  pub fn content(&self) -> &[u8] {
    &self.content
  }
  pub fn mime_type(&self) -> &str {
    &self.mime_type
  }
  pub fn filename(&self) -> Option<&str> {
    self.filename.as_deref()
  }
}

/* A child name: one or more literals destined for dc:title. Plain
   strings coerce to xsd:string literals; values that already are
   literals pass through untouched. */
pub struct ChildName {
  values: Vec<RdfValue>,
}
impl ChildName {
  pub fn values(&self) -> &[RdfValue] {
    &self.values
  }
}
impl From<&str> for ChildName {
  fn from(s: &str) -> Self {
    ChildName { values: vec![RdfValue::string(s)] }
  }
}
impl From<String> for ChildName {
  fn from(s: String) -> Self {
    ChildName { values: vec![RdfValue::string(s)] }
  }
}
impl From<RdfValue> for ChildName {
  fn from(v: RdfValue) -> Self {
    ChildName { values: vec![v] }
  }
}
impl From<Vec<RdfValue>> for ChildName {
  fn from(values: Vec<RdfValue>) -> Self {
    ChildName { values }
  }
}
impl From<Vec<&str>> for ChildName {
  fn from(names: Vec<&str>) -> Self {
    ChildName { values: names.into_iter().map(RdfValue::string).collect() }
  }
}

/* The per-resource facade: one metadata container, the class its
   declared types resolved to, and a non-owning link back to the
   connection that produced it. Attribute-level access goes through the
   class's field descriptors against metadata()/metadata_mut(); the
   *_property methods below bypass descriptors on purpose and talk to
   the raw container. Both layers are part of the contract. */
pub struct RepoObject {
  metadata: RdfMetadata,
  class: Arc<ModelClass>,
  connection: Option<Weak<Connection>>,
  slug: Option<String>,
  local_bitstream: Option<Bitstream>,
  state: ObjectState,
}

/* Public */
impl RepoObject {
  /* Constructors */
  pub fn new(class: Arc<ModelClass>, connection: Option<&Arc<Connection>>, slug: Option<String>) -> Self {
    let mut metadata = RdfMetadata::new();
    metadata.add_type(fedora::RESOURCE);
    for rdf_type in class.declared_types() {
      metadata.add_type(rdf_type);
    }
    RepoObject {
      metadata,
      class,
      connection: connection.map(Arc::downgrade),
      slug,
      local_bitstream: None,
      state: ObjectState::New,
    }
  }
  pub fn from_raw(raw: RawMetadata, connection: &Arc<Connection>) -> Self {
    let metadata = RdfMetadata::from_raw(raw);
    let class = connection.types().resolve(&metadata);
    let state = if metadata.id().is_empty() { ObjectState::New } else { ObjectState::Persisted };
    RepoObject {
      metadata,
      class,
      connection: Some(Arc::downgrade(connection)),
      slug: None,
      local_bitstream: None,
      state,
    }
  }

  /* State */
  pub fn id(&self) -> Option<&str> {
    if self.metadata.id().is_empty() { None }
    else { Some(self.metadata.id()) }
  }
  pub fn class(&self) -> &Arc<ModelClass> {
    &self.class
  }
  pub fn state(&self) -> ObjectState {
    self.state
  }
  pub fn is_incomplete(&self) -> bool {
    self.state == ObjectState::Incomplete
  }
  pub fn set_incomplete(&mut self, incomplete: bool) {
    match (self.state, incomplete) {
      (ObjectState::Persisted, true) => self.state = ObjectState::Incomplete,
      (ObjectState::Incomplete, false) => self.state = ObjectState::Persisted,
      _ => {},
    }
  }
  pub fn slug(&self) -> Option<&str> {
    self.slug.as_deref()
  }
  pub fn parent_uri(&self) -> Option<&str> {
    self.metadata.get(fedora::HAS_PARENT).first().map(|v| v.lexical())
  }

  /* Raw container access, bypassing field descriptors */
  pub fn metadata(&self) -> &RdfMetadata {
    &self.metadata
  }
  pub fn metadata_mut(&mut self) -> &mut RdfMetadata {
    &mut self.metadata
  }
  pub fn get_property(&self, prop: &str) -> &[RdfValue] {
    self.metadata.get(prop)
  }
  pub fn set_property(&mut self, prop: &str, values: Vec<RdfValue>) -> Result<()> {
    self.ensure_live()?;
    self.metadata.set(prop, values);
    Ok(())
  }
  pub fn add_property_value(&mut self, prop: &str, value: RdfValue) -> Result<()> {
    self.ensure_live()?;
    self.metadata.add(prop, value);
    Ok(())
  }
  pub fn delete_property(&mut self, prop: &str) -> Result<()> {
    self.ensure_live()?;
    self.metadata.delete(prop);
    Ok(())
  }

  /* Declared type set */
  pub fn types(&self) -> &[RdfValue] {
    self.metadata.types()
  }
  pub fn add_type(&mut self, iri: &str) -> Result<()> {
    self.ensure_live()?;
    self.metadata.add_type(iri);
    Ok(())
  }
  pub fn remove_type(&mut self, iri: &str) -> Result<()> {
    self.ensure_live()?;
    self.metadata.remove_type(iri);
    Ok(())
  }

  /* Pending binary payload */
  pub fn local_bitstream(&self) -> Option<&Bitstream> {
    self.local_bitstream.as_ref()
  }
  pub fn set_local_bitstream(&mut self, bitstream: Bitstream) -> Result<()> {
    self.ensure_live()?;
    self.local_bitstream = Some(bitstream);
    Ok(())
  }

  /* Builds an unsaved child bound to this object. The child's class
     comes from the flavour type list (or falls back to the base
     class), its parent link points here, and the name literals land in
     dc:title. Saving it is the caller's move. */
  pub fn create_child(&self, name: impl Into<ChildName>, additional_types: &[&str], flavour: Option<&[&str]>, slug: Option<&str>) -> Result<RepoObject> {
    self.ensure_live()?;
    let id = self.id().ok_or(ObjectError::NoIdentity("create_child"))?;
    let connection = self.connection()?;
    let class = match flavour {
      Some(type_iris) => connection.types().generate_class(type_iris),
      None => connection.types().base_class(),
    };
    let mut child = RepoObject::new(class, Some(&connection), slug.map(str::to_string));
    for rdf_type in additional_types {
      child.metadata.add_type(rdf_type);
    }
    child.metadata.set(fedora::HAS_PARENT, vec![RdfValue::reference(id)]);
    let name = name.into();
    for value in name.values {
      child.metadata.add(dc::TITLE, value);
    }
    Ok(child)
  }
  /* A child that is also a collection */
  pub fn create_subcollection(&self, name: impl Into<ChildName>, additional_types: &[&str], flavour: Option<&[&str]>, slug: Option<&str>) -> Result<RepoObject> {
    let mut types: Vec<&str> = vec![ebucore::COLLECTION];
    types.extend_from_slice(additional_types);
    self.create_child(name, &types, flavour, slug)
  }

  /* Store-backed operations, all delegated to the manager */
  pub fn save(&mut self) -> Result<()> {
    let connection = self.connection()?;
    let manager = Connection::manager(&connection, &self.class);
    manager.save_one(self)
  }
  pub fn update(&mut self, fetch_child_metadata: bool) -> Result<()> {
    let connection = self.connection()?;
    let manager = Connection::manager(&connection, &self.class);
    manager.update(self, fetch_child_metadata)
  }
  pub fn delete(&mut self) -> Result<()> {
    let connection = self.connection()?;
    let manager = Connection::manager(&connection, &self.class);
    manager.delete(self)
  }
  pub fn children(&self) -> Result<Vec<RepoObject>> {
    self.list_children(true)
  }
  pub fn list_children(&self, fetch_metadata: bool) -> Result<Vec<RepoObject>> {
    let connection = self.connection()?;
    let manager = Connection::manager(&connection, &self.class);
    manager.load_children(self, fetch_metadata)
  }
}

/* Crate-internal lifecycle hooks driven by the manager */
impl RepoObject {
  pub(crate) fn ensure_live(&self) -> Result<()> {
    if self.state == ObjectState::Deleted {
      return Err(ObjectError::Deleted)
    }
    Ok(())
  }
  pub(crate) fn complete_save(&mut self, assigned: String) -> Result<()> {
    if self.metadata.id().is_empty() {
      self.metadata.assign_id(assigned)?;
    }
    self.state = ObjectState::Persisted;
    self.local_bitstream = None;
    Ok(())
  }
  pub(crate) fn install_metadata(&mut self, metadata: RdfMetadata) {
    self.metadata = metadata;
    self.state = ObjectState::Persisted;
  }
  pub(crate) fn mark_deleted(&mut self) {
    self.state = ObjectState::Deleted;
  }
  fn connection(&self) -> Result<Arc<Connection>> {
    self.connection.as_ref()
      .and_then(Weak::upgrade)
      .ok_or(ObjectError::NoConnection)
  }
}

/* Public Interface Tests */
