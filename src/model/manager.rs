
use {
  std::sync::Arc,
  tracing::debug,
  crate::{
    RdfValue,
    errors::{ObjectError, StoreError},
    metadata::{RawMetadata, RdfMetadata},
    model::object::{Bitstream, RepoObject},
    model::typemgr::{ModelClass, TypeManager},
    vocab::ldp,
  }
};

type Result<T> = std::result::Result<T, ObjectError>;

/* The seam to the repository server. Everything that crosses the wire
   goes through these four operations; implementations own the wire
   format, authentication and retry policy, and may be backed by sync
   or async I/O. The mapping layer never assumes anything about their
   latency. */
pub trait RepoStore: Send + Sync {
  fn fetch(&self, id: &str) -> std::result::Result<RawMetadata, StoreError>;
  fn fetch_children(&self, id: &str) -> std::result::Result<Vec<RawMetadata>, StoreError>;
  /* Returns the identity the server assigned (or confirmed). The slug
     is a naming suggestion the server is free to ignore. */
  fn persist(&self, raw: &RawMetadata, bitstream: Option<&Bitstream>, slug: Option<&str>) -> std::result::Result<String, StoreError>;
  fn delete(&self, id: &str) -> std::result::Result<(), StoreError>;
}

/* One live repository binding: a store plus the type registry used to
   map fetched containers onto model classes. Held as Arc so objects
   can keep non-owning backrefs. */
pub struct Connection {
  store: Box<dyn RepoStore>,
  types: Arc<TypeManager>,
}
impl Connection {
  pub fn new(store: Box<dyn RepoStore>, types: Arc<TypeManager>) -> Arc<Self> {
    Arc::new(Connection { store, types })
  }
  pub fn types(&self) -> &Arc<TypeManager> {
    &self.types
  }
  pub(crate) fn store(&self) -> &dyn RepoStore {
    &*self.store
  }
  /* Fetch one resource and bind it to whatever class its declared
     types resolve to */
  pub fn get(conn: &Arc<Connection>, id: &str) -> Result<RepoObject> {
    let raw = conn.store.fetch(id)?;
    Ok(RepoObject::from_raw(raw, conn))
  }
  /* The explicit factory for a class-bound manager */
  pub fn manager(conn: &Arc<Connection>, class: &Arc<ModelClass>) -> Manager {
    Manager {
      class: class.clone(),
      connection: conn.clone(),
    }
  }
}

/* Persistence operations bound to one model class and one connection.
   Objects delegate their save/update/delete here; the manager talks to
   the store and moves the object through its lifecycle states. */
pub struct Manager {
  class: Arc<ModelClass>,
  connection: Arc<Connection>,
}
impl Manager {
  pub fn class(&self) -> &Arc<ModelClass> {
    &self.class
  }
  /* A fresh in-memory object of the bound class, not yet persisted */
  pub fn create(&self) -> RepoObject {
    RepoObject::new(self.class.clone(), Some(&self.connection), None)
  }
  pub fn get(&self, id: &str) -> Result<RepoObject> {
    Connection::get(&self.connection, id)
  }
  pub fn save_one(&self, object: &mut RepoObject) -> Result<()> {
    object.ensure_live()?;
    let raw = object.metadata().to_raw();
    let assigned = self.connection.store().persist(&raw, object.local_bitstream(), object.slug())?;
    debug!(class = %self.class.name(), id = %assigned, "persisted object");
    object.complete_save(assigned)
  }
  /* Saves a batch in one call so a smarter store can coalesce round
     trips; the fallback is one persist per object. */
  pub fn save(&self, objects: &mut [RepoObject]) -> Result<()> {
    for object in objects.iter_mut() {
      self.save_one(object)?;
    }
    Ok(())
  }
  pub fn load_children(&self, parent: &RepoObject, fetch_metadata: bool) -> Result<Vec<RepoObject>> {
    parent.ensure_live()?;
    let id = parent.id().ok_or(ObjectError::NoIdentity("list_children"))?;
    let raws = self.connection.store().fetch_children(id)?;
    let mut children = Vec::with_capacity(raws.len());
    for raw in raws {
      let mut child = RepoObject::from_raw(raw, &self.connection);
      if !fetch_metadata {
        child.set_incomplete(true);
      }
      children.push(child);
    }
    Ok(children)
  }
  /* Discards the object's container and installs a freshly fetched
     one. With fetch_child_metadata the child linkage is re-read too
     and rebuilt under ldp:contains. */
  pub fn update(&self, object: &mut RepoObject, fetch_child_metadata: bool) -> Result<()> {
    object.ensure_live()?;
    let id = object.id().ok_or(ObjectError::NoIdentity("update"))?.to_string();
    let mut fresh = RdfMetadata::from_raw(self.connection.store().fetch(&id)?);
    if fetch_child_metadata {
      let children = self.connection.store().fetch_children(&id)?;
      fresh.set(
        ldp::CONTAINS,
        children.iter()
          .filter(|raw| !raw.id.is_empty())
          .map(|raw| RdfValue::reference(raw.id.clone()))
          .collect(),
      );
    }
    debug!(id = %id, "updated object from the store");
    object.install_metadata(fresh);
    Ok(())
  }
  pub fn delete(&self, object: &mut RepoObject) -> Result<()> {
    object.ensure_live()?;
    let id = object.id().ok_or(ObjectError::NoIdentity("delete"))?.to_string();
    self.connection.store().delete(&id)?;
    debug!(id = %id, "deleted object");
    object.mark_deleted();
    Ok(())
  }
}
