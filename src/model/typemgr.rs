
use {
  std::collections::HashMap,
  std::sync::{Arc, RwLock},
  tracing::debug,
  crate::{
    metadata::RdfMetadata,
    model::fields::FieldDef,
  }
};

/* A mixin's vote on a container: TypeMatch claims any container whose
   declared type set carries the mixin's own rdf type, Custom inspects
   the container itself, Never abstains (the original base-object
   behavior, so generic mixins are not picked up by accident). */
#[derive(Debug, Clone, Copy)]
pub enum Handles {
  TypeMatch(u32),
  Custom(fn(&RdfMetadata) -> Option<u32>),
  Never,
}

/* A reusable bundle of field declarations bound to one rdf type.
   Model classes are composed out of these at resolution time. */
#[derive(Debug)]
pub struct ModelMixin {
  name: String,
  rdf_type: String,
  handles: Handles,
  fields: Vec<Arc<FieldDef>>,
}
impl ModelMixin {
  pub fn new(name: impl Into<String>, rdf_type: impl Into<String>, handles: Handles, fields: Vec<FieldDef>) -> Self {
    ModelMixin {
      name: name.into(),
      rdf_type: rdf_type.into(),
      handles,
      fields: fields.into_iter().map(Arc::new).collect(),
    }
  }
  pub fn name(&self) -> &str {
    &self.name
  }
  pub fn rdf_type(&self) -> &str {
    &self.rdf_type
  }
  pub fn fields(&self) -> &[Arc<FieldDef>] {
    &self.fields
  }
  pub fn handles_metadata(&self, md: &RdfMetadata) -> Option<u32> {
    match self.handles {
      Handles::TypeMatch(priority) => {
        if md.has_type(&self.rdf_type) { Some(priority) }
        else { None }
      },
      Handles::Custom(f) => f(md),
      Handles::Never => None,
    }
  }
}

/* A composed model class: the ordered mixins that contribute to it and
   their merged field table. Merging is first-wins by predicate over the
   mixin order, then the surviving fields sort by declaration order, so
   one field per predicate and a stable field sequence regardless of
   how the composition was requested. */
#[derive(Debug)]
pub struct ModelClass {
  name: String,
  mixins: Vec<Arc<ModelMixin>>,
  fields: Vec<Arc<FieldDef>>,
}
impl ModelClass {
  fn compose(mixins: Vec<Arc<ModelMixin>>) -> Self {
    let name = if mixins.is_empty() {
      "Resource".to_string()
    }
    else {
      mixins.iter().map(|m| m.name()).collect::<Vec<&str>>().join("+")
    };
    let mut fields: Vec<Arc<FieldDef>> = Vec::new();
    for mixin in &mixins {
      for field in mixin.fields() {
        if !fields.iter().any(|f| f.rdf_name() == field.rdf_name()) {
          fields.push(field.clone());
        }
      }
    }
    fields.sort_by_key(|f| f.order());
    ModelClass { name, mixins, fields }
  }
  pub fn name(&self) -> &str {
    &self.name
  }
  pub fn mixins(&self) -> &[Arc<ModelMixin>] {
    &self.mixins
  }
  pub fn has_mixin(&self, name: &str) -> bool {
    self.mixins.iter().any(|m| m.name() == name)
  }
  pub fn is_base(&self) -> bool {
    self.mixins.is_empty()
  }
  pub fn fields(&self) -> &[Arc<FieldDef>] {
    &self.fields
  }
  pub fn field(&self, rdf_name: &str) -> Option<&Arc<FieldDef>> {
    self.fields.iter().find(|f| f.rdf_name() == rdf_name)
  }
  /* The rdf types a fresh object of this class declares */
  pub fn declared_types(&self) -> Vec<&str> {
    self.mixins.iter().map(|m| m.rdf_type()).collect()
  }
}

/* The registry that maps declared rdf type sets onto model classes.
   Registration happens while the application boots and is logically
   single-threaded; resolution and class generation run concurrently
   afterwards, so both structures sit behind locks. */
pub struct TypeManager {
  models: RwLock<Vec<Arc<ModelMixin>>>,
  cache: RwLock<HashMap<Vec<String>, Arc<ModelClass>>>,
  base: Arc<ModelClass>,
}

impl Default for TypeManager {
  fn default() -> Self {
    Self::new()
  }
}

/* Public */
impl TypeManager {
  pub fn new() -> Self {
    TypeManager {
      models: RwLock::new(Vec::new()),
      cache: RwLock::new(HashMap::new()),
      base: Arc::new(ModelClass::compose(Vec::new())),
    }
  }
  /* Registration order is load-bearing: it breaks resolution ties and
     fixes the composition order of generated classes. Registering
     drops every cached class so no stale composition survives. */
  pub fn register(&self, mixin: ModelMixin) -> Arc<ModelMixin> {
    let mixin = Arc::new(mixin);
    self.models.write().unwrap().push(mixin.clone());
    self.cache.write().unwrap().clear();
    mixin
  }
  pub fn find_model(&self, name: &str) -> Option<Arc<ModelMixin>> {
    self.models.read().unwrap().iter()
      .find(|m| m.name() == name)
      .cloned()
  }
  /* The class every unclaimed container falls back to */
  pub fn base_class(&self) -> Arc<ModelClass> {
    self.base.clone()
  }
  /* Asks every registered mixin to vote on the container and picks the
     strictly highest bid; on a tie the earliest-registered mixin wins.
     Never fails: a container nobody claims gets the base class. */
  pub fn resolve(&self, md: &RdfMetadata) -> Arc<ModelClass> {
    let winner = {
      let models = self.models.read().unwrap();
      let mut winner: Option<(Arc<ModelMixin>, u32)> = None;
      for mixin in models.iter() {
        if let Some(priority) = mixin.handles_metadata(md) {
          let beats = match &winner {
            Some((_, best)) => priority > *best,
            None => true,
          };
          if beats {
            winner = Some((mixin.clone(), priority));
          }
        }
      }
      winner
    };
    match winner {
      Some((mixin, priority)) => {
        debug!(model = %mixin.name(), priority, "resolved container to a model class");
        self.class_for(vec![mixin])
      },
      None => {
        debug!("no registered model claims the container, falling back to the base class");
        self.base.clone()
      },
    }
  }
  /* Composes (or fetches) the class for an explicit set of declared
     types. Matching mixins contribute in registration order, which is
     what lets two permutations of the same type set share one cached
     class object. */
  pub fn generate_class<S: AsRef<str>>(&self, type_iris: &[S]) -> Arc<ModelClass> {
    let matched: Vec<Arc<ModelMixin>> = self.models.read().unwrap().iter()
      .filter(|m| type_iris.iter().any(|t| t.as_ref() == m.rdf_type()))
      .cloned()
      .collect();
    if matched.is_empty() {
      return self.base.clone()
    }
    self.class_for(matched)
  }
}

/* Private */
impl TypeManager {
  fn class_for(&self, mixins: Vec<Arc<ModelMixin>>) -> Arc<ModelClass> {
    let mut key: Vec<String> = mixins.iter().map(|m| m.name().to_string()).collect();
    key.sort();
    if let Some(class) = self.cache.read().unwrap().get(&key) {
      return class.clone()
    }
    /* Two callers may race to this point; the entry call keeps whichever
       insertion landed first and every caller sees that one instance. */
    let mut cache = self.cache.write().unwrap();
    cache.entry(key)
      .or_insert_with(|| {
        let class = ModelClass::compose(mixins);
        debug!(class = %class.name(), "composed a new model class");
        Arc::new(class)
      })
      .clone()
  }
}

/* Public Interface Tests */
#[cfg(test)]
mod interface_tests {
  use super::*;
  use crate::RdfValue;
  use crate::vocab::{dc, dcterms, ebucore, fedora};

  const DOCUMENT_TYPE: &str = "http://cesnet.cz/ns/repository/type#Document";

  fn document_mixin() -> ModelMixin {
    ModelMixin::new(
      "Document",
      DOCUMENT_TYPE,
      Handles::TypeMatch(10),
      vec![
        FieldDef::text(dc::TITLE).mandatory(),
        FieldDef::lang_text(dc::DESCRIPTION),
      ],
    )
  }
  fn collection_mixin() -> ModelMixin {
    ModelMixin::new(
      "Collection",
      ebucore::COLLECTION,
      Handles::TypeMatch(10),
      vec![FieldDef::integer(dcterms::EXTENT)],
    )
  }

  #[test]
  fn permutations_share_one_class() {
    let types = TypeManager::new();
    types.register(document_mixin());
    types.register(collection_mixin());
    let forwards = types.generate_class(&[DOCUMENT_TYPE, ebucore::COLLECTION]);
    let backwards = types.generate_class(&[ebucore::COLLECTION, DOCUMENT_TYPE]);
    assert!(Arc::ptr_eq(&forwards, &backwards));
    assert!(forwards.has_mixin("Document"));
    assert!(forwards.has_mixin("Collection"));
  }
  #[test]
  fn predicate_collision_first_registered_wins() {
    let types = TypeManager::new();
    types.register(ModelMixin::new(
      "Report",
      DOCUMENT_TYPE,
      Handles::TypeMatch(10),
      vec![FieldDef::text(dc::TITLE).verbose_name("Report title")],
    ));
    types.register(ModelMixin::new(
      "Dataset",
      ebucore::COLLECTION,
      Handles::TypeMatch(10),
      vec![FieldDef::text(dc::TITLE).verbose_name("Dataset title")],
    ));
    let class = types.generate_class(&[ebucore::COLLECTION, DOCUMENT_TYPE]);
    assert_eq!(class.fields().len(), 1);
    assert_eq!(class.field(dc::TITLE).unwrap().verbose(), Some("Report title"));
  }
  #[test]
  fn merged_fields_sort_by_declaration_order() {
    let types = TypeManager::new();
    /* declared before the Document mixin's fields, but its mixin is
       registered second */
    let early = FieldDef::date(dcterms::ISSUED);
    types.register(document_mixin());
    types.register(ModelMixin::new(
      "Dated",
      ebucore::COLLECTION,
      Handles::TypeMatch(10),
      vec![early],
    ));
    let class = types.generate_class(&[DOCUMENT_TYPE, ebucore::COLLECTION]);
    let names: Vec<&str> = class.fields().iter().map(|f| f.rdf_name()).collect();
    assert_eq!(names, [dcterms::ISSUED, dc::TITLE, dc::DESCRIPTION]);
  }
  #[test]
  fn resolve_picks_highest_priority() {
    let types = TypeManager::new();
    types.register(ModelMixin::new("Low", DOCUMENT_TYPE, Handles::TypeMatch(3), vec![]));
    types.register(ModelMixin::new("High", DOCUMENT_TYPE, Handles::TypeMatch(7), vec![]));
    let mut md = RdfMetadata::new();
    md.add_type(DOCUMENT_TYPE);
    let class = types.resolve(&md);
    assert!(class.has_mixin("High"));
    assert!(!class.has_mixin("Low"));
  }
  #[test]
  fn resolve_tie_break_is_first_registered() {
    let types = TypeManager::new();
    types.register(ModelMixin::new("First", DOCUMENT_TYPE, Handles::TypeMatch(5), vec![]));
    types.register(ModelMixin::new("Second", DOCUMENT_TYPE, Handles::TypeMatch(5), vec![]));
    let mut md = RdfMetadata::new();
    md.add_type(DOCUMENT_TYPE);
    let class = types.resolve(&md);
    assert!(class.has_mixin("First"));
    assert!(!class.has_mixin("Second"));
  }
  #[test]
  fn resolve_custom_vote() {
    let types = TypeManager::new();
    fn claims_titled(md: &RdfMetadata) -> Option<u32> {
      if md.contains(dc::TITLE) { Some(1) } else { None }
    }
    types.register(ModelMixin::new("Titled", DOCUMENT_TYPE, Handles::Custom(claims_titled), vec![]));
    let mut md = RdfMetadata::new();
    assert!(types.resolve(&md).is_base());
    md.add(dc::TITLE, RdfValue::string("anything"));
    assert!(types.resolve(&md).has_mixin("Titled"));
  }
  #[test]
  fn unclaimed_container_gets_base_class() {
    let types = TypeManager::new();
    types.register(ModelMixin::new("Never", DOCUMENT_TYPE, Handles::Never, vec![]));
    let mut md = RdfMetadata::new();
    md.add_type(DOCUMENT_TYPE);
    md.add_type(fedora::RESOURCE);
    let class = types.resolve(&md);
    assert!(class.is_base());
    assert!(Arc::ptr_eq(&class, &types.base_class()));
  }
  #[test]
  fn unknown_types_generate_base_class() {
    let types = TypeManager::new();
    let class = types.generate_class(&[fedora::RESOURCE]);
    assert!(Arc::ptr_eq(&class, &types.base_class()));
    assert!(class.fields().is_empty());
  }
  #[test]
  fn late_registration_changes_composition() {
    let types = TypeManager::new();
    types.register(document_mixin());
    let before = types.generate_class(&[DOCUMENT_TYPE, ebucore::COLLECTION]);
    assert!(!before.has_mixin("Collection"));
    types.register(collection_mixin());
    let after = types.generate_class(&[DOCUMENT_TYPE, ebucore::COLLECTION]);
    assert!(after.has_mixin("Collection"));
    assert!(!Arc::ptr_eq(&before, &after));
  }
}
