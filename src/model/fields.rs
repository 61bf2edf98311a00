
use {
  std::sync::Arc,
  std::sync::atomic::{AtomicUsize, Ordering},
  chrono::{DateTime, FixedOffset, NaiveDate},
  once_cell::sync::OnceCell,
  crate::{
    RdfValue,
    errors::{FieldError, ObjectError},
    metadata::RdfMetadata,
    model::manager::Connection,
    model::object::RepoObject,
    model::typemgr::{ModelMixin, TypeManager},
    vocab::xsd,
  }
};

type Result<T> = std::result::Result<T, FieldError>;

/* Every descriptor draws its position from this process-wide counter at
   construction time, so the fields of a composed class sort the same way
   no matter which mixin contributed them. Never reset outside tests. */
static DECLARATION_ORDER: AtomicUsize = AtomicUsize::new(0);

fn next_order() -> usize {
  DECLARATION_ORDER.fetch_add(1, Ordering::SeqCst)
}

/* Test-setup hook only. Resetting mid-process breaks the ordering
   guarantee for every descriptor declared afterwards. */
#[doc(hidden)]
pub fn reset_declaration_order() {
  DECLARATION_ORDER.store(0, Ordering::SeqCst);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLevel {
  Mandatory,
  Recommended,
  Optional,
}

#[derive(Debug, Clone)]
pub enum FieldKind {
  Text,
  LangText,
  Integer,
  Date,
  DateTime,
  Linked(RelatedModel),
  Binary(RelatedModel),
  Gps,
}

/* A validated latitude/longitude pair. Construction is the only place
   range checking happens, so a held GpsCoord is always in range. */
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpsCoord {
  lat: f64,
  lon: f64,
}
impl GpsCoord {
  pub fn new(lat: f64, lon: f64) -> Result<Self> {
    if lat < -90.0 || lat > 90.0 || lon < -180.0 || lon > 180.0 {
      return Err(FieldError::GpsOutOfRange(lat, lon))
    }
    Ok(GpsCoord { lat, lon })
  }
  pub fn lat(&self) -> f64 {
    self.lat
  }
  pub fn lon(&self) -> f64 {
    self.lon
  }
}

/* A link to another registered model, resolved against the registry on
   first use. The mixin named here may not exist yet while models are
   still being declared; until it is registered every access fails with
   UnresolvedRelated rather than handing out a stale reference. */
#[derive(Debug, Clone)]
pub struct RelatedModel {
  name: String,
  resolved: OnceCell<Arc<ModelMixin>>,
}
impl RelatedModel {
  pub fn named(name: impl Into<String>) -> Self {
    RelatedModel {
      name: name.into(),
      resolved: OnceCell::new(),
    }
  }
  pub fn name(&self) -> &str {
    &self.name
  }
  pub fn get(&self, types: &TypeManager) -> Result<Arc<ModelMixin>> {
    if let Some(mixin) = self.resolved.get() {
      return Ok(mixin.clone())
    }
    match types.find_model(&self.name) {
      Some(mixin) => Ok(self.resolved.get_or_init(|| mixin).clone()),
      None => Err(FieldError::UnresolvedRelated(self.name.clone())),
    }
  }
}

/* One logical attribute of a composed model class: the predicate it is
   stored under, how its raw values translate to typed ones, and how the
   form layer should treat it. Immutable once constructed, apart from the
   memoized related-model link. */
#[derive(Debug, Clone)]
pub struct FieldDef {
  rdf_name: String,
  kind: FieldKind,
  level: FieldLevel,
  multi_valued: bool,
  verbose_name: Option<String>,
  attrs: Vec<(String, String)>,
  order: usize,
}

/* Constructors */
impl FieldDef {
  fn with_kind(rdf_name: impl Into<String>, kind: FieldKind) -> Self {
    FieldDef {
      rdf_name: rdf_name.into(),
      kind,
      level: FieldLevel::Optional,
      multi_valued: false,
      verbose_name: None,
      attrs: Vec::new(),
      order: next_order(),
    }
  }
  pub fn text(rdf_name: impl Into<String>) -> Self {
    Self::with_kind(rdf_name, FieldKind::Text)
  }
  pub fn lang_text(rdf_name: impl Into<String>) -> Self {
    Self::with_kind(rdf_name, FieldKind::LangText)
  }
  pub fn integer(rdf_name: impl Into<String>) -> Self {
    Self::with_kind(rdf_name, FieldKind::Integer)
  }
  pub fn date(rdf_name: impl Into<String>) -> Self {
    Self::with_kind(rdf_name, FieldKind::Date)
  }
  pub fn datetime(rdf_name: impl Into<String>) -> Self {
    Self::with_kind(rdf_name, FieldKind::DateTime)
  }
  pub fn linked(rdf_name: impl Into<String>, related: RelatedModel) -> Self {
    Self::with_kind(rdf_name, FieldKind::Linked(related))
  }
  pub fn binary(rdf_name: impl Into<String>, related: RelatedModel) -> Self {
    Self::with_kind(rdf_name, FieldKind::Binary(related))
  }
  pub fn gps(rdf_name: impl Into<String>) -> Self {
    Self::with_kind(rdf_name, FieldKind::Gps)
  }

  pub fn mandatory(mut self) -> Self {
    self.level = FieldLevel::Mandatory;
    self
  }
  pub fn recommended(mut self) -> Self {
    self.level = FieldLevel::Recommended;
    self
  }
  pub fn multi_valued(mut self) -> Self {
    self.multi_valued = true;
    self
  }
  pub fn verbose_name(mut self, name: impl Into<String>) -> Self {
    self.verbose_name = Some(name.into());
    self
  }
  pub fn attr(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
    self.attrs.push((key.into(), val.into()));
    self
  }
}

/* Descriptor state */
impl FieldDef {
  pub fn rdf_name(&self) -> &str {
    &self.rdf_name
  }
  pub fn kind(&self) -> &FieldKind {
    &self.kind
  }
  pub fn level(&self) -> FieldLevel {
    self.level
  }
  pub fn is_multi_valued(&self) -> bool {
    self.multi_valued
  }
  pub fn verbose(&self) -> Option<&str> {
    self.verbose_name.as_deref()
  }
  pub fn order(&self) -> usize {
    self.order
  }
  pub fn attr_value(&self, key: &str) -> Option<&str> {
    self.attrs.iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| &v[..])
  }
  /* Pure query backing the save-time validation pass: a Mandatory field
     with no value is the only unsatisfied case. */
  pub fn is_satisfied(&self, md: &RdfMetadata) -> bool {
    self.level != FieldLevel::Mandatory || !md.get(&self.rdf_name).is_empty()
  }
}

/* Value translation. Each accessor is tied to the declared kind; asking
   a date field for an integer is a KindMismatch, not a parse attempt. */
impl FieldDef {
  pub fn text_value(&self, md: &RdfMetadata) -> Result<Option<String>> {
    self.expect(matches!(self.kind, FieldKind::Text), "text_value")?;
    Ok(md.get(&self.rdf_name).first().map(|v| v.lexical().to_string()))
  }
  pub fn text_values(&self, md: &RdfMetadata) -> Result<Vec<String>> {
    self.expect(matches!(self.kind, FieldKind::Text), "text_values")?;
    Ok(md.get(&self.rdf_name).iter().map(|v| v.lexical().to_string()).collect())
  }
  pub fn set_text(&self, md: &mut RdfMetadata, val: &str) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::Text), "set_text")?;
    md.set(&self.rdf_name, vec![RdfValue::string(val)]);
    Ok(())
  }
  pub fn set_text_values(&self, md: &mut RdfMetadata, vals: &[&str]) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::Text), "set_text_values")?;
    md.set(&self.rdf_name, vals.iter().map(|v| RdfValue::string(*v)).collect());
    Ok(())
  }

  /* Reading with no language returns the earliest-added tagged value,
     falling back to the earliest untagged literal. */
  pub fn lang_text_value(&self, md: &RdfMetadata, lang: Option<&str>) -> Result<Option<String>> {
    self.expect(matches!(self.kind, FieldKind::LangText), "lang_text_value")?;
    let values = md.get(&self.rdf_name);
    let found = match lang {
      Some(l) => values.iter().find(|v| v.language() == Some(l)),
      None => values.iter()
        .find(|v| v.language().is_some())
        .or_else(|| values.iter().find(|v| !v.is_ref())),
    };
    Ok(found.map(|v| v.lexical().to_string()))
  }
  pub fn lang_map(&self, md: &RdfMetadata) -> Result<Vec<(String, String)>> {
    self.expect(matches!(self.kind, FieldKind::LangText), "lang_map")?;
    Ok(md.get(&self.rdf_name).iter()
      .filter_map(|v| match v {
        RdfValue::LangTaggedLit{ val, lang } => Some((lang.clone(), val.clone())),
        _ => None,
      })
      .collect())
  }
  /* Replaces the first value carrying this language in place, so the
     value order of the property survives an edit. */
  pub fn set_lang_text(&self, md: &mut RdfMetadata, lang: &str, val: &str) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::LangText), "set_lang_text")?;
    let mut values = md.get(&self.rdf_name).to_vec();
    match values.iter().position(|v| v.language() == Some(lang)) {
      Some(pos) => values[pos] = RdfValue::lang(val, lang),
      None => values.push(RdfValue::lang(val, lang)),
    }
    md.set(&self.rdf_name, values);
    Ok(())
  }

  pub fn integer_value(&self, md: &RdfMetadata) -> Result<Option<i64>> {
    self.expect(matches!(self.kind, FieldKind::Integer), "integer_value")?;
    match md.get(&self.rdf_name).first() {
      None => Ok(None),
      Some(RdfValue::TypedLit{ val, .. }) => match val.trim().parse::<i64>() {
        Ok(n) => Ok(Some(n)),
        Err(e) => Err(FieldError::BadInteger(self.rdf_name.clone(), val.clone(), Box::new(e))),
      },
      Some(other) => Err(FieldError::BadLiteral(self.rdf_name.clone(), other.lexical().to_string(), "an integer literal".to_string())),
    }
  }
  pub fn set_integer(&self, md: &mut RdfMetadata, val: i64) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::Integer), "set_integer")?;
    md.set(&self.rdf_name, vec![RdfValue::integer(val)]);
    Ok(())
  }

  pub fn date_value(&self, md: &RdfMetadata) -> Result<Option<NaiveDate>> {
    self.expect(matches!(self.kind, FieldKind::Date), "date_value")?;
    match md.get(&self.rdf_name).first() {
      None => Ok(None),
      Some(RdfValue::TypedLit{ val, .. }) => match NaiveDate::parse_from_str(val.trim(), "%Y-%m-%d") {
        Ok(d) => Ok(Some(d)),
        Err(e) => Err(FieldError::BadDate(self.rdf_name.clone(), val.clone(), Box::new(e))),
      },
      Some(other) => Err(FieldError::BadLiteral(self.rdf_name.clone(), other.lexical().to_string(), "an xsd:date literal".to_string())),
    }
  }
  pub fn set_date(&self, md: &mut RdfMetadata, val: NaiveDate) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::Date), "set_date")?;
    md.set(&self.rdf_name, vec![RdfValue::typed(val.format("%Y-%m-%d").to_string(), xsd::DATE)]);
    Ok(())
  }

  pub fn datetime_value(&self, md: &RdfMetadata) -> Result<Option<DateTime<FixedOffset>>> {
    self.expect(matches!(self.kind, FieldKind::DateTime), "datetime_value")?;
    match md.get(&self.rdf_name).first() {
      None => Ok(None),
      Some(RdfValue::TypedLit{ val, .. }) => match DateTime::parse_from_rfc3339(val.trim()) {
        Ok(dt) => Ok(Some(dt)),
        Err(e) => Err(FieldError::BadDateTime(self.rdf_name.clone(), val.clone(), Box::new(e))),
      },
      Some(other) => Err(FieldError::BadLiteral(self.rdf_name.clone(), other.lexical().to_string(), "an xsd:dateTime literal".to_string())),
    }
  }
  pub fn set_datetime(&self, md: &mut RdfMetadata, val: DateTime<FixedOffset>) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::DateTime), "set_datetime")?;
    md.set(&self.rdf_name, vec![RdfValue::typed(val.to_rfc3339(), xsd::DATE_TIME)]);
    Ok(())
  }

  pub fn linked_uri(&self, md: &RdfMetadata) -> Result<Option<String>> {
    self.expect(matches!(self.kind, FieldKind::Linked(_)), "linked_uri")?;
    self.first_ref(md)
  }
  pub fn set_linked(&self, md: &mut RdfMetadata, uri: &str) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::Linked(_)), "set_linked")?;
    md.set(&self.rdf_name, vec![RdfValue::reference(uri)]);
    Ok(())
  }
  /* Follows the link through the connection. Only an explicit call hits
     the store; holding a linked field costs nothing. */
  pub fn dereference(&self, md: &RdfMetadata, connection: &Arc<Connection>) -> std::result::Result<Option<RepoObject>, ObjectError> {
    match self.linked_uri(md)? {
      Some(uri) => Ok(Some(Connection::get(connection, &uri)?)),
      None => Ok(None),
    }
  }

  pub fn bitstream_uri(&self, md: &RdfMetadata) -> Result<Option<String>> {
    self.expect(matches!(self.kind, FieldKind::Binary(_)), "bitstream_uri")?;
    self.first_ref(md)
  }
  pub fn set_bitstream_uri(&self, md: &mut RdfMetadata, uri: &str) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::Binary(_)), "set_bitstream_uri")?;
    md.set(&self.rdf_name, vec![RdfValue::reference(uri)]);
    Ok(())
  }

  pub fn gps_value(&self, md: &RdfMetadata) -> Result<Option<GpsCoord>> {
    self.expect(matches!(self.kind, FieldKind::Gps), "gps_value")?;
    let raw = match md.get(&self.rdf_name).first() {
      None => return Ok(None),
      Some(v) => v.lexical(),
    };
    let mut parts = raw.splitn(2, ',');
    let lat = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
    let lon = parts.next().and_then(|p| p.trim().parse::<f64>().ok());
    match (lat, lon) {
      (Some(lat), Some(lon)) => Ok(Some(GpsCoord::new(lat, lon)?)),
      _ => Err(FieldError::BadLiteral(self.rdf_name.clone(), raw.to_string(), "a \"lat,lon\" coordinate literal".to_string())),
    }
  }
  pub fn set_gps(&self, md: &mut RdfMetadata, coord: GpsCoord) -> Result<()> {
    self.expect(matches!(self.kind, FieldKind::Gps), "set_gps")?;
    md.set(&self.rdf_name, vec![RdfValue::string(format!("{},{}", coord.lat(), coord.lon()))]);
    Ok(())
  }

  /* The related model of a linked or binary field */
  pub fn related(&self, types: &TypeManager) -> Result<Arc<ModelMixin>> {
    match &self.kind {
      FieldKind::Linked(related) | FieldKind::Binary(related) => related.get(types),
      _ => Err(FieldError::KindMismatch(self.rdf_name.clone(), "related")),
    }
  }
}

/* Private */
impl FieldDef {
  fn expect(&self, kind_matches: bool, accessor: &'static str) -> Result<()> {
    if kind_matches {
      Ok(())
    }
    else {
      Err(FieldError::KindMismatch(self.rdf_name.clone(), accessor))
    }
  }
  fn first_ref(&self, md: &RdfMetadata) -> Result<Option<String>> {
    match md.get(&self.rdf_name).first() {
      None => Ok(None),
      Some(RdfValue::Ref{ uri }) => Ok(Some(uri.clone())),
      Some(other) => Err(FieldError::BadLiteral(self.rdf_name.clone(), other.lexical().to_string(), "a resource reference".to_string())),
    }
  }
}

/* Public Interface Tests */
#[cfg(test)]
mod interface_tests {
  use super::*;
  use crate::vocab::{dc, dcterms, ebucore};

  fn md_with(prop: &str, values: Vec<RdfValue>) -> RdfMetadata {
    let mut md = RdfMetadata::new();
    md.set(prop, values);
    md
  }

  #[test]
  fn declaration_order_is_monotonic() {
    let first = FieldDef::text(dc::TITLE);
    let second = FieldDef::text(dc::CREATOR);
    let third = FieldDef::integer(dcterms::EXTENT);
    assert!(first.order() < second.order());
    assert!(second.order() < third.order());
  }
  #[test]
  fn text_scalar_reads_first_value() {
    let field = FieldDef::text(dc::TITLE);
    let md = md_with(dc::TITLE, vec![RdfValue::string("first"), RdfValue::string("second")]);
    assert_eq!(field.text_value(&md).unwrap(), Some("first".to_string()));
  }
  #[test]
  fn text_multi_reads_all_values() {
    let field = FieldDef::text(dc::CREATOR).multi_valued();
    let md = md_with(dc::CREATOR, vec![RdfValue::string("a"), RdfValue::string("b")]);
    assert_eq!(field.text_values(&md).unwrap(), ["a", "b"]);
  }
  #[test]
  fn text_on_missing_property() {
    let field = FieldDef::text(dc::TITLE);
    let md = RdfMetadata::new();
    assert_eq!(field.text_value(&md).unwrap(), None);
    assert!(field.text_values(&md).unwrap().is_empty());
  }
  #[test]
  fn kind_mismatch_0() {
    let field = FieldDef::text(dc::TITLE);
    let md = RdfMetadata::new();
    match field.integer_value(&md) {
      Err(FieldError::KindMismatch(name, accessor)) => {
        assert_eq!(name, dc::TITLE);
        assert_eq!(accessor, "integer_value");
      },
      other => panic!("expected KindMismatch, got {:?}", other),
    }
  }
  #[test]
  fn lang_text_default_is_earliest_tagged() {
    let field = FieldDef::lang_text(dc::TITLE);
    let md = md_with(dc::TITLE, vec![
      RdfValue::string("untagged"),
      RdfValue::lang("Zpráva", "cs"),
      RdfValue::lang("Report", "en"),
    ]);
    assert_eq!(field.lang_text_value(&md, None).unwrap(), Some("Zpráva".to_string()));
    assert_eq!(field.lang_text_value(&md, Some("en")).unwrap(), Some("Report".to_string()));
    assert_eq!(field.lang_text_value(&md, Some("de")).unwrap(), None);
  }
  #[test]
  fn lang_text_untagged_fallback() {
    let field = FieldDef::lang_text(dc::TITLE);
    let md = md_with(dc::TITLE, vec![RdfValue::string("only untagged")]);
    assert_eq!(field.lang_text_value(&md, None).unwrap(), Some("only untagged".to_string()));
  }
  #[test]
  fn set_lang_text_replaces_in_place() {
    let field = FieldDef::lang_text(dc::TITLE);
    let mut md = md_with(dc::TITLE, vec![
      RdfValue::lang("Zpráva", "cs"),
      RdfValue::lang("Report", "en"),
    ]);
    field.set_lang_text(&mut md, "cs", "Hlášení").unwrap();
    let vals: Vec<&str> = md.get(dc::TITLE).iter().map(|v| v.lexical()).collect();
    assert_eq!(vals, ["Hlášení", "Report"]);
    field.set_lang_text(&mut md, "de", "Bericht").unwrap();
    assert_eq!(md.get(dc::TITLE).len(), 3);
  }
  #[test]
  fn integer_parses() {
    let field = FieldDef::integer(dcterms::EXTENT);
    let md = md_with(dcterms::EXTENT, vec![RdfValue::integer(42)]);
    assert_eq!(field.integer_value(&md).unwrap(), Some(42));
  }
  #[test]
  fn integer_parse_failure_is_typed() {
    let field = FieldDef::integer(dcterms::EXTENT);
    let md = md_with(dcterms::EXTENT, vec![RdfValue::string("not a number")]);
    match field.integer_value(&md) {
      Err(FieldError::BadInteger(_, raw, _)) => assert_eq!(raw, "not a number"),
      other => panic!("expected BadInteger, got {:?}", other),
    }
  }
  #[test]
  fn date_round_trip() {
    let field = FieldDef::date(dcterms::ISSUED);
    let mut md = RdfMetadata::new();
    let day = NaiveDate::from_ymd(2024, 3, 1);
    field.set_date(&mut md, day).unwrap();
    assert_eq!(field.date_value(&md).unwrap(), Some(day));
    assert_eq!(md.get(dcterms::ISSUED)[0].datatype(), Some(xsd::DATE));
  }
  #[test]
  fn date_parse_failure_is_typed() {
    let field = FieldDef::date(dcterms::ISSUED);
    let md = md_with(dcterms::ISSUED, vec![RdfValue::string("yesterday")]);
    assert!(matches!(field.date_value(&md), Err(FieldError::BadDate(_, _, _))));
  }
  #[test]
  fn datetime_round_trip() {
    let field = FieldDef::datetime(dcterms::MODIFIED);
    let mut md = RdfMetadata::new();
    let stamp = DateTime::parse_from_rfc3339("2024-03-01T10:30:00+01:00").unwrap();
    field.set_datetime(&mut md, stamp).unwrap();
    assert_eq!(field.datetime_value(&md).unwrap(), Some(stamp));
  }
  #[test]
  fn datetime_parse_failure_is_typed() {
    let field = FieldDef::datetime(dcterms::MODIFIED);
    let md = md_with(dcterms::MODIFIED, vec![RdfValue::string("2024-03-01")]);
    assert!(matches!(field.datetime_value(&md), Err(FieldError::BadDateTime(_, _, _))));
  }
  #[test]
  fn gps_validates_range() {
    assert!(GpsCoord::new(50.08, 14.43).is_ok());
    assert!(matches!(GpsCoord::new(95.0, 0.0), Err(FieldError::GpsOutOfRange(_, _))));
    assert!(matches!(GpsCoord::new(0.0, -190.0), Err(FieldError::GpsOutOfRange(_, _))));
  }
  #[test]
  fn gps_round_trip() {
    let field = FieldDef::gps(dcterms::SPATIAL);
    let mut md = RdfMetadata::new();
    let coord = GpsCoord::new(50.08, 14.43).unwrap();
    field.set_gps(&mut md, coord).unwrap();
    assert_eq!(field.gps_value(&md).unwrap(), Some(coord));
  }
  #[test]
  fn gps_rejects_garbage() {
    let field = FieldDef::gps(dcterms::SPATIAL);
    let md = md_with(dcterms::SPATIAL, vec![RdfValue::string("prague")]);
    assert!(matches!(field.gps_value(&md), Err(FieldError::BadLiteral(_, _, _))));
  }
  #[test]
  fn linked_uri_0() {
    let field = FieldDef::linked(dcterms::IS_PART_OF, RelatedModel::named("Collection"));
    let mut md = RdfMetadata::new();
    field.set_linked(&mut md, "info:repo/coll-1").unwrap();
    assert_eq!(field.linked_uri(&md).unwrap(), Some("info:repo/coll-1".to_string()));
  }
  #[test]
  fn linked_uri_rejects_literal() {
    let field = FieldDef::linked(dcterms::IS_PART_OF, RelatedModel::named("Collection"));
    let md = md_with(dcterms::IS_PART_OF, vec![RdfValue::string("not a ref")]);
    assert!(matches!(field.linked_uri(&md), Err(FieldError::BadLiteral(_, _, _))));
  }
  #[test]
  fn is_satisfied_0() {
    let field = FieldDef::text(dc::TITLE).mandatory();
    let mut md = RdfMetadata::new();
    assert!(!field.is_satisfied(&md));
    md.add(dc::TITLE, RdfValue::string("present"));
    assert!(field.is_satisfied(&md));
    let optional = FieldDef::text(dc::DESCRIPTION);
    assert!(optional.is_satisfied(&md));
  }
  #[test]
  fn presentation_attrs_0() {
    let field = FieldDef::lang_text(dc::DESCRIPTION)
      .recommended()
      .verbose_name("Abstract")
      .attr("presentation", "textarea");
    assert_eq!(field.attr_value("presentation"), Some("textarea"));
    assert_eq!(field.verbose(), Some("Abstract"));
    assert_eq!(field.level(), FieldLevel::Recommended);
    assert_eq!(field.attr_value("missing"), None);
  }
  #[test]
  fn related_model_unresolved_then_resolved() {
    let types = TypeManager::new();
    let related = RelatedModel::named("Attachment");
    match related.get(&types) {
      Err(FieldError::UnresolvedRelated(name)) => assert_eq!(name, "Attachment"),
      other => panic!("expected UnresolvedRelated, got {:?}", other.map(|m| m.name().to_string())),
    }
    let mixin = types.register(ModelMixin::new(
      "Attachment",
      ebucore::COLLECTION,
      crate::model::typemgr::Handles::Never,
      vec![],
    ));
    let resolved = related.get(&types).unwrap();
    assert!(Arc::ptr_eq(&mixin, &resolved));
    /* memoized from now on */
    let again = related.get(&types).unwrap();
    assert!(Arc::ptr_eq(&resolved, &again));
  }
}
