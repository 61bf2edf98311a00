
type Source<E> = Box<E>;

#[derive(Debug)]
pub enum MetadataError {
  IdentityReassigned(String, String),
}
impl std::error::Error for MetadataError {}
impl std::fmt::Display for MetadataError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use MetadataError::*;
    match self {
      IdentityReassigned(current, attempted) => write!(f, "Attempted to assign identity {} to metadata already identified as {}. A container's identity is set once, when the store confirms it.", attempted, current),
    }
  }
}

#[derive(Debug)]
pub enum FieldError {
  BadInteger(String, String, Source<std::num::ParseIntError>),
  BadDate(String, String, Source<chrono::ParseError>),
  BadDateTime(String, String, Source<chrono::ParseError>),
  BadLiteral(String, String, String),
  GpsOutOfRange(f64, f64),
  KindMismatch(String, &'static str),
  UnresolvedRelated(String),
}
impl std::error::Error for FieldError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use FieldError::*;
    match self {
      BadInteger(_, _, e) => Some(&**e),
      BadDate(_, _, e) => Some(&**e),
      BadDateTime(_, _, e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for FieldError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use FieldError::*;
    match self {
      BadInteger(field, raw, e) => write!(f, "Value \"{}\" of field {} is not a valid integer literal: {}", raw, field, *e),
      BadDate(field, raw, e) => write!(f, "Value \"{}\" of field {} is not a valid xsd:date literal: {}", raw, field, *e),
      BadDateTime(field, raw, e) => write!(f, "Value \"{}\" of field {} is not a valid xsd:dateTime literal: {}", raw, field, *e),
      BadLiteral(field, raw, expected) => write!(f, "Value \"{}\" of field {} cannot be read as {}", raw, field, expected),
      GpsOutOfRange(lat, lon) => write!(f, "Coordinates ({}, {}) are outside the valid latitude [-90, 90] / longitude [-180, 180] ranges", lat, lon),
      KindMismatch(field, accessor) => write!(f, "Field {} was accessed through the {} accessor but is declared with a different kind", field, accessor),
      UnresolvedRelated(name) => write!(f, "Related model \"{}\" is not registered yet. Register it with the TypeManager before dereferencing the field.", name),
    }
  }
}

#[derive(Debug)]
pub enum StoreError {
  NotFound(String),
  Backend(String),
  Other(Box<dyn std::error::Error + Send + Sync>),
}
impl std::error::Error for StoreError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use StoreError::*;
    match self {
      Other(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for StoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use StoreError::*;
    match self {
      NotFound(id) => write!(f, "The repository holds no resource identified by {}", id),
      Backend(reason) => write!(f, "The repository store failed: {}", reason),
      Other(e) => write!(f, "{}", *e),
    }
  }
}

#[derive(Debug)]
pub enum ObjectError {
  NoConnection,
  NoIdentity(&'static str),
  Deleted,
  Metadata(Source<MetadataError>),
  Field(Source<FieldError>),
  Store(Source<StoreError>),
}
impl std::error::Error for ObjectError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use ObjectError::*;
    match self {
      Metadata(e) => Some(&**e),
      Field(e) => Some(&**e),
      Store(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for ObjectError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use ObjectError::*;
    match self {
      NoConnection => write!(f, "The object holds no live connection to a repository. It was either built in memory without one or its connection has been dropped."),
      NoIdentity(op) => write!(f, "Attempted call to .{}() on an object that has no identity yet. Save it first.", op),
      Deleted => write!(f, "The object has been deleted from the repository and can no longer be used"),
      Metadata(e) => write!(f, "{}", *e),
      Field(e) => write!(f, "{}", *e),
      Store(e) => write!(f, "{}", *e),
    }
  }
}
impl From<MetadataError> for ObjectError {
  fn from(err: MetadataError) -> ObjectError {
    ObjectError::Metadata(Box::new(err))
  }
}
impl From<FieldError> for ObjectError {
  fn from(err: FieldError) -> ObjectError {
    ObjectError::Field(Box::new(err))
  }
}
impl From<StoreError> for ObjectError {
  fn from(err: StoreError) -> ObjectError {
    ObjectError::Store(Box::new(err))
  }
}

#[derive(Debug)]
pub enum IngestError {
  Io(Source<std::io::Error>),
  Xml(Source<rio_xml::RdfXmlError>),
  Turtle(Source<rio_turtle::TurtleError>),
}
impl std::error::Error for IngestError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use IngestError::*;
    match self {
      Io(e) => Some(&**e),
      Xml(e) => Some(&**e),
      Turtle(e) => Some(&**e),
    }
  }
}
impl std::fmt::Display for IngestError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use IngestError::*;
    match self {
      Io(e) => write!(f, "{}", *e),
      Xml(e) => write!(f, "{}", *e),
      Turtle(e) => write!(f, "{}", *e),
    }
  }
}
impl From<std::io::Error> for IngestError {
  fn from(err: std::io::Error) -> IngestError {
    IngestError::Io(Box::new(err))
  }
}
impl From<rio_xml::RdfXmlError> for IngestError {
  fn from(err: rio_xml::RdfXmlError) -> IngestError {
    IngestError::Xml(Box::new(err))
  }
}
impl From<rio_turtle::TurtleError> for IngestError {
  fn from(err: rio_turtle::TurtleError) -> IngestError {
    IngestError::Turtle(Box::new(err))
  }
}
