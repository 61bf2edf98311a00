/*
  Turns an exported RDF document into the raw per-resource records the
  mapping layer hydrates metadata containers from. The unit of interest
  is a resource, so triples are grouped by named subject; blank nodes
  have no repository identity and are skipped on both ends of a triple.
*/

use {
  std::collections::HashMap,
  crate::{
    RdfValue,
    errors::IngestError,
    metadata::{RawMetadata, RawProperty},
  }
};

type Result<T> = std::result::Result<T, IngestError>;

pub struct ParsedResources {
  pub resources: Vec<RawMetadata>,
}
impl ParsedResources {
  pub fn from_xml(path: &str) -> Result<Self> {
    use std::io::BufReader;
    use std::fs::File;
    use rio_xml::{RdfXmlParser, RdfXmlError};
    use rio_api::{
      parser::TriplesParser,
      model::{NamedOrBlankNode, NamedNode}
    };

    let mut triples: Vec<(String, String, RdfValue)> = Vec::new();

    RdfXmlParser::new(BufReader::new(File::open(path)?), &format!("file:{}", path))?
      .parse_all(&mut |t| {
        let subject = match t.subject {
          NamedOrBlankNode::NamedNode(NamedNode{ iri }) => iri.to_string(),
          NamedOrBlankNode::BlankNode(_) => return Ok(()),
        };
        let NamedNode{ iri: predicate } = t.predicate;
        if let Some(value) = term_to_value(t.object) {
          triples.push((subject, predicate.to_string(), value));
        }
        Ok(()) as std::result::Result<(), RdfXmlError>
    })?;
    Ok(Self::from_triples(triples))
  }
  pub fn from_turtle(path: &str) -> Result<Self> {
    use std::io::BufReader;
    use std::fs::File;
    use rio_turtle::{TurtleParser, TurtleError};
    use rio_api::{
      parser::TriplesParser,
      model::{NamedOrBlankNode, NamedNode}
    };

    let mut triples: Vec<(String, String, RdfValue)> = Vec::new();

    TurtleParser::new(BufReader::new(File::open(path)?), &format!("file:{}", path))?
      .parse_all(&mut |t| {
        let subject = match t.subject {
          NamedOrBlankNode::NamedNode(NamedNode{ iri }) => iri.to_string(),
          NamedOrBlankNode::BlankNode(_) => return Ok(()),
        };
        let NamedNode{ iri: predicate } = t.predicate;
        if let Some(value) = term_to_value(t.object) {
          triples.push((subject, predicate.to_string(), value));
        }
        Ok(()) as std::result::Result<(), TurtleError>
    })?;
    Ok(Self::from_triples(triples))
  }
  /* Group by subject, first-seen order on resources and predicates */
  fn from_triples(triples: Vec<(String, String, RdfValue)>) -> Self {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut resources: Vec<RawMetadata> = Vec::new();
    for (subject, predicate, value) in triples {
      let pos = match index.get(&subject) {
        Some(&pos) => pos,
        None => {
          index.insert(subject.clone(), resources.len());
          resources.push(RawMetadata {
            id: subject,
            properties: Vec::new(),
          });
          resources.len() - 1
        },
      };
      let resource = &mut resources[pos];
      match resource.properties.iter_mut().find(|p| p.name == predicate) {
        Some(prop) => prop.values.push(value),
        None => resource.properties.push(RawProperty {
          name: predicate,
          values: vec![value],
        }),
      }
    }
    ParsedResources { resources }
  }
}

fn term_to_value(term: rio_api::model::Term) -> Option<RdfValue> {
  use rio_api::model::{NamedNode, Term, Literal};
  match term {
    Term::NamedNode(NamedNode{ iri }) => Some(RdfValue::reference(iri)),
    Term::BlankNode(_) => None,
    Term::Literal(lit) => match lit {
      Literal::Simple{ value } => Some(RdfValue::string(value)),
      Literal::LanguageTaggedString{ value, language } => Some(RdfValue::lang(value, language)),
      Literal::Typed{ value, datatype: NamedNode{ iri } } => Some(RdfValue::typed(value, iri)),
    },
  }
}
