//! Fact lookup over XBRL instance documents.
//!
//! A filing's primary document is usually an XBRL instance (XML), but some
//! filers only publish inline XBRL embedded in HTML. [`FactIndex`] reads either
//! and records the first occurrence of every element, so a tag lookup is a hash
//! probe instead of a document scan.

use quick_xml::Reader;
use quick_xml::events::Event;
use scraper::{ElementRef, Html};
use statements_core::{DataError, Result};
use std::collections::HashMap;
use tracing::debug;

/// Number of leading characters inspected for an XML declaration.
const SNIFF_LEN: usize = 100;

/// Markup flavour of a fetched document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Markup {
    /// XML-declared document (XBRL instance).
    Xml,
    /// Anything else, parsed leniently as HTML.
    Html,
}

impl Markup {
    /// Detects the markup flavour from the document's leading characters.
    #[must_use]
    pub fn detect(body: &str) -> Self {
        let head: String = body.chars().take(SNIFF_LEN).collect();
        if head.contains("<?xml") {
            Self::Xml
        } else {
            Self::Html
        }
    }
}

/// First-occurrence text of every element in a document, keyed by qualified name.
#[derive(Clone, Debug)]
pub struct FactIndex {
    facts: HashMap<String, String>,
    markup: Markup,
}

impl FactIndex {
    /// Parses `body`, choosing the parser by [`Markup::detect`].
    ///
    /// # Errors
    /// Returns [`DataError::Xml`] if an XML-declared document is malformed.
    /// HTML parsing never fails.
    pub fn parse(body: &str) -> Result<Self> {
        match Markup::detect(body) {
            Markup::Xml => Self::from_xml(body),
            Markup::Html => Ok(Self::from_html(body)),
        }
    }

    /// Indexes an XML document.
    ///
    /// Element names are matched exactly. A fact's value is its own text
    /// content, trimmed; self-closing (nil) elements are present with an empty
    /// value.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut facts: HashMap<String, String> = HashMap::new();
        let mut open: Vec<(String, String)> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    open.push((name, String::new()));
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    facts.entry(name).or_default();
                }
                Ok(Event::Text(t)) => {
                    if let Some((_, text)) = open.last_mut() {
                        match t.unescape() {
                            Ok(s) => text.push_str(&s),
                            Err(_) => text.push_str(&String::from_utf8_lossy(&t)),
                        }
                    }
                }
                Ok(Event::CData(c)) => {
                    if let Some((_, text)) = open.last_mut() {
                        text.push_str(&String::from_utf8_lossy(&c));
                    }
                }
                Ok(Event::End(_)) => {
                    if let Some((name, text)) = open.pop() {
                        facts
                            .entry(name)
                            .or_insert_with(|| text.trim().to_string());
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(DataError::Xml(format!(
                        "XML parse error at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
            }
        }

        debug!(elements = facts.len(), "Indexed XML document");
        Ok(Self {
            facts,
            markup: Markup::Xml,
        })
    }

    /// Indexes an HTML document.
    ///
    /// HTML parsers lowercase element names, so lookups are case-insensitive.
    /// Only namespaced elements (`prefix:name`) are indexed. Inline XBRL facts
    /// (`ix:nonFraction`, `ix:nonNumeric`) are also indexed under their `name`
    /// attribute, with `sign` and `scale` applied to numeric facts.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let mut facts: HashMap<String, String> = HashMap::new();

        for node in document.root_element().descendants() {
            let Some(element) = ElementRef::wrap(node) else {
                continue;
            };
            let tag = element.value().name().to_ascii_lowercase();
            if !tag.contains(':') {
                continue;
            }

            let text = element.text().collect::<String>();
            let text = text.trim();

            if tag == "ix:nonfraction" || tag == "ix:nonnumeric" {
                if let Some(concept) = element.value().attr("name") {
                    let value = if tag == "ix:nonfraction" {
                        inline_numeric_value(&element, text)
                    } else {
                        text.to_string()
                    };
                    facts.entry(concept.to_ascii_lowercase()).or_insert(value);
                }
            }

            facts.entry(tag).or_insert_with(|| text.to_string());
        }

        debug!(elements = facts.len(), "Indexed HTML document");
        Self {
            facts,
            markup: Markup::Html,
        }
    }

    /// Returns the first-occurrence value of `element`, if the element occurs.
    #[must_use]
    pub fn get(&self, element: &str) -> Option<&str> {
        let value = match self.markup {
            Markup::Xml => self.facts.get(element),
            Markup::Html => self.facts.get(&element.to_ascii_lowercase()),
        };
        value.map(String::as_str)
    }

    /// Returns the markup flavour the index was built from.
    #[must_use]
    pub const fn markup(&self) -> Markup {
        self.markup
    }

    /// Returns the number of distinct elements indexed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns true if nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Applies the inline XBRL `sign` and `scale` attributes to a displayed number.
///
/// Text that is not a plain number (e.g. a dash for zero) is returned unchanged.
fn inline_numeric_value(element: &ElementRef<'_>, text: &str) -> String {
    let Ok(mut value) = text.replace(',', "").parse::<f64>() else {
        return text.to_string();
    };
    if let Some(scale) = element
        .value()
        .attr("scale")
        .and_then(|s| s.trim().parse::<i32>().ok())
    {
        value *= 10f64.powi(scale);
    }
    if element.value().attr("sign") == Some("-") {
        value = -value;
    }
    value.to_string()
}
