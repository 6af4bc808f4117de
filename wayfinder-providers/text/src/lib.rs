//! Line-oriented UTF-8 street map format.
//!
//! Each non-blank line that does not start with `#` holds one record:
//!
//! ```text
//! node <id> <lon> <lat>
//! name <id> <free text>
//! way  <id> <id> [<id> ...]
//! ```
//!
//! Records are applied in order, so a `name` or `way` must follow the `node`
//! lines it references.

use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, instrument};
use wayfinder_core::{StreetMap, StreetMapError, VertexId};

/// Errors produced while reading a text map.
#[derive(Debug, Error)]
pub enum TextMapError {
    /// Reading from the underlying source failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The input contained no `node` records.
    #[error("map input contains no nodes")]
    EmptyInput,
    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
    /// A well-formed record was rejected by the map.
    #[error("line {line}: {source}")]
    Map {
        /// One-based line number.
        line: usize,
        /// Error reported by [`StreetMap`].
        #[source]
        source: StreetMapError,
    },
}

/// Street map loaded from the text format.
#[derive(Clone, Debug)]
pub struct TextMapProvider {
    name: String,
    map: StreetMap,
}

impl TextMapProvider {
    /// Parses a map from `reader`.
    ///
    /// # Errors
    /// Returns [`TextMapError::Io`] when reading fails,
    /// [`TextMapError::Malformed`] for an unparsable line,
    /// [`TextMapError::Map`] when a record conflicts with earlier ones and
    /// [`TextMapError::EmptyInput`] when no node was defined.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use wayfinder_providers_text::TextMapProvider;
    ///
    /// let input = "node 1 -122.25 37.87\nnode 2 -122.26 37.87\nway 1 2\nname 2 Top Dog\n";
    /// let provider = TextMapProvider::try_from_reader("berkeley", Cursor::new(input))?;
    /// assert_eq!(provider.name(), "berkeley");
    /// assert_eq!(provider.map().len(), 2);
    /// assert_eq!(provider.map().node(2).and_then(|node| node.name()), Some("Top Dog"));
    /// # Ok::<(), wayfinder_providers_text::TextMapError>(())
    /// ```
    #[instrument(
        name = "provider.text_map",
        err,
        skip(name, reader),
        fields(name = tracing::field::Empty),
    )]
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TextMapError> {
        let name = name.into();
        tracing::Span::current().record("name", name.as_str());

        let mut map = StreetMap::new();
        let mut ways = 0_usize;
        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line?;
            let record = line.trim();
            if record.is_empty() || record.starts_with('#') {
                continue;
            }
            if parse_record(&mut map, record, line_number)? == RecordKind::Way {
                ways += 1;
            }
        }

        if map.is_empty() {
            return Err(TextMapError::EmptyInput);
        }
        debug!(name = %name, nodes = map.len(), ways, "text map loaded");
        Ok(Self { name, map })
    }

    /// Returns the name given to this map.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loaded map.
    #[must_use]
    pub fn map(&self) -> &StreetMap {
        &self.map
    }

    /// Consumes the provider and returns the map.
    #[must_use]
    pub fn into_map(self) -> StreetMap {
        self.map
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RecordKind {
    Node,
    Name,
    Way,
}

fn parse_record(map: &mut StreetMap, record: &str, line: usize) -> Result<RecordKind, TextMapError> {
    let (keyword, rest) = record
        .split_once(char::is_whitespace)
        .unwrap_or((record, ""));
    let rest = rest.trim_start();
    let applied = match keyword {
        "node" => {
            let fields: Vec<&str> = rest.split_whitespace().collect();
            let &[id, lon, lat] = fields.as_slice() else {
                return Err(malformed(line, format!("node expects 3 fields, found {}", fields.len())));
            };
            let id = parse_id(id, line)?;
            let lon = parse_coordinate(lon, "longitude", line)?;
            let lat = parse_coordinate(lat, "latitude", line)?;
            map.add_node(id, lon, lat).map(|()| RecordKind::Node)
        }
        "name" => {
            let (id, text) = rest
                .split_once(char::is_whitespace)
                .map(|(id, text)| (id, text.trim()))
                .filter(|(_, text)| !text.is_empty())
                .ok_or_else(|| malformed(line, "name expects an id followed by text".to_owned()))?;
            let id = parse_id(id, line)?;
            map.set_name(id, text).map(|()| RecordKind::Name)
        }
        "way" => {
            let ids = rest
                .split_whitespace()
                .map(|id| parse_id(id, line))
                .collect::<Result<Vec<VertexId>, _>>()?;
            if ids.len() < 2 {
                return Err(malformed(line, "way expects at least 2 ids".to_owned()));
            }
            map.add_way(&ids).map(|()| RecordKind::Way)
        }
        other => return Err(malformed(line, format!("unknown record `{other}`"))),
    };
    applied.map_err(|source| TextMapError::Map { line, source })
}

fn parse_id(raw: &str, line: usize) -> Result<VertexId, TextMapError> {
    raw.parse()
        .map_err(|err| malformed(line, format!("invalid id `{raw}`: {err}")))
}

fn parse_coordinate(raw: &str, axis: &str, line: usize) -> Result<f64, TextMapError> {
    raw.parse()
        .map_err(|err| malformed(line, format!("invalid {axis} `{raw}`: {err}")))
}

fn malformed(line: usize, reason: String) -> TextMapError {
    TextMapError::Malformed { line, reason }
}
