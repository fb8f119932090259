use crate::error::ChemistError;
use crate::models::nucleus::{AtomicNumber, Nuclei, Nucleus};
use crate::models::point::Point;
use crate::view::FieldStorage;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Atomic number and standard atomic weight of one element.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementData {
    pub atomic_number: AtomicNumber,
    /// Standard atomic weight in daltons.
    pub mass: f64,
}

#[rustfmt::skip]
static DEFAULT_ELEMENTS: Map<&'static str, ElementData> = phf_map! {
    "H"  => ElementData { atomic_number: 1,  mass: 1.008 },
    "He" => ElementData { atomic_number: 2,  mass: 4.002602 },
    "Li" => ElementData { atomic_number: 3,  mass: 6.94 },
    "Be" => ElementData { atomic_number: 4,  mass: 9.0121831 },
    "B"  => ElementData { atomic_number: 5,  mass: 10.81 },
    "C"  => ElementData { atomic_number: 6,  mass: 12.011 },
    "N"  => ElementData { atomic_number: 7,  mass: 14.007 },
    "O"  => ElementData { atomic_number: 8,  mass: 15.999 },
    "F"  => ElementData { atomic_number: 9,  mass: 18.998403163 },
    "Ne" => ElementData { atomic_number: 10, mass: 20.1797 },
    "Na" => ElementData { atomic_number: 11, mass: 22.98976928 },
    "Mg" => ElementData { atomic_number: 12, mass: 24.305 },
    "Al" => ElementData { atomic_number: 13, mass: 26.9815385 },
    "Si" => ElementData { atomic_number: 14, mass: 28.085 },
    "P"  => ElementData { atomic_number: 15, mass: 30.973761998 },
    "S"  => ElementData { atomic_number: 16, mass: 32.06 },
    "Cl" => ElementData { atomic_number: 17, mass: 35.45 },
    "Ar" => ElementData { atomic_number: 18, mass: 39.948 },
};

#[derive(Debug, Error)]
pub enum PeriodicTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("No element with atomic number {0}")]
    UnknownAtomicNumber(AtomicNumber),
    #[error("Failed to build nuclei: {0}")]
    Storage(#[from] ChemistError),
}

/// Element data keyed by symbol, used to turn element labels into nuclei.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicTable {
    elements: BTreeMap<String, ElementData>,
}

impl Default for PeriodicTable {
    fn default() -> Self {
        let elements = DEFAULT_ELEMENTS
            .entries()
            .map(|(symbol, data)| ((*symbol).to_string(), *data))
            .collect();
        Self { elements }
    }
}

impl PeriodicTable {
    /// Loads element data from a TOML file on top of the built-in elements.
    ///
    /// The file holds one table per element symbol:
    ///
    /// ```toml
    /// [K]
    /// atomic_number = 19
    /// mass = 39.0983
    /// ```
    ///
    /// Entries in the file replace built-in entries with the same symbol.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, PeriodicTableError> {
        let content = std::fs::read_to_string(path).map_err(|e| PeriodicTableError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let overrides = Self::parse(&content).map_err(|e| PeriodicTableError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let mut table = Self::default();
        let n_overrides = overrides.len();
        table.extend(overrides);
        info!(
            elements = table.len(),
            from_file = n_overrides,
            "Loaded periodic table."
        );
        Ok(table)
    }

    /// Like [`load`](Self::load) but reads the TOML from a string.
    pub fn from_toml_str(content: &str) -> Result<Self, PeriodicTableError> {
        let overrides = Self::parse(content).map_err(|e| PeriodicTableError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        let mut table = Self::default();
        table.extend(overrides);
        Ok(table)
    }

    fn parse(content: &str) -> Result<BTreeMap<String, ElementData>, toml::de::Error> {
        toml::from_str(content)
    }

    /// Adds or replaces elements.
    pub fn extend<I>(&mut self, elements: I)
    where
        I: IntoIterator<Item = (String, ElementData)>,
    {
        for (symbol, data) in elements {
            let symbol = canonical_symbol(&symbol);
            debug!(%symbol, atomic_number = data.atomic_number, "Registered element.");
            self.elements.insert(symbol, data);
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Looks up an element by symbol, ignoring case.
    pub fn element(&self, symbol: &str) -> Result<ElementData, PeriodicTableError> {
        self.elements
            .get(&canonical_symbol(symbol))
            .copied()
            .ok_or_else(|| PeriodicTableError::UnknownElement(symbol.to_string()))
    }

    /// Looks up an element by atomic number, returning its symbol too.
    ///
    /// Several symbols may share an atomic number once isotopes or aliases are
    /// loaded (`D` next to `H`). The built-in symbol wins if it still carries
    /// `atomic_number`; otherwise the alphabetically first symbol is returned.
    pub fn element_by_number(
        &self,
        atomic_number: AtomicNumber,
    ) -> Result<(&str, ElementData), PeriodicTableError> {
        let mut matches = self
            .elements
            .iter()
            .filter(|(_, data)| data.atomic_number == atomic_number);
        let first = matches
            .next()
            .ok_or(PeriodicTableError::UnknownAtomicNumber(atomic_number))?;
        let is_builtin = |symbol: &str| {
            DEFAULT_ELEMENTS
                .get(symbol)
                .is_some_and(|data| data.atomic_number == atomic_number)
        };
        let (symbol, data) = std::iter::once(first)
            .chain(matches)
            .find(|(symbol, _)| is_builtin(symbol.as_str()))
            .unwrap_or(first);
        Ok((symbol.as_str(), *data))
    }

    /// A nucleus of element `symbol` at `point`, with the standard atomic weight.
    pub fn nucleus(&self, symbol: &str, point: Point) -> Result<Nucleus, PeriodicTableError> {
        let data = self.element(symbol)?;
        Ok(Nucleus::new(
            canonical_symbol(symbol),
            data.atomic_number,
            data.mass,
            point,
        ))
    }

    /// Builds a set of nuclei from `(symbol, position)` pairs.
    pub fn nuclei<I, S>(&self, atoms: I) -> Result<Nuclei, PeriodicTableError>
    where
        I: IntoIterator<Item = (S, Point)>,
        S: AsRef<str>,
    {
        let mut nuclei = Nuclei::new();
        for (symbol, point) in atoms {
            nuclei.push(self.nucleus(symbol.as_ref(), point)?)?;
        }
        Ok(nuclei)
    }
}

/// `"he"`, `"HE"` and `"He"` all become `"He"`.
fn canonical_symbol(symbol: &str) -> String {
    let mut chars = symbol.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
