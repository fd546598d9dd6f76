//! Substance records and mixtures consumed by the solvers.
//!
//! Parameter tables are stored as json lists of [PureRecord]s. A [Mixture] is
//! an ordered list of [Component]s, i.e. Antoine coefficients together with
//! the liquid mole fraction of each substance.
use crate::antoine::AntoineRecord;
use crate::errors::{VleError, VleResult};
use indexmap::IndexMap;
use ndarray::Array1;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::ops::Deref;
use std::path::Path;

mod identifier;

pub use identifier::{Identifier, IdentifierOption};

/// Maximum deviation of the sum of mole fractions from 1.
pub const MOLEFRAC_TOLERANCE: f64 = 1e-6;

/// Model parameters of a pure substance together with its identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PureRecord<M> {
    pub identifier: Identifier,
    #[serde(flatten)]
    pub model_record: M,
}

impl<M> PureRecord<M> {
    pub fn new(identifier: Identifier, model_record: M) -> Self {
        Self {
            identifier,
            model_record,
        }
    }

    /// Read the records of the given substances from a json file.
    ///
    /// The records are returned in the order of `substances`.
    pub fn from_json<P, S>(
        substances: &[S],
        file: P,
        identifier_option: IdentifierOption,
    ) -> VleResult<Vec<Self>>
    where
        P: AsRef<Path>,
        S: Deref<Target = str>,
        M: DeserializeOwned,
    {
        let file_records: Vec<Self> = serde_json::from_reader(BufReader::new(File::open(file)?))?;
        Self::select(substances, file_records, identifier_option)
    }

    /// Pick the records of the given substances out of a parameter table.
    pub fn select<S>(
        substances: &[S],
        records: Vec<Self>,
        identifier_option: IdentifierOption,
    ) -> VleResult<Vec<Self>>
    where
        S: Deref<Target = str>,
    {
        let mut queried: IndexMap<&str, Option<Self>> =
            substances.iter().map(|s| (s.deref(), None)).collect();
        if queried.len() != substances.len() {
            return Err(VleError::IncompatibleParameters(
                "A substance was defined more than once.".to_string(),
            ));
        }

        let mut missing = queried.len();
        for record in records {
            let Some(id) = record.identifier.as_str(identifier_option) else {
                continue;
            };
            if let Some(entry) = queried.get_mut(id) {
                if entry.is_none() {
                    *entry = Some(record);
                    missing -= 1;
                }
            }
            if missing == 0 {
                break;
            }
        }

        if missing > 0 {
            let not_found: Vec<_> = queried
                .iter()
                .filter(|(_, r)| r.is_none())
                .map(|(s, _)| *s)
                .collect();
            return Err(VleError::ComponentsNotFound(format!("{not_found:?}")));
        }
        Ok(queried.into_values().flatten().collect())
    }
}

impl<M: Serialize> fmt::Display for PureRecord<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        let s = s.replace('"', "").replace(',', ", ").replace(':', ": ");
        write!(f, "PureRecord({})", &s[1..s.len() - 1])
    }
}

/// A substance in a liquid mixture.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub antoine: AntoineRecord,
    /// liquid mole fraction
    pub molefrac: f64,
}

impl Component {
    pub fn new(name: &str, antoine: AntoineRecord, molefrac: f64) -> Self {
        Self {
            name: name.into(),
            antoine,
            molefrac,
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x = {:.5})", self.name, self.molefrac)
    }
}

/// An ordered collection of components with known liquid composition.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Mixture {
    components: Vec<Component>,
}

impl Mixture {
    /// Create a mixture and check that the mole fractions are valid.
    pub fn new(components: Vec<Component>) -> VleResult<Self> {
        if components.is_empty() {
            return Err(VleError::InvalidInput(
                "a mixture needs at least one component".into(),
            ));
        }
        if let Some(c) = components
            .iter()
            .find(|c| !(c.molefrac.is_finite() && c.molefrac >= 0.0))
        {
            return Err(VleError::InvalidInput(format!(
                "mole fraction of {} is {}",
                c.name, c.molefrac
            )));
        }
        let total: f64 = components.iter().map(|c| c.molefrac).sum();
        if (total - 1.0).abs() > MOLEFRAC_TOLERANCE {
            return Err(VleError::InvalidInput(format!(
                "mole fractions sum to {total}"
            )));
        }
        Ok(Self { components })
    }

    /// Create a pure substance.
    pub fn pure(name: &str, antoine: AntoineRecord) -> Self {
        Self {
            components: vec![Component::new(name, antoine, 1.0)],
        }
    }

    /// Create a binary mixture with mole fraction `x1` of the first component.
    pub fn binary(
        x1: f64,
        (name1, antoine1): (&str, AntoineRecord),
        (name2, antoine2): (&str, AntoineRecord),
    ) -> VleResult<Self> {
        if !(0.0..=1.0).contains(&x1) {
            return Err(VleError::InvalidInput(format!(
                "mole fraction must be within [0, 1], got {x1}"
            )));
        }
        Self::new(vec![
            Component::new(name1, antoine1, x1),
            Component::new(name2, antoine2, 1.0 - x1),
        ])
    }

    /// Combine Antoine records with liquid mole fractions.
    pub fn from_records(
        records: Vec<PureRecord<AntoineRecord>>,
        molefracs: &[f64],
    ) -> VleResult<Self> {
        if records.len() != molefracs.len() {
            return Err(VleError::IncompatibleParameters(format!(
                "{} records but {} mole fractions",
                records.len(),
                molefracs.len()
            )));
        }
        let components = records
            .into_iter()
            .zip(molefracs)
            .map(|(r, &x)| {
                let name = r.identifier.as_readable_str().unwrap_or_default().to_owned();
                Component {
                    name,
                    antoine: r.model_record,
                    molefrac: x,
                }
            })
            .collect();
        Self::new(components)
    }

    /// Read the Antoine coefficients of the given substances from a json file.
    pub fn from_json<P, S>(
        substances: &[S],
        molefracs: &[f64],
        file: P,
        identifier_option: IdentifierOption,
    ) -> VleResult<Self>
    where
        P: AsRef<Path>,
        S: Deref<Target = str>,
    {
        let records = PureRecord::from_json(substances, file, identifier_option)?;
        Self::from_records(records, molefracs)
    }

    /// The same substances with a different liquid composition.
    pub fn with_molefracs(&self, molefracs: &[f64]) -> VleResult<Self> {
        if molefracs.len() != self.len() {
            return Err(VleError::IncompatibleParameters(format!(
                "mixture has {} components but {} mole fractions were given",
                self.len(),
                molefracs.len()
            )));
        }
        let components = self
            .components
            .iter()
            .zip(molefracs)
            .map(|(c, &x)| Component::new(&c.name, c.antoine, x))
            .collect();
        Self::new(components)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.components.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn molefracs(&self) -> Array1<f64> {
        self.components.iter().map(|c| c.molefrac).collect()
    }

    /// Antoine vapor pressures of all components.
    pub fn vapor_pressures(&self, temperature: f64) -> VleResult<Array1<f64>> {
        self.components
            .iter()
            .map(|c| c.antoine.vapor_pressure(temperature))
            .collect()
    }

    /// Pure component boiling temperatures at the given pressure.
    pub fn saturation_temperatures(&self, pressure: f64) -> VleResult<Array1<f64>> {
        self.components
            .iter()
            .map(|c| c.antoine.saturation_temperature(pressure))
            .collect()
    }
}

impl fmt::Display for Mixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components: Vec<_> = self.components.iter().map(|c| c.to_string()).collect();
        write!(f, "Mixture({})", components.join(", "))
    }
}
