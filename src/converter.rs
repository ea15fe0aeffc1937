mod table;

use anyhow::ensure;
use anyhow::Context;
use anyhow::Error;
use rug::ops::Pow;
use rug::Integer;
use tracing::debug;
use tracing::instrument;

use crate::cluster::Cluster;
use crate::error::GemError;

pub use crate::converter::table::GemClass;
pub use crate::converter::table::Table;

/// The gem table serialized by the build script.
const DATA_TABLE: &[u8] = include_bytes!(env!("PATH_DATA_TABLE"));

/// A gem converter.
///
/// This structure converts gem clusters to basic gems and back, according to
/// some gem table.
pub struct Converter {
    /// The gem table of this converter.
    table: Table,
}

impl Converter {
    /// Returns a converter for the given gem table.
    pub fn new(table: Table) -> Converter {
        Converter {table}
    }

    /// Returns a converter for the gem table built from the gem database.
    pub fn embedded() -> Result<Converter, Error> {
        Converter::from_data(DATA_TABLE)
    }

    /// Returns a converter for a serialized gem table.
    pub fn from_data(data: &[u8]) -> Result<Converter, Error> {
        let table = bincode::deserialize::<Table>(data)
        .context("Corrupt gem table")?;

        ensure!(!table.classes().is_empty(), "Corrupt gem table: no gem classes");
        ensure!(
            table.factor() >= Table::MIN_FACTOR,
            "Corrupt gem table: factor {} is less than {}",
            table.factor(),
            Table::MIN_FACTOR
        );

        Ok(Converter::new(table))
    }

    /// Returns the gem table of this converter.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the gem class with the given identifier.
    pub fn class(&self, ident: &str) -> Result<&GemClass, GemError> {
        self.table.class(ident).ok_or_else(|| GemError::UnknownClass(ident.to_string()))
    }

    /// Returns the order of the gem class with the given identifier. Basic
    /// gems are of order 0.
    pub fn order(&self, ident: &str) -> Result<usize, GemError> {
        self.table.order(ident).ok_or_else(|| GemError::UnknownClass(ident.to_string()))
    }

    /// Returns the number of basic gems in one gem of the given order.
    pub fn unit_value(&self, order: usize) -> Integer {
        Integer::from(self.table.factor()).pow(order as u32)
    }

    /// Returns the number of basic gems needed for the given cluster.
    #[instrument(level = "debug", skip(self))]
    pub fn reduce(&self, cluster: &Cluster) -> Result<Integer, GemError> {
        let mut gems = Integer::new();

        for (ident, quantity) in cluster {
            let order = self.order(ident)?;

            gems += self.unit_value(order) * quantity;
        }

        debug!(%gems, "reduced to basic gems");

        Ok(gems)
    }

    /// Returns the cluster with the best possible gems for the given number of
    /// basic gems.
    pub fn expand(&self, gems: &Integer) -> Cluster {
        self.expand_upto(gems, self.table.highest())
    }

    /// Returns the cluster with the best possible gems for the given number of
    /// basic gems, considering only gem classes up to the given order.
    ///
    /// Whatever would have made gems above `best` is kept as gems of class
    /// `best`. Orders beyond the gem table are treated as the highest class.
    pub fn expand_upto(&self, gems: &Integer, best: usize) -> Cluster {
        let best = best.min(self.table.highest());

        let mut remaining = gems.clone();
        let mut quantities = vec![];

        for (order, class)
        in self.table.classes().iter().enumerate().take(best + 1).rev() {
            let value = self.unit_value(order);

            if remaining >= value {
                let (count, rest) = remaining.div_rem(value);
                remaining = rest;

                quantities.push((class.ident().to_string(), count));
            }
        }

        quantities.into_iter().collect()
    }

    /// Returns the cluster with the best possible gems for the given number of
    /// basic gems, considering only gem classes up to the one with the given
    /// identifier.
    pub fn expand_upto_class(&self, gems: &Integer, best: &str)
    -> Result<Cluster, GemError> {
        Ok(self.expand_upto(gems, self.order(best)?))
    }

    /// Returns various clusters equivalent to the given number of basic gems.
    ///
    /// The clusters differ in what they consider the best gem class, starting
    /// from the best gem class that can actually be made and going down to
    /// basic gems. Zero gems have no representations.
    #[instrument(level = "debug", skip(self))]
    pub fn alternate_expansions(&self, gems: &Integer) -> Vec<Cluster> {
        let mut clusters = vec![];

        for (order, class) in self.table.classes().iter().enumerate() {
            let cluster = self.expand_upto(gems, order);

            // Not even a single gem of this class can be made, so better
            // classes add nothing new.
            if cluster.get(class.ident()).is_none() {
                break;
            }

            clusters.push(cluster);
        }

        debug!(count = clusters.len(), "found alternate expansions");

        clusters.reverse();
        clusters
    }
}
