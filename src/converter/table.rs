use anyhow::anyhow;
use anyhow::bail;
use anyhow::ensure;
use anyhow::Error;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashSet;
use std::str::FromStr;

/// A gem class.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GemClass {
    /// The identifier of this gem class, as typed on the command line. Empty
    /// for the basic gem class.
    ident: String,

    /// The display name of this gem class. Empty for the basic gem class.
    name: String,
}

impl GemClass {
    /// Returns the basic gem class.
    fn basic() -> GemClass {
        GemClass {ident: String::new(), name: String::new()}
    }

    /// Returns the identifier of this gem class.
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Returns the display name of this gem class.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A gem table.
///
/// This structure is the ordered sequence of gem classes, from the basic gem
/// class (order 0) upwards, together with the number of gems of one class
/// needed to craft a single gem of the next class. Gem tables are built from
/// the gem database by the build script and never change afterwards.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Table {
    /// The number of gems of one class that make a gem of the next class.
    factor: u32,

    /// The gem classes, lowest first. Never empty: the basic gem class always
    /// comes first.
    classes: Vec<GemClass>,
}

impl Table {
    /// The smallest sensible crafting factor.
    pub const MIN_FACTOR: u32 = 2;

    /// Returns the crafting factor.
    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// Returns the gem classes, lowest first.
    pub fn classes(&self) -> &[GemClass] {
        &self.classes
    }

    /// Returns the basic gem class.
    pub fn basic(&self) -> &GemClass {
        &self.classes[0]
    }

    /// Returns the order of the highest gem class.
    pub fn highest(&self) -> usize {
        self.classes.len() - 1
    }

    /// Returns the order of the gem class with the given identifier.
    pub fn order(&self, ident: &str) -> Option<usize> {
        self.classes.iter().position(|class| class.ident == ident)
    }

    /// Returns the gem class with the given identifier.
    pub fn class(&self, ident: &str) -> Option<&GemClass> {
        self.classes.iter().find(|class| class.ident == ident)
    }
}

/// Implements parsing of gem database records into gem tables.
///
/// Errors are prefixed with the offending line number, so that callers
/// concatenating several database files can map them back.
impl FromStr for Table {
    type Err = Error;

    fn from_str(string: &str) -> Result<Table, Error> {
        const DELIMITER_COMMENT: char = '#';
        const DELIMITER_RECORD: char = '|';

        let mut factor = None;
        let mut classes = vec![GemClass::basic()];
        let mut idents = HashSet::new();

        for (line, number) in string.lines().zip(1..) {
            let mut line = line;

            // Strip comments.
            if let Some((record, _)) = line.split_once(DELIMITER_COMMENT) {
                line = record;
            }

            // Strip whitespace.
            line = line.trim();

            // Skip empty lines.
            if line.is_empty() {
                continue;
            }

            let mut record = line.split(DELIMITER_RECORD).map(|string_record| {
                string_record.trim().to_string()
            });

            let type_record = record.next().unwrap_or_default();
            let record = record.collect::<Vec<String>>();

            let result = match type_record.as_str() {
                "F" => process_factor(record, &mut factor),
                "C" => process_class(record, &mut classes, &mut idents),

                _ => Err(anyhow!("Unknown record type")),
            };

            result.map_err(|error| anyhow!("{}: {}", number, error))?;
        }

        let factor = factor.ok_or_else(|| anyhow!("Missing factor record"))?;

        Ok(Table {factor, classes})
    }
}

/// Processes a crafting factor (F-record).
fn process_factor(record: Vec<String>, factor: &mut Option<u32>)
-> Result<(), Error> {
    let [string_factor] = into_array(record)?;

    let value = string_factor.parse::<u32>().map_err(|_|
        anyhow!("Illegal factor")
    )?;

    ensure!(value >= Table::MIN_FACTOR, "Factor must be at least {}", Table::MIN_FACTOR);
    ensure!(factor.replace(value).is_none(), "Duplicate factor");

    Ok(())
}

/// Processes a gem class (C-record).
fn process_class(
    record: Vec<String>,
    classes: &mut Vec<GemClass>,
    idents: &mut HashSet<String>)
-> Result<(), Error> {
    lazy_static! {
        static ref REGEX: Regex = Regex::new(r"^\p{Ll}+$").unwrap();
    }

    let [ident, name] = into_array(record)?;

    ensure!(REGEX.is_match(&ident), "Illegal gem class identifier");
    ensure!(!name.is_empty(), "Missing gem class name");
    ensure!(idents.insert(ident.clone()), "Duplicate gem class");

    classes.push(GemClass {ident, name});

    Ok(())
}

/// Converts the given record into an array for unboxing.
fn into_array<const N: usize>(record: Vec<String>)
-> Result<[String; N], Error> {
    match record.try_into() {
        Ok(record) => Ok(record),
        Err(_) => bail!("Illegal argument count"),
    }
}
