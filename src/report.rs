use rug::Integer;
use std::cmp::Ordering;
use std::io;
use std::io::Write;
use tracing::debug;
use tracing::instrument;

use crate::converter::Converter;
use crate::converter::GemClass;
use crate::error::GemError;
use crate::formatter::format_alternatives;
use crate::formatter::format_gems;
use crate::parser::parse_cluster;

/// How the stock compares to the target, in basic gems.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The stock makes exactly the target.
    Exact,

    /// The stock makes the target, with this many basic gems left over.
    Surplus(Integer),

    /// The stock falls short of the target by this many basic gems.
    Shortfall(Integer),
}

/// The result of checking a gem stock against a target.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Assessment<'a> {
    /// The gem class of the target.
    pub class: &'a GemClass,

    /// The number of target gems.
    pub quantity: Integer,

    /// How the stock compares to the target.
    pub outcome: Outcome,
}

/// Checks whether the gems in stock are enough to make the target gems.
///
/// The target must name exactly one gem class. All stock specs are added up.
#[instrument(level = "debug", skip(converter))]
pub fn assess<'a>(converter: &'a Converter, target: &str, stock: &[String])
-> Result<Assessment<'a>, GemError> {
    let target = parse_cluster(&[target]);

    if target.is_empty() {
        return Err(GemError::EmptyTarget);
    }

    if target.len() > 1 {
        let idents = target.iter().map(|(ident, _)| ident.clone()).collect();

        return Err(GemError::MultipleTargetClasses {idents});
    }

    let (ident, quantity) = target.iter().next().ok_or(GemError::EmptyTarget)?;
    let class = converter.class(ident)?;

    let stock = parse_cluster(stock);

    // Convert everything to basic gems and compare quantities.
    let target_basic = converter.reduce(&target)?;
    let stock_basic = converter.reduce(&stock)?;

    debug!(%target_basic, %stock_basic, "comparing target and stock");

    let outcome = match stock_basic.cmp(&target_basic) {
        Ordering::Equal => Outcome::Exact,
        Ordering::Greater => Outcome::Surplus(stock_basic - &target_basic),
        Ordering::Less => Outcome::Shortfall(target_basic - &stock_basic),
    };

    Ok(Assessment {class, quantity: quantity.clone(), outcome})
}

/// Renders `assessment` to `writer` in a human-readable text format.
///
/// Leftover or missing gems are shown as basic gems, or, if `verbose`, as
/// every useful equivalent cluster.
pub fn render(
    converter: &Converter,
    assessment: &Assessment,
    verbose: bool,
    mut writer: impl Write)
-> io::Result<()> {
    let target = format_gems(&assessment.quantity, assessment.class);

    match &assessment.outcome {
        Outcome::Exact => {
            writeln!(writer, "You have just enough lesser gems to make {}.", target)?;
        }
        Outcome::Surplus(residue) => {
            writeln!(writer, "You DO have enough lesser gems to make {}.", target)?;
            writeln!(writer, "Afterwards, you will still have the equivalent of:")?;
            render_gems(converter, residue, verbose, &mut writer)?;
        }
        Outcome::Shortfall(missing) => {
            writeln!(writer, "You DON'T have enough lesser gems to make {}.", target)?;
            writeln!(writer, "What is missing is the equivalent of:")?;
            render_gems(converter, missing, verbose, &mut writer)?;
        }
    }

    Ok(())
}

/// Renders a number of basic gems.
fn render_gems(converter: &Converter, gems: &Integer, verbose: bool, writer: &mut impl Write)
-> io::Result<()> {
    let table = converter.table();

    if verbose {
        let clusters = converter.alternate_expansions(gems);

        writeln!(writer, "{}", format_alternatives(table, &clusters))
    }
    else {
        writeln!(writer, "{}", format_gems(gems, table.basic()))
    }
}
