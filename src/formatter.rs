use rug::Integer;

use crate::cluster::Cluster;
use crate::converter::GemClass;
use crate::converter::Table;

const SUFFIX: &str = " gem(s)";
const SEPARATOR: &str = ", ";
const SEPARATOR_LAST: &str = " and ";
const SEPARATOR_ALTERNATIVES: &str = " or ";

/// Formats a quantity of gems of some class, e.g. `2 Flawless Square`. Basic
/// gems have no name, so only their quantity is shown.
pub fn format_term(quantity: &Integer, class: &GemClass) -> String {
    if class.name().is_empty() {
        quantity.to_string()
    }
    else {
        format!("{} {}", quantity, class.name())
    }
}

/// Formats a quantity of gems of some class as a whole, e.g.
/// `2 Flawless Square gem(s)`.
pub fn format_gems(quantity: &Integer, class: &GemClass) -> String {
    format!("{}{}", format_term(quantity, class), SUFFIX)
}

/// Formats a gem cluster as a single line of text, best gems first, e.g.
/// `1 Star, 2 Flawless Square and 1 gem(s)`.
///
/// Gem classes the cluster has no gems of are left out; an empty cluster is
/// `0 gem(s)`.
pub fn format_cluster(table: &Table, cluster: &Cluster) -> String {
    let terms = table.classes().iter().rev()
    .filter_map(|class| {
        cluster.get(class.ident())
        .filter(|quantity| **quantity != 0)
        .map(|quantity| format_term(quantity, class))
    })
    .collect::<Vec<String>>();

    if terms.is_empty() {
        return format!("0{}", SUFFIX);
    }

    format!("{}{}", humanized_join(&terms), SUFFIX)
}

/// Formats equivalent gem clusters as several lines of text, one cluster per
/// line. Every line after the first starts with ` or `; the first line is
/// indented to match.
pub fn format_alternatives(table: &Table, clusters: &[Cluster]) -> String {
    let indent = " ".repeat(SEPARATOR_ALTERNATIVES.len());
    let separator = format!("\n{}", SEPARATOR_ALTERNATIVES);

    let lines = clusters.iter()
    .map(|cluster| format_cluster(table, cluster))
    .collect::<Vec<String>>();

    format!("{}{}", indent, lines.join(separator.as_str()))
}

/// Lists the gem classes that can be named on the command line.
pub fn list_classes(table: &Table) -> String {
    let mut list = String::from("Possible gem classes include:");

    for class in table.classes().iter().filter(|class| !class.ident().is_empty()) {
        list.push_str(&format!("\n\t{}:\t{}", class.ident(), class.name()));
    }

    list
}

/// Joins the given items, with ` and ` rather than `, ` before the last one.
fn humanized_join(items: &[String]) -> String {
    match items.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, init)) => format!("{}{}{}", init.join(SEPARATOR), SEPARATOR_LAST, last),
        None => String::new(),
    }
}
