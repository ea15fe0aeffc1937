use lazy_static::lazy_static;
use regex::Regex;
use rug::Integer;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::cluster::Cluster;

/// Parses gem cluster specs into a single gem cluster.
///
/// Every spec is a comma-separated list of gem specs, e.g. `1pst,6fsq`.
/// Quantities of gem classes named more than once, within one spec or across
/// several, are added up. Empty gem specs are ignored, and gem specs that are
/// neither `<class><quantity>` nor `<quantity><class>` are skipped.
pub fn parse_cluster<S: AsRef<str>>(specs: &[S]) -> Cluster {
    const DELIMITER_GEMSPEC: char = ',';

    specs.iter()
    .flat_map(|spec| spec.as_ref().split(DELIMITER_GEMSPEC))
    .map(str::trim)
    .filter(|gemspec| !gemspec.is_empty())
    .filter_map(|gemspec| {
        let parsed = parse_gemspec(gemspec);

        if parsed.is_none() {
            debug!(gemspec, "skipping unparseable gem spec");
        }

        parsed
    })
    .collect()
}

/// Parses a single gem spec.
///
/// A gem spec is a gem class identifier and an optional quantity (1 if
/// missing), in either order. A bare quantity names basic gems, whose
/// identifier is empty.
pub fn parse_gemspec(gemspec: &str) -> Option<(String, Integer)> {
    lazy_static! {
        /// The accepted gem spec forms. The order the regexes are tried in is
        /// important.
        static ref REGEXES: Vec<Regex> = vec![
            // Strings of the form fsq and fsq27.
            Regex::new(r"^(?P<class>[\p{L}\p{M}]+)\s*(?P<quantity>[0-9]+)?$").unwrap(),
            // Strings of the form 27fsq and 27.
            Regex::new(r"^(?P<quantity>[0-9]+)?\s*(?P<class>[\p{L}\p{M}]*)$").unwrap(),
        ];
    }

    // Fold fullwidth digits, ligatures and case.
    let gemspec = gemspec.trim().nfkc().collect::<String>().to_lowercase();

    if gemspec.is_empty() {
        return None;
    }

    let captures = REGEXES.iter().find_map(|regex| regex.captures(&gemspec))?;

    let class = captures.name("class").map_or("", |class| class.as_str());

    let quantity = match captures.name("quantity") {
        Some(quantity) => quantity.as_str().parse::<Integer>().ok()?,
        None => Integer::from(1),
    };

    Some((class.to_string(), quantity))
}



#[cfg(test)]
mod tests {
    use super::*;

    use maplit::btreemap;
    use rstest::rstest;
    use std::collections::BTreeMap;

    /// Collects a cluster into a map for comparison.
    fn quantities(cluster: &Cluster) -> BTreeMap<String, Integer> {
        cluster.iter()
        .map(|(ident, quantity)| (ident.clone(), quantity.clone()))
        .collect()
    }

    #[rstest]
    #[case(Some(("fsq", 1))  , "fsq")]
    #[case(Some(("fsq", 27)) , "fsq27")]
    #[case(Some(("fsq", 27)) , "27fsq")]
    #[case(Some(("fsq", 27)) , "27 fsq")]
    #[case(Some(("fsq", 27)) , " fsq 27 ")]
    #[case(Some(("fsq", 27)) , "27FSQ")]
    #[case(Some(("fsq", 27)) , "\u{FF12}\u{FF17}fsq")]
    #[case(Some(("fsq", 0))  , "0fsq")]
    #[case(Some(("", 3))     , "3")]
    #[case(Some(("xyz", 2))  , "2xyz")]
    #[case(Some(("i\u{307}", 2)) , "2\u{130}")]
    #[case(None              , "")]
    #[case(None              , "1pst2")]
    #[case(None              , "f$q")]
    #[case(None              , "-3fsq")]
    #[trace]
    fn test_parse_gemspec(#[case] expected: Option<(&str, u32)>, #[case] gemspec: &str) {
        let expected = expected.map(|(class, quantity)| {
            (class.to_string(), Integer::from(quantity))
        });

        assert_eq!(parse_gemspec(gemspec), expected);
    }

    #[test]
    fn test_huge_quantity() {
        let (_, quantity) = parse_gemspec("123456789012345678901234567890mq").unwrap();

        assert_eq!(quantity.to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_accumulation() {
        assert_eq!(parse_cluster(&["2a,3a"]), parse_cluster(&["5a"]));
        assert_eq!(parse_cluster(&["2a", "a3"]), parse_cluster(&["5a"]));
    }

    #[test]
    fn test_cluster() {
        let cluster = parse_cluster(&["1pst, 6fsq,, ?!, 4", "fsq", "2"]);

        assert_eq!(quantities(&cluster), btreemap! {
            "".to_string() => Integer::from(6),
            "fsq".to_string() => Integer::from(7),
            "pst".to_string() => Integer::from(1),
        });
    }

    #[rstest]
    #[case(vec![])]
    #[case(vec![""])]
    #[case(vec![" , ,"])]
    #[case(vec!["$$", "%"])]
    #[trace]
    fn test_empty_cluster(#[case] specs: Vec<&str>) {
        assert!(parse_cluster(&specs).is_empty());
    }
}
