use rug::Integer;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::FromIterator;

/// Represents a gem cluster.
///
/// A gem cluster maps gem class identifiers to quantities of gems of that
/// class. Every quantity counts on its own: a cluster of 2 Flawless Square and
/// 1 basic gem holds both. An empty cluster holds no gems at all.
///
/// Clusters cannot be changed once built. They are collected from
/// `(identifier, quantity)` pairs, and quantities of repeated identifiers are
/// added up. Identifiers are not checked against any gem table here; that
/// happens when the cluster is converted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cluster {
    /// The quantities in this cluster, by gem class identifier.
    quantities: BTreeMap<String, Integer>,
}

impl Cluster {
    /// Returns the quantity of the gem class with the given identifier, if
    /// this cluster holds that class at all.
    pub fn get(&self, ident: &str) -> Option<&Integer> {
        self.quantities.get(ident)
    }

    /// Returns the number of distinct gem classes in this cluster.
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Returns whether this cluster holds no gem classes.
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Returns an iterator over the gem classes and quantities in this
    /// cluster.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Integer> {
        self.quantities.iter()
    }
}

/// Implements collecting `(identifier, quantity)` pairs into a cluster.
impl FromIterator<(String, Integer)> for Cluster {
    fn from_iter<I: IntoIterator<Item = (String, Integer)>>(iter: I) -> Cluster {
        let mut quantities = BTreeMap::new();

        for (ident, quantity) in iter {
            *quantities.entry(ident).or_insert_with(Integer::new) += quantity;
        }

        Cluster {quantities}
    }
}

impl<'a> IntoIterator for &'a Cluster {
    type Item = (&'a String, &'a Integer);
    type IntoIter = btree_map::Iter<'a, String, Integer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}



#[cfg(test)]
mod tests {
    use super::*;

    use maplit::btreemap;

    #[test]
    fn test_accumulation() {
        let cluster = vec![
            ("a".to_string(), Integer::from(2)),
            ("b".to_string(), Integer::from(1)),
            ("a".to_string(), Integer::from(3)),
        ].into_iter().collect::<Cluster>();

        assert_eq!(cluster.len(), 2);
        assert_eq!(cluster.get("a"), Some(&Integer::from(5)));
        assert_eq!(cluster.get("b"), Some(&Integer::from(1)));
        assert_eq!(cluster.get("c"), None);
    }

    #[test]
    fn test_zero_quantities_are_kept() {
        let cluster = vec![("a".to_string(), Integer::new())].into_iter()
        .collect::<Cluster>();

        assert!(!cluster.is_empty());
        assert_eq!(cluster.get("a"), Some(&Integer::new()));
    }

    #[test]
    fn test_empty() {
        let cluster = Cluster::default();

        assert!(cluster.is_empty());
        assert_eq!(cluster.iter().count(), 0);
    }

    #[test]
    fn test_iteration() {
        let cluster = vec![
            ("b".to_string(), Integer::from(1)),
            ("a".to_string(), Integer::from(7)),
        ].into_iter().collect::<Cluster>();

        let quantities = (&cluster).into_iter()
        .map(|(ident, quantity)| (ident.as_str(), quantity.clone()))
        .collect::<BTreeMap<&str, Integer>>();

        assert_eq!(quantities, btreemap! {
            "a" => Integer::from(7),
            "b" => Integer::from(1),
        });
    }
}
