use thiserror::Error;

/// Errors raised while working out gem quantities.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum GemError {
    /// A gem class identifier is not in the gem table.
    #[error("unknown gem class `{0}`")]
    UnknownClass(String),

    /// The target names more than one gem class.
    #[error("sorry, you can only specify one class of target gems (got {})", list_idents(.idents))]
    MultipleTargetClasses {
        /// Identifiers of the gem classes in the target.
        idents: Vec<String>,
    },

    /// The target names no gem class at all.
    #[error("no target gem given")]
    EmptyTarget,
}

/// Lists gem class identifiers for error messages. Basic gems have no
/// identifier.
fn list_idents(idents: &[String]) -> String {
    idents.iter()
    .map(|ident| {
        if ident.is_empty() {
            String::from("basic")
        }
        else {
            format!("`{}`", ident)
        }
    })
    .collect::<Vec<String>>()
    .join(", ")
}



#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("sorry, you can only specify one class of target gems (got `fsq`, `psq`)" , vec!["fsq", "psq"])]
    #[case("sorry, you can only specify one class of target gems (got basic, `mq`)"  , vec!["", "mq"])]
    #[trace]
    fn test_multiple_target_classes_message(#[case] expected: &str, #[case] idents: Vec<&str>) {
        let error = GemError::MultipleTargetClasses {
            idents: idents.into_iter().map(String::from).collect(),
        };

        assert_eq!(error.to_string(), expected);
    }
}
