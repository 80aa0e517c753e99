//! Pass set comparison logic
//!
//! Splits a predicted pass list and a set of named reference lists into what
//! they share and what is unique to each side. Membership is case-folded and
//! ignores position; output order always follows the list an entry came from,
//! and duplicates survive so that counts stay meaningful.

use super::identifier::{PassIdentifier, PassList};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Breakdown of one reference list against the prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceBreakdown {
    /// Reference name, e.g. `O2`
    pub name: String,
    /// Predicted entries that also appear in this reference (predicted order)
    pub common: PassList,
    /// Reference entries that also appear in the prediction (reference order)
    pub shared: PassList,
    /// Reference entries absent from the prediction (reference order)
    pub unique: PassList,
}

/// Result of classifying a prediction against reference lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassClassification {
    predicted: PassList,
    common_to_any: PassList,
    unique_to_predicted: PassList,
    references: Vec<ReferenceBreakdown>,
}

impl PassClassification {
    /// The predicted list that was classified
    pub fn predicted(&self) -> &PassList {
        &self.predicted
    }

    /// Predicted entries that appear in reference `name`
    pub fn common_to(&self, name: &str) -> Option<&PassList> {
        self.reference(name).map(|r| &r.common)
    }

    /// Reference `name`'s entries that appear in the prediction
    pub fn shared_in(&self, name: &str) -> Option<&PassList> {
        self.reference(name).map(|r| &r.shared)
    }

    /// Reference `name`'s entries that do not appear in the prediction
    pub fn unique_to(&self, name: &str) -> Option<&PassList> {
        self.reference(name).map(|r| &r.unique)
    }

    /// Predicted entries that appear in at least one reference
    pub fn common_to_any(&self) -> &PassList {
        &self.common_to_any
    }

    /// Predicted entries absent from every reference
    pub fn unique_to_predicted(&self) -> &PassList {
        &self.unique_to_predicted
    }

    /// Reference entries absent from the prediction, across all references.
    ///
    /// Each pass is listed once, in first-seen order, so a pass that every
    /// level runs is not counted once per level.
    pub fn unique_to_references(&self) -> PassList {
        let mut seen = HashSet::new();
        self.references
            .iter()
            .flat_map(|r| r.unique.iter())
            .filter(|pass| seen.insert(pass.folded()))
            .cloned()
            .collect()
    }

    /// Per-reference breakdowns, ordered by reference name
    pub fn references(&self) -> &[ReferenceBreakdown] {
        &self.references
    }

    fn reference(&self, name: &str) -> Option<&ReferenceBreakdown> {
        self.references.iter().find(|r| r.name == name)
    }
}

/// Classifies predicted passes against reference pass lists
pub struct PassSetComparator;

impl PassSetComparator {
    /// Classify `predicted` against every list in `references`
    ///
    /// # Examples
    ///
    /// ```
    /// use iris_cli::passes::{PassList, PassSetComparator};
    /// use std::collections::BTreeMap;
    ///
    /// let predicted = PassList::from_names(["mem2reg", "loop-fusion"]);
    /// let mut references = BTreeMap::new();
    /// references.insert("O2".to_string(), PassList::from_names(["mem2reg", "gvn"]));
    ///
    /// let result = PassSetComparator::classify(&predicted, &references);
    /// assert_eq!(result.common_to("O2").unwrap().names(), vec!["mem2reg"]);
    /// assert_eq!(result.unique_to_predicted().names(), vec!["loop-fusion"]);
    /// assert_eq!(result.unique_to("O2").unwrap().names(), vec!["gvn"]);
    /// ```
    pub fn classify(
        predicted: &PassList,
        references: &BTreeMap<String, PassList>,
    ) -> PassClassification {
        let predicted_keys = folded_keys(predicted);
        let mut reference_union = HashSet::new();

        let breakdowns = references
            .iter()
            .map(|(name, reference)| {
                let reference_keys = folded_keys(reference);

                let common = filter_by(predicted, |key| reference_keys.contains(key));
                let shared = filter_by(reference, |key| predicted_keys.contains(key));
                let unique = filter_by(reference, |key| !predicted_keys.contains(key));

                reference_union.extend(reference_keys);

                ReferenceBreakdown {
                    name: name.clone(),
                    common,
                    shared,
                    unique,
                }
            })
            .collect();

        let common_to_any = filter_by(predicted, |key| reference_union.contains(key));
        let unique_to_predicted = filter_by(predicted, |key| !reference_union.contains(key));

        PassClassification {
            predicted: predicted.clone(),
            common_to_any,
            unique_to_predicted,
            references: breakdowns,
        }
    }
}

fn folded_keys(passes: &PassList) -> HashSet<String> {
    passes.iter().map(PassIdentifier::folded).collect()
}

fn filter_by(passes: &PassList, keep: impl Fn(&String) -> bool) -> PassList {
    passes
        .iter()
        .filter(|pass| keep(&pass.folded()))
        .cloned()
        .collect()
}
