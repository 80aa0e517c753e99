//! Reference pass sequences for the standard LLVM levels
//!
//! These are the passes a typical `-O2` / `-O3` pipeline runs, used to put a
//! predicted sequence in context without another round trip to the backend.
//! The `-O2` list repeats `sroa` because the pipeline runs it twice.

use super::identifier::PassList;
use super::level::OptLevel;
use std::collections::BTreeMap;

/// Typical `-O2` passes, in pipeline order
pub const LLVM_O2_PASSES: &[&str] = &[
    "mem2reg",
    "simplifycfg",
    "sroa",
    "early-cse",
    "lower-expect",
    "inline",
    "function-attrs",
    "argpromotion",
    "sroa",
    "jump-threading",
    "correlated-propagation",
    "tailcallelim",
    "reassociate",
    "loop-rotate",
    "licm",
    "loop-unswitch",
    "indvars",
    "loop-deletion",
    "loop-unroll",
    "gvn",
    "memcpyopt",
    "sccp",
    "bdce",
    "adce",
    "dse",
    "loop-vectorize",
    "slp-vectorizer",
    "alignment-from-assumptions",
    "strip-dead-prototypes",
    "globaldce",
    "constmerge",
    "cgscc",
];

/// Passes `-O3` adds on top of `-O2`
pub const LLVM_O3_EXTRA_PASSES: &[&str] = &[
    "aggressive-instcombine",
    "loop-unroll-and-jam",
    "loop-distribute",
    "loop-load-elim",
    "callsite-splitting",
    "partial-inliner",
    "gvn-hoist",
    "div-rem-pairs",
    "speculative-execution",
];

const FALLBACK_DESCRIPTION: &str = "LLVM optimization pass";

/// Reference passes for a level, if the catalog knows it
///
/// Only `-O2` and `-O3` are catalogued.
pub fn reference_passes(level: OptLevel) -> Option<PassList> {
    match level {
        OptLevel::O2 => Some(PassList::from_names(LLVM_O2_PASSES)),
        OptLevel::O3 => Some(PassList::from_names(
            LLVM_O2_PASSES.iter().chain(LLVM_O3_EXTRA_PASSES),
        )),
        OptLevel::O0 | OptLevel::O1 => None,
    }
}

/// All catalogued references keyed by level name (`"O2"`, `"O3"`)
pub fn reference_set() -> BTreeMap<String, PassList> {
    OptLevel::ALL
        .iter()
        .filter_map(|&level| {
            reference_passes(level).map(|passes| (level.name().to_string(), passes))
        })
        .collect()
}

/// One-line description of a pass, for tooltips and verbose listings
///
/// ```
/// use iris_cli::passes::catalog::describe;
///
/// assert!(describe("GVN").contains("value numbering"));
/// assert_eq!(describe("my-custom-pass"), "LLVM optimization pass");
/// ```
pub fn describe(pass: &str) -> &'static str {
    match pass.to_lowercase().as_str() {
        "mem2reg" => "Promote memory to register - converts stack allocations to SSA form",
        "simplifycfg" => "Simplify control flow graph - removes unnecessary branches",
        "sroa" => "Scalar replacement of aggregates - breaks down structures",
        "inline" => "Function inlining - replaces function calls with function body",
        "gvn" => "Global value numbering - eliminates redundant computations",
        "dce" => "Dead code elimination - removes unused code",
        "adce" => "Aggressive dead code elimination - more thorough dead code removal",
        "dse" => "Dead store elimination - removes unnecessary writes",
        "sccp" => "Sparse conditional constant propagation",
        "licm" => "Loop invariant code motion - moves computations out of loops",
        "loop-unroll" => "Loop unrolling - duplicates loop body for performance",
        "loop-vectorize" => "Loop vectorization - SIMD optimization",
        "slp-vectorizer" => "Superword level parallelism vectorization",
        "tailcallelim" => "Tail call elimination - optimizes recursive calls",
        "reassociate" => "Expression reassociation - reorders operations",
        "jump-threading" => "Thread jumps through conditionals",
        "correlated-propagation" => "Propagate information from conditionals",
        "indvars" => "Induction variable simplification",
        "loop-deletion" => "Delete dead loops",
        "loop-rotate" => "Rotate loops to canonical form",
        "loop-unswitch" => "Unswitch loops - move conditionals outside loops",
        "memcpyopt" => "Memory copy optimization",
        "bdce" => "Bit-tracking dead code elimination",
        "constmerge" => "Merge duplicate constants",
        "globaldce" => "Global dead code elimination",
        "argpromotion" => "Promote arguments from pointers to values",
        "function-attrs" => "Deduce function attributes",
        "early-cse" => "Early common subexpression elimination",
        "lower-expect" => "Lower expect intrinsics",
        "alignment-from-assumptions" => "Compute alignments from assumptions",
        "strip-dead-prototypes" => "Strip unused function declarations",
        "cgscc" => "Call graph SCC pass manager",
        "aggressive-instcombine" => "Aggressive instruction combining",
        "loop-unroll-and-jam" => "Loop unroll and jam fusion",
        "loop-distribute" => "Loop distribution for vectorization",
        "loop-load-elim" => "Loop load elimination",
        "callsite-splitting" => "Split call sites for optimization",
        "partial-inliner" => "Partial function inlining",
        "gvn-hoist" => "Global value numbering hoisting",
        "div-rem-pairs" => "Optimize division/remainder pairs",
        "speculative-execution" => "Speculative execution optimization",
        _ => FALLBACK_DESCRIPTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_o2_catalog_keeps_duplicate_sroa() {
        let o2 = reference_passes(OptLevel::O2).unwrap();
        assert_eq!(o2.len(), 32);
        assert_eq!(o2.names().iter().filter(|&&p| p == "sroa").count(), 2);
    }

    #[test]
    fn test_o3_is_superset_of_o2() {
        let o2 = reference_passes(OptLevel::O2).unwrap();
        let o3 = reference_passes(OptLevel::O3).unwrap();
        assert_eq!(o3.len(), o2.len() + LLVM_O3_EXTRA_PASSES.len());
        assert!(o2.iter().all(|p| o3.contains(p)));
    }

    #[test]
    fn test_low_levels_not_catalogued() {
        assert!(reference_passes(OptLevel::O0).is_none());
        assert!(reference_passes(OptLevel::O1).is_none());
    }

    #[test]
    fn test_reference_set_keys() {
        let set = reference_set();
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["O2", "O3"]);
    }

    #[test]
    fn test_every_catalogued_pass_has_a_description() {
        for pass in LLVM_O2_PASSES.iter().chain(LLVM_O3_EXTRA_PASSES) {
            assert_ne!(describe(pass), FALLBACK_DESCRIPTION, "{pass} lacks a description");
        }
    }
}
