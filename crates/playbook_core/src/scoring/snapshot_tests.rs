//! Snapshot tests for concept scoring using insta
//!
//! Rationale strings are shown verbatim as coaching points, so their wording
//! and order are pinned here.

use super::*;
use crate::analysis::analyze_formation;
use crate::catalog::{builtin_catalog, FormationLookup};
use insta::assert_json_snapshot;
use serde::Serialize;

#[derive(Serialize)]
struct Row {
    concept: String,
    score: u8,
    rationale: Vec<String>,
}

fn score_rows(formation: &str, concept_ids: &[&str]) -> Vec<Row> {
    let catalog = builtin_catalog().unwrap();
    let ctx = analyze_formation(catalog.formation(formation).unwrap());
    concept_ids
        .iter()
        .map(|id| {
            let s = score_concept(catalog.concept(id).unwrap(), &ctx);
            Row { concept: id.to_string(), score: s.score, rationale: s.rationale }
        })
        .collect()
}

#[test]
fn test_i_form_scores_snapshot() {
    let rows = score_rows("i_form", &["pass_stick", "pass_four_verts", "run_power", "run_inside_zone"]);
    assert_json_snapshot!(rows, @r###"
    [
      {
        "concept": "pass_stick",
        "score": 80,
        "rationale": [
          "3 eligible receivers available",
          "11 personnel match"
        ]
      },
      {
        "concept": "pass_four_verts",
        "score": 30,
        "rationale": [
          "11 personnel match"
        ]
      },
      {
        "concept": "run_power",
        "score": 80,
        "rationale": [
          "Tight end sets the edge",
          "Fullback leads through the hole"
        ]
      },
      {
        "concept": "run_inside_zone",
        "score": 75,
        "rationale": [
          "Downhill angle from the backfield",
          "11 personnel match"
        ]
      }
    ]
    "###);
}
