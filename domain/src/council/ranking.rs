//! Rank Aggregator - consensus ordering from per-judge preferences
//!
//! Pure and deterministic: the same Stage 2 entries always produce the
//! same consensus ranking, and permuting the judge list changes nothing.

use super::entries::{AggregateRanking, StageTwoEntry};
use super::labels::{Label, LabelMapping};
use crate::core::model::Model;

/// Combine per-judge orderings into the consensus ranking.
///
/// Scoring: a judge whose ordered list has length `k` awards `k - p`
/// points to the label at 1-indexed position `p` (so first place gets
/// `k - 1`, last place `0`). Labels a judge omitted - parse gaps or an
/// unusable reply - score `0` for that judge, so partial output never
/// inflates a model's total.
///
/// Ties share the same `rank` (standard competition ranking) and are
/// ordered by label-assignment order, which follows the configured
/// model order.
pub fn aggregate_rankings(
    entries: &[StageTwoEntry],
    mapping: &LabelMapping,
) -> Vec<AggregateRanking> {
    let pairs: Vec<&(Label, Model)> = mapping.iter().collect();

    let mut scores: Vec<u32> = vec![0; pairs.len()];
    for entry in entries {
        let k = entry.ordered_labels.len();
        for (position, label) in entry.ordered_labels.iter().enumerate() {
            if let Some(idx) = pairs.iter().position(|(l, _)| l == label) {
                scores[idx] += (k - 1 - position) as u32;
            }
        }
    }

    // Sort by score descending; ties keep assignment (configured) order
    let mut order: Vec<usize> = (0..pairs.len()).collect();
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]).then(a.cmp(&b)));

    let mut rankings = Vec::with_capacity(order.len());
    let mut prev_score = None;
    let mut prev_rank = 0;
    for (i, &idx) in order.iter().enumerate() {
        let rank = match prev_score {
            Some(s) if s == scores[idx] => prev_rank,
            _ => i + 1,
        };
        prev_score = Some(scores[idx]);
        prev_rank = rank;

        rankings.push(AggregateRanking {
            model: pairs[idx].1.clone(),
            score: scores[idx],
            rank,
        });
    }

    rankings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Model;
    use crate::council::entries::StageOneEntry;
    use crate::council::labels::Label;

    fn three_model_mapping() -> LabelMapping {
        LabelMapping::from_stage_one(&[
            StageOneEntry::answered(Model::Gpt51, "a1"),
            StageOneEntry::answered(Model::Gemini3Pro, "a2"),
            StageOneEntry::answered(Model::ClaudeSonnet45, "a3"),
        ])
    }

    fn judge(judge: Model, order: &[usize]) -> StageTwoEntry {
        StageTwoEntry::ranked(
            judge,
            order.iter().map(|&i| Label::from_index(i)).collect(),
            "fixture",
        )
    }

    #[test]
    fn test_worked_example() {
        // Judges rank A>B>C, A>C>B, B>A>C:
        // A = 2+2+1 = 5, B = 1+0+2 = 3, C = 0+1+0 = 1
        let mapping = three_model_mapping();
        let entries = vec![
            judge(Model::Gpt51, &[0, 1, 2]),
            judge(Model::Gemini3Pro, &[0, 2, 1]),
            judge(Model::ClaudeSonnet45, &[1, 0, 2]),
        ];

        let rankings = aggregate_rankings(&entries, &mapping);
        assert_eq!(rankings.len(), 3);
        assert_eq!(rankings[0].model, Model::Gpt51);
        assert_eq!(rankings[0].score, 5);
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[1].model, Model::Gemini3Pro);
        assert_eq!(rankings[1].score, 3);
        assert_eq!(rankings[1].rank, 2);
        assert_eq!(rankings[2].model, Model::ClaudeSonnet45);
        assert_eq!(rankings[2].score, 1);
        assert_eq!(rankings[2].rank, 3);
    }

    #[test]
    fn test_judge_order_is_irrelevant() {
        let mapping = three_model_mapping();
        let mut entries = vec![
            judge(Model::Gpt51, &[0, 1, 2]),
            judge(Model::Gemini3Pro, &[0, 2, 1]),
            judge(Model::ClaudeSonnet45, &[1, 0, 2]),
        ];

        let forward = aggregate_rankings(&entries, &mapping);
        entries.reverse();
        let backward = aggregate_rankings(&entries, &mapping);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_idempotent() {
        let mapping = three_model_mapping();
        let entries = vec![judge(Model::Gpt51, &[2, 0, 1])];

        let first = aggregate_rankings(&entries, &mapping);
        let second = aggregate_rankings(&entries, &mapping);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[test]
    fn test_unparseable_judge_contributes_nothing() {
        let mapping = three_model_mapping();
        let with_mute = vec![
            judge(Model::Gpt51, &[0, 1, 2]),
            StageTwoEntry::parse_failed(Model::Grok4, "garbled"),
        ];
        let without_mute = vec![judge(Model::Gpt51, &[0, 1, 2])];

        assert_eq!(
            aggregate_rankings(&with_mute, &mapping),
            aggregate_rankings(&without_mute, &mapping)
        );
    }

    #[test]
    fn test_partial_list_gives_omitted_labels_zero() {
        // One judge only ranked A and B (k = 2): A gets 1, B gets 0, C gets 0
        let mapping = three_model_mapping();
        let entries = vec![judge(Model::Gpt51, &[0, 1])];

        let rankings = aggregate_rankings(&entries, &mapping);
        assert_eq!(rankings[0].model, Model::Gpt51);
        assert_eq!(rankings[0].score, 1);
        // B and C tie at 0 and share rank 2, in configured order
        assert_eq!(rankings[1].model, Model::Gemini3Pro);
        assert_eq!(rankings[1].rank, 2);
        assert_eq!(rankings[2].model, Model::ClaudeSonnet45);
        assert_eq!(rankings[2].rank, 2);
    }

    #[test]
    fn test_competition_ranking_after_tie() {
        // Two judges produce A=1, B=1, C=0: ranks 1, 1, 3
        let mapping = three_model_mapping();
        let entries = vec![
            judge(Model::Gpt51, &[0, 1]),
            judge(Model::Gemini3Pro, &[1, 0]),
        ];

        let rankings = aggregate_rankings(&entries, &mapping);
        assert_eq!(rankings[0].rank, 1);
        assert_eq!(rankings[1].rank, 1);
        assert_eq!(rankings[2].rank, 3);
        assert_eq!(rankings[2].score, 0);
    }

    #[test]
    fn test_no_judges_ranks_by_configured_order() {
        let mapping = three_model_mapping();
        let rankings = aggregate_rankings(&[], &mapping);
        assert_eq!(rankings.len(), 3);
        assert!(rankings.iter().all(|r| r.score == 0 && r.rank == 1));
        assert_eq!(rankings[0].model, Model::Gpt51);
    }
}
