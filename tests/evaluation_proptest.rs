//! Property-based tests for evaluator invariants.

use std::collections::HashSet;
use std::fs;

use proptest::prelude::*;
use submission_eval::data_loading::RawTable;
use submission_eval::{evaluate, Auc, EvaluatorConfig, SubmissionEvaluator};

fn truth_table(labels: &[bool]) -> RawTable {
    RawTable::new(
        vec!["id".into(), "label".into()],
        labels
            .iter()
            .enumerate()
            .map(|(i, l)| vec![Some(i.to_string()), Some(u8::from(*l).to_string())])
            .collect(),
    )
}

fn score_table(ids: &[usize], scores: &[f64]) -> RawTable {
    RawTable::new(
        vec!["id".into(), "probability".into()],
        ids.iter()
            .zip(scores)
            .map(|(id, s)| vec![Some(id.to_string()), Some(s.to_string())])
            .collect(),
    )
}

fn labelled_scores() -> impl Strategy<Value = (Vec<bool>, Vec<f64>)> {
    (2..40usize).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(0.0..=1.0f64, n),
        )
    })
}

proptest! {
    #[test]
    fn auc_is_bounded_for_two_classes((labels, scores) in labelled_scores()) {
        prop_assume!(labels.iter().any(|l| *l) && labels.iter().any(|l| !*l));

        let ids: Vec<usize> = (0..labels.len()).collect();
        let result = SubmissionEvaluator::default()
            .evaluate_tables(&truth_table(&labels), &score_table(&ids, &scores))
            .unwrap();

        match result.auc {
            Auc::Value(v) => prop_assert!((0.0..=1.0).contains(&v), "auc out of range: {}", v),
            Auc::NotApplicable => prop_assert!(false, "two classes must yield an AUC"),
        }
    }

    #[test]
    fn accuracy_matches_thresholded_predictions((labels, scores) in labelled_scores()) {
        let ids: Vec<usize> = (0..labels.len()).collect();
        let result = SubmissionEvaluator::new(EvaluatorConfig::strict().with_curves(false))
            .evaluate_tables(&truth_table(&labels), &score_table(&ids, &scores))
            .unwrap();

        let correct = labels
            .iter()
            .zip(&scores)
            .filter(|(l, s)| **l == (**s >= 0.5))
            .count();
        let expected = correct as f64 / labels.len() as f64;
        prop_assert!((result.accuracy - expected).abs() < 1e-12);
        prop_assert_eq!(result.n_samples, labels.len());
    }

    #[test]
    fn n_samples_counts_shared_ids(
        (labels, scores) in labelled_scores(),
        keep in prop::collection::vec(any::<bool>(), 40),
        extra in 0..10usize,
    ) {
        let mut ids: Vec<usize> = (0..labels.len()).filter(|i| keep[*i]).collect();
        let shared = ids.len();
        ids.extend((0..extra).map(|k| 1000 + k));
        prop_assume!(shared > 0);

        let scores: Vec<f64> = ids.iter().map(|i| scores.get(*i).copied().unwrap_or(0.5)).collect();
        let result = SubmissionEvaluator::default()
            .evaluate_tables(&truth_table(&labels), &score_table(&ids, &scores))
            .unwrap();

        let distinct: HashSet<usize> = ids.iter().copied().collect();
        prop_assert_eq!(result.n_samples, shared);
        prop_assert!(result.n_samples <= labels.len().min(distinct.len()));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn evaluating_the_same_files_twice_is_identical((labels, scores) in labelled_scores()) {
        let dir = tempfile::TempDir::new().unwrap();
        let gt = dir.path().join("gt.csv");
        let pred = dir.path().join("pred.csv");

        let mut gt_text = String::from("id,label\n");
        let mut pred_text = String::from("id,probability\n");
        for (i, (l, s)) in labels.iter().zip(&scores).enumerate() {
            gt_text.push_str(&format!("{},{}\n", i, u8::from(*l)));
            pred_text.push_str(&format!("{},{}\n", i, s));
        }
        fs::write(&gt, gt_text).unwrap();
        fs::write(&pred, pred_text).unwrap();

        let first = evaluate(&gt, &pred).unwrap();
        let second = evaluate(&gt, &pred).unwrap();
        prop_assert_eq!(first, second);
    }
}
