use smartcore::metrics::accuracy as smartcore_accuracy;
use std::collections::BTreeSet;

/// Spôsob priemerovania precision/recall/F1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Averaging {
    /// Jedna pozitívna trieda.
    Binary { positive: i64 },
    /// Nevážený priemer cez všetky triedy z ground truth aj predikcií.
    Macro,
}

impl Averaging {
    /// Binárne pri najviac dvoch triedach ground truth, inak macro.
    ///
    /// Pri dvoch triedach je pozitívna tá s väčším kódom; pri jedinej triede
    /// je pozitívna trieda 1.
    pub fn for_labels(y_true: &[i64]) -> Self {
        let classes: BTreeSet<i64> = y_true.iter().copied().collect();
        match classes.len() {
            0 | 1 => Averaging::Binary { positive: 1 },
            2 => Averaging::Binary {
                positive: classes.iter().next_back().copied().unwrap_or(1),
            },
            _ => Averaging::Macro,
        }
    }
}

/// Confusion counts pre jednu pozitívnu triedu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionCounts {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl ConfusionCounts {
    pub fn for_class(y_true: &[i64], y_pred: &[i64], positive: i64) -> Self {
        let mut counts = Self::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t == positive, p == positive) {
                (true, true) => counts.tp += 1,
                (false, true) => counts.fp += 1,
                (false, false) => counts.tn += 1,
                (true, false) => counts.fn_ += 1,
            }
        }
        counts
    }

    /// Nedefinovaný pomer (delenie nulou) je 0.
    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    pub fn f1(&self) -> f64 {
        ratio(2 * self.tp, 2 * self.tp + self.fp + self.fn_)
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

/// Metriky nad tvrdými predikciami.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassificationScores {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Podiel zhodných predikcií; prázdny vstup dáva 0.
pub fn accuracy(y_true: &[i64], y_pred: &[i64]) -> f64 {
    if y_true.is_empty() || y_true.len() != y_pred.len() {
        return 0.0;
    }
    smartcore_accuracy(&y_true.to_vec(), &y_pred.to_vec())
}

/// Vypočíta accuracy, precision, recall a F1 pre daný spôsob priemerovania.
pub fn classification_scores(y_true: &[i64], y_pred: &[i64], averaging: Averaging) -> ClassificationScores {
    let acc = accuracy(y_true, y_pred);

    match averaging {
        Averaging::Binary { positive } => {
            let counts = ConfusionCounts::for_class(y_true, y_pred, positive);
            ClassificationScores {
                accuracy: acc,
                precision: counts.precision(),
                recall: counts.recall(),
                f1: counts.f1(),
            }
        }
        Averaging::Macro => {
            let classes: BTreeSet<i64> = y_true.iter().chain(y_pred).copied().collect();
            if classes.is_empty() {
                return ClassificationScores::default();
            }
            let n = classes.len() as f64;
            let (mut p, mut r, mut f) = (0.0, 0.0, 0.0);
            for class in classes {
                let counts = ConfusionCounts::for_class(y_true, y_pred, class);
                p += counts.precision();
                r += counts.recall();
                f += counts.f1();
            }
            ClassificationScores {
                accuracy: acc,
                precision: p / n,
                recall: r / n,
                f1: f / n,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn confusion_counts() {
        let c = ConfusionCounts::for_class(&[1, 1, 0, 0, 1], &[1, 0, 1, 0, 1], 1);
        assert_eq!(c, ConfusionCounts { tp: 2, fp: 1, tn: 1, fn_: 1 });
        assert!(approx(c.precision(), 2.0 / 3.0));
        assert!(approx(c.recall(), 2.0 / 3.0));
        assert!(approx(c.f1(), 2.0 / 3.0));
    }

    #[test]
    fn no_predicted_positives_gives_zero_not_nan() {
        let scores = classification_scores(&[1, 0, 1], &[0, 0, 0], Averaging::Binary { positive: 1 });
        assert_eq!(scores.precision, 0.0);
        assert_eq!(scores.recall, 0.0);
        assert_eq!(scores.f1, 0.0);
        assert!(approx(scores.accuracy, 1.0 / 3.0));
    }

    #[test]
    fn averaging_policy() {
        assert_eq!(Averaging::for_labels(&[0, 2, 2]), Averaging::Binary { positive: 2 });
        assert_eq!(Averaging::for_labels(&[0, 0]), Averaging::Binary { positive: 1 });
        assert_eq!(Averaging::for_labels(&[0, 1, 2]), Averaging::Macro);
    }

    #[test]
    fn macro_average_over_three_classes() {
        let y_true = [0, 1, 2, 0, 1, 2];
        let y_pred = [0, 2, 1, 0, 0, 1];
        let s = classification_scores(&y_true, &y_pred, Averaging::Macro);
        // class 0: p=2/3 r=1, class 1: p=0 r=0, class 2: p=0 r=0
        assert!(approx(s.precision, (2.0 / 3.0) / 3.0));
        assert!(approx(s.recall, 1.0 / 3.0));
        assert!(approx(s.f1, 0.8 / 3.0));
        assert!(approx(s.accuracy, 2.0 / 6.0));
    }

    #[test]
    fn accuracy_of_empty_input_is_zero() {
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn accuracy_counts_matching_codes() {
        assert!(approx(accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]), 0.75));
        assert!(approx(accuracy(&[2, -1, 3], &[2, -1, 3]), 1.0));
    }
}
