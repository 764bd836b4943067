use std::fmt;

use super::label_encoder::parse_class_code;

/// Aliasy stĺpca so skóre v poradí priority (porovnanie bez ohľadu na veľkosť písmen).
pub const SCORE_COLUMN_ALIASES: [&str; 6] = [
    "label_pred",
    "probability",
    "score",
    "prediction",
    "label_score",
    "prob",
];

/// Doslovné názvy stĺpca s diskrétnou predikciou v poradí priority.
pub const LABEL_COLUMN_NAMES: [&str; 2] = ["label_pred", "label"];

/// Rozhodnutie, ako interpretovať predikcie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnRole {
    /// Spojité skóre / pravdepodobnosť; nesie skutočný názov stĺpca.
    ScoreColumn(String),
    /// Diskrétna predikovaná trieda.
    LabelColumn(String),
    Unresolved,
}

impl ColumnRole {
    pub fn column_name(&self) -> Option<&str> {
        match self {
            ColumnRole::ScoreColumn(name) | ColumnRole::LabelColumn(name) => Some(name),
            ColumnRole::Unresolved => None,
        }
    }

    pub fn is_score(&self) -> bool {
        matches!(self, ColumnRole::ScoreColumn(_))
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::ScoreColumn(name) => write!(f, "score column '{}'", name),
            ColumnRole::LabelColumn(name) => write!(f, "label column '{}'", name),
            ColumnRole::Unresolved => write!(f, "unresolved"),
        }
    }
}

/// Detektor úlohy stĺpcov v súbore s predikciami.
pub struct ColumnRoleDetector;

impl ColumnRoleDetector {
    /// Prvý alias v poradí priority vyhráva; pri viacerých zhodách pre ten
    /// istý alias rozhoduje poradie stĺpcov v súbore.
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> ColumnRole {
        if let Some(col) = find_score_column(columns, &SCORE_COLUMN_ALIASES) {
            return ColumnRole::ScoreColumn(col);
        }

        for name in LABEL_COLUMN_NAMES {
            if columns.iter().any(|c| c.as_ref() == name) {
                return ColumnRole::LabelColumn(name.to_string());
            }
        }

        ColumnRole::Unresolved
    }

    /// Spresní rolu podľa hodnôt stĺpca.
    ///
    /// `label_pred` je zároveň alias skóre aj doslovný názov predikovanej
    /// triedy. Ak obsahuje iba celočíselné kódy, skóre sa hľadá medzi
    /// ostatnými aliasmi a až keď žiadny nie je, stĺpec sa berie ako triedy.
    pub fn refine<S: AsRef<str>>(
        role: ColumnRole,
        columns: &[S],
        values: &[Option<&str>],
    ) -> ColumnRole {
        match role {
            ColumnRole::ScoreColumn(name) if is_label_pred(&name) && is_discrete(values) => {
                match find_score_column(columns, &SCORE_COLUMN_ALIASES[1..]) {
                    Some(score) => ColumnRole::ScoreColumn(score),
                    None => ColumnRole::LabelColumn(name),
                }
            }
            other => other,
        }
    }
}

/// Prvý alias v poradí priority vyhráva; pri viacerých zhodách pre ten
/// istý alias rozhoduje poradie stĺpcov v súbore.
fn find_score_column<S: AsRef<str>>(columns: &[S], aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        columns
            .iter()
            .find(|c| c.as_ref().trim().eq_ignore_ascii_case(alias))
            .map(|c| c.as_ref().to_string())
    })
}

fn is_label_pred(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(SCORE_COLUMN_ALIASES[0])
}

fn is_discrete(values: &[Option<&str>]) -> bool {
    let mut present = values.iter().flatten().peekable();
    present.peek().is_some() && present.all(|v| parse_class_code(v).is_some())
}
