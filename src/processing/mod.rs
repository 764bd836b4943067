pub mod column_roles; // Detekcia úlohy stĺpcov predikcií
pub mod label_encoder; // Zjednotenie tried na celočíselné kódy

pub use column_roles::{ColumnRole, ColumnRoleDetector, SCORE_COLUMN_ALIASES};
pub use label_encoder::{
    coerce_binary_labels, encode_label_pair, parse_class_code, BinaryLabels, LabelEncoder,
    UNKNOWN_CODE,
};
