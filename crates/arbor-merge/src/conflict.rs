//! Conflict records.

use std::fmt;

use arbor_annotate::AnnotatedValue;
use arbor_diff::EditOp;
use arbor_types::{Path, Value};
use serde::Serialize;

/// Why two edits at the same path could not be reconciled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Both sides modified the value differently.
    Content,
    /// Both sides added the slot with different values.
    AddAdd,
    /// One side removed the slot while the other modified it.
    DeleteModify,
    /// The versions disagree on container kind (e.g. mapping vs sequence).
    ShapeMismatch,
}

impl ConflictKind {
    /// Classify a slot changed differently on both sides.
    pub(crate) fn classify(
        base: Option<&AnnotatedValue>,
        ours: Option<&AnnotatedValue>,
        theirs: Option<&AnnotatedValue>,
    ) -> Self {
        if base.is_some() && (ours.is_none() || theirs.is_none()) {
            return ConflictKind::DeleteModify;
        }

        let present: Vec<&AnnotatedValue> = [base, ours, theirs].into_iter().flatten().collect();
        let composite = present.iter().any(|v| v.is_composite());
        let same_kind = present.windows(2).all(|pair| pair[0].kind() == pair[1].kind());
        if composite && !same_kind {
            ConflictKind::ShapeMismatch
        } else if base.is_none() {
            ConflictKind::AddAdd
        } else {
            ConflictKind::Content
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConflictKind::Content => "content",
            ConflictKind::AddAdd => "add/add",
            ConflictKind::DeleteModify => "delete/modify",
            ConflictKind::ShapeMismatch => "shape mismatch",
        })
    }
}

/// A path where ours and theirs changed the base differently.
///
/// The merged tree keeps the base value (or absence) at `path`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConflictRecord {
    pub path: Path,
    pub kind: ConflictKind,
    /// The base value at `path`, `None` if the slot did not exist.
    pub base: Option<Value>,
    /// The edit ours applied at `path`.
    pub ours: EditOp,
    /// The edit theirs applied at `path`.
    pub theirs: EditOp,
}

impl ConflictRecord {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ConflictKind {
        self.kind
    }

    pub fn base(&self) -> Option<&Value> {
        self.base.as_ref()
    }

    pub fn ours(&self) -> &EditOp {
        &self.ours
    }

    pub fn theirs(&self) -> &EditOp {
        &self.theirs
    }
}

impl fmt::Display for ConflictRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} conflict at {}: ours {}, theirs {}", self.kind, self.path, self.ours, self.theirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_types::{Number, Scalar};

    fn int(i: i64) -> AnnotatedValue {
        AnnotatedValue::Scalar(Scalar::Number(Number::Int(i)))
    }

    #[test]
    fn classify_add_add() {
        assert_eq!(ConflictKind::classify(None, Some(&int(1)), Some(&int(2))), ConflictKind::AddAdd);
    }

    #[test]
    fn classify_delete_modify() {
        assert_eq!(
            ConflictKind::classify(Some(&int(1)), None, Some(&int(2))),
            ConflictKind::DeleteModify
        );
        assert_eq!(
            ConflictKind::classify(Some(&int(1)), Some(&int(2)), None),
            ConflictKind::DeleteModify
        );
    }

    #[test]
    fn classify_scalar_type_change_is_content() {
        let text = AnnotatedValue::Scalar(Scalar::Text("80".into()));
        assert_eq!(
            ConflictKind::classify(Some(&int(80)), Some(&text), Some(&int(81))),
            ConflictKind::Content
        );
    }

    #[test]
    fn classify_added_containers_of_different_kinds() {
        let map = AnnotatedValue::Mapping(arbor_types::Map::new());
        let seq = AnnotatedValue::Sequence(vec![]);
        assert_eq!(ConflictKind::classify(None, Some(&map), Some(&seq)), ConflictKind::ShapeMismatch);
        assert_eq!(ConflictKind::classify(None, Some(&int(1)), Some(&seq)), ConflictKind::ShapeMismatch);
        assert_eq!(ConflictKind::classify(None, Some(&map), Some(&map.clone())), ConflictKind::AddAdd);
    }

    #[test]
    fn classify_container_mismatch() {
        let map = AnnotatedValue::Mapping(arbor_types::Map::new());
        let seq = AnnotatedValue::Sequence(vec![]);
        assert_eq!(
            ConflictKind::classify(Some(&map), Some(&seq), Some(&int(1))),
            ConflictKind::ShapeMismatch
        );
    }

    #[test]
    fn display_record() {
        let path = Path::root().key("port");
        let record = ConflictRecord {
            path: path.clone(),
            kind: ConflictKind::Content,
            base: Some(Value::from(80)),
            ours: EditOp::Replace { path: path.clone(), old: Value::from(80), new: Value::from(8080) },
            theirs: EditOp::Replace { path, old: Value::from(80), new: Value::from(9090) },
        };
        assert_eq!(
            record.to_string(),
            "content conflict at /port: ours replace /port: 80 -> 8080, theirs replace /port: 80 -> 9090"
        );
    }
}
