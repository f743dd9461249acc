//! The three-way tree merge.
//!
//! Every slot (a mapping entry or a sequence member) is resolved from its
//! base, ours and theirs versions:
//!
//! - unchanged on one side: take the other side (value or absence);
//! - changed identically on both sides: take that change;
//! - changed differently on both sides: recurse when all three versions are
//!   mappings or all are sequences, otherwise record a conflict and keep
//!   the base version.
//!
//! Sequence members are matched by their annotated key, never by index, and
//! the surviving members are reassembled in ours's order, then theirs's,
//! then base's. Mapping entries keep ours's key order, followed by keys
//! only theirs has.

use std::collections::{HashMap, HashSet};

use arbor_annotate::{annotate_with, AnnotatedValue, Element, Identify};
use arbor_diff::slot_edit;
use arbor_types::{ElementKey, Map, Path, PathSegment, Value};
use tracing::debug;

use crate::config::MergeOptions;
use crate::conflict::{ConflictKind, ConflictRecord};
use crate::error::{MergeError, MergeResult, Side};
use crate::order::reassemble;
use crate::outcome::MergeOutcome;

/// Merge `ours` and `theirs`, both descended from `base`.
///
/// The outcome is [`MergeOutcome::Merged`] unless some path was changed
/// differently on both sides.
pub fn merge(ours: &AnnotatedValue, base: &AnnotatedValue, theirs: &AnnotatedValue) -> MergeOutcome {
    let mut merger = Merger::default();
    let tree = merger
        .merge_slot(&Path::root(), Some(base), Some(ours), Some(theirs))
        .unwrap_or_else(|| base.clone());

    debug!(conflicts = merger.conflicts.len(), "three-way merge finished");
    MergeOutcome::from_parts(tree, merger.conflicts)
}

/// Annotate three plain trees with `identify`, then [`merge`] them.
pub fn merge_values<I>(ours: &Value, base: &Value, theirs: &Value, identify: &I) -> MergeResult<MergeOutcome>
where
    I: Identify + ?Sized,
{
    merge_values_with(ours, base, theirs, identify, &MergeOptions::default())
}

/// [`merge_values`] with explicit options.
pub fn merge_values_with<I>(
    ours: &Value,
    base: &Value,
    theirs: &Value,
    identify: &I,
    options: &MergeOptions,
) -> MergeResult<MergeOutcome>
where
    I: Identify + ?Sized,
{
    let annotate_side = |side: Side, tree: &Value| {
        annotate_with(tree, identify, &options.annotate).map_err(|source| MergeError::Annotate { side, source })
    };
    let ours = annotate_side(Side::Ours, ours)?;
    let base = annotate_side(Side::Base, base)?;
    let theirs = annotate_side(Side::Theirs, theirs)?;
    Ok(merge(&ours, &base, &theirs))
}

type SlotKey<'a> = (&'a ElementKey, usize);

#[derive(Default)]
struct Merger {
    conflicts: Vec<ConflictRecord>,
}

impl Merger {
    /// Resolve one slot; `None` means the slot is absent from the result.
    fn merge_slot(
        &mut self,
        path: &Path,
        base: Option<&AnnotatedValue>,
        ours: Option<&AnnotatedValue>,
        theirs: Option<&AnnotatedValue>,
    ) -> Option<AnnotatedValue> {
        if ours == base {
            return theirs.cloned();
        }
        if theirs == base || ours == theirs {
            return ours.cloned();
        }

        if let (Some(b), Some(o), Some(t)) = (base, ours, theirs) {
            match (b, o, t) {
                (AnnotatedValue::Mapping(b), AnnotatedValue::Mapping(o), AnnotatedValue::Mapping(t)) => {
                    return Some(AnnotatedValue::Mapping(self.merge_mappings(path, b, o, t)));
                }
                (AnnotatedValue::Sequence(b), AnnotatedValue::Sequence(o), AnnotatedValue::Sequence(t)) => {
                    return Some(AnnotatedValue::Sequence(self.merge_sequences(path, b, o, t)));
                }
                _ => {}
            }
        }

        self.record_conflict(path, base, ours, theirs);
        base.cloned()
    }

    /// Merged entries follow ours's key order, then keys only theirs has.
    fn merge_mappings(
        &mut self,
        path: &Path,
        base: &Map<AnnotatedValue>,
        ours: &Map<AnnotatedValue>,
        theirs: &Map<AnnotatedValue>,
    ) -> Map<AnnotatedValue> {
        let mut seen = HashSet::new();
        let keys: Vec<&String> = ours
            .keys()
            .chain(theirs.keys())
            .chain(base.keys())
            .filter(|key| seen.insert(*key))
            .collect();

        let mut merged = Map::with_capacity(keys.len());
        for key in keys {
            let child = path.child(PathSegment::Key(key.clone()));
            if let Some(value) = self.merge_slot(&child, base.get(key), ours.get(key), theirs.get(key)) {
                merged.insert(key.clone(), value);
            }
        }
        merged
    }

    fn merge_sequences(
        &mut self,
        path: &Path,
        base: &[Element],
        ours: &[Element],
        theirs: &[Element],
    ) -> Vec<Element> {
        let base_index = index(base);
        let ours_index = index(ours);
        let theirs_index = index(theirs);

        // Resolve slots in first-seen order so conflicts are reported in a
        // stable order.
        let mut seen = HashSet::new();
        let slots: Vec<SlotKey<'_>> = ours
            .iter()
            .chain(theirs)
            .chain(base)
            .map(slot_key)
            .filter(|slot| seen.insert(*slot))
            .collect();

        let mut survivors: HashMap<SlotKey<'_>, Element> = HashMap::new();
        for slot in &slots {
            let (key, occurrence) = *slot;
            let child = path.child(PathSegment::Element {
                key: key.clone(),
                occurrence,
            });
            let merged = self.merge_slot(
                &child,
                base_index.get(slot).map(|e| &e.value),
                ours_index.get(slot).map(|e| &e.value),
                theirs_index.get(slot).map(|e| &e.value),
            );
            if let Some(value) = merged {
                survivors.insert(
                    *slot,
                    Element {
                        key: key.clone(),
                        occurrence,
                        value,
                    },
                );
            }
        }

        let orders = vec![slot_keys(ours), slot_keys(theirs), slot_keys(base)];
        reassemble(&orders, |slot| survivors.contains_key(slot))
            .into_iter()
            .filter_map(|slot| survivors.remove(&slot))
            .collect()
    }

    fn record_conflict(
        &mut self,
        path: &Path,
        base: Option<&AnnotatedValue>,
        ours: Option<&AnnotatedValue>,
        theirs: Option<&AnnotatedValue>,
    ) {
        let kind = ConflictKind::classify(base, ours, theirs);
        // Both sides differ from base here, so both edits exist.
        if let (Some(ours_edit), Some(theirs_edit)) = (slot_edit(path, base, ours), slot_edit(path, base, theirs)) {
            debug!(path = %path, kind = %kind, "conflicting edits");
            self.conflicts.push(ConflictRecord {
                path: path.clone(),
                kind,
                base: base.map(AnnotatedValue::strip),
                ours: ours_edit,
                theirs: theirs_edit,
            });
        }
    }
}

fn slot_key(element: &Element) -> SlotKey<'_> {
    (&element.key, element.occurrence)
}

fn slot_keys(elements: &[Element]) -> Vec<SlotKey<'_>> {
    elements.iter().map(slot_key).collect()
}

fn index(elements: &[Element]) -> HashMap<SlotKey<'_>, &Element> {
    elements.iter().map(|e| (slot_key(e), e)).collect()
}
