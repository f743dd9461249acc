//! Tree-level diff: compare two trees and produce a list of edits.
//!
//! Nodes of the same container kind are compared member by member; any
//! other difference (scalar change, container kind change) is a single
//! `Replace` at that node.

use std::collections::{HashMap, HashSet};

use arbor_annotate::{annotate_with, AnnotateOptions, AnnotatedValue, Element, Identify};
use arbor_types::{ElementKey, Path, PathSegment, Value};

use crate::edit::{EditOp, EditSet};
use crate::error::DiffResult;

/// Annotate two plain trees with `identify` and diff them.
pub fn diff_trees<I>(old: &Value, new: &Value, identify: &I) -> DiffResult<EditSet>
where
    I: Identify + ?Sized,
{
    diff_trees_with(old, new, identify, &AnnotateOptions::default())
}

/// [`diff_trees`] with explicit annotation options.
pub fn diff_trees_with<I>(
    old: &Value,
    new: &Value,
    identify: &I,
    options: &AnnotateOptions,
) -> DiffResult<EditSet>
where
    I: Identify + ?Sized,
{
    let old = annotate_with(old, identify, options)?;
    let new = annotate_with(new, identify, options)?;
    Ok(diff_annotated(&old, &new))
}

/// Compare two annotated trees.
pub fn diff_annotated(old: &AnnotatedValue, new: &AnnotatedValue) -> EditSet {
    let mut set = EditSet::new();
    diff_node(old, new, &Path::root(), &mut set);
    set
}

/// The operation that turned `base` into `side` at one slot, if any.
///
/// A slot is a mapping entry or a sequence member; `None` means the slot
/// is absent in that version. Unlike [`diff_annotated`] this never looks
/// inside the values: a changed composite is reported as one `Replace`.
pub fn slot_edit(
    path: &Path,
    base: Option<&AnnotatedValue>,
    side: Option<&AnnotatedValue>,
) -> Option<EditOp> {
    match (base, side) {
        (None, None) => None,
        (Some(b), Some(s)) if b == s => None,
        (Some(b), Some(s)) => Some(EditOp::Replace {
            path: path.clone(),
            old: b.strip(),
            new: s.strip(),
        }),
        (None, Some(s)) => Some(EditOp::Add {
            path: path.clone(),
            value: s.strip(),
        }),
        (Some(b), None) => Some(EditOp::Remove {
            path: path.clone(),
            old: b.strip(),
        }),
    }
}

fn diff_node(old: &AnnotatedValue, new: &AnnotatedValue, path: &Path, set: &mut EditSet) {
    if old == new {
        return;
    }

    match (old, new) {
        (AnnotatedValue::Mapping(a), AnnotatedValue::Mapping(b)) => {
            // Removed and modified keys.
            for (key, a_val) in a {
                let child = path.child(PathSegment::Key(key.clone()));
                match b.get(key) {
                    Some(b_val) => diff_node(a_val, b_val, &child, set),
                    None => set.ops.push(EditOp::Remove {
                        path: child,
                        old: a_val.strip(),
                    }),
                }
            }
            // Added keys.
            for (key, b_val) in b {
                if !a.contains_key(key) {
                    set.ops.push(EditOp::Add {
                        path: path.child(PathSegment::Key(key.clone())),
                        value: b_val.strip(),
                    });
                }
            }
        }
        (AnnotatedValue::Sequence(a), AnnotatedValue::Sequence(b)) => {
            diff_sequence(a, b, path, set);
        }
        _ => set.ops.push(EditOp::Replace {
            path: path.clone(),
            old: old.strip(),
            new: new.strip(),
        }),
    }
}

fn diff_sequence(a: &[Element], b: &[Element], path: &Path, set: &mut EditSet) {
    let b_index: HashMap<(&ElementKey, usize), &Element> =
        b.iter().map(|e| ((&e.key, e.occurrence), e)).collect();
    let a_keys: HashSet<(&ElementKey, usize)> = a.iter().map(|e| (&e.key, e.occurrence)).collect();

    for element in a {
        let child = path.child(element.segment());
        match b_index.get(&(&element.key, element.occurrence)) {
            Some(other) => diff_node(&element.value, &other.value, &child, set),
            None => set.ops.push(EditOp::Remove {
                path: child,
                old: element.value.strip(),
            }),
        }
    }
    for element in b {
        if !a_keys.contains(&(&element.key, element.occurrence)) {
            set.ops.push(EditOp::Add {
                path: path.child(element.segment()),
                value: element.value.strip(),
            });
        }
    }

    let common_a: Vec<_> = a
        .iter()
        .map(|e| (&e.key, e.occurrence))
        .filter(|k| b_index.contains_key(k))
        .collect();
    let common_b: Vec<_> = b
        .iter()
        .map(|e| (&e.key, e.occurrence))
        .filter(|k| a_keys.contains(k))
        .collect();
    if common_a != common_b {
        set.reordered.push(path.clone());
    }
}
