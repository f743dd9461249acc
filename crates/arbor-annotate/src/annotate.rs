//! Tree annotation: compute the matching key of every sequence member.

use std::collections::HashMap;

use arbor_types::{ElementKey, Path, PathSegment, Value};
use tracing::debug;

use crate::annotated::{AnnotatedValue, Element};
use crate::config::AnnotateOptions;
use crate::error::{AnnotateError, AnnotateResult};
use crate::identify::Identify;

/// Annotate `tree` using the default [`AnnotateOptions`].
pub fn annotate<I>(tree: &Value, identify: &I) -> AnnotateResult<AnnotatedValue>
where
    I: Identify + ?Sized,
{
    annotate_with(tree, identify, &AnnotateOptions::default())
}

/// Annotate `tree`, keying composite sequence members with `identify`.
///
/// Scalar and null members are keyed by their canonical text. Members
/// sharing a key within one sequence are numbered by occurrence in
/// first-seen order.
///
/// Fails with [`AnnotateError::IdentityFieldCollision`] if a mapping that
/// is a sequence member already holds the reserved field.
pub fn annotate_with<I>(
    tree: &Value,
    identify: &I,
    options: &AnnotateOptions,
) -> AnnotateResult<AnnotatedValue>
where
    I: Identify + ?Sized,
{
    let annotator = Annotator {
        identify,
        reserved_field: &options.reserved_field,
    };
    annotator.visit(tree, &Path::root())
}

struct Annotator<'a, I: ?Sized> {
    identify: &'a I,
    reserved_field: &'a str,
}

impl<I: Identify + ?Sized> Annotator<'_, I> {
    fn visit(&self, value: &Value, path: &Path) -> AnnotateResult<AnnotatedValue> {
        Ok(match value {
            Value::Null => AnnotatedValue::Null,
            Value::Scalar(scalar) => AnnotatedValue::Scalar(scalar.clone()),
            Value::Sequence(items) => AnnotatedValue::Sequence(self.visit_sequence(items, path)?),
            Value::Mapping(map) => AnnotatedValue::Mapping(
                map.iter()
                    .map(|(key, child)| {
                        let child_path = path.child(PathSegment::Key(key.clone()));
                        Ok((key.clone(), self.visit(child, &child_path)?))
                    })
                    .collect::<AnnotateResult<_>>()?,
            ),
        })
    }

    fn visit_sequence(&self, items: &[Value], path: &Path) -> AnnotateResult<Vec<Element>> {
        let mut seen: HashMap<ElementKey, usize> = HashMap::new();
        let mut elements = Vec::with_capacity(items.len());

        for item in items {
            let key = if item.is_composite() {
                ElementKey::Identity(self.identify.identify(item))
            } else {
                ElementKey::of_value(item)
            };

            let counter = seen.entry(key.clone()).or_insert(0);
            let occurrence = *counter;
            *counter += 1;

            if occurrence > 0 && matches!(key, ElementKey::Identity(_)) {
                debug!(path = %path, key = %key, occurrence, "identity collision, matching by occurrence");
            }

            let item_path = path.child(PathSegment::Element {
                key: key.clone(),
                occurrence,
            });

            if let Value::Mapping(map) = item {
                if map.contains_key(self.reserved_field) {
                    return Err(AnnotateError::IdentityFieldCollision {
                        path: item_path,
                        field: self.reserved_field.to_owned(),
                    });
                }
            }

            let value = self.visit(item, &item_path)?;
            elements.push(Element {
                key,
                occurrence,
                value,
            });
        }

        Ok(elements)
    }
}
