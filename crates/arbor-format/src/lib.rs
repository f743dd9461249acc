//! Document formats for Arbor.
//!
//! Decodes JSON, YAML and TOML documents into the [`Value`](arbor_types::Value)
//! tree model and encodes merged trees back out.
//!
//! # Key Types
//!
//! - [`Format`] -- A supported format, with `parse`/`render` and detection by extension
//! - [`FormatError`] -- Decode, encode and detection failures

pub mod error;
pub mod format;
mod json;
mod toml_doc;
mod yaml;

pub use error::{FormatError, FormatResult};
pub use format::Format;

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_types::Value;
    use proptest::prelude::*;

    fn arb_document() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            (-4000i32..4000).prop_map(|q| Value::from(f64::from(q) / 4.0)),
            "[a-z ]{0,8}".prop_map(Value::from),
        ];
        let tree = leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Sequence),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|map| Value::Mapping(map.into_iter().collect())),
            ]
        });
        prop::collection::btree_map("[a-z]{1,4}", tree, 0..4)
            .prop_map(|map| Value::Mapping(map.into_iter().collect()))
    }

    proptest! {
        #[test]
        fn every_format_reads_back_what_it_writes(doc in arb_document()) {
            for format in Format::ALL {
                let text = format.render(&doc).unwrap();
                prop_assert_eq!(format.parse(&text).unwrap(), doc.clone());
            }
        }
    }

    #[test]
    fn formats_agree_on_the_same_document() {
        let json = Format::Json.parse(r#"{"name": "svc", "ports": [80, 443]}"#).unwrap();
        let yaml = Format::Yaml.parse("name: svc\nports:\n- 80\n- 443\n").unwrap();
        let toml = Format::Toml.parse("name = \"svc\"\nports = [80, 443]\n").unwrap();
        assert_eq!(json, yaml);
        assert_eq!(json, toml);
    }
}
