//! Coded-value domain resolution.

use tracing::debug;

use crate::layer::{CodedValue, Domain, Layer, LayerInfo};
use crate::text::{get_ignoring_case, FoldedKey};

/// Returns the coded values that apply to `field_name` on `layer`.
///
/// Resolution order:
/// 1. A subtype sublayer reads its parent's metadata and always uses its own
///    bound subtype code (`type_code` is ignored).
/// 2. The subtype field itself resolves to the subtype list.
/// 3. A subtype (by `code`) or feature type (by `id`) override for the field.
/// 4. The domain declared on the field.
pub fn get_coded_values(
    layer: &Layer,
    field_name: &str,
    type_code: Option<i64>,
) -> Option<Vec<CodedValue>> {
    if field_name.is_empty() {
        return None;
    }

    let code = match layer {
        Layer::SubtypeSublayer(sublayer) => Some(sublayer.subtype_code()),
        _ => type_code,
    };
    let info = layer.metadata();

    let field = FoldedKey::new(field_name);
    if let Some(subtype_field) = layer.subtype_field() {
        if field.matches(subtype_field) && !info.subtypes.is_empty() {
            debug!(field = field_name, "field is the subtype discriminator");
            return Some(
                info.subtypes
                    .iter()
                    .map(|s| CodedValue::new(s.code, s.name.clone()))
                    .collect(),
            );
        }
    }

    get_domain(info, field_name, code).and_then(|domain| domain.coded_values.clone())
}

/// Returns the coded-value domain for `field_name`, preferring the override of
/// the subtype or feature type identified by `code`.
pub fn get_domain<'a>(info: &'a LayerInfo, field_name: &str, code: Option<i64>) -> Option<&'a Domain> {
    if field_name.is_empty() {
        return None;
    }

    if let Some(code) = code {
        let overrides = info
            .subtypes
            .iter()
            .find(|s| s.code == code)
            .map(|s| &s.domains)
            .or_else(|| info.types.iter().find(|t| t.id == code).map(|t| &t.domains));

        if let Some(domain) = overrides
            .and_then(|domains| get_ignoring_case(field_name, domains))
            .filter(|domain| has_coded_values(domain))
        {
            debug!(field = field_name, code, domain = %domain.name, "using type-level domain");
            return Some(domain);
        }
    }

    get_field_domain(info, field_name)
}

/// Returns the coded-value domain declared on the field itself.
pub fn get_field_domain<'a>(info: &'a LayerInfo, field_name: &str) -> Option<&'a Domain> {
    let key = FoldedKey::new(field_name);
    info.fields
        .iter()
        .find(|f| key.matches(&f.name))
        .and_then(|f| f.domain.as_ref())
        .filter(|domain| has_coded_values(domain))
}

fn has_coded_values(domain: &Domain) -> bool {
    domain.coded_values.as_ref().is_some_and(|values| !values.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{FeatureType, FieldMetadata, FieldType, Subtype, SubtypeSublayer};
    use std::sync::Arc;

    fn status_domain(name: &str, values: &[(i64, &str)]) -> Domain {
        Domain::coded(
            name,
            values.iter().map(|(c, n)| CodedValue::new(*c, *n)).collect(),
        )
    }

    fn assets() -> LayerInfo {
        LayerInfo::new("Assets")
            .with_field(FieldMetadata::new("AssetType", FieldType::Integer))
            .with_field(
                FieldMetadata::new("Status", FieldType::Integer)
                    .with_domain(status_domain("Generic", &[(1, "On"), (0, "Off")])),
            )
            .with_field(FieldMetadata::new("Name", FieldType::String))
            .with_subtypes(
                "AssetType",
                vec![
                    Subtype::new(1, "Pipe")
                        .with_domain("STATUS", status_domain("PipeStatus", &[(10, "Flowing")])),
                    Subtype::new(2, "Valve").with_domain("Status", Domain::inherited()),
                ],
            )
    }

    #[test]
    fn test_subtype_override_wins() {
        let layer = Layer::SubtypeGroup(assets());
        let values = get_coded_values(&layer, "status", Some(1)).unwrap();
        assert_eq!(values, vec![CodedValue::new(10, "Flowing")]);
    }

    #[test]
    fn test_inherited_override_falls_back_to_field() {
        let layer = Layer::SubtypeGroup(assets());
        let values = get_coded_values(&layer, "Status", Some(2)).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].name, "On");
    }

    #[test]
    fn test_empty_override_falls_back_to_field() {
        let info = assets().with_subtypes(
            "AssetType",
            vec![Subtype::new(1, "Pipe").with_domain("Status", Domain::coded("Empty", vec![]))],
        );
        let layer = Layer::SubtypeGroup(info);
        let values = get_coded_values(&layer, "Status", Some(1)).unwrap();
        assert_eq!(values, vec![CodedValue::new(1, "On"), CodedValue::new(0, "Off")]);
    }

    #[test]
    fn test_no_code_uses_field_domain() {
        let layer = Layer::Feature(assets());
        let values = get_coded_values(&layer, "Status", None).unwrap();
        assert_eq!(values[1], CodedValue::new(0, "Off"));
    }

    #[test]
    fn test_subtype_field_returns_subtypes() {
        let layer = Layer::Feature(assets());
        let values = get_coded_values(&layer, "assettype", None).unwrap();
        assert_eq!(values, vec![CodedValue::new(1, "Pipe"), CodedValue::new(2, "Valve")]);
    }

    #[test]
    fn test_sublayer_forces_own_code() {
        let parent = Arc::new(assets());
        let layer = Layer::SubtypeSublayer(SubtypeSublayer::new(parent, 1).unwrap());
        let values = get_coded_values(&layer, "Status", Some(2)).unwrap();
        assert_eq!(values, vec![CodedValue::new(10, "Flowing")]);
    }

    #[test]
    fn test_feature_type_override() {
        let info = LayerInfo::new("Hydrants")
            .with_field(
                FieldMetadata::new("Kind", FieldType::SmallInteger)
                    .with_domain(status_domain("Kinds", &[(1, "Any")])),
            )
            .with_types(vec![
                FeatureType::new(7, "Dry").with_domain("kind", status_domain("DryKinds", &[(5, "Dry barrel")])),
            ]);
        let layer = Layer::Feature(info);

        assert_eq!(get_coded_values(&layer, "Kind", Some(7)).unwrap()[0].code, 5);
        assert_eq!(get_coded_values(&layer, "Kind", Some(8)).unwrap()[0].code, 1);
    }

    #[test]
    fn test_missing_domain_is_none() {
        let layer = Layer::Feature(assets());
        assert!(get_coded_values(&layer, "Name", Some(1)).is_none());
        assert!(get_coded_values(&layer, "Missing", None).is_none());
        assert!(get_coded_values(&layer, "", None).is_none());
    }
}
