//! Definition expression resolution.

use crate::layer::Layer;

/// Returns the filter the layer already applies.
///
/// A subtype sublayer always yields at least `<subtypeField> = <code>`,
/// conjoined after the parent's own expression when it has one.
pub fn get_definition_expression(layer: &Layer) -> Option<String> {
    match layer {
        Layer::Feature(info) | Layer::SubtypeGroup(info) | Layer::Sublayer(info) => {
            info.definition_expression().map(str::to_string)
        }
        Layer::SubtypeSublayer(sublayer) => {
            let scope = format!("{} = {}", sublayer.subtype_field(), sublayer.subtype_code());
            Some(match sublayer.parent().definition_expression() {
                Some(parent_expr) => format!("{} AND {}", parent_expr, scope),
                None => scope,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{LayerInfo, Subtype, SubtypeSublayer};
    use std::sync::Arc;

    fn parent(expr: Option<&str>) -> Arc<LayerInfo> {
        let mut info = LayerInfo::new("Assets").with_subtypes("AssetType", vec![Subtype::new(2, "Valve")]);
        info.definition_expression = expr.map(str::to_string);
        Arc::new(info)
    }

    #[test]
    fn test_sublayer_with_parent_expression() {
        let layer = Layer::SubtypeSublayer(SubtypeSublayer::new(parent(Some("Active=1")), 2).unwrap());
        assert_eq!(get_definition_expression(&layer).as_deref(), Some("Active=1 AND AssetType = 2"));
    }

    #[test]
    fn test_sublayer_without_parent_expression() {
        let layer = Layer::SubtypeSublayer(SubtypeSublayer::new(parent(None), 2).unwrap());
        assert_eq!(get_definition_expression(&layer).as_deref(), Some("AssetType = 2"));

        let blank = Layer::SubtypeSublayer(SubtypeSublayer::new(parent(Some("")), 2).unwrap());
        assert_eq!(get_definition_expression(&blank).as_deref(), Some("AssetType = 2"));
    }

    #[test]
    fn test_own_expression_verbatim() {
        let info = LayerInfo::new("Roads").with_definition_expression("Lanes > 2");
        assert_eq!(get_definition_expression(&Layer::Feature(info.clone())).as_deref(), Some("Lanes > 2"));
        assert_eq!(get_definition_expression(&Layer::Sublayer(info)).as_deref(), Some("Lanes > 2"));
        assert_eq!(get_definition_expression(&Layer::SubtypeGroup(LayerInfo::new("Empty"))), None);
    }
}
