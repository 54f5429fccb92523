//! Building a query form from configuration files.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use formquery::{
    AddQueryElements, AddQueryElementsInputs, Attributes, FeatureQuery, FeatureSet, FeatureSource, Form,
    FormHost, GetLayerCodedValues, GetLayerCodedValuesInputs, Layer, LayerInfo, QueryConfig, Result,
    SubtypeSublayer,
};
use serde_json::{json, Value};
use tempfile::TempDir;

const LAYER: &str = r#"{
    "id": 3,
    "name": "Hydrants",
    "fields": [
        { "name": "OBJECTID", "type": "esriFieldTypeOID" },
        { "name": "AssetGroup", "type": "esriFieldTypeInteger" },
        { "name": "Status", "type": "esriFieldTypeSmallInteger",
          "domain": { "type": "codedValue", "name": "Status",
                      "codedValues": [ { "code": 1, "name": "In Service" }, { "code": 2, "name": "Retired" } ] } },
        { "name": "Zone", "type": "esriFieldTypeString" }
    ],
    "subtypeField": "AssetGroup",
    "subtypes": [
        { "code": 1, "name": "Standard", "domains": { "Status": { "type": "inherited" } } },
        { "code": 2, "name": "Private",
          "domains": { "STATUS": { "type": "codedValue", "name": "PrivateStatus",
                                   "codedValues": [ { "code": 7, "name": "Owner Maintained" } ] } } }
    ]
}"#;

const QUERY: &str = r#"{
    "title": "Find hydrants",
    "description": "Filter hydrants by group and status",
    "where": "Zone <> 'Closed'",
    "searchFields": [
        { "field": "AssetGroup", "operator": "=", "type": "DropDownList", "title": "Group", "value": 2 },
        { "field": "Status", "operator": "in", "type": "CheckGroup", "title": "Status", "cascade": true,
          "events": { "changed": "refreshResults" } },
        { "field": "Zone", "operator": "LIKE", "type": "TextBox", "title": "Zone" }
    ]
}"#;

/// Serves features from memory; records every query.
struct MemorySource {
    features: Vec<Attributes>,
    queries: Mutex<Vec<FeatureQuery>>,
}

impl MemorySource {
    fn new(features: Value) -> Self {
        let features = features
            .as_array()
            .map(|rows| rows.iter().filter_map(|row| row.as_object().cloned()).collect())
            .unwrap_or_default();
        Self {
            features,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl FeatureSource for MemorySource {
    async fn query_features(&self, target: &LayerInfo, query: &FeatureQuery) -> Result<FeatureSet> {
        assert_eq!(target.name.as_deref(), Some("Hydrants"));
        self.queries.lock().unwrap().push(query.clone());

        let features = self
            .features
            .iter()
            .map(|row| {
                query
                    .out_fields
                    .iter()
                    .filter_map(|f| row.get(f).map(|v| (f.clone(), v.clone())))
                    .collect::<Attributes>()
            })
            .collect();
        Ok(FeatureSet {
            fields: query.out_fields.clone(),
            features,
        })
    }
}

fn write_fixtures(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let layer = dir.path().join("hydrants.layer.json");
    let query = dir.path().join("hydrants.query.json");
    std::fs::write(&layer, LAYER).unwrap();
    std::fs::write(&query, QUERY).unwrap();
    (layer, query)
}

#[tokio::test]
async fn builds_form_from_configuration_files() {
    let dir = TempDir::new().unwrap();
    let (layer_path, query_path) = write_fixtures(&dir);

    let layer = Layer::SubtypeGroup(LayerInfo::load(&layer_path).unwrap());
    let config = QueryConfig::load(&query_path).unwrap();
    let source = MemorySource::new(json!([
        { "AssetGroup": 2, "Status": 7, "Zone": "North" },
        { "AssetGroup": 2, "Status": 7, "Zone": "South" }
    ]));
    let mut form = Form::new();

    AddQueryElements::new(&source)
        .execute(AddQueryElementsInputs::from_config(&config, &layer), Some(&mut form))
        .await
        .unwrap();

    let state = form.state();
    assert_eq!(
        state.names().collect::<Vec<_>>(),
        vec!["querySection", "AssetGroup", "Status", "Zone"]
    );

    // The subtype field lists the subtypes; the preset selects "Private".
    let group = state.get("AssetGroup").unwrap();
    let labels: Vec<_> = group.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Standard", "Private"]);
    assert!(group.items[1].is_checked);
    assert!(form.route_requested());

    // Status cascades from AssetGroup and picks up the subtype 2 override.
    let status = state.get("Status").unwrap();
    assert_eq!(status.depends_on.as_deref(), Some("AssetGroup"));
    assert_eq!(status.items.len(), 1);
    assert_eq!(status.items[0].label, "Owner Maintained");
    assert_eq!(status.items[0].value, json!(7));
    assert!(status.events.values().any(|target| target == "refreshResults"));

    let queries = source.queries.lock().unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].where_clause, "Zone <> 'Closed'");
    assert_eq!(queries[1].where_clause, "Zone <> 'Closed' AND AssetGroup = 2");
    assert_eq!(queries[1].out_fields, vec!["Status".to_string(), "AssetGroup".to_string()]);
}

#[test]
fn coded_values_follow_sublayer_code() {
    let dir = TempDir::new().unwrap();
    let (layer_path, _) = write_fixtures(&dir);
    let parent = Arc::new(LayerInfo::load(&layer_path).unwrap());

    let standard = Layer::SubtypeSublayer(SubtypeSublayer::new(parent.clone(), 1).unwrap());
    let private = Layer::SubtypeSublayer(SubtypeSublayer::new(parent, 2).unwrap());

    let lookup = |layer: &Layer| {
        GetLayerCodedValues
            .execute(GetLayerCodedValuesInputs {
                layer: Some(layer),
                field: Some("Status"),
                // Ignored: a sublayer always uses its own code.
                type_code: Some(1),
            })
            .unwrap()
            .unwrap()
    };

    assert_eq!(lookup(&standard)[1].name, "Retired");
    assert_eq!(lookup(&private)[0].name, "Owner Maintained");
}

#[test]
fn missing_configuration_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let err = QueryConfig::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().starts_with("Failed to load"));
}
