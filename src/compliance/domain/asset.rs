use serde_json::Value;

/// CycloneDX component type marking a detected cryptographic asset
pub const CRYPTOGRAPHIC_ASSET_TYPE: &str = "cryptographic-asset";

/// One scanned asset, i.e. a CBOM component.
///
/// The component is kept as raw JSON; only the fields the compliance view
/// needs are read from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset(Value);

impl Asset {
    pub fn new(component: Value) -> Self {
        Self(component)
    }

    /// Convenience constructor for an asset carrying only a `bom-ref`
    pub fn with_bom_ref(bom_ref: &str) -> Self {
        Self(serde_json::json!({ "bom-ref": bom_ref }))
    }

    pub fn bom_ref(&self) -> Option<&str> {
        self.0.get("bom-ref").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// `cryptoProperties.algorithmProperties.<property>`, if present
    pub fn algorithm_property(&self, property: &str) -> Option<&Value> {
        self.0
            .get("cryptoProperties")?
            .get("algorithmProperties")?
            .get(property)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Asset {
    fn from(component: Value) -> Self {
        Self(component)
    }
}

/// A loaded CBOM document together with its detections
#[derive(Debug, Clone, PartialEq)]
pub struct Cbom {
    document: Value,
    detections: Vec<Asset>,
}

impl Cbom {
    /// Wraps a CBOM document. Detections are the components whose `type` is
    /// `cryptographic-asset`, in document order; a document without a
    /// `components` array has none.
    pub fn new(document: Value) -> Self {
        let detections = document
            .get("components")
            .and_then(Value::as_array)
            .map(|components| {
                components
                    .iter()
                    .filter(|c| {
                        c.get("type").and_then(Value::as_str) == Some(CRYPTOGRAPHIC_ASSET_TYPE)
                    })
                    .cloned()
                    .map(Asset::new)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            document,
            detections,
        }
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn detections(&self) -> &[Asset] {
        &self.detections
    }
}
