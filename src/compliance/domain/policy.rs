use serde::Deserialize;

/// Entry of the policy listing returned by the compliance service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolicyDescriptor {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl PolicyDescriptor {
    pub fn new(id: impl Into<String>, label: Option<String>) -> Self {
        Self {
            id: id.into(),
            label,
        }
    }

    /// Label when set and non-empty, otherwise the id
    pub fn display_name(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.id,
        }
    }
}
