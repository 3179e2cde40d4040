use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a dependency target: `group:artifact[:classifier]`.
///
/// The classifier doubles as the named configuration/output when the
/// coordinate points at a module of the same build.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub artifact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl ArtifactCoordinate {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Parse `"group:artifact"` or `"group:artifact:classifier"`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        match parts.as_slice() {
            [group, artifact] => Some(Self::new(*group, *artifact)),
            [group, artifact, classifier] => {
                Some(Self::new(*group, *artifact).with_classifier(*classifier))
            }
            _ => None,
        }
    }

    /// `group:artifact` without the classifier.
    pub fn module_key(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)?;
        if let Some(ref classifier) = self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}
