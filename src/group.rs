//! Bucketing artifacts into one group per image.

use crate::types::{ArtifactGroup, BuildArtifact};
use std::collections::HashMap;

/// Partition artifacts by [`BuildArtifact::group_key`].
///
/// Groups come out in the order their key was first seen, and each group keeps
/// its artifacts in input order.
pub fn group_artifacts(artifacts: Vec<BuildArtifact>) -> Vec<ArtifactGroup> {
    let mut groups: Vec<ArtifactGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for artifact in artifacts {
        let key = artifact.group_key().to_string();
        match index.get(&key) {
            Some(&i) => groups[i].artifacts.push(artifact),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(ArtifactGroup {
                    key,
                    artifacts: vec![artifact],
                });
            }
        }
    }

    groups
}
