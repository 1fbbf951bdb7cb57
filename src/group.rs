//! Grouping of corpus items by cluster label.

use anyhow::{bail, Result};

use crate::models::{ClusterAssignment, ClusterGroup, ClusterGroups, Item, ItemKind};

/// Partition `corpus` into `assignment.num_clusters` groups.
///
/// Every bucket `0..K` is created up front, then items are appended in
/// corpus order, so each group preserves the original ordering and empty
/// clusters still appear.
pub fn group_by_cluster(
    kind: ItemKind,
    corpus: &[Item],
    assignment: &ClusterAssignment,
) -> Result<ClusterGroups> {
    if assignment.labels.len() != corpus.len() {
        bail!(
            "assignment has {} labels for {} items",
            assignment.labels.len(),
            corpus.len()
        );
    }

    let mut groups: Vec<ClusterGroup> = (0..assignment.num_clusters)
        .map(|id| ClusterGroup {
            id,
            items: Vec::new(),
        })
        .collect();

    for (item, &label) in corpus.iter().zip(assignment.labels.iter()) {
        match groups.get_mut(label) {
            Some(group) => group.items.push(item.clone()),
            None => bail!(
                "cluster label {} out of range for {} clusters",
                label,
                assignment.num_clusters
            ),
        }
    }

    Ok(ClusterGroups { kind, groups })
}
