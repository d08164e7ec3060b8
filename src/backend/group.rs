//! Partition formatting targets by declaring type.

use std::collections::BTreeMap;

use stringify_core::{FormattingTarget, TypeGroup};

/// Group targets by `(namespace, type_name)`.
///
/// Groups come out ordered by key (crate-root types first, then by module path, then by type name), so the result
/// does not depend on the order in which files were discovered. Members inside a group are stably sorted by name;
/// members with the same name keep their input order.
#[tracing::instrument(skip_all, fields(target_count = targets.len()))]
pub fn group_targets(targets: Vec<FormattingTarget>) -> Vec<TypeGroup> {
    let mut partitions: BTreeMap<(Option<String>, String), Vec<FormattingTarget>> = BTreeMap::new();
    for target in targets {
        let key = (target.namespace.clone(), target.type_name.clone());
        partitions.entry(key).or_default().push(target);
    }

    partitions
        .into_iter()
        .map(|((namespace, type_name), members)| TypeGroup::new(namespace, type_name, members))
        .collect()
}
