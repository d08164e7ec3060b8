//! Flat models extracted from annotated declarations.

use crate::equatable::EquatableVec;
use crate::location::LocationSnapshot;
use crate::policy::FormattingPolicy;

/// One annotated member: where it is declared, what it is called and which option it asked for.
///
/// Equality and hashing are structural over every field, so an incremental driver can use the value as a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormattingTarget {
    /// Module path of the declaring type, without a `crate::` prefix. `None` for the crate root.
    pub namespace: Option<String>,
    pub type_name: String,
    pub member_name: String,
    /// Raw option code from the attribute; not validated until emission.
    pub option_code: i32,
    pub location: Option<LocationSnapshot>,
}

impl FormattingTarget {
    /// Key used to group targets by declaring type.
    pub fn group_key(&self) -> (Option<&str>, &str) {
        (self.namespace.as_deref(), self.type_name.as_str())
    }

    /// Resolve the option code, or `None` when it names no known policy.
    pub fn policy(&self) -> Option<FormattingPolicy> {
        FormattingPolicy::from_code(self.option_code)
    }
}

/// All targets declared on one type, sorted by member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeGroup {
    pub namespace: Option<String>,
    pub type_name: String,
    pub members: EquatableVec<FormattingTarget>,
}

impl TypeGroup {
    /// Build a group, stably sorting `members` by name (ordinal byte order).
    ///
    /// Members with equal names keep the order they were given in.
    pub fn new(namespace: Option<String>, type_name: impl Into<String>, members: Vec<FormattingTarget>) -> Self {
        let mut members = members;
        members.sort_by(|a, b| a.member_name.as_bytes().cmp(b.member_name.as_bytes()));
        Self {
            namespace,
            type_name: type_name.into(),
            members: members.into(),
        }
    }

    /// Namespace segments, e.g. `["shop", "pricing"]` for `shop::pricing`.
    pub fn namespace_segments(&self) -> Vec<&str> {
        self.namespace
            .as_deref()
            .map(|ns| ns.split("::").filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }
}
