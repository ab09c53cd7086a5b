use crate::config::{OverwritePolicy, RegistryConfig};
use crate::error::{ReframeError, Result};
use crate::metadata::MetadataValue;
use dashmap::{DashMap, DashSet};
use std::any::TypeId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of an annotated type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId {
    id: TypeId,
    name: &'static str,
}

impl TargetId {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A target plus an optional member: the address of one set of metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub target: TargetId,
    pub member: Option<String>,
}

impl Scope {
    pub fn new(target: TargetId, member: Option<&str>) -> Self {
        Self {
            target,
            member: member.map(str::to_string),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.member {
            Some(member) => write!(f, "{}::{}", self.target, member),
            None => write!(f, "{}", self.target),
        }
    }
}

#[derive(Debug)]
struct TargetEntry {
    seq: u64,
    members: Vec<String>,
}

/// Thread-safe store of `(key, value)` pairs addressed by [`Scope`].
///
/// Keys keep their first-insertion order within a scope. Rewriting a key
/// follows the configured [`OverwritePolicy`].
#[derive(Debug)]
pub struct MetadataStore {
    entries: DashMap<Scope, Vec<(String, MetadataValue)>>,
    targets: DashMap<TargetId, TargetEntry>,
    sealed: DashSet<Scope>,
    next_seq: AtomicU64,
    config: RegistryConfig,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: DashMap::new(),
            targets: DashMap::new(),
            sealed: DashSet::new(),
            next_seq: AtomicU64::new(0),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Write `value` under `key` for `(target, member)`.
    ///
    /// # Errors
    /// Returns `DuplicateAnnotation` if the key already exists and the policy
    /// is [`OverwritePolicy::Reject`].
    pub fn define(
        &self,
        target: TargetId,
        member: Option<&str>,
        key: &str,
        value: impl Into<MetadataValue>,
    ) -> Result<()> {
        let value = value.into();
        let scope = Scope::new(target, member);
        let label = scope.to_string();
        self.touch(target, member);

        let mut pairs = self.entries.entry(scope).or_default();
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => {
                match self.config.overwrite {
                    OverwritePolicy::Replace => {}
                    OverwritePolicy::Warn => {
                        tracing::warn!(scope = %label, key, "Overwriting metadata");
                    }
                    OverwritePolicy::Reject => {
                        return Err(ReframeError::DuplicateAnnotation {
                            target: label,
                            key: key.to_string(),
                        });
                    }
                }
                slot.1 = value;
            }
            None => pairs.push((key.to_string(), value)),
        }

        tracing::debug!(scope = %label, key, "Defined metadata");
        Ok(())
    }

    pub fn get(&self, target: TargetId, member: Option<&str>, key: &str) -> Option<MetadataValue> {
        self.entries
            .get(&Scope::new(target, member))?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn has(&self, target: TargetId, member: Option<&str>, key: &str) -> bool {
        self.entries
            .get(&Scope::new(target, member))
            .is_some_and(|pairs| pairs.iter().any(|(k, _)| k == key))
    }

    /// Keys defined for `(target, member)`, in insertion order.
    pub fn keys(&self, target: TargetId, member: Option<&str>) -> Vec<String> {
        self.entries
            .get(&Scope::new(target, member))
            .map(|pairs| pairs.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    /// Remove one key. Returns whether it was present.
    ///
    /// A member whose last key is removed is no longer listed by
    /// [`members`](Self::members) and loses its seal.
    pub fn delete(&self, target: TargetId, member: Option<&str>, key: &str) -> bool {
        let scope = Scope::new(target, member);
        let removed = match self.entries.get_mut(&scope) {
            Some(mut pairs) => {
                let before = pairs.len();
                pairs.retain(|(k, _)| k != key);
                pairs.len() != before
            }
            None => false,
        };
        let emptied = self
            .entries
            .remove_if(&scope, |_, pairs| pairs.is_empty())
            .is_some();
        if let (true, Some(member)) = (emptied, member) {
            self.sealed.remove(&scope);
            if let Some(mut entry) = self.targets.get_mut(&target) {
                entry.members.retain(|m| m != member);
            }
        }
        removed
    }

    /// Members of `target` that have been annotated, in first-annotation order.
    pub fn members(&self, target: TargetId) -> Vec<String> {
        self.targets
            .get(&target)
            .map(|entry| entry.members.clone())
            .unwrap_or_default()
    }

    /// Every target that has been annotated, in first-annotation order.
    pub fn targets(&self) -> Vec<TargetId> {
        let mut targets: Vec<(u64, TargetId)> = self
            .targets
            .iter()
            .map(|entry| (entry.value().seq, *entry.key()))
            .collect();
        targets.sort_by_key(|(seq, _)| *seq);
        targets.into_iter().map(|(_, target)| target).collect()
    }

    /// Mark a handler member as fixed.
    pub fn seal(&self, target: TargetId, member: &str) {
        self.touch(target, Some(member));
        self.sealed.insert(Scope::new(target, Some(member)));
    }

    pub fn is_sealed(&self, target: TargetId, member: &str) -> bool {
        self.sealed.contains(&Scope::new(target, Some(member)))
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|pairs| pairs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn touch(&self, target: TargetId, member: Option<&str>) {
        let mut entry = self.targets.entry(target).or_insert_with(|| TargetEntry {
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            members: Vec::new(),
        });
        if let Some(member) = member {
            if !entry.members.iter().any(|m| m == member) {
                entry.members.push(member.to_string());
            }
        }
    }
}

impl Default for MetadataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    struct UserController;
    struct OrderController;

    fn user() -> TargetId {
        TargetId::of::<UserController>()
    }

    #[test]
    fn test_define_and_get() {
        let store = MetadataStore::new();
        store.define(user(), Some("create"), "path", "/users").unwrap();
        store
            .define(user(), Some("create"), "method", HttpMethod::Post)
            .unwrap();

        assert_eq!(
            store.get(user(), Some("create"), "path"),
            Some(MetadataValue::Str("/users".to_string()))
        );
        assert_eq!(
            store.get(user(), Some("create"), "method"),
            Some(MetadataValue::Method(HttpMethod::Post))
        );
        assert_eq!(store.keys(user(), Some("create")), ["path", "method"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_scopes_are_independent() {
        let store = MetadataStore::new();
        store.define(user(), None, "prefix", "/api").unwrap();
        store.define(user(), Some("list"), "path", "/").unwrap();

        assert!(store.has(user(), None, "prefix"));
        assert!(!store.has(user(), None, "path"));
        assert!(!store.has(user(), Some("list"), "prefix"));
        assert!(!store.has(TargetId::of::<OrderController>(), None, "prefix"));
    }

    #[test]
    fn test_last_write_wins_by_default() {
        let store = MetadataStore::new();
        store.define(user(), Some("find"), "path", "/a").unwrap();
        store.define(user(), Some("find"), "path", "/b").unwrap();

        assert_eq!(
            store.get(user(), Some("find"), "path").unwrap().as_str(),
            Some("/b")
        );
        assert_eq!(store.keys(user(), Some("find")), ["path"]);
    }

    #[test]
    fn test_warn_policy_still_overwrites() {
        let store = MetadataStore::with_config(RegistryConfig::new(OverwritePolicy::Warn));
        store.define(user(), Some("find"), "path", "/a").unwrap();
        store.define(user(), Some("find"), "path", "/b").unwrap();
        assert_eq!(
            store.get(user(), Some("find"), "path").unwrap().as_str(),
            Some("/b")
        );
    }

    #[test]
    fn test_reject_policy() {
        let store = MetadataStore::with_config(RegistryConfig::new(OverwritePolicy::Reject));
        store.define(user(), Some("find"), "path", "/a").unwrap();
        let err = store.define(user(), Some("find"), "path", "/b").unwrap_err();

        assert!(matches!(err, ReframeError::DuplicateAnnotation { ref key, .. } if key == "path"));
        assert!(err.to_string().contains("UserController::find"));
        assert_eq!(
            store.get(user(), Some("find"), "path").unwrap().as_str(),
            Some("/a")
        );
    }

    #[test]
    fn test_delete() {
        let store = MetadataStore::new();
        store.define(user(), None, "prefix", "/api").unwrap();

        assert!(store.delete(user(), None, "prefix"));
        assert!(!store.delete(user(), None, "prefix"));
        assert!(store.get(user(), None, "prefix").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_last_key_forgets_member() {
        let store = MetadataStore::new();
        store.define(user(), Some("list"), "path", "/").unwrap();
        store.define(user(), Some("find"), "path", "/:id").unwrap();
        store.define(user(), Some("find"), "method", HttpMethod::Get).unwrap();
        store.seal(user(), "list");

        assert!(store.delete(user(), Some("find"), "path"));
        assert_eq!(store.members(user()), ["list", "find"]);

        assert!(store.delete(user(), Some("list"), "path"));
        assert_eq!(store.members(user()), ["find"]);
        assert!(!store.is_sealed(user(), "list"));
    }

    #[test]
    fn test_members_and_targets_keep_order() {
        let store = MetadataStore::new();
        store.define(user(), Some("list"), "path", "/").unwrap();
        store
            .define(TargetId::of::<OrderController>(), None, "prefix", "/orders")
            .unwrap();
        store.define(user(), Some("create"), "path", "/").unwrap();
        store.define(user(), Some("list"), "method", HttpMethod::Get).unwrap();

        assert_eq!(store.members(user()), ["list", "create"]);
        assert_eq!(
            store.targets(),
            [user(), TargetId::of::<OrderController>()]
        );
        assert!(store.members(TargetId::of::<OrderController>()).is_empty());
    }

    #[test]
    fn test_seal() {
        let store = MetadataStore::new();
        assert!(!store.is_sealed(user(), "create"));
        store.seal(user(), "create");
        assert!(store.is_sealed(user(), "create"));
        assert!(!store.is_sealed(user(), "list"));
    }
}
