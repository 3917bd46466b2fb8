//! Read-only key lookup over the tag containers callers tend to have.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A way's tag set, viewed as `key -> value`.
pub trait Tags {
    /// Value of `key`, or `None` if the tag is absent.
    fn tag(&self, key: &str) -> Option<&str>;

    #[inline]
    fn has_tag(&self, key: &str) -> bool {
        self.tag(key).is_some()
    }
}

impl<K, V, S> Tags for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key).map(|v| v.as_ref())
    }
}

impl<K, V> Tags for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key).map(|v| v.as_ref())
    }
}

/// Linear scan; OSM ways rarely carry more than a dozen tags.
/// The first matching key wins.
impl<K, V> Tags for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn tag(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl<K, V> Tags for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn tag(&self, key: &str) -> Option<&str> {
        self.as_slice().tag(key)
    }
}

impl<K, V, const N: usize> Tags for [(K, V); N]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn tag(&self, key: &str) -> Option<&str> {
        self.as_slice().tag(key)
    }
}
