//! Character trie used to complete location names.

use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
struct TrieNode {
    is_key: bool,
    children: BTreeMap<char, TrieNode>,
}

/// Set of strings supporting prefix enumeration.
///
/// Children are kept in character order, so enumeration returns keys in
/// lexicographic order without a separate sort.
///
/// # Examples
/// ```
/// use wayfinder_core::PrefixIndex;
///
/// let mut index = PrefixIndex::new();
/// for key in ["sam", "sad", "sap", "same", "a", "awls"] {
///     index.add(key);
/// }
/// assert_eq!(index.keys_with_prefix("sa"), ["sad", "sam", "same", "sap"]);
/// assert_eq!(index.longest_prefix_of("sample").as_deref(), Some("sam"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PrefixIndex {
    root: TrieNode,
    len: usize,
}

impl PrefixIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.len }

    /// Returns whether no keys are stored.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.len = 0;
    }

    /// Stores `key`. Empty keys are ignored.
    pub fn add(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        let node = key
            .chars()
            .fold(&mut self.root, |node, ch| node.children.entry(ch).or_default());
        if !node.is_key {
            node.is_key = true;
            self.len += 1;
        }
    }

    /// Returns whether `key` was stored. Always `false` for an empty key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        !key.is_empty() && self.find(key).is_some_and(|node| node.is_key)
    }

    /// Returns every stored key starting with `prefix`, in lexicographic
    /// order. An empty prefix matches nothing.
    #[must_use]
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys = Vec::new();
        if prefix.is_empty() {
            return keys;
        }
        let Some(start) = self.find(prefix) else {
            return keys;
        };

        let mut stack = vec![(start, prefix.to_owned())];
        while let Some((node, key)) = stack.pop() {
            if node.is_key {
                keys.push(key.clone());
            }
            // Reversed so the smallest character is popped first.
            for (ch, child) in node.children.iter().rev() {
                let mut next = key.clone();
                next.push(*ch);
                stack.push((child, next));
            }
        }
        keys
    }

    /// Returns the longest stored key that is a prefix of `query`.
    #[must_use]
    pub fn longest_prefix_of(&self, query: &str) -> Option<String> {
        let mut node = &self.root;
        let mut longest = None;
        for (offset, ch) in query.char_indices() {
            let Some(child) = node.children.get(&ch) else {
                break;
            };
            node = child;
            if node.is_key {
                longest = Some(offset + ch.len_utf8());
            }
        }
        longest.and_then(|end| query.get(..end)).map(str::to_owned)
    }

    fn find(&self, key: &str) -> Option<&TrieNode> {
        key.chars()
            .try_fold(&self.root, |node, ch| node.children.get(&ch))
    }
}

impl<'a> Extend<&'a str> for PrefixIndex {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, keys: I) {
        for key in keys {
            self.add(key);
        }
    }
}

impl<'a> FromIterator<&'a str> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = &'a str>>(keys: I) -> Self {
        let mut index = Self::new();
        index.extend(keys);
        index
    }
}
