//! Shared key/value store passed through one execution run.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

type Value = Box<dyn Any + Send + Sync>;

/// Mutable store shared by every state of a single `execute` call.
///
/// Values are arbitrary `'static` types; reads are typed and return `None`
/// when the key is missing or holds a value of a different type. The
/// machine never inspects the contents.
///
/// # Example
///
/// ```rust
/// use jugglebot_fsm::core::Blackboard;
///
/// let mut blackboard = Blackboard::new();
/// blackboard.insert("throw_height", 0.75_f64);
/// blackboard.insert("hand", String::from("left"));
///
/// assert_eq!(blackboard.get::<f64>("throw_height"), Some(&0.75));
/// assert_eq!(blackboard.get::<u32>("throw_height"), None);
///
/// if let Some(hand) = blackboard.get_mut::<String>("hand") {
///     hand.push_str("_hand");
/// }
/// assert_eq!(blackboard.get::<String>("hand").map(String::as_str), Some("left_hand"));
/// ```
#[derive(Default)]
pub struct Blackboard {
    entries: HashMap<String, Value>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`.
    ///
    /// Returns the replaced value if it had the same type `T`; a replaced
    /// value of another type is dropped.
    pub fn insert<T>(&mut self, key: impl Into<String>, value: T) -> Option<T>
    where
        T: Any + Send + Sync,
    {
        self.entries
            .insert(key.into(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key).and_then(|v| v.downcast_ref::<T>())
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.entries.get_mut(key).and_then(|v| v.downcast_mut::<T>())
    }

    /// Remove the entry under `key` if it holds a `T`.
    ///
    /// An entry of another type is left in place.
    pub fn remove<T: Any>(&mut self, key: &str) -> Option<T> {
        if !self.entries.get(key).is_some_and(|v| v.is::<T>()) {
            return None;
        }
        self.entries
            .remove(key)
            .and_then(|v| v.downcast::<T>().ok())
            .map(|v| *v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for Blackboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Blackboard").field("keys", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_returns_previous_value_of_same_type() {
        let mut bb = Blackboard::new();
        assert_eq!(bb.insert("count", 1_u32), None);
        assert_eq!(bb.insert("count", 2_u32), Some(1));
        assert_eq!(bb.get::<u32>("count"), Some(&2));
    }

    #[test]
    fn insert_over_different_type_replaces_silently() {
        let mut bb = Blackboard::new();
        bb.insert("value", 1_u32);
        assert_eq!(bb.insert("value", "one"), None);
        assert_eq!(bb.get::<&'static str>("value"), Some(&"one"));
        assert_eq!(bb.get::<u32>("value"), None);
    }

    #[test]
    fn remove_respects_type() {
        let mut bb = Blackboard::new();
        bb.insert("pose", [0.0_f32; 6]);

        assert_eq!(bb.remove::<f64>("pose"), None);
        assert!(bb.contains("pose"));

        assert_eq!(bb.remove::<[f32; 6]>("pose"), Some([0.0; 6]));
        assert!(!bb.contains("pose"));
        assert!(bb.is_empty());
    }

    #[test]
    fn debug_lists_sorted_keys_only() {
        let mut bb = Blackboard::new();
        bb.insert("z", 1_u8);
        bb.insert("a", 2_u8);
        assert_eq!(format!("{bb:?}"), r#"Blackboard { keys: ["a", "z"] }"#);
    }

    #[test]
    fn clear_empties_store() {
        let mut bb = Blackboard::new();
        bb.insert("a", 1_i32);
        bb.insert("b", 2_i32);
        assert_eq!(bb.len(), 2);
        bb.clear();
        assert!(bb.is_empty());
    }
}
