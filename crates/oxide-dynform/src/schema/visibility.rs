//! Visibility conditions for fields and options.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

/// Whether a field or option is rendered.
///
/// Predicates take no arguments; a predicate that depends on another field's
/// value captures that value when the schema is derived.
#[derive(Clone, Default)]
pub enum Visibility {
    /// Always rendered.
    #[default]
    Always,
    /// Never rendered.
    Never,
    /// Rendered when the predicate returns `true` at evaluation time.
    Predicate(Arc<dyn Fn() -> bool + Send + Sync>),
}

impl Visibility {
    /// Creates a predicate visibility.
    pub fn when(predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    /// Evaluates the condition.
    pub fn is_visible(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Predicate(predicate) => predicate(),
        }
    }
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Self::Always
        } else {
            Self::Never
        }
    }
}

impl From<Option<bool>> for Visibility {
    fn from(visible: Option<bool>) -> Self {
        visible.map_or(Self::Always, Self::from)
    }
}

impl fmt::Debug for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for Visibility {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Self::from)
    }
}

/// Anything carrying a visibility condition.
pub trait Conditional {
    /// Returns the item's visibility.
    fn visibility(&self) -> &Visibility;
}

/// Returns whether an item should be included.
pub fn is_rendered<T: Conditional + ?Sized>(item: &T) -> bool {
    item.visibility().is_visible()
}

/// Iterates over the items of a list that should be included.
pub fn filter_visible<'a, T: Conditional>(
    items: impl IntoIterator<Item = &'a T>,
) -> impl Iterator<Item = &'a T>
where
    T: 'a,
{
    items.into_iter().filter(|item| is_rendered(*item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Item(Visibility);

    impl Conditional for Item {
        fn visibility(&self) -> &Visibility {
            &self.0
        }
    }

    #[test]
    fn test_literal_visibility() {
        assert!(Visibility::default().is_visible());
        assert!(Visibility::from(true).is_visible());
        assert!(!Visibility::from(false).is_visible());
        assert!(Visibility::from(None).is_visible());
    }

    #[test]
    fn test_predicate_is_evaluated_each_time() {
        let flag = Arc::new(AtomicBool::new(false));
        let seen = Arc::clone(&flag);
        let visibility = Visibility::when(move || seen.load(Ordering::SeqCst));

        assert!(!visibility.is_visible());
        flag.store(true, Ordering::SeqCst);
        assert!(visibility.is_visible());
    }

    #[test]
    fn test_filter_visible() {
        let items = vec![
            Item(Visibility::Always),
            Item(Visibility::Never),
            Item(Visibility::when(|| true)),
            Item(Visibility::when(|| false)),
        ];
        assert_eq!(filter_visible(&items).count(), 2);
    }

    #[test]
    fn test_deserialize() {
        let v: Visibility = serde_json::from_str("false").unwrap();
        assert!(!v.is_visible());
        let v: Visibility = serde_json::from_str("null").unwrap();
        assert!(v.is_visible());
    }
}
