use std::collections::HashMap;

/// Assigns stable, per-class sequential indices to extracted artifacts.
///
/// Counters start at zero and the first call for a class returns 1, so the
/// first extracted chair becomes `chair_1`. A registry is owned by exactly one
/// pipeline run; construct a fresh one per run so identities never leak
/// across unrelated images.
#[derive(Debug, Default)]
pub struct NamingRegistry {
    counters: HashMap<String, u32>,
}

impl NamingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next 1-based index for `class_name`, advancing its counter.
    pub fn next(&mut self, class_name: &str) -> u32 {
        let counter = self.counters.entry(class_name.to_owned()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Indices handed out so far for `class_name`.
    pub fn count(&self, class_name: &str) -> u32 {
        self.counters.get(class_name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_sequential_per_class() {
        let mut registry = NamingRegistry::new();
        assert_eq!(registry.next("chair"), 1);
        assert_eq!(registry.next("chair"), 2);
        assert_eq!(registry.next("chair"), 3);
    }

    #[test]
    fn classes_count_independently() {
        let mut registry = NamingRegistry::new();
        assert_eq!(registry.next("chair"), 1);
        assert_eq!(registry.next("couch"), 1);
        assert_eq!(registry.next("chair"), 2);
        assert_eq!(registry.count("chair"), 2);
        assert_eq!(registry.count("couch"), 1);
        assert_eq!(registry.count("bed"), 0);
    }

    #[test]
    fn fresh_registries_start_from_one() {
        let mut first = NamingRegistry::new();
        first.next("chair");
        first.next("chair");

        let mut second = NamingRegistry::new();
        assert_eq!(second.next("chair"), 1);
    }
}
