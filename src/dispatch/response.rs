//! Response resolution: intent tag → one of its response variants.

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::content::ResponseCatalog;
use crate::error::Result;

/// Picks response variants uniformly at random.
#[derive(Debug)]
pub struct ResponseResolver {
    catalog: ResponseCatalog,
    rng: Mutex<StdRng>,
    unknown_tag: String,
}

impl ResponseResolver {
    /// Create a resolver. A seed makes every choice reproducible.
    pub fn new<S: Into<String>>(catalog: ResponseCatalog, unknown_tag: S, seed: Option<u64>) -> Self {
        ResponseResolver {
            catalog,
            rng: Mutex::new(StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))),
            unknown_tag: unknown_tag.into(),
        }
    }

    /// Pick one item uniformly at random.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        let mut rng = self.rng.lock();
        items.choose(&mut *rng)
    }

    /// A response for `tag`, or the apology text when the tag is unknown.
    ///
    /// Fails only when the catalog itself cannot be loaded.
    pub fn resolve(&self, tag: &str) -> Result<String> {
        let catalog = self.catalog.get()?;
        let response = catalog
            .responses(tag)
            .and_then(|variants| self.pick(variants))
            .cloned()
            .unwrap_or_else(|| self.unknown_tag.clone());
        Ok(response)
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::content::IntentCatalog;

    const INTENTS: &str = r#"{"intents": [
        {"tag": "greeting", "responses": ["Hello!", "Hi there!", "Hey!"]},
        {"tag": "goodbye", "responses": ["Take care."]}
    ]}"#;

    fn resolver(seed: u64) -> ResponseResolver {
        let catalog = ResponseCatalog::preloaded(IntentCatalog::from_json(INTENTS).unwrap());
        ResponseResolver::new(catalog, "I'm sorry, I didn't quite understand that.", Some(seed))
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            resolver(1).resolve("weather").unwrap(),
            "I'm sorry, I didn't quite understand that."
        );
    }

    #[test]
    fn test_single_variant() {
        assert_eq!(resolver(1).resolve("goodbye").unwrap(), "Take care.");
    }

    #[test]
    fn test_seeded_choices_repeat() {
        let a = resolver(42);
        let b = resolver(42);
        for _ in 0..20 {
            assert_eq!(a.resolve("greeting").unwrap(), b.resolve("greeting").unwrap());
        }
    }

    #[test]
    fn test_every_variant_is_reachable() {
        let resolver = resolver(7);
        let seen: HashSet<String> = (0..200)
            .map(|_| resolver.resolve("greeting").unwrap())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_pick_empty() {
        let empty: [u8; 0] = [];
        assert!(resolver(1).pick(&empty).is_none());
    }
}
