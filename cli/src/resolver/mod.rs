//! # LaundryBot Intent Resolver
//!
//! File: cli/src/resolver/mod.rs
//!
//! ## Overview
//!
//! Turns one free-text chat message into one canned reply from the catalog.
//! The resolver is total (every input gets a non-empty reply), holds no
//! per-conversation state, and is safe to share between threads.
//!
//! ## Resolution order
//!
//! 1. Trim and lower-case the message, split it on whitespace.
//! 2. The first word found in any keyword set picks the category.
//! 3. GREETING picks a random greeting through the `IndexSource`.
//! 4. SERVICE, PRICE and TIME run `SERVICE_RULES` against the whole message;
//!    the first matching rule names the service, otherwise the category's
//!    generic reply is used.
//! 5. With no categorised word, `EXACT_FALLBACKS` compare the whole message.
//! 6. Anything else gets the default help reply.
//!
//! ```rust,ignore
//! let resolver = Resolver::new(Arc::new(Catalog::builtin()?));
//! let reply = resolver.resolve("Berapa harga cuci sepatu?");
//! ```
//!
pub mod catalog;
pub mod random;

pub use catalog::{Catalog, Category, ServiceKey};
pub use random::{FixedIndex, IndexSource, SeededIndex, UniformIndex};

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Outcome of resolving one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Category of the first categorised word, if any.
    pub category: Option<Category>,
    /// Service the reply is about, if any.
    pub service: Option<ServiceKey>,
    pub reply: String,
}

/// A whole-message check that names a service. `trigger` is the word that picked the category.
struct ServiceRule {
    key: ServiceKey,
    matches: fn(message: &str, trigger: &str) -> bool,
}

fn mentions_wash_and_iron(message: &str, _trigger: &str) -> bool {
    message.contains("cuci") && message.contains("setrika")
}

fn mentions_shoes(message: &str, _trigger: &str) -> bool {
    message.contains("sepatu")
}

fn mentions_mattress(message: &str, _trigger: &str) -> bool {
    message.contains("kasur")
}

fn triggered_by_iron(_message: &str, trigger: &str) -> bool {
    trigger == "setrika"
}

/// Evaluated top to bottom; first match wins.
const SERVICE_RULES: &[ServiceRule] = &[
    ServiceRule {
        key: ServiceKey::WashIron,
        matches: mentions_wash_and_iron,
    },
    ServiceRule {
        key: ServiceKey::ShoeWash,
        matches: mentions_shoes,
    },
    ServiceRule {
        key: ServiceKey::BedLinen,
        matches: mentions_mattress,
    },
    ServiceRule {
        key: ServiceKey::IronOnly,
        matches: triggered_by_iron,
    },
];

#[derive(Debug, Clone, Copy)]
enum Fallback {
    WashHint,
    Service(ServiceKey),
}

/// Whole-message equality checks used when no word was categorised. With the
/// built-in keyword sets each of these words is already a SERVICE trigger.
const EXACT_FALLBACKS: &[(&str, Fallback)] = &[
    ("cuci", Fallback::WashHint),
    ("setrika", Fallback::Service(ServiceKey::IronOnly)),
    ("sepatu", Fallback::Service(ServiceKey::ShoeWash)),
    ("kasur", Fallback::Service(ServiceKey::BedLinen)),
];

/// Maps chat messages to catalog replies.
pub struct Resolver<S = UniformIndex> {
    catalog: Arc<Catalog>,
    picker: S,
}

impl Resolver<UniformIndex> {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_index_source(catalog, UniformIndex)
    }
}

impl<S: IndexSource> Resolver<S> {
    pub fn with_index_source(catalog: Arc<Catalog>, picker: S) -> Self {
        Self { catalog, picker }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the reply for `message`. Never empty, never fails.
    pub fn resolve(&self, message: &str) -> String {
        self.explain(message).reply
    }

    /// Like `resolve`, but also reports which category and service were chosen.
    pub fn explain(&self, message: &str) -> Resolution {
        let normalized = message.trim().to_lowercase();

        let triggered = normalized
            .split_whitespace()
            .find_map(|word| self.catalog.category_of(word).map(|c| (word, c)));

        let resolution = match triggered {
            Some((_, Category::Greeting)) => self.greet(),
            Some((word, category)) => self.resolve_category(category, &normalized, word),
            None => self.fallback(&normalized),
        };
        debug!(
            "Resolved {:?} -> category={:?} service={:?}",
            message, resolution.category, resolution.service
        );
        resolution
    }

    fn greet(&self) -> Resolution {
        let greetings = self.catalog.greetings();
        let index = self.picker.next_index(greetings.len());
        let reply = greetings
            .get(index)
            .or_else(|| greetings.first())
            .unwrap_or(&self.catalog.responses().default)
            .clone();
        Resolution {
            category: Some(Category::Greeting),
            service: None,
            reply,
        }
    }

    fn resolve_category(&self, category: Category, normalized: &str, trigger: &str) -> Resolution {
        let service = SERVICE_RULES
            .iter()
            .find(|rule| (rule.matches)(normalized, trigger))
            .map(|rule| rule.key);

        let responses = self.catalog.responses();
        let reply = match (category, service) {
            (Category::Greeting, _) => return self.greet(),
            (Category::Service, Some(key)) => &self.catalog.service_responses(key).service,
            (Category::Service, None) => &responses.services_list,
            (Category::Price, Some(key)) => &self.catalog.service_responses(key).price_detail,
            (Category::Price, None) => &responses.price_prompt,
            (Category::Time, Some(key)) => &self.catalog.service_responses(key).process_time,
            (Category::Time, None) => &responses.time_prompt,
        };
        Resolution {
            category: Some(category),
            service,
            reply: reply.clone(),
        }
    }

    fn fallback(&self, normalized: &str) -> Resolution {
        let matched = EXACT_FALLBACKS
            .iter()
            .find(|(word, _)| *word == normalized)
            .map(|(_, fallback)| *fallback);

        let (service, reply) = match matched {
            Some(Fallback::WashHint) => (None, &self.catalog.responses().wash_hint),
            Some(Fallback::Service(key)) => {
                (Some(key), &self.catalog.service_responses(key).service)
            }
            None => (None, &self.catalog.responses().default),
        };
        Resolution {
            category: None,
            service,
            reply: reply.clone(),
        }
    }
}
