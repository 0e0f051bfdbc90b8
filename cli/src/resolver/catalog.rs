//! # LaundryBot Catalog
//!
//! File: cli/src/resolver/catalog.rs
//!
//! ## Overview
//!
//! The catalog is the immutable reference data the resolver reads: one entry
//! per laundry service (price table and process time), the four keyword sets,
//! and the response templates. It is built once at startup from a TOML
//! artifact (the one embedded in the binary, or a file named in the
//! configuration) and then shared by reference.
//!
//! ## Loading
//!
//! 1. Parse the TOML into the raw file model.
//! 2. Apply contact/WhatsApp overrides from the configuration.
//! 3. Validate: every service key exactly once, non-empty price tables,
//!    non-empty greetings, lower-case single-word keywords.
//! 4. Render every template with Tera so that resolving a message is a pure
//!    lookup. A template that renders to blank text is rejected.
//!
//! A word may sit in more than one keyword set; `category_of` then answers
//! with the first set in `Category::PRIORITY` order.
//!
//! ```rust,ignore
//! let catalog = Catalog::load(&config.assistant)?;
//! let shoe = catalog.service(ServiceKey::ShoeWash);
//! println!("{} takes {}", shoe.display_name, shoe.process_time_text);
//! ```
//!
use crate::core::config::AssistantConfig;
use crate::core::error::{LaundryError, Result};
use crate::core::templating::render_template;
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// The catalog artifact compiled into the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.toml");

/// Identifies which laundry offering a response pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKey {
    WashIron,
    IronOnly,
    ShoeWash,
    BedLinen,
}

impl ServiceKey {
    /// All keys, in catalog display order.
    pub const ALL: [ServiceKey; 4] = [
        ServiceKey::WashIron,
        ServiceKey::IronOnly,
        ServiceKey::ShoeWash,
        ServiceKey::BedLinen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKey::WashIron => "wash_iron",
            ServiceKey::IronOnly => "iron_only",
            ServiceKey::ShoeWash => "shoe_wash",
            ServiceKey::BedLinen => "bed_linen",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKey {
    type Err = LaundryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ServiceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| LaundryError::InvalidServiceKey { key: s.to_string() })
    }
}

/// The coarse intent bucket a message is routed to.
///
/// Declaration order is the tie-break priority when one word sits in several sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Greeting,
    Service,
    Price,
    Time,
}

impl Category {
    pub const PRIORITY: [Category; 4] = [
        Category::Greeting,
        Category::Service,
        Category::Price,
        Category::Time,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Greeting => "greeting",
            Category::Service => "service",
            Category::Price => "price",
            Category::Time => "time",
        };
        f.write_str(name)
    }
}

/// One line of a service's price table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceItem {
    pub item: String,
    /// Price in rupiah.
    pub price: u32,
}

/// A laundry service as offered to customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCatalogEntry {
    pub key: ServiceKey,
    pub display_name: String,
    pub price_table: Vec<PriceItem>,
    pub process_time_text: String,
}

/// Trigger words for one category.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    pub category: Category,
    words: HashSet<String>,
}

impl KeywordSet {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Rendered replies tied to one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponses {
    /// SERVICE-category reply: the service and its prices.
    pub service: String,
    /// PRICE-category reply: prices plus process time.
    pub price_detail: String,
    /// TIME-category reply.
    pub process_time: String,
}

/// Rendered replies not tied to a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responses {
    pub greetings: Vec<String>,
    pub services_list: String,
    pub price_prompt: String,
    pub time_prompt: String,
    pub wash_hint: String,
    pub default: String,
}

/// Immutable reference data for the resolver.
#[derive(Debug, Clone)]
pub struct Catalog {
    support_contact: String,
    whatsapp_number: String,
    suggestions: Vec<String>,
    keyword_sets: Vec<KeywordSet>,
    services: Vec<ServiceCatalogEntry>,
    service_responses: Vec<ServiceResponses>,
    responses: Responses,
}

// --- Raw file model ---

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    support_contact: String,
    whatsapp_number: String,
    #[serde(default)]
    suggestions: Vec<String>,
    keywords: KeywordsFile,
    services: Vec<ServiceFile>,
    templates: TemplatesFile,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct KeywordsFile {
    greeting: Vec<String>,
    service: Vec<String>,
    price: Vec<String>,
    time: Vec<String>,
}

impl KeywordsFile {
    fn words_for(&self, category: Category) -> &[String] {
        match category {
            Category::Greeting => &self.greeting,
            Category::Service => &self.service,
            Category::Price => &self.price,
            Category::Time => &self.time,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ServiceFile {
    key: ServiceKey,
    display_name: String,
    process_time: String,
    prices: Vec<PriceItem>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TemplatesFile {
    greetings: Vec<String>,
    service: String,
    price_detail: String,
    process_time: String,
    services_list: String,
    price_prompt: String,
    time_prompt: String,
    wash_hint: String,
    default: String,
}

impl Catalog {
    /// Builds the catalog embedded in the binary, without overrides.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG, &AssistantConfig::default())
            .context("Failed to build the built-in catalog")
    }

    /// Builds the catalog named by the configuration, or the built-in one.
    pub fn load(assistant: &AssistantConfig) -> Result<Self> {
        match &assistant.catalog_path {
            Some(path) => Self::from_path(Path::new(path), assistant),
            None => {
                info!("Using built-in catalog");
                Self::from_toml_str(BUILTIN_CATALOG, assistant)
                    .context("Failed to build the built-in catalog")
            }
        }
    }

    pub fn from_path(path: &Path, overrides: &AssistantConfig) -> Result<Self> {
        info!("Loading catalog from: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        Self::from_toml_str(&content, overrides)
            .with_context(|| format!("Invalid catalog file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str, overrides: &AssistantConfig) -> Result<Self> {
        let mut file: CatalogFile =
            toml::from_str(content).context("Failed to parse catalog TOML")?;
        if let Some(contact) = &overrides.contact {
            file.support_contact = contact.clone();
        }
        if let Some(number) = &overrides.whatsapp_number {
            file.whatsapp_number = number.clone();
        }
        validate_catalog(&file)?;
        build_catalog(file)
    }

    pub fn support_contact(&self) -> &str {
        &self.support_contact
    }

    pub fn whatsapp_link(&self) -> String {
        format!("https://wa.me/{}", self.whatsapp_number)
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn services(&self) -> &[ServiceCatalogEntry] {
        &self.services
    }

    pub fn service(&self, key: ServiceKey) -> &ServiceCatalogEntry {
        &self.services[key.index()]
    }

    pub fn service_responses(&self, key: ServiceKey) -> &ServiceResponses {
        &self.service_responses[key.index()]
    }

    pub fn responses(&self) -> &Responses {
        &self.responses
    }

    pub fn greetings(&self) -> &[String] {
        &self.responses.greetings
    }

    /// Category of a single normalized word, honouring category priority.
    pub fn category_of(&self, word: &str) -> Option<Category> {
        self.keyword_sets
            .iter()
            .find(|set| set.contains(word))
            .map(|set| set.category)
    }
}

/// Formats an amount as `Rp8.000`.
pub fn format_rupiah(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp{}", grouped)
}

/// One `- item: price` line per entry.
pub fn format_price_table(items: &[PriceItem]) -> String {
    items
        .iter()
        .map(|p| format!("- {}: {}", p.item, format_rupiah(p.price)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn catalog_error(message: String) -> anyhow::Error {
    anyhow!(LaundryError::Catalog(message))
}

fn validate_catalog(file: &CatalogFile) -> Result<()> {
    if file.support_contact.trim().is_empty() {
        return Err(catalog_error("support_contact cannot be empty.".into()));
    }
    if file.whatsapp_number.is_empty()
        || !file.whatsapp_number.chars().all(|c| c.is_ascii_digit())
    {
        return Err(catalog_error(format!(
            "whatsapp_number '{}' must contain digits only.",
            file.whatsapp_number
        )));
    }

    for key in ServiceKey::ALL {
        let count = file.services.iter().filter(|s| s.key == key).count();
        if count != 1 {
            return Err(catalog_error(format!(
                "Service '{}' must appear exactly once (found {}).",
                key, count
            )));
        }
    }
    for service in &file.services {
        if service.prices.is_empty() {
            return Err(catalog_error(format!(
                "Service '{}' has an empty price table.",
                service.key
            )));
        }
        if service.display_name.trim().is_empty() {
            return Err(catalog_error(format!(
                "Service '{}' has no display name.",
                service.key
            )));
        }
    }

    if file.templates.greetings.is_empty() {
        return Err(catalog_error("At least one greeting template is required.".into()));
    }

    let mut owner: HashMap<&str, Category> = HashMap::new();
    for category in Category::PRIORITY {
        let words = file.keywords.words_for(category);
        if words.is_empty() {
            return Err(catalog_error(format!(
                "Keyword set '{}' cannot be empty.",
                category
            )));
        }
        for word in words {
            if word.is_empty() || word.chars().any(char::is_whitespace) {
                return Err(catalog_error(format!(
                    "Keyword '{}' in set '{}' must be a single word.",
                    word, category
                )));
            }
            if *word != word.to_lowercase() {
                return Err(catalog_error(format!(
                    "Keyword '{}' in set '{}' must be lower-case.",
                    word, category
                )));
            }
            if let Some(previous) = owner.get(word.as_str()) {
                if *previous != category {
                    warn!(
                        "Keyword '{}' appears in both '{}' and '{}' sets; '{}' takes priority.",
                        word, previous, category, previous
                    );
                }
                continue;
            }
            owner.insert(word.as_str(), category);
        }
    }
    Ok(())
}

/// Renders one reply template, rejecting blank output.
fn render_reply(name: &str, template: &str, context: &HashMap<String, String>) -> Result<String> {
    let rendered = render_template(name, template, context)?;
    if rendered.trim().is_empty() {
        return Err(catalog_error(format!(
            "Template '{}' renders to an empty reply.",
            name
        )));
    }
    Ok(rendered)
}

fn build_catalog(file: CatalogFile) -> Result<Catalog> {
    let CatalogFile {
        support_contact,
        whatsapp_number,
        suggestions,
        keywords,
        mut services,
        templates,
    } = file;

    let keyword_sets = Category::PRIORITY
        .into_iter()
        .map(|category| KeywordSet {
            category,
            words: keywords.words_for(category).iter().cloned().collect(),
        })
        .collect();

    services.sort_by_key(|s| s.key.index());
    let services: Vec<ServiceCatalogEntry> = services
        .into_iter()
        .map(|s| ServiceCatalogEntry {
            key: s.key,
            display_name: s.display_name,
            price_table: s.prices,
            process_time_text: s.process_time,
        })
        .collect();

    let mut base_context = HashMap::new();
    base_context.insert("contact".to_string(), support_contact.clone());
    base_context.insert(
        "whatsapp".to_string(),
        format!("https://wa.me/{}", whatsapp_number),
    );
    base_context.insert(
        "services".to_string(),
        services
            .iter()
            .map(|s| format!("- {}", s.display_name))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    let mut service_responses = Vec::with_capacity(services.len());
    for entry in &services {
        let mut context = base_context.clone();
        context.insert("name".to_string(), entry.display_name.clone());
        context.insert("prices".to_string(), format_price_table(&entry.price_table));
        context.insert("process_time".to_string(), entry.process_time_text.clone());
        service_responses.push(ServiceResponses {
            service: render_reply("service", &templates.service, &context)?,
            price_detail: render_reply("price_detail", &templates.price_detail, &context)?,
            process_time: render_reply("process_time", &templates.process_time, &context)?,
        });
        debug!("Rendered responses for service '{}'", entry.key);
    }

    let greetings = templates
        .greetings
        .iter()
        .enumerate()
        .map(|(i, g)| render_reply(&format!("greetings[{}]", i), g, &base_context))
        .collect::<Result<Vec<_>>>()?;

    let responses = Responses {
        greetings,
        services_list: render_reply("services_list", &templates.services_list, &base_context)?,
        price_prompt: render_reply("price_prompt", &templates.price_prompt, &base_context)?,
        time_prompt: render_reply("time_prompt", &templates.time_prompt, &base_context)?,
        wash_hint: render_reply("wash_hint", &templates.wash_hint, &base_context)?,
        default: render_reply("default", &templates.default, &base_context)?,
    };

    info!(
        "Catalog ready: {} services, {} greetings, {} suggestions",
        services.len(),
        responses.greetings.len(),
        suggestions.len()
    );

    Ok(Catalog {
        support_contact,
        whatsapp_number,
        suggestions,
        keyword_sets,
        services,
        service_responses,
        responses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().expect("built-in catalog must be valid");
        assert_eq!(catalog.services().len(), 4);
        for key in ServiceKey::ALL {
            assert_eq!(catalog.service(key).key, key);
        }
        assert_eq!(catalog.greetings().len(), 3);
        assert_eq!(catalog.support_contact(), "0812-3456-7890");
        assert_eq!(catalog.whatsapp_link(), "https://wa.me/6281234567890");
    }

    #[test]
    fn test_builtin_rendered_texts() {
        let catalog = Catalog::builtin().unwrap();
        let shoe = catalog.service_responses(ServiceKey::ShoeWash);
        assert_eq!(
            shoe.price_detail,
            "Harga Cuci Sepatu:\n- Sepatu kets: Rp35.000\n- Sepatu kulit: Rp45.000\nEstimasi selesai 3-4 hari kerja."
        );
        assert_eq!(
            catalog.service_responses(ServiceKey::BedLinen).process_time,
            "Layanan Cuci Alas Kasur selesai dalam 2-3 hari kerja."
        );
        assert!(catalog.responses().price_prompt.contains("- Setrika Saja"));
        assert!(catalog.responses().price_prompt.contains("0812-3456-7890"));
    }

    #[test]
    fn test_category_of() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.category_of("halo"), Some(Category::Greeting));
        assert_eq!(catalog.category_of("setrika"), Some(Category::Service));
        assert_eq!(catalog.category_of("harga"), Some(Category::Price));
        assert_eq!(catalog.category_of("lama"), Some(Category::Time));
        for word in ["cuci", "sepatu", "kasur"] {
            assert_eq!(catalog.category_of(word), Some(Category::Service), "{}", word);
        }
        assert_eq!(catalog.category_of("berapa"), None);
        assert_eq!(catalog.category_of("Halo"), None); // Callers normalize first
    }

    #[test]
    fn test_overrides_apply_to_rendered_texts() {
        let overrides = AssistantConfig {
            contact: Some("0899-1111-2222".into()),
            whatsapp_number: Some("628991111222".into()),
            catalog_path: None,
        };
        let catalog = Catalog::from_toml_str(BUILTIN_CATALOG, &overrides).unwrap();
        assert!(catalog.responses().default.contains("0899-1111-2222"));
        assert_eq!(catalog.whatsapp_link(), "https://wa.me/628991111222");
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0), "Rp0");
        assert_eq!(format_rupiah(500), "Rp500");
        assert_eq!(format_rupiah(8000), "Rp8.000");
        assert_eq!(format_rupiah(150000), "Rp150.000");
        assert_eq!(format_rupiah(1500000), "Rp1.500.000");
    }

    #[test]
    fn test_service_key_from_str() {
        assert_eq!("shoe_wash".parse::<ServiceKey>().unwrap(), ServiceKey::ShoeWash);
        assert_eq!(" BED_LINEN ".parse::<ServiceKey>().unwrap(), ServiceKey::BedLinen);
        assert!("dry_clean".parse::<ServiceKey>().is_err());
    }

    fn builtin_with(find: &str, replace: &str) -> String {
        assert!(BUILTIN_CATALOG.contains(find), "fixture text not found: {}", find);
        BUILTIN_CATALOG.replacen(find, replace, 1)
    }

    #[test]
    fn test_shared_keyword_follows_category_priority() {
        let content = builtin_with(
            r#"price = ["harga","#,
            r#"price = ["halo", "sepatu", "harga","#,
        );
        let catalog = Catalog::from_toml_str(&content, &AssistantConfig::default()).unwrap();
        assert_eq!(catalog.category_of("halo"), Some(Category::Greeting));
        assert_eq!(catalog.category_of("sepatu"), Some(Category::Service));
        assert_eq!(catalog.category_of("harga"), Some(Category::Price));
    }

    #[test]
    fn test_rejects_upper_case_keyword() {
        let content = builtin_with(r#"time = ["lama","#, r#"time = ["Lama","#);
        let err = Catalog::from_toml_str(&content, &AssistantConfig::default()).unwrap_err();
        assert!(err.to_string().contains("lower-case"));
    }

    #[test]
    fn test_rejects_missing_service() {
        let content = builtin_with(r#"key = "bed_linen""#, r#"key = "shoe_wash""#);
        let err = Catalog::from_toml_str(&content, &AssistantConfig::default()).unwrap_err();
        assert!(err.to_string().contains("exactly once"));
    }

    #[test]
    fn test_rejects_broken_template() {
        let content = builtin_with(
            r#"process_time = "Layanan {{ name }} selesai"#,
            r#"process_time = "Layanan {{ name selesai"#,
        );
        let err = Catalog::from_toml_str(&content, &AssistantConfig::default()).unwrap_err();
        assert!(format!("{:?}", err).contains("Tera rendering failed"));
    }

    #[test]
    fn test_rejects_blank_rendered_reply() {
        let default_line = BUILTIN_CATALOG
            .lines()
            .find(|line| line.starts_with("default = "))
            .unwrap();
        let content = builtin_with(default_line, r#"default = "   ""#);
        let err = Catalog::from_toml_str(&content, &AssistantConfig::default()).unwrap_err();
        assert!(err
            .to_string()
            .contains("Template 'default' renders to an empty reply"));

        let content = builtin_with(
            r#""Halo kak! Silakan tanya soal layanan, harga, atau waktu proses ya.""#,
            r#""{% if false %}tidak pernah{% endif %}""#,
        );
        let err = Catalog::from_toml_str(&content, &AssistantConfig::default()).unwrap_err();
        assert!(err.to_string().contains("greetings[2]"));
    }
}
