//! # LaundryBot Resolver Integration Tests
//!
//! File: cli/tests/resolver.rs
//!
//! ## Overview
//!
//! Black-box tests of the resolver through its public API, using the
//! built-in catalog. Exact reply texts come from `assets/catalog.toml`.
//!

mod common;
use common::*;
use laundrybot::resolver::{Category, Resolver, ServiceKey};

const DEFAULT_REPLY: &str = "Maaf, kami belum mengerti pesan Anda. Coba ketik *layanan*, *harga*, atau *waktu*. Butuh bantuan? Hubungi 0812-3456-7890.";

#[test]
fn test_greeting_words_return_a_greeting() {
    let resolver = Resolver::new(builtin_catalog());
    let greetings = resolver.catalog().greetings().to_vec();

    for word in ["halo", "hi", "hai", "hello", "pagi", "siang", "sore", "malam"] {
        for message in [
            word.to_string(),
            format!("{} kak", word.to_uppercase()),
            format!("selamat {} semuanya", word),
        ] {
            let reply = resolver.resolve(&message);
            assert!(
                greetings.contains(&reply),
                "{:?} should be answered with a greeting, got {:?}",
                message,
                reply
            );
        }
    }
}

#[test]
fn test_each_greeting_can_be_chosen() {
    let catalog = builtin_catalog();
    for (i, greeting) in catalog.greetings().iter().enumerate() {
        assert_eq!(&pinned_resolver(i).resolve("halo"), greeting);
    }
}

#[test]
fn test_shoe_price_question() {
    let resolver = pinned_resolver(0);
    assert_eq!(
        resolver.resolve("Berapa harga cuci sepatu?"),
        "Harga Cuci Sepatu:\n- Sepatu kets: Rp35.000\n- Sepatu kulit: Rp45.000\nEstimasi selesai 3-4 hari kerja."
    );
}

#[test]
fn test_bed_linen_process_time_question() {
    let resolver = pinned_resolver(0);
    let resolution = resolver.explain("proses alas kasur berapa lama");
    assert_eq!(resolution.category, Some(Category::Time));
    assert_eq!(resolution.service, Some(ServiceKey::BedLinen));
    assert_eq!(
        resolution.reply,
        "Layanan Cuci Alas Kasur selesai dalam 2-3 hari kerja."
    );
}

#[test]
fn test_unknown_input_gets_default_reply() {
    let resolver = pinned_resolver(0);
    assert_eq!(resolver.resolve("asdf qwerty"), DEFAULT_REPLY);
    assert_eq!(resolver.resolve("tell me a joke"), DEFAULT_REPLY);
}

#[test]
fn test_empty_and_odd_input_never_panics() {
    let resolver = pinned_resolver(0);
    for message in ["", "   ", "\t\n", "🧺🧺", "ÅÄÖ ß", "\u{0}"] {
        assert_eq!(resolver.resolve(message), DEFAULT_REPLY, "input {:?}", message);
    }
}

#[test]
fn test_non_greeting_input_is_idempotent() {
    let resolver = Resolver::new(builtin_catalog());
    for message in [
        "Berapa harga cuci sepatu?",
        "layanan",
        "kapan selesai",
        "cuci",
        "asdf",
    ] {
        assert_eq!(resolver.resolve(message), resolver.resolve(message));
    }
}

#[test]
fn test_wash_and_iron_beats_generic_service_list() {
    let resolver = pinned_resolver(0);
    let resolution = resolver.explain("cuci setrika harga");
    assert_eq!(resolution.category, Some(Category::Service));
    assert_eq!(resolution.service, Some(ServiceKey::WashIron));
    assert_eq!(
        resolution.reply,
        "Layanan Cuci + Setrika:\n- Pakaian (per kg): Rp8.000\n- Jaket: Rp20.000\n- Selimut: Rp25.000"
    );
    assert_ne!(resolution.reply, resolver.catalog().responses().services_list);
}

#[test]
fn test_service_words_compete_by_word_order() {
    let resolver = pinned_resolver(0);
    let catalog = resolver.catalog();

    assert_eq!(resolver.resolve("cuci baju"), catalog.responses().services_list);
    assert_eq!(
        resolver.resolve("mau cuci sepatu"),
        catalog.service_responses(ServiceKey::ShoeWash).service
    );
    assert_eq!(resolver.explain("cuci halo").category, Some(Category::Service));
    assert_eq!(resolver.explain("halo kak cuci").category, Some(Category::Greeting));
    assert_eq!(
        resolver.resolve("kasur kotor"),
        catalog.service_responses(ServiceKey::BedLinen).service
    );
}

#[test]
fn test_specific_service_beats_generic_price_prompt() {
    let resolver = pinned_resolver(0);
    let catalog = resolver.catalog();
    assert_eq!(
        resolver.resolve("harga sepatu"),
        catalog.service_responses(ServiceKey::ShoeWash).price_detail
    );
    assert_eq!(resolver.resolve("harga"), catalog.responses().price_prompt);
    assert!(catalog.responses().price_prompt.contains("Cuci Alas Kasur"));
    assert!(catalog.responses().price_prompt.contains("0812-3456-7890"));
}

#[test]
fn test_suggestions_all_resolve() {
    let resolver = pinned_resolver(0);
    for suggestion in resolver.catalog().suggestions() {
        assert_ne!(resolver.resolve(suggestion), DEFAULT_REPLY, "{:?}", suggestion);
    }
}

#[test]
fn test_resolver_is_shareable_across_threads() {
    let resolver = std::sync::Arc::new(Resolver::new(builtin_catalog()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = resolver.clone();
            std::thread::spawn(move || resolver.resolve("harga sepatu"))
        })
        .collect();
    let expected = resolver.resolve("harga sepatu");
    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), expected);
    }
}
