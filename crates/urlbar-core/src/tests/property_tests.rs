//! Property-based tests for store and completion invariants

use super::fixtures::*;
use crate::Error;
use crate::config::CompletionConfig;
use crate::domains::{DomainStore, MemoryBackend};
use proptest::prelude::*;
use urlbar_types::{CompletionSource, DomainEntry, strip_prefix_ignore_case};

fn arb_domain() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9]{1,12}\\.(com|org|net|dev)")
        .unwrap()
        .boxed()
}

fn arb_domains() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(arb_domain(), 1..8)
}

proptest! {
    #[test]
    fn prefix_of_enabled_entry_completes(
        domains in arb_domains(),
        pick in any::<prop::sample::Index>(),
        cut in 1usize..20,
        upper in any::<bool>(),
    ) {
        let refs: Vec<&str> = domains.iter().map(String::as_str).collect();
        let store = make_store(true, &refs);
        let provider = make_provider(store.clone(), CompletionConfig::default());

        let entries = store.list();
        let target = pick.get(&entries).as_str();
        let cut = cut.min(target.len());
        let prefix = if upper { target[..cut].to_uppercase() } else { target[..cut].to_string() };

        let result = provider.complete(&prefix).expect("a prefix of an entry must complete");
        match result.source {
            CompletionSource::Builtin => {}
            CompletionSource::Custom => {
                let first = entries
                    .iter()
                    .find(|e| strip_prefix_ignore_case(e.as_str(), &prefix).is_some())
                    .unwrap();
                prop_assert_eq!(result.completion.as_str(), first.as_str());
            }
        }
        prop_assert!(strip_prefix_ignore_case(&result.completion, &prefix).is_some());
    }

    #[test]
    fn urls_with_scheme_never_complete(
        domains in arb_domains(),
        scheme in prop_oneof![Just("http"), Just("https"), Just("ftp"), Just("HTTP")],
        pick in any::<prop::sample::Index>(),
    ) {
        let refs: Vec<&str> = domains.iter().map(String::as_str).collect();
        let provider = make_provider(make_store(true, &refs), CompletionConfig::default());

        let target = pick.get(&domains);
        let url = format!("{scheme}://{target}");
        prop_assert!(provider.complete(&url).is_none());
    }

    #[test]
    fn second_add_is_duplicate(domain in arb_domain(), upper in any::<bool>()) {
        let store = DomainStore::open(MemoryBackend::new()).unwrap();
        store.add(&domain).unwrap();

        let again = if upper { domain.to_uppercase() } else { format!("https://{domain}/") };
        let err = store.add(&again).unwrap_err();

        prop_assert!(matches!(err, Error::Duplicate(_)));
        prop_assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_then_remove_round_trips(existing in arb_domains(), extra in arb_domain()) {
        let refs: Vec<&str> = existing.iter().map(String::as_str).collect();
        let store = make_store(true, &refs);
        prop_assume!(!store.list().contains(&DomainEntry::parse(&extra).unwrap()));
        let before = store.snapshot();

        let added = store.add(&extra).unwrap();
        store.remove(&added).unwrap();

        prop_assert_eq!(&*store.snapshot(), &*before);
    }

    #[test]
    fn disabling_hides_only_custom_matches(
        domains in arb_domains(),
        prefix in "[a-z0-9]{1,4}",
    ) {
        let refs: Vec<&str> = domains.iter().map(String::as_str).collect();
        let store = make_store(true, &refs);
        let provider = make_provider(store.clone(), CompletionConfig::default());

        let enabled = provider.complete(&prefix);
        store.set_enabled(false).unwrap();
        let disabled = provider.complete(&prefix);
        store.set_enabled(true).unwrap();
        let restored = provider.complete(&prefix);

        match &enabled {
            Some(r) if r.source == CompletionSource::Builtin => prop_assert_eq!(&disabled, &enabled),
            _ => prop_assert!(disabled.is_none()),
        }
        prop_assert_eq!(restored, enabled);
    }
}
