//! Translation registry: concurrent map from language code to language pack.
//!
//! Any number of readers resolve packs concurrently while registrations take a
//! short exclusive lock. Packs are stored behind `Arc` and replaced whole, so a
//! reader holding a resolved pack keeps a consistent snapshot even if the
//! language is re-registered afterwards.

use crate::error::{PackError, SourceError};
use crate::i18n::defaults;
use crate::i18n::language::LanguageCode;
use crate::i18n::metrics::TranslationMetrics;
use crate::i18n::pack::{Bucket, ErrorEntry, LanguagePack};
use crate::i18n::source::PackSource;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Registry of language packs with a guaranteed fallback language.
pub struct TranslationRegistry {
    languages: RwLock<HashMap<LanguageCode, Arc<LanguagePack>>>,
    fallback: LanguageCode,
    metrics: TranslationMetrics,
}

impl TranslationRegistry {
    /// Create a registry seeded with the bundled English pack as fallback.
    pub fn new() -> Self {
        let fallback = LanguageCode::fallback();
        let mut languages = HashMap::new();
        languages.insert(fallback.clone(), Arc::new(defaults::english()));

        Self {
            languages: RwLock::new(languages),
            fallback,
            metrics: TranslationMetrics::new(),
        }
    }

    /// Create a registry seeded with every bundled pack.
    pub fn bundled() -> Self {
        let registry = Self::new();
        for (code, pack) in defaults::bundled() {
            if let Err(e) = registry.register(code, pack) {
                warn!("Bundled language pack '{}' rejected: {}", code, e);
            }
        }
        registry
    }

    /// Create a registry with a custom fallback language and pack.
    pub fn with_fallback(code: &str, pack: LanguagePack) -> Result<Self, PackError> {
        let fallback = LanguageCode::parse(code)?;
        pack.validate()?;
        warn_if_incomplete(&fallback, &pack);

        let mut languages = HashMap::new();
        languages.insert(fallback.clone(), Arc::new(pack));

        Ok(Self {
            languages: RwLock::new(languages),
            fallback,
            metrics: TranslationMetrics::new(),
        })
    }

    /// Resolve the pack for a language, falling back to the default language.
    ///
    /// Never fails: unknown or malformed codes resolve to the fallback pack.
    pub fn resolve(&self, code: &str) -> Arc<LanguagePack> {
        self.metrics.record_resolve();

        let languages = self.read();
        if let Some(pack) = LanguageCode::parse(code)
            .ok()
            .and_then(|code| languages.get(&code))
        {
            return Arc::clone(pack);
        }

        debug!(
            "Language '{}' not registered, falling back to '{}'",
            code, self.fallback
        );
        self.metrics.record_fallback();
        languages
            .get(&self.fallback)
            .cloned()
            .unwrap_or_else(|| Arc::new(defaults::english()))
    }

    /// Get the pack registered for exactly this language, without fallback.
    pub fn get(&self, code: &str) -> Option<Arc<LanguagePack>> {
        let code = LanguageCode::parse(code).ok()?;
        self.read().get(&code).cloned()
    }

    /// Pick the first preferred language that has its own pack.
    ///
    /// Each code is tried as given, then by its primary subtag, so `fa-ir`
    /// matches a registered `fa`. Returns `None` when nothing matches.
    pub fn negotiate(&self, preferred: &[LanguageCode]) -> Option<LanguageCode> {
        let languages = self.read();
        preferred.iter().find_map(|code| {
            if languages.contains_key(code) {
                return Some(code.clone());
            }
            code.primary()
                .filter(|primary| languages.contains_key(primary))
        })
    }

    /// Insert or replace the pack for a language.
    ///
    /// The pack is validated before the write lock is taken; in-flight
    /// `resolve` calls see either the previous pack or the new one.
    ///
    /// # Returns
    /// The normalized language code the pack was stored under.
    pub fn register(&self, code: &str, pack: LanguagePack) -> Result<LanguageCode, PackError> {
        let code = LanguageCode::parse(code)?;
        pack.validate()?;
        self.insert(code.clone(), pack);
        Ok(code)
    }

    /// Register every pack a source provides.
    ///
    /// All-or-nothing: every pack is checked before any is stored, so one bad
    /// pack leaves the registry untouched.
    ///
    /// # Returns
    /// The number of packs registered.
    pub fn seed<S: PackSource + ?Sized>(&self, source: &S) -> Result<usize, SourceError> {
        let loaded = source.load()?;

        let mut checked = Vec::with_capacity(loaded.len());
        for entry in loaded {
            let code = LanguageCode::parse(&entry.code)
                .and_then(|code| entry.pack.validate().map(|()| code))
                .map_err(|source| SourceError::Invalid {
                    path: entry.origin,
                    source,
                })?;
            checked.push((code, entry.pack));
        }

        let count = checked.len();
        for (code, pack) in checked {
            self.insert(code, pack);
        }

        info!("Seeded {} language pack(s)", count);
        Ok(count)
    }

    /// Store an already validated pack.
    fn insert(&self, code: LanguageCode, pack: LanguagePack) {
        warn_if_incomplete(&code, &pack);

        let replaced = self
            .write()
            .insert(code.clone(), Arc::new(pack))
            .is_some();
        self.metrics.record_registration();

        if replaced {
            info!("Replaced language pack '{}'", code);
        } else {
            info!("Registered language pack '{}'", code);
        }
    }

    /// Check if a language has its own pack.
    pub fn contains(&self, code: &str) -> bool {
        match LanguageCode::parse(code) {
            Ok(code) => self.read().contains_key(&code),
            Err(_) => false,
        }
    }

    /// All registered language codes, sorted.
    pub fn languages(&self) -> Vec<LanguageCode> {
        let mut codes: Vec<_> = self.read().keys().cloned().collect();
        codes.sort();
        codes
    }

    pub fn fallback_code(&self) -> &LanguageCode {
        &self.fallback
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Look up an error entry in a resolved pack, recording misses.
    pub fn lookup_error_entry<'p>(
        &self,
        pack: &'p LanguagePack,
        code: u32,
    ) -> Option<&'p ErrorEntry> {
        let entry = pack.error_entry(code);
        if entry.is_none() {
            warn!("No message for error code {}", code);
            self.metrics.record_message_miss();
        }
        entry
    }

    /// Look up a category message in a resolved pack, recording misses.
    pub fn lookup_category_message<'p>(
        &self,
        pack: &'p LanguagePack,
        bucket: Bucket,
        category: &str,
    ) -> Option<&'p str> {
        let message = pack.category_message(bucket, category);
        if message.is_none() {
            warn!("No message for '{}.{}'", bucket.as_str(), category);
            self.metrics.record_message_miss();
        }
        message
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<LanguageCode, Arc<LanguagePack>>> {
        self.languages.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<LanguageCode, Arc<LanguagePack>>> {
        self.languages.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn warn_if_incomplete(code: &LanguageCode, pack: &LanguagePack) {
    let missing = pack.missing_required();
    if !missing.is_empty() {
        warn!(
            "Language pack '{}' is incomplete, missing: {}",
            code,
            missing.join(", ")
        );
    }
}

impl Default for TranslationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TranslationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationRegistry")
            .field("languages", &self.languages())
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::source::{BundledPacks, LoadedPack};
    use proptest::prelude::*;
    use std::thread;

    fn custom_pack(label: &str) -> LanguagePack {
        LanguagePack::new(format!("{}-ok", label), format!("{}-failed", label))
            .with_error(5404, format!("{} not found", label))
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_contains_english() {
        let registry = TranslationRegistry::new();
        assert!(registry.contains("en"));
        assert_eq!(registry.languages().len(), 1);
        assert_eq!(registry.fallback_code().as_str(), "en");
    }

    #[test]
    fn test_bundled_contains_english_and_persian() {
        let registry = TranslationRegistry::bundled();
        let codes: Vec<_> = registry
            .languages()
            .iter()
            .map(|c| c.as_str().to_string())
            .collect();
        assert_eq!(codes, vec!["en", "fa"]);
    }

    #[test]
    fn test_with_fallback_custom_language() {
        let registry = TranslationRegistry::with_fallback("de", custom_pack("de")).unwrap();
        assert_eq!(registry.fallback_code().as_str(), "de");
        assert_eq!(registry.resolve("xx").success, "de-ok");
    }

    #[test]
    fn test_with_fallback_accepts_incomplete_pack() {
        let pack = custom_pack("de");
        assert!(!pack.missing_required().is_empty());

        let registry = TranslationRegistry::with_fallback("de", pack).unwrap();
        assert_eq!(registry.languages().len(), 1);
    }

    #[test]
    fn test_with_fallback_rejects_invalid_pack() {
        let result = TranslationRegistry::with_fallback("de", LanguagePack::new("", "x"));
        assert!(result.is_err());
    }

    // ==================== resolve Tests ====================

    #[test]
    fn test_resolve_registered_language() {
        let registry = TranslationRegistry::bundled();
        assert_eq!(registry.resolve("fa").success, "موفق");
    }

    #[test]
    fn test_resolve_normalizes_code() {
        let registry = TranslationRegistry::bundled();
        assert_eq!(registry.resolve(" FA ").success, "موفق");
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_english() {
        let registry = TranslationRegistry::new();
        assert_eq!(registry.resolve("zz"), registry.resolve("en"));
        assert_eq!(registry.resolve(""), registry.resolve("en"));
        assert_eq!(registry.resolve("not a code"), registry.resolve("en"));
    }

    #[test]
    fn test_resolve_records_metrics() {
        let registry = TranslationRegistry::new();
        registry.resolve("en");
        registry.resolve("zz");

        assert_eq!(registry.metrics().resolves(), 2);
        assert_eq!(registry.metrics().fallbacks(), 1);
    }

    #[test]
    fn test_resolved_snapshot_survives_replacement() {
        let registry = TranslationRegistry::new();
        registry.register("de", custom_pack("old")).unwrap();

        let snapshot = registry.resolve("de");
        registry.register("de", custom_pack("new")).unwrap();

        assert_eq!(snapshot.success, "old-ok");
        assert_eq!(registry.resolve("de").success, "new-ok");
    }

    // ==================== register Tests ====================

    #[test]
    fn test_register_returns_normalized_code() {
        let registry = TranslationRegistry::new();
        let code = registry.register("PT_br", custom_pack("pt")).unwrap();
        assert_eq!(code.as_str(), "pt-br");
        assert!(registry.contains("pt-BR"));
    }

    #[test]
    fn test_register_overrides_fallback() {
        let registry = TranslationRegistry::new();
        registry.register("en", custom_pack("en")).unwrap();
        assert_eq!(registry.resolve("en").failed, "en-failed");
        assert_eq!(registry.resolve("zz").failed, "en-failed");
    }

    #[test]
    fn test_register_rejects_invalid_code() {
        let registry = TranslationRegistry::new();
        let result = registry.register("../en", custom_pack("x"));
        assert!(matches!(result, Err(PackError::InvalidLanguageCode(_))));
        assert_eq!(registry.languages().len(), 1);
    }

    #[test]
    fn test_register_rejects_invalid_pack() {
        let registry = TranslationRegistry::new();
        let result = registry.register("de", LanguagePack::new("ok", " "));
        assert_eq!(result, Err(PackError::EmptyStatusText { field: "failed" }));
        assert!(!registry.contains("de"));
    }

    #[test]
    fn test_get_does_not_fall_back() {
        let registry = TranslationRegistry::new();
        assert!(registry.get("en").is_some());
        assert!(registry.get("de").is_none());
    }

    #[test]
    fn test_contains_normalizes_code() {
        let registry = TranslationRegistry::bundled();
        assert!(registry.contains("FA"));
        assert!(!registry.contains("de"));
        assert!(!registry.contains("??"));
    }

    // ==================== negotiate Tests ====================

    fn preferred(header: &str) -> Vec<LanguageCode> {
        LanguageCode::from_accept_language(header)
    }

    #[test]
    fn test_negotiate_falls_back_to_primary_subtag() {
        let registry = TranslationRegistry::bundled();
        let code = registry.negotiate(&preferred("fa-IR,fa;q=0.9,en;q=0.8"));
        assert_eq!(code.unwrap().as_str(), "fa");
    }

    #[test]
    fn test_negotiate_prefers_exact_regional_pack() {
        let registry = TranslationRegistry::bundled();
        registry.register("fa-ir", custom_pack("ir")).unwrap();
        let code = registry.negotiate(&preferred("fa-IR,fa;q=0.9"));
        assert_eq!(code.unwrap().as_str(), "fa-ir");
    }

    #[test]
    fn test_negotiate_skips_unregistered_languages() {
        let registry = TranslationRegistry::bundled();
        let code = registry.negotiate(&preferred("de-CH, it;q=0.8, fa;q=0.5"));
        assert_eq!(code.unwrap().as_str(), "fa");
    }

    #[test]
    fn test_negotiate_without_match() {
        let registry = TranslationRegistry::bundled();
        assert!(registry.negotiate(&preferred("de, it")).is_none());
        assert!(registry.negotiate(&[]).is_none());
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_lookup_error_entry_miss_is_counted() {
        let registry = TranslationRegistry::new();
        let pack = registry.resolve("en");

        assert!(registry.lookup_error_entry(&pack, 5404).is_some());
        assert!(registry.lookup_error_entry(&pack, 1).is_none());
        assert_eq!(registry.metrics().message_misses(), 1);
    }

    #[test]
    fn test_lookup_category_message_miss_is_counted() {
        let registry = TranslationRegistry::new();
        let pack = registry.resolve("en");

        assert_eq!(
            registry.lookup_category_message(&pack, Bucket::Failed, "insert"),
            Some("The requested parameter is not added!")
        );
        assert!(registry
            .lookup_category_message(&pack, Bucket::Failed, "archive")
            .is_none());
        assert_eq!(registry.metrics().message_misses(), 1);
    }

    // ==================== seed Tests ====================

    #[test]
    fn test_seed_from_bundled_source() {
        let registry = TranslationRegistry::new();
        let count = registry.seed(&BundledPacks).unwrap();
        assert_eq!(count, 2);
        assert!(registry.contains("fa"));
    }

    struct MixedSource;

    impl PackSource for MixedSource {
        fn load(&self) -> Result<Vec<LoadedPack>, SourceError> {
            Ok(vec![
                LoadedPack {
                    code: "de".to_string(),
                    pack: custom_pack("de"),
                    origin: "memory:de".into(),
                },
                LoadedPack {
                    code: "fr".to_string(),
                    pack: LanguagePack::new("succès", ""),
                    origin: "memory:fr".into(),
                },
            ])
        }
    }

    #[test]
    fn test_seed_is_all_or_nothing() {
        let registry = TranslationRegistry::new();
        let result = registry.seed(&MixedSource);

        match result {
            Err(SourceError::Invalid { path, source }) => {
                assert_eq!(path, std::path::PathBuf::from("memory:fr"));
                assert_eq!(source, PackError::EmptyStatusText { field: "failed" });
            }
            other => panic!("Expected invalid pack error, got {:?}", other),
        }
        assert!(!registry.contains("de"));
        assert_eq!(registry.metrics().registrations(), 0);
    }

    // ==================== Concurrency Tests ====================

    #[test]
    fn test_concurrent_register_disjoint_codes() {
        let registry = Arc::new(TranslationRegistry::new());
        let codes = ["de", "fr", "it", "es", "nl", "sv", "pl", "tr"];

        let handles: Vec<_> = codes
            .iter()
            .map(|code| {
                let registry = Arc::clone(&registry);
                let code = code.to_string();
                thread::spawn(move || {
                    for i in 0..50 {
                        registry
                            .register(&code, custom_pack(&format!("{}{}", code, i)))
                            .unwrap();
                        // Unrelated readers keep seeing English
                        assert_eq!(registry.resolve("en").success, "success");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.languages().len(), codes.len() + 1);
        for code in codes {
            let pack = registry.resolve(code);
            assert_eq!(pack.success, format!("{}49-ok", code));
            assert_eq!(pack.failed, format!("{}49-failed", code));
        }
        assert_eq!(registry.metrics().registrations(), codes.len() * 50);
    }

    #[test]
    fn test_readers_never_see_partial_pack() {
        let registry = Arc::new(TranslationRegistry::new());
        registry.register("de", custom_pack("a")).unwrap();

        let writer = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..200 {
                    let label = if i % 2 == 0 { "a" } else { "b" };
                    registry.register("de", custom_pack(label)).unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let pack = registry.resolve("de");
                        let label = pack.success.trim_end_matches("-ok").to_string();
                        assert_eq!(pack.failed, format!("{}-failed", label));
                        assert_eq!(
                            pack.error_entry(5404).unwrap().message,
                            format!("{} not found", label)
                        );
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_register_then_resolve_round_trips(code in "[a-z]{2,3}", label in "[a-zA-Z]{1,12}") {
            let registry = TranslationRegistry::new();
            let pack = custom_pack(&label);
            registry.register(&code, pack.clone()).unwrap();
            let resolved = registry.resolve(&code);
            prop_assert_eq!(resolved.as_ref(), &pack);
        }

        #[test]
        fn prop_unregistered_resolves_to_fallback(code in "[a-z]{2,3}") {
            prop_assume!(code != "en" && code != "fa");
            let registry = TranslationRegistry::bundled();
            prop_assert_eq!(registry.resolve(&code), registry.resolve("en"));
        }
    }
}
