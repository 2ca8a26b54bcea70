//! Geo data assembly
//!
//! Ties the result cache, the upstream backend and the place normalizer
//! together into a single `resolve` call.

use crate::cache::ResultCache;
use crate::config::CountryOverrideConfig;
use crate::constants::geo::DISTANCE_PRECISION;
use crate::coord::distance::great_circle_distance;
use crate::coord::{round_to, Coordinates};
use crate::error::Result;
use crate::geo::GeocodeBackend;
use crate::place::{normalize, NormalizedPlace, RawPlaceRecord};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of resolving one query
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Place in legacy shape
    pub place: NormalizedPlace,

    /// Raw record the place was built from
    pub raw: RawPlaceRecord,

    /// Whether no upstream call was made
    pub cache_hit: bool,
}

/// Resolves query coordinates into normalized places
pub struct GeoDataAssembler<G> {
    backend: G,
    cache: ResultCache,
    overrides: CountryOverrideConfig,
}

impl<G: GeocodeBackend> GeoDataAssembler<G> {
    pub fn new(backend: G, cache: ResultCache, overrides: CountryOverrideConfig) -> Self {
        Self {
            backend,
            cache,
            overrides,
        }
    }

    /// Upstream backend
    pub fn backend(&self) -> &G {
        &self.backend
    }

    /// Resolve (already rounded) query coordinates in a language
    ///
    /// A cached record is reused when the key matches exactly; otherwise the
    /// upstream is queried and its first match replaces the cache slot.
    pub async fn resolve(&self, query: Coordinates, lang: &str) -> Result<Resolution> {
        let (raw, requests_remaining) = match self.cache.lookup(query.lat, query.lng, lang)? {
            Some(record) => (record, None),
            None => {
                info!(
                    "Querying {} for {},{} [{}]",
                    self.backend.name(),
                    query.lat,
                    query.lng,
                    lang
                );
                let response = self.backend.reverse_geocode(query, lang).await?;
                let remaining = response.remaining();
                let record = response.into_first_record()?;

                if let Err(e) = self.cache.store(query.lat, query.lng, lang, &record) {
                    warn!("Failed to cache result: {}", e);
                }
                (record, remaining)
            }
        };

        let place = self.assemble(query, &raw, requests_remaining);
        Ok(Resolution {
            cache_hit: raw.cached,
            place,
            raw,
        })
    }

    fn assemble(
        &self,
        query: Coordinates,
        raw: &RawPlaceRecord,
        requests_remaining: Option<u64>,
    ) -> NormalizedPlace {
        let distance_km = great_circle_distance(query, raw.coordinates()) / 1000.0;
        let fields = normalize(raw, &self.overrides);

        NormalizedPlace {
            country_code: raw.iso_alpha2.clone().unwrap_or_default(),
            country: raw.country.clone().unwrap_or_default(),
            region: fields.region,
            city: fields.city,
            locality: fields.locality,
            lat: raw.lat,
            lng: raw.lng,
            distance: round_to(distance_km, DISTANCE_PRECISION),
            cached: raw.cached,
            requests_remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::{MemoryStateStore, StateStore};
    use crate::error::Error;
    use crate::geo::mock::MockGeocoder;
    use crate::rate::RateGovernor;
    use std::time::Duration;

    fn assembler(backend: MockGeocoder) -> GeoDataAssembler<MockGeocoder> {
        let cache = ResultCache::new(Box::new(MemoryStateStore::new()), "rgcCache");
        GeoDataAssembler::new(backend, cache, CountryOverrideConfig::default())
    }

    #[tokio::test]
    async fn test_frankfurt_miss_then_hit() {
        let assembler = assembler(MockGeocoder::frankfurt().with_remaining(2499));
        let governor = RateGovernor::new(1.0).unwrap();
        let query = Coordinates::new(50.110922, 8.682127).rounded(5);

        let first = assembler.resolve(query, "de").await.unwrap();
        assert!(!first.cache_hit);
        assert_eq!(first.place.region, "Hessen");
        assert_eq!(first.place.city, "Frankfurt am Main");
        assert_eq!(first.place.locality, "Frankfurt am Main");
        assert_eq!(first.place.country, "Germany");
        assert_eq!(first.place.country_code, "de");
        assert_eq!(first.place.requests_remaining, Some(2499));
        assert!(!first.place.cached);

        let expected = round_to(
            great_circle_distance(query, Coordinates::new(50.1109, 8.6821)) / 1000.0,
            4,
        );
        assert_eq!(first.place.distance, expected);
        assert!(first.place.distance > 0.0 && first.place.distance < 0.01);

        let second = assembler.resolve(query, "de").await.unwrap();
        assert!(second.cache_hit);
        assert!(second.place.cached);
        assert_eq!(second.place.region, first.place.region);
        assert_eq!(second.place.city, first.place.city);
        assert_eq!(second.place.locality, first.place.locality);
        assert_eq!(second.place.distance, first.place.distance);
        assert_eq!(second.place.requests_remaining, None);
        assert_eq!(
            governor.delay_for(Duration::ZERO, second.cache_hit),
            Duration::ZERO
        );

        assert_eq!(assembler.backend().calls(), 1);
    }

    #[tokio::test]
    async fn test_language_change_misses() {
        let assembler = assembler(MockGeocoder::frankfurt());
        let query = Coordinates::new(50.11092, 8.68213);

        assembler.resolve(query, "de").await.unwrap();
        let other = assembler.resolve(query, "en").await.unwrap();
        assert!(!other.cache_hit);
        assert_eq!(assembler.backend().calls(), 2);
        assert_eq!(assembler.backend().languages(), vec!["de", "en"]);
    }

    #[tokio::test]
    async fn test_alternating_queries_always_miss() {
        let assembler = assembler(MockGeocoder::frankfurt());
        let a = Coordinates::new(50.11092, 8.68213);
        let b = Coordinates::new(50.2, 8.7);

        assembler.resolve(a, "de").await.unwrap();
        assembler.resolve(b, "de").await.unwrap();
        let again = assembler.resolve(a, "de").await.unwrap();

        assert!(!again.cache_hit);
        assert_eq!(assembler.backend().calls(), 3);
    }

    #[tokio::test]
    async fn test_distance_is_recomputed_per_query() {
        let assembler = assembler(MockGeocoder::new(0.0, 0.0, &[("village", "Null Island")]));

        let exact = assembler.resolve(Coordinates::new(0.0, 0.0), "en").await.unwrap();
        assert_eq!(exact.place.distance, 0.0);

        let offset = assembler.resolve(Coordinates::new(0.0, 1.0), "en").await.unwrap();
        assert!((offset.place.distance - 111.1949).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_cached() {
        let assembler = assembler(MockGeocoder::failing());
        let query = Coordinates::new(1.0, 2.0);

        let result = assembler.resolve(query, "en").await;
        assert!(matches!(result, Err(Error::Upstream(_))));

        let result = assembler.resolve(query, "en").await;
        assert!(matches!(result, Err(Error::Upstream(_))));
        assert_eq!(assembler.backend().calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_components() {
        let assembler = assembler(MockGeocoder::new(10.0, 20.0, &[]));
        let resolution = assembler.resolve(Coordinates::new(10.0, 20.0), "en").await.unwrap();

        assert_eq!(resolution.place.region, "");
        assert_eq!(resolution.place.city, "");
        assert_eq!(resolution.place.locality, "");
        assert_eq!(resolution.place.country, "");
        assert_eq!(resolution.place.country_code, "");
    }

    /// Store that never persists anything
    struct ReadOnlyStore;

    impl StateStore for ReadOnlyStore {
        fn read(&self, _name: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn write(&self, _name: &str, _data: &[u8]) -> Result<usize> {
            Err(Error::Storage("read-only state directory".to_string()))
        }

        fn remove(&self, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_cache_write_still_resolves() {
        let cache = ResultCache::new(Box::new(ReadOnlyStore), "rgcCache");
        let assembler = GeoDataAssembler::new(
            MockGeocoder::frankfurt(),
            cache,
            CountryOverrideConfig::default(),
        );
        let query = Coordinates::new(50.11092, 8.68213);

        let first = assembler.resolve(query, "de").await.unwrap();
        assert!(!first.cache_hit);
        assert_eq!(first.place.city, "Frankfurt am Main");

        let second = assembler.resolve(query, "de").await.unwrap();
        assert!(!second.cache_hit);
        assert_eq!(assembler.backend().calls(), 2);
    }
}
