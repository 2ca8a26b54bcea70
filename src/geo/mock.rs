//! Deterministic in-process geocoder for tests

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeocodeBackend, GeocodeResponse, GeocodeResult, RateInfo};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Answers every query with the same match and counts calls
#[derive(Debug)]
pub struct MockGeocoder {
    result: Option<GeocodeResult>,
    remaining: Option<u64>,
    calls: AtomicUsize,
    languages: Mutex<Vec<String>>,
}

impl MockGeocoder {
    /// Answer with `components` located at (lat, lng)
    pub fn new(lat: f64, lng: f64, components: &[(&str, &str)]) -> Self {
        let components: Map<String, Value> = components
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect();

        Self {
            result: Some(GeocodeResult::new(lat, lng, components)),
            remaining: None,
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    /// The Frankfurt fixture
    pub fn frankfurt() -> Self {
        Self::new(
            50.1109,
            8.6821,
            &[
                ("city", "Frankfurt am Main"),
                ("state", "Hessen"),
                ("country", "Germany"),
                ("ISO_3166-1_alpha-2", "de"),
            ],
        )
    }

    /// Fail every query with an upstream error
    pub fn failing() -> Self {
        Self {
            result: None,
            remaining: None,
            calls: AtomicUsize::new(0),
            languages: Mutex::new(Vec::new()),
        }
    }

    /// Report a remaining quota with every answer
    pub fn with_remaining(mut self, remaining: u64) -> Self {
        self.remaining = Some(remaining);
        self
    }

    /// Number of upstream calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Languages requested so far
    pub fn languages(&self) -> Vec<String> {
        self.languages.lock().unwrap().clone()
    }
}

impl GeocodeBackend for MockGeocoder {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn reverse_geocode(&self, _coords: Coordinates, language: &str) -> Result<GeocodeResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(language.to_string());

        let result = self
            .result
            .clone()
            .ok_or_else(|| Error::Upstream("mock upstream failure".to_string()))?;

        Ok(GeocodeResponse {
            results: vec![result],
            rate: self.remaining.map(|remaining| RateInfo {
                limit: None,
                remaining,
                reset: None,
            }),
        })
    }
}
