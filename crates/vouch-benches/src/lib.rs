//! Benchmark corpora for `vouch-core`.
//!
//! Each corpus is generated in memory so benchmark runs need no fixture
//! files. A [`Dataset`] bundles a response-like document, an expectation
//! document that differs from it in a few places, and the paths the query
//! benchmarks resolve and search.
//!
//! ```
//! let corpus = vouch_benches::available_corpora()
//!     .iter()
//!     .find(|corpus| corpus.name() == "orders")
//!     .expect("registered corpus");
//! let dataset = corpus.load();
//! assert!(!dataset.compare().is_empty());
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use serde_json::{json, Value as JsonValue};
use vouch_core::query::{Engine, Expected, Path};
use vouch_core::{CanonicalizeError, CompareOptions, DiffReport, Node};

/// A named, reproducible input set.
#[derive(Clone, Copy, Debug)]
pub struct Corpus {
    name: &'static str,
    size: usize,
    build: fn(usize) -> Result<Dataset, CanonicalizeError>,
}

impl Corpus {
    /// Identifier used as the benchmark parameter.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of top-level records generated.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Generates the dataset.
    ///
    /// # Panics
    ///
    /// Panics if the generated JSON cannot be converted, which would be a bug
    /// in the generator.
    #[must_use]
    pub fn load(&self) -> Dataset {
        match (self.build)(self.size) {
            Ok(dataset) => dataset,
            Err(err) => panic!("corpus {} failed to build: {err}", self.name),
        }
    }
}

/// Documents and paths for one corpus.
#[derive(Clone, Debug)]
pub struct Dataset {
    /// Response-like document.
    pub actual: Node,
    /// Expectation that differs from `actual` in a few places.
    pub expected: Node,
    /// Path resolved exactly.
    pub exact_path: &'static str,
    /// Path searched recursively.
    pub search_path: &'static str,
    /// Values the recursive search looks for.
    pub search_expected: Expected,
}

impl Dataset {
    /// Compares `expected` against `actual` in strict mode.
    #[must_use]
    pub fn compare(&self) -> DiffReport {
        self.expected.diff(&self.actual, &CompareOptions::strict())
    }

    /// Parses both benchmark paths.
    #[must_use]
    pub fn paths(&self, engine: &Engine) -> (Path, Path) {
        (engine.parse_path(self.exact_path), engine.parse_path(self.search_path))
    }
}

const CORPORA: [Corpus; 2] = [
    Corpus { name: "orders", size: 200, build: orders },
    Corpus { name: "catalog", size: 40, build: catalog },
];

/// Lists the registered corpora.
#[must_use]
pub fn available_corpora() -> &'static [Corpus] {
    &CORPORA
}

fn orders(size: usize) -> Result<Dataset, CanonicalizeError> {
    let items: Vec<JsonValue> = (0..size)
        .map(|i| {
            json!({
                "id": format!("{}", 417_000 + i),
                "qty": i % 7,
                "price": (i as f64) * 1.25,
                "tags": ["retail", if i % 2 == 0 { "even" } else { "odd" }],
            })
        })
        .collect();
    let mut expected_items = items.clone();
    for (i, item) in expected_items.iter_mut().enumerate().filter(|(i, _)| i % 25 == 0) {
        item["qty"] = json!(i % 7 + 1);
    }
    expected_items.truncate(size.saturating_sub(3));

    let actual = Node::from_json_value(json!({ "items": items, "total": size }))?;
    let expected = Node::from_json_value(json!({ "items": expected_items, "total": size }))?;
    let wanted = (0..size).step_by(10).map(|i| json!(format!("{}", 417_000 + i))).collect();
    Ok(Dataset {
        actual,
        expected,
        exact_path: "items.150.id",
        search_path: "~items.id",
        search_expected: Expected::from_json_value(JsonValue::Array(wanted))?,
    })
}

fn catalog(size: usize) -> Result<Dataset, CanonicalizeError> {
    let sections: Vec<JsonValue> = (0..size)
        .map(|s| {
            let products: Vec<JsonValue> = (0..10)
                .map(|p| json!({ "sku": format!("S{s}-P{p}"), "variants": [{ "color": "red" }, { "color": "blue" }] }))
                .collect();
            json!({ "name": format!("section-{s}"), "products": products })
        })
        .collect();
    let mut changed = sections.clone();
    if let Some(section) = changed.get_mut(size / 2) {
        section["products"][3]["variants"][1]["color"] = json!("green");
    }

    Ok(Dataset {
        actual: Node::from_json_value(json!({ "sections": sections }))?,
        expected: Node::from_json_value(json!({ "sections": changed }))?,
        exact_path: "sections.0.products.size()",
        search_path: "~sections.products.variants.color",
        search_expected: Expected::from_json_value(json!(["red", "blue"]))?,
    })
}
