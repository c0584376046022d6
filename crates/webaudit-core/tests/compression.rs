use webaudit_core::audits::response_compression::assess;
use webaudit_core::{
    AuditRunner, ByteSavingsEstimator, CompressionCandidate, CompressionThresholds,
    GatheredArtifacts, NetworkRecord, RawValue, ResourceType, ResponseCompression,
    ResponseHeader, SavingsVerdict,
};

fn candidate(url: &str, size: u64, compressed: u64) -> CompressionCandidate {
    CompressionCandidate {
        url: url.to_string(),
        mime_type: "text/html".to_string(),
        resource_size: size,
        estimated_compressed_size: compressed,
    }
}

fn record(url: &str, resource_type: ResourceType, size: u64, headers: &[(&str, &str)]) -> NetworkRecord {
    NetworkRecord {
        url: url.to_string(),
        mime_type: "text/plain".to_string(),
        resource_type,
        resource_size: size,
        response_headers: headers
            .iter()
            .map(|(n, v)| ResponseHeader::new(*n, *v))
            .collect(),
        protocol: "h2".to_string(),
    }
}

// ---- savings thresholds ----

#[test]
fn ratio_boundary_and_byte_floor() {
    let estimator = ByteSavingsEstimator::default();

    // ratio exactly 0.9 is not above the threshold, but 1000 bytes is under the floor
    let boundary = estimator.assess(10_000, Some(9_000));
    assert!(!boundary.is_counted());

    let counted = estimator.assess(1_500, Some(50));
    match counted {
        SavingsVerdict::Counted(savings) => {
            assert_eq!(savings.wasted_bytes, 1_450);
            assert!(savings.ratio() <= 0.9);
        }
        other => panic!("expected counted, got {other:?}"),
    }
}

// ---- audit ----

#[test]
fn three_resources_end_to_end() {
    let candidates = vec![
        candidate("https://example.com/a.html", 10_000, 9_000),
        candidate("https://example.com/b.js", 5_000, 3_000),
        candidate("https://example.com/c.css", 1_500, 50),
    ];
    let result = assess(&candidates, &CompressionThresholds::default(), None);

    assert_eq!(result.raw_value, RawValue::Bool(true));
    assert!(result.debug_string.is_none());
    assert_eq!(result.display_value.as_deref(), Some("Potential savings of 3 KB"));

    let info = result.extended_info.unwrap();
    let rows = info["results"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["url"], "https://example.com/b.js");
    assert_eq!(rows[0]["wastedBytes"], 2_000);
    assert_eq!(rows[0]["wastedPercent"], 40.0);
    assert_eq!(rows[0]["potentialSavings"], "2 KB (~40%)");
    assert_eq!(rows[1]["url"], "https://example.com/c.css");
    assert_eq!(rows[1]["wastedBytes"], 1_450);
    assert_eq!(info["ignored"], 1);
    assert_eq!(info["wastedKb"], 3.0);
    assert!(info["wastedMs"].is_null());
}

#[test]
fn refetched_resource_counts_once() {
    let candidates = vec![
        candidate("https://example.com/app.js", 60_000, 10_000),
        candidate("https://example.com/app.js", 60_000, 10_000),
    ];
    let result = assess(&candidates, &CompressionThresholds::default(), Some(50_000.0));
    // 50 000 bytes wasted once stays under the 100 KiB ceiling
    assert!(result.passed());
    let info = result.extended_info.unwrap();
    assert_eq!(info["results"].as_array().unwrap().len(), 1);
    assert_eq!(info["duplicates"], 1);
    assert_eq!(info["wastedMs"], 1_000.0);
    assert_eq!(
        result.display_value.as_deref(),
        Some("Potential savings of 49 KB (~1000 ms)")
    );
}

#[test]
fn ceiling_is_configurable() {
    let thresholds = CompressionThresholds {
        total_wasted_bytes_ceiling: 3_000,
        ..Default::default()
    };
    let candidates = vec![
        candidate("https://example.com/b.js", 5_000, 3_000),
        candidate("https://example.com/c.css", 1_500, 50),
    ];
    let result = assess(&candidates, &thresholds, None);
    assert!(!result.passed());
    // detail is still reported on failure
    assert_eq!(result.extended_info.unwrap()["results"].as_array().unwrap().len(), 2);
}

// ---- candidates from network records ----

#[test]
fn gatherer_side_selection_and_estimate() {
    let records = vec![
        record("https://example.com/", ResourceType::Document, 9, &[]),
        record("https://example.com/app.js", ResourceType::Script, 12, &[("content-type", "text/javascript")]),
        record("https://example.com/style.css", ResourceType::Stylesheet, 900, &[("Content-Encoding", "br")]),
        record("https://example.com/multi.css", ResourceType::Stylesheet, 900, &[("content-encoding", "identity, GZIP")]),
        record("https://example.com/img.png", ResourceType::Image, 90_000, &[]),
        record("https://example.com/font.woff2", ResourceType::Font, 90_000, &[]),
    ];
    let candidates = ResponseCompression::default().candidates(&records);
    let summary: Vec<(&str, u64, u64)> = candidates
        .iter()
        .map(|c| (c.url.as_str(), c.resource_size, c.estimated_compressed_size))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("https://example.com/", 9, 6),
            ("https://example.com/app.js", 12, 8),
        ]
    );
}

#[test]
fn runner_reads_candidates_through_the_cache() {
    let runner = AuditRunner::default();
    let run = runner.start(GatheredArtifacts {
        network_records: Some(vec![record(
            "https://example.com/bundle.js",
            ResourceType::Script,
            600_000,
            &[],
        )]),
        network_throughput: Some(1_000_000.0),
        ..Default::default()
    });

    let first = run.compression_candidates().unwrap();
    let second = run.compression_candidates().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(first[0].estimated_compressed_size, 400_000);

    let report = runner.evaluate(&run);
    let result = report.get("uses-request-compression").unwrap();
    assert!(!result.passed());
    assert_eq!(
        result.display_value.as_deref(),
        Some("Potential savings of 195 KB (~200 ms)")
    );
    assert_eq!(run.cache().computations(), 1);
}
