//! Integration tests for fetching, parsing and aggregating sold listings.

use sold_tracker::config::Config;
use sold_tracker::ebay::{fetch_listings, EbayClient, Parser, Region};
use sold_tracker::stats::{aggregate, PriceReport};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SOLD_FIXTURE: &str = include_str!("fixtures/sold_results.html");

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_parse_sold_results() {
    let set = Parser::new(Region::Ca).parse_listings(SOLD_FIXTURE);

    // Seven cards: one placeholder and one "Best Offer" price are dropped
    assert_eq!(set.len(), 5);

    let first = &set.listings[0];
    assert_eq!(first.title, "2023 Canada 1 oz Silver Maple Leaf $5 BU");
    assert_eq!(first.price, 48.5);
    assert_eq!(first.date, "Sold Oct 3, 2023");
    assert!(first.link.starts_with("https://www.ebay.ca/itm/266431234567"));

    let monster_box = &set.listings[1];
    assert_eq!(monster_box.price, 1234.5);
    assert_eq!(monster_box.link, "https://www.ebay.ca/itm/266431234999");
    assert_eq!(monster_box.date, "N/A");

    let highlighted = &set.listings[2];
    assert_eq!(highlighted.title, "2023 Canada 1 oz Silver Maple Leaf $5 Proof");
    assert_eq!(highlighted.price, 95.0);
    assert_eq!(highlighted.date, "Sold Aug 21, 2024");
    assert_eq!(highlighted.link, "https://www.ebay.ca/itm/266431234777");

    let newer = &set.listings[3];
    assert_eq!(newer.title, "2023 Canada 1 oz Silver Maple Leaf $5 BU");
    assert_eq!(newer.price, 52.10);
    assert_eq!(newer.date, "Sold Sep 14, 2025");

    let ranged = &set.listings[4];
    assert_eq!(ranged.price, 45.0);
}

#[test]
fn test_aggregate_fixture_from_both_regions() {
    let ca = Parser::new(Region::Ca).parse_listings(SOLD_FIXTURE);
    let com = Parser::new(Region::Ca).parse_listings(SOLD_FIXTURE);

    let report = aggregate([ca, com]);
    let summary = report.summary().unwrap();

    // Identical pages collapse to one copy of each listing
    assert_eq!(summary.listings.len(), 5);
    assert_eq!(summary.categories.len(), 4);

    let bu = &summary.categories[0];
    assert_eq!(bu.title, "2023 Canada 1 oz Silver Maple Leaf $5 BU");
    assert_eq!(bu.count, 2);
    assert_eq!(bu.min, 48.5);
    assert_eq!(bu.max, 52.10);
    assert!(approx(bu.mean, (48.5 + 52.10) / 2.0));

    let proof = &summary.categories[1];
    assert_eq!(proof.title, "2023 Canada 1 oz Silver Maple Leaf $5 Proof");
    assert_eq!(proof.count, 1);

    assert_eq!(summary.overall.median, 52.10);
    assert!(approx(summary.overall.mean, (45.0 + 48.5 + 52.10 + 95.0 + 1234.5) / 5.0));
    assert_eq!(summary.overall.min, 45.0);
    assert_eq!(summary.overall.max, 1234.5);
}

#[tokio::test]
async fn test_fetch_one_region_failing() {
    let ok_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sch/i.html"))
        .and(query_param("_nkw", "2023 Silver Maple Leaf"))
        .and(query_param("LH_Sold", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SOLD_FIXTURE))
        .expect(1)
        .mount(&ok_server)
        .await;

    let failing_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&failing_server)
        .await;

    let config = Config { timeout_secs: 5, ..Config::default() };
    let ca_client = EbayClient::with_base_url(&config, Some(ok_server.uri())).await.unwrap();
    let com_client = EbayClient::with_base_url(&config, Some(failing_server.uri())).await.unwrap();

    let ca = fetch_listings(&ca_client, "2023 Silver Maple Leaf", Region::Ca).await;
    let com = fetch_listings(&com_client, "2023 Silver Maple Leaf", Region::Com).await;
    assert_eq!(ca.len(), 5);
    assert!(com.is_empty());

    // Relative hrefs resolve against the server the page came from
    assert_eq!(ca.listings[1].link, format!("{}/itm/266431234999", ok_server.uri()));

    let summary = aggregate([ca, com]).summary().cloned().unwrap();
    assert_eq!(summary.listings.len(), 5);
    assert_eq!(summary.overall.max, 1234.5);
}

#[tokio::test]
async fn test_fetch_both_regions_failing_is_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let config = Config { timeout_secs: 5, ..Config::default() };
    let client = EbayClient::with_base_url(&config, Some(server.uri())).await.unwrap();

    let ca = fetch_listings(&client, "coin", Region::Ca).await;
    let com = fetch_listings(&client, "coin", Region::Com).await;

    assert_eq!(aggregate([ca, com]), PriceReport::NoResults);
}
