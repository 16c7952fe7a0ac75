mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::{RecordingSource, chart_of, day, linear_days};
use quote_history::{
    CacheEntry, Error, InMemoryPriceCache, PriceCache, QuoteHistory, RawQuoteResponse,
    cache::cache_key,
};

fn cached(source: &RecordingSource) -> (QuoteHistory, Arc<InMemoryPriceCache>) {
    let cache = Arc::new(InMemoryPriceCache::new());
    let history = QuoteHistory::new(source.clone(), cache.clone());
    (history, cache)
}

#[tokio::test]
async fn price_of_reads_back_five_days_and_caches() {
    let source = RecordingSource::replying(chart_of(&[
        (day(2024, 7, 1), 216.75),
        (day(2024, 7, 2), 220.27),
        (day(2024, 7, 3), 221.55),
    ]));
    let (history, cache) = cached(&source);

    // 2024-07-04 is a holiday; the last close is the 3rd.
    let target = day(2024, 7, 4);
    assert_eq!(history.price_of("AAPL", Some(target)).await.unwrap(), Some(221.55));
    assert_eq!(history.price_of("AAPL", Some(target)).await.unwrap(), Some(221.55));

    assert_eq!(source.calls(), 1);
    let request = &source.requests()[0];
    assert_eq!(request.symbol(), "AAPL");
    assert_eq!(request.from(), day(2024, 6, 29));
    assert_eq!(request.to(), target);
    assert_eq!(
        cache.get(&cache_key("AAPL", target)),
        Some(CacheEntry::Price("221.55".to_string()))
    );
}

#[tokio::test]
async fn missing_price_is_cached_as_no_data() {
    let source = RecordingSource::replying(RawQuoteResponse::from_parallel(vec![], vec![]));
    let (history, cache) = cached(&source);
    let target = day(2024, 1, 1);

    assert_eq!(history.price_of("ZZZZ", Some(target)).await.unwrap(), None);
    assert_eq!(history.price_of("ZZZZ", Some(target)).await.unwrap(), None);

    assert_eq!(source.calls(), 1);
    assert_eq!(cache.get("ZZZZ:2024-01-01"), Some(CacheEntry::NoData));
}

#[tokio::test]
async fn unparseable_cache_entry_is_refetched() {
    let source = RecordingSource::replying(chart_of(&[(day(2024, 1, 2), 42.0)]));
    let (history, cache) = cached(&source);
    cache.put("AAPL:2024-01-02", CacheEntry::Price("not a number".to_string()));

    assert_eq!(history.price_of("AAPL", Some(day(2024, 1, 2))).await.unwrap(), Some(42.0));
    assert_eq!(source.calls(), 1);
    assert_eq!(cache.get("AAPL:2024-01-02"), Some(CacheEntry::Price("42".to_string())));
}

#[tokio::test]
async fn cache_is_keyed_by_symbol_and_day() {
    let source = RecordingSource::replying(chart_of(&linear_days(day(2024, 3, 8), 10)));
    let (history, cache) = cached(&source);

    history.price_of("AAPL", Some(day(2024, 3, 8))).await.unwrap();
    history.price_of("MSFT", Some(day(2024, 3, 8))).await.unwrap();
    history.price_of("AAPL", Some(day(2024, 3, 7))).await.unwrap();
    history.price_on("AAPL", Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 0).unwrap()).await.unwrap();

    assert_eq!(source.calls(), 3);
    assert_eq!(cache.len(), 3);
}

#[tokio::test]
async fn without_cache_always_fetches() {
    let source = RecordingSource::replying(chart_of(&[(day(2024, 1, 2), 1.0)]));
    let history = QuoteHistory::without_cache(source.clone());

    for _ in 0..3 {
        history.price_of("AAPL", Some(day(2024, 1, 2))).await.unwrap();
    }
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn invalid_arguments_fail_before_fetching() {
    let source = RecordingSource::replying(RawQuoteResponse::default());
    let (history, _) = cached(&source);

    let err = history.price_of("   ", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");

    let err = history
        .fetch_quotes("AAPL", Some(day(2024, 2, 1)), Some(day(2024, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");

    let err = history.fetch_quotes("AAPL", None, Some(day(2024, 1, 1))).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");

    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn fetch_quotes_passes_the_range_through() {
    let source = RecordingSource::replying(chart_of(&linear_days(day(2024, 1, 31), 31)));
    let (history, cache) = cached(&source);

    let series = history
        .fetch_quotes(" SPY ", Some(day(2024, 1, 1)), Some(day(2024, 1, 31)))
        .await
        .unwrap();

    assert_eq!(series.len(), 31);
    assert_eq!(series.first().unwrap().day, day(2024, 1, 1));
    let request = &source.requests()[0];
    assert_eq!(request.symbol(), "SPY");
    assert_eq!((request.from(), request.to()), (day(2024, 1, 1), day(2024, 1, 31)));
    // Series queries never touch the price cache.
    assert!(cache.is_empty());
}

#[tokio::test]
async fn performances_request_the_default_lookback() {
    let now = Utc.with_ymd_and_hms(2025, 10, 16, 18, 0, 0).unwrap();
    let source = RecordingSource::replying(chart_of(&linear_days(day(2025, 10, 16), 400)));
    let history = QuoteHistory::without_cache(source.clone());

    let ratios = history.performances_at("TEST", now).await.unwrap();
    assert_eq!(ratios.len(), 9);
    assert!((ratios[3].unwrap() - (499.0 / 315.0 - 1.0)).abs() < 1e-12);

    let request = &source.requests()[0];
    assert_eq!(request.from(), day(2020, 9, 16));
    assert_eq!(request.to(), day(2025, 10, 16));
}

#[tokio::test]
async fn performances_of_an_empty_range_fail() {
    let source = RecordingSource::replying(RawQuoteResponse::from_parallel(vec![], vec![]));
    let history = QuoteHistory::without_cache(source);
    let now = Utc.with_ymd_and_hms(2025, 10, 16, 18, 0, 0).unwrap();

    let err = history.performances_at("TEST", now).await.unwrap_err();
    assert!(matches!(err, Error::EmptySeries(_)), "{err}");
}

#[tokio::test]
async fn provider_failures_propagate_and_are_not_cached() {
    let source = RecordingSource::failing(503);
    let (history, cache) = cached(&source);

    let err = history.price_of("AAPL", Some(day(2024, 1, 2))).await.unwrap_err();
    match err {
        Error::Fetch(inner) => assert_eq!(inner.status(), Some(503)),
        other => panic!("expected a fetch error, got {other}"),
    }
    assert!(cache.is_empty());

    let err = history.fetch_quotes("AAPL", None, None).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn malformed_payload_surfaces_as_malformed() {
    let source = RecordingSource::replying(RawQuoteResponse::from_parallel(
        vec![Some(1_704_205_800), Some(1_704_292_200)],
        vec![Some(1.0)],
    ));
    let history = QuoteHistory::without_cache(source);

    let err = history.fetch_quotes("AAPL", None, None).await.unwrap_err();
    assert!(matches!(err, Error::MalformedResponse(_)), "{err}");
}

#[tokio::test]
async fn extreme_dates_are_rejected_without_fetching() {
    let source = RecordingSource::replying(RawQuoteResponse::default());
    let (history, cache) = cached(&source);

    let err = history.price_on("AAPL", chrono::NaiveDate::MIN).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");

    let last = "+262142-12-31".parse().unwrap();
    let err = history.fetch_quotes("AAPL", Some(last), Some(last)).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");

    let err = history.price_of("AAPL", Some(last)).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)), "{err}");

    assert_eq!(source.calls(), 0);
    assert!(cache.is_empty());
}
