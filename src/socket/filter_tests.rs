//! Tests for the observation filtering module.

use super::filter::*;
use super::{CollectError, Collector, Observation, Protocol};

// ============================================================================
// Test Fixtures
// ============================================================================

fn sshd() -> Observation {
    Observation::tcp(22, "socket:[100]", "sshd")
}

fn nginx() -> Observation {
    Observation::tcp(443, "socket:[200]", "nginx")
}

fn resolver() -> Observation {
    Observation::udp(53, "socket:[300]", "systemd-resolve")
}

fn unresolved_udp() -> Observation {
    Observation::udp(41641, "", "")
}

struct FixedCollector(Vec<Observation>);

impl Collector for FixedCollector {
    fn collect(&self) -> Result<Vec<Observation>, CollectError> {
        Ok(self.0.clone())
    }
}

struct FailingCollector;

impl Collector for FailingCollector {
    fn collect(&self) -> Result<Vec<Observation>, CollectError> {
        Err(CollectError::Platform {
            message: "enumeration failed".to_string(),
        })
    }
}

// ============================================================================
// ProtocolFilter Tests
// ============================================================================

mod protocol_filter {
    use super::*;

    #[test]
    fn matches_single_protocol() {
        let filter = ProtocolFilter::new([Protocol::Tcp]);
        assert!(filter.matches(&sshd()));
        assert!(!filter.matches(&resolver()));
    }

    #[test]
    fn matches_both_protocols() {
        let filter = ProtocolFilter::new([Protocol::Tcp, Protocol::Udp]);
        assert!(filter.matches(&nginx()));
        assert!(filter.matches(&resolver()));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let filter = ProtocolFilter::new([]);
        assert!(filter.is_empty());
        assert!(!filter.matches(&sshd()));
    }

    #[test]
    fn protocols_accessor_returns_set() {
        let filter = ProtocolFilter::new([Protocol::Udp]);
        assert!(filter.protocols().contains(&Protocol::Udp));
        assert!(!filter.protocols().contains(&Protocol::Tcp));
    }
}

// ============================================================================
// ProcessRegexFilter Tests
// ============================================================================

mod process_regex_filter {
    use super::*;

    #[test]
    fn matches_process_name() {
        let filter = ProcessRegexFilter::new("^systemd").unwrap();
        assert!(filter.matches(&resolver()));
        assert!(!filter.matches(&sshd()));
    }

    #[test]
    fn empty_pattern_selects_unresolved() {
        let filter = ProcessRegexFilter::new("^$").unwrap();
        assert!(filter.matches(&unresolved_udp()));
        assert!(!filter.matches(&nginx()));
    }

    #[test]
    fn invalid_pattern_returns_error() {
        assert!(ProcessRegexFilter::new("[unclosed").is_err());
    }

    #[test]
    fn pattern_accessor_returns_source() {
        let filter = ProcessRegexFilter::new("nginx|caddy").unwrap();
        assert_eq!(filter.pattern().as_str(), "nginx|caddy");
    }
}

// ============================================================================
// PortRangeFilter Tests
// ============================================================================

mod port_range_filter {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        let filter = PortRangeFilter::new(22..=53);
        assert!(filter.matches(&sshd()));
        assert!(filter.matches(&resolver()));
        assert!(!filter.matches(&nginx()));
    }

    #[test]
    fn single_matches_one_port() {
        let filter = PortRangeFilter::single(443);
        assert!(filter.matches(&nginx()));
        assert!(!filter.matches(&sshd()));
        assert_eq!(filter.range(), &(443..=443));
    }
}

// ============================================================================
// FilterChain Tests
// ============================================================================

mod filter_chain {
    use super::*;

    #[test]
    fn empty_chain_matches_everything() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert!(chain.matches(&sshd()));
        assert!(chain.matches(&unresolved_udp()));
    }

    #[test]
    fn exclude_rejects_matches() {
        let chain = FilterChain::new().exclude(ProtocolFilter::new([Protocol::Udp]));

        assert!(chain.matches(&sshd()));
        assert!(!chain.matches(&resolver()));
    }

    #[test]
    fn includes_use_or_semantics() {
        let chain = FilterChain::new()
            .include(ProcessRegexFilter::new("^sshd$").unwrap())
            .include(ProcessRegexFilter::new("^nginx$").unwrap());

        assert!(chain.matches(&sshd()));
        assert!(chain.matches(&nginx()));
        assert!(!chain.matches(&resolver()));
    }

    #[test]
    fn exclude_wins_over_include() {
        let chain = FilterChain::new()
            .include(ProtocolFilter::new([Protocol::Tcp]))
            .exclude(PortRangeFilter::single(22));

        assert!(!chain.matches(&sshd()));
        assert!(chain.matches(&nginx()));
    }

    #[test]
    fn counts_reflect_added_filters() {
        let chain = FilterChain::new()
            .include(ProtocolFilter::new([Protocol::Tcp]))
            .exclude(PortRangeFilter::single(22))
            .exclude(PortRangeFilter::single(23));

        assert_eq!(chain.include_count(), 1);
        assert_eq!(chain.exclude_count(), 2);
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
    }

    #[test]
    fn debug_shows_counts() {
        let chain = FilterChain::new().exclude(PortRangeFilter::single(22));
        let debug = format!("{chain:?}");

        assert!(debug.contains("include_count: 0"));
        assert!(debug.contains("exclude_count: 1"));
    }

    #[test]
    fn boxed_and_borrowed_filters_delegate() {
        let boxed: Box<dyn ObservationFilter> = Box::new(PortRangeFilter::single(22));
        assert!(boxed.matches(&sshd()));

        let filter = ProtocolFilter::new([Protocol::Udp]);
        let borrowed = &filter;
        assert!(borrowed.matches(&resolver()));
    }
}

// ============================================================================
// FilteredCollector Tests
// ============================================================================

mod filtered_collector {
    use super::*;

    #[test]
    fn drops_rejected_observations() {
        let inner = FixedCollector(vec![sshd(), resolver(), nginx(), unresolved_udp()]);
        let collector = FilteredCollector::new(
            inner,
            FilterChain::new().exclude(ProtocolFilter::new([Protocol::Udp])),
        );

        let batch = collector.collect().unwrap();

        assert_eq!(batch, vec![sshd(), nginx()]);
    }

    #[test]
    fn keeps_duplicates_for_normalizer() {
        let inner = FixedCollector(vec![sshd(), Observation::tcp(22, "socket:[101]", "sshd")]);
        let collector = FilteredCollector::new(inner, FilterChain::new());

        assert_eq!(collector.collect().unwrap().len(), 2);
    }

    #[test]
    fn propagates_inner_errors() {
        let collector = FilteredCollector::new(FailingCollector, FilterChain::new());

        let result = collector.collect();

        assert!(matches!(result, Err(CollectError::Platform { .. })));
    }

    #[test]
    fn inner_accessor_returns_wrapped_collector() {
        let collector = FilteredCollector::new(
            FixedCollector(vec![sshd()]),
            PortRangeFilter::single(22),
        );

        assert_eq!(collector.inner().0, vec![sshd()]);
    }
}
