//! Observation filtering for selective monitoring.
//!
//! # Design
//!
//! - **Pure Matchers**: [`ProtocolFilter`], [`ProcessRegexFilter`] and
//!   [`PortRangeFilter`] only answer "does this observation match?" without
//!   include/exclude semantics.
//! - **Filter Chain**: [`FilterChain`] combines matchers:
//!   - Exclude filters: AND logic (must pass ALL excludes)
//!   - Include filters: OR logic (pass ANY include, empty = match all)
//! - **Decorator**: [`FilteredCollector`] applies filtering transparently
//!   to any [`Collector`] implementation, before normalization.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use regex::Regex;

use super::{CollectError, Collector, Observation, Protocol};

/// Trait for filtering listening socket observations.
///
/// Filters must be `Send + Sync` so a filtered collector can be moved into
/// the polling task.
pub trait ObservationFilter: Send + Sync {
    /// Returns `true` if the observation matches this filter.
    fn matches(&self, observation: &Observation) -> bool;
}

// ============================================================================
// ProtocolFilter - Pure matcher by protocol
// ============================================================================

/// Matches observations whose protocol is in the configured set.
///
/// # Examples
///
/// ```
/// use portwatch::socket::filter::{ObservationFilter, ProtocolFilter};
/// use portwatch::socket::{Observation, Protocol};
///
/// let filter = ProtocolFilter::new([Protocol::Tcp]);
///
/// assert!(filter.matches(&Observation::tcp(22, "", "sshd")));
/// assert!(!filter.matches(&Observation::udp(53, "", "dns")));
/// ```
#[derive(Debug, Clone)]
pub struct ProtocolFilter {
    protocols: HashSet<Protocol>,
}

impl ProtocolFilter {
    /// Creates a filter matching any of the specified protocols.
    #[must_use]
    pub fn new(protocols: impl IntoIterator<Item = Protocol>) -> Self {
        Self {
            protocols: protocols.into_iter().collect(),
        }
    }

    /// Returns true if no protocols are configured (matches nothing).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }

    /// Returns a reference to the set of protocols.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // HashSet is not const-compatible
    pub fn protocols(&self) -> &HashSet<Protocol> {
        &self.protocols
    }
}

impl ObservationFilter for ProtocolFilter {
    fn matches(&self, observation: &Observation) -> bool {
        self.protocols.contains(&observation.protocol)
    }
}

// ============================================================================
// ProcessRegexFilter - Pure matcher by process name
// ============================================================================

/// Matches observations whose process name matches a regex.
///
/// Unresolved processes have an empty name, so `^$` selects them.
///
/// # Examples
///
/// ```
/// use portwatch::socket::filter::{ObservationFilter, ProcessRegexFilter};
/// use portwatch::socket::Observation;
///
/// let filter = ProcessRegexFilter::new(r"^docker").unwrap();
///
/// assert!(filter.matches(&Observation::tcp(2375, "", "dockerd")));
/// assert!(!filter.matches(&Observation::tcp(22, "", "sshd")));
/// ```
#[derive(Debug)]
pub struct ProcessRegexFilter {
    pattern: Regex,
}

impl ProcessRegexFilter {
    /// Creates a process filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns a reference to the regex pattern.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl ObservationFilter for ProcessRegexFilter {
    fn matches(&self, observation: &Observation) -> bool {
        self.pattern.is_match(&observation.process)
    }
}

// ============================================================================
// PortRangeFilter - Pure matcher by port range
// ============================================================================

/// Matches observations whose port lies in an inclusive range.
///
/// # Examples
///
/// ```
/// use portwatch::socket::filter::{ObservationFilter, PortRangeFilter};
/// use portwatch::socket::Observation;
///
/// let ephemeral = PortRangeFilter::new(32768..=60999);
///
/// assert!(ephemeral.matches(&Observation::udp(40000, "", "")));
/// assert!(!ephemeral.matches(&Observation::tcp(443, "", "")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRangeFilter {
    range: RangeInclusive<u16>,
}

impl PortRangeFilter {
    /// Creates a filter matching ports in `range`.
    #[must_use]
    pub const fn new(range: RangeInclusive<u16>) -> Self {
        Self { range }
    }

    /// Creates a filter matching exactly one port.
    #[must_use]
    pub const fn single(port: u16) -> Self {
        Self::new(port..=port)
    }

    /// Returns the configured range.
    #[must_use]
    pub const fn range(&self) -> &RangeInclusive<u16> {
        &self.range
    }
}

impl ObservationFilter for PortRangeFilter {
    fn matches(&self, observation: &Observation) -> bool {
        self.range.contains(&observation.port)
    }
}

// ============================================================================
// FilterChain - Include OR / Exclude AND semantics
// ============================================================================

/// Filter chain with include/exclude semantics.
///
/// Evaluation order:
/// 1. **Exclude filters (AND)**: Any match → reject.
/// 2. **Include filters (OR)**: Any match → accept. Empty includes = match all.
///
/// # Examples
///
/// ```
/// use portwatch::socket::filter::{
///     FilterChain, ObservationFilter, PortRangeFilter, ProtocolFilter,
/// };
/// use portwatch::socket::{Observation, Protocol};
///
/// let chain = FilterChain::new()
///     .exclude(PortRangeFilter::single(53))
///     .include(ProtocolFilter::new([Protocol::Udp]));
///
/// assert!(chain.matches(&Observation::udp(123, "", "ntpd")));
/// assert!(!chain.matches(&Observation::udp(53, "", "dns")));  // Excluded
/// assert!(!chain.matches(&Observation::tcp(22, "", "sshd"))); // Not included
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn ObservationFilter>>,
    excludes: Vec<Box<dyn ObservationFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all observations).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include filter (OR semantics).
    #[must_use]
    pub fn include<F: ObservationFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude filter (AND semantics - must not match ANY).
    #[must_use]
    pub fn exclude<F: ObservationFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns the number of include filters.
    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    /// Returns the number of exclude filters.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Returns the total number of filters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.includes.len() + self.excludes.len()
    }

    /// Returns true if no filters are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl ObservationFilter for FilterChain {
    fn matches(&self, observation: &Observation) -> bool {
        if self.excludes.iter().any(|f| f.matches(observation)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(observation))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

// ============================================================================
// FilteredCollector - Decorator
// ============================================================================

/// A collector decorator that drops observations rejected by a filter.
///
/// Filtering happens on the raw batch, so the normalizer only ever sees
/// observations the user asked to watch.
///
/// # Type Parameters
///
/// - `C`: The inner collector type (implements [`Collector`])
/// - `F`: The filter type (implements [`ObservationFilter`])
#[derive(Debug)]
pub struct FilteredCollector<C, F> {
    inner: C,
    filter: F,
}

impl<C, F> FilteredCollector<C, F> {
    /// Creates a new filtered collector.
    #[must_use]
    pub const fn new(inner: C, filter: F) -> Self {
        Self { inner, filter }
    }

    /// Returns a reference to the inner collector.
    pub const fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: Collector, F: ObservationFilter> Collector for FilteredCollector<C, F> {
    fn collect(&self) -> Result<Vec<Observation>, CollectError> {
        let batch = self.inner.collect()?;
        Ok(batch
            .into_iter()
            .filter(|observation| self.filter.matches(observation))
            .collect())
    }
}

impl<T: ObservationFilter + ?Sized> ObservationFilter for &T {
    fn matches(&self, observation: &Observation) -> bool {
        (*self).matches(observation)
    }
}

impl ObservationFilter for Box<dyn ObservationFilter> {
    fn matches(&self, observation: &Observation) -> bool {
        self.as_ref().matches(observation)
    }
}
