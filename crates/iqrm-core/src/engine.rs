//! IQRM engine: validation and orchestration.
//!
//! Validation is eager and ordered (radius, threshold, geometric factor,
//! input, ignore indices); each failure has its own error variant. A run
//! then schedules lags, builds the vote graph, injects the ignore set and
//! arbitrates. The engine keeps no state between runs.

use serde::Serialize;
use tracing::{debug, debug_span, info, warn};

use iqrm_config::{validate_config, IgnorePolicy, IqrmConfig};

use crate::arbiter::arbitrate;
use crate::error::{Error, Result};
use crate::lags::generate_lags;
use crate::params::IqrmParams;
use crate::votes::{build_votes, VoteMap};

/// Outcome of one IQRM run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaskResult {
    /// `true` where the input is flagged as contaminated.
    pub mask: Vec<bool>,
    /// Accusations cast by each position, after ignore injection.
    pub votes_cast: VoteMap,
    /// Signed lags that were probed.
    pub lags: Vec<isize>,
}

impl MaskResult {
    pub fn flagged_indices(&self) -> Vec<usize> {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| m.then_some(i))
            .collect()
    }

    pub fn flagged_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Fraction of positions flagged; 0 for an empty mask.
    pub fn flagged_fraction(&self) -> f64 {
        if self.mask.is_empty() {
            0.0
        } else {
            self.flagged_count() as f64 / self.mask.len() as f64
        }
    }

    /// Split into the mask and the accusation map.
    pub fn into_parts(self) -> (Vec<bool>, VoteMap) {
        (self.mask, self.votes_cast)
    }
}

/// Reusable flagging engine.
#[derive(Debug, Clone)]
pub struct IqrmEngine {
    params: IqrmParams,
    ignore_policy: IgnorePolicy,
    known_bad: Vec<usize>,
}

impl IqrmEngine {
    /// Engine with validated parameters, rejecting out-of-range ignore indices.
    pub fn new(params: IqrmParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ignore_policy: IgnorePolicy::default(),
            known_bad: Vec::new(),
        })
    }

    /// Engine from a loaded configuration.
    ///
    /// Parameter problems surface as their specific variants; anything else
    /// the config validator rejects becomes [`Error::Config`].
    pub fn from_config(config: &IqrmConfig) -> Result<Self> {
        let params = IqrmParams::try_from(config)?;
        validate_config(config)?;
        Ok(Self::new(params)?
            .with_ignore_policy(config.ignore_policy)
            .with_known_bad(config.ignore.iter().copied()))
    }

    pub fn with_ignore_policy(mut self, policy: IgnorePolicy) -> Self {
        self.ignore_policy = policy;
        self
    }

    /// Positions ignored on every run, in addition to the per-run list.
    pub fn with_known_bad(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.known_bad.extend(indices);
        self
    }

    pub fn params(&self) -> &IqrmParams {
        &self.params
    }

    pub fn ignore_policy(&self) -> IgnorePolicy {
        self.ignore_policy
    }

    /// Signed lags this engine probes.
    pub fn lags(&self) -> Vec<isize> {
        generate_lags(self.params.radius, self.params.geometric_factor)
    }

    /// Flag outliers in `x`, treating `ignore` as known bad.
    pub fn run(&self, x: &[f64], ignore: &[usize]) -> Result<MaskResult> {
        validate_signal(x)?;
        let ignore = self.resolve_ignore(x.len(), ignore)?;

        let span = debug_span!(
            "iqrm.run",
            n = x.len(),
            radius = self.params.radius,
            threshold = self.params.threshold
        );
        let _enter = span.enter();

        let lags = self.lags();
        let mut graph = build_votes(x, &lags, self.params.threshold);
        debug!(
            lags = lags.len(),
            edges = graph.edge_count(),
            ignored = ignore.len(),
            "vote graph built"
        );

        let mask = arbitrate(&mut graph, &ignore);
        let result = MaskResult {
            mask,
            votes_cast: graph.cast_snapshot(),
            lags,
        };
        info!(
            n = x.len(),
            flagged = result.flagged_count(),
            edges = graph.edge_count(),
            "mask resolved"
        );
        Ok(result)
    }

    /// Merge per-run and known-bad indices, applying the ignore policy.
    fn resolve_ignore(&self, len: usize, ignore: &[usize]) -> Result<Vec<usize>> {
        let mut out = Vec::with_capacity(ignore.len() + self.known_bad.len());
        for &index in self.known_bad.iter().chain(ignore) {
            if index < len {
                out.push(index);
                continue;
            }
            match self.ignore_policy {
                IgnorePolicy::Reject => return Err(Error::InvalidIgnoreIndex { index, len }),
                IgnorePolicy::Drop => {
                    warn!(index, len, "dropping out-of-range ignore index");
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        Ok(out)
    }
}

/// Reject empty input and non-finite values.
fn validate_signal(x: &[f64]) -> Result<()> {
    if x.is_empty() {
        return Err(Error::InvalidInput("input is empty".to_string()));
    }
    if let Some((index, value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "non-finite value {} at index {}",
            value, index
        )));
    }
    Ok(())
}

/// One-shot IQRM: returns the mask and the accusation map.
///
/// Out-of-range `ignore` entries are rejected.
pub fn compute_mask(
    x: &[f64],
    radius: usize,
    threshold: f64,
    ignore: &[usize],
) -> Result<(Vec<bool>, VoteMap)> {
    let engine = IqrmEngine::new(IqrmParams::new(radius, threshold)?)?;
    Ok(engine.run(x, ignore)?.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiggle(n: usize) -> Vec<f64> {
        (0..n).map(|i| ((i * 7) % 5) as f64).collect()
    }

    #[test]
    fn validation_order() {
        let x = [f64::NAN];
        assert!(matches!(
            compute_mask(&x, 0, -1.0, &[9]),
            Err(Error::InvalidRadius { .. })
        ));
        assert!(matches!(
            compute_mask(&x, 2, -1.0, &[9]),
            Err(Error::InvalidThreshold { .. })
        ));
        assert!(matches!(
            compute_mask(&x, 2, 3.0, &[9]),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            compute_mask(&[1.0], 2, 3.0, &[9]),
            Err(Error::InvalidIgnoreIndex { index: 9, len: 1 })
        ));
    }

    #[test]
    fn empty_input_rejected() {
        let err = compute_mask(&[], 3, 3.0, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(err.code(), 20);
    }

    #[test]
    fn non_finite_message_names_index() {
        let mut x = wiggle(8);
        x[5] = f64::INFINITY;
        let err = compute_mask(&x, 3, 3.0, &[]).unwrap_err();
        assert!(err.to_string().contains("index 5"));
    }

    #[test]
    fn drop_policy_discards_out_of_range() {
        let engine = IqrmEngine::new(IqrmParams::default())
            .unwrap()
            .with_ignore_policy(IgnorePolicy::Drop);
        let result = engine.run(&wiggle(16), &[3, 99]).unwrap();
        assert_eq!(result.mask.len(), 16);
        assert!(result.mask[3]);
    }

    #[test]
    fn known_bad_merged_with_run_ignore() {
        let engine = IqrmEngine::new(IqrmParams::default())
            .unwrap()
            .with_known_bad([1, 4]);
        let result = engine.run(&wiggle(16), &[4, 7]).unwrap();
        for i in [1, 4, 7] {
            assert!(result.mask[i], "index {} not flagged", i);
            assert_eq!(result.votes_cast[&i].len(), 15);
        }
    }

    #[test]
    fn spike_flagged_and_reported() {
        let mut x = wiggle(64);
        x[20] = 1000.0;
        let engine = IqrmEngine::new(IqrmParams::new(3, 3.0).unwrap()).unwrap();
        let result = engine.run(&x, &[]).unwrap();
        assert_eq!(result.flagged_indices(), vec![20]);
        assert_eq!(result.flagged_count(), 1);
        assert!((result.flagged_fraction() - 1.0 / 64.0).abs() < 1e-12);
        assert_eq!(result.lags, vec![1, -1, 2, -2, 3, -3]);
    }

    #[test]
    fn from_config_carries_policy_and_known_bad() {
        let config = IqrmConfig {
            ignore: vec![2],
            ..IqrmConfig::default()
                .with_radius(4)
                .with_ignore_policy(IgnorePolicy::Drop)
        };
        let engine = IqrmEngine::from_config(&config).unwrap();
        assert_eq!(engine.params().radius, 4);
        assert_eq!(engine.ignore_policy(), IgnorePolicy::Drop);
        let result = engine.run(&wiggle(10), &[]).unwrap();
        assert!(result.mask[2]);
    }

    #[test]
    fn huge_geometric_factor_runs() {
        let params = IqrmParams::new(usize::MAX, 3.0)
            .unwrap()
            .with_geometric_factor(9_223_372_036_854_774_784.0)
            .unwrap();
        let engine = IqrmEngine::new(params).unwrap();
        let mut x = wiggle(2048);
        x[2047] = 1000.0;
        let result = engine.run(&x, &[]).unwrap();
        assert_eq!(result.lags.len(), 4);
        assert_eq!(result.mask.len(), 2048);
    }

    #[test]
    fn from_config_reports_specific_variants() {
        let config = IqrmConfig::default().with_threshold(0.0);
        assert!(matches!(
            IqrmEngine::from_config(&config),
            Err(Error::InvalidThreshold { .. })
        ));

        let config = IqrmConfig {
            schema_version: "0.1.0".to_string(),
            ..IqrmConfig::default()
        };
        assert!(matches!(IqrmEngine::from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn result_serializes() {
        let result = IqrmEngine::new(IqrmParams::default())
            .unwrap()
            .run(&wiggle(6), &[0])
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["mask"].as_array().unwrap().len(), 6);
        assert!(json["votes_cast"]["0"].is_array());
    }
}
