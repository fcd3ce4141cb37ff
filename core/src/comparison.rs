//! Distribution comparison by information criteria.

use dino_types::formatting::format_fixed;
use dino_types::{DistributionFit, FittedParams};

pub const AIC_NOTE: &str = "AIC (Akaike Information Criterion): Favors models with better \
     fit but penalizes complexity (lower is better).";
pub const BIC_NOTE: &str = "BIC (Bayesian Information Criterion): Stronger penalty for \
     complex models, better for larger datasets (lower is better).";
pub const CONSENSUS_NOTE: &str = "AIC and BIC agree";
pub const DISAGREEMENT_NOTE: &str = "AIC and BIC disagree. Consider model complexity.";
pub const LARGE_SAMPLE_NOTE: &str = "When AIC and BIC disagree, consider BIC for larger \
     datasets as it penalizes complexity more strongly.";

/// The winning candidate for one criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct BestFit {
    pub distribution: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agreement {
    Consensus,
    Disagreement,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DistributionComparison {
    pub best_aic: Option<BestFit>,
    pub best_bic: Option<BestFit>,
}

/// Lowest finite score; the first candidate wins ties.
fn minimum_by(
    fits: &[(String, DistributionFit)],
    score: impl Fn(&DistributionFit) -> Option<f64>,
) -> Option<BestFit> {
    let mut best: Option<BestFit> = None;
    for (name, fit) in fits {
        let Some(value) = score(fit).filter(|v| v.is_finite()) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| value < b.value) {
            best = Some(BestFit {
                distribution: name.clone(),
                value,
            });
        }
    }
    best
}

impl DistributionComparison {
    pub fn from_fits(fits: &[(String, DistributionFit)]) -> Self {
        Self {
            best_aic: minimum_by(fits, |f| f.aic),
            best_bic: minimum_by(fits, |f| f.bic),
        }
    }

    /// `None` unless both criteria produced a winner.
    pub fn agreement(&self) -> Option<Agreement> {
        let (aic, bic) = (self.best_aic.as_ref()?, self.best_bic.as_ref()?);
        Some(if aic.distribution == bic.distribution {
            Agreement::Consensus
        } else {
            Agreement::Disagreement
        })
    }
}

/// Parameter names in the order the fitter reports them.
pub fn parameter_names(distribution: &str) -> Option<&'static [&'static str]> {
    let names: &'static [&'static str] = match distribution.to_ascii_lowercase().as_str() {
        "weibull" => &["shape", "scale"],
        "gamma" => &["shape", "scale"],
        "lognormal" => &["s", "scale"],
        "loglogistic" => &["c", "scale"],
        "exponential" => &["scale"],
        "pareto" => &["alpha", "xm"],
        _ => return None,
    };
    Some(names)
}

/// `name = value` pairs for display.
///
/// Positional values are named per distribution family when it is known,
/// and numbered otherwise.
pub fn describe_params(distribution: Option<&str>, params: &FittedParams) -> Vec<(String, String)> {
    match params {
        FittedParams::Named(map) => map
            .iter()
            .map(|(name, value)| (name.clone(), format_fixed(*value, 4)))
            .collect(),
        FittedParams::Positional(values) => {
            let names = distribution.and_then(parameter_names).unwrap_or(&[]);
            values
                .iter()
                .enumerate()
                .map(|(i, value)| {
                    let name = names
                        .get(i)
                        .map_or_else(|| format!("param {}", i + 1), |n| n.to_string());
                    (name, format_fixed(*value, 4))
                })
                .collect()
        }
    }
}

/// Single-line rendering of [`describe_params`].
pub fn params_line(distribution: Option<&str>, params: Option<&FittedParams>) -> String {
    match params {
        Some(params) => describe_params(distribution, params)
            .into_iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect::<Vec<_>>()
            .join(", "),
        None => dino_types::formatting::NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(aic: f64, bic: f64) -> DistributionFit {
        DistributionFit {
            aic: Some(aic),
            bic: Some(bic),
            ..Default::default()
        }
    }

    #[test]
    fn aic_and_bic_can_disagree() {
        let fits = vec![("A".to_string(), fit(10.0, 20.0)), ("B".to_string(), fit(5.0, 25.0))];
        let cmp = DistributionComparison::from_fits(&fits);
        assert_eq!(cmp.best_aic.as_ref().unwrap().distribution, "B");
        assert_eq!(cmp.best_bic.as_ref().unwrap().distribution, "A");
        assert_eq!(cmp.agreement(), Some(Agreement::Disagreement));
    }

    #[test]
    fn ties_keep_first_candidate() {
        let fits = vec![("A".to_string(), fit(5.0, 5.0)), ("B".to_string(), fit(5.0, 5.0))];
        let cmp = DistributionComparison::from_fits(&fits);
        assert_eq!(cmp.best_aic.as_ref().unwrap().distribution, "A");
        assert_eq!(cmp.agreement(), Some(Agreement::Consensus));
    }

    #[test]
    fn failed_candidates_are_ignored() {
        let failed = DistributionFit {
            error: Some("did not converge".into()),
            ..Default::default()
        };
        let fits = vec![
            ("pareto".to_string(), failed),
            ("weibull".to_string(), fit(12.0, 14.0)),
        ];
        let cmp = DistributionComparison::from_fits(&fits);
        assert_eq!(cmp.best_aic.as_ref().unwrap().distribution, "weibull");
        assert_eq!(cmp.best_bic.as_ref().unwrap().distribution, "weibull");
    }

    #[test]
    fn no_scores_means_no_agreement() {
        let cmp = DistributionComparison::from_fits(&[]);
        assert_eq!(cmp.agreement(), None);
    }

    #[test]
    fn positional_params_are_named_per_family() {
        let params = FittedParams::Positional(vec![Some(1.5), Some(10.25)]);
        assert_eq!(
            params_line(Some("Weibull"), Some(&params)),
            "shape = 1.5000, scale = 10.2500"
        );
        assert_eq!(
            params_line(Some("mystery"), Some(&params)),
            "param 1 = 1.5000, param 2 = 10.2500"
        );
        assert_eq!(params_line(Some("weibull"), None), "N/A");
    }

    #[test]
    fn extra_positional_values_are_numbered() {
        let params = FittedParams::Positional(vec![Some(2.0), None, Some(3.0)]);
        let described = describe_params(Some("exponential"), &params);
        assert_eq!(described[0], ("scale".to_string(), "2.0000".to_string()));
        assert_eq!(described[1], ("param 2".to_string(), "N/A".to_string()));
    }
}
