//! Model selection and the named-parameter construction boundary.
//!
//! Model choice is a closed set ([`ModelKind`]); each variant registers the
//! parameter names it accepts. Everything that builds a [`ModelConfig`] from
//! loosely typed input (a name plus a key/value map, or a TOML/JSON
//! document) goes through [`ModelConfig::from_named`], so unknown models and
//! unknown keys are rejected in exactly one place.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use pathsim_core::math::correlation::CorrelationMatrix;
use pathsim_core::types::ConfigurationError;
use serde::{Deserialize, Serialize};

use super::gbm::GbmConfig;

/// Supported stochastic models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    /// Geometric Brownian Motion
    GeoBrownian,
}

impl ModelKind {
    /// Every supported model.
    pub const ALL: [ModelKind; 1] = [ModelKind::GeoBrownian];

    /// Canonical model name.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::GeoBrownian => "GeoBrownian",
        }
    }

    /// Parameter keys accepted by this model.
    pub fn parameter_names(&self) -> &'static [&'static str] {
        match self {
            ModelKind::GeoBrownian => &["sigma", "r", "rho"],
        }
    }
}

impl FromStr for ModelKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownModel(s.to_string()))
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Loosely typed parameter value.
///
/// Deserialises untagged: `0.2`, `[0.2, 0.3]` or `[[1.0, 0.5], [0.5, 1.0]]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Single number
    Scalar(f64),
    /// List of numbers
    Vector(Vec<f64>),
    /// List of rows
    Matrix(Vec<Vec<f64>>),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(value: Vec<f64>) -> Self {
        ParamValue::Vector(value)
    }
}

impl From<Vec<Vec<f64>>> for ParamValue {
    fn from(value: Vec<Vec<f64>>) -> Self {
        ParamValue::Matrix(value)
    }
}

/// Validated model configuration.
///
/// Deserialising goes through [`ModelConfig::from_named`]:
///
/// ```rust
/// use pathsim_engine::model::ModelConfig;
///
/// let config: ModelConfig = serde_json::from_str(r#"{
///     "model": "GeoBrownian",
///     "initial_price": 100.0,
///     "sigma": [0.2, 0.2],
///     "r": 0.03,
///     "rho": [[1.0, 0.5], [0.5, 1.0]]
/// }"#).unwrap();
/// assert_eq!(config.dimension(), 2);
///
/// let bad: Result<ModelConfig, _> = serde_json::from_str(r#"{
///     "model": "GeoBrownian", "initial_price": 100.0, "sigma": 0.2, "r": 0.03, "mu": 0.1
/// }"#);
/// assert!(bad.is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawModelConfig")]
pub enum ModelConfig {
    /// Geometric Brownian Motion
    GeoBrownian(GbmConfig),
}

impl ModelConfig {
    /// Builds a configuration from a model name and named parameters.
    ///
    /// Check order: model name, then every key against the model's
    /// whitelist, then parameter shapes and values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pathsim_engine::model::{ModelConfig, ParamValue};
    ///
    /// let mut params = BTreeMap::new();
    /// params.insert("sigma".to_string(), ParamValue::from(0.2));
    /// params.insert("r".to_string(), ParamValue::from(0.03));
    ///
    /// let config = ModelConfig::from_named("GeoBrownian", 100.0, &params).unwrap();
    /// assert_eq!(config.dimension(), 1);
    /// ```
    pub fn from_named(
        model: &str,
        initial_price: f64,
        params: &BTreeMap<String, ParamValue>,
    ) -> Result<Self, ConfigurationError> {
        let kind = ModelKind::from_str(model)?;

        if let Some(unknown) = params
            .keys()
            .find(|key| !kind.parameter_names().contains(&key.as_str()))
        {
            return Err(ConfigurationError::UnknownParameter {
                model: kind.name(),
                name: unknown.clone(),
            });
        }

        let config = match kind {
            ModelKind::GeoBrownian => {
                ModelConfig::GeoBrownian(gbm_from_named(initial_price, params)?)
            }
        };

        tracing::debug!(
            model = %kind,
            dimension = config.dimension(),
            "model configuration accepted"
        );
        Ok(config)
    }

    /// Selected model.
    pub fn kind(&self) -> ModelKind {
        match self {
            ModelConfig::GeoBrownian(_) => ModelKind::GeoBrownian,
        }
    }

    /// Number of simulated assets.
    pub fn dimension(&self) -> usize {
        match self {
            ModelConfig::GeoBrownian(gbm) => gbm.dimension(),
        }
    }

    /// Initial price shared by every asset.
    pub fn initial_price(&self) -> f64 {
        match self {
            ModelConfig::GeoBrownian(gbm) => gbm.initial_price(),
        }
    }
}

impl From<GbmConfig> for ModelConfig {
    fn from(config: GbmConfig) -> Self {
        ModelConfig::GeoBrownian(config)
    }
}

fn gbm_from_named(
    initial_price: f64,
    params: &BTreeMap<String, ParamValue>,
) -> Result<GbmConfig, ConfigurationError> {
    const MODEL: &str = "GeoBrownian";

    let sigma = match params.get("sigma") {
        Some(ParamValue::Scalar(v)) => vec![*v],
        Some(ParamValue::Vector(v)) => v.clone(),
        Some(ParamValue::Matrix(_)) => {
            return Err(ConfigurationError::InvalidParameterType {
                name: "sigma",
                expected: "a number or a list of numbers",
            })
        }
        None => {
            return Err(ConfigurationError::MissingParameter {
                model: MODEL,
                name: "sigma",
            })
        }
    };

    let r = match params.get("r") {
        Some(ParamValue::Scalar(v)) => *v,
        Some(_) => {
            return Err(ConfigurationError::InvalidParameterType {
                name: "r",
                expected: "a single number",
            })
        }
        None => {
            return Err(ConfigurationError::MissingParameter {
                model: MODEL,
                name: "r",
            })
        }
    };

    // A single asset never consults rho, so it is not parsed either.
    let rho = match params.get("rho") {
        _ if sigma.len() <= 1 => None,
        Some(ParamValue::Matrix(rows)) => Some(CorrelationMatrix::from_rows(rows)?),
        Some(_) => {
            return Err(ConfigurationError::InvalidParameterType {
                name: "rho",
                expected: "a square matrix given as a list of rows",
            })
        }
        None => None,
    };

    GbmConfig::new(initial_price, sigma, r, rho)
}

/// Wire shape of [`ModelConfig`].
#[derive(Deserialize)]
struct RawModelConfig {
    model: String,
    #[serde(alias = "s_0")]
    initial_price: f64,
    #[serde(flatten)]
    params: BTreeMap<String, ParamValue>,
}

impl TryFrom<RawModelConfig> for ModelConfig {
    type Error = ConfigurationError;

    fn try_from(raw: RawModelConfig) -> Result<Self, Self::Error> {
        ModelConfig::from_named(&raw.model, raw.initial_price, &raw.params)
    }
}
