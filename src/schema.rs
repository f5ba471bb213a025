//! Field schema and network configuration.
//!
//! A network is described once, at construction, by an ordered list of
//! [`FieldSpec`]s plus a few network-wide settings. Field count and field
//! widths never change afterwards.
//!
//! Two equivalent descriptions are accepted:
//!
//! - [`NetworkConfig`]: one struct per field (the native form).
//! - [`ColumnarSchema`]: one array per attribute, the layout drivers often
//!   keep in configuration files. Converting it checks that every column
//!   has exactly one entry per field.

use crate::error::{ArtError, Result};
use crate::kernel::{LearningOp, Metric, Readout};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The role a field plays in an input→action→reward association.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    State,
    Action,
    Reward,
}

/// Static configuration of one field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Vector width (after any complement coding)
    pub size: usize,
    pub role: FieldRole,
    /// Operator used for the composite temperature
    pub similarity: Metric,
    /// Operator used when a category learns
    pub learning: LearningOp,
    /// Blend rate for the learning operator, in [0, 1]
    pub learning_rate: f64,
    /// Weight of this field in the composite temperature
    pub gamma: f64,
    /// Choice parameter; keeps the choice functions away from 0/0
    pub alpha: f64,
    /// Whether the field takes part in scoring and vigilance
    pub active: bool,
    /// Whether adaptive search may raise this field's vigilance
    pub vigilance_raising: bool,
    pub learn_vigilance: f64,
    pub perform_vigilance: f64,
}

impl FieldSpec {
    /// A field with the stock defaults: fuzzy-min choice, linear learning
    /// at rate 1.0, gamma 1.0, alpha 0.1, active, vigilances 0.
    pub fn new(size: usize, role: FieldRole) -> Self {
        Self {
            size,
            role,
            similarity: Metric::FuzzyMin,
            learning: LearningOp::LinearBlend,
            learning_rate: 1.0,
            gamma: 1.0,
            alpha: 0.1,
            active: true,
            vigilance_raising: false,
            learn_vigilance: 0.0,
            perform_vigilance: 0.0,
        }
    }

    pub fn with_similarity(mut self, metric: Metric) -> Self {
        self.similarity = metric;
        self
    }

    pub fn with_learning(mut self, op: LearningOp, rate: f64) -> Self {
        self.learning = op;
        self.learning_rate = rate;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_vigilance(mut self, learn: f64, perform: f64) -> Self {
        self.learn_vigilance = learn;
        self.perform_vigilance = perform;
        self
    }

    pub fn with_vigilance_raising(mut self, enabled: bool) -> Self {
        self.vigilance_raising = enabled;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Vigilance for a learning or a performing step.
    pub fn vigilance(&self, learning: bool) -> f64 {
        if learning {
            self.learn_vigilance
        } else {
            self.perform_vigilance
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.size == 0 {
            return Err(ArtError::InvalidSchema(format!(
                "field {index}: size must be > 0"
            )));
        }
        if !(0.0..=1.0).contains(&self.learning_rate) {
            return Err(ArtError::InvalidSchema(format!(
                "field {index}: learning_rate must be in [0, 1]"
            )));
        }
        if !self.gamma.is_finite() || !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ArtError::InvalidSchema(format!(
                "field {index}: gamma must be finite and alpha finite and >= 0"
            )));
        }
        if self.learn_vigilance.is_nan() || self.perform_vigilance.is_nan() {
            return Err(ArtError::InvalidSchema(format!(
                "field {index}: vigilance must not be NaN"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}[{}] choice={:?} learn={:?}@{} gamma={} alpha={} vigilance={}/{}{}{}",
            self.role,
            self.size,
            self.similarity,
            self.learning,
            self.learning_rate,
            self.gamma,
            self.alpha,
            self.learn_vigilance,
            self.perform_vigilance,
            if self.active { "" } else { " inactive" },
            if self.vigilance_raising { " raising" } else { "" },
        )
    }
}

/// Parameters for the confidence bookkeeping used by reactive control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceParams {
    pub erosion_rate: f64,
    pub reinforcement_rate: f64,
    pub decay_rate: f64,
    /// Categories below this confidence are pruned
    pub confidence_threshold: f64,
    /// Pruning only runs once the store holds this many categories
    pub pruning_threshold: usize,
}

impl ConfidenceParams {
    pub fn new(
        erosion_rate: f64,
        reinforcement_rate: f64,
        decay_rate: f64,
        confidence_threshold: f64,
        pruning_threshold: usize,
    ) -> Self {
        Self {
            erosion_rate,
            reinforcement_rate,
            decay_rate,
            confidence_threshold,
            pruning_threshold,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("erosion_rate", self.erosion_rate),
            ("reinforcement_rate", self.reinforcement_rate),
            ("decay_rate", self.decay_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ArtError::InvalidSchema(format!(
                    "{name} must be in [0, 1]"
                )));
            }
        }
        if self.confidence_threshold.is_nan() {
            return Err(ArtError::InvalidSchema(
                "confidence_threshold must not be NaN".to_string(),
            ));
        }
        Ok(())
    }
}

/// Complete configuration of a resonance network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub readout: Readout,
    /// Step added above the observed match when adaptive search raises a
    /// field's vigilance
    #[serde(default)]
    pub adaptive_vigilance_rate: f64,
    #[serde(default)]
    pub confidence: ConfidenceParams,
}

impl NetworkConfig {
    /// Direct readout, no vigilance raising step, zero confidence rates.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            readout: Readout::Direct,
            adaptive_vigilance_rate: 0.0,
            confidence: ConfidenceParams::default(),
        }
    }

    pub fn with_readout(mut self, readout: Readout) -> Self {
        self.readout = readout;
        self
    }

    pub fn with_adaptive_vigilance_rate(mut self, rate: f64) -> Self {
        self.adaptive_vigilance_rate = rate;
        self
    }

    pub fn with_confidence(mut self, confidence: ConfidenceParams) -> Self {
        self.confidence = confidence;
        self
    }

    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: NetworkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(ArtError::InvalidSchema(
                "network needs at least one field".to_string(),
            ));
        }
        for (i, field) in self.fields.iter().enumerate() {
            field.validate(i)?;
        }
        if !self.adaptive_vigilance_rate.is_finite() {
            return Err(ArtError::InvalidSchema(
                "adaptive_vigilance_rate must be finite".to_string(),
            ));
        }
        self.confidence.validate()
    }

    /// Per-field widths, in schema order.
    pub fn sizes(&self) -> Vec<usize> {
        self.fields.iter().map(|f| f.size).collect()
    }

    /// Index of the first field with the given role.
    pub fn first_with_role(&self, role: FieldRole) -> Option<usize> {
        self.fields.iter().position(|f| f.role == role)
    }
}

impl fmt::Display for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} fields, readout={:?}, adaptive_vigilance_rate={}",
            self.fields.len(),
            self.readout,
            self.adaptive_vigilance_rate
        )?;
        for (i, field) in self.fields.iter().enumerate() {
            writeln!(f, "  [{i}] {field}")?;
        }
        Ok(())
    }
}

/// Column-per-attribute schema description.
///
/// Every vector must have one entry per field; `features_sizes` defines the
/// field count.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnarSchema {
    pub features_sizes: Vec<usize>,
    pub fields_class: Vec<FieldRole>,
    pub temperature_op: Vec<Metric>,
    pub learning_op: Vec<LearningOp>,
    pub learning_rate: Vec<f64>,
    pub gammas: Vec<f64>,
    pub alphas: Vec<f64>,
    pub active_fields: Vec<bool>,
    pub adaptive_vigilance_raising: Vec<bool>,
    pub learning_vigilances: Vec<f64>,
    pub performing_vigilances: Vec<f64>,
    #[serde(default)]
    pub fuzzy_readout: bool,
    #[serde(default)]
    pub adaptive_vigilance_rate: f64,
}

impl ColumnarSchema {
    fn check_column(column: &'static str, expected: usize, got: usize) -> Result<()> {
        if expected != got {
            return Err(ArtError::SchemaMismatch {
                column,
                expected,
                got,
            });
        }
        Ok(())
    }
}

impl TryFrom<ColumnarSchema> for NetworkConfig {
    type Error = ArtError;

    fn try_from(schema: ColumnarSchema) -> Result<Self> {
        let n = schema.features_sizes.len();
        ColumnarSchema::check_column("fields_class", n, schema.fields_class.len())?;
        ColumnarSchema::check_column("temperature_op", n, schema.temperature_op.len())?;
        ColumnarSchema::check_column("learning_op", n, schema.learning_op.len())?;
        ColumnarSchema::check_column("learning_rate", n, schema.learning_rate.len())?;
        ColumnarSchema::check_column("gammas", n, schema.gammas.len())?;
        ColumnarSchema::check_column("alphas", n, schema.alphas.len())?;
        ColumnarSchema::check_column("active_fields", n, schema.active_fields.len())?;
        ColumnarSchema::check_column(
            "adaptive_vigilance_raising",
            n,
            schema.adaptive_vigilance_raising.len(),
        )?;
        ColumnarSchema::check_column(
            "learning_vigilances",
            n,
            schema.learning_vigilances.len(),
        )?;
        ColumnarSchema::check_column(
            "performing_vigilances",
            n,
            schema.performing_vigilances.len(),
        )?;

        let fields = (0..n)
            .map(|i| FieldSpec {
                size: schema.features_sizes[i],
                role: schema.fields_class[i],
                similarity: schema.temperature_op[i],
                learning: schema.learning_op[i],
                learning_rate: schema.learning_rate[i],
                gamma: schema.gammas[i],
                alpha: schema.alphas[i],
                active: schema.active_fields[i],
                vigilance_raising: schema.adaptive_vigilance_raising[i],
                learn_vigilance: schema.learning_vigilances[i],
                perform_vigilance: schema.performing_vigilances[i],
            })
            .collect();

        let readout = if schema.fuzzy_readout {
            Readout::Fuzzy
        } else {
            Readout::Direct
        };

        let config = NetworkConfig::new(fields)
            .with_readout(readout)
            .with_adaptive_vigilance_rate(schema.adaptive_vigilance_rate);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columnar(n: usize) -> ColumnarSchema {
        ColumnarSchema {
            features_sizes: vec![4; n],
            fields_class: vec![FieldRole::State; n],
            temperature_op: vec![Metric::FuzzyMin; n],
            learning_op: vec![LearningOp::LinearBlend; n],
            learning_rate: vec![1.0; n],
            gammas: vec![0.5; n],
            alphas: vec![0.1; n],
            active_fields: vec![true; n],
            adaptive_vigilance_raising: vec![false; n],
            learning_vigilances: vec![0.9; n],
            performing_vigilances: vec![0.0; n],
            fuzzy_readout: true,
            adaptive_vigilance_rate: 0.001,
        }
    }

    #[test]
    fn test_field_defaults() {
        let f = FieldSpec::new(4, FieldRole::State);
        assert_eq!(f.similarity, Metric::FuzzyMin);
        assert_eq!(f.learning, LearningOp::LinearBlend);
        assert!(f.active);
        assert_eq!(f.vigilance(true), 0.0);
    }

    #[test]
    fn test_vigilance_selection() {
        let f = FieldSpec::new(2, FieldRole::State).with_vigilance(0.9, 0.2);
        assert_eq!(f.vigilance(true), 0.9);
        assert_eq!(f.vigilance(false), 0.2);
    }

    #[test]
    fn test_validate_rejects_empty_and_zero_width() {
        assert!(matches!(
            NetworkConfig::new(vec![]).validate(),
            Err(ArtError::InvalidSchema(_))
        ));
        assert!(matches!(
            NetworkConfig::new(vec![FieldSpec::new(0, FieldRole::State)]).validate(),
            Err(ArtError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let field = FieldSpec::new(2, FieldRole::State).with_learning(LearningOp::LinearBlend, 1.5);
        assert!(NetworkConfig::new(vec![field]).validate().is_err());

        let config = NetworkConfig::new(vec![FieldSpec::new(2, FieldRole::State)])
            .with_confidence(ConfidenceParams::new(2.0, 0.0, 0.0, 0.0, 0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_columnar_conversion() {
        let config = NetworkConfig::try_from(columnar(3)).unwrap();
        assert_eq!(config.fields.len(), 3);
        assert_eq!(config.readout, Readout::Fuzzy);
        assert_eq!(config.fields[1].learn_vigilance, 0.9);
        assert_eq!(config.sizes(), vec![4, 4, 4]);
    }

    #[test]
    fn test_columnar_mismatch_reports_column() {
        let mut schema = columnar(3);
        schema.gammas.pop();
        match NetworkConfig::try_from(schema) {
            Err(ArtError::SchemaMismatch {
                column,
                expected,
                got,
            }) => {
                assert_eq!(column, "gammas");
                assert_eq!(expected, 3);
                assert_eq!(got, 2);
            }
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "fields": [
                {
                    "size": 4, "role": "state", "similarity": "fuzzy_min",
                    "learning": "linear_blend", "learning_rate": 0.5,
                    "gamma": 0.5, "alpha": 0.1, "active": true,
                    "vigilance_raising": false,
                    "learn_vigilance": 0.9, "perform_vigilance": 0.0
                },
                {
                    "size": 2, "role": "reward", "similarity": "exact",
                    "learning": "none", "learning_rate": 1.0,
                    "gamma": 0.0, "alpha": 0.1, "active": false,
                    "vigilance_raising": false,
                    "learn_vigilance": 0.0, "perform_vigilance": 0.0
                }
            ],
            "readout": "fuzzy"
        }"#;
        let config = NetworkConfig::from_json(json).unwrap();
        assert_eq!(config.fields[0].learning_rate, 0.5);
        assert_eq!(config.fields[1].learning, LearningOp::Frozen);
        assert_eq!(config.readout, Readout::Fuzzy);
        assert_eq!(config.confidence, ConfidenceParams::default());
        assert_eq!(config.first_with_role(FieldRole::Reward), Some(1));
    }

    #[test]
    fn test_from_json_parse_error() {
        assert!(matches!(
            NetworkConfig::from_json("{not json"),
            Err(ArtError::JsonParse(_))
        ));
    }

    #[test]
    fn test_display_lists_fields() {
        let config = NetworkConfig::new(vec![
            FieldSpec::new(4, FieldRole::State),
            FieldSpec::new(2, FieldRole::Reward).active(false),
        ]);
        let text = config.to_string();
        assert!(text.contains("2 fields"));
        assert!(text.contains("Reward[2]"));
        assert!(text.contains("inactive"));
    }
}
