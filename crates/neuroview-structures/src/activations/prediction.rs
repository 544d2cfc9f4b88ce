// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Terminal classification outcome reported by the inference service.
///
/// The service answers with either an ordinary class index or a sentinel
/// string (such as "Not a Number") for input it considers out of
/// distribution. Both arrive through the same loosely typed `prediction`
/// field, as a JSON number or string depending on the service version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PredictionLabel {
    /// An ordinary class label (a digit for the stock classifier).
    Class(u8),
    /// The out-of-distribution sentinel, carrying the service's verbatim label.
    OutOfDistribution(String),
}

impl PredictionLabel {
    /// Decodes the wire `prediction` value.
    ///
    /// Numbers and numeric strings become [`PredictionLabel::Class`];
    /// any other string becomes the sentinel.
    ///
    /// # Examples
    /// ```
    /// use neuroview_structures::activations::PredictionLabel;
    ///
    /// let three = PredictionLabel::new_from_wire_value(&serde_json::json!(3)).unwrap();
    /// assert_eq!(three, PredictionLabel::Class(3));
    ///
    /// let nan = PredictionLabel::new_from_wire_value(&serde_json::json!("Not a Number")).unwrap();
    /// assert!(nan.is_out_of_distribution());
    /// ```
    pub fn new_from_wire_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => {
                let class = n.as_u64().and_then(|class| u8::try_from(class).ok())?;
                Some(PredictionLabel::Class(class))
            }
            serde_json::Value::String(s) => match s.trim().parse::<u8>() {
                Ok(class) => Some(PredictionLabel::Class(class)),
                Err(_) => Some(PredictionLabel::OutOfDistribution(s.clone())),
            },
            _ => None,
        }
    }

    /// True when the service refused to assign an ordinary class.
    pub fn is_out_of_distribution(&self) -> bool {
        matches!(self, PredictionLabel::OutOfDistribution(_))
    }

    /// The class index, when one was assigned.
    pub fn class(&self) -> Option<u8> {
        match self {
            PredictionLabel::Class(class) => Some(*class),
            PredictionLabel::OutOfDistribution(_) => None,
        }
    }
}

impl Display for PredictionLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionLabel::Class(class) => write!(f, "{}", class),
            PredictionLabel::OutOfDistribution(label) => write!(f, "{}", label),
        }
    }
}
