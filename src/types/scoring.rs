use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Credit,
    Percent,
}

impl Scale {
    pub fn bounds(self) -> (u32, u32) {
        match self {
            Scale::Credit => (300, 850),
            Scale::Percent => (0, 100),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Scale::Credit => "300-850",
            Scale::Percent => "0-100",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
    pub name: String,
    pub score: f64,
    pub weight: f64,
    pub description: String,
}

impl FactorScore {
    pub fn new(name: &str, score: f64, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            score,
            weight,
            description: description.into(),
        }
    }
}

/// Named factors in the fixed order of the policy that produced them.
/// Serializes as a map keyed by factor name, in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorScore>,
}

#[derive(Serialize)]
struct FactorEntry<'a> {
    score: f64,
    weight: f64,
    description: &'a str,
}

impl Serialize for ScoreBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.factors.len()))?;
        for factor in &self.factors {
            let entry = FactorEntry {
                score: factor.score,
                weight: factor.weight,
                description: &factor.description,
            };
            map.serialize_entry(&factor.name, &entry)?;
        }
        map.end()
    }
}

impl ScoreBreakdown {
    pub fn get(&self, name: &str) -> Option<&FactorScore> {
        self.factors.iter().find(|factor| factor.name == name)
    }

    pub fn weight_sum(&self) -> f64 {
        self.factors.iter().map(|factor| factor.weight).sum()
    }

    pub fn weighted_sum(&self) -> f64 {
        self.factors
            .iter()
            .map(|factor| factor.score * factor.weight)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditScore {
    pub total: u32,
    pub scale: Scale,
    pub breakdown: ScoreBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    pub fn from_score(score: u32) -> Self {
        match score {
            80..=u32::MAX => Rating::Excellent,
            60..=79 => Rating::Good,
            40..=59 => Rating::Fair,
            _ => Rating::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rating::Excellent => {
                "This wallet demonstrates excellent blockchain activity and financial health."
            }
            Rating::Good => {
                "This wallet shows good blockchain activity and reasonable financial health."
            }
            Rating::Fair => {
                "This wallet has fair blockchain activity but could improve in some areas."
            }
            Rating::Poor => {
                "This wallet shows limited blockchain activity or financial health concerns."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    pub score: CreditScore,
    pub rating: Rating,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentBreakdown {
    pub blockchain: f64,
    pub social: f64,
    pub identity: f64,
    pub risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveScore {
    pub score: u32,
    pub breakdown: ComponentBreakdown,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_handle: Option<String>,
    pub computed_at: DateTime<Utc>,
}
