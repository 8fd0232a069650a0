use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current totals for every dimension of one counter family.
pub type CountMap = BTreeMap<String, i64>;

/// Configuration of one counter family: a key namespace and the closed set
/// of dimensions it accepts. Anything outside the set is rejected, never
/// stored.
#[derive(Debug, Clone, Copy)]
pub struct CounterFamily {
    pub namespace: &'static str,
    pub dimensions: &'static [&'static str],
}

pub const FEEDBACK: CounterFamily = CounterFamily {
    namespace: "feedback",
    dimensions: &["opening", "explanation", "stakes", "tooLong"],
};

pub const REACTIONS: CounterFamily = CounterFamily {
    namespace: "reactions",
    dimensions: &["thumbsUp", "interesting", "mindBlown"],
};

#[derive(Debug, Deserialize)]
pub struct CountsQuery {
    pub slug: Option<String>,
}

/// POST body for an increment. The reactions resource historically named the
/// dimension field `reaction`; both spellings are accepted on either
/// resource.
#[derive(Debug, Deserialize)]
pub struct IncrementRequest {
    pub slug: Option<String>,
    #[serde(alias = "reaction")]
    pub dimension: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IncrementResponse {
    pub success: bool,
    pub counts: CountMap,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
