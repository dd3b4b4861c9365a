use serde::{Deserialize, Serialize};

/// Path of the FLAMES name-compatibility endpoint.
pub const CALCULATE_PATH: &str = "/calculate";
/// Path of the zodiac-compatibility endpoint.
pub const ZODIAC_CHECK_PATH: &str = "/zodiac-check";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamesRequest {
    pub name1: String,
    pub name2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlamesResult {
    pub result: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignsRequest {
    pub sign1: String,
    pub sign2: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZodiacResult {
    pub sign1: String,
    pub sign2: String,
    pub element1: String,
    pub element2: String,
    /// Compatibility percentage, 0 to 100. Any JSON number is accepted.
    pub score: f64,
    pub vibe: String,
    pub insight: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zodiac_result_reads_backend_shape() {
        let raw = r#"{"sign1":"Leo","sign2":"Aries","element1":"Fire","element2":"Fire","score":87,"vibe":"Electric","insight":"Two flames."}"#;
        let parsed: ZodiacResult = serde_json::from_str(raw).expect("decode");
        assert_eq!(parsed.score, 87.0);
        assert_eq!(parsed.element2, "Fire");
    }

    #[test]
    fn zodiac_result_accepts_fractional_score() {
        let raw = r#"{"sign1":"Leo","sign2":"Aries","element1":"Fire","element2":"Fire","score":87.5,"vibe":"Electric","insight":"Two flames."}"#;
        let parsed: ZodiacResult = serde_json::from_str(raw).expect("decode");
        assert_eq!(parsed.score, 87.5);
    }

    #[test]
    fn flames_result_requires_both_fields() {
        let parsed = serde_json::from_str::<FlamesResult>(r#"{"result":"LOVE"}"#);
        assert!(parsed.is_err());
    }
}
