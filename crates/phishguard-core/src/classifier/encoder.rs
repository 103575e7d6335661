//! Label encoder artifact: `{"classes": ["bad", "good"]}`.

use serde::{Deserialize, Serialize};

use super::LabelDecoder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }
}

impl LabelDecoder for LabelEncoder {
    fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_by_index() {
        let enc = LabelEncoder::new(["bad", "good"]);
        assert_eq!(enc.decode(0), Some("bad"));
        assert_eq!(enc.decode(1), Some("good"));
        assert_eq!(enc.decode(2), None);
    }

    #[test]
    fn decode_many_all_or_nothing() {
        let enc = LabelEncoder::new(["bad", "good"]);
        assert_eq!(
            enc.decode_many(&[1, 0, 1]),
            Some(vec!["good".to_string(), "bad".to_string(), "good".to_string()])
        );
        assert_eq!(enc.decode_many(&[0, 5]), None);
    }

    #[test]
    fn parse_json() {
        let enc: LabelEncoder = serde_json::from_str(r#"{"classes": ["bad", "good"]}"#).unwrap();
        assert_eq!(enc.classes, vec!["bad", "good"]);
    }
}
