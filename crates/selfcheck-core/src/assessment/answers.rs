use super::domain::QuestionKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

/// Respondent input for one question.
///
/// Serialized in the questionnaire's interchange shape: `{"skipped": true}`,
/// `{"choiceIdx": 1}`, `{"choiceIdxs": [0, 2]}`, `{"value": 4}` or `{"text": "..."}`.
/// Decoding never fails: a payload that cannot be read keeps its shape with a
/// value that scores zero, so one bad entry does not discard a whole sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "RawAnswer")]
pub enum Answer {
    Skipped,
    /// Option index; negative or out-of-range indices name no option.
    Single(i64),
    Multi(BTreeSet<i64>),
    Likert(f64),
    Open(String),
}

impl Answer {
    /// Index stored for a selection that cannot name any option.
    pub const NO_OPTION: i64 = -1;

    pub fn is_skipped(&self) -> bool {
        matches!(self, Answer::Skipped)
    }

    /// True when the payload carries nothing a scorer could credit.
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Skipped => true,
            Answer::Single(_) | Answer::Likert(_) => false,
            Answer::Multi(choices) => choices.is_empty(),
            Answer::Open(text) => text.trim().is_empty(),
        }
    }

    /// Open text without surrounding whitespace; other payloads pass through.
    pub fn trimmed(self) -> Self {
        match self {
            Answer::Open(text) if text.trim().len() != text.len() => {
                Answer::Open(text.trim().to_string())
            }
            other => other,
        }
    }

    /// Whether this payload is the shape expected by a question of `kind`.
    pub fn fits(&self, kind: &QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Answer::Skipped, _)
                | (Answer::Single(_), QuestionKind::Single { .. })
                | (Answer::Multi(_), QuestionKind::Multi { .. })
                | (Answer::Likert(_), QuestionKind::Likert)
                | (Answer::Open(_), QuestionKind::Open { .. })
        )
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn option_index(value: &Value) -> i64 {
    let index = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|n| n.fract() == 0.0).map(|n| n as i64)),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    };
    index.unwrap_or(Answer::NO_OPTION)
}

fn scale_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|n: &f64| n.is_finite()).unwrap_or(0.0)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|value| !value.is_null())
}

impl From<Value> for Answer {
    fn from(raw: Value) -> Self {
        let Value::Object(fields) = raw else {
            return Answer::Skipped;
        };
        if fields.get("skipped").is_some_and(truthy) {
            return Answer::Skipped;
        }
        if let Some(index) = present(fields.get("choiceIdx")) {
            return Answer::Single(option_index(index));
        }
        if let Some(indices) = present(fields.get("choiceIdxs")) {
            let indices = match indices {
                Value::Array(items) => items.iter().map(option_index).collect(),
                _ => BTreeSet::new(),
            };
            return Answer::Multi(indices);
        }
        if let Some(value) = present(fields.get("value")) {
            return Answer::Likert(scale_value(value));
        }
        match present(fields.get("text")) {
            Some(Value::String(text)) => Answer::Open(text.clone()),
            Some(other) => Answer::Open(other.to_string()),
            None => Answer::Skipped,
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct RawAnswer {
    skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    choice_idx: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    choice_idxs: Option<BTreeSet<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl From<Answer> for RawAnswer {
    fn from(answer: Answer) -> Self {
        match answer {
            Answer::Skipped => RawAnswer {
                skipped: true,
                ..RawAnswer::default()
            },
            Answer::Single(index) => RawAnswer {
                choice_idx: Some(index),
                ..RawAnswer::default()
            },
            Answer::Multi(indices) => RawAnswer {
                choice_idxs: Some(indices),
                ..RawAnswer::default()
            },
            Answer::Likert(value) => RawAnswer {
                value: Some(value),
                ..RawAnswer::default()
            },
            Answer::Open(text) => RawAnswer {
                text: Some(text),
                ..RawAnswer::default()
            },
        }
    }
}

static NOT_ANSWERED: Answer = Answer::Skipped;

/// Answers keyed by question id; at most one per question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: HashMap<String, Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `answer`, replacing any earlier answer for the same question.
    pub fn record(&mut self, question_id: impl Into<String>, answer: Answer) -> Option<Answer> {
        self.answers.insert(question_id.into(), answer)
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Answer used for scoring: an absent entry is reported as `Answer::Skipped`.
    pub fn resolve(&self, question_id: &str) -> &Answer {
        self.answers.get(question_id).unwrap_or(&NOT_ANSWERED)
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl FromIterator<(String, Answer)> for AnswerSheet {
    fn from_iter<T: IntoIterator<Item = (String, Answer)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
