use super::super::answers::Answer;
use super::super::domain::QuestionKind;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::io::Read;

#[derive(Debug)]
pub(crate) struct AnswerRecord {
    pub(crate) line: u64,
    pub(crate) question_id: String,
    pub(crate) cell: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    question_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    answer: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<AnswerRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        let row: AnswerRow = record.deserialize(Some(&headers))?;
        records.push(AnswerRecord {
            line,
            question_id: row.question_id,
            cell: row.answer,
        });
    }

    Ok(records)
}

/// Reason a cell could not be read as an answer of the question's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CellError(pub(crate) String);

/// Interprets a CSV cell according to the kind of question it answers.
///
/// An empty cell skips any question; the `skip` sentinel skips every kind except
/// open questions, where it is taken as the respondent's text.
pub(crate) fn parse_cell(kind: &QuestionKind, cell: Option<&str>) -> Result<Answer, CellError> {
    let Some(cell) = cell.map(str::trim) else {
        return Ok(Answer::Skipped);
    };
    let is_open = matches!(kind, QuestionKind::Open { .. });
    if !is_open && cell.eq_ignore_ascii_case("skip") {
        return Ok(Answer::Skipped);
    }

    match kind {
        QuestionKind::Single { .. } => parse_index(cell).map(Answer::Single),
        QuestionKind::Multi { .. } => cell
            .split(';')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_index)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Answer::Multi),
        QuestionKind::Likert => cell
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Answer::Likert)
            .ok_or_else(|| CellError(format!("'{cell}' is not a scale value"))),
        QuestionKind::Open { .. } => Ok(Answer::Open(cell.to_string())),
        QuestionKind::Unknown => Err(CellError("question has an unknown type".to_string())),
    }
}

/// Negative indices are accepted and score zero, as in JSON answers.
fn parse_index(raw: &str) -> Result<i64, CellError> {
    raw.parse::<i64>()
        .map_err(|_| CellError(format!("'{raw}' is not an option index")))
}
