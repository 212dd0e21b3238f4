use chrono::{TimeZone, Utc};
use selfcheck_core::assessment::{
    build_report, score_question, Answer, AnswerImporter, AnswerSheet, Catalog, CatalogLoader,
    LevelTag, Report, ReportMeta,
};
use std::io::Cursor;

const CATALOG: &str = include_str!("../../../demos/catalog.json");
const ANSWERS_CSV: &str = include_str!("../../../demos/answers.csv");
const ANSWERS_JSON: &str = include_str!("../../../demos/answers.json");

fn catalog() -> Catalog {
    CatalogLoader::from_reader(Cursor::new(CATALOG)).expect("demo catalog parses")
}

fn report_for(catalog: &Catalog, answers: &AnswerSheet) -> Report {
    let meta = ReportMeta {
        title: catalog.meta.title.clone(),
        build: catalog.meta.build.clone(),
        started_at: None,
        finished_at: Utc.with_ymd_and_hms(2025, 9, 24, 18, 30, 0).unwrap(),
        name: "Demo".to_string(),
        shuffled: false,
        question_count: 0,
    };
    build_report(&catalog.questions, answers, &catalog.dimensions, meta)
}

fn ranking(report: &Report) -> Vec<(&str, u8)> {
    report
        .dimensions
        .iter()
        .map(|summary| (summary.key.as_str(), summary.percent))
        .collect()
}

#[test]
fn csv_answers_produce_ranked_report() {
    let catalog = catalog();
    let answers = AnswerImporter::from_csv_reader(Cursor::new(ANSWERS_CSV), &catalog)
        .expect("csv answers import");

    let report = report_for(&catalog, &answers);

    assert_eq!(report.overall_percent, 84);
    assert_eq!(report.overall_tag(), LevelTag::Strong);
    assert_eq!(
        ranking(&report),
        [("money", 100), ("access", 90), ("next_step", 20)]
    );
    assert_eq!(report.meta.question_count, 7);
    assert_eq!(report.dimensions[0].name, "Язык денег");

    let ids: Vec<&str> = report
        .open_answers
        .iter()
        .map(|detail| detail.id.as_str())
        .collect();
    assert_eq!(ids, ["q5", "q6"]);

    let pitch = &report.open_answers[0];
    assert_eq!(pitch.score, 10.0);
    assert_eq!(pitch.max_score, 10.0);
    let labels: Vec<&str> = pitch.found.iter().map(|hit| hit.label.as_str()).collect();
    assert_eq!(labels, ["Деньги", "Риск", "Сроки"]);

    let skipped = &report.open_answers[1];
    assert_eq!(skipped.score, 0.0);
    assert_eq!(skipped.max_score, 1.0);
    assert!(skipped.found.is_empty());
}

#[test]
fn json_answers_treat_missing_questions_as_skipped() {
    let catalog = catalog();
    let answers = AnswerImporter::from_json_reader(Cursor::new(ANSWERS_JSON))
        .expect("json answers import");
    assert!(answers.get("q6").is_none());

    let report = report_for(&catalog, &answers);

    assert_eq!(report.overall_percent, 29);
    assert_eq!(report.overall_tag(), LevelTag::NeedsWork);
    assert_eq!(
        ranking(&report),
        [("next_step", 33), ("money", 31), ("access", 20)]
    );

    let pitch = &report.open_answers[0];
    assert_eq!(pitch.score, 0.0);
    assert_eq!(pitch.answer, "Рассказываю про функции продукта");
}

#[test]
fn digest_names_strongest_and_weakest_dimensions() {
    let catalog = catalog();
    let answers = AnswerImporter::from_csv_reader(Cursor::new(ANSWERS_CSV), &catalog)
        .expect("csv answers import");

    let digest = report_for(&catalog, &answers).digest();
    let lines: Vec<&str> = digest.lines().collect();
    assert_eq!(
        lines,
        [
            "Работа с экономическим покупателем: overall 84%",
            "Strengths: Язык денег (100%); Выход на ЛПР (90%)",
            "Improve: Следующий шаг (20%); Выход на ЛПР (90%)",
        ]
    );
}

#[test]
fn feedback_limits_recommendations_and_flags_empty_reviews() {
    let catalog = catalog();
    let answers = AnswerImporter::from_csv_reader(Cursor::new(ANSWERS_CSV), &catalog)
        .expect("csv answers import");
    let report = report_for(&catalog, &answers);

    let feedback = report.feedback(&catalog.dimensions, 3);

    assert_eq!(feedback.overall_percent, 84);
    assert_eq!(feedback.strengths.len(), 3);
    assert_eq!(feedback.strengths[0].key, "money");
    assert_eq!(feedback.strengths[0].recommendations.len(), 3);
    assert_eq!(feedback.improvements[0].key, "next_step");
    assert_eq!(feedback.improvements[0].tag_label, "needs work");
    assert_eq!(feedback.table.len(), 3);
    assert_eq!(
        feedback.table[2].next_step,
        "Заканчивай встречу датой и владельцем следующего шага."
    );

    let reviews = &feedback.open_reviews;
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].credited, ["Деньги (+4)", "Риск (+3)", "Сроки (+3)"]);
    assert!(reviews[0].hint.is_none());
    assert_eq!(reviews[1].dimension_name, "Следующий шаг");
    assert!(reviews[1].hint.is_some());
}

#[test]
fn report_serializes_with_interchange_field_names() {
    let catalog = catalog();
    let answers = AnswerImporter::from_csv_reader(Cursor::new(ANSWERS_CSV), &catalog)
        .expect("csv answers import");
    let report = report_for(&catalog, &answers);

    let value = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(value["overallPercent"], 84);
    assert_eq!(value["meta"]["questionCount"], 7);
    assert_eq!(value["dimensions"][0]["key"], "money");
    assert_eq!(value["openAnswers"][0]["maxScore"], 10.0);
}

#[test]
fn out_of_range_choice_scores_zero_without_dropping_other_answers() {
    let catalog = CatalogLoader::from_reader(Cursor::new(
        r#"{
            "meta": {"title": "Quick check", "build": "t"},
            "dimensions": {
                "money": {"name": "Money", "why": "", "doNext": []},
                "access": {"name": "Access", "why": "", "doNext": []}
            },
            "questions": [
                {"id": "q1", "type": "single", "dimension": "money", "weight": 1, "text": "Pick",
                 "options": [{"text": "a", "score": 0}, {"text": "b", "score": 5}]},
                {"id": "q2", "type": "likert", "dimension": "access", "weight": 1, "text": "Rate"}
            ]
        }"#,
    ))
    .expect("catalog parses");
    let answers = AnswerImporter::from_json_reader(Cursor::new(
        r#"{"q1":{"choiceIdx":-1},"q2":{"value":4}}"#,
    ))
    .expect("malformed choice keeps the sheet");

    assert_eq!(answers.get("q1"), Some(&Answer::Single(-1)));
    assert_eq!(answers.get("q2"), Some(&Answer::Likert(4.0)));

    let q1 = score_question(&catalog.questions[0], &Answer::Single(-1));
    assert_eq!(q1.points, 0.0);
    assert_eq!(q1.max_points, 5.0);
    assert!(!q1.skipped);

    let report = report_for(&catalog, &answers);
    assert_eq!(ranking(&report), [("access", 80), ("money", 0)]);
    assert_eq!(report.overall_percent, 40);
}
