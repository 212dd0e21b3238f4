use chrono::{TimeZone, Utc};
use selfcheck_core::assessment::{
    build_report, score_question, Answer, AnswerOption, AnswerSheet, DimensionCatalog, Question,
    QuestionKind, ReportMeta, Rubric, RubricItem, RubricHit,
};
use std::collections::BTreeSet;

fn meta() -> ReportMeta {
    ReportMeta {
        title: "Scoring".to_string(),
        build: "test".to_string(),
        started_at: None,
        finished_at: Utc.with_ymd_and_hms(2025, 9, 24, 10, 0, 0).unwrap(),
        name: String::new(),
        shuffled: false,
        question_count: 0,
    }
}

fn question(id: &str, dimension: &str, kind: QuestionKind) -> Question {
    Question {
        id: id.to_string(),
        dimension: dimension.to_string(),
        weight: 1.0,
        text: format!("question {id}"),
        hint: String::new(),
        kind,
    }
}

fn options(scores: &[f64]) -> Vec<AnswerOption> {
    scores
        .iter()
        .enumerate()
        .map(|(index, score)| AnswerOption {
            text: format!("option {index}"),
            score: *score,
        })
        .collect()
}

fn budget_rubric() -> Rubric {
    Rubric {
        items: Some(vec![RubricItem {
            label: "Budget".to_string(),
            keywords: vec!["деньги".to_string(), "бюджет".to_string()],
            points: 6.0,
        }]),
        max_points: Some(10.0),
        note: None,
    }
}

fn sheet(entries: Vec<(&str, Answer)>) -> AnswerSheet {
    entries
        .into_iter()
        .map(|(id, answer)| (id.to_string(), answer))
        .collect()
}

#[test]
fn scores_stay_within_bounds_for_mixed_inputs() {
    let questions = [
        question(
            "s",
            "d",
            QuestionKind::Single {
                options: options(&[-2.0, 0.0, 4.0]),
            },
        ),
        question(
            "m",
            "d",
            QuestionKind::Multi {
                options: options(&[-1.0, 3.0, 9.0]),
                multi_max_score: Some(5.0),
            },
        ),
        question("l", "d", QuestionKind::Likert),
        question(
            "o",
            "d",
            QuestionKind::Open {
                rubric: Some(budget_rubric()),
            },
        ),
    ];
    let answers = [
        Answer::Single(0),
        Answer::Single(2),
        Answer::Single(99),
        Answer::Multi(BTreeSet::from([0])),
        Answer::Multi(BTreeSet::from([0, 1, 2])),
        Answer::Likert(-4.0),
        Answer::Likert(12.0),
        Answer::Open("деньги деньги бюджет".to_string()),
        Answer::Open(String::new()),
        Answer::Skipped,
    ];

    for question in &questions {
        for answer in &answers {
            let result = score_question(question, answer);
            if result.max_points > 0.0 {
                assert!(
                    result.points >= 0.0 && result.points <= result.max_points,
                    "{} with {answer:?} gave {result:?}",
                    question.id
                );
            }
        }
    }
}

#[test]
fn skipping_everything_yields_zero_everywhere() {
    let questions = [
        question("a", "x", QuestionKind::Likert),
        question(
            "b",
            "y",
            QuestionKind::Single {
                options: options(&[0.0, 5.0]),
            },
        ),
        question(
            "c",
            "y",
            QuestionKind::Open {
                rubric: Some(budget_rubric()),
            },
        ),
    ];
    let answers = sheet(vec![("a", Answer::Skipped)]);

    let report = build_report(&questions, &answers, &DimensionCatalog::new(), meta());
    assert_eq!(report.overall_percent, 0);
    assert!(report.dimensions.iter().all(|summary| summary.percent == 0));
    assert_eq!(report.open_answers[0].max_score, 1.0);
}

#[test]
fn best_single_choice_gives_full_ratio() {
    let single = question(
        "s",
        "d",
        QuestionKind::Single {
            options: options(&[1.0, 5.0, 3.0]),
        },
    );
    let result = score_question(&single, &Answer::Single(1));
    assert_eq!(result.ratio(), 1.0);
}

#[test]
fn multi_selection_is_monotonic() {
    let capped = QuestionKind::Multi {
        options: options(&[2.0, 3.0, 4.0, 1.0]),
        multi_max_score: Some(6.0),
    };
    let uncapped = QuestionKind::Multi {
        options: options(&[2.0, 3.0, 4.0, 1.0]),
        multi_max_score: None,
    };

    for kind in [capped, uncapped] {
        let multi = question("m", "d", kind);
        let mut selected = BTreeSet::new();
        let mut previous = score_question(&multi, &Answer::Multi(selected.clone())).points;
        for index in 0..4 {
            selected.insert(index);
            let points = score_question(&multi, &Answer::Multi(selected.clone())).points;
            assert!(points >= previous, "selection {selected:?} lowered points");
            previous = points;
        }
    }
}

#[test]
fn likert_points_follow_clamped_value() {
    let likert = question("l", "d", QuestionKind::Likert);
    for value in -2..=8 {
        let result = score_question(&likert, &Answer::Likert(value as f64));
        assert_eq!(result.points, value.clamp(0, 5) as f64);
        assert_eq!(result.max_points, 5.0);
    }
}

#[test]
fn open_matching_ignores_case_yo_and_repeats() {
    let rubric = Rubric {
        items: Some(vec![RubricItem {
            label: "Tree".to_string(),
            keywords: vec!["ёлка".to_string()],
            points: 4.0,
        }]),
        max_points: Some(10.0),
        note: None,
    };
    let open = question(
        "o",
        "d",
        QuestionKind::Open {
            rubric: Some(rubric),
        },
    );

    for text in ["ЕЛКА", "Ёлка!", "елка, ёлка и снова ЁЛКА"] {
        let result = score_question(&open, &Answer::Open(text.to_string()));
        assert_eq!(result.points, 4.0, "text {text:?}");
        assert_eq!(result.found().len(), 1);
    }

    let budget = question(

        "b",

        "d",

        QuestionKind::Open {

            rubric: Some(budget_rubric()),

        },

    );
    let result = score_question(&budget, &Answer::Open("ДЕНЬГИ, деньги и бюджет".to_string()));
    assert_eq!(result.points, 6.0);
    assert_eq!(result.found().len(), 1);
}

#[test]
fn tied_dimensions_keep_first_seen_order() {
    let questions = [
        question("q1", "gamma", QuestionKind::Likert),
        question("q2", "alpha", QuestionKind::Likert),
        question("q3", "beta", QuestionKind::Likert),
        question("q4", "alpha", QuestionKind::Likert),
    ];
    let answers = sheet(vec![
        ("q1", Answer::Likert(3.0)),
        ("q2", Answer::Likert(5.0)),
        ("q3", Answer::Likert(3.0)),
        ("q4", Answer::Likert(1.0)),
    ]);

    let report = build_report(&questions, &answers, &DimensionCatalog::new(), meta());
    let ranked: Vec<(&str, u8)> = report
        .dimensions
        .iter()
        .map(|summary| (summary.key.as_str(), summary.percent))
        .collect();
    assert_eq!(ranked, [("gamma", 60), ("alpha", 60), ("beta", 60)]);
}

#[test]
fn single_and_likert_scenario_scores_eighty() {
    let questions = [
        question(
            "q1",
            "d",
            QuestionKind::Single {
                options: options(&[0.0, 5.0]),
            },
        ),
        question("q2", "d", QuestionKind::Likert),
    ];
    let answers = sheet(vec![("q1", Answer::Single(1)), ("q2", Answer::Likert(3.0))]);

    let report = build_report(&questions, &answers, &DimensionCatalog::new(), meta());
    assert_eq!(report.overall_percent, 80);
    assert_eq!(report.dimensions[0].percent, 80);
    assert_eq!(report.meta.question_count, 2);
}

#[test]
fn open_budget_scenario_fires_one_item() {
    let open = question(
        "q1",
        "money",
        QuestionKind::Open {
            rubric: Some(budget_rubric()),
        },
    );
    let answers = sheet(vec![("q1", Answer::Open("Обсудили бюджет проекта".to_string()))]);

    let report = build_report(&[open], &answers, &DimensionCatalog::new(), meta());
    let detail = &report.open_answers[0];
    assert_eq!(detail.score, 6.0);
    assert_eq!(detail.max_score, 10.0);
    assert_eq!(
        detail.found,
        [RubricHit {
            label: "Budget".to_string(),
            points: 6.0
        }]
    );
    assert_eq!(detail.answer, "Обсудили бюджет проекта");
    assert_eq!(report.overall_percent, 60);
}

#[test]
fn uncapped_multi_scenario_is_full_ratio() {
    let multi = question(
        "q1",
        "d",
        QuestionKind::Multi {
            options: options(&[2.0, 3.0, 4.0]),
            multi_max_score: None,
        },
    );
    let result = score_question(&multi, &Answer::Multi(BTreeSet::from([0, 2])));
    assert_eq!(result.points, 6.0);
    assert_eq!(result.max_points, 6.0);
    assert_eq!(result.ratio(), 1.0);
}

#[test]
fn zero_weight_questions_do_not_move_percentages() {
    let mut heavy = question("q1", "d", QuestionKind::Likert);
    heavy.weight = 0.0;
    let light = question("q2", "d", QuestionKind::Likert);
    let answers = sheet(vec![("q1", Answer::Likert(5.0)), ("q2", Answer::Likert(1.0))]);

    let report = build_report(&[heavy.clone(), light], &answers, &DimensionCatalog::new(), meta());
    assert_eq!(report.overall_percent, 20);

    let report = build_report(&[heavy], &answers, &DimensionCatalog::new(), meta());
    assert_eq!(report.overall_percent, 0);
}
