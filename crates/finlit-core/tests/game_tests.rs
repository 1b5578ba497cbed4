use finlit_core::games::bill_split::{BillSplit, BillSplitScenario, Difficulty};
use finlit_core::games::fraud_quiz::{FraudQuiz, QuizItem, Verdict};
use finlit_core::games::session::{Event, Phase, Session, Transition};
use finlit_core::FinLitError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn dinner(bill: Decimal, people: u32) -> BillSplitScenario {
    BillSplitScenario {
        bill_total: bill,
        discount: Decimal::ZERO,
        tip_percent: dec!(10),
        participants: people,
        time_limit_secs: 60,
        difficulty: Difficulty::Easy,
    }
}

fn bill_session() -> Session<BillSplit> {
    Session::new(
        BillSplit,
        vec![dinner(dec!(1250), 4), dinner(dec!(800), 2), dinner(dec!(3000), 5)],
    )
    .unwrap()
}

fn pitch(id: &str, verdict: Verdict, points: u32) -> QuizItem {
    QuizItem {
        id: id.into(),
        prompt: format!("Pitch {id}"),
        verdict,
        base_points: points,
        explanation: None,
    }
}

fn quiz_session() -> Session<FraudQuiz> {
    Session::new(
        FraudQuiz { time_limit_secs: 30 },
        vec![
            pitch("q1", Verdict::Fake, 5),
            pitch("q2", Verdict::Real, 5),
            pitch("q3", Verdict::Fake, 5),
            pitch("q4", Verdict::Fake, 10),
            pitch("q5", Verdict::Real, 15),
        ],
    )
    .unwrap()
}

fn points_of<S: Clone>(t: &Transition<S>) -> S {
    match t {
        Transition::Scored { score, .. } => score.clone(),
        other => panic!("expected a scored transition, got {}", describe(other)),
    }
}

fn describe<S>(t: &Transition<S>) -> &'static str {
    match t {
        Transition::Started { .. } => "started",
        Transition::Ticked { .. } => "ticked",
        Transition::Scored { .. } => "scored",
        Transition::Ignored { .. } => "ignored",
        Transition::Restarted => "restarted",
    }
}

// ===========================================================================
// Bill split sessions
// ===========================================================================

#[test]
fn test_bill_split_reference_scenario() {
    let mut s = bill_session();
    s.apply(Event::Start).unwrap();
    let t = s
        .apply(Event::Submit {
            index: 0,
            answer: dec!(343.75),
        })
        .unwrap();
    let score = points_of(&t);
    assert_eq!(score.correct_answer, dec!(343.75));
    assert_eq!(score.points_awarded, 28);
    assert!(score.is_correct);
    assert_eq!(s.score(), 28);
    assert_eq!(s.streak(), 1);
}

#[test]
fn test_double_submit_is_a_no_op() {
    let mut s = bill_session();
    s.apply(Event::Start).unwrap();
    s.apply(Event::Submit {
        index: 0,
        answer: dec!(343.75),
    })
    .unwrap();
    let again = s
        .apply(Event::Submit {
            index: 0,
            answer: dec!(343.75),
        })
        .unwrap();

    assert!(matches!(again, Transition::Ignored { .. }));
    assert_eq!(s.score(), 28);
    assert_eq!(s.history().len(), 1);
    assert!(matches!(s.phase(), Phase::InProgress { index: 1, .. }));
}

#[test]
fn test_tick_to_zero_expires_like_a_submit() {
    let mut s = bill_session();
    s.apply(Event::Start).unwrap();
    let t = s.apply(Event::Tick { elapsed_secs: 45 }).unwrap();
    assert!(matches!(t, Transition::Ticked { remaining_secs: 15 }));

    let t = s.apply(Event::Tick { elapsed_secs: 20 }).unwrap();
    match t {
        Transition::Scored {
            index, timed_out, ref score, ..
        } => {
            assert_eq!(index, 0);
            assert!(timed_out);
            assert_eq!(score.points_awarded, 0);
        }
        ref other => panic!("expected expiry, got {}", describe(other)),
    }

    // The UI's own expire callback for the same item arrives late
    let late = s.apply(Event::Expire { index: 0 }).unwrap();
    assert!(matches!(late, Transition::Ignored { .. }));
    assert_eq!(s.history().len(), 1);
}

#[test]
fn test_timer_restarts_for_next_item() {
    let mut s = bill_session();
    s.apply(Event::Start).unwrap();
    s.apply(Event::Tick { elapsed_secs: 50 }).unwrap();
    s.apply(Event::Submit {
        index: 0,
        answer: dec!(343.75),
    })
    .unwrap();
    match s.phase() {
        Phase::InProgress { index, clock } => {
            assert_eq!(*index, 1);
            assert_eq!(clock.remaining_secs, 60);
        }
        other => panic!("unexpected phase {other:?}"),
    }
}

#[test]
fn test_bill_split_session_completes_with_summary() {
    let mut s = bill_session();
    s.apply(Event::Start).unwrap();
    s.apply(Event::Submit { index: 0, answer: dec!(343.75) }).unwrap();
    s.apply(Event::Submit { index: 1, answer: dec!(440) }).unwrap();
    let last = s.apply(Event::Submit { index: 2, answer: dec!(600) }).unwrap();

    assert!(matches!(last, Transition::Scored { completed: true, .. }));
    assert!(s.is_completed());
    let summary = s.summary().unwrap();
    assert_eq!(summary.items, 3);
    assert_eq!(summary.correct, 2);
    assert_eq!(summary.best_streak, 2);
    assert!(summary.rating.is_none());

    // Submitting the last item again after completion changes nothing
    let dup = s.apply(Event::Submit { index: 2, answer: dec!(660) }).unwrap();
    assert!(matches!(dup, Transition::Ignored { .. }));
    assert_eq!(s.summary().unwrap(), summary);
}

#[test]
fn test_submit_before_start_is_rejected() {
    let mut s = bill_session();
    let err = s
        .apply(Event::Submit {
            index: 0,
            answer: dec!(1),
        })
        .unwrap_err();
    assert!(matches!(err, FinLitError::InvalidTransition { .. }));
    assert_eq!(*s.phase(), Phase::NotStarted);
}

#[test]
fn test_restart_resets_everything() {
    let mut s = bill_session();
    s.apply(Event::Start).unwrap();
    s.apply(Event::Submit { index: 0, answer: dec!(343.75) }).unwrap();
    s.apply(Event::Restart).unwrap();

    assert_eq!(*s.phase(), Phase::NotStarted);
    assert_eq!(s.score(), 0);
    assert_eq!(s.streak(), 0);
    assert!(s.history().is_empty());
    assert!(s.apply(Event::Start).is_ok());
}

#[test]
fn test_invalid_scenario_rejected_up_front() {
    let res = Session::new(BillSplit, vec![dinner(dec!(1000), 0)]);
    assert!(res.is_err());
    let res = Session::<BillSplit>::new(BillSplit, Vec::new());
    assert!(res.is_err());
}

// ===========================================================================
// Fraud quiz sessions
// ===========================================================================

#[test]
fn test_quiz_streak_bonus_after_three_correct() {
    let mut s = quiz_session();
    s.apply(Event::Start).unwrap();
    for (i, v) in [Verdict::Fake, Verdict::Real, Verdict::Fake].into_iter().enumerate() {
        s.apply(Event::Tick { elapsed_secs: 4 }).unwrap();
        s.apply(Event::Submit { index: i, answer: v }).unwrap();
    }
    assert_eq!(s.streak(), 3);
    assert_eq!(s.score(), 30); // 3 × (5 + 5)

    s.apply(Event::Tick { elapsed_secs: 9 }).unwrap();
    let t = s
        .apply(Event::Submit {
            index: 3,
            answer: Verdict::Fake,
        })
        .unwrap();
    let score = points_of(&t);
    assert_eq!(score.points_awarded, 20);
    assert_eq!(score.streak_bonus, 5);
    assert_eq!(s.streak(), 4);
}

#[test]
fn test_quiz_wrong_answer_resets_streak() {
    let mut s = quiz_session();
    s.apply(Event::Start).unwrap();
    for (i, v) in [Verdict::Fake, Verdict::Real, Verdict::Fake, Verdict::Fake]
        .into_iter()
        .enumerate()
    {
        s.apply(Event::Submit { index: i, answer: v }).unwrap();
    }
    assert_eq!(s.streak(), 4);

    let t = s
        .apply(Event::Submit {
            index: 4,
            answer: Verdict::Fake,
        })
        .unwrap();
    let score = points_of(&t);
    assert_eq!(score.points_awarded, 0);
    assert_eq!(s.streak(), 0);
    assert_eq!(s.best_streak(), 4);
}

#[test]
fn test_quiz_timeout_counts_as_wrong() {
    let mut s = quiz_session();
    s.apply(Event::Start).unwrap();
    let t = s.apply(Event::Expire { index: 0 }).unwrap();
    let score = points_of(&t);
    assert!(!score.is_correct);
    assert_eq!(score.chosen, None);
    assert_eq!(score.elapsed_secs, 30);
}

#[test]
fn test_quiz_summary_carries_rating() {
    let mut s = quiz_session();
    s.apply(Event::Start).unwrap();
    for (i, v) in [
        Verdict::Fake,
        Verdict::Real,
        Verdict::Fake,
        Verdict::Fake,
        Verdict::Real,
    ]
    .into_iter()
    .enumerate()
    {
        s.apply(Event::Submit { index: i, answer: v }).unwrap();
    }
    // 10 + 10 + 10 + (10+5+5) + (15+5+5) = 75
    let summary = s.summary().unwrap();
    assert_eq!(summary.total_score, 75);
    assert_eq!(summary.rating.as_deref(), Some("Sharp Investor"));
}
