//! Жизненный цикл раздачи: от reset_round до finalize_round.
//!
//! Проверяем:
//! - фолд на префлопе и выплату единственному претенденту;
//! - чек-даун до шоудауна, целостность колоды (борд + burn + карманные);
//! - делёж банка и остаток первому после кнопки;
//! - анте, пропуск торговли при олл-инах, прерывание раздачи;
//! - переходы фаз и ошибки порядка вызовов.

use std::collections::HashSet;

use holdem_engine::domain::{Card, Chips, HoleCards, Phase, Rank, SeatState, TableConfig};
use holdem_engine::engine::{
    Action, BettingRound, EngineError, HandEventKind, HoldemTable, RandomSource, RoundLogic,
    Variant,
};
use holdem_engine::eval::HandEvaluator;

/// shuffle ничего не делает => колода остаётся в стандартном порядке.
#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

/// Сила руки – старшие карманные карты.
struct HoleHigh;

impl HandEvaluator for HoleHigh {
    type Strength = (Rank, Rank);

    fn rank(&self, hole: &HoleCards, _board: &[Card]) -> (Rank, Rank) {
        let (a, b) = (hole[0].rank, hole[1].rank);
        if a >= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// Все руки равны.
struct AlwaysTie;

impl HandEvaluator for AlwaysTie {
    type Strength = ();

    fn rank(&self, _hole: &HoleCards, _board: &[Card]) -> Self::Strength {}
}

fn table_with<E: HandEvaluator>(
    stacks: &[u64],
    config: TableConfig,
    evaluator: E,
) -> HoldemTable<DummyRng, E> {
    let mut table = HoldemTable::new(config, DummyRng, evaluator).unwrap();
    for (seat, &stack) in stacks.iter().enumerate() {
        table.set_stack(seat, Chips(stack)).unwrap();
    }
    table
}

fn nl_table(stacks: &[u64]) -> HoldemTable<DummyRng, HoleHigh> {
    let config = TableConfig::new(stacks.len(), Chips(50), Chips(100));
    table_with(stacks, config, HoleHigh)
}

/// Все живые места чекают, пока улица не закроется.
fn check_around<E: HandEvaluator>(table: &mut HoldemTable<DummyRng, E>) {
    while let Some(seat) = table.to_act() {
        table.apply_action(seat, Action::Check).unwrap();
    }
}

/// Колода + карманные + борд + сожжённые = 52 разные карты.
fn assert_deck_integrity<E: HandEvaluator>(table: &HoldemTable<DummyRng, E>) {
    let mut all: Vec<Card> = table.deck().cards.clone();
    for (_, seat) in table.seats().iter() {
        if let Some(hole) = seat.hole_cards {
            all.extend(hole);
        }
    }
    all.extend_from_slice(table.board());
    all.extend_from_slice(table.burned());

    let unique: HashSet<u8> = all.iter().map(|c| c.index()).collect();
    assert_eq!(all.len(), 52, "карт в обороте должно быть 52");
    assert_eq!(unique.len(), 52, "карты не должны повторяться");
}

//
// ====================== Сквозные сценарии ======================
//

/// Хедз-ап 50/100, стеки по 1000: кнопка фолдит, BB забирает 150.
#[test]
fn heads_up_fold_preflop_awards_blinds() {
    let mut table = nl_table(&[1_000, 1_000]);
    assert_eq!(table.variant(), Variant::HoldEm);
    assert_eq!(table.phase(), Phase::NotStarted);

    table.reset_round().unwrap();
    assert_eq!(table.phase(), Phase::PreFlop);
    assert_eq!(table.hand_number(), 1);
    assert_deck_integrity(&table);

    let outcome = table.apply_action(0, Action::Fold).unwrap();
    assert!(outcome.hand_decided);
    assert!(outcome.street_closed);
    assert_eq!(outcome.next_to_act, None);
    assert_eq!(table.seat(0).unwrap().state, SeatState::Folded);

    let result = table.finalize_round().unwrap();
    assert!(!result.showdown);
    assert_eq!(result.total_awarded(), Chips(150));
    assert_eq!(result.won_by(1), Chips(150));
    assert_eq!(result.awards[0].eligible, vec![1]);

    assert_eq!(table.phase(), Phase::Complete);
    assert_eq!(table.stack(0).unwrap(), Chips(950));
    assert_eq!(table.stack(1).unwrap(), Chips(1_050));
}

/// Чек-даун до ривера: 5 карт борда, 3 сожжённые, шоудаун у оценщика.
#[test]
fn heads_up_check_down_to_showdown() {
    let mut table = nl_table(&[1_000, 1_000]);
    table.reset_round().unwrap();

    // Без перемешивания: 1 – A Q, 0 – K J.
    table.apply_action(0, Action::Call).unwrap();
    table.apply_action(1, Action::Check).unwrap();

    let flop = table.flop().unwrap();
    assert_eq!(flop.reveal.cards.len(), 3);
    assert!(flop.reveal.burned.is_some());
    assert!(!flop.reveal.is_partial());
    assert_eq!(table.pots()[0].amount, Chips(200));
    check_around(&mut table);

    let turn = table.turn().unwrap();
    assert_eq!(turn.reveal.cards.len(), 1);
    check_around(&mut table);

    table.river().unwrap();
    check_around(&mut table);

    assert_eq!(table.board().len(), 5);
    assert_eq!(table.burned().len(), 3);
    assert_eq!(table.deck().remaining(), 40);
    assert_deck_integrity(&table);

    let result = table.finalize_round().unwrap();
    assert!(result.showdown);
    assert_eq!(result.board.len(), 5);
    assert_eq!(result.awards[0].winners, vec![1]);
    assert_eq!(table.stack(0).unwrap(), Chips(900));
    assert_eq!(table.stack(1).unwrap(), Chips(1_100));
}

/// Ничья на 25 фишках: 13 первому слева от кнопки, 12 кнопке.
#[test]
fn split_pot_remainder_goes_to_first_after_button() {
    let config = TableConfig::new(3, Chips(5), Chips(10));
    let mut table = table_with(&[1_000, 1_000, 1_000], config, AlwaysTie);
    table.reset_round().unwrap();

    table.apply_action(0, Action::Call).unwrap();
    table.apply_action(1, Action::Fold).unwrap();
    table.apply_action(2, Action::Check).unwrap();

    table.flop().unwrap();
    check_around(&mut table);
    table.turn().unwrap();
    check_around(&mut table);
    table.river().unwrap();
    check_around(&mut table);

    let result = table.finalize_round().unwrap();
    assert_eq!(result.awards.len(), 1);
    assert_eq!(result.awards[0].amount, Chips(25));
    assert_eq!(result.awards[0].winners, vec![2, 0]);
    assert_eq!(result.awards[0].shares, vec![(2, Chips(13)), (0, Chips(12))]);

    assert_eq!(table.stack(0).unwrap(), Chips(1_002));
    assert_eq!(table.stack(1).unwrap(), Chips(995));
    assert_eq!(table.stack(2).unwrap(), Chips(1_003));
}

/// Олл-ин и колл на префлопе: дальше борд открывается без торговли.
#[test]
fn betting_is_skipped_when_nobody_can_act() {
    let mut table = nl_table(&[500, 1_000]);
    table.reset_round().unwrap();

    table.apply_action(0, Action::AllIn).unwrap();
    let outcome = table.apply_action(1, Action::Call).unwrap();
    assert!(outcome.street_closed);
    assert_eq!(table.stack(1).unwrap(), Chips(500));

    for report in [table.flop(), table.turn(), table.river()] {
        assert!(report.unwrap().betting.is_skipped());
        assert_eq!(table.to_act(), None);
    }

    let result = table.finalize_round().unwrap();
    // 1 – A Q против K J у кнопки.
    assert_eq!(result.won_by(1), Chips(1_000));
    assert_eq!(table.stack(1).unwrap(), Chips(1_500));
    assert_eq!(table.seat(0).unwrap().state, SeatState::Empty);

    // Остался один игрок со стеком.
    assert_eq!(table.reset_round(), Err(EngineError::InsufficientLiveSeats));
}

/// Анте собираются в банк сразу, блайнды – к концу улицы.
#[test]
fn antes_are_collected_before_blinds() {
    let config = TableConfig::new(3, Chips(50), Chips(100)).with_ante(Chips(10));
    let mut table = table_with(&[1_000, 1_000, 1_000], config, HoleHigh);
    table.reset_round().unwrap();

    assert_eq!(table.pots().len(), 1);
    assert_eq!(table.pots()[0].amount, Chips(30));
    assert_eq!(table.pots()[0].eligible, vec![0, 1, 2]);
    assert_eq!(table.stack(0).unwrap(), Chips(990));
    assert_eq!(table.stack(1).unwrap(), Chips(940));
    assert_eq!(table.stack(2).unwrap(), Chips(890));
    assert_eq!(table.current_bet(), Chips(100));
    assert_eq!(table.total_chips(), Chips(3_000));

    let posted = table.history().events.iter().find_map(|e| match &e.kind {
        HandEventKind::BlindsPosted { antes, .. } => Some(antes.clone()),
        _ => None,
    });
    assert_eq!(
        posted,
        Some(vec![(1, Chips(10)), (2, Chips(10)), (0, Chips(10))])
    );
}

/// Кнопка идёт по кругу, пропуская места без фишек и sit-out.
#[test]
fn button_rotates_over_playing_seats() {
    let mut table = nl_table(&[1_000, 1_000, 1_000, 1_000]);
    table.set_sits_out(2, true).unwrap();
    assert_eq!(table.seat(2).unwrap().state, SeatState::Out);

    let mut buttons = Vec::new();
    for _ in 0..4 {
        table.reset_round().unwrap();
        buttons.push(table.button());
        assert_eq!(table.hole_cards(2).unwrap(), None);
        while let Some(seat) = table.to_act() {
            table.apply_action(seat, Action::Fold).unwrap();
        }
        table.finalize_round().unwrap();
    }

    assert_eq!(buttons, vec![0, 1, 3, 0]);
    assert_eq!(table.stack(2).unwrap(), Chips(1_000));
    assert_eq!(table.total_chips(), Chips(4_000));
}

/// reset_round посреди раздачи возвращает все ставки и начинает новую.
#[test]
fn reset_mid_hand_refunds_commitments() {
    let mut table = nl_table(&[1_000, 1_000]);
    table.reset_round().unwrap();
    table.apply_action(0, Action::Raise(Chips(300))).unwrap();

    table.reset_round().unwrap();
    assert_eq!(table.hand_number(), 2);
    assert_eq!(table.button(), 1);
    // Новые блайнды: кнопка 1 – SB, 0 – BB.
    assert_eq!(table.stack(1).unwrap(), Chips(950));
    assert_eq!(table.stack(0).unwrap(), Chips(900));
    assert_eq!(table.total_chips(), Chips(2_000));
    assert!(table.board().is_empty());
    assert!(table.burned().is_empty());
    assert_deck_integrity(&table);
}

/// Два reset_round подряд дают такое же состояние, как один (кроме номера и кнопки).
#[test]
fn reset_twice_keeps_table_consistent() {
    let mut table = nl_table(&[1_000, 1_000, 1_000]);
    table.reset_round().unwrap();
    table.reset_round().unwrap();

    assert_eq!(table.phase(), Phase::PreFlop);
    assert_eq!(table.total_chips(), Chips(3_000));
    assert_eq!(table.seats().total_street_commitments(), Chips(150));
    assert_deck_integrity(&table);
}

//
// ====================== История ======================
//

#[test]
fn hand_history_records_the_whole_hand() {
    let mut table = nl_table(&[1_000, 1_000]);
    table.reset_round().unwrap();
    table.apply_action(0, Action::Fold).unwrap();
    table.finalize_round().unwrap();

    let history = table.history();
    assert!(matches!(
        history.events[0].kind,
        HandEventKind::HandStarted {
            hand_number: 1,
            button: 0
        }
    ));
    let dealt = history
        .events
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::HoleCardsDealt { .. }))
        .count();
    assert_eq!(dealt, 2);
    assert_eq!(history.actions().collect::<Vec<_>>(), vec![(0, Action::Fold)]);
    assert!(history.events.iter().any(|e| matches!(
        e.kind,
        HandEventKind::PotAwarded {
            pot_index: 0,
            seat: 1,
            amount: Chips(150)
        }
    )));
    assert!(matches!(
        history.events.last().map(|e| &e.kind),
        Some(HandEventKind::HandFinished { hand_number: 1 })
    ));
}

//
// ====================== Порядок фаз ======================
//

#[test]
fn phase_order_is_enforced() {
    let mut table = nl_table(&[1_000, 1_000]);

    assert_eq!(
        table.flop().err(),
        Some(EngineError::InvalidPhase {
            expected: Phase::PreFlop,
            actual: Phase::NotStarted
        })
    );
    assert_eq!(
        table.pre_flop(),
        Err(EngineError::InvalidPhase {
            expected: Phase::PreFlop,
            actual: Phase::NotStarted
        })
    );
    assert_eq!(
        table.finalize_round().err(),
        Some(EngineError::InvalidPhase {
            expected: Phase::River,
            actual: Phase::NotStarted
        })
    );

    table.reset_round().unwrap();
    assert_eq!(table.pre_flop(), Ok(BettingRound::Open { first_to_act: 0 }));
    assert_eq!(table.flop().err(), Some(EngineError::BettingNotClosed));
    assert_eq!(table.finalize_round().err(), Some(EngineError::BettingNotClosed));
    assert_eq!(
        table.turn().err(),
        Some(EngineError::InvalidPhase {
            expected: Phase::Flop,
            actual: Phase::PreFlop
        })
    );

    table.apply_action(0, Action::Call).unwrap();
    table.apply_action(1, Action::Check).unwrap();
    // Два претендента – шоудаун только после ривера.
    assert_eq!(
        table.finalize_round().err(),
        Some(EngineError::InvalidPhase {
            expected: Phase::River,
            actual: Phase::PreFlop
        })
    );
    // На закрытой улице ходить некому.
    assert_eq!(
        table.apply_action(0, Action::Check),
        Err(EngineError::NotSeatsTurn(0))
    );
}

#[test]
fn table_setup_errors() {
    let bad = TableConfig::new(1, Chips(50), Chips(100));
    assert!(matches!(
        HoldemTable::new(bad, DummyRng, HoleHigh).err(),
        Some(EngineError::Config(_))
    ));

    let mut table = nl_table(&[1_000, 0]);
    assert_eq!(
        table.set_stack(2, Chips(100)),
        Err(EngineError::SeatOutOfRange(2))
    );
    assert_eq!(
        table.apply_action(7, Action::Fold),
        Err(EngineError::SeatOutOfRange(7))
    );
    assert_eq!(table.reset_round(), Err(EngineError::InsufficientLiveSeats));

    table.set_stack(1, Chips(1_000)).unwrap();
    table.reset_round().unwrap();
    assert_eq!(
        table.set_stack(1, Chips(5)),
        Err(EngineError::HandInProgress)
    );
    assert_eq!(table.set_button(0), Err(EngineError::HandInProgress));
}

/// Сумма фишек не меняется ни после одного действия.
#[test]
fn chips_are_conserved_through_a_raised_hand() {
    let mut table = nl_table(&[2_000, 1_500, 700]);
    table.reset_round().unwrap();
    let total = Chips(4_200);

    let script = [
        (0, Action::Raise(Chips(300))),
        (1, Action::Raise(Chips(900))),
        (2, Action::AllIn),
        (0, Action::Call),
    ];
    for (seat, action) in script {
        table.apply_action(seat, action).unwrap();
        assert_eq!(table.total_chips(), total);
    }

    table.flop().unwrap();
    assert_eq!(table.pots().len(), 2);
    while let Some(seat) = table.to_act() {
        table.apply_action(seat, Action::Check).unwrap();
    }
    table.turn().unwrap();
    check_around(&mut table);
    table.river().unwrap();
    check_around(&mut table);

    let result = table.finalize_round().unwrap();
    assert_eq!(result.total_awarded(), Chips(2_500));
    assert_eq!(table.total_chips(), total);
}
