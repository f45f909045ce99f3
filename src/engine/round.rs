//! Контроллер раздачи: жизненный цикл одной раздачи за одним столом.
//!
//! NotStarted → PreFlop → Flop → Turn → River → Complete.
//! Стол владеет колодой, местами, бордом и банками; RNG и оценщик рук
//! передаются снаружи при создании.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::api::dto::{SeatView, TableView};
use crate::domain::{
    Board, Card, Chips, Deck, HoleCards, LimitType, Phase, Seat, SeatIndex, SeatRegistry,
    SeatState, Street, TableConfig,
};
use crate::engine::actions::{Action, ActionOutcome};
use crate::engine::betting::{betting_order_after, decisions_remaining, opening_order, BettingState};
use crate::engine::dealer::{burn_and_reveal, deal_hole_cards, new_shuffled_deck};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{next_button, position_after_button, seats_in_order_from};
use crate::engine::pot::{Pot, PotManager};
use crate::engine::validation::{legal_raise_range, validate_action, Plan, RaiseRange, Wager};
use crate::engine::variant::{BettingRound, RoundLogic, StreetReport, Variant};
use crate::engine::RandomSource;
use crate::eval::HandEvaluator;

/// Выплата одного банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub amount: Chips,
    pub eligible: Vec<SeatIndex>,
    /// Победители в порядке позиции от кнопки.
    pub winners: Vec<SeatIndex>,
    /// Сколько получил каждый победитель. Остаток от деления – первому по позиции.
    pub shares: Vec<(SeatIndex, Chips)>,
}

/// Итог раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandResult {
    pub hand_number: u64,
    pub board: Vec<Card>,
    /// Дошло ли до вскрытия (больше одного претендента).
    pub showdown: bool,
    pub awards: Vec<PotAward>,
}

impl HandResult {
    pub fn total_awarded(&self) -> Chips {
        self.awards.iter().map(|a| a.amount).sum()
    }

    /// Сколько место получило из всех банков.
    pub fn won_by(&self, seat: SeatIndex) -> Chips {
        self.awards
            .iter()
            .flat_map(|a| a.shares.iter())
            .filter(|(s, _)| *s == seat)
            .map(|(_, c)| *c)
            .sum()
    }
}

/// Стол безлимитного холдема на одну раздачу за раз.
pub struct HoldemTable<R: RandomSource, E: HandEvaluator> {
    config: TableConfig,
    rng: R,
    evaluator: E,
    seats: SeatRegistry,
    deck: Deck,
    board: Board,
    /// Сожжённые карты текущей раздачи.
    burned: Vec<Card>,
    button: SeatIndex,
    /// false – кнопку ещё не ставили (или её переставили через `set_button`).
    button_placed: bool,
    phase: Phase,
    betting: BettingState,
    pots: PotManager,
    history: HandHistory,
    hand_number: u64,
}

impl<R: RandomSource, E: HandEvaluator> HoldemTable<R, E> {
    pub fn new(config: TableConfig, mut rng: R, evaluator: E) -> Result<Self, EngineError> {
        config.validate()?;
        let deck = new_shuffled_deck(&mut rng);
        let betting = BettingState::new(Street::PreFlop, Chips::ZERO, config.big_blind, Vec::new());
        Ok(Self {
            seats: SeatRegistry::new(config.max_seats),
            config,
            rng,
            evaluator,
            deck,
            board: Board::new(),
            burned: Vec::new(),
            button: 0,
            button_placed: false,
            phase: Phase::NotStarted,
            betting,
            pots: PotManager::new(),
            history: HandHistory::new(),
            hand_number: 0,
        })
    }

    // ---------------------------------------------------------------
    // Места
    // ---------------------------------------------------------------

    /// Назначить стек месту между раздачами.
    pub fn set_stack(&mut self, seat: SeatIndex, amount: Chips) -> Result<(), EngineError> {
        self.seats.get(seat)?;
        if self.is_mid_hand() {
            return Err(EngineError::HandInProgress);
        }
        self.seats.set_stack(seat, amount)?;
        Ok(())
    }

    /// Пропуск раздач. Во время раздачи вступает в силу со следующей.
    pub fn set_sits_out(&mut self, seat: SeatIndex, sits_out: bool) -> Result<(), EngineError> {
        let mid_hand = self.is_mid_hand();
        let s = self.seats.get_mut(seat)?;
        s.sits_out = sits_out;
        if !mid_hand && !s.stack.is_zero() {
            s.state = if sits_out { SeatState::Out } else { SeatState::Seated };
        }
        Ok(())
    }

    /// Поставить кнопку. Следующая раздача начнётся с этой позиции (или ближайшей играющей).
    pub fn set_button(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        self.seats.get(seat)?;
        if self.is_mid_hand() {
            return Err(EngineError::HandInProgress);
        }
        self.button = seat;
        self.button_placed = false;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Чтение состояния
    // ---------------------------------------------------------------

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn button(&self) -> SeatIndex {
        self.button
    }

    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    pub fn seats(&self) -> &SeatRegistry {
        &self.seats
    }

    pub fn seat(&self, seat: SeatIndex) -> Result<&Seat, EngineError> {
        Ok(self.seats.get(seat)?)
    }

    pub fn stack(&self, seat: SeatIndex) -> Result<Chips, EngineError> {
        Ok(self.seats.get(seat)?.stack)
    }

    pub fn hole_cards(&self, seat: SeatIndex) -> Result<Option<HoleCards>, EngineError> {
        Ok(self.seats.get(seat)?.hole_cards)
    }

    pub fn board(&self) -> &[Card] {
        self.board.cards()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn burned(&self) -> &[Card] {
        &self.burned
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    /// Чей сейчас ход.
    pub fn to_act(&self) -> Option<SeatIndex> {
        if self.is_mid_hand() {
            self.betting.current_actor()
        } else {
            None
        }
    }

    pub fn current_bet(&self) -> Chips {
        self.betting.current_bet
    }

    pub fn min_raise(&self) -> Chips {
        self.betting.min_raise
    }

    /// Собранные банки.
    pub fn pots(&self) -> &[Pot] {
        self.pots.pots()
    }

    /// Банки с учётом ставок текущей улицы – как если бы улица закрылась сейчас.
    pub fn projected_pots(&self) -> Vec<Pot> {
        PotManager::projected(&self.seats)
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    /// Стеки + несобранные ставки улицы + банки.
    pub fn total_chips(&self) -> Chips {
        self.seats.total_stacks() + self.seats.total_street_commitments() + self.pots.total()
    }

    /// Диапазон bet/raise для места, чей сейчас ход.
    pub fn legal_raise_range(&self) -> Option<RaiseRange> {
        let seat = self.to_act()?;
        self.raise_range_for(seat)
    }

    pub fn view(&self) -> TableView {
        TableView {
            phase: self.phase,
            button: self.button,
            to_act: self.to_act(),
            board: self.board.cards().to_vec(),
            seats: self
                .seats
                .iter()
                .map(|(i, s)| SeatView::from_seat(i, s))
                .collect(),
            current_bet: self.betting.current_bet,
            min_raise: self.betting.min_raise,
            pots: self.pots.pots().to_vec(),
        }
    }

    // ---------------------------------------------------------------
    // Действия
    // ---------------------------------------------------------------

    /// Применить действие места. При ошибке состояние не меняется.
    pub fn apply_action(&mut self, seat: SeatIndex, action: Action) -> Result<ActionOutcome, EngineError> {
        self.seats.get(seat)?;
        if self.to_act() != Some(seat) {
            return Err(EngineError::NotSeatsTurn(seat));
        }

        let range = self.raise_range_for(seat);
        let plan = validate_action(&self.seats[seat], &action, &self.betting, range)?;
        let bet_before = self.betting.current_bet;

        let committed = match plan {
            Plan::Fold => {
                self.seats[seat].state = SeatState::Folded;
                self.betting.mark_acted(seat);
                Chips::ZERO
            }
            Plan::Check => {
                self.betting.mark_acted(seat);
                Chips::ZERO
            }
            Plan::Put { amount, wager } => {
                let paid = self.seats[seat].commit(amount);
                let new_bet = self.seats[seat].committed_this_street;
                match wager {
                    Wager::Call => self.betting.mark_acted(seat),
                    Wager::FullRaise => {
                        let order = betting_order_after(&self.seats, seat);
                        self.betting
                            .on_full_raise(seat, new_bet, new_bet - bet_before, order);
                    }
                    Wager::ShortAllIn => {
                        let order = betting_order_after(&self.seats, seat);
                        self.betting.on_short_all_in(seat, new_bet, order);
                    }
                }
                paid
            }
        };

        let hand_decided = self.seats.in_hand_count() <= 1;
        if !decisions_remaining(&self.seats) {
            self.betting.close();
        }
        self.sync_acting();

        let stack_after = self.seats[seat].stack;
        self.history.push(HandEventKind::PlayerActed {
            seat,
            action,
            committed,
            stack_after,
        });
        log::debug!(
            "hand #{} {}: seat {seat} {action:?} (+{committed}, stack {stack_after})",
            self.hand_number,
            self.phase
        );

        Ok(ActionOutcome {
            committed,
            next_to_act: self.betting.current_actor(),
            street_closed: self.betting.is_round_complete(),
            hand_decided,
        })
    }

    // ---------------------------------------------------------------
    // Внутреннее
    // ---------------------------------------------------------------

    fn is_mid_hand(&self) -> bool {
        self.phase.street().is_some()
    }

    fn raise_range_for(&self, seat: SeatIndex) -> Option<RaiseRange> {
        let pot_total = self.pots.total() + self.seats.total_street_commitments();
        legal_raise_range(
            seat,
            &self.seats[seat],
            &self.betting,
            self.config.limit_type,
            self.config.big_blind,
            pot_total,
        )
    }

    fn betting_round(&self) -> BettingRound {
        match self.betting.current_actor() {
            Some(first_to_act) => BettingRound::Open { first_to_act },
            None => BettingRound::Skipped,
        }
    }

    /// Acting только у места, чей сейчас ход.
    fn sync_acting(&mut self) {
        for seat in self.seats.seats_mut() {
            if seat.state == SeatState::Acting {
                seat.state = SeatState::Seated;
            }
        }
        if let Some(actor) = self.betting.current_actor() {
            self.seats[actor].state = SeatState::Acting;
        }
    }

    /// Вернуть все поставленные фишки на стеки (прерванная раздача).
    fn refund_commitments(&mut self) {
        for seat in self.seats.seats_mut() {
            seat.stack += seat.committed_total;
            seat.committed_total = Chips::ZERO;
            seat.committed_this_street = Chips::ZERO;
        }
        self.pots.clear();
    }

    /// Анте с каждого участника, сразу в банк (мёртвые фишки, не часть ставки).
    fn post_antes(&mut self, order: &[SeatIndex]) -> Vec<(SeatIndex, Chips)> {
        let ante = self.config.effective_ante();
        if ante.is_zero() {
            return Vec::new();
        }
        let posted: Vec<(SeatIndex, Chips)> = order
            .iter()
            .map(|&seat| (seat, self.seats[seat].commit(ante)))
            .collect();
        self.pots.collect(&mut self.seats);
        posted
    }

    fn close_street(&mut self) {
        self.pots.collect(&mut self.seats);
        self.history.push(HandEventKind::StreetClosed {
            street: self.betting.street,
            pot_total: self.pots.total(),
        });
    }

    fn advance_street(&mut self, target: Street) -> Result<StreetReport, EngineError> {
        let expected = match target {
            Street::PreFlop => Phase::NotStarted,
            Street::Flop => Phase::PreFlop,
            Street::Turn => Phase::Flop,
            Street::River => Phase::Turn,
        };
        if self.phase != expected {
            return Err(EngineError::InvalidPhase {
                expected,
                actual: self.phase,
            });
        }
        if !self.betting.is_round_complete() {
            return Err(EngineError::BettingNotClosed);
        }

        self.close_street();

        let reveal = burn_and_reveal(&mut self.deck, &mut self.board, target.board_cards());
        if let Some(card) = reveal.burned {
            self.burned.push(card);
        }
        self.history.push(HandEventKind::BoardDealt {
            street: target,
            burned: reveal.burned,
            cards: reveal.cards.clone(),
        });

        let order = opening_order(&self.seats, self.button + 1);
        self.betting = BettingState::new(target, Chips::ZERO, self.config.big_blind, order);
        self.phase = target.into();
        self.sync_acting();

        let betting = self.betting_round();
        log::debug!(
            "hand #{} {}: board {:?}, betting {:?}",
            self.hand_number,
            self.phase,
            self.board.cards(),
            betting
        );

        Ok(StreetReport { betting, reveal })
    }

    /// Победители банка среди претендентов. Один претендент – без оценщика.
    fn pot_winners(&self, pot: &Pot) -> Vec<SeatIndex> {
        let eligible: Vec<SeatIndex> = pot
            .eligible
            .iter()
            .copied()
            .filter(|&s| self.seats[s].is_in_hand())
            .collect();
        if eligible.len() <= 1 {
            return eligible;
        }

        let mut best: Option<E::Strength> = None;
        let mut winners = Vec::new();
        for seat in eligible {
            let Some(hole) = self.seats[seat].hole_cards else {
                continue;
            };
            let strength = self.evaluator.rank(&hole, self.board.cards());
            let ord = match &best {
                None => Ordering::Greater,
                Some(b) => strength.cmp(b),
            };
            match ord {
                Ordering::Greater => {
                    best = Some(strength);
                    winners = vec![seat];
                }
                Ordering::Equal => winners.push(seat),
                Ordering::Less => {}
            }
        }
        winners
    }

    /// Разделить банк поровну; остаток – первому по позиции от кнопки.
    fn split_pot(&self, amount: Chips, winners: &mut Vec<SeatIndex>) -> Vec<(SeatIndex, Chips)> {
        let capacity = self.seats.capacity();
        let button = self.button;
        winners.sort_by_key(|&s| position_after_button(capacity, button, s));

        let n = winners.len() as u64;
        if n == 0 {
            return Vec::new();
        }
        let share = amount.0 / n;
        let remainder = amount.0 % n;

        winners
            .iter()
            .enumerate()
            .map(|(i, &seat)| {
                let extra = if i == 0 { remainder } else { 0 };
                (seat, Chips(share + extra))
            })
            .collect()
    }
}

impl<R: RandomSource, E: HandEvaluator> RoundLogic for HoldemTable<R, E> {
    fn variant(&self) -> Variant {
        Variant::HoldEm
    }

    /// Новая раздача.
    ///
    /// Незавершённая раздача прерывается: все ставки возвращаются на стеки.
    /// Дальше: сброс борда/банков, сдвиг кнопки, анте и блайнды (короткий стек
    /// ставит что есть и уходит в олл-ин), свежая колода, по 2 карты по кругу,
    /// первый ход – слева от большого блайнда.
    fn reset_round(&mut self) -> Result<(), EngineError> {
        let aborting = self.is_mid_hand();
        let ready = self
            .seats
            .iter()
            .filter(|(_, s)| {
                let refund = if aborting { s.committed_total } else { Chips::ZERO };
                s.state != SeatState::Empty && !s.sits_out && !(s.stack + refund).is_zero()
            })
            .count();
        if ready < 2 {
            return Err(EngineError::InsufficientLiveSeats);
        }

        if aborting {
            log::warn!(
                "раздача #{} прервана в фазе {} – ставки возвращены",
                self.hand_number,
                self.phase
            );
            self.refund_commitments();
        }

        self.seats.reset_for_new_hand();
        self.board.clear();
        self.burned.clear();
        self.pots.clear();
        self.history = HandHistory::new();
        self.hand_number += 1;

        let button = next_button(&self.seats, self.button, !self.button_placed)
            .ok_or(EngineError::InsufficientLiveSeats)?;
        self.button = button;
        self.button_placed = true;

        self.history.push(HandEventKind::HandStarted {
            hand_number: self.hand_number,
            button,
        });

        // Участники по часовой, начиная слева от кнопки; кнопка последняя.
        let order = seats_in_order_from(&self.seats, button + 1, |s| s.state == SeatState::Seated);

        let antes = self.post_antes(&order);

        // Хедз-ап: кнопка ставит малый блайнд.
        let (sb_seat, bb_seat) = if order.len() == 2 {
            (button, order[0])
        } else {
            (order[0], order[1])
        };
        let sb_paid = self.seats[sb_seat].commit(self.config.small_blind);
        let bb_paid = self.seats[bb_seat].commit(self.config.big_blind);

        self.history.push(HandEventKind::BlindsPosted {
            small_blind: Some((sb_seat, sb_paid)),
            big_blind: Some((bb_seat, bb_paid)),
            antes,
        });

        self.deck = new_shuffled_deck(&mut self.rng);
        let dealt = deal_hole_cards(&mut self.deck, &mut self.rng, &mut self.seats, &order)?;
        for (seat, cards) in dealt {
            self.history
                .push(HandEventKind::HoleCardsDealt { seat, cards });
        }

        let current_bet = self.config.big_blind.max(self.seats.max_street_commitment());
        let to_act = opening_order(&self.seats, bb_seat + 1);
        self.betting = BettingState::new(Street::PreFlop, current_bet, self.config.big_blind, to_act);
        self.betting.last_aggressor = Some(bb_seat);
        if self.config.limit_type == LimitType::FixedLimit {
            // Большой блайнд – первая ставка префлопа в лимите рейзов.
            self.betting.raises = 1;
        }
        self.phase = Phase::PreFlop;
        self.sync_acting();

        log::info!(
            "hand #{} started: {} seats, button {button}, blinds {sb_seat}/{bb_seat}",
            self.hand_number,
            order.len()
        );

        Ok(())
    }

    /// Торговля префлопа уже настроена в `reset_round`; здесь – только сигнал, будет ли она.
    fn pre_flop(&mut self) -> Result<BettingRound, EngineError> {
        if self.phase != Phase::PreFlop {
            return Err(EngineError::InvalidPhase {
                expected: Phase::PreFlop,
                actual: self.phase,
            });
        }
        Ok(self.betting_round())
    }

    fn flop(&mut self) -> Result<StreetReport, EngineError> {
        self.advance_street(Street::Flop)
    }

    fn turn(&mut self) -> Result<StreetReport, EngineError> {
        self.advance_street(Street::Turn)
    }

    fn river(&mut self) -> Result<StreetReport, EngineError> {
        self.advance_street(Street::River)
    }

    /// Собрать банки, вскрыть претендентов каждого банка, поделить, зачислить на стеки.
    ///
    /// Если претендент один – банки отдаются ему без оценки рук (в любой торговой фазе).
    /// Иначе раздача должна дойти до закрытого ривера.
    fn finalize_round(&mut self) -> Result<HandResult, EngineError> {
        let actual = self.phase;
        if actual.street().is_none() {
            return Err(EngineError::InvalidPhase {
                expected: Phase::River,
                actual,
            });
        }

        let contenders = self.seats.in_hand_count();
        if contenders > 1 {
            if !self.betting.is_round_complete() {
                return Err(EngineError::BettingNotClosed);
            }
            if actual != Phase::River {
                return Err(EngineError::InvalidPhase {
                    expected: Phase::River,
                    actual,
                });
            }
        }

        self.betting.close();
        self.close_street();

        let pots = self.pots.pots().to_vec();
        let mut awards = Vec::with_capacity(pots.len());
        for (pot_index, pot) in pots.into_iter().enumerate() {
            let mut winners = self.pot_winners(&pot);
            if winners.is_empty() {
                winners = seats_in_order_from(&self.seats, self.button + 1, |s| s.is_in_hand());
            }
            let shares = self.split_pot(pot.amount, &mut winners);
            for &(seat, amount) in &shares {
                self.seats[seat].stack += amount;
                self.history.push(HandEventKind::PotAwarded {
                    pot_index,
                    seat,
                    amount,
                });
            }
            awards.push(PotAward {
                amount: pot.amount,
                eligible: pot.eligible,
                winners,
                shares,
            });
        }
        self.pots.clear();

        for seat in self.seats.seats_mut() {
            if seat.stack.is_zero() {
                seat.state = SeatState::Empty;
            } else if seat.state == SeatState::Acting {
                seat.state = SeatState::Seated;
            }
        }

        self.phase = Phase::Complete;
        self.history.push(HandEventKind::HandFinished {
            hand_number: self.hand_number,
        });

        let result = HandResult {
            hand_number: self.hand_number,
            board: self.board.cards().to_vec(),
            showdown: contenders > 1,
            awards,
        };
        log::info!(
            "hand #{} finished: {} chips in {} pot(s), showdown = {}",
            self.hand_number,
            result.total_awarded(),
            result.awards.len(),
            result.showdown
        );

        Ok(result)
    }
}
