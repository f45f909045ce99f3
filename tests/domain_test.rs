//! Доменные тесты: карты, колода, фишки, места, конфиг стола.

use std::collections::HashSet;

use holdem_engine::domain::{
    Board, Card, Chips, ConfigError, Deck, DeckExhausted, LimitType, Rank, Seat, SeatOutOfRange,
    SeatRegistry, SeatState, Street, Suit, TableConfig, BOARD_CARDS,
};

//
// card.rs
//

/// Все 52 индекса декодируются обратно в ту же карту.
#[test]
fn card_index_round_trip_is_unambiguous() {
    let mut seen = HashSet::new();
    for i in 0..52u8 {
        let card = Card::from_index(i).expect("индекс 0..52 валиден");
        assert_eq!(card.index(), i);
        assert!(seen.insert(card), "карта {card} встретилась дважды");
    }
    assert_eq!(Card::from_index(52), None);
    assert_eq!(Card::from_index(255), None);
}

#[test]
fn card_display_and_parse() {
    let ah = Card::new(Rank::Ace, Suit::Hearts);
    assert_eq!(ah.to_string(), "Ah");
    assert_eq!("Ah".parse::<Card>(), Ok(ah));
    assert_eq!("tc".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Clubs)));

    assert!("1h".parse::<Card>().is_err());
    assert!("Ax".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
    assert!("".parse::<Card>().is_err());
}

//
// deck.rs
//

/// Стандартная колода: 52 разные карты, по 13 каждой масти.
#[test]
fn standard_deck_has_52_unique_cards() {
    let deck = Deck::standard_52();
    assert_eq!(deck.remaining(), 52);

    let unique: HashSet<u8> = deck.cards.iter().map(|c| c.index()).collect();
    assert_eq!(unique.len(), 52);

    for suit in Suit::ALL {
        let n = deck.cards.iter().filter(|c| c.suit == suit).count();
        assert_eq!(n, 13, "масть {suit}");
    }
}

/// Карты берутся с конца вектора; на пустой колоде – DeckExhausted.
#[test]
fn deck_draw_until_exhausted() {
    let mut deck = Deck::standard_52();
    let top = deck.draw().unwrap();
    assert_eq!(top, Card::new(Rank::Ace, Suit::Spades));

    for _ in 0..51 {
        deck.draw().unwrap();
    }
    assert!(deck.is_empty());
    assert_eq!(deck.draw(), Err(DeckExhausted));
}

#[test]
fn deck_remove_cards() {
    let mut deck = Deck::standard_52();
    let known = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::Two, Suit::Clubs),
    ];
    deck.remove_cards(&known);
    assert_eq!(deck.remaining(), 50);
    assert!(!deck.cards.iter().any(|c| known.contains(c)));
}

//
// chips.rs
//

#[test]
fn chips_arithmetic_never_goes_negative() {
    assert_eq!(Chips(100) + Chips(50), Chips(150));
    assert_eq!(Chips(100) - Chips(150), Chips::ZERO);
    assert_eq!(Chips(30).saturating_sub(Chips(40)), Chips::ZERO);

    let mut c = Chips(10);
    c -= Chips(20);
    assert!(c.is_zero());

    let total: Chips = [Chips(1), Chips(2), Chips(3)].into_iter().sum();
    assert_eq!(total, Chips(6));
}

//
// hand.rs
//

#[test]
fn streets_and_board_limits() {
    assert_eq!(Street::PreFlop.next(), Some(Street::Flop));
    assert_eq!(Street::River.next(), None);
    assert_eq!(Street::Flop.board_cards(), 3);
    assert_eq!(Street::Turn.board_cards(), 1);

    let mut board = Board::new();
    for i in 0..BOARD_CARDS as u8 {
        assert!(board.push(Card::from_index(i).unwrap()));
    }
    assert!(board.is_full());
    assert!(!board.push(Card::from_index(10).unwrap()));
    assert_eq!(board.len(), BOARD_CARDS);
}

//
// seat.rs
//

/// Ставка больше стека – вносится весь стек, место уходит в олл-ин.
#[test]
fn seat_commit_caps_at_stack() {
    let mut seat = Seat::empty();
    seat.state = SeatState::Seated;
    seat.stack = Chips(80);

    assert_eq!(seat.commit(Chips(50)), Chips(50));
    assert_eq!(seat.state, SeatState::Seated);

    assert_eq!(seat.commit(Chips(100)), Chips(30));
    assert_eq!(seat.state, SeatState::AllIn);
    assert_eq!(seat.committed_total, Chips(80));
    assert!(seat.is_in_hand());
    assert!(!seat.is_live());
}

#[test]
fn seat_registry_bounds_and_counts() {
    let mut seats = SeatRegistry::new(3);
    assert_eq!(seats.capacity(), 3);
    assert_eq!(seats.get(3).err(), Some(SeatOutOfRange(3)));
    assert_eq!(seats.set_stack(5, Chips(10)), Err(SeatOutOfRange(5)));

    seats.set_stack(0, Chips(100)).unwrap();
    seats.set_stack(2, Chips(200)).unwrap();
    assert_eq!(seats[0].state, SeatState::Seated);
    assert_eq!(seats[1].state, SeatState::Empty);
    assert_eq!(seats.active_count(), 2);
    assert_eq!(seats.total_stacks(), Chips(300));

    seats.set_stack(2, Chips::ZERO).unwrap();
    assert_eq!(seats[2].state, SeatState::Empty);
}

//
// table.rs
//

#[test]
fn table_config_validation() {
    assert_eq!(TableConfig::default().validate(), Ok(()));

    assert_eq!(
        TableConfig::new(1, Chips(50), Chips(100)).validate(),
        Err(ConfigError::SeatCount(1))
    );
    assert_eq!(
        TableConfig::new(10, Chips(50), Chips(100)).validate(),
        Err(ConfigError::SeatCount(10))
    );
    assert_eq!(
        TableConfig::new(6, Chips::ZERO, Chips(100)).validate(),
        Err(ConfigError::ZeroSmallBlind)
    );
    assert_eq!(
        TableConfig::new(6, Chips(200), Chips(100)).validate(),
        Err(ConfigError::BlindsInverted {
            small: Chips(200),
            big: Chips(100)
        })
    );
}

#[test]
fn table_config_from_json_fills_defaults() {
    let cfg = TableConfig::from_json(r#"{"max_seats": 6, "small_blind": 25, "big_blind": 50}"#)
        .unwrap();
    assert_eq!(cfg.max_seats, 6);
    assert_eq!(cfg.big_blind, Chips(50));
    assert_eq!(cfg.limit_type, LimitType::NoLimit);
    assert_eq!(cfg.effective_ante(), Chips::ZERO);

    let cfg = TableConfig::from_json(r#"{"ante": 10, "use_antes": true, "limit_type": "PotLimit"}"#)
        .unwrap();
    assert_eq!(cfg.effective_ante(), Chips(10));
    assert_eq!(cfg.limit_type, LimitType::PotLimit);

    assert!(matches!(
        TableConfig::from_json("{"),
        Err(ConfigError::Parse(_))
    ));
    assert_eq!(
        TableConfig::from_json(r#"{"big_blind": 0}"#),
        Err(ConfigError::ZeroBigBlind)
    );
}
