use crate::domain::{Seat, SeatIndex, SeatRegistry};

/// Все места по кругу, начиная со `start` (включительно), удовлетворяющие условию.
pub fn seats_in_order_from(
    seats: &SeatRegistry,
    start: SeatIndex,
    pred: impl Fn(&Seat) -> bool,
) -> Vec<SeatIndex> {
    let max = seats.capacity();
    let mut res = Vec::new();

    if max == 0 {
        return res;
    }

    let mut idx = start % max;
    for _ in 0..max {
        if pred(&seats[idx]) {
            res.push(idx);
        }
        idx = (idx + 1) % max;
    }

    res
}

/// Следующее место строго после `from` по кругу, удовлетворяющее условию.
/// Само `from` проверяется последним.
pub fn next_seat(
    seats: &SeatRegistry,
    from: SeatIndex,
    pred: impl Fn(&Seat) -> bool,
) -> Option<SeatIndex> {
    let max = seats.capacity();
    if max == 0 {
        return None;
    }
    seats_in_order_from(seats, from + 1, pred).first().copied()
}

/// Кнопка на следующую раздачу:
/// - первая раздача – текущая позиция, если место играет, иначе следующее играющее;
/// - дальше – следующее играющее место по часовой.
pub fn next_button(
    seats: &SeatRegistry,
    current: SeatIndex,
    first_hand: bool,
) -> Option<SeatIndex> {
    let plays = |s: &Seat| s.can_start_hand();
    if first_hand {
        seats_in_order_from(seats, current, plays).first().copied()
    } else {
        next_seat(seats, current, plays)
    }
}

/// Расстояние от кнопки по часовой: 0 – первое место слева от кнопки, кнопка – последняя.
pub fn position_after_button(capacity: usize, button: SeatIndex, seat: SeatIndex) -> usize {
    if capacity == 0 {
        return 0;
    }
    (seat + capacity - (button + 1) % capacity) % capacity
}
