use std::fmt::Write;

use minefield_core::{CellView, Clock, GameState, Minefield};

/// Three character counter in the style of the classic LED displays.
pub(crate) fn format_for_counter(num: i64) -> String {
    let shown = num.clamp(-99, 999);
    if shown < 0 {
        format!("-{:02}", shown.unsigned_abs())
    } else {
        format!("{shown:03}")
    }
}

fn face<C: Clock>(field: &Minefield<C>) -> &'static str {
    match field.state() {
        GameState::Playing => ":)",
        GameState::Won => "B)",
        GameState::Lost => "X(",
    }
}

fn symbol(view: CellView) -> char {
    use CellView::*;
    match view {
        Hidden => '#',
        Flagged => 'F',
        Revealed(0) => '.',
        Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        Mine => '*',
        Blast => '@',
        WrongFlag => 'x',
    }
}

/// Counters line: mines left, face, elapsed seconds.
pub(crate) fn status_line<C: Clock>(field: &Minefield<C>) -> String {
    let elapsed = i64::try_from(field.elapsed_secs()).unwrap_or(i64::MAX);
    format!(
        "[{}] {} [{}]",
        format_for_counter(field.mines_left()),
        face(field),
        format_for_counter(elapsed)
    )
}

/// Draws the whole field with column and row labels.
pub(crate) fn render_board<C: Clock>(field: &Minefield<C>) -> String {
    let (width, height) = field.size();
    let mut out = String::new();

    let _ = writeln!(out, "{}", status_line(field));
    out.push_str("    ");
    for x in 0..width {
        out.push(char::from_digit(u32::from(x % 10), 10).unwrap_or(' '));
    }
    out.push('\n');

    for y in 0..height {
        let _ = write!(out, "{y:>3} ");
        for x in 0..width {
            let view = field.cell_view((x, y)).unwrap_or(CellView::Hidden);
            out.push(symbol(view));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::{Difficulty, ManualClock};

    #[test]
    fn counter_is_clamped_and_padded() {
        assert_eq!(format_for_counter(-150), "-99");
        assert_eq!(format_for_counter(-99), "-99");
        assert_eq!(format_for_counter(-3), "-03");
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(999), "999");
        assert_eq!(format_for_counter(5_000), "999");
    }

    #[test]
    fn fresh_board_is_all_hidden() {
        let field = Minefield::with_clock(
            Difficulty::Custom {
                width: 3,
                height: 2,
                mines: 1,
            },
            ManualClock::new(0),
        )
        .unwrap();

        assert_eq!(
            render_board(&field),
            "[001] :) [000]\n    012\n  0 ###\n  1 ###\n"
        );
    }

    #[test]
    fn won_board_shows_numbers() {
        let mut field = Minefield::with_clock(
            Difficulty::Custom {
                width: 2,
                height: 1,
                mines: 1,
            },
            ManualClock::new(0),
        )
        .unwrap();
        field.reveal((0, 0));

        assert_eq!(render_board(&field), "[001] B) [000]\n    01\n  0 1#\n");
    }

    #[test]
    fn flags_count_down_the_mine_counter() {
        let mut field = Minefield::with_clock(Difficulty::Beginner, ManualClock::new(0)).unwrap();
        field.toggle_flag((0, 0));
        field.toggle_flag((1, 0));

        assert!(status_line(&field).starts_with("[008] :)"));
        assert!(render_board(&field).contains("  0 FF#######\n"));
    }
}
