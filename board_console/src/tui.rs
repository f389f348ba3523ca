// Improvement potential. Use `crossterm` styles instead of `console` to have a single
//   terminal library.

use board_client::coord::BoardShape;
use board_client::display::DisplayCoord;
use board_client::view::{BoardView, SquareShade, SquareView};
use console::Style;
use itertools::Itertools;


const SQUARE_WIDTH: u16 = 3;
// Rank labels occupy one square width on the left.
const BOARD_LEFT: u16 = SQUARE_WIDTH;
// File labels occupy the first line.
const BOARD_TOP: u16 = 1;

pub const MOVE_DOT: char = '•';

fn format_label(label: impl ToString) -> String { format!("{:^3}", label.to_string()) }

fn format_square(ch: char) -> String { format!(" {} ", ch) }

fn render_square(v: &SquareView) -> String {
    let base = match v.shade {
        SquareShade::Dark => Style::new().color256(233).on_color256(222),
        SquareShade::Light => Style::new().color256(233).on_color256(230),
    };
    let (style, ch) = match (v.selected, v.move_dot, v.piece.is_empty()) {
        (true, _, _) => (base.reverse(), v.pictogram),
        (false, true, true) => (base, MOVE_DOT),
        (false, true, false) => (base.on_color256(174), v.pictogram),
        (false, false, _) => (base, v.pictogram),
    };
    style.apply_to(format_square(ch)).to_string()
}

pub fn render_board(view: &BoardView) -> String {
    let file_labels = format!(
        "{}{}\n",
        format_label(' '),
        view.rows()
            .next()
            .into_iter()
            .flatten()
            .map(|v| format_label(v.square.file))
            .join("")
    );
    let mut ret = file_labels.clone();
    for row in view.rows() {
        let rank_label = format_label(row.first().map_or(0, |v| v.square.rank));
        ret.push_str(&rank_label);
        for v in row {
            ret.push_str(&render_square(v));
        }
        ret.push_str(&rank_label);
        ret.push('\n');
    }
    ret.push_str(&file_labels);
    ret
}

// Option `k` is chosen with the `k`-th lowercase letter.
pub fn prompt_option_key(k: usize) -> Option<char> {
    u8::try_from(k).ok().and_then(|k| b'a'.checked_add(k)).map(char::from).filter(char::is_ascii_lowercase)
}

pub fn prompt_option_for_key(key: char) -> Option<usize> {
    key.is_ascii_lowercase().then(|| usize::from(key as u8 - b'a'))
}

// Lines below the board.
pub fn render_prompt(view: &BoardView) -> Vec<String> {
    let Some(ref prompt) = view.prompt else {
        return Vec::new();
    };
    let mut lines = vec![format!("Several moves end on {}, choose one:", prompt.square)];
    for (k, label) in prompt.labels.iter().enumerate() {
        let key = prompt_option_key(k).map_or_else(|| "-".to_owned(), String::from);
        lines.push(format!("  {}) {}", key, label));
    }
    lines
}

pub fn board_height(shape: BoardShape) -> u16 { shape.num_ranks as u16 + 2 * BOARD_TOP }

// Maps a terminal cell to a board square position, if the cell belongs to one.
pub fn display_coord_at(column: u16, row: u16, shape: BoardShape) -> Option<DisplayCoord> {
    let x = i32::from(column.checked_sub(BOARD_LEFT)? / SQUARE_WIDTH);
    let y = i32::from(row.checked_sub(BOARD_TOP)?);
    (x < shape.num_files && y < shape.num_ranks).then_some(DisplayCoord { x, y })
}

// Prompt option under a terminal cell. The prompt header is drawn right below the board.
pub fn prompt_option_at(row: u16, view: &BoardView) -> Option<usize> {
    let num_options = view.prompt.as_ref()?.labels.len();
    let k = usize::from(row.checked_sub(board_height(view.shape) + 1)?);
    (k < num_options).then_some(k)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_cells_to_squares() {
        let shape = BoardShape { num_files: 8, num_ranks: 8 };
        assert_eq!(display_coord_at(0, 3, shape), None);
        assert_eq!(display_coord_at(3, 0, shape), None);
        assert_eq!(display_coord_at(3, 1, shape), Some(DisplayCoord { x: 0, y: 0 }));
        assert_eq!(display_coord_at(5, 8, shape), Some(DisplayCoord { x: 0, y: 7 }));
        assert_eq!(display_coord_at(26, 2, shape), Some(DisplayCoord { x: 7, y: 1 }));
        assert_eq!(display_coord_at(27, 2, shape), None);
        assert_eq!(display_coord_at(10, 9, shape), None);
    }

    #[test]
    fn prompt_keys() {
        assert_eq!(prompt_option_key(0), Some('a'));
        assert_eq!(prompt_option_key(3), Some('d'));
        assert_eq!(prompt_option_key(26), None);
        assert_eq!(prompt_option_for_key('b'), Some(1));
        assert_eq!(prompt_option_for_key('7'), None);
        assert_eq!(prompt_option_for_key(','), None);
        assert_eq!(prompt_option_for_key('/'), None);
    }
}
