use std::collections::HashSet;

use itertools::Itertools;

use crate::client::{BoardSyncController, ClickReaction};
use crate::coord::{BoardShape, Square};
use crate::display::{BoardOrientation, DisplayCoord, from_display_coord, to_display_coord};
use crate::piece::{PieceId, piece_to_pictogram};


// Forwards clicks on one square to the controller. Built once per render pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareHandler {
    square: Square,
}

impl SquareHandler {
    pub fn square(&self) -> Square { self.square }
    pub fn on_click(&self, controller: &mut BoardSyncController) -> ClickReaction {
        controller.click_square(self.square)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SquareShade {
    Dark,
    Light,
}

#[derive(Clone, Debug)]
pub struct SquareView {
    pub square: Square,
    pub display: DisplayCoord,
    pub piece: PieceId,
    pub pictogram: char,
    pub shade: SquareShade,
    pub selected: bool,
    // Some legal move from the selected square ends here.
    pub move_dot: bool,
    pub handler: SquareHandler,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PromptView {
    pub square: Square,
    pub labels: Vec<String>,
}

// Everything a front-end needs to draw the board. Immutable: a new view is produced on every
// render request.
#[derive(Clone, Debug)]
pub struct BoardView {
    pub shape: BoardShape,
    pub orientation: BoardOrientation,
    // Top-left to bottom-right, row by row.
    pub squares: Vec<SquareView>,
    pub prompt: Option<PromptView>,
    pub awaiting_commit: bool,
}

impl BoardView {
    // `None` until the first board arrives.
    pub fn render(controller: &BoardSyncController, orientation: BoardOrientation) -> Option<Self> {
        let board = controller.board()?;
        let shape = board.shape();
        let selected = controller.selected_origin();
        let dots: HashSet<Square> = controller.highlighted_destinations().into_iter().collect();
        let squares = (0..shape.num_ranks)
            .cartesian_product(0..shape.num_files)
            .filter_map(|(y, x)| from_display_coord(DisplayCoord { x, y }, shape, orientation))
            .map(|square| {
                let piece = board[square].clone();
                SquareView {
                    square,
                    display: to_display_coord(square, shape, orientation),
                    pictogram: piece_to_pictogram(&piece),
                    piece,
                    shade: if (square.file + square.rank) % 2 == 0 {
                        SquareShade::Dark
                    } else {
                        SquareShade::Light
                    },
                    selected: selected == Some(square),
                    move_dot: dots.contains(&square),
                    handler: SquareHandler { square },
                }
            })
            .collect();
        let prompt = controller.prompt().map(|p| PromptView {
            square: p.square(),
            labels: p.labels().map(str::to_owned).collect(),
        });
        Some(BoardView {
            shape,
            orientation,
            squares,
            prompt,
            awaiting_commit: controller.pending_commit().is_some(),
        })
    }

    pub fn square(&self, square: Square) -> Option<&SquareView> {
        self.squares.iter().find(|v| v.square == square)
    }

    pub fn handler_at(&self, q: DisplayCoord) -> Option<SquareHandler> {
        from_display_coord(q, self.shape, self.orientation).map(|square| SquareHandler { square })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[SquareView]> {
        self.squares.chunks(self.shape.num_files as usize)
    }

    pub fn move_dots(&self) -> Vec<Square> {
        self.squares.iter().filter(|v| v.move_dot).map(|v| v.square).collect()
    }
}
