// Offline look at a board push: what the client would index, highlight and prompt for.

use std::io::{self, Read};
use std::sync::mpsc;

use anyhow::Context;
use board_client::client::BoardSyncController;
use board_client::display::BoardOrientation;
use board_client::event::BoardPush;
use board_client::move_index::MoveIndex;
use board_client::network;
use board_client::selection::resolve_candidates;
use board_client::test_util;
use board_client::view::BoardView;
use itertools::Itertools;

use crate::tui;


pub struct InspectConfig {
    // Print a sample push message instead of reading one.
    pub sample: bool,
}

pub fn run(config: InspectConfig) -> anyhow::Result<()> {
    if config.sample {
        println!("{}", serde_json::to_string_pretty(&test_util::promotion_push())?);
        return Ok(());
    }
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).context("Reading stdin")?;
    let push = network::parse_board_push(&input).map_err(|err| anyhow::anyhow!("{}", err))?;
    print!("{}", describe_push(push));
    Ok(())
}

pub fn describe_push(push: BoardPush) -> String {
    let (commits_tx, _commits_rx) = mpsc::channel();
    let mut controller = BoardSyncController::new(commits_tx);
    controller.apply_board_push(push);
    let mut out = String::new();
    if let Some(view) = BoardView::render(&controller, BoardOrientation::Normal) {
        out.push_str(&tui::render_board(&view));
    }
    let index = controller.move_index();
    out.push_str(&format!("{} moves\n", index.len()));
    for origin in index.origins() {
        out.push_str(&format!(
            "{} -> {}\n",
            origin,
            index.destinations(origin).map(|d| format!("[{}]", d)).join(" ")
        ));
    }
    for line in ambiguous_destinations(index) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn ambiguous_destinations(index: &MoveIndex) -> Vec<String> {
    index
        .origins()
        .flat_map(|origin| index.destinations(origin).map(move |dest| (origin, dest)))
        .filter_map(|(origin, dest)| {
            let candidates = resolve_candidates(index, origin, dest);
            (candidates.len() > 1).then(|| {
                format!(
                    "{} -> {} needs a choice: {}",
                    origin,
                    dest,
                    candidates.iter().map(|c| format!("{} ({})", c.effect_label, c.id)).join(", ")
                )
            })
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_promotions() {
        let description = console::strip_ansi_codes(&describe_push(test_util::promotion_push())).to_string();
        assert!(description.contains("6 moves\n"));
        assert!(description.contains("1,0 -> [2,2] [0,2]\n"));
        assert!(description.contains(
            "6,6 -> 6,7 needs a choice: PromoteQueen (#0), PromoteRook (#1), PromoteBishop (#2), PromoteKnight (#3)"
        ));
    }
}
