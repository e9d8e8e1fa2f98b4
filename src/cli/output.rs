//! Output formatting utilities for CLI.

use ollama_board_game::game::{
    PlaceOffer, Player, SavedGame, Seat, TileOutcome, TurnReport, Upgrade,
};
use ollama_board_game::{Board, Tile};

/// Display name of whoever sits in `seat`.
fn owner_name(game: &SavedGame, seat: Seat) -> &str {
    &game.player(seat).name
}

/// Format a tile as a block of `Key: value` lines.
pub(super) fn format_tile(tile: &Tile, game: &SavedGame) -> String {
    let mut out = format!("Name: {}\nDescription: {}\n", tile.name(), tile.description());
    if let Some(place) = tile.as_place() {
        let owner = place.owner.map_or("None", |seat| owner_name(game, seat));
        out.push_str(&format!(
            "Level: {}\nGold Cost: {}\nGold Per Turn: {}\nEXP Per Turn: {}\nOwner: {owner}\n",
            place.level, place.gold_cost, place.gold_per_turn, place.exp_per_turn
        ));
    }
    out
}

/// Format an upgrade as a block of `Key: value` lines.
pub(super) fn format_upgrade(upgrade: &Upgrade) -> String {
    format!(
        "Name: {}\nDescription: {}\nGold Cost: {}\nGold Gain Multiplier: {}\nEXP Gain Multiplier: {}\n",
        upgrade.name,
        upgrade.description,
        upgrade.gold_cost,
        upgrade.gold_multiplier,
        upgrade.exp_multiplier
    )
}

/// Format a player's stats, owned places and upgrades.
pub(super) fn format_player(player: &Player, game: &SavedGame) -> String {
    let board: &Board = &game.board;
    let mut out = String::new();
    out.push_str(&format!("Player ID: {}\n", player.id));
    out.push_str(&format!("Name: {}\n", player.name));
    out.push_str(&format!("Level: {}\n", player.level));
    out.push_str(&format!("Location: {}\n", player.position));
    out.push_str(&format!("Gold: {}\n", player.gold));
    out.push_str(&format!("EXP: {}\n", player.exp));
    out.push_str(&format!("Required EXP: {}\n", player.required_exp));
    out.push_str(&format!("Gold Per Turn: {}\n", player.gold_per_turn(board)));
    out.push_str(&format!("EXP Per Turn: {}\n", player.exp_per_turn(board)));

    out.push_str("Below is a list of places owned by the player:\n");
    for tile in player.owned_places.iter().filter_map(|&i| board.tile(i)) {
        out.push_str(&format_tile(tile, game));
        out.push('\n');
    }

    out.push_str("Below is a list of upgrades owned by the player:\n");
    for upgrade in &player.upgrades {
        out.push_str(&format_upgrade(upgrade));
        out.push('\n');
    }
    out
}

/// Format both players' stats.
pub(super) fn format_stats(game: &SavedGame) -> String {
    format!(
        "Your stats:\n\n{}\nCPU's stats:\n\n{}",
        format_player(&game.human, game),
        format_player(&game.ai, game)
    )
}

/// Format what happened during a turn.
///
/// For the human seat the arrival line is printed live before any prompt, so
/// it is left out here.
pub(super) fn format_report(report: &TurnReport, game: &SavedGame) -> String {
    let tile_name = game.board.tile(report.tile).map_or("?", Tile::name);
    let mut lines = Vec::new();

    match report.seat {
        Seat::Human => {
            if report.income.levels_gained > 0 {
                lines.push(format!("Level up! You are now level {}!", game.human.level));
            }
            for _ in 0..report.laps {
                lines.push(format!("You passed START TILE and earned {} gold!", game.start_bonus));
            }
            match &report.outcome {
                TileOutcome::PlaceTaken(offer) => {
                    let verb = match offer {
                        PlaceOffer::Buy => "bought",
                        PlaceOffer::Upgrade => "upgraded",
                        PlaceOffer::Acquire { .. } => "acquired",
                    };
                    lines.push(format!("Congratulations! You have successfully {verb} {tile_name}!"));
                }
                TileOutcome::InsufficientGold => {
                    lines.push("Sorry! You have insufficient gold!".to_string());
                }
                TileOutcome::Reward {
                    reward,
                    levels_gained,
                } => {
                    lines.push(format!(
                        "Congratulations! You earned {} gold and {} EXP!",
                        reward.gold, reward.exp
                    ));
                    if *levels_gained > 0 {
                        lines.push(format!("Level up! You are now level {}!", game.human.level));
                    }
                }
                TileOutcome::UpgradeBought(index) => {
                    let name = game.board.upgrades().get(*index).map_or("?", |u| u.name.as_str());
                    lines.push(format!("Congratulations! You have successfully bought {name}!"));
                }
                TileOutcome::Nothing | TileOutcome::PlaceDeclined(_) | TileOutcome::ShopSkipped => {}
            }
        }
        Seat::Ai => {
            lines.push(format!("CPU rolled {}.", report.roll));
            lines.push(format!("CPU is now at {tile_name}!"));
            match &report.outcome {
                TileOutcome::PlaceTaken(offer) => {
                    let verb = match offer {
                        PlaceOffer::Buy => "bought",
                        PlaceOffer::Upgrade => "upgraded",
                        PlaceOffer::Acquire { .. } => "acquired",
                    };
                    lines.push(format!("CPU {verb} {tile_name}!"));
                }
                TileOutcome::Reward { reward, .. } => {
                    lines.push(format!("CPU earned {} gold and {} EXP!", reward.gold, reward.exp));
                }
                TileOutcome::UpgradeBought(index) => {
                    let name = game.board.upgrades().get(*index).map_or("?", |u| u.name.as_str());
                    lines.push(format!("CPU bought {name}!"));
                }
                TileOutcome::Nothing
                | TileOutcome::PlaceDeclined(_)
                | TileOutcome::InsufficientGold
                | TileOutcome::ShopSkipped => {}
            }
        }
    }

    lines.join("\n")
}
