//! Statistics API endpoints

use api_types::stats::{Achievements, GameCount, GameStats, Standing, Stats};
use axum::{Json, extract::State};

use crate::{
    mapping::{transaction_view, user_view},
    server::ServerState,
};

const LEADERBOARD_SIZE: usize = 10;

/// Handle requests for the dashboard statistics
pub async fn get_stats(State(state): State<ServerState>) -> Json<Stats> {
    let engine = state.engine.read().await;

    let counts = engine.game_type_counts();
    let achievements = engine.achievements();

    Json(Stats {
        total_owed: engine.total_owed().to_f64(),
        total_owed_to_you: engine.total_owed_to_you().to_f64(),
        net_balance: engine.net_balance().to_f64(),
        loan_balance: engine.loan_balance().to_f64(),
        game_balance: engine.game_balance().to_f64(),
        leaderboard: engine
            .leaderboard(false)
            .into_iter()
            .take(LEADERBOARD_SIZE)
            .map(user_view)
            .collect(),
        game_stats: GameStats {
            poker: counts.poker,
            mahjong: counts.mahjong,
            blackjack: counts.blackjack,
        },
        total_transactions: engine.transactions().len(),
        last_game: engine.last_game().map(transaction_view),
        achievements: Achievements {
            biggest_winner: achievements.biggest_winner.map(|s| Standing {
                user_id: s.user_id,
                name: s.name,
                balance: s.balance.to_f64(),
            }),
            most_played: achievements.most_played.map(|c| GameCount {
                user_id: c.user_id,
                name: c.name,
                games: c.games,
            }),
        },
    })
}
