//! Conversions between wire bodies and ledger types.

use api_types::{
    transaction::{
        GameType as ApiGameType, SplitType, Transaction as ApiTransaction,
        TransactionNew, TransactionType as ApiType, TransactionUser,
    },
    user::{User as ApiUser, UserNew},
};
use chrono::NaiveDate;
use engine::{
    Amount, GameType, Involvement, NewTransaction, NewUser, SplitMode, Transaction,
    TransactionKind, TransactionType, User, UserKind,
};

use crate::ServerError;

pub(crate) fn amount(value: f64) -> Result<Amount, ServerError> {
    Ok(Amount::round_f64(value)?)
}

pub(crate) fn map_game_type(game_type: GameType) -> ApiGameType {
    match game_type {
        GameType::Poker => ApiGameType::Poker,
        GameType::Mahjong => ApiGameType::Mahjong,
        GameType::Blackjack => ApiGameType::Blackjack,
    }
}

fn game_type_from_api(game_type: ApiGameType) -> GameType {
    match game_type {
        ApiGameType::Poker => GameType::Poker,
        ApiGameType::Mahjong => GameType::Mahjong,
        ApiGameType::Blackjack => GameType::Blackjack,
    }
}

pub(crate) fn map_type(kind: TransactionType) -> ApiType {
    match kind {
        TransactionType::Loan => ApiType::Loan,
        TransactionType::Expense => ApiType::Expense,
        TransactionType::Game => ApiType::Game,
        TransactionType::Payment => ApiType::Payment,
    }
}

pub(crate) fn type_from_api(kind: ApiType) -> TransactionType {
    match kind {
        ApiType::Loan => TransactionType::Loan,
        ApiType::Expense => TransactionType::Expense,
        ApiType::Game => TransactionType::Game,
        ApiType::Payment => TransactionType::Payment,
    }
}

pub(crate) fn user_view(user: &User) -> ApiUser {
    let members = match &user.kind {
        UserKind::Group { members } => Some(members.clone()),
        UserKind::Friend => None,
    };
    ApiUser {
        id: user.id.clone(),
        name: user.name.clone(),
        avatar: user.avatar.clone(),
        balance: user.balance.to_f64(),
        is_group: user.is_group(),
        members,
    }
}

pub(crate) fn transaction_view(tx: &Transaction) -> ApiTransaction {
    ApiTransaction {
        id: tx.id.clone(),
        kind: map_type(tx.transaction_type()),
        title: tx.title.clone(),
        category: tx.category().map(str::to_string),
        game_type: tx.game_type().map(map_game_type),
        date: tx.date,
        total_amount: tx.total_amount.to_f64(),
        involved_users: tx
            .involved_users
            .iter()
            .map(|involvement| TransactionUser {
                user_id: involvement.user_id.clone(),
                amount: involvement.amount.to_f64(),
            })
            .collect(),
        notes: tx.notes.clone(),
    }
}

pub(crate) fn new_user(body: UserNew) -> Result<NewUser, ServerError> {
    if body.is_group.unwrap_or(false) {
        return Ok(NewUser::group(
            body.name,
            body.avatar,
            body.members.unwrap_or_default(),
        ));
    }
    if body.members.is_some_and(|members| !members.is_empty()) {
        return Err(ServerError::BadRequest(
            "only groups can have members".to_string(),
        ));
    }
    Ok(NewUser::friend(body.name, body.avatar))
}

fn kind_from_body(body: &TransactionNew) -> Result<TransactionKind, ServerError> {
    let category = body.category.clone().filter(|c| !c.trim().is_empty());
    if body.kind != ApiType::Game && body.game_type.is_some() {
        return Err(ServerError::BadRequest(
            "gameType is only valid for games".to_string(),
        ));
    }
    if matches!(body.kind, ApiType::Game | ApiType::Payment) && category.is_some() {
        return Err(ServerError::BadRequest(
            "category is only valid for loans and expenses".to_string(),
        ));
    }

    Ok(match body.kind {
        ApiType::Loan => TransactionKind::Loan { category },
        ApiType::Expense => TransactionKind::Expense { category },
        ApiType::Game => {
            let game_type = body.game_type.ok_or_else(|| {
                ServerError::BadRequest("gameType is required for games".to_string())
            })?;
            TransactionKind::Game {
                game_type: game_type_from_api(game_type),
            }
        }
        ApiType::Payment => TransactionKind::Payment,
    })
}

/// Build the ledger candidate for a `POST /transactions` body. `today` is
/// used when the body carries no date.
pub(crate) fn candidate(body: TransactionNew, today: NaiveDate) -> Result<NewTransaction, ServerError> {
    let kind = kind_from_body(&body)?;

    let involved = body
        .involved_users
        .iter()
        .map(|user| Ok(Involvement::new(user.user_id.clone(), amount(user.amount)?)))
        .collect::<Result<Vec<_>, ServerError>>()?;
    let split = match body.split_type {
        SplitType::Equal => SplitMode::Equal,
        SplitType::Unequal => SplitMode::Custom,
    };

    let mut candidate = NewTransaction::new(
        body.title,
        kind,
        body.date.unwrap_or(today),
        amount(body.total_amount)?,
    )
    .participants(involved)
    .split(split);
    if let Some(notes) = body.notes {
        candidate = candidate.notes(notes);
    }
    Ok(candidate)
}
