//! Demo friends, groups and history.
//!
//! Everything is created through the public engine API, so seeded balances
//! are exactly what replaying the seeded transactions produces.

use chrono::{Days, NaiveDate};

use crate::{Amount, Engine, GameType, NewTransaction, NewUser, ResultEngine, SplitMode, Store};

fn days_ago(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

fn tenths(value: i64) -> Amount {
    Amount::from_tenths(value)
}

/// Populate `engine` with the sample friend group.
pub fn sample_data<S: Store>(engine: &mut Engine<S>, today: NaiveDate) -> ResultEngine<()> {
    let alex = engine.create_user(NewUser::friend("Alex", "adventurer"))?.id;
    let sarah = engine.create_user(NewUser::friend("Sarah", "avataaars"))?.id;
    let mike = engine.create_user(NewUser::friend("Mike", "bottts"))?.id;
    let emma = engine.create_user(NewUser::friend("Emma", "big-smile"))?.id;
    let chris = engine.create_user(NewUser::friend("Chris", "micah"))?.id;
    engine.create_user(NewUser::group(
        "Poker Night",
        "initials",
        [alex.as_str(), sarah.as_str(), mike.as_str()],
    ))?;
    engine.create_user(NewUser::group(
        "Roommates",
        "initials",
        [sarah.as_str(), emma.as_str(), chris.as_str()],
    ))?;

    engine.create_transaction(
        NewTransaction::game("Mahjong Session", GameType::Mahjong, days_ago(today, 4))
            .participant(&mike, tenths(800))
            .participant(&emma, tenths(-250))
            .participant(&alex, tenths(-550)),
    )?;
    engine.create_transaction(
        NewTransaction::expense("Grocery Shopping", days_ago(today, 2), tenths(1205))
            .category("shopping")
            .participant(&emma, tenths(402))
            .participant(&chris, tenths(402))
            .participant(&sarah, tenths(401))
            .split(SplitMode::Custom),
    )?;
    engine.create_transaction(
        NewTransaction::game("Poker Night", GameType::Poker, days_ago(today, 1))
            .participant(&alex, tenths(500))
            .participant(&sarah, tenths(-300))
            .participant(&mike, tenths(-200)),
    )?;

    let dinner_shares = engine.split_equally(tenths(850), [alex.as_str(), sarah.as_str()])?;
    engine.create_transaction(
        NewTransaction::loan("Dinner at Olive Garden", today, tenths(850))
            .category("restaurant")
            .notes("Birthday dinner")
            .participants(dinner_shares),
    )?;

    engine.settle_up(&sarah, tenths(200), today)?;
    Ok(())
}
