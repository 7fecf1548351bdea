use chrono::NaiveDate;

use engine::{
    Amount, CURRENT_USER_ID, Engine, EngineError, GameType, NewTransaction, NewUser,
    SettlementError, SplitMode, TransactionType, ValidationError,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
}

fn tenths(value: i64) -> Amount {
    Amount::from_tenths(value)
}

fn engine_with_friends(names: &[&str]) -> (Engine, Vec<String>) {
    let mut engine = Engine::builder().build();
    let ids = names
        .iter()
        .map(|name| engine.create_user(NewUser::friend(*name, "micah")).unwrap().id)
        .collect();
    (engine, ids)
}

/// Give `user_id` the balance `value` through a custom-split loan (positive)
/// or a game against the current user (negative).
fn set_balance(engine: &mut Engine, user_id: &str, value: i64) {
    let tx = if value >= 0 {
        NewTransaction::loan("Setup", date(1), tenths(value))
            .participant(user_id, tenths(value))
            .split(SplitMode::Custom)
    } else {
        NewTransaction::game("Setup", GameType::Blackjack, date(1))
            .participant(user_id, tenths(value))
            .participant(CURRENT_USER_ID, tenths(-value))
    };
    engine.create_transaction(tx).unwrap();
}

#[test]
fn create_applies_and_delete_reverses_balances() {
    let (mut engine, ids) = engine_with_friends(&["Alex", "Sarah", "Mike"]);

    let game = engine
        .create_transaction(
            NewTransaction::game("Poker Night", GameType::Poker, date(26))
                .participant(&ids[0], tenths(500))
                .participant(&ids[1], tenths(-300))
                .participant(&ids[2], tenths(-200)),
        )
        .unwrap();
    assert_eq!(engine.balance(&ids[0]).unwrap(), tenths(500));
    assert_eq!(engine.balance(&ids[1]).unwrap(), tenths(-300));
    assert_eq!(engine.balance(&ids[2]).unwrap(), tenths(-200));

    let removed = engine.delete_transaction(&game.id).unwrap().unwrap();
    assert_eq!(removed.id, game.id);
    for id in &ids {
        assert_eq!(engine.balance(id).unwrap(), Amount::ZERO);
    }
    assert!(engine.transactions().is_empty());
    assert!(engine.transaction(&game.id).is_err());
}

#[test]
fn deleting_unknown_transaction_is_a_noop() {
    let (mut engine, ids) = engine_with_friends(&["Alex"]);
    set_balance(&mut engine, &ids[0], 455);
    assert!(engine.delete_transaction("missing").unwrap().is_none());
    assert_eq!(engine.balance(&ids[0]).unwrap(), tenths(455));
}

#[test]
fn out_of_order_deletes_keep_the_replay_invariant() {
    let (mut engine, ids) = engine_with_friends(&["Alex", "Sarah"]);
    let first = engine
        .create_transaction(
            NewTransaction::loan("Taxi", date(20), tenths(333))
                .participant(&ids[0], tenths(111))
                .participant(&ids[1], tenths(111)),
        )
        .unwrap();
    let second = engine
        .create_transaction(
            NewTransaction::game("Mahjong", GameType::Mahjong, date(21))
                .participant(&ids[0], tenths(-15))
                .participant(&ids[1], tenths(15)),
        )
        .unwrap();
    engine.settle_up(&ids[1], tenths(50), date(22)).unwrap();

    engine.delete_transaction(&first.id).unwrap();
    assert!(engine.audit_balances().is_empty());
    assert_eq!(engine.balance(&ids[0]).unwrap(), tenths(-15));
    assert_eq!(engine.balance(&ids[1]).unwrap(), tenths(-35));

    engine.delete_transaction(&second.id).unwrap();
    assert!(engine.audit_balances().is_empty());
    assert_eq!(engine.balance(&ids[1]).unwrap(), tenths(-50));
}

#[test]
fn rejected_transactions_leave_state_unchanged() {
    let (mut engine, ids) = engine_with_friends(&["Alex", "Sarah", "Mike"]);
    set_balance(&mut engine, &ids[0], 100);
    let before: Vec<_> = engine.users().into_iter().cloned().collect();
    let count = engine.transactions().len();

    let err = engine
        .create_transaction(
            NewTransaction::game("Poker", GameType::Poker, date(26))
                .participant(&ids[0], tenths(500))
                .participant(&ids[1], tenths(-300))
                .participant(&ids[2], tenths(-150)),
        )
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation(ValidationError::GameNotZeroSum { sum: tenths(50) })
    );

    let after: Vec<_> = engine.users().into_iter().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(engine.transactions().len(), count);
}

#[test]
fn game_tolerance_accepts_one_tenth_only() {
    let (mut engine, ids) = engine_with_friends(&["Alex", "Sarah", "Mike"]);
    let game = |third: i64| {
        NewTransaction::game("Poker", GameType::Poker, date(26))
            .participant(&ids[0], tenths(500))
            .participant(&ids[1], tenths(-300))
            .participant(&ids[2], tenths(third))
    };

    let accepted = engine.create_transaction(game(-199)).unwrap();
    let stored: Vec<_> = accepted.involved_users.iter().map(|i| i.amount).collect();
    assert_eq!(stored, [tenths(500), tenths(-300), tenths(-199)]);

    assert!(engine.create_transaction(game(-198)).is_err());
    assert!(engine.create_transaction(game(-190)).is_err());
}

#[test]
fn participants_deleted_after_a_dry_run_are_rejected_on_create() {
    let (mut engine, ids) = engine_with_friends(&["Alex"]);
    let loan = NewTransaction::loan("Lunch", date(20), tenths(120))
        .participant(&ids[0], tenths(60));
    assert!(engine.validate(loan.clone()).is_ok());

    engine.delete_user(&ids[0]).unwrap();
    let err = engine.create_transaction(loan).unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation(ValidationError::UnknownParticipant {
            user_id: ids[0].clone()
        })
    );
    assert!(engine.transactions().is_empty());
    assert!(engine.audit_balances().is_empty());
}

#[test]
fn balances_stay_within_the_supported_range() {
    let (mut engine, ids) = engine_with_friends(&["Alex"]);
    let loan = |amount: Amount| {
        NewTransaction::loan("Mortgage", date(10), amount)
            .participant(&ids[0], amount)
            .split(SplitMode::Custom)
    };
    engine.create_transaction(loan(Amount::MAX)).unwrap();

    let err = engine.create_transaction(loan(tenths(10))).unwrap_err();
    assert_eq!(err.kind(), "balance_out_of_range");
    assert_eq!(engine.transactions().len(), 1);
    assert_eq!(engine.balance(&ids[0]).unwrap(), Amount::MAX);

    let game = engine
        .create_transaction(
            NewTransaction::game("High stakes", GameType::Poker, date(11))
                .participant(&ids[0], -Amount::MAX)
                .participant(CURRENT_USER_ID, Amount::MAX),
        )
        .unwrap();
    engine.create_transaction(loan(Amount::MAX)).unwrap();

    // Removing the game would push Alex to twice the maximum.
    let err = engine.delete_transaction(&game.id).unwrap_err();
    assert_eq!(err.kind(), "balance_out_of_range");
    assert!(engine.transaction(&game.id).is_ok());
    assert_eq!(engine.balance(&ids[0]).unwrap(), Amount::MAX);
    assert!(engine.audit_balances().is_empty());
}

#[test]
fn unknown_participants_are_rejected_on_create() {
    let (mut engine, _) = engine_with_friends(&["Alex"]);
    let err = engine
        .create_transaction(
            NewTransaction::loan("Taxi", date(3), tenths(100)).participant("ghost", tenths(50)),
        )
        .unwrap_err();
    assert_eq!(err.kind(), "unknown_participant");
}

#[test]
fn settlement_bounds() {
    let (mut engine, ids) = engine_with_friends(&["Alex", "Chris"]);
    set_balance(&mut engine, &ids[0], 455);

    let err = engine.settle_up(&ids[0], tenths(456), date(27)).unwrap_err();
    assert_eq!(
        err,
        EngineError::Settlement(SettlementError::AmountExceedsBalance {
            requested: tenths(456),
            available: tenths(455),
        })
    );

    let err = engine.settle_up(&ids[0], Amount::ZERO, date(27)).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::InvalidAmount(_))
    ));

    let err = engine.settle_up(&ids[1], tenths(10), date(27)).unwrap_err();
    assert_eq!(
        err,
        EngineError::Settlement(SettlementError::NothingToSettle {
            user_id: ids[1].clone()
        })
    );

    let payment = engine.settle_up(&ids[0], tenths(455), date(27)).unwrap();
    assert_eq!(engine.balance(&ids[0]).unwrap(), Amount::ZERO);
    assert_eq!(payment.transaction_type(), TransactionType::Payment);
    assert_eq!(payment.title, "Alex paid you");
    assert_eq!(payment.total_amount, tenths(455));
    assert_eq!(payment.amount_for(&ids[0]), Some(tenths(-455)));
    assert_eq!(payment.amount_for(CURRENT_USER_ID), Some(tenths(455)));
    assert!(engine.audit_balances().is_empty());
}

#[test]
fn settling_what_you_owe() {
    let (mut engine, ids) = engine_with_friends(&["Sarah"]);
    set_balance(&mut engine, &ids[0], -320);

    let payment = engine.settle_up(&ids[0], tenths(120), date(27)).unwrap();
    assert_eq!(payment.title, "You paid Sarah");
    assert_eq!(engine.balance(&ids[0]).unwrap(), tenths(-200));

    engine.settle_all(&ids[0], date(28)).unwrap();
    assert_eq!(engine.balance(&ids[0]).unwrap(), Amount::ZERO);
}

#[test]
fn settlement_rejects_groups_self_and_unknown_users() {
    let (mut engine, ids) = engine_with_friends(&["Alex"]);
    let group = engine
        .create_user(NewUser::group("Night", "initials", [ids[0].as_str()]))
        .unwrap();

    assert_eq!(
        engine.settle_up(CURRENT_USER_ID, tenths(10), date(1)).unwrap_err(),
        EngineError::Validation(ValidationError::SelfSettlement)
    );
    assert_eq!(
        engine.settle_up(&group.id, tenths(10), date(1)).unwrap_err().kind(),
        "group_participant"
    );
    assert_eq!(
        engine.settle_up("ghost", tenths(10), date(1)).unwrap_err().kind(),
        "not_found"
    );
}

#[test]
fn transactions_are_listed_most_recent_first() {
    let (mut engine, ids) = engine_with_friends(&["Alex"]);
    let loan = |title: &str, day: u32| {
        NewTransaction::loan(title, date(day), tenths(10)).participant(&ids[0], tenths(5))
    };
    engine.create_transaction(loan("a", 24)).unwrap();
    engine.create_transaction(loan("b", 26)).unwrap();
    engine.create_transaction(loan("c", 24)).unwrap();
    engine.create_transaction(loan("d", 25)).unwrap();

    let titles: Vec<_> = engine.transactions().iter().map(|t| t.title.clone()).collect();
    assert_eq!(titles, ["b", "d", "c", "a"]);
}

#[test]
fn dangling_references_are_tolerated() {
    let (mut engine, ids) = engine_with_friends(&["Alex", "Sarah"]);
    let game = engine
        .create_transaction(
            NewTransaction::game("Poker", GameType::Poker, date(26))
                .participant(&ids[0], tenths(200))
                .participant(&ids[1], tenths(-200)),
        )
        .unwrap();

    let removed = engine.delete_user(&ids[0]).unwrap();
    assert!(removed.is_some());
    assert!(engine.delete_user(&ids[0]).unwrap().is_none());

    assert_eq!(engine.transactions().len(), 1);
    assert_eq!(engine.transactions_for_user(&ids[0]).len(), 1);
    assert_eq!(engine.total_owed(), tenths(200));
    assert_eq!(engine.total_owed_to_you(), Amount::ZERO);
    assert_eq!(engine.net_balance(), tenths(-200));
    assert_eq!(engine.leaderboard(false).len(), 1);
    assert_eq!(engine.game_type_counts().poker, 1);
    assert!(engine.last_game().is_some());
    assert!(engine.audit_balances().is_empty());

    // Deleting the transaction now skips the missing user.
    engine.delete_transaction(&game.id).unwrap().unwrap();
    assert_eq!(engine.balance(&ids[1]).unwrap(), Amount::ZERO);
}
