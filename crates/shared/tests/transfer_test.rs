mod support;

use shared::{
    domain::requests::transfer::TransferRequest,
    errors::{RepositoryError, ServiceError},
    model::card::CardStatus,
};
use support::{build_env, dec, issue_card, past_date, principal};

async fn active_card(env: &support::TestEnv, owner_id: i64, balance: &str) -> i64 {
    let card_id = issue_card(env, owner_id).await;
    env.card_command.activate(card_id).await.unwrap();
    env.cards.set_balance(card_id, dec(balance));
    card_id
}

fn request(from: i64, to: i64, amount: &str) -> TransferRequest {
    TransferRequest {
        from_card_id: from,
        to_card_id: to,
        amount: dec(amount),
        description: Some("rent".to_string()),
    }
}

#[tokio::test]
async fn transfer_moves_funds_and_conserves_total() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "100.00").await;
    let b = active_card(&env, owner_id, "50.00").await;

    let response = env
        .transfer
        .transfer(&alice, &request(a, b, "30.00"))
        .await
        .unwrap();

    let record = response.data;
    assert_eq!(record.from_card_id, a);
    assert_eq!(record.to_card_id, b);
    assert_eq!(record.amount, dec("30.00"));
    assert_eq!(record.description.as_deref(), Some("rent"));

    let from = env.cards.get(a).unwrap();
    let to = env.cards.get(b).unwrap();
    assert_eq!(from.balance, dec("70.00"));
    assert_eq!(to.balance, dec("80.00"));
    assert_eq!(from.balance + to.balance, dec("150.00"));
}

#[tokio::test]
async fn over_debit_fails_and_leaves_balances_unchanged() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "10.00").await;
    let b = active_card(&env, owner_id, "50.00").await;

    let err = env
        .transfer
        .transfer(&alice, &request(a, b, "30.00"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InsufficientFunds(id) if id == a));
    assert_eq!(env.cards.get(a).unwrap().balance, dec("10.00"));
    assert_eq!(env.cards.get(b).unwrap().balance, dec("50.00"));
}

#[tokio::test]
async fn same_card_transfer_is_rejected() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "100.00").await;

    let err = env
        .transfer
        .transfer(&alice, &request(a, a, "30.00"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidOperation(msg) if msg.contains("same card")));
    assert_eq!(env.cards.get(a).unwrap().balance, dec("100.00"));
}

#[tokio::test]
async fn inactive_card_cannot_send_or_receive() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "100.00").await;
    let b = issue_card(&env, owner_id).await;

    let err = env
        .transfer
        .transfer(&alice, &request(a, b, "30.00"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ServiceError::InvalidOperation(ref msg) if msg.contains(&format!("card {b} is not active")))
    );

    let err = env
        .transfer
        .transfer(&alice, &request(b, a, "30.00"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, ServiceError::InvalidOperation(ref msg) if msg.contains(&format!("card {b} is not active")))
    );
}

#[tokio::test]
async fn expired_card_is_refreshed_and_rejected() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "100.00").await;
    let b = active_card(&env, owner_id, "50.00").await;
    env.cards.set_expiry(a, past_date());

    let err = env
        .transfer
        .transfer(&alice, &request(a, b, "30.00"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidOperation(msg) if msg.contains("not active")));
    assert_eq!(env.cards.get(a).unwrap().status, CardStatus::Expired);
    assert_eq!(env.cards.get(a).unwrap().balance, dec("100.00"));
    assert_eq!(env.cards.get(b).unwrap().balance, dec("50.00"));
}

#[tokio::test]
async fn foreign_card_is_indistinguishable_from_missing() {
    let env = build_env().await;
    let alice_id = env.users.insert_user("alice");
    let bob_id = env.users.insert_user("bob");
    let alice = principal(alice_id, "alice");
    let a = active_card(&env, alice_id, "100.00").await;
    let bobs = active_card(&env, bob_id, "50.00").await;

    let err = env
        .transfer
        .transfer(&alice, &request(a, bobs, "30.00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(id) if id == bobs));

    let err = env
        .transfer
        .transfer(&alice, &request(a, 999, "30.00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CardNotFound(999)));

    assert_eq!(env.cards.get(a).unwrap().balance, dec("100.00"));
    assert_eq!(env.cards.get(bobs).unwrap().balance, dec("50.00"));
}

#[tokio::test]
async fn amount_is_reasserted_by_the_engine() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "100.00").await;
    let b = active_card(&env, owner_id, "50.00").await;

    let err = env
        .transfer
        .transfer(&alice, &request(a, b, "0.00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(msg) if msg.contains("greater than zero")));

    let err = env
        .transfer
        .transfer(&alice, &request(a, b, "-5.00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(msg) if msg.contains("greater than zero")));

    let err = env
        .transfer
        .transfer(&alice, &request(a, b, "1.005"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(msg) if msg.contains("two decimal")));

    assert_eq!(env.cards.get(a).unwrap().balance, dec("100.00"));
    assert_eq!(env.cards.get(b).unwrap().balance, dec("50.00"));
}

#[tokio::test]
async fn version_conflict_is_retried_with_fresh_reads() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "100.00").await;
    let b = active_card(&env, owner_id, "50.00").await;

    env.cards
        .conflict_transfers
        .store(1, std::sync::atomic::Ordering::SeqCst);

    env.transfer
        .transfer(&alice, &request(a, b, "30.00"))
        .await
        .unwrap();

    assert_eq!(env.cards.get(a).unwrap().balance, dec("70.00"));
    assert_eq!(env.cards.get(b).unwrap().balance, dec("80.00"));
}

#[tokio::test]
async fn persistent_conflict_fails_without_lost_updates() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "100.00").await;
    let b = active_card(&env, owner_id, "50.00").await;

    env.cards
        .conflict_transfers
        .store(100, std::sync::atomic::Ordering::SeqCst);

    let err = env
        .transfer
        .transfer(&alice, &request(a, b, "30.00"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::Repo(RepositoryError::Conflict(_))
    ));
    assert_eq!(env.cards.get(a).unwrap().balance, dec("100.00"));
    assert_eq!(env.cards.get(b).unwrap().balance, dec("50.00"));
}

#[tokio::test]
async fn repeated_transfers_never_drive_balance_negative() {
    let env = build_env().await;
    let owner_id = env.users.insert_user("alice");
    let alice = principal(owner_id, "alice");
    let a = active_card(&env, owner_id, "50.00").await;
    let b = active_card(&env, owner_id, "0.00").await;

    let mut successes = 0;
    for _ in 0..4 {
        match env.transfer.transfer(&alice, &request(a, b, "20.00")).await {
            Ok(_) => successes += 1,
            Err(err) => assert!(matches!(err, ServiceError::InsufficientFunds(_))),
        }
    }

    assert_eq!(successes, 2);
    assert_eq!(env.cards.get(a).unwrap().balance, dec("10.00"));
    assert_eq!(env.cards.get(b).unwrap().balance, dec("40.00"));
}
