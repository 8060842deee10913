#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{
    abstract_trait::{
        account::DynAccountService,
        card::{
            repository::{
                command::{CardCommandRepositoryTrait, DynCardCommandRepository},
                query::{CardQueryRepositoryTrait, DynCardQueryRepository},
            },
            service::{command::DynCardCommandService, query::DynCardQueryService},
        },
        role::RoleQueryRepositoryTrait,
        transfer::DynTransferService,
        user::repository::{
            command::UserCommandRepositoryTrait,
            query::{DynUserQueryRepository, UserQueryRepositoryTrait},
        },
    },
    domain::{
        principal::{AuthenticatedUser, ROLE_USER},
        requests::auth::CreateUserRecord,
        requests::card::{CreateCardRecord, CreateCardRequest, FindAllCards},
        requests::transfer::TransferBalances,
    },
    errors::RepositoryError,
    model::{
        card::{CardModel, CardStatus},
        role::RoleModel,
        user::UserModel,
    },
    service::{
        account::AccountService,
        card::{CardCommandService, CardQueryService},
        transfer::TransferService,
    },
    utils::CardCipher,
};
use std::collections::HashMap;
use std::sync::{
    Mutex,
    atomic::{AtomicI64, AtomicU32, Ordering},
};
use std::sync::Arc;

/// In-memory stand-in for the Postgres card store with real
/// version-CAS semantics and injectable conflicts.
#[derive(Default)]
pub struct InMemoryCardRepo {
    cards: Mutex<HashMap<i64, CardModel>>,
    next_id: AtomicI64,
    /// Next N `create` calls fail as unique-constraint collisions.
    pub collide_creates: AtomicU32,
    /// Next N `update_status` calls fail as version conflicts.
    pub conflict_status_updates: AtomicU32,
    /// Next N `transfer_balances` calls fail as version conflicts.
    pub conflict_transfers: AtomicU32,
}

impl InMemoryCardRepo {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    pub fn get(&self, card_id: i64) -> Option<CardModel> {
        self.cards.lock().unwrap().get(&card_id).cloned()
    }

    pub fn set_balance(&self, card_id: i64, balance: Decimal) {
        let mut cards = self.cards.lock().unwrap();
        let card = cards.get_mut(&card_id).unwrap();
        card.balance = balance;
    }

    pub fn set_status(&self, card_id: i64, status: CardStatus) {
        let mut cards = self.cards.lock().unwrap();
        let card = cards.get_mut(&card_id).unwrap();
        card.status = status;
    }

    pub fn set_expiry(&self, card_id: i64, expiry_date: NaiveDate) {
        let mut cards = self.cards.lock().unwrap();
        let card = cards.get_mut(&card_id).unwrap();
        card.expiry_date = expiry_date;
    }

    fn take_injected(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl CardQueryRepositoryTrait for InMemoryCardRepo {
    async fn find_all(
        &self,
        req: &FindAllCards,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError> {
        let cards = self.cards.lock().unwrap();
        let mut all: Vec<CardModel> = cards
            .values()
            .filter(|c| req.status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        all.sort_by_key(|c| c.card_id);

        let total = all.len() as i64;
        let offset = ((req.page - 1) * req.page_size) as usize;
        let page: Vec<CardModel> = all
            .into_iter()
            .skip(offset)
            .take(req.page_size as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_owner(
        &self,
        owner_id: i64,
        req: &FindAllCards,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError> {
        let cards = self.cards.lock().unwrap();
        let mut owned: Vec<CardModel> = cards
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by_key(|c| c.card_id);

        let total = owned.len() as i64;
        let offset = ((req.page - 1) * req.page_size) as usize;
        let page: Vec<CardModel> = owned
            .into_iter()
            .skip(offset)
            .take(req.page_size as usize)
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, card_id: i64) -> Result<CardModel, RepositoryError> {
        self.get(card_id).ok_or(RepositoryError::NotFound)
    }

    async fn find_by_id_and_owner(
        &self,
        card_id: i64,
        owner_id: i64,
    ) -> Result<CardModel, RepositoryError> {
        self.get(card_id)
            .filter(|c| c.owner_id == owner_id)
            .ok_or(RepositoryError::NotFound)
    }

    async fn exists_by_number_hash(&self, number_hash: &str) -> Result<bool, RepositoryError> {
        let cards = self.cards.lock().unwrap();
        Ok(cards.values().any(|c| c.number_hash == number_hash))
    }
}

#[async_trait]
impl CardCommandRepositoryTrait for InMemoryCardRepo {
    async fn create(&self, req: &CreateCardRecord) -> Result<CardModel, RepositoryError> {
        if Self::take_injected(&self.collide_creates) {
            return Err(RepositoryError::AlreadyExists(
                "uk_cards_number_hash".to_string(),
            ));
        }

        let mut cards = self.cards.lock().unwrap();

        if cards.values().any(|c| c.number_hash == req.number_hash) {
            return Err(RepositoryError::AlreadyExists(
                "uk_cards_number_hash".to_string(),
            ));
        }

        let card_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now().naive_utc();
        let card = CardModel {
            card_id,
            owner_id: req.owner_id,
            encrypted_number: req.encrypted_number.clone(),
            number_hash: req.number_hash.clone(),
            expiry_date: req.expiry_date,
            status: CardStatus::New,
            balance: Decimal::ZERO,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        cards.insert(card_id, card.clone());

        Ok(card)
    }

    async fn update_status(
        &self,
        card_id: i64,
        expected_version: i64,
        status: CardStatus,
    ) -> Result<CardModel, RepositoryError> {
        if Self::take_injected(&self.conflict_status_updates) {
            return Err(RepositoryError::Conflict(format!(
                "Card {card_id} was modified concurrently"
            )));
        }

        let mut cards = self.cards.lock().unwrap();
        let card = cards.get_mut(&card_id).ok_or_else(|| {
            RepositoryError::Conflict(format!("Card {card_id} was modified concurrently"))
        })?;

        if card.version != expected_version {
            return Err(RepositoryError::Conflict(format!(
                "Card {card_id} was modified concurrently"
            )));
        }

        card.status = status;
        card.version += 1;
        card.updated_at = Utc::now().naive_utc();

        Ok(card.clone())
    }

    async fn transfer_balances(&self, req: &TransferBalances) -> Result<(), RepositoryError> {
        if Self::take_injected(&self.conflict_transfers) {
            return Err(RepositoryError::Conflict(format!(
                "Card {} was modified concurrently",
                req.from_card_id
            )));
        }

        let mut cards = self.cards.lock().unwrap();

        let from = cards
            .get(&req.from_card_id)
            .ok_or(RepositoryError::NotFound)?;
        let to = cards.get(&req.to_card_id).ok_or(RepositoryError::NotFound)?;

        if from.version != req.from_version || from.balance < req.amount {
            return Err(RepositoryError::Conflict(format!(
                "Card {} was modified concurrently",
                req.from_card_id
            )));
        }
        if to.version != req.to_version {
            return Err(RepositoryError::Conflict(format!(
                "Card {} was modified concurrently",
                req.to_card_id
            )));
        }

        let now = Utc::now().naive_utc();
        {
            let from = cards.get_mut(&req.from_card_id).unwrap();
            from.balance -= req.amount;
            from.version += 1;
            from.updated_at = now;
        }
        {
            let to = cards.get_mut(&req.to_card_id).unwrap();
            to.balance += req.amount;
            to.version += 1;
            to.updated_at = now;
        }

        Ok(())
    }

    async fn delete(&self, card_id: i64) -> Result<(), RepositoryError> {
        let mut cards = self.cards.lock().unwrap();
        cards
            .remove(&card_id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// In-memory users plus their role assignments.
#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<i64, UserModel>>,
    roles: Mutex<Vec<(i64, String)>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    pub fn insert_user(&self, username: &str) -> i64 {
        let user_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now().naive_utc();
        self.users.lock().unwrap().insert(
            user_id,
            UserModel {
                user_id,
                username: username.to_string(),
                password: String::new(),
                created_at: now,
                updated_at: now,
            },
        );
        self.roles
            .lock()
            .unwrap()
            .push((user_id, ROLE_USER.to_string()));
        user_id
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for InMemoryUserRepo {
    async fn find_by_id(&self, user_id: i64) -> Result<UserModel, RepositoryError> {
        self.users
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_username(&self, username: &str) -> Result<UserModel, RepositoryError> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, RepositoryError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.username == username))
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for InMemoryUserRepo {
    async fn create(&self, req: &CreateUserRecord) -> Result<UserModel, RepositoryError> {
        if self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.username == req.username)
        {
            return Err(RepositoryError::AlreadyExists("uk_users_username".into()));
        }

        let user_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now().naive_utc();
        let user = UserModel {
            user_id,
            username: req.username.clone(),
            password: req.password.clone(),
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().insert(user_id, user.clone());

        Ok(user)
    }

    async fn assign_role(&self, user_id: i64, role_name: &str) -> Result<(), RepositoryError> {
        self.roles
            .lock()
            .unwrap()
            .push((user_id, role_name.to_string()));
        Ok(())
    }
}

#[async_trait]
impl RoleQueryRepositoryTrait for InMemoryUserRepo {
    async fn find_by_name(&self, role_name: &str) -> Result<RoleModel, RepositoryError> {
        match role_name {
            "ROLE_USER" => Ok(RoleModel {
                role_id: 1,
                role_name: role_name.to_string(),
            }),
            "ROLE_ADMIN" => Ok(RoleModel {
                role_id: 2,
                role_name: role_name.to_string(),
            }),
            _ => Err(RepositoryError::NotFound),
        }
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<RoleModel>, RepositoryError> {
        let roles = self
            .roles
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == user_id)
            .enumerate()
            .map(|(i, (_, name))| RoleModel {
                role_id: i as i64 + 1,
                role_name: name.clone(),
            })
            .collect();
        Ok(roles)
    }
}

pub struct TestEnv {
    pub cards: Arc<InMemoryCardRepo>,
    pub users: Arc<InMemoryUserRepo>,
    pub card_command: DynCardCommandService,
    pub card_query: DynCardQueryService,
    pub transfer: DynTransferService,
    pub cipher: Arc<CardCipher>,
}

pub async fn build_env() -> TestEnv {
    let cards = Arc::new(InMemoryCardRepo::new());
    let users = Arc::new(InMemoryUserRepo::new());
    let cipher = Arc::new(CardCipher::new(&[42u8; 32]).unwrap());

    let card_query_repo: DynCardQueryRepository = cards.clone();
    let card_command_repo: DynCardCommandRepository = cards.clone();
    let user_query_repo: DynUserQueryRepository = users.clone();

    let account: DynAccountService = Arc::new(
        AccountService::new(user_query_repo.clone(), card_query_repo.clone()).await,
    );

    let card_command: DynCardCommandService = Arc::new(
        CardCommandService::new(
            user_query_repo.clone(),
            card_query_repo.clone(),
            card_command_repo.clone(),
            account.clone(),
            cipher.clone(),
        )
        .await,
    );

    let card_query: DynCardQueryService = Arc::new(
        CardQueryService::new(
            card_query_repo.clone(),
            card_command_repo.clone(),
            account.clone(),
            cipher.clone(),
        )
        .await,
    );

    let transfer: DynTransferService = Arc::new(
        TransferService::new(account, card_query_repo, card_command_repo).await,
    );

    TestEnv {
        cards,
        users,
        card_command,
        card_query,
        transfer,
        cipher,
    }
}

pub fn principal(user_id: i64, username: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        user_id,
        username: username.to_string(),
        roles: vec![ROLE_USER.to_string()],
    }
}

pub fn future_date() -> NaiveDate {
    Utc::now().date_naive() + chrono::Duration::days(365)
}

pub fn past_date() -> NaiveDate {
    Utc::now().date_naive() - chrono::Duration::days(1)
}

/// Issues a card through the lifecycle engine and returns its id.
pub async fn issue_card(env: &TestEnv, owner_id: i64) -> i64 {
    let response = env
        .card_command
        .create(&CreateCardRequest {
            owner_id,
            expire_date: future_date(),
        })
        .await
        .unwrap();
    response.data.id
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}
