use anyhow::Result;
use shared::{
    abstract_trait::{
        account::DynAccountService,
        auth::DynAuthService,
        card::{
            repository::{command::DynCardCommandRepository, query::DynCardQueryRepository},
            service::{command::DynCardCommandService, query::DynCardQueryService},
        },
        hashing::DynHashing,
        jwt::DynJwtService,
        role::DynRoleQueryRepository,
        transfer::DynTransferService,
        user::repository::{command::DynUserCommandRepository, query::DynUserQueryRepository},
    },
    config::ConnectionPool,
    repository::{
        card::{CardCommandRepository, CardQueryRepository},
        role::RoleQueryRepository,
        user::{UserCommandRepository, UserQueryRepository},
    },
    service::{
        account::AccountService,
        auth::AuthService,
        card::{CardCommandService, CardQueryService},
        transfer::TransferService,
    },
    utils::CardCipher,
};
use std::sync::Arc;

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub cipher: Arc<CardCipher>,
}

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub card_query_service: DynCardQueryService,
    pub card_command_service: DynCardCommandService,
    pub transfer_service: DynTransferService,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            hash,
            jwt_config,
            cipher,
        } = deps;

        let user_query =
            Arc::new(UserQueryRepository::new(pool.clone())) as DynUserQueryRepository;
        let user_command =
            Arc::new(UserCommandRepository::new(pool.clone())) as DynUserCommandRepository;
        let role_query =
            Arc::new(RoleQueryRepository::new(pool.clone())) as DynRoleQueryRepository;
        let card_query =
            Arc::new(CardQueryRepository::new(pool.clone())) as DynCardQueryRepository;
        let card_command =
            Arc::new(CardCommandRepository::new(pool.clone())) as DynCardCommandRepository;

        let account = Arc::new(
            AccountService::new(user_query.clone(), card_query.clone()).await,
        ) as DynAccountService;

        let auth_service = Arc::new(
            AuthService::new(
                user_query.clone(),
                user_command.clone(),
                role_query.clone(),
                hash,
                jwt_config,
            )
            .await,
        ) as DynAuthService;

        let card_query_service = Arc::new(
            CardQueryService::new(
                card_query.clone(),
                card_command.clone(),
                account.clone(),
                cipher.clone(),
            )
            .await,
        ) as DynCardQueryService;

        let card_command_service = Arc::new(
            CardCommandService::new(
                user_query.clone(),
                card_query.clone(),
                card_command.clone(),
                account.clone(),
                cipher.clone(),
            )
            .await,
        ) as DynCardCommandService;

        let transfer_service = Arc::new(
            TransferService::new(account.clone(), card_query.clone(), card_command.clone())
                .await,
        ) as DynTransferService;

        Ok(Self {
            auth_service,
            card_query_service,
            card_command_service,
            transfer_service,
        })
    }
}
