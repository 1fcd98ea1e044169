#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod account;
pub mod cache;
pub mod config;
pub mod fund;
pub mod loans;
pub mod maintenance;
pub mod orders;
pub mod pool;
pub mod resources;
pub mod return_pool;
pub mod storage;
pub mod views;

pub use common_errors::*;
pub use common_structs::*;

#[multiversx_sc::contract]
pub trait ResourceExchange:
    account::AccountModule
    + loans::LoansModule
    + maintenance::MaintenanceModule
    + orders::OrdersModule
    + pool::PoolModule
    + return_pool::ReturnPoolModule
    + fund::FundModule
    + resources::ResourcesModule
    + config::ConfigModule
    + views::ViewsModule
    + storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
{
    /// Initializes the exchange.
    ///
    /// # Arguments
    /// - `core_token`: Token used for deposits, loan payments and donations.
    #[init]
    fn init(&self, core_token: EgldOrEsdtTokenIdentifier) {
        require!(core_token.is_valid(), ERROR_INVALID_CORE_TOKEN);

        self.core_token().set(&core_token);
        self.rex_maturity_config()
            .set(RexMaturityConfig::default());
    }

    #[upgrade]
    fn upgrade(&self) {}
}
