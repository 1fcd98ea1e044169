use crate::constants::*;

use multiversx_sc::types::{BigUint, EgldOrEsdtTokenIdentifier, TestEsdtTransfer};
use multiversx_sc_scenario::{
    imports::{ExpectMessage, OptionalValue, TestAddress, TestTokenIdentifier},
    DebugApi, ScenarioTxWhitebox, ScenarioWorld,
};

use rex_exchange::{
    account::AccountModule, config::ConfigModule, loans::LoansModule,
    maintenance::MaintenanceModule, orders::OrdersModule, pool::PoolModule, LoanKind,
    ResourceExchange,
};

pub type RexContract = rex_exchange::ContractObj<DebugApi>;

pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(REX_PATH, rex_exchange::ContractBuilder);
    blockchain
}

pub struct RexTestState {
    pub world: ScenarioWorld,
}

impl RexTestState {
    /// Deploys the exchange at `START_TIME` and funds every test account with core tokens.
    pub fn new() -> Self {
        let mut world = world();
        world.current_block().block_timestamp(START_TIME);

        for account in [OWNER_ADDRESS, ALICE, BOB, CAROL] {
            world
                .account(account)
                .nonce(1)
                .esdt_balance(CORE_TOKEN, INITIAL_BALANCE)
                .esdt_balance(OTHER_TOKEN, INITIAL_BALANCE);
        }

        world
            .tx()
            .from(OWNER_ADDRESS)
            .raw_deploy()
            .code(REX_PATH)
            .new_address(REX_ADDRESS)
            .whitebox(rex_exchange::contract_obj, |sc| {
                sc.init(EgldOrEsdtTokenIdentifier::esdt(
                    CORE_TOKEN.to_token_identifier(),
                ));
            });

        Self { world }
    }

    pub fn set_timestamp(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    /// Runs `f` against the contract state without a transaction.
    pub fn check<F>(&mut self, f: F)
    where
        F: FnOnce(RexContract),
    {
        self.world
            .query()
            .to(REX_ADDRESS)
            .whitebox(rex_exchange::contract_obj, f);
    }

    pub fn call<F>(&mut self, from: TestAddress, f: F)
    where
        F: FnOnce(RexContract),
    {
        self.world
            .tx()
            .from(from)
            .to(REX_ADDRESS)
            .whitebox(rex_exchange::contract_obj, f);
    }

    pub fn call_error<F>(&mut self, from: TestAddress, error_message: &[u8], f: F)
    where
        F: FnOnce(RexContract),
    {
        self.world
            .tx()
            .from(from)
            .to(REX_ADDRESS)
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .whitebox(rex_exchange::contract_obj, f);
    }

    pub fn deposit(&mut self, from: TestAddress, amount: u64) {
        self.world
            .tx()
            .from(from)
            .to(REX_ADDRESS)
            .payment(TestEsdtTransfer(CORE_TOKEN, 0, amount))
            .whitebox(rex_exchange::contract_obj, |sc| {
                sc.deposit();
            });
    }

    pub fn deposit_error(
        &mut self,
        from: TestAddress,
        token: TestTokenIdentifier,
        amount: u64,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from)
            .to(REX_ADDRESS)
            .payment(TestEsdtTransfer(token, 0, amount))
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .whitebox(rex_exchange::contract_obj, |sc| {
                sc.deposit();
            });
    }

    pub fn withdraw(&mut self, from: TestAddress, amount: u64) {
        self.call(from, |sc| {
            sc.withdraw(BigUint::from(amount));
        });
    }

    pub fn withdraw_error(&mut self, from: TestAddress, amount: u64, error_message: &[u8]) {
        self.call_error(from, error_message, |sc| {
            sc.withdraw(BigUint::from(amount));
        });
    }

    pub fn buy_rex(&mut self, from: TestAddress, amount: u64) {
        self.call(from, |sc| {
            sc.buy_rex(BigUint::from(amount));
        });
    }

    pub fn buy_rex_error(&mut self, from: TestAddress, amount: u64, error_message: &[u8]) {
        self.call_error(from, error_message, |sc| {
            sc.buy_rex(BigUint::from(amount));
        });
    }

    /// Deposits `amount` and buys shares with all of it.
    pub fn deposit_and_buy(&mut self, from: TestAddress, amount: u64) {
        self.deposit(from, amount);
        self.buy_rex(from, amount);
    }

    pub fn sell_rex(&mut self, from: TestAddress, rex: u64) {
        self.call(from, |sc| {
            sc.sell_rex(BigUint::from(rex));
        });
    }

    pub fn sell_rex_error(&mut self, from: TestAddress, rex: u64, error_message: &[u8]) {
        self.call_error(from, error_message, |sc| {
            sc.sell_rex(BigUint::from(rex));
        });
    }

    pub fn cancel_rex_order(&mut self, from: TestAddress) {
        self.call(from, |sc| {
            sc.cancel_rex_order();
        });
    }

    pub fn cancel_rex_order_error(&mut self, from: TestAddress, error_message: &[u8]) {
        self.call_error(from, error_message, |sc| {
            sc.cancel_rex_order();
        });
    }

    pub fn rent(
        &mut self,
        kind: LoanKind,
        from: TestAddress,
        receiver: TestAddress,
        payment: u64,
        fund: u64,
    ) {
        self.call(from, |sc| {
            let receiver = receiver.to_managed_address();
            let _ = match kind {
                LoanKind::Cpu => {
                    sc.rent_cpu(receiver, BigUint::from(payment), BigUint::from(fund))
                },
                LoanKind::Net => {
                    sc.rent_net(receiver, BigUint::from(payment), BigUint::from(fund))
                },
            };
        });
    }

    pub fn rent_error(
        &mut self,
        kind: LoanKind,
        from: TestAddress,
        receiver: TestAddress,
        payment: u64,
        fund: u64,
        error_message: &[u8],
    ) {
        self.call_error(from, error_message, |sc| {
            let receiver = receiver.to_managed_address();
            let _ = match kind {
                LoanKind::Cpu => {
                    sc.rent_cpu(receiver, BigUint::from(payment), BigUint::from(fund))
                },
                LoanKind::Net => {
                    sc.rent_net(receiver, BigUint::from(payment), BigUint::from(fund))
                },
            };
        });
    }

    pub fn fund_loan(&mut self, kind: LoanKind, from: TestAddress, loan_num: u64, payment: u64) {
        self.call(from, |sc| match kind {
            LoanKind::Cpu => sc.fund_cpu_loan(loan_num, BigUint::from(payment)),
            LoanKind::Net => sc.fund_net_loan(loan_num, BigUint::from(payment)),
        });
    }

    pub fn fund_loan_error(
        &mut self,
        kind: LoanKind,
        from: TestAddress,
        loan_num: u64,
        payment: u64,
        error_message: &[u8],
    ) {
        self.call_error(from, error_message, |sc| match kind {
            LoanKind::Cpu => sc.fund_cpu_loan(loan_num, BigUint::from(payment)),
            LoanKind::Net => sc.fund_net_loan(loan_num, BigUint::from(payment)),
        });
    }

    pub fn defund_loan(&mut self, kind: LoanKind, from: TestAddress, loan_num: u64, amount: u64) {
        self.call(from, |sc| match kind {
            LoanKind::Cpu => sc.defund_cpu_loan(loan_num, BigUint::from(amount)),
            LoanKind::Net => sc.defund_net_loan(loan_num, BigUint::from(amount)),
        });
    }

    pub fn defund_loan_error(
        &mut self,
        kind: LoanKind,
        from: TestAddress,
        loan_num: u64,
        amount: u64,
        error_message: &[u8],
    ) {
        self.call_error(from, error_message, |sc| match kind {
            LoanKind::Cpu => sc.defund_cpu_loan(loan_num, BigUint::from(amount)),
            LoanKind::Net => sc.defund_net_loan(loan_num, BigUint::from(amount)),
        });
    }

    pub fn rex_exec(&mut self, max: u16) {
        self.call(CAROL, |sc| {
            sc.rex_exec(max);
        });
    }

    pub fn move_to_savings(&mut self, from: TestAddress, rex: u64) {
        self.call(from, |sc| {
            sc.move_to_savings(BigUint::from(rex));
        });
    }

    pub fn move_from_savings(&mut self, from: TestAddress, rex: u64) {
        self.call(from, |sc| {
            sc.move_from_savings(BigUint::from(rex));
        });
    }

    pub fn donate(&mut self, from: TestAddress, amount: u64) {
        self.world
            .tx()
            .from(from)
            .to(REX_ADDRESS)
            .payment(TestEsdtTransfer(CORE_TOKEN, 0, amount))
            .whitebox(rex_exchange::contract_obj, |sc| {
                sc.donate_to_rex();
            });
    }

    pub fn donate_error(
        &mut self,
        from: TestAddress,
        token: TestTokenIdentifier,
        amount: u64,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from)
            .to(REX_ADDRESS)
            .payment(TestEsdtTransfer(token, 0, amount))
            .returns(ExpectMessage(core::str::from_utf8(error_message).unwrap()))
            .whitebox(rex_exchange::contract_obj, |sc| {
                sc.donate_to_rex();
            });
    }

    pub fn channel_namebid(&mut self, amount: u64) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(REX_ADDRESS)
            .payment(TestEsdtTransfer(CORE_TOKEN, 0, amount))
            .whitebox(rex_exchange::contract_obj, |sc| {
                sc.channel_namebid_to_rex();
            });
    }

    pub fn set_rex_maturity(
        &mut self,
        num_of_maturity_buckets: Option<u32>,
        sell_matured_rex: Option<bool>,
        buy_rex_to_savings: Option<bool>,
    ) {
        self.call(OWNER_ADDRESS, |sc| {
            sc.set_rex_maturity(
                OptionalValue::from(num_of_maturity_buckets),
                OptionalValue::from(sell_matured_rex),
                OptionalValue::from(buy_rex_to_savings),
            );
        });
    }

    pub fn set_rex_maturity_error(&mut self, num_of_maturity_buckets: u32, error_message: &[u8]) {
        self.call_error(OWNER_ADDRESS, error_message, |sc| {
            sc.set_rex_maturity(
                OptionalValue::Some(num_of_maturity_buckets),
                OptionalValue::None,
                OptionalValue::None,
            );
        });
    }
}

impl Default for RexTestState {
    fn default() -> Self {
        Self::new()
    }
}
