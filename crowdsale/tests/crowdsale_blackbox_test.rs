use multiversx_sc_scenario::imports::*;

use crowdsale::crowdsale_proxy;
use sale_common::checked_math::AMOUNT_BYTES;
use sale_common::errors::*;
use sale_token::token_proxy;

const OWNER: TestAddress = TestAddress::new("owner");
const WALLET: TestAddress = TestAddress::new("wallet");
const BUYER: TestAddress = TestAddress::new("buyer");
const RECIPIENT: TestAddress = TestAddress::new("recipient");
const ADMIN: TestAddress = TestAddress::new("admin");
const TOKEN_ADDRESS: TestSCAddress = TestSCAddress::new("token");
const SALE_ADDRESS: TestSCAddress = TestSCAddress::new("crowdsale");
const TOKEN_CODE_PATH: MxscPath = MxscPath::new("../token/output/token.mxsc.json");
const SALE_CODE_PATH: MxscPath = MxscPath::new("output/crowdsale.mxsc.json");

const ONE_EGLD: u128 = 1_000_000_000_000_000_000;
const RATE: u128 = 2_000_000;
const BUYER_FUNDS: u128 = 1_000 * ONE_EGLD;

fn big(value: u128) -> BigUint<StaticApi> {
    BigUint::from_bytes_be(&value.to_be_bytes())
}

fn max_amount() -> BigUint<StaticApi> {
    BigUint::from_bytes_be(&[0xffu8; AMOUNT_BYTES])
}

struct SaleSetup {
    world: ScenarioWorld,
}

impl SaleSetup {
    /// Deploys both contracts without wiring them together.
    fn deploy(rate: BigUint<StaticApi>, cap: BigUint<StaticApi>) -> Self {
        let mut world = ScenarioWorld::new();
        world.register_contract(TOKEN_CODE_PATH, sale_token::ContractBuilder);
        world.register_contract(SALE_CODE_PATH, crowdsale::ContractBuilder);

        world.account(OWNER).nonce(1);
        world.account(WALLET).nonce(1).balance(big(0));
        world.account(RECIPIENT).nonce(1);
        world.account(ADMIN).nonce(1);
        world
            .account(BUYER)
            .nonce(1)
            .balance(big(BUYER_FUNDS));

        world
            .tx()
            .from(OWNER)
            .typed(token_proxy::TokenProxy)
            .init(
                ManagedBuffer::<StaticApi>::from("Void Token"),
                ManagedBuffer::<StaticApi>::from("VOID"),
                18u8,
                BigUint::<StaticApi>::zero(),
            )
            .code(TOKEN_CODE_PATH)
            .new_address(TOKEN_ADDRESS)
            .run();

        world
            .tx()
            .from(OWNER)
            .typed(crowdsale_proxy::CrowdsaleProxy)
            .init(WALLET, rate, cap)
            .code(SALE_CODE_PATH)
            .new_address(SALE_ADDRESS)
            .run();

        SaleSetup { world }
    }

    /// Deploys and performs the full wiring sequence.
    fn new(rate: u128, cap: u128) -> Self {
        let mut setup = Self::deploy(big(rate), big(cap));
        setup.assign_token();
        setup.grant_mint_rights();
        setup
    }

    fn assign_token(&mut self) {
        self.world
            .tx()
            .from(OWNER)
            .to(SALE_ADDRESS)
            .typed(crowdsale_proxy::CrowdsaleProxy)
            .assign_token_contract(TOKEN_ADDRESS)
            .run();
    }

    fn grant_mint_rights(&mut self) {
        self.world
            .tx()
            .from(OWNER)
            .to(TOKEN_ADDRESS)
            .typed(token_proxy::TokenProxy)
            .add_owner(SALE_ADDRESS)
            .run();
    }

    fn buy(&mut self, value: u128) {
        self.world
            .tx()
            .from(BUYER)
            .to(SALE_ADDRESS)
            .typed(crowdsale_proxy::CrowdsaleProxy)
            .buy_tokens(RECIPIENT)
            .egld(big(value))
            .run();
    }

    fn buy_expect_err(&mut self, value: u128, err: &str) {
        self.world
            .tx()
            .from(BUYER)
            .to(SALE_ADDRESS)
            .typed(crowdsale_proxy::CrowdsaleProxy)
            .buy_tokens(RECIPIENT)
            .egld(big(value))
            .returns(ExpectError(4, err))
            .run();
    }

    fn wei_raised(&mut self) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(SALE_ADDRESS)
            .typed(crowdsale_proxy::CrowdsaleProxy)
            .wei_raised()
            .returns(ReturnsResult)
            .run()
    }

    fn has_ended(&mut self) -> bool {
        self.world
            .query()
            .to(SALE_ADDRESS)
            .typed(crowdsale_proxy::CrowdsaleProxy)
            .has_ended()
            .returns(ReturnsResult)
            .run()
    }

    fn token_balance(&mut self, account: TestAddress) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(TOKEN_ADDRESS)
            .typed(token_proxy::TokenProxy)
            .balance_of(account)
            .returns(ReturnsResult)
            .run()
    }

    fn token_supply(&mut self) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(TOKEN_ADDRESS)
            .typed(token_proxy::TokenProxy)
            .total_supply()
            .returns(ReturnsResult)
            .run()
    }

    fn check_egld(&mut self, account: TestAddress, expected: u128) {
        self.world
            .check_account(account)
            .balance(big(expected));
    }

    /// Nothing moved: no tokens, no raised value, no EGLD left the buyer.
    fn check_untouched(&mut self) {
        assert_eq!(self.wei_raised(), big(0));
        assert_eq!(self.token_balance(RECIPIENT), big(0));
        assert_eq!(self.token_supply(), big(0));
        self.check_egld(BUYER, BUYER_FUNDS);
        self.check_egld(WALLET, 0);
    }
}

// ============================================================
// Deployment / wiring
// ============================================================

#[test]
fn init_sets_sale_parameters() {
    let cap = 200_000_000 * ONE_EGLD;
    let mut setup = SaleSetup::new(RATE, cap);

    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .wallet()
        .returns(ExpectValue(WALLET))
        .run();
    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .rate()
        .returns(ExpectValue(big(RATE)))
        .run();
    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .cap()
        .returns(ExpectValue(big(cap)))
        .run();
    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .token()
        .returns(ExpectValue(TOKEN_ADDRESS))
        .run();
    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .is_purchase_enabled()
        .returns(ExpectValue(true))
        .run();
    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .is_owner(OWNER)
        .returns(ExpectValue(true))
        .run();

    assert_eq!(setup.wei_raised(), big(0));
    assert!(!setup.has_ended());
}

#[test]
fn sale_config_view_reports_parameters() {
    let cap = 20 * ONE_EGLD;
    let mut setup = SaleSetup::new(RATE, cap);
    setup.buy(ONE_EGLD);

    let (rate, config_cap, wallet, raised) = setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .get_sale_config()
        .returns(ReturnsResult)
        .run()
        .into_tuple();

    assert_eq!(rate, big(RATE));
    assert_eq!(config_cap, big(cap));
    assert_eq!(wallet, ManagedAddress::from(WALLET.to_address()));
    assert_eq!(raised, big(ONE_EGLD));
}

#[test]
fn deploy_with_zero_cap_fails() {
    let mut world = ScenarioWorld::new();
    world.register_contract(SALE_CODE_PATH, crowdsale::ContractBuilder);
    world.account(OWNER).nonce(1);

    world
        .tx()
        .from(OWNER)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .init(WALLET, big(RATE), big(0))
        .code(SALE_CODE_PATH)
        .new_address(SALE_ADDRESS)
        .returns(ExpectError(4, ERR_INVALID_CAP))
        .run();
}

#[test]
fn deploy_with_zero_rate_fails() {
    let mut world = ScenarioWorld::new();
    world.register_contract(SALE_CODE_PATH, crowdsale::ContractBuilder);
    world.account(OWNER).nonce(1);

    world
        .tx()
        .from(OWNER)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .init(WALLET, big(0), big(ONE_EGLD))
        .code(SALE_CODE_PATH)
        .new_address(SALE_ADDRESS)
        .returns(ExpectError(4, ERR_INVALID_RATE))
        .run();
}

#[test]
fn token_can_only_be_assigned_once() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .assign_token_contract(WALLET)
        .returns(ExpectError(4, ERR_ALREADY_ASSIGNED))
        .run();

    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .token()
        .returns(ExpectValue(TOKEN_ADDRESS))
        .run();
}

#[test]
fn non_owner_cannot_assign_token() {
    let mut setup = SaleSetup::deploy(big(RATE), big(20 * ONE_EGLD));

    setup
        .world
        .tx()
        .from(BUYER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .assign_token_contract(TOKEN_ADDRESS)
        .returns(ExpectError(4, ERR_UNAUTHORIZED))
        .run();
}

// ============================================================
// Purchases
// ============================================================

#[test]
fn purchase_mints_at_rate_and_forwards_value() {
    let cap = 200_000_000 * ONE_EGLD;
    let value = 26 * ONE_EGLD / 100;
    let mut setup = SaleSetup::new(RATE, cap);

    setup.buy(value);

    assert_eq!(setup.token_balance(RECIPIENT), big(value * RATE));
    assert_eq!(setup.token_supply(), big(value * RATE));
    assert_eq!(setup.wei_raised(), big(value));
    setup.check_egld(WALLET, value);
    setup.check_egld(BUYER, BUYER_FUNDS - value);
    setup.world.check_account(SALE_ADDRESS).balance(big(0));
    assert!(!setup.has_ended());
}

#[test]
fn buying_the_whole_cap_ends_the_sale() {
    let cap = 20 * ONE_EGLD;
    let mut setup = SaleSetup::new(RATE, cap);

    setup.buy(cap);

    assert!(setup.has_ended());
    assert_eq!(setup.token_balance(RECIPIENT), big(cap * RATE));
    assert_eq!(setup.wei_raised(), big(cap));
    setup.check_egld(WALLET, cap);

    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .remaining_cap()
        .returns(ExpectValue(big(0)))
        .run();
}

#[test]
fn purchase_above_cap_is_rejected_entirely() {
    let cap = 20 * ONE_EGLD;
    let mut setup = SaleSetup::new(RATE, cap);

    setup.buy_expect_err(cap + 1, ERR_EXCEEDS_CAP);

    setup.check_untouched();
    assert!(!setup.has_ended());
}

#[test]
fn exact_remainder_fills_cap_and_one_more_unit_does_not() {
    let cap = 20 * ONE_EGLD;
    let first = 7 * ONE_EGLD;
    let mut setup = SaleSetup::new(RATE, cap);

    setup.buy(first);
    let remaining = cap - first;

    setup.buy_expect_err(remaining + 1, ERR_EXCEEDS_CAP);
    assert_eq!(setup.wei_raised(), big(first));
    assert_eq!(setup.token_balance(RECIPIENT), big(first * RATE));

    setup.buy(remaining);
    assert_eq!(setup.wei_raised(), big(cap));
    assert!(setup.has_ended());
    setup.check_egld(WALLET, cap);
}

#[test]
fn ended_sale_rejects_any_value() {
    let cap = 20 * ONE_EGLD;
    let mut setup = SaleSetup::new(RATE, cap);
    setup.buy(cap);

    setup.buy_expect_err(1, ERR_SALE_ENDED);
    setup.buy_expect_err(0, ERR_SALE_ENDED);
    setup.buy_expect_err(cap, ERR_SALE_ENDED);

    assert_eq!(setup.wei_raised(), big(cap));
}

#[test]
fn zero_value_purchase_fails() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);

    setup.buy_expect_err(0, ERR_ZERO_VALUE);

    setup.check_untouched();
}

#[test]
fn token_amount_overflow_is_rejected() {
    let mut setup = SaleSetup::deploy(max_amount(), big(20 * ONE_EGLD));
    setup.assign_token();
    setup.grant_mint_rights();

    setup.buy_expect_err(2, ERR_ARITHMETIC_OVERFLOW);

    setup.check_untouched();
}

#[test]
fn several_buyers_keep_supply_and_raised_in_step() {
    let cap = 20 * ONE_EGLD;
    let mut setup = SaleSetup::new(RATE, cap);

    setup.buy(ONE_EGLD);
    setup.buy(3 * ONE_EGLD);

    setup
        .world
        .tx()
        .from(BUYER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .buy_tokens(BUYER)
        .egld(big(2 * ONE_EGLD))
        .run();

    let raised = 6 * ONE_EGLD;
    assert_eq!(setup.wei_raised(), big(raised));
    assert_eq!(setup.token_balance(RECIPIENT), big(4 * ONE_EGLD * RATE));
    assert_eq!(setup.token_balance(BUYER), big(2 * ONE_EGLD * RATE));

    let sum = setup.token_balance(RECIPIENT) + setup.token_balance(BUYER);
    assert_eq!(setup.token_supply(), sum);
    assert_eq!(setup.token_supply(), big(raised * RATE));
    setup.check_egld(WALLET, raised);
}

// ============================================================
// Wiring preconditions and rollback
// ============================================================

#[test]
fn purchase_without_assigned_token_fails() {
    let mut setup = SaleSetup::deploy(big(RATE), big(20 * ONE_EGLD));

    setup.buy_expect_err(ONE_EGLD, ERR_TOKEN_NOT_ASSIGNED);

    setup.check_untouched();
}

#[test]
fn purchase_without_mint_rights_rolls_back() {
    let mut setup = SaleSetup::deploy(big(RATE), big(20 * ONE_EGLD));
    setup.assign_token();

    setup.buy_expect_err(ONE_EGLD, ERR_UNAUTHORIZED);

    setup.check_untouched();
}

#[test]
fn purchase_after_mint_rights_revoked_rolls_back() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);
    setup.buy(ONE_EGLD);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(TOKEN_ADDRESS)
        .typed(token_proxy::TokenProxy)
        .remove_owner(SALE_ADDRESS)
        .run();

    setup.buy_expect_err(ONE_EGLD, ERR_UNAUTHORIZED);

    assert_eq!(setup.wei_raised(), big(ONE_EGLD));
    assert_eq!(setup.token_balance(RECIPIENT), big(ONE_EGLD * RATE));
    setup.check_egld(WALLET, ONE_EGLD);
    setup.check_egld(BUYER, BUYER_FUNDS - ONE_EGLD);
}

#[test]
fn purchase_while_token_paused_fails() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(TOKEN_ADDRESS)
        .typed(token_proxy::TokenProxy)
        .pause()
        .run();

    setup.buy_expect_err(ONE_EGLD, ERR_PAUSED);
    setup.check_untouched();

    setup
        .world
        .tx()
        .from(OWNER)
        .to(TOKEN_ADDRESS)
        .typed(token_proxy::TokenProxy)
        .unpause()
        .run();

    setup.buy(ONE_EGLD);
    assert_eq!(setup.token_balance(RECIPIENT), big(ONE_EGLD * RATE));
}

#[test]
fn purchase_after_minting_finished_fails() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(TOKEN_ADDRESS)
        .typed(token_proxy::TokenProxy)
        .finish_minting()
        .run();

    setup.buy_expect_err(ONE_EGLD, ERR_MINTING_CLOSED);
    setup.check_untouched();
}

// ============================================================
// Sale administration
// ============================================================

#[test]
fn owner_can_change_rate_but_not_cap() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);
    let new_rate = 2_200_000u128;

    setup
        .world
        .tx()
        .from(OWNER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .set_rate(big(new_rate))
        .run();

    setup.buy(ONE_EGLD);
    assert_eq!(setup.token_balance(RECIPIENT), big(ONE_EGLD * new_rate));

    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .cap()
        .returns(ExpectValue(big(20 * ONE_EGLD)))
        .run();
}

#[test]
fn set_rate_is_owner_only_and_non_zero() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);

    setup
        .world
        .tx()
        .from(BUYER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .set_rate(big(1))
        .returns(ExpectError(4, ERR_UNAUTHORIZED))
        .run();

    setup
        .world
        .tx()
        .from(OWNER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .set_rate(big(0))
        .returns(ExpectError(4, ERR_INVALID_RATE))
        .run();

    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .rate()
        .returns(ExpectValue(big(RATE)))
        .run();
}

#[test]
fn disabled_purchases_are_rejected_until_reenabled() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .toggle_purchases()
        .returns(ExpectValue(false))
        .run();

    setup.buy_expect_err(ONE_EGLD, ERR_PURCHASES_DISABLED);
    setup.check_untouched();

    setup
        .world
        .tx()
        .from(OWNER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .toggle_purchases()
        .returns(ExpectValue(true))
        .run();

    setup.buy(ONE_EGLD);
    assert_eq!(setup.wei_raised(), big(ONE_EGLD));
}

// ============================================================
// Sale owner registry
// ============================================================

#[test]
fn sale_owners_are_independent_of_token_owners() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .add_owner(ADMIN)
        .run();

    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .is_owner(ADMIN)
        .returns(ExpectValue(true))
        .run();
    setup
        .world
        .query()
        .to(TOKEN_ADDRESS)
        .typed(token_proxy::TokenProxy)
        .is_owner(ADMIN)
        .returns(ExpectValue(false))
        .run();

    let owners: Vec<ManagedAddress<StaticApi>> = setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .get_owners()
        .returns(ReturnsResult)
        .run()
        .into_iter()
        .collect();
    assert_eq!(owners.len(), 2);
    assert!(owners.contains(&ManagedAddress::from(ADMIN.to_address())));
}

#[test]
fn removed_sale_owner_cannot_administer_sale() {
    let mut setup = SaleSetup::new(RATE, 20 * ONE_EGLD);

    setup
        .world
        .tx()
        .from(OWNER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .add_owner(ADMIN)
        .run();

    setup
        .world
        .tx()
        .from(ADMIN)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .set_rate(big(3_000_000))
        .run();

    setup
        .world
        .tx()
        .from(OWNER)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .remove_owner(ADMIN)
        .run();

    setup
        .world
        .tx()
        .from(ADMIN)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .set_rate(big(1))
        .returns(ExpectError(4, ERR_UNAUTHORIZED))
        .run();
    setup
        .world
        .tx()
        .from(ADMIN)
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .toggle_purchases()
        .returns(ExpectError(4, ERR_UNAUTHORIZED))
        .run();

    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .rate()
        .returns(ExpectValue(big(3_000_000)))
        .run();
    setup
        .world
        .query()
        .to(SALE_ADDRESS)
        .typed(crowdsale_proxy::CrowdsaleProxy)
        .is_purchase_enabled()
        .returns(ExpectValue(true))
        .run();
}
