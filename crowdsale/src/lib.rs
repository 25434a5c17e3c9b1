#![no_std]

multiversx_sc::imports!();

pub mod crowdsale_proxy;

use sale_common::errors::{
    ERR_ALREADY_ASSIGNED, ERR_EXCEEDS_CAP, ERR_INVALID_CAP, ERR_INVALID_RATE, ERR_MINTING_CLOSED,
    ERR_PAUSED, ERR_PURCHASES_DISABLED, ERR_SALE_ENDED, ERR_TOKEN_NOT_ASSIGNED, ERR_UNAUTHORIZED,
    ERR_ZERO_VALUE,
};
use sale_token::token_proxy;

// ============================================================
// Contract
// ============================================================

/// Capped, rate-based sale. Accepts EGLD, mints `value * rate` token units
/// on the wired token contract and forwards the EGLD to the wallet.
///
/// Lifecycle: Open while `weiRaised < cap`, Ended once `weiRaised == cap`.
/// The cap is fixed at deploy time; the rate can be adjusted by an owner.
#[multiversx_sc::contract]
pub trait Crowdsale:
    sale_common::owners::OwnersModule + sale_common::checked_math::CheckedMathModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, wallet: ManagedAddress, rate: BigUint, cap: BigUint) {
        require!(rate > 0u64, ERR_INVALID_RATE);
        require!(cap > 0u64, ERR_INVALID_CAP);
        self.require_in_range(&rate);
        self.require_in_range(&cap);

        self.init_owners();

        self.wallet().set(&wallet);
        self.rate().set(&rate);
        self.cap().set(&cap);
        self.wei_raised().set(BigUint::zero());
        self.purchase_enabled().set(true);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: assignTokenContract
    // One-time wiring. The token must also list this contract
    // as an owner before purchases can mint.
    // ========================================================

    #[endpoint(assignTokenContract)]
    fn assign_token_contract(&self, token: ManagedAddress) {
        self.require_owner();
        require!(self.token().is_empty(), ERR_ALREADY_ASSIGNED);

        self.token().set(&token);
        self.token_assigned_event(&token);
    }

    // ========================================================
    // ENDPOINT: buyTokens
    // Checks, then effects (weiRaised), then interactions
    // (mint on the token, EGLD to the wallet).
    // ========================================================

    #[endpoint(buyTokens)]
    #[payable("EGLD")]
    fn buy_tokens(&self, recipient: ManagedAddress) {
        let buyer = self.blockchain().get_caller();
        let value = self.call_value().egld_value().clone_value();

        // ── Checks ──
        let raised = self.wei_raised().get();
        let cap = self.cap().get();
        require!(raised < cap, ERR_SALE_ENDED);
        require!(self.purchase_enabled().get(), ERR_PURCHASES_DISABLED);

        let new_raised = &raised + &value;
        require!(new_raised <= cap, ERR_EXCEEDS_CAP);
        require!(value > 0u64, ERR_ZERO_VALUE);

        let tokens = self.checked_mul(&value, &self.rate().get());

        require!(!self.token().is_empty(), ERR_TOKEN_NOT_ASSIGNED);
        let token_address = self.token().get();
        self.require_can_mint(&token_address);

        // ── Effects ──
        // Committed before any outgoing call: a re-entrant purchase
        // sees the updated total.
        self.wei_raised().set(&new_raised);

        // ── Interactions ──
        // A failing mint aborts the transaction, undoing the line above
        // and the forwarding below.
        self.tx()
            .to(&token_address)
            .typed(token_proxy::TokenProxy)
            .mint(&recipient, &tokens)
            .sync_call();

        let wallet = self.wallet().get();
        self.send().direct_egld(&wallet, &value);

        self.token_purchase_event(&buyer, &recipient, &value, &tokens);
    }

    // ========================================================
    // ENDPOINT: sale administration
    // ========================================================

    #[endpoint(setRate)]
    fn set_rate(&self, rate: BigUint) {
        self.require_owner();
        require!(rate > 0u64, ERR_INVALID_RATE);
        self.require_in_range(&rate);

        self.rate().set(&rate);
        self.rate_changed_event(&self.blockchain().get_caller(), &rate);
    }

    #[endpoint(togglePurchases)]
    fn toggle_purchases(&self) -> bool {
        self.require_owner();
        let enabled = !self.purchase_enabled().get();
        self.purchase_enabled().set(enabled);
        self.purchases_toggled_event(&self.blockchain().get_caller(), enabled);
        enabled
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    /// Reads the token's state so a purchase that could never mint is
    /// rejected with a precise error instead of a failed nested call.
    fn require_can_mint(&self, token_address: &ManagedAddress) {
        let own_address = self.blockchain().get_sc_address();

        let has_mint_rights: bool = self
            .tx()
            .to(token_address)
            .typed(token_proxy::TokenProxy)
            .is_owner(own_address)
            .returns(ReturnsResult)
            .sync_call_readonly();
        require!(has_mint_rights, ERR_UNAUTHORIZED);

        let minting_finished: bool = self
            .tx()
            .to(token_address)
            .typed(token_proxy::TokenProxy)
            .is_minting_finished()
            .returns(ReturnsResult)
            .sync_call_readonly();
        require!(!minting_finished, ERR_MINTING_CLOSED);

        let paused: bool = self
            .tx()
            .to(token_address)
            .typed(token_proxy::TokenProxy)
            .is_paused()
            .returns(ReturnsResult)
            .sync_call_readonly();
        require!(!paused, ERR_PAUSED);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(hasEnded)]
    fn has_ended(&self) -> bool {
        self.wei_raised().get() >= self.cap().get()
    }

    #[view(remainingCap)]
    fn remaining_cap(&self) -> BigUint {
        let cap = self.cap().get();
        let raised = self.wei_raised().get();
        if raised >= cap {
            BigUint::zero()
        } else {
            cap - raised
        }
    }

    #[view(getSaleConfig)]
    fn get_sale_config(&self) -> MultiValue4<BigUint, BigUint, ManagedAddress, BigUint> {
        (
            self.rate().get(),
            self.cap().get(),
            self.wallet().get(),
            self.wei_raised().get(),
        )
            .into()
    }

    #[view(isPurchaseEnabled)]
    fn is_purchase_enabled(&self) -> bool {
        self.purchase_enabled().get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("tokenAssigned")]
    fn token_assigned_event(&self, #[indexed] token: &ManagedAddress);

    #[event("tokenPurchase")]
    fn token_purchase_event(
        &self,
        #[indexed] buyer: &ManagedAddress,
        #[indexed] recipient: &ManagedAddress,
        #[indexed] value: &BigUint,
        tokens: &BigUint,
    );

    #[event("rateChanged")]
    fn rate_changed_event(&self, #[indexed] by: &ManagedAddress, rate: &BigUint);

    #[event("purchasesToggled")]
    fn purchases_toggled_event(&self, #[indexed] by: &ManagedAddress, enabled: bool);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[view(wallet)]
    #[storage_mapper("wallet")]
    fn wallet(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(rate)]
    #[storage_mapper("rate")]
    fn rate(&self) -> SingleValueMapper<BigUint>;

    #[view(cap)]
    #[storage_mapper("cap")]
    fn cap(&self) -> SingleValueMapper<BigUint>;

    #[view(token)]
    #[storage_mapper("token")]
    fn token(&self) -> SingleValueMapper<ManagedAddress>;

    // ── Sale state ──

    #[view(weiRaised)]
    #[storage_mapper("weiRaised")]
    fn wei_raised(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("purchaseEnabled")]
    fn purchase_enabled(&self) -> SingleValueMapper<bool>;
}
