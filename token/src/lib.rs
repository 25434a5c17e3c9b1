#![no_std]

multiversx_sc::imports!();

pub mod token_proxy;

use sale_common::errors::{
    ERR_INSUFFICIENT_ALLOWANCE, ERR_INSUFFICIENT_BALANCE, ERR_MINTING_CLOSED, ERR_PAUSED,
    ERR_TRANSFERS_DISABLED,
};

// ============================================================
// Contract
// ============================================================

/// Owner-governed fungible token ledger. Supply only enters circulation
/// through `mint` and only leaves it through `burn`, so
/// `totalSupply == Σ balances` holds after every transaction.
#[multiversx_sc::contract]
pub trait Token:
    sale_common::owners::OwnersModule + sale_common::checked_math::CheckedMathModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        name: ManagedBuffer,
        symbol: ManagedBuffer,
        decimals: u8,
        initial_supply: BigUint,
    ) {
        self.init_owners();

        self.token_name().set(&name);
        self.token_symbol().set(&symbol);
        self.num_decimals().set(decimals);
        self.transfers_enabled().set(true);
        self.paused().set(false);
        self.minting_finished().set(false);
        self.total_supply().set(BigUint::zero());

        if initial_supply > 0u64 {
            let deployer = self.blockchain().get_caller();
            self.issue(&deployer, &initial_supply);
        }
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: mint
    // The only way new supply enters circulation.
    // ========================================================

    #[endpoint(mint)]
    fn mint(&self, recipient: ManagedAddress, amount: BigUint) {
        require!(!self.minting_finished().get(), ERR_MINTING_CLOSED);
        self.require_owner();
        require!(!self.paused().get(), ERR_PAUSED);

        self.issue(&recipient, &amount);
    }

    /// One-way latch. Calling it again is a no-op.
    #[endpoint(finishMinting)]
    fn finish_minting(&self) {
        self.require_owner();
        if self.minting_finished().get() {
            return;
        }

        self.minting_finished().set(true);
        self.mint_finished_event(&self.blockchain().get_caller());
    }

    // ========================================================
    // ENDPOINT: transfer / transferFrom / approve
    // ========================================================

    #[endpoint(transfer)]
    fn transfer(&self, recipient: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.require_transfer_allowed();
        self.move_balance(&caller, &recipient, &amount);
    }

    #[endpoint(transferFrom)]
    fn transfer_from(&self, from: ManagedAddress, recipient: ManagedAddress, amount: BigUint) {
        let spender = self.blockchain().get_caller();
        self.require_transfer_allowed();

        let allowance = self.allowances(&from, &spender).get();
        let remaining = self.checked_sub(&allowance, &amount, ERR_INSUFFICIENT_ALLOWANCE);
        self.allowances(&from, &spender).set(&remaining);

        self.move_balance(&from, &recipient, &amount);
    }

    /// Overwrites any previous allowance granted to `spender`.
    #[endpoint(approve)]
    fn approve(&self, spender: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.require_in_range(&amount);
        self.allowances(&caller, &spender).set(&amount);
        self.approval_event(&caller, &spender, &amount);
    }

    // ========================================================
    // ENDPOINT: burn
    // Holders burn from their own balance only.
    // ========================================================

    #[endpoint(burn)]
    fn burn(&self, amount: BigUint) {
        let caller = self.blockchain().get_caller();

        let balance = self.balance(&caller).get();
        let new_balance = self.checked_sub(&balance, &amount, ERR_INSUFFICIENT_BALANCE);
        let supply = self.total_supply().get();
        let new_supply = self.checked_sub(&supply, &amount, ERR_INSUFFICIENT_BALANCE);

        self.balance(&caller).set(&new_balance);
        self.total_supply().set(&new_supply);

        self.burn_event(&caller, &amount);
    }

    // ========================================================
    // ENDPOINT: administrative toggles
    // pause/unpause in the current state are no-ops.
    // ========================================================

    #[endpoint(pause)]
    fn pause(&self) {
        self.require_owner();
        if self.paused().get() {
            return;
        }

        self.paused().set(true);
        self.pause_event(&self.blockchain().get_caller());
    }

    #[endpoint(unpause)]
    fn unpause(&self) {
        self.require_owner();
        if !self.paused().get() {
            return;
        }

        self.paused().set(false);
        self.unpause_event(&self.blockchain().get_caller());
    }

    #[endpoint(toggleTransfers)]
    fn toggle_transfers(&self) -> bool {
        self.require_owner();
        let enabled = !self.transfers_enabled().get();
        self.transfers_enabled().set(enabled);
        self.transfers_toggled_event(&self.blockchain().get_caller(), enabled);
        enabled
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_transfer_allowed(&self) {
        require!(self.transfers_enabled().get(), ERR_TRANSFERS_DISABLED);
        require!(!self.paused().get(), ERR_PAUSED);
    }

    /// New supply, logged as a mint and as a transfer from the zero address.
    fn issue(&self, recipient: &ManagedAddress, amount: &BigUint) {
        self.credit(recipient, amount);

        self.mint_event(recipient, amount);
        self.transfer_event(&ManagedAddress::zero(), recipient, amount);
    }

    fn credit(&self, recipient: &ManagedAddress, amount: &BigUint) {
        let new_supply = self.checked_add(&self.total_supply().get(), amount);
        let new_balance = self.checked_add(&self.balance(recipient).get(), amount);

        self.total_supply().set(&new_supply);
        self.balance(recipient).set(&new_balance);
    }

    /// Debits before crediting, both read from storage, so a self-transfer
    /// ends where it started.
    fn move_balance(&self, from: &ManagedAddress, to: &ManagedAddress, amount: &BigUint) {
        let from_balance = self.balance(from).get();
        let debited = self.checked_sub(&from_balance, amount, ERR_INSUFFICIENT_BALANCE);
        self.balance(from).set(&debited);

        let to_balance = self.balance(to).get();
        let credited = self.checked_add(&to_balance, amount);
        self.balance(to).set(&credited);

        self.transfer_event(from, to, amount);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(balanceOf)]
    fn balance_of(&self, account: ManagedAddress) -> BigUint {
        self.balance(&account).get()
    }

    #[view(allowance)]
    fn allowance(&self, owner: ManagedAddress, spender: ManagedAddress) -> BigUint {
        self.allowances(&owner, &spender).get()
    }

    #[view(name)]
    fn name(&self) -> ManagedBuffer {
        self.token_name().get()
    }

    #[view(symbol)]
    fn symbol(&self) -> ManagedBuffer {
        self.token_symbol().get()
    }

    #[view(decimals)]
    fn decimals(&self) -> u8 {
        self.num_decimals().get()
    }

    #[view(isPaused)]
    fn is_paused(&self) -> bool {
        self.paused().get()
    }

    #[view(isTransferEnabled)]
    fn is_transfer_enabled(&self) -> bool {
        self.transfers_enabled().get()
    }

    #[view(isMintingFinished)]
    fn is_minting_finished(&self) -> bool {
        self.minting_finished().get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("mint")]
    fn mint_event(&self, #[indexed] recipient: &ManagedAddress, amount: &BigUint);

    #[event("burn")]
    fn burn_event(&self, #[indexed] holder: &ManagedAddress, amount: &BigUint);

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("approval")]
    fn approval_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] spender: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("mintFinished")]
    fn mint_finished_event(&self, #[indexed] by: &ManagedAddress);

    #[event("pause")]
    fn pause_event(&self, #[indexed] by: &ManagedAddress);

    #[event("unpause")]
    fn unpause_event(&self, #[indexed] by: &ManagedAddress);

    #[event("transfersToggled")]
    fn transfers_toggled_event(&self, #[indexed] by: &ManagedAddress, enabled: bool);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Metadata ──

    #[storage_mapper("name")]
    fn token_name(&self) -> SingleValueMapper<ManagedBuffer>;

    #[storage_mapper("symbol")]
    fn token_symbol(&self) -> SingleValueMapper<ManagedBuffer>;

    #[storage_mapper("decimals")]
    fn num_decimals(&self) -> SingleValueMapper<u8>;

    // ── Accounting ──

    #[view(totalSupply)]
    #[storage_mapper("totalSupply")]
    fn total_supply(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("balance")]
    fn balance(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("allowance")]
    fn allowances(
        &self,
        owner: &ManagedAddress,
        spender: &ManagedAddress,
    ) -> SingleValueMapper<BigUint>;

    // ── Flags ──

    #[storage_mapper("transfersEnabled")]
    fn transfers_enabled(&self) -> SingleValueMapper<bool>;

    #[storage_mapper("paused")]
    fn paused(&self) -> SingleValueMapper<bool>;

    #[storage_mapper("mintingFinished")]
    fn minting_finished(&self) -> SingleValueMapper<bool>;
}
