#![no_std]

multiversx_sc::imports!();

pub mod reentrant_ledger_proxy;

/// Ledger stand-in for sale tests. Answers the sale's mint-precondition
/// reads like a permissive ledger, records what it is asked to mint and,
/// once armed, calls back into the sale's `buyTokens` from inside `mint`.
#[multiversx_sc::contract]
pub trait ReentrantLedger {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    /// The next `mint` buys from `sale` for `recipient`, paying with the
    /// EGLD attached here. Fires once.
    #[endpoint(arm)]
    #[payable("EGLD")]
    fn arm(&self, sale: ManagedAddress, recipient: ManagedAddress) {
        let value = self.call_value().egld_value().clone_value();
        self.sale().set(&sale);
        self.reentry_recipient().set(&recipient);
        self.reentry_value().set(&value);
    }

    #[endpoint(mint)]
    fn mint(&self, recipient: ManagedAddress, amount: BigUint) {
        self.minted(&recipient).update(|minted| *minted += &amount);

        // Disarmed before the call so the nested purchase mints plainly.
        let value = self.reentry_value().take();
        if value == 0u64 {
            return;
        }

        self.tx()
            .to(&self.sale().get())
            .egld(&value)
            .raw_call("buyTokens")
            .argument(&self.reentry_recipient().get())
            .sync_call();
    }

    #[view(isOwner)]
    fn is_owner(&self, _candidate: ManagedAddress) -> bool {
        true
    }

    #[view(isMintingFinished)]
    fn is_minting_finished(&self) -> bool {
        false
    }

    #[view(isPaused)]
    fn is_paused(&self) -> bool {
        false
    }

    #[view(minted)]
    #[storage_mapper("minted")]
    fn minted(&self, recipient: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("sale")]
    fn sale(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("reentryRecipient")]
    fn reentry_recipient(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("reentryValue")]
    fn reentry_value(&self) -> SingleValueMapper<BigUint>;
}
