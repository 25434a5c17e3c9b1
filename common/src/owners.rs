multiversx_sc::imports!();

use crate::errors::{ERR_ALREADY_OWNER, ERR_UNAUTHORIZED};

// ============================================================
// Owner registry: flat set of accounts with full privilege.
// Composed into every contract that needs access control; each
// contract keeps its own independent set.
// ============================================================

#[multiversx_sc::module]
pub trait OwnersModule {
    /// Seeds the registry with the deploying account. Call from `#[init]`.
    fn init_owners(&self) {
        let deployer = self.blockchain().get_caller();
        self.owners().insert(deployer);
    }

    /// Membership is read from storage on every call, so a removed
    /// owner loses privilege immediately.
    fn require_owner(&self) {
        let caller = self.blockchain().get_caller();
        require!(self.owners().contains(&caller), ERR_UNAUTHORIZED);
    }

    #[endpoint(addOwner)]
    fn add_owner(&self, candidate: ManagedAddress) {
        self.require_owner();
        require!(!self.owners().contains(&candidate), ERR_ALREADY_OWNER);

        self.owners().insert(candidate.clone());

        let caller = self.blockchain().get_caller();
        self.owner_added_event(&candidate, &caller);
    }

    /// Removing an address that is not an owner is a no-op.
    #[endpoint(removeOwner)]
    fn remove_owner(&self, candidate: ManagedAddress) {
        self.require_owner();

        if self.owners().swap_remove(&candidate) {
            let caller = self.blockchain().get_caller();
            self.owner_removed_event(&candidate, &caller);
        }
    }

    #[view(isOwner)]
    fn is_owner(&self, candidate: ManagedAddress) -> bool {
        self.owners().contains(&candidate)
    }

    #[view(getOwners)]
    fn get_owners(&self) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for owner in self.owners().iter() {
            result.push(owner);
        }
        result
    }

    #[event("ownerAdded")]
    fn owner_added_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] added_by: &ManagedAddress,
    );

    #[event("ownerRemoved")]
    fn owner_removed_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] removed_by: &ManagedAddress,
    );

    #[storage_mapper("owners")]
    fn owners(&self) -> UnorderedSetMapper<ManagedAddress>;
}
