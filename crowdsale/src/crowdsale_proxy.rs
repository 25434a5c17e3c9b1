use multiversx_sc::proxy_imports::*;

pub struct CrowdsaleProxy;

impl<Env, From, To, Gas> TxProxyTrait<Env, From, To, Gas> for CrowdsaleProxy
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    type TxProxyMethods = CrowdsaleProxyMethods<Env, From, To, Gas>;

    fn proxy_methods(self, tx: Tx<Env, From, To, (), Gas, (), ()>) -> Self::TxProxyMethods {
        CrowdsaleProxyMethods { wrapped_tx: tx }
    }
}

pub struct CrowdsaleProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    wrapped_tx: Tx<Env, From, To, (), Gas, (), ()>,
}

impl<Env, From, Gas> CrowdsaleProxyMethods<Env, From, (), Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    Gas: TxGas<Env>,
{
    pub fn init<
        Arg0: ProxyArg<ManagedAddress<Env::Api>>,
        Arg1: ProxyArg<BigUint<Env::Api>>,
        Arg2: ProxyArg<BigUint<Env::Api>>,
    >(
        self,
        wallet: Arg0,
        rate: Arg1,
        cap: Arg2,
    ) -> TxTypedDeploy<Env, From, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_deploy()
            .argument(&wallet)
            .argument(&rate)
            .argument(&cap)
            .original_result()
    }
}

impl<Env, From, To, Gas> CrowdsaleProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    pub fn upgrade(self) -> TxTypedUpgrade<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_upgrade()
            .original_result()
    }
}

impl<Env, From, To, Gas> CrowdsaleProxyMethods<Env, From, To, Gas>
where
    Env: TxEnv,
    Env::Api: VMApi,
    From: TxFrom<Env>,
    To: TxTo<Env>,
    Gas: TxGas<Env>,
{
    // ── Sale ──

    pub fn assign_token_contract<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        token: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("assignTokenContract")
            .argument(&token)
            .original_result()
    }

    /// Payable in EGLD; attach the contribution with `.egld(..)`.
    pub fn buy_tokens<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        recipient: Arg0,
    ) -> TxTypedCall<Env, From, To, (), Gas, ()> {
        self.wrapped_tx
            .raw_call("buyTokens")
            .argument(&recipient)
            .original_result()
    }

    pub fn set_rate<Arg0: ProxyArg<BigUint<Env::Api>>>(
        self,
        rate: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("setRate")
            .argument(&rate)
            .original_result()
    }

    pub fn toggle_purchases(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("togglePurchases")
            .original_result()
    }

    pub fn has_ended(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("hasEnded")
            .original_result()
    }

    pub fn remaining_cap(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("remainingCap")
            .original_result()
    }

    pub fn get_sale_config(
        self,
    ) -> TxTypedCall<
        Env,
        From,
        To,
        NotPayable,
        Gas,
        MultiValue4<BigUint<Env::Api>, BigUint<Env::Api>, ManagedAddress<Env::Api>, BigUint<Env::Api>>,
    > {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getSaleConfig")
            .original_result()
    }

    pub fn is_purchase_enabled(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isPurchaseEnabled")
            .original_result()
    }

    pub fn wallet(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("wallet")
            .original_result()
    }

    pub fn rate(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("rate")
            .original_result()
    }

    pub fn cap(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("cap")
            .original_result()
    }

    pub fn token(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, ManagedAddress<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("token")
            .original_result()
    }

    pub fn wei_raised(self) -> TxTypedCall<Env, From, To, NotPayable, Gas, BigUint<Env::Api>> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("weiRaised")
            .original_result()
    }

    // ── Owner registry ──

    pub fn add_owner<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        candidate: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("addOwner")
            .argument(&candidate)
            .original_result()
    }

    pub fn remove_owner<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        candidate: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, ()> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("removeOwner")
            .argument(&candidate)
            .original_result()
    }

    pub fn is_owner<Arg0: ProxyArg<ManagedAddress<Env::Api>>>(
        self,
        candidate: Arg0,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, bool> {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("isOwner")
            .argument(&candidate)
            .original_result()
    }

    pub fn get_owners(
        self,
    ) -> TxTypedCall<Env, From, To, NotPayable, Gas, MultiValueEncoded<Env::Api, ManagedAddress<Env::Api>>>
    {
        self.wrapped_tx
            .payment(NotPayable)
            .raw_call("getOwners")
            .original_result()
    }
}
