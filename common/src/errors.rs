// ============================================================
// Error kinds signalled by the token and the crowdsale.
// Every failure aborts the whole transaction with one of these.
// ============================================================

// ── Access control ──

pub const ERR_UNAUTHORIZED: &str = "Unauthorized: caller is not an owner";
pub const ERR_ALREADY_OWNER: &str = "Address is already an owner";

// ── Ledger ──

pub const ERR_MINTING_CLOSED: &str = "Minting is finished";
pub const ERR_TRANSFERS_DISABLED: &str = "Transfers are disabled";
pub const ERR_PAUSED: &str = "Token is paused";
pub const ERR_INSUFFICIENT_BALANCE: &str = "Insufficient balance";
pub const ERR_INSUFFICIENT_ALLOWANCE: &str = "Insufficient allowance";
pub const ERR_ARITHMETIC_OVERFLOW: &str = "Arithmetic overflow";

// ── Sale ──

pub const ERR_SALE_ENDED: &str = "Sale has ended";
pub const ERR_EXCEEDS_CAP: &str = "Purchase exceeds cap";
pub const ERR_ZERO_VALUE: &str = "Payment must be greater than zero";
pub const ERR_ALREADY_ASSIGNED: &str = "Token contract already assigned";
pub const ERR_TOKEN_NOT_ASSIGNED: &str = "Token contract not assigned";
pub const ERR_PURCHASES_DISABLED: &str = "Purchases are disabled";
pub const ERR_INVALID_RATE: &str = "Rate must be greater than zero";
pub const ERR_INVALID_CAP: &str = "Cap must be greater than zero";
