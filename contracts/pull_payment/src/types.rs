use soroban_sdk::{contracterror, contracttype, Address, BytesN, String};

/// Token units per whole token on the external ledger (18 decimals).
pub const TOKEN_DECIMALS: u32 = 18;
/// Exchange rates are fixed-point integers scaled by `10^RATE_DECIMALS`.
pub const RATE_DECIMALS: u32 = 10;
/// Fiat amounts are denominated in cents (2 decimals).
pub const CENTS_DECIMALS: u32 = 2;

/// Multiplier applied to a cent amount before dividing by the rate:
/// `10^(TOKEN_DECIMALS + RATE_DECIMALS - CENTS_DECIMALS)`.
pub const CONVERSION_SCALE: u128 = 10u128.pow(TOKEN_DECIMALS + RATE_DECIMALS - CENTS_DECIMALS);

/// Upper bound on the byte length of string fields that enter a consent
/// message (currency code, payment id). Longer values cannot be canonically
/// encoded and are rejected at the boundary.
pub const MAX_CONSENT_FIELD_LEN: usize = 64;

/// Storage keys.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Administrator account; presence doubles as the initialized flag.
    Admin,
    /// Address of the external token-ledger contract funds are pulled through.
    TokenLedger,
    /// Executor allow-list membership.
    Executor(Address),
    /// Fixed-point exchange rate for a currency code.
    Rate(String),
    /// Pull-payment record for a (client, beneficiary) pair.
    Payment(BytesN<20>, BytesN<20>),
}

#[contracterror]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 401,
    NotExecutor = 403,
    NotFound = 404,
    AlreadyInitialized = 409,
    NotInitialized = 412,

    /// Malformed detached signature: v outside {0, 1, 27, 28}, or r/s zero.
    InvalidSignature = 1001,
    /// The recovered signer is not the declared client.
    ConsentMismatch = 1002,
    /// Zero frequency, zero payment count, null account, or an
    /// un-encodable string field in the registration terms.
    InvalidTerms = 1003,
    /// A zero exchange rate can never be written.
    InvalidRate = 1004,
    /// No exchange rate has been set for the record's currency.
    RateNotSet = 1005,
    /// The next payment period has not matured yet.
    NotYetDue = 1006,
    /// All allowed recurring payments have been collected.
    PaymentsExhausted = 1007,
    /// The record is cancelled and no matured period remains collectible.
    CancelledNothingDue = 1008,
    /// Supplied payment id does not match the stored registration.
    IdMismatch = 1009,
    /// `cancel_time` is already set; cancellation is not idempotent.
    AlreadyCancelled = 1010,
    /// The token ledger refused the pull transfer.
    TransferFailed = 1011,
    /// Converted token amount does not fit the ledger's amount type,
    /// or a clock field would wrap.
    AmountOverflow = 1012,
    /// Adding an executor that is already a member.
    ExecutorExists = 1013,
}

/// One pull-payment agreement between a client and a beneficiary.
///
/// Keyed by the (client, beneficiary) pair; at most one record exists per
/// pair and a fresh registration replaces it wholesale. The record is never
/// deleted: a cancelled or exhausted record simply stops producing charges.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PullPayment {
    /// Opaque merchant correlation id. Not signed, not used for uniqueness.
    pub merchant_id: String,
    /// Opaque payment id; must match exactly on cancellation.
    pub payment_id: String,
    /// Currency code the fiat amounts are denominated in.
    pub currency: String,
    /// One-time signup fee in fiat cents; zeroed permanently once charged.
    pub initial_amount_cents: u64,
    /// Fiat cents charged per period.
    pub recurring_amount_cents: u64,
    /// Period length in seconds. Always > 0 for a stored record.
    pub frequency_seconds: u64,
    /// Recurring charges still allowed; decremented once per charge.
    pub remaining_payments: u32,
    /// Epoch seconds the agreement starts.
    pub start_time: u64,
    /// Next eligible charge time; advances by exactly one period per charge.
    pub next_payment_time: u64,
    /// Zero until the first successful charge of any kind.
    pub last_payment_time: u64,
    /// Zero while active; stamped once on cancellation, immutable after.
    pub cancel_time: u64,
}

/// Registration inputs relayed by an executor.
///
/// Only `beneficiary`, `currency`, and the five numeric terms are covered by
/// the client's signature; `merchant_id`, `payment_id`, and `client` travel
/// unsigned and are checked (or merely stored) by the engine itself.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistrationTerms {
    pub merchant_id: String,
    pub payment_id: String,
    pub client: BytesN<20>,
    pub beneficiary: BytesN<20>,
    pub currency: String,
    pub initial_amount_cents: u64,
    pub recurring_amount_cents: u64,
    pub frequency_seconds: u64,
    pub remaining_payments: u32,
    pub start_time: u64,
}

/// Detached ECDSA signature over a consent message, split (v, r, s).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub v: u32,
    pub r: BytesN<32>,
    pub s: BytesN<32>,
}

/// Result of asking when a record is next chargeable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DueInfo {
    /// Timestamp of the next recurring charge attempt. A pending initial
    /// payment is collectible regardless of this value.
    pub next_payment_time: u64,
    /// False once the record is exhausted, or cancelled with no matured
    /// period left to collect.
    pub is_charge_expected: bool,
}
