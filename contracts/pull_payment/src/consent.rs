//! Consent verifier: canonical message encoding and signer recovery.
//!
//! A consent message is the tight concatenation of ordered fields — 20-byte
//! account ids verbatim, strings as raw utf8, numerics big-endian padded to
//! 32 bytes — hashed with keccak-256. The registration message covers only
//! the economically meaningful terms; `merchant_id`, `client`, and (for
//! registration) `payment_id` are relayed unsigned, and the billing engine
//! separately checks that the recovered signer equals the declared client.
//!
//! **PRs that only change message encoding or recovery should edit this
//! file only.**

use crate::types::{Error, RegistrationTerms, Signature, MAX_CONSENT_FIELD_LEN};
use soroban_sdk::{crypto::Hash, Bytes, BytesN, Env, String};

/// Digest a client signs to authorize a registration:
/// `(beneficiary, currency, initial, recurring, frequency, remaining, start)`.
pub fn registration_digest(env: &Env, terms: &RegistrationTerms) -> Result<Hash<32>, Error> {
    let mut msg = Bytes::new(env);
    msg.extend_from_array(&terms.beneficiary.to_array());
    append_string(&mut msg, &terms.currency)?;
    append_uint(&mut msg, terms.initial_amount_cents);
    append_uint(&mut msg, terms.recurring_amount_cents);
    append_uint(&mut msg, terms.frequency_seconds);
    append_uint(&mut msg, terms.remaining_payments as u64);
    append_uint(&mut msg, terms.start_time);
    Ok(env.crypto().keccak256(&msg))
}

/// Digest a client signs to authorize a cancellation: `(payment_id, beneficiary)`.
pub fn cancellation_digest(
    env: &Env,
    payment_id: &String,
    beneficiary: &BytesN<20>,
) -> Result<Hash<32>, Error> {
    let mut msg = Bytes::new(env);
    append_string(&mut msg, payment_id)?;
    msg.extend_from_array(&beneficiary.to_array());
    Ok(env.crypto().keccak256(&msg))
}

/// Recover the 20-byte signer id from a detached `(v, r, s)` signature over
/// `digest`.
///
/// `v` is accepted as a raw recovery id (0/1) or in the wallet convention
/// (27/28). Anything else, or a zero `r` or `s`, fails with
/// [`Error::InvalidSignature`] before recovery is attempted. A signature
/// that is well-formed but wrong recovers to a different id, which the
/// caller's signer-equality check rejects.
pub fn recover_signer(env: &Env, digest: &Hash<32>, sig: &Signature) -> Result<BytesN<20>, Error> {
    let recovery_id = match sig.v {
        0 | 1 => sig.v,
        27 | 28 => sig.v - 27,
        _ => return Err(Error::InvalidSignature),
    };
    let r = sig.r.to_array();
    let s = sig.s.to_array();
    if r == [0u8; 32] || s == [0u8; 32] {
        return Err(Error::InvalidSignature);
    }
    let mut rs = [0u8; 64];
    rs[..32].copy_from_slice(&r);
    rs[32..].copy_from_slice(&s);
    let signature = BytesN::from_array(env, &rs);
    let pubkey = env.crypto().secp256k1_recover(digest, &signature, recovery_id);
    Ok(signer_id(env, &pubkey))
}

/// The account id of an uncompressed secp256k1 public key: the low 20 bytes
/// of keccak-256 over the 64-byte point (SEC1 prefix stripped).
pub fn signer_id(env: &Env, pubkey: &BytesN<65>) -> BytesN<20> {
    let point = pubkey.to_array();
    let hash = env.crypto().keccak256(&Bytes::from_slice(env, &point[1..])).to_array();
    let mut id = [0u8; 20];
    id.copy_from_slice(&hash[12..]);
    BytesN::from_array(env, &id)
}

fn append_uint(msg: &mut Bytes, value: u64) {
    msg.extend_from_array(&[0u8; 24]);
    msg.extend_from_array(&value.to_be_bytes());
}

fn append_string(msg: &mut Bytes, value: &String) -> Result<(), Error> {
    let len = value.len() as usize;
    if len > MAX_CONSENT_FIELD_LEN {
        return Err(Error::InvalidTerms);
    }
    let mut buf = [0u8; MAX_CONSENT_FIELD_LEN];
    value.copy_into_slice(&mut buf[..len]);
    msg.extend_from_slice(&buf[..len]);
    Ok(())
}
