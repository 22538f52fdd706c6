//! StrKey encoding for account addresses and secret seeds.
//!
//! Format: base32(version_byte || payload[32] || crc16_xmodem_le[2])
//!
//! The version byte selects the leading character: `6 << 3` encodes to `G`
//! (account id), `18 << 3` to `S` (secret seed). 35 bytes are exactly 280 bits,
//! so every key is 56 characters with no padding. Base32 uses the RFC 4648
//! alphabet.

use tipjar_types::{AccountAddress, PrivateKey, PublicKey};

/// Version byte for `G...` account ids.
const VERSION_ACCOUNT_ID: u8 = 6 << 3;
/// Version byte for `S...` secret seeds.
const VERSION_SEED: u8 = 18 << 3;

/// RFC 4648 base32 alphabet.
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Raw length: version + payload + checksum.
const RAW_LEN: usize = 35;
/// Encoded length in base32 characters.
const ENCODED_LEN: usize = 56;

/// CRC16-XModem (poly 0x1021, init 0).
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn encode_base32(bytes: &[u8]) -> String {
    let mut result = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

/// Decode base32 into a fixed-size array. Returns `None` on invalid characters
/// or a short input.
fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = BASE32_DECODE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    if pos < N {
        return None;
    }
    Some(result)
}

fn encode_strkey(version: u8, payload: &[u8; 32]) -> String {
    let mut raw = [0u8; RAW_LEN];
    raw[0] = version;
    raw[1..33].copy_from_slice(payload);
    let crc = crc16_xmodem(&raw[..33]);
    raw[33..].copy_from_slice(&crc.to_le_bytes());
    encode_base32(&raw)
}

fn decode_strkey(version: u8, encoded: &str) -> Option<[u8; 32]> {
    if encoded.len() != ENCODED_LEN {
        return None;
    }
    let raw: [u8; RAW_LEN] = decode_base32_fixed(encoded)?;
    if raw[0] != version {
        return None;
    }
    let expected = crc16_xmodem(&raw[..33]).to_le_bytes();
    if raw[33..] != expected {
        return None;
    }
    let mut payload = [0u8; 32];
    payload.copy_from_slice(&raw[1..33]);
    Some(payload)
}

/// Derive the `G...` account address of a public key.
pub fn derive_address(public_key: &PublicKey) -> AccountAddress {
    AccountAddress::new(encode_strkey(VERSION_ACCOUNT_ID, public_key.as_bytes()))
}

/// Extract the public key bytes from a `G...` address.
///
/// Returns `None` if the address is malformed or its checksum does not match.
pub fn decode_address(address: &str) -> Option<[u8; 32]> {
    decode_strkey(VERSION_ACCOUNT_ID, address)
}

/// Validate that an address string is well-formed and its checksum is correct.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_some()
}

/// Public key behind a parsed account address.
pub fn public_key_of(address: &AccountAddress) -> Option<PublicKey> {
    decode_address(address.as_str()).map(PublicKey)
}

/// Encode a secret seed in its `S...` form.
pub fn encode_secret_seed(private_key: &PrivateKey) -> String {
    encode_strkey(VERSION_SEED, &private_key.0)
}

/// Decode an `S...` secret seed.
pub fn decode_secret_seed(seed: &str) -> Option<PrivateKey> {
    decode_strkey(VERSION_SEED, seed.trim()).map(PrivateKey)
}
