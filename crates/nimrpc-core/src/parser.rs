//! Translation from Nimiq wire shapes into the canonical model, plus the
//! chain parser the indexer uses for amounts and address descriptors.

use primitive_types::U256;

use crate::error::CoreError;
use crate::rpc::types::{WireBlock, WireHeader, WireLightBlock, WireTx};
use crate::types::{AddressDescriptor, Block, BlockHeader, BlockInfo, ScriptPubKey, Tx, Vin, Vout};

/// Address descriptors are always the raw 20-byte account address.
pub const ADDRESS_DESCRIPTOR_LEN: usize = 20;

/// 1 NIM = 100 000 luna.
pub const AMOUNT_DECIMAL_POINT: u32 = 5;

const COUNTRY_CODE: &str = "NQ";
const BASE32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKLMNPQRSTUVXY";
const FRIENDLY_ADDRESS_LEN: usize = 36;

// ==============================================================================
// Chain Parser
// ==============================================================================

/// Coin-specific parsing the indexer needs beyond the RPC surface.
pub trait BlockChainParser: Send + Sync {
    fn block_addresses_to_keep(&self) -> u32;

    fn amount_decimal_point(&self) -> u32;

    /// Render a base-unit amount as a decimal string in whole coins.
    fn amount_to_decimal_string(&self, amount: &U256) -> String;

    fn addr_desc_from_address(&self, address: &str) -> Result<AddressDescriptor, CoreError>;

    fn addresses_from_addr_desc(&self, desc: &AddressDescriptor)
        -> Result<Vec<String>, CoreError>;

    /// Descriptor of the (single) recipient of an output.
    fn addr_desc_from_vout(&self, vout: &Vout) -> Result<AddressDescriptor, CoreError> {
        let address = vout
            .script_pub_key
            .addresses
            .first()
            .ok_or_else(|| CoreError::InvalidAddress(format!("output {} has no address", vout.n)))?;
        self.addr_desc_from_address(address)
    }
}

#[derive(Debug, Clone)]
pub struct NimiqParser {
    block_addresses_to_keep: u32,
}

impl NimiqParser {
    pub fn new(block_addresses_to_keep: u32) -> Self {
        Self {
            block_addresses_to_keep,
        }
    }
}

impl BlockChainParser for NimiqParser {
    fn block_addresses_to_keep(&self) -> u32 {
        self.block_addresses_to_keep
    }

    fn amount_decimal_point(&self) -> u32 {
        AMOUNT_DECIMAL_POINT
    }

    fn amount_to_decimal_string(&self, amount: &U256) -> String {
        format_amount(amount, AMOUNT_DECIMAL_POINT as usize)
    }

    fn addr_desc_from_address(&self, address: &str) -> Result<AddressDescriptor, CoreError> {
        let trimmed = address.trim();
        if trimmed.len() == ADDRESS_DESCRIPTOR_LEN * 2
            && trimmed.bytes().all(|b| b.is_ascii_hexdigit())
        {
            let bytes = hex::decode(trimmed)
                .map_err(|e| CoreError::InvalidAddress(format!("{address}: {e}")))?;
            return Ok(AddressDescriptor(bytes));
        }
        decode_friendly_address(trimmed).map(|bytes| AddressDescriptor(bytes.to_vec()))
    }

    fn addresses_from_addr_desc(
        &self,
        desc: &AddressDescriptor,
    ) -> Result<Vec<String>, CoreError> {
        let bytes: &[u8; ADDRESS_DESCRIPTOR_LEN] = desc.as_bytes().try_into().map_err(|_| {
            CoreError::InvalidAddress(format!(
                "descriptor must be {ADDRESS_DESCRIPTOR_LEN} bytes, got {}",
                desc.as_bytes().len()
            ))
        })?;
        Ok(vec![encode_friendly_address(bytes)])
    }
}

// ==============================================================================
// Wire -> Canonical
// ==============================================================================

/// Map a wire header onto the canonical header.
///
/// Height and size are narrowed; values outside the canonical range are
/// reported as invalid block data, labelled with the caller's `context`,
/// rather than truncated.
pub fn header_from_wire(head: &WireHeader, context: &str) -> Result<BlockHeader, CoreError> {
    let invalid = |message: String| CoreError::InvalidBlockData {
        context: context.to_owned(),
        message,
    };
    let height = u32::try_from(head.number)
        .map_err(|_| invalid(format!("height out of range: {}", head.number)))?;
    let size = usize::try_from(head.size)
        .map_err(|_| invalid(format!("size out of range: {}", head.size)))?;

    Ok(BlockHeader {
        hash: head.hash.clone(),
        prev: head.parent_hash.clone(),
        height,
        size,
        time: head.time,
    })
}

/// Every transaction becomes exactly one input (the sender) and one output
/// (the recipient, carrying the value). Fee and confirmations stay on the
/// wire shape for callers that want them.
pub fn tx_from_wire(tx: &WireTx) -> Tx {
    Tx {
        txid: tx.hash.clone(),
        vin: vec![Vin {
            addresses: vec![tx.from.clone()],
        }],
        vout: vec![Vout {
            n: 0,
            value_sat: U256::from(tx.value),
            script_pub_key: ScriptPubKey {
                addresses: vec![tx.to.clone()],
            },
        }],
    }
}

pub fn block_from_wire(
    head: &WireHeader,
    body: &WireBlock,
    context: &str,
) -> Result<Block, CoreError> {
    Ok(Block {
        header: header_from_wire(head, context)?,
        txs: body.txs.iter().map(tx_from_wire).collect(),
    })
}

pub fn block_info_from_wire(
    head: &WireHeader,
    body: WireLightBlock,
    context: &str,
) -> Result<BlockInfo, CoreError> {
    Ok(BlockInfo {
        header: header_from_wire(head, context)?,
        difficulty: head.difficulty.clone(),
        nonce: head.nonce.clone(),
        txids: body.txs,
    })
}

// ==============================================================================
// Amounts
// ==============================================================================

fn format_amount(amount: &U256, decimals: usize) -> String {
    let digits = amount.to_string();
    if decimals == 0 {
        return digits;
    }
    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        int_part.to_owned()
    } else {
        format!("{int_part}.{frac_part}")
    }
}

// ==============================================================================
// User-Friendly Addresses
// ==============================================================================

fn encode_friendly_address(bytes: &[u8; ADDRESS_DESCRIPTOR_LEN]) -> String {
    let base32 = base32_encode(bytes);
    let check = 98 - iban_check(&format!("{base32}{COUNTRY_CODE}00"));
    let compact = format!("{COUNTRY_CODE}{check:02}{base32}");

    let groups: Vec<&str> = compact
        .as_bytes()
        .chunks(4)
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect();
    groups.join(" ")
}

fn decode_friendly_address(address: &str) -> Result<[u8; ADDRESS_DESCRIPTOR_LEN], CoreError> {
    let invalid = |reason: &str| CoreError::InvalidAddress(format!("{address}: {reason}"));

    let compact: String = address
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if compact.len() != FRIENDLY_ADDRESS_LEN || !compact.is_ascii() {
        return Err(invalid("wrong length"));
    }
    if !compact.starts_with(COUNTRY_CODE) {
        return Err(invalid("wrong country code"));
    }

    let (prefix, base32) = compact.split_at(4);
    if iban_check(&format!("{base32}{prefix}")) != 1 {
        return Err(invalid("checksum mismatch"));
    }
    base32_decode(base32).ok_or_else(|| invalid("invalid character"))
}

/// ISO 13616 mod-97 over the alphanumeric string, letters expanded to 10..35.
fn iban_check(s: &str) -> u32 {
    let mut rem = 0u32;
    for c in s.chars() {
        let value = match c.to_digit(36) {
            Some(v) => v,
            None => return u32::MAX,
        };
        rem = if value < 10 {
            (rem * 10 + value) % 97
        } else {
            (rem * 100 + value) % 97
        };
    }
    rem
}

fn base32_encode(bytes: &[u8; ADDRESS_DESCRIPTOR_LEN]) -> String {
    let mut out = String::with_capacity(32);
    let mut buffer = 0u32;
    let mut bits = 0u32;
    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(BASE32_ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    out
}

fn base32_decode(s: &str) -> Option<[u8; ADDRESS_DESCRIPTOR_LEN]> {
    let mut out = [0u8; ADDRESS_DESCRIPTOR_LEN];
    let mut written = 0usize;
    let mut buffer = 0u32;
    let mut bits = 0u32;
    for c in s.bytes() {
        let value = BASE32_ALPHABET.iter().position(|&a| a == c)? as u32;
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            *out.get_mut(written)? = ((buffer >> bits) & 0xff) as u8;
            written += 1;
        }
    }
    (written == ADDRESS_DESCRIPTOR_LEN).then_some(out)
}
