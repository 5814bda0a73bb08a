//! SPL Name Service account layout.
//!
//! A `.sol` domain lives in a name account whose address is a PDA of the name program:
//! seeds are `sha256("SPL Name Service" ++ name)`, the class key (all zeros here) and the
//! parent key. Top-level names hang off the `.sol` root account; a subdomain `sub.parent`
//! hangs off the parent's account and hashes `"\0sub"`.
//!
//! Account data starts with a 96-byte header: parent, owner, class.
//!
//! A tokenized domain has the name tokenizer's central state as header owner; the real
//! holder is whoever holds the domain's NFT. The mint is recorded in the tokenizer's NFT
//! record account for the domain.

use sha2::{Digest, Sha256};
use solana_program::{pubkey, pubkey::Pubkey};

pub const NAME_PROGRAM_ID: Pubkey = pubkey!("namesLPneVptA9Z5rqUDD9tMTWEJwofgaYwp8cawRkX");
/// Parent of every top-level `.sol` name.
pub const SOL_ROOT_DOMAIN: Pubkey = pubkey!("58PwtjSDuFHuUkYjH9BYnnQKHfwo9reZhC2zMJv9JPkx");
pub const HASH_PREFIX: &str = "SPL Name Service";
pub const HEADER_LEN: usize = 96;

const SUBDOMAIN_PREFIX: &str = "\0";

pub const NAME_TOKENIZER_ID: Pubkey = pubkey!("nftD3vbNkNqfj2Sd3HZwbpw4BxxKWr4AjGb9X38JeZk");
pub const NFT_RECORD_SEED: &[u8] = b"nft_record";
/// tag (1) + nonce (1) + name account (32) + owner (32) + nft mint (32)
pub const NFT_RECORD_LEN: usize = 98;
const NFT_RECORD_MINT_OFFSET: usize = 66;
/// SPL token account: mint (32) + owner (32) + amount (8) ...
const TOKEN_ACCOUNT_MIN_LEN: usize = 72;

/// Who a name account says owns the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOwner {
    Direct(Pubkey),
    /// Held as an NFT; the holder must be looked up through the mint.
    Tokenized,
}

pub fn hashed_name(name: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(HASH_PREFIX.as_bytes());
    hasher.update(name.as_bytes());
    hasher.finalize().into()
}

/// Address of the name account for `hashed` under `parent` (no class).
pub fn name_account_key(hashed: &[u8; 32], parent: &Pubkey) -> Pubkey {
    let class = [0u8; 32];
    let (key, _bump) = Pubkey::find_program_address(
        &[hashed.as_ref(), class.as_ref(), parent.as_ref()],
        &NAME_PROGRAM_ID,
    );
    key
}

/// Derives the name account for a normalized domain (`"imbibed"` or `"sub.imbibed"`).
pub fn domain_key(name: &str) -> anyhow::Result<Pubkey> {
    let labels: Vec<&str> = name.split('.').collect();
    if labels.iter().any(|l| l.is_empty()) {
        return Err(anyhow::anyhow!("Malformed SNS name: '{}'", name));
    }

    match labels.as_slice() {
        [domain] => Ok(name_account_key(&hashed_name(domain), &SOL_ROOT_DOMAIN)),
        [sub, domain] => {
            let parent = name_account_key(&hashed_name(domain), &SOL_ROOT_DOMAIN);
            let hashed = hashed_name(&format!("{}{}", SUBDOMAIN_PREFIX, sub));
            Ok(name_account_key(&hashed, &parent))
        }
        _ => Err(anyhow::anyhow!(
            "Unsupported SNS name '{}': at most one subdomain level",
            name
        )),
    }
}

fn read_pubkey(data: &[u8], offset: usize) -> Option<Pubkey> {
    let bytes: [u8; 32] = data.get(offset..offset + 32)?.try_into().ok()?;
    let key = Pubkey::new_from_array(bytes);
    if key == Pubkey::default() {
        None
    } else {
        Some(key)
    }
}

/// Reads the owner out of a name account header.
///
/// Short data and the all-zero key both mean there is no owner.
pub fn owner_from_account_data(data: &[u8]) -> Option<Pubkey> {
    if data.len() < HEADER_LEN {
        return None;
    }
    read_pubkey(data, 32)
}

/// Like [`owner_from_account_data`], but tells tokenized domains apart.
pub fn classify_owner(data: &[u8]) -> Option<NameOwner> {
    let owner = owner_from_account_data(data)?;
    if owner == tokenizer_central_state() {
        Some(NameOwner::Tokenized)
    } else {
        Some(NameOwner::Direct(owner))
    }
}

pub fn tokenizer_central_state() -> Pubkey {
    let (key, _bump) =
        Pubkey::find_program_address(&[NAME_TOKENIZER_ID.as_ref()], &NAME_TOKENIZER_ID);
    key
}

pub fn nft_record_key(name_account: &Pubkey) -> Pubkey {
    let (key, _bump) = Pubkey::find_program_address(
        &[NFT_RECORD_SEED, name_account.as_ref()],
        &NAME_TOKENIZER_ID,
    );
    key
}

pub fn nft_mint_from_record_data(data: &[u8]) -> Option<Pubkey> {
    if data.len() < NFT_RECORD_LEN {
        return None;
    }
    read_pubkey(data, NFT_RECORD_MINT_OFFSET)
}

/// Owner of an SPL token account, if it holds exactly one token of `mint`.
pub fn nft_holder_from_token_account(data: &[u8], mint: &Pubkey) -> Option<Pubkey> {
    if data.len() < TOKEN_ACCOUNT_MIN_LEN || read_pubkey(data, 0)? != *mint {
        return None;
    }
    let amount = u64::from_le_bytes(data[64..72].try_into().ok()?);
    if amount != 1 {
        return None;
    }
    read_pubkey(data, 32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_round_trip_base58() {
        assert_eq!(
            NAME_PROGRAM_ID.to_string(),
            "namesLPneVptA9Z5rqUDD9tMTWEJwofgaYwp8cawRkX"
        );
        assert_eq!(
            SOL_ROOT_DOMAIN.to_string(),
            "58PwtjSDuFHuUkYjH9BYnnQKHfwo9reZhC2zMJv9JPkx"
        );
    }

    #[test]
    fn hashed_name_is_prefixed_sha256() {
        let expected: [u8; 32] = Sha256::digest(b"SPL Name Serviceimbibed").into();
        assert_eq!(hashed_name("imbibed"), expected);
        assert_ne!(hashed_name("imbibed"), hashed_name("imbibe"));
    }

    #[test]
    fn domain_key_matches_known_account() {
        assert_eq!(
            domain_key("bonfida").unwrap(),
            pubkey!("Crf8hzfthWGbGbLTVCiqRqV5MVnbpHB1L9KQMd6gsinb")
        );
    }

    #[test]
    fn domain_key_is_deterministic_and_off_curve() {
        let a = domain_key("imbibed").unwrap();
        let b = domain_key("imbibed").unwrap();
        assert_eq!(a, b);
        assert!(!a.is_on_curve());
        assert_ne!(a, domain_key("bonfida").unwrap());
    }

    #[test]
    fn subdomain_hangs_off_parent() {
        let parent = domain_key("imbibed").unwrap();
        let sub = domain_key("bar.imbibed").unwrap();
        assert_ne!(sub, parent);
        assert_eq!(sub, name_account_key(&hashed_name("\0bar"), &parent));
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert!(domain_key("a.b.c").is_err());
        assert!(domain_key(".imbibed").is_err());
        assert!(domain_key("imbibed.").is_err());
    }

    #[test]
    fn owner_is_read_from_header() {
        let owner = Pubkey::new_unique();
        let mut data = vec![0u8; HEADER_LEN + 10];
        data[32..64].copy_from_slice(owner.as_ref());
        assert_eq!(owner_from_account_data(&data), Some(owner));

        assert_eq!(owner_from_account_data(&data[..HEADER_LEN - 1]), None);
        assert_eq!(owner_from_account_data(&vec![0u8; HEADER_LEN]), None);
    }

    fn header_with_owner(owner: &Pubkey) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data[32..64].copy_from_slice(owner.as_ref());
        data
    }

    #[test]
    fn central_state_owner_marks_domain_tokenized() {
        let central = tokenizer_central_state();
        assert_eq!(
            classify_owner(&header_with_owner(&central)),
            Some(NameOwner::Tokenized)
        );

        let owner = Pubkey::new_unique();
        assert_eq!(
            classify_owner(&header_with_owner(&owner)),
            Some(NameOwner::Direct(owner))
        );
        assert_eq!(classify_owner(&[0u8; 10]), None);
    }

    #[test]
    fn nft_record_is_derived_under_tokenizer() {
        let name_account = domain_key("imbibed").unwrap();
        let (expected, _) = Pubkey::find_program_address(
            &[&b"nft_record"[..], name_account.as_ref()],
            &NAME_TOKENIZER_ID,
        );
        assert_eq!(nft_record_key(&name_account), expected);
        assert_ne!(nft_record_key(&name_account), name_account);
    }

    #[test]
    fn nft_mint_is_read_from_record() {
        let mint = Pubkey::new_unique();
        let mut record = vec![0u8; NFT_RECORD_LEN];
        record[0] = 1;
        record[2..34].copy_from_slice(domain_key("imbibed").unwrap().as_ref());
        record[34..66].copy_from_slice(Pubkey::new_unique().as_ref());
        record[66..98].copy_from_slice(mint.as_ref());

        assert_eq!(nft_mint_from_record_data(&record), Some(mint));
        assert_eq!(nft_mint_from_record_data(&record[..NFT_RECORD_LEN - 1]), None);
    }

    fn token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; 165];
        data[0..32].copy_from_slice(mint.as_ref());
        data[32..64].copy_from_slice(owner.as_ref());
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data
    }

    #[test]
    fn nft_holder_requires_matching_mint_and_single_token() {
        let mint = Pubkey::new_unique();
        let holder = Pubkey::new_unique();

        assert_eq!(
            nft_holder_from_token_account(&token_account(&mint, &holder, 1), &mint),
            Some(holder)
        );
        assert_eq!(
            nft_holder_from_token_account(&token_account(&mint, &holder, 0), &mint),
            None
        );
        let other_mint = token_account(&Pubkey::new_unique(), &holder, 1);
        assert_eq!(nft_holder_from_token_account(&other_mint, &mint), None);
        assert_eq!(nft_holder_from_token_account(&[0u8; 40], &mint), None);
    }
}
