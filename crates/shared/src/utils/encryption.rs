use ring::aead::{
    Aad, BoundKey, Nonce, NonceSequence, OpeningKey, SealingKey, UnboundKey, AES_256_GCM,
};
use ring::digest;
use ring::error::Unspecified;
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid key length (expected 32 bytes)")]
    InvalidKeyLength,

    #[error("Invalid encrypted data format")]
    InvalidFormat,
}

impl From<Unspecified> for CryptoError {
    fn from(_: Unspecified) -> Self {
        CryptoError::EncryptionFailed("Cryptographic operation failed".to_string())
    }
}

struct SingleNonceSequence {
    nonce: [u8; NONCE_LEN],
}

impl SingleNonceSequence {
    fn new(nonce: [u8; NONCE_LEN]) -> Self {
        Self { nonce }
    }
}

impl NonceSequence for SingleNonceSequence {
    fn advance(&mut self) -> Result<Nonce, Unspecified> {
        Nonce::try_assume_unique_for_key(&self.nonce)
    }
}

/// Encrypts, decrypts and masks card numbers with an AES-256-GCM key
/// injected at startup. Ciphertext layout: `[nonce (12)][ciphertext + tag]`,
/// with a fresh random nonce per encryption.
pub struct CardCipher {
    key: [u8; KEY_LEN],
    rng: SystemRandom,
}

impl CardCipher {
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength);
        }
        let mut owned = [0u8; KEY_LEN];
        owned.copy_from_slice(key);
        Ok(Self {
            key: owned,
            rng: SystemRandom::new(),
        })
    }

    pub fn encrypt(&self, plain: &str) -> Result<Vec<u8>, CryptoError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng.fill(&mut nonce_bytes).map_err(|_| {
            CryptoError::EncryptionFailed("Failed to generate nonce".to_string())
        })?;

        let unbound_key = UnboundKey::new(&AES_256_GCM, &self.key)?;
        let mut sealing_key = SealingKey::new(unbound_key, SingleNonceSequence::new(nonce_bytes));

        let mut in_out = plain.as_bytes().to_vec();
        sealing_key
            .seal_in_place_append_tag(Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::EncryptionFailed("Sealing failed".to_string()))?;

        let mut result = Vec::with_capacity(NONCE_LEN + in_out.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&in_out);

        Ok(result)
    }

    pub fn decrypt(&self, encrypted: &[u8]) -> Result<String, CryptoError> {
        if encrypted.len() < NONCE_LEN {
            return Err(CryptoError::InvalidFormat);
        }

        let mut nonce_bytes = [0u8; NONCE_LEN];
        nonce_bytes.copy_from_slice(&encrypted[..NONCE_LEN]);

        let unbound_key = UnboundKey::new(&AES_256_GCM, &self.key)?;
        let mut opening_key = OpeningKey::new(unbound_key, SingleNonceSequence::new(nonce_bytes));

        let mut in_out = encrypted[NONCE_LEN..].to_vec();
        let decrypted = opening_key
            .open_in_place(Aad::empty(), &mut in_out)
            .map_err(|_| CryptoError::DecryptionFailed("Opening failed".to_string()))?;

        String::from_utf8(decrypted.to_vec())
            .map_err(|_| CryptoError::DecryptionFailed("Invalid UTF-8".to_string()))
    }

    /// Display form of a card number: only the last four digits survive.
    /// Works on plaintext only; callers must decrypt first.
    pub fn mask(card_number: &str) -> String {
        if card_number.len() < 4 {
            return "****".to_string();
        }
        let last4 = &card_number[card_number.len() - 4..];
        format!("**** **** **** {last4}")
    }

    /// Deterministic hex SHA-256 of the plaintext number. GCM ciphertexts
    /// are randomized, so uniqueness of card numbers is enforced on this
    /// fingerprint at the storage layer.
    pub fn fingerprint(card_number: &str) -> String {
        let hash = digest::digest(&digest::SHA256, card_number.as_bytes());
        hex::encode(hash.as_ref())
    }
}
