use crate::{EncryptedString, KeelError, Result, TypeConverter, Value};
use aes::Aes256;
use base64::{Engine, engine::general_purpose::STANDARD};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use log::error;
use rand::RngCore;
use std::fmt::{self, Debug};

type Encryptor = cbc::Encryptor<Aes256>;
type Decryptor = cbc::Decryptor<Aes256>;

const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;

/// [`EncryptedString`] values are stored AES-256-CBC encrypted.
///
/// The wire text is `base64(ciphertext)@base64(iv)`, every encryption uses a fresh random IV so
/// equal plain texts never produce equal ciphertexts.
#[derive(Clone)]
pub struct EncryptedStringTypeConverter {
    key: [u8; KEY_LEN],
}

impl EncryptedStringTypeConverter {
    /// The key must be exactly 32 bytes long.
    pub fn new(key: &[u8]) -> Result<Self> {
        let key = key.try_into().map_err(|_| {
            KeelError::invalid_argument(
                "key",
                format!("expected {} bytes, found {}", KEY_LEN, key.len()),
            )
        })?;
        Ok(Self { key })
    }

    /// Key given as standard base64 text.
    pub fn from_base64(key: &str) -> Result<Self> {
        let key = STANDARD
            .decode(key.trim())
            .map_err(|e| KeelError::invalid_argument("key", e.to_string()))?;
        Self::new(&key)
    }

    pub fn encrypt(&self, plain_text: &str) -> Result<String> {
        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);
        let cipher = Encryptor::new_from_slices(&self.key, &iv)
            .map_err(|e| KeelError::InvalidCiphertext(e.to_string()))?;
        let cipher_text = cipher.encrypt_padded_vec_mut::<Pkcs7>(plain_text.as_bytes());
        let mut result = STANDARD.encode(cipher_text);
        result.push('@');
        result.push_str(&STANDARD.encode(iv));
        Ok(result)
    }

    pub fn decrypt(&self, wire_text: &str) -> Result<String> {
        let invalid = |message: String| {
            let error = KeelError::InvalidCiphertext(message);
            error!("{:#}", error);
            crate::Error::from(error)
        };
        let Some((cipher_text, iv)) = wire_text.split_once('@') else {
            return Err(invalid("the `@` separator between ciphertext and IV is missing".into()));
        };
        let cipher_text = STANDARD
            .decode(cipher_text)
            .map_err(|e| invalid(format!("ciphertext: {}", e)))?;
        let iv = STANDARD
            .decode(iv)
            .map_err(|e| invalid(format!("IV: {}", e)))?;
        if iv.len() != IV_LEN {
            return Err(invalid(format!(
                "the IV must be {} bytes, found {}",
                IV_LEN,
                iv.len()
            )));
        }
        let plain_text = Decryptor::new_from_slices(&self.key, &iv)
            .map_err(|e| invalid(e.to_string()))?
            .decrypt_padded_vec_mut::<Pkcs7>(&cipher_text)
            .map_err(|_| invalid("wrong key or corrupted ciphertext".into()))?;
        String::from_utf8(plain_text).map_err(|e| invalid(e.to_string()))
    }
}

impl Debug for EncryptedStringTypeConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedStringTypeConverter")
            .finish_non_exhaustive()
    }
}

impl TypeConverter for EncryptedStringTypeConverter {
    fn can_convert(&self, prototype: &Value) -> bool {
        matches!(prototype, Value::Encrypted(..))
    }

    fn to_wire(&self, value: Value, _prototype: &Value) -> Result<Value> {
        match value {
            Value::Encrypted(Some(v)) => Ok(Value::Varchar(Some(self.encrypt(&v)?))),
            Value::Encrypted(None) => Ok(Value::Varchar(None)),
            v => Err(KeelError::conversion(v.type_name(), "expected an encrypted string").into()),
        }
    }

    fn from_wire(&self, value: Value, prototype: &Value) -> Result<Value> {
        match value {
            v if v.is_null() => Ok(prototype.clone()),
            Value::Varchar(Some(v)) => Ok(Value::Encrypted(Some(EncryptedString::new(
                self.decrypt(&v)?,
            )))),
            v => Err(KeelError::conversion(
                v.type_name(),
                "an encrypted string can only be read from a string",
            )
            .into()),
        }
    }
}
