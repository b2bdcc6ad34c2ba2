// Cache path utilities.
// Maps storage keys to files under the cache root.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

/// Longest encoded key used directly as a file stem.
/// Most filesystems cap a file name at 255 bytes.
const MAX_STEM_LEN: usize = 200;

/// Encoded bytes kept in front of the hash when a key is too long.
const HASHED_PREFIX_LEN: usize = 64;

/// Separates the prefix from the hash. Never produced by [`encode_key`].
const HASH_SEPARATOR: char = '~';

/// Get the default cache directory (~/.cache/kickstart on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kickstart").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one file per storage key.
pub fn storage_dir(root: &Path) -> PathBuf {
    root.join("storage")
}

/// File stem for a storage key.
///
/// Short keys use their encoding directly. Longer ones keep an encoded prefix
/// followed by the SHA-256 of the full key, and the key itself is written
/// next to the entry (see [`key_path`]).
pub fn entry_stem(key: &str) -> String {
    let encoded = encode_key(key);
    if encoded.len() <= MAX_STEM_LEN {
        return encoded;
    }

    // Encoded text is ASCII, so any byte index is a char boundary
    let digest = Sha256::digest(key.as_bytes());
    format!(
        "{}{}{:x}",
        &encoded[..HASHED_PREFIX_LEN],
        HASH_SEPARATOR,
        digest
    )
}

/// Whether a stem came from the hashed form of [`entry_stem`].
pub fn is_hashed_stem(stem: &str) -> bool {
    stem.contains(HASH_SEPARATOR)
}

/// Path to the file backing a storage key.
pub fn entry_path(root: &Path, key: &str) -> PathBuf {
    entry_path_for_stem(root, &entry_stem(key))
}

pub fn entry_path_for_stem(root: &Path, stem: &str) -> PathBuf {
    storage_dir(root).join(format!("{}.json", stem))
}

/// Path to the file holding the full key of a hashed entry.
pub fn key_path(root: &Path, stem: &str) -> PathBuf {
    storage_dir(root).join(format!("{}.key", stem))
}

/// Path to the application log file.
pub fn log_path(root: &Path) -> PathBuf {
    root.join("kickstart.log")
}

/// Encode a key for use as a file name.
/// Bytes outside `[A-Za-z0-9._-]` become `%XX`, so distinct keys never share a file.
pub fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => encoded.push(byte as char),
            // A leading dot would make "." or ".." or a hidden file
            b'.' if !encoded.is_empty() => encoded.push('.'),
            _ => {
                let _ = write!(encoded, "%{:02X}", byte);
            }
        }
    }
    encoded
}

/// Inverse of [`encode_key`]. Returns None for names it could not have produced.
pub fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = name.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
