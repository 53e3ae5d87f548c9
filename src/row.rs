//! # Row and Row Codec
//!
//! A row is the fixed 293-byte record stored in every leaf cell:
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  --------------------------------------
//! 0       4     id (u32, little-endian)
//! 4       33    username (NUL-padded byte buffer)
//! 37      256   email (NUL-padded byte buffer)
//! ```
//!
//! The struct itself is the on-disk image: `#[repr(C)]` with unaligned
//! little-endian fields, so serialization is a byte copy in both directions
//! and the layout cannot drift from the documented offsets.
//!
//! The codec is deliberately dumb. It never inspects the string bytes; a NUL
//! embedded in the input survives the round trip and merely shortens what
//! [`Row::username`] and [`Row::email`] report back. Length validation is the
//! statement-preparation layer's job; the constructor copies at most the
//! column capacity.

use std::borrow::Cow;
use std::fmt;

use eyre::{ensure, Result};
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::config::{EMAIL_SIZE, ROW_SIZE, USERNAME_SIZE};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct Row {
    id: U32,
    username: [u8; USERNAME_SIZE],
    email: [u8; EMAIL_SIZE],
}

const _: () = assert!(std::mem::size_of::<Row>() == ROW_SIZE);

impl Row {
    pub fn new(id: u32, username: &str, email: &str) -> Self {
        let mut row = Self {
            id: U32::new(id),
            username: [0u8; USERNAME_SIZE],
            email: [0u8; EMAIL_SIZE],
        };
        copy_truncated(&mut row.username, username.as_bytes());
        copy_truncated(&mut row.email, email.as_bytes());
        row
    }

    pub fn id(&self) -> u32 {
        self.id.get()
    }

    /// The username prefix up to the first NUL byte.
    pub fn username(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(until_nul(&self.username))
    }

    /// The email prefix up to the first NUL byte.
    pub fn email(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(until_nul(&self.email))
    }

    /// Writes the 293-byte row image into `dst`.
    pub fn serialize(&self, dst: &mut [u8]) -> Result<()> {
        ensure!(
            dst.len() == ROW_SIZE,
            "row buffer size mismatch: {} != {}",
            dst.len(),
            ROW_SIZE
        );
        dst.copy_from_slice(self.as_bytes());
        Ok(())
    }

    /// Reads a row back from its 293-byte image.
    pub fn deserialize(src: &[u8]) -> Result<Self> {
        ensure!(
            src.len() == ROW_SIZE,
            "row buffer size mismatch: {} != {}",
            src.len(),
            ROW_SIZE
        );
        Self::read_from_bytes(src).map_err(|e| eyre::eyre!("failed to read row: {:?}", e))
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id(), self.username(), self.email())
    }
}

fn copy_truncated(dst: &mut [u8], src: &[u8]) {
    let len = src.len().min(dst.len());
    dst[..len].copy_from_slice(&src[..len]);
}

fn until_nul(buf: &[u8]) -> &[u8] {
    match buf.iter().position(|&b| b == 0) {
        Some(end) => &buf[..end],
        None => buf,
    }
}
