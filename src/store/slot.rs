use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};

use crate::common::{warn, Error, ErrorKind};
use crate::core::principal::Principal;
use crate::store::SessionSlot;
use crate::Result;

const SLOT_FILE: &str = "session.slot";

// File backed session slot.
//
// Layout: a fixed header followed by the serialized principal.
//   body_bytes   u64
//   timestamp_ms i64   written-at, milliseconds since epoch UTC
//   crc_checksum u32   over the body
//   body         serde_json encoded principal
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    const HEADER_BYTES: usize = 8 + 8 + 4;

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SLOT_FILE),
        }
    }
}

#[async_trait]
impl SessionSlot for FileSlot {
    async fn load(&self) -> Result<Option<Principal>> {
        let file = match fs::File::open(&self.path).await {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match decode(BufReader::new(file)).await {
            Ok(principal) => Ok(Some(principal)),
            // A slot that does not decode is an absent session, not an
            // error. The stale file is dropped so the next store starts
            // clean.
            Err(err) if err.is_decode() => {
                warn!(path = %self.path.display(), %err, "Drop undecodable session slot");
                self.clear().await?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn store(&self, principal: &Principal) -> Result<()> {
        let body = serde_json::to_vec(principal)
            .map_err(|err| crate::CustodiaError::Internal(err.to_string()))?;

        let mut file = fs::File::create(&self.path).await?;
        file.write_u64(body.len() as u64).await?;
        file.write_i64(Utc::now().timestamp_millis()).await?;
        file.write_u32(crc32fast::hash(&body)).await?;
        file.write_all(&body).await?;
        file.flush().await?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

async fn decode<R>(mut reader: R) -> std::result::Result<Principal, Error>
where
    R: AsyncReadExt + Unpin,
{
    let body_bytes = read_header_field(reader.read_u64().await)? as usize;
    let _timestamp_ms = read_header_field(reader.read_i64().await)?;
    let crc_checksum = read_header_field(reader.read_u32().await)?;

    // The length field is untrusted input; `take` bounds the read, so no
    // allocation happens up front and an absurd value fails the
    // truncation check below instead of exhausting memory.
    let mut body = Vec::new();
    reader
        .take(body_bytes as u64)
        .read_to_end(&mut body)
        .await
        .map_err(Error::from)?;

    if body.len() != body_bytes {
        return Err(ErrorKind::SlotDecode {
            description: format!("body truncated: {}/{} bytes", body.len(), body_bytes),
        }
        .into());
    }

    if crc32fast::hash(&body) != crc_checksum {
        return Err(ErrorKind::SlotDecode {
            description: "crc checksum mismatch".to_owned(),
        }
        .into());
    }

    serde_json::from_slice(&body).map_err(|err| {
        ErrorKind::SlotDecode {
            description: err.to_string(),
        }
        .into()
    })
}

// A short read while parsing the header means the slot is truncated, which
// is a decode failure rather than an io error.
fn read_header_field<T>(result: io::Result<T>) -> std::result::Result<T, Error> {
    result.map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ErrorKind::SlotDecode {
                description: "header truncated".to_owned(),
            }
            .into()
        } else {
            Error::from(err)
        }
    })
}
