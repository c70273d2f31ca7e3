use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};

/// Encodes a response into its wire form.
///
/// Text bodies are followed by an extra blank line; binary bodies are the
/// last bytes of the message so the payload reaches the client unaltered.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128 + resp.body.len());

    // Status line
    buf.extend_from_slice(resp.status_line.to_string().as_bytes());
    buf.extend_from_slice(b"\r\n");

    // Headers
    for header in &resp.headers {
        buf.extend_from_slice(header.to_string().as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    match &resp.body {
        Body::Text(text) => {
            buf.extend_from_slice(text.as_bytes());
            buf.extend_from_slice(b"\r\n\r\n");
        }
        Body::Binary(bytes) => buf.extend_from_slice(bytes),
    }

    buf
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.written
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }
        stream.flush().await?;

        Ok(())
    }
}
