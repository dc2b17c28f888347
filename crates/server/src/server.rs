//! Line-delimited JSON over TCP.
//!
//! Each request is one JSON object terminated by `\n`; each reply is one
//! [`Envelope`] on its own line, in request order. Connections are independent
//! and share one [`ArenaHandle`].
use std::net::SocketAddr;

use anyhow::Result;
use arena_runtime::{ArenaHandle, ArenaStore, Envelope, RuntimeError};
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

/// Accepts connections until the listener fails.
pub async fn serve<S>(
    listener: TcpListener,
    handle: ArenaHandle<S>,
    max_line_bytes: usize,
) -> Result<()>
where
    S: ArenaStore + 'static,
{
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!(%peer, "connection accepted");

        let handle = handle.clone();
        tokio::spawn(async move {
            if let Err(err) = connection(stream, peer, handle, max_line_bytes).await {
                warn!(%peer, error = %err, "connection closed with error");
            }
        });
    }
}

async fn connection<S>(
    stream: TcpStream,
    peer: SocketAddr,
    handle: ArenaHandle<S>,
    max_line_bytes: usize,
) -> Result<()>
where
    S: ArenaStore + 'static,
{
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = Vec::new();

    loop {
        line.clear();
        let limit = max_line_bytes as u64 + 1;
        let read = (&mut reader).take(limit).read_until(b'\n', &mut line).await?;
        if read == 0 {
            break;
        }

        if line.last() != Some(&b'\n') && line.len() > max_line_bytes {
            warn!(%peer, max_line_bytes, "request line too long");
            let err =
                RuntimeError::InvalidRequest(format!("request exceeds {max_line_bytes} bytes"));
            reply(&mut write_half, &Envelope::err(&err)).await?;
            if !skip_line(&mut reader).await? {
                break;
            }
            continue;
        }

        let Ok(text) = std::str::from_utf8(&line) else {
            let err = RuntimeError::InvalidRequest("request is not valid UTF-8".into());
            reply(&mut write_half, &Envelope::err(&err)).await?;
            continue;
        };
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        let envelope = handle.execute_json(text).await;
        reply(&mut write_half, &envelope).await?;
    }

    debug!(%peer, "connection closed");
    Ok(())
}

/// Discards input up to and including the next newline. Returns `false` at EOF.
async fn skip_line<R>(reader: &mut R) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            return Ok(false);
        }
        match buf.iter().position(|&byte| byte == b'\n') {
            Some(end) => {
                reader.consume(end + 1);
                return Ok(true);
            }
            None => {
                let len = buf.len();
                reader.consume(len);
            }
        }
    }
}

async fn reply<W>(writer: &mut W, envelope: &Envelope) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut payload = envelope.to_json()?;
    payload.push('\n');
    writer.write_all(payload.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Binds `addr` and logs the bound address.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "arena server listening");
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use arena_content::ContentFactory;
    use arena_core::{PlayerRecord, UserId};
    use arena_runtime::{Arena, InMemoryStore};
    use serde_json::{Value, json};
    use tokio::net::tcp::OwnedReadHalf;

    async fn start(max_line_bytes: usize) -> SocketAddr {
        let content = ContentFactory::embedded();
        let users = vec![PlayerRecord::new(UserId(1), "ana"), PlayerRecord::new(UserId(2), "bo")];
        let arena = Arena::builder(InMemoryStore::with_users(users))
            .config(content.load_config().expect("embedded config"))
            .catalog_data(content.load_catalog().expect("embedded catalog"))
            .build()
            .expect("arena should build");

        let listener = bind("127.0.0.1:0".parse().unwrap()).await.expect("bind");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, arena.into_handle(), max_line_bytes));
        addr
    }

    async fn next(lines: &mut tokio::io::Lines<BufReader<OwnedReadHalf>>) -> Value {
        let line = lines.next_line().await.expect("read").expect("reply line");
        serde_json::from_str(&line).expect("reply is JSON")
    }

    #[tokio::test]
    async fn replies_in_request_order() {
        let addr = start(ServerConfig::DEFAULT_MAX_LINE_BYTES).await;
        let (read_half, mut write_half) = TcpStream::connect(addr).await.unwrap().into_split();
        let mut lines = BufReader::new(read_half).lines();

        let requests = [
            json!({"action": "find_match", "player_id": 1}),
            json!({"action": "find_match", "player_id": 2}),
            json!({"action": "user_stats", "user_id": 9}),
        ];
        let mut payload = String::new();
        for request in &requests {
            payload.push_str(&request.to_string());
            payload.push('\n');
        }
        payload.push('\n');
        write_half.write_all(payload.as_bytes()).await.unwrap();

        let queued = next(&mut lines).await;
        assert_eq!(queued["data"]["searching"], json!(true));

        let matched = next(&mut lines).await;
        assert_eq!(matched["data"]["matched"], json!(true));
        assert_eq!(matched["data"]["opponent_id"], json!(1));

        let missing = next(&mut lines).await;
        assert_eq!(missing["success"], json!(false));
        assert_eq!(missing["error"]["status"], json!(404));
    }

    #[tokio::test]
    async fn oversized_line_is_rejected_and_skipped() {
        let addr = start(32).await;
        let (read_half, mut write_half) = TcpStream::connect(addr).await.unwrap().into_split();
        let mut lines = BufReader::new(read_half).lines();

        let long = format!("{{\"action\":\"catalog\",\"pad\":\"{}\"}}\n", "x".repeat(64));
        write_half.write_all(long.as_bytes()).await.unwrap();

        let rejected = next(&mut lines).await;
        assert_eq!(rejected["error"]["kind"], json!("invalid_argument"));

        write_half
            .write_all(b"{\"action\":\"catalog\"}\n")
            .await
            .unwrap();
        let catalog = next(&mut lines).await;
        assert_eq!(catalog["success"], json!(true));
    }
}
