use blockmerge_catalog::{BlockAttributes, BoundingBox};
use blockmerge_lookup::{HttpLookup, LookupError, LookupSource};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve one canned response per accepted connection
async fn serve(responses: Vec<(&'static str, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await.unwrap();

            let reply = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        }
    });

    format!("http://{addr}/blocks")
}

#[tokio::test]
async fn test_success_decodes_attributes() {
    let base = serve(vec![(
        "200 OK",
        r#"{"transparent":false,"filterLight":15,"emitLight":7,"boundingBox":"block"}"#,
    )])
    .await;
    let lookup = HttpLookup::new(base, Duration::from_secs(5)).unwrap();

    let attributes = lookup.get("magma_block").await.unwrap();

    assert_eq!(attributes, BlockAttributes::new(false, 15, 7, BoundingBox::BLOCK));
}

#[tokio::test]
async fn test_status_mapping() {
    let base = serve(vec![("404 Not Found", "{}"), ("503 Service Unavailable", "{}")]).await;
    let lookup = HttpLookup::new(base, Duration::from_secs(5)).unwrap();

    assert_eq!(
        lookup.get("kelp").await,
        Err(LookupError::NotFound("kelp".into()))
    );
    assert!(matches!(lookup.get("kelp").await, Err(LookupError::Unavailable(_))));
}

#[tokio::test]
async fn test_garbage_body_is_decode_error() {
    let base = serve(vec![("200 OK", "not json")]).await;
    let lookup = HttpLookup::new(base, Duration::from_secs(5)).unwrap();

    assert!(matches!(lookup.get("kelp").await, Err(LookupError::Decode(_))));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let lookup = HttpLookup::new(format!("http://{addr}"), Duration::from_secs(5)).unwrap();

    assert!(matches!(lookup.get("kelp").await, Err(LookupError::Transport(_))));
}
