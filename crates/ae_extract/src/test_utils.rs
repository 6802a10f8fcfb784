//! Local HTTP fixtures so fetch tests never leave the machine.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const SAMPLE_ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Understanding Ownership in Rust</title>
</head>
<body>
  <nav class="menu">
    <a href="/">Home</a> <a href="/about">About</a> <a href="/subscribe">Subscribe</a>
  </nav>
  <div id="main">
    <article class="post-content">
      <h1>Understanding Ownership in Rust</h1>
      <p>Ownership is the set of rules that governs how a Rust program manages memory.
      Every value has a single owner, and the value is dropped when that owner goes out of scope.
      This simple rule removes a whole class of bugs without needing a garbage collector.</p>
      <p>References let code use a value without taking ownership of it. The borrow checker
      enforces that there is either one mutable reference or any number of shared references,
      never both at the same time, which rules out data races at compile time.</p>
      <p>Lifetimes describe how long references stay valid. Most of the time the compiler infers
      them, but function signatures that return references sometimes need explicit lifetimes so
      that callers know which argument the returned reference borrows from.</p>
      <p>Taken together, ownership, borrowing and lifetimes give Rust memory safety with the
      performance characteristics of languages that manage memory by hand, which is why so many
      systems programmers have started to adopt it for new projects.</p>
    </article>
  </div>
  <footer class="footer">Copyright 2024</footer>
</body>
</html>
"#;

/// Serve a single HTTP response with `status` and `body`, then stop.
/// Returns the URL to request.
pub async fn serve_once(status: u16, body: impl Into<String>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    let body = body.into();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request = vec![0u8; 8192];
            let _ = socket.read(&mut request).await;

            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason(status),
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/posts/ownership", addr)
}

/// Accept one connection and never answer it, holding the socket open
/// for `hold`. Returns the URL to request.
pub async fn serve_silently(hold: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");

    tokio::spawn(async move {
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(hold).await;
            drop(socket);
        }
    });

    format!("http://{}/slow", addr)
}

/// A URL on a local port nothing listens on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    drop(listener);
    format!("http://{}/gone", addr)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
