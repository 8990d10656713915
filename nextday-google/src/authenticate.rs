//! Interactive browser consent with a local callback listener.

use google_calendar::Client;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

use crate::app_config::ClientSecret;
use crate::error::{ProviderError, ProviderResult};
use crate::session::{SCOPES, StoredCredential};

/// Bind an OS-assigned port, send the user to Google's consent screen and
/// block until the browser is redirected back with an authorization code.
pub async fn run_consent_flow(secret: &ClientSecret) -> ProviderResult<StoredCredential> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|e| ProviderError::Auth(format!("Failed to bind OAuth callback listener: {e}")))?;

    let port = listener
        .local_addr()
        .map_err(|e| ProviderError::Auth(format!("Failed to read callback address: {e}")))?
        .port();

    let scopes: Vec<String> = SCOPES.iter().map(|s| s.to_string()).collect();

    let mut client = Client::new(
        secret.client_id.clone(),
        secret.client_secret.clone(),
        redirect_uri(port),
        String::new(),
        String::new(),
    );

    let auth_url = client.user_consent_url(&scopes);

    eprintln!("\nOpen this URL in your browser to authenticate:\n");
    eprintln!("{}\n", auth_url);

    // Try to open the browser automatically
    if open::that(&auth_url).is_err() {
        eprintln!("(Could not open browser automatically, please copy the URL above)");
    }

    let (code, state) = wait_for_callback(listener).await?;

    eprintln!("\nReceived authorization code, exchanging for tokens...");

    let token = client
        .get_access_token(&code, &state)
        .await
        .map_err(|e| ProviderError::Auth(format!("Failed to exchange authorization code: {e}")))?;

    eprintln!("Authentication successful!");

    Ok(StoredCredential::from_access_token(&token, secret, None))
}

fn redirect_uri(port: u16) -> String {
    format!("http://localhost:{}/callback", port)
}

async fn wait_for_callback(listener: TcpListener) -> ProviderResult<(String, String)> {
    let auth_err = |what: &str, e: std::io::Error| ProviderError::Auth(format!("{what}: {e}"));

    let (stream, _) = listener
        .accept()
        .await
        .map_err(|e| auth_err("Failed to accept OAuth callback", e))?;

    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .await
        .map_err(|e| auth_err("Failed to read OAuth callback request line", e))?;

    let parsed = parse_callback(&request_line);

    let body = match &parsed {
        Ok(_) => "<h1>Authentication successful!</h1>\
            <p>You can close this window and return to the terminal.</p>",
        Err(_) => "<h1>Authentication failed</h1>\
            <p>Return to the terminal for details.</p>",
    };

    // Send a response to the browser
    let response = format!(
        "HTTP/1.1 200 OK\r\n\
        Content-Type: text/html\r\n\
        Connection: close\r\n\
        \r\n\
        <html><body>{body}</body></html>"
    );

    let mut stream = reader.into_inner();
    stream
        .write_all(response.as_bytes())
        .await
        .map_err(|e| auth_err("Failed to write OAuth callback response", e))?;
    stream
        .flush()
        .await
        .map_err(|e| auth_err("Failed to flush OAuth callback response", e))?;

    parsed
}

/// Pull `code` and `state` out of the redirect's request line,
/// e.g. `GET /callback?state=x&code=y HTTP/1.1`.
fn parse_callback(request_line: &str) -> ProviderResult<(String, String)> {
    let url_part = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ProviderError::Auth("Invalid HTTP request on callback".to_string()))?;

    let url = url::Url::parse(&format!("http://localhost{}", url_part))
        .map_err(|e| ProviderError::Auth(format!("Invalid callback URL: {e}")))?;

    let param = |name: &str| {
        url.query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.to_string())
    };

    if let Some(error) = param("error") {
        return Err(ProviderError::Auth(format!("Consent was not granted: {error}")));
    }

    let code = param("code")
        .ok_or_else(|| ProviderError::Auth("No code in callback".to_string()))?;
    let state = param("state")
        .ok_or_else(|| ProviderError::Auth("No state in callback".to_string()))?;

    Ok((code, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_callback_extracts_code_and_state() {
        let (code, state) = parse_callback(
            "GET /callback?state=abc&code=4%2F0AeaYSH&scope=https://www.googleapis.com/auth/calendar.readonly HTTP/1.1\r\n",
        )
        .unwrap();

        assert_eq!(code, "4/0AeaYSH");
        assert_eq!(state, "abc");
    }

    #[test]
    fn test_parse_callback_reports_denied_consent() {
        let err = parse_callback("GET /callback?error=access_denied&state=abc HTTP/1.1").unwrap_err();
        assert!(err.to_string().contains("access_denied"));
    }

    #[test]
    fn test_parse_callback_requires_code() {
        assert!(parse_callback("GET /callback?state=abc HTTP/1.1").is_err());
        assert!(parse_callback("").is_err());
    }

    #[tokio::test]
    async fn test_wait_for_callback_reads_redirect() {
        use tokio::io::AsyncReadExt;
        use tokio::net::TcpStream;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let browser = tokio::spawn(async move {
            let mut stream = TcpStream::connect(addr).await.unwrap();
            stream
                .write_all(b"GET /callback?code=4%2F0Aea&state=xyz HTTP/1.1\r\nHost: localhost\r\n\r\n")
                .await
                .unwrap();

            let mut response = String::new();
            stream.read_to_string(&mut response).await.unwrap();
            response
        });

        let (code, state) = wait_for_callback(listener).await.unwrap();
        assert_eq!(code, "4/0Aea");
        assert_eq!(state, "xyz");

        let response = browser.await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("Authentication successful!"));
    }

    #[test]
    fn test_redirect_uri_uses_bound_port() {
        assert_eq!(redirect_uri(53682), "http://localhost:53682/callback");
    }
}
