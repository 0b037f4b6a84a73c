//! TLS transport setup.

use crate::error::{DeliveryError, Result};
use rustls::pki_types::ServerName;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio_rustls::{
    TlsConnector,
    client::TlsStream,
    rustls::{ClientConfig, RootCertStore},
};

/// Connects to the submission host over implicit TLS.
///
/// Any failure here — DNS, TCP, hostname validation, or the TLS handshake —
/// means no session ever existed.
///
/// # Errors
///
/// Returns [`DeliveryError::ConnectionFailed`] if the connection or handshake
/// fails.
pub async fn connect_tls(hostname: &str, port: u16) -> Result<TlsStream<TcpStream>> {
    let addr = format!("{hostname}:{port}");
    let tcp_stream = TcpStream::connect(&addr)
        .await
        .map_err(|e| DeliveryError::ConnectionFailed(e.to_string()))?;

    let connector = create_tls_connector();
    let server_name = ServerName::try_from(hostname.to_string())
        .map_err(|_| DeliveryError::ConnectionFailed(format!("invalid hostname: {hostname}")))?;

    connector
        .connect(server_name, tcp_stream)
        .await
        .map_err(|e| DeliveryError::ConnectionFailed(e.to_string()))
}

/// Creates a TLS connector with the bundled web PKI roots.
fn create_tls_connector() -> TlsConnector {
    let root_store = RootCertStore {
        roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
    };

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    TlsConnector::from(Arc::new(config))
}
