//! Axum-based HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use tipjar_controller::TipJarController;
use tipjar_ledger::LedgerProvider;
use tipjar_wallet_core::WalletProvider;

use crate::error::WebError;
use crate::routes::router;

pub struct WebServer<W, L> {
    pub addr: SocketAddr,
    pub controller: Arc<TipJarController<W, L>>,
}

impl<W, L> WebServer<W, L>
where
    W: WalletProvider + 'static,
    L: LedgerProvider + 'static,
{
    pub fn new(addr: SocketAddr, controller: Arc<TipJarController<W, L>>) -> Self {
        Self { addr, controller }
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn run(
        self,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), WebError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| WebError::Bind {
                addr: self.addr.to_string(),
                source,
            })?;
        let local = listener.local_addr()?;
        info!("tip jar listening on http://{}", local);

        axum::serve(listener, router(self.controller))
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("tip jar server stopped");
        Ok(())
    }
}
