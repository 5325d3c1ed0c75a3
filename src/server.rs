//! 服务器运行与优雅关闭
//!
//! 收到关闭信号后立即停止接收新连接并开始排空，
//! 排空时长受 shutdown_timeout_secs 约束，超时则放弃剩余连接。

use axum::Router;
use std::future::{Future, IntoFuture};
use std::time::Duration;
use tokio::net::TcpListener;

/// 运行服务器直到 shutdown 完成，然后在限时内排空连接
pub async fn run(
    listener: TcpListener,
    app: Router,
    shutdown_timeout_secs: u64,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(());

    tokio::spawn(async move {
        shutdown.await;
        let _ = shutdown_tx.send(());
    });

    let mut drain_rx = shutdown_rx.clone();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = drain_rx.changed().await;
            tracing::info!("Starting graceful shutdown");
        })
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = server.as_mut() => result,
        _ = shutdown_rx.changed() => {
            match tokio::time::timeout(
                Duration::from_secs(shutdown_timeout_secs),
                server.as_mut(),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!("Graceful shutdown timeout reached, aborting open connections");
                    Ok(())
                }
            }
        }
    }
}
