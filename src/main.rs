//! 员工目录服务主入口

use staff_directory::{
    auth::{password::PasswordHasher, token::TokenCodec},
    bootstrap,
    config::AppConfig,
    db,
    handlers::health,
    middleware::AppState,
    repository::{CredentialStore, UserRepository},
    routes,
    server,
    services::{AnalyticsService, AuthService, UserService},
    telemetry,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ===== CLI 参数处理 =====
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" => {
                println!("staff-directory {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("未知参数: {}", args[1]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    // 加载 .env 文件（开发环境）
    // 按优先级加载：.env.local > .env.development > .env
    // 生产环境应该直接设置环境变量，不依赖 .env 文件
    if let Ok(path) = std::env::var("STAFF_ENV") {
        dotenv::from_filename(format!(".env.{}", path)).ok();
    } else {
        dotenv::from_filename(".env.local").ok();
        dotenv::from_filename(".env.development").ok();
        dotenv::dotenv().ok();
    }

    // 设置应用启动时间
    health::set_start_time();

    // 1. 加载配置
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;

    // 2. 初始化日志与指标
    telemetry::init_telemetry(&config);
    telemetry::init_metrics();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.security.environment,
        "Staff directory service starting..."
    );

    // 3. 数据库连接池 + 迁移
    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    tracing::info!("Database initialized");

    // 4. 组装认证组件与服务
    let repository = UserRepository::new(db_pool.clone());
    let store: Arc<dyn CredentialStore> = Arc::new(repository.clone());

    let hasher = Arc::new(PasswordHasher::with_concurrency(
        config.security.hash_concurrency,
    ));
    let tokens = Arc::new(TokenCodec::from_config(&config)?);

    // 引导管理员（幂等）
    bootstrap::ensure_admin(&store, &hasher, &config.admin).await?;

    let app_state = Arc::new(AppState {
        config: config.clone(),
        db: db_pool.clone(),
        auth_service: Arc::new(AuthService::new(store, hasher, tokens)),
        user_service: Arc::new(UserService::new(repository.clone())),
        analytics_service: Arc::new(AnalyticsService::new(repository)),
    });

    // 5. 构建路由
    let app = routes::create_router(app_state);

    // 6. 启动服务器
    let addr = &config.server.addr;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        "Server listening"
    );

    // 7. 运行直到收到关闭信号，排空时长受配置约束
    server::run(
        listener,
        app,
        config.server.graceful_shutdown_timeout_secs,
        shutdown_signal(),
    )
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// 等待关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Terminate signal received, starting graceful shutdown");
        },
    }
}

/// 打印帮助信息
fn print_help() {
    println!("staff-directory {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("用法: staff-directory [选项]");
    println!();
    println!("选项:");
    println!("  --version     打印版本信息并退出");
    println!("  --help        打印此帮助信息并退出");
    println!();
    println!("环境变量:");
    println!("  所有配置通过环境变量完成");
    println!("  可用选项请参考 .env.example");
}
