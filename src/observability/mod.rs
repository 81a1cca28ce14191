//! 可观测性：tracing 订阅器由宿主进程（二进制入口）初始化，库代码只发事件

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 安装全局订阅器：默认 info，可通过 RUST_LOG 覆盖；重复调用返回 Err 而不是 panic
pub fn init() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
}
