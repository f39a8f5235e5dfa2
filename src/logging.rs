use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// tracing 初始化
///
/// `RUST_LOG` 优先；未设置时默认 warn，`--verbose` 时 debug。
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
