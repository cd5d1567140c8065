//! Store Server - 店铺后端服务
//!
//! # 架构概述
//!
//! 提供以下核心功能：
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系，基于角色的授权
//! - **存储** (`db`): SQLite 键值存储 (按键原子读写 + 前缀扫描)
//! - **业务服务** (`services`): 身份提供方、头像文件存储、用户导出
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、角色中间件
//! ├── services/      # 身份、文件存储、导出
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # KV 存储和 repository
//! └── utils/         # 错误、日志、时间、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   _____ __
  / ___// /_____  ________
  \__ \/ __/ __ \/ ___/ _ \
 ___/ / /_/ /_/ / /  /  __/
/____/\__/\____/_/   \___/
    "#
    );
}

/// 设置运行环境 (dotenv + 日志)
///
/// 必须在读取 [`Config`] 之前调用，保证 .env 中的变量可见。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
