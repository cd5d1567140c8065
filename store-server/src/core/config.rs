use std::path::PathBuf;

use chrono_tz::Tz;

use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/store-server | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | TIMEZONE | UTC | 业务时区 (考勤日期换算) |
/// | JWT_SECRET | (开发环境自动生成) | JWT 密钥 |
/// | JWT_EXPIRATION_MINUTES | 1440 | 令牌有效期 (分钟) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/store HTTP_PORT=8080 TIMEZONE=Asia/Shanghai cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、头像、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 业务时区 — 考勤记录的"日期"按该时区的日历日计算
    pub timezone: Tz,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值。无法解析的 TIMEZONE 回退为 UTC。
    pub fn from_env() -> Self {
        let timezone = std::env::var("TIMEZONE")
            .ok()
            .and_then(|tz| {
                tz.parse::<Tz>()
                    .map_err(|e| tracing::warn!("Invalid TIMEZONE '{}': {}, using UTC", tz, e))
                    .ok()
            })
            .unwrap_or(Tz::UTC);

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/store-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库目录: work_dir/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 头像目录: work_dir/profiles
    pub fn profiles_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("profiles")
    }

    /// 日志目录: work_dir/logs
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 创建工作目录结构 (database / profiles / logs)
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.profiles_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_and_dirs() {
        let config = Config::with_overrides("/tmp/store-test", 0);
        assert_eq!(config.work_dir, "/tmp/store-test");
        assert_eq!(config.http_port, 0);
        assert_eq!(config.database_dir(), PathBuf::from("/tmp/store-test/database"));
        assert_eq!(config.profiles_dir(), PathBuf::from("/tmp/store-test/profiles"));
    }
}
