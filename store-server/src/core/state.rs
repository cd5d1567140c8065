use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::{Kv, MemoryKv, SqliteKv};
use crate::services::{FileStorage, IdentityProvider, LocalIdentityProvider};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是服务器的核心数据结构，注入每个 handler。
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | kv | Kv | 键值存储 (接口注入，测试可替换为内存实现) |
/// | identity | Arc<dyn IdentityProvider> | 身份提供方 (注册/登录/令牌验证) |
/// | storage | FileStorage | 头像文件存储 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 键值存储
    pub kv: Kv,
    /// 身份提供方
    pub identity: Arc<dyn IdentityProvider>,
    /// 头像文件存储
    pub storage: FileStorage,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("kv", &self.kv)
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替；测试中用
    /// [`ServerState::in_memory`] 获得无磁盘依赖的状态。
    pub fn new(
        config: Config,
        kv: Kv,
        identity: Arc<dyn IdentityProvider>,
        storage: FileStorage,
    ) -> Self {
        Self {
            config,
            kv,
            identity,
            storage,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (database / profiles / logs)
    /// 2. SQLite KV 存储 (work_dir/database/store.db)
    /// 3. 身份提供方和文件存储
    ///
    /// # Panics
    ///
    /// 工作目录或数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("store.db");
        let sqlite = SqliteKv::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let kv = Kv::new(Arc::new(sqlite));

        let jwt = JwtService::with_config(config.jwt.clone());
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(LocalIdentityProvider::new(kv.clone(), jwt));
        let storage = FileStorage::new(config.profiles_dir());

        Self::new(config.clone(), kv, identity, storage)
    }

    /// 构造内存态服务器状态 (测试用)
    ///
    /// KV 使用 [`MemoryKv`]，头像落在指定目录 (通常是 tempdir)。
    pub fn in_memory(config: Config, profiles_dir: std::path::PathBuf) -> Self {
        let kv = Kv::new(Arc::new(MemoryKv::new()));
        let jwt = JwtService::with_config(config.jwt.clone());
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(LocalIdentityProvider::new(kv.clone(), jwt));
        let storage = FileStorage::new(profiles_dir);
        Self::new(config, kv, identity, storage)
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.config.work_dir)
    }
}
