//! 认证与授权模块
//!
//! - [`jwt`] - JWT 令牌服务
//! - [`middleware`] - 认证/角色中间件

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUser, require_auth, require_role};
