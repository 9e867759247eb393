use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::audit::{AuditLogger, AuditSink, AuditWorker};
use crate::core::Config;
use crate::db;
use crate::db::repository::OrderRepository;
use crate::orders::{OrderService, RandomFailure};
use crate::utils::AppResult;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc/克隆句柄实现浅拷贝，每个请求克隆的成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | orders | OrderService | 幂等提交编排器 |
/// | audit | AuditLogger | 审计日志句柄 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 订单提交服务
    pub orders: OrderService,
    /// 审计日志句柄
    pub audit: AuditLogger,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database) + 表结构和唯一索引
    /// 3. 审计日志 worker (后台任务，work_dir/logs/orders.log)
    /// 4. 订单服务 (注入配置的故障概率)
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure().map_err(|e| {
            crate::utils::AppError::internal(format!(
                "Failed to create work directory structure: {e}"
            ))
        })?;

        // 1. Database + schema
        let db = db::connect(&config.database_dir()).await?;

        // 2. Audit pipeline: bounded queue, single detached worker
        let (audit, rx) = AuditLogger::new(config.audit_queue_size);
        let sink = AuditSink::new(config.audit_log_path());
        tokio::spawn(AuditWorker::new(sink).run(rx));

        // 3. Order service
        let repo = OrderRepository::new(db.clone());
        let failure = Arc::new(RandomFailure::new(config.failure_probability));
        let orders = OrderService::new(repo, failure, audit.clone());

        Ok(Self {
            config: config.clone(),
            db,
            orders,
            audit,
        })
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
