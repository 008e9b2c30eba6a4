//! 存储层的瞬时故障重试
//!
//! 每条 SQL 语句都经过 [`with_retry`]。只有连接池超时、死锁、锁等待和
//! SQLite BUSY/LOCKED 会被重放；唯一约束冲突等业务错误直接返回，
//! increment 的插入竞争由 `ActivityService` 自己处理。

use std::future::Future;
use std::time::Duration;

use rand::RngExt;
use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// 可重放的数据库错误码
///
/// MySQL 1213/1205，Postgres 40001/40P01，SQLite 5/6。
const TRANSIENT_CODES: &[(&str, &str)] = &[
    ("1213", "deadlock"),
    ("1205", "lock wait timeout"),
    ("40001", "serialization failure"),
    ("40P01", "deadlock"),
    ("5", "database busy"),
    ("6", "table locked"),
];

/// 驱动没有给出错误码时按消息匹配
const TRANSIENT_MESSAGES: &[&str] = &[
    "deadlock",
    "lock wait timeout",
    "database is locked",
    "serialization failure",
];

/// 返回错误属于哪类瞬时故障，`None` 表示不应重试
pub fn transient_reason(err: &DbErr) -> Option<&'static str> {
    match err {
        DbErr::ConnectionAcquire(_) => Some("connection pool exhausted"),
        DbErr::Conn(_) => Some("connection lost"),
        DbErr::Exec(runtime) | DbErr::Query(runtime) => runtime_reason(runtime),
        _ => None,
    }
}

fn runtime_reason(err: &RuntimeErr) -> Option<&'static str> {
    let message = match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            let code = sqlx_err
                .as_database_error()
                .and_then(|db_err| db_err.code());
            if let Some(code) = code {
                return TRANSIENT_CODES
                    .iter()
                    .find(|(known, _)| *known == code.as_ref())
                    .map(|(_, reason)| *reason);
            }
            sqlx_err.to_string()
        }
        RuntimeErr::Internal(msg) => msg.clone(),
        #[allow(unreachable_patterns)]
        _ => return None,
    };

    let message = message.to_lowercase();
    TRANSIENT_MESSAGES
        .iter()
        .find(|needle| message.contains(*needle))
        .copied()
}

/// 重试次数与退避区间，来自 `[database]` 配置段
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }
}

impl RetryConfig {
    /// 第 `retry` 次重放前的等待上限（不含抖动），retry 从 1 开始
    fn ceiling_ms(&self, retry: u32) -> u64 {
        let factor = 1u64
            .checked_shl(retry.saturating_sub(1))
            .unwrap_or(u64::MAX);
        self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms)
    }

    /// 等待时间 = 上限 + 最多 25% 的随机抖动
    fn delay_for(&self, retry: u32) -> Duration {
        let ceiling = self.ceiling_ms(retry);
        let jitter = rand::rng().random_range(0..=ceiling / 4);
        Duration::from_millis(ceiling.saturating_add(jitter))
    }
}

/// 执行 `statement`，遇到瞬时故障时按退避重放，最多 `max_retries` 次
pub async fn with_retry<T, F, Fut>(
    operation_name: &str,
    config: RetryConfig,
    mut statement: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut retries = 0;
    loop {
        let err = match statement().await {
            Ok(value) => {
                if retries > 0 {
                    debug!("{} succeeded after {} retries", operation_name, retries);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        let Some(reason) = transient_reason(&err) else {
            return Err(err);
        };
        if retries >= config.max_retries {
            warn!(
                "{} gave up after {} retries ({}): {}",
                operation_name, retries, reason, err
            );
            return Err(err);
        }

        retries += 1;
        let delay = config.delay_for(retries);
        warn!(
            "{} hit {} (retry {}/{}), waiting {} ms",
            operation_name,
            reason,
            retries,
            config.max_retries,
            delay.as_millis()
        );
        tokio::time::sleep(delay).await;
    }
}
